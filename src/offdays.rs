use crate::holidays::BuiltinHolidays;
use crate::model::parse_instant;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OffDaysError {
    #[error("unknown country code: {0}")]
    UnknownCountry(String),
    #[error("malformed date: {0}")]
    MalformedDate(String),
    #[error("expected a country code or a list of dates, got {0}")]
    UnsupportedSource(String),
}

/// Calendrier de jours fériés interrogeable date par date.
pub trait HolidayCalendar: fmt::Debug + Send + Sync {
    fn is_holiday(&self, date: NaiveDate) -> bool;
}

/// Fournisseur de calendriers par code pays ISO (injecté dans la configuration).
pub trait HolidayProvider {
    fn holidays_for(&self, country_code: &str) -> Result<OffDaySet, OffDaysError>;
}

#[derive(Debug, Clone)]
enum Source {
    Dates(BTreeSet<NaiveDate>),
    Calendar(Arc<dyn HolidayCalendar>),
}

/// Ensemble de journées entières non travaillées.
///
/// L'appartenance se teste uniquement sur la date civile ; l'heure n'entre
/// jamais en compte.
#[derive(Debug, Clone)]
pub struct OffDaySet {
    source: Source,
}

impl Default for OffDaySet {
    fn default() -> Self {
        Self::empty()
    }
}

impl OffDaySet {
    pub fn empty() -> Self {
        Self {
            source: Source::Dates(BTreeSet::new()),
        }
    }

    pub fn from_dates<I: IntoIterator<Item = NaiveDate>>(dates: I) -> Self {
        Self {
            source: Source::Dates(dates.into_iter().collect()),
        }
    }

    /// Les instants sont tronqués à leur date : `2020-01-01T12:00` exclut tout le 1er janvier.
    pub fn from_datetimes<I: IntoIterator<Item = NaiveDateTime>>(instants: I) -> Self {
        Self::from_dates(instants.into_iter().map(|dt| dt.date()))
    }

    /// Lit des dates textuelles (`YYYY-MM-DD`, éventuellement suivies d'une heure ignorée).
    pub fn parse_dates<I, S>(raw: I) -> Result<Self, OffDaysError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let instants = raw
            .into_iter()
            .map(|s| {
                let s = s.as_ref();
                parse_instant(s).ok_or_else(|| OffDaysError::MalformedDate(s.trim().to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::from_datetimes(instants))
    }

    pub fn from_calendar(calendar: Arc<dyn HolidayCalendar>) -> Self {
        Self {
            source: Source::Calendar(calendar),
        }
    }

    /// Jours fériés d'un pays connu du calendrier intégré.
    pub fn from_country(code: &str) -> Result<Self, OffDaysError> {
        BuiltinHolidays.holidays_for(code)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        match &self.source {
            Source::Dates(dates) => dates.contains(&date),
            Source::Calendar(calendar) => calendar.is_holiday(date),
        }
    }

    /// Dates explicites, `None` pour un calendrier à règles.
    pub fn explicit_dates(&self) -> Option<impl Iterator<Item = NaiveDate> + '_> {
        match &self.source {
            Source::Dates(dates) => Some(dates.iter().copied()),
            Source::Calendar(_) => None,
        }
    }
}

impl FromIterator<NaiveDate> for OffDaySet {
    fn from_iter<T: IntoIterator<Item = NaiveDate>>(iter: T) -> Self {
        Self::from_dates(iter)
    }
}
