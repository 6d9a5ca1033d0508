mod decompose;
mod table;
mod types;
mod util;

pub use table::{WorkHourTable, HOURS_PER_DAY};
pub use types::{BusinessLenError, DEFAULT_LUNCH_HOUR};

use crate::holidays::Country;
use crate::model::{Interval, WeeklySchedule, DEFAULT_WORKWEEK};
use crate::offdays::{HolidayProvider, OffDaySet};
use crate::report::WorkDuration;
use chrono::NaiveDateTime;
use decompose::WorkCalendar;
use std::sync::Arc;

/// Configuration validée : horaires hebdomadaires, pause déjeuner et jours off.
///
/// Immuable une fois construite ; les requêtes ne stockent aucun résultat, une
/// même instance peut donc être partagée entre threads.
#[derive(Debug, Clone)]
pub struct BusinessLen {
    schedule: WeeklySchedule,
    lunch_hour: u8,
    offdays: OffDaySet,
    table: WorkHourTable,
}

impl Default for BusinessLen {
    /// Lundi–vendredi 9h–17h, déjeuner à midi, jours fériés fédéraux US.
    fn default() -> Self {
        Self::from_parts(
            DEFAULT_WORKWEEK,
            DEFAULT_LUNCH_HOUR,
            OffDaySet::from_calendar(Arc::new(Country::UnitedStates)),
        )
    }
}

impl BusinessLen {
    pub fn new(
        schedule: WeeklySchedule,
        lunch_hour: i64,
        offdays: OffDaySet,
    ) -> Result<Self, BusinessLenError> {
        let lunch_hour = validate_lunch_hour(lunch_hour)?;
        Ok(Self::from_parts(schedule, lunch_hour, offdays))
    }

    /// Jours off fournis par `provider` pour `country_code`.
    pub fn with_country(
        schedule: WeeklySchedule,
        lunch_hour: i64,
        country_code: &str,
        provider: &dyn HolidayProvider,
    ) -> Result<Self, BusinessLenError> {
        let lunch_hour = validate_lunch_hour(lunch_hour)?;
        let offdays = provider.holidays_for(country_code)?;
        Ok(Self::from_parts(schedule, lunch_hour, offdays))
    }

    /// Assemblage sans contrôle, pour un déjeuner déjà validé.
    pub(crate) fn from_parts(schedule: WeeklySchedule, lunch_hour: u8, offdays: OffDaySet) -> Self {
        let table = WorkHourTable::build(&schedule, lunch_hour);
        #[cfg(feature = "logging")]
        tracing::debug!(lunch_hour, ?schedule, "business calendar configured");
        Self {
            schedule,
            lunch_hour,
            offdays,
            table,
        }
    }

    pub fn schedule(&self) -> &WeeklySchedule {
        &self.schedule
    }

    pub fn lunch_hour(&self) -> u8 {
        self.lunch_hour
    }

    pub fn offdays(&self) -> &OffDaySet {
        &self.offdays
    }

    pub fn table(&self) -> &WorkHourTable {
        &self.table
    }

    /// Vrai si l'heure contenant `at` est travaillée (plage, déjeuner et jours off compris).
    pub fn is_work_hour(&self, at: NaiveDateTime) -> bool {
        self.calendar().is_work_hour(at)
    }

    /// Heures travaillées entre `start` et `end` ; échoue si `end < start`.
    pub fn hours(&self, start: NaiveDateTime, end: NaiveDateTime) -> Result<f64, BusinessLenError> {
        let hours = decompose::checked_work_hours(&self.calendar(), start, end)?;
        #[cfg(feature = "logging")]
        tracing::debug!(%start, %end, hours, "work hours computed");
        Ok(hours)
    }

    /// Comme [`BusinessLen::hours`], avec les conversions jours / minutes / secondes.
    pub fn measure(
        &self,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<WorkDuration, BusinessLenError> {
        self.hours(start, end).map(WorkDuration::from_hours)
    }

    pub fn measure_interval(&self, interval: Interval) -> WorkDuration {
        WorkDuration::from_hours(decompose::work_hours(&self.calendar(), interval))
    }

    fn calendar(&self) -> WorkCalendar<'_> {
        WorkCalendar {
            table: &self.table,
            schedule: &self.schedule,
            lunch_hour: self.lunch_hour,
            offdays: &self.offdays,
        }
    }
}

/// `0..=23` ; toute autre valeur est refusée.
pub(crate) fn validate_lunch_hour(raw: i64) -> Result<u8, BusinessLenError> {
    u8::try_from(raw)
        .ok()
        .filter(|h| *h <= 23)
        .ok_or_else(|| BusinessLenError::InvalidLunchHour(raw.to_string()))
}
