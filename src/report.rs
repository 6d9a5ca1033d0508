use crate::model::Interval;
use chrono::NaiveDateTime;
#[cfg(feature = "serde")]
use serde::{ser::SerializeStruct, Serialize, Serializer};

/// Journée de référence pour la conversion en jours (indépendante du planning).
pub const HOURS_PER_WORKDAY: f64 = 8.0;

/// Résultat structuré d'une requête ; les conversions arrondissent, pas les heures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorkDuration {
    hours: f64,
}

impl WorkDuration {
    pub fn from_hours(hours: f64) -> Self {
        Self { hours }
    }

    pub fn hours(&self) -> f64 {
        self.hours
    }

    pub fn days(&self) -> f64 {
        self.hours / HOURS_PER_WORKDAY
    }

    pub fn minutes(&self) -> i64 {
        (self.hours * 60.0).round() as i64
    }

    pub fn seconds(&self) -> i64 {
        (self.hours * 3600.0).round() as i64
    }
}

/// Sérialisé avec toutes ses conversions, comme les colonnes de l'export CSV.
#[cfg(feature = "serde")]
impl Serialize for WorkDuration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut st = serializer.serialize_struct("WorkDuration", 4)?;
        st.serialize_field("hours", &self.hours())?;
        st.serialize_field("days", &self.days())?;
        st.serialize_field("minutes", &self.minutes())?;
        st.serialize_field("seconds", &self.seconds())?;
        st.end()
    }
}

/// Permet de customiser le rendu d'un résultat (texte, tableau, etc.).
pub trait DurationRenderer {
    fn render(&self, interval: Interval, duration: &WorkDuration) -> String;
}

/// Rendu texte sur une ligne.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextDuration;

impl DurationRenderer for TextDuration {
    fn render(&self, interval: Interval, duration: &WorkDuration) -> String {
        format!(
            "{start} -> {end}: {hours:.4} h ({days:.4} d, {minutes} min, {seconds} s)",
            start = fmt_instant(interval.start()),
            end = fmt_instant(interval.end()),
            hours = duration.hours(),
            days = duration.days(),
            minutes = duration.minutes(),
            seconds = duration.seconds(),
        )
    }
}

pub(crate) fn fmt_instant(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S").to_string()
}
