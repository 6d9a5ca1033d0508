use crate::offdays::OffDaysError;
use thiserror::Error;

/// Heure de déjeuner par défaut.
pub const DEFAULT_LUNCH_HOUR: u8 = 12;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BusinessLenError {
    #[error("invalid interval: end must not be before start")]
    InvalidInterval,
    #[error("invalid workweek schedule: {0}")]
    InvalidSchedule(String),
    #[error("invalid lunch hour: {0} (expected 0..=23)")]
    InvalidLunchHour(String),
    #[error("invalid offdays: {0}")]
    InvalidOffDays(#[from] OffDaysError),
}

impl BusinessLenError {
    /// Code numérique historique (1 intervalle, 2 planning, 3 jours off, 4 déjeuner).
    pub fn code(&self) -> u8 {
        match self {
            BusinessLenError::InvalidInterval => 1,
            BusinessLenError::InvalidSchedule(_) => 2,
            BusinessLenError::InvalidOffDays(_) => 3,
            BusinessLenError::InvalidLunchHour(_) => 4,
        }
    }
}
