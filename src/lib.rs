#![forbid(unsafe_code)]
//! BusinessLen — calcul d'heures ouvrées entre deux instants (sans fuseau horaire).
//!
//! - Horaires hebdomadaires par jour, pause déjeuner exclue.
//! - Jours off : fériés d'un pays (calendrier intégré) ou liste de dates.
//! - Requêtes pures : la configuration est immuable et partageable.

pub mod calculator;
pub mod holidays;
pub mod model;
pub mod offdays;
pub mod report;

#[cfg(feature = "serde")]
pub mod config;
#[cfg(feature = "serde")]
pub mod io;
#[cfg(feature = "serde")]
pub mod storage;

pub use calculator::{BusinessLen, BusinessLenError, WorkHourTable, DEFAULT_LUNCH_HOUR};
pub use holidays::{BuiltinHolidays, Country};
pub use model::{Interval, WeeklySchedule, WorkWindow, DEFAULT_WORKWEEK};
pub use offdays::{HolidayCalendar, HolidayProvider, OffDaySet, OffDaysError};
pub use report::{DurationRenderer, TextDuration, WorkDuration, HOURS_PER_WORKDAY};

#[cfg(feature = "serde")]
pub use config::{OffDaysSpec, Settings};
#[cfg(feature = "serde")]
pub use storage::{ConfigStore, JsonConfigStore};
