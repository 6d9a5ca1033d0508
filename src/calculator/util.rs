use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};

pub(super) const SECONDS_PER_HOUR: f64 = 3600.0;

pub(super) fn round_down_hour(dt: NaiveDateTime) -> NaiveDateTime {
    round_down_date(dt) + Duration::hours(i64::from(dt.hour()))
}

pub(super) fn round_down_date(dt: NaiveDateTime) -> NaiveDateTime {
    dt.date().and_time(NaiveTime::MIN)
}

/// Part de l'heure déjà écoulée (minutes et secondes).
pub(super) fn elapsed_in_hour(dt: NaiveDateTime) -> f64 {
    f64::from(dt.minute()) / 60.0 + f64::from(dt.second()) / SECONDS_PER_HOUR
}

/// Secondes pleines entre deux instants, en heures.
pub(super) fn elapsed_hours(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
    (to - from).num_seconds() as f64 / SECONDS_PER_HOUR
}
