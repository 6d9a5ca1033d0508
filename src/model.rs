use crate::calculator::BusinessLenError;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Weekday};
#[cfg(feature = "serde")]
use serde::Serialize;
use std::collections::BTreeMap;

/// Nombre de jours dans une semaine de travail (lundi = 0 … dimanche = 6).
pub const DAYS_PER_WEEK: usize = 7;

/// Plus grande heure de fin acceptée : une plage peut se terminer à minuit.
pub const MAX_END_HOUR: u8 = 24;

const NINE_TO_FIVE: WorkWindow = WorkWindow { start: 9, end: 17 };

/// Semaine par défaut : du lundi au vendredi, 9h–17h.
pub const DEFAULT_WORKWEEK: WeeklySchedule = WeeklySchedule {
    days: [
        Some(NINE_TO_FIVE),
        Some(NINE_TO_FIVE),
        Some(NINE_TO_FIVE),
        Some(NINE_TO_FIVE),
        Some(NINE_TO_FIVE),
        None,
        None,
    ],
};

/// Plage de travail d'une journée, heures pleines `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkWindow {
    start: u8,
    end: u8,
}

impl WorkWindow {
    /// Valide `0 <= start <= 23`, `0 <= end <= 24` et `start < end`.
    pub fn new(start: i64, end: i64) -> Result<Self, BusinessLenError> {
        if !(0..=23).contains(&start) {
            return Err(BusinessLenError::InvalidSchedule(format!(
                "start hour {start} out of range 0..=23"
            )));
        }
        if !(0..=i64::from(MAX_END_HOUR)).contains(&end) {
            return Err(BusinessLenError::InvalidSchedule(format!(
                "end hour {end} out of range 0..={MAX_END_HOUR}"
            )));
        }
        if start >= end {
            return Err(BusinessLenError::InvalidSchedule(format!(
                "start hour {start} must be before end hour {end}"
            )));
        }
        // bornes vérifiées ci-dessus
        Ok(Self {
            start: start as u8,
            end: end as u8,
        })
    }

    pub fn start(&self) -> u8 {
        self.start
    }

    pub fn end(&self) -> u8 {
        self.end
    }

    /// Largeur brute de la plage, pause déjeuner comprise.
    pub fn width(&self) -> u8 {
        self.end - self.start
    }

    pub fn contains_hour(&self, hour: u8) -> bool {
        self.start <= hour && hour < self.end
    }
}

/// Horaires hebdomadaires : une plage optionnelle par jour de semaine.
///
/// Une valeur construite est toujours valide ; il n'existe aucun moyen
/// d'obtenir un planning partiellement vérifié.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklySchedule {
    days: [Option<WorkWindow>; DAYS_PER_WEEK],
}

impl Default for WeeklySchedule {
    fn default() -> Self {
        DEFAULT_WORKWEEK
    }
}

impl WeeklySchedule {
    /// Construit un planning depuis des couples `(début, fin)` indexés du lundi au dimanche.
    pub fn new(days: [Option<(i64, i64)>; DAYS_PER_WEEK]) -> Result<Self, BusinessLenError> {
        let mut out = [None; DAYS_PER_WEEK];
        for (slot, day) in out.iter_mut().zip(days) {
            *slot = day.map(|(start, end)| WorkWindow::new(start, end)).transpose()?;
        }
        Ok(Self { days: out })
    }

    /// Valide une table `jour -> heures` au format libre (fichier de configuration).
    ///
    /// Les clés doivent être exactement `0..=6`, dans l'ordre ; chaque valeur est
    /// soit vide (jour non travaillé), soit `[début, fin]`.
    pub fn from_entries<I>(entries: I) -> Result<Self, BusinessLenError>
    where
        I: IntoIterator<Item = (i64, Vec<i64>)>,
    {
        let mut days = [None; DAYS_PER_WEEK];
        let mut count = 0usize;
        for (expected, (key, hours)) in entries.into_iter().enumerate() {
            if expected >= DAYS_PER_WEEK {
                return Err(BusinessLenError::InvalidSchedule(format!(
                    "expected {DAYS_PER_WEEK} week days, got more"
                )));
            }
            if key != expected as i64 {
                return Err(BusinessLenError::InvalidSchedule(format!(
                    "unexpected week day key {key} (expected {expected})"
                )));
            }
            days[expected] = match hours.as_slice() {
                [] => None,
                [start, end] => Some(WorkWindow::new(*start, *end)?),
                other => {
                    return Err(BusinessLenError::InvalidSchedule(format!(
                        "week day {key}: expected [] or [start, end], got {} values",
                        other.len()
                    )))
                }
            };
            count += 1;
        }
        if count != DAYS_PER_WEEK {
            return Err(BusinessLenError::InvalidSchedule(format!(
                "expected {DAYS_PER_WEEK} week days, got {count}"
            )));
        }
        Ok(Self { days })
    }

    /// Forme libre inverse de [`WeeklySchedule::from_entries`].
    pub fn entries(&self) -> BTreeMap<i64, Vec<i64>> {
        self.days
            .iter()
            .enumerate()
            .map(|(idx, day)| {
                let hours = day
                    .map(|w| vec![i64::from(w.start), i64::from(w.end)])
                    .unwrap_or_default();
                (idx as i64, hours)
            })
            .collect()
    }

    pub fn window(&self, weekday: Weekday) -> Option<WorkWindow> {
        self.days[weekday.num_days_from_monday() as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Weekday, Option<WorkWindow>)> + '_ {
        self.days
            .iter()
            .enumerate()
            .map(|(idx, day)| (weekday_from_index(idx), *day))
    }
}

fn weekday_from_index(idx: usize) -> Weekday {
    match idx {
        0 => Weekday::Mon,
        1 => Weekday::Tue,
        2 => Weekday::Wed,
        3 => Weekday::Thu,
        4 => Weekday::Fri,
        5 => Weekday::Sat,
        _ => Weekday::Sun,
    }
}

/// Intervalle de requête (heure locale naïve), `end >= start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Interval {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl Interval {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, BusinessLenError> {
        if end < start {
            return Err(BusinessLenError::InvalidInterval);
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }
}

/// Lit un instant `YYYY-MM-DD[( |T)HH:MM[:SS]]` ; une date seule vaut minuit.
pub fn parse_instant(raw: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];
    let raw = raw.trim();
    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .map(|d| d.and_time(NaiveTime::MIN))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tcb() -> Vec<(i64, Vec<i64>)> {
        vec![
            (0, vec![8, 17]),
            (1, vec![8, 17]),
            (2, vec![8, 17]),
            (3, vec![8, 17]),
            (4, vec![8, 17]),
            (5, vec![8, 12]),
            (6, vec![]),
        ]
    }

    #[test]
    fn accepts_valid_schedule() {
        let schedule = WeeklySchedule::from_entries(tcb()).unwrap();
        assert_eq!(schedule.window(Weekday::Sat).unwrap().width(), 4);
        assert!(schedule.window(Weekday::Sun).is_none());
        assert_eq!(schedule.entries().into_iter().collect::<Vec<_>>(), tcb());
    }

    #[test]
    fn rejects_missing_days() {
        let entries = vec![(0, vec![]), (1, vec![]), (2, vec![])];
        assert!(matches!(
            WeeklySchedule::from_entries(entries),
            Err(BusinessLenError::InvalidSchedule(_))
        ));
    }

    #[test]
    fn rejects_wrong_day_keys() {
        let mut entries = tcb();
        entries[6].0 = 7;
        assert!(WeeklySchedule::from_entries(entries).is_err());
    }

    #[test]
    fn rejects_malformed_hours() {
        for bad in [vec![0, 0, -1], vec![0, 25], vec![0, 0], vec![9], vec![-1, 5]] {
            let mut entries = tcb();
            entries[0].1 = bad.clone();
            assert!(
                WeeklySchedule::from_entries(entries).is_err(),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn window_may_end_at_midnight() {
        let w = WorkWindow::new(18, 24).unwrap();
        assert_eq!(w.width(), 6);
        assert!(w.contains_hour(23));
        assert!(WorkWindow::new(24, 24).is_err());
    }

    #[test]
    fn default_workweek_is_nine_to_five() {
        let schedule = WeeklySchedule::default();
        assert_eq!(schedule, DEFAULT_WORKWEEK);
        let mon = schedule.window(Weekday::Mon).unwrap();
        assert_eq!((mon.start(), mon.end()), (9, 17));
        assert_eq!(schedule.iter().filter(|(_, w)| w.is_some()).count(), 5);
    }

    #[test]
    fn interval_rejects_end_before_start() {
        let a = parse_instant("2020-01-02T08:00:00").unwrap();
        let b = parse_instant("2020-01-02 07:59").unwrap();
        assert_eq!(Interval::new(a, b), Err(BusinessLenError::InvalidInterval));
        assert!(Interval::new(a, a).is_ok());
    }

    #[test]
    fn parses_dates_and_datetimes() {
        let midnight = parse_instant("2020-01-01").unwrap();
        assert_eq!(midnight.to_string(), "2020-01-01 00:00:00");
        assert!(parse_instant("01/01/2020").is_none());
    }
}
