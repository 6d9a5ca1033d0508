use super::{table::WorkHourTable, util, BusinessLenError};
use crate::model::{Interval, WeeklySchedule};
use crate::offdays::OffDaySet;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};

/// Vue en lecture seule sur tout ce dont le calcul a besoin.
pub(super) struct WorkCalendar<'a> {
    pub(super) table: &'a WorkHourTable,
    pub(super) schedule: &'a WeeklySchedule,
    pub(super) lunch_hour: u8,
    pub(super) offdays: &'a OffDaySet,
}

impl WorkCalendar<'_> {
    pub(super) fn is_work_hour(&self, at: NaiveDateTime) -> bool {
        !self.offdays.contains(at.date()) && self.table.is_work_hour(at.weekday(), at.hour())
    }

    /// Heures d'une journée entièrement couverte, sans parcourir ses 24 heures.
    fn whole_day_hours(&self, date: NaiveDate) -> f64 {
        let Some(window) = self.schedule.window(date.weekday()) else {
            return 0.0;
        };
        if self.offdays.contains(date) {
            return 0.0;
        }
        let mut hours = f64::from(window.width());
        if window.contains_hour(self.lunch_hour) {
            hours -= 1.0;
        }
        hours
    }

    /// Avance `cursor` d'heure en heure jusqu'à `until` (exclu) en comptant les heures travaillées.
    fn walk_forward(&self, mut cursor: NaiveDateTime, until: NaiveDateTime) -> f64 {
        let mut total = 0.0;
        while cursor < until {
            if self.is_work_hour(cursor) {
                total += 1.0;
            }
            cursor += Duration::hours(1);
        }
        total
    }

    /// Recule `cursor` d'heure en heure jusqu'à `until` ; chaque heure comptée est celle
    /// qui précède le curseur.
    fn walk_backward(&self, mut cursor: NaiveDateTime, until: NaiveDateTime) -> f64 {
        let mut total = 0.0;
        while cursor > until {
            cursor -= Duration::hours(1);
            if self.is_work_hour(cursor) {
                total += 1.0;
            }
        }
        total
    }
}

/// Total des heures travaillées dans l'intervalle.
///
/// 1. Début et fin dans la même heure : différence directe.
/// 2. Sinon, la fraction d'heure en fin puis celle en début sont comptées (selon
///    l'instant exact), et les bornes sont alignées sur l'heure.
/// 3. Même journée : parcours heure par heure. Sinon, parcours jusqu'à minuit de
///    chaque côté, et forfait par plage pour les journées intermédiaires.
pub(super) fn work_hours(calendar: &WorkCalendar<'_>, interval: Interval) -> f64 {
    let (start, end) = (interval.start(), interval.end());
    let start_date = start.date();
    let end_date = end.date();

    if start_date == end_date && start.hour() == end.hour() && calendar.is_work_hour(start) {
        return util::elapsed_hours(start, end);
    }

    let mut total = 0.0;

    if calendar.is_work_hour(end) {
        total += util::elapsed_in_hour(end);
    }
    let end = util::round_down_hour(end);

    // au-delà de `NaiveDateTime::MAX`, l'heure suivante est bornée par la fin de l'intervalle
    let next_hour = util::round_down_hour(start)
        .checked_add_signed(Duration::hours(1))
        .unwrap_or(interval.end());
    if calendar.is_work_hour(start) {
        total += util::elapsed_hours(start, next_hour);
    }
    let start = next_hour;

    if start_date == end_date {
        return total + calendar.walk_forward(start, end);
    }

    let start_midnight = util::round_down_date(interval.start())
        .checked_add_signed(Duration::days(1))
        .unwrap_or(interval.end());
    total += calendar.walk_forward(start, start_midnight);
    total += calendar.walk_backward(end, util::round_down_date(end));

    total += start_date
        .iter_days()
        .skip(1)
        .take_while(|date| *date < end_date)
        .map(|date| calendar.whole_day_hours(date))
        .sum::<f64>();

    total
}

/// Vérifie `end >= start` avant de lancer le calcul.
pub(super) fn checked_work_hours(
    calendar: &WorkCalendar<'_>,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<f64, BusinessLenError> {
    let interval = Interval::new(start, end)?;
    Ok(work_hours(calendar, interval))
}
