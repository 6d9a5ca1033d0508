use crate::model::WeeklySchedule;
use chrono::Weekday;

pub const HOURS_PER_DAY: usize = 24;

/// Table pré-calculée `(jour de semaine, heure) -> heure travaillée`.
///
/// Les jours off n'y figurent pas : ils sont testés à part, date par date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkHourTable {
    hours: [[bool; HOURS_PER_DAY]; 7],
}

impl WorkHourTable {
    /// Heures `[début, fin)` de chaque plage, sauf l'heure du déjeuner, toujours exclue.
    pub fn build(schedule: &WeeklySchedule, lunch_hour: u8) -> Self {
        let mut hours = [[false; HOURS_PER_DAY]; 7];
        for (weekday, window) in schedule.iter() {
            let Some(window) = window else {
                continue;
            };
            let day = &mut hours[weekday.num_days_from_monday() as usize];
            for flag in &mut day[usize::from(window.start())..usize::from(window.end())] {
                *flag = true;
            }
            day[usize::from(lunch_hour)] = false;
        }
        Self { hours }
    }

    pub fn is_work_hour(&self, weekday: Weekday, hour: u32) -> bool {
        self.day(weekday)
            .get(hour as usize)
            .copied()
            .unwrap_or(false)
    }

    pub fn day(&self, weekday: Weekday) -> &[bool; HOURS_PER_DAY] {
        &self.hours[weekday.num_days_from_monday() as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DEFAULT_WORKWEEK;

    fn window(start: usize, end: usize, lunch: Option<usize>) -> [bool; HOURS_PER_DAY] {
        let mut day = [false; HOURS_PER_DAY];
        for flag in &mut day[start..end] {
            *flag = true;
        }
        if let Some(lunch) = lunch {
            day[lunch] = false;
        }
        day
    }

    #[test]
    fn default_workweek_table() {
        let table = WorkHourTable::build(&DEFAULT_WORKWEEK, 12);
        let nine_to_five = window(9, 17, Some(12));
        for wd in [Weekday::Mon, Weekday::Tue, Weekday::Wed, Weekday::Thu, Weekday::Fri] {
            assert_eq!(table.day(wd), &nine_to_five);
        }
        assert_eq!(table.day(Weekday::Sat), &[false; HOURS_PER_DAY]);
        assert_eq!(table.day(Weekday::Sun), &[false; HOURS_PER_DAY]);
    }

    #[test]
    fn half_day_outside_lunch_keeps_its_hours() {
        let schedule = WeeklySchedule::new([
            Some((8, 17)),
            Some((8, 17)),
            Some((8, 17)),
            Some((8, 17)),
            Some((8, 17)),
            Some((8, 12)),
            None,
        ])
        .unwrap();
        let table = WorkHourTable::build(&schedule, 12);
        assert_eq!(table.day(Weekday::Mon), &window(8, 17, Some(12)));
        assert_eq!(table.day(Weekday::Sat), &window(8, 12, None));
        assert!(table.is_work_hour(Weekday::Sat, 11));
        assert!(!table.is_work_hour(Weekday::Sat, 12));
        assert!(!table.is_work_hour(Weekday::Mon, 24));
    }

    #[test]
    fn window_ending_at_midnight() {
        let schedule =
            WeeklySchedule::new([Some((18, 24)), None, None, None, None, None, None]).unwrap();
        let table = WorkHourTable::build(&schedule, 12);
        assert!(table.is_work_hour(Weekday::Mon, 23));
        assert!(!table.is_work_hour(Weekday::Mon, 17));
    }
}
