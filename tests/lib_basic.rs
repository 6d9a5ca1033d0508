#![forbid(unsafe_code)]
use businesslen::{
    BusinessLen, DurationRenderer, Interval, OffDaySet, TextDuration, WeeklySchedule,
    DEFAULT_WORKWEEK,
};
use chrono::{NaiveDate, NaiveDateTime};

fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

fn tcb() -> BusinessLen {
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
    let offdays = OffDaySet::from_dates([NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()]);
    BusinessLen::new(schedule, 12, offdays).unwrap()
}

#[test]
fn nine_to_five_monday_only_counts_window_hours() {
    let bl = BusinessLen::new(DEFAULT_WORKWEEK, 12, OffDaySet::empty()).unwrap();
    // 2020-01-06 est un lundi : 9h–17h moins le déjeuner
    let hours = bl.hours(at(2020, 1, 6, 8, 0), at(2020, 1, 6, 18, 30)).unwrap();
    assert_eq!(hours, 7.0);
}

#[test]
fn crossing_an_offday() {
    let bl = tcb();
    let hours = bl.hours(at(2019, 12, 31, 7, 0), at(2020, 1, 3, 8, 0)).unwrap();
    assert_eq!(hours, 16.0);
}

#[test]
fn same_weekday_a_week_later_is_worked() {
    let bl = tcb();
    let offday = bl.hours(at(2020, 1, 1, 0, 0), at(2020, 1, 2, 0, 0)).unwrap();
    let next_week = bl.hours(at(2020, 1, 8, 0, 0), at(2020, 1, 9, 0, 0)).unwrap();
    assert_eq!(offday, 0.0);
    assert_eq!(next_week, 8.0);
}

#[test]
fn spans_are_additive() {
    let bl = tcb();
    let a = at(2019, 12, 30, 10, 15);
    let b = at(2020, 1, 2, 13, 45);
    let c = at(2020, 1, 7, 9, 30);
    let ab = bl.hours(a, b).unwrap();
    let bc = bl.hours(b, c).unwrap();
    let ac = bl.hours(a, c).unwrap();
    assert!((ab + bc - ac).abs() < 1e-9, "{ab} + {bc} != {ac}");
    assert_eq!(ac, 43.25);
}

#[test]
fn repeated_queries_are_identical() {
    let bl = tcb();
    let first = bl.measure(at(2020, 1, 2, 8, 5), at(2020, 1, 9, 16, 37)).unwrap();
    let second = bl.measure(at(2020, 1, 2, 8, 5), at(2020, 1, 9, 16, 37)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn weekend_with_half_day_saturday() {
    let bl = tcb();
    // samedi 8h–12h, le déjeuner est hors plage ; dimanche non travaillé
    assert_eq!(bl.hours(at(2020, 1, 4, 0, 0), at(2020, 1, 6, 0, 0)).unwrap(), 4.0);
}

#[test]
fn window_ending_at_midnight() {
    let schedule = WeeklySchedule::new([
        Some((18, 24)),
        Some((18, 24)),
        None,
        None,
        None,
        None,
        None,
    ])
    .unwrap();
    let bl = BusinessLen::new(schedule, 12, OffDaySet::empty()).unwrap();
    assert_eq!(bl.hours(at(2020, 1, 6, 17, 0), at(2020, 1, 7, 1, 0)).unwrap(), 6.0);
    assert_eq!(bl.hours(at(2020, 1, 6, 0, 0), at(2020, 1, 8, 0, 0)).unwrap(), 12.0);
}

#[test]
fn configuration_is_shared_across_threads() {
    let bl = tcb();
    let expected = bl.hours(at(2020, 1, 2, 10, 0), at(2020, 1, 7, 16, 0)).unwrap();
    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| bl.hours(at(2020, 1, 2, 10, 0), at(2020, 1, 7, 16, 0)).unwrap()))
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
    });
    assert_eq!(expected, 33.0);
}

#[test]
fn text_rendering() {
    let bl = tcb();
    let interval = Interval::new(at(2020, 1, 2, 8, 0), at(2020, 1, 2, 17, 0)).unwrap();
    let duration = bl.measure_interval(interval);
    insta::assert_snapshot!(
        TextDuration.render(interval, &duration),
        @"2020-01-02T08:00:00 -> 2020-01-02T17:00:00: 8.0000 h (1.0000 d, 480 min, 28800 s)"
    );
}
