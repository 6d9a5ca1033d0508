//! Calendrier intégré de jours fériés, calculé par règles (valable pour toute année).
//!
//! - `US` : jours fériés fédéraux, report au vendredi / lundi quand ils tombent le week-end.
//! - `FR` : fêtes légales nationales (sans report).
//! - `GB` : bank holidays d'Angleterre et du pays de Galles, jours de substitution compris,
//!   ainsi que les déplacements et jours exceptionnels proclamés depuis 1995.

use crate::offdays::{HolidayCalendar, HolidayProvider, OffDaySet, OffDaysError};
use chrono::{Datelike, Days, NaiveDate, Weekday};
use std::sync::Arc;

/// Pays pris en charge par [`BuiltinHolidays`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Country {
    UnitedStates,
    France,
    UnitedKingdom,
}

impl Country {
    /// Recherche insensible à la casse, espaces ignorés.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "US" => Some(Country::UnitedStates),
            "FR" => Some(Country::France),
            "GB" | "UK" => Some(Country::UnitedKingdom),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Country::UnitedStates => "US",
            Country::France => "FR",
            Country::UnitedKingdom => "GB",
        }
    }

    /// Jours fériés observés pendant `year`, triés par date.
    pub fn holidays(&self, year: i32) -> Vec<(NaiveDate, &'static str)> {
        let mut out = match self {
            Country::UnitedStates => us_holidays(year),
            Country::France => fr_holidays(year),
            Country::UnitedKingdom => gb_holidays(year),
        };
        out.retain(|(date, _)| date.year() == year);
        out.sort_by_key(|(date, _)| *date);
        out
    }
}

impl HolidayCalendar for Country {
    fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays(date.year())
            .iter()
            .any(|(holiday, _)| *holiday == date)
    }
}

/// Fournisseur par défaut, sans source externe.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinHolidays;

impl BuiltinHolidays {
    pub fn dates(
        &self,
        country_code: &str,
        year: i32,
    ) -> Result<Vec<(NaiveDate, &'static str)>, OffDaysError> {
        let country = Country::from_code(country_code)
            .ok_or_else(|| OffDaysError::UnknownCountry(country_code.trim().to_string()))?;
        Ok(country.holidays(year))
    }
}

impl HolidayProvider for BuiltinHolidays {
    fn holidays_for(&self, country_code: &str) -> Result<OffDaySet, OffDaysError> {
        let country = Country::from_code(country_code)
            .ok_or_else(|| OffDaysError::UnknownCountry(country_code.trim().to_string()))?;
        Ok(OffDaySet::from_calendar(Arc::new(country)))
    }
}

fn us_holidays(year: i32) -> Vec<(NaiveDate, &'static str)> {
    let mut out = Vec::new();
    let mut push = |date: Option<NaiveDate>, name: &'static str| {
        if let Some(date) = date {
            out.push((date, name));
        }
    };

    push(ymd(year, 1, 1).map(us_observed), "New Year's Day");
    // le 1er janvier suivant peut être observé le 31 décembre
    push(ymd(year + 1, 1, 1).map(us_observed), "New Year's Day (Observed)");
    if year >= 1986 {
        push(nth_weekday(year, 1, Weekday::Mon, 3), "Martin Luther King Jr. Day");
    }
    push(nth_weekday(year, 2, Weekday::Mon, 3), "Washington's Birthday");
    push(last_weekday(year, 5, Weekday::Mon), "Memorial Day");
    if year >= 2021 {
        push(ymd(year, 6, 19).map(us_observed), "Juneteenth National Independence Day");
    }
    push(ymd(year, 7, 4).map(us_observed), "Independence Day");
    push(nth_weekday(year, 9, Weekday::Mon, 1), "Labor Day");
    push(nth_weekday(year, 10, Weekday::Mon, 2), "Columbus Day");
    push(ymd(year, 11, 11).map(us_observed), "Veterans Day");
    push(nth_weekday(year, 11, Weekday::Thu, 4), "Thanksgiving");
    push(ymd(year, 12, 25).map(us_observed), "Christmas Day");
    out
}

fn fr_holidays(year: i32) -> Vec<(NaiveDate, &'static str)> {
    let easter = easter_sunday(year);
    let mut out = Vec::new();
    let mut push = |date: Option<NaiveDate>, name: &'static str| {
        if let Some(date) = date {
            out.push((date, name));
        }
    };

    push(ymd(year, 1, 1), "Jour de l'an");
    push(easter.and_then(|e| e.checked_add_days(Days::new(1))), "Lundi de Pâques");
    push(ymd(year, 5, 1), "Fête du Travail");
    push(ymd(year, 5, 8), "Armistice 1945");
    push(easter.and_then(|e| e.checked_add_days(Days::new(39))), "Ascension");
    push(easter.and_then(|e| e.checked_add_days(Days::new(50))), "Lundi de Pentecôte");
    push(ymd(year, 7, 14), "Fête nationale");
    push(ymd(year, 8, 15), "Assomption");
    push(ymd(year, 11, 1), "Toussaint");
    push(ymd(year, 11, 11), "Armistice 1918");
    push(ymd(year, 12, 25), "Noël");
    out
}

fn gb_holidays(year: i32) -> Vec<(NaiveDate, &'static str)> {
    let easter = easter_sunday(year);
    let mut out = Vec::new();
    let mut push = |date: Option<NaiveDate>, name: &'static str| {
        if let Some(date) = date {
            out.push((date, name));
        }
    };

    push(ymd(year, 1, 1).map(gb_substitute), "New Year's Day");
    push(easter.and_then(|e| e.checked_sub_days(Days::new(2))), "Good Friday");
    push(easter.and_then(|e| e.checked_add_days(Days::new(1))), "Easter Monday");
    push(nth_weekday(year, 5, Weekday::Mon, 1), "May Day");
    push(last_weekday(year, 5, Weekday::Mon), "Spring Bank Holiday");
    push(last_weekday(year, 8, Weekday::Mon), "Late Summer Bank Holiday");
    push(ymd(year, 12, 25).map(gb_christmas_substitute), "Christmas Day");
    push(ymd(year, 12, 26).map(gb_christmas_substitute), "Boxing Day");

    for &(y, (from_m, from_d), (to_m, to_d)) in GB_MOVED {
        if y != year {
            continue;
        }
        if let (Some(from), Some(to)) = (ymd(y, from_m, from_d), ymd(y, to_m, to_d)) {
            for entry in out.iter_mut().filter(|(date, _)| *date == from) {
                entry.0 = to;
            }
        }
    }
    out.extend(
        GB_PROCLAIMED
            .iter()
            .filter(|(y, ..)| *y == year)
            .filter_map(|&(y, m, day, name)| Some((ymd(y, m, day)?, name))),
    );
    out
}

/// Bank holidays déplacés par proclamation : (année, date prévue, date observée).
const GB_MOVED: &[(i32, (u32, u32), (u32, u32))] = &[
    (1995, (5, 1), (5, 8)),
    (2002, (5, 27), (6, 4)),
    (2012, (5, 28), (6, 4)),
    (2020, (5, 4), (5, 8)),
    (2022, (5, 30), (6, 2)),
];

/// Jours fériés exceptionnels, sans équivalent les autres années.
const GB_PROCLAIMED: &[(i32, u32, u32, &str)] = &[
    (1999, 12, 31, "Millennium Celebrations"),
    (2002, 6, 3, "Golden Jubilee"),
    (2011, 4, 29, "Royal Wedding"),
    (2012, 6, 5, "Diamond Jubilee"),
    (2022, 6, 3, "Platinum Jubilee"),
    (2022, 9, 19, "State Funeral of Queen Elizabeth II"),
    (2023, 5, 8, "Coronation of King Charles III"),
];

fn ymd(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

fn nth_weekday(year: i32, month: u32, weekday: Weekday, n: u8) -> Option<NaiveDate> {
    NaiveDate::from_weekday_of_month_opt(year, month, weekday, n)
}

fn last_weekday(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let last = ymd(next_year, next_month, 1)?.pred_opt()?;
    let back = (7 + last.weekday().num_days_from_monday() - weekday.num_days_from_monday()) % 7;
    last.checked_sub_days(Days::new(u64::from(back)))
}

/// Samedi -> vendredi précédent, dimanche -> lundi suivant.
fn us_observed(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat => date.pred_opt().unwrap_or(date),
        Weekday::Sun => date.succ_opt().unwrap_or(date),
        _ => date,
    }
}

/// Week-end -> lundi suivant.
fn gb_substitute(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat => date.checked_add_days(Days::new(2)).unwrap_or(date),
        Weekday::Sun => date.succ_opt().unwrap_or(date),
        _ => date,
    }
}

/// Noël et Boxing Day se décalent tous deux de deux jours quand ils tombent le week-end.
fn gb_christmas_substitute(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat | Weekday::Sun => date.checked_add_days(Days::new(2)).unwrap_or(date),
        _ => date,
    }
}

/// Dimanche de Pâques grégorien (algorithme de Meeus/Jones/Butcher).
fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15).rem_euclid(30);
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k).rem_euclid(7);
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    ymd(year, month as u32, day as u32)
}
