use crate::calculator::{validate_lunch_hour, BusinessLen, BusinessLenError, DEFAULT_LUNCH_HOUR};
use crate::model::{WeeklySchedule, DEFAULT_WORKWEEK};
use crate::offdays::{HolidayProvider, OffDaySet, OffDaysError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Pays utilisé quand la configuration ne précise pas de jours off.
pub const DEFAULT_COUNTRY: &str = "US";

/// Configuration telle qu'écrite dans le fichier JSON, pas encore validée.
///
/// ```json
/// {"schedule": {"0": [9, 17], "5": [], ...}, "lunch_hour": 12, "offdays": "US"}
/// ```
///
/// Les champs restent des valeurs JSON brutes : un type inattendu n'est pas une
/// erreur de lecture mais une erreur de validation, classée par [`Settings::build`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_schedule")]
    pub schedule: Value,
    #[serde(default = "default_lunch_hour")]
    pub lunch_hour: Value,
    #[serde(default = "default_offdays")]
    pub offdays: Value,
}

/// Jours off : un code pays, ou une liste de dates (`YYYY-MM-DD`, heure tolérée et ignorée).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OffDaysSpec {
    Country(String),
    Dates(Vec<String>),
}

impl Default for OffDaysSpec {
    fn default() -> Self {
        OffDaysSpec::Country(DEFAULT_COUNTRY.to_string())
    }
}

impl OffDaysSpec {
    /// Chaîne = code pays, tableau de chaînes = dates ; le reste est refusé.
    pub fn from_value(value: &Value) -> Result<Self, OffDaysError> {
        match value {
            Value::String(code) => Ok(OffDaysSpec::Country(code.clone())),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(date) => Ok(date.clone()),
                    other => Err(OffDaysError::MalformedDate(other.to_string())),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(OffDaysSpec::Dates),
            other => Err(OffDaysError::UnsupportedSource(other.to_string())),
        }
    }

    pub fn resolve(&self, provider: &dyn HolidayProvider) -> Result<OffDaySet, OffDaysError> {
        match self {
            OffDaysSpec::Country(code) => provider.holidays_for(code),
            OffDaysSpec::Dates(dates) => OffDaySet::parse_dates(dates),
        }
    }
}

impl From<OffDaysSpec> for Value {
    fn from(spec: OffDaysSpec) -> Self {
        match spec {
            OffDaysSpec::Country(code) => Value::String(code),
            OffDaysSpec::Dates(dates) => Value::Array(dates.into_iter().map(Value::String).collect()),
        }
    }
}

impl From<&WeeklySchedule> for Value {
    fn from(schedule: &WeeklySchedule) -> Self {
        schedule
            .entries()
            .into_iter()
            .map(|(day, hours)| (day.to_string(), Value::from(hours)))
            .collect::<serde_json::Map<_, _>>()
            .into()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schedule: default_schedule(),
            lunch_hour: default_lunch_hour(),
            offdays: default_offdays(),
        }
    }
}

fn default_schedule() -> Value {
    Value::from(&DEFAULT_WORKWEEK)
}

fn default_lunch_hour() -> Value {
    Value::from(DEFAULT_LUNCH_HOUR)
}

fn default_offdays() -> Value {
    OffDaysSpec::default().into()
}

impl Settings {
    /// Configuration typée, prête à être enregistrée.
    pub fn new(schedule: &WeeklySchedule, lunch_hour: i64, offdays: OffDaysSpec) -> Self {
        Self {
            schedule: schedule.into(),
            lunch_hour: lunch_hour.into(),
            offdays: offdays.into(),
        }
    }

    /// Valide planning, déjeuner puis jours off (dans cet ordre) et construit le calculateur.
    pub fn build(&self, provider: &dyn HolidayProvider) -> Result<BusinessLen, BusinessLenError> {
        let schedule = parse_schedule(&self.schedule)?;
        let lunch_hour = self
            .lunch_hour
            .as_i64()
            .ok_or_else(|| BusinessLenError::InvalidLunchHour(self.lunch_hour.to_string()))
            .and_then(validate_lunch_hour)?;
        let offdays = OffDaysSpec::from_value(&self.offdays)?.resolve(provider)?;
        Ok(BusinessLen::from_parts(schedule, lunch_hour, offdays))
    }
}

/// Objet `{"0": [start, end], ..., "6": []}` : clés entières, heures entières.
fn parse_schedule(value: &Value) -> Result<WeeklySchedule, BusinessLenError> {
    let invalid = BusinessLenError::InvalidSchedule;
    let Value::Object(days) = value else {
        return Err(invalid(format!("expected an object of week days, got {value}")));
    };
    let mut entries = days
        .iter()
        .map(|(key, hours)| {
            let day = key
                .trim()
                .parse::<i64>()
                .map_err(|_| invalid(format!("week day key {key:?} is not an integer")))?;
            let Value::Array(bounds) = hours else {
                return Err(invalid(format!("week day {key}: expected an array, got {hours}")));
            };
            let bounds = bounds
                .iter()
                .map(|h| {
                    h.as_i64()
                        .ok_or_else(|| invalid(format!("week day {key}: {h} is not an integer hour")))
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok((day, bounds))
        })
        .collect::<Result<Vec<_>, _>>()?;
    // l'ordre des clés JSON est lexicographique ("10" avant "2")
    entries.sort_by_key(|(day, _)| *day);
    WeeklySchedule::from_entries(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::holidays::BuiltinHolidays;
    use serde_json::json;

    fn settings(raw: &str) -> Settings {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings = settings("{}");
        assert_eq!(settings, Settings::default());
        let bl = settings.build(&BuiltinHolidays).unwrap();
        assert_eq!(bl.schedule(), &DEFAULT_WORKWEEK);
        assert_eq!(bl.lunch_hour(), DEFAULT_LUNCH_HOUR);
    }

    #[test]
    fn explicit_dates_are_parsed() {
        let raw = r#"{"lunch_hour": 13, "offdays": ["2020-01-01", "2020-01-06T10:00:00"]}"#;
        let bl = settings(raw).build(&BuiltinHolidays).unwrap();
        assert_eq!(bl.lunch_hour(), 13);
        assert_eq!(bl.offdays().explicit_dates().unwrap().count(), 2);
    }

    #[test]
    fn typed_constructor_matches_json_form() {
        let typed = Settings::new(&DEFAULT_WORKWEEK, 12, OffDaysSpec::default());
        assert_eq!(typed, Settings::default());
        assert_eq!(typed.schedule["5"], json!([]));
        assert_eq!(typed.schedule["0"], json!([9, 17]));
    }

    #[test]
    fn errors_are_reported_in_validation_order() {
        let mut settings = Settings {
            lunch_hour: json!(30),
            offdays: json!("0"),
            ..Settings::default()
        };
        settings.schedule["7"] = json!([]);
        let err = settings.build(&BuiltinHolidays).unwrap_err();
        assert_eq!(err.code(), 2);

        settings.schedule = default_schedule();
        assert_eq!(
            settings.build(&BuiltinHolidays).unwrap_err(),
            BusinessLenError::InvalidLunchHour("30".into())
        );

        settings.lunch_hour = json!(12);
        assert_eq!(
            settings.build(&BuiltinHolidays).unwrap_err(),
            BusinessLenError::InvalidOffDays(OffDaysError::UnknownCountry("0".into()))
        );

        settings.offdays = json!(["not a date"]);
        assert_eq!(settings.build(&BuiltinHolidays).unwrap_err().code(), 3);
    }

    #[test]
    fn wrongly_typed_offdays_are_offday_errors() {
        let err = settings(r#"{"offdays": 42}"#).build(&BuiltinHolidays).unwrap_err();
        assert_eq!(
            err,
            BusinessLenError::InvalidOffDays(OffDaysError::UnsupportedSource("42".into()))
        );
        assert_eq!(err.code(), 3);

        let err = settings(r#"{"offdays": ["2020-01-01", 7]}"#)
            .build(&BuiltinHolidays)
            .unwrap_err();
        assert_eq!(
            err,
            BusinessLenError::InvalidOffDays(OffDaysError::MalformedDate("7".into()))
        );
    }

    #[test]
    fn non_integer_lunch_hour_is_a_lunch_error() {
        let cases = [
            r#"{"lunch_hour": "noon"}"#,
            r#"{"lunch_hour": 12.5}"#,
            r#"{"lunch_hour": null}"#,
        ];
        for raw in cases {
            let err = settings(raw).build(&BuiltinHolidays).unwrap_err();
            assert!(matches!(err, BusinessLenError::InvalidLunchHour(_)), "{raw}");
            assert_eq!(err.code(), 4);
        }
    }

    #[test]
    fn wrongly_typed_schedule_is_a_schedule_error() {
        let cases = [
            r#"{"schedule": {"mon": [9, 17]}}"#,
            r#"{"schedule": [[9, 17]]}"#,
            r#"{"schedule": {"0": [9, "x"], "1": [], "2": [], "3": [], "4": [], "5": [], "6": []}}"#,
            r#"{"schedule": {"0": "9-17", "1": [], "2": [], "3": [], "4": [], "5": [], "6": []}}"#,
        ];
        for raw in cases {
            let err = settings(raw).build(&BuiltinHolidays).unwrap_err();
            assert!(matches!(err, BusinessLenError::InvalidSchedule(_)), "{raw}");
            assert_eq!(err.code(), 2);
        }
    }

    #[test]
    fn schedule_keys_are_ordered_numerically() {
        let raw = r#"{"schedule": {"6": [], "5": [8, 12], "4": [8, 17], "3": [8, 17],
                                   "2": [8, 17], "1": [8, 17], "0": [8, 17]}}"#;
        let bl = settings(raw).build(&BuiltinHolidays).unwrap();
        assert_eq!(bl.schedule().window(chrono::Weekday::Sat).unwrap().width(), 4);
    }
}
