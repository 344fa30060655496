//! Mapping of decoded JSON onto typed response schemas.
//!
//! Each schema carries a static table of [`FieldSpec`]s: the JSON key of every
//! declared field and the [`Coercion`] applied to its raw value. [`populate`]
//! walks that table once, so keys the schema does not declare are ignored and
//! declared keys missing from the input leave the field at its default.
//!
//! Coercion never fails. Values that cannot be converted degrade to the
//! field type's empty value; a malformed date becomes `None`.

use crate::response::StatisticServices;
use crate::{Error, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};
use chrono_tz::Tz;
use serde_json::Value;

/// Timezone date-only values are interpreted in. Historical dates keep the
/// offset Moscow observed on that day.
pub const REFERENCE_TIMEZONE: Tz = chrono_tz::Europe::Moscow;

/// How a raw JSON value is converted before it is assigned to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coercion {
    /// Cast to a signed integer, `0` when not numeric.
    Integer,
    /// Cast to a float, `0.0` when not numeric.
    Float,
    /// Build a [`StatisticServices`] record.
    Services,
    /// Parse a `YYYY-MM-DD` date in the reference timezone.
    Date,
    /// Keep the value as it is.
    Passthrough,
}

/// A value after coercion, tagged with the rule that produced it.
#[derive(Debug, Clone, PartialEq)]
pub enum Coerced {
    /// Result of [`Coercion::Integer`].
    Integer(i64),
    /// Result of [`Coercion::Float`].
    Float(f64),
    /// Result of [`Coercion::Services`].
    Services(StatisticServices),
    /// Result of [`Coercion::Date`], `None` when the input was malformed.
    Date(Option<DateTime<FixedOffset>>),
    /// Result of [`Coercion::Passthrough`].
    Passthrough(Value),
}

impl Coercion {
    /// Applies this rule to a raw value.
    pub fn apply(self, raw: &Value) -> Coerced {
        match self {
            Coercion::Integer => Coerced::Integer(coerce_integer(raw)),
            Coercion::Float => Coerced::Float(coerce_float(raw)),
            Coercion::Services => Coerced::Services(coerce_services(raw)),
            Coercion::Date => Coerced::Date(coerce_date(raw)),
            Coercion::Passthrough => Coerced::Passthrough(raw.clone()),
        }
    }
}

/// One row of a schema's field table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// JSON key the field is read from.
    pub key: &'static str,
    /// Rule applied to the raw value.
    pub coercion: Coercion,
}

/// A response record that [`populate`] can fill.
///
/// Implemented through the crate's schema declarations; the field table is
/// built at compile time from each field's Rust type.
pub trait Schema: Default {
    /// Schema name used in error messages.
    const NAME: &'static str;

    /// Declared fields, in declaration order.
    const FIELDS: &'static [FieldSpec];

    /// Stores a coerced value into the field read from `key`.
    fn assign(&mut self, key: &str, value: Coerced);
}

/// Rust types a schema field may have, each bound to one [`Coercion`].
pub trait FieldType: Sized {
    /// The rule used for fields of this type.
    const COERCION: Coercion;

    /// Extracts the field value, or `None` when `value` was produced by a
    /// different rule.
    fn from_coerced(value: Coerced) -> Option<Self>;
}

impl FieldType for i64 {
    const COERCION: Coercion = Coercion::Integer;

    fn from_coerced(value: Coerced) -> Option<Self> {
        match value {
            Coerced::Integer(n) => Some(n),
            _ => None,
        }
    }
}

impl FieldType for f64 {
    const COERCION: Coercion = Coercion::Float;

    fn from_coerced(value: Coerced) -> Option<Self> {
        match value {
            Coerced::Float(n) => Some(n),
            _ => None,
        }
    }
}

impl FieldType for StatisticServices {
    const COERCION: Coercion = Coercion::Services;

    fn from_coerced(value: Coerced) -> Option<Self> {
        match value {
            Coerced::Services(services) => Some(services),
            _ => None,
        }
    }
}

impl FieldType for Option<DateTime<FixedOffset>> {
    const COERCION: Coercion = Coercion::Date;

    fn from_coerced(value: Coerced) -> Option<Self> {
        match value {
            Coerced::Date(date) => Some(date),
            _ => None,
        }
    }
}

/// Text fields. Strings are kept verbatim, `null` becomes `None` and any other
/// value keeps its JSON rendering.
impl FieldType for Option<String> {
    const COERCION: Coercion = Coercion::Passthrough;

    fn from_coerced(value: Coerced) -> Option<Self> {
        match value {
            Coerced::Passthrough(Value::Null) => Some(None),
            Coerced::Passthrough(Value::String(s)) => Some(Some(s)),
            Coerced::Passthrough(other) => Some(Some(other.to_string())),
            _ => None,
        }
    }
}

impl FieldType for Value {
    const COERCION: Coercion = Coercion::Passthrough;

    fn from_coerced(value: Coerced) -> Option<Self> {
        match value {
            Coerced::Passthrough(v) => Some(v),
            _ => None,
        }
    }
}

/// Maps a decoded JSON object onto a fresh `S`.
///
/// # Errors
///
/// Returns [`Error::SchemaMismatch`] if `value` is not a JSON object.
///
/// # Examples
///
/// ```
/// use dadata::populate::populate;
/// use dadata::response::Statistics;
/// use serde_json::json;
///
/// let stats: Statistics = populate(&json!({
///     "date": "2020-02-29",
///     "services": {"clean": "5"},
///     "unknown": true
/// })).unwrap();
///
/// assert_eq!(stats.services.clean, 5);
/// assert_eq!(stats.services.merging, 0);
/// assert!(stats.date.is_some());
/// ```
pub fn populate<S: Schema>(value: &Value) -> Result<S> {
    let map = value.as_object().ok_or(Error::SchemaMismatch {
        expected: S::NAME,
        found: json_kind(value),
    })?;

    let mut record = S::default();
    for field in S::FIELDS {
        if let Some(raw) = map.get(field.key) {
            record.assign(field.key, field.coercion.apply(raw));
        }
    }
    Ok(record)
}

/// Name of the JSON kind of `value`, for error messages.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Casts a raw value to an integer.
///
/// Numbers are truncated toward zero, booleans become `0`/`1`, and strings
/// are read from their leading numeric part. Anything else is `0`.
pub fn coerce_integer(raw: &Value) -> i64 {
    match raw {
        Value::Bool(b) => i64::from(*b),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(truncate))
            .unwrap_or(0),
        Value::String(s) => parse_integer(s),
        _ => 0,
    }
}

/// Casts a raw value to a float. Same rules as [`coerce_integer`].
pub fn coerce_float(raw: &Value) -> f64 {
    match raw {
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => parse_float(s),
        _ => 0.0,
    }
}

/// Builds the services sub-record. Absent or falsy counters are `0`.
pub fn coerce_services(raw: &Value) -> StatisticServices {
    let counter = |key: &str| raw.get(key).map(coerce_integer).unwrap_or(0);
    StatisticServices {
        clean: counter("clean"),
        merging: counter("merging"),
        suggestions: counter("suggestions"),
    }
}

/// Parses a `YYYY-MM-DD` string as midnight in [`REFERENCE_TIMEZONE`].
///
/// The offset is the one in force on that date, so summer dates before
/// October 2014 carry `+04:00`. Returns `None` for non-strings, strings of
/// another shape and impossible calendar dates. This never fails loudly.
pub fn coerce_date(raw: &Value) -> Option<DateTime<FixedOffset>> {
    let s = raw.as_str()?;
    if !is_iso_date_shape(s) {
        return None;
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    REFERENCE_TIMEZONE
        .from_local_datetime(&midnight)
        .earliest()
        .map(|local| local.fixed_offset())
}

fn is_iso_date_shape(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}

fn truncate(f: f64) -> i64 {
    if f.is_finite() {
        f.trunc() as i64
    } else {
        0
    }
}

fn parse_integer(s: &str) -> i64 {
    let s = s.trim();
    if let Ok(n) = s.parse::<i64>() {
        return n;
    }
    let prefix = numeric_prefix(s);
    prefix
        .parse::<i64>()
        .ok()
        .or_else(|| prefix.parse::<f64>().ok().map(truncate))
        .unwrap_or(0)
}

fn parse_float(s: &str) -> f64 {
    numeric_prefix(s.trim())
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .unwrap_or(0.0)
}

/// Longest prefix of `s` that looks like a decimal number: optional sign,
/// digits, optional fraction, optional exponent.
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let digits = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let int_digits = digits(end);
    end += int_digits;
    let mut mantissa_digits = int_digits;

    if bytes.get(end) == Some(&b'.') {
        let frac = digits(end + 1);
        if frac > 0 || int_digits > 0 {
            end += 1 + frac;
            mantissa_digits += frac;
        }
    }
    if mantissa_digits == 0 {
        return "";
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = digits(exp);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }

    &s[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::{Address, Birthdate, Statistics};
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    #[test]
    fn integer_coercion() {
        assert_eq!(coerce_integer(&json!(42)), 42);
        assert_eq!(coerce_integer(&json!("42")), 42);
        assert_eq!(coerce_integer(&json!(" 7 ")), 7);
        assert_eq!(coerce_integer(&json!("12abc")), 12);
        assert_eq!(coerce_integer(&json!("5.9")), 5);
        assert_eq!(coerce_integer(&json!(-3.7)), -3);
        assert_eq!(coerce_integer(&json!("1e3")), 1000);
        assert_eq!(coerce_integer(&json!(true)), 1);
        assert_eq!(coerce_integer(&json!("abc")), 0);
        assert_eq!(coerce_integer(&json!(null)), 0);
        assert_eq!(coerce_integer(&json!([1, 2])), 0);
    }

    #[test]
    fn float_coercion() {
        assert_eq!(coerce_float(&json!("55.8782557")), 55.8782557);
        assert_eq!(coerce_float(&json!(1.5)), 1.5);
        assert_eq!(coerce_float(&json!(3)), 3.0);
        assert_eq!(coerce_float(&json!("-.5")), -0.5);
        assert_eq!(coerce_float(&json!("2.5 rub")), 2.5);
        assert_eq!(coerce_float(&json!("inf")), 0.0);
        assert_eq!(coerce_float(&json!("")), 0.0);
        assert_eq!(coerce_float(&json!({})), 0.0);
    }

    #[test]
    fn numeric_prefix_edges() {
        assert_eq!(numeric_prefix("."), "");
        assert_eq!(numeric_prefix("-"), "");
        assert_eq!(numeric_prefix("3."), "3.");
        assert_eq!(numeric_prefix("4e"), "4");
        assert_eq!(numeric_prefix("4e-2x"), "4e-2");
    }

    #[test]
    fn leap_day_parses_in_reference_timezone() {
        let date = coerce_date(&json!("2020-02-29")).unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (2020, 2, 29));
        assert_eq!((date.hour(), date.minute()), (0, 0));
        assert_eq!(date.offset().local_minus_utc(), 3 * 3600);
    }

    #[test]
    fn historical_dates_keep_their_moscow_offset() {
        let offset = |s: &str| {
            coerce_date(&json!(s))
                .map(|d| d.offset().local_minus_utc())
                .unwrap()
        };
        // summer time until 2011
        assert_eq!(offset("1990-07-01"), 4 * 3600);
        assert_eq!(offset("1990-01-15"), 3 * 3600);
        // permanent +04:00 between 2011 and 2014
        assert_eq!(offset("2012-06-15"), 4 * 3600);
        assert_eq!(offset("2013-12-31"), 4 * 3600);
        assert_eq!(offset("2015-07-01"), 3 * 3600);

        let date = coerce_date(&json!("1990-07-01")).unwrap();
        assert_eq!((date.year(), date.month(), date.day()), (1990, 7, 1));
        assert_eq!(date.hour(), 0);
        assert_eq!(date.to_rfc3339(), "1990-07-01T00:00:00+04:00");
    }

    #[test]
    fn malformed_dates_are_absent() {
        assert_eq!(coerce_date(&json!("not-a-date")), None);
        assert_eq!(coerce_date(&json!("2021-02-29")), None);
        assert_eq!(coerce_date(&json!("2020-2-29")), None);
        assert_eq!(coerce_date(&json!("2020-02-29T10:00:00")), None);
        assert_eq!(coerce_date(&json!(20200229)), None);
        assert_eq!(coerce_date(&json!(null)), None);
    }

    #[test]
    fn services_default_to_zero() {
        assert_eq!(coerce_services(&json!({})), StatisticServices::default());
        assert_eq!(
            coerce_services(&json!({"clean": "5"})),
            StatisticServices {
                clean: 5,
                merging: 0,
                suggestions: 0
            }
        );
        assert_eq!(
            coerce_services(&json!({"clean": false, "merging": "", "suggestions": 12})),
            StatisticServices {
                clean: 0,
                merging: 0,
                suggestions: 12
            }
        );
        assert_eq!(coerce_services(&json!(null)), StatisticServices::default());
    }

    #[test]
    fn extra_keys_are_ignored() {
        let exact = json!({"source": "Moscow", "qc": "1", "geo_lat": "55.75"});
        let superset = json!({
            "source": "Moscow",
            "qc": "1",
            "geo_lat": "55.75",
            "brand_new_field": {"nested": true}
        });
        let a: Address = populate(&exact).unwrap();
        let b: Address = populate(&superset).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.qc, 1);
        assert_eq!(a.geo_lat, 55.75);
        assert_eq!(a.source.as_deref(), Some("Moscow"));
    }

    #[test]
    fn missing_fields_keep_defaults() {
        let address: Address = populate(&json!({})).unwrap();
        assert_eq!(address, Address::default());
        assert_eq!(address.qc_geo, 0);
        assert_eq!(address.geo_lon, 0.0);
        assert_eq!(address.result, None);
    }

    #[test]
    fn passthrough_keeps_values() {
        let address: Address = populate(&json!({
            "postal_code": 101000,
            "region": null,
            "metro": [{"name": "Lubyanka"}]
        }))
        .unwrap();
        assert_eq!(address.postal_code.as_deref(), Some("101000"));
        assert_eq!(address.region, None);
        assert_eq!(address.metro, json!([{"name": "Lubyanka"}]));
    }

    #[test]
    fn malformed_date_field_does_not_fail_population() {
        let birthdate: Birthdate =
            populate(&json!({"source": "x", "birthdate": "yesterday", "qc": 2})).unwrap();
        assert_eq!(birthdate.birthdate, None);
        assert_eq!(birthdate.qc, 2);
    }

    #[test]
    fn statistics_nested_services() {
        let stats: Statistics = populate(&json!({
            "date": "2019-11-10",
            "services": {"merging": 0, "suggestions": "11", "clean": 1004}
        }))
        .unwrap();
        assert_eq!(stats.services.clean, 1004);
        assert_eq!(stats.services.suggestions, 11);
        assert_eq!(stats.date.map(|d| d.day()), Some(10));
    }

    #[test]
    fn non_object_is_a_schema_mismatch() {
        let err = populate::<Address>(&json!([{"source": "a"}, {"source": "b"}])).unwrap_err();
        match err {
            Error::SchemaMismatch { expected, found } => {
                assert_eq!(expected, "Address");
                assert_eq!(found, "array");
            }
            other => panic!("Expected SchemaMismatch, got {:?}", other),
        }
    }

    #[test]
    fn field_tables_follow_declared_types() {
        let rule = |key: &str| {
            Address::FIELDS
                .iter()
                .find(|f| f.key == key)
                .map(|f| f.coercion)
        };
        assert_eq!(rule("qc"), Some(Coercion::Integer));
        assert_eq!(rule("geo_lat"), Some(Coercion::Float));
        assert_eq!(rule("result"), Some(Coercion::Passthrough));
        assert_eq!(rule("unknown"), None);
        assert_eq!(
            Statistics::FIELDS,
            &[
                FieldSpec {
                    key: "date",
                    coercion: Coercion::Date
                },
                FieldSpec {
                    key: "services",
                    coercion: Coercion::Services
                },
            ]
        );
    }
}
