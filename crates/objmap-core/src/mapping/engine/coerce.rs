//! Scalar and enumeration conversions
//!
//! Every conversion is an `Option`-returning attempt: `None` means the value
//! has no sensible representation in the target type and the member is left
//! unset. Integer targets are range-checked and floating-point sources are
//! rounded half-to-even before narrowing. Text only parses into an integer
//! target when it is integral, so `"4.5"` does not become `4`.

use crate::shape::{EnumRef, ScalarKind, Shape, ShapeKind};
use crate::value::{EnumValue, Value};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use uuid::Uuid;

/// Convert `value` into the scalar or enumeration described by `target`
pub(crate) fn convert(value: &Value, target: &Shape) -> Option<Value> {
    match target.kind() {
        ShapeKind::Scalar(kind) => to_scalar(value, *kind),
        ShapeKind::Enum(variants) => to_enum(value, variants),
        _ => None,
    }
}

/// Numeric reading of a value
#[derive(Debug, Clone, Copy, PartialEq)]
enum Number {
    Int(i128),
    Float(f64),
}

impl Number {
    fn integral(self) -> Option<i128> {
        match self {
            Number::Int(n) => Some(n),
            Number::Float(f) if f.is_finite() => Some(f.round_ties_even() as i128),
            Number::Float(_) => None,
        }
    }

    fn float(self) -> f64 {
        match self {
            Number::Int(n) => n as f64,
            Number::Float(f) => f,
        }
    }
}

fn parse_number(text: &str) -> Option<Number> {
    let text = text.trim();
    text.parse::<i128>()
        .map(Number::Int)
        .or_else(|_| text.parse::<f64>().map(Number::Float))
        .ok()
}

fn number(value: &Value) -> Option<Number> {
    let number = match value {
        Value::Bool(b) => Number::Int(i128::from(*b)),
        Value::I8(n) => Number::Int(i128::from(*n)),
        Value::I16(n) => Number::Int(i128::from(*n)),
        Value::I32(n) => Number::Int(i128::from(*n)),
        Value::I64(n) => Number::Int(i128::from(*n)),
        Value::U8(n) => Number::Int(i128::from(*n)),
        Value::U16(n) => Number::Int(i128::from(*n)),
        Value::U32(n) => Number::Int(i128::from(*n)),
        Value::U64(n) => Number::Int(i128::from(*n)),
        Value::F32(n) => Number::Float(f64::from(*n)),
        Value::F64(n) => Number::Float(*n),
        Value::Char(c) => Number::Int(i128::from(u32::from(*c))),
        Value::Text(s) => return parse_number(s),
        Value::Enum(e) => Number::Int(i128::from(e.discriminant)),
        _ => return None,
    };
    Some(number)
}

fn integer(value: &Value) -> Option<i128> {
    match value {
        Value::Text(s) => s.trim().parse().ok(),
        other => number(other)?.integral(),
    }
}

fn narrow_float(f: f64) -> Option<f32> {
    if f.is_finite() && f.abs() > f64::from(f32::MAX) {
        return None;
    }
    Some(f as f32)
}

macro_rules! narrow {
    ($value:expr, $ty:ty, $variant:ident) => {
        integer($value)
            .and_then(|n| <$ty>::try_from(n).ok())
            .map(Value::$variant)
    };
}

fn to_scalar(value: &Value, kind: ScalarKind) -> Option<Value> {
    match kind {
        ScalarKind::Bool => to_bool(value).map(Value::Bool),
        ScalarKind::I8 => narrow!(value, i8, I8),
        ScalarKind::I16 => narrow!(value, i16, I16),
        ScalarKind::I32 => narrow!(value, i32, I32),
        ScalarKind::I64 => narrow!(value, i64, I64),
        ScalarKind::U8 => narrow!(value, u8, U8),
        ScalarKind::U16 => narrow!(value, u16, U16),
        ScalarKind::U32 => narrow!(value, u32, U32),
        ScalarKind::U64 => narrow!(value, u64, U64),
        ScalarKind::F32 => to_float(value).and_then(narrow_float).map(Value::F32),
        ScalarKind::F64 => to_float(value).map(Value::F64),
        ScalarKind::Char => to_char(value).map(Value::Char),
        ScalarKind::Text => to_text(value).map(Value::Text),
        ScalarKind::Date => to_date(value).map(Value::Date),
        ScalarKind::DateTime => to_datetime(value).map(Value::DateTime),
        ScalarKind::Timestamp => to_timestamp(value).map(Value::Timestamp),
        ScalarKind::Uuid => to_uuid(value).map(Value::Uuid),
    }
}

fn to_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Text(s) => match s.trim().to_lowercase().as_str() {
            "true" | "yes" | "1" | "on" => Some(true),
            "false" | "no" | "0" | "off" => Some(false),
            _ => None,
        },
        Value::Char(_) | Value::Enum(_) => None,
        other => match number(other)? {
            Number::Int(n) => Some(n != 0),
            Number::Float(f) => Some(f != 0.0),
        },
    }
}

fn to_float(value: &Value) -> Option<f64> {
    match value {
        Value::Char(_) => None,
        other => number(other).map(Number::float),
    }
}

fn to_char(value: &Value) -> Option<char> {
    match value {
        Value::Char(c) => Some(*c),
        Value::Text(s) => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(c),
                _ => None,
            }
        }
        Value::Bool(_) | Value::F32(_) | Value::F64(_) | Value::Enum(_) => None,
        other => integer(other)
            .and_then(|n| u32::try_from(n).ok())
            .and_then(char::from_u32),
    }
}

fn to_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::Text(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::I8(n) => n.to_string(),
        Value::I16(n) => n.to_string(),
        Value::I32(n) => n.to_string(),
        Value::I64(n) => n.to_string(),
        Value::U8(n) => n.to_string(),
        Value::U16(n) => n.to_string(),
        Value::U32(n) => n.to_string(),
        Value::U64(n) => n.to_string(),
        Value::F32(n) => n.to_string(),
        Value::F64(n) => n.to_string(),
        Value::Char(c) => c.to_string(),
        Value::Date(d) => d.format("%Y-%m-%d").to_string(),
        Value::DateTime(dt) => dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
        Value::Timestamp(ts) => ts.to_rfc3339(),
        Value::Uuid(id) => id.to_string(),
        Value::Enum(e) => e.name.to_string(),
        Value::Null | Value::Object(_) | Value::Seq(_) => return None,
    };
    Some(text)
}

fn parse_datetime(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    text.parse::<NaiveDateTime>()
        .ok()
        .or_else(|| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f").ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|ts| ts.naive_utc())
        })
        .or_else(|| {
            text.parse::<NaiveDate>()
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn to_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::Date(d) => Some(*d),
        Value::DateTime(dt) => Some(dt.date()),
        Value::Timestamp(ts) => Some(ts.date_naive()),
        Value::Text(s) => s
            .trim()
            .parse::<NaiveDate>()
            .ok()
            .or_else(|| parse_datetime(s).map(|dt| dt.date())),
        _ => None,
    }
}

fn to_datetime(value: &Value) -> Option<NaiveDateTime> {
    match value {
        Value::DateTime(dt) => Some(*dt),
        Value::Date(d) => d.and_hms_opt(0, 0, 0),
        Value::Timestamp(ts) => Some(ts.naive_utc()),
        Value::Text(s) => parse_datetime(s),
        _ => None,
    }
}

fn to_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::Timestamp(ts) => Some(*ts),
        Value::Text(s) => DateTime::parse_from_rfc3339(s.trim())
            .ok()
            .map(|ts| ts.with_timezone(&Utc))
            .or_else(|| parse_datetime(s).map(|dt| Utc.from_utc_datetime(&dt))),
        other => to_datetime(other).map(|dt| Utc.from_utc_datetime(&dt)),
    }
}

fn to_uuid(value: &Value) -> Option<Uuid> {
    match value {
        Value::Uuid(id) => Some(*id),
        Value::Text(s) => Uuid::parse_str(s.trim()).ok(),
        _ => None,
    }
}

fn to_enum(value: &Value, variants: &EnumRef) -> Option<Value> {
    let (name, discriminant) = match value {
        Value::Enum(e) => variants.variant_named(e.name)?,
        Value::Text(s) => {
            let s = s.trim();
            variants
                .variant_named(s)
                .or_else(|| variants.variant_with(s.parse().ok()?))?
        }
        Value::Bool(_) | Value::F32(_) | Value::F64(_) | Value::Char(_) => return None,
        other => {
            let n = integer(other)?;
            variants.variant_with(i64::try_from(n).ok()?)?
        }
    };

    Some(Value::Enum(EnumValue {
        key: variants.key(),
        name,
        discriminant,
    }))
}
