//! Conversion of stored values into the types requested by typed getters.
//!
//! Strict coercion (JSON) raises [`Error::Coercion`] for any value that is
//! present but not convertible. Lenient coercion (YAML) narrows numbers by
//! truncation and reports unparsable scalars as "no value"; asking for a
//! scalar where a section or list is stored is an error either way.

use crate::{Error, Value};

/// Integer widths a typed getter can ask for.
pub trait Integer: Copy + TryFrom<i64> {
    const NAME: &'static str;

    /// Narrowing conversion that keeps the low bits.
    fn truncate(value: i64) -> Self;
}

macro_rules! integer {
    ($ty:ty, $name:literal) => {
        impl Integer for $ty {
            const NAME: &'static str = $name;

            fn truncate(value: i64) -> Self {
                value as $ty
            }
        }
    };
}

integer!(i8, "byte");
integer!(i16, "short");
integer!(i32, "integer");
integer!(i64, "long");

/// Float widths a typed getter can ask for.
pub trait Float: Copy {
    const NAME: &'static str;

    fn from_f64(value: f64) -> Self;

    fn is_finite(self) -> bool;
}

impl Float for f32 {
    const NAME: &'static str = "float";

    fn from_f64(value: f64) -> Self {
        value as f32
    }

    fn is_finite(self) -> bool {
        f32::is_finite(self)
    }
}

impl Float for f64 {
    const NAME: &'static str = "double";

    fn from_f64(value: f64) -> Self {
        value
    }

    fn is_finite(self) -> bool {
        f64::is_finite(self)
    }
}

/// Read a value as text. Scalars are rendered; `null` is "no value".
pub fn text(value: Value, path: &str) -> Result<Option<String>, Error> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Integer(i) => Ok(Some(i.to_string())),
        Value::Float(f) => Ok(Some(f.to_string())),
        other @ (Value::Array(_) | Value::Map(_)) => {
            Err(Error::coercion(path, "text", other.kind_name()))
        }
    }
}

pub fn integer<T: Integer>(value: Value, path: &str, lenient: bool) -> Result<Option<T>, Error> {
    let wide = match value {
        Value::Null => return Ok(None),
        Value::Integer(i) => i,
        Value::Float(f) if lenient => f as i64,
        // i64::MAX as f64 rounds up to 2^63, which is already out of range.
        Value::Float(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
            f as i64
        }
        Value::Float(f) if f.is_finite() && f.fract() == 0.0 => {
            let found = format!("out-of-range number {}", f);
            return Err(Error::coercion(path, T::NAME, found));
        }
        Value::String(ref s) => match s.trim().parse::<i64>() {
            Ok(i) => i,
            Err(_) if lenient => return Ok(None),
            Err(_) => return Err(Error::coercion(path, T::NAME, format!("text {:?}", s))),
        },
        Value::Bool(_) if lenient => return Ok(None),
        other => return Err(Error::coercion(path, T::NAME, other.kind_name())),
    };

    if lenient {
        return Ok(Some(T::truncate(wide)));
    }
    T::try_from(wide)
        .map(Some)
        .map_err(|_| Error::coercion(path, T::NAME, format!("out-of-range number {}", wide)))
}

pub fn float<T: Float>(value: Value, path: &str, lenient: bool) -> Result<Option<T>, Error> {
    let wide = match value {
        Value::Null => return Ok(None),
        Value::Integer(i) => i as f64,
        Value::Float(f) => f,
        Value::String(ref s) => match s.trim().parse::<f64>() {
            Ok(f) => f,
            Err(_) if lenient => return Ok(None),
            Err(_) => return Err(Error::coercion(path, T::NAME, format!("text {:?}", s))),
        },
        Value::Bool(_) if lenient => return Ok(None),
        other => return Err(Error::coercion(path, T::NAME, other.kind_name())),
    };
    let narrow = T::from_f64(wide);
    if !lenient && wide.is_finite() && !narrow.is_finite() {
        let found = format!("out-of-range number {}", wide);
        return Err(Error::coercion(path, T::NAME, found));
    }
    Ok(Some(narrow))
}

pub fn boolean(value: Value, path: &str, lenient: bool) -> Result<Option<bool>, Error> {
    match value {
        Value::Null => Ok(None),
        Value::Bool(b) => Ok(Some(b)),
        Value::String(ref s) if s.trim().eq_ignore_ascii_case("true") => Ok(Some(true)),
        Value::String(ref s) if s.trim().eq_ignore_ascii_case("false") => Ok(Some(false)),
        Value::String(_) | Value::Integer(_) | Value::Float(_) if lenient => Ok(None),
        other => Err(Error::coercion(path, "boolean", other.kind_name())),
    }
}

/// Read a list of scalars as text. An empty list is "no value".
pub fn text_list(value: Value, path: &str, lenient: bool) -> Result<Option<Vec<String>>, Error> {
    let items = match value {
        Value::Null => return Ok(None),
        Value::Array(items) => items,
        Value::Map(_) => return Err(Error::coercion(path, "text list", "section")),
        _ if lenient => return Ok(None),
        other => return Err(Error::coercion(path, "text list", other.kind_name())),
    };

    let mut result = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::Null => continue,
            Value::Array(_) | Value::Map(_) => {
                let found = format!("list of {}", item.kind_name());
                return Err(Error::coercion(path, "text list", found));
            }
            scalar => result.extend(text(scalar, path)?),
        }
    }

    Ok(if result.is_empty() { None } else { Some(result) })
}
