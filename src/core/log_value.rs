//! Values carried as positional and keyword extras of a log call

use serde::{Deserialize, Serialize};
use std::fmt;

/// Value type for positional and keyword log arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LogValue {
    String(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Null,
}

impl LogValue {
    /// Wrap anything displayable as a string value
    pub fn display(value: impl fmt::Display) -> Self {
        LogValue::String(value.to_string())
    }

    /// Quoted representation used by the `%r` conversion
    pub fn repr(&self) -> String {
        match self {
            LogValue::String(s) => format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'")),
            other => other.to_string(),
        }
    }

    pub(crate) fn as_f64(&self) -> Option<f64> {
        match self {
            LogValue::Int(i) => Some(*i as f64),
            LogValue::UInt(u) => Some(*u as f64),
            LogValue::Float(f) => Some(*f),
            LogValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            LogValue::String(_) | LogValue::Null => None,
        }
    }

    pub(crate) fn as_i128(&self) -> Option<i128> {
        match self {
            LogValue::Int(i) => Some(i128::from(*i)),
            LogValue::UInt(u) => Some(i128::from(*u)),
            LogValue::Float(f) if f.is_finite() => Some(f.trunc() as i128),
            LogValue::Bool(b) => Some(i128::from(*b)),
            _ => None,
        }
    }

    pub(crate) fn type_name(&self) -> &'static str {
        match self {
            LogValue::String(_) => "str",
            LogValue::Int(_) | LogValue::UInt(_) => "int",
            LogValue::Float(_) => "float",
            LogValue::Bool(_) => "bool",
            LogValue::Null => "None",
        }
    }
}

impl fmt::Display for LogValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogValue::String(s) => write!(f, "{}", s),
            LogValue::Int(i) => write!(f, "{}", i),
            LogValue::UInt(u) => write!(f, "{}", u),
            // Debug keeps the fractional part of integral floats: 2.0, not 2
            LogValue::Float(fl) => write!(f, "{:?}", fl),
            LogValue::Bool(b) => write!(f, "{}", b),
            LogValue::Null => write!(f, "None"),
        }
    }
}

impl From<String> for LogValue {
    fn from(s: String) -> Self {
        LogValue::String(s)
    }
}

impl From<&String> for LogValue {
    fn from(s: &String) -> Self {
        LogValue::String(s.clone())
    }
}

impl From<&str> for LogValue {
    fn from(s: &str) -> Self {
        LogValue::String(s.to_string())
    }
}

impl From<char> for LogValue {
    fn from(c: char) -> Self {
        LogValue::String(c.to_string())
    }
}

macro_rules! impl_from_signed {
    ($($ty:ty),*) => {
        $(impl From<$ty> for LogValue {
            fn from(i: $ty) -> Self {
                LogValue::Int(i64::from(i))
            }
        })*
    };
}

macro_rules! impl_from_unsigned {
    ($($ty:ty),*) => {
        $(impl From<$ty> for LogValue {
            fn from(u: $ty) -> Self {
                LogValue::UInt(u64::from(u))
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64);
impl_from_unsigned!(u8, u16, u32, u64);

impl From<isize> for LogValue {
    fn from(i: isize) -> Self {
        LogValue::Int(i as i64)
    }
}

impl From<usize> for LogValue {
    fn from(u: usize) -> Self {
        LogValue::UInt(u as u64)
    }
}

impl From<f32> for LogValue {
    fn from(f: f32) -> Self {
        LogValue::Float(f64::from(f))
    }
}

impl From<f64> for LogValue {
    fn from(f: f64) -> Self {
        LogValue::Float(f)
    }
}

impl From<bool> for LogValue {
    fn from(b: bool) -> Self {
        LogValue::Bool(b)
    }
}

impl<T: Into<LogValue>> From<Option<T>> for LogValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(LogValue::Null, Into::into)
    }
}
