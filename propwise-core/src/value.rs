//! Property values and the scalar types that can carry them.
//!
//! Every property exposed through [`Properties`](crate::Properties) is read
//! and written as a [`PropertyValue`]. A field type takes part in
//! introspection by implementing [`PropertyType`], which ties the Rust type
//! to a [`ValueKind`] and converts in both directions.
//!
//! ```rust
//! use propwise_core::{PropertyType, PropertyValue, ValueKind};
//!
//! let value = Some(42_i32).to_value();
//! assert_eq!(value, PropertyValue::Int(42));
//! assert_eq!(<Option<i32> as PropertyType>::KIND, ValueKind::Int);
//!
//! let back = <Option<i32>>::from_value(PropertyValue::Null).unwrap();
//! assert_eq!(back, None);
//! ```

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// A scalar property value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// Absent value (`None`).
    Null,
    /// Boolean value.
    Bool(bool),
    /// Signed integer value.
    Int(i64),
    /// Unsigned integer value.
    UInt(u64),
    /// Float value.
    Float(f64),
    /// String value.
    String(String),
    /// UUID value.
    Uuid(Uuid),
    /// UTC timestamp.
    DateTime(DateTime<Utc>),
    /// Calendar date.
    Date(NaiveDate),
}

impl PropertyValue {
    /// Check if this is the absent value.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Check if the value is absent or renders as an empty string.
    ///
    /// Only strings can have an empty textual form; every other variant
    /// renders at least one character.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::String(s) => s.is_empty(),
            _ => false,
        }
    }

    /// The kind of this value, or `None` for [`PropertyValue::Null`].
    pub fn kind(&self) -> Option<ValueKind> {
        match self {
            Self::Null => None,
            Self::Bool(_) => Some(ValueKind::Bool),
            Self::Int(_) => Some(ValueKind::Int),
            Self::UInt(_) => Some(ValueKind::UInt),
            Self::Float(_) => Some(ValueKind::Float),
            Self::String(_) => Some(ValueKind::String),
            Self::Uuid(_) => Some(ValueKind::Uuid),
            Self::DateTime(_) => Some(ValueKind::DateTime),
            Self::Date(_) => Some(ValueKind::Date),
        }
    }

    /// Compare two values the way an equality filter does.
    ///
    /// Integers compare by numeric value regardless of signedness. An
    /// integer equals a float only if the float holds exactly that integer.
    pub fn loosely_equals(&self, other: &PropertyValue) -> bool {
        match (self, other) {
            (Self::Int(a), Self::UInt(b)) | (Self::UInt(b), Self::Int(a)) => {
                i128::from(*a) == i128::from(*b)
            }
            (Self::Int(a), Self::Float(b)) | (Self::Float(b), Self::Int(a)) => {
                integer_equals_float(i128::from(*a), *b)
            }
            (Self::UInt(a), Self::Float(b)) | (Self::Float(b), Self::UInt(a)) => {
                integer_equals_float(i128::from(*a), *b)
            }
            _ => self == other,
        }
    }

    /// Convert to a JSON value. Non-finite floats become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        use serde_json::Value;

        match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Int(i) => Value::from(*i),
            Self::UInt(u) => Value::from(*u),
            Self::Float(f) => serde_json::Number::from_f64(*f).map_or(Value::Null, Value::Number),
            Self::String(s) => Value::String(s.clone()),
            other => Value::String(other.to_string()),
        }
    }
}

// Every i64 and u64 fits in i128, and `as` saturates, so a float outside
// that range never round-trips.
fn integer_equals_float(int: i128, float: f64) -> bool {
    float.fract() == 0.0 && float as i128 == int
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            Self::UInt(u) => write!(f, "{}", u),
            Self::Float(v) => write!(f, "{}", v),
            Self::String(s) => f.write_str(s),
            Self::Uuid(u) => write!(f, "{}", u),
            Self::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

/// The kind tag of a non-null [`PropertyValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// Boolean.
    Bool,
    /// Signed integer.
    Int,
    /// Unsigned integer.
    UInt,
    /// Floating point.
    Float,
    /// String.
    String,
    /// UUID.
    Uuid,
    /// UTC timestamp.
    DateTime,
    /// Calendar date.
    Date,
}

impl ValueKind {
    /// Get the kind name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::UInt => "uint",
            Self::Float => "float",
            Self::String => "string",
            Self::Uuid => "uuid",
            Self::DateTime => "datetime",
            Self::Date => "date",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a [`PropertyValue`] could not be converted into a field type.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// The value has a kind the target type does not accept.
    #[error("expected {expected} value, found {found}")]
    Mismatch {
        /// Kind of the target type.
        expected: ValueKind,
        /// Kind of the offered value.
        found: ValueKind,
    },

    /// A null value was offered to a non-optional type.
    #[error("null is not allowed for a required {expected} value")]
    Null {
        /// Kind of the target type.
        expected: ValueKind,
    },

    /// The value does not fit into the target type.
    #[error("value {value} is out of range for {target}")]
    OutOfRange {
        /// Rendered offending value.
        value: String,
        /// Rust name of the target type.
        target: &'static str,
    },
}

impl ConversionError {
    fn unexpected(expected: ValueKind, found: &PropertyValue) -> Self {
        match found.kind() {
            Some(found) => Self::Mismatch { expected, found },
            None => Self::Null { expected },
        }
    }
}

/// A Rust type that can be exposed as a property.
///
/// Implemented for the scalar types and for `Option<T>` of them. The
/// conversion rules form the copy compatibility table: integers convert
/// between each other when the value fits, integers widen into floats,
/// and every other kind only accepts itself.
pub trait PropertyType: Sized {
    /// Kind produced by [`PropertyType::to_value`] for non-null values.
    const KIND: ValueKind;

    /// Whether the type can hold [`PropertyValue::Null`].
    const NULLABLE: bool = false;

    /// Read the current value.
    fn to_value(&self) -> PropertyValue;

    /// Convert a value into this type.
    fn from_value(value: PropertyValue) -> Result<Self, ConversionError>;

    /// Check that `value` would convert, without keeping the result.
    fn validate(value: &PropertyValue) -> Result<(), ConversionError> {
        Self::from_value(value.clone()).map(|_| ())
    }
}

impl<T: PropertyType> PropertyType for Option<T> {
    const KIND: ValueKind = T::KIND;
    const NULLABLE: bool = true;

    fn to_value(&self) -> PropertyValue {
        match self {
            Some(v) => v.to_value(),
            None => PropertyValue::Null,
        }
    }

    fn from_value(value: PropertyValue) -> Result<Self, ConversionError> {
        match value {
            PropertyValue::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }
}

impl PropertyType for bool {
    const KIND: ValueKind = ValueKind::Bool;

    fn to_value(&self) -> PropertyValue {
        PropertyValue::Bool(*self)
    }

    fn from_value(value: PropertyValue) -> Result<Self, ConversionError> {
        match value {
            PropertyValue::Bool(b) => Ok(b),
            other => Err(ConversionError::unexpected(Self::KIND, &other)),
        }
    }
}

macro_rules! impl_integer_property {
    ($kind:ident, $variant:ident, $wide:ty => $($ty:ty),+) => {
        $(
            impl PropertyType for $ty {
                const KIND: ValueKind = ValueKind::$kind;

                fn to_value(&self) -> PropertyValue {
                    PropertyValue::$variant(<$wide>::from(*self))
                }

                fn from_value(value: PropertyValue) -> Result<Self, ConversionError> {
                    let converted = match &value {
                        PropertyValue::Int(i) => <$ty>::try_from(*i).ok(),
                        PropertyValue::UInt(u) => <$ty>::try_from(*u).ok(),
                        other => return Err(ConversionError::unexpected(Self::KIND, other)),
                    };
                    converted.ok_or_else(|| ConversionError::OutOfRange {
                        value: value.to_string(),
                        target: stringify!($ty),
                    })
                }
            }
        )+
    };
}

impl_integer_property!(Int, Int, i64 => i8, i16, i32, i64);
impl_integer_property!(UInt, UInt, u64 => u8, u16, u32, u64);

impl PropertyType for f64 {
    const KIND: ValueKind = ValueKind::Float;

    fn to_value(&self) -> PropertyValue {
        PropertyValue::Float(*self)
    }

    fn from_value(value: PropertyValue) -> Result<Self, ConversionError> {
        match value {
            PropertyValue::Float(f) => Ok(f),
            PropertyValue::Int(i) => Ok(i as f64),
            PropertyValue::UInt(u) => Ok(u as f64),
            other => Err(ConversionError::unexpected(Self::KIND, &other)),
        }
    }
}

impl PropertyType for f32 {
    const KIND: ValueKind = ValueKind::Float;

    fn to_value(&self) -> PropertyValue {
        PropertyValue::Float(f64::from(*self))
    }

    fn from_value(value: PropertyValue) -> Result<Self, ConversionError> {
        let wide = f64::from_value(value)?;
        let narrow = wide as f32;
        if wide.is_finite() && !narrow.is_finite() {
            return Err(ConversionError::OutOfRange {
                value: wide.to_string(),
                target: "f32",
            });
        }
        Ok(narrow)
    }
}

impl PropertyType for String {
    const KIND: ValueKind = ValueKind::String;

    fn to_value(&self) -> PropertyValue {
        PropertyValue::String(self.clone())
    }

    fn from_value(value: PropertyValue) -> Result<Self, ConversionError> {
        match value {
            PropertyValue::String(s) => Ok(s),
            other => Err(ConversionError::unexpected(Self::KIND, &other)),
        }
    }
}

impl PropertyType for Uuid {
    const KIND: ValueKind = ValueKind::Uuid;

    fn to_value(&self) -> PropertyValue {
        PropertyValue::Uuid(*self)
    }

    fn from_value(value: PropertyValue) -> Result<Self, ConversionError> {
        match value {
            PropertyValue::Uuid(u) => Ok(u),
            other => Err(ConversionError::unexpected(Self::KIND, &other)),
        }
    }
}

impl PropertyType for DateTime<Utc> {
    const KIND: ValueKind = ValueKind::DateTime;

    fn to_value(&self) -> PropertyValue {
        PropertyValue::DateTime(*self)
    }

    fn from_value(value: PropertyValue) -> Result<Self, ConversionError> {
        match value {
            PropertyValue::DateTime(dt) => Ok(dt),
            other => Err(ConversionError::unexpected(Self::KIND, &other)),
        }
    }
}

impl PropertyType for NaiveDate {
    const KIND: ValueKind = ValueKind::Date;

    fn to_value(&self) -> PropertyValue {
        PropertyValue::Date(*self)
    }

    fn from_value(value: PropertyValue) -> Result<Self, ConversionError> {
        match value {
            PropertyValue::Date(d) => Ok(d),
            other => Err(ConversionError::unexpected(Self::KIND, &other)),
        }
    }
}
