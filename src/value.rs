//! Payloads stored in an entity's value map.

use alloc::string::String;
use core::fmt;

use crate::entity::EntityId;

/// A value attached to an entity under a [`ValueId`](crate::entity::ValueId).
///
/// # Examples
///
/// ```rust
/// use entity_slots::Value;
///
/// let v = Value::from(42);
/// assert_eq!(v, Value::Int(42));
/// assert_eq!(v.type_name(), "int");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A boolean flag.
    Bool(bool),
    /// A signed integer. Narrower integers are widened on the way in.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// Owned text.
    Text(String),
    /// A reference to another entity.
    Entity(EntityId),
}

impl Value {
    /// The name of the stored variant, as reported in type mismatch errors.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => bool::TYPE_NAME,
            Value::Int(_) => i64::TYPE_NAME,
            Value::Float(_) => f64::TYPE_NAME,
            Value::Text(_) => String::TYPE_NAME,
            Value::Entity(_) => EntityId::TYPE_NAME,
        }
    }

    /// Converts the value into `T`, or `None` if it holds another type.
    pub fn get<T: FromValue>(&self) -> Option<T> {
        T::from_value(self)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Text(v) => f.write_str(v),
            Value::Entity(v) => write!(f, "{v}"),
        }
    }
}

/// Typed extraction from a stored [`Value`].
///
/// Conversions are strict: an `Int` never reads back as a float, and an
/// integer that does not fit the requested width is a mismatch.
pub trait FromValue: Sized {
    /// Name used for this type in error messages.
    const TYPE_NAME: &'static str;

    /// Returns the converted value, or `None` on a type mismatch.
    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for bool {
    const TYPE_NAME: &'static str = "bool";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromValue for i64 {
    const TYPE_NAME: &'static str = "int";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromValue for i32 {
    const TYPE_NAME: &'static str = "i32";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(v) => i32::try_from(*v).ok(),
            _ => None,
        }
    }
}

impl FromValue for f64 {
    const TYPE_NAME: &'static str = "float";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromValue for f32 {
    const TYPE_NAME: &'static str = "f32";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(v) => Some(*v as f32),
            _ => None,
        }
    }
}

impl FromValue for String {
    const TYPE_NAME: &'static str = "text";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl FromValue for EntityId {
    const TYPE_NAME: &'static str = "entity";

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Entity(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromValue for Value {
    const TYPE_NAME: &'static str = "value";

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v.into())
                }
            }
        )*
    };
}

impl_from! {
    bool => Bool,
    i8 => Int,
    i16 => Int,
    i32 => Int,
    i64 => Int,
    u8 => Int,
    u16 => Int,
    u32 => Int,
    f32 => Float,
    f64 => Float,
    String => Text,
    &str => Text,
    EntityId => Entity,
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn conversions_are_strict() {
        let v = Value::from(42);
        assert_eq!(v.get::<i32>(), Some(42));
        assert_eq!(v.get::<i64>(), Some(42));
        assert_eq!(v.get::<f64>(), None);
        assert_eq!(v.get::<String>(), None);
        assert_eq!(v.get::<bool>(), None);
    }

    #[test]
    fn narrowing_out_of_range_is_a_mismatch() {
        let v = Value::Int(i64::from(i32::MAX) + 1);
        assert_eq!(v.get::<i32>(), None);
        assert_eq!(v.get::<i64>(), Some(i64::from(i32::MAX) + 1));
        assert_eq!(<i32 as FromValue>::TYPE_NAME, "i32");
        assert_eq!(<f32 as FromValue>::TYPE_NAME, "f32");
    }

    #[test]
    fn text_and_entities() {
        let v = Value::from("hp");
        assert_eq!(v.get::<String>(), Some("hp".to_string()));
        assert_eq!(v.type_name(), "text");

        let e = Value::from(EntityId::new(3));
        assert_eq!(e.get::<EntityId>(), Some(EntityId::new(3)));
        assert_eq!(e.type_name(), "entity");
    }

    #[test]
    fn display() {
        assert_eq!(Value::from(1.5).to_string(), "1.5");
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::from("x").to_string(), "x");
    }
}
