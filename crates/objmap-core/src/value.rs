//! Dynamic values flowing through the mapping engine
//!
//! Every mappable datum is lowered to a [`Value`] before dispatch. A non-null
//! value always knows its exact runtime [`TypeKey`], which is what the
//! registry dispatches on and what the engine compares against a member's
//! declared [`Shape`] to decide whether a value is assignable as-is.

use crate::model::{Model, ModelDescriptor};
use crate::shape::{ModelRef, ScalarKind, Shape};
use crate::types::TypeKey;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::any::Any;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Runtime representation of a mappable value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Char(char),
    Text(String),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Timestamp(DateTime<Utc>),
    Uuid(Uuid),
    Enum(EnumValue),
    Object(Instance),
    Seq(Sequence),
}

impl Value {
    /// Runtime type of the value, `None` for null
    pub fn type_key(&self) -> Option<TypeKey> {
        let key = match self {
            Value::Null => return None,
            Value::Bool(_) => TypeKey::of::<bool>(),
            Value::I8(_) => TypeKey::of::<i8>(),
            Value::I16(_) => TypeKey::of::<i16>(),
            Value::I32(_) => TypeKey::of::<i32>(),
            Value::I64(_) => TypeKey::of::<i64>(),
            Value::U8(_) => TypeKey::of::<u8>(),
            Value::U16(_) => TypeKey::of::<u16>(),
            Value::U32(_) => TypeKey::of::<u32>(),
            Value::U64(_) => TypeKey::of::<u64>(),
            Value::F32(_) => TypeKey::of::<f32>(),
            Value::F64(_) => TypeKey::of::<f64>(),
            Value::Char(_) => TypeKey::of::<char>(),
            Value::Text(_) => TypeKey::of::<String>(),
            Value::Date(_) => TypeKey::of::<NaiveDate>(),
            Value::DateTime(_) => TypeKey::of::<NaiveDateTime>(),
            Value::Timestamp(_) => TypeKey::of::<DateTime<Utc>>(),
            Value::Uuid(_) => TypeKey::of::<Uuid>(),
            Value::Enum(e) => e.key,
            Value::Object(instance) => instance.key(),
            Value::Seq(seq) => seq.key,
        };
        Some(key)
    }

    /// Name of the runtime type, for messages
    pub fn type_name(&self) -> &'static str {
        self.type_key().map_or("null", |key| key.name())
    }

    pub fn scalar_kind(&self) -> Option<ScalarKind> {
        let kind = match self {
            Value::Bool(_) => ScalarKind::Bool,
            Value::I8(_) => ScalarKind::I8,
            Value::I16(_) => ScalarKind::I16,
            Value::I32(_) => ScalarKind::I32,
            Value::I64(_) => ScalarKind::I64,
            Value::U8(_) => ScalarKind::U8,
            Value::U16(_) => ScalarKind::U16,
            Value::U32(_) => ScalarKind::U32,
            Value::U64(_) => ScalarKind::U64,
            Value::F32(_) => ScalarKind::F32,
            Value::F64(_) => ScalarKind::F64,
            Value::Char(_) => ScalarKind::Char,
            Value::Text(_) => ScalarKind::Text,
            Value::Date(_) => ScalarKind::Date,
            Value::DateTime(_) => ScalarKind::DateTime,
            Value::Timestamp(_) => ScalarKind::Timestamp,
            Value::Uuid(_) => ScalarKind::Uuid,
            Value::Null | Value::Enum(_) | Value::Object(_) | Value::Seq(_) => return None,
        };
        Some(kind)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Scalars and enumerations; never objects, sequences or null
    pub fn is_primitive_like(&self) -> bool {
        matches!(self, Value::Enum(_)) || self.scalar_kind().is_some()
    }

    /// Whether the value can be stored in a member of `shape` without conversion
    pub fn is_assignable_to(&self, shape: &Shape) -> bool {
        self.type_key() == Some(shape.key())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_instance(&self) -> Option<&Instance> {
        match self {
            Value::Object(instance) => Some(instance),
            _ => None,
        }
    }

    pub fn as_seq(&self) -> Option<&Sequence> {
        match self {
            Value::Seq(seq) => Some(seq),
            _ => None,
        }
    }

    /// Borrow the model instance if this value holds a `T`
    pub fn as_model<T: Model>(&self) -> Option<&T> {
        self.as_instance()?.downcast_ref::<T>()
    }

    /// Extract an owned `T`, cloning only if the instance is shared
    pub fn into_model<T: Model>(self) -> Option<T> {
        match self {
            Value::Object(instance) => instance.into_inner::<T>(),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

/// A value of a user enumeration, carried by variant name and discriminant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnumValue {
    pub key: TypeKey,
    pub name: &'static str,
    pub discriminant: i64,
}

/// An ordered collection together with the collection type it came from
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    pub key: TypeKey,
    pub items: Vec<Value>,
}

impl Sequence {
    pub fn new(key: TypeKey, items: Vec<Value>) -> Self {
        Self { key, items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A model instance behind its accessor table
///
/// Instances are shared, so cloning a [`Value::Object`] never clones the model.
#[derive(Clone)]
pub struct Instance {
    model: ModelRef,
    data: Arc<dyn Any + Send + Sync>,
}

impl Instance {
    pub fn new<T: Model>(value: T) -> Self {
        Self {
            model: ModelRef::of::<T>(),
            data: Arc::new(value),
        }
    }

    pub(crate) fn from_parts(model: ModelRef, data: Box<dyn Any + Send + Sync>) -> Self {
        Self {
            model,
            data: Arc::from(data),
        }
    }

    pub fn key(&self) -> TypeKey {
        self.model.key()
    }

    pub fn model(&self) -> &ModelRef {
        &self.model
    }

    pub fn descriptor(&self) -> &'static ModelDescriptor {
        self.model.descriptor()
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.data.downcast_ref::<T>()
    }

    /// Read a member by case-insensitive name; `None` if absent or unreadable
    pub fn read(&self, member: &str) -> Option<Value> {
        self.descriptor().readable(member)?.get(&*self.data)
    }

    pub fn into_inner<T: Model>(self) -> Option<T> {
        let data = self.data.downcast::<T>().ok()?;
        Some(Arc::try_unwrap(data).unwrap_or_else(|shared| (*shared).clone()))
    }
}

impl PartialEq for Instance {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key() && Arc::ptr_eq(&self.data, &other.data)
    }
}

impl fmt::Debug for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Instance").field("model", &self.key().name()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Mappable;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Badge {
        code: String,
        level: i32,
    }

    crate::mappable_model!(Badge {
        "Code" => code,
        "Level" => level,
    });

    #[test]
    fn test_runtime_keys_match_shapes() {
        assert!(Value::I32(5).is_assignable_to(&i32::shape()));
        assert!(!Value::I32(5).is_assignable_to(&i64::shape()));
        assert!(Value::from("x").is_assignable_to(&String::shape()));
        assert!(!Value::Null.is_assignable_to(&Option::<String>::shape()));
    }

    #[test]
    fn test_primitive_like() {
        assert!(Value::Bool(true).is_primitive_like());
        assert!(Value::Uuid(Uuid::nil()).is_primitive_like());
        assert!(!Value::Null.is_primitive_like());
        assert!(!Badge::default().into_value().is_primitive_like());
    }

    #[test]
    fn test_instance_read_is_case_insensitive() {
        let value = Badge {
            code: "gold".to_string(),
            level: 3,
        }
        .into_value();
        let instance = value.as_instance().unwrap();

        assert_eq!(instance.read("code"), Some(Value::Text("gold".to_string())));
        assert_eq!(instance.read("LEVEL"), Some(Value::I32(3)));
        assert_eq!(instance.read("missing"), None);
    }

    #[test]
    fn test_into_model_round_trip() {
        let badge = Badge {
            code: "silver".to_string(),
            level: 2,
        };
        let value = badge.clone().into_value();
        let shared = value.clone();

        assert_eq!(value.as_model::<Badge>(), Some(&badge));
        assert_eq!(value.into_model::<Badge>(), Some(badge.clone()));
        assert_eq!(shared.into_model::<Badge>(), Some(badge));
        assert_eq!(Value::I32(1).into_model::<Badge>(), None);
    }

    #[test]
    fn test_type_name() {
        assert_eq!(Value::Null.type_name(), "null");
        assert_eq!(Badge::default().into_value().type_name(), "Badge");
    }
}
