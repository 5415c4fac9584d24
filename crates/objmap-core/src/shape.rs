//! Declared type shapes and the [`Mappable`] trait
//!
//! A [`Shape`] is what the engine knows about a member's declared type: its
//! identity and whether it is a scalar, an enumeration, an optional wrapper, a
//! growable list, a fixed-size array, or a model with an accessor table.
//! [`Mappable`] ties a Rust type to its shape and to its [`Value`] form.

use crate::model::{Model, ModelDescriptor};
use crate::types::TypeKey;
use crate::value::{Sequence, Value};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::fmt;
use uuid::Uuid;

/// A Rust type usable as a mapping source, target, or member
pub trait Mappable: Clone + Send + Sync + 'static {
    /// Declared shape of the type
    fn shape() -> Shape;

    /// Lower to a dynamic value
    fn into_value(self) -> Value;

    /// Lift from a dynamic value of exactly this type; no conversion
    fn from_value(value: Value) -> Option<Self>;

    /// The default/empty value produced when a mapping source is absent
    fn absent() -> Option<Self> {
        None
    }
}

/// Scalar ("primitive-like") kinds understood by the coercion pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Char,
    Text,
    Date,
    DateTime,
    Timestamp,
    Uuid,
}

impl ScalarKind {
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            ScalarKind::I8
                | ScalarKind::I16
                | ScalarKind::I32
                | ScalarKind::I64
                | ScalarKind::U8
                | ScalarKind::U16
                | ScalarKind::U32
                | ScalarKind::U64
        )
    }

    pub fn is_float(self) -> bool {
        matches!(self, ScalarKind::F32 | ScalarKind::F64)
    }

    pub fn is_numeric(self) -> bool {
        self.is_integer() || self.is_float()
    }

    pub fn is_temporal(self) -> bool {
        matches!(self, ScalarKind::Date | ScalarKind::DateTime | ScalarKind::Timestamp)
    }
}

/// Lazy reference to a model's accessor table
///
/// The descriptor is resolved on demand so that self-referential models can
/// name their own shape while their descriptor is being built.
#[derive(Clone, Copy)]
pub struct ModelRef {
    key: TypeKey,
    descriptor: fn() -> &'static ModelDescriptor,
}

impl ModelRef {
    pub fn of<T: Model>() -> Self {
        Self {
            key: TypeKey::named::<T>(T::NAME),
            descriptor: T::descriptor,
        }
    }

    pub fn key(&self) -> TypeKey {
        self.key
    }

    pub fn name(&self) -> &'static str {
        self.key.name()
    }

    pub fn descriptor(&self) -> &'static ModelDescriptor {
        (self.descriptor)()
    }
}

impl fmt::Debug for ModelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ModelRef({})", self.key.name())
    }
}

/// Variant table of a user enumeration
#[derive(Debug, Clone, Copy)]
pub struct EnumRef {
    key: TypeKey,
    variants: &'static [(&'static str, i64)],
}

impl EnumRef {
    pub fn new<T: 'static>(name: &'static str, variants: &'static [(&'static str, i64)]) -> Self {
        Self {
            key: TypeKey::named::<T>(name),
            variants,
        }
    }

    pub fn key(&self) -> TypeKey {
        self.key
    }

    pub fn variants(&self) -> &'static [(&'static str, i64)] {
        self.variants
    }

    /// Variant whose name matches case-insensitively
    pub fn variant_named(&self, name: &str) -> Option<(&'static str, i64)> {
        self.variants
            .iter()
            .copied()
            .find(|(variant, _)| variant.eq_ignore_ascii_case(name))
    }

    pub fn variant_with(&self, discriminant: i64) -> Option<(&'static str, i64)> {
        self.variants
            .iter()
            .copied()
            .find(|(_, value)| *value == discriminant)
    }
}

/// Kind of a declared type
#[derive(Debug, Clone)]
pub enum ShapeKind {
    Scalar(ScalarKind),
    Enum(EnumRef),
    Optional(Box<Shape>),
    /// Growable sequence (`Vec<T>`)
    List(Box<Shape>),
    /// Fixed-size sequence (`Box<[T]>`)
    Array(Box<Shape>),
    Model(ModelRef),
}

/// Declared type of a mapping source, target, or member
#[derive(Debug, Clone)]
pub struct Shape {
    key: TypeKey,
    kind: ShapeKind,
}

impl Shape {
    pub fn new(key: TypeKey, kind: ShapeKind) -> Self {
        Self { key, kind }
    }

    pub fn of<T: Mappable>() -> Self {
        T::shape()
    }

    pub fn model<T: Model>() -> Self {
        let model = ModelRef::of::<T>();
        Self::new(model.key(), ShapeKind::Model(model))
    }

    pub fn enumeration(variants: EnumRef) -> Self {
        Self::new(variants.key(), ShapeKind::Enum(variants))
    }

    pub fn key(&self) -> TypeKey {
        self.key
    }

    pub fn name(&self) -> &'static str {
        self.key.name()
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    pub fn is_optional(&self) -> bool {
        matches!(self.kind, ShapeKind::Optional(_))
    }

    /// The shape with one optional wrapper removed
    pub fn underlying(&self) -> &Shape {
        match &self.kind {
            ShapeKind::Optional(inner) => inner,
            _ => self,
        }
    }

    /// Element shape of a list or array; text is never a collection
    pub fn element(&self) -> Option<&Shape> {
        match &self.kind {
            ShapeKind::List(element) | ShapeKind::Array(element) => Some(element),
            _ => None,
        }
    }

    pub fn is_fixed_array(&self) -> bool {
        matches!(self.kind, ShapeKind::Array(_))
    }

    pub fn is_primitive_like(&self) -> bool {
        matches!(self.kind, ShapeKind::Scalar(_) | ShapeKind::Enum(_))
    }

    pub fn as_model(&self) -> Option<&ModelRef> {
        match &self.kind {
            ShapeKind::Model(model) => Some(model),
            _ => None,
        }
    }
}

macro_rules! scalar_mappable {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl Mappable for $ty {
                fn shape() -> Shape {
                    Shape::new(TypeKey::of::<$ty>(), ShapeKind::Scalar(ScalarKind::$variant))
                }

                fn into_value(self) -> Value {
                    Value::$variant(self)
                }

                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::$variant(v) => Some(v),
                        _ => None,
                    }
                }

                fn absent() -> Option<Self> {
                    Some(<$ty>::default())
                }
            }
        )*
    };
}

scalar_mappable! {
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    char => Char,
    String => Text,
    NaiveDate => Date,
    NaiveDateTime => DateTime,
    DateTime<Utc> => Timestamp,
    Uuid => Uuid,
}

impl<T: Mappable> Mappable for Option<T> {
    fn shape() -> Shape {
        Shape::new(TypeKey::of::<Self>(), ShapeKind::Optional(Box::new(T::shape())))
    }

    fn into_value(self) -> Value {
        match self {
            Some(value) => value.into_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            value => T::from_value(value).map(Some),
        }
    }

    fn absent() -> Option<Self> {
        Some(None)
    }
}

impl<T: Mappable> Mappable for Vec<T> {
    fn shape() -> Shape {
        Shape::new(TypeKey::of::<Self>(), ShapeKind::List(Box::new(T::shape())))
    }

    fn into_value(self) -> Value {
        let items = self.into_iter().map(Mappable::into_value).collect();
        Value::Seq(Sequence::new(TypeKey::of::<Self>(), items))
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Seq(seq) => seq.items.into_iter().map(T::from_value).collect(),
            _ => None,
        }
    }

    fn absent() -> Option<Self> {
        Some(Vec::new())
    }
}

impl<T: Mappable> Mappable for Box<[T]> {
    fn shape() -> Shape {
        Shape::new(TypeKey::of::<Self>(), ShapeKind::Array(Box::new(T::shape())))
    }

    fn into_value(self) -> Value {
        let items = self.into_vec().into_iter().map(Mappable::into_value).collect();
        Value::Seq(Sequence::new(TypeKey::of::<Self>(), items))
    }

    fn from_value(value: Value) -> Option<Self> {
        Vec::<T>::from_value(value).map(Vec::into_boxed_slice)
    }

    fn absent() -> Option<Self> {
        Some(Vec::new().into_boxed_slice())
    }
}
