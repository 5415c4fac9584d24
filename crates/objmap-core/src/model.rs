//! Model accessor tables
//!
//! Rust has no runtime reflection, so every model type taking part in
//! auto-mapping supplies an explicit [`ModelDescriptor`]: an optional default
//! constructor plus a table of named members, each with a getter, a setter, or
//! both. The table is built once per type and shared for the life of the
//! process. Most models declare it with [`mappable_model!`](crate::mappable_model).

use crate::shape::{Mappable, Shape};
use crate::types::TypeKey;
use crate::value::Value;
use std::any::Any;
use std::fmt;
use std::marker::PhantomData;

/// A type with an accessor table
pub trait Model: Mappable {
    /// Display name used in type keys and error messages
    const NAME: &'static str;

    /// The type's accessor table
    fn descriptor() -> &'static ModelDescriptor;
}

type Getter = Box<dyn Fn(&dyn Any) -> Option<Value> + Send + Sync>;
type Setter = Box<dyn Fn(&mut dyn Any, Value) -> bool + Send + Sync>;
type Constructor = fn() -> Box<dyn Any + Send + Sync>;

/// One named member of a model
pub struct MemberDescriptor {
    name: &'static str,
    shape: Shape,
    getter: Option<Getter>,
    setter: Option<Setter>,
}

impl MemberDescriptor {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared type of the member
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn is_readable(&self) -> bool {
        self.getter.is_some()
    }

    pub fn is_writable(&self) -> bool {
        self.setter.is_some()
    }

    /// Read the member from an instance of the owning model
    pub fn get(&self, instance: &dyn Any) -> Option<Value> {
        self.getter.as_ref().and_then(|get| get(instance))
    }

    /// Store a value of exactly the member's type; false if it does not fit
    pub fn set(&self, instance: &mut dyn Any, value: Value) -> bool {
        self.setter.as_ref().is_some_and(|set| set(instance, value))
    }
}

impl fmt::Debug for MemberDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberDescriptor")
            .field("name", &self.name)
            .field("type", &self.shape.name())
            .field("readable", &self.is_readable())
            .field("writable", &self.is_writable())
            .finish()
    }
}

/// Accessor table of one model type
pub struct ModelDescriptor {
    key: TypeKey,
    constructor: Option<Constructor>,
    members: Vec<MemberDescriptor>,
}

impl ModelDescriptor {
    pub fn builder<T: Any + Send + Sync>(name: &'static str) -> DescriptorBuilder<T> {
        DescriptorBuilder {
            key: TypeKey::named::<T>(name),
            constructor: None,
            members: Vec::new(),
            _marker: PhantomData,
        }
    }

    pub fn key(&self) -> TypeKey {
        self.key
    }

    pub fn name(&self) -> &'static str {
        self.key.name()
    }

    pub fn has_constructor(&self) -> bool {
        self.constructor.is_some()
    }

    /// A fresh default instance, if the model declared a default constructor
    pub fn construct(&self) -> Option<Box<dyn Any + Send + Sync>> {
        self.constructor.map(|construct| construct())
    }

    pub fn members(&self) -> &[MemberDescriptor] {
        &self.members
    }

    /// Member by case-insensitive name
    pub fn member(&self, name: &str) -> Option<&MemberDescriptor> {
        self.members
            .iter()
            .find(|member| member.name.eq_ignore_ascii_case(name))
    }

    /// Readable member by case-insensitive name
    pub fn readable(&self, name: &str) -> Option<&MemberDescriptor> {
        self.member(name).filter(|member| member.is_readable())
    }

    /// Writable members in declaration order
    pub fn writable_members(&self) -> impl Iterator<Item = &MemberDescriptor> {
        self.members.iter().filter(|member| member.is_writable())
    }
}

impl fmt::Debug for ModelDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelDescriptor")
            .field("name", &self.name())
            .field("constructible", &self.has_constructor())
            .field("members", &self.members)
            .finish()
    }
}

fn construct_default<T: Default + Any + Send + Sync>() -> Box<dyn Any + Send + Sync> {
    Box::new(T::default())
}

/// Builder for a [`ModelDescriptor`]
pub struct DescriptorBuilder<T> {
    key: TypeKey,
    constructor: Option<Constructor>,
    members: Vec<MemberDescriptor>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Any + Send + Sync> DescriptorBuilder<T> {
    /// Allow the engine to create `T` through `Default`
    pub fn default_constructor(mut self) -> Self
    where
        T: Default,
    {
        self.constructor = Some(construct_default::<T>);
        self
    }

    /// A readable and writable stored field
    pub fn field<F: Mappable>(
        self,
        name: &'static str,
        get: fn(&T) -> &F,
        get_mut: fn(&mut T) -> &mut F,
    ) -> Self {
        self.getter(name, move |model: &T| get(model).clone())
            .setter(name, move |model: &mut T, value: F| *get_mut(model) = value)
    }

    /// A readable member, stored or computed
    pub fn getter<F, G>(self, name: &'static str, get: G) -> Self
    where
        F: Mappable,
        G: Fn(&T) -> F + Send + Sync + 'static,
    {
        let getter: Getter = Box::new(move |instance: &dyn Any| {
            instance.downcast_ref::<T>().map(|model| get(model).into_value())
        });
        self.push::<F>(name, Some(getter), None)
    }

    /// A writable member
    pub fn setter<F, S>(self, name: &'static str, set: S) -> Self
    where
        F: Mappable,
        S: Fn(&mut T, F) + Send + Sync + 'static,
    {
        let setter: Setter = Box::new(move |instance: &mut dyn Any, value: Value| {
            match (instance.downcast_mut::<T>(), F::from_value(value)) {
                (Some(model), Some(value)) => {
                    set(model, value);
                    true
                }
                _ => false,
            }
        });
        self.push::<F>(name, None, Some(setter))
    }

    fn push<F: Mappable>(
        mut self,
        name: &'static str,
        getter: Option<Getter>,
        setter: Option<Setter>,
    ) -> Self {
        match self.members.iter_mut().find(|member| member.name == name) {
            Some(member) => {
                if getter.is_some() {
                    member.getter = getter;
                }
                if setter.is_some() {
                    member.setter = setter;
                }
            }
            None => self.members.push(MemberDescriptor {
                name,
                shape: F::shape(),
                getter,
                setter,
            }),
        }
        self
    }

    pub fn build(self) -> ModelDescriptor {
        ModelDescriptor {
            key: self.key,
            constructor: self.constructor,
            members: self.members,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Account {
        first: String,
        last: String,
        balance: f64,
    }

    fn account_descriptor() -> ModelDescriptor {
        ModelDescriptor::builder::<Account>("Account")
            .default_constructor()
            .field("First", |a| &a.first, |a| &mut a.first)
            .field("Balance", |a| &a.balance, |a| &mut a.balance)
            .getter("DisplayName", |a: &Account| format!("{} {}", a.first, a.last))
            .setter("Last", |a: &mut Account, last: String| a.last = last)
            .build()
    }

    #[test]
    fn test_member_access_flags() {
        let descriptor = account_descriptor();

        assert_eq!(descriptor.members().len(), 4);
        assert!(descriptor.readable("displayname").is_some());
        assert!(descriptor.readable("last").is_none());
        let writable: Vec<_> = descriptor.writable_members().map(|m| m.name()).collect();
        assert_eq!(writable, vec!["First", "Balance", "Last"]);
    }

    #[test]
    fn test_construct_and_set() {
        let descriptor = account_descriptor();
        let mut instance = descriptor.construct().unwrap();

        let first = descriptor.member("first").unwrap();
        assert!(first.set(&mut *instance, Value::Text("Ada".to_string())));
        assert!(!first.set(&mut *instance, Value::I32(1)));

        let last = descriptor.member("Last").unwrap();
        assert!(last.set(&mut *instance, Value::Text("Lovelace".to_string())));

        let display = descriptor.member("DisplayName").unwrap();
        assert_eq!(
            display.get(&*instance),
            Some(Value::Text("Ada Lovelace".to_string()))
        );
    }

    #[test]
    fn test_getter_and_setter_merge_into_one_member() {
        let descriptor = ModelDescriptor::builder::<Account>("Account")
            .getter("Total", |a: &Account| a.balance)
            .setter("Total", |a: &mut Account, total: f64| a.balance = total)
            .build();

        let member = descriptor.member("total").unwrap();
        assert!(member.is_readable());
        assert!(member.is_writable());
        assert!(!descriptor.has_constructor());
        assert!(descriptor.construct().is_none());
    }
}
