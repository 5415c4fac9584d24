//! Type identity for registry dispatch
//!
//! A [`TypeKey`] identifies one Rust type at runtime. A [`TypePair`] is the
//! ordered (source, target) key under which mapping definitions are stored.
//! Equality and hashing use only the [`TypeId`]; the name is carried for
//! messages and logs.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Runtime identity of a mappable type
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Key for `T`, named by `std::any::type_name`
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Key for `T` with an explicit display name
    pub fn named<T: ?Sized + 'static>(name: &'static str) -> Self {
        Self {
            id: TypeId::of::<T>(),
            name,
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether this key identifies `T`
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeKey({})", self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Ordered (source, target) key for the mapping registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypePair {
    pub source: TypeKey,
    pub target: TypeKey,
}

impl TypePair {
    pub fn new(source: TypeKey, target: TypeKey) -> Self {
        Self { source, target }
    }

    /// The pair with source and target exchanged
    pub fn swapped(&self) -> Self {
        Self {
            source: self.target,
            target: self.source,
        }
    }

    pub fn source_name(&self) -> String {
        self.source.name().to_string()
    }

    pub fn target_name(&self) -> String {
        self.target.name().to_string()
    }
}

impl fmt::Display for TypePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct Customer;

    #[test]
    fn test_key_equality_ignores_name() {
        let a = TypeKey::named::<Customer>("Customer");
        let b = TypeKey::of::<Customer>();
        assert_eq!(a, b);
        assert_ne!(a, TypeKey::of::<String>());
        assert!(a.is::<Customer>());
    }

    #[test]
    fn test_pair_is_ordered() {
        let forward = TypePair::new(TypeKey::of::<String>(), TypeKey::of::<i32>());
        let reverse = forward.swapped();

        assert_ne!(forward, reverse);
        assert_eq!(reverse.swapped(), forward);

        let mut set = HashSet::new();
        set.insert(forward);
        set.insert(reverse);
        set.insert(forward);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_pair_display() {
        let pair = TypePair::new(
            TypeKey::named::<Customer>("Customer"),
            TypeKey::named::<String>("PartnerCustomer"),
        );
        assert_eq!(pair.to_string(), "Customer -> PartnerCustomer");
    }
}
