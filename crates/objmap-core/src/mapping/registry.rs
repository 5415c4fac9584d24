//! Mapping registry and dispatch
//!
//! [`Mapper`] stores [`MappingDefinition`]s by ordered type pair and exposes
//! the statically-typed (`map`, `map_with`, `map_opt`, `map_all`) and
//! runtime-typed (`map_value`) entry points. The auto-mapping engine calls
//! back into `map_value` for nested members and collection elements.
//!
//! Copyright (c) 2025 Objmap Team
//! Licensed under the Apache-2.0 license

use super::{MappingContext, MappingDefinition};
use crate::shape::{Mappable, Shape};
use crate::types::TypePair;
use crate::value::Value;
use crate::{Error, Result};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, trace};

/// Registry of mapping definitions keyed by (source type, target type)
///
/// Lookups and registrations may run concurrently from any thread. A lookup
/// takes a snapshot of the stored definition before running it, so a call in
/// flight keeps using the definition it found even if the pair is replaced.
///
/// There is no cycle detection: mapping a self-referencing object graph
/// recurses until the stack is exhausted.
#[derive(Default)]
pub struct Mapper {
    definitions: RwLock<HashMap<TypePair, Arc<MappingDefinition>>>,
}

impl Mapper {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a definition, replacing any previous one for the same pair
    ///
    /// A definition with a reverse function also stores its derived reverse
    /// definition under the swapped pair. That entry silently replaces any
    /// definition registered separately for the swapped pair.
    pub fn register(&self, definition: MappingDefinition) {
        let reversed = definition.reversed().ok();

        let mut definitions = self.definitions.write().unwrap_or_else(PoisonError::into_inner);
        debug!(pair = %definition.pair(), reverse = reversed.is_some(), "registering mapping");
        if let Some(reversed) = reversed {
            definitions.insert(reversed.pair(), Arc::new(reversed));
        }
        definitions.insert(definition.pair(), Arc::new(definition));
    }

    /// Whether a definition exists for `S -> T`
    pub fn contains<S: Mappable, T: Mappable>(&self) -> bool {
        self.contains_pair(&TypePair::new(S::shape().key(), T::shape().key()))
    }

    pub fn contains_pair(&self, pair: &TypePair) -> bool {
        self.read_definitions().contains_key(pair)
    }

    /// All registered pairs, in no particular order
    pub fn registered_pairs(&self) -> Vec<TypePair> {
        self.read_definitions().keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.read_definitions().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read_definitions().is_empty()
    }

    /// Map `source` to `T` using the shared frozen context
    pub fn map<S: Mappable, T: Mappable>(&self, source: &S) -> Result<T> {
        self.map_with(source, MappingContext::shared())
    }

    /// Map `source` to `T` with a caller-supplied context
    ///
    /// An absent source (a `None` option) yields `T`'s default value without a
    /// registry lookup. A model declared `no_default` has no such value, so
    /// this fails with [`Error::Construction`]; use [`Mapper::map_opt`] or an
    /// `Option<T>` target when the source may be absent.
    pub fn map_with<S: Mappable, T: Mappable>(
        &self,
        source: &S,
        context: &MappingContext,
    ) -> Result<T> {
        let value = self.map_value(source.clone().into_value(), &T::shape(), Some(context))?;
        lift::<T>(value)
    }

    /// Map an optional source; `None` short-circuits to `Ok(None)`
    pub fn map_opt<S: Mappable, T: Mappable>(
        &self,
        source: Option<&S>,
        context: Option<&MappingContext>,
    ) -> Result<Option<T>> {
        let Some(source) = source else {
            return Ok(None);
        };
        match self.map_value(source.clone().into_value(), &T::shape(), context)? {
            Value::Null => Ok(None),
            value => lift::<T>(value).map(Some),
        }
    }

    /// Map every element of `sources` in order
    pub fn map_all<S: Mappable, T: Mappable>(
        &self,
        sources: &[S],
        context: Option<&MappingContext>,
    ) -> Result<Vec<T>> {
        let context = context.unwrap_or(MappingContext::shared());
        sources
            .iter()
            .map(|source| self.map_with::<S, T>(source, context))
            .collect()
    }

    /// Runtime-typed entry point
    ///
    /// Dispatches on the runtime type of `source`, not on any declared type.
    /// An optional target is looked up by its inner type. A null source
    /// returns [`Value::Null`] without a lookup.
    pub fn map_value(
        &self,
        source: Value,
        target: &Shape,
        context: Option<&MappingContext>,
    ) -> Result<Value> {
        let Some(source_key) = source.type_key() else {
            trace!(target_type = target.name(), "absent source, skipping lookup");
            return Ok(Value::Null);
        };

        let pair = TypePair::new(source_key, target.underlying().key());
        let definition = self.lookup(&pair).ok_or_else(|| Error::UnregisteredMapping {
            source_type: pair.source_name(),
            target_type: pair.target_name(),
        })?;

        trace!(pair = %pair, "mapping");
        let context = context.unwrap_or(MappingContext::shared());
        definition.apply(source, context, self)
    }

    fn lookup(&self, pair: &TypePair) -> Option<Arc<MappingDefinition>> {
        self.read_definitions().get(pair).cloned()
    }

    fn read_definitions(
        &self,
    ) -> std::sync::RwLockReadGuard<'_, HashMap<TypePair, Arc<MappingDefinition>>> {
        self.definitions.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for Mapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pairs: Vec<String> = self.registered_pairs().iter().map(ToString::to_string).collect();
        f.debug_struct("Mapper").field("pairs", &pairs).finish()
    }
}

/// Lift a mapped value back to `T`; null becomes `T`'s default
fn lift<T: Mappable>(value: Value) -> Result<T> {
    if value.is_null() {
        return T::absent().ok_or_else(|| Error::Construction {
            source_type: "null".to_string(),
            target_type: T::shape().name().to_string(),
        });
    }

    let actual = value.type_name();
    T::from_value(value).ok_or_else(|| Error::TypeMismatch {
        expected: T::shape().name().to_string(),
        actual: actual.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::MapFn;
    use crate::types::TypeKey;
    use std::thread;

    fn parse_number(offset: i32) -> MapFn {
        Arc::new(move |value: Value, _: &MappingContext, _: &Mapper| {
            let n: i32 = value.as_str().and_then(|s| s.parse().ok()).unwrap_or_default();
            Ok(Value::I32(n + offset))
        })
    }

    fn text_to_number(offset: i32) -> MappingDefinition {
        MappingDefinition::new(
            TypePair::new(TypeKey::of::<String>(), TypeKey::of::<i32>()),
            parse_number(offset),
            None,
        )
    }

    #[test]
    fn test_unregistered_pair_fails() {
        let mapper = Mapper::new();
        let err = mapper.map::<String, i32>(&"123".to_string()).unwrap_err();

        match err {
            Error::UnregisteredMapping {
                source_type,
                target_type,
            } => {
                assert!(source_type.contains("String"));
                assert_eq!(target_type, "i32");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_registered_pair_maps() {
        let mapper = Mapper::new();
        mapper.register(text_to_number(0));

        assert_eq!(mapper.map::<String, i32>(&"123".to_string()).unwrap(), 123);
        assert!(mapper.contains::<String, i32>());
        assert!(!mapper.contains::<i32, String>());
        assert_eq!(mapper.len(), 1);
    }

    #[test]
    fn test_last_write_wins() {
        let mapper = Mapper::new();
        mapper.register(text_to_number(0));
        mapper.register(text_to_number(1000));

        assert_eq!(mapper.map::<String, i32>(&"1".to_string()).unwrap(), 1001);
        assert_eq!(mapper.len(), 1);
    }

    #[test]
    fn test_absent_source_skips_lookup() {
        let mapper = Mapper::new();

        let none: Option<String> = None;
        assert_eq!(mapper.map::<Option<String>, i32>(&none).unwrap(), 0);
        assert_eq!(mapper.map_opt::<String, i32>(None, None).unwrap(), None);
        assert_eq!(
            mapper.map_value(Value::Null, &i32::shape(), None).unwrap(),
            Value::Null
        );
    }

    #[test]
    fn test_optional_target_uses_inner_type() {
        let mapper = Mapper::new();
        mapper.register(text_to_number(0));

        let mapped: Option<i32> = mapper.map(&"8".to_string()).unwrap();
        assert_eq!(mapped, Some(8));
    }

    #[test]
    fn test_map_all_preserves_order() {
        let mapper = Mapper::new();
        mapper.register(text_to_number(0));

        let sources = vec!["3".to_string(), "1".to_string(), "2".to_string()];
        let mapped: Vec<i32> = mapper.map_all(&sources, None).unwrap();
        assert_eq!(mapped, vec![3, 1, 2]);
    }

    #[test]
    fn test_map_all_and_map_value_with_caller_context() {
        let mapper = Mapper::new();
        mapper.register(text_to_number(0));
        let context = MappingContext::new();

        let mapped: Vec<i32> = mapper.map_all(&["4".to_string()], Some(&context)).unwrap();
        assert_eq!(mapped, vec![4]);

        let value = mapper
            .map_value(Value::from("6"), &i32::shape(), Some(&context))
            .unwrap();
        assert_eq!(value, Value::I32(6));
    }

    #[test]
    fn test_reverse_registration_replaces_swapped_pair() {
        let mapper = Mapper::new();
        let back: MapFn = Arc::new(|value: Value, _: &MappingContext, _: &Mapper| match value {
            Value::I32(n) => Ok(Value::Text(format!("#{n}"))),
            other => Ok(other),
        });
        let separate: MapFn = Arc::new(|_: Value, _: &MappingContext, _: &Mapper| {
            Ok(Value::Text("separate".to_string()))
        });

        mapper.register(MappingDefinition::new(
            TypePair::new(TypeKey::of::<i32>(), TypeKey::of::<String>()),
            separate,
            None,
        ));
        assert_eq!(mapper.map::<i32, String>(&5).unwrap(), "separate");

        let pair = TypePair::new(TypeKey::of::<String>(), TypeKey::of::<i32>());
        mapper.register(MappingDefinition::new(pair, parse_number(0), Some(back)));

        assert_eq!(mapper.map::<i32, String>(&5).unwrap(), "#5");
        assert_eq!(mapper.map::<String, i32>(&"5".to_string()).unwrap(), 5);
        assert_eq!(mapper.len(), 2);
    }

    #[test]
    fn test_concurrent_lookups_and_registrations() {
        let mapper = Arc::new(Mapper::new());
        mapper.register(text_to_number(0));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let mapper = Arc::clone(&mapper);
                thread::spawn(move || {
                    for _ in 0..100 {
                        if i % 2 == 0 {
                            mapper.register(text_to_number(0));
                        } else {
                            let n = mapper.map::<String, i32>(&"9".to_string()).unwrap();
                            assert_eq!(n, 9);
                        }
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(mapper.len(), 1);
    }
}
