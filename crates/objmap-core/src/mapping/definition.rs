//! Mapping definitions stored in the registry
//!
//! A [`MappingDefinition`] is the immutable conversion logic for one ordered
//! type pair: a forward function and, optionally, a reverse function for the
//! swapped pair.

use super::{Mapper, MappingContext};
use crate::types::TypePair;
use crate::value::Value;
use crate::{Error, Result};
use std::fmt;
use std::sync::Arc;

/// Type-erased conversion function
///
/// Receives the source value, the context of the current call tree, and the
/// registry for nested lookups.
pub type MapFn = Arc<dyn Fn(Value, &MappingContext, &Mapper) -> Result<Value> + Send + Sync>;

/// Forward and optional reverse conversion for one type pair
#[derive(Clone)]
pub struct MappingDefinition {
    pair: TypePair,
    forward: MapFn,
    reverse: Option<MapFn>,
}

impl MappingDefinition {
    pub fn new(pair: TypePair, forward: MapFn, reverse: Option<MapFn>) -> Self {
        Self {
            pair,
            forward,
            reverse,
        }
    }

    pub fn pair(&self) -> TypePair {
        self.pair
    }

    pub fn has_reverse(&self) -> bool {
        self.reverse.is_some()
    }

    /// Run the forward function
    pub fn apply(&self, source: Value, context: &MappingContext, mapper: &Mapper) -> Result<Value> {
        (self.forward)(source, context, mapper)
    }

    /// The definition for the swapped pair
    ///
    /// The result is a snapshot: it shares this definition's functions but is
    /// not updated if either side is later replaced in a registry.
    pub fn reversed(&self) -> Result<MappingDefinition> {
        let reverse = self
            .reverse
            .clone()
            .ok_or_else(|| Error::ReverseNotConfigured {
                source_type: self.pair.source_name(),
                target_type: self.pair.target_name(),
            })?;

        Ok(MappingDefinition {
            pair: self.pair.swapped(),
            forward: reverse,
            reverse: Some(Arc::clone(&self.forward)),
        })
    }
}

impl fmt::Debug for MappingDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappingDefinition")
            .field("pair", &self.pair)
            .field("has_reverse", &self.has_reverse())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TypeKey;

    fn pair() -> TypePair {
        TypePair::new(TypeKey::of::<i32>(), TypeKey::of::<String>())
    }

    fn to_text() -> MapFn {
        Arc::new(|value: Value, _: &MappingContext, _: &Mapper| match value {
            Value::I32(n) => Ok(Value::Text(n.to_string())),
            other => Ok(other),
        })
    }

    fn to_number() -> MapFn {
        Arc::new(|value: Value, _: &MappingContext, _: &Mapper| match value {
            Value::Text(s) => Ok(Value::I32(s.parse().unwrap_or_default())),
            other => Ok(other),
        })
    }

    #[test]
    fn test_apply_forward() {
        let definition = MappingDefinition::new(pair(), to_text(), None);
        let mapper = Mapper::new();
        let result = definition
            .apply(Value::I32(42), MappingContext::shared(), &mapper)
            .unwrap();
        assert_eq!(result, Value::Text("42".to_string()));
    }

    #[test]
    fn test_reversed_swaps_pair_and_functions() {
        let definition = MappingDefinition::new(pair(), to_text(), Some(to_number()));
        let reversed = definition.reversed().unwrap();
        let mapper = Mapper::new();

        assert_eq!(reversed.pair(), pair().swapped());
        assert!(reversed.has_reverse());
        let result = reversed
            .apply(Value::Text("7".to_string()), MappingContext::shared(), &mapper)
            .unwrap();
        assert_eq!(result, Value::I32(7));
    }

    #[test]
    fn test_reversed_without_reverse_fails() {
        let definition = MappingDefinition::new(pair(), to_text(), None);
        let err = definition.reversed().unwrap_err();
        assert!(matches!(err, Error::ReverseNotConfigured { .. }));
        assert!(err.to_string().contains("i32"));
    }
}
