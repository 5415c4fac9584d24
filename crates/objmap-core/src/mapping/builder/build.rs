//! Build operations for MapBuilder
//!
//! Copyright (c) 2025 Objmap Team
//! Licensed under the Apache-2.0 license

use super::MapBuilder;
use crate::mapping::engine::AutoMapPlan;
use crate::mapping::{Mapper, MappingDefinition};
use crate::shape::Mappable;
use crate::types::TypePair;
use crate::{Error, Result};
use std::collections::HashMap;

impl<S: Mappable, T: Mappable> MapBuilder<S, T> {
    /// Compile the configuration into a definition
    ///
    /// Fails if a member override was invalid, or if neither a forward
    /// function nor auto mode was configured. `Option<_>` sources and targets
    /// are rejected: a present source lowers to its inner value and lookups
    /// use the inner target type, so such a pair could never be reached.
    pub fn build(self) -> Result<MappingDefinition> {
        if let Some(error) = self.errors.into_iter().next() {
            return Err(error);
        }

        let pair = TypePair::new(S::shape().key(), T::shape().key());

        if S::shape().is_optional() || T::shape().is_optional() {
            return Err(Error::InvalidConfiguration {
                source_type: pair.source_name(),
                target_type: pair.target_name(),
                message: "register the inner type instead of Option<_>".to_string(),
            });
        }

        let (forward, generated_reverse) = match self.auto {
            Some(auto) => {
                let reverse = auto.include_reverse.then(|| {
                    let renames = auto.renames.as_ref().map(|renames| renames.inverted());
                    AutoMapPlan::new(auto.source, renames, HashMap::new()).into_map_fn()
                });
                let forward =
                    AutoMapPlan::new(auto.target, auto.renames, self.overrides).into_map_fn();
                (forward, reverse)
            }
            None => {
                if !self.overrides.is_empty() {
                    tracing::debug!(pair = %pair, "member overrides ignored outside auto mode");
                }
                let forward = self.forward.ok_or_else(|| Error::InvalidConfiguration {
                    source_type: pair.source_name(),
                    target_type: pair.target_name(),
                    message: "no forward mapping function and auto-mapping is not enabled"
                        .to_string(),
                })?;
                (forward, None)
            }
        };

        let reverse = self.reverse.or(generated_reverse);
        Ok(MappingDefinition::new(pair, forward, reverse))
    }

    /// Build and store the definition in `mapper`
    pub fn register(self, mapper: &Mapper) -> Result<()> {
        mapper.register(self.build()?);
        Ok(())
    }
}
