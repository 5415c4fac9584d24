//! Auto-map plans
//!
//! An [`AutoMapPlan`] is compiled once, when a builder in auto mode is built,
//! and runs for every mapping call of the resulting definition.

use super::assign;
use super::rename::RenameMap;
use crate::mapping::{MapFn, Mapper, MappingContext};
use crate::shape::ModelRef;
use crate::value::{Instance, Value};
use crate::{Error, Result};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Produces a target member's raw value from the whole source value
pub(crate) type Resolver = Arc<dyn Fn(&Value) -> Option<Value> + Send + Sync>;

/// Per-member override configured on a builder
#[derive(Clone)]
pub(crate) enum MemberRule {
    /// Never populate the member
    Ignore,
    /// Populate the member from a custom resolver
    Resolve(Resolver),
}

impl fmt::Debug for MemberRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberRule::Ignore => f.write_str("Ignore"),
            MemberRule::Resolve(_) => f.write_str("Resolve(..)"),
        }
    }
}

/// Structural mapping into one target model
#[derive(Debug, Clone)]
pub(crate) struct AutoMapPlan {
    target: ModelRef,
    renames: Option<RenameMap>,
    /// Keyed by lowercased target member name
    overrides: HashMap<String, MemberRule>,
}

impl AutoMapPlan {
    pub(crate) fn new(
        target: ModelRef,
        renames: Option<RenameMap>,
        overrides: HashMap<String, MemberRule>,
    ) -> Self {
        Self {
            target,
            renames,
            overrides,
        }
    }

    pub(crate) fn into_map_fn(self) -> MapFn {
        Arc::new(move |source: Value, context: &MappingContext, mapper: &Mapper| {
            self.execute(source, context, mapper)
        })
    }

    /// Build and populate a target instance from `source`
    pub(crate) fn execute(
        &self,
        source: Value,
        context: &MappingContext,
        mapper: &Mapper,
    ) -> Result<Value> {
        if source.is_null() {
            return Ok(Value::Null);
        }

        let descriptor = self.target.descriptor();
        let mut target = descriptor.construct().ok_or_else(|| Error::Construction {
            source_type: source.type_name().to_string(),
            target_type: descriptor.name().to_string(),
        })?;

        for member in descriptor.writable_members() {
            let Some(raw) = self.resolve(member.name(), &source) else {
                continue;
            };

            let Some(value) = assign::resolve_assignment(member.shape(), raw, context, mapper)?
            else {
                continue;
            };

            if !member.set(&mut *target, value) {
                log::debug!(
                    "Member '{}.{}' rejected the resolved value",
                    descriptor.name(),
                    member.name()
                );
            }
        }

        Ok(Value::Object(Instance::from_parts(self.target, target)))
    }

    fn resolve(&self, member: &str, source: &Value) -> Option<Value> {
        if let Some(rule) = self.overrides.get(&member.to_ascii_lowercase()) {
            return match rule {
                MemberRule::Ignore => None,
                MemberRule::Resolve(resolver) => resolver(source),
            };
        }

        // A rename map without an entry for this member falls back to the
        // member's own name.
        let source_member = self
            .renames
            .as_ref()
            .and_then(|renames| renames.source_for(member))
            .unwrap_or(member);

        source.as_instance()?.read(source_member)
    }
}
