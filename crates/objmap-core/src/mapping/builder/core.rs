//! Core MapBuilder structure and configuration methods
//!
//! Copyright (c) 2025 Objmap Team
//! Licensed under the Apache-2.0 license

use super::MemberOptions;
use crate::mapping::engine::{MemberRule, RenameMap};
use crate::mapping::{MapFn, Mapper, MappingContext};
use crate::model::Model;
use crate::shape::{Mappable, ModelRef};
use crate::value::Value;
use crate::{Error, Result};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Auto-mapping settings captured by [`MapBuilder::auto_map_with`]
#[derive(Debug, Clone)]
pub(super) struct AutoMode {
    pub(super) source: ModelRef,
    pub(super) target: ModelRef,
    pub(super) renames: Option<RenameMap>,
    pub(super) include_reverse: bool,
}

/// Builder for the mapping definition of one `S -> T` pair
///
/// A definition needs either a forward function ([`map_forward`]) or auto mode
/// ([`auto_map`]). In auto mode any forward function is ignored. A reverse
/// function set with [`map_reverse`] always wins over an auto-generated one.
///
/// [`map_forward`]: MapBuilder::map_forward
/// [`map_reverse`]: MapBuilder::map_reverse
/// [`auto_map`]: MapBuilder::auto_map
pub struct MapBuilder<S, T> {
    pub(super) forward: Option<MapFn>,
    pub(super) reverse: Option<MapFn>,
    pub(super) auto: Option<AutoMode>,
    /// Keyed by lowercased target member name
    pub(super) overrides: HashMap<String, MemberRule>,
    pub(super) errors: Vec<Error>,
    _marker: PhantomData<fn(S) -> T>,
}

impl<S: Mappable, T: Mappable> MapBuilder<S, T> {
    pub fn new() -> Self {
        Self {
            forward: None,
            reverse: None,
            auto: None,
            overrides: HashMap::new(),
            errors: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Hand-written `S -> T` conversion
    pub fn map_forward<F>(mut self, forward: F) -> Self
    where
        F: Fn(&S, &MappingContext, &Mapper) -> Result<T> + Send + Sync + 'static,
    {
        self.forward = Some(erase::<S, T, F>(forward));
        self
    }

    /// Hand-written `T -> S` conversion, registered under the swapped pair
    pub fn map_reverse<F>(mut self, reverse: F) -> Self
    where
        F: Fn(&T, &MappingContext, &Mapper) -> Result<S> + Send + Sync + 'static,
    {
        self.reverse = Some(erase::<T, S, F>(reverse));
        self
    }

    pub fn is_auto(&self) -> bool {
        self.auto.is_some()
    }
}

impl<S: Model, T: Model> MapBuilder<S, T> {
    /// Map members with matching names, in both directions
    pub fn auto_map(self) -> Self {
        self.enable_auto(None, true)
    }

    /// Map members through a source-to-target rename map
    ///
    /// Target members without an entry still match a source member of the same
    /// name. The reverse direction, if included, uses the inverted map and
    /// none of the member overrides.
    pub fn auto_map_with<I, A, B>(self, renames: I, include_reverse: bool) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<String>,
        B: Into<String>,
    {
        self.enable_auto(Some(renames.into_iter().collect()), include_reverse)
    }

    fn enable_auto(mut self, renames: Option<RenameMap>, include_reverse: bool) -> Self {
        self.auto = Some(AutoMode {
            source: ModelRef::of::<S>(),
            target: ModelRef::of::<T>(),
            renames,
            include_reverse,
        });
        self
    }

    /// Configure how one target member is populated
    ///
    /// Member names are case-insensitive. Configuring the same member twice
    /// keeps the last rule.
    pub fn for_member<F>(mut self, member: &str, configure: F) -> Self
    where
        F: FnOnce(MemberOptions<S>) -> MemberOptions<S>,
    {
        if T::descriptor().member(member).is_none() {
            tracing::debug!(member, target_type = T::NAME, "override for unknown target member");
        }

        let options = configure(MemberOptions::new(member));
        let (rule, error) = options.into_parts();
        if let Some(message) = error {
            self.errors.push(Error::InvalidConfiguration {
                source_type: S::NAME.to_string(),
                target_type: T::NAME.to_string(),
                message,
            });
        }
        if let Some(rule) = rule {
            self.overrides.insert(member.to_ascii_lowercase(), rule);
        }
        self
    }
}

impl<S: Mappable, T: Mappable> Default for MapBuilder<S, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, T> fmt::Debug for MapBuilder<S, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapBuilder")
            .field("has_forward", &self.forward.is_some())
            .field("has_reverse", &self.reverse.is_some())
            .field("auto", &self.auto)
            .field("overrides", &self.overrides)
            .field("errors", &self.errors.len())
            .finish()
    }
}

/// Wrap a typed conversion as a [`MapFn`]
fn erase<A, B, F>(convert: F) -> MapFn
where
    A: Mappable,
    B: Mappable,
    F: Fn(&A, &MappingContext, &Mapper) -> Result<B> + Send + Sync + 'static,
{
    Arc::new(move |value: Value, context: &MappingContext, mapper: &Mapper| {
        let actual = value.type_name();
        let source = A::from_value(value).ok_or_else(|| Error::TypeMismatch {
            expected: A::shape().name().to_string(),
            actual: actual.to_string(),
        })?;
        convert(&source, context, mapper).map(Mappable::into_value)
    })
}
