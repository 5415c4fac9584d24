//! Per-member override options
//!
//! Copyright (c) 2025 Objmap Team
//! Licensed under the Apache-2.0 license

use crate::mapping::engine::{MemberRule, Resolver};
use crate::model::Model;
use crate::shape::Mappable;
use crate::value::Value;
use std::marker::PhantomData;
use std::sync::Arc;

/// Options for one target member, handed to [`MapBuilder::for_member`]
///
/// [`MapBuilder::for_member`]: super::MapBuilder::for_member
pub struct MemberOptions<S> {
    member: String,
    rule: Option<MemberRule>,
    error: Option<String>,
    _marker: PhantomData<fn(&S)>,
}

impl<S: Model> MemberOptions<S> {
    pub(super) fn new(member: &str) -> Self {
        Self {
            member: member.to_string(),
            rule: None,
            error: None,
            _marker: PhantomData,
        }
    }

    /// Target member being configured
    pub fn member(&self) -> &str {
        &self.member
    }

    /// Leave the member at its default value
    pub fn ignore(mut self) -> Self {
        self.rule = Some(MemberRule::Ignore);
        self
    }

    /// Compute the member from the whole source
    pub fn map_from<V, F>(mut self, resolve: F) -> Self
    where
        V: Mappable,
        F: Fn(&S) -> V + Send + Sync + 'static,
    {
        let resolver: Resolver = Arc::new(move |source: &Value| {
            source.as_model::<S>().map(|model| resolve(model).into_value())
        });
        self.rule = Some(MemberRule::Resolve(resolver));
        self
    }

    /// Read the member from a differently named source member
    ///
    /// The name is checked against the source model right away; an unknown or
    /// unreadable member makes the builder fail.
    pub fn map_from_member(mut self, source_member: &str) -> Self {
        let Some(member) = S::descriptor().readable(source_member) else {
            self.error = Some(format!(
                "source member '{}' for target member '{}' does not exist or is not readable",
                source_member, self.member
            ));
            return self;
        };

        let name = member.name();
        let resolver: Resolver =
            Arc::new(move |source: &Value| source.as_instance()?.read(name));
        self.rule = Some(MemberRule::Resolve(resolver));
        self
    }

    pub(super) fn into_parts(self) -> (Option<MemberRule>, Option<String>) {
        (self.rule, self.error)
    }
}
