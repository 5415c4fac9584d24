//! Structural auto-mapping engine
//!
//! Builds a target model instance from a source value by matching member
//! names, then pushes every resolved value through an assignment pipeline
//! that copies, maps nested objects and collections through the registry, or
//! converts scalars.
//!
//! # Module Organization
//!
//! - [`plan`] - Per-definition auto-map plan and member resolution
//! - [`assign`] - Assignment pipeline for a single member
//! - [`collection`] - Element-wise collection mapping
//! - [`coerce`] - Scalar and enumeration conversions
//! - [`rename`] - Source-to-target member rename map
//!
//! Per-member failures never abort a mapping call. They are reported through
//! the `log` facade at debug level and the member keeps its default value.
//!
//! Copyright (c) 2025 Objmap Team
//! Licensed under the Apache-2.0 license

pub(crate) mod assign;
pub(crate) mod coerce;
pub(crate) mod collection;
pub(crate) mod plan;
pub mod rename;


pub(crate) use plan::{AutoMapPlan, MemberRule, Resolver};
pub use rename::RenameMap;
