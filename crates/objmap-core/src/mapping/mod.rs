//! Mapping registry, configuration and the auto-mapping engine
//!
//! # Module Organization
//!
//! - [`registry`] - The [`Mapper`] registry and its dispatch entry points
//! - [`definition`] - Immutable per-pair conversion logic
//! - [`builder`] - Fluent configuration of definitions
//! - [`engine`] - Structural auto-mapping and value conversion
//! - [`context`] - Caller data threaded through a mapping call tree
//! - [`profile`] - Named batches of registrations
//!
//! Copyright (c) 2025 Objmap Team
//! Licensed under the Apache-2.0 license

pub mod builder;
pub mod context;
pub mod definition;
pub mod engine;
pub mod profile;
pub mod registry;

pub use builder::{MapBuilder, MemberOptions};
pub use context::MappingContext;
pub use definition::{MapFn, MappingDefinition};
pub use engine::RenameMap;
pub use profile::{MapperConfiguration, Profile};
pub use registry::Mapper;
