//! Fluent configuration of mapping definitions
//!
//! [`MapBuilder`] collects either hand-written forward/reverse functions or an
//! auto-mapping configuration for one `S -> T` pair and compiles it into a
//! [`MappingDefinition`](crate::MappingDefinition).
//!
//! ```
//! use objmap_core::{mappable_model, MapBuilder, Mapper};
//!
//! #[derive(Debug, Clone, Default)]
//! struct Customer {
//!     first_name: String,
//! }
//!
//! #[derive(Debug, Clone, Default)]
//! struct Contact {
//!     given_name: String,
//! }
//!
//! mappable_model!(Customer { "FirstName" => first_name });
//! mappable_model!(Contact { "GivenName" => given_name });
//!
//! let mapper = Mapper::new();
//! MapBuilder::<Customer, Contact>::new()
//!     .auto_map_with([("FirstName", "GivenName")], true)
//!     .register(&mapper)
//!     .unwrap();
//!
//! let contact: Contact = mapper
//!     .map(&Customer { first_name: "Ada".to_string() })
//!     .unwrap();
//! assert_eq!(contact.given_name, "Ada");
//! ```
//!
//! Copyright (c) 2025 Objmap Team
//! Licensed under the Apache-2.0 license

mod build;
mod core;
mod member;

pub use self::core::MapBuilder;
pub use member::MemberOptions;
