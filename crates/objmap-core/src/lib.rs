//! Objmap Core - runtime structural mapping between model types
//!
//! This crate maps values of one model type onto another at runtime. Mapping
//! definitions are registered per ordered (source, target) type pair, either as
//! hand-written conversion functions or as auto-mappings that match members by
//! name and recurse into nested models and collections through the registry.
//!
//! # Main Components
//!
//! - **Error Handling**: One error enum built with `thiserror`, with `anyhow` interop
//! - **Values and Shapes**: Runtime values and declared type shapes
//! - **Models**: Explicit accessor tables declared with [`mappable_model!`]
//! - **Mapper**: The thread-safe registry and dispatch entry points
//! - **MapBuilder**: Fluent configuration of definitions
//! - **Profiles**: Named batches of registrations applied by [`MapperConfiguration`]
//!
//! # Example
//!
//! ```
//! use objmap_core::{mappable_model, MapBuilder, Mapper, Result};
//!
//! #[derive(Debug, Clone, Default)]
//! struct Order {
//!     id: u32,
//!     total: f64,
//! }
//!
//! #[derive(Debug, Clone, Default)]
//! struct OrderSummary {
//!     id: u64,
//!     total: String,
//! }
//!
//! mappable_model!(Order { "Id" => id, "Total" => total });
//! mappable_model!(OrderSummary { "Id" => id, "Total" => total });
//!
//! fn example() -> Result<()> {
//!     let mapper = Mapper::new();
//!     MapBuilder::<Order, OrderSummary>::new().auto_map().register(&mapper)?;
//!
//!     let summary: OrderSummary = mapper.map(&Order { id: 7, total: 19.5 })?;
//!     assert_eq!(summary.id, 7);
//!     assert_eq!(summary.total, "19.5");
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

pub mod error;
#[macro_use]
mod macros;
pub mod mapping;
pub mod model;
pub mod shape;
pub mod types;
pub mod value;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use mapping::{
    // Registry and definitions
    MapFn, Mapper, MappingDefinition,

    // Configuration
    MapBuilder, MapperConfiguration, MemberOptions, Profile, RenameMap,

    // Context
    MappingContext,
};
pub use model::{DescriptorBuilder, MemberDescriptor, Model, ModelDescriptor};
pub use shape::{EnumRef, Mappable, ModelRef, ScalarKind, Shape, ShapeKind};
pub use types::{TypeKey, TypePair};
pub use value::{EnumValue, Instance, Sequence, Value};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
