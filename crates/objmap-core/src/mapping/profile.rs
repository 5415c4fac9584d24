//! Profile aggregation
//!
//! A [`Profile`] is a named, reusable batch of registrations. A
//! [`MapperConfiguration`] collects profiles and one-off registration
//! callbacks and applies them, in the order they were added, to a fresh
//! [`Mapper`].
//!
//! ```
//! use objmap_core::{MapBuilder, Mapper, MapperConfiguration, MappingContext, Profile, Result};
//!
//! struct NumberProfile;
//!
//! impl Profile for NumberProfile {
//!     fn name(&self) -> &str {
//!         "numbers"
//!     }
//!
//!     fn configure(&self, mapper: &Mapper) -> Result<()> {
//!         MapBuilder::<String, i64>::new()
//!             .map_forward(|s: &String, _: &MappingContext, _: &Mapper| {
//!                 Ok(s.parse().unwrap_or_default())
//!             })
//!             .register(mapper)
//!     }
//! }
//!
//! let mapper = MapperConfiguration::new()
//!     .add_profile(NumberProfile)
//!     .build_mapper()
//!     .unwrap();
//! assert_eq!(mapper.map::<String, i64>(&"12".to_string()).unwrap(), 12);
//! ```
//!
//! Copyright (c) 2025 Objmap Team
//! Licensed under the Apache-2.0 license

use super::Mapper;
use crate::Result;
use std::fmt;
use tracing::{debug, info, warn};

/// A named batch of mapping registrations
pub trait Profile: Send + Sync {
    fn name(&self) -> &str;

    /// Register this profile's definitions
    fn configure(&self, mapper: &Mapper) -> Result<()>;
}

type Registration = Box<dyn Fn(&Mapper) -> Result<()> + Send + Sync>;

enum Step {
    Profile(Box<dyn Profile>),
    Registration(Registration),
}

/// Ordered collection of profiles and registration callbacks
#[derive(Default)]
pub struct MapperConfiguration {
    steps: Vec<Step>,
}

impl MapperConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_profile<P: Profile + 'static>(mut self, profile: P) -> Self {
        self.steps.push(Step::Profile(Box::new(profile)));
        self
    }

    /// Add a one-off registration callback
    pub fn add_registration<F>(mut self, register: F) -> Self
    where
        F: Fn(&Mapper) -> Result<()> + Send + Sync + 'static,
    {
        self.steps.push(Step::Registration(Box::new(register)));
        self
    }

    /// Names of the added profiles, in insertion order
    pub fn profile_names(&self) -> Vec<&str> {
        self.steps
            .iter()
            .filter_map(|step| match step {
                Step::Profile(profile) => Some(profile.name()),
                Step::Registration(_) => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Apply every step to a new [`Mapper`]
    ///
    /// Later registrations replace earlier ones for the same type pair. The
    /// first failing step aborts the build.
    pub fn build_mapper(&self) -> Result<Mapper> {
        let mapper = Mapper::new();

        for (index, step) in self.steps.iter().enumerate() {
            let result = match step {
                Step::Profile(profile) => {
                    debug!(profile = profile.name(), "applying profile");
                    profile.configure(&mapper)
                }
                Step::Registration(register) => {
                    debug!(step = index, "applying registration");
                    register(&mapper)
                }
            };

            if let Err(e) = result {
                warn!(step = index, error = %e, "mapper configuration failed");
                return Err(e);
            }
        }

        info!(
            steps = self.steps.len(),
            pairs = mapper.len(),
            "mapper configured"
        );
        Ok(mapper)
    }
}

impl fmt::Debug for MapperConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MapperConfiguration")
            .field("profiles", &self.profile_names())
            .field("steps", &self.steps.len())
            .finish()
    }
}
