//! The provider seam.
//!
//! A provider is whatever the surrounding deployment tool uses to talk to its
//! infrastructure. The engine never looks inside it; it only hands the same
//! reference to every function hook.

use std::any::Any;
use std::fmt;

/// Opaque infrastructure provider passed through to hooks.
pub trait Provider: Send + Sync + fmt::Debug {
    /// Short provider name, used in log fields.
    fn name(&self) -> &str;

    /// Region the provider targets, if it has one.
    fn region(&self) -> Option<&str> {
        None
    }

    /// Allows hooks to downcast to the concrete provider they expect.
    fn as_any(&self) -> &dyn Any;
}

/// A provider that carries only a name and an optional region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticProvider {
    name: String,
    region: Option<String>,
}

impl StaticProvider {
    /// Creates a provider with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            region: None,
        }
    }

    /// Sets the region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }
}

impl Provider for StaticProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
