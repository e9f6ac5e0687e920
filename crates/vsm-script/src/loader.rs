//! Script loading.

#[cfg(not(feature = "fx-hash"))]
use std::collections::HashMap;

#[cfg(feature = "fx-hash")]
use rustc_hash::FxHashMap as HashMap;

use crate::{DeviceScript, ScriptError, ScriptResult};

/// Turns a script name (the instance's `moddll` property) into a script.
///
/// Any `FnMut(&str) -> ScriptResult<Box<dyn DeviceScript>>` is a loader.
pub trait ScriptLoader {
    fn load(&mut self, name: &str) -> ScriptResult<Box<dyn DeviceScript>>;
}

impl<F> ScriptLoader for F
where
    F: FnMut(&str) -> ScriptResult<Box<dyn DeviceScript>>,
{
    fn load(&mut self, name: &str) -> ScriptResult<Box<dyn DeviceScript>> {
        self(name)
    }
}

/// Builds a fresh script instance.
pub type ScriptFactory = Box<dyn Fn() -> Box<dyn DeviceScript>>;

/// A [`ScriptLoader`] over a fixed set of named, compiled-in scripts.
///
/// ```rust,ignore
/// let catalog = ScriptCatalog::new()
///     .with("blinky", || Box::new(Blinky::default()) as Box<dyn DeviceScript>);
/// ```
#[derive(Default)]
pub struct ScriptCatalog {
    factories: HashMap<String, ScriptFactory>,
}

impl ScriptCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `factory` under `name`, replacing any earlier entry.
    pub fn with<F>(mut self, name: impl Into<String>, factory: F) -> Self
    where
        F: Fn() -> Box<dyn DeviceScript> + 'static,
    {
        self.register(name, factory);
        self
    }

    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn DeviceScript> + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl ScriptLoader for ScriptCatalog {
    fn load(&mut self, name: &str) -> ScriptResult<Box<dyn DeviceScript>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| ScriptError::NotFound(name.to_owned()))?;
        tracing::debug!(script = name, "instantiating script");
        Ok(factory())
    }
}
