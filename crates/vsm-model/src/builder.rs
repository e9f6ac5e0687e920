//! Fluent builder for creating a licensed [`LifecycleDispatcher`].

use vsm_core::LicenceServer;
use vsm_script::ScriptLoader;

use crate::{DispatchObserver, LifecycleDispatcher, ModelConfig, ModelError, ModelResult, NoopObserver};

/// Fluent builder for [`LifecycleDispatcher<L, O>`].
///
/// # Required inputs
///
/// - `L: ScriptLoader`: resolves the instance's script name to a script.
///
/// # Optional inputs (have defaults)
///
/// | Method           | Default                   |
/// |------------------|---------------------------|
/// | `.config(c)`     | `ModelConfig::default()`  |
/// | `.observer(o)`   | `NoopObserver`            |
///
/// # Example
///
/// ```rust,ignore
/// let mut model = ModelBuilder::new(catalog)
///     .config(ModelConfig { model_key: 0x5EED, ..ModelConfig::default() })
///     .create(&mut GrantAll)?;
/// model.setup(&mut host)?;
/// ```
pub struct ModelBuilder<L: ScriptLoader, O: DispatchObserver = NoopObserver> {
    loader:   L,
    config:   ModelConfig,
    observer: O,
}

impl<L: ScriptLoader> ModelBuilder<L> {
    pub fn new(loader: L) -> Self {
        Self { loader, config: ModelConfig::default(), observer: NoopObserver }
    }
}

impl<L: ScriptLoader, O: DispatchObserver> ModelBuilder<L, O> {
    pub fn config(mut self, config: ModelConfig) -> Self {
        self.config = config;
        self
    }

    /// Attach an observer, replacing the current one.
    pub fn observer<P: DispatchObserver>(self, observer: P) -> ModelBuilder<L, P> {
        ModelBuilder { loader: self.loader, config: self.config, observer }
    }

    /// Authorize with `licence` and return a dispatcher ready for `setup`.
    ///
    /// # Errors
    ///
    /// [`ModelError::Unauthorized`] if the licence server refuses the
    /// configured key; no model instance exists in that case.
    pub fn create(self, licence: &mut dyn LicenceServer) -> ModelResult<LifecycleDispatcher<L, O>> {
        let key = self.config.model_key;
        let api_version = self.config.api_version;
        if !licence.authorize(key, api_version) {
            tracing::warn!(key, api_version, "licence refused");
            return Err(ModelError::Unauthorized { key, api_version });
        }
        tracing::debug!(key, api_version, "model authorized");
        Ok(LifecycleDispatcher::new(self.config, self.loader, self.observer))
    }
}
