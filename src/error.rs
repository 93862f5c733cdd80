//! Error taxonomy of the viewer.
//!
//! Only [`SceneError::Configuration`] and [`SceneError::RenderTarget`] ever reach
//! the caller of the lifecycle manager. Asset failures are downgraded to the
//! procedural fallback and teardown failures are logged.

use thiserror::Error;

#[derive(Clone, Debug, Error)]
pub enum SceneError {
    /// A room identifier or room descriptor that no builder can handle.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An external asset could not be fetched or parsed.
    #[error("Failed to load asset {location}: {reason}")]
    AssetLoad { location: String, reason: String },

    /// Releasing listeners or renderer resources failed.
    #[error("Failed to release {resource}: {reason}")]
    ResourceTeardown { resource: String, reason: String },

    /// The host could not provide a surface to render into.
    #[error("Render target unavailable: {0}")]
    RenderTarget(String),
}

impl SceneError {
    pub fn asset(location: &str, reason: impl ToString) -> Self {
        Self::AssetLoad {
            location: location.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn teardown(resource: &str, reason: impl ToString) -> Self {
        Self::ResourceTeardown {
            resource: resource.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}
