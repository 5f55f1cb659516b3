use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ShellError;

/// How the browser surface chooses between its cache and the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CacheMode {
    /// Use the engine's own HTTP cache policy.
    Default,
    /// Serve cached content when present, even if stale, and only go to
    /// the network on a miss.
    PreferCacheThenNetwork,
    /// Always revalidate with the network.
    NetworkOnly,
}

/// Capability flags applied to the browser surface before the first load.
///
/// Stored in the settings file under `surface`; keys missing there keep
/// their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SurfaceSettings {
    pub script_execution_enabled: bool,
    pub local_storage_enabled: bool,
    pub structured_storage_enabled: bool,
    pub cache_mode: CacheMode,
    pub viewport_adaptive_layout: bool,
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        SurfaceSettings {
            script_execution_enabled: true,
            local_storage_enabled: true,
            structured_storage_enabled: true,
            cache_mode: CacheMode::PreferCacheThenNetwork,
            viewport_adaptive_layout: true,
        }
    }
}

/// The embeddable web engine component the controller drives.
///
/// Implementations deliver navigation signals back to the controller on the
/// UI thread; the controller never calls into a surface from any other
/// thread.
pub trait BrowserSurface {
    /// Whether a native engine handle is currently held.
    fn is_available(&self) -> bool;

    fn configure(&mut self, settings: &SurfaceSettings) -> Result<(), ShellError>;

    fn load_url(&mut self, url: &Url);

    /// Queried on every call; history is owned by the engine.
    fn can_go_back(&self) -> bool;

    fn go_back(&mut self);

    /// Unregister listeners and drop native handles. Must tolerate being
    /// called on a surface that was never configured or is already released.
    fn release(&mut self);
}

/// A visual loading indicator that is either shown or hidden.
pub trait ProgressIndicator {
    fn set_visible(&mut self, visible: bool);

    /// Optional fine-grained progress, 0..=100.
    fn set_progress(&mut self, _percent: u8) {}
}
