pub mod error;
pub mod keybindings;
pub mod navigation;
pub mod settings;
pub mod surface;
pub mod util;

pub use error::ShellError;
pub use navigation::{NavigationController, NavigationState};
pub use surface::{BrowserSurface, CacheMode, ProgressIndicator, SurfaceSettings};

/// The site the shell displays. Fixed for the lifetime of the process.
pub const TARGET_URL: &str = "https://giapzech.tech";
