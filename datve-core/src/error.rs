use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    /// The embedded browser surface could not be obtained. The view cannot
    /// function without it.
    #[error("browser surface unavailable: {0}")]
    SurfaceUnavailable(String),

    #[error("invalid target URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported URL scheme '{0}', expected http or https")]
    UnsupportedScheme(String),

    #[error("failed to access settings at {path}: {source}")]
    Settings {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode settings: {0}")]
    SettingsFormat(#[from] serde_json::Error),
}
