use url::Url;

use crate::error::ShellError;

/// Parse and validate the URL the shell is pointed at.
///
/// Only `http` and `https` are accepted; anything else (`file://`,
/// `javascript:`) is rejected before it reaches the browser surface.
pub fn parse_target_url(raw: &str) -> Result<Url, ShellError> {
    let url = Url::parse(raw.trim()).map_err(|source| ShellError::InvalidUrl {
        url: raw.to_string(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ShellError::UnsupportedScheme(other.to_string())),
    }
}

/// Clamp a raw progress value reported by an engine to a percentage.
pub fn clamp_percent(percent: u32) -> u8 {
    percent.min(100) as u8
}

/// Convert a 0.0..=1.0 fraction (as reported by WebKit) to a percentage.
pub fn fraction_to_percent(fraction: f64) -> u8 {
    if !fraction.is_finite() || fraction <= 0.0 {
        return 0;
    }
    clamp_percent((fraction * 100.0).round() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_target_url_accepts_https() {
        let url = parse_target_url("https://giapzech.tech").unwrap();
        assert_eq!(url.host_str(), Some("giapzech.tech"));
        // Url normalizes an empty path to "/"
        assert_eq!(url.as_str(), "https://giapzech.tech/");
    }

    #[test]
    fn parse_target_url_trims_whitespace() {
        assert!(parse_target_url("  http://localhost:5173 \n").is_ok());
    }

    #[test]
    fn parse_target_url_rejects_other_schemes() {
        assert!(matches!(
            parse_target_url("file:///etc/passwd"),
            Err(ShellError::UnsupportedScheme(s)) if s == "file"
        ));
    }

    #[test]
    fn parse_target_url_rejects_garbage() {
        assert!(matches!(
            parse_target_url("not a url"),
            Err(ShellError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn fraction_to_percent_rounds_and_clamps() {
        assert_eq!(fraction_to_percent(0.0), 0);
        assert_eq!(fraction_to_percent(0.42), 42);
        assert_eq!(fraction_to_percent(0.996), 100);
        assert_eq!(fraction_to_percent(1.0), 100);
        assert_eq!(fraction_to_percent(1.7), 100);
        assert_eq!(fraction_to_percent(-0.3), 0);
        assert_eq!(fraction_to_percent(f64::NAN), 0);
    }
}
