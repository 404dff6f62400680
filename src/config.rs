use serde::Deserialize;
use web_sys::Document;

use crate::error::PageError;

/// Id of the optional `<script type="application/json">` block holding overrides.
pub const CONFIG_ELEMENT_ID: &str = "landing-config";

/// Tunables for the landing page behaviors. Every field falls back to the
/// value the page ships with, so an empty object is a valid config.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LandingConfig {
    /// Widest viewport (inclusive) that gets the mobile menu toggle.
    pub nav_breakpoint_px: u32,
    /// Scroll offset the header must pass before it may hide.
    pub header_hide_threshold_px: f64,
    /// Latency of the simulated form submission.
    pub submit_latency_ms: u32,
    /// How long the success message stays on screen.
    pub success_linger_ms: u32,
    pub reveal_threshold: f64,
    pub reveal_root_margin: String,
    pub fallback_glyph: String,
    pub log_level: String,
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            nav_breakpoint_px: 768,
            header_hide_threshold_px: 100.0,
            submit_latency_ms: 2_000,
            success_linger_ms: 5_000,
            reveal_threshold: 0.1,
            reveal_root_margin: "0px 0px -50px 0px".to_string(),
            fallback_glyph: "📁".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl LandingConfig {
    pub fn from_json(json: &str) -> Result<Self, PageError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values serde accepts but the browser APIs would throw on.
    pub fn validate(&self) -> Result<(), PageError> {
        if !self.header_hide_threshold_px.is_finite() || self.header_hide_threshold_px < 0.0 {
            return Err(PageError::ConfigValue {
                field: "header_hide_threshold_px",
                reason: "must be a non-negative number",
            });
        }
        if !(0.0..=1.0).contains(&self.reveal_threshold) {
            return Err(PageError::ConfigValue {
                field: "reveal_threshold",
                reason: "must be between 0 and 1",
            });
        }
        if !is_root_margin(&self.reveal_root_margin) {
            return Err(PageError::ConfigValue {
                field: "reveal_root_margin",
                reason: "expected one to four lengths in px or %",
            });
        }
        Ok(())
    }

    /// Reads overrides from `#landing-config`; a page without the block gets the defaults.
    pub fn from_document(document: &Document) -> Result<Self, PageError> {
        let text = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|element| element.text_content())
            .unwrap_or_default();
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Self::from_json(&text)
    }
}

/// Mirrors the CSS margin shorthand `IntersectionObserver` accepts for `rootMargin`.
fn is_root_margin(margin: &str) -> bool {
    let parts: Vec<&str> = margin.split_whitespace().collect();
    (1..=4).contains(&parts.len()) && parts.iter().all(|part| is_margin_length(part))
}

fn is_margin_length(part: &str) -> bool {
    let number = part
        .strip_suffix("px")
        .or_else(|| part.strip_suffix('%'));
    match number {
        Some(number) => number.parse::<f64>().map_or(false, f64::is_finite),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = LandingConfig::from_json("{}").unwrap();
        assert_eq!(config, LandingConfig::default());
        assert_eq!(config.nav_breakpoint_px, 768);
        assert_eq!(config.submit_latency_ms, 2_000);
        assert_eq!(config.success_linger_ms, 5_000);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config =
            LandingConfig::from_json(r#"{"nav_breakpoint_px": 640, "log_level": "debug"}"#)
                .unwrap();
        assert_eq!(config.nav_breakpoint_px, 640);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.header_hide_threshold_px, 100.0);
        assert_eq!(config.reveal_root_margin, "0px 0px -50px 0px");
    }

    #[test]
    fn unknown_fields_are_reported() {
        let err = LandingConfig::from_json(r#"{"nav_breakpoint": 640}"#).unwrap_err();
        assert!(matches!(err, PageError::Config(_)));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(LandingConfig::from_json("{nav_breakpoint_px: }").is_err());
    }

    #[test]
    fn out_of_range_reveal_threshold_is_rejected() {
        for json in [r#"{"reveal_threshold": 2.0}"#, r#"{"reveal_threshold": -0.5}"#] {
            let err = LandingConfig::from_json(json).unwrap_err();
            assert!(matches!(
                err,
                PageError::ConfigValue { field: "reveal_threshold", .. }
            ));
        }
        assert!(LandingConfig::from_json(r#"{"reveal_threshold": 1.0}"#).is_ok());
        assert!(LandingConfig::from_json(r#"{"reveal_threshold": 0}"#).is_ok());
    }

    #[test]
    fn unitless_root_margin_is_rejected() {
        for margin in ["0 0 -50", "", "10px 10px 10px 10px 10px", "5em", "px"] {
            let json = format!(r#"{{"reveal_root_margin": "{}"}}"#, margin);
            let err = LandingConfig::from_json(&json).unwrap_err();
            assert!(
                matches!(err, PageError::ConfigValue { field: "reveal_root_margin", .. }),
                "{:?} accepted",
                margin
            );
        }
    }

    #[test]
    fn pixel_and_percent_root_margins_are_accepted() {
        for margin in ["0px", "10% -5px", "0px 0px -50px 0px", "-1.5px 2%  3px"] {
            let json = format!(r#"{{"reveal_root_margin": "{}"}}"#, margin);
            assert!(LandingConfig::from_json(&json).is_ok(), "{:?} rejected", margin);
        }
    }

    #[test]
    fn negative_header_threshold_is_rejected() {
        let err = LandingConfig::from_json(r#"{"header_hide_threshold_px": -1}"#).unwrap_err();
        assert!(matches!(
            err,
            PageError::ConfigValue { field: "header_hide_threshold_px", .. }
        ));
    }
}
