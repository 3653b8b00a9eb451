use log::Level;
use serde::Deserialize;
use web_sys::Document;

/// Id of the optional `<script type="application/json">` block that overrides the defaults.
pub const CONFIG_ELEMENT_ID: &str = "site-config";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct SiteConfig {
    pub navigation: NavigationConfig,
    pub reveal: RevealConfig,
    pub carousel: CarouselConfig,
    pub popups: PopupConfig,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct NavigationConfig {
    /// Pixels of vertical scroll after which the header counts as scrolled.
    pub scroll_threshold: f64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self { scroll_threshold: 50.0 }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct RevealConfig {
    pub threshold: f64,
    pub root_margin: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: "0px 0px -50px 0px".to_string(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct CarouselConfig {
    pub interval_ms: u32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self { interval_ms: 6000 }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct PopupConfig {
    pub promo_delay_ms: u32,
    pub promo_storage_key: String,
    pub newsletter_scroll_percent: f64,
    pub acknowledgment_message: String,
    pub acknowledgment_ms: u32,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            promo_delay_ms: 5000,
            promo_storage_key: "promoSeen".to_string(),
            newsletter_scroll_percent: 70.0,
            acknowledgment_message: "Thank you for your submission! We will be in touch soon."
                .to_string(),
            acknowledgment_ms: 4000,
        }
    }
}

impl SiteConfig {
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Reads the page's config block, falling back to the defaults when it is
    /// missing, empty or malformed.
    pub fn from_document(document: &Document) -> Self {
        let raw = match document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
        {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Self::default(),
        };

        match Self::from_json(&raw) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Ignoring malformed #{}: {}", CONFIG_ELEMENT_ID, e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_page_timings() {
        let config = SiteConfig::default();
        assert_eq!(config.navigation.scroll_threshold, 50.0);
        assert_eq!(config.reveal.threshold, 0.1);
        assert_eq!(config.reveal.root_margin, "0px 0px -50px 0px");
        assert_eq!(config.carousel.interval_ms, 6000);
        assert_eq!(config.popups.promo_delay_ms, 5000);
        assert_eq!(config.popups.promo_storage_key, "promoSeen");
        assert_eq!(config.popups.newsletter_scroll_percent, 70.0);
    }

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config = SiteConfig::from_json(
            r#"{ "carousel": { "interval_ms": 8000 }, "popups": { "promo_delay_ms": 1000 } }"#,
        )
        .unwrap();
        assert_eq!(config.carousel.interval_ms, 8000);
        assert_eq!(config.popups.promo_delay_ms, 1000);
        assert_eq!(config.popups.promo_storage_key, "promoSeen");
        assert_eq!(config.navigation, NavigationConfig::default());
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(SiteConfig::from_json("{}").unwrap(), SiteConfig::default());
    }

    #[test]
    fn wrong_types_are_rejected() {
        assert!(SiteConfig::from_json(r#"{ "carousel": { "interval_ms": "soon" } }"#).is_err());
    }
}
