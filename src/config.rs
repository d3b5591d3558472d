use dioxus::prelude::*;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

static MARGIN_LENGTH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?(\d+(\.\d*)?|\.\d+)(px|%)$").expect("valid margin pattern"));

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub total_family_pages: u32,
    pub navbar_scroll_threshold: f64,
    pub theme_storage_key: String,
    pub image_placeholder_text: String,
    pub reveal_threshold: f64,
    pub reveal_root_margin: String,
    pub family_show_delay_ms: u32,
    pub family_activate_delay_ms: u32,
    pub ripple_duration_ms: u32,
    pub theme_transition_ms: u32,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            total_family_pages: 6,
            navbar_scroll_threshold: 50.0,
            theme_storage_key: "theme".to_string(),
            image_placeholder_text: "Zdjęcie niedostępne".to_string(),
            reveal_threshold: 0.1,
            reveal_root_margin: "0px 0px -50px 0px".to_string(),
            family_show_delay_ms: 100,
            family_activate_delay_ms: 50,
            ripple_duration_ms: 600,
            theme_transition_ms: 300,
        }
    }
}

impl SiteConfig {
    pub fn from_json(raw: &str) -> Result<Self, String> {
        serde_json::from_str::<SiteConfig>(raw)
            .map(SiteConfig::sanitized)
            .map_err(|err| format!("config decode failed: {err}"))
    }

    fn sanitized(mut self) -> Self {
        self.total_family_pages = self.total_family_pages.max(1);
        self.reveal_threshold = self.reveal_threshold.clamp(0.0, 1.0);
        if !self.navbar_scroll_threshold.is_finite() {
            self.navbar_scroll_threshold = SiteConfig::default().navbar_scroll_threshold;
        }
        if !is_root_margin(&self.reveal_root_margin) {
            tracing::warn!(
                "config: invalid reveal_root_margin {:?}, using default",
                self.reveal_root_margin
            );
            self.reveal_root_margin = SiteConfig::default().reveal_root_margin;
        }
        if self.theme_storage_key.trim().is_empty() {
            self.theme_storage_key = SiteConfig::default().theme_storage_key;
        }
        self
    }
}

// IntersectionObserver accepts one to four px or % lengths, nothing else.
fn is_root_margin(value: &str) -> bool {
    let parts: Vec<&str> = value.split_whitespace().collect();
    (1..=4).contains(&parts.len()) && parts.iter().all(|part| MARGIN_LENGTH.is_match(part))
}

pub fn use_site_config() -> Resource<SiteConfig> {
    use_resource(|| async move {
        match fetch_site_config().await {
            Ok(config) => config,
            Err(message) => {
                tracing::debug!("config: falling back to defaults ({message})");
                SiteConfig::default()
            }
        }
    })
}

#[cfg(target_arch = "wasm32")]
async fn fetch_site_config() -> Result<SiteConfig, String> {
    match fetch_config_from("/config.json").await {
        Ok(config) => Ok(config),
        Err(_) => fetch_config_from("/assets/config.json").await,
    }
}

#[cfg(target_arch = "wasm32")]
async fn fetch_config_from(path: &str) -> Result<SiteConfig, String> {
    let response = gloo_net::http::Request::get(path)
        .send()
        .await
        .map_err(|err| format!("config fetch failed: {err}"))?;
    if !response.ok() {
        return Err(format!("config fetch failed: status {}", response.status()));
    }
    let body = response
        .text()
        .await
        .map_err(|err| format!("config read failed: {err}"))?;
    SiteConfig::from_json(&body)
}

#[cfg(not(target_arch = "wasm32"))]
async fn fetch_site_config() -> Result<SiteConfig, String> {
    let Ok(path) = std::env::var("SITE_CONFIG") else {
        return Ok(SiteConfig::default());
    };
    let raw = std::fs::read_to_string(&path)
        .map_err(|err| format!("config read failed for {path}: {err}"))?;
    SiteConfig::from_json(&raw)
}
