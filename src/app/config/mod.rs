// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! The configuration is organized into logical sections:
//! - `[general]` - Language and theme mode
//! - `[storefront]` - Carousel gestures, lazy loading and placeholder
//! - `[cropper]` - Crop aspect ratio, viewport and output encoding
//! - `[inquiry]` - Messaging deep link used by the inquiry button
//! - `[invitations]` - Admin invitation lifetime and signup link base
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Set `BOUTIQUE_SHOWCASE_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use boutique_showcase::app::config;
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Modify a setting
//! config.general.language = Some("fr".to_string());
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::domain::editing::AspectRatio;
use crate::error::{Error, Result};
use crate::ui::theming::ThemeMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Application theme mode (light, dark, or system).
    #[serde(
        default = "default_theme_mode",
        deserialize_with = "deserialize_theme_mode"
    )]
    pub theme_mode: ThemeMode,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            language: None,
            theme_mode: default_theme_mode(),
        }
    }
}

/// Public storefront settings (carousel and lazy images).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StorefrontConfig {
    /// Image shown when a media reference cannot be loaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder_url: Option<String>,

    /// Visible area ratio that arms a deferred image load.
    #[serde(
        default = "default_lazy_threshold",
        skip_serializing_if = "Option::is_none"
    )]
    pub lazy_visibility_threshold: Option<f32>,

    /// Horizontal swipe distance in logical pixels.
    #[serde(
        default = "default_swipe_threshold",
        skip_serializing_if = "Option::is_none"
    )]
    pub swipe_threshold_px: Option<f32>,

    /// Carousel slide animation duration.
    #[serde(
        default = "default_slide_duration",
        skip_serializing_if = "Option::is_none"
    )]
    pub slide_duration_ms: Option<u64>,

    /// Image fade-in duration.
    #[serde(
        default = "default_fade_duration",
        skip_serializing_if = "Option::is_none"
    )]
    pub fade_duration_ms: Option<u64>,

    /// Decoded image cache capacity.
    #[serde(
        default = "default_image_cache_entries",
        skip_serializing_if = "Option::is_none"
    )]
    pub image_cache_entries: Option<usize>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            placeholder_url: None,
            lazy_visibility_threshold: default_lazy_threshold(),
            swipe_threshold_px: default_swipe_threshold(),
            slide_duration_ms: default_slide_duration(),
            fade_duration_ms: default_fade_duration(),
            image_cache_entries: default_image_cache_entries(),
        }
    }
}

impl StorefrontConfig {
    #[must_use]
    pub fn placeholder_url(&self) -> String {
        self.placeholder_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_PLACEHOLDER_URL)
            .to_string()
    }

    #[must_use]
    pub fn lazy_visibility_threshold(&self) -> f32 {
        self.lazy_visibility_threshold
            .unwrap_or(DEFAULT_LAZY_VISIBILITY_THRESHOLD)
            .clamp(f32::EPSILON, 1.0)
    }

    #[must_use]
    pub fn swipe_threshold_px(&self) -> f32 {
        self.swipe_threshold_px
            .unwrap_or(DEFAULT_SWIPE_THRESHOLD_PX)
            .max(0.0)
    }

    #[must_use]
    pub fn slide_duration(&self) -> Duration {
        Duration::from_millis(
            self.slide_duration_ms
                .unwrap_or(DEFAULT_SLIDE_DURATION_MS)
                .min(MAX_SLIDE_DURATION_MS),
        )
    }

    #[must_use]
    pub fn fade_duration(&self) -> Duration {
        Duration::from_millis(
            self.fade_duration_ms
                .unwrap_or(DEFAULT_FADE_DURATION_MS)
                .min(MAX_SLIDE_DURATION_MS),
        )
    }

    #[must_use]
    pub fn image_cache_entries(&self) -> usize {
        self.image_cache_entries
            .unwrap_or(DEFAULT_IMAGE_CACHE_ENTRIES)
            .max(MIN_IMAGE_CACHE_ENTRIES)
    }
}

/// Crop tool settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CropperConfig {
    /// Aspect ratio width component.
    #[serde(
        default = "default_aspect_width",
        skip_serializing_if = "Option::is_none"
    )]
    pub aspect_width: Option<u32>,

    /// Aspect ratio height component.
    #[serde(
        default = "default_aspect_height",
        skip_serializing_if = "Option::is_none"
    )]
    pub aspect_height: Option<u32>,

    /// Width of the preview viewport; its height follows the aspect ratio.
    #[serde(
        default = "default_reference_width",
        skip_serializing_if = "Option::is_none"
    )]
    pub reference_width: Option<u32>,

    /// Width of the encoded artifact. Defaults to the reference width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_width: Option<u32>,

    /// JPEG quality (1-100).
    #[serde(
        default = "default_jpeg_quality",
        skip_serializing_if = "Option::is_none"
    )]
    pub jpeg_quality: Option<u8>,
}

impl Default for CropperConfig {
    fn default() -> Self {
        Self {
            aspect_width: default_aspect_width(),
            aspect_height: default_aspect_height(),
            reference_width: default_reference_width(),
            output_width: None,
            jpeg_quality: default_jpeg_quality(),
        }
    }
}

impl CropperConfig {
    /// Aspect ratio with invalid components replaced by the 3:4 default.
    #[must_use]
    pub fn aspect_ratio(&self) -> AspectRatio {
        AspectRatio::new(
            self.aspect_width.unwrap_or(DEFAULT_ASPECT_WIDTH),
            self.aspect_height.unwrap_or(DEFAULT_ASPECT_HEIGHT),
        )
        .unwrap_or_default()
    }

    #[must_use]
    pub fn reference_width(&self) -> u32 {
        self.reference_width
            .filter(|w| *w > 0)
            .unwrap_or(DEFAULT_REFERENCE_WIDTH)
    }

    #[must_use]
    pub fn output_width(&self) -> u32 {
        self.output_width
            .filter(|w| *w > 0)
            .unwrap_or_else(|| self.reference_width())
    }

    #[must_use]
    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality
            .unwrap_or(DEFAULT_JPEG_QUALITY)
            .clamp(1, 100)
    }
}

/// Inquiry deep link settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct InquiryConfig {
    /// Messaging number receiving inquiries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,

    /// Product noun in the prefilled message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_noun: Option<String>,

    /// Currency symbol prefixed to prices.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency_symbol: Option<String>,
}

impl InquiryConfig {
    #[must_use]
    pub fn phone_number(&self) -> &str {
        self.phone_number
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_INQUIRY_PHONE)
    }

    #[must_use]
    pub fn product_noun(&self) -> &str {
        self.product_noun.as_deref().unwrap_or(DEFAULT_PRODUCT_NOUN)
    }

    #[must_use]
    pub fn currency_symbol(&self) -> &str {
        self.currency_symbol
            .as_deref()
            .unwrap_or(DEFAULT_CURRENCY_SYMBOL)
    }
}

/// Admin invitation settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InvitationsConfig {
    /// Days before a new invitation expires.
    #[serde(
        default = "default_validity_days",
        skip_serializing_if = "Option::is_none"
    )]
    pub validity_days: Option<u32>,

    /// Base URL for signup links.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signup_base_url: Option<String>,
}

impl Default for InvitationsConfig {
    fn default() -> Self {
        Self {
            validity_days: default_validity_days(),
            signup_base_url: None,
        }
    }
}

impl InvitationsConfig {
    #[must_use]
    pub fn validity_days(&self) -> u32 {
        self.validity_days
            .filter(|d| *d > 0)
            .unwrap_or(DEFAULT_INVITATION_VALIDITY_DAYS)
    }

    #[must_use]
    pub fn signup_base_url(&self) -> &str {
        self.signup_base_url
            .as_deref()
            .unwrap_or(DEFAULT_SIGNUP_BASE_URL)
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub storefront: StorefrontConfig,

    #[serde(default)]
    pub cropper: CropperConfig,

    #[serde(default)]
    pub inquiry: InquiryConfig,

    #[serde(default)]
    pub invitations: InvitationsConfig,
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_theme_mode() -> ThemeMode {
    ThemeMode::System
}

fn default_lazy_threshold() -> Option<f32> {
    Some(DEFAULT_LAZY_VISIBILITY_THRESHOLD)
}

fn default_swipe_threshold() -> Option<f32> {
    Some(DEFAULT_SWIPE_THRESHOLD_PX)
}

fn default_slide_duration() -> Option<u64> {
    Some(DEFAULT_SLIDE_DURATION_MS)
}

fn default_fade_duration() -> Option<u64> {
    Some(DEFAULT_FADE_DURATION_MS)
}

fn default_image_cache_entries() -> Option<usize> {
    Some(DEFAULT_IMAGE_CACHE_ENTRIES)
}

fn default_aspect_width() -> Option<u32> {
    Some(DEFAULT_ASPECT_WIDTH)
}

fn default_aspect_height() -> Option<u32> {
    Some(DEFAULT_ASPECT_HEIGHT)
}

fn default_reference_width() -> Option<u32> {
    Some(DEFAULT_REFERENCE_WIDTH)
}

fn default_jpeg_quality() -> Option<u8> {
    Some(DEFAULT_JPEG_QUALITY)
}

fn default_validity_days() -> Option<u32> {
    Some(DEFAULT_INVITATION_VALIDITY_DAYS)
}

fn deserialize_theme_mode<'de, D>(deserializer: D) -> std::result::Result<ThemeMode, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Error;

    let raw = String::deserialize(deserializer)?;
    match raw.to_lowercase().as_str() {
        "light" => Ok(ThemeMode::Light),
        "dark" => Ok(ThemeMode::Dark),
        "system" => Ok(ThemeMode::System),
        other => Err(D::Error::custom(format!("invalid theme_mode: {}", other))),
    }
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message key explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    log::warn!("falling back to default settings: {err}");
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
