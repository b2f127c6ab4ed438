//! Brand Kit - Colors, Typography, Logos
//!
//! A brand kit is plain data. Every color role always carries a value;
//! missing roles fall back to the default kit on deserialization.

use base64::Engine;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use uuid::Uuid;

use crate::contrast::relative_luminance;

pub type BrandKitId = String;

pub const DEFAULT_FONT_STACK: &str = "Arial, 'Helvetica Neue', Helvetica, sans-serif";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandKit {
    pub id: BrandKitId,
    pub name: String,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub logos: BrandLogos,
    #[serde(default)]
    pub colors: BrandColors,
    #[serde(default)]
    pub typography: Typography,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_colors: Option<Vec<String>>,
}

impl BrandKit {
    /// Fresh kit with default colors and typography.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            created_at: now,
            updated_at: now,
            ..Self::default()
        }
    }
}

impl Default for BrandKit {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            id: "default".to_string(),
            name: "Default Brand".to_string(),
            created_at: now,
            updated_at: now,
            logos: BrandLogos::default(),
            colors: BrandColors::default(),
            typography: Typography::default(),
            brand_notes: None,
            extracted_colors: None,
        }
    }
}

/// Opaque image references (usually base64 data URIs).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandLogos {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dark: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BrandColors {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub surface: String,
    pub text: String,
    pub muted_text: String,
    pub border: String,
    pub success: String,
    pub warning: String,
    pub danger: String,
}

impl Default for BrandColors {
    fn default() -> Self {
        Self {
            primary: "#2563eb".to_string(),
            secondary: "#64748b".to_string(),
            accent: "#0891b2".to_string(),
            background: "#ffffff".to_string(),
            surface: "#f8fafc".to_string(),
            text: "#1e293b".to_string(),
            muted_text: "#64748b".to_string(),
            border: "#e2e8f0".to_string(),
            success: "#22c55e".to_string(),
            warning: "#f59e0b".to_string(),
            danger: "#ef4444".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Typography {
    pub heading: String,
    pub body: String,
    pub font_stack: String,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            heading: "Arial".to_string(),
            body: "Arial".to_string(),
            font_stack: DEFAULT_FONT_STACK.to_string(),
        }
    }
}

/// Email-safe font stacks offered to the user, keyed by label.
pub const SAFE_FONT_STACKS: &[(&str, &str)] = &[
    ("System", "-apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif"),
    ("Inter", "'Inter', -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif"),
    ("Poppins", "'Poppins', -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif"),
    ("Roboto", "'Roboto', -apple-system, BlinkMacSystemFont, 'Segoe UI', Arial, sans-serif"),
    ("Arial", "Arial, 'Helvetica Neue', Helvetica, sans-serif"),
    ("Georgia", "Georgia, 'Times New Roman', Times, serif"),
    ("Verdana", "Verdana, Geneva, sans-serif"),
    ("Tahoma", "Tahoma, Geneva, sans-serif"),
    ("Trebuchet", "'Trebuchet MS', 'Lucida Grande', 'Lucida Sans Unicode', sans-serif"),
    ("Courier", "'Courier New', Courier, monospace"),
];

pub fn font_stack(label: &str) -> Option<&'static str> {
    SAFE_FONT_STACKS
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, stack)| *stack)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorRole {
    pub role: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

/// Roles exposed in the brand editor, in display order.
pub const COLOR_ROLES: &[ColorRole] = &[
    ColorRole { role: "primary", label: "Primario", description: "Color principal de marca" },
    ColorRole { role: "secondary", label: "Secundario", description: "Color de apoyo" },
    ColorRole { role: "accent", label: "Acento", description: "Highlights y CTAs" },
    ColorRole { role: "background", label: "Fondo", description: "Color de fondo del email" },
    ColorRole { role: "surface", label: "Superficie", description: "Tarjetas y contenedores" },
    ColorRole { role: "text", label: "Texto", description: "Color principal de texto" },
    ColorRole { role: "mutedText", label: "Texto Muted", description: "Texto secundario" },
    ColorRole { role: "border", label: "Borde", description: "Bordes y divisores" },
];

// --- Color utilities ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Parse `#rrggbb` (leading `#` optional, case-insensitive).
pub fn hex_to_rgb(hex: &str) -> Option<Rgb> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(Rgb {
        r: channel(0)?,
        g: channel(2)?,
        b: channel(4)?,
    })
}

pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> String {
    format!("#{:02X}{:02X}{:02X}", r, g, b)
}

fn hex_pattern() -> &'static Regex {
    static HEX_PATTERN: OnceLock<Regex> = OnceLock::new();
    HEX_PATTERN.get_or_init(|| Regex::new(r"#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})\b").unwrap())
}

fn rgb_pattern() -> &'static Regex {
    static RGB_PATTERN: OnceLock<Regex> = OnceLock::new();
    RGB_PATTERN.get_or_init(|| {
        Regex::new(r"(?i)rgb\s*\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*\)").unwrap()
    })
}

fn push_unique(colors: &mut Vec<String>, color: String) {
    if !colors.contains(&color) {
        colors.push(color);
    }
}

/// Hex colors found in free text, expanded to 6 digits and uppercased.
pub fn extract_hex_colors(text: &str) -> Vec<String> {
    let mut colors = Vec::new();
    for caps in hex_pattern().captures_iter(text) {
        let digits = &caps[1];
        let normalized = if digits.len() == 3 {
            digits.chars().flat_map(|c| [c, c]).collect::<String>()
        } else {
            digits.to_string()
        };
        push_unique(&mut colors, format!("#{}", normalized.to_uppercase()));
    }
    colors
}

/// `rgb(r, g, b)` colors found in free text, converted to hex.
pub fn extract_rgb_colors(text: &str) -> Vec<String> {
    let mut colors = Vec::new();
    for caps in rgb_pattern().captures_iter(text) {
        let channels: Option<Vec<u8>> = (1..=3).map(|i| caps[i].parse::<u8>().ok()).collect();
        if let Some(c) = channels {
            push_unique(&mut colors, rgb_to_hex(c[0], c[1], c[2]));
        }
    }
    colors
}

pub fn extract_all_colors(text: &str) -> Vec<String> {
    let mut colors = extract_hex_colors(text);
    for color in extract_rgb_colors(text) {
        push_unique(&mut colors, color);
    }
    colors
}

/// Unparseable colors count as light.
pub fn is_light_color(hex: &str) -> bool {
    match hex_to_rgb(hex) {
        Some(rgb) => relative_luminance(rgb) > 0.5,
        None => true,
    }
}

pub fn suggested_text_color(background: &str) -> &'static str {
    if is_light_color(background) {
        "#1e293b"
    } else {
        "#ffffff"
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorCategories {
    pub light: Vec<String>,
    pub dark: Vec<String>,
    pub neutral: Vec<String>,
}

pub fn categorize_colors(colors: &[String]) -> ColorCategories {
    let mut categories = ColorCategories::default();
    for color in colors {
        let Some(rgb) = hex_to_rgb(color) else { continue };
        let luminance = relative_luminance(rgb);
        if luminance > 0.7 {
            categories.light.push(color.clone());
        } else if luminance < 0.3 {
            categories.dark.push(color.clone());
        } else {
            categories.neutral.push(color.clone());
        }
    }
    categories
}

/// Encode raw image bytes as a `data:` URI suitable for a logo slot.
pub fn image_data_uri(mime: &str, bytes: &[u8]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{};base64,{}", mime, encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#2563eb"), Some(Rgb { r: 0x25, g: 0x63, b: 0xeb }));
        assert_eq!(hex_to_rgb("FFFFFF"), Some(Rgb { r: 255, g: 255, b: 255 }));
        assert_eq!(hex_to_rgb("#fff"), None);
        assert_eq!(hex_to_rgb("#zzzzzz"), None);
    }

    #[test]
    fn test_extract_hex_colors_normalizes_and_dedups() {
        let text = "Primary #2563eb, accent #abc and again #2563EB; not #12345.";
        assert_eq!(extract_hex_colors(text), vec!["#2563EB", "#AABBCC"]);
    }

    #[test]
    fn test_extract_rgb_colors_rejects_out_of_range() {
        let text = "rgb(255, 0, 16) RGB( 1,2,3 ) rgb(300, 0, 0)";
        assert_eq!(extract_rgb_colors(text), vec!["#FF0010", "#010203"]);
    }

    #[test]
    fn test_extract_all_colors_merges() {
        let text = "#ff0010 and rgb(255, 0, 16) and #000";
        assert_eq!(extract_all_colors(text), vec!["#FF0010", "#000000"]);
    }

    #[test]
    fn test_light_and_suggested_text() {
        assert!(is_light_color("#ffffff"));
        assert!(!is_light_color("#000000"));
        assert!(is_light_color("not-a-color"));
        assert_eq!(suggested_text_color("#ffffff"), "#1e293b");
        assert_eq!(suggested_text_color("#1a1a1a"), "#ffffff");
    }

    #[test]
    fn test_categorize_colors() {
        let colors = vec![
            "#FFFFFF".to_string(),
            "#000000".to_string(),
            "#64748b".to_string(),
            "bogus".to_string(),
        ];
        let categories = categorize_colors(&colors);
        assert_eq!(categories.light, vec!["#FFFFFF"]);
        assert_eq!(categories.dark, vec!["#000000", "#64748b"]);
        assert!(categories.neutral.is_empty());
    }

    #[test]
    fn test_font_stack_lookup() {
        assert_eq!(font_stack("Georgia"), Some("Georgia, 'Times New Roman', Times, serif"));
        assert_eq!(font_stack("Comic Sans"), None);
    }

    #[test]
    fn test_missing_color_roles_fall_back_to_defaults() {
        let json = r##"{"id":"k1","name":"Acme","colors":{"primary":"#ff0000"}}"##;
        let kit: BrandKit = serde_json::from_str(json).unwrap();
        assert_eq!(kit.colors.primary, "#ff0000");
        assert_eq!(kit.colors.muted_text, "#64748b");
        assert_eq!(kit.typography.font_stack, DEFAULT_FONT_STACK);
    }

    #[test]
    fn test_image_data_uri() {
        assert_eq!(image_data_uri("image/png", b"abc"), "data:image/png;base64,YWJj");
    }
}
