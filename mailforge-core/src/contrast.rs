//! Contrast & Dark-Mode Advisor
//!
//! WCAG 2 relative luminance and contrast ratios over brand-kit colors,
//! plus a fixed set of dark-mode heuristics. Reads the brand kit only.

use serde::{Deserialize, Serialize};

use crate::brand::{hex_to_rgb, BrandKit, Rgb};

/// Minimum ratio for normal body text (WCAG AA).
pub const AA_THRESHOLD: f64 = 4.5;
pub const AAA_THRESHOLD: f64 = 7.0;

/// Mid-grays that dark-mode clients tend to flip to near-white.
const PURE_GRAYS: &[&str] = &["#808080", "#888", "#999", "#aaa", "#bbb"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContrastLevel {
    #[serde(rename = "AAA")]
    Aaa,
    #[serde(rename = "AA")]
    Aa,
    #[serde(rename = "fail")]
    Fail,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContrastCheck {
    pub foreground: String,
    pub background: String,
    pub ratio: f64,
    pub level: ContrastLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DarkModeDefense {
    pub id: String,
    pub title: String,
    pub description: String,
    pub applied: bool,
    pub recommendation: String,
}

fn linearize(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

pub fn relative_luminance(rgb: Rgb) -> f64 {
    0.2126 * linearize(rgb.r) + 0.7152 * linearize(rgb.g) + 0.0722 * linearize(rgb.b)
}

/// Contrast ratio in `[1, 21]`. Returns 1.0 when either color is not `#rrggbb`.
pub fn contrast_ratio(foreground: &str, background: &str) -> f64 {
    let (Some(fg), Some(bg)) = (hex_to_rgb(foreground), hex_to_rgb(background)) else {
        return 1.0;
    };
    let l1 = relative_luminance(fg);
    let l2 = relative_luminance(bg);
    let (lighter, darker) = if l1 >= l2 { (l1, l2) } else { (l2, l1) };
    (lighter + 0.05) / (darker + 0.05)
}

pub fn contrast_level(ratio: f64) -> ContrastLevel {
    if ratio >= AAA_THRESHOLD {
        ContrastLevel::Aaa
    } else if ratio >= AA_THRESHOLD {
        ContrastLevel::Aa
    } else {
        ContrastLevel::Fail
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn pair(foreground: &str, background: &str, failure_hint: &str) -> ContrastCheck {
    let ratio = contrast_ratio(foreground, background);
    let level = contrast_level(ratio);
    ContrastCheck {
        foreground: foreground.to_string(),
        background: background.to_string(),
        ratio: round2(ratio),
        level,
        suggestion: (level == ContrastLevel::Fail).then(|| failure_hint.to_string()),
    }
}

/// Body text, muted text, text-on-surface and white-on-primary, in that order.
pub fn check_contrasts(brand_kit: &BrandKit) -> Vec<ContrastCheck> {
    let colors = &brand_kit.colors;
    vec![
        pair(
            &colors.text,
            &colors.background,
            "El contraste entre texto y fondo es insuficiente",
        ),
        pair(
            &colors.muted_text,
            &colors.background,
            "El texto secundario puede ser difícil de leer",
        ),
        pair(
            &colors.text,
            &colors.surface,
            "El texto sobre tarjetas y contenedores puede ser difícil de leer",
        ),
        pair(
            "#ffffff",
            &colors.primary,
            "El texto del botón puede no ser legible; considera un color más oscuro",
        ),
    ]
}

pub fn dark_mode_defenses(brand_kit: &BrandKit) -> Vec<DarkModeDefense> {
    let colors = &brand_kit.colors;
    let muted = colors.muted_text.to_lowercase();

    let defense = |id: &str, title: &str, description: &str, applied: bool, recommendation: &str| {
        DarkModeDefense {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            applied,
            recommendation: recommendation.to_string(),
        }
    };

    vec![
        defense(
            "solid-bg",
            "Fondos sólidos",
            "Usar colores de fondo sólidos en lugar de transparentes",
            true,
            "Los fondos sólidos evitan que el dark mode invierta el contenido inesperadamente.",
        ),
        defense(
            "avoid-gray",
            "Evitar grises puros",
            "Usar tonos con matiz en lugar de grises neutros",
            !PURE_GRAYS.contains(&muted.as_str()),
            "Los grises puros pueden volverse blancos en dark mode, perdiéndose contra el fondo.",
        ),
        defense(
            "border-visibility",
            "Bordes visibles",
            "Mantener bordes definidos en tarjetas y contenedores",
            colors.border != colors.background,
            "Los bordes ayudan a mantener la estructura visual en dark mode.",
        ),
        defense(
            "logo-version",
            "Logo alternativo",
            "Tener una versión del logo para fondos oscuros",
            brand_kit.logos.dark.as_deref().is_some_and(|logo| !logo.is_empty()),
            "Un logo con colores invertidos o con fondo puede ser necesario en dark mode.",
        ),
        defense(
            "sufficient-contrast",
            "Contraste suficiente",
            "Mantener ratio mínimo de 4.5:1 para texto",
            contrast_ratio(&colors.text, &colors.background) >= AA_THRESHOLD,
            "El alto contraste base sobrevive mejor las transformaciones de dark mode.",
        ),
    ]
}

/// Approximation of Gmail / Outlook.com dark-mode rewriting, for debug views.
pub fn dark_mode_css() -> &'static str {
    r#"/* Gmail Dark Mode Approximation */
[data-ogsc] .email-body { background-color: #1a1a1a !important; }
[data-ogsc] .email-content { background-color: #2d2d2d !important; }
[data-ogsc] .text-primary { color: #ffffff !important; }
[data-ogsc] .text-muted { color: #a0a0a0 !important; }

/* Outlook.com Dark Mode */
[data-ogsb] .email-body { background-color: #1a1a1a !important; }
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_black_on_white_is_21() {
        let ratio = contrast_ratio("#000000", "#ffffff");
        assert!((ratio - 21.0).abs() < 1e-9);
        assert_eq!(contrast_level(ratio), ContrastLevel::Aaa);
    }

    #[test]
    fn test_color_against_itself_is_one() {
        for color in ["#000000", "#2563eb", "#ffffff", "#64748b"] {
            assert_eq!(contrast_ratio(color, color), 1.0);
        }
    }

    #[test]
    fn test_ratio_is_symmetric() {
        assert_eq!(
            contrast_ratio("#2563eb", "#ffffff"),
            contrast_ratio("#ffffff", "#2563eb")
        );
    }

    #[test]
    fn test_ratio_decreases_as_foreground_approaches_background() {
        let grays = ["#000000", "#333333", "#666666", "#999999", "#cccccc", "#ffffff"];
        let ratios: Vec<f64> = grays.iter().map(|g| contrast_ratio(g, "#ffffff")).collect();
        for window in ratios.windows(2) {
            assert!(window[0] > window[1], "{:?}", ratios);
        }
    }

    #[test]
    fn test_unparseable_color_yields_one() {
        assert_eq!(contrast_ratio("blue", "#ffffff"), 1.0);
        assert_eq!(contrast_ratio("#fff", "#000000"), 1.0);
    }

    #[test]
    fn test_levels() {
        assert_eq!(contrast_level(7.0), ContrastLevel::Aaa);
        assert_eq!(contrast_level(4.5), ContrastLevel::Aa);
        assert_eq!(contrast_level(4.49), ContrastLevel::Fail);
    }

    #[test]
    fn test_check_contrasts_default_kit() {
        let checks = check_contrasts(&BrandKit::default());
        assert_eq!(checks.len(), 4);
        assert_eq!(checks[0].foreground, "#1e293b");
        assert_eq!(checks[0].level, ContrastLevel::Aaa);
        assert!(checks[0].suggestion.is_none());
        assert_eq!(checks[3].foreground, "#ffffff");
        assert_eq!(checks[3].background, "#2563eb");
        assert_eq!(checks[3].level, ContrastLevel::Aa);
    }

    #[test]
    fn test_failing_pair_carries_suggestion() {
        let mut kit = BrandKit::default();
        kit.colors.primary = "#fde047".to_string();
        let checks = check_contrasts(&kit);
        assert_eq!(checks[3].level, ContrastLevel::Fail);
        assert!(checks[3].suggestion.is_some());
    }

    #[test]
    fn test_ratio_rounded_to_two_decimals() {
        let checks = check_contrasts(&BrandKit::default());
        for check in checks {
            assert_eq!(check.ratio, (check.ratio * 100.0).round() / 100.0);
        }
    }

    #[test]
    fn test_dark_mode_defenses() {
        let mut kit = BrandKit::default();
        let defenses = dark_mode_defenses(&kit);
        let ids: Vec<_> = defenses.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["solid-bg", "avoid-gray", "border-visibility", "logo-version", "sufficient-contrast"]
        );
        assert!(defenses[0].applied);
        assert!(defenses[1].applied);
        assert!(defenses[2].applied);
        assert!(!defenses[3].applied);
        assert!(defenses[4].applied);

        kit.colors.muted_text = "#999".to_string();
        kit.colors.border = kit.colors.background.clone();
        kit.logos.dark = Some("data:image/png;base64,AAAA".to_string());
        let defenses = dark_mode_defenses(&kit);
        assert!(!defenses[1].applied);
        assert!(!defenses[2].applied);
        assert!(defenses[3].applied);
    }

    #[test]
    fn test_dark_mode_css_covers_both_vendors() {
        let css = dark_mode_css();
        assert!(css.contains("[data-ogsc]"));
        assert!(css.contains("[data-ogsb]"));
    }
}
