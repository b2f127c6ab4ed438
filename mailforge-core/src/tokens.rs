//! Design Tokens - Flat values consumed by every block renderer
//!
//! Tokens are derived per render call and never persisted.

use serde::{Deserialize, Serialize};

use crate::brand::{BrandKit, DEFAULT_FONT_STACK};

pub const DARK_BACKGROUND: &str = "#1a1a1a";
pub const DARK_SURFACE: &str = "#2d2d2d";
pub const DARK_TEXT: &str = "#ffffff";
pub const DARK_MUTED_TEXT: &str = "#a0a0a0";
pub const DARK_BORDER: &str = "#404040";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignTokens {
    pub primary: String,
    pub secondary: String,
    pub background: String,
    pub surface: String,
    pub text: String,
    pub muted_text: String,
    pub border: String,
    pub success: String,
    pub warning: String,
    pub danger: String,
    pub radius: String,
    pub spacing_scale: u32,
    pub font_stack: String,
}

impl Default for DesignTokens {
    fn default() -> Self {
        Self {
            primary: "#2563eb".to_string(),
            secondary: "#64748b".to_string(),
            background: "#ffffff".to_string(),
            surface: "#f8fafc".to_string(),
            text: "#1e293b".to_string(),
            muted_text: "#64748b".to_string(),
            border: "#e2e8f0".to_string(),
            success: "#22c55e".to_string(),
            warning: "#f59e0b".to_string(),
            danger: "#ef4444".to_string(),
            radius: "4px".to_string(),
            spacing_scale: 8,
            font_stack: DEFAULT_FONT_STACK.to_string(),
        }
    }
}

/// Map a brand kit onto design tokens. Colors pass through unvalidated.
pub fn resolve_tokens(brand_kit: &BrandKit) -> DesignTokens {
    let colors = &brand_kit.colors;
    DesignTokens {
        primary: colors.primary.clone(),
        secondary: colors.secondary.clone(),
        background: colors.background.clone(),
        surface: colors.surface.clone(),
        text: colors.text.clone(),
        muted_text: colors.muted_text.clone(),
        border: colors.border.clone(),
        success: colors.success.clone(),
        warning: colors.warning.clone(),
        danger: colors.danger.clone(),
        radius: "4px".to_string(),
        spacing_scale: 8,
        font_stack: brand_kit.typography.font_stack.clone(),
    }
}

/// Fixed dark substitutions for the neutral roles. Brand colors are kept.
pub fn dark_mode_tokens(tokens: &DesignTokens) -> DesignTokens {
    DesignTokens {
        background: DARK_BACKGROUND.to_string(),
        surface: DARK_SURFACE.to_string(),
        text: DARK_TEXT.to_string(),
        muted_text: DARK_MUTED_TEXT.to_string(),
        border: DARK_BORDER.to_string(),
        ..tokens.clone()
    }
}
