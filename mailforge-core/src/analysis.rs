//! Brand Manual Analysis - Boundary to an external analyzer
//!
//! The analyzer itself (a completion API reading a PDF) lives outside this
//! crate. Here: the result shape, response cleanup, and how a result is
//! folded into a brand kit.

use chrono::Utc;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use thiserror::Error;

use crate::brand::BrandKit;

/// Upload guard for PDF manuals.
pub const MAX_PDF_BYTES: usize = 32 * 1024 * 1024;

const PDF_MIME: &str = "application/pdf";

/// Neutral roles are not taken from the analysis; these fixed values apply.
const ANALYZED_TEXT: &str = "#1e293b";
const ANALYZED_MUTED_TEXT: &str = "#64748b";
const ANALYZED_BORDER: &str = "#e2e8f0";
const ANALYZED_SUCCESS: &str = "#22c55e";
const ANALYZED_WARNING: &str = "#f59e0b";
const ANALYZED_DANGER: &str = "#ef4444";
const ANALYZED_BACKGROUND: &str = "#ffffff";

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("PDF file size exceeds 32MB limit ({size} bytes)")]
    FileTooLarge { size: usize },

    #[error("Analyzer returned an empty response")]
    EmptyResponse,

    #[error("Failed to parse analysis response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Analyzer failed: {0}")]
    Analyzer(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandAnalysis {
    #[serde(default)]
    pub colors: AnalyzedColors,
    #[serde(default)]
    pub typography: AnalyzedTypography,
    #[serde(default)]
    pub spacing: AnalyzedSpacing,
    #[serde(default)]
    pub border_radius: Vec<String>,
    #[serde(default)]
    pub brand_voice: String,
    #[serde(default)]
    pub key_guidelines: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_usage: Option<String>,
    #[serde(default)]
    pub do_and_donts: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedColors {
    #[serde(default)]
    pub primary: Vec<String>,
    #[serde(default)]
    pub secondary: Vec<String>,
    #[serde(default)]
    pub accent: Vec<String>,
    #[serde(default)]
    pub neutral: Vec<String>,
}

impl AnalyzedColors {
    /// Every candidate in role order, blanks dropped.
    pub fn all(&self) -> Vec<String> {
        self.primary
            .iter()
            .chain(&self.secondary)
            .chain(&self.accent)
            .chain(&self.neutral)
            .filter(|c| !c.is_empty())
            .cloned()
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzedTypography {
    #[serde(default)]
    pub heading_fonts: Vec<String>,
    #[serde(default)]
    pub body_fonts: Vec<String>,
    #[serde(default)]
    pub font_sizes: FontSizes,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FontSizes {
    #[serde(default)]
    pub heading: Vec<String>,
    #[serde(default)]
    pub body: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedSpacing {
    #[serde(default)]
    pub scale: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// External brand-manual analyzer. Implementations own their transport.
pub trait BrandAnalyzer {
    fn analyze(&self, document: &[u8], file_name: &str) -> Result<BrandAnalysis, AnalysisError>;
}

pub fn check_upload_size(content_type: &str, size: usize) -> Result<(), AnalysisError> {
    if content_type == PDF_MIME && size > MAX_PDF_BYTES {
        return Err(AnalysisError::FileTooLarge { size });
    }
    Ok(())
}

fn json_fence() -> &'static Regex {
    static JSON_FENCE: OnceLock<Regex> = OnceLock::new();
    JSON_FENCE.get_or_init(|| Regex::new(r"```json\s*").unwrap())
}

fn bare_fence() -> &'static Regex {
    static BARE_FENCE: OnceLock<Regex> = OnceLock::new();
    BARE_FENCE.get_or_init(|| Regex::new(r"```\s*").unwrap())
}

/// Parse raw analyzer text, tolerating markdown code fences around the JSON.
pub fn parse_analysis_response(text: &str) -> Result<BrandAnalysis, AnalysisError> {
    let cleaned = json_fence().replace_all(text, "");
    let cleaned = bare_fence().replace_all(&cleaned, "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Err(AnalysisError::EmptyResponse);
    }
    serde_json::from_str(cleaned).map_err(|err| {
        tracing::warn!(%err, "analysis response is not valid JSON");
        AnalysisError::Malformed(err)
    })
}

fn bullets(items: &[String]) -> String {
    items.iter().map(|item| format!("• {}", item)).collect::<Vec<_>>().join("\n")
}

/// Human-readable notes stored on the brand kit.
pub fn brand_notes(analysis: &BrandAnalysis) -> String {
    let mut notes = String::from("=== BRAND ANALYSIS ===\n");
    if !analysis.brand_voice.is_empty() {
        notes.push_str(&format!("Brand Voice: {}\n", analysis.brand_voice));
    }
    if !analysis.key_guidelines.is_empty() {
        notes.push_str(&format!("\nKey Guidelines:\n{}\n", bullets(&analysis.key_guidelines)));
    }
    if let Some(usage) = analysis.logo_usage.as_deref().filter(|u| !u.is_empty()) {
        notes.push_str(&format!("\nLogo Usage:\n{}\n", usage));
    }
    if !analysis.do_and_donts.is_empty() {
        notes.push_str(&format!("\nDo's and Don'ts:\n{}\n", bullets(&analysis.do_and_donts)));
    }
    if !analysis.spacing.recommendations.is_empty() {
        notes.push_str(&format!("\nSpacing:\n{}", bullets(&analysis.spacing.recommendations)));
    }
    notes
}

fn first_or(candidates: &[String], fallback: &str) -> String {
    candidates
        .iter()
        .find(|c| !c.is_empty())
        .map_or_else(|| fallback.to_string(), Clone::clone)
}

/// Fold an analysis into a copy of `kit`. Brand roles take the first
/// candidate; neutral text, border and status roles reset to fixed values.
pub fn apply_analysis(kit: &BrandKit, analysis: &BrandAnalysis) -> BrandKit {
    let mut updated = kit.clone();
    let found = &analysis.colors;

    updated.colors.primary = first_or(&found.primary, &kit.colors.primary);
    updated.colors.secondary = first_or(&found.secondary, &kit.colors.secondary);
    updated.colors.accent = first_or(&found.accent, &kit.colors.accent);
    updated.colors.background = first_or(&found.neutral, ANALYZED_BACKGROUND);
    updated.colors.surface = first_or(found.neutral.get(1..).unwrap_or_default(), &kit.colors.surface);
    updated.colors.text = ANALYZED_TEXT.to_string();
    updated.colors.muted_text = ANALYZED_MUTED_TEXT.to_string();
    updated.colors.border = ANALYZED_BORDER.to_string();
    updated.colors.success = ANALYZED_SUCCESS.to_string();
    updated.colors.warning = ANALYZED_WARNING.to_string();
    updated.colors.danger = ANALYZED_DANGER.to_string();

    let typography = &analysis.typography;
    updated.typography.heading = first_or(&typography.heading_fonts, &kit.typography.heading);
    if let Some(body) = typography.body_fonts.iter().find(|f| !f.is_empty()) {
        updated.typography.body = body.clone();
        updated.typography.font_stack = format!("\"{}\", Arial, sans-serif", body);
    }

    updated.brand_notes = Some(brand_notes(analysis));
    updated.extracted_colors = Some(found.all());
    updated.updated_at = Utc::now();
    updated
}

/// Size check, analyzer call, then fold into `kit`.
pub fn analyze_brand_manual(
    analyzer: &dyn BrandAnalyzer,
    kit: &BrandKit,
    document: &[u8],
    file_name: &str,
    content_type: &str,
) -> Result<BrandKit, AnalysisError> {
    check_upload_size(content_type, document.len())?;
    let analysis = analyzer.analyze(document, file_name)?;
    tracing::info!(
        file_name,
        colors = analysis.colors.all().len(),
        guidelines = analysis.key_guidelines.len(),
        "brand manual analyzed"
    );
    Ok(apply_analysis(kit, &analysis))
}
