//! Export Pipeline - Single Entry Point
//!
//! CRITICAL: export MUST run the compatibility checker. No bypass.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::brand::BrandKit;
use crate::document::EmailDocument;
use crate::hashing::{compute_content_hash, sha256_hex};
use crate::render::{minify_html, render_email, RenderOptions};
use crate::templates::{TemplateDefinition, TemplateRegistry};
use crate::validation::{CheckSummary, CompatibilityCheck, CompatibilityChecker};
use crate::ENGINE_VERSION;

#[cfg(feature = "test-hooks")]
use std::sync::atomic::{AtomicU32, Ordering};

#[cfg(feature = "test-hooks")]
static CHECK_CALL_COUNT: AtomicU32 = AtomicU32::new(0);

#[cfg(feature = "test-hooks")]
pub fn get_check_call_count() -> u32 {
    CHECK_CALL_COUNT.load(Ordering::SeqCst)
}

#[cfg(feature = "test-hooks")]
pub fn reset_check_call_count() {
    CHECK_CALL_COUNT.store(0, Ordering::SeqCst);
}

const FALLBACK_FILE_STEM: &str = "email";

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Template {0} requires engine >= {1}, current is {2}")]
    EngineVersionMismatch(String, String, String),

    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOptions {
    #[serde(default)]
    pub include_comments: bool,
    #[serde(default)]
    pub minify: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedEmail {
    pub id: String,
    pub document_id: String,
    pub file_name: String,
    pub engine_version: String,
    pub created_at: DateTime<Utc>,
    pub html: String,
    pub html_hash: String,
    pub content_hash: String,
    pub checks: Vec<CompatibilityCheck>,
    pub summary: CheckSummary,
}

/// `{name}.html`, or `email.html` for an unnamed document. Path separators
/// are replaced so the name stays a single file.
pub fn export_file_name(name: &str) -> String {
    let stem = name.trim();
    let stem = if stem.is_empty() { FALLBACK_FILE_STEM } else { stem };
    format!("{}.html", stem.replace(['/', '\\'], "-"))
}

/// The export pipeline - single entry point for preview and export
pub struct ExportPipeline {
    registry: TemplateRegistry,
    checker: CompatibilityChecker,
}

impl ExportPipeline {
    pub fn new(registry: TemplateRegistry) -> Self {
        Self {
            registry,
            checker: CompatibilityChecker::new(),
        }
    }

    pub fn list_templates(&self) -> Vec<&TemplateDefinition> {
        self.registry.list()
    }

    pub fn get_template(&self, id: &str) -> Option<&TemplateDefinition> {
        self.registry.get(id)
    }

    /// Run the compatibility battery.
    ///
    /// This is the ONLY check entry point.
    pub fn check(&self, doc: &EmailDocument, brand_kit: &BrandKit) -> Vec<CompatibilityCheck> {
        #[cfg(feature = "test-hooks")]
        CHECK_CALL_COUNT.fetch_add(1, Ordering::SeqCst);

        self.checker.check(doc, brand_kit)
    }

    /// Body fragment for a live preview surface.
    pub fn preview(&self, doc: &EmailDocument, brand_kit: &BrandKit, dark_mode: bool) -> String {
        let options = RenderOptions { for_preview: true, dark_mode, include_comments: false };
        tracing::debug!(document = %doc.id, blocks = doc.blocks.len(), dark_mode, "rendering preview");
        render_email(doc, brand_kit, &options)
    }

    /// Full standalone document plus its check report.
    ///
    /// CRITICAL: This ALWAYS calls check internally. Warnings and failures
    /// are reported, never used to refuse the export.
    pub fn export(
        &self,
        doc: &EmailDocument,
        brand_kit: &BrandKit,
        options: &ExportOptions,
    ) -> Result<ExportedEmail, PipelineError> {
        let checks = self.check(doc, brand_kit);
        let summary = CheckSummary::from_checks(&checks);

        let render_options = RenderOptions {
            for_preview: false,
            dark_mode: false,
            include_comments: options.include_comments,
        };
        let mut html = render_email(doc, brand_kit, &render_options);
        if options.minify {
            html = minify_html(&html);
        }

        let content_hash = compute_content_hash(doc, brand_kit, options, ENGINE_VERSION)?;
        let exported = ExportedEmail {
            id: Uuid::new_v4().to_string(),
            document_id: doc.id.clone(),
            file_name: export_file_name(&doc.name),
            engine_version: ENGINE_VERSION.to_string(),
            created_at: Utc::now(),
            html_hash: sha256_hex(html.as_bytes()),
            html,
            content_hash,
            checks,
            summary,
        };

        tracing::info!(
            document = %exported.document_id,
            file_name = %exported.file_name,
            pass = summary.pass,
            warning = summary.warning,
            fail = summary.fail,
            "email exported"
        );
        Ok(exported)
    }

    /// New document seeded from a registered template.
    pub fn create_from_template(
        &self,
        template_id: &str,
        name: &str,
        brand_kit_id: Option<String>,
    ) -> Result<EmailDocument, PipelineError> {
        let template = self
            .registry
            .get(template_id)
            .ok_or_else(|| PipelineError::TemplateNotFound(template_id.to_string()))?;

        self.check_engine_version(template)?;

        Ok(EmailDocument::from_template(template, name, brand_kit_id))
    }

    fn check_engine_version(&self, template: &TemplateDefinition) -> Result<(), PipelineError> {
        let engine_ver = semver::Version::parse(ENGINE_VERSION)
            .map_err(|_| PipelineError::InvalidVersion(ENGINE_VERSION.to_string()))?;
        let min_ver = semver::Version::parse(&template.engine_min_version)
            .map_err(|_| PipelineError::InvalidVersion(template.engine_min_version.clone()))?;

        if engine_ver < min_ver {
            return Err(PipelineError::EngineVersionMismatch(
                template.id.clone(),
                template.engine_min_version.clone(),
                ENGINE_VERSION.to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for ExportPipeline {
    fn default() -> Self {
        Self::new(TemplateRegistry::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name("Promo Enero"), "Promo Enero.html");
        assert_eq!(export_file_name("  "), "email.html");
        assert_eq!(export_file_name("a/b\\c"), "a-b-c.html");
    }

    #[test]
    fn test_create_from_template() {
        let pipeline = ExportPipeline::default();
        let doc = pipeline
            .create_from_template("newsletter", "Semana 12", Some("default".to_string()))
            .unwrap();
        let template = pipeline.get_template("newsletter").unwrap();

        assert_eq!(doc.template_id.as_deref(), Some("newsletter"));
        assert_eq!(doc.subject, "Tu newsletter semanal");
        assert_eq!(doc.blocks.len(), template.blocks.len());
        assert_ne!(doc.blocks[0].id(), template.blocks[0].id());
    }

    #[test]
    fn test_unknown_template() {
        let pipeline = ExportPipeline::default();
        let err = pipeline.create_from_template("missing", "x", None).unwrap_err();
        assert!(matches!(err, PipelineError::TemplateNotFound(_)));
    }

    #[test]
    fn test_template_requiring_newer_engine() {
        let mut registry = TemplateRegistry::builtin();
        let mut future = registry.get("event").unwrap().clone();
        future.id = "future".to_string();
        future.engine_min_version = "99.0.0".to_string();
        registry.register(future);

        let pipeline = ExportPipeline::new(registry);
        let err = pipeline.create_from_template("future", "x", None).unwrap_err();
        assert!(matches!(err, PipelineError::EngineVersionMismatch(..)));

        let mut registry = TemplateRegistry::builtin();
        let mut broken = registry.get("event").unwrap().clone();
        broken.engine_min_version = "latest".to_string();
        registry.register(broken);
        let err = ExportPipeline::new(registry).create_from_template("event", "x", None).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidVersion(_)));
    }

    #[test]
    fn test_export_report_and_hashes() {
        let pipeline = ExportPipeline::default();
        let kit = BrandKit::default();
        let doc = pipeline.create_from_template("announcement", "Lanzamiento", None).unwrap();

        let exported = pipeline.export(&doc, &kit, &ExportOptions::default()).unwrap();
        assert_eq!(exported.file_name, "Lanzamiento.html");
        assert_eq!(exported.engine_version, ENGINE_VERSION);
        assert!(exported.html.starts_with("<!DOCTYPE html"));
        assert_eq!(exported.html_hash, sha256_hex(exported.html.as_bytes()));
        assert_eq!(exported.summary.fail, 0);
        assert_eq!(exported.checks.len(), 10);

        let again = pipeline.export(&doc, &kit, &ExportOptions::default()).unwrap();
        assert_eq!(again.html_hash, exported.html_hash);
        assert_eq!(again.content_hash, exported.content_hash);
        assert_ne!(again.id, exported.id);
    }

    #[test]
    fn test_export_minify_and_comments() {
        let pipeline = ExportPipeline::default();
        let kit = BrandKit::default();
        let doc = pipeline.create_from_template("event", "Webinar", None).unwrap();

        let options = ExportOptions { include_comments: true, minify: true };
        let exported = pipeline.export(&doc, &kit, &options).unwrap();
        assert!(exported.html.contains("<!-- Block: header ("));
        assert!(!exported.html.contains('\n'));

        let plain = pipeline.export(&doc, &kit, &ExportOptions::default()).unwrap();
        assert_ne!(plain.content_hash, exported.content_hash);
    }

    #[test]
    fn test_preview_is_fragment() {
        let pipeline = ExportPipeline::default();
        let doc = pipeline.create_from_template("newsletter", "N", None).unwrap();
        let html = pipeline.preview(&doc, &BrandKit::default(), true);
        assert!(!html.contains("<html"));
        assert!(html.contains("#1a1a1a"));
    }
}
