//! Compatibility Checker - Rule battery over a document
//!
//! Rules produce structured checks; the checker fixes their order.
//! Nothing here blocks an export. Callers decide what a warning means.

use serde::{Deserialize, Serialize};

use crate::brand::BrandKit;
use crate::document::{Block, EmailDocument};

/// Subjects longer than this are likely truncated on mobile.
pub const SUBJECT_MAX_CHARS: usize = 60;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pass,
    Warning,
    Fail,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompatibilityCheck {
    pub id: String,
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl CompatibilityCheck {
    fn new(id: &str, name: &str, status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            status,
            message: message.into(),
            suggestion: None,
        }
    }

    fn with_suggestion(mut self, suggestion: Option<&str>) -> Self {
        self.suggestion = suggestion.map(str::to_string);
        self
    }

    /// Pass/warning pair for a yes/no property of the document.
    fn presence(id: &str, name: &str, present: bool, yes: &str, no: &str, fix: &str) -> Self {
        if present {
            Self::new(id, name, CheckStatus::Pass, yes)
        } else {
            Self::new(id, name, CheckStatus::Warning, no).with_suggestion(Some(fix))
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckSummary {
    pub pass: usize,
    pub warning: usize,
    pub fail: usize,
}

impl CheckSummary {
    pub fn from_checks(checks: &[CompatibilityCheck]) -> Self {
        checks.iter().fold(Self::default(), |mut summary, check| {
            match check.status {
                CheckStatus::Pass => summary.pass += 1,
                CheckStatus::Warning => summary.warning += 1,
                CheckStatus::Fail => summary.fail += 1,
            }
            summary
        })
    }

    pub fn has_failures(&self) -> bool {
        self.fail > 0
    }
}

/// Compatibility rule trait - at most one check per rule
pub trait CompatibilityRule {
    fn id(&self) -> &'static str;
    fn check(&self, doc: &EmailDocument, brand_kit: &BrandKit) -> Option<CompatibilityCheck>;
}

fn has_block(doc: &EmailDocument, matches: fn(&Block) -> bool) -> bool {
    doc.blocks.iter().any(matches)
}

// --- Concrete Rules ---

pub struct PreheaderRule;

impl CompatibilityRule for PreheaderRule {
    fn id(&self) -> &'static str { "preheader" }

    fn check(&self, doc: &EmailDocument, _: &BrandKit) -> Option<CompatibilityCheck> {
        let len = doc.preheader.chars().count();
        Some(CompatibilityCheck::presence(
            self.id(),
            "Preheader",
            len > 0,
            &format!("Preheader configurado ({} caracteres)", len),
            "Sin preheader definido",
            "Agrega un preheader de 40-100 caracteres para mejor preview en inbox",
        ))
    }
}

pub struct SubjectRule;

impl CompatibilityRule for SubjectRule {
    fn id(&self) -> &'static str { "subject" }

    fn check(&self, doc: &EmailDocument, _: &BrandKit) -> Option<CompatibilityCheck> {
        let len = doc.subject.chars().count();
        let check = if len == 0 {
            CompatibilityCheck::new(self.id(), "Asunto", CheckStatus::Warning, "Sin asunto definido")
        } else {
            let too_long = len > SUBJECT_MAX_CHARS;
            let status = if too_long { CheckStatus::Warning } else { CheckStatus::Pass };
            CompatibilityCheck::new(
                self.id(),
                "Asunto",
                status,
                format!("Asunto: \"{}\" ({} caracteres)", doc.subject, len),
            )
            .with_suggestion(
                too_long.then_some("El asunto tiene más de 60 caracteres y puede truncarse en móvil"),
            )
        };
        Some(check)
    }
}

pub struct HeaderRule;

impl CompatibilityRule for HeaderRule {
    fn id(&self) -> &'static str { "header" }

    fn check(&self, doc: &EmailDocument, _: &BrandKit) -> Option<CompatibilityCheck> {
        Some(CompatibilityCheck::presence(
            self.id(),
            "Encabezado",
            has_block(doc, |b| matches!(b, Block::Header(_))),
            "Email tiene encabezado",
            "Sin encabezado/logo",
            "Considera agregar un header con logo para reforzar la marca",
        ))
    }
}

pub struct CallToActionRule;

impl CompatibilityRule for CallToActionRule {
    fn id(&self) -> &'static str { "cta" }

    fn check(&self, doc: &EmailDocument, _: &BrandKit) -> Option<CompatibilityCheck> {
        Some(CompatibilityCheck::presence(
            self.id(),
            "Call to Action",
            has_block(doc, |b| matches!(b, Block::Button(_))),
            "CTA button presente",
            "Sin botón CTA",
            "Un botón CTA claro mejora la tasa de conversión",
        ))
    }
}

/// Only reports when the document has at least one image.
pub struct ImageAltRule;

impl CompatibilityRule for ImageAltRule {
    fn id(&self) -> &'static str { "image-alt" }

    fn check(&self, doc: &EmailDocument, _: &BrandKit) -> Option<CompatibilityCheck> {
        let (total, with_alt) = doc.blocks.iter().fold((0, 0), |(total, with_alt), block| match block {
            Block::Image(image) => (total + 1, with_alt + usize::from(!image.alt.is_empty())),
            _ => (total, with_alt),
        });
        if total == 0 {
            return None;
        }

        let complete = with_alt == total;
        let status = if complete { CheckStatus::Pass } else { CheckStatus::Warning };
        Some(
            CompatibilityCheck::new(
                self.id(),
                "Alt en imágenes",
                status,
                format!("{}/{} imágenes tienen alt text", with_alt, total),
            )
            .with_suggestion((!complete).then_some("Agrega alt text descriptivo a todas las imágenes")),
        )
    }
}

pub struct FooterRule;

impl CompatibilityRule for FooterRule {
    fn id(&self) -> &'static str { "footer" }

    fn check(&self, doc: &EmailDocument, _: &BrandKit) -> Option<CompatibilityCheck> {
        Some(CompatibilityCheck::presence(
            self.id(),
            "Footer",
            has_block(doc, |b| matches!(b, Block::Footer(_))),
            "Footer presente",
            "Sin footer",
            "Agrega un footer con información de contacto y unsubscribe",
        ))
    }
}

/// Looks at the first footer only; later footers are ignored.
pub struct UnsubscribeRule;

impl CompatibilityRule for UnsubscribeRule {
    fn id(&self) -> &'static str { "unsubscribe" }

    fn check(&self, doc: &EmailDocument, _: &BrandKit) -> Option<CompatibilityCheck> {
        let included = doc
            .blocks
            .iter()
            .find_map(|b| match b {
                Block::Footer(footer) => Some(footer.include_unsubscribe),
                _ => None,
            })
            .unwrap_or(false);
        Some(CompatibilityCheck::presence(
            self.id(),
            "Link de baja",
            included,
            "Link de baja incluido",
            "Sin link de baja explícito",
            "Los emails comerciales requieren un enlace de unsubscribe visible",
        ))
    }
}

/// Guaranteed by the assembler, so always passes.
pub struct TableLayoutRule;

impl CompatibilityRule for TableLayoutRule {
    fn id(&self) -> &'static str { "table-layout" }

    fn check(&self, _: &EmailDocument, _: &BrandKit) -> Option<CompatibilityCheck> {
        Some(CompatibilityCheck::new(
            self.id(),
            "Layout con tablas",
            CheckStatus::Pass,
            "HTML generado usa tablas para compatibilidad",
        ))
    }
}

pub struct InlineStylesRule;

impl CompatibilityRule for InlineStylesRule {
    fn id(&self) -> &'static str { "inline-styles" }

    fn check(&self, _: &EmailDocument, _: &BrandKit) -> Option<CompatibilityCheck> {
        Some(CompatibilityCheck::new(
            self.id(),
            "Estilos inline",
            CheckStatus::Pass,
            "CSS inline aplicado automáticamente",
        ))
    }
}

pub struct FontStackRule;

impl CompatibilityRule for FontStackRule {
    fn id(&self) -> &'static str { "font-stack" }

    fn check(&self, _: &EmailDocument, brand_kit: &BrandKit) -> Option<CompatibilityCheck> {
        let stack = &brand_kit.typography.font_stack;
        let first = stack.split(',').next().unwrap_or_default();
        Some(
            CompatibilityCheck::new(
                self.id(),
                "Tipografía",
                CheckStatus::Pass,
                format!("Font stack: {}", first),
            )
            .with_suggestion(Some("Usando fuentes web-safe con fallbacks")),
        )
    }
}

/// Fixed message; does not look at the document's configured width.
pub struct WidthRule;

impl CompatibilityRule for WidthRule {
    fn id(&self) -> &'static str { "width" }

    fn check(&self, _: &EmailDocument, _: &BrandKit) -> Option<CompatibilityCheck> {
        Some(CompatibilityCheck::new(
            self.id(),
            "Ancho de email",
            CheckStatus::Pass,
            "Ancho fijo 600px con responsive",
        ))
    }
}

/// Checker runs every rule in a fixed order
pub struct CompatibilityChecker {
    rules: Vec<Box<dyn CompatibilityRule>>,
}

impl CompatibilityChecker {
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(PreheaderRule),
                Box::new(SubjectRule),
                Box::new(HeaderRule),
                Box::new(CallToActionRule),
                Box::new(ImageAltRule),
                Box::new(FooterRule),
                Box::new(UnsubscribeRule),
                Box::new(TableLayoutRule),
                Box::new(InlineStylesRule),
                Box::new(FontStackRule),
                Box::new(WidthRule),
            ],
        }
    }

    pub fn check(&self, doc: &EmailDocument, brand_kit: &BrandKit) -> Vec<CompatibilityCheck> {
        self.rules
            .iter()
            .filter_map(|rule| rule.check(doc, brand_kit))
            .collect()
    }
}

impl Default for CompatibilityChecker {
    fn default() -> Self {
        Self::new()
    }
}

pub fn check_compatibility(doc: &EmailDocument, brand_kit: &BrandKit) -> Vec<CompatibilityCheck> {
    CompatibilityChecker::new().check(doc, brand_kit)
}
