//! MailForge Core - Table-Based Email Compiler
//!
//! # The Five Laws (Non-Negotiable)
//! 1. Tables Are Layout
//! 2. Styles Are Inline
//! 3. Brand Kits Are Tokens
//! 4. Deterministic Output
//! 5. Checks Advise, Callers Decide

pub mod brand;
pub mod tokens;
pub mod document;
pub mod style;
pub mod blocks;
pub mod render;
pub mod validation;
pub mod contrast;
pub mod templates;
pub mod storage;
pub mod analysis;
pub mod hashing;
pub mod pipeline;

pub use brand::{BrandColors, BrandKit, BrandLogos, Typography};
pub use tokens::{dark_mode_tokens, resolve_tokens, DesignTokens};
pub use document::{Block, EmailDocument, Theme, UnsupportedBlock};
pub use blocks::render_block;
pub use render::{minify_html, render_email, RenderOptions};
pub use validation::{check_compatibility, CheckStatus, CheckSummary, CompatibilityCheck};
pub use contrast::{check_contrasts, contrast_ratio, dark_mode_defenses, ContrastCheck, ContrastLevel, DarkModeDefense};
pub use templates::{TemplateDefinition, TemplateId, TemplateRegistry};
pub use storage::{InMemoryRepository, JsonFileRepository, Repository, StorageError};
pub use analysis::{BrandAnalysis, BrandAnalyzer, AnalysisError};
pub use hashing::{canonical_json, compute_content_hash, sha256_hex};
pub use pipeline::{ExportOptions, ExportPipeline, ExportedEmail, PipelineError};

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const MIN_TEMPLATE_VERSION: &str = "1.0.0";
