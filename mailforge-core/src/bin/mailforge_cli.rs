//! MailForge CLI - Bridge interface for the editor
//!
//! Commands: templates, render, check, contrast, export, new
//! Outputs JSON (or HTML for render) to stdout; logs go to stderr.
//! Returns 2 when a compatibility check fails.

use clap::{Args, Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use mailforge_core::{
    contrast::{check_contrasts, dark_mode_defenses},
    render::{minify_html, render_email, RenderOptions},
    storage::{default_brand_kit, JsonFileRepository, Repository},
    validation::CheckSummary,
    BrandKit, EmailDocument, ExportOptions, ExportPipeline, TemplateRegistry,
};

const LOG_ENV: &str = "MAILFORGE_LOG";

#[derive(Parser)]
#[command(name = "mailforge-cli")]
#[command(about = "MailForge CLI - Table-based email compiler")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to extra templates directory
    #[arg(short, long, default_value = "templates")]
    templates_dir: PathBuf,

    /// Directory holding the brand-kit and draft stores
    #[arg(short, long)]
    store_dir: Option<PathBuf>,
}

#[derive(Args)]
struct BrandArgs {
    /// Brand kit JSON file
    #[arg(short, long)]
    brand: Option<PathBuf>,

    /// Brand kit id in the store (needs --store-dir)
    #[arg(long)]
    brand_id: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// List available templates
    Templates,

    /// Render a document to HTML
    Render {
        /// Email document JSON file
        #[arg(short, long)]
        doc: PathBuf,

        #[command(flatten)]
        brand: BrandArgs,

        /// Body fragment instead of a full document
        #[arg(long)]
        preview: bool,

        #[arg(long)]
        dark: bool,

        /// Emit per-block debug comments
        #[arg(long)]
        comments: bool,

        #[arg(long)]
        minify: bool,
    },

    /// Run compatibility checks
    Check {
        #[arg(short, long)]
        doc: PathBuf,

        #[command(flatten)]
        brand: BrandArgs,
    },

    /// Contrast ratios and dark-mode defenses for a brand kit
    Contrast {
        #[command(flatten)]
        brand: BrandArgs,
    },

    /// Export a document as a standalone HTML file
    Export {
        #[arg(short, long)]
        doc: PathBuf,

        #[command(flatten)]
        brand: BrandArgs,

        /// Output directory
        #[arg(short, long, default_value = ".")]
        out: PathBuf,

        #[arg(long)]
        comments: bool,

        #[arg(long)]
        minify: bool,
    },

    /// Create a document from a template
    New {
        #[arg(short, long)]
        template: String,

        #[arg(short, long)]
        name: String,

        #[arg(long)]
        brand_id: Option<String>,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, String> {
    let content = fs::read_to_string(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    serde_json::from_str(&content).map_err(|e| format!("{}: {}", path.display(), e))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{}", json);
    Ok(())
}

fn load_brand(args: &BrandArgs, store_dir: Option<&Path>) -> Result<BrandKit, String> {
    if let Some(path) = &args.brand {
        return read_json(path);
    }
    match (&args.brand_id, store_dir) {
        (Some(id), Some(dir)) => JsonFileRepository::<BrandKit>::brand_kits(dir)
            .get(id)
            .map_err(|e| e.to_string())?
            .ok_or_else(|| format!("Brand kit not found: {}", id)),
        (Some(_), None) => Err("--brand-id requires --store-dir".to_string()),
        (None, _) => Ok(default_brand_kit()),
    }
}

fn run(cli: Cli) -> Result<ExitCode, String> {
    let registry = TemplateRegistry::load_from_dir(&cli.templates_dir)
        .map_err(|e| format!("Failed to load templates: {}", e))?;
    let pipeline = ExportPipeline::new(registry);
    let store_dir = cli.store_dir.as_deref();

    match cli.command {
        Commands::Templates => {
            let templates: Vec<_> = pipeline
                .list_templates()
                .iter()
                .map(|t| {
                    serde_json::json!({
                        "id": t.id,
                        "name": t.name,
                        "category": t.category,
                        "description": t.description,
                        "blocks": t.blocks.len(),
                        "engineMinVersion": t.engine_min_version,
                    })
                })
                .collect();
            print_json(&templates)?;
            Ok(ExitCode::SUCCESS)
        }

        Commands::Render { doc, brand, preview, dark, comments, minify } => {
            let doc: EmailDocument = read_json(&doc)?;
            let kit = load_brand(&brand, store_dir)?;
            let options = RenderOptions { for_preview: preview, dark_mode: dark, include_comments: comments };
            let html = render_email(&doc, &kit, &options);
            println!("{}", if minify { minify_html(&html) } else { html });
            Ok(ExitCode::SUCCESS)
        }

        Commands::Check { doc, brand } => {
            let doc: EmailDocument = read_json(&doc)?;
            let kit = load_brand(&brand, store_dir)?;
            let checks = pipeline.check(&doc, &kit);
            let summary = CheckSummary::from_checks(&checks);
            print_json(&serde_json::json!({ "checks": checks, "summary": summary }))?;
            if summary.has_failures() {
                Ok(ExitCode::from(2))
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }

        Commands::Contrast { brand } => {
            let kit = load_brand(&brand, store_dir)?;
            print_json(&serde_json::json!({
                "contrast": check_contrasts(&kit),
                "darkModeDefenses": dark_mode_defenses(&kit),
            }))?;
            Ok(ExitCode::SUCCESS)
        }

        Commands::Export { doc, brand, out, comments, minify } => {
            let doc: EmailDocument = read_json(&doc)?;
            let kit = load_brand(&brand, store_dir)?;
            let options = ExportOptions { include_comments: comments, minify };
            let exported = pipeline.export(&doc, &kit, &options).map_err(|e| e.to_string())?;

            fs::create_dir_all(&out).map_err(|e| e.to_string())?;
            let path = out.join(&exported.file_name);
            fs::write(&path, &exported.html).map_err(|e| format!("{}: {}", path.display(), e))?;

            print_json(&serde_json::json!({
                "success": true,
                "path": path.display().to_string(),
                "id": exported.id,
                "fileName": exported.file_name,
                "engineVersion": exported.engine_version,
                "createdAt": exported.created_at,
                "htmlHash": exported.html_hash,
                "contentHash": exported.content_hash,
                "checks": exported.checks,
                "summary": exported.summary,
            }))?;
            if exported.summary.has_failures() {
                Ok(ExitCode::from(2))
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }

        Commands::New { template, name, brand_id } => {
            let doc = pipeline
                .create_from_template(&template, &name, brand_id)
                .map_err(|e| e.to_string())?;
            if let Some(dir) = store_dir {
                JsonFileRepository::<EmailDocument>::drafts(dir).put(doc.clone()).map_err(|e| e.to_string())?;
            }
            print_json(&doc)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(error) => {
            println!("{}", serde_json::json!({ "success": false, "error": error }));
            ExitCode::FAILURE
        }
    }
}
