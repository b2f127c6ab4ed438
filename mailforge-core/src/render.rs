//! Document Assembler - Blocks to a complete email
//!
//! Pure and deterministic: identical inputs give byte-identical output.
//! Preview mode returns a body fragment; export mode a full XHTML document.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::blocks::render_block;
use crate::brand::BrandKit;
use crate::document::{Block, EmailDocument, Theme};
use crate::style::InlineStyle;
use crate::tokens::{dark_mode_tokens, resolve_tokens, DesignTokens, DARK_BACKGROUND, DARK_SURFACE};

/// Filler appended after the preheader so clients don't pull body text
/// into the inbox preview.
const PREHEADER_FILLER: &str = "&nbsp;&zwnj;";
const PREHEADER_FILLER_REPEAT: usize = 50;

/// Extra room above the content width before the mobile rules kick in.
const MOBILE_BREAKPOINT_MARGIN: u32 = 20;

const XHTML_DOCTYPE: &str = r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Transitional//EN" "http://www.w3.org/TR/xhtml1/DTD/xhtml1-transitional.dtd">"#;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    #[serde(default)]
    pub for_preview: bool,
    #[serde(default)]
    pub dark_mode: bool,
    #[serde(default)]
    pub include_comments: bool,
}

impl RenderOptions {
    pub fn preview() -> Self {
        Self { for_preview: true, ..Self::default() }
    }

    pub fn export() -> Self {
        Self::default()
    }
}

/// Tokens for this document: dark substitutions apply when either the
/// caller asks for dark mode or the document theme is dark.
pub fn document_tokens(doc: &EmailDocument, brand_kit: &BrandKit, options: &RenderOptions) -> DesignTokens {
    let tokens = resolve_tokens(brand_kit);
    if options.dark_mode || doc.theme == Theme::Dark {
        dark_mode_tokens(&tokens)
    } else {
        tokens
    }
}

pub fn render_email(doc: &EmailDocument, brand_kit: &BrandKit, options: &RenderOptions) -> String {
    let tokens = document_tokens(doc, brand_kit, options);
    tracing::debug!(
        document = %doc.id,
        blocks = doc.blocks.len(),
        preview = options.for_preview,
        dark_mode = options.dark_mode || doc.theme == Theme::Dark,
        "rendering email"
    );
    let body = render_body(doc, &tokens, options);

    if options.for_preview {
        return body;
    }
    wrap_document(doc, &tokens, &body)
}

/// One `<tr><td>` per block. Debug comments sit inside the cell; a block
/// that renders to nothing only gets a row when its comment is requested.
fn render_rows(blocks: &[Block], tokens: &DesignTokens, include_comments: bool) -> String {
    let mut rows = String::new();
    for block in blocks {
        let mut cell = String::new();
        if include_comments {
            cell.push_str(&format!(
                "<!-- Block: {} ({}) -->\n",
                block.kind(),
                block.id().unwrap_or("-")
            ));
        }
        cell.push_str(&render_block(block, tokens));
        if cell.is_empty() {
            continue;
        }
        rows.push_str(&format!("<tr>\n<td>\n{}</td>\n</tr>\n", cell));
    }
    rows
}

/// Hidden inbox preview text. Nothing is emitted for an empty preheader.
pub fn preheader_html(preheader: &str) -> String {
    if preheader.is_empty() {
        return String::new();
    }
    let style = InlineStyle::new()
        .set("display", "none")
        .set("max-height", "0")
        .set("overflow", "hidden")
        .set("mso-hide", "all");
    format!(
        "<div{}>\n{}\n{}\n</div>\n",
        style.attr(),
        preheader,
        PREHEADER_FILLER.repeat(PREHEADER_FILLER_REPEAT)
    )
}

fn render_body(doc: &EmailDocument, tokens: &DesignTokens, options: &RenderOptions) -> String {
    let width = doc.content_width();
    let width_px = format!("{}px", width);

    // Preview pins the width so blocks span the chosen preview size;
    // export lets the table shrink on narrow clients.
    let inner_style = if options.for_preview {
        InlineStyle::new()
            .set("background-color", &tokens.surface)
            .set("width", &width_px)
            .set("min-width", &width_px)
    } else {
        InlineStyle::new()
            .set("background-color", &tokens.surface)
            .set("max-width", &width_px)
            .set("width", "100%")
    };
    let outer_style = InlineStyle::new().set("background-color", &tokens.background);
    let outer_cell = InlineStyle::new().set("padding", "20px 10px");

    format!(
        concat!(
            "{preheader}",
            "<!-- Email Container -->\n",
            r#"<table width="100%" cellpadding="0" cellspacing="0" border="0" class="email-body"{outer}>"#,
            "\n<tr>\n",
            r#"<td align="center"{outer_cell}>"#,
            "\n<!-- Email Content -->\n",
            r#"<table width="{width}" cellpadding="0" cellspacing="0" border="0" class="email-container email-content"{inner}>"#,
            "\n{rows}</table>\n</td>\n</tr>\n</table>\n"
        ),
        preheader = preheader_html(&doc.preheader),
        outer = outer_style.attr(),
        outer_cell = outer_cell.attr(),
        width = width,
        inner = inner_style.attr(),
        rows = render_rows(&doc.blocks, tokens, options.include_comments),
    )
}

fn head_styles(content_width: u32) -> String {
    format!(
        r#"<style type="text/css">
/* Reset styles */
body, table, td, p, a {{ -webkit-text-size-adjust: 100%; -ms-text-size-adjust: 100%; }}
table, td {{ mso-table-lspace: 0pt; mso-table-rspace: 0pt; }}
img {{ -ms-interpolation-mode: bicubic; border: 0; height: auto; line-height: 100%; outline: none; text-decoration: none; }}
body {{ height: 100% !important; margin: 0 !important; padding: 0 !important; width: 100% !important; }}
a[x-apple-data-detectors] {{ color: inherit !important; text-decoration: none !important; font-size: inherit !important; font-family: inherit !important; font-weight: inherit !important; line-height: inherit !important; }}

/* Mobile styles */
@media only screen and (max-width: {breakpoint}px) {{
  .email-container {{ width: 100% !important; max-width: 100% !important; min-width: 0 !important; }}
  .responsive-table {{ width: 100% !important; }}
  .mobile-padding {{ padding-left: 15px !important; padding-right: 15px !important; }}
  .mobile-stack {{ display: block !important; width: 100% !important; }}
}}

/* Dark mode styles */
@media (prefers-color-scheme: dark) {{
  .email-body {{ background-color: {bg} !important; }}
  .email-content {{ background-color: {surface} !important; }}
}}

/* Gmail */
[data-ogsc] .email-body {{ background-color: {bg} !important; }}
[data-ogsc] .email-content {{ background-color: {surface} !important; }}

/* Outlook.com */
[data-ogsb] .email-body {{ background-color: {bg} !important; }}
[data-ogsb] .email-content {{ background-color: {surface} !important; }}
</style>"#,
        breakpoint = content_width.saturating_add(MOBILE_BREAKPOINT_MARGIN),
        bg = DARK_BACKGROUND,
        surface = DARK_SURFACE,
    )
}

fn wrap_document(doc: &EmailDocument, tokens: &DesignTokens, body: &str) -> String {
    let title = if doc.subject.is_empty() {
        String::new()
    } else {
        format!("<title>{}</title>\n", doc.subject)
    };
    let body_style = InlineStyle::new()
        .set("margin", "0")
        .set("padding", "0")
        .set("background-color", &tokens.background);

    format!(
        r#"{doctype}
<html xmlns="http://www.w3.org/1999/xhtml" xmlns:v="urn:schemas-microsoft-com:vml" xmlns:o="urn:schemas-microsoft-com:office:office">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<meta http-equiv="X-UA-Compatible" content="IE=edge">
<meta name="x-apple-disable-message-reformatting">
<meta name="format-detection" content="telephone=no, date=no, address=no, email=no">
{title}<!--[if mso]>
<noscript>
<xml>
<o:OfficeDocumentSettings>
<o:PixelsPerInch>96</o:PixelsPerInch>
</o:OfficeDocumentSettings>
</xml>
</noscript>
<![endif]-->
{styles}
</head>
<body{body_style}>
{body}</body>
</html>"#,
        doctype = XHTML_DOCTYPE,
        title = title,
        styles = head_styles(doc.content_width()),
        body_style = body_style.attr(),
        body = body,
    )
}

fn newline_indent() -> &'static Regex {
    static NEWLINE_INDENT: OnceLock<Regex> = OnceLock::new();
    NEWLINE_INDENT.get_or_init(|| Regex::new(r"\n\s*").unwrap())
}

fn inter_tag_space() -> &'static Regex {
    static INTER_TAG: OnceLock<Regex> = OnceLock::new();
    INTER_TAG.get_or_init(|| Regex::new(r">\s+<").unwrap())
}

fn space_runs() -> &'static Regex {
    static SPACE_RUNS: OnceLock<Regex> = OnceLock::new();
    SPACE_RUNS.get_or_init(|| Regex::new(r"\s{2,}").unwrap())
}

/// Textual whitespace collapse. Not HTML-aware: content that depends on
/// significant whitespace (e.g. `<pre>`) is collapsed too.
pub fn minify_html(html: &str) -> String {
    let html = newline_indent().replace_all(html, "");
    let html = inter_tag_space().replace_all(&html, "><");
    let html = space_runs().replace_all(&html, " ");
    html.trim().to_string()
}
