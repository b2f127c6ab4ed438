//! Contract Invariant Tests
//!
//! These tests verify the non-negotiable guarantees.

use pretty_assertions::assert_eq;

use mailforge_core::{
    check_compatibility, contrast_ratio, dark_mode_tokens, render_email, resolve_tokens,
    document::{Alignment, ButtonBlock, FooterBlock, ImageBlock},
    hashing::canonical_json,
    Block, BrandKit, CheckStatus, EmailDocument, ExportOptions, ExportPipeline, RenderOptions,
    TemplateRegistry,
};

fn document(blocks: Vec<Block>) -> EmailDocument {
    let mut doc = EmailDocument::new("Invariant", Some("default".to_string()), None);
    doc.blocks = blocks;
    doc
}

fn buy_button() -> Block {
    Block::Button(ButtonBlock {
        id: "buy".to_string(),
        text: "Buy".to_string(),
        url: "https://x".to_string(),
        alignment: Alignment::Center,
        ..Default::default()
    })
}

fn image(id: &str, alt: &str) -> Block {
    Block::Image(ImageBlock {
        id: id.to_string(),
        src: format!("https://cdn.example.com/{}.png", id),
        alt: alt.to_string(),
        ..Default::default()
    })
}

#[test]
fn invariant_render_idempotent() {
    let pipeline = ExportPipeline::default();
    let kit = BrandKit::default();

    for template in TemplateRegistry::builtin().list() {
        let doc = pipeline.create_from_template(&template.id, "Idem", None).unwrap();
        for options in [
            RenderOptions::preview(),
            RenderOptions::export(),
            RenderOptions { dark_mode: true, include_comments: true, for_preview: false },
        ] {
            assert_eq!(render_email(&doc, &kit, &options), render_email(&doc, &kit, &options));
        }
    }
}

#[test]
fn invariant_dark_mode_overrides_neutrals_only() {
    let mut kit = BrandKit::default();
    kit.colors.primary = "#123456".to_string();
    kit.colors.secondary = "#654321".to_string();
    kit.colors.background = "#fefefe".to_string();
    kit.colors.text = "#000000".to_string();

    let light = resolve_tokens(&kit);
    let dark = dark_mode_tokens(&light);

    assert_eq!(
        (dark.background.as_str(), dark.surface.as_str(), dark.text.as_str(), dark.muted_text.as_str(), dark.border.as_str()),
        ("#1a1a1a", "#2d2d2d", "#ffffff", "#a0a0a0", "#404040")
    );
    assert_eq!(dark.primary, "#123456");
    assert_eq!(dark.secondary, "#654321");
}

#[test]
fn invariant_contrast_self_is_one_and_monotonic() {
    assert_eq!(contrast_ratio("#777777", "#777777"), 1.0);

    let background = "#ffffff";
    let ramp = ["#000000", "#333333", "#666666", "#999999", "#cccccc", "#ffffff"];
    let ratios: Vec<f64> = ramp.iter().map(|fg| contrast_ratio(fg, background)).collect();
    for pair in ratios.windows(2) {
        assert!(pair[0] > pair[1], "{:?}", ratios);
    }
}

#[test]
fn invariant_preview_and_export_width() {
    let mut doc = document(vec![buy_button()]);
    doc.content_width = Some(640);
    let kit = BrandKit::default();

    let preview = render_email(&doc, &kit, &RenderOptions::preview());
    assert!(preview.contains("width: 640px; min-width: 640px"));
    assert!(!preview.contains("<html"));

    let export = render_email(&doc, &kit, &RenderOptions::export());
    assert!(export.contains("max-width: 640px; width: 100%"));
    assert!(export.starts_with("<!DOCTYPE html PUBLIC \"-//W3C//DTD XHTML 1.0 Transitional//EN\""));
}

#[test]
fn invariant_checker_complete_on_empty_document() {
    let checks = check_compatibility(&document(vec![]), &BrandKit::default());
    let status = |id: &str| checks.iter().find(|c| c.id == id).map(|c| c.status);

    assert_eq!(checks.len(), 10);
    assert!(checks.iter().all(|c| c.id != "image-alt"));
    for id in ["header", "cta", "footer"] {
        assert_eq!(status(id), Some(CheckStatus::Warning), "{}", id);
    }
    for id in ["table-layout", "inline-styles", "font-stack", "width"] {
        assert_eq!(status(id), Some(CheckStatus::Pass), "{}", id);
    }
}

#[test]
fn invariant_button_block_isolation() {
    let kit = BrandKit::default();
    let tokens = resolve_tokens(&kit);
    let html = render_email(&document(vec![buy_button()]), &kit, &RenderOptions::preview());

    assert_eq!(html.matches(r#"<a href="https://x""#).count(), 1);
    assert_eq!(html.matches("<!--[if mso]>").count(), 1);
    assert_eq!(html.matches("<![endif]-->").count(), 1);
    assert!(html.contains(&format!("background-color: {}", tokens.primary)));
    assert!(html.contains("color: #ffffff"));
}

#[test]
fn invariant_unsubscribe_scenario() {
    let doc = document(vec![Block::Footer(FooterBlock {
        id: "footer".to_string(),
        content: "© 2025 Tu Empresa".to_string(),
        include_unsubscribe: true,
        ..Default::default()
    })]);
    let kit = BrandKit::default();

    let html = render_email(&doc, &kit, &RenderOptions::export());
    let anchor_start = html.find(r#"<a href="{{unsubscribe_url}}""#).unwrap();
    let anchor_end = anchor_start + html[anchor_start..].find("</a>").unwrap();
    assert!(html[anchor_start..anchor_end].ends_with(">Darse de baja"));

    let checks = check_compatibility(&doc, &kit);
    let unsubscribe = checks.iter().find(|c| c.id == "unsubscribe").unwrap();
    assert_eq!(unsubscribe.status, CheckStatus::Pass);
}

#[test]
fn invariant_alt_text_scenario() {
    let doc = document(vec![image("hero", "Producto"), image("banner", "")]);
    let checks = check_compatibility(&doc, &BrandKit::default());
    let alt = checks.iter().find(|c| c.id == "image-alt").unwrap();

    assert_eq!(alt.status, CheckStatus::Warning);
    assert_eq!(alt.message, "1/2 imágenes tienen alt text");
}

#[test]
fn invariant_unknown_blocks_never_break_rendering() {
    let json = r#"{
        "id": "d1",
        "name": "Mixed",
        "blocks": [
            {"type": "columns", "id": "c1", "columns": []},
            {"type": "spacer", "id": "s1", "height": 24},
            {"type": "carousel", "id": "x1"}
        ]
    }"#;
    let doc: EmailDocument = serde_json::from_str(json).unwrap();
    let html = render_email(&doc, &BrandKit::default(), &RenderOptions::export());

    assert!(html.contains("height: 24px"));
    assert!(html.ends_with("</html>"));
}

#[test]
fn invariant_unknown_blocks_keep_type_and_id_in_comments() {
    let json = r#"{"id": "d1", "name": "Mixed", "blocks": [{"type": "columns", "id": "c1", "columns": []}]}"#;
    let doc: EmailDocument = serde_json::from_str(json).unwrap();
    let options = RenderOptions { include_comments: true, ..RenderOptions::export() };
    let html = render_email(&doc, &BrandKit::default(), &options);

    assert!(html.contains("<td>\n<!-- Block: columns (c1) -->\n</td>"));
    assert!(!html.contains("(-)"));
}

#[test]
fn invariant_oversized_numbers_never_panic() {
    let mut doc = document(vec![Block::Button(ButtonBlock {
        id: "b".to_string(),
        text: "Go".to_string(),
        url: "https://x".to_string(),
        border_radius: Some(i32::MAX),
        ..Default::default()
    })]);
    doc.content_width = Some(u32::MAX);

    for options in [RenderOptions::preview(), RenderOptions::export()] {
        let html = render_email(&doc, &BrandKit::default(), &options);
        assert!(html.contains(r#"arcsize="50%""#));
    }
}

#[test]
fn invariant_export_runs_checks() {
    let pipeline = ExportPipeline::default();
    let doc = document(vec![image("a", "")]);
    let exported = pipeline.export(&doc, &BrandKit::default(), &ExportOptions::default()).unwrap();

    assert_eq!(exported.checks, check_compatibility(&doc, &BrandKit::default()));
    assert_eq!(exported.summary.pass + exported.summary.warning + exported.summary.fail, exported.checks.len());
}

#[cfg(feature = "test-hooks")]
#[test]
fn invariant_export_calls_check_exactly_once() {
    use mailforge_core::pipeline::{get_check_call_count, reset_check_call_count};

    let pipeline = ExportPipeline::default();
    let doc = document(vec![buy_button()]);

    reset_check_call_count();
    pipeline.export(&doc, &BrandKit::default(), &ExportOptions::default()).unwrap();
    assert_eq!(get_check_call_count(), 1);
}

#[test]
fn invariant_content_hash_stable() {
    let pipeline = ExportPipeline::default();
    let kit = BrandKit::default();
    let doc = document(vec![buy_button()]);

    let a = pipeline.export(&doc, &kit, &ExportOptions::default()).unwrap();
    let b = pipeline.export(&doc, &kit, &ExportOptions::default()).unwrap();
    assert_eq!(a.content_hash, b.content_hash);
    assert_eq!(a.html_hash, b.html_hash);
}

#[test]
fn invariant_canonical_json_deterministic() {
    use serde_json::json;

    let obj1 = json!({"z": 1, "a": 2, "m": {"b": 1, "a": 2}});
    let obj2 = json!({"a": 2, "m": {"a": 2, "b": 1}, "z": 1});

    assert_eq!(canonical_json(&obj1).unwrap(), canonical_json(&obj2).unwrap());
}
