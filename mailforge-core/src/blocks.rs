//! Block Renderers - One nested-table fragment per block kind
//!
//! Every fragment is a self-contained `<table>` with inline styles only.
//! Optional fields fall back to token or per-block defaults; zero-valued
//! numeric overrides count as unset.
//!
//! Buttons carry two paths: an MSO-only VML `roundrect` followed by the
//! standard anchor, which sits outside the VML shape and is hidden from
//! Outlook with `mso-hide: all`.

use crate::document::{
    Alignment, Block, ButtonBlock, CardBlock, DividerBlock, FooterBlock, HeaderBlock, HeroBlock, IconStyle,
    ImageBlock, SocialBlock, SpacerBlock, TextBlock,
};
use crate::style::{escape_attr, px, InlineStyle};
use crate::tokens::DesignTokens;

/// Left for the ESP to substitute at send time.
pub const UNSUBSCRIBE_PLACEHOLDER: &str = "{{unsubscribe_url}}";
pub const UNSUBSCRIBE_LABEL: &str = "Darse de baja";

pub const DEFAULT_HEADER_PADDING: i32 = 20;
pub const DEFAULT_IMAGE_WIDTH: i32 = 560;
pub const DEFAULT_BUTTON_RADIUS: i32 = 4;
pub const DEFAULT_DIVIDER_THICKNESS: i32 = 1;
const BUTTON_HEIGHT: i32 = 44;
const WHITE: &str = "#ffffff";
const CONTENT_PADDING: &str = "20px 30px";
const TABLE_ATTRS: &str = r#"cellpadding="0" cellspacing="0" border="0""#;

pub trait RenderBlock {
    fn render(&self, tokens: &DesignTokens) -> String;
}

/// Dispatch on the block kind. `Unsupported` renders to an empty string.
pub fn render_block(block: &Block, tokens: &DesignTokens) -> String {
    match block {
        Block::Header(b) => b.render(tokens),
        Block::Hero(b) => b.render(tokens),
        Block::Text(b) => b.render(tokens),
        Block::Image(b) => b.render(tokens),
        Block::Button(b) => b.render(tokens),
        Block::Divider(b) => b.render(tokens),
        Block::Spacer(b) => b.render(tokens),
        Block::Card(b) => b.render(tokens),
        Block::Footer(b) => b.render(tokens),
        Block::Social(b) => b.render(tokens),
        Block::Unsupported(b) => {
            tracing::warn!(kind = %b.kind, id = ?b.id, "skipping unsupported block");
            String::new()
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn color_or<'a>(value: &'a Option<String>, fallback: &'a str) -> &'a str {
    non_empty(value).unwrap_or(fallback)
}

fn nonzero_or(value: Option<i32>, fallback: i32) -> i32 {
    value.filter(|v| *v != 0).unwrap_or(fallback)
}

fn table(style: &InlineStyle, rows: &str) -> String {
    format!(
        "<table width=\"100%\" {}{}>\n{}</table>\n",
        TABLE_ATTRS,
        style.attr(),
        rows
    )
}

fn row(cell_style: &InlineStyle, content: &str) -> String {
    format!("<tr>\n<td{}>\n{}\n</td>\n</tr>\n", cell_style.attr(), content)
}

/// The common full-width, single-cell wrapper.
fn single_cell(table_style: InlineStyle, cell_style: InlineStyle, content: &str) -> String {
    table(&table_style, &row(&cell_style, content))
}

fn padded_cell(alignment: Option<&str>) -> InlineStyle {
    InlineStyle::new()
        .set("padding", CONTENT_PADDING)
        .set_opt("text-align", alignment)
}

impl RenderBlock for HeaderBlock {
    fn render(&self, tokens: &DesignTokens) -> String {
        let logo = non_empty(&self.logo_url);
        let mut content = String::new();

        if let Some(src) = logo {
            let style = InlineStyle::new()
                .set("max-width", "180px")
                .set("height", "auto")
                .set("display", "inline-block");
            content.push_str(&format!(
                r#"<img src="{}" alt="Logo"{} />"#,
                escape_attr(src),
                style.attr()
            ));
        }

        if let Some(tagline) = non_empty(&self.tagline) {
            let style = InlineStyle::new()
                .set("margin", if logo.is_some() { "10px 0 0 0" } else { "0" })
                .set("font-family", &tokens.font_stack)
                .set("font-size", "14px")
                .set("color", &tokens.muted_text);
            content.push_str(&format!("<p{}>{}</p>", style.attr(), tagline));
        }

        single_cell(
            InlineStyle::new().set("background-color", color_or(&self.background_color, &tokens.background)),
            InlineStyle::new()
                .set("padding", px(nonzero_or(self.padding, DEFAULT_HEADER_PADDING)))
                .set("text-align", self.alignment.as_str()),
            &content,
        )
    }
}

impl RenderBlock for HeroBlock {
    fn render(&self, tokens: &DesignTokens) -> String {
        let text_color = color_or(&self.text_color, WHITE);

        let heading = InlineStyle::new()
            .set("margin", "0 0 10px 0")
            .set("font-family", &tokens.font_stack)
            .set("font-size", "28px")
            .set("font-weight", "bold")
            .set("color", text_color)
            .set("line-height", "1.3");
        let mut content = format!("<h1{}>{}</h1>", heading.attr(), self.title);

        if let Some(subtitle) = non_empty(&self.subtitle) {
            let style = InlineStyle::new()
                .set("margin", "0")
                .set("font-family", &tokens.font_stack)
                .set("font-size", "16px")
                .set("color", text_color)
                .set("opacity", "0.9")
                .set("line-height", "1.5");
            content.push_str(&format!("\n<p{}>{}</p>", style.attr(), subtitle));
        }

        single_cell(
            InlineStyle::new().set("background-color", color_or(&self.background_color, &tokens.primary)),
            InlineStyle::new()
                .set("padding", "40px 30px")
                .set("text-align", self.alignment.as_str()),
            &content,
        )
    }
}

impl RenderBlock for TextBlock {
    fn render(&self, tokens: &DesignTokens) -> String {
        let cell = padded_cell(None)
            .set("font-family", &tokens.font_stack)
            .set("font-size", "16px")
            .set("line-height", "1.6")
            .set("color", &tokens.text)
            .set("text-align", self.alignment.as_str());
        single_cell(InlineStyle::new(), cell, &self.content)
    }
}

impl RenderBlock for ImageBlock {
    fn render(&self, _tokens: &DesignTokens) -> String {
        let width = nonzero_or(self.width, DEFAULT_IMAGE_WIDTH);
        let margin = match self.alignment {
            Alignment::Left => "",
            Alignment::Center => "0 auto",
            Alignment::Right => "0 0 0 auto",
        };
        let style = InlineStyle::new()
            .set("max-width", "100%")
            .set("height", "auto")
            .set("display", "block")
            .set("border", "0")
            .set("margin", margin);
        let img = format!(
            r#"<img src="{}" alt="{}" width="{}"{} />"#,
            escape_attr(&self.src),
            escape_attr(&self.alt),
            width,
            style.attr()
        );

        let content = match non_empty(&self.link) {
            Some(link) => format!(r#"<a href="{}" target="_blank">{}</a>"#, escape_attr(link), img),
            None => img,
        };

        single_cell(InlineStyle::new(), padded_cell(Some(self.alignment.as_str())), &content)
    }
}

impl RenderBlock for ButtonBlock {
    fn render(&self, tokens: &DesignTokens) -> String {
        let background = color_or(&self.background_color, &tokens.primary);
        let text_color = color_or(&self.text_color, WHITE);
        let radius = nonzero_or(self.border_radius, DEFAULT_BUTTON_RADIUS);
        let url = escape_attr(&self.url);

        // Outlook ignores padding and radius on anchors; it gets a VML shape instead.
        let arcsize = (i64::from(radius.max(0)) * 100 / i64::from(BUTTON_HEIGHT)).min(50);
        let vml_width = if self.full_width { "100%" } else { "200px" };
        let vml_label = InlineStyle::new()
            .set("color", text_color)
            .set("font-family", &tokens.font_stack)
            .set("font-size", "16px")
            .set("font-weight", "bold");
        let vml = format!(
            concat!(
                "<!--[if mso]>\n",
                r#"<v:roundrect xmlns:v="urn:schemas-microsoft-com:vml" xmlns:w="urn:schemas-microsoft-com:office:word" href="{url}" style="height:{height}px;v-text-anchor:middle;width:{width};" arcsize="{arcsize}%" stroke="f" fillcolor="{fill}">"#,
                "\n<w:anchorlock/>\n<center{label}>{text}</center>\n</v:roundrect>\n<![endif]-->"
            ),
            url = url,
            height = BUTTON_HEIGHT,
            width = vml_width,
            arcsize = arcsize,
            fill = escape_attr(background),
            label = vml_label.attr(),
            text = self.text,
        );

        let anchor_style = InlineStyle::new()
            .set("display", if self.full_width { "block" } else { "inline-block" })
            .set("width", if self.full_width { "100%" } else { "auto" })
            .set("padding", "12px 30px")
            .set("font-family", &tokens.font_stack)
            .set("font-size", "16px")
            .set("font-weight", "bold")
            .set("color", text_color)
            .set("background-color", background)
            .set("text-decoration", "none")
            .set("text-align", "center")
            .set("border-radius", px(radius))
            .set("mso-hide", "all");
        let anchor = format!(
            r#"<a href="{}" target="_blank"{}>{}</a>"#,
            url,
            anchor_style.attr(),
            self.text
        );

        single_cell(
            InlineStyle::new(),
            padded_cell(Some(self.alignment.as_str())),
            &format!("{}\n{}", vml, anchor),
        )
    }
}

impl RenderBlock for DividerBlock {
    fn render(&self, tokens: &DesignTokens) -> String {
        let thickness = nonzero_or(self.thickness, DEFAULT_DIVIDER_THICKNESS);
        let rule = InlineStyle::new().set(
            "border-top",
            format!(
                "{} {} {}",
                px(thickness),
                self.style.as_str(),
                color_or(&self.color, &tokens.border)
            ),
        );
        single_cell(
            InlineStyle::new(),
            padded_cell(None),
            &format!("<div{}></div>", rule.attr()),
        )
    }
}

impl RenderBlock for SpacerBlock {
    fn render(&self, _tokens: &DesignTokens) -> String {
        // 1px font and line height stop clients from growing the empty cell.
        let cell = InlineStyle::new()
            .set("height", px(self.height))
            .set("font-size", "1px")
            .set("line-height", "1px");
        single_cell(InlineStyle::new(), cell, "&nbsp;")
    }
}

impl RenderBlock for CardBlock {
    fn render(&self, tokens: &DesignTokens) -> String {
        let card_style = InlineStyle::new()
            .set("background-color", color_or(&self.background_color, &tokens.surface))
            .set("border", format!("1px solid {}", color_or(&self.border_color, &tokens.border)))
            .set("border-radius", "8px");

        let mut rows = String::new();
        if let Some(src) = non_empty(&self.image_url) {
            let img_style = InlineStyle::new()
                .set("display", "block")
                .set("width", "100%")
                .set("height", "auto")
                .set("border-radius", "8px 8px 0 0");
            rows.push_str(&row(
                &InlineStyle::new(),
                &format!(
                    r#"<img src="{}" alt="" width="100%"{} />"#,
                    escape_attr(src),
                    img_style.attr()
                ),
            ));
        }

        let mut body = String::new();
        if let Some(title) = non_empty(&self.title) {
            let style = InlineStyle::new()
                .set("margin", "0 0 10px 0")
                .set("font-family", &tokens.font_stack)
                .set("font-size", "18px")
                .set("font-weight", "bold")
                .set("color", &tokens.text);
            body.push_str(&format!("<h3{}>{}</h3>\n", style.attr(), title));
        }

        let text_style = InlineStyle::new()
            .set("margin", "0")
            .set("font-family", &tokens.font_stack)
            .set("font-size", "14px")
            .set("line-height", "1.5")
            .set("color", &tokens.muted_text);
        body.push_str(&format!("<p{}>{}</p>", text_style.attr(), self.content));

        if let (Some(text), Some(url)) = (non_empty(&self.cta_text), non_empty(&self.cta_url)) {
            let link_style = InlineStyle::new()
                .set("font-family", &tokens.font_stack)
                .set("font-size", "14px")
                .set("font-weight", "bold")
                .set("color", &tokens.primary)
                .set("text-decoration", "underline");
            body.push_str(&format!(
                r#"
<p{}><a href="{}"{}>{}</a></p>"#,
                InlineStyle::new().set("margin", "15px 0 0 0").attr(),
                escape_attr(url),
                link_style.attr(),
                text
            ));
        }
        rows.push_str(&row(&InlineStyle::new().set("padding", "20px"), &body));

        single_cell(InlineStyle::new(), padded_cell(None), &table(&card_style, &rows))
    }
}

impl RenderBlock for FooterBlock {
    fn render(&self, tokens: &DesignTokens) -> String {
        let text_color = color_or(&self.text_color, &tokens.muted_text);

        let text_style = InlineStyle::new()
            .set("margin", "0")
            .set("font-family", &tokens.font_stack)
            .set("font-size", "12px")
            .set("line-height", "1.5")
            .set("color", text_color);
        let mut content = format!("<p{}>{}</p>", text_style.attr(), self.content);

        if self.include_unsubscribe {
            let p_style = InlineStyle::new()
                .set("margin", "15px 0 0 0")
                .set("font-family", &tokens.font_stack)
                .set("font-size", "12px")
                .set("color", text_color);
            let link_style = InlineStyle::new()
                .set("color", text_color)
                .set("text-decoration", "underline");
            content.push_str(&format!(
                r#"
<p{}><a href="{}"{}>{}</a></p>"#,
                p_style.attr(),
                UNSUBSCRIBE_PLACEHOLDER,
                link_style.attr(),
                UNSUBSCRIBE_LABEL
            ));
        }

        single_cell(
            InlineStyle::new().set("background-color", color_or(&self.background_color, &tokens.surface)),
            InlineStyle::new().set("padding", "30px").set("text-align", "center"),
            &content,
        )
    }
}

impl RenderBlock for SocialBlock {
    fn render(&self, tokens: &DesignTokens) -> String {
        let mut icons = String::new();
        for network in &self.networks {
            let color = match self.icon_style {
                IconStyle::Color => network.platform.brand_color(),
                IconStyle::Mono | IconStyle::Outline => tokens.muted_text.as_str(),
            };
            let name = network.platform.as_str();
            let initial = name[..1].to_uppercase();

            let link_style = InlineStyle::new()
                .set("display", "inline-block")
                .set("width", "32px")
                .set("height", "32px")
                .set("background-color", color)
                .set("border-radius", "50%")
                .set("text-decoration", "none");
            let img_style = InlineStyle::new()
                .set("display", "block")
                .set("border-radius", "50%");
            let icon = format!(
                r#"<a href="{}" target="_blank"{}><img src="https://placehold.co/32x32/{}/fff?text={}" alt="{}" width="32" height="32"{} /></a>"#,
                escape_attr(&network.url),
                link_style.attr(),
                escape_attr(color.trim_start_matches('#')),
                initial,
                name,
                img_style.attr()
            );
            icons.push_str(&format!(
                "<td{}>{}</td>\n",
                InlineStyle::new().set("padding", "0 8px").attr(),
                icon
            ));
        }

        let strip = format!(
            "<table {}{}>\n<tr>\n{}</tr>\n</table>",
            TABLE_ATTRS,
            InlineStyle::new().set("display", "inline-block").attr(),
            icons
        );
        single_cell(InlineStyle::new(), padded_cell(Some(self.alignment.as_str())), &strip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{DividerStyle, SocialLink, SocialPlatform, UnsupportedBlock};

    fn tokens() -> DesignTokens {
        DesignTokens::default()
    }

    #[test]
    fn test_unsupported_renders_empty() {
        let columns = Block::Unsupported(UnsupportedBlock::new("columns", Some("c1".into())));
        assert_eq!(render_block(&columns, &tokens()), "");
    }

    #[test]
    fn test_every_fragment_is_a_borderless_table() {
        let blocks = vec![
            Block::Header(HeaderBlock { id: "1".into(), ..Default::default() }),
            Block::Hero(HeroBlock { id: "2".into(), title: "Hi".into(), ..Default::default() }),
            Block::Text(TextBlock { id: "3".into(), content: "<p>x</p>".into(), ..Default::default() }),
            Block::Spacer(SpacerBlock { id: "4".into(), height: 20 }),
            Block::Footer(FooterBlock { id: "5".into(), content: "c".into(), ..Default::default() }),
        ];
        for block in &blocks {
            let html = render_block(block, &tokens());
            assert!(html.starts_with(r#"<table width="100%" cellpadding="0" cellspacing="0" border="0""#), "{}", html);
            assert!(!html.contains(": ;"), "{}", html);
            assert!(!html.contains("style=\"\""), "{}", html);
        }
    }

    #[test]
    fn test_header_defaults() {
        let header = HeaderBlock {
            id: "h".into(),
            tagline: Some("Weekly".into()),
            alignment: Alignment::Center,
            ..Default::default()
        };
        let html = header.render(&tokens());
        assert!(html.contains("background-color: #ffffff"));
        assert!(html.contains("padding: 20px; text-align: center"));
        assert!(html.contains("margin: 0; font-family"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_header_logo_shifts_tagline() {
        let header = HeaderBlock {
            id: "h".into(),
            logo_url: Some("data:image/png;base64,AAAA".into()),
            tagline: Some("Weekly".into()),
            padding: Some(30),
            ..Default::default()
        };
        let html = header.render(&tokens());
        assert!(html.contains(r#"<img src="data:image/png;base64,AAAA" alt="Logo""#));
        assert!(html.contains("margin: 10px 0 0 0"));
        assert!(html.contains("padding: 30px"));
    }

    #[test]
    fn test_hero_uses_primary_and_white() {
        let hero = HeroBlock {
            id: "h".into(),
            title: "Big news".into(),
            subtitle: Some("Details".into()),
            ..Default::default()
        };
        let html = hero.render(&tokens());
        assert!(html.contains("background-color: #2563eb"));
        assert!(html.contains("color: #ffffff"));
        assert!(html.contains(">Big news</h1>"));
        assert!(html.contains(">Details</p>"));
    }

    #[test]
    fn test_text_content_is_verbatim() {
        let text = TextBlock {
            id: "t".into(),
            content: "<p>Hola <strong>{{nombre}}</strong></p>".into(),
            alignment: Alignment::Right,
        };
        let html = text.render(&tokens());
        assert!(html.contains("<p>Hola <strong>{{nombre}}</strong></p>"));
        assert!(html.contains("text-align: right"));
    }

    #[test]
    fn test_image_default_width_and_link() {
        let image = ImageBlock {
            id: "i".into(),
            src: "https://cdn/x.png".into(),
            alt: "Product".into(),
            link: Some("https://shop".into()),
            alignment: Alignment::Center,
            ..Default::default()
        };
        let html = image.render(&tokens());
        assert!(html.contains(r#"width="560""#));
        assert!(html.contains(r#"<a href="https://shop" target="_blank"><img src="https://cdn/x.png" alt="Product""#));
        assert!(html.contains("margin: 0 auto"));

        let plain = ImageBlock { link: None, width: Some(300), ..image };
        let html = plain.render(&tokens());
        assert!(html.contains(r#"width="300""#));
        assert!(!html.contains("<a "));
    }

    #[test]
    fn test_button_dual_path() {
        let button = ButtonBlock {
            id: "b".into(),
            text: "Buy".into(),
            url: "https://x".into(),
            alignment: Alignment::Center,
            ..Default::default()
        };
        let html = button.render(&tokens());
        assert_eq!(html.matches(r#"<a href="https://x""#).count(), 1);
        assert_eq!(html.matches("<!--[if mso]>").count(), 1);
        assert_eq!(html.matches("<![endif]-->").count(), 1);
        assert_eq!(html.matches("<v:roundrect").count(), 1);
        assert!(html.contains(r##"fillcolor="#2563eb""##));
        assert!(html.contains("background-color: #2563eb"));
        assert!(html.contains("color: #ffffff"));
        assert!(html.contains("border-radius: 4px"));
        assert!(html.contains("mso-hide: all"));
        assert!(html.contains(">Buy</center>"));
        assert!(html.contains(">Buy</a>"));
    }

    #[test]
    fn test_button_overrides() {
        let button = ButtonBlock {
            id: "b".into(),
            text: "Go".into(),
            url: "{{cta_url}}".into(),
            background_color: Some("#000000".into()),
            text_color: Some("#ffcc00".into()),
            full_width: true,
            border_radius: Some(8),
            ..Default::default()
        };
        let html = button.render(&tokens());
        assert!(html.contains(r#"href="{{cta_url}}""#));
        assert!(html.contains("background-color: #000000"));
        assert!(html.contains("color: #ffcc00"));
        assert!(html.contains("display: block; width: 100%"));
        assert!(html.contains("border-radius: 8px"));
        assert!(html.contains(r#"arcsize="18%""#));
    }

    #[test]
    fn test_button_huge_radius_caps_arcsize() {
        let button = ButtonBlock {
            id: "b".into(),
            text: "Go".into(),
            url: "#".into(),
            border_radius: Some(30_000_000),
            ..Default::default()
        };
        let html = button.render(&tokens());
        assert!(html.contains(r#"arcsize="50%""#));
        assert!(html.contains("border-radius: 30000000px"));
    }

    #[test]
    fn test_divider() {
        let divider = DividerBlock {
            id: "d".into(),
            style: DividerStyle::Dashed,
            thickness: Some(2),
            color: None,
        };
        assert!(divider.render(&tokens()).contains("border-top: 2px dashed #e2e8f0"));
    }

    #[test]
    fn test_spacer_collapse_guard() {
        let html = SpacerBlock { id: "s".into(), height: 24 }.render(&tokens());
        assert!(html.contains("height: 24px; font-size: 1px; line-height: 1px"));
        assert!(html.contains("&nbsp;"));
    }

    #[test]
    fn test_spacer_negative_height_passes_through() {
        let html = SpacerBlock { id: "s".into(), height: -5 }.render(&tokens());
        assert!(html.contains("height: -5px"));
    }

    #[test]
    fn test_card_optional_parts() {
        let card = CardBlock {
            id: "c".into(),
            content: "Body".into(),
            ..Default::default()
        };
        let html = card.render(&tokens());
        assert!(html.contains("background-color: #f8fafc; border: 1px solid #e2e8f0; border-radius: 8px"));
        assert!(!html.contains("<img"));
        assert!(!html.contains("<h3"));
        assert!(!html.contains("<a "));

        let full = CardBlock {
            title: Some("Article".into()),
            image_url: Some("https://cdn/a.png".into()),
            cta_text: Some("Read".into()),
            cta_url: Some("https://blog".into()),
            ..card
        };
        let html = full.render(&tokens());
        assert!(html.contains(">Article</h3>"));
        assert!(html.contains(r#"<img src="https://cdn/a.png" alt="""#));
        assert!(html.contains(r#"<a href="https://blog""#));
        assert!(html.contains(">Read</a>"));
    }

    #[test]
    fn test_card_cta_needs_text_and_url() {
        let card = CardBlock {
            id: "c".into(),
            content: "Body".into(),
            cta_text: Some("Read".into()),
            ..Default::default()
        };
        assert!(!card.render(&tokens()).contains("<a "));
    }

    #[test]
    fn test_footer_unsubscribe() {
        let footer = FooterBlock {
            id: "f".into(),
            content: "© 2025".into(),
            include_unsubscribe: true,
            ..Default::default()
        };
        let html = footer.render(&tokens());
        assert!(html.contains(r#"<a href="{{unsubscribe_url}}""#));
        assert!(html.contains(">Darse de baja</a>"));
        assert!(html.contains("color: #64748b"));

        let without = FooterBlock { include_unsubscribe: false, ..footer };
        assert!(!without.render(&tokens()).contains("{{unsubscribe_url}}"));
    }

    #[test]
    fn test_social_icon_colors() {
        let social = SocialBlock {
            id: "s".into(),
            networks: vec![
                SocialLink { platform: SocialPlatform::Facebook, url: "https://fb".into() },
                SocialLink { platform: SocialPlatform::Youtube, url: "https://yt".into() },
            ],
            alignment: Alignment::Center,
            icon_style: IconStyle::Color,
        };
        let html = social.render(&tokens());
        assert!(html.contains("background-color: #1877F2"));
        assert!(html.contains("background-color: #FF0000"));
        assert!(html.contains("placehold.co/32x32/1877F2/fff?text=F"));
        assert!(html.contains(r#"alt="youtube""#));
        assert_eq!(html.matches("<td style=\"padding: 0 8px\">").count(), 2);

        let mono = SocialBlock { icon_style: IconStyle::Mono, ..social };
        let html = mono.render(&tokens());
        assert!(!html.contains("#1877F2"));
        assert_eq!(html.matches("background-color: #64748b").count(), 2);
    }
}
