//! Template System - Starter documents
//!
//! Templates are block lists plus default send metadata. Documents copy
//! a template's blocks under fresh ids; the template itself is never
//! mutated through a document.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use uuid::Uuid;

use crate::document::{
    Alignment, Block, ButtonBlock, CardBlock, DividerBlock, DividerStyle, FooterBlock,
    HeaderBlock, HeroBlock, IconStyle, SocialBlock, SocialLink, SocialPlatform, SpacerBlock,
    TextBlock,
};

pub type TemplateId = String;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDefinition {
    pub id: TemplateId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category: TemplateCategory,
    /// Thumbnail URL; empty for the built-ins.
    #[serde(default)]
    pub preview: String,
    #[serde(default)]
    pub blocks: Vec<Block>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_preheader: Option<String>,
    #[serde(default = "default_engine_min_version")]
    pub engine_min_version: String,
}

fn default_engine_min_version() -> String {
    crate::MIN_TEMPLATE_VERSION.to_string()
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TemplateCategory {
    Newsletter,
    Announcement,
    Event,
    Promotional,
}

/// Copy blocks with freshly issued ids. Content is otherwise untouched.
pub fn clone_template_blocks(blocks: &[Block]) -> Vec<Block> {
    blocks
        .iter()
        .map(|block| {
            let mut block = block.clone();
            block.set_id(Uuid::new_v4().to_string());
            block
        })
        .collect()
}

/// Template registry - built-ins plus anything loaded from disk.
/// Listing keeps registration order.
pub struct TemplateRegistry {
    templates: Vec<TemplateDefinition>,
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self { templates: Vec::new() }
    }

    /// Registry holding the newsletter, announcement and event templates.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(newsletter());
        registry.register(announcement());
        registry.register(event());
        registry
    }

    /// Built-ins plus every `*.json` template in `dir`. Files that fail to
    /// read or parse are skipped with a warning.
    pub fn load_from_dir(dir: &Path) -> Result<Self, std::io::Error> {
        let mut registry = Self::builtin();
        if dir.exists() {
            for entry in fs::read_dir(dir)? {
                let entry = entry?;
                let path = entry.path();
                if path.extension().map_or(false, |e| e == "json") {
                    let content = match fs::read_to_string(&path) {
                        Ok(content) => content,
                        Err(err) => {
                            tracing::warn!(?err, ?path, "skipping unreadable template");
                            continue;
                        }
                    };
                    match serde_json::from_str::<TemplateDefinition>(&content) {
                        Ok(template) => {
                            tracing::debug!(id = %template.id, ?path, "loaded template");
                            registry.register(template);
                        }
                        Err(err) => tracing::warn!(?err, ?path, "skipping invalid template"),
                    }
                }
            }
        }
        Ok(registry)
    }

    pub fn get(&self, id: &str) -> Option<&TemplateDefinition> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn list(&self) -> Vec<&TemplateDefinition> {
        self.templates.iter().collect()
    }

    /// Add a template, replacing any existing one with the same id in place.
    pub fn register(&mut self, template: TemplateDefinition) {
        match self.templates.iter_mut().find(|t| t.id == template.id) {
            Some(existing) => *existing = template,
            None => self.templates.push(template),
        }
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

// --- Built-in Templates ---

fn numbered(prefix: &str, mut blocks: Vec<Block>) -> Vec<Block> {
    for (i, block) in blocks.iter_mut().enumerate() {
        block.set_id(format!("{}-{:02}", prefix, i + 1));
    }
    blocks
}

fn header(tagline: Option<&str>, padding: i32) -> Block {
    Block::Header(HeaderBlock {
        tagline: tagline.map(str::to_string),
        alignment: Alignment::Center,
        padding: Some(padding),
        ..Default::default()
    })
}

fn hero(title: &str, subtitle: &str) -> Block {
    Block::Hero(HeroBlock {
        title: title.to_string(),
        subtitle: Some(subtitle.to_string()),
        alignment: Alignment::Center,
        ..Default::default()
    })
}

fn text(content: &str, alignment: Alignment) -> Block {
    Block::Text(TextBlock { content: content.to_string(), alignment, ..Default::default() })
}

fn spacer(height: i32) -> Block {
    Block::Spacer(SpacerBlock { height, ..Default::default() })
}

fn divider() -> Block {
    Block::Divider(DividerBlock {
        style: DividerStyle::Solid,
        thickness: Some(1),
        ..Default::default()
    })
}

fn button(label: &str, url: &str, alignment: Alignment, radius: i32) -> Block {
    Block::Button(ButtonBlock {
        text: label.to_string(),
        url: url.to_string(),
        alignment,
        border_radius: Some(radius),
        ..Default::default()
    })
}

fn card(title: &str, content: &str, cta: Option<(&str, &str)>) -> Block {
    Block::Card(CardBlock {
        title: Some(title.to_string()),
        content: content.to_string(),
        cta_text: cta.map(|(label, _)| label.to_string()),
        cta_url: cta.map(|(_, url)| url.to_string()),
        ..Default::default()
    })
}

fn social(platforms: &[SocialPlatform]) -> Block {
    Block::Social(SocialBlock {
        networks: platforms
            .iter()
            .map(|&platform| SocialLink { platform, url: "#".to_string() })
            .collect(),
        alignment: Alignment::Center,
        icon_style: IconStyle::Color,
        ..Default::default()
    })
}

fn footer(content: &str) -> Block {
    Block::Footer(FooterBlock {
        content: content.to_string(),
        include_unsubscribe: true,
        ..Default::default()
    })
}

fn newsletter() -> TemplateDefinition {
    let blocks = vec![
        header(Some("Tu newsletter semanal"), 30),
        hero(
            "Título Principal del Newsletter",
            "Una breve descripción de lo que encontrarás en esta edición.",
        ),
        spacer(20),
        text(
            "<p>Hola <strong>{{nombre}}</strong>,</p><p>Bienvenido a nuestra edición de esta semana. Hemos preparado contenido especial para ti.</p>",
            Alignment::Left,
        ),
        divider(),
        text(
            r#"<h2 style="margin: 0 0 10px 0; font-size: 20px;">📌 Destacado de la semana</h2><p>Lorem ipsum dolor sit amet, consectetur adipiscing elit. Sed do eiusmod tempor incididunt ut labore et dolore magna aliqua.</p>"#,
            Alignment::Left,
        ),
        button("Leer más", "{{cta_url}}", Alignment::Left, 6),
        spacer(30),
        text(
            r#"<h2 style="margin: 0 0 15px 0; font-size: 20px;">📚 Más contenido</h2>"#,
            Alignment::Left,
        ),
        card(
            "Artículo 1",
            "Breve descripción del primer artículo o noticia destacada de la semana.",
            Some(("Ver artículo →", "#")),
        ),
        card(
            "Artículo 2",
            "Breve descripción del segundo artículo o recurso importante.",
            Some(("Ver artículo →", "#")),
        ),
        spacer(20),
        divider(),
        social(&[SocialPlatform::Twitter, SocialPlatform::Linkedin, SocialPlatform::Instagram]),
        footer("© 2025 Tu Empresa. Todos los derechos reservados.<br/>Dirección: Calle Example 123, Ciudad"),
    ];

    TemplateDefinition {
        id: "newsletter".to_string(),
        name: "Newsletter".to_string(),
        description: "Newsletter limpio y profesional con secciones de contenido destacado y tarjetas."
            .to_string(),
        category: TemplateCategory::Newsletter,
        preview: String::new(),
        blocks: numbered("newsletter", blocks),
        default_subject: Some("Tu newsletter semanal".to_string()),
        default_preheader: Some("Las últimas novedades y contenido destacado de esta semana".to_string()),
        engine_min_version: default_engine_min_version(),
    }
}

fn announcement() -> TemplateDefinition {
    let blocks = vec![
        header(None, 25),
        hero("🎉 ¡Gran Anuncio!", "Tenemos noticias emocionantes que compartir contigo."),
        spacer(30),
        text(
            r#"<p style="font-size: 18px; text-align: center;">Estamos emocionados de presentarte nuestras últimas novedades.</p>"#,
            Alignment::Center,
        ),
        spacer(20),
        card(
            "✨ Nueva Funcionalidad",
            "Descripción de la primera característica o producto nuevo que estás anunciando. Destaca los beneficios principales.",
            None,
        ),
        card(
            "🚀 Mejoras de Rendimiento",
            "Descripción de mejoras o actualizaciones. Explica cómo beneficia esto a tus usuarios.",
            None,
        ),
        card(
            "🎁 Oferta Especial",
            "Si hay una promoción asociada al anuncio, descríbela aquí con todos los detalles importantes.",
            Some(("Aprovechar oferta", "#")),
        ),
        spacer(30),
        button("Explorar Ahora", "{{cta_url}}", Alignment::Center, 8),
        spacer(30),
        text(
            r#"<p style="text-align: center; color: #666;">¿Tienes preguntas? Responde a este correo o visita nuestro centro de ayuda.</p>"#,
            Alignment::Center,
        ),
        divider(),
        footer("© 2025 Tu Empresa<br/>Este email fue enviado a {{email}}"),
    ];

    TemplateDefinition {
        id: "announcement".to_string(),
        name: "Anuncio".to_string(),
        description: "Perfecto para anuncios de productos, lanzamientos o actualizaciones importantes."
            .to_string(),
        category: TemplateCategory::Announcement,
        preview: String::new(),
        blocks: numbered("announcement", blocks),
        default_subject: Some("🎉 ¡Gran anuncio!".to_string()),
        default_preheader: Some("Tenemos noticias emocionantes que compartir contigo".to_string()),
        engine_min_version: default_engine_min_version(),
    }
}

const EVENT_DETAILS: &str = r#"<div style="text-align: center; padding: 20px; background-color: #f8fafc; border-radius: 8px;">
<p style="margin: 0 0 15px 0; font-size: 14px; color: #64748b; text-transform: uppercase; letter-spacing: 1px;">Detalles del evento</p>
<p style="margin: 0 0 10px 0; font-size: 18px; font-weight: bold;">📅 Jueves, 15 de Febrero 2025</p>
<p style="margin: 0 0 10px 0; font-size: 18px;">🕐 10:00 AM - 11:30 AM (GMT-5)</p>
<p style="margin: 0; font-size: 18px;">💻 Online via Zoom</p>
</div>"#;

const EVENT_AGENDA: &str = r#"<h3 style="margin: 0 0 15px 0;">¿Qué aprenderás?</h3>
<ul style="margin: 0; padding-left: 20px; line-height: 1.8;">
<li>Estrategias probadas para mejorar tu productividad</li>
<li>Herramientas y recursos exclusivos</li>
<li>Sesión de preguntas y respuestas en vivo</li>
<li>Material descargable para asistentes</li>
</ul>"#;

const EVENT_SPEAKERS: &str = r#"<h3 style="margin: 0 0 15px 0; text-align: center;">Speakers</h3>
<table width="100%" cellpadding="10" cellspacing="0" border="0">
<tr>
<td width="50%" valign="top" style="text-align: center;">
<div style="width: 80px; height: 80px; border-radius: 50%; background: #e2e8f0; margin: 0 auto 10px;"></div>
<p style="margin: 0; font-weight: bold;">María García</p>
<p style="margin: 5px 0 0; font-size: 14px; color: #64748b;">CEO, Empresa</p>
</td>
<td width="50%" valign="top" style="text-align: center;">
<div style="width: 80px; height: 80px; border-radius: 50%; background: #e2e8f0; margin: 0 auto 10px;"></div>
<p style="margin: 0; font-weight: bold;">Carlos López</p>
<p style="margin: 5px 0 0; font-size: 14px; color: #64748b;">CTO, Startup</p>
</td>
</tr>
</table>"#;

fn event() -> TemplateDefinition {
    let blocks = vec![
        header(Some("Estás invitado"), 30),
        hero("Webinar: Título del Evento", "Aprende las mejores prácticas con nuestros expertos"),
        spacer(20),
        text(EVENT_DETAILS, Alignment::Center),
        spacer(20),
        text(EVENT_AGENDA, Alignment::Left),
        spacer(20),
        button("Reservar Mi Lugar", "{{registration_url}}", Alignment::Center, 8),
        spacer(10),
        text(
            r#"<p style="text-align: center; font-size: 14px; color: #64748b;">Cupos limitados. ¡No te lo pierdas!</p>"#,
            Alignment::Center,
        ),
        divider(),
        text(EVENT_SPEAKERS, Alignment::Center),
        spacer(20),
        social(&[SocialPlatform::Twitter, SocialPlatform::Linkedin]),
        footer("© 2025 Tu Empresa. Todos los derechos reservados."),
    ];

    TemplateDefinition {
        id: "event".to_string(),
        name: "Invitación a Evento".to_string(),
        description: "Invitación para webinars, conferencias o eventos con agenda y detalles."
            .to_string(),
        category: TemplateCategory::Event,
        preview: String::new(),
        blocks: numbered("event", blocks),
        default_subject: Some("📅 Estás invitado: [Nombre del Evento]".to_string()),
        default_preheader: Some("Reserva tu lugar para este evento exclusivo".to_string()),
        engine_min_version: default_engine_min_version(),
    }
}
