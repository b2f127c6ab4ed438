//! Email Document - Ordered blocks plus send metadata
//!
//! Block order is the vertical stacking order of the rendered email.
//! Block ids are caller-managed; nothing here re-checks uniqueness.

use chrono::{DateTime, Utc};
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::templates::{clone_template_blocks, TemplateDefinition};

pub type DocumentId = String;
pub type BlockId = String;

pub const DEFAULT_CONTENT_WIDTH: u32 = 600;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailDocument {
    pub id: DocumentId,
    pub name: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub preheader: String,
    #[serde(default)]
    pub blocks: Vec<Block>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_kit_id: Option<String>,
    #[serde(default)]
    pub theme: Theme,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template_id: Option<String>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl EmailDocument {
    pub fn new(
        name: impl Into<String>,
        brand_kit_id: Option<String>,
        template_id: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            subject: String::new(),
            preheader: String::new(),
            blocks: Vec::new(),
            brand_kit_id,
            theme: Theme::Light,
            content_width: None,
            template_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// New document seeded from a template, with freshly issued block ids.
    pub fn from_template(
        template: &TemplateDefinition,
        name: impl Into<String>,
        brand_kit_id: Option<String>,
    ) -> Self {
        let mut doc = Self::new(name, brand_kit_id, Some(template.id.clone()));
        doc.blocks = clone_template_blocks(&template.blocks);
        doc.subject = template.default_subject.clone().unwrap_or_default();
        doc.preheader = template.default_preheader.clone().unwrap_or_default();
        doc
    }

    pub fn content_width(&self) -> u32 {
        self.content_width.unwrap_or(DEFAULT_CONTENT_WIDTH)
    }

    pub fn find_block(&self, id: &str) -> Option<&Block> {
        self.blocks.iter().find(|b| b.id() == Some(id))
    }

    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Insert at `index`, clamped to the end of the list.
    pub fn insert_block(&mut self, index: usize, block: Block) {
        let index = index.min(self.blocks.len());
        self.blocks.insert(index, block);
    }

    pub fn remove_block(&mut self, id: &str) -> Option<Block> {
        let index = self.position(id)?;
        Some(self.blocks.remove(index))
    }

    /// Move a block to `to_index` (clamped). Returns false if the id is unknown.
    pub fn move_block(&mut self, id: &str, to_index: usize) -> bool {
        let Some(from) = self.position(id) else {
            return false;
        };
        let block = self.blocks.remove(from);
        let to = to_index.min(self.blocks.len());
        self.blocks.insert(to, block);
        true
    }

    /// Replace the block sharing `block`'s id.
    pub fn update_block(&mut self, block: Block) -> bool {
        let Some(index) = block.id().and_then(|id| self.position(id)) else {
            return false;
        };
        self.blocks[index] = block;
        true
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.blocks.iter().position(|b| b.id() == Some(id))
    }
}

// --- Blocks ---

/// Closed set of block kinds, tagged by `type` on the wire. Unknown tags
/// (including the reserved `columns` kind) become `Unsupported`, which keeps
/// the raw payload and renders to nothing.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Header(HeaderBlock),
    Hero(HeroBlock),
    Text(TextBlock),
    Image(ImageBlock),
    Button(ButtonBlock),
    Divider(DividerBlock),
    Spacer(SpacerBlock),
    Card(CardBlock),
    Footer(FooterBlock),
    Social(SocialBlock),
    Unsupported(UnsupportedBlock),
}

/// A block of a kind this engine does not render.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnsupportedBlock {
    pub kind: String,
    pub id: Option<BlockId>,
    raw: Value,
}

impl UnsupportedBlock {
    pub fn new(kind: impl Into<String>, id: Option<BlockId>) -> Self {
        let kind = kind.into();
        let mut raw = Map::new();
        raw.insert("type".to_string(), Value::String(kind.clone()));
        if let Some(id) = &id {
            raw.insert("id".to_string(), Value::String(id.clone()));
        }
        Self { kind, id, raw: Value::Object(raw) }
    }

    fn from_raw(raw: Value) -> Self {
        let field = |key: &str| raw.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            kind: field("type").unwrap_or_default(),
            id: field("id"),
            raw,
        }
    }

    /// The payload as it was read, unknown fields included.
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    fn set_id(&mut self, new_id: BlockId) {
        if let Value::Object(map) = &mut self.raw {
            map.insert("id".to_string(), Value::String(new_id.clone()));
        }
        self.id = Some(new_id);
    }
}

impl Block {
    pub fn id(&self) -> Option<&str> {
        let id = match self {
            Block::Header(b) => &b.id,
            Block::Hero(b) => &b.id,
            Block::Text(b) => &b.id,
            Block::Image(b) => &b.id,
            Block::Button(b) => &b.id,
            Block::Divider(b) => &b.id,
            Block::Spacer(b) => &b.id,
            Block::Card(b) => &b.id,
            Block::Footer(b) => &b.id,
            Block::Social(b) => &b.id,
            Block::Unsupported(b) => return b.id.as_deref(),
        };
        Some(id)
    }

    /// The `type` tag. Unsupported blocks report the tag they were read with.
    pub fn kind(&self) -> &str {
        match self {
            Block::Header(_) => "header",
            Block::Hero(_) => "hero",
            Block::Text(_) => "text",
            Block::Image(_) => "image",
            Block::Button(_) => "button",
            Block::Divider(_) => "divider",
            Block::Spacer(_) => "spacer",
            Block::Card(_) => "card",
            Block::Footer(_) => "footer",
            Block::Social(_) => "social",
            Block::Unsupported(b) => &b.kind,
        }
    }

    pub(crate) fn set_id(&mut self, new_id: BlockId) {
        let slot = match self {
            Block::Header(b) => &mut b.id,
            Block::Hero(b) => &mut b.id,
            Block::Text(b) => &mut b.id,
            Block::Image(b) => &mut b.id,
            Block::Button(b) => &mut b.id,
            Block::Divider(b) => &mut b.id,
            Block::Spacer(b) => &mut b.id,
            Block::Card(b) => &mut b.id,
            Block::Footer(b) => &mut b.id,
            Block::Social(b) => &mut b.id,
            Block::Unsupported(b) => return b.set_id(new_id),
        };
        *slot = new_id;
    }
}

#[derive(Serialize)]
struct Tagged<'a, T> {
    #[serde(rename = "type")]
    kind: &'a str,
    #[serde(flatten)]
    block: &'a T,
}

impl Serialize for Block {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let kind = self.kind();
        match self {
            Block::Header(block) => Tagged { kind, block }.serialize(serializer),
            Block::Hero(block) => Tagged { kind, block }.serialize(serializer),
            Block::Text(block) => Tagged { kind, block }.serialize(serializer),
            Block::Image(block) => Tagged { kind, block }.serialize(serializer),
            Block::Button(block) => Tagged { kind, block }.serialize(serializer),
            Block::Divider(block) => Tagged { kind, block }.serialize(serializer),
            Block::Spacer(block) => Tagged { kind, block }.serialize(serializer),
            Block::Card(block) => Tagged { kind, block }.serialize(serializer),
            Block::Footer(block) => Tagged { kind, block }.serialize(serializer),
            Block::Social(block) => Tagged { kind, block }.serialize(serializer),
            Block::Unsupported(block) => block.raw.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Block {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        fn known<T: DeserializeOwned, E: de::Error>(raw: Value) -> Result<T, E> {
            serde_json::from_value(raw).map_err(E::custom)
        }

        let raw = Value::deserialize(deserializer)?;
        let kind = raw.get("type").and_then(Value::as_str).map(str::to_owned).unwrap_or_default();
        Ok(match kind.as_str() {
            "header" => Block::Header(known(raw)?),
            "hero" => Block::Hero(known(raw)?),
            "text" => Block::Text(known(raw)?),
            "image" => Block::Image(known(raw)?),
            "button" => Block::Button(known(raw)?),
            "divider" => Block::Divider(known(raw)?),
            "spacer" => Block::Spacer(known(raw)?),
            "card" => Block::Card(known(raw)?),
            "footer" => Block::Footer(known(raw)?),
            "social" => Block::Social(known(raw)?),
            _ => Block::Unsupported(UnsupportedBlock::from_raw(raw)),
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

impl Alignment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderBlock {
    pub id: BlockId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
    #[serde(default)]
    pub alignment: Alignment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroBlock {
    pub id: BlockId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default)]
    pub alignment: Alignment,
}

/// `content` is raw HTML and is emitted verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextBlock {
    pub id: BlockId,
    pub content: String,
    #[serde(default)]
    pub alignment: Alignment,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageBlock {
    pub id: BlockId,
    pub src: String,
    #[serde(default)]
    pub alt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<i32>,
    #[serde(default)]
    pub alignment: Alignment,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonBlock {
    pub id: BlockId,
    pub text: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default)]
    pub alignment: Alignment,
    #[serde(default)]
    pub full_width: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<i32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DividerStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl DividerStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            DividerStyle::Solid => "solid",
            DividerStyle::Dashed => "dashed",
            DividerStyle::Dotted => "dotted",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DividerBlock {
    pub id: BlockId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thickness: Option<i32>,
    #[serde(default)]
    pub style: DividerStyle,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacerBlock {
    pub id: BlockId,
    pub height: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardBlock {
    pub id: BlockId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterBlock {
    pub id: BlockId,
    pub content: String,
    #[serde(default)]
    pub include_unsubscribe: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Facebook,
    Twitter,
    Instagram,
    Linkedin,
    Youtube,
}

impl SocialPlatform {
    pub fn as_str(&self) -> &'static str {
        match self {
            SocialPlatform::Facebook => "facebook",
            SocialPlatform::Twitter => "twitter",
            SocialPlatform::Instagram => "instagram",
            SocialPlatform::Linkedin => "linkedin",
            SocialPlatform::Youtube => "youtube",
        }
    }

    /// Official brand color, used for `IconStyle::Color`.
    pub fn brand_color(&self) -> &'static str {
        match self {
            SocialPlatform::Facebook => "#1877F2",
            SocialPlatform::Twitter => "#1DA1F2",
            SocialPlatform::Instagram => "#E4405F",
            SocialPlatform::Linkedin => "#0A66C2",
            SocialPlatform::Youtube => "#FF0000",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    #[serde(rename = "type")]
    pub platform: SocialPlatform,
    pub url: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IconStyle {
    #[default]
    Color,
    Mono,
    Outline,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialBlock {
    pub id: BlockId,
    #[serde(default)]
    pub networks: Vec<SocialLink>,
    #[serde(default)]
    pub alignment: Alignment,
    #[serde(default)]
    pub icon_style: IconStyle,
}
