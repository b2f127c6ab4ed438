//! Inline CSS - Ordered declarations, empty values dropped

use std::fmt;

/// Inline `style` attribute builder. Declarations keep insertion order;
/// empty values are skipped rather than emitted as `prop: `.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineStyle {
    declarations: Vec<(&'static str, String)>,
}

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, property: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.is_empty() {
            self.declarations.push((property, value));
        }
        self
    }

    pub fn set_opt(self, property: &'static str, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.set(property, v),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// ` style="..."`, or nothing when there are no declarations.
    pub fn attr(&self) -> String {
        if self.is_empty() {
            String::new()
        } else {
            format!(r#" style="{}""#, escape_attr(&self.to_string()))
        }
    }
}

impl fmt::Display for InlineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (property, value)) in self.declarations.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", property, value)?;
        }
        Ok(())
    }
}

/// Escape a value for a double-quoted attribute. `&` is left alone so
/// entities and query strings pass through unchanged.
pub fn escape_attr(value: &str) -> String {
    value.replace('"', "&quot;")
}

pub fn px(value: i32) -> String {
    format!("{}px", value)
}
