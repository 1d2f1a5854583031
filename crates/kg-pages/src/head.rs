//! Page head metadata.
//!
//! Templates describe the `<head>` of a page with a [`HeadConfig`]. The pipeline renders it exactly once per page,
//! around the body returned by [`Template::render`](crate::template::Template::render).
use std::fmt::Write as _;

use log::warn;
use maud::{Escaper, Markup, PreEscaped, Render, html};

use crate::maud::generator;

pub const DEFAULT_CHARSET: &str = "UTF-8";
pub const DEFAULT_VIEWPORT: &str = "width=device-width, initial-scale=1";

/// Title, charset, viewport and additional tags of a page.
///
/// ## Example
/// ```rs
/// use kg_pages::head::{HeadConfig, Tag};
///
/// let head = HeadConfig {
///     title: "Dr. Smith".into(),
///     tags: vec![Tag::meta([("name", "description"), ("content", "Family medicine")])],
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HeadConfig {
    pub title: String,
    pub charset: String,
    pub viewport: String,
    /// Rendered in order, after the title.
    pub tags: Vec<Tag>,
    /// Raw HTML appended at the end of the head, as-is.
    pub other: Option<String>,
}

impl Default for HeadConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            charset: DEFAULT_CHARSET.to_string(),
            viewport: DEFAULT_VIEWPORT.to_string(),
            tags: Vec::new(),
            other: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Meta,
    Link,
}

impl TagKind {
    fn as_str(&self) -> &'static str {
        match self {
            TagKind::Meta => "meta",
            TagKind::Link => "link",
        }
    }
}

/// A void element of the head, with its attributes in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub kind: TagKind,
    pub attributes: Vec<(String, String)>,
}

impl Tag {
    pub fn new<K, V>(kind: TagKind, attributes: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            kind,
            attributes: attributes
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    pub fn meta<K, V>(attributes: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::new(TagKind::Meta, attributes)
    }

    pub fn link<K, V>(attributes: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::new(TagKind::Link, attributes)
    }

    /// Returns the value of the first attribute named `name`.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

impl Render for Tag {
    fn render(&self) -> Markup {
        let mut element = format!("<{}", self.kind.as_str());
        for (key, value) in &self.attributes {
            if !is_valid_attribute_name(key) {
                warn!(target: "build", "Skipping invalid attribute name {:?} on <{}>", key, self.kind.as_str());
                continue;
            }

            let _ = write!(element, " {}=\"", key);
            let _ = Escaper::new(&mut element).write_str(value);
            element.push('"');
        }
        element.push('>');

        PreEscaped(element)
    }
}

impl HeadConfig {
    /// Renders the inner markup of the `<head>` element.
    pub fn render(&self) -> Markup {
        html! {
            meta charset=(self.charset);
            meta name="viewport" content=(self.viewport);
            title { (self.title) }
            @for tag in &self.tags {
                (tag)
            }
            (generator())
            @if let Some(other) = &self.other {
                (PreEscaped(other))
            }
        }
    }
}

// Anything that would end the name or the tag early.
fn is_valid_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && !name.chars().any(|c| {
            c.is_whitespace() || c.is_control() || matches!(c, '"' | '\'' | '<' | '>' | '/' | '=')
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_charset_and_viewport() {
        let head = HeadConfig::default();

        assert_eq!(head.charset, "UTF-8");
        assert_eq!(head.viewport, "width=device-width, initial-scale=1");
        assert!(head.tags.is_empty());
    }

    #[test]
    fn test_tag_render_keeps_attribute_order() {
        let tag = Tag::link([("rel", "icon"), ("type", "image/svg+xml"), ("href", "/favicon.svg")]);

        assert_eq!(
            tag.render().into_string(),
            "<link rel=\"icon\" type=\"image/svg+xml\" href=\"/favicon.svg\">"
        );
    }

    #[test]
    fn test_tag_render_escapes_values() {
        let tag = Tag::meta([("content", "Smith & \"Sons\" <MD>")]);

        assert_eq!(
            tag.render().into_string(),
            "<meta content=\"Smith &amp; &quot;Sons&quot; &lt;MD&gt;\">"
        );
    }

    #[test]
    fn test_tag_render_skips_invalid_attribute_names() {
        let tag = Tag::meta([
            ("name", "description"),
            ("onload=\"alert(1)\" x", "y"),
            ("", "empty"),
            ("content", "Hello"),
        ]);

        assert_eq!(
            tag.render().into_string(),
            "<meta name=\"description\" content=\"Hello\">"
        );
    }

    #[test]
    fn test_attribute_lookup() {
        let tag = Tag::meta([("name", "description"), ("content", "")]);

        assert_eq!(tag.attribute("name"), Some("description"));
        assert_eq!(tag.attribute("content"), Some(""));
        assert_eq!(tag.attribute("property"), None);
    }

    #[test]
    fn test_head_render_order() {
        let head = HeadConfig {
            title: "Dr. <Smith>".to_string(),
            tags: vec![Tag::meta([("name", "description"), ("content", "Hello")])],
            other: Some("<script>/* analytics */</script>".to_string()),
            ..Default::default()
        };

        let rendered = head.render().into_string();

        let charset = rendered.find("<meta charset=\"UTF-8\">").unwrap();
        let title = rendered.find("<title>Dr. &lt;Smith&gt;</title>").unwrap();
        let description = rendered.find("name=\"description\"").unwrap();
        let generator = rendered.find("name=\"generator\"").unwrap();
        let other = rendered.find("<script>").unwrap();

        assert!(charset < title);
        assert!(title < description);
        assert!(description < generator);
        assert!(generator < other);
    }
}
