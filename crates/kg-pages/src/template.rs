//! Core trait and structs to define the template of your pages.
//!
//! A [`Template`] is invoked once per record of its stream. For every record the pipeline asks it for the output
//! path, the legacy paths that should redirect to it, the page head and the page body.
use std::cell::Cell;

use lol_html::{RewriteStrSettings, element, html_content::ContentType, rewrite_str};
use maud::{DOCTYPE, PreEscaped, html};
use serde::de::DeserializeOwned;

use crate::{assets::Stylesheet, errors::BuildError, head::HeadConfig, stream::StreamConfig};

/// The result of a page render, can be either text, raw bytes, or an error.
///
/// Typically used through the [`Into<RenderResult>`](std::convert::Into) implementations for common types.
pub enum RenderResult {
    Text(String),
    Raw(Vec<u8>),
    Err(Box<dyn std::error::Error>),
}

impl<T> From<Result<T, Box<dyn std::error::Error>>> for RenderResult
where
    T: Into<RenderResult>,
{
    fn from(val: Result<T, Box<dyn std::error::Error>>) -> Self {
        match val {
            Ok(s) => s.into(),
            Err(e) => RenderResult::Err(e),
        }
    }
}

impl From<String> for RenderResult {
    fn from(val: String) -> Self {
        RenderResult::Text(val)
    }
}

impl From<&str> for RenderResult {
    fn from(val: &str) -> Self {
        RenderResult::Text(val.to_string())
    }
}

impl From<Vec<u8>> for RenderResult {
    fn from(val: Vec<u8>) -> Self {
        RenderResult::Raw(val)
    }
}

impl From<&[u8]> for RenderResult {
    fn from(val: &[u8]) -> Self {
        RenderResult::Raw(val.to_vec())
    }
}

/// What a template is built from.
#[derive(Debug, Clone)]
pub struct TemplateConfig {
    pub stream: StreamConfig,
}

/// Build context passed to [`Template::head`] and [`Template::render`].
pub struct TemplateContext<'a> {
    /// The page's output path, as returned by [`Template::path`].
    pub path: &'a str,
    /// `../` repeated once per directory level of the page, e.g. `../../` for `en/dr-smith`.
    pub relative_prefix_to_root: &'a str,
    /// Locale of the record being rendered.
    pub locale: &'a str,
}

/// Must be implemented by the template passed to [`generate()`](crate::generate).
///
/// ## Example
/// ```rs
/// use kg_pages::head::HeadConfig;
/// use kg_pages::template::prelude::*;
///
/// pub struct LocationTemplate;
///
/// impl Template for LocationTemplate {
///     type Record = Location;
///
///     fn config(&self) -> TemplateConfig {
///         TemplateConfig { stream: location_stream() }
///     }
///
///     fn path(&self, record: &Location) -> String {
///         format!("locations/{}", record.id)
///     }
///
///     fn head(&self, _ctx: &TemplateContext, record: &Location) -> HeadConfig {
///         HeadConfig { title: record.name.clone(), ..Default::default() }
///     }
///
///     fn render(&self, _ctx: &TemplateContext, record: &Location) -> impl Into<RenderResult> {
///         html! { h1 { (record.name) } }
///     }
/// }
/// ```
pub trait Template: Sync {
    type Record: DeserializeOwned + Send + Sync;

    fn config(&self) -> TemplateConfig;

    fn path(&self, record: &Self::Record) -> String;

    /// Legacy paths that should redirect to [`Template::path`].
    fn redirects(&self, _record: &Self::Record) -> Vec<String> {
        Vec::new()
    }

    fn head(&self, ctx: &TemplateContext, record: &Self::Record) -> HeadConfig;

    fn render(&self, ctx: &TemplateContext, record: &Self::Record) -> impl Into<RenderResult>;
}

/// Turns a render result into the bytes written for the page.
///
/// Text results are wrapped in a document carrying the rendered head. If the text already is a complete document
/// (starting with a doctype or an `<html>` element), the head is injected into it instead. Raw results are written
/// untouched.
pub fn finish_page(
    render_result: RenderResult,
    head: &HeadConfig,
    locale: &str,
    stylesheet: Option<&Stylesheet>,
    path: &str,
) -> Result<Vec<u8>, BuildError> {
    match render_result {
        RenderResult::Err(e) => Err(BuildError::RenderFailed {
            path: path.to_string(),
            message: e.to_string(),
        }),
        RenderResult::Raw(content) => Ok(content),
        RenderResult::Text(body) => {
            let head_markup = html! {
                (head.render())
                @if let Some(stylesheet) = stylesheet {
                    (stylesheet)
                }
            }
            .into_string();

            if !is_complete_document(&body) {
                let document = html! {
                    (DOCTYPE)
                    html lang=(locale) {
                        head { (PreEscaped(head_markup)) }
                        body { (PreEscaped(body)) }
                    }
                };

                return Ok(document.into_string().into_bytes());
            }

            inject_head(&body, &head_markup, path).map(String::into_bytes)
        }
    }
}

fn is_complete_document(text: &str) -> bool {
    let start = text
        .trim_start()
        .chars()
        .take(9)
        .collect::<String>()
        .to_ascii_lowercase();
    start.starts_with("<!doctype") || start.starts_with("<html")
}

fn inject_head(document: &str, head_markup: &str, path: &str) -> Result<String, BuildError> {
    let found_head = Cell::new(false);

    let element_content_handlers = vec![
        element!("head", |el| {
            found_head.set(true);
            el.prepend(head_markup, ContentType::Html);
            Ok(())
        }),
        // Documents without a head get one right before their body.
        element!("body", |el| {
            if !found_head.get() {
                el.before(&format!("<head>{}</head>", head_markup), ContentType::Html);
            }
            Ok(())
        }),
    ];

    rewrite_str(
        document,
        RewriteStrSettings {
            element_content_handlers,
            ..RewriteStrSettings::new()
        },
    )
    .map_err(|e| BuildError::HeadRewriteFailed {
        path: path.to_string(),
        message: e.to_string(),
    })
}

pub mod prelude {
    //! Re-exports of the most commonly used types and traits for defining templates.
    //!
    //! ## Example
    //! ```rust
    //! use kg_pages::template::prelude::*;
    //! ```
    pub use super::{RenderResult, Template, TemplateConfig, TemplateContext};
    pub use crate::head::{HeadConfig, Tag, TagKind};
    pub use crate::stream::{Localization, StreamConfig, StreamFilter};
    pub use maud::{Markup, html};
}
