#![cfg_attr(docsrs, feature(doc_cfg))]
//! Library for generating static pages from Knowledge Graph content streams.
//!
//! A build is driven by a single [`Template`](template::Template): the template declares which records and fields it
//! needs, and for every record the pipeline asks it for an output path, a list of redirects, the page head and the page
//! body. Records are read from JSON stream exports on disk.
//!
//! ## Example
//! ```rs
//! use kg_pages::{generate, BuildOptions, BuildOutput};
//!
//! fn main() -> Result<BuildOutput, Box<dyn std::error::Error>> {
//!     generate(&MyTemplate, BuildOptions::default())
//! }
//! ```

// Modules the end-user will interact directly or indirectly with
pub mod assets;
pub mod errors;
pub mod head;
pub mod redirects;
pub mod stream;
pub mod template;

mod routing;

// Exports for end-users
pub use build::metadata::{BuildOutput, PageOutput, RedirectOutput, StaticAssetOutput};
pub use build::options::{AssetsOptions, BuildOptions, RedirectOptions};

mod build;
mod templating;

pub mod maud {
    //! Helpers for [Maud](https://maud.lambda.xyz) templates.
    pub use crate::templating::maud_ext::*;
}

// Internal modules
mod logging;

use std::env;

use build::build;
use logging::init_logging;
use template::Template;

/// Returns whether the pipeline is running in development mode.
///
/// Development mode is enabled by setting `KG_PAGES_DEV=true`, either at compile time or at runtime. In development
/// mode, generated stylesheets are not minified.
pub fn is_dev() -> bool {
    if option_env!("KG_PAGES_DEV") == Some("true") {
        return true;
    }

    env::var("KG_PAGES_DEV").map(|v| v == "true").unwrap_or(false)
}

/// The version of kg-pages being used.
///
/// Rendered as a generator tag in every page head.
pub const GENERATOR: &str = concat!("kg-pages v", env!("CARGO_PKG_VERSION"));

/// Entrypoint. Loads the template's stream, then generates every page, redirect and asset.
///
/// ## Example
/// Should be called from the main function of the binary crate.
/// ```rs
/// use kg_pages::{generate, BuildOptions, BuildOutput};
///
/// fn main() -> Result<BuildOutput, Box<dyn std::error::Error>> {
///   generate(&MyTemplate, BuildOptions::default())
/// }
/// ```
pub fn generate<T: Template>(
    template: &T,
    options: BuildOptions,
) -> Result<BuildOutput, Box<dyn std::error::Error>> {
    init_logging();

    build(template, &options)
}
