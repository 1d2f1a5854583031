use std::{env, path::PathBuf};

use crate::{assets::TailwindConfig, is_dev};

/// Build options. Should be passed to [`generate()`](crate::generate()).
///
/// ## Examples
/// Custom values:
/// ```rs
/// use kg_pages::{generate, AssetsOptions, BuildOptions, BuildOutput};
///
/// fn main() -> Result<BuildOutput, Box<dyn std::error::Error>> {
///   generate(
///     &MyTemplate,
///     BuildOptions {
///       stream_glob: "data/*.json".into(),
///       output_dir: "public".into(),
///       assets: AssetsOptions {
///         tailwind_binary_path: "./node_modules/.bin/tailwindcss".into(),
///         ..Default::default()
///       },
///       ..Default::default()
///     },
///   )
/// }
/// ```
pub struct BuildOptions {
    /// Glob matching the JSON stream exports records are read from.
    pub stream_glob: String,

    pub output_dir: PathBuf,
    /// Copied as-is into `output_dir`, if it exists.
    pub static_dir: PathBuf,

    /// Whether to clean the output directory before building.
    pub clean_output_dir: bool,

    pub assets: AssetsOptions,

    pub redirects: RedirectOptions,
}

#[derive(Clone)]
pub struct AssetsOptions {
    /// Path to [the TailwindCSS CLI binary](https://tailwindcss.com/docs/installation/tailwind-cli). By default `tailwindcss`, which assumes it is in your `PATH`.
    pub tailwind_binary_path: PathBuf,

    /// Directory inside the output directory to place built assets in.
    /// Defaults to `_kg`.
    pub assets_dir: PathBuf,

    /// Directory for intermediate files, such as the generated Tailwind entry stylesheet.
    /// Defaults to `target/kg_pages_cache`.
    pub cache_dir: PathBuf,

    /// Styling configuration. No stylesheet is generated when `None`.
    pub tailwind: Option<TailwindConfig>,
}

impl Default for AssetsOptions {
    fn default() -> Self {
        Self {
            tailwind_binary_path: "tailwindcss".into(),
            assets_dir: "_kg".into(),
            cache_dir: {
                let target_dir =
                    env::var("CARGO_TARGET_DIR").unwrap_or_else(|_| "target".to_string());
                PathBuf::from(target_dir).join("kg_pages_cache")
            },
            tailwind: None,
        }
    }
}

#[derive(Clone)]
pub struct RedirectOptions {
    /// Whether to write redirects at all.
    pub enabled: bool,
    /// Name of the manifest written at the root of the output directory. Defaults to `_redirects`.
    pub manifest_filename: String,
    /// Whether to also write a refreshing HTML page at every legacy path.
    pub stub_pages: bool,
}

impl Default for RedirectOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            manifest_filename: "_redirects".to_string(),
            stub_pages: true,
        }
    }
}

/// Provides default values for [`crate::generate()`].
impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            stream_glob: "content/stream/*.json".to_string(),
            output_dir: "dist".into(),
            static_dir: "static".into(),
            // Keep stale files around while iterating locally.
            clean_output_dir: !is_dev(),
            assets: AssetsOptions::default(),
            redirects: RedirectOptions::default(),
        }
    }
}
