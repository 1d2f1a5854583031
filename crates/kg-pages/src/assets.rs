//! Assets shared by every generated page.
use std::path::PathBuf;

pub mod tailwind;

pub use tailwind::{Keyframes, TailwindConfig};

/// The site-wide stylesheet compiled from a [`TailwindConfig`].
///
/// Its file name is fingerprinted with the hash of its content, e.g. `_kg/style.1a2b3c4d.css`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stylesheet {
    assets_dir: PathBuf,
    hash: String,
}

impl Stylesheet {
    pub fn new(assets_dir: PathBuf, hash: String) -> Self {
        Self { assets_dir, hash }
    }

    /// Creates a stylesheet whose hash is computed from `css`.
    pub fn from_css(assets_dir: PathBuf, css: &str) -> Self {
        Self::new(assets_dir, calculate_hash(css.as_bytes()))
    }

    pub fn filename(&self) -> String {
        format!("style.{}.css", self.hash)
    }

    pub fn url(&self) -> String {
        format!(
            "/{}/{}",
            self.assets_dir.to_string_lossy().trim_matches('/'),
            self.filename()
        )
    }

    /// Where the stylesheet is written, inside `output_dir`.
    pub fn build_path(&self, output_dir: &std::path::Path) -> PathBuf {
        output_dir.join(&self.assets_dir).join(self.filename())
    }
}

fn calculate_hash(content: &[u8]) -> String {
    let hash = rapidhash::v3::rapidhash_v3(content);

    // Short hashes are enough to bust caches between builds.
    format!("{:016x}", hash)[..8].to_string()
}
