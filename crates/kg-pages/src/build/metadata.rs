use std::{process::Termination, time::Instant};

/// Metadata returned by [`generate()`](crate::generate) for a single page after a successful build.
#[derive(Debug, Clone, PartialEq)]
pub struct PageOutput {
    /// The path returned by the template.
    pub path: String,
    pub file_path: String,
    pub locale: String,
}

/// A redirect written by the build, from a legacy path to a page path.
#[derive(Debug, Clone, PartialEq)]
pub struct RedirectOutput {
    pub from: String,
    pub to: String,
}

/// Metadata for a single static asset after a successful build.
///
/// A static asset is a file that is copied to the output directory without any processing.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticAssetOutput {
    pub file_path: String,
    pub original_path: String,
}

/// Metadata returned by [`generate()`](crate::generate) after a successful build.
#[derive(Debug)]
pub struct BuildOutput {
    pub start_time: Instant,
    pub pages: Vec<PageOutput>,
    pub redirects: Vec<RedirectOutput>,
    pub assets: Vec<String>,
    pub static_files: Vec<StaticAssetOutput>,
}

impl BuildOutput {
    pub fn new(start_time: Instant) -> Self {
        Self {
            start_time,
            pages: Vec::new(),
            redirects: Vec::new(),
            assets: Vec::new(),
            static_files: Vec::new(),
        }
    }

    pub(crate) fn add_page(&mut self, path: String, file_path: String, locale: String) {
        self.pages.push(PageOutput {
            path,
            file_path,
            locale,
        });
    }

    pub(crate) fn add_redirect(&mut self, from: String, to: String) {
        self.redirects.push(RedirectOutput { from, to });
    }

    pub(crate) fn add_asset(&mut self, file_path: String) {
        self.assets.push(file_path);
    }

    pub(crate) fn add_static_file(&mut self, file_path: String, original_path: String) {
        self.static_files.push(StaticAssetOutput {
            file_path,
            original_path,
        });
    }
}

impl Default for BuildOutput {
    fn default() -> Self {
        Self::new(Instant::now())
    }
}

impl Termination for BuildOutput {
    fn report(self) -> std::process::ExitCode {
        0.into()
    }
}
