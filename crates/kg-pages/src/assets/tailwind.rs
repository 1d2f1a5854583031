use std::{
    fmt::Write as _,
    fs,
    path::{Path, PathBuf},
    process::Command,
    time::Instant,
};

use log::{debug, info};

use crate::errors::AssetError;

pub const ENTRY_FILENAME: &str = "tailwind-entry.css";

/// Theme extension and content sources for [Tailwind CSS](https://tailwindcss.com).
///
/// Turned into a Tailwind v4 entry stylesheet by [`TailwindConfig::to_css`]: every source glob becomes a `@source`
/// directive, and every token lands in a single `@theme` block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TailwindConfig {
    /// Globs of files scanned for utility classes. Relative globs are resolved against the project directory.
    pub sources: Vec<String>,
    /// `--color-{name}` tokens.
    pub colors: Vec<(String, String)>,
    /// `--radius-{name}` tokens.
    pub radius: Vec<(String, String)>,
    /// `--font-{family}` tokens, e.g. `("sans", "\"Inter\", sans-serif")`.
    pub fonts: Vec<(String, String)>,
    /// `--animate-{name}` tokens.
    pub animations: Vec<(String, String)>,
    pub keyframes: Vec<Keyframes>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Keyframes {
    pub name: String,
    /// Selector (`0%`, `to`, …) and declarations of every step.
    pub steps: Vec<(String, String)>,
}

impl TailwindConfig {
    pub fn to_css(&self, base_dir: &Path) -> String {
        let mut css = String::from("@import \"tailwindcss\";\n");

        for source in &self.sources {
            let resolved = if Path::new(source).is_absolute() {
                PathBuf::from(source)
            } else {
                base_dir.join(source)
            };
            let _ = writeln!(css, "@source \"{}\";", resolved.to_string_lossy());
        }

        css.push_str("\n@theme {\n");

        let tokens = [
            ("color", &self.colors),
            ("radius", &self.radius),
            ("font", &self.fonts),
            ("animate", &self.animations),
        ];
        for (namespace, values) in tokens {
            for (name, value) in values {
                let _ = writeln!(css, "  --{}-{}: {};", namespace, name, value);
            }
        }

        for keyframes in &self.keyframes {
            let _ = writeln!(css, "\n  @keyframes {} {{", keyframes.name);
            for (selector, declarations) in &keyframes.steps {
                let _ = writeln!(css, "    {} {{ {} }}", selector, declarations);
            }
            css.push_str("  }\n");
        }

        css.push_str("}\n");
        css
    }

    /// Writes the entry stylesheet into `cache_dir` and compiles it with the Tailwind CLI at `binary`.
    ///
    /// Output is minified unless running in development mode.
    pub fn compile(
        &self,
        binary: &Path,
        cache_dir: &Path,
        base_dir: &Path,
    ) -> Result<String, AssetError> {
        let start_tailwind = Instant::now();
        let entry = cache_dir.join(ENTRY_FILENAME);

        fs::create_dir_all(cache_dir)
            .and_then(|_| fs::write(&entry, self.to_css(base_dir)))
            .map_err(|source| AssetError::WriteFailed {
                path: entry.clone(),
                source,
            })?;

        let mut command = Command::new(binary);
        command.arg("--input").arg(&entry).args(["--output", "-"]);

        if !crate::is_dev() {
            command.arg("--minify");
        }

        debug!(target: "assets", "Running {:?}", command);

        let output = command
            .output()
            .map_err(|source| AssetError::TailwindSpawnFailed {
                binary: binary.to_path_buf(),
                source,
            })?;

        if !output.status.success() {
            return Err(AssetError::TailwindFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        info!(target: "assets", "Tailwind took {:?}", start_tailwind.elapsed());

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}
