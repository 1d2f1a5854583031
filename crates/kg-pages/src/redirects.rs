//! Redirects from legacy paths to generated pages.
//!
//! Every path returned by [`Template::redirects`](crate::template::Template::redirects) ends up in a `_redirects`
//! manifest at the root of the output directory (one `from to 301` rule per line), and optionally as a small HTML page
//! that refreshes to the target, for hosts that don't read the manifest.
use std::{fs, path::Path};

use log::{info, warn};
use maud::{DOCTYPE, Markup, html};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use rustc_hash::FxHashSet;

use crate::{
    BuildOutput, RedirectOptions,
    errors::BuildError,
    routing::{page_file_path, page_url, segments},
};

/// Characters escaped inside a path segment. Controls and whitespace would otherwise split a manifest rule.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// A single legacy path and the page path it points to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    pub from: String,
    pub to: String,
}

impl Redirect {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    pub fn rule(&self) -> String {
        format!(
            "{} {} 301",
            encoded_page_url(&self.from),
            encoded_page_url(&self.to)
        )
    }
}

/// Like [`page_url`](crate::routing::page_url), with every segment percent-encoded.
fn encoded_page_url(path: &str) -> String {
    let mut url = String::from("/");
    for segment in segments(path) {
        url.extend(utf8_percent_encode(segment, PATH_SEGMENT));
        url.push('/');
    }

    url
}

pub fn redirect_manifest(redirects: &[Redirect]) -> String {
    redirects
        .iter()
        .map(|redirect| redirect.rule() + "\n")
        .collect()
}

/// A page that immediately sends the browser to `target_url`.
pub fn redirect_stub(target_url: &str) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { "Redirecting…" }
                link rel="canonical" href=(target_url);
                meta http-equiv="refresh" content=(format!("0;url={}", target_url));
            }
            body {
                a href=(target_url) { "Redirecting…" }
            }
        }
    }
}

/// Writes the redirect manifest and, if enabled, the stub pages.
///
/// Stubs are not written over generated pages: a legacy path whose URL is in `page_urls` only gets its manifest rule.
pub fn write_redirects(
    redirects: &[Redirect],
    page_urls: &FxHashSet<String>,
    output_dir: &Path,
    options: &RedirectOptions,
    build_output: &mut BuildOutput,
) -> Result<(), BuildError> {
    if !options.enabled || redirects.is_empty() {
        return Ok(());
    }

    let manifest_path = output_dir.join(&options.manifest_filename);
    fs::create_dir_all(output_dir)
        .and_then(|_| fs::write(&manifest_path, redirect_manifest(redirects)))
        .map_err(|source| BuildError::WriteFailed {
            path: manifest_path.clone(),
            source,
        })?;

    info!(target: "redirects", "{} rules written to {}", redirects.len(), manifest_path.display());

    for redirect in redirects {
        if options.stub_pages {
            if page_urls.contains(&page_url(&redirect.from)) {
                warn!(target: "redirects", "{} is also a page path, skipping its redirect page", redirect.from);
            } else {
                let stub_path = page_file_path(&redirect.from, output_dir);
                let stub = redirect_stub(&encoded_page_url(&redirect.to)).into_string();

                stub_path
                    .parent()
                    .map_or(Ok(()), fs::create_dir_all)
                    .and_then(|_| fs::write(&stub_path, stub))
                    .map_err(|source| BuildError::WriteFailed {
                        path: stub_path.clone(),
                        source,
                    })?;
            }
        }

        build_output.add_redirect(redirect.from.clone(), redirect.to.clone());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn options() -> RedirectOptions {
        RedirectOptions::default()
    }

    #[test]
    fn test_rule_uses_page_urls() {
        let redirect = Redirect::new("index-old/42", "dr-smith");

        assert_eq!(redirect.rule(), "/index-old/42/ /dr-smith/ 301");
    }

    #[test]
    fn test_rule_encodes_spaces() {
        let redirect = Redirect::new("index-old/42", "en/CA/LA/1 Main St-42");

        assert_eq!(
            redirect.rule(),
            "/index-old/42/ /en/CA/LA/1%20Main%20St-42/ 301"
        );
    }

    #[test]
    fn test_rule_stays_on_one_line() {
        let redirect = Redirect::new("index-old/1", "en/CA/LA/1 Main St\nSuite\t2-1");

        assert_eq!(
            redirect.rule(),
            "/index-old/1/ /en/CA/LA/1%20Main%20St%0ASuite%092-1/ 301"
        );
        assert_eq!(redirect_manifest(&[redirect]).lines().count(), 1);
    }

    #[test]
    fn test_rule_encodes_reserved_and_non_ascii() {
        let redirect = Redirect::new("index-old/7", "en/QC/Montréal/5 Rue #3?-7");

        assert_eq!(
            redirect.rule(),
            "/index-old/7/ /en/QC/Montr%C3%A9al/5%20Rue%20%233%3F-7/ 301"
        );
    }

    #[test]
    fn test_manifest_keeps_order() {
        let manifest = redirect_manifest(&[
            Redirect::new("index-old/2", "b"),
            Redirect::new("index-old/1", "a"),
        ]);

        assert_eq!(manifest, "/index-old/2/ /b/ 301\n/index-old/1/ /a/ 301\n");
    }

    #[test]
    fn test_stub_refreshes_to_target() {
        let stub = redirect_stub("/dr-smith/").into_string();

        assert!(stub.contains("<meta http-equiv=\"refresh\" content=\"0;url=/dr-smith/\">"));
        assert!(stub.contains("<link rel=\"canonical\" href=\"/dr-smith/\">"));
    }

    #[test]
    fn test_write_redirects() {
        let dir = tempdir().unwrap();
        let mut output = BuildOutput::default();
        let redirects = vec![
            Redirect::new("index-old/42", "dr-smith"),
            Redirect::new("dr-jones", "dr-jones-md"),
        ];
        let page_urls: FxHashSet<String> =
            ["/dr-smith/".to_string(), "/dr-jones/".to_string()].into_iter().collect();

        write_redirects(&redirects, &page_urls, dir.path(), &options(), &mut output).unwrap();

        let manifest = fs::read_to_string(dir.path().join("_redirects")).unwrap();
        assert_eq!(manifest.lines().count(), 2);
        assert!(dir.path().join("index-old/42/index.html").exists());
        assert!(!dir.path().join("dr-jones/index.html").exists());
        assert_eq!(output.redirects.len(), 2);
    }

    #[test]
    fn test_write_redirects_disabled() {
        let dir = tempdir().unwrap();
        let mut output = BuildOutput::default();
        let options = RedirectOptions {
            enabled: false,
            ..Default::default()
        };

        write_redirects(
            &[Redirect::new("index-old/42", "dr-smith")],
            &FxHashSet::default(),
            dir.path(),
            &options,
            &mut output,
        )
        .unwrap();

        assert!(!dir.path().join("_redirects").exists());
        assert!(output.redirects.is_empty());
    }
}
