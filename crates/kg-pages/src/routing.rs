use std::path::{Path, PathBuf};

pub(crate) fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// URL of a page, with a leading and a trailing slash.
pub fn page_url(path: &str) -> String {
    let url = format!("/{}", segments(path).collect::<Vec<_>>().join("/"));

    if url.ends_with('/') { url } else { url + "/" }
}

/// Location of the page's file inside `output_dir`.
///
/// Every page is an `index.html` inside a directory named after the path, whatever its last segment looks like.
pub fn page_file_path(path: &str, output_dir: &Path) -> PathBuf {
    let mut file_path = PathBuf::from(output_dir);
    file_path.extend(segments(path));
    file_path.push("index.html");

    file_path
}

/// `../` once per directory between the page's file and the output root, empty for pages at the root.
pub fn relative_prefix_to_root(path: &str) -> String {
    let root = Path::new("/");
    let file_path = page_file_path(path, root);
    let page_dir = file_path.parent().unwrap_or(root);

    match pathdiff::diff_paths(root, page_dir) {
        Some(relative) if !relative.as_os_str().is_empty() => {
            format!("{}/", relative.to_string_lossy())
        }
        _ => String::new(),
    }
}
