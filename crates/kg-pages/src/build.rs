use std::{
    env, fs, io,
    path::{Path, PathBuf},
    thread,
    time::{Instant, SystemTime, UNIX_EPOCH},
};

use crate::{
    BuildOptions, BuildOutput, PageOutput,
    assets::Stylesheet,
    errors::{AssetError, BuildError},
    logging::{FormatElapsedTimeOptions, format_elapsed_time, print_title},
    redirects::{Redirect, write_redirects},
    routing::{page_file_path, page_url, relative_prefix_to_root},
    stream::{StreamEntry, load_stream},
    template::{RenderResult, Template, TemplateContext, finish_page},
};
use colored::{ColoredString, Colorize};
use log::{info, trace, warn};
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};

pub mod metadata;
pub mod options;

pub fn build<T: Template>(
    template: &T,
    options: &BuildOptions,
) -> Result<BuildOutput, Box<dyn std::error::Error>> {
    let build_start = Instant::now();
    let mut build_output = BuildOutput::new(build_start);

    trace!(target: "build", "Setting up required directories...");

    // Move the old output out of the way right away, and delete it while the build runs.
    let clean_up_handle = if options.clean_output_dir && options.output_dir.exists() {
        let old_output_dir = stale_output_dir(&options.output_dir)?;
        fs::rename(&options.output_dir, &old_output_dir)?;
        Some(thread::spawn(move || {
            let _ = fs::remove_dir_all(old_output_dir);
        }))
    } else {
        None
    };

    info!(target: "build", "Output directory: {}", options.output_dir.display());

    let section_format_options = FormatElapsedTimeOptions::section();

    let config = template.config();

    print_title("loading stream");
    let stream_start = Instant::now();
    let entries = load_stream::<T::Record>(&options.stream_glob, &config.stream)?;

    info!(target: "stream", "{}", format!("{} records selected by `{}` in {}", entries.len(), config.stream.id, format_elapsed_time(stream_start.elapsed(), &FormatElapsedTimeOptions::default())).bold());

    let stylesheet = match &options.assets.tailwind {
        Some(tailwind) => {
            print_title("generating styles");
            let css = tailwind.compile(
                &options.assets.tailwind_binary_path,
                &options.assets.cache_dir,
                &env::current_dir()?,
            )?;

            let stylesheet = Stylesheet::from_css(options.assets.assets_dir.clone(), &css);
            let stylesheet_path = stylesheet.build_path(&options.output_dir);
            write_file(css.as_bytes(), &stylesheet_path).map_err(|source| {
                AssetError::WriteFailed {
                    path: stylesheet_path.clone(),
                    source,
                }
            })?;

            info!(target: "assets", "{} -> {}", stylesheet.url(), stylesheet_path.to_string_lossy().dimmed());
            build_output.add_asset(stylesheet_path.to_string_lossy().to_string());

            Some(stylesheet)
        }
        None => None,
    };

    print_title("generating pages");
    let pages_start = Instant::now();

    let (pages, page_urls, redirects) = plan_pages(template, &entries);

    if pages.is_empty() {
        warn!(target: "build", "Stream `{}` selected no records. No pages will be generated.", config.stream.id.bold());
    }

    let route_format_options = FormatElapsedTimeOptions {
        additional_fn: Some(&|msg: ColoredString| {
            let formatted_msg = format!("(+{})", msg);
            if msg.fgcolor.is_none() {
                formatted_msg.dimmed()
            } else {
                formatted_msg.into()
            }
        }),
        ..Default::default()
    };

    let page_results: Vec<Result<PageOutput, BuildError>> = pages
        .par_iter()
        .map(|(entry, path)| {
            let page_start = Instant::now();

            let relative_prefix = relative_prefix_to_root(path);
            let ctx = TemplateContext {
                path,
                relative_prefix_to_root: &relative_prefix,
                locale: &entry.locale,
            };

            let head = template.head(&ctx, &entry.data);
            let result: RenderResult = template.render(&ctx, &entry.data).into();
            let content = finish_page(result, &head, &entry.locale, stylesheet.as_ref(), path)?;

            let file_path = page_file_path(path, &options.output_dir);
            write_file(&content, &file_path).map_err(|source| BuildError::WriteFailed {
                path: file_path.clone(),
                source,
            })?;

            info!(target: "pages", "{} -> {} {}", page_url(path), file_path.to_string_lossy().dimmed(), format_elapsed_time(page_start.elapsed(), &route_format_options));

            Ok(PageOutput {
                path: path.clone(),
                file_path: file_path.to_string_lossy().to_string(),
                locale: entry.locale.clone(),
            })
        })
        .collect();

    for page in page_results {
        let page = page?;
        build_output.add_page(page.path, page.file_path, page.locale);
    }

    info!(target: "pages", "{}", format!("generated {} pages in {}", build_output.pages.len(), format_elapsed_time(pages_start.elapsed(), &section_format_options)).bold());

    if options.redirects.enabled && !redirects.is_empty() {
        print_title("writing redirects");
        write_redirects(
            &redirects,
            &page_urls,
            &options.output_dir,
            &options.redirects,
            &mut build_output,
        )?;
    }

    if options.static_dir.exists() {
        let assets_start = Instant::now();
        print_title("copying assets");

        copy_recursively(
            &options.static_dir,
            &options.output_dir,
            &mut build_output,
        )?;

        info!(target: "build", "{}", format!("Assets copied in {}", format_elapsed_time(assets_start.elapsed(), &FormatElapsedTimeOptions::default())).bold());
    }

    info!(target: "SKIP_FORMAT", "{}", "");
    info!(target: "build", "{}", format!("Build completed in {}", format_elapsed_time(build_start.elapsed(), &section_format_options)).bold());

    if let Some(handle) = clean_up_handle {
        let _ = handle.join();
    }

    Ok(build_output)
}

// A sibling of the output directory, so that renaming never crosses filesystems.
fn stale_output_dir(output_dir: &Path) -> Result<PathBuf, std::time::SystemTimeError> {
    let duration = SystemTime::now().duration_since(UNIX_EPOCH)?;
    let mut name = output_dir.file_name().unwrap_or_default().to_os_string();
    name.push(format!(".old-{}", duration.as_nanos()));

    Ok(output_dir.with_file_name(name))
}

type PlannedPage<'a, R> = (&'a StreamEntry<R>, String);

/// Derives the path and redirects of every record, in stream order.
///
/// When several records end up at the same page URL, only the last one is rendered. Paths are compared by URL, so
/// `a//b` and `a/b` collide. The returned set holds the URLs of the rendered pages.
fn plan_pages<'a, T: Template>(
    template: &T,
    entries: &'a [StreamEntry<T::Record>],
) -> (
    Vec<PlannedPage<'a, T::Record>>,
    FxHashSet<String>,
    Vec<Redirect>,
) {
    let mut last_index_by_url: FxHashMap<String, usize> = FxHashMap::default();
    let mut planned = Vec::with_capacity(entries.len());
    let mut redirects = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        let path = template.path(&entry.data);

        if let Some(previous) = last_index_by_url.insert(page_url(&path), index) {
            warn!(target: "pages", "{} is generated by records #{} and #{} of the stream, only the last one is kept", path.bold(), previous, index);
        }

        redirects.extend(
            template
                .redirects(&entry.data)
                .into_iter()
                .map(|from| Redirect::new(from, path.clone())),
        );

        planned.push((entry, path));
    }

    let pages = planned
        .into_iter()
        .enumerate()
        .filter(|(index, (_, path))| last_index_by_url.get(&page_url(path)) == Some(index))
        .map(|(_, page)| page)
        .collect();

    let page_urls = last_index_by_url.into_keys().collect();

    (pages, page_urls, redirects)
}

fn copy_recursively(
    source: impl AsRef<Path>,
    destination: impl AsRef<Path>,
    build_output: &mut BuildOutput,
) -> Result<(), AssetError> {
    let copy_error = |from: &Path, to: &Path, source: io::Error| AssetError::CopyFailed {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    };

    let (source, destination) = (source.as_ref(), destination.as_ref());

    fs::create_dir_all(destination).map_err(|e| copy_error(source, destination, e))?;
    let read_dir = fs::read_dir(source).map_err(|e| copy_error(source, destination, e))?;

    for entry in read_dir {
        let entry = entry.map_err(|e| copy_error(source, destination, e))?;
        let target = destination.join(entry.file_name());
        let filetype = entry
            .file_type()
            .map_err(|e| copy_error(&entry.path(), &target, e))?;

        if filetype.is_dir() {
            copy_recursively(entry.path(), &target, build_output)?;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| copy_error(&entry.path(), &target, e))?;

            build_output.add_static_file(
                target.to_string_lossy().to_string(),
                entry.path().to_string_lossy().to_string(),
            );
        }
    }

    Ok(())
}

fn write_file(content: &[u8], file_path: &PathBuf) -> Result<(), io::Error> {
    if let Some(parent_dir) = file_path.parent() {
        fs::create_dir_all(parent_dir)?
    }

    fs::write(file_path, content)?;

    Ok(())
}
