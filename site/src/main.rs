use kg_pages::{AssetsOptions, BuildOptions, BuildOutput, generate};

mod components;
mod record;
mod styling;
mod templates;

use templates::ProviderTemplate;

fn main() -> Result<BuildOutput, Box<dyn std::error::Error>> {
    generate(
        &ProviderTemplate,
        BuildOptions {
            assets: AssetsOptions {
                tailwind: Some(styling::tailwind_config()),
                ..Default::default()
            },
            ..Default::default()
        },
    )
}

#[cfg(test)]
mod tests {
    use std::{fs, path::Path};

    use kg_pages::{stream::load_stream, template::Template};

    use super::*;
    use crate::record::Provider;

    const MANIFEST_DIR: &str = env!("CARGO_MANIFEST_DIR");

    #[test]
    fn test_generates_sample_stream() {
        let dir = tempfile::tempdir().unwrap();
        let output_dir = dir.path().join("dist");

        let output = generate(
            &ProviderTemplate,
            BuildOptions {
                stream_glob: format!("{}/content/stream/*.json", MANIFEST_DIR),
                output_dir: output_dir.clone(),
                static_dir: Path::new(MANIFEST_DIR).join("static"),
                ..Default::default()
            },
        )
        .unwrap();

        let mut paths: Vec<&str> = output.pages.iter().map(|page| page.path.as_str()).collect();
        paths.sort();
        assert_eq!(paths, vec!["dr-jane-smith", "en/CA/San Diego/88 Harbor Blvd-1002"]);

        let page = fs::read_to_string(output_dir.join("dr-jane-smith/index.html")).unwrap();
        assert_eq!(page.matches("<head>").count(), 1);
        assert!(page.contains("<title>Dr. Jane Smith</title>"));
        assert!(page.contains(r#"<meta name="description" content="">"#));
        assert!(page.contains("Book an appointment"));
        assert!(page.contains("Annual physicals"));

        let on_leave = fs::read_to_string(
            output_dir.join("en/CA/San Diego/88 Harbor Blvd-1002/index.html"),
        )
        .unwrap();
        assert!(on_leave.contains(r#"<div data-section="scheduler"></div>"#));
        assert!(!on_leave.contains(r#"data-section="list""#));

        let manifest = fs::read_to_string(output_dir.join("_redirects")).unwrap();
        assert!(manifest.contains("/index-old/1001/ /dr-jane-smith/ 301"));
        assert!(output_dir.join("index-old/1002/index.html").exists());
        assert!(output_dir.join("favicon.svg").exists());
    }

    #[test]
    fn test_malformed_field_does_not_drop_other_records() {
        let dir = tempfile::tempdir().unwrap();
        let meta = serde_json::json!({
            "locale": "en",
            "entityType": { "id": "healthcareProfessional" },
            "savedFilterIds": ["provider-pages-published"]
        });
        let records = serde_json::json!([
            { "id": "1", "meta": meta.clone(), "name": "Dr. Valid", "c_status": "ACTIVE" },
            { "id": "2", "meta": meta, "name": "Dr. Retired", "c_status": "RETIRED", "c_rating": "n/a" }
        ]);
        fs::write(dir.path().join("providers.json"), records.to_string()).unwrap();

        let pattern = format!("{}/*.json", dir.path().display());
        let entries = load_stream::<Provider>(&pattern, &ProviderTemplate.config().stream).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].data.name, "Dr. Retired");
        assert!(entries[1].data.status.is_none());
        assert!(entries[1].data.rating.is_none());
    }
}
