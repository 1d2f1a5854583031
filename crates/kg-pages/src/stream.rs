//! Selection and loading of the records a template is built from.
//!
//! A template describes the records it needs through a [`StreamConfig`]: which fields to fetch, which entities qualify
//! (by entity type and saved filter) and for which locales pages are generated. The pipeline then reads the stream
//! exports on disk and hands every qualifying record, reduced to the declared fields, to the template.
use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info, warn};
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::Value;

use crate::errors::RecordError;

mod projection;

pub use projection::project_fields;

/// Declares the records and fields a template is generated from.
///
/// ## Example
/// ```rs
/// use kg_pages::stream::{Localization, StreamConfig, StreamFilter};
///
/// let stream = StreamConfig {
///     id: "locations".into(),
///     fields: vec!["id".into(), "name".into(), "address".into()],
///     filter: StreamFilter {
///         entity_types: vec!["location".into()],
///         saved_filter_ids: vec![],
///     },
///     localization: Localization {
///         locales: vec!["en".into()],
///         primary: false,
///     },
/// };
/// ```
#[derive(Debug, Clone)]
pub struct StreamConfig {
    pub id: String,
    /// The exhaustive list of fields to fetch. Dotted fields (`c_specialtyPages.name`) select their top-level field.
    pub fields: Vec<String>,
    pub filter: StreamFilter,
    pub localization: Localization,
}

/// Restricts a stream to some entities.
///
/// A record qualifies if its entity type is one of `entity_types` AND it belongs to at least one of
/// `saved_filter_ids`. An empty list puts no constraint on its side.
#[derive(Debug, Clone, Default)]
pub struct StreamFilter {
    pub entity_types: Vec<String>,
    pub saved_filter_ids: Vec<String>,
}

impl StreamFilter {
    pub fn matches(&self, entity_type: Option<&str>, saved_filter_ids: &[String]) -> bool {
        let type_matches = self.entity_types.is_empty()
            || entity_type.is_some_and(|entity_type| {
                self.entity_types
                    .iter()
                    .any(|expected| expected == entity_type)
            });

        let saved_filter_matches = self.saved_filter_ids.is_empty()
            || saved_filter_ids
                .iter()
                .any(|id| self.saved_filter_ids.contains(id));

        type_matches && saved_filter_matches
    }
}

#[derive(Debug, Clone)]
pub struct Localization {
    pub locales: Vec<String>,
    /// Whether this stream is the primary source of pages for its entities.
    pub primary: bool,
}

impl Localization {
    pub fn includes(&self, locale: &str) -> bool {
        self.locales.iter().any(|l| l == locale)
    }
}

/// A record loaded from the stream, along with where it came from.
#[derive(Debug)]
pub struct StreamEntry<R> {
    pub data: R,
    pub locale: String,
    pub file_path: PathBuf,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StreamMeta {
    locale: Option<String>,
    entity_type: Option<EntityTypeRef>,
    #[serde(default)]
    saved_filter_ids: Vec<String>,
}

#[derive(Deserialize)]
struct EntityTypeRef {
    id: String,
}

/// Loads every record matched by `pattern` that `config` selects.
///
/// Each file holds either a single record object or an array of records. Records outside the configured locales or
/// filter are skipped, the remaining ones are projected onto the declared fields and deserialized into `R`.
///
/// A record that cannot be read into `R` is rejected with a warning, the rest of the stream still loads. Only
/// unreadable or malformed files fail the whole load.
pub fn load_stream<R>(pattern: &str, config: &StreamConfig) -> Result<Vec<StreamEntry<R>>, RecordError>
where
    R: DeserializeOwned,
{
    let paths = glob::glob(pattern).map_err(|source| RecordError::Pattern {
        pattern: pattern.to_string(),
        source,
    })?;

    let mut entries = Vec::new();

    // Unreadable directory entries are skipped, like a missing file would be.
    for path in paths.flatten() {
        let raw = read_stream_file(&path)?;
        let total = raw.len();
        let before = entries.len();
        let mut rejected = 0;

        for (index, record) in raw.into_iter().enumerate() {
            match select_record(record, index, &path, config) {
                Ok(Some(entry)) => entries.push(entry),
                Ok(None) => {}
                Err(error) => {
                    warn!(target: "stream", "{}, skipping it", error);
                    rejected += 1;
                }
            }
        }

        if rejected > 0 {
            info!(target: "stream", "{} {} of {} records selected, {} rejected", path.display(), entries.len() - before, total, rejected);
        } else {
            info!(target: "stream", "{} {} of {} records selected", path.display(), entries.len() - before, total);
        }
    }

    Ok(entries)
}

fn read_stream_file(path: &Path) -> Result<Vec<Value>, RecordError> {
    let content = fs::read_to_string(path).map_err(|source| RecordError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;

    let value: Value = serde_json::from_str(&content).map_err(|source| RecordError::ParseFailed {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(match value {
        Value::Array(records) => records,
        record => vec![record],
    })
}

fn select_record<R>(
    record: Value,
    index: usize,
    path: &Path,
    config: &StreamConfig,
) -> Result<Option<StreamEntry<R>>, RecordError>
where
    R: DeserializeOwned,
{
    let meta = match record.get("meta") {
        Some(meta) => Some(
            serde_json::from_value::<StreamMeta>(meta.clone()).map_err(|source| RecordError::Invalid {
                path: path.to_path_buf(),
                index,
                source,
            })?,
        ),
        None => None,
    };

    let Some(StreamMeta {
        locale: Some(locale),
        entity_type,
        saved_filter_ids,
    }) = meta
    else {
        return Err(RecordError::MissingField {
            path: path.to_path_buf(),
            index,
            field: "meta.locale",
        });
    };

    if !config.localization.includes(&locale) {
        debug!(target: "stream", "record #{} in {} skipped, locale `{}` is not generated", index, path.display(), locale);
        return Ok(None);
    }

    let entity_type = entity_type.map(|entity_type| entity_type.id);
    if !config.filter.matches(entity_type.as_deref(), &saved_filter_ids) {
        debug!(target: "stream", "record #{} in {} skipped, not matched by the stream filter", index, path.display());
        return Ok(None);
    }

    let projected = project_fields(record, &config.fields);
    let data = serde_json::from_value(projected).map_err(|source| RecordError::Invalid {
        path: path.to_path_buf(),
        index,
        source,
    })?;

    Ok(Some(StreamEntry {
        data,
        locale,
        file_path: path.to_path_buf(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[derive(Deserialize, Debug)]
    struct TestRecord {
        id: String,
        #[serde(default)]
        name: String,
        description: Option<String>,
    }

    fn config() -> StreamConfig {
        StreamConfig {
            id: "test".to_string(),
            fields: vec!["id".to_string(), "name".to_string()],
            filter: StreamFilter {
                entity_types: vec!["healthcareProfessional".to_string()],
                saved_filter_ids: vec!["published".to_string()],
            },
            localization: Localization {
                locales: vec!["en".to_string()],
                primary: false,
            },
        }
    }

    fn record(id: &str, locale: &str, entity_type: &str, filters: &[&str]) -> Value {
        serde_json::json!({
            "id": id,
            "name": format!("Provider {}", id),
            "description": "Not declared",
            "meta": {
                "locale": locale,
                "entityType": { "id": entity_type },
                "savedFilterIds": filters,
            }
        })
    }

    #[test]
    fn test_filter_requires_entity_type_and_saved_filter() {
        let filter = config().filter;

        assert!(filter.matches(Some("healthcareProfessional"), &["published".to_string()]));
        assert!(!filter.matches(Some("location"), &["published".to_string()]));
        assert!(!filter.matches(Some("healthcareProfessional"), &["draft".to_string()]));
        assert!(!filter.matches(None, &["published".to_string()]));
    }

    #[test]
    fn test_filter_accepts_any_listed_saved_filter() {
        let filter = StreamFilter {
            entity_types: vec![],
            saved_filter_ids: vec!["a".to_string(), "b".to_string()],
        };

        assert!(filter.matches(None, &["c".to_string(), "b".to_string()]));
        assert!(!filter.matches(None, &[]));
    }

    #[test]
    fn test_load_stream_selects_and_projects() {
        let dir = tempdir().unwrap();
        let records = Value::Array(vec![
            record("1", "en", "healthcareProfessional", &["published"]),
            record("2", "fr", "healthcareProfessional", &["published"]),
            record("3", "en", "location", &["published"]),
            record("4", "en", "healthcareProfessional", &["draft", "published"]),
        ]);
        fs::write(dir.path().join("providers.json"), records.to_string()).unwrap();

        let pattern = format!("{}/*.json", dir.path().display());
        let entries = load_stream::<TestRecord>(&pattern, &config()).unwrap();

        let ids: Vec<_> = entries.iter().map(|entry| entry.data.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);
        assert_eq!(entries[0].data.name, "Provider 1");
        assert_eq!(entries[0].locale, "en");
        // Not part of the declared fields, so never reaches the record.
        assert!(entries[0].data.description.is_none());
    }

    #[test]
    fn test_load_stream_accepts_single_record_files() {
        let dir = tempdir().unwrap();
        let single = record("9", "en", "healthcareProfessional", &["published"]);
        fs::write(dir.path().join("one.json"), single.to_string()).unwrap();

        let pattern = format!("{}/*.json", dir.path().display());
        let entries = load_stream::<TestRecord>(&pattern, &config()).unwrap();

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].data.id, "9");
    }

    #[test]
    fn test_record_without_locale_is_rejected() {
        let broken = serde_json::json!({ "id": "1", "meta": {} });

        let result = select_record::<TestRecord>(broken, 0, Path::new("broken.json"), &config());

        assert!(matches!(
            result,
            Err(RecordError::MissingField { index: 0, field: "meta.locale", .. })
        ));
    }

    #[test]
    fn test_malformed_meta_reports_its_own_error() {
        let mut broken = record("1", "en", "healthcareProfessional", &["published"]);
        broken["meta"]["savedFilterIds"] = serde_json::json!("published");

        let result = select_record::<TestRecord>(broken, 3, Path::new("broken.json"), &config());

        let Err(RecordError::Invalid { index: 3, source, .. }) = result else {
            panic!("expected an invalid record error, got {:?}", result.map(|_| ()));
        };
        assert!(source.to_string().contains("invalid type"));
    }

    #[test]
    fn test_record_not_matching_schema_is_rejected() {
        let mut bad = record("1", "en", "healthcareProfessional", &["published"]);
        bad["id"] = serde_json::json!(42);

        let result = select_record::<TestRecord>(bad, 0, Path::new("bad.json"), &config());

        assert!(matches!(result, Err(RecordError::Invalid { index: 0, .. })));
    }

    #[test]
    fn test_load_stream_skips_rejected_records() {
        let dir = tempdir().unwrap();
        let mut bad = record("2", "en", "healthcareProfessional", &["published"]);
        bad["id"] = serde_json::json!(42);
        let records = Value::Array(vec![
            record("1", "en", "healthcareProfessional", &["published"]),
            bad,
            serde_json::json!({ "id": "3", "meta": {} }),
            record("4", "en", "healthcareProfessional", &["published"]),
        ]);
        fs::write(dir.path().join("providers.json"), records.to_string()).unwrap();

        let pattern = format!("{}/*.json", dir.path().display());
        let entries = load_stream::<TestRecord>(&pattern, &config()).unwrap();

        let ids: Vec<_> = entries.iter().map(|entry| entry.data.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "4"]);
    }

    #[test]
    fn test_load_stream_reports_malformed_json() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("bad.json"), "{ not json").unwrap();

        let pattern = format!("{}/*.json", dir.path().display());
        let result = load_stream::<TestRecord>(&pattern, &config());

        assert!(matches!(result, Err(RecordError::ParseFailed { .. })));
    }
}
