use serde_json::Value;

/// Fields every record keeps regardless of the declared list.
const ALWAYS_KEPT: &[&str] = &["meta"];

/// Reduces a raw record to the declared fields.
///
/// Only top-level keys survive. A dotted field such as `c_specialtyPages.name` keeps the whole `c_specialtyPages`
/// value. Non-object values are returned unchanged.
pub fn project_fields(record: Value, fields: &[String]) -> Value {
    let Value::Object(map) = record else {
        return record;
    };

    let projected = map
        .into_iter()
        .filter(|(key, _)| {
            ALWAYS_KEPT.contains(&key.as_str())
                || fields
                    .iter()
                    .any(|field| field.split('.').next() == Some(key.as_str()))
        })
        .collect();

    Value::Object(projected)
}
