use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, StoreError};
use crate::log::StoreLogger;
use crate::merge::update_document;
use crate::store::JsonStore;
use serde_json::Value;
use std::path::Path;

/// Deep-merges the JSON object `raw_patch` into the document at `path`.
pub fn run<L: StoreLogger>(store: &JsonStore<L>, path: &Path, raw_patch: &str) -> Result<CmdResult> {
    let patch: Value = serde_json::from_str(raw_patch)?;
    let Value::Object(entries) = &patch else {
        return Err(StoreError::Command(
            "Merge patch must be a JSON object".to_string(),
        ));
    };
    let count = entries.len();

    let mut doc = store.load(path);
    update_document(&mut doc, &patch);
    store.try_save(path, &doc)?;

    let mut result = CmdResult::default().with_document(doc);
    result.add_message(CmdMessage::success(format!(
        "Merged {} top-level key(s) into {}",
        count,
        path.display()
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;
    use crate::log::MemoryLogger;
    use serde_json::json;
    use tempfile::tempdir;

    fn store() -> JsonStore<MemoryLogger> {
        JsonStore::with_logger(StoreConfig::default(), MemoryLogger::new())
    }

    #[test]
    fn merge_into_existing_document() {
        let temp = tempdir().unwrap();
        let store = store();
        let path = temp.path().join("state.json");
        store
            .try_save(&path, &json!({"config": {"port": 80, "name": "hue"}}))
            .unwrap();

        let result = run(&store, &path, r#"{"config": {"port": 8080}}"#).unwrap();
        let expected = json!({"config": {"port": 8080, "name": "hue"}});
        assert_eq!(result.document, Some(expected.clone()));
        assert_eq!(store.try_load(&path).unwrap(), expected);
    }

    #[test]
    fn merge_rejects_non_object_patch() {
        let temp = tempdir().unwrap();
        let err = run(&store(), &temp.path().join("s.json"), "[1, 2]").unwrap_err();
        assert!(matches!(err, StoreError::Command(_)));
    }

    #[test]
    fn merge_rejects_invalid_json() {
        let temp = tempdir().unwrap();
        let err = run(&store(), &temp.path().join("s.json"), "{oops").unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }
}
