use crate::commands::{parse_value, CmdMessage, CmdResult};
use crate::error::Result;
use crate::log::StoreLogger;
use crate::model::{remove_path, set_path};
use crate::store::JsonStore;
use std::path::Path;

/// Sets `key` to `raw` (parsed as JSON, else kept as a string) and saves.
pub fn run<L: StoreLogger>(
    store: &JsonStore<L>,
    path: &Path,
    key: &str,
    raw: &str,
) -> Result<CmdResult> {
    let mut doc = store.load(path);
    let value = parse_value(raw);
    set_path(&mut doc, key, value.clone())?;
    store.try_save(path, &doc)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("{} set to {}", key, value)));
    Ok(result)
}

/// Removes `key` and saves. A missing key leaves the file untouched.
pub fn unset<L: StoreLogger>(store: &JsonStore<L>, path: &Path, key: &str) -> Result<CmdResult> {
    let mut doc = store.load(path);
    let mut result = CmdResult::default();

    if remove_path(&mut doc, key)?.is_none() {
        result.add_message(CmdMessage::warning(format!("Key not found: {}", key)));
        return Ok(result);
    }
    store.try_save(path, &doc)?;
    result.add_message(CmdMessage::success(format!("{} removed", key)));
    Ok(result)
}
