use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::log::StoreLogger;
use crate::model::get_path;
use crate::store::JsonStore;
use std::path::Path;

pub fn run<L: StoreLogger>(store: &JsonStore<L>, path: &Path, key: &str) -> Result<CmdResult> {
    let doc = store.load(path);
    let mut result = CmdResult::default();
    match get_path(&doc, key)? {
        Some(value) => result.document = Some(value.clone()),
        None => result.add_message(CmdMessage::error(format!("Key not found: {}", key))),
    }
    Ok(result)
}
