use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::log::StoreLogger;
use crate::store::JsonStore;
use std::path::Path;

pub fn run<L: StoreLogger>(store: &JsonStore<L>, path: &Path) -> Result<CmdResult> {
    let mut result = CmdResult::default().with_document(store.load(path));
    if !path.exists() {
        result.add_message(CmdMessage::info(format!(
            "{} does not exist yet",
            path.display()
        )));
    }
    Ok(result)
}
