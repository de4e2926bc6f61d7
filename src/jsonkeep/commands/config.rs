use crate::commands::{CmdMessage, CmdResult};
use crate::config::StoreConfig;
use crate::error::Result;
use crate::log::StoreLogger;
use crate::store::JsonStore;
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run<L: StoreLogger>(
    store: &JsonStore<L>,
    config_dir: &Path,
    action: ConfigAction,
) -> Result<CmdResult> {
    let mut config = StoreConfig::load(store, config_dir);
    match action {
        ConfigAction::ShowAll => Ok(CmdResult::default().with_config(config)),
        ConfigAction::ShowKey(key) => {
            let mut result = CmdResult::default();
            match config.get(&key) {
                Some(val) => result.output.push(val),
                None => {
                    result.add_message(CmdMessage::error(format!("Unknown config key: {}", key)))
                }
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            if let Err(e) = config.set(&key, &value) {
                let mut res = CmdResult::default();
                res.add_message(CmdMessage::error(e.to_string()));
                return Ok(res);
            }
            config.save(config_dir)?;
            let display_val = config.get(&key).unwrap_or(value);
            let mut result = CmdResult::default().with_config(config);
            result.add_message(CmdMessage::success(format!("{} set to {}", key, display_val)));
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::MemoryLogger;
    use tempfile::tempdir;

    fn store() -> JsonStore<MemoryLogger> {
        JsonStore::with_logger(StoreConfig::default(), MemoryLogger::new())
    }

    #[test]
    fn show_all_returns_default_config_when_no_file() {
        let temp = tempdir().unwrap();
        let result = run(&store(), temp.path(), ConfigAction::ShowAll).unwrap();
        assert_eq!(result.config, Some(StoreConfig::default()));
    }

    #[test]
    fn set_then_show_key() {
        let temp = tempdir().unwrap();
        let store = store();

        let result = run(
            &store,
            temp.path(),
            ConfigAction::Set("create-dirs".into(), "true".into()),
        )
        .unwrap();
        assert!(!result.has_errors());

        let result = run(&store, temp.path(), ConfigAction::ShowKey("create-dirs".into())).unwrap();
        assert_eq!(result.output, vec!["true".to_string()]);
    }

    #[test]
    fn set_unknown_key_reports_error() {
        let temp = tempdir().unwrap();
        let result = run(
            &store(),
            temp.path(),
            ConfigAction::Set("colour".into(), "true".into()),
        )
        .unwrap();
        assert!(result.has_errors());
        assert!(!temp.path().join("config.json").exists());
    }

    #[test]
    fn show_unknown_key_reports_error() {
        let temp = tempdir().unwrap();
        let result = run(&store(), temp.path(), ConfigAction::ShowKey("nope".into())).unwrap();
        assert!(result.has_errors());
    }
}
