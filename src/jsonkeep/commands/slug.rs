use crate::commands::CmdResult;
use crate::error::Result;
use crate::slug::slugify;

pub fn run(text: &str) -> Result<CmdResult> {
    Ok(CmdResult::default().with_output(slugify(text)))
}
