use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, StoreError};
use crate::net::{is_local, local_ip};
use std::net::IpAddr;

/// Without an address, reports this host's outbound address. With one,
/// reports whether it is loopback or private.
pub fn run(address: Option<&str>) -> Result<CmdResult> {
    let Some(raw) = address else {
        return Ok(CmdResult::default().with_output(local_ip().to_string()));
    };

    let addr: IpAddr = raw
        .parse()
        .map_err(|_| StoreError::Command(format!("Not an IP address: {}", raw)))?;

    let mut result = CmdResult::default().with_output(is_local(addr).to_string());
    if is_local(addr) {
        result.add_message(CmdMessage::info(format!("{} is local", addr)));
    } else {
        result.add_message(CmdMessage::info(format!("{} is not local", addr)));
    }
    Ok(result)
}
