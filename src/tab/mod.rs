//! tab tracker: open a bill, take commands, save it

pub(crate) mod controller;
pub(crate) mod model;
pub(crate) mod storage;
pub(crate) mod terminal;
pub(crate) mod util;

use crate::tab::controller::error::SessionError;
use crate::tab::controller::{open_bill, Session};
use crate::tab::model::bill::Bill;
use crate::tab::model::config::TabConfig;
use crate::tab::storage::BillSink;
use crate::tab::terminal::Terminal;
use log::{error, info, warn};

/// Outcome of a finished run
#[derive(Debug)]
pub(crate) struct Saved {
    pub bill: Bill,
    pub location: String,
}

/// Run one bill from naming to a successful save.
///
/// A failed save hands control back to the command loop so the user can try again.
pub(crate) fn run<T: Terminal, S: BillSink>(
    TabConfig { bill_name, .. }: &TabConfig,
    terminal: &mut T,
    sink: &mut S,
) -> Result<Saved, SessionError> {
    let mut bill = match bill_name {
        Some(name) => {
            let bill = Bill::create(name.as_str())?;
            terminal.say(&format!("created the bill for - {}", bill.name()))?;
            bill
        }
        None => open_bill(terminal)?,
    };

    let location = loop {
        match Session::new(&mut bill, &mut *terminal, &mut *sink).run() {
            Ok(location) => break location,
            Err(e @ SessionError::Storage { .. }) => {
                error!("saving bill={} failed, {}", bill.name(), e);
                terminal.say(&e.to_string())?;
                terminal.say("choose s to try saving again")?;
            }
            Err(e) => {
                warn!("session for bill={} ended without saving, {}", bill.name(), e);
                return Err(e);
            }
        }
    };

    match serde_json::to_string(&bill) {
        Ok(json) => info!("final bill={}", json),
        Err(e) => warn!("failed to serialize bill={}, {}", bill.name(), e),
    }
    Ok(Saved { bill, location })
}
