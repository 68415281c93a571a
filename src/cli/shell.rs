use std::io;

use tracing::info;

use crate::cli::{open_session, report_error, GlobalArgs};

pub fn run(global: &GlobalArgs) -> i32 {
    let result = open_session(global).and_then(|mut session| {
        info!(today = %session.today(), tasks = session.store().len(), "session started");
        session.run(io::stdin().lock(), io::stdout().lock())
    });
    match result {
        Ok(()) => 0,
        Err(e) => report_error(&e, global.json),
    }
}
