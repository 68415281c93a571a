use std::io::{self, Cursor};

use crate::cli::{open_session, report_error, GlobalArgs};
use crate::store::sample;

const DEMO_SCRIPT: &str = "home\ncalendar\n";

/// Seed the sample board and render it the way the home and calendar screens do.
pub fn run(global: &GlobalArgs) -> i32 {
    let global = GlobalArgs {
        // The sample board is always loaded, and only once.
        seed: true,
        today: global
            .today
            .clone()
            .or_else(|| Some(sample::sample_today().format("%Y-%m-%d").to_string())),
        ..global.clone()
    };
    let result = open_session(&global).and_then(|mut session| {
        session.run(Cursor::new(DEMO_SCRIPT), io::stdout().lock())
    });
    match result {
        Ok(()) => 0,
        Err(e) => report_error(&e, global.json),
    }
}
