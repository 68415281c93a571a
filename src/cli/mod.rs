pub mod commands;
pub mod demo;
pub mod session;
pub mod shell;

pub use commands::*;

use crate::config::Config;
use crate::error::CalmtaskError;
use crate::logging;
use crate::output;
use crate::views;

use session::Session;

/// Load config, install logging and build the session the command runs against.
pub(crate) fn open_session(global: &GlobalArgs) -> Result<Session, CalmtaskError> {
    let config = Config::load(global.config.as_deref())?;
    if let Err(e) = logging::init_tracing(global.verbose, global.quiet, config.log_level.as_deref()) {
        return Err(CalmtaskError::config(e.to_string()));
    }
    let today = global.today.as_deref().map(views::parse_date).transpose()?;
    let seed = global.seed || config.seed_sample_tasks;

    let mut session = Session::new(config, today, global.json);
    if seed {
        session.seed_samples()?;
    }
    Ok(session)
}

pub(crate) fn report_error(err: &CalmtaskError, json_output: bool) -> i32 {
    if json_output {
        println!("{}", output::json::error(err));
    } else {
        eprintln!("Error: {}", err.message);
    }
    1
}
