use std::path::{Path, PathBuf};

use crate::config;
use crate::session::Session;
use crate::webdriver::SiteInspector;
use crate::worker::SessionWorker;

pub const USAGE: &str = "usage: playlog [HISTORY_CSV] | playlog --print-config";

/// What the command line asked for.
#[derive(Debug, PartialEq, Eq)]
pub enum Invocation {
    PrintConfig,
    Run { history: Option<PathBuf> },
}

pub fn parse_args<I>(args: I) -> Result<Invocation, String>
where
    I: IntoIterator<Item = String>,
{
    let mut history = None;
    for arg in args {
        match arg.as_str() {
            "--print-config" => return Ok(Invocation::PrintConfig),
            "-h" | "--help" => return Err(USAGE.to_string()),
            a if a.starts_with('-') => return Err(format!("unknown option `{a}`\n{USAGE}")),
            _ if history.is_some() => return Err(USAGE.to_string()),
            other => history = Some(PathBuf::from(other)),
        }
    }
    Ok(Invocation::Run { history })
}

/// Open the player page, load the history and start the session worker.
pub fn start_session(
    settings: &config::Settings,
    history_path: &Path,
) -> Result<SessionWorker, Box<dyn std::error::Error>> {
    let inspector = SiteInspector::launch(&settings.browser)?;
    let session = Session::initialize(inspector, history_path, settings).inspect_err(|e| {
        if e.is_corruption() {
            tracing::error!(error = %e, path = %history_path.display(), "play history is corrupt, not touching it");
        } else {
            tracing::error!(error = %e, path = %history_path.display(), "cannot load play history");
        }
    })?;
    Ok(SessionWorker::spawn(session)?)
}
