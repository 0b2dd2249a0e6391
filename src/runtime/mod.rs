use std::env;
use std::sync::mpsc;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::logging;
use crate::mpris::ControlCmd;

mod event_loop;
mod mpris_sync;
mod settings;
mod startup;


pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings::load_settings();

    let history = match startup::parse_args(env::args().skip(1))? {
        startup::Invocation::PrintConfig => {
            print!("{}", settings.to_toml()?);
            return Ok(());
        }
        startup::Invocation::Run { history } => history,
    };
    let history_path = history.unwrap_or_else(|| settings.history_path());

    let _log_guard = logging::init(&settings.logging, &settings.log_directory())?;
    tracing::info!(
        history = %history_path.display(),
        webdriver = %settings.browser.webdriver_url,
        "starting playlog"
    );

    let worker = startup::start_session(&settings, &history_path)?;
    let mut app = App::new(
        worker.view_handle(),
        worker.tracker_handle(),
        history_path.display().to_string(),
    );

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx);

    let run_result: Result<(), Box<dyn std::error::Error>> = (|| {
        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let mut state = event_loop::EventLoopState::new(&app);
        let result = event_loop::run(
            &mut terminal,
            &settings,
            &mut app,
            &worker,
            &mpris,
            &control_rx,
            &mut state,
        );

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        result
    })();

    // Waits for the tracker's current cycle and closes the browser session.
    worker.quit();
    tracing::info!("playlog stopped");

    run_result
}
