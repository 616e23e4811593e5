use std::env;
use std::path::PathBuf;
use std::sync::mpsc;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::{AudioPlayer, EngineEvent};
use crate::logging;
use crate::player::{PlayerController, UiUpdate};

mod event_loop;
mod settings;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, config_problem) = settings::load_settings();

    match logging::init(&settings.logging) {
        Ok(path) => tracing::info!(log = %path.display(), "cadenza starting"),
        Err(e) => eprintln!("cadenza: logging disabled: {e}"),
    }
    if let Some(problem) = &config_problem {
        tracing::warn!("{problem}");
    }

    let (update_tx, update_rx) = mpsc::channel::<UiUpdate>();
    let (event_tx, event_rx) = mpsc::channel::<EngineEvent>();

    let audio_player = AudioPlayer::new(event_tx)?;
    let mut controller = PlayerController::new(audio_player, &settings, update_tx)?;
    let mut app = App::new(&settings.ui);
    if let Some(problem) = config_problem {
        app.set_status(problem);
    }

    match env::args_os().nth(1).map(PathBuf::from) {
        Some(dir) => {
            if let Err(e) = controller.open_folder(&dir) {
                tracing::warn!(error = %e, "could not open folder from command line");
                app.set_status(e.to_string());
            }
        }
        None => app.begin_prompt(),
    }

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result = event_loop::run(
        &mut terminal,
        &settings,
        &mut app,
        &mut controller,
        &update_rx,
        &event_rx,
    );

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Stops the audio thread and the position watcher.
    drop(controller);
    tracing::info!("cadenza stopped");

    run_result
}
