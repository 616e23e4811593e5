use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::{App, InputMode};
use crate::audio::{EngineEvent, Transport};
use crate::config;
use crate::error::Result as PlayerResult;
use crate::player::{PlayerController, UiUpdate};
use crate::ui;

/// What a key press asks for in normal mode.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Quit,
    SelectNext,
    SelectPrev,
    PlaySelected,
    PlayPause,
    Next,
    Previous,
    SeekForward,
    SeekBack,
    VolumeUp,
    VolumeDown,
    Shuffle,
    ToggleRepeat,
    Stop,
    OpenPrompt,
    ToggleHistory,
}

/// Key bindings for normal mode.
pub fn action_for(key: KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return matches!(key.code, KeyCode::Char('c')).then_some(Action::Quit);
    }
    let action = match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('j') | KeyCode::Down => Action::SelectNext,
        KeyCode::Char('k') | KeyCode::Up => Action::SelectPrev,
        KeyCode::Enter => Action::PlaySelected,
        KeyCode::Char(' ') | KeyCode::Char('p') => Action::PlayPause,
        KeyCode::Char('l') => Action::Next,
        KeyCode::Char('h') => Action::Previous,
        KeyCode::Char('L') | KeyCode::Right => Action::SeekForward,
        KeyCode::Char('H') | KeyCode::Left => Action::SeekBack,
        KeyCode::Char('+') | KeyCode::Char('=') => Action::VolumeUp,
        KeyCode::Char('-') => Action::VolumeDown,
        KeyCode::Char('s') => Action::Shuffle,
        KeyCode::Char('r') => Action::ToggleRepeat,
        KeyCode::Char('x') => Action::Stop,
        KeyCode::Char('o') => Action::OpenPrompt,
        KeyCode::Char('y') => Action::ToggleHistory,
        _ => return None,
    };
    Some(action)
}

/// Show a failed operation in the status line and the log.
fn report(app: &mut App, result: PlayerResult<()>) {
    if let Err(e) = result {
        tracing::warn!(error = %e, "operation failed");
        app.set_status(e.to_string());
    }
}

/// Apply pending engine events and controller updates to `app`.
pub fn sync<T: Transport>(
    app: &mut App,
    controller: &mut PlayerController<T>,
    updates: &Receiver<UiUpdate>,
    events: &Receiver<EngineEvent>,
) {
    while let Ok(ev) = events.try_recv() {
        let result = controller.handle_engine_event(ev);
        report(app, result);
    }
    while let Ok(update) = updates.try_recv() {
        app.apply(update);
    }
}

/// Run one normal-mode action. Returns `true` when the app should exit.
pub fn perform<T: Transport>(
    action: Action,
    settings: &config::Settings,
    app: &mut App,
    controller: &mut PlayerController<T>,
) -> bool {
    let seek_step = f64::from(settings.controls.seek_step_percent);
    let volume_step = f64::from(settings.controls.volume_step_percent);

    let result = match action {
        Action::Quit => return true,
        Action::SelectNext => {
            app.next();
            Ok(())
        }
        Action::SelectPrev => {
            app.prev();
            Ok(())
        }
        Action::PlaySelected => controller.play(app.selected),
        Action::PlayPause => controller.play_pause(),
        Action::Next => controller.next(),
        Action::Previous => controller.previous(),
        Action::SeekForward => controller.seek_by(seek_step),
        Action::SeekBack => controller.seek_by(-seek_step),
        Action::VolumeUp => controller.adjust_volume(volume_step),
        Action::VolumeDown => controller.adjust_volume(-volume_step),
        Action::Shuffle => controller.shuffle(),
        Action::ToggleRepeat => {
            controller.toggle_repeat();
            Ok(())
        }
        Action::Stop => controller.stop(),
        Action::OpenPrompt => {
            app.begin_prompt();
            Ok(())
        }
        Action::ToggleHistory => {
            app.toggle_history();
            Ok(())
        }
    };
    report(app, result);
    false
}

fn handle_prompt_key<T: Transport>(
    key: KeyEvent,
    app: &mut App,
    controller: &mut PlayerController<T>,
) {
    match key.code {
        KeyCode::Esc => app.cancel_prompt(),
        KeyCode::Backspace => app.pop_prompt_char(),
        KeyCode::Enter => {
            if let Some(dir) = app.take_prompt() {
                let result = controller.open_folder(&dir);
                report(app, result);
            }
        }
        KeyCode::Char(c) if !c.is_control() => app.push_prompt_char(c),
        _ => {}
    }
}

/// Main terminal event loop: drains the update and engine channels, draws,
/// and dispatches keys. Returns `Ok(())` when shutdown is requested.
pub fn run<T: Transport>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    controller: &mut PlayerController<T>,
    updates: &Receiver<UiUpdate>,
    events: &Receiver<EngineEvent>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        sync(app, controller, updates, events);

        terminal.draw(|f| ui::draw(f, app, &settings.ui, &settings.controls))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if app.mode == InputMode::FolderPrompt {
                    handle_prompt_key(key, app, controller);
                    continue;
                }
                let Some(action) = action_for(key) else {
                    continue;
                };
                if action != Action::SelectNext && action != Action::SelectPrev {
                    app.clear_status();
                }
                if perform(action, settings, app, controller) {
                    break;
                }
            }
        }
    }

    Ok(())
}
