use std::env;
use std::io::{self, Stdout, Write};
use std::sync::mpsc;
use std::time::Duration;

use crossterm::cursor::Show;
use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use log::{info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::{AudioPlayer, Titles};
use crate::config::Settings;
use crate::mpris::{ControlCmd, MprisHandle};

mod event_loop;
mod logging;
mod mpris_sync;
mod settings;
mod startup;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, settings_problem) = settings::load_settings();
    let log_problem = logging::init(&settings.log).err();
    if let Some(msg) = &settings_problem {
        warn!("{msg}");
    }

    let dir = startup::resolve_dir(env::args().nth(1), &settings.library);
    let catalog = startup::load_catalog(&dir, &settings.library);
    info!("loaded {} track(s) from {}", catalog.len(), dir.display());

    let mut app = App::new(catalog.display_names());
    app.set_current_dir(dir.display().to_string());

    let audio_player = AudioPlayer::new(
        catalog,
        Titles::from(&settings.ui),
        Duration::from_millis(settings.playback.tick_ms),
    );
    app.set_playback_handle(audio_player.playback_handle());

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = if settings.playback.mpris {
        crate::mpris::spawn_mpris(control_tx.clone())
    } else {
        crate::mpris::detached()
    };

    let run_result = run_terminal(
        &settings,
        &mut app,
        &audio_player,
        &mpris,
        &control_tx,
        &control_rx,
    );

    audio_player.shutdown();

    // Without a logger these would otherwise be lost.
    if let Some(msg) = log_problem {
        eprintln!("rawplayer: {msg}");
        if let Some(msg) = settings_problem {
            eprintln!("rawplayer: {msg}");
        }
    }

    run_result
}

/// Own the terminal for the lifetime of the event loop. Raw mode and the
/// alternate screen are undone on every exit path, including a failed setup.
fn run_terminal(
    settings: &Settings,
    app: &mut App,
    audio_player: &AudioPlayer,
    mpris: &MprisHandle,
    control_tx: &mpsc::Sender<ControlCmd>,
    control_rx: &mpsc::Receiver<ControlCmd>,
) -> Result<(), Box<dyn std::error::Error>> {
    enable_raw_mode()?;
    let mut terminal = match open_terminal() {
        Ok(terminal) => terminal,
        Err(e) => {
            let _ = restore_terminal(&mut io::stdout());
            return Err(e.into());
        }
    };

    let mut state = event_loop::EventLoopState::default();
    let result = event_loop::run(
        &mut terminal,
        settings,
        app,
        audio_player,
        mpris,
        control_tx,
        control_rx,
        &mut state,
    );

    restore_terminal(terminal.backend_mut())?;
    result
}

fn open_terminal() -> io::Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(stdout))
}

/// Leave the alternate screen, show the cursor and drop raw mode.
fn restore_terminal<W: Write>(out: &mut W) -> io::Result<()> {
    let screen = execute!(out, LeaveAlternateScreen, Show);
    disable_raw_mode()?;
    screen
}
