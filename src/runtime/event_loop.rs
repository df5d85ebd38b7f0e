use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::debug;
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::{AudioCmd, AudioPlayer};
use crate::config;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::runtime::mpris_sync::update_mpris;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
}

/// What a key press asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// A transport command, routed like an MPRIS request.
    Control(ControlCmd),
    /// Play the track under the cursor.
    PlaySelected,
    CursorDown,
    CursorUp,
    CursorTop,
    CursorBottom,
    ToggleFollow,
}

/// Translate a key press, tracking the `gg` prefix in `state`.
pub fn key_action(key: KeyEvent, state: &mut EventLoopState) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let pending_gg = std::mem::take(&mut state.pending_gg);
    let action = match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Action::Quit,
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('g') => {
            if pending_gg {
                Action::CursorTop
            } else {
                state.pending_gg = true;
                return None;
            }
        }
        KeyCode::Char('G') | KeyCode::End => Action::CursorBottom,
        KeyCode::Home => Action::CursorTop,
        KeyCode::Char('j') | KeyCode::Down => Action::CursorDown,
        KeyCode::Char('k') | KeyCode::Up => Action::CursorUp,
        KeyCode::Enter => Action::PlaySelected,
        KeyCode::Char('p') | KeyCode::Char(' ') => Action::Control(ControlCmd::PlayPause),
        KeyCode::Char('s') => Action::Control(ControlCmd::Stop),
        KeyCode::Char('l') | KeyCode::Right => Action::Control(ControlCmd::Next),
        KeyCode::Char('h') | KeyCode::Left => Action::Control(ControlCmd::Prev),
        KeyCode::Char('f') => Action::ToggleFollow,
        _ => return None,
    };
    Some(action)
}

/// Map a media-control request onto the audio command queue.
/// `None` means the runtime should shut down.
pub fn control_to_audio(cmd: &ControlCmd) -> Option<AudioCmd> {
    match cmd {
        ControlCmd::Quit => None,
        ControlCmd::Play => Some(AudioCmd::Play),
        ControlCmd::Pause => Some(AudioCmd::Pause),
        ControlCmd::PlayPause => Some(AudioCmd::PlayPause),
        ControlCmd::Stop => Some(AudioCmd::Stop),
        ControlCmd::Next => Some(AudioCmd::Next),
        ControlCmd::Prev => Some(AudioCmd::Prev),
    }
}

/// Main terminal event loop: handles input, UI drawing, sync with the audio
/// thread and MPRIS. Returns `Ok(())` when shutdown is requested.
#[allow(clippy::too_many_arguments)]
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    audio_player: &AudioPlayer,
    mpris: &MprisHandle,
    control_tx: &mpsc::Sender<ControlCmd>,
    control_rx: &mpsc::Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Keep MPRIS in sync even when playback changes come from media keys or a track ending.
        if app.sync_playback() {
            update_mpris(mpris, app);
        }

        terminal.draw(|f| ui::draw(f, app, &settings.ui))?;

        while let Ok(cmd) = control_rx.try_recv() {
            match control_to_audio(&cmd) {
                Some(audio_cmd) => {
                    if !app.has_tracks() {
                        continue;
                    }
                    app.follow_playback_on();
                    let _ = audio_player.send(audio_cmd);
                }
                None => return Ok(()),
            }
        }

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        let Some(action) = key_action(key, state) else {
            continue;
        };
        debug!("key action {action:?}");

        match action {
            Action::Quit => return Ok(()),
            Action::Control(cmd) => {
                // Behave like MPRIS.
                let _ = control_tx.send(cmd);
            }
            Action::PlaySelected => {
                if app.has_tracks() {
                    app.follow_playback_on();
                    let _ = audio_player.send(AudioCmd::Select(app.selected));
                }
            }
            Action::CursorDown => {
                app.follow_playback_off();
                app.next();
            }
            Action::CursorUp => {
                app.follow_playback_off();
                app.prev();
            }
            Action::CursorTop => {
                app.follow_playback_off();
                app.select_first();
            }
            Action::CursorBottom => {
                app.follow_playback_off();
                app.select_last();
            }
            Action::ToggleFollow => {
                if app.follow_playback {
                    app.follow_playback_off();
                } else {
                    app.follow_playback_on();
                    if let Some(i) = app.state().index() {
                        app.set_selected(i);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn transport_keys_map_to_control_commands() {
        let mut state = EventLoopState::default();
        for (code, cmd) in [
            (KeyCode::Char(' '), ControlCmd::PlayPause),
            (KeyCode::Char('p'), ControlCmd::PlayPause),
            (KeyCode::Char('s'), ControlCmd::Stop),
            (KeyCode::Char('l'), ControlCmd::Next),
            (KeyCode::Char('h'), ControlCmd::Prev),
        ] {
            assert_eq!(
                key_action(press(code), &mut state),
                Some(Action::Control(cmd))
            );
        }
        assert_eq!(
            key_action(press(KeyCode::Enter), &mut state),
            Some(Action::PlaySelected)
        );
    }

    #[test]
    fn double_g_jumps_to_top_and_other_keys_reset_prefix() {
        let mut state = EventLoopState::default();
        assert_eq!(key_action(press(KeyCode::Char('g')), &mut state), None);
        assert_eq!(
            key_action(press(KeyCode::Char('g')), &mut state),
            Some(Action::CursorTop)
        );

        assert_eq!(key_action(press(KeyCode::Char('g')), &mut state), None);
        assert_eq!(
            key_action(press(KeyCode::Char('j')), &mut state),
            Some(Action::CursorDown)
        );
        assert!(!state.pending_gg);
    }

    #[test]
    fn ctrl_c_and_q_quit() {
        let mut state = EventLoopState::default();
        assert_eq!(
            key_action(
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
                &mut state
            ),
            Some(Action::Quit)
        );
        assert_eq!(
            key_action(press(KeyCode::Char('q')), &mut state),
            Some(Action::Quit)
        );
        assert_eq!(key_action(press(KeyCode::Char('c')), &mut state), None);
    }

    #[test]
    fn control_commands_map_onto_audio_queue() {
        assert_eq!(control_to_audio(&ControlCmd::Quit), None);
        assert_eq!(control_to_audio(&ControlCmd::Prev), Some(AudioCmd::Prev));
        assert_eq!(
            control_to_audio(&ControlCmd::PlayPause),
            Some(AudioCmd::PlayPause)
        );
    }
}
