use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::warn;

use crate::app::{App, InputMode};
use crate::config;
use crate::session::{Intent, SessionEvent, SessionHandle};
use crate::ui;

/// Main terminal event loop: folds session events into `app`, draws, and
/// turns key presses into intents. Returns `Ok(())` when the user quits.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    session: &SessionHandle,
    events: &mpsc::Receiver<SessionEvent>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        while let Ok(ev) = events.try_recv() {
            app.apply(ev);
        }

        terminal.draw(|f| ui::draw(f, app, &settings.ui))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match handle_key_event(key, settings, app) {
                    KeyOutcome::Quit => break,
                    KeyOutcome::Send(intent) => {
                        if session.send(intent).is_err() {
                            warn!("session thread is gone");
                            break;
                        }
                    }
                    KeyOutcome::Nothing => {}
                }
            }
        }
    }

    Ok(())
}

#[derive(Debug)]
enum KeyOutcome {
    Nothing,
    Send(Intent),
    Quit,
}

fn handle_key_event(key: KeyEvent, settings: &config::Settings, app: &mut App) -> KeyOutcome {
    // The error popup swallows the key that closes it.
    if app.dismiss_error() {
        return KeyOutcome::Nothing;
    }

    if app.mode == InputMode::FolderPrompt {
        return match key.code {
            KeyCode::Enter => KeyOutcome::Send(Intent::LoadFolder(app.close_folder_prompt(true))),
            KeyCode::Esc => KeyOutcome::Send(Intent::LoadFolder(app.close_folder_prompt(false))),
            KeyCode::Backspace => {
                app.pop_folder_char();
                KeyOutcome::Nothing
            }
            KeyCode::Char(c) if !c.is_control() => {
                app.push_folder_char(c);
                KeyOutcome::Nothing
            }
            _ => KeyOutcome::Nothing,
        };
    }

    let step = settings.audio.volume_step;
    match key.code {
        KeyCode::Char('q') => KeyOutcome::Quit,
        KeyCode::Char('j') | KeyCode::Down => {
            app.next();
            KeyOutcome::Nothing
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.prev();
            KeyOutcome::Nothing
        }
        KeyCode::Enter => KeyOutcome::Send(app.select_intent()),
        KeyCode::Char('p') => KeyOutcome::Send(Intent::Pause),
        KeyCode::Char('s') => KeyOutcome::Send(Intent::Stop),
        KeyCode::Char('r') if app.resume_enabled => KeyOutcome::Send(Intent::Resume),
        KeyCode::Char('+') | KeyCode::Char('=') => {
            KeyOutcome::Send(Intent::VolumeChanged(app.volume_up(step)))
        }
        KeyCode::Char('-') => KeyOutcome::Send(Intent::VolumeChanged(app.volume_down(step))),
        KeyCode::Char('o') => {
            app.open_folder_prompt();
            KeyOutcome::Nothing
        }
        _ => KeyOutcome::Nothing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::FolderChoice;
    use crossterm::event::KeyModifiers;
    use std::path::PathBuf;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app_with_tracks() -> App {
        let mut app = App::new();
        app.apply(SessionEvent::PlaylistChanged {
            entries: vec![PathBuf::from("/m/a.mp3"), PathBuf::from("/m/b.mp3")],
            generation: 2,
        });
        app.apply(SessionEvent::VolumeChanged(30));
        app
    }

    #[test]
    fn resume_key_is_ignored_until_enabled() {
        let settings = config::Settings::default();
        let mut app = app_with_tracks();
        assert!(matches!(
            handle_key_event(press(KeyCode::Char('r')), &settings, &mut app),
            KeyOutcome::Nothing
        ));

        app.apply(SessionEvent::ResumeEnabledChanged(true));
        assert!(matches!(
            handle_key_event(press(KeyCode::Char('r')), &settings, &mut app),
            KeyOutcome::Send(Intent::Resume)
        ));
    }

    #[test]
    fn enter_plays_the_cursor_in_the_current_generation() {
        let settings = config::Settings::default();
        let mut app = app_with_tracks();
        handle_key_event(press(KeyCode::Down), &settings, &mut app);
        assert!(matches!(
            handle_key_event(press(KeyCode::Enter), &settings, &mut app),
            KeyOutcome::Send(Intent::SelectAndPlay {
                index: 1,
                generation: 2
            })
        ));
    }

    #[test]
    fn volume_keys_step_by_configured_amount() {
        let settings = config::Settings::default();
        let mut app = app_with_tracks();
        assert!(matches!(
            handle_key_event(press(KeyCode::Char('+')), &settings, &mut app),
            KeyOutcome::Send(Intent::VolumeChanged(35))
        ));
        assert!(matches!(
            handle_key_event(press(KeyCode::Char('-')), &settings, &mut app),
            KeyOutcome::Send(Intent::VolumeChanged(30))
        ));
    }

    #[test]
    fn repeated_volume_keys_do_not_wait_for_the_session() {
        let settings = config::Settings::default();
        let mut app = app_with_tracks();
        handle_key_event(press(KeyCode::Char('+')), &settings, &mut app);
        assert!(matches!(
            handle_key_event(press(KeyCode::Char('+')), &settings, &mut app),
            KeyOutcome::Send(Intent::VolumeChanged(40))
        ));
        assert_eq!(app.volume, 40);
    }

    #[test]
    fn error_popup_blocks_the_first_key() {
        let settings = config::Settings::default();
        let mut app = app_with_tracks();
        app.apply(SessionEvent::Error("Could not play song:\nboom".into()));

        assert!(matches!(
            handle_key_event(press(KeyCode::Char('q')), &settings, &mut app),
            KeyOutcome::Nothing
        ));
        assert!(app.error.is_none());
        assert!(matches!(
            handle_key_event(press(KeyCode::Char('q')), &settings, &mut app),
            KeyOutcome::Quit
        ));
    }

    #[test]
    fn folder_prompt_routes_typing_and_results() {
        let settings = config::Settings::default();
        let mut app = App::new();
        handle_key_event(press(KeyCode::Char('o')), &settings, &mut app);
        for c in "/tmp/q".chars() {
            handle_key_event(press(KeyCode::Char(c)), &settings, &mut app);
        }
        handle_key_event(press(KeyCode::Backspace), &settings, &mut app);

        match handle_key_event(press(KeyCode::Enter), &settings, &mut app) {
            KeyOutcome::Send(Intent::LoadFolder(choice)) => {
                assert_eq!(choice, FolderChoice::Chosen(PathBuf::from("/tmp/")));
            }
            other => panic!("unexpected outcome: {other:?}"),
        }

        handle_key_event(press(KeyCode::Char('o')), &settings, &mut app);
        assert!(matches!(
            handle_key_event(press(KeyCode::Esc), &settings, &mut app),
            KeyOutcome::Send(Intent::LoadFolder(FolderChoice::Cancelled))
        ));
    }
}
