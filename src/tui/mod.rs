pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::ThemeColors;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};

use app::Focus;

pub async fn run_tui(mut app: App) -> anyhow::Result<()> {
    // Buffer log output while TUI is active to prevent it corrupting the display
    crate::logging::activate();

    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();
    let mut events = EventHandler::new(250);

    let outcome = loop {
        if let Err(e) = terminal.draw(|frame| ui::draw(frame, &mut app)) {
            break Err(e.into());
        }

        match events.next().await {
            Some(Event::Key(key)) => handle_key_event(&mut app, key),
            Some(Event::Tick) => app.update_flash(),
            None => break Ok(()),
        }

        if app.should_quit {
            break Ok(());
        }
    };

    ratatui::restore();

    // Flush buffered log lines now that the terminal is restored
    for msg in crate::logging::drain() {
        eprint!("{}", msg);
    }

    outcome
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        // Quit
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('c') if ctrl => app.should_quit = true,

        KeyCode::Tab => app.cycle_focus(),

        // Score
        KeyCode::F(5) => app.score(),
        KeyCode::Char('r') if ctrl => app.score(),

        KeyCode::Char('l') if ctrl => app.load_sample(),

        _ => match app.focus {
            Focus::Results => match key.code {
                KeyCode::Char('j') | KeyCode::Down => app.next_row(),
                KeyCode::Char('k') | KeyCode::Up => app.previous_row(),
                _ => {}
            },
            Focus::Transcript | Focus::Duration => match key.code {
                KeyCode::Enter if app.focus == Focus::Transcript => app.input_char('\n'),
                KeyCode::Backspace => app.backspace(),
                KeyCode::Char(c) if !ctrl => app.input_char(c),
                _ => {}
            },
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RubricConfig;
    use crate::scoring::Scorer;

    fn app() -> App {
        App::new(Scorer::new(&RubricConfig::default()).unwrap())
    }

    fn press(app: &mut App, code: KeyCode) {
        handle_key_event(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn ctrl(app: &mut App, c: char) {
        handle_key_event(app, KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL));
    }

    #[test]
    fn test_quit_keys() {
        let mut a = app();
        press(&mut a, KeyCode::Esc);
        assert!(a.should_quit);

        let mut a = app();
        ctrl(&mut a, 'c');
        assert!(a.should_quit);
    }

    #[test]
    fn test_jk_types_while_editing() {
        let mut a = app();
        press(&mut a, KeyCode::Char('j'));
        press(&mut a, KeyCode::Char('k'));
        press(&mut a, KeyCode::Enter);
        assert_eq!(a.transcript, "jk\n");
    }

    #[test]
    fn test_sample_then_score_then_navigate() {
        let mut a = app();
        ctrl(&mut a, 'l');
        press(&mut a, KeyCode::F(5));
        assert_eq!(a.result.as_ref().unwrap().overall_score, 86);

        press(&mut a, KeyCode::Char('j'));
        assert_eq!(a.table_state.selected(), Some(1));
        press(&mut a, KeyCode::Up);
        assert_eq!(a.table_state.selected(), Some(0));
        assert_eq!(a.transcript, crate::sample::SAMPLE_TRANSCRIPT);
    }

    #[test]
    fn test_ctrl_r_on_empty_transcript() {
        let mut a = app();
        ctrl(&mut a, 'r');
        assert!(a.result.is_none());
        assert!(a.flash_message.is_some());
    }

    #[test]
    fn test_tab_moves_typing_to_duration() {
        let mut a = app();
        press(&mut a, KeyCode::Tab);
        press(&mut a, KeyCode::Char('4'));
        press(&mut a, KeyCode::Char('0'));
        assert_eq!(a.duration_input, "40");
        assert!(a.transcript.is_empty());
    }
}
