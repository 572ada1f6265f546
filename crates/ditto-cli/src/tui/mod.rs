//! Interactive TUI dashboard over the services screen and store status.

pub mod app;
mod ui;

use std::io;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use ditto_core::Plan;
use ditto_core::labels::{LabelRegistry, ModalAction, ModalStep};

use app::{App, View};

/// Launch the interactive TUI dashboard.
pub fn run_dashboard(plan: Plan, labels: LabelRegistry) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(plan, labels);
    tracing::info!(%plan, "dashboard started");

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(app.tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(app, key);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Route one key press to the modal or the current view.
fn handle_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    // Clear status message on any keypress.
    app.status_message = None;

    let result = if app.modal_open() {
        handle_modal_key(app, key)
    } else {
        handle_view_key(app, key)
    };
    if let Err(e) = result {
        tracing::warn!(error = %e, "dashboard action failed");
        app.status_message = Some(e.to_string());
    }
}

fn handle_view_key(
    app: &mut App,
    key: KeyEvent,
) -> Result<(), ditto_core::services::ServicesError> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.navigate_back(),
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Tab => app.cycle_view(),
        KeyCode::Char('?') => app.show_help(),
        KeyCode::Enter | KeyCode::Char(' ') if app.current_view == View::Services => {
            app.activate_selected()?;
        }
        KeyCode::Char('l') | KeyCode::Right if app.current_view == View::Services => {
            app.cycle_selected(1)?;
        }
        KeyCode::Char('h') | KeyCode::Left if app.current_view == View::Services => {
            app.cycle_selected(-1)?;
        }
        _ => {}
    }
    Ok(())
}

fn handle_modal_key(
    app: &mut App,
    key: KeyEvent,
) -> Result<(), ditto_core::services::ServicesError> {
    match (app.modal_step(), key.code) {
        (_, KeyCode::Esc) => app.modal_action(ModalAction::Close)?,
        (_, KeyCode::Enter) => app.modal_confirm()?,
        (Some(ModalStep::Add | ModalStep::Upgrade), KeyCode::Left) => {
            app.input.clear();
            app.modal_action(ModalAction::Back)?;
        }
        (Some(ModalStep::Add), KeyCode::Backspace) => {
            app.input.pop();
        }
        (Some(ModalStep::Add), KeyCode::Char(c)) => app.input.push(c),
        (Some(ModalStep::Select), KeyCode::Char('j') | KeyCode::Down) => app.modal_move(true),
        (Some(ModalStep::Select), KeyCode::Char('k') | KeyCode::Up) => app.modal_move(false),
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use ditto_core::AddOn;

    fn press(app: &mut App, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn space_toggles_first_row() {
        let mut app = App::new(Plan::Starter, LabelRegistry::default());
        press(&mut app, KeyCode::Char(' '));
        assert!(app.state.selection().is_selected(AddOn::ChartsUk));
        assert_eq!(app.state.cart().total, 15);
    }

    #[test]
    fn failed_action_sets_status_message() {
        let mut app = App::new(Plan::Starter, LabelRegistry::default());
        // Rows: 5 add-ons, then auto-release, protection, YouTube, fingerprint.
        for _ in 0..8 {
            press(&mut app, KeyCode::Down);
        }
        press(&mut app, KeyCode::Enter);
        let msg = app.status_message.clone().expect("status message");
        assert!(msg.contains("not available"), "{msg}");

        press(&mut app, KeyCode::Up);
        assert!(app.status_message.is_none());
    }

    #[test]
    fn typing_in_add_step_fills_input() {
        let mut app = App::new(Plan::DittoPlusRls, LabelRegistry::default());
        let label_row = app
            .items()
            .iter()
            .position(|i| *i == app::Item::Label)
            .unwrap();
        app.selected = label_row;
        press(&mut app, KeyCode::Enter);
        for _ in 0..6 {
            press(&mut app, KeyCode::Char('j'));
        }
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.modal_step(), Some(ModalStep::Add));

        for c in "Qjx".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.input, "Qj");

        press(&mut app, KeyCode::Left);
        assert_eq!(app.modal_step(), Some(ModalStep::Select));
        press(&mut app, KeyCode::Esc);
        assert!(!app.modal_open());
        assert!(!app.should_quit);
    }

    #[test]
    fn ctrl_c_quits_from_anywhere() {
        let mut app = App::new(Plan::Pro, LabelRegistry::default());
        handle_key(
            &mut app,
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        );
        assert!(app.should_quit);
    }
}
