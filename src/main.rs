use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use dockmenu::action::Action;
use dockmenu::app::{App, ViewMode};
use dockmenu::cli::Cli;
use dockmenu::config::Config;
use dockmenu::docker::{run_shell, Runtime, SignalListener};
use dockmenu::models::ContainerRef;
use dockmenu::{logging, tui};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load config")?;
    if let Some(runtime) = cli.runtime {
        config.runtime = runtime;
    }
    let style = config.style()?;

    logging::init(config.log_path().as_deref())?;
    tracing::info!(runtime = %config.runtime, mode = ?cli.mode, "starting");

    let mut app = App::new(Runtime::new(config.runtime.clone()), config.shells.clone(), style);
    if let Some(action) = cli.mode.start_action() {
        app.open_containers(action);
    }

    // SIGINT/SIGTERM: quit between sessions, forwarded to the shell during one
    let mut signals = SignalListener::install()?;

    tui::install_panic_hook();
    let mut terminal = tui::init()?;

    // Main event loop
    let tick_rate = Duration::from_millis(250);

    loop {
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    let action = handle_key_event(&app, key);
                    app.handle_action(action);
                }
            }
        } else {
            app.handle_action(Action::Tick);
        }

        app.drain_events();
        if let Some(reason) = signals.try_recv() {
            app.handle_termination(reason);
        }

        if let Some(container) = app.take_pending_shell() {
            terminal = shell_into(&mut app, &container, &mut signals).await?;
            terminal.clear()?;
        }

        if app.should_quit {
            break;
        }
    }

    tui::restore()?;
    tracing::info!("exiting");

    Ok(())
}

/// Hand the terminal to `<runtime> exec -it` and take it back afterwards
async fn shell_into(
    app: &mut App,
    container: &ContainerRef,
    signals: &mut SignalListener,
) -> Result<tui::Tui> {
    tui::restore()?;
    println!("Running Command");

    let result = run_shell(app.runtime(), container, app.shells(), signals.terminations()).await;
    if let Err(ref e) = result {
        tracing::error!(container = %container.name, error = %e, "shell session failed");
        eprintln!("{}", e);
        // Small delay so user can see error
        tokio::time::sleep(Duration::from_secs(1)).await;
    }
    app.shell_finished(container, &result);

    Ok(tui::init()?)
}

/// Convert key events to actions based on current state
fn handle_key_event(app: &App, key: KeyEvent) -> Action {
    if app.show_help {
        return match key.code {
            KeyCode::Esc | KeyCode::Char('?') => Action::CloseModal,
            KeyCode::Char('q') => Action::Quit,
            _ => Action::None,
        };
    }

    match key.code {
        KeyCode::Char('q') => return Action::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Action::Quit
        }
        KeyCode::Char('?') => return Action::ToggleHelp,
        _ => {}
    }

    match key.code {
        KeyCode::Char('j') | KeyCode::Down => Action::Down,
        KeyCode::Char('k') | KeyCode::Up => Action::Up,
        KeyCode::Char('g') => Action::Top,
        KeyCode::Char('G') => Action::Bottom,
        KeyCode::Enter => Action::Select,
        KeyCode::Esc | KeyCode::Char('m') if app.view_mode != ViewMode::Menu => Action::Back,
        KeyCode::Char('r') => Action::Refresh,
        _ => Action::None,
    }
}
