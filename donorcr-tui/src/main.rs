//! DonorCr TUI — three-panel terminal calculator.
//!
//! Panels:
//! 1. Calculator — four inputs, Calculate action, result and disclaimer
//! 2. Breakdown — the nine sub-model outputs and their median
//! 3. Help — keyboard shortcuts and fixed covariates

use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use donorcr_core::CalculatorConfig;
use donorcr_tui::{input, persistence, ui, AppState};

#[derive(Parser)]
#[command(name = "donorcr-tui", about = "Terminal calculator for creatinine 1 year after kidney donation")]
struct Args {
    /// Calculator config file (TOML) with form defaults and step sizes.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where form values and UI state are persisted between runs.
    #[arg(long)]
    state: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = CalculatorConfig::load_or_default(args.config.as_deref())
        .context("loading calculator config")?;

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let state_path = args.state.unwrap_or_else(|| {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("donorcr")
            .join("state.json")
    });

    let persisted = persistence::load(&state_path);
    let mut app = AppState::new(config);
    persistence::apply(&mut app, persisted);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Save state before exit
    let persisted = persistence::extract(&app);
    let _ = persistence::save(&state_path, &persisted);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        // 50ms poll keeps the loop responsive without spinning.
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        if !app.running {
            break;
        }
    }
    Ok(())
}
