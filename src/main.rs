use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
    event::{KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};

use quadra::{
    app::{App, TICK_RATE_MS},
    config::FileConfigStore,
    content::{load_content, FileProvider, Quadrant, Source},
    runtime::{CrosstermEventSource, FixedTicker, QuizEvent, Runner},
};

/// bilingual eisenhower-matrix classification quiz for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "An interactive quiz that shows everyday activities and asks you to place each in its Eisenhower quadrant, with bilingual content and a persisted language preference."
)]
pub struct Cli {
    /// language to play in (persisted as your preference)
    #[clap(short = 'l', long, value_enum)]
    language: Option<SupportedLanguage>,

    /// path to an external activities JSON file
    #[clap(long)]
    activities: Option<PathBuf>,

    /// path to an external translations JSON file
    #[clap(long)]
    translations: Option<PathBuf>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum, strum_macros::Display)]
pub enum SupportedLanguage {
    English,
    Portuguese,
}

impl SupportedLanguage {
    fn code(&self) -> &'static str {
        match self {
            SupportedLanguage::English => "en",
            SupportedLanguage::Portuguese => "pt",
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let provider = cli
        .activities
        .as_ref()
        .map(|p| FileProvider::new(p, cli.translations.clone()));
    let outcome = load_content(provider.as_ref());
    if cli.activities.is_some() && outcome.activities_source == Source::Embedded {
        eprintln!("warning: external activities could not be loaded, using the built-in set");
    }
    if cli.translations.is_some() && outcome.translations_source == Source::Embedded {
        eprintln!("warning: external translations could not be loaded, using the built-in tables");
    }

    let mut app = App::new(outcome.repository, Box::new(FileConfigStore::new()))?;
    if let Some(lang) = cli.language {
        if let Err(e) = app.set_language(lang.code()) {
            eprintln!("warning: {e}, staying on {}", app.language());
        }
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );

    draw(terminal, app)?;

    loop {
        match runner.step() {
            QuizEvent::Tick => {
                if app.on_tick() {
                    draw(terminal, app)?;
                }
            }
            QuizEvent::Resize => {
                draw(terminal, app)?;
            }
            QuizEvent::Key(key) => {
                match key.code {
                    KeyCode::Esc => break,
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                    KeyCode::Char(c @ '1'..='4') => {
                        if let Some(quadrant) = Quadrant::from_key(c) {
                            // Second press during the feedback delay is a no-op
                            let _ = app.submit(quadrant);
                        }
                    }
                    KeyCode::Char('l') => {
                        app.cycle_language();
                    }
                    KeyCode::Char('r') => {
                        app.restart();
                    }
                    KeyCode::Enter | KeyCode::Char(' ') => {
                        app.fire_pending();
                    }
                    _ => {}
                }
                draw(terminal, app)?;
            }
        }
    }

    Ok(())
}

fn draw<B: Backend>(terminal: &mut Terminal<B>, app: &App) -> io::Result<()> {
    terminal.draw(|f| f.render_widget(app, f.area()))?;
    Ok(())
}
