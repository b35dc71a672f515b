//! Main TUI application

use crate::build::{BuildReport, BuildRunner};
use crate::error::ScaffoldError;
use crate::project::Configuration;
use crate::toolchain::Toolchain;
use crate::tui::keys;
use crate::tui::screens::{self, progress::BuildState, ProgressScreen};
use crate::wizard::{Flow, Input, Navigator};
use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{self, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(100);
const TICK_INTERVAL: Duration = Duration::from_millis(500);

/// How the TUI session ended
#[derive(Debug)]
pub enum TuiOutcome {
    /// The wizard was quit before Build
    Cancelled,
    /// A key was pressed while the build was still running; the build task
    /// is still going and the caller should exit the process
    Abandoned,
    Built {
        config: Configuration,
        report: BuildReport,
    },
    Failed(ScaffoldError),
}

/// Current phase in the TUI flow
enum Phase {
    Wizard(Navigator),
    Building {
        config: Configuration,
        screen: ProgressScreen,
    },
}

/// Put the terminal back into cooked mode on the primary screen
///
/// Safe to call more than once; also used by the panic and signal handlers.
pub fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, cursor::Show)
}

/// Run the wizard, then the build, in an alternate screen
pub async fn run<T: Toolchain + Clone>(
    navigator: Navigator,
    toolchain: T,
    project_dir: PathBuf,
) -> Result<TuiOutcome> {
    // Setup terminal
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter the alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to initialise the terminal")?;

    let outcome = event_loop(&mut terminal, navigator, &toolchain, &project_dir);

    restore_terminal().context("failed to restore the terminal")?;
    let outcome = outcome?;
    tracing::info!(outcome = outcome_name(&outcome), "tui finished");
    Ok(outcome)
}

fn event_loop<T: Toolchain + Clone>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    navigator: Navigator,
    toolchain: &T,
    project_dir: &Path,
) -> Result<TuiOutcome> {
    let mut phase = Phase::Wizard(navigator);
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            match &phase {
                Phase::Wizard(navigator) => screens::render_view(frame, area, &navigator.view()),
                Phase::Building { screen, .. } => screen.render(frame, area),
            }
        })?;

        let mut key: Option<KeyEvent> = None;
        let mut resized = false;
        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(k) if k.kind == KeyEventKind::Press => key = Some(k),
                Event::Resize(..) => resized = true,
                _ => {}
            }
        }

        let tick = last_tick.elapsed() >= TICK_INTERVAL;
        if tick {
            last_tick = Instant::now();
        }

        let mut next = None;
        match &mut phase {
            Phase::Wizard(navigator) => {
                let mut flow = Flow::Continue;
                if let Some(input) = key.and_then(|k| keys::translate(k, navigator.is_text_entry())) {
                    flow = navigator.handle(input)?;
                }
                if resized {
                    navigator.handle(Input::Resize)?;
                }
                if tick {
                    navigator.handle(Input::Tick)?;
                }

                match flow {
                    Flow::Continue => {}
                    Flow::Quit => return Ok(TuiOutcome::Cancelled),
                    Flow::Build => {
                        let config = navigator.config().clone();
                        let handle = BuildRunner::system(toolchain.clone(), project_dir)
                            .spawn(config.clone());
                        next = Some(Phase::Building {
                            config,
                            screen: ProgressScreen::new(handle),
                        });
                    }
                }
            }
            Phase::Building { screen, .. } => {
                if tick || key.is_some() {
                    screen.tick();
                }
                if screen.should_close(key.is_some()) {
                    break;
                }
            }
        }
        if let Some(next) = next {
            phase = next;
        }
    }

    // a finished build or any key on the progress screen ends the session
    match phase {
        Phase::Building { config, screen } => Ok(match screen.into_state() {
            BuildState::Running => TuiOutcome::Abandoned,
            BuildState::Succeeded(report) => TuiOutcome::Built { config, report },
            BuildState::Failed(e) => TuiOutcome::Failed(e),
        }),
        Phase::Wizard(_) => Ok(TuiOutcome::Cancelled),
    }
}

fn outcome_name(outcome: &TuiOutcome) -> &'static str {
    match outcome {
        TuiOutcome::Cancelled => "cancelled",
        TuiOutcome::Abandoned => "abandoned",
        TuiOutcome::Built { .. } => "built",
        TuiOutcome::Failed(_) => "failed",
    }
}
