pub mod events;
pub mod fetcher;
pub mod state;
pub mod ui;

use std::path::Path;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Duration;

use anyhow::{Result, anyhow};
use ratatui::{
    DefaultTerminal,
    crossterm::event::{self, Event},
};

use crate::client::SummarySource;
use crate::domain::email::Thread;
use crate::terminal::events::Action;
use crate::terminal::state::{AppState, SummaryUpdate};
use crate::threads_file::load_threads;

pub fn run_tui(
    source: Arc<dyn SummarySource>,
    threads_path: &Path,
    folder_name: String,
) -> Result<()> {
    color_eyre::install().map_err(|e| anyhow!("{e}"))?;

    let terminal = ratatui::init();
    let result = run(terminal, source, threads_path, folder_name);

    ratatui::restore();

    result
}

fn run(
    mut terminal: DefaultTerminal,
    source: Arc<dyn SummarySource>,
    threads_path: &Path,
    folder_name: String,
) -> Result<()> {
    let mut state = AppState::new(folder_name);
    let (tx, rx): (Sender<SummaryUpdate>, Receiver<SummaryUpdate>) = mpsc::channel();

    start_cycle(&mut state, &source, &tx, load_threads(threads_path)?);

    loop {
        terminal.draw(|f| ui::render(f, &mut state))?;

        // Settled summaries arrive between frames; folding them in here
        // keeps all state mutation on this thread.
        while let Ok(update) = rx.try_recv() {
            state.apply(update);
        }

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            match events::handle_key(key, &mut state) {
                Action::Quit => break,
                Action::Reload => match load_threads(threads_path) {
                    Ok(threads) => start_cycle(&mut state, &source, &tx, threads),
                    Err(e) => log::warn!("thread list reload failed: {e:#}"),
                },
                Action::None => {}
            }
        }
    }

    Ok(())
}

/// Marks every thread loading first, then kicks off the sequential fetch
/// worker for the new epoch.
fn start_cycle(
    state: &mut AppState,
    source: &Arc<dyn SummarySource>,
    tx: &Sender<SummaryUpdate>,
    threads: Vec<Thread>,
) {
    let epoch = state.set_threads(threads);
    fetcher::spawn_fetch_cycle(source.clone(), state.threads.clone(), epoch, tx.clone());
}
