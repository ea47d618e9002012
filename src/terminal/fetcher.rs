use std::sync::Arc;
use std::sync::mpsc::Sender;
use std::thread;

use crate::client::SummarySource;
use crate::domain::email::Thread;
use crate::terminal::state::SummaryUpdate;

/// Shown for a thread whose summarize request failed; indistinguishable in
/// the row from a slow-but-successful summary once resolved.
pub const SUMMARY_FALLBACK: &str = "Summary not available.";

/// Fetch summaries for one cycle on a worker thread. Results flow back to
/// the UI loop over `tx`; the UI loop applies them against its current epoch.
pub fn spawn_fetch_cycle(
    source: Arc<dyn SummarySource>,
    threads: Vec<Thread>,
    epoch: u64,
    tx: Sender<SummaryUpdate>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || run_fetch_cycle(source.as_ref(), &threads, epoch, &tx))
}

/// Strictly sequential: the next thread's request is not issued until the
/// previous one settled. A failed request resolves to the fallback string
/// and never aborts the rest of the cycle. A dropped receiver (view closed,
/// or a newer cycle's owner gone) ends the cycle early.
fn run_fetch_cycle(
    source: &dyn SummarySource,
    threads: &[Thread],
    epoch: u64,
    tx: &Sender<SummaryUpdate>,
) {
    for t in threads {
        let text = match source.fetch_summary(&t.emails) {
            Ok(summary) => summary,
            Err(e) => {
                log::warn!("summary fetch for thread {} failed: {e:#}", t.id);
                SUMMARY_FALLBACK.to_string()
            }
        };

        let update = SummaryUpdate {
            epoch,
            thread_id: t.id,
            text,
        };
        if tx.send(update).is_err() {
            log::debug!("summary receiver gone, abandoning cycle {epoch}");
            break;
        }
    }
}
