//! The interactive loop: read a line, act on it, repeat.

use crate::client::GameClient;
use crate::command::SimCommand;
use crate::driver::{launch, wait_all, GameRun, SimHandle};
use crate::error::SimError;
use crate::ui;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// How a prompt session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The operator quit; simulations still running were aborted.
    Quit { abandoned: usize },
    /// Input ran out; every launched simulation was awaited.
    Finished { succeeded: usize, failed: usize },
}

#[derive(Debug, Default)]
struct Tally {
    succeeded: usize,
    failed: usize,
}

impl Tally {
    fn record(&mut self, results: &[Result<GameRun, SimError>]) {
        let failed = results.iter().filter(|r| r.is_err()).count();
        self.failed += failed;
        self.succeeded += results.len() - failed;
    }
}

/// Moves finished simulations out of `pending` and counts their outcomes.
async fn settle_finished(pending: &mut Vec<SimHandle>, tally: &mut Tally) {
    let (done, running): (Vec<SimHandle>, Vec<SimHandle>) = std::mem::take(pending)
        .into_iter()
        .partition(|handle| handle.is_finished());
    *pending = running;
    if !done.is_empty() {
        tally.record(&wait_all(done).await);
    }
}

pub async fn run_prompt<R>(
    input: R,
    client: &GameClient,
    max_games: usize,
    out: &mut dyn Write,
) -> Result<SessionEnd, SimError>
where
    R: AsyncBufRead + Unpin,
{
    ui::write_greeting(out)?;
    let mut lines = input.lines();
    let mut pending: Vec<SimHandle> = Vec::new();
    let mut tally = Tally::default();

    while let Some(line) = lines.next_line().await? {
        settle_finished(&mut pending, &mut tally).await;
        match SimCommand::parse(&line, max_games) {
            SimCommand::Confirm => ui::write_confirmed(out, line.trim())?,
            SimCommand::Launch(count) => {
                ui::write_launching(out, count)?;
                tracing::info!(count, "launching simulations");
                pending.extend(launch(client, count));
            }
            SimCommand::TooMany(count) => ui::write_refusal(out, count)?,
            SimCommand::Quit => {
                let abandoned = pending.iter().filter(|h| !h.is_finished()).count();
                for handle in &pending {
                    handle.abort();
                }
                tracing::info!(abandoned, "quitting");
                return Ok(SessionEnd::Quit { abandoned });
            }
            SimCommand::Unknown(text) => ui::write_unknown(out, &text)?,
        }
        out.flush()?;
    }

    tracing::debug!(outstanding = pending.len(), "input closed, waiting for simulations");
    tally.record(&wait_all(pending).await);
    Ok(SessionEnd::Finished {
        succeeded: tally.succeeded,
        failed: tally.failed,
    })
}
