use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::debug;

use super::{RunId, ScoreError, ScoreService, ScoreSubmission};

/// Outcome of a submission, tagged with the run that produced it
#[derive(Debug)]
pub struct ScoreResult {
    pub run_id: RunId,
    pub outcome: Result<bool, ScoreError>,
}

/// Fire-and-forget executor for score submissions.
///
/// Each submission runs on its own tokio task; results arrive on the receiver
/// returned by [`ScoreReporter::new`]. Nothing is cancelled on restart.
pub struct ScoreReporter {
    service: Arc<dyn ScoreService>,
    results: mpsc::UnboundedSender<ScoreResult>,
}

impl ScoreReporter {
    pub fn new(service: Arc<dyn ScoreService>) -> (Self, mpsc::UnboundedReceiver<ScoreResult>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                service,
                results: tx,
            },
            rx,
        )
    }

    /// Start the call and return immediately. Must be called inside a tokio runtime.
    pub fn submit(&self, submission: ScoreSubmission) {
        let call = self.service.update_score(submission.score);
        let results = self.results.clone();

        tokio::spawn(async move {
            let outcome = call.await;
            let result = ScoreResult {
                run_id: submission.run_id,
                outcome,
            };
            if results.send(result).is_err() {
                debug!(run_id = submission.run_id, "score result dropped, receiver closed");
            }
        });
    }
}
