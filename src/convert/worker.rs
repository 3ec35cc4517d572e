//! Background execution of conversion submissions
//!
//! Reading the roster file and the HTTP round trip both block, so each
//! submission runs on its own thread and reports back over an mpsc
//! channel that the UI thread drains once per frame.
//!
//! Superseded submissions are not interrupted; their threads run to
//! completion, but their outcomes carry a stale generation number and
//! are dropped when the state machine applies them.

use crate::convert::client::ConvertClient;
use crate::convert::request::{ConversionRequest, Format, OptionSet};
use crate::error::{Error, Result};
use log::{debug, warn};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};

/// The result of one finished submission, tagged with the generation
/// number of the request that produced it.
#[derive(Debug)]
pub struct ConversionOutcome {
    pub generation: u64,
    pub result: Result<String>,
}

/// Spawns submission threads and collects their outcomes.
#[derive(Debug)]
pub struct ConversionWorker {
    sender: Sender<ConversionOutcome>,
    receiver: Receiver<ConversionOutcome>,
}

impl ConversionWorker {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self { sender, receiver }
    }

    /// Run a full submission in the background: read the roster file,
    /// post it with the given format/option snapshot, decode the answer.
    pub fn submit(
        &self,
        generation: u64,
        path: PathBuf,
        format: Format,
        options: OptionSet,
        client: ConvertClient,
    ) {
        debug!(
            "Submission {} started: {} as {}",
            generation,
            path.display(),
            format.wire_name()
        );
        self.submit_with(generation, move || {
            let roster = std::fs::read_to_string(&path).map_err(|e| Error::FileRead {
                path: path.clone(),
                source: e,
            })?;
            client.convert(&ConversionRequest::new(roster, format, options))
        });
    }

    /// Run an arbitrary conversion job in the background.
    ///
    /// `submit` goes through here; tests inject jobs directly to exercise
    /// the channel plumbing without a file system or network.
    pub fn submit_with<F>(&self, generation: u64, job: F)
    where
        F: FnOnce() -> Result<String> + Send + 'static,
    {
        let sender = self.sender.clone();
        std::thread::spawn(move || {
            let result = job();
            if let Err(e) = &result {
                warn!("Submission {} failed: {}", generation, e);
            }
            // The receiver only disappears on shutdown; nothing to do then.
            let _ = sender.send(ConversionOutcome { generation, result });
        });
    }

    /// Drain all outcomes that have arrived since the last poll.
    ///
    /// Non-blocking; called once per frame by the UI thread.
    pub fn poll(&self) -> Vec<ConversionOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(outcome) = self.receiver.try_recv() {
            outcomes.push(outcome);
        }
        outcomes
    }

    /// Block until the next outcome arrives, for tests only.
    #[cfg(test)]
    fn recv_timeout(&self, timeout: std::time::Duration) -> Option<ConversionOutcome> {
        self.receiver.recv_timeout(timeout).ok()
    }
}

impl Default for ConversionWorker {
    fn default() -> Self {
        Self::new()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::time::Duration;

    const TIMEOUT: Duration = Duration::from_secs(5);

    #[test]
    fn test_successful_job_delivers_outcome() {
        let worker = ConversionWorker::new();
        worker.submit_with(1, || Ok("converted text".to_string()));

        let outcome = worker.recv_timeout(TIMEOUT).expect("no outcome arrived");
        assert_eq!(outcome.generation, 1);
        assert_eq!(outcome.result.unwrap(), "converted text");
    }

    #[test]
    fn test_failed_job_delivers_error() {
        let worker = ConversionWorker::new();
        worker.submit_with(2, || Err(Error::Network("offline".to_string())));

        let outcome = worker.recv_timeout(TIMEOUT).expect("no outcome arrived");
        assert_eq!(outcome.generation, 2);
        assert!(matches!(outcome.result, Err(Error::Network(_))));
    }

    #[test]
    fn test_poll_is_non_blocking_when_empty() {
        let worker = ConversionWorker::new();
        assert!(worker.poll().is_empty());
    }

    #[test]
    fn test_outcomes_keep_their_generations() {
        let worker = ConversionWorker::new();
        worker.submit_with(1, || Ok("old".to_string()));
        worker.submit_with(2, || Ok("new".to_string()));

        let mut seen = Vec::new();
        for _ in 0..2 {
            let outcome = worker.recv_timeout(TIMEOUT).expect("no outcome arrived");
            seen.push((outcome.generation, outcome.result.unwrap()));
        }
        seen.sort();
        assert_eq!(
            seen,
            vec![(1, "old".to_string()), (2, "new".to_string())]
        );
    }

    #[test]
    fn test_submit_reports_unreadable_file() {
        let worker = ConversionWorker::new();
        let client = ConvertClient::new("https://example.invalid/convert").unwrap();
        worker.submit(
            7,
            PathBuf::from("/nonexistent/roster.htm"),
            Format::Journal,
            OptionSet::new(),
            client,
        );

        let outcome = worker.recv_timeout(TIMEOUT).expect("no outcome arrived");
        assert_eq!(outcome.generation, 7);
        assert!(matches!(outcome.result, Err(Error::FileRead { .. })));
    }

    #[test]
    fn test_submit_reads_file_before_posting() {
        // The endpoint is unreachable, so a readable file must get past
        // the read step and fail with a network error instead.
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "<html>roster</html>").unwrap();

        let worker = ConversionWorker::new();
        let client = ConvertClient::new("https://example.invalid/convert").unwrap();
        worker.submit(
            8,
            file.path().to_path_buf(),
            Format::Csv,
            OptionSet::new(),
            client,
        );

        let outcome = worker
            .recv_timeout(Duration::from_secs(90))
            .expect("no outcome arrived");
        assert_eq!(outcome.generation, 8);
        assert!(matches!(outcome.result, Err(Error::Network(_))));
    }
}
