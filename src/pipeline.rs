//! Producer/consumer pipeline
//!
//! The tokenizer runs on the calling thread and hands tokens one at a time
//! through a zero-capacity channel to a consumer thread, which builds,
//! serializes and writes a message per token. Each send blocks until the
//! consumer takes the token, so at most one token is in flight.
//!
//! If the consumer fails it raises the [`Cancellation`] flag and hangs up;
//! the producer checks the flag before every hand-off and stops without
//! reporting an error of its own. Errors from either side are collected
//! into the [`RunReport`] once both sides have finished.

use std::io::Read;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::thread;

use tracing::{debug, trace};

use crate::app::Config;
use crate::error::Error;
use crate::message::{MessageBuilder, MessageSink};
use crate::tokenizer::{Token, Tokenizer};

/// Write-once stop signal shared by producer and consumer
#[derive(Debug, Default)]
pub struct Cancellation {
    cancelled: AtomicBool,
}

impl Cancellation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the flag. Returns true only for the call that raised it.
    pub fn cancel(&self) -> bool {
        !self.cancelled.swap(true, Ordering::AcqRel)
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// What happened during a run
#[derive(Debug, Default)]
pub struct RunReport {
    /// Tokens handed to the consumer
    pub sent: usize,
    /// Messages written to the sink
    pub written: usize,
    /// Read failure that ended the input side
    pub read_error: Option<Error>,
    /// Serialization or write failure that ended the output side
    pub sink_error: Option<Error>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.read_error.is_none() && self.sink_error.is_none()
    }

    /// Errors in reporting order: input first, then output
    pub fn errors(&self) -> impl Iterator<Item = &Error> {
        self.read_error.iter().chain(self.sink_error.iter())
    }
}

#[derive(Debug, Default)]
struct Outcome {
    count: usize,
    error: Option<Error>,
}

/// Tokenize `input` and write one message per token to `sink`
///
/// Returns after the consumer thread has finished writing.
pub fn run<R, S>(config: &Config, input: R, sink: S) -> RunReport
where
    R: Read,
    S: MessageSink + Send,
{
    let tokenizer = Tokenizer::new(input, config.separators().clone())
        .with_max_token_size(config.max_token_size());
    let builder = config.template().builder();
    let cancel = Cancellation::new();
    let (tx, rx) = mpsc::sync_channel::<Token>(0);

    thread::scope(|scope| {
        let consumer = scope.spawn(|| consume(rx, builder, sink, &cancel));
        let produced = produce(tokenizer, tx, &cancel);
        let consumed = match consumer.join() {
            Ok(outcome) => outcome,
            Err(panic) => std::panic::resume_unwind(panic),
        };

        debug!(
            "Pipeline finished: {} sent, {} written",
            produced.count, consumed.count
        );

        RunReport {
            sent: produced.count,
            written: consumed.count,
            read_error: produced.error,
            sink_error: consumed.error,
        }
    })
}

fn produce<R: Read>(tokenizer: Tokenizer<R>, tx: SyncSender<Token>, cancel: &Cancellation) -> Outcome {
    let mut outcome = Outcome::default();

    for token in tokenizer {
        let token = match token {
            Ok(token) => token,
            Err(e) => {
                debug!("Tokenizer stopped: {}", e);
                outcome.error = Some(e);
                break;
            }
        };

        if cancel.is_cancelled() {
            debug!("Cancelled, dropping remaining input");
            break;
        }

        trace!("Handing off token {:?}", token.as_str());
        if tx.send(token).is_err() {
            debug!("Consumer hung up");
            break;
        }
        outcome.count += 1;
    }

    // Dropping `tx` closes the channel
    outcome
}

fn consume<S: MessageSink>(
    rx: Receiver<Token>,
    mut builder: MessageBuilder,
    mut sink: S,
    cancel: &Cancellation,
) -> Outcome {
    let mut outcome = Outcome::default();

    for token in rx {
        let message = builder.build(token.as_str());
        if let Err(e) = sink.send(message) {
            if cancel.cancel() {
                debug!("Cancelling producer: {}", e);
            }
            outcome.error = Some(e);
            break;
        }
        outcome.count += 1;
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancel_is_write_once() {
        let cancel = Cancellation::new();
        assert!(!cancel.is_cancelled());
        assert!(cancel.cancel());
        assert!(!cancel.cancel());
        assert!(cancel.is_cancelled());
    }

    #[test]
    fn test_report_errors_order() {
        let report = RunReport {
            read_error: Some(Error::TokenTooLong { limit: 1 }),
            sink_error: Some(Error::NoSeparators),
            ..Default::default()
        };
        assert!(!report.is_success());
        let errors: Vec<String> = report.errors().map(|e| e.to_string()).collect();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("maximum size"));
        assert!(RunReport::default().is_success());
    }

    #[test]
    fn test_producer_stops_when_cancelled() {
        let cancel = Cancellation::new();
        cancel.cancel();
        let (tx, rx) = mpsc::sync_channel(0);
        let tokenizer = Tokenizer::new(&b"a\nb\n"[..], Default::default());
        let outcome = produce(tokenizer, tx, &cancel);
        assert_eq!(outcome.count, 0);
        assert!(outcome.error.is_none());
        assert!(rx.recv().is_err());
    }
}
