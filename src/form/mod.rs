//! The summarize form: input, one request at a time, result or error.
//!
//! [`FormState`] holds the data and transition rules. [`Form`] wires it to a
//! [`Summarizer`], runs requests on the tokio runtime and broadcasts every
//! transition on an [`EventBus`].

pub mod state;
pub mod view;

pub use state::{FormState, Phase, SettleOutcome};

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc};

use crate::events::{Event, EventBus};
use crate::prompts::SummaryFormat;
use crate::provider::SummarizeError;
use crate::summarizer::Summarizer;

/// A finished request on its way back to the form.
#[derive(Debug)]
pub struct Settlement {
    pub token: u64,
    pub result: Result<String, SummarizeError>,
}

pub struct Form {
    state: FormState,
    summarizer: Arc<Summarizer>,
    events: EventBus,
    tx: mpsc::UnboundedSender<Settlement>,
    rx: mpsc::UnboundedReceiver<Settlement>,
}

impl Form {
    pub fn new(summarizer: Summarizer) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state: FormState::new(),
            summarizer: Arc::new(summarizer),
            events: EventBus::default(),
            tx,
            rx,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.events.subscribe()
    }

    pub fn format(&self) -> SummaryFormat {
        self.summarizer.format()
    }

    pub fn model(&self) -> &str {
        self.summarizer.model()
    }

    /// Switch the summary format. A request already in flight keeps the
    /// format it was started with.
    pub fn set_format(&mut self, format: SummaryFormat) {
        if format != self.summarizer.format() {
            self.summarizer = Arc::new(self.summarizer.with_format(format));
        }
    }

    pub fn update_input(&mut self, text: impl Into<String>) {
        self.state.update_input(text);
        self.events.emit(Event::InputChanged {
            chars: self.state.char_count(),
        });
    }

    /// Start summarizing the current input.
    ///
    /// Returns `false` without touching anything when the input is blank or
    /// a request is already running. Otherwise the form is busy by the time
    /// this returns and the request runs on a spawned task; collect its
    /// result with [`next_settlement`](Self::next_settlement).
    ///
    /// Must be called from within a tokio runtime.
    pub fn summarize(&mut self) -> bool {
        let Some(ticket) = self.state.begin() else {
            tracing::debug!(busy = self.state.is_busy(), "summarize ignored");
            return false;
        };

        tracing::info!(
            token = ticket.token,
            chars = self.state.char_count(),
            format = %self.summarizer.format(),
            "summarize started"
        );
        self.events.emit(Event::Started {
            token: ticket.token,
        });

        let summarizer = Arc::clone(&self.summarizer);
        let tx = self.tx.clone();
        let token = ticket.token;
        let input = ticket.input;
        tokio::spawn(async move {
            // The call runs in its own task so a panicking provider still
            // settles the request.
            let call = tokio::spawn(async move { summarizer.summarize(&input).await });
            let result = match call.await {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!(token, error = %e, "summarize task died");
                    Err(SummarizeError::opaque())
                }
            };
            // The receiver lives as long as the form; a send error means the
            // form is gone and nobody cares about the result.
            let _ = tx.send(Settlement { token, result });
        });
        true
    }

    /// Wait for the in-flight request to finish and apply it.
    ///
    /// Returns `None` immediately when nothing is in flight.
    pub async fn next_settlement(&mut self) -> Option<SettleOutcome> {
        if !self.state.is_busy() {
            return None;
        }
        let settlement = self.rx.recv().await?;
        Some(self.apply(settlement))
    }

    /// [`summarize`](Self::summarize), then wait for the result.
    pub async fn summarize_and_wait(&mut self) -> Option<SettleOutcome> {
        if !self.summarize() {
            return None;
        }
        self.next_settlement().await
    }

    /// Apply a settlement to the state and announce it.
    pub fn apply(&mut self, settlement: Settlement) -> SettleOutcome {
        let token = settlement.token;
        if let Err(err) = &settlement.result {
            // The error region already shows the user message.
            tracing::debug!(token, error = %err, "summarize failed");
        }

        let outcome = self.state.settle(token, settlement.result);
        match outcome {
            SettleOutcome::Succeeded | SettleOutcome::Failed => {
                let succeeded = outcome == SettleOutcome::Succeeded;
                tracing::info!(token, succeeded, "summarize settled");
                self.events.emit(Event::Settled { token, succeeded });
            }
            SettleOutcome::Discarded => {
                tracing::debug!(token, "result dropped after clear");
                self.events.emit(Event::Discarded { token });
            }
            SettleOutcome::Stale => {
                tracing::debug!(token, "stale settlement ignored");
            }
        }
        outcome
    }

    /// Reset input, summary and error.
    pub fn clear(&mut self) {
        self.state.clear();
        self.events.emit(Event::Cleared);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FALLBACK_ERROR;
    use crate::provider::mock::MockProvider;
    use crate::provider::{Prompt, Provider};
    use async_trait::async_trait;
    use std::io;
    use std::sync::Mutex;
    use std::time::Duration;

    fn build(mock: MockProvider) -> Form {
        Form::new(Summarizer::new(Arc::new(mock), SummaryFormat::Prose))
    }

    struct PanickingProvider;

    #[async_trait]
    impl Provider for PanickingProvider {
        fn model(&self) -> &str {
            "panics"
        }

        async fn complete(&self, _prompt: &Prompt) -> Result<String, SummarizeError> {
            panic!("provider blew up");
        }
    }

    /// Collects formatted log output in memory.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn next_settlement_when_idle_returns_none() {
        let mut form = build(MockProvider::new(vec![]));
        assert!(form.next_settlement().await.is_none());
    }

    #[tokio::test]
    async fn summarize_and_wait_on_blank_input_is_noop() {
        let mut form = build(MockProvider::reply("unused"));
        form.update_input("   ");
        assert!(form.summarize_and_wait().await.is_none());
        assert!(!form.state().is_busy());
    }

    #[tokio::test]
    async fn stale_settlement_is_ignored() {
        let mut form = build(MockProvider::new(vec![]));
        let outcome = form.apply(Settlement {
            token: 42,
            result: Ok("ghost".to_string()),
        });
        assert_eq!(outcome, SettleOutcome::Stale);
        assert_eq!(form.state().summary(), "");
    }

    #[tokio::test]
    async fn set_format_switches_prompts() {
        let mock = MockProvider::reply("- a");
        let log = mock.prompts();
        let mut form = build(mock);

        form.set_format(SummaryFormat::Bullets);
        assert_eq!(form.format(), SummaryFormat::Bullets);

        form.update_input("text");
        form.summarize_and_wait().await;
        let prompts = log.lock().unwrap();
        assert!(prompts[0].user.starts_with("Summarize the following content as bullet points:"));
    }

    #[tokio::test]
    async fn panicking_provider_still_settles() {
        let summarizer = Summarizer::new(Arc::new(PanickingProvider), SummaryFormat::Prose);
        let mut form = Form::new(summarizer);
        form.update_input("text");
        assert!(form.summarize());

        let outcome = tokio::time::timeout(Duration::from_secs(2), form.next_settlement())
            .await
            .expect("settlement should arrive");
        assert_eq!(outcome, Some(SettleOutcome::Failed));
        assert!(!form.state().is_busy());
        assert_eq!(form.state().error(), Some(FALLBACK_ERROR));

        // The form is usable again
        assert!(form.state().can_submit());
        assert!(form.state().can_clear());
    }

    #[tokio::test]
    async fn failures_are_quiet_under_default_filter() {
        let mut form = build(MockProvider::new(vec![]));
        form.update_input("text");
        let mut rx = form.subscribe();
        assert!(form.summarize());
        let Event::Started { token } = rx.recv().await.unwrap() else {
            panic!("expected Started");
        };

        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new(
                crate::logging::DEFAULT_FILTER,
            ))
            .with_writer(move || writer.clone())
            .finish();
        let outcome = tracing::subscriber::with_default(subscriber, || {
            form.apply(Settlement {
                token,
                result: Err(SummarizeError::message("rate limit exceeded")),
            })
        });

        assert_eq!(outcome, SettleOutcome::Failed);
        assert_eq!(form.state().error(), Some("rate limit exceeded"));
        let logged = String::from_utf8(buffer.0.lock().unwrap().clone()).unwrap();
        assert!(logged.is_empty(), "unexpected log output: {logged}");
    }

    #[tokio::test]
    async fn input_changes_are_broadcast() {
        let mut form = build(MockProvider::new(vec![]));
        let mut rx = form.subscribe();
        form.update_input("four");
        assert_eq!(rx.recv().await.unwrap(), Event::InputChanged { chars: 4 });
    }
}
