//! A terminal spinner shown while a summary is being generated.

use std::io::Write;
use std::time::{Duration, Instant};

use tokio::task::JoinHandle;

/// Braille spinner frames.
const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Frame interval.
const INTERVAL: Duration = Duration::from_millis(80);

/// A spinner line on stderr with an elapsed-seconds readout, e.g.
/// `⠹ summarizing 1,204 characters (3s)`.
///
/// Dropping the spinner without calling [`Spinner::stop`] aborts it and
/// may leave the line on screen.
pub struct Spinner {
    handle: JoinHandle<()>,
    cancel: tokio::sync::watch::Sender<bool>,
}

impl Spinner {
    pub fn start(label: &str) -> Self {
        let (cancel_tx, mut cancel_rx) = tokio::sync::watch::channel(false);
        let label = label.to_string();

        let handle = tokio::spawn(async move {
            let started = Instant::now();
            let mut i = 0;
            loop {
                eprint!("\x1b[2K\r{}", frame_line(i, &label, started.elapsed()));
                let _ = std::io::stderr().flush();

                tokio::select! {
                    _ = tokio::time::sleep(INTERVAL) => {}
                    _ = cancel_rx.changed() => break,
                }
                i += 1;
            }
            eprint!("\x1b[2K\r");
            let _ = std::io::stderr().flush();
        });

        Self {
            handle,
            cancel: cancel_tx,
        }
    }

    /// Stop the spinner and clear its line.
    pub async fn stop(mut self) {
        let _ = self.cancel.send(true);
        let _ = (&mut self.handle).await;
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn frame_line(tick: usize, label: &str, elapsed: Duration) -> String {
    let frame = FRAMES[tick % FRAMES.len()];
    format!("{frame} {label} ({}s)", elapsed.as_secs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_are_single_braille_chars() {
        assert!(!FRAMES.is_empty());
        for frame in FRAMES {
            assert_eq!(frame.chars().count(), 1);
        }
    }

    #[test]
    fn frame_line_cycles_and_shows_elapsed() {
        assert_eq!(
            frame_line(0, "summarizing", Duration::from_millis(2500)),
            "⠋ summarizing (2s)"
        );
        assert!(frame_line(FRAMES.len(), "x", Duration::ZERO).starts_with(FRAMES[0]));
    }

    #[tokio::test]
    async fn spinner_starts_and_stops_without_panic() {
        let spinner = Spinner::start("testing");
        tokio::time::sleep(Duration::from_millis(200)).await;
        spinner.stop().await;
    }

    #[tokio::test]
    async fn spinner_dropped_without_stop() {
        let spinner = Spinner::start("dropped");
        drop(spinner);
    }
}
