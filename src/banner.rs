//! Startup banner and session summary display.

use crate::consts::{AUTHOR, HOMEPAGE, REPO};
use crate::form::SettleOutcome;

/// Session configuration for display in the startup banner.
pub struct BannerInfo<'a> {
    pub endpoint: &'a str,
    pub model: &'a str,
    pub format: &'a str,
    pub auth_status: &'a str,
    pub store: &'a str,
}

/// Print the startup banner with session info.
pub fn print_banner(info: &BannerInfo) {
    println!(
        r#"
   ╔═══════════════════════════════════════╗
   ║              P R É C I S              ║
   ║     paste it long, read it short      ║
   ╚═══════════════════════════════════════╝

   version   {}
   by        {}
   home      {}
   repo      {}
   endpoint  {} ({})
   auth      {}
   format    {}
   prefs     {}

   Paste or type text, then /summarize. /help lists commands.
"#,
        env!("CARGO_PKG_VERSION"),
        AUTHOR,
        HOMEPAGE,
        REPO,
        info.endpoint,
        info.model,
        info.auth_status,
        info.format,
        info.store,
    );
}

/// Outcome tally for the farewell line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub summaries: usize,
    pub failures: usize,
    pub discarded: usize,
}

impl SessionStats {
    pub fn record(&mut self, outcome: SettleOutcome) {
        match outcome {
            SettleOutcome::Succeeded => self.summaries += 1,
            SettleOutcome::Failed => self.failures += 1,
            SettleOutcome::Discarded => self.discarded += 1,
            SettleOutcome::Stale => {}
        }
    }

    pub fn total(&self) -> usize {
        self.summaries + self.failures + self.discarded
    }
}

/// Print the session summary (request tally + farewell).
pub fn print_session_summary(stats: SessionStats) {
    if stats.total() > 0 {
        println!(
            "session: {} summarized, {} failed, {} discarded",
            stats.summaries, stats.failures, stats.discarded,
        );
    }
    println!("goodbye.");
}
