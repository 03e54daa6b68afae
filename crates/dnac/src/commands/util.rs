//! Shared helpers for command handlers.

use std::future::Future;
use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// A stderr spinner, hidden when stderr is not a terminal or output is quiet.
pub fn spinner(message: &str, quiet: bool) -> ProgressBar {
    if quiet || !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_owned());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Await `fut` while a spinner runs, clearing it afterwards.
pub async fn with_spinner<T>(message: &str, quiet: bool, fut: impl Future<Output = T>) -> T {
    let pb = spinner(message, quiet);
    let out = fut.await;
    pb.finish_and_clear();
    out
}
