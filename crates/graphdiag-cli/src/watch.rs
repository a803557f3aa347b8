use crate::debounce::Debouncer;
use crate::{CliError, Exporter};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Renders `path` once, then again after each burst of edits settles. Runs until Ctrl-C.
pub(crate) async fn watch(
    path: &Path,
    exporter: Exporter,
    delay: Duration,
) -> Result<(), CliError> {
    let exporter = Arc::new(exporter);
    let mut last = tokio::fs::read_to_string(path).await?;
    render(&exporter, &last).await;

    tracing::info!(path = %path.display(), delay_ms = delay.as_millis() as u64, "watching");
    let mut debouncer = Debouncer::new(delay);
    let mut ticker = tokio::time::interval(POLL_INTERVAL);
    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = tokio::signal::ctrl_c() => break,
        }

        let text = match tokio::fs::read_to_string(path).await {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "cannot read input");
                continue;
            }
        };
        if text == last {
            continue;
        }
        tracing::debug!(path = %path.display(), "input changed");
        last = text.clone();

        let exporter = Arc::clone(&exporter);
        debouncer.schedule(async move { render(&exporter, &text).await });
    }
    Ok(())
}

async fn render(exporter: &Exporter, text: &str) {
    if let Err(err) = exporter.export(text, false).await {
        tracing::error!(error = %err, "render failed");
    }
}
