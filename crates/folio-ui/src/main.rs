#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Folio UI wasm entry point and native publish walkthrough.

#[cfg(target_arch = "wasm32")]
fn main() {
    folio_ui::run_app();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use folio_telemetry::{LoggingConfig, init_logging};
    use folio_ui::config::BulkActionConfig;
    use folio_ui::demo::{InMemoryHandlers, run_publish_walkthrough, seeded_store};
    use std::rc::Rc;
    use std::time::Duration;

    init_logging(&LoggingConfig::default())?;

    let config = match std::env::args().nth(1) {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read bulk action config {path}"))?;
            BulkActionConfig::from_json(&raw)?
        }
        None => BulkActionConfig::default()
            .with_publish(true)
            .with_delete(true)
            .with_removal_interval(Duration::from_millis(250)),
    };
    config.validate()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build tokio runtime")?;
    let local = tokio::task::LocalSet::new();
    let report = local.block_on(&runtime, async {
        let list = seeded_store(4);
        let handlers = InMemoryHandlers::new(Rc::clone(&list), Duration::from_millis(300));
        run_publish_walkthrough(&config, &list, &handlers).await
    })?;

    tracing::info!(
        sizes = ?report.display_sizes,
        published = report.published,
        "walkthrough finished"
    );
    Ok(())
}
