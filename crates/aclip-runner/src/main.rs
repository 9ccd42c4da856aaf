//! Audio auto-clipper run binary.
//!
//! Classifies pre-segmented audio chunks against a replay file exported
//! by the external classifier runner, filters for continuity, writes the
//! audit trail, and emits the concat list for the external concatenator.

use std::path::PathBuf;

use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use aclip_runner::{progress_channel, run, ProgressEvent, ReplayClassifier, RunConfig, RunError};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("aclip_runner=info".parse().unwrap())
        .add_directive("aclip_engine=info".parse().unwrap())
        .add_directive("aclip_audit=info".parse().unwrap());

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    info!("Starting aclip-runner");

    let config = RunConfig::from_env();
    info!("Run config: {:?}", config);

    let replay_path = std::env::var("ACLIP_REPLAY_JSON")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("replay.json"));
    let classifier = match ReplayClassifier::load(&replay_path).await {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load replay file {}: {}", replay_path.display(), e);
            std::process::exit(1);
        }
    };

    // Drain progress events into log lines
    let (progress, mut rx) = progress_channel();
    let reporter = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match event {
                ProgressEvent::Stage { name } => info!(stage = %name, "Stage"),
                ProgressEvent::Chunk { done, total } => {
                    if done % 100 == 0 || done == total {
                        info!(done, total, "Classified chunks");
                    }
                }
                ProgressEvent::Done { kept, total } => info!(kept, total, "Run finished"),
                ProgressEvent::Failed { message } => error!(%message, "Run aborted"),
            }
        }
    });

    let result = run(&config, &classifier, &progress).await;
    drop(progress);
    reporter.await.ok();

    match result {
        Ok(outcome) => {
            info!(
                kept = outcome.kept.len(),
                segments = outcome.segments.len(),
                keep_ratio = outcome.stats.keep_ratio,
                concat_list = %config.concat_list_path.display(),
                "Done"
            );
        }
        Err(RunError::NoMatchingContent) => {
            // Valid terminal outcome, not an infrastructure failure
            info!("No matching content found; audit trail left in place");
        }
        Err(e) => {
            error!("Run failed: {}", e);
            std::process::exit(1);
        }
    }
}
