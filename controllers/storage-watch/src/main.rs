//! Storage Watch Controller
//!
//! Consumes the control-plane watch feeds for storage `Cluster` and `Pool`
//! resources and logs every decoded event:
//! - CLUSTER_WATCH_INPUT: cluster feed (path, or `-` for stdin)
//! - POOL_WATCH_INPUT: pool feed (path, or `-` for stdin)
//!
//! Each feed is decoded on its own blocking task, so both watches run in
//! parallel without sharing any state.

mod config;
mod error;
mod watcher;

use crate::config::{WatchConfig, WatchInput};
use crate::error::ControllerError;
use crate::watcher::{watch_feed, WatchSummary};
use tokio::task::JoinHandle;
use tracing::info;
use tracing_subscriber::EnvFilter;
use watch_events::{poll_cluster_event, poll_pool_event};

type WatchTask = JoinHandle<Result<WatchSummary, ControllerError>>;

fn spawn_cluster_watch(input: WatchInput) -> WatchTask {
    tokio::task::spawn_blocking(move || -> Result<WatchSummary, ControllerError> {
        watch_feed("Cluster", input.open()?, poll_cluster_event)
    })
}

fn spawn_pool_watch(input: WatchInput) -> WatchTask {
    tokio::task::spawn_blocking(move || -> Result<WatchSummary, ControllerError> {
        watch_feed("Pool", input.open()?, poll_pool_event)
    })
}

async fn report(resource_name: &str, task: Option<WatchTask>) -> Result<(), ControllerError> {
    let Some(task) = task else {
        return Ok(());
    };
    let summary = task.await??;
    info!(
        "{} watch finished: {} added, {} modified, {} deleted",
        resource_name, summary.added, summary.modified, summary.deleted
    );
    if let Some(status) = summary.terminal_status {
        info!(
            "{} watch needs a resync (code {:?}, reason {:?})",
            resource_name, status.code, status.reason
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), ControllerError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting Storage Watch Controller");

    let config = WatchConfig::from_env()?;
    info!("Configuration:");
    for (name, input) in [("Cluster", &config.cluster_input), ("Pool", &config.pool_input)] {
        match input {
            Some(input) => info!("  {} feed: {}", name, input),
            None => info!("  {} feed: not watched", name),
        }
    }

    let cluster_task = config.cluster_input.map(spawn_cluster_watch);
    let pool_task = config.pool_input.map(spawn_pool_watch);

    let (cluster_result, pool_result) = tokio::join!(
        report("Cluster", cluster_task),
        report("Pool", pool_task)
    );
    cluster_result?;
    pool_result?;

    Ok(())
}
