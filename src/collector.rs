// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Fan-out/fan-in over all configured repositories.
//!
//! One task is spawned per repository, all of them immediately. Each task
//! sends exactly one [`RepoResult`] on a channel sized to the number of
//! repositories, so no sender ever waits for capacity. The collector returns
//! once every result has arrived; there is no timeout. A task that dies
//! without sending is still reported, as a result carrying
//! [`Error::WorkerFailed`].

use std::sync::Arc;

use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, error, info};

use crate::{
    client::HostingApi,
    config::RepoSpec,
    error::Error,
    metric::Mode,
    worker::{RepoResult, evaluate_repository},
};

/// Evaluates every repository in `specs` concurrently.
///
/// Results are returned in arrival order. The returned vector holds one
/// entry per input, including repositories whose evaluation failed.
pub async fn collect<A: HostingApi,>(api: Arc<A,>, specs: Vec<RepoSpec,>, mode: Mode,) -> Vec<RepoResult,>
{
    let expected = specs.len();
    if expected == 0 {
        return Vec::new();
    }

    info!("Evaluating {} repositories in {:?} mode", expected, mode);
    let (sender, mut receiver,) = mpsc::channel(expected,);

    let mut workers = Vec::with_capacity(expected,);
    for spec in specs {
        let api = Arc::clone(&api,);
        let sender = sender.clone();
        let owned = spec.clone();
        let handle = tokio::spawn(async move {
            let result = evaluate_repository(api.as_ref(), spec, mode,).await;
            if sender.send(result,).await.is_err() {
                error!("Result receiver closed before all repositories reported");
            }
        },);
        workers.push((owned, handle,),);
    }
    drop(sender,);

    let mut results = Vec::with_capacity(expected,);
    while results.len() < expected {
        match receiver.recv().await {
            Some(result,) => {
                debug!("Received {} ({}/{})", result.spec.location, results.len() + 1, expected);
                results.push(result,);
            }
            None => {
                error!("{} of {} repositories never reported", expected - results.len(), expected);
                break;
            }
        }
    }

    if results.len() < expected {
        recover_crashed_workers(workers, &mut results,).await;
    }

    results
}

/// Adds an errored result for every worker task that died before sending.
///
/// The channel only closes early when a task ended without reporting, so
/// every failed join corresponds to exactly one missing result.
async fn recover_crashed_workers(
    workers: Vec<(RepoSpec, JoinHandle<(),>,),>,
    results: &mut Vec<RepoResult,>,
)
{
    for (spec, handle,) in workers {
        let Err(join_error,) = handle.await else {
            continue;
        };
        error!("Worker for {} ({}) died: {}", spec.name, spec.location, join_error);
        let location = spec.location.clone();
        let mut result = RepoResult::new(spec,);
        result.error = Some(Error::WorkerFailed {
            location,
            message: join_error.to_string(),
        },);
        results.push(result,);
    }
}
