//! Scheduling policies over a built [`BatchPlan`] (spec §4.7).

use std::sync::Arc;
use std::time::Instant;

use dronecmd_domain::{BatchNodeResult, BatchResult, ExecutionMode, NodeOutcome};
use tokio::task::JoinSet;
use tracing::instrument;

use crate::dispatcher::CommandDispatcher;
use crate::plan::BatchPlan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopOnError {
    Yes,
    No,
}

/// Run a plan under the requested mode and error policy, dispatching
/// every node through `dispatcher` (spec §4.7's scheduling/policy rules).
#[instrument(skip(plan, dispatcher))]
pub async fn execute(
    plan: &BatchPlan,
    mode: ExecutionMode,
    stop_on_error: StopOnError,
    dispatcher: Arc<dyn CommandDispatcher>,
) -> BatchResult {
    let started = Instant::now();
    let results = match mode {
        ExecutionMode::Sequential => run_sequential(plan, stop_on_error, dispatcher).await,
        ExecutionMode::Parallel => run_parallel(plan, dispatcher).await,
        ExecutionMode::Optimized => run_optimized(plan, stop_on_error, dispatcher).await,
    };
    BatchResult::from_nodes(results, started.elapsed().as_millis() as u64)
}

async fn dispatch_node(
    plan: &BatchPlan,
    index: usize,
    dispatcher: &Arc<dyn CommandDispatcher>,
) -> BatchNodeResult {
    let node = &plan.nodes[index];
    let result = dispatcher
        .dispatch(node.drone_id.as_deref(), &node.intent)
        .await;
    let outcome = if result.success {
        NodeOutcome::Succeeded
    } else {
        NodeOutcome::Failed
    };
    BatchNodeResult {
        node_id: index,
        outcome,
        result: Some(result),
    }
}

fn skipped(index: usize, outcome: NodeOutcome) -> BatchNodeResult {
    BatchNodeResult {
        node_id: index,
        outcome,
        result: None,
    }
}

/// Strict insertion order, honoring the DAG (it already is the DAG's
/// topological order, since nodes are only linked to earlier indices).
async fn run_sequential(
    plan: &BatchPlan,
    stop_on_error: StopOnError,
    dispatcher: Arc<dyn CommandDispatcher>,
) -> Vec<BatchNodeResult> {
    let mut results = vec![None; plan.nodes.len()];
    let mut halted = false;

    for &index in &plan.order {
        if halted {
            results[index] = Some(skipped(index, NodeOutcome::Cancelled));
            continue;
        }
        if has_failed_predecessor(plan, index, &results) {
            results[index] = Some(skipped(index, NodeOutcome::SkippedDependency));
            continue;
        }
        let outcome = dispatch_node(plan, index, &dispatcher).await;
        let failed = outcome.outcome == NodeOutcome::Failed;
        results[index] = Some(outcome);
        if failed && stop_on_error == StopOnError::Yes {
            halted = true;
        }
    }

    results.into_iter().map(|r| r.expect("every node visited")).collect()
}

/// All nodes attempted concurrently; the DAG is ignored (spec §4.7) —
/// preconditions at dispatch time remain the backend's authority.
async fn run_parallel(
    plan: &BatchPlan,
    dispatcher: Arc<dyn CommandDispatcher>,
) -> Vec<BatchNodeResult> {
    let mut set = JoinSet::new();
    for index in 0..plan.nodes.len() {
        let plan = plan.clone();
        let dispatcher = Arc::clone(&dispatcher);
        set.spawn(async move { dispatch_node(&plan, index, &dispatcher).await });
    }

    let mut results = vec![None; plan.nodes.len()];
    while let Some(joined) = set.join_next().await {
        if let Ok(outcome) = joined {
            let index = outcome.node_id;
            results[index] = Some(outcome);
        }
    }

    results
        .into_iter()
        .enumerate()
        .map(|(index, r)| r.unwrap_or_else(|| skipped(index, NodeOutcome::Cancelled)))
        .collect()
}

/// Topological-layer scheduling: each layer dispatches concurrently, and
/// only once the prior layer has fully drained (spec §4.7, glossary
/// "Optimized batch").
async fn run_optimized(
    plan: &BatchPlan,
    stop_on_error: StopOnError,
    dispatcher: Arc<dyn CommandDispatcher>,
) -> Vec<BatchNodeResult> {
    let mut results: Vec<Option<BatchNodeResult>> = vec![None; plan.nodes.len()];
    let mut halted = false;

    for layer in &plan.layers {
        if halted {
            for &index in layer {
                results[index] = Some(skipped(index, NodeOutcome::Cancelled));
            }
            continue;
        }

        let mut runnable = Vec::new();
        for &index in layer {
            if has_failed_predecessor(plan, index, &results) {
                results[index] = Some(skipped(index, NodeOutcome::SkippedDependency));
            } else {
                runnable.push(index);
            }
        }

        let mut set = JoinSet::new();
        for &index in &runnable {
            let plan = plan.clone();
            let dispatcher = Arc::clone(&dispatcher);
            set.spawn(async move { dispatch_node(&plan, index, &dispatcher).await });
        }

        let mut layer_failed = false;
        while let Some(joined) = set.join_next().await {
            if let Ok(outcome) = joined {
                if outcome.outcome == NodeOutcome::Failed {
                    layer_failed = true;
                }
                results[outcome.node_id] = Some(outcome);
            }
        }

        if layer_failed && stop_on_error == StopOnError::Yes {
            halted = true;
        }
    }

    results
        .into_iter()
        .enumerate()
        .map(|(index, r)| r.unwrap_or_else(|| skipped(index, NodeOutcome::Cancelled)))
        .collect()
}

fn has_failed_predecessor(
    plan: &BatchPlan,
    index: usize,
    results: &[Option<BatchNodeResult>],
) -> bool {
    plan.predecessors[index].iter().any(|&p| {
        matches!(
            results[p].as_ref().map(|r| r.outcome),
            Some(NodeOutcome::Failed)
                | Some(NodeOutcome::Cancelled)
                | Some(NodeOutcome::SkippedDependency)
        )
    })
}
