//! Batch execution types shared between the Batch Executor and Tool Surface
//! (spec §3, §4.7).

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    Sequential,
    Parallel,
    Optimized,
}

impl Default for ExecutionMode {
    fn default() -> Self {
        ExecutionMode::Optimized
    }
}

/// Outcome of a single batch node beyond plain success/failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeOutcome {
    Succeeded,
    Failed,
    Cancelled,
    SkippedDependency,
}

/// One entry in the batch result array, in input order (spec §4.7).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchNodeResult {
    pub node_id: usize,
    pub outcome: NodeOutcome,
    pub result: Option<crate::drone::CommandResult>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub cancelled: usize,
    pub total_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    pub results: Vec<BatchNodeResult>,
    pub summary: BatchSummary,
}

impl BatchResult {
    pub fn from_nodes(results: Vec<BatchNodeResult>, total_ms: u64) -> Self {
        let mut summary = BatchSummary {
            total: results.len(),
            total_ms,
            ..Default::default()
        };
        for r in &results {
            match r.outcome {
                NodeOutcome::Succeeded => summary.succeeded += 1,
                NodeOutcome::Failed => summary.failed += 1,
                NodeOutcome::Cancelled => summary.cancelled += 1,
                NodeOutcome::SkippedDependency => summary.failed += 1,
            }
        }
        Self { results, summary }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_execution_mode_is_optimized() {
        assert_eq!(ExecutionMode::default(), ExecutionMode::Optimized);
    }

    #[test]
    fn summary_counts_skipped_dependency_as_failed() {
        let results = vec![
            BatchNodeResult {
                node_id: 0,
                outcome: NodeOutcome::Succeeded,
                result: None,
            },
            BatchNodeResult {
                node_id: 1,
                outcome: NodeOutcome::SkippedDependency,
                result: None,
            },
        ];
        let batch = BatchResult::from_nodes(results, 42);
        assert_eq!(batch.summary.total, 2);
        assert_eq!(batch.summary.succeeded, 1);
        assert_eq!(batch.summary.failed, 1);
        assert_eq!(batch.summary.total_ms, 42);
    }
}
