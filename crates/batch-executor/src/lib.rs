//! Component G: DAG planning and scheduled execution over a batch of
//! drone commands (spec §4.7).

pub mod dispatcher;
pub mod effects;
pub mod executor;
pub mod plan;

pub use dispatcher::CommandDispatcher;
pub use executor::{execute, StopOnError};
pub use plan::{build, BatchInput, BatchPlan, PlanNode};

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use dronecmd_domain::{CommandResult, ExecutionMode, NodeOutcome, ParsedIntent};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct AlwaysSucceeds {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CommandDispatcher for AlwaysSucceeds {
        async fn dispatch(&self, _drone_id: Option<&str>, intent: &ParsedIntent) -> CommandResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            CommandResult::success(format!("{} ok", intent.action), 1)
        }
    }

    struct FailsOn {
        failing_action: &'static str,
    }

    #[async_trait]
    impl CommandDispatcher for FailsOn {
        async fn dispatch(&self, _drone_id: Option<&str>, intent: &ParsedIntent) -> CommandResult {
            if intent.action == self.failing_action {
                let err = dronecmd_domain::DomainError::new(
                    dronecmd_domain::ErrorCode::CommandFailed,
                    "simulated failure",
                );
                CommandResult::failure(&err, 1)
            } else {
                CommandResult::success(format!("{} ok", intent.action), 1)
            }
        }
    }

    fn typed(action: &str, drone_id: &str) -> BatchInput {
        let mut intent = ParsedIntent::unknown(action);
        intent.action = action.to_string();
        intent.confidence = 1.0;
        intent.parameters.insert(
            "drone_id".to_string(),
            dronecmd_domain::ParameterValue::Text(drone_id.to_string()),
        );
        BatchInput::Intent(intent)
    }

    #[tokio::test]
    async fn connect_takeoff_photo_land_all_succeed_sequentially() {
        let inputs = vec![
            typed("connect", "AA"),
            typed("takeoff", "AA"),
            typed("take_photo", "AA"),
            typed("land", "AA"),
        ];
        let plan = build(&inputs, None).unwrap();
        let dispatcher = Arc::new(AlwaysSucceeds {
            calls: AtomicUsize::new(0),
        });
        let result = execute(
            &plan,
            ExecutionMode::Sequential,
            StopOnError::Yes,
            dispatcher,
        )
        .await;

        assert_eq!(result.results.len(), 4);
        assert_eq!(result.summary.succeeded, 4);
        assert_eq!(result.summary.failed, 0);
    }

    #[tokio::test]
    async fn stop_on_error_cancels_unstarted_nodes() {
        let inputs = vec![
            typed("connect", "AA"),
            typed("takeoff", "AA"),
            typed("take_photo", "AA"),
        ];
        let plan = build(&inputs, None).unwrap();
        let dispatcher = Arc::new(FailsOn {
            failing_action: "takeoff",
        });
        let result = execute(
            &plan,
            ExecutionMode::Sequential,
            StopOnError::Yes,
            dispatcher,
        )
        .await;

        assert_eq!(result.results[0].outcome, NodeOutcome::Succeeded);
        assert_eq!(result.results[1].outcome, NodeOutcome::Failed);
        assert_eq!(result.results[2].outcome, NodeOutcome::Cancelled);
    }

    #[tokio::test]
    async fn without_stop_on_error_descendants_are_skipped() {
        let inputs = vec![typed("connect", "AA"), typed("takeoff", "AA")];
        let plan = build(&inputs, None).unwrap();
        let dispatcher = Arc::new(FailsOn {
            failing_action: "connect",
        });
        let result = execute(
            &plan,
            ExecutionMode::Sequential,
            StopOnError::No,
            dispatcher,
        )
        .await;

        assert_eq!(result.results[0].outcome, NodeOutcome::Failed);
        assert_eq!(result.results[1].outcome, NodeOutcome::SkippedDependency);
    }
}
