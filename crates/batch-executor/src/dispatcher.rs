//! The dispatch seam (spec §9-style isolation): the Batch Executor knows
//! nothing about caching, preconditions, or HTTP — it hands each node's
//! intent to an injected dispatcher and records the `CommandResult`.

use async_trait::async_trait;
use dronecmd_domain::{CommandResult, ParsedIntent};

#[async_trait]
pub trait CommandDispatcher: Send + Sync {
    async fn dispatch(&self, drone_id: Option<&str>, intent: &ParsedIntent) -> CommandResult;
}
