//! Builds the dependency DAG for a batch of commands (spec §4.7).

use std::collections::{HashMap, VecDeque};

use dronecmd_domain::{DomainError, ErrorCode, IntentContext, ParsedIntent};

use crate::effects;

/// One command in a batch, already resolved to an intent.
#[derive(Debug, Clone)]
pub struct PlanNode {
    pub index: usize,
    pub intent: ParsedIntent,
    /// The drone this node targets, or `None` if it could not be inferred
    /// (the planner then treats it as part of an ambiguous, linearized
    /// group — spec §4.7 "if still ambiguous, linearize").
    pub drone_id: Option<String>,
}

/// A batch input before planning: either a natural-language command (parsed
/// via the NLP Engine) or an already-typed intent (spec §4.7: "each typed
/// request is already an intent").
#[derive(Debug, Clone)]
pub enum BatchInput {
    Text(String),
    Intent(ParsedIntent),
}

#[derive(Debug, Clone)]
pub struct BatchPlan {
    pub nodes: Vec<PlanNode>,
    /// Direct predecessors of each node, indexed by node index.
    pub predecessors: Vec<Vec<usize>>,
    /// Topological order, flattened (used by `sequential`).
    pub order: Vec<usize>,
    /// Topological layering: nodes within a layer have no dependency on
    /// each other and may run concurrently (used by `optimized`).
    pub layers: Vec<Vec<usize>>,
}

/// Parse/adopt every input into a node, then derive edges from the
/// per-action effect sets, scoped per drone. Nodes whose `drone_id` is
/// unresolved are grouped together and fully linearized against each
/// other (each depends on all prior ambiguous nodes), since the planner
/// cannot otherwise tell which drone's state they observe.
pub fn build(inputs: &[BatchInput], context: Option<&IntentContext>) -> Result<BatchPlan, DomainError> {
    let nodes: Vec<PlanNode> = inputs
        .iter()
        .enumerate()
        .map(|(index, input)| {
            let intent = match input {
                BatchInput::Text(text) => dronecmd_nlp::parse(text, context, &[]),
                BatchInput::Intent(intent) => intent.clone(),
            };
            let drone_id = intent
                .drone_id()
                .map(|s| s.to_string())
                .or_else(|| context.and_then(|c| c.default_drone_id.clone()));
            PlanNode {
                index,
                intent,
                drone_id,
            }
        })
        .collect();

    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];

    // Per-drone (or "ambiguous group") producer tracking: the most recent
    // node index that produced each effect within the scope.
    let mut last_producer: HashMap<(String, &'static str), usize> = HashMap::new();
    let mut ambiguous_group: Vec<usize> = Vec::new();

    for node in &nodes {
        let scope = node.drone_id.clone().unwrap_or_else(|| "__ambiguous__".to_string());
        let action_name = node.intent.action.as_str();

        if node.drone_id.is_none() {
            // Linearize: depends on every prior ambiguous-group node.
            predecessors[node.index].extend(ambiguous_group.iter().copied());
            ambiguous_group.push(node.index);
        }

        for required in effects::requires(action_name) {
            if let Some(&producer) = last_producer.get(&(scope.clone(), required)) {
                if producer != node.index && !predecessors[node.index].contains(&producer) {
                    predecessors[node.index].push(producer);
                }
            }
        }
        for produced in effects::produces(action_name) {
            last_producer.insert((scope.clone(), produced), node.index);
        }
    }

    let (order, layers) = topological_sort(&predecessors)?;

    Ok(BatchPlan {
        nodes,
        predecessors,
        order,
        layers,
    })
}

/// Kahn's algorithm: returns a flat topological order and a layering
/// (each layer = nodes whose predecessors are all in prior layers).
/// Errors with `BATCH_PLAN_CYCLE` if the graph is not acyclic.
fn topological_sort(predecessors: &[Vec<usize>]) -> Result<(Vec<usize>, Vec<Vec<usize>>), DomainError> {
    let n = predecessors.len();
    let mut indegree = vec![0usize; n];
    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (node, preds) in predecessors.iter().enumerate() {
        indegree[node] = preds.len();
        for &p in preds {
            successors[p].push(node);
        }
    }

    let mut layers: Vec<Vec<usize>> = Vec::new();
    let mut order: Vec<usize> = Vec::new();
    let mut frontier: VecDeque<usize> = (0..n).filter(|&i| indegree[i] == 0).collect();
    let mut remaining = n;

    while !frontier.is_empty() {
        let layer: Vec<usize> = frontier.drain(..).collect();
        let mut next_frontier = Vec::new();
        for &node in &layer {
            order.push(node);
            remaining -= 1;
            for &succ in &successors[node] {
                indegree[succ] -= 1;
                if indegree[succ] == 0 {
                    next_frontier.push(succ);
                }
            }
        }
        layers.push(layer);
        frontier = next_frontier.into();
    }

    if remaining != 0 {
        return Err(DomainError::new(
            ErrorCode::BatchPlanCycle,
            "batch plan contains a dependency cycle",
        ));
    }

    Ok((order, layers))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intent(action: &str, drone_id: Option<&str>) -> ParsedIntent {
        let mut intent = ParsedIntent::unknown(action);
        intent.action = action.to_string();
        if let Some(id) = drone_id {
            intent.parameters.insert(
                "drone_id".to_string(),
                dronecmd_domain::ParameterValue::Text(id.to_string()),
            );
        }
        intent
    }

    #[test]
    fn connect_takeoff_photo_land_forms_a_linear_chain() {
        let inputs = vec![
            BatchInput::Intent(intent("connect", Some("AA"))),
            BatchInput::Intent(intent("takeoff", Some("AA"))),
            BatchInput::Intent(intent("take_photo", Some("AA"))),
            BatchInput::Intent(intent("land", Some("AA"))),
        ];
        let plan = build(&inputs, None).unwrap();
        assert_eq!(plan.order, vec![0, 1, 2, 3]);
        assert_eq!(plan.predecessors[1], vec![0]);
        assert_eq!(plan.predecessors[2], vec![1]);
        assert_eq!(plan.predecessors[3], vec![1]);
    }

    #[test]
    fn independent_drones_are_not_linked() {
        let inputs = vec![
            BatchInput::Intent(intent("connect", Some("AA"))),
            BatchInput::Intent(intent("connect", Some("BB"))),
        ];
        let plan = build(&inputs, None).unwrap();
        assert!(plan.predecessors[0].is_empty());
        assert!(plan.predecessors[1].is_empty());
        assert_eq!(plan.layers[0].len(), 2);
    }

    #[test]
    fn take_photo_depends_on_takeoff_and_gets_its_own_layer() {
        let inputs = vec![
            BatchInput::Intent(intent("connect", Some("AA"))),
            BatchInput::Intent(intent("takeoff", Some("AA"))),
            BatchInput::Intent(intent("take_photo", Some("AA"))),
        ];
        let plan = build(&inputs, None).unwrap();
        assert_eq!(plan.layers.len(), 3);
        assert_eq!(plan.layers[2], vec![2]);
    }

    #[test]
    fn topological_sort_rejects_a_cycle() {
        // A synthetic cycle: node 0 depends on node 1 and vice versa.
        // `build` never produces one itself (edges only point backward in
        // insertion order) but the sort must still reject it if one arises.
        let predecessors = vec![vec![1], vec![0]];
        let err = topological_sort(&predecessors).unwrap_err();
        assert_eq!(err.code, ErrorCode::BatchPlanCycle);
    }
}
