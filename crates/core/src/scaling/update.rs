//! Purpose: Reading and writing a node pool's autoscaler bounds.
//! Responsibilities: Read bounds from annotations or the AWS sibling and patch changed bounds.
//! Non-scope: Does not compute deltas or labels (see the parent module).
//! Invariants/Assumptions: Bounds are validated before any request; unchanged bounds send nothing.

use happa_client::HappaClient;
use happa_client::models::{AWSMachineDeployment, MachinePool};
use happa_config::ScalingLimits;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};

use crate::error::ScalingError;
use crate::labels;
use crate::provider::{NodePool, ProviderNodePool};
use crate::scaling::validate_scaling;

/// Marks a scaling value the node pool does not report.
pub const UNKNOWN: i64 = -1;

/// Scaling state of a node pool. Unknown values are [`UNKNOWN`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodePoolScaling {
    pub min: i64,
    pub max: i64,
    /// Nodes the pool is asking for.
    pub desired: i64,
    /// Ready nodes.
    pub current: i64,
}

impl NodePoolScaling {
    pub fn unknown() -> Self {
        Self {
            min: UNKNOWN,
            max: UNKNOWN,
            desired: UNKNOWN,
            current: UNKNOWN,
        }
    }

    pub fn has_bounds(&self) -> bool {
        self.min != UNKNOWN && self.max != UNKNOWN
    }
}

/// Whether an update had to write anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalingOutcome {
    Updated,
    Unchanged,
}

fn annotation_value(pool: &NodePool, key: &str) -> Option<i64> {
    pool.metadata().annotation(key)?.trim().parse().ok()
}

fn bounds(node_pool: &NodePool, provider_node_pool: Option<&ProviderNodePool>) -> (i64, i64) {
    match (node_pool, provider_node_pool) {
        (NodePool::MachinePool(_), provider) => {
            let from_provider = match provider {
                Some(ProviderNodePool::AWSMachinePool(p)) => p
                    .spec
                    .as_ref()
                    .map(|s| (s.min_size, s.max_size))
                    .unwrap_or_default(),
                _ => (None, None),
            };
            (
                annotation_value(node_pool, labels::AUTOSCALER_MIN_SIZE)
                    .or(from_provider.0)
                    .unwrap_or(UNKNOWN),
                annotation_value(node_pool, labels::AUTOSCALER_MAX_SIZE)
                    .or(from_provider.1)
                    .unwrap_or(UNKNOWN),
            )
        }
        (NodePool::MachineDeployment(_), Some(ProviderNodePool::AWSMachineDeployment(p))) => {
            let scaling = p.scaling().unwrap_or_default();
            (
                scaling.min.unwrap_or(UNKNOWN),
                scaling.max.unwrap_or(UNKNOWN),
            )
        }
        (NodePool::MachineDeployment(_), _) => (UNKNOWN, UNKNOWN),
    }
}

/// Current scaling of a node pool.
pub fn get_node_pool_scaling(
    node_pool: &NodePool,
    provider_node_pool: Option<&ProviderNodePool>,
) -> NodePoolScaling {
    let (min, max) = bounds(node_pool, provider_node_pool);
    NodePoolScaling {
        min,
        max,
        desired: node_pool.desired_replicas().unwrap_or(UNKNOWN),
        current: node_pool.ready_replicas().unwrap_or(UNKNOWN),
    }
}

/// Write new autoscaler bounds.
///
/// Nothing is sent when the stored bounds already match. Bounds are
/// validated against `limits` first.
pub async fn update_node_pool_scaling(
    client: &HappaClient,
    node_pool: &NodePool,
    provider_node_pool: Option<&ProviderNodePool>,
    min: i64,
    max: i64,
    limits: &ScalingLimits,
) -> Result<ScalingOutcome, ScalingError> {
    if !validate_scaling(min, max, limits).is_valid() {
        return Err(ScalingError::InvalidBounds(format!(
            "min {min} and max {max} must satisfy {} <= min <= max <= {}",
            limits.min_nodes.max(0),
            limits.max_nodes
        )));
    }

    let namespace = node_pool.namespace();
    let name = node_pool.name();

    match (node_pool, provider_node_pool) {
        (NodePool::MachinePool(_), _) => {
            if annotation_value(node_pool, labels::AUTOSCALER_MIN_SIZE) == Some(min)
                && annotation_value(node_pool, labels::AUTOSCALER_MAX_SIZE) == Some(max)
            {
                debug!(node_pool = name, "Scaling unchanged");
                return Ok(ScalingOutcome::Unchanged);
            }

            let mut annotations = serde_json::Map::new();
            annotations.insert(labels::AUTOSCALER_MIN_SIZE.to_string(), json!(min.to_string()));
            annotations.insert(labels::AUTOSCALER_MAX_SIZE.to_string(), json!(max.to_string()));
            let patch = json!({ "metadata": { "annotations": annotations } });
            client.patch::<MachinePool>(namespace, name, &patch).await?;
        }
        (NodePool::MachineDeployment(_), Some(ProviderNodePool::AWSMachineDeployment(p))) => {
            let current = p.scaling().unwrap_or_default();
            if current.min == Some(min) && current.max == Some(max) {
                debug!(node_pool = name, "Scaling unchanged");
                return Ok(ScalingOutcome::Unchanged);
            }

            let patch = json!({
                "spec": {
                    "nodePool": {
                        "scaling": { "min": min, "max": max }
                    }
                }
            });
            client
                .patch::<AWSMachineDeployment>(
                    p.metadata.namespace.as_deref().or(namespace),
                    p.metadata.name_or_default(),
                    &patch,
                )
                .await?;
        }
        (NodePool::MachineDeployment(_), _) => {
            return Err(ScalingError::UnsupportedNodePool(name.to_string()));
        }
    }

    info!(node_pool = name, min, max, "Node pool scaling updated");
    Ok(ScalingOutcome::Updated)
}
