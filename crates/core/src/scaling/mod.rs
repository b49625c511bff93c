//! Purpose: Node pool scaling delta, call to action and removal warning.
//! Responsibilities: Validate proposed bounds and hold them in [`ScalingEditor`].
//! Non-scope: Does not talk to the API except through [`update`].
//! Invariants/Assumptions: Everything outside [`update`] is pure and never overflows.

pub mod update;

use happa_config::ScalingLimits;
use serde::{Deserialize, Serialize};

pub use update::{
    NodePoolScaling, ScalingOutcome, UNKNOWN, get_node_pool_scaling, update_node_pool_scaling,
};

/// Proposed autoscaler bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalingBounds {
    pub min: i64,
    pub max: i64,
}

/// Result of validating each bound on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScalingValidity {
    pub min_valid: bool,
    pub max_valid: bool,
}

impl ScalingValidity {
    pub fn valid() -> Self {
        Self {
            min_valid: true,
            max_valid: true,
        }
    }

    pub fn is_valid(self) -> bool {
        self.min_valid && self.max_valid
    }
}

/// Validate bounds against each other and the platform limits.
pub fn validate_scaling(min: i64, max: i64, limits: &ScalingLimits) -> ScalingValidity {
    let in_limits =
        |value: i64| value >= 0 && value >= limits.min_nodes && value <= limits.max_nodes;
    ScalingValidity {
        min_valid: in_limits(min) && min <= max,
        max_valid: in_limits(max) && max >= min,
    }
}

/// Nodes the autoscaler must add (positive) or remove (negative) for
/// `desired` to fit in `[min, max]`.
///
/// Saturates at the `i64` range for bounds far outside any real pool.
pub fn get_worker_nodes_difference(min: i64, max: i64, desired: i64) -> i64 {
    if min > desired {
        min.saturating_sub(desired)
    } else if max < desired {
        max.saturating_sub(desired)
    } else {
        0
    }
}

fn nodes_label(singular: bool) -> &'static str {
    if singular { "node" } else { "nodes" }
}

/// Confirmation button for a scaling change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitButtonAttributes {
    pub label: String,
    pub primary: bool,
    pub danger: bool,
    pub disabled: bool,
}

/// The confirmation button for applying `proposed` to a pool whose scaling
/// is `initial`.
///
/// Disabled unless both bounds are valid and at least one changed.
pub fn get_submit_button_attributes(
    initial: &NodePoolScaling,
    proposed: ScalingBounds,
    validity: ScalingValidity,
) -> SubmitButtonAttributes {
    let difference = get_worker_nodes_difference(proposed.min, proposed.max, initial.desired);
    let changed = proposed.min != initial.min || proposed.max != initial.max;
    let disabled = !(validity.is_valid() && changed);

    if difference > 0 && initial.desired > 0 {
        SubmitButtonAttributes {
            label: format!("Increase minimum number of nodes by {difference}"),
            primary: true,
            danger: false,
            disabled,
        }
    } else if difference < 0 && initial.desired > 0 {
        let removed = difference.unsigned_abs();
        SubmitButtonAttributes {
            label: format!("Remove {removed} {}", nodes_label(removed == 1)),
            primary: false,
            danger: true,
            disabled,
        }
    } else {
        SubmitButtonAttributes {
            label: "Apply".to_string(),
            primary: true,
            danger: false,
            disabled,
        }
    }
}

/// Warning shown while the proposed maximum forces nodes to be removed.
pub fn scaling_warning(min: i64, max: i64, desired: i64) -> Option<String> {
    let difference = get_worker_nodes_difference(min, max, desired);
    if difference >= 0 {
        return None;
    }
    let removed = difference.unsigned_abs();
    Some(format!(
        "The node pool currently has {desired} worker {} running. By setting the maximum \
         lower than that, you enforce the removal of {removed} {}. This could result in \
         unscheduled workloads.",
        nodes_label(desired == 1),
        nodes_label(removed == 1),
    ))
}

/// Proposed bounds being edited for one node pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScalingEditor {
    initial: NodePoolScaling,
    limits: ScalingLimits,
    proposed: ScalingBounds,
    validity: ScalingValidity,
}

impl ScalingEditor {
    pub fn new(initial: NodePoolScaling, limits: ScalingLimits) -> Self {
        Self {
            proposed: ScalingBounds {
                min: initial.min,
                max: initial.max,
            },
            initial,
            limits,
            validity: ScalingValidity::valid(),
        }
    }

    pub fn initial(&self) -> &NodePoolScaling {
        &self.initial
    }

    pub fn proposed(&self) -> ScalingBounds {
        self.proposed
    }

    pub fn validity(&self) -> ScalingValidity {
        self.validity
    }

    pub fn set_min(&mut self, min: i64) {
        self.proposed.min = min;
        self.revalidate();
    }

    pub fn set_max(&mut self, max: i64) {
        self.proposed.max = max;
        self.revalidate();
    }

    pub fn set_bounds(&mut self, min: i64, max: i64) {
        self.proposed = ScalingBounds { min, max };
        self.revalidate();
    }

    fn revalidate(&mut self) {
        self.validity = validate_scaling(self.proposed.min, self.proposed.max, &self.limits);
    }

    /// Drop the edit: bounds go back to the initial scaling and count as valid.
    pub fn cancel(&mut self) {
        self.proposed = ScalingBounds {
            min: self.initial.min,
            max: self.initial.max,
        };
        self.validity = ScalingValidity::valid();
    }

    pub fn nodes_difference(&self) -> i64 {
        get_worker_nodes_difference(self.proposed.min, self.proposed.max, self.initial.desired)
    }

    pub fn attributes(&self) -> SubmitButtonAttributes {
        get_submit_button_attributes(&self.initial, self.proposed, self.validity)
    }

    pub fn warning(&self) -> Option<String> {
        scaling_warning(self.proposed.min, self.proposed.max, self.initial.desired)
    }
}
