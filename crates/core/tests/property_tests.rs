//! Property tests for summary merging, releases and scaling arithmetic.

use happa_client::models::{Cluster, ObjectMeta};
use happa_core::machine_types::{MachineTypeCatalog, MachineTypeProperties};
use happa_core::permissions::PermissionSnapshot;
use happa_core::provider::ControlPlaneNode;
use happa_core::reporter::{RecordingReporter, ReportedError};
use happa_core::scaling::{
    NodePoolScaling, ScalingBounds, ScalingValidity, get_submit_button_attributes,
    get_worker_nodes_difference,
};
use happa_core::summary::{
    ClusterSummary, ClusterSummaryInput, compute_cluster_summary, compute_releases_summary,
    merge_cluster_summaries,
};
use proptest::prelude::*;

fn summary_strategy() -> impl Strategy<Value = ClusterSummary> {
    let field = || prop::option::of(0u64..1_000_000);
    (field(), field(), field(), field(), field(), field()).prop_map(|(a, b, c, d, e, f)| {
        ClusterSummary {
            nodes_count: a,
            nodes_cpu: b,
            nodes_memory: c,
            worker_nodes_count: d,
            worker_nodes_cpu: e,
            worker_nodes_memory: f,
        }
    })
}

fn cluster_with_release(name: &str, release: &str) -> Cluster {
    let mut metadata = ObjectMeta::named("org-acme", name);
    metadata
        .labels
        .insert("release.giantswarm.io/version".to_string(), release.to_string());
    Cluster {
        metadata,
        ..Default::default()
    }
}

fn catalog() -> MachineTypeCatalog {
    MachineTypeCatalog::empty()
        .with_type(
            "m5.xlarge",
            MachineTypeProperties {
                cpu: 4,
                memory: 16_000_000_000,
            },
        )
        .with_type(
            "m5.2xlarge",
            MachineTypeProperties {
                cpu: 8,
                memory: 32_000_000_000,
            },
        )
}

fn control_plane_summary(cluster: &Cluster, nodes: Vec<ControlPlaneNode>) -> ClusterSummary {
    let input = ClusterSummaryInput {
        cluster,
        control_plane_nodes: Some(nodes),
        node_pools: None,
        permissions: PermissionSnapshot::allow_all(),
    };
    let reporter = RecordingReporter::new();
    let summary = compute_cluster_summary(&input, &catalog(), &reporter);
    assert!(reporter.is_empty(), "unexpected reports: {:?}", reporter.errors());
    summary
}

proptest! {
    #[test]
    fn merge_ignores_order(
        summaries in prop::collection::vec(summary_strategy(), 0..8),
        seed in any::<prop::sample::Index>(),
    ) {
        let mut rotated = summaries.clone();
        if !rotated.is_empty() {
            let shift = seed.index(rotated.len());
            rotated.rotate_left(shift);
        }
        prop_assert_eq!(merge_cluster_summaries(&summaries), merge_cluster_summaries(&rotated));
    }

    #[test]
    fn merge_is_associative(
        left in prop::collection::vec(summary_strategy(), 0..5),
        right in prop::collection::vec(summary_strategy(), 0..5),
    ) {
        let all: Vec<_> = left.iter().chain(right.iter()).copied().collect();
        let nested = [merge_cluster_summaries(&left), merge_cluster_summaries(&right)];
        prop_assert_eq!(merge_cluster_summaries(&all), merge_cluster_summaries(&nested));
    }

    #[test]
    fn merge_is_unknown_only_when_every_input_is(
        summaries in prop::collection::vec(summary_strategy(), 0..8),
    ) {
        let merged = merge_cluster_summaries(&summaries);
        let any_known = summaries.iter().any(|s| s.nodes_cpu.is_some());
        prop_assert_eq!(merged.nodes_cpu.is_some(), any_known);
    }

    #[test]
    fn difference_moves_desired_into_bounds(
        min in 0i64..50,
        span in 0i64..50,
        desired in 0i64..120,
    ) {
        let max = min + span;
        let difference = get_worker_nodes_difference(min, max, desired);
        let after = desired + difference;
        prop_assert!(after >= min && after <= max);
        if (min..=max).contains(&desired) {
            prop_assert_eq!(difference, 0);
        }
    }

    #[test]
    fn button_label_follows_difference(
        min in 0i64..20,
        span in 0i64..20,
        desired in 1i64..50,
    ) {
        let max = min + span;
        let initial = NodePoolScaling { min: 0, max: 100, desired, current: desired };
        let attributes = get_submit_button_attributes(
            &initial,
            ScalingBounds { min, max },
            ScalingValidity::valid(),
        );
        let difference = get_worker_nodes_difference(min, max, desired);
        if difference > 0 {
            prop_assert!(attributes.label.starts_with("Increase"));
            prop_assert!(attributes.primary && !attributes.danger);
        } else if difference < 0 {
            prop_assert!(attributes.label.starts_with("Remove"));
            prop_assert!(attributes.danger && !attributes.primary);
        } else {
            prop_assert_eq!(attributes.label, "Apply");
        }
    }

    #[test]
    fn unknown_machine_type_is_reported_once(machines in 1usize..6) {
        let cluster = cluster_with_release("a1b2c", "20.0.0");
        let nodes = (0..machines)
            .map(|i| ControlPlaneNode::Discrete {
                name: format!("cp-{i}"),
                instance_type: Some("m5.mega".to_string()),
            })
            .collect();
        let input = ClusterSummaryInput {
            cluster: &cluster,
            control_plane_nodes: Some(nodes),
            node_pools: Some(Vec::new()),
            permissions: PermissionSnapshot::allow_all(),
        };
        let reporter = RecordingReporter::new();

        let summary = compute_cluster_summary(&input, &catalog(), &reporter);

        prop_assert_eq!(summary.nodes_count, Some(machines as u64));
        prop_assert_eq!(summary.nodes_cpu, None);
        let errors = reporter.errors();
        prop_assert_eq!(errors.len(), 1);
        let is_invalid = matches!(errors[0], ReportedError::InvalidMachineType { .. });
        prop_assert!(is_invalid);
    }

    #[test]
    fn discrete_and_replicated_control_planes_agree(
        replicas in 1u32..8,
        machine_type in prop::sample::select(vec!["m5.xlarge", "m5.2xlarge"]),
        untyped_followers in any::<bool>(),
    ) {
        let cluster = cluster_with_release("a1b2c", "20.0.0");
        let discrete = (0..replicas)
            .map(|i| ControlPlaneNode::Discrete {
                name: format!("cp-{i}"),
                instance_type: (i == 0 || !untyped_followers).then(|| machine_type.to_string()),
            })
            .collect();
        let replicated = vec![ControlPlaneNode::Replicated {
            name: "cp".to_string(),
            instance_type: Some(machine_type.to_string()),
            replicas,
        }];

        let from_machines = control_plane_summary(&cluster, discrete);
        let from_template = control_plane_summary(&cluster, replicated);

        prop_assert_eq!(from_machines.nodes_count, Some(u64::from(replicas)));
        prop_assert_eq!(from_machines.nodes_count, from_template.nodes_count);
        prop_assert_eq!(from_machines.nodes_cpu, from_template.nodes_cpu);
        prop_assert_eq!(from_machines.nodes_memory, from_template.nodes_memory);
        prop_assert!(from_machines.nodes_cpu.is_some());
    }

    #[test]
    fn compute_is_idempotent(machines in 0usize..6, ready in 0u32..4) {
        let cluster = cluster_with_release("a1b2c", "20.0.0");
        let nodes: Vec<_> = (0..machines)
            .map(|i| ControlPlaneNode::Replicated {
                name: format!("cp-{i}"),
                instance_type: Some("m5.xlarge".to_string()),
                replicas: ready,
            })
            .collect();
        let input = ClusterSummaryInput {
            cluster: &cluster,
            control_plane_nodes: Some(nodes),
            node_pools: None,
            permissions: PermissionSnapshot::allow_all(),
        };
        let reporter = RecordingReporter::new();

        let first = compute_cluster_summary(&input, &catalog(), &reporter);
        let second = compute_cluster_summary(&input, &catalog(), &reporter);
        prop_assert_eq!(first, second);
        prop_assert!(reporter.is_empty());
    }

    #[test]
    fn releases_summary_orders_by_semver(
        versions in prop::collection::vec((0u64..30, 0u64..10, 0u64..10), 1..10),
    ) {
        let clusters: Vec<_> = versions
            .iter()
            .enumerate()
            .map(|(i, (major, minor, patch))| {
                cluster_with_release(&format!("c{i}"), &format!("{major}.{minor}.{patch}"))
            })
            .collect();
        let summary = compute_releases_summary(&clusters);

        let mut distinct = versions.clone();
        distinct.sort_unstable();
        distinct.dedup();
        let render = |(major, minor, patch): &(u64, u64, u64)| format!("{major}.{minor}.{patch}");

        prop_assert_eq!(summary.releases_in_use_count, distinct.len());
        prop_assert_eq!(summary.oldest_release_version, distinct.first().map(render));
        prop_assert_eq!(summary.newest_release_version, distinct.last().map(render));
    }
}
