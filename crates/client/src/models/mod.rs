//! Typed models for management API resources.
//!
//! Each resource kind implements [`Resource`], which ties it to its REST
//! path. Only the fields the capacity core reads are modelled. Writes go
//! through JSON merge patches, so unmodelled fields are never sent back.

mod application;
mod authorization;
mod capa;
mod capg;
mod capi;
mod capz;
mod giantswarm;
mod meta;
mod release;
mod resource;

pub use application::{App, AppSpec, AppStatus};
pub use authorization::{
    ResourceRule, SelfSubjectRulesReview, SelfSubjectRulesReviewSpec, SubjectRulesReviewStatus,
};
pub use capa::{
    AWSLaunchTemplate, AWSMachinePool, AWSMachinePoolSpec, AWSMachineTemplate,
    AWSMachineTemplateResource, AWSMachineTemplateSpec, AWSMachineTemplateSpecInner,
    InstanceOverride, MixedInstancesPolicy,
};
pub use capg::{
    GCPMachineTemplate, GCPMachineTemplateResource, GCPMachineTemplateSpec,
    GCPMachineTemplateSpecInner,
};
pub use capi::{
    Cluster, ClusterSpec, ClusterStatus, KubeadmControlPlane, KubeadmControlPlaneSpec,
    KubeadmControlPlaneStatus, MachineDeployment, MachineDeploymentSpec, MachineDeploymentStatus,
    MachinePool, MachinePoolSpec, MachinePoolStatus, MachineSpec, MachineTemplate,
    MachineTemplateSpec,
};
pub use capz::{
    AzureMachine, AzureMachinePool, AzureMachinePoolSpec, AzureMachinePoolTemplate,
    AzureMachineSpec,
};
pub use giantswarm::{
    AWSControlPlane, AWSControlPlaneSpec, AWSMachineDeployment, AWSMachineDeploymentProvider,
    AWSMachineDeploymentSpec, AWSMachineDeploymentStatus, AWSMachineDeploymentStatusProvider,
    AWSMachineDeploymentWorker, G8sControlPlane, G8sControlPlaneSpec, G8sControlPlaneStatus,
    NodePoolScaling, NodePoolSpec, WorkerStatus,
};
pub use meta::{ListMeta, ObjectMeta, ObjectReference, ResourceList, Status};
pub use release::{Release, ReleaseComponent, ReleaseSpec};
pub use resource::Resource;
