use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{error::GenerateError, parse::string_or_int};

/// The request envelope as it arrives on the wire: eleven optional slots, of
/// which one is expected to be set.
#[derive(Serialize, Deserialize, Debug, Default, Clone, ToSchema)]
pub struct GenerateRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub namespace: Option<NamespaceSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub deployment: Option<DeploymentSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub service: Option<ServiceSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub hpa: Option<HpaSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub configmap: Option<ConfigMapSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub secret: Option<SecretSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub pvc: Option<PvcSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub ingress: Option<IngressSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub serviceaccount: Option<ServiceAccountSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub role: Option<RoleSpec>,
    #[serde(
        default,
        rename = "networkPolicy",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<Object>)]
    pub network_policy: Option<NetworkPolicySpec>,
}

impl GenerateRequest {
    /// Kinds whose slot is set, in dispatch priority order.
    pub fn populated(&self) -> Vec<ResourceKind> {
        [
            (self.namespace.is_some(), ResourceKind::Namespace),
            (self.deployment.is_some(), ResourceKind::Deployment),
            (self.service.is_some(), ResourceKind::Service),
            (self.hpa.is_some(), ResourceKind::HorizontalPodAutoscaler),
            (self.configmap.is_some(), ResourceKind::ConfigMap),
            (self.secret.is_some(), ResourceKind::Secret),
            (self.pvc.is_some(), ResourceKind::PersistentVolumeClaim),
            (self.ingress.is_some(), ResourceKind::Ingress),
            (self.serviceaccount.is_some(), ResourceKind::ServiceAccount),
            (self.role.is_some(), ResourceKind::Role),
            (self.network_policy.is_some(), ResourceKind::NetworkPolicy),
        ]
        .into_iter()
        .filter_map(|(set, kind)| set.then_some(kind))
        .collect()
    }

    /// Narrow to a single resource. When several slots are set the one
    /// earliest in priority order wins and the rest are ignored.
    pub fn into_resource(self) -> Result<Resource, GenerateError> {
        let populated = self.populated();
        if let [selected, ignored @ ..] = populated.as_slice() {
            if !ignored.is_empty() {
                tracing::warn!(
                    selected = %selected,
                    ignored = ?ignored,
                    "request populates several resource kinds; using the first by priority"
                );
            }
        }
        self.take_first().ok_or(GenerateError::NoResource)
    }

    /// Like [`GenerateRequest::into_resource`], but a request with more than
    /// one slot set is rejected.
    pub fn into_exclusive_resource(self) -> Result<Resource, GenerateError> {
        let populated = self.populated();
        if populated.len() > 1 {
            return Err(GenerateError::AmbiguousRequest { kinds: populated });
        }
        self.take_first().ok_or(GenerateError::NoResource)
    }

    fn take_first(self) -> Option<Resource> {
        let GenerateRequest {
            namespace,
            deployment,
            service,
            hpa,
            configmap,
            secret,
            pvc,
            ingress,
            serviceaccount,
            role,
            network_policy,
        } = self;

        namespace
            .map(Resource::Namespace)
            .or_else(|| deployment.map(Resource::Deployment))
            .or_else(|| service.map(Resource::Service))
            .or_else(|| hpa.map(Resource::HorizontalPodAutoscaler))
            .or_else(|| configmap.map(Resource::ConfigMap))
            .or_else(|| secret.map(Resource::Secret))
            .or_else(|| pvc.map(Resource::PersistentVolumeClaim))
            .or_else(|| ingress.map(Resource::Ingress))
            .or_else(|| serviceaccount.map(Resource::ServiceAccount))
            .or_else(|| role.map(Resource::Role))
            .or_else(|| network_policy.map(Resource::NetworkPolicy))
    }
}

/// Exactly one resource to generate.
#[derive(Debug, Clone)]
pub enum Resource {
    Namespace(NamespaceSpec),
    Deployment(DeploymentSpec),
    Service(ServiceSpec),
    HorizontalPodAutoscaler(HpaSpec),
    ConfigMap(ConfigMapSpec),
    Secret(SecretSpec),
    PersistentVolumeClaim(PvcSpec),
    Ingress(IngressSpec),
    ServiceAccount(ServiceAccountSpec),
    Role(RoleSpec),
    NetworkPolicy(NetworkPolicySpec),
}

impl Resource {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::Namespace(_) => ResourceKind::Namespace,
            Resource::Deployment(_) => ResourceKind::Deployment,
            Resource::Service(_) => ResourceKind::Service,
            Resource::HorizontalPodAutoscaler(_) => ResourceKind::HorizontalPodAutoscaler,
            Resource::ConfigMap(_) => ResourceKind::ConfigMap,
            Resource::Secret(_) => ResourceKind::Secret,
            Resource::PersistentVolumeClaim(_) => ResourceKind::PersistentVolumeClaim,
            Resource::Ingress(_) => ResourceKind::Ingress,
            Resource::ServiceAccount(_) => ResourceKind::ServiceAccount,
            Resource::Role(_) => ResourceKind::Role,
            Resource::NetworkPolicy(_) => ResourceKind::NetworkPolicy,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Namespace,
    Deployment,
    Service,
    HorizontalPodAutoscaler,
    ConfigMap,
    Secret,
    PersistentVolumeClaim,
    Ingress,
    ServiceAccount,
    Role,
    NetworkPolicy,
}

impl ResourceKind {
    /// All kinds, in dispatch priority order.
    pub const ALL: [ResourceKind; 11] = [
        ResourceKind::Namespace,
        ResourceKind::Deployment,
        ResourceKind::Service,
        ResourceKind::HorizontalPodAutoscaler,
        ResourceKind::ConfigMap,
        ResourceKind::Secret,
        ResourceKind::PersistentVolumeClaim,
        ResourceKind::Ingress,
        ResourceKind::ServiceAccount,
        ResourceKind::Role,
        ResourceKind::NetworkPolicy,
    ];

    /// The top-level request key that selects this kind.
    pub fn key(self) -> &'static str {
        match self {
            ResourceKind::Namespace => "namespace",
            ResourceKind::Deployment => "deployment",
            ResourceKind::Service => "service",
            ResourceKind::HorizontalPodAutoscaler => "hpa",
            ResourceKind::ConfigMap => "configmap",
            ResourceKind::Secret => "secret",
            ResourceKind::PersistentVolumeClaim => "pvc",
            ResourceKind::Ingress => "ingress",
            ResourceKind::ServiceAccount => "serviceaccount",
            ResourceKind::Role => "role",
            ResourceKind::NetworkPolicy => "networkPolicy",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceKind::Namespace => "Namespace",
            ResourceKind::Deployment => "Deployment",
            ResourceKind::Service => "Service",
            ResourceKind::HorizontalPodAutoscaler => "HorizontalPodAutoscaler",
            ResourceKind::ConfigMap => "ConfigMap",
            ResourceKind::Secret => "Secret",
            ResourceKind::PersistentVolumeClaim => "PersistentVolumeClaim",
            ResourceKind::Ingress => "Ingress",
            ResourceKind::ServiceAccount => "ServiceAccount",
            ResourceKind::Role => "Role/RoleBinding",
            ResourceKind::NetworkPolicy => "NetworkPolicy",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// Namespace

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct NamespaceSpec {
    pub namespace_name: String,
    pub labels: String,
}

// ---------------------------------------------------------------------------
// Deployment

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct DeploymentSpec {
    pub deployment: DeploymentMeta,
    pub pod_template: PodTemplate,
    pub containers: Vec<Container>,
    pub volumes: Vec<Volume>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct DeploymentMeta {
    pub name: String,
    pub namespace: String,
    pub replicas: i32,
    pub strategy: String,
    #[serde(deserialize_with = "string_or_int")]
    pub max_unavailable: String,
    #[serde(deserialize_with = "string_or_int")]
    pub max_surge: String,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct PodTemplate {
    pub pod_name: String,
    pub labels: String,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct Container {
    pub container_name: String,
    pub image: String,
    pub image_pull_policy: String,
    /// Comma-separated container ports.
    pub ports: String,
    pub env_vars: String,
    pub init_container: bool,
    pub command: Vec<String>,
    pub volume_mounts: Vec<VolumeMount>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct VolumeMount {
    pub volume_name: String,
    pub mount_path: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(from = "RawVolume")]
pub struct Volume {
    pub volume_name: String,
    #[serde(flatten)]
    pub source: VolumeSource,
}

/// Volume source, selected by `volume_type`. Fields belonging to other
/// variants are ignored.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "volume_type")]
pub enum VolumeSource {
    #[serde(rename = "emptyDir")]
    EmptyDir { medium: String, size_limit: String },
    #[serde(rename = "hostPath")]
    HostPath { path: String, hostpath_type: String },
    #[serde(rename = "configMap")]
    ConfigMap { config_map_name: String },
    #[serde(rename = "secret")]
    Secret { secret_name: String },
    #[serde(rename = "pvc")]
    PersistentVolumeClaim { pvc_claim_name: String },
    /// Missing, null or unrecognized `volume_type`.
    Unsupported,
}

/// Flat wire shape of a volume. Every field tolerates absence and null.
#[derive(Deserialize, Default)]
#[serde(default)]
struct RawVolume {
    #[serde(deserialize_with = "string_or_int")]
    volume_name: String,
    #[serde(deserialize_with = "string_or_int")]
    volume_type: String,
    #[serde(deserialize_with = "string_or_int")]
    medium: String,
    #[serde(deserialize_with = "string_or_int")]
    size_limit: String,
    #[serde(deserialize_with = "string_or_int")]
    path: String,
    #[serde(deserialize_with = "string_or_int")]
    hostpath_type: String,
    #[serde(deserialize_with = "string_or_int")]
    config_map_name: String,
    #[serde(deserialize_with = "string_or_int")]
    secret_name: String,
    #[serde(deserialize_with = "string_or_int")]
    pvc_claim_name: String,
}

impl From<RawVolume> for Volume {
    fn from(raw: RawVolume) -> Self {
        let source = match raw.volume_type.as_str() {
            "emptyDir" => VolumeSource::EmptyDir {
                medium: raw.medium,
                size_limit: raw.size_limit,
            },
            "hostPath" => VolumeSource::HostPath {
                path: raw.path,
                hostpath_type: raw.hostpath_type,
            },
            "configMap" => VolumeSource::ConfigMap {
                config_map_name: raw.config_map_name,
            },
            "secret" => VolumeSource::Secret {
                secret_name: raw.secret_name,
            },
            "pvc" | "persistentVolumeClaim" => VolumeSource::PersistentVolumeClaim {
                pvc_claim_name: raw.pvc_claim_name,
            },
            _ => VolumeSource::Unsupported,
        };
        Volume {
            volume_name: raw.volume_name,
            source,
        }
    }
}

// ---------------------------------------------------------------------------
// Service

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct ServiceSpec {
    pub service_name: String,
    pub namespace: String,
    pub service_type: String,
    pub selector: String,
    pub ports: Vec<ServicePort>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct ServicePort {
    pub port: i32,
    pub target_port: i32,
    pub protocol: String,
    pub node_port: i32,
}

// ---------------------------------------------------------------------------
// HorizontalPodAutoscaler

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct HpaSpec {
    pub hpa_name: String,
    pub namespace: String,
    pub target_deployment: String,
    pub min_replicas: i32,
    pub max_replicas: i32,
    pub metrics: Vec<HpaMetric>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct HpaMetric {
    pub resource_name: String,
    /// `Utilization` or `Value`.
    pub target_type: String,
    pub target_value: i64,
}

// ---------------------------------------------------------------------------
// ConfigMap

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct ConfigMapSpec {
    pub configmap_name: String,
    pub namespace: String,
    pub keys: Vec<ConfigMapKey>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct ConfigMapKey {
    pub key_name: String,
    pub is_multiline: bool,
    pub value: String,
}

// ---------------------------------------------------------------------------
// Secret

/// `data` stays untyped here; its shape depends on `secret_type` and is
/// checked when the manifest is generated.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct SecretSpec {
    pub secret_name: String,
    pub namespace: String,
    pub secret_type: String,
    pub data: serde_json::Value,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct SecretKey {
    pub key_name: String,
    pub value: String,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct TlsSecretData {
    pub tls_crt: String,
    pub tls_key: String,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct DockerConfigData {
    pub dockerconfigjson: String,
}

// ---------------------------------------------------------------------------
// PersistentVolumeClaim

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct PvcSpec {
    pub pvc_name: String,
    pub namespace: String,
    pub storage_request: String,
    pub access_modes: Vec<String>,
    pub storage_class_name: String,
}

// ---------------------------------------------------------------------------
// Ingress

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct IngressSpec {
    pub ingress_name: String,
    pub namespace: String,
    pub host: String,
    pub ingress_class_name: String,
    pub paths: Vec<IngressPath>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct IngressPath {
    pub path: String,
    /// Defaults to `Prefix` when empty.
    pub path_type: String,
    pub service_name: String,
    pub service_port: i32,
}

// ---------------------------------------------------------------------------
// ServiceAccount

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct ServiceAccountSpec {
    pub service_account_name: String,
    pub namespace: String,
    #[serde(rename = "imagePullSecrets")]
    pub image_pull_secrets: Vec<String>,
    pub automount_service_account_token: Option<bool>,
}

// ---------------------------------------------------------------------------
// Role / RoleBinding

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct RoleSpec {
    /// `Role` or `ClusterRole`.
    #[serde(rename = "type")]
    pub role_type: String,
    pub name: String,
    pub namespace: String,
    pub rules: Vec<PolicyRule>,
    pub binding: RoleBindingSpec,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct PolicyRule {
    #[serde(rename = "apiGroups")]
    pub api_groups: Vec<String>,
    pub resources: Vec<String>,
    pub verbs: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct RoleBindingSpec {
    pub name: String,
    pub namespace: String,
    pub subjects: Vec<Subject>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct Subject {
    pub kind: String,
    pub name: String,
    pub namespace: String,
}

// ---------------------------------------------------------------------------
// NetworkPolicy

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct NetworkPolicySpec {
    pub name: String,
    pub namespace: String,
    pub pod_selector: String,
    pub policy_types: Vec<String>,
    pub rules: Vec<NetworkPolicyRule>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone)]
#[serde(default)]
pub struct NetworkPolicyRule {
    pub direction: Direction,
    pub ports: Vec<i32>,
    /// Keyed by `podSelector`, `namespaceSelector` or `ipBlock`.
    pub selectors: BTreeMap<String, String>,
    /// Used as the ipBlock CIDR when `selectors` has no `ipBlock` entry.
    pub cidr: String,
    pub except: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ingress,
    #[default]
    Egress,
}
