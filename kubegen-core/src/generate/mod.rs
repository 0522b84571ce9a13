//! One generator per resource kind.
//!
//! Every generator follows the same omission rule: identifying fields are
//! always written, anything optional is left out when its source value is
//! empty or zero. Service and the RBAC documents treat the namespace as
//! optional.

mod configmap;
mod deployment;
mod hpa;
mod ingress;
mod namespace;
mod networkpolicy;
mod pvc;
mod rbac;
mod secret;
mod service;
mod serviceaccount;

use std::collections::BTreeMap;

use crate::{
    error::Result,
    tree::{Mapping, Node},
    types::Resource,
};

pub use secret::SecretPayload;

/// Builds the field trees for one resource.
pub trait Generate {
    /// Documents in output order. Most kinds produce exactly one.
    fn documents(&self) -> Result<Vec<Node>>;
}

impl Generate for Resource {
    fn documents(&self) -> Result<Vec<Node>> {
        match self {
            Resource::Namespace(spec) => spec.documents(),
            Resource::Deployment(spec) => spec.documents(),
            Resource::Service(spec) => spec.documents(),
            Resource::HorizontalPodAutoscaler(spec) => spec.documents(),
            Resource::ConfigMap(spec) => spec.documents(),
            Resource::Secret(spec) => spec.documents(),
            Resource::PersistentVolumeClaim(spec) => spec.documents(),
            Resource::Ingress(spec) => spec.documents(),
            Resource::ServiceAccount(spec) => spec.documents(),
            Resource::Role(spec) => spec.documents(),
            Resource::NetworkPolicy(spec) => spec.documents(),
        }
    }
}

/// `apiVersion`, `kind` and `metadata`, in that order.
pub(crate) fn object(api_version: &str, kind: &str, metadata: Mapping) -> Mapping {
    Mapping::new()
        .with("apiVersion", api_version)
        .with("kind", kind)
        .with("metadata", metadata)
}

/// `name` and `namespace`, both written even when empty.
pub(crate) fn metadata(name: &str, namespace: &str) -> Mapping {
    Mapping::new().with("name", name).with("namespace", namespace)
}

/// A label selector; `{}` when there are no labels.
pub(crate) fn label_selector(labels: BTreeMap<String, String>) -> Mapping {
    Mapping::new().with_nonempty("matchLabels", labels)
}

#[cfg(test)]
pub(crate) mod testutil {
    use serde_yaml::Value;

    use super::Generate;
    use crate::render::render_all;

    /// Render through the real serializer and parse every document back.
    pub fn rendered<G: Generate>(spec: &G) -> (String, Vec<Value>) {
        let text = render_all(&spec.documents().unwrap()).unwrap();
        let docs = text
            .split("---\n")
            .map(|doc| serde_yaml::from_str(doc).unwrap())
            .collect();
        (text, docs)
    }

    pub fn single<G: Generate>(spec: &G) -> Value {
        let (_, mut docs) = rendered(spec);
        assert_eq!(docs.len(), 1);
        docs.remove(0)
    }
}
