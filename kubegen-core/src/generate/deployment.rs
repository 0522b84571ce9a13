use crate::{
    error::Result,
    parse::{int_or_string, parse_pairs, parse_ports},
    tree::{Mapping, Node},
    types::{Container, DeploymentMeta, DeploymentSpec, Volume, VolumeSource},
};

use super::{label_selector, metadata, object, Generate};

const ROLLING_UPDATE: &str = "RollingUpdate";

impl Generate for DeploymentSpec {
    fn documents(&self) -> Result<Vec<Node>> {
        let meta = &self.deployment;
        let labels = parse_pairs(&self.pod_template.labels);

        let (init, regular): (Vec<&Container>, Vec<&Container>) =
            self.containers.iter().partition(|c| c.init_container);

        let volumes: Vec<Node> = self
            .volumes
            .iter()
            .filter_map(|v| {
                let node = volume(v);
                if node.is_none() {
                    tracing::debug!(volume = %v.volume_name, "skipping volume without a source");
                }
                node
            })
            .map(Node::from)
            .collect();

        let pod_spec = Mapping::new()
            .with_nonempty("initContainers", containers(&init))
            .with("containers", containers(&regular))
            .with_nonempty("volumes", volumes);

        let template = Mapping::new()
            .with(
                "metadata",
                Mapping::new()
                    .with_nonempty("name", &self.pod_template.pod_name)
                    .with_nonempty("labels", labels.clone()),
            )
            .with("spec", pod_spec);

        let spec = Mapping::new()
            .with_nonzero("replicas", meta.replicas.into())
            .with("selector", label_selector(labels))
            .with_opt("strategy", strategy(meta))
            .with("template", template);

        let doc = object("apps/v1", "Deployment", metadata(&meta.name, &meta.namespace))
            .with("spec", spec);

        Ok(vec![doc.into()])
    }
}

/// `None` when no strategy is named. Rollout limits only apply to rolling
/// updates.
fn strategy(meta: &DeploymentMeta) -> Option<Mapping> {
    if meta.strategy.is_empty() {
        return None;
    }

    let mut strategy = Mapping::new().with("type", &meta.strategy);
    if meta.strategy == ROLLING_UPDATE {
        let mut rolling = Mapping::new();
        if !meta.max_unavailable.is_empty() {
            rolling.insert("maxUnavailable", int_or_string(&meta.max_unavailable));
        }
        if !meta.max_surge.is_empty() {
            rolling.insert("maxSurge", int_or_string(&meta.max_surge));
        }
        strategy = strategy.with_nonempty("rollingUpdate", rolling);
    }
    Some(strategy)
}

fn containers(list: &[&Container]) -> Vec<Node> {
    list.iter().map(|c| container(c).into()).collect()
}

fn container(c: &Container) -> Mapping {
    let ports: Vec<Node> = parse_ports(&c.ports)
        .into_iter()
        .map(|p| Mapping::new().with("containerPort", p).into())
        .collect();

    let env: Vec<Node> = parse_pairs(&c.env_vars)
        .into_iter()
        .map(|(name, value)| Mapping::new().with("name", name).with("value", value).into())
        .collect();

    let mounts: Vec<Node> = c
        .volume_mounts
        .iter()
        .map(|m| {
            Mapping::new()
                .with("name", &m.volume_name)
                .with("mountPath", &m.mount_path)
                .into()
        })
        .collect();

    Mapping::new()
        .with("name", &c.container_name)
        .with("image", &c.image)
        .with_nonempty("imagePullPolicy", &c.image_pull_policy)
        .with_nonempty("command", c.command.as_slice())
        .with_nonempty("ports", ports)
        .with_nonempty("env", env)
        .with_nonempty("volumeMounts", mounts)
}

/// `None` when the source's required field is empty or the type is unknown.
fn volume(v: &Volume) -> Option<Mapping> {
    let (key, source) = match &v.source {
        VolumeSource::EmptyDir { medium, size_limit } => (
            "emptyDir",
            Mapping::new()
                .with_nonempty("medium", medium)
                .with_nonempty("sizeLimit", size_limit),
        ),
        VolumeSource::HostPath {
            path,
            hostpath_type,
        } => {
            if path.is_empty() {
                return None;
            }
            (
                "hostPath",
                Mapping::new()
                    .with("path", path)
                    .with_nonempty("type", hostpath_type),
            )
        }
        VolumeSource::ConfigMap { config_map_name } => {
            if config_map_name.is_empty() {
                return None;
            }
            ("configMap", Mapping::new().with("name", config_map_name))
        }
        VolumeSource::Secret { secret_name } => {
            if secret_name.is_empty() {
                return None;
            }
            ("secret", Mapping::new().with("secretName", secret_name))
        }
        VolumeSource::PersistentVolumeClaim { pvc_claim_name } => {
            if pvc_claim_name.is_empty() {
                return None;
            }
            (
                "persistentVolumeClaim",
                Mapping::new().with("claimName", pvc_claim_name),
            )
        }
        VolumeSource::Unsupported => return None,
    };

    Some(Mapping::new().with("name", &v.volume_name).with(key, source))
}
