use crate::{
    error::Result,
    tree::{Mapping, Node},
    types::{HpaMetric, HpaSpec},
};

use super::{metadata, object, Generate};

impl Generate for HpaSpec {
    fn documents(&self) -> Result<Vec<Node>> {
        let target_ref = Mapping::new()
            .with("apiVersion", "apps/v1")
            .with("kind", "Deployment")
            .with("name", &self.target_deployment);

        let metrics: Vec<Node> = self.metrics.iter().map(|m| metric(m).into()).collect();

        let spec = Mapping::new()
            .with("scaleTargetRef", target_ref)
            .with_nonzero("minReplicas", self.min_replicas.into())
            .with("maxReplicas", self.max_replicas)
            .with_nonempty("metrics", metrics);

        let doc = object(
            "autoscaling/v2",
            "HorizontalPodAutoscaler",
            metadata(&self.hpa_name, &self.namespace),
        )
        .with("spec", spec);

        Ok(vec![doc.into()])
    }
}

fn metric(m: &HpaMetric) -> Mapping {
    let target = if m.target_type == "Utilization" {
        Mapping::new()
            .with("type", "Utilization")
            .with("averageUtilization", m.target_value)
    } else {
        Mapping::new()
            .with("type", "AverageValue")
            .with("averageValue", m.target_value)
    };

    Mapping::new().with("type", "Resource").with(
        "resource",
        Mapping::new()
            .with("name", &m.resource_name)
            .with("target", target),
    )
}
