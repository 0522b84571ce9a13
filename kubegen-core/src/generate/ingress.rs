use crate::{
    error::Result,
    tree::{Mapping, Node},
    types::{IngressPath, IngressSpec},
};

use super::{metadata, object, Generate};

const DEFAULT_PATH_TYPE: &str = "Prefix";

impl Generate for IngressSpec {
    fn documents(&self) -> Result<Vec<Node>> {
        let paths: Vec<Node> = self.paths.iter().map(|p| path(p).into()).collect();

        let rule = Mapping::new()
            .with_nonempty("host", &self.host)
            .with("http", Mapping::new().with("paths", paths));

        let spec = Mapping::new()
            .with_nonempty("ingressClassName", &self.ingress_class_name)
            .with("rules", vec![Node::from(rule)]);

        let doc = object(
            "networking.k8s.io/v1",
            "Ingress",
            metadata(&self.ingress_name, &self.namespace),
        )
        .with("spec", spec);

        Ok(vec![doc.into()])
    }
}

fn path(p: &IngressPath) -> Mapping {
    let path_type = if p.path_type.is_empty() {
        DEFAULT_PATH_TYPE
    } else {
        p.path_type.as_str()
    };

    let service = Mapping::new()
        .with("name", &p.service_name)
        .with("port", Mapping::new().with("number", p.service_port));

    Mapping::new()
        .with("path", &p.path)
        .with("pathType", path_type)
        .with("backend", Mapping::new().with("service", service))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::testutil::single;

    #[test]
    fn host_with_paths() {
        let doc = single(&IngressSpec {
            ingress_name: "web".into(),
            namespace: "default".into(),
            host: "example.com".into(),
            ingress_class_name: String::new(),
            paths: vec![
                IngressPath {
                    path: "/".into(),
                    path_type: String::new(),
                    service_name: "web".into(),
                    service_port: 80,
                },
                IngressPath {
                    path: "/api".into(),
                    path_type: "Exact".into(),
                    service_name: "api".into(),
                    service_port: 8080,
                },
            ],
        });
        assert_eq!(doc["apiVersion"].as_str(), Some("networking.k8s.io/v1"));
        assert!(doc["spec"].get("ingressClassName").is_none());

        let rule = &doc["spec"]["rules"][0];
        assert_eq!(rule["host"].as_str(), Some("example.com"));
        let paths = &rule["http"]["paths"];
        assert_eq!(paths[0]["pathType"].as_str(), Some("Prefix"));
        assert_eq!(paths[0]["backend"]["service"]["name"].as_str(), Some("web"));
        assert_eq!(
            paths[0]["backend"]["service"]["port"]["number"].as_i64(),
            Some(80)
        );
        assert_eq!(paths[1]["pathType"].as_str(), Some("Exact"));
    }

    #[test]
    fn class_name_and_catch_all_host() {
        let doc = single(&IngressSpec {
            ingress_name: "web".into(),
            ingress_class_name: "nginx".into(),
            ..Default::default()
        });
        assert_eq!(doc["spec"]["ingressClassName"].as_str(), Some("nginx"));
        assert!(doc["spec"]["rules"][0].get("host").is_none());
    }
}
