use crate::{
    error::Result,
    parse::parse_pairs,
    tree::{Mapping, Node},
    types::{ServicePort, ServiceSpec},
};

use super::{object, Generate};

impl Generate for ServiceSpec {
    fn documents(&self) -> Result<Vec<Node>> {
        let node_ports = self.service_type == "NodePort";
        let ports: Vec<Node> = self
            .ports
            .iter()
            .map(|p| port(p, node_ports).into())
            .collect();

        let spec = Mapping::new()
            .with_nonempty("type", &self.service_type)
            .with_nonempty("selector", parse_pairs(&self.selector))
            .with_nonempty("ports", ports);

        let meta = Mapping::new()
            .with("name", &self.service_name)
            .with_nonempty("namespace", &self.namespace);
        let doc = object("v1", "Service", meta).with("spec", spec);

        Ok(vec![doc.into()])
    }
}

fn port(p: &ServicePort, node_ports: bool) -> Mapping {
    let entry = Mapping::new()
        .with("port", p.port)
        .with_nonzero("targetPort", p.target_port.into())
        .with_nonempty("protocol", &p.protocol);

    if node_ports {
        entry.with_nonzero("nodePort", p.node_port.into())
    } else {
        entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::testutil::single;

    fn service(service_type: &str) -> ServiceSpec {
        ServiceSpec {
            service_name: "web".into(),
            namespace: "shop".into(),
            service_type: service_type.into(),
            selector: "app=web".into(),
            ports: vec![ServicePort {
                port: 80,
                target_port: 8080,
                protocol: "TCP".into(),
                node_port: 30080,
            }],
        }
    }

    #[test]
    fn node_port_service_keeps_node_port() {
        let doc = single(&service("NodePort"));
        assert_eq!(doc["kind"].as_str(), Some("Service"));
        assert_eq!(doc["spec"]["type"].as_str(), Some("NodePort"));
        assert_eq!(doc["spec"]["selector"]["app"].as_str(), Some("web"));
        let port = &doc["spec"]["ports"][0];
        assert_eq!(port["port"].as_i64(), Some(80));
        assert_eq!(port["targetPort"].as_i64(), Some(8080));
        assert_eq!(port["protocol"].as_str(), Some("TCP"));
        assert_eq!(port["nodePort"].as_i64(), Some(30080));
    }

    #[test]
    fn cluster_ip_service_drops_node_port() {
        let doc = single(&service("ClusterIP"));
        assert!(doc["spec"]["ports"][0].get("nodePort").is_none());
    }

    #[test]
    fn zero_node_port_is_omitted() {
        let mut spec = service("NodePort");
        spec.ports[0].node_port = 0;
        let doc = single(&spec);
        assert!(doc["spec"]["ports"][0].get("nodePort").is_none());
    }

    #[test]
    fn unset_fields_are_omitted() {
        let doc = single(&ServiceSpec {
            service_name: "bare".into(),
            ports: vec![ServicePort {
                port: 443,
                ..Default::default()
            }],
            ..Default::default()
        });
        assert!(doc["metadata"].get("namespace").is_none());
        assert!(doc["spec"].get("type").is_none());
        assert!(doc["spec"].get("selector").is_none());
        let port = &doc["spec"]["ports"][0];
        assert!(port.get("targetPort").is_none());
        assert!(port.get("protocol").is_none());
    }
}
