use std::collections::BTreeMap;

use crate::{
    error::Result,
    parse::parse_pairs,
    tree::{Mapping, Node},
    types::{Direction, NetworkPolicyRule, NetworkPolicySpec},
};

use super::{label_selector, metadata, object, Generate};

const DEFAULT_NAMESPACE: &str = "default";

/// A `from`/`to` entry of a rule.
#[derive(Debug, Clone, PartialEq)]
enum Peer<'a> {
    Pod(BTreeMap<String, String>),
    Namespace(BTreeMap<String, String>),
    IpBlock { cidr: &'a str, except: &'a [String] },
}

impl Peer<'_> {
    fn into_node(self) -> Node {
        let peer = match self {
            Peer::Pod(labels) => Mapping::new().with("podSelector", label_selector(labels)),
            Peer::Namespace(labels) => {
                Mapping::new().with("namespaceSelector", label_selector(labels))
            }
            Peer::IpBlock { cidr, except } => Mapping::new().with(
                "ipBlock",
                Mapping::new()
                    .with("cidr", cidr)
                    .with_nonempty("except", except),
            ),
        };
        peer.into()
    }
}

/// Peers in fixed order: pod, namespace, then IP block.
fn peers(rule: &NetworkPolicyRule) -> Vec<Peer<'_>> {
    let selector = |key: &str| {
        rule.selectors
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    };

    let mut out = Vec::new();
    if let Some(labels) = selector("podSelector") {
        out.push(Peer::Pod(parse_pairs(labels)));
    }
    if let Some(labels) = selector("namespaceSelector") {
        out.push(Peer::Namespace(parse_pairs(labels)));
    }
    let cidr = selector("ipBlock").or((!rule.cidr.is_empty()).then_some(rule.cidr.as_str()));
    if let Some(cidr) = cidr {
        out.push(Peer::IpBlock {
            cidr,
            except: &rule.except,
        });
    }
    out
}

/// `None` for a rule with neither ports nor peers.
fn rule_entry(rule: &NetworkPolicyRule) -> Option<Mapping> {
    let ports: Vec<Node> = rule
        .ports
        .iter()
        .map(|p| Mapping::new().with("port", *p).into())
        .collect();
    let peers: Vec<Node> = peers(rule).into_iter().map(Peer::into_node).collect();

    if ports.is_empty() && peers.is_empty() {
        return None;
    }

    let peer_key = match rule.direction {
        Direction::Ingress => "from",
        Direction::Egress => "to",
    };
    Some(
        Mapping::new()
            .with_nonempty("ports", ports)
            .with_nonempty(peer_key, peers),
    )
}

impl Generate for NetworkPolicySpec {
    fn documents(&self) -> Result<Vec<Node>> {
        let mut ingress = Vec::new();
        let mut egress = Vec::new();

        for (idx, rule) in self.rules.iter().enumerate() {
            let Some(entry) = rule_entry(rule) else {
                tracing::debug!(policy = %self.name, rule = idx, "dropping empty network policy rule");
                continue;
            };
            match rule.direction {
                Direction::Ingress => ingress.push(Node::from(entry)),
                Direction::Egress => egress.push(Node::from(entry)),
            }
        }

        let spec = Mapping::new()
            .with("podSelector", label_selector(parse_pairs(&self.pod_selector)))
            .with_nonempty("policyTypes", self.policy_types.as_slice())
            .with_nonempty("ingress", ingress)
            .with_nonempty("egress", egress);

        let namespace = if self.namespace.is_empty() {
            DEFAULT_NAMESPACE
        } else {
            self.namespace.as_str()
        };

        let doc = object(
            "networking.k8s.io/v1",
            "NetworkPolicy",
            metadata(&self.name, namespace),
        )
        .with("spec", spec);

        Ok(vec![doc.into()])
    }
}
