use crate::{
    error::{GenerateError, Result},
    tree::{Mapping, Node},
    types::{PolicyRule, RoleSpec, Subject},
};

use super::{object, Generate};

const RBAC_API_VERSION: &str = "rbac.authorization.k8s.io/v1";
const RBAC_GROUP: &str = "rbac.authorization.k8s.io";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RoleType {
    Role,
    ClusterRole,
}

impl RoleType {
    fn parse(value: &str) -> Result<Self> {
        match value {
            "Role" => Ok(RoleType::Role),
            "ClusterRole" => Ok(RoleType::ClusterRole),
            other => Err(GenerateError::UnsupportedType {
                field: "role type",
                value: other.to_string(),
            }),
        }
    }

    fn kind(self) -> &'static str {
        match self {
            RoleType::Role => "Role",
            RoleType::ClusterRole => "ClusterRole",
        }
    }

    fn binding_kind(self) -> &'static str {
        match self {
            RoleType::Role => "RoleBinding",
            RoleType::ClusterRole => "ClusterRoleBinding",
        }
    }
}

impl Generate for RoleSpec {
    /// The role followed by its binding.
    fn documents(&self) -> Result<Vec<Node>> {
        let role_type = RoleType::parse(&self.role_type)?;

        // Only namespaced roles carry a namespace, on each document separately.
        let scoped = |namespace: &str| {
            if role_type == RoleType::Role {
                namespace.to_string()
            } else {
                String::new()
            }
        };

        let role_meta = Mapping::new()
            .with("name", &self.name)
            .with_nonempty("namespace", scoped(&self.namespace));
        let rules: Vec<Node> = self.rules.iter().map(|r| rule(r).into()).collect();
        let role = object(RBAC_API_VERSION, role_type.kind(), role_meta).with("rules", rules);

        let binding_meta = Mapping::new()
            .with("name", &self.binding.name)
            .with_nonempty("namespace", scoped(&self.binding.namespace));
        let subjects: Vec<Node> = self
            .binding
            .subjects
            .iter()
            .map(|s| subject(s).into())
            .collect();
        let role_ref = Mapping::new()
            .with("apiGroup", RBAC_GROUP)
            .with("kind", role_type.kind())
            .with("name", &self.name);
        let binding = object(RBAC_API_VERSION, role_type.binding_kind(), binding_meta)
            .with_nonempty("subjects", subjects)
            .with("roleRef", role_ref);

        Ok(vec![role.into(), binding.into()])
    }
}

fn rule(r: &PolicyRule) -> Mapping {
    Mapping::new()
        .with("apiGroups", r.api_groups.as_slice())
        .with_nonempty("resources", r.resources.as_slice())
        .with("verbs", r.verbs.as_slice())
}

fn subject(s: &Subject) -> Mapping {
    let api_group = match s.kind.as_str() {
        "User" | "Group" => RBAC_GROUP,
        _ => "",
    };
    Mapping::new()
        .with("kind", &s.kind)
        .with_nonempty("apiGroup", api_group)
        .with("name", &s.name)
        .with_nonempty("namespace", &s.namespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::testutil::rendered;
    use crate::types::RoleBindingSpec;

    fn role(role_type: &str) -> RoleSpec {
        RoleSpec {
            role_type: role_type.into(),
            name: "pod-reader".into(),
            namespace: "default".into(),
            rules: vec![PolicyRule {
                api_groups: vec![String::new()],
                resources: vec!["pods".into()],
                verbs: vec!["get".into(), "watch".into(), "list".into()],
            }],
            binding: RoleBindingSpec {
                name: "read-pods".into(),
                namespace: "default".into(),
                subjects: vec![
                    Subject {
                        kind: "ServiceAccount".into(),
                        name: "default".into(),
                        namespace: "default".into(),
                    },
                    Subject {
                        kind: "User".into(),
                        name: "jane".into(),
                        namespace: String::new(),
                    },
                ],
            },
        }
    }

    #[test]
    fn role_and_binding_documents() {
        let (text, docs) = rendered(&role("Role"));
        assert_eq!(text.matches("\n---\n").count(), 1);
        assert_eq!(docs.len(), 2);

        let (role, binding) = (&docs[0], &docs[1]);
        assert_eq!(role["kind"].as_str(), Some("Role"));
        assert_eq!(role["apiVersion"].as_str(), Some(RBAC_API_VERSION));
        assert_eq!(role["metadata"]["namespace"].as_str(), Some("default"));
        assert_eq!(role["rules"][0]["apiGroups"][0].as_str(), Some(""));
        assert_eq!(role["rules"][0]["verbs"][2].as_str(), Some("list"));

        assert_eq!(binding["kind"].as_str(), Some("RoleBinding"));
        assert_eq!(binding["metadata"]["name"].as_str(), Some("read-pods"));
        assert_eq!(binding["metadata"]["namespace"].as_str(), Some("default"));
        assert_eq!(binding["roleRef"]["kind"].as_str(), Some("Role"));
        assert_eq!(binding["roleRef"]["name"].as_str(), Some("pod-reader"));
        assert_eq!(binding["roleRef"]["apiGroup"].as_str(), Some(RBAC_GROUP));

        let sa = &binding["subjects"][0];
        assert_eq!(sa["namespace"].as_str(), Some("default"));
        assert!(sa.get("apiGroup").is_none());
        let user = &binding["subjects"][1];
        assert_eq!(user["apiGroup"].as_str(), Some(RBAC_GROUP));
        assert!(user.get("namespace").is_none());
    }

    #[test]
    fn cluster_role_drops_namespaces() {
        let (_, docs) = rendered(&role("ClusterRole"));
        assert_eq!(docs[0]["kind"].as_str(), Some("ClusterRole"));
        assert!(docs[0]["metadata"].get("namespace").is_none());
        assert_eq!(docs[1]["kind"].as_str(), Some("ClusterRoleBinding"));
        assert!(docs[1]["metadata"].get("namespace").is_none());
        assert_eq!(docs[1]["roleRef"]["kind"].as_str(), Some("ClusterRole"));
    }

    #[test]
    fn namespaces_attach_independently() {
        let mut spec = role("Role");
        spec.namespace = String::new();
        let (_, docs) = rendered(&spec);
        assert!(docs[0]["metadata"].get("namespace").is_none());
        assert_eq!(docs[1]["metadata"]["namespace"].as_str(), Some("default"));
    }

    #[test]
    fn unknown_role_type_is_rejected() {
        let err = role("Admin").documents().unwrap_err();
        assert!(matches!(
            err,
            GenerateError::UnsupportedType {
                field: "role type",
                ..
            }
        ));
    }
}
