use crate::{
    error::Result,
    parse::parse_pairs,
    tree::{Mapping, Node},
    types::NamespaceSpec,
};

use super::{object, Generate};

impl Generate for NamespaceSpec {
    fn documents(&self) -> Result<Vec<Node>> {
        let metadata = Mapping::new()
            .with("name", &self.namespace_name)
            .with_nonempty("labels", parse_pairs(&self.labels));

        Ok(vec![object("v1", "Namespace", metadata).into()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::testutil::single;

    #[test]
    fn namespace_with_labels() {
        let doc = single(&NamespaceSpec {
            namespace_name: "team-a".into(),
            labels: "env=prod".into(),
        });
        assert_eq!(doc["apiVersion"].as_str(), Some("v1"));
        assert_eq!(doc["kind"].as_str(), Some("Namespace"));
        assert_eq!(doc["metadata"]["name"].as_str(), Some("team-a"));
        assert_eq!(doc["metadata"]["labels"]["env"].as_str(), Some("prod"));
    }

    #[test]
    fn labels_omitted_when_unset() {
        let doc = single(&NamespaceSpec {
            namespace_name: "team-a".into(),
            labels: String::new(),
        });
        assert!(doc["metadata"].get("labels").is_none());
        assert!(doc["metadata"].get("namespace").is_none());
    }
}
