use crate::{error::Result, tree::Node};

/// Placed between documents when a generator yields more than one.
pub const DOCUMENT_SEPARATOR: &str = "---\n";

/// Render one document as YAML.
pub fn render(doc: &Node) -> Result<String> {
    Ok(serde_yaml::to_string(doc)?)
}

/// Render each document and join them with [`DOCUMENT_SEPARATOR`].
pub fn render_all(docs: &[Node]) -> Result<String> {
    let rendered = docs.iter().map(render).collect::<Result<Vec<_>>>()?;
    Ok(rendered.join(DOCUMENT_SEPARATOR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::Mapping;

    #[test]
    fn single_document_has_no_separator() {
        let out = render(&Mapping::new().with("kind", "Namespace").into()).unwrap();
        assert_eq!(out, "kind: Namespace\n");
    }

    #[test]
    fn documents_are_joined_by_separator_line() {
        let docs = vec![
            Node::from(Mapping::new().with("kind", "Role")),
            Node::from(Mapping::new().with("kind", "RoleBinding")),
        ];
        let out = render_all(&docs).unwrap();
        assert_eq!(out, "kind: Role\n---\nkind: RoleBinding\n");
    }
}
