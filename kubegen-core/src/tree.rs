//! Ordered field tree for a single manifest document.
//!
//! Generators build a [`Node`] per document; the renderer walks it through
//! serde. Mapping keys keep insertion order so output is stable.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Str(String),
    Int(i64),
    Bool(bool),
    List(Vec<Node>),
    Map(Mapping),
}

impl Node {
    pub fn list<I, T>(items: I) -> Node
    where
        I: IntoIterator<Item = T>,
        T: Into<Node>,
    {
        Node::List(items.into_iter().map(Into::into).collect())
    }

    /// Empty strings, lists and mappings count as "not set".
    /// Scalars that carry a number or a flag never do.
    pub fn is_empty(&self) -> bool {
        match self {
            Node::Str(s) => s.is_empty(),
            Node::List(items) => items.is_empty(),
            Node::Map(map) => map.is_empty(),
            Node::Int(_) | Node::Bool(_) => false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping(Vec<(String, Node)>);

impl Mapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `key`, replacing an existing entry in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Node>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<Node>) -> Self {
        self.insert(key, value);
        self
    }

    /// Like [`Mapping::with`], but leaves the key out when the value is empty.
    pub fn with_nonempty(mut self, key: impl Into<String>, value: impl Into<Node>) -> Self {
        let value = value.into();
        if !value.is_empty() {
            self.insert(key, value);
        }
        self
    }

    /// Leaves the key out when `value` is zero.
    pub fn with_nonzero(mut self, key: impl Into<String>, value: i64) -> Self {
        if value != 0 {
            self.insert(key, value);
        }
        self
    }

    pub fn with_opt<T: Into<Node>>(mut self, key: impl Into<String>, value: Option<T>) -> Self {
        if let Some(value) = value {
            self.insert(key, value);
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Node::Str(s) => serializer.serialize_str(s),
            Node::Int(i) => serializer.serialize_i64(*i),
            Node::Bool(b) => serializer.serialize_bool(*b),
            Node::List(items) => items.serialize(serializer),
            Node::Map(map) => map.serialize(serializer),
        }
    }
}

impl Serialize for Mapping {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (k, v) in &self.0 {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::Str(s.to_string())
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::Str(s)
    }
}

impl From<&String> for Node {
    fn from(s: &String) -> Self {
        Node::Str(s.clone())
    }
}

impl From<i64> for Node {
    fn from(i: i64) -> Self {
        Node::Int(i)
    }
}

impl From<i32> for Node {
    fn from(i: i32) -> Self {
        Node::Int(i64::from(i))
    }
}

impl From<u32> for Node {
    fn from(i: u32) -> Self {
        Node::Int(i64::from(i))
    }
}

impl From<bool> for Node {
    fn from(b: bool) -> Self {
        Node::Bool(b)
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Node::List(items)
    }
}

impl From<&[String]> for Node {
    fn from(items: &[String]) -> Self {
        Node::list(items)
    }
}

impl From<Mapping> for Node {
    fn from(map: Mapping) -> Self {
        Node::Map(map)
    }
}

impl From<BTreeMap<String, String>> for Node {
    fn from(map: BTreeMap<String, String>) -> Self {
        Node::Map(map.into_iter().fold(Mapping::new(), |m, (k, v)| m.with(k, v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_replaces_in_place() {
        let mut map = Mapping::new().with("a", 1).with("b", 2);
        map.insert("a", "x");
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(map.get("a"), Some(&Node::Str("x".into())));
    }

    #[test]
    fn omission_helpers() {
        let map = Mapping::new()
            .with_nonempty("empty", "")
            .with_nonempty("list", Vec::<Node>::new())
            .with_nonempty("nested", Mapping::new())
            .with_nonzero("zero", 0)
            .with_opt("none", None::<bool>)
            .with_nonempty("name", "web")
            .with_nonzero("port", 80)
            .with_opt("flag", Some(false));
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["name", "port", "flag"]);
    }

    #[test]
    fn scalars_keep_their_type_when_rendered() {
        let doc = Node::from(
            Mapping::new()
                .with("count", 3)
                .with("text", "3")
                .with("enabled", true)
                .with("items", Node::list(["a", "b"])),
        );
        let out = serde_yaml::to_string(&doc).unwrap();
        let parsed: serde_yaml::Value = serde_yaml::from_str(&out).unwrap();
        assert_eq!(parsed["count"].as_i64(), Some(3));
        assert_eq!(parsed["text"].as_str(), Some("3"));
        assert_eq!(parsed["enabled"].as_bool(), Some(true));
        assert_eq!(parsed["items"][1].as_str(), Some("b"));
    }
}
