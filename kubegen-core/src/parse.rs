//! Small decoders for the free-form string fields of a request.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

use crate::tree::Node;

/// Decode a single `key=value` pair.
///
/// Splits once on the first `=` and trims both sides. Anything without an
/// `=` decodes to an empty map.
pub fn parse_pair(input: &str) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    if let Some((key, value)) = input.split_once('=') {
        out.insert(key.trim().to_string(), value.trim().to_string());
    }
    out
}

/// Decode a comma-separated list of `key=value` pairs.
///
/// Each token goes through [`parse_pair`]; tokens without an `=` are dropped
/// and a repeated key keeps its last value.
pub fn parse_pairs(input: &str) -> BTreeMap<String, String> {
    input.split(',').flat_map(parse_pair).collect()
}

/// Comma-separated port list. Tokens that are not integers are dropped.
pub fn parse_ports(input: &str) -> Vec<i32> {
    input
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .filter_map(|p| p.parse().ok())
        .collect()
}

/// A value that is either an absolute count or something else, usually a
/// percentage such as `25%`.
#[derive(Debug, Clone, PartialEq)]
pub enum IntOrString {
    Int(i64),
    Str(String),
}

pub fn int_or_string(value: &str) -> IntOrString {
    match value.parse::<i64>() {
        Ok(i) => IntOrString::Int(i),
        Err(_) => IntOrString::Str(value.to_string()),
    }
}

impl From<IntOrString> for Node {
    fn from(value: IntOrString) -> Self {
        match value {
            IntOrString::Int(i) => Node::Int(i),
            IntOrString::Str(s) => Node::Str(s),
        }
    }
}

/// Accepts a JSON string, an integer or null and always yields a string.
pub(crate) fn string_or_int<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Str(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Int(i)) => i.to_string(),
        Some(Raw::Str(s)) => s,
        None => String::new(),
    })
}
