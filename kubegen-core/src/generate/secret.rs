use base64::{engine::general_purpose, Engine};
use serde::de::DeserializeOwned;

use crate::{
    error::{GenerateError, Result},
    tree::{Mapping, Node},
    types::{DockerConfigData, ResourceKind, SecretKey, SecretSpec, TlsSecretData},
};

use super::{metadata, object, Generate};

const TLS_TYPE: &str = "kubernetes.io/tls";
const DOCKER_CONFIG_TYPE: &str = "kubernetes.io/dockerconfigjson";

/// A secret's payload, resolved against its declared type.
#[derive(Debug, Clone, PartialEq)]
pub enum SecretPayload {
    Opaque(Vec<(String, String)>),
    Tls { crt: String, key: String },
    DockerConfigJson(String),
}

impl SecretPayload {
    /// Check `data` against `secret_type`. Short type names (`tls`,
    /// `dockerconfigjson`) are accepted alongside the full ones.
    pub fn resolve(secret_type: &str, data: &serde_json::Value) -> Result<Self> {
        match secret_type {
            "Opaque" => {
                let keys: Vec<SecretKey> =
                    decode(data, "Opaque expects a list of key/value entries")?;
                Ok(SecretPayload::Opaque(
                    keys.into_iter().map(|k| (k.key_name, k.value)).collect(),
                ))
            }
            "tls" | TLS_TYPE => {
                let tls: TlsSecretData = decode(data, "tls expects tls_crt and tls_key")?;
                Ok(SecretPayload::Tls {
                    crt: tls.tls_crt,
                    key: tls.tls_key,
                })
            }
            "dockerconfigjson" | DOCKER_CONFIG_TYPE => {
                let cfg: DockerConfigData =
                    decode(data, "dockerconfigjson expects a dockerconfigjson field")?;
                Ok(SecretPayload::DockerConfigJson(cfg.dockerconfigjson))
            }
            other => Err(GenerateError::UnsupportedType {
                field: "secret type",
                value: other.to_string(),
            }),
        }
    }

    /// The `type` written to the manifest.
    pub fn type_name(&self) -> &'static str {
        match self {
            SecretPayload::Opaque(_) => "Opaque",
            SecretPayload::Tls { .. } => TLS_TYPE,
            SecretPayload::DockerConfigJson(_) => DOCKER_CONFIG_TYPE,
        }
    }

    fn entries(&self) -> Vec<(&str, &str)> {
        match self {
            SecretPayload::Opaque(keys) => keys
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect(),
            SecretPayload::Tls { crt, key } => {
                vec![("tls.crt", crt.as_str()), ("tls.key", key.as_str())]
            }
            SecretPayload::DockerConfigJson(cfg) => vec![(".dockerconfigjson", cfg.as_str())],
        }
    }
}

/// Object payloads must be JSON objects and list payloads JSON arrays; a
/// field that is present but of the wrong type fails too.
fn decode<T: DeserializeOwned>(data: &serde_json::Value, expected: &str) -> Result<T> {
    serde_json::from_value(data.clone()).map_err(|e| {
        GenerateError::data_shape(ResourceKind::Secret, format!("{expected}: {e}"))
    })
}

impl Generate for SecretSpec {
    fn documents(&self) -> Result<Vec<Node>> {
        let payload = SecretPayload::resolve(&self.secret_type, &self.data)?;

        let data = payload
            .entries()
            .into_iter()
            .fold(Mapping::new(), |data, (key, value)| {
                data.with(key, general_purpose::STANDARD.encode(value))
            });

        let doc = object("v1", "Secret", metadata(&self.secret_name, &self.namespace))
            .with("type", payload.type_name())
            .with_nonempty("data", data);

        Ok(vec![doc.into()])
    }
}
