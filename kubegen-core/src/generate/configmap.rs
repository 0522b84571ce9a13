use crate::{
    error::Result,
    tree::{Mapping, Node},
    types::ConfigMapSpec,
};

use super::{metadata, object, Generate};

impl Generate for ConfigMapSpec {
    fn documents(&self) -> Result<Vec<Node>> {
        // Multi-line values come out as block scalars on their own; the
        // `is_multiline` flag needs no separate handling.
        let data = self
            .keys
            .iter()
            .filter(|key| !key.key_name.is_empty())
            .fold(Mapping::new(), |data, key| {
                data.with(&key.key_name, &key.value)
            });

        let doc = object(
            "v1",
            "ConfigMap",
            metadata(&self.configmap_name, &self.namespace),
        )
        .with_nonempty("data", data);

        Ok(vec![doc.into()])
    }
}
