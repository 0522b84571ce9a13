use crate::{
    error::Result,
    tree::{Mapping, Node},
    types::PvcSpec,
};

use super::{metadata, object, Generate};

impl Generate for PvcSpec {
    fn documents(&self) -> Result<Vec<Node>> {
        let requests = Mapping::new().with_nonempty("storage", &self.storage_request);
        let spec = Mapping::new()
            .with_nonempty("accessModes", self.access_modes.as_slice())
            .with_nonempty(
                "resources",
                Mapping::new().with_nonempty("requests", requests),
            )
            .with_nonempty("storageClassName", &self.storage_class_name);

        let doc = object(
            "v1",
            "PersistentVolumeClaim",
            metadata(&self.pvc_name, &self.namespace),
        )
        .with("spec", spec);

        Ok(vec![doc.into()])
    }
}
