use crate::{
    error::Result,
    tree::{Mapping, Node},
    types::ServiceAccountSpec,
};

use super::{metadata, object, Generate};

impl Generate for ServiceAccountSpec {
    fn documents(&self) -> Result<Vec<Node>> {
        let pull_secrets: Vec<Node> = self
            .image_pull_secrets
            .iter()
            .filter(|name| !name.is_empty())
            .map(|name| Mapping::new().with("name", name).into())
            .collect();

        let doc = object(
            "v1",
            "ServiceAccount",
            metadata(&self.service_account_name, &self.namespace),
        )
        .with_nonempty("imagePullSecrets", pull_secrets)
        .with_opt(
            "automountServiceAccountToken",
            self.automount_service_account_token,
        );

        Ok(vec![doc.into()])
    }
}
