use crate::{
    error::Result,
    generate::Generate,
    render::render_all,
    types::{GenerateRequest, Resource},
};

/// Generate the manifest for a request. When more than one resource slot is
/// set, the first in priority order is used.
pub fn generate(request: GenerateRequest) -> Result<String> {
    generate_resource(&request.into_resource()?)
}

/// Like [`generate`], but a request with several slots set is an error.
pub fn generate_exclusive(request: GenerateRequest) -> Result<String> {
    generate_resource(&request.into_exclusive_resource()?)
}

pub fn generate_resource(resource: &Resource) -> Result<String> {
    tracing::debug!(kind = %resource.kind(), "generating manifest");
    let docs = resource.documents()?;
    render_all(&docs)
}
