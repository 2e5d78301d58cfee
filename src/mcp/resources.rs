//! MCP Resources Implementation
//!
//! Exposes the provider's market snapshots through `binance://` URIs.

use crate::provider::{resource_descriptors, BinanceProvider};
use rmcp::model::{AnnotateAble, ErrorData, RawResource, Resource, ResourceContents};

/// Lists all available resources
pub fn list_resources() -> Vec<Resource> {
    resource_descriptors()
        .into_iter()
        .map(|descriptor| {
            let mut resource = RawResource::new(descriptor.uri, descriptor.name);
            resource.description = Some(descriptor.description.to_string());
            resource.mime_type = Some(descriptor.mime_type.to_string());
            resource.no_annotation()
        })
        .collect()
}

/// Reads a resource by URI
///
/// # Returns
///
/// Resource contents as JSON text, or an error whose data is the error envelope
pub async fn read_resource(
    provider: &BinanceProvider,
    uri: &str,
) -> Result<ResourceContents, ErrorData> {
    let body = provider.read_resource(uri).await?;
    Ok(ResourceContents::text(body.to_string(), uri))
}
