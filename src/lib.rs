pub mod cache;
pub mod error;
pub mod generator;
pub mod openapi;
mod openapi_common;
pub mod renderer;
pub mod types;
pub mod writer;

pub use crate::cache::{CacheError, DocumentCollection, global_document_cache};
pub use crate::error::RenderError;
pub use crate::generator::OutlineGenerator;
pub use crate::openapi::{OpenApiDocument, PathItem, Schema};
pub use crate::renderer::{OutlineRenderer, OutlineRendererBuilder};
pub use crate::types::{ExtensionValue, MarkmapOptions, OutlineOptions};

pub(crate) const EXTENSION_PREFIX: &str = "x-";
pub(crate) const REF_SEPARATOR: char = '/';
pub(crate) const LINE_FEED: &str = "\n";
pub(crate) const FRONT_MATTER_DELIMITER: &str = "---";
pub(crate) const FRONT_MATTER_KEY: &str = "markmap:";
pub(crate) const NAVIGATION_PROPERTY_EXTENSION: &str = "x-ms-navigationProperty";
pub(crate) const ENUM_EXTENSION: &str = "x-ms-enum";
pub(crate) const SCHEMA_REF_KEY: &str = "schema $ref";
pub(crate) const DESCRIPTION_KEY: &str = "Description";
pub(crate) const SUMMARY_KEY: &str = "Summary";
pub(crate) const OPERATION_ID_KEY: &str = "Id";
pub(crate) const CONTENT_TYPE_KEY: &str = "Content type";
pub(crate) const ENUM_LABEL: &str = "Items";
pub(crate) const PROPERTIES_LABEL: &str = "Properties";
pub(crate) const RELATIONSHIPS_LABEL: &str = "Relationships";
pub(crate) const OPERATIONS_LABEL: &str = "Operations";
pub(crate) const PARAMETERS_LABEL: &str = "Parameters";
pub(crate) const RESPONSES_LABEL: &str = "Responses";
pub(crate) const ENDPOINT_FILE_NAME: &str = "endpoint.md";
pub(crate) const SCHEMA_FILE_EXTENSION: &str = "md";

/// # render_endpoint_to_string
///
/// Renders one path item with the given options and returns the outline text.
///
/// ## Arguments
///
/// * `path` - The endpoint path used as the outline title.
/// * `item` - The path item to render.
/// * `outline` - Shape of the outline.
/// * `markmap` - Front-matter settings.
pub fn render_endpoint_to_string(
    path: &str,
    item: &PathItem,
    outline: OutlineOptions,
    markmap: MarkmapOptions,
) -> Result<String, RenderError> {
    OutlineRenderer::new(outline, markmap).render_endpoint_to_string(path, item)
}

/// Renders a named component schema and returns the outline text.
pub fn render_schema_to_string(
    name: &str,
    schema: &Schema,
    outline: OutlineOptions,
    markmap: MarkmapOptions,
) -> Result<String, RenderError> {
    OutlineRenderer::new(outline, markmap).render_schema_to_string(name, schema)
}
