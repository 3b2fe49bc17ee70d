mod builder;
mod extension;
mod schema;
mod structure;

pub use builder::OutlineRendererBuilder;

use crate::error::RenderError;
use crate::openapi::{PathItem, Schema};
use crate::types::{MarkmapOptions, OutlineOptions};
use crate::writer::OutlineWriter;
use std::io::Write;

/// Schema depth before the first schema of an endpoint node is entered.
const ENDPOINT_SCHEMA_DEPTH: i32 = 0;

/// Schema depth of a standalone schema's own members. The schema itself already
/// counts as one level, which is why its default depth budget is one lower.
const STANDALONE_SCHEMA_DEPTH: i32 = 1;

/// Renders endpoints and component schemas as markmap outlines.
///
/// The renderer only holds immutable options. Every call creates its own
/// [`RenderPass`], so one renderer can be shared by concurrent renders.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlineRenderer {
    outline: OutlineOptions,
    markmap: MarkmapOptions,
}

impl OutlineRenderer {
    pub fn new(outline: OutlineOptions, markmap: MarkmapOptions) -> Self {
        Self { outline, markmap }
    }

    /// Renderer with the default options for endpoints.
    pub fn for_endpoints() -> Self {
        Self::new(OutlineOptions::default(), MarkmapOptions::default())
    }

    /// Renderer with the default options for standalone schemas.
    pub fn for_schemas() -> Self {
        Self::new(OutlineOptions::for_schema(), MarkmapOptions::default())
    }

    pub fn outline_options(&self) -> &OutlineOptions {
        &self.outline
    }

    pub fn markmap_options(&self) -> &MarkmapOptions {
        &self.markmap
    }

    /// # render_endpoint
    ///
    /// Writes the outline of one path item: front-matter, the path as title,
    /// description, summary, operations, shared parameters and extensions.
    ///
    /// ## Arguments
    ///
    /// * `path` - The endpoint path, e.g. `/users/{id}`. Used as the title.
    /// * `item` - The path item resolved from the document.
    /// * `sink` - Where the outline text goes.
    ///
    /// ## Returns
    ///
    /// * `Ok(())` - The whole outline was written.
    /// * `Err(RenderError::Io)` - The sink failed; the output is incomplete.
    pub fn render_endpoint<W: Write>(
        &self,
        path: &str,
        item: &PathItem,
        sink: W,
    ) -> Result<(), RenderError> {
        log::debug!("Rendering endpoint {}", path);
        let mut pass = RenderPass::new(OutlineWriter::new(sink), &self.outline);
        pass.writer.write_header(&self.markmap)?;
        pass.writer.write_title(path, &self.outline)?;
        pass.write_path_item(item)?;
        pass.writer.flush()?;
        Ok(())
    }

    /// # render_schema
    ///
    /// Writes the outline of a named component schema. The schema's own
    /// reference is not printed; its enum literals, properties, items,
    /// compositions and extensions start at the root level.
    pub fn render_schema<W: Write>(
        &self,
        name: &str,
        schema: &Schema,
        sink: W,
    ) -> Result<(), RenderError> {
        log::debug!("Rendering schema {}", name);
        let mut pass = RenderPass::new(OutlineWriter::new(sink), &self.outline);
        pass.writer.write_header(&self.markmap)?;
        pass.writer.write_title(name, &self.outline)?;
        pass.write_standalone_schema(schema)?;
        pass.writer.flush()?;
        Ok(())
    }

    pub fn render_endpoint_to_string(
        &self,
        path: &str,
        item: &PathItem,
    ) -> Result<String, RenderError> {
        let mut buffer = Vec::new();
        self.render_endpoint(path, item, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }

    pub fn render_schema_to_string(&self, name: &str, schema: &Schema) -> Result<String, RenderError> {
        let mut buffer = Vec::new();
        self.render_schema(name, schema, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

impl Default for OutlineRenderer {
    fn default() -> Self {
        Self::for_endpoints()
    }
}

/// State of one top-level render call.
///
/// Schema depth is not stored here: it is passed down every recursive call and
/// restarts at [`ENDPOINT_SCHEMA_DEPTH`] for each schema-bearing endpoint node.
pub(crate) struct RenderPass<'o, W: Write> {
    writer: OutlineWriter<W>,
    options: &'o OutlineOptions,
}

impl<'o, W: Write> RenderPass<'o, W> {
    fn new(writer: OutlineWriter<W>, options: &'o OutlineOptions) -> Self {
        Self { writer, options }
    }

    fn within_depth(&self, depth: i32) -> bool {
        depth <= self.options.max_schema_depth
    }
}
