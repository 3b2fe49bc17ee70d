use crate::error::{ComponentSection, RenderError, Section};
use crate::openapi::{OpenApiDocument, PathItem, Schema};
use crate::renderer::OutlineRenderer;
use crate::{ENDPOINT_FILE_NAME, SCHEMA_FILE_EXTENSION};
use regex::Regex;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Looks up endpoints and schemas in a loaded document and writes their
/// outlines to sinks or files.
#[derive(Debug, Clone)]
pub struct OutlineGenerator {
    document: Arc<OpenApiDocument>,
}

impl OutlineGenerator {
    pub fn new(document: Arc<OpenApiDocument>) -> Self {
        Self { document }
    }

    pub fn document(&self) -> &Arc<OpenApiDocument> {
        &self.document
    }

    /// Every endpoint path in document order.
    pub fn paths(&self) -> Vec<&str> {
        self.document.paths.keys().map(|path| path.as_str()).collect()
    }

    /// Every component schema name in document order.
    pub fn schemas(&self) -> Vec<&str> {
        self.document.schema_names().collect()
    }

    /// Paths containing a match for the regular expression `pattern`.
    pub fn find_paths(&self, pattern: &str) -> Result<Vec<&str>, RenderError> {
        let regex = Self::compile(pattern)?;
        Ok(self
            .paths()
            .into_iter()
            .filter(|path| regex.is_match(path))
            .collect())
    }

    /// Schema names containing a match for the regular expression `pattern`.
    pub fn find_schemas(&self, pattern: &str) -> Result<Vec<&str>, RenderError> {
        let regex = Self::compile(pattern)?;
        Ok(self
            .schemas()
            .into_iter()
            .filter(|name| regex.is_match(name))
            .collect())
    }

    fn compile(pattern: &str) -> Result<Regex, RenderError> {
        match Regex::new(pattern) {
            Ok(regex) => Ok(regex),
            Err(e) => Err(RenderError::invalid_pattern(pattern, e)),
        }
    }

    fn path_item(&self, path: &str) -> Result<&PathItem, RenderError> {
        match self.document.path(path) {
            Some(item) => Ok(item),
            None => Err(RenderError::not_found(path, Section::Paths)),
        }
    }

    fn schema(&self, name: &str) -> Result<&Schema, RenderError> {
        match self.document.schema(name) {
            Some(schema) => Ok(schema),
            None => Err(RenderError::not_found(
                name,
                Section::Components(ComponentSection::Schemas),
            )),
        }
    }

    /// # write_endpoint
    ///
    /// Resolves `path` in the document and renders it into `sink`.
    ///
    /// ## Returns
    ///
    /// * `Ok(())` - The outline was written.
    /// * `Err(RenderError::NotFound)` - The document has no such path. Nothing was written.
    /// * `Err(RenderError::Io)` - The sink failed.
    pub fn write_endpoint<W: Write>(
        &self,
        path: &str,
        sink: W,
        renderer: &OutlineRenderer,
    ) -> Result<(), RenderError> {
        let item = self.path_item(path)?;
        renderer.render_endpoint(path, item, sink)
    }

    pub fn write_schema<W: Write>(
        &self,
        name: &str,
        sink: W,
        renderer: &OutlineRenderer,
    ) -> Result<(), RenderError> {
        let schema = self.schema(name)?;
        renderer.render_schema(name, schema, sink)
    }

    /// Renders one endpoint into `file`, creating missing parent directories.
    /// An existing file is overwritten.
    pub fn generate_endpoint_file<P: AsRef<Path>>(
        &self,
        path: &str,
        file: P,
        renderer: &OutlineRenderer,
    ) -> Result<(), RenderError> {
        let item = self.path_item(path)?;
        let sink = Self::create_file(file.as_ref())?;
        renderer.render_endpoint(path, item, sink)
    }

    pub fn generate_schema_file<P: AsRef<Path>>(
        &self,
        name: &str,
        file: P,
        renderer: &OutlineRenderer,
    ) -> Result<(), RenderError> {
        let schema = self.schema(name)?;
        let sink = Self::create_file(file.as_ref())?;
        renderer.render_schema(name, schema, sink)
    }

    /// # generate_endpoint_files
    ///
    /// Writes one `endpoint.md` per path below `folder`, in a directory tree
    /// that mirrors the path segments: `/users/{id}` goes to
    /// `<folder>/users/{id}/endpoint.md`.
    ///
    /// ## Arguments
    ///
    /// * `paths` - Endpoint paths to render, in the order they are written.
    /// * `folder` - Output root.
    /// * `renderer` - Renderer used for every file.
    /// * `cancel` - Checked before each file. Files already written are kept.
    ///
    /// ## Returns
    ///
    /// * `Ok(Vec<PathBuf>)` - The written files.
    /// * `Err(RenderError::Cancelled)` - `cancel` was set before the batch finished.
    /// * `Err(_)` - The first lookup or write failure; later paths are not attempted.
    pub fn generate_endpoint_files<I, S, P>(
        &self,
        paths: I,
        folder: P,
        renderer: &OutlineRenderer,
        cancel: &AtomicBool,
    ) -> Result<Vec<PathBuf>, RenderError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        P: AsRef<Path>,
    {
        let mut written = Vec::new();
        for path in paths {
            if cancel.load(Ordering::Relaxed) {
                return Err(RenderError::Cancelled);
            }
            let path = path.as_ref();
            let file = endpoint_file_path(folder.as_ref(), path);
            log::debug!("Generating {} for endpoint {}", file.display(), path);
            self.generate_endpoint_file(path, &file, renderer)?;
            written.push(file);
        }
        Ok(written)
    }

    /// Writes one `<name>.md` per schema directly below `folder`.
    pub fn generate_schema_files<I, S, P>(
        &self,
        names: I,
        folder: P,
        renderer: &OutlineRenderer,
        cancel: &AtomicBool,
    ) -> Result<Vec<PathBuf>, RenderError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        P: AsRef<Path>,
    {
        let mut written = Vec::new();
        for name in names {
            if cancel.load(Ordering::Relaxed) {
                return Err(RenderError::Cancelled);
            }
            let name = name.as_ref();
            let file = folder
                .as_ref()
                .join(format!("{}.{}", name, SCHEMA_FILE_EXTENSION));
            log::debug!("Generating {} for schema {}", file.display(), name);
            self.generate_schema_file(name, &file, renderer)?;
            written.push(file);
        }
        Ok(written)
    }

    fn create_file(file: &Path) -> Result<BufWriter<File>, RenderError> {
        if let Some(parent) = file.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(BufWriter::new(File::create(file)?))
    }
}

/// `<folder>/<non-empty path segments>/endpoint.md`
pub fn endpoint_file_path(folder: &Path, path: &str) -> PathBuf {
    let mut file = folder.to_path_buf();
    for segment in path.split('/').filter(|segment| !segment.is_empty()) {
        file.push(segment);
    }
    file.push(ENDPOINT_FILE_NAME);
    file
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn generator() -> OutlineGenerator {
        let document: OpenApiDocument = serde_json::from_value(json!({
            "openapi": "3.0.4",
            "paths": {
                "/users": {"get": {"operationId": "users.ListUser"}},
                "/users/{user-id}": {"get": {"operationId": "users.GetUser"}},
                "/groups": {"get": {"operationId": "groups.ListGroup"}}
            },
            "components": {
                "schemas": {
                    "microsoft.graph.user": {"properties": {"id": {"type": "string"}}},
                    "microsoft.graph.group": {"enum": ["unified"]}
                }
            }
        }))
        .unwrap();
        OutlineGenerator::new(Arc::new(document))
    }

    #[test]
    fn test_lists_keep_document_order() {
        let generator = generator();
        assert_eq!(generator.paths(), vec!["/users", "/users/{user-id}", "/groups"]);
        assert_eq!(
            generator.schemas(),
            vec!["microsoft.graph.user", "microsoft.graph.group"]
        );
    }

    #[test]
    fn test_find_matches_anywhere_in_name() {
        let generator = generator();
        assert_eq!(
            generator.find_paths("users").unwrap(),
            vec!["/users", "/users/{user-id}"]
        );
        assert_eq!(generator.find_paths(r"^/users$").unwrap(), vec!["/users"]);
        assert_eq!(
            generator.find_schemas(r"\.group$").unwrap(),
            vec!["microsoft.graph.group"]
        );
        assert!(generator.find_schemas("nothing").unwrap().is_empty());
    }

    #[test]
    fn test_find_rejects_invalid_pattern() {
        let err = generator().find_paths("(unclosed").unwrap_err();
        assert!(matches!(err, RenderError::InvalidPattern(ref pattern, _) if pattern == "(unclosed"));
    }

    #[test]
    fn test_unknown_names_are_not_found() {
        let generator = generator();
        let renderer = OutlineRenderer::default();
        let mut sink = Vec::new();

        let err = generator
            .write_endpoint("/missing", &mut sink, &renderer)
            .unwrap_err();
        assert_eq!(err, RenderError::not_found("/missing", Section::Paths));

        let err = generator
            .write_schema("missing", &mut sink, &renderer)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "'missing' was not found in components --> schemas"
        );
        assert!(sink.is_empty());
    }

    #[test]
    fn test_write_schema_renders_into_sink() {
        let renderer = OutlineRenderer::for_schemas();
        let mut sink = Vec::new();
        generator()
            .write_schema("microsoft.graph.group", &mut sink, &renderer)
            .unwrap();
        let text = String::from_utf8(sink).unwrap();
        assert!(text.starts_with("---\nmarkmap:\n"));
        assert!(text.ends_with("# microsoft.graph.group\n- Items\n  - unified\n"));
    }

    #[test]
    fn test_endpoint_file_path_skips_empty_segments() {
        let folder = Path::new("out");
        assert_eq!(
            endpoint_file_path(folder, "/users/{user-id}/"),
            Path::new("out").join("users").join("{user-id}").join("endpoint.md")
        );
        assert_eq!(
            endpoint_file_path(folder, "/"),
            Path::new("out").join("endpoint.md")
        );
    }

    #[test]
    fn test_generate_endpoint_file_creates_directories() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a").join("b").join("users.md");
        generator()
            .generate_endpoint_file("/users", &file, &OutlineRenderer::default())
            .unwrap();
        let text = std::fs::read_to_string(&file).unwrap();
        assert!(text.contains("# /users\n"));
        assert!(text.contains("    - **Id**: users.ListUser\n"));
    }

    #[test]
    fn test_generate_files_stop_when_cancelled() {
        let dir = tempfile::tempdir().unwrap();
        let cancel = AtomicBool::new(true);
        let result = generator().generate_endpoint_files(
            ["/users"],
            dir.path(),
            &OutlineRenderer::default(),
            &cancel,
        );
        assert!(matches!(result, Err(RenderError::Cancelled)));
        assert!(!dir.path().join("users").exists());
    }
}
