use crate::error::{RenderError, Section};
use crate::renderer::OutlineRenderer;
use crate::types::{MarkmapOptions, OutlineOptions};
use serde::Deserialize;
use serde_json::Value;

/// Host configuration shape: `{"outline": {...}, "markmap": {...}}`.
/// Both sections and every field inside them are optional.
#[derive(Default, Deserialize)]
#[serde(default)]
struct RendererConfig {
    outline: Option<OutlineOptions>,
    markmap: Option<MarkmapOptions>,
}

pub struct OutlineRendererBuilder {
    outline: OutlineOptions,
    markmap: MarkmapOptions,
}

impl OutlineRendererBuilder {
    pub fn new() -> Self {
        Self {
            outline: OutlineOptions::default(),
            markmap: MarkmapOptions::default(),
        }
    }

    /// Starts from the standalone-schema outline defaults.
    pub fn for_schema() -> Self {
        Self {
            outline: OutlineOptions::for_schema(),
            markmap: MarkmapOptions::default(),
        }
    }

    pub fn outline_options(mut self, outline: OutlineOptions) -> Self {
        self.outline = outline;
        self
    }

    pub fn markmap_options(mut self, markmap: MarkmapOptions) -> Self {
        self.markmap = markmap;
        self
    }

    pub fn max_schema_depth(mut self, depth: i32) -> Self {
        self.outline.max_schema_depth = depth;
        self
    }

    pub fn max_single_items(mut self, count: i32) -> Self {
        self.outline.max_single_items = count;
        self
    }

    pub fn group_items_size(mut self, size: i32) -> Self {
        self.outline.group_items_size = size;
        self
    }

    pub fn show_name_in_root(mut self, show: bool) -> Self {
        self.outline.show_name_in_root = show;
        self
    }

    pub fn color_freeze_level(mut self, level: i32) -> Self {
        self.markmap.color_freeze_level = level;
        self
    }

    pub fn initial_expand_level(mut self, level: i32) -> Self {
        self.markmap.initial_expand_level = level;
        self
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.markmap.colors.push(color.into());
        self
    }

    pub fn colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.markmap.colors = colors.into_iter().map(Into::into).collect();
        self
    }

    pub fn duration(mut self, millis: i32) -> Self {
        self.markmap.duration = millis;
        self
    }

    pub fn max_width(mut self, width: i32) -> Self {
        self.markmap.max_width = width;
        self
    }

    pub fn zoom(mut self, zoom: bool) -> Self {
        self.markmap.zoom = zoom;
        self
    }

    pub fn pan(mut self, pan: bool) -> Self {
        self.markmap.pan = pan;
        self
    }

    /// # load_config
    ///
    /// Replaces the options with the sections present in `config`. A missing
    /// section keeps the current options; a present section starts from the
    /// defaults of its type and overrides the fields it names.
    ///
    /// ## Arguments
    ///
    /// * `config` - JSON value shaped `{"outline": {...}, "markmap": {...}}`.
    ///
    /// ## Returns
    ///
    /// * `Ok(Self)` - The builder with the loaded options.
    /// * `Err(RenderError::UnableToParse)` - A field has the wrong type.
    pub fn load_config(mut self, config: Value) -> Result<Self, RenderError> {
        let config: RendererConfig = match serde_json::from_value(config) {
            Ok(config) => config,
            Err(e) => return Err(RenderError::unable_to_parse(e, Section::Other)),
        };
        if let Some(outline) = config.outline {
            self.outline = outline;
        }
        if let Some(markmap) = config.markmap {
            self.markmap = markmap;
        }
        Ok(self)
    }

    pub fn build(self) -> OutlineRenderer {
        OutlineRenderer::new(self.outline, self.markmap)
    }
}

impl Default for OutlineRendererBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_defaults_match_renderer_defaults() {
        assert_eq!(OutlineRendererBuilder::new().build(), OutlineRenderer::for_endpoints());
        assert_eq!(
            OutlineRendererBuilder::for_schema().build(),
            OutlineRenderer::for_schemas()
        );
    }

    #[test]
    fn test_setters() {
        let renderer = OutlineRendererBuilder::new()
            .max_schema_depth(5)
            .max_single_items(0)
            .group_items_size(2)
            .show_name_in_root(false)
            .color_freeze_level(0)
            .initial_expand_level(-1)
            .color("red")
            .color("blue")
            .duration(100)
            .max_width(320)
            .zoom(false)
            .pan(false)
            .build();

        assert_eq!(
            renderer.outline_options(),
            &OutlineOptions::new(5, 0, 2, false)
        );
        let markmap = renderer.markmap_options();
        assert_eq!(markmap.colors, vec!["red", "blue"]);
        assert_eq!(markmap.duration, 100);
        assert_eq!(markmap.max_width, 320);
        assert!(!markmap.zoom);
        assert!(!markmap.pan);
    }

    #[test]
    fn test_load_config_overrides_named_fields() {
        let renderer = OutlineRendererBuilder::new()
            .load_config(json!({
                "outline": {"maxSchemaDepth": 1},
                "markmap": {"color": ["#fff"], "zoom": false}
            }))
            .unwrap()
            .build();

        assert_eq!(renderer.outline_options().max_schema_depth, 1);
        assert_eq!(
            renderer.outline_options().max_single_items,
            OutlineOptions::DEFAULT_MAX_SINGLE_ITEMS
        );
        assert_eq!(renderer.markmap_options().colors, vec!["#fff"]);
        assert!(!renderer.markmap_options().zoom);
        assert!(renderer.markmap_options().pan);
    }

    #[test]
    fn test_load_config_without_sections_keeps_options() {
        let renderer = OutlineRendererBuilder::new()
            .max_schema_depth(7)
            .load_config(json!({}))
            .unwrap()
            .build();
        assert_eq!(renderer.outline_options().max_schema_depth, 7);
    }

    #[test]
    fn test_load_config_rejects_wrong_types() {
        let result = OutlineRendererBuilder::new().load_config(json!({"outline": {"maxSchemaDepth": "deep"}}));
        assert!(matches!(result, Err(RenderError::UnableToParse(_, Section::Other))));
    }
}
