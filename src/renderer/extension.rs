use crate::ENUM_EXTENSION;
use crate::renderer::RenderPass;
use crate::types::ExtensionValue;
use indexmap::IndexMap;
use std::io::{Result, Write};

type Fields = IndexMap<String, ExtensionValue>;

fn flag(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

impl<W: Write> RenderPass<'_, W> {
    /// Writes the `x-*` extensions of a node at `indent`.
    ///
    /// Values without an outline representation (numbers, null, and timestamps
    /// at this level) are skipped without output.
    pub(super) fn write_extensions(&mut self, extensions: &Fields, indent: usize) -> Result<()> {
        for (key, value) in extensions {
            match value {
                ExtensionValue::Object(fields) if key == ENUM_EXTENSION => {
                    self.writer.write_list_item(key, indent)?;
                    self.write_enum_extension(fields, indent + 2)?;
                }
                ExtensionValue::Object(fields) => {
                    self.writer.write_list_item(key, indent)?;
                    self.write_extension_object(fields, indent + 2)?;
                }
                ExtensionValue::List(items) => {
                    self.writer.write_list_item(&format!("**{}**", key), indent)?;
                    self.write_extension_list(items, indent + 2)?;
                }
                ExtensionValue::String(text) => self.writer.write_key_value(key, text, indent)?,
                ExtensionValue::Boolean(value) => {
                    self.writer.write_key_value(key, flag(*value), indent)?
                }
                other => log::trace!("Skipping {} extension {}", other.kind(), key),
            }
        }
        Ok(())
    }

    /// `x-ms-enum` has a fixed shape: `name`, then `modelAsString`, then
    /// `values`. A missing or mistyped field ends the output at that point.
    fn write_enum_extension(&mut self, fields: &Fields, indent: usize) -> Result<()> {
        let Some(name) = fields.get("name").and_then(ExtensionValue::as_str) else {
            return Ok(());
        };
        self.writer.write_key_value("name", name, indent)?;

        let Some(model_as_string) = fields.get("modelAsString").and_then(ExtensionValue::as_bool)
        else {
            return Ok(());
        };
        self.writer
            .write_key_value("modelAsString", flag(model_as_string), indent + 2)?;

        let Some(values) = fields.get("values").and_then(ExtensionValue::as_list) else {
            return Ok(());
        };
        self.writer.write_list_item("values", indent + 2)?;
        for entry in values.iter().filter_map(ExtensionValue::as_object) {
            let field = |key: &str| entry.get(key).and_then(ExtensionValue::as_str);
            if let (Some(value), Some(description), Some(name)) =
                (field("value"), field("description"), field("name"))
            {
                self.writer.write_list_item(value, indent + 4)?;
                self.writer.write_key_value("description", description, indent + 6)?;
                self.writer.write_key_value("name", name, indent + 6)?;
            }
        }
        Ok(())
    }

    fn write_extension_object(&mut self, fields: &Fields, indent: usize) -> Result<()> {
        for (key, value) in fields {
            match value {
                ExtensionValue::String(text) => self.writer.write_key_value(key, text, indent)?,
                ExtensionValue::Boolean(value) => {
                    self.writer.write_key_value(key, flag(*value), indent)?
                }
                // No key line for nested lists.
                ExtensionValue::List(items) => self.write_extension_list(items, indent + 2)?,
                ExtensionValue::Timestamp(instant) => {
                    self.writer
                        .write_key_value(key, &instant.to_rfc3339(), indent)?
                }
                ExtensionValue::Object(nested) => {
                    self.writer.write_list_item(key, indent)?;
                    self.write_extension_object(nested, indent + 2)?;
                }
                other => log::trace!("Skipping {} field {}", other.kind(), key),
            }
        }
        Ok(())
    }

    fn write_extension_list(&mut self, items: &[ExtensionValue], indent: usize) -> Result<()> {
        for item in items {
            match item {
                ExtensionValue::String(text) => self.writer.write_list_item(text, indent)?,
                ExtensionValue::Boolean(value) => self.writer.write_list_item(flag(*value), indent)?,
                ExtensionValue::Object(fields) => self.write_extension_object(fields, indent)?,
                ExtensionValue::Timestamp(instant) => {
                    self.writer.write_list_item(&instant.to_rfc3339(), indent)?
                }
                other => log::trace!("Skipping {} list entry", other.kind()),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OutlineOptions;
    use crate::writer::OutlineWriter;
    use chrono::DateTime;
    use serde_json::{Value, json};

    fn extensions(value: Value) -> Fields {
        match ExtensionValue::from(value) {
            ExtensionValue::Object(fields) => fields,
            other => panic!("expected an object, got {:?}", other),
        }
    }

    fn render(extensions: &Fields, indent: usize) -> String {
        let options = OutlineOptions::default();
        let mut buffer = Vec::new();
        {
            let mut pass = RenderPass::new(OutlineWriter::new(&mut buffer), &options);
            pass.write_extensions(extensions, indent).unwrap();
        }
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_scalar_extensions_are_key_values() {
        let fields = extensions(json!({
            "x-ms-docs-key-type": "user",
            "x-ms-pageable": false,
            "x-ms-count": 4,
            "x-ms-null": null
        }));
        assert_eq!(
            render(&fields, 2),
            "  - **x-ms-docs-key-type**: user\n  - **x-ms-pageable**: false\n"
        );
    }

    #[test]
    fn test_list_extension_bolds_key() {
        let fields = extensions(json!({"x-ms-tags": ["users", true, 3, {"owner": "graph"}]}));
        assert_eq!(
            render(&fields, 0),
            "- **x-ms-tags**\n  - users\n  - true\n  - **owner**: graph\n"
        );
    }

    #[test]
    fn test_object_extension_keeps_plain_key() {
        let fields = extensions(json!({
            "x-ms-docs-operation-type": {
                "operation": "function",
                "composable": true,
                "aliases": ["a", "b"],
                "limits": {"top": "100"},
                "size": 12
            }
        }));
        assert_eq!(
            render(&fields, 0),
            "- x-ms-docs-operation-type\n  - **operation**: function\n  - **composable**: true\n    - a\n    - b\n  - limits\n    - **top**: 100\n"
        );
    }

    #[test]
    fn test_timestamps_render_inside_objects_and_lists_only() {
        let instant = DateTime::parse_from_rfc3339("2024-05-01T10:00:00+02:00").unwrap();
        let mut inner = Fields::new();
        inner.insert("date".to_string(), ExtensionValue::from(instant));
        let mut fields = Fields::new();
        fields.insert("x-top".to_string(), ExtensionValue::from(instant));
        fields.insert("x-object".to_string(), ExtensionValue::Object(inner));
        fields.insert(
            "x-list".to_string(),
            ExtensionValue::List(vec![ExtensionValue::from(instant)]),
        );
        assert_eq!(
            render(&fields, 0),
            "- x-object\n  - **date**: 2024-05-01T10:00:00+02:00\n- **x-list**\n  - 2024-05-01T10:00:00+02:00\n"
        );
    }

    #[test]
    fn test_enum_extension_full_shape() {
        let fields = extensions(json!({
            "x-ms-enum": {
                "name": "status",
                "modelAsString": true,
                "values": [
                    {"value": "on", "description": "Enabled", "name": "On"},
                    {"value": "broken", "description": "No name"},
                    "not an object",
                    {"value": "off", "description": "Disabled", "name": "Off"}
                ]
            }
        }));
        assert_eq!(
            render(&fields, 0),
            concat!(
                "- x-ms-enum\n",
                "  - **name**: status\n",
                "    - **modelAsString**: true\n",
                "    - values\n",
                "      - on\n",
                "        - **description**: Enabled\n",
                "        - **name**: On\n",
                "      - off\n",
                "        - **description**: Disabled\n",
                "        - **name**: Off\n",
            )
        );
    }

    #[test]
    fn test_enum_extension_stops_at_missing_field() {
        let without_model = extensions(json!({
            "x-ms-enum": {"name": "status", "values": [{"value": "on", "description": "d", "name": "n"}]}
        }));
        assert_eq!(
            render(&without_model, 0),
            "- x-ms-enum\n  - **name**: status\n"
        );

        let without_name = extensions(json!({"x-ms-enum": {"modelAsString": false}}));
        assert_eq!(render(&without_name, 0), "- x-ms-enum\n");
    }

    #[test]
    fn test_enum_extension_key_with_list_value_is_a_plain_list() {
        let fields = extensions(json!({"x-ms-enum": ["a"]}));
        assert_eq!(render(&fields, 0), "- **x-ms-enum**\n  - a\n");
    }
}
