use crate::openapi::{Reference, Schema};
use crate::renderer::{RenderPass, STANDALONE_SCHEMA_DEPTH};
use crate::types::ExtensionValue;
use crate::{
    ENUM_LABEL, NAVIGATION_PROPERTY_EXTENSION, PROPERTIES_LABEL, RELATIONSHIPS_LABEL,
    SCHEMA_REF_KEY,
};
use indexmap::IndexMap;
use std::io::{Result, Write};

type Member<'s> = (&'s String, &'s Schema);

impl<W: Write> RenderPass<'_, W> {
    /// Renders a schema one level below `depth`.
    ///
    /// A node past the depth budget produces no output at all, not even its
    /// reference line. Content under a schema without a reference or enum
    /// literals stays at `indent` so no empty level appears.
    pub(super) fn write_schema(
        &mut self,
        schema: Option<&Schema>,
        indent: usize,
        depth: i32,
    ) -> Result<()> {
        let depth = depth + 1;
        let Some(schema) = schema else {
            return Ok(());
        };
        if !self.within_depth(depth) {
            log::trace!("Schema depth {} exceeds budget, node dropped", depth);
            return Ok(());
        }

        self.write_reference(schema.reference.as_ref(), indent)?;
        self.write_enum(&schema.enum_values, indent)?;
        let indent = if schema.reference.is_none() && schema.enum_values.is_empty() {
            indent
        } else {
            indent + 2
        };
        self.write_schema_body(schema, indent, depth)
    }

    pub(super) fn write_standalone_schema(&mut self, schema: &Schema) -> Result<()> {
        self.write_enum(&schema.enum_values, 0)?;
        self.write_schema_body(schema, 0, STANDALONE_SCHEMA_DEPTH)
    }

    /// Properties, items, `allOf`, `anyOf` and extensions, all at `indent`.
    fn write_schema_body(&mut self, schema: &Schema, indent: usize, depth: i32) -> Result<()> {
        self.write_properties(&schema.properties, indent, depth)?;
        self.write_items(schema.items.as_deref(), indent, depth)?;
        self.write_composition(&schema.all_of, indent, depth)?;
        self.write_composition(&schema.any_of, indent, depth)?;
        self.write_extensions(&schema.extensions, indent)
    }

    /// Array items render in place of their parent and share its depth.
    fn write_items(&mut self, items: Option<&Schema>, indent: usize, depth: i32) -> Result<()> {
        let Some(items) = items else {
            return Ok(());
        };
        if !self.within_depth(depth) {
            return Ok(());
        }

        self.write_reference(items.reference.as_ref(), indent)?;
        self.write_enum(&items.enum_values, indent)?;
        self.write_properties(&items.properties, indent, depth)?;
        self.write_schema(items.items.as_deref(), indent, depth)?;
        self.write_composition(&items.all_of, indent, depth)?;
        self.write_composition(&items.any_of, indent, depth)?;
        self.write_extensions(&items.extensions, indent)
    }

    /// `allOf`/`anyOf` entries, ordered by reference id ignoring case, with
    /// ties broken ordinally. Entries without a reference come first and keep
    /// their relative order.
    fn write_composition(&mut self, schemas: &[Schema], indent: usize, depth: i32) -> Result<()> {
        if schemas.is_empty() || !self.within_depth(depth) {
            return Ok(());
        }

        let mut ordered: Vec<&Schema> = schemas.iter().collect();
        ordered.sort_by(|a, b| {
            let a = a.reference_id().unwrap_or_default();
            let b = b.reference_id().unwrap_or_default();
            a.to_lowercase()
                .cmp(&b.to_lowercase())
                .then_with(|| a.cmp(b))
        });
        for schema in ordered {
            self.write_reference(schema.reference.as_ref(), indent)?;
            self.write_properties(&schema.properties, indent + 2, depth)?;
            self.write_schema(schema.items.as_deref(), indent + 2, depth)?;
            self.write_composition(&schema.all_of, indent + 2, depth)?;
            self.write_composition(&schema.any_of, indent + 2, depth)?;
            self.write_extensions(&schema.extensions, indent + 2)?;
        }
        Ok(())
    }

    fn write_reference(&mut self, reference: Option<&Reference>, indent: usize) -> Result<()> {
        match reference {
            Some(reference) => self
                .writer
                .write_key_value(SCHEMA_REF_KEY, reference.id(), indent),
            None => Ok(()),
        }
    }

    /// Enum literals under an `Items` label. Only string literals are printed.
    fn write_enum(&mut self, values: &[ExtensionValue], indent: usize) -> Result<()> {
        if values.is_empty() {
            return Ok(());
        }

        self.writer.write_list_item(ENUM_LABEL, indent)?;
        if self.options.groups(values.len()) {
            for chunk in values.chunks(self.options.chunk_size()) {
                let line = chunk
                    .iter()
                    .filter_map(ExtensionValue::as_str)
                    .map(escape_emphasis)
                    .collect::<Vec<_>>()
                    .join(", ");
                self.writer.write_list_item(&line, indent + 2)?;
            }
        } else {
            for text in values.iter().filter_map(ExtensionValue::as_str) {
                self.writer.write_list_item(&escape_emphasis(text), indent + 2)?;
            }
        }
        Ok(())
    }

    /// Splits members into plain properties and navigation relationships and
    /// writes each group under its own label.
    fn write_properties(
        &mut self,
        properties: &IndexMap<String, Schema>,
        indent: usize,
        depth: i32,
    ) -> Result<()> {
        if properties.is_empty() || !self.within_depth(depth) {
            return Ok(());
        }

        let (relationships, plain): (Vec<Member>, Vec<Member>) = properties
            .iter()
            .partition(|(_, schema)| schema.has_extension(NAVIGATION_PROPERTY_EXTENSION));
        self.write_member_group(PROPERTIES_LABEL, &plain, indent, depth)?;
        self.write_member_group(RELATIONSHIPS_LABEL, &relationships, indent, depth)
    }

    fn write_member_group(
        &mut self,
        label: &str,
        members: &[Member],
        indent: usize,
        depth: i32,
    ) -> Result<()> {
        if members.is_empty() {
            return Ok(());
        }

        self.writer.write_list_item(label, indent)?;
        if self.options.groups(members.len()) {
            for chunk in members.chunks(self.options.chunk_size()) {
                let names = chunk
                    .iter()
                    .map(|(name, _)| name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                self.writer.write_list_item(&names, indent + 2)?;
            }
        } else {
            for (name, schema) in members {
                self.write_member(name, schema, indent + 2, depth)?;
            }
        }
        Ok(())
    }

    fn write_member(&mut self, name: &str, schema: &Schema, indent: usize, depth: i32) -> Result<()> {
        let type_name = schema.type_name();
        let line = if type_name.is_empty() {
            format!("{} ", name)
        } else {
            format!("{} ({})", name, type_name)
        };
        self.writer.write_list_item(&line, indent)?;

        let depth = depth + 1;
        if !self.within_depth(depth) {
            log::trace!("Member {} reached depth {}, content dropped", name, depth);
            return Ok(());
        }
        self.write_reference(schema.reference.as_ref(), indent + 2)?;
        self.write_enum(&schema.enum_values, indent + 2)?;
        self.write_schema_body(schema, indent + 2, depth)
    }
}

/// Markdown would read `*` as emphasis.
fn escape_emphasis(text: &str) -> String {
    text.replace('*', "'*'")
}
