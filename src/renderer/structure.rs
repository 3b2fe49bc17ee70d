use crate::openapi::{
    Encoding, Header, MediaType, Operation, Parameter, PathItem, RequestBody, Response,
};
use crate::openapi_common::method_label;
use crate::renderer::{ENDPOINT_SCHEMA_DEPTH, RenderPass};
use crate::{
    CONTENT_TYPE_KEY, DESCRIPTION_KEY, OPERATION_ID_KEY, OPERATIONS_LABEL, PARAMETERS_LABEL,
    RESPONSES_LABEL, SUMMARY_KEY,
};
use http::Method;
use indexmap::IndexMap;
use std::io::{Result, Write};

fn requirement(required: bool) -> &'static str {
    if required { "required" } else { "optional" }
}

impl<W: Write> RenderPass<'_, W> {
    pub(super) fn write_path_item(&mut self, item: &PathItem) -> Result<()> {
        self.write_description(item.description.as_deref(), 0)?;
        self.write_summary(item.summary.as_deref(), 0)?;
        self.write_operations(&item.operations, 0)?;
        self.write_parameters(&item.parameters, 0)?;
        self.write_extensions(&item.extensions, 0)
    }

    fn write_description(&mut self, description: Option<&str>, indent: usize) -> Result<()> {
        match description {
            Some(text) if !text.is_empty() => {
                self.writer.write_key_value(DESCRIPTION_KEY, text, indent)
            }
            _ => Ok(()),
        }
    }

    fn write_summary(&mut self, summary: Option<&str>, indent: usize) -> Result<()> {
        match summary {
            Some(text) if !text.is_empty() => self.writer.write_key_value(SUMMARY_KEY, text, indent),
            _ => Ok(()),
        }
    }

    fn write_operations(
        &mut self,
        operations: &IndexMap<Method, Operation>,
        indent: usize,
    ) -> Result<()> {
        if operations.is_empty() {
            return Ok(());
        }

        self.writer.write_list_item(OPERATIONS_LABEL, indent)?;
        for (method, operation) in operations {
            let deprecated = if operation.deprecated { " (deprecated)" } else { "" };
            self.writer
                .write_list_item(&format!("**{}**{}", method_label(method), deprecated), indent + 2)?;

            let indent = indent + 4;
            self.write_description(operation.description.as_deref(), indent)?;
            self.write_summary(operation.summary.as_deref(), indent)?;
            self.writer.write_key_value(
                OPERATION_ID_KEY,
                operation.operation_id.as_deref().unwrap_or_default(),
                indent,
            )?;
            self.write_parameters(&operation.parameters, indent)?;
            if let Some(body) = &operation.request_body {
                self.write_request_body(body, indent)?;
            }
            self.write_responses(&operation.responses, indent)?;
            self.write_extensions(&operation.extensions, indent)?;
        }
        Ok(())
    }

    /// Every parameter's schema starts a fresh depth budget. The schema and
    /// the extensions sit next to the parameter line, not below it.
    fn write_parameters(&mut self, parameters: &[Parameter], indent: usize) -> Result<()> {
        if parameters.is_empty() {
            return Ok(());
        }

        self.writer.write_list_item(PARAMETERS_LABEL, indent)?;
        for parameter in parameters {
            self.writer
                .write_list_item(&parameter_line(parameter), indent + 2)?;
            self.write_description(parameter.description.as_deref(), indent + 4)?;
            self.write_content(&parameter.content, indent + 4)?;
            self.write_schema(parameter.schema.as_ref(), indent + 2, ENDPOINT_SCHEMA_DEPTH)?;
            self.write_extensions(&parameter.extensions, indent + 2)?;
        }
        Ok(())
    }

    fn write_request_body(&mut self, body: &RequestBody, indent: usize) -> Result<()> {
        self.writer.write_list_item(
            &format!("Request body ({})", requirement(body.required)),
            indent,
        )?;
        self.write_description(body.description.as_deref(), indent + 2)?;
        self.write_content(&body.content, indent + 2)?;
        self.write_extensions(&body.extensions, indent + 2)
    }

    fn write_content(&mut self, content: &IndexMap<String, MediaType>, indent: usize) -> Result<()> {
        for (media_type, entry) in content {
            self.writer
                .write_key_value(CONTENT_TYPE_KEY, media_type, indent)?;
            self.write_schema(entry.schema.as_ref(), indent + 2, ENDPOINT_SCHEMA_DEPTH)?;
            self.write_encodings(&entry.encoding, indent + 2)?;
            self.write_extensions(&entry.extensions, indent + 2)?;
        }
        Ok(())
    }

    fn write_encodings(&mut self, encodings: &IndexMap<String, Encoding>, indent: usize) -> Result<()> {
        for (property, encoding) in encodings {
            let line = format!(
                "{} ({} | {})",
                property,
                encoding.content_type.as_deref().unwrap_or_default(),
                encoding.style.map(|style| style.to_string()).unwrap_or_default()
            );
            self.writer.write_list_item(&line, indent)?;
        }
        Ok(())
    }

    /// Response extensions are not part of the outline.
    fn write_responses(&mut self, responses: &IndexMap<String, Response>, indent: usize) -> Result<()> {
        if responses.is_empty() {
            return Ok(());
        }

        self.writer.write_list_item(RESPONSES_LABEL, indent)?;
        for (status, response) in responses {
            self.writer
                .write_list_item(&format!("**{}**", status), indent + 2)?;
            self.write_description(response.description.as_deref(), indent + 4)?;
            self.write_content(&response.content, indent + 4)?;
            self.write_headers(&response.headers, indent + 4)?;
        }
        Ok(())
    }

    fn write_headers(&mut self, headers: &IndexMap<String, Header>, indent: usize) -> Result<()> {
        for (name, header) in headers {
            let deprecated = if header.deprecated { "(deprecated)" } else { "" };
            self.writer
                .write_list_item(&format!("{}{}", name, deprecated), indent)?;
            self.write_description(header.description.as_deref(), indent + 2)?;
        }
        Ok(())
    }
}

/// `name (in | required | type | style[ | deprecated])`. Missing parts print as empty text.
fn parameter_line(parameter: &Parameter) -> String {
    let location = parameter
        .location
        .map(|location| location.to_string())
        .unwrap_or_default();
    let style = parameter
        .effective_style()
        .map(|style| style.to_string())
        .unwrap_or_default();
    let schema_type = parameter
        .schema
        .as_ref()
        .map(|schema| schema.type_name())
        .unwrap_or_default();
    let deprecated = if parameter.deprecated { " | deprecated" } else { "" };

    format!(
        "{} ({} | {} | {} | {}{})",
        parameter.name,
        location,
        requirement(parameter.required),
        schema_type,
        style,
        deprecated
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OutlineOptions;
    use crate::writer::OutlineWriter;
    use serde_json::{Value, json};

    fn path_item(value: Value) -> PathItem {
        serde_json::from_value(value).unwrap()
    }

    fn render_with(item: &PathItem, options: OutlineOptions) -> String {
        let mut buffer = Vec::new();
        {
            let mut pass = RenderPass::new(OutlineWriter::new(&mut buffer), &options);
            pass.write_path_item(item).unwrap();
        }
        String::from_utf8(buffer).unwrap()
    }

    fn render(item: &PathItem) -> String {
        render_with(item, OutlineOptions::default())
    }

    #[test]
    fn test_empty_path_item_writes_nothing() {
        assert_eq!(render(&PathItem::default()), "");
    }

    #[test]
    fn test_empty_description_is_omitted() {
        let item = path_item(json!({"description": "", "summary": "Users"}));
        assert_eq!(render(&item), "- **Summary**: Users\n");
    }

    #[test]
    fn test_operation_lines() {
        let item = path_item(json!({
            "get": {
                "summary": "List users",
                "description": "Returns every user",
                "operationId": "users.ListUser",
                "x-ms-pageable": {"nextLinkName": "@odata.nextLink", "operationName": "listMore"}
            },
            "delete": {"deprecated": true}
        }));
        assert_eq!(
            render(&item),
            concat!(
                "- Operations\n",
                "  - **Get**\n",
                "    - **Description**: Returns every user\n",
                "    - **Summary**: List users\n",
                "    - **Id**: users.ListUser\n",
                "    - x-ms-pageable\n",
                "      - **nextLinkName**: @odata.nextLink\n",
                "      - **operationName**: listMore\n",
                "  - **Delete** (deprecated)\n",
                "    - **Id**: \n",
            )
        );
    }

    #[test]
    fn test_parameter_line_parts() {
        let item = path_item(json!({
            "parameters": [
                {"name": "user-id", "in": "path", "required": true, "schema": {"type": "string"}},
                {"name": "$select", "in": "query", "style": "form", "deprecated": true,
                 "description": "Select properties",
                 "schema": {"type": "array", "items": {"enum": ["id", "*"]}}},
                {"name": "ConsistencyLevel", "in": "header"}
            ]
        }));
        assert_eq!(
            render(&item),
            concat!(
                "- Parameters\n",
                "  - user-id (Path | required | string | Simple)\n",
                "  - $select (Query | optional | array | Form | deprecated)\n",
                "    - **Description**: Select properties\n",
                "  - Items\n",
                "    - id\n",
                "    - '*'\n",
                "  - ConsistencyLevel (Header | optional |  | Simple)\n",
            )
        );
    }

    #[test]
    fn test_parameter_content_sits_below_description() {
        let item = path_item(json!({
            "parameters": [{
                "name": "filter",
                "in": "query",
                "content": {"application/json": {"schema": {"$ref": "#/components/schemas/filter"}}},
                "x-ms-docs-grouped-path": "yes"
            }]
        }));
        assert_eq!(
            render(&item),
            concat!(
                "- Parameters\n",
                "  - filter (Query | optional |  | Form)\n",
                "    - **Content type**: application/json\n",
                "      - **schema $ref**: filter\n",
                "  - **x-ms-docs-grouped-path**: yes\n",
            )
        );
    }

    #[test]
    fn test_request_body_with_encoding() {
        let item = path_item(json!({
            "post": {
                "operationId": "upload",
                "requestBody": {
                    "required": true,
                    "description": "File upload",
                    "content": {
                        "multipart/form-data": {
                            "schema": {"properties": {"file": {"type": "string"}}},
                            "encoding": {
                                "file": {"contentType": "image/png", "style": "form"},
                                "meta": {}
                            }
                        }
                    },
                    "x-ms-requestBody-name": "body"
                }
            }
        }));
        assert_eq!(
            render(&item),
            concat!(
                "- Operations\n",
                "  - **Post**\n",
                "    - **Id**: upload\n",
                "    - Request body (required)\n",
                "      - **Description**: File upload\n",
                "      - **Content type**: multipart/form-data\n",
                "        - Properties\n",
                "          - file (string)\n",
                "        - file (image/png | Form)\n",
                "        - meta ( | )\n",
                "      - **x-ms-requestBody-name**: body\n",
            )
        );
    }

    #[test]
    fn test_responses_and_headers() {
        let item = path_item(json!({
            "get": {
                "operationId": "get",
                "responses": {
                    "200": {
                        "description": "Success",
                        "content": {"application/json": {"schema": {"$ref": "#/components/schemas/user"}}},
                        "headers": {
                            "Retry-After": {"description": "Seconds", "deprecated": true},
                            "ETag": {}
                        },
                        "x-ms-not-rendered": "hidden"
                    },
                    "default": {"$ref": "#/components/responses/error"}
                }
            }
        }));
        assert_eq!(
            render(&item),
            concat!(
                "- Operations\n",
                "  - **Get**\n",
                "    - **Id**: get\n",
                "    - Responses\n",
                "      - **200**\n",
                "        - **Description**: Success\n",
                "        - **Content type**: application/json\n",
                "          - **schema $ref**: user\n",
                "        - Retry-After(deprecated)\n",
                "          - **Description**: Seconds\n",
                "        - ETag\n",
                "      - **default**\n",
            )
        );
    }

    #[test]
    fn test_every_content_entry_has_its_own_depth_budget() {
        let nested = json!({
            "properties": {"a": {"type": "object", "properties": {"b": {"type": "string"}}}}
        });
        let item = path_item(json!({
            "put": {
                "operationId": "put",
                "requestBody": {"content": {"application/json": {"schema": nested.clone()}}},
                "responses": {"204": {"content": {"application/json": {"schema": nested}}}}
            }
        }));
        let text = render_with(&item, OutlineOptions::new(2, 10, 6, true));
        assert_eq!(text.matches("- b (string)").count(), 2);
    }

    #[test]
    fn test_path_item_order() {
        let item = path_item(json!({
            "x-ms-docs-toc-type": "page",
            "parameters": [{"name": "id", "in": "path", "required": true}],
            "get": {"operationId": "one"},
            "summary": "s",
            "description": "d"
        }));
        assert_eq!(
            render(&item),
            concat!(
                "- **Description**: d\n",
                "- **Summary**: s\n",
                "- Operations\n",
                "  - **Get**\n",
                "    - **Id**: one\n",
                "- Parameters\n",
                "  - id (Path | required |  | Simple)\n",
                "- **x-ms-docs-toc-type**: page\n",
            )
        );
    }
}
