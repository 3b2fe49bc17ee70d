use crate::openapi_common::method_from_key;
use crate::types::ExtensionValue;
use crate::{EXTENSION_PREFIX, REF_SEPARATOR};
use http::Method;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use std::fmt::{Display, Formatter};

/// An already-parsed OpenAPI 3.0.x/3.1.x document.
///
/// Only the parts that show up in an outline are modeled. Maps keep the order
/// in which entries appear in the source document.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OpenApiDocument {
    /// The OpenAPI version the document declares.
    #[serde(default)]
    pub openapi: Option<String>,

    /// The available paths and operations for the API.
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,

    /// Reusable schemas.
    #[serde(default)]
    pub components: Option<Components>,

    /// Specification extensions.
    #[serde(flatten, deserialize_with = "crate::openapi_common::extensions::deserialize")]
    pub extensions: IndexMap<String, ExtensionValue>,
}

impl OpenApiDocument {
    pub fn path(&self, path: &str) -> Option<&PathItem> {
        self.paths.get(path)
    }

    pub fn schema(&self, name: &str) -> Option<&Schema> {
        self.components
            .as_ref()
            .and_then(|components| components.schemas.get(name))
    }

    /// Component schema names in document order.
    pub fn schema_names(&self) -> impl Iterator<Item = &str> {
        self.components
            .iter()
            .flat_map(|components| components.schemas.keys())
            .map(|name| name.as_str())
    }
}

/// Components Object
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Components {
    /// An object to hold reusable Schema Objects.
    #[serde(default)]
    pub schemas: IndexMap<String, Schema>,

    /// Specification extensions.
    #[serde(flatten, deserialize_with = "crate::openapi_common::extensions::deserialize")]
    pub extensions: IndexMap<String, ExtensionValue>,
}

/// Path Item Object: one endpoint and its operations keyed by HTTP method.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(try_from = "RawPathItem")]
pub struct PathItem {
    pub summary: Option<String>,
    pub description: Option<String>,
    /// Operations in the order their method keys appear in the document.
    pub operations: IndexMap<Method, Operation>,
    /// Parameters shared by every operation of the path.
    pub parameters: Vec<Parameter>,
    pub extensions: IndexMap<String, ExtensionValue>,
}

#[derive(Deserialize)]
struct RawPathItem {
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    parameters: Vec<Parameter>,
    #[serde(flatten)]
    fields: IndexMap<String, Value>,
}

impl TryFrom<RawPathItem> for PathItem {
    type Error = serde_json::Error;

    fn try_from(raw: RawPathItem) -> Result<Self, Self::Error> {
        let mut operations = IndexMap::new();
        let mut extensions = IndexMap::new();
        for (key, value) in raw.fields {
            if let Some(method) = method_from_key(&key) {
                operations.insert(method, serde_json::from_value::<Operation>(value)?);
            } else if key.starts_with(EXTENSION_PREFIX) {
                extensions.insert(key, ExtensionValue::from(value));
            }
        }

        Ok(PathItem {
            summary: raw.summary,
            description: raw.description,
            operations,
            parameters: raw.parameters,
            extensions,
        })
    }
}

/// Operation Object
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Operation {
    /// A short summary of what the operation does.
    #[serde(default)]
    pub summary: Option<String>,

    /// A verbose explanation of the operation behavior.
    #[serde(default)]
    pub description: Option<String>,

    /// Unique string used to identify the operation.
    #[serde(default, rename = "operationId")]
    pub operation_id: Option<String>,

    /// Declares this operation to be deprecated.
    #[serde(default)]
    pub deprecated: bool,

    /// A list of parameters that are applicable for this operation.
    #[serde(default)]
    pub parameters: Vec<Parameter>,

    /// The request body applicable for this operation.
    #[serde(default, rename = "requestBody")]
    pub request_body: Option<RequestBody>,

    /// Responses keyed by status code (or `default`).
    #[serde(default)]
    pub responses: IndexMap<String, Response>,

    /// Specification extensions.
    #[serde(flatten, deserialize_with = "crate::openapi_common::extensions::deserialize")]
    pub extensions: IndexMap<String, ExtensionValue>,
}

/// Parameter Object
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Parameter {
    /// The name of the parameter.
    #[serde(default)]
    pub name: String,

    /// The location of the parameter.
    #[serde(default, rename = "in")]
    pub location: Option<ParameterLocation>,

    /// A brief description of the parameter.
    #[serde(default)]
    pub description: Option<String>,

    /// Determines whether this parameter is mandatory.
    #[serde(default)]
    pub required: bool,

    /// Specifies that a parameter is deprecated.
    #[serde(default)]
    pub deprecated: bool,

    /// Describes how the parameter value will be serialized.
    #[serde(default)]
    pub style: Option<ParameterStyle>,

    /// The schema defining the type used for the parameter.
    #[serde(default)]
    pub schema: Option<Schema>,

    /// A map containing the representations for the parameter.
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,

    /// Specification extensions.
    #[serde(flatten, deserialize_with = "crate::openapi_common::extensions::deserialize")]
    pub extensions: IndexMap<String, ExtensionValue>,
}

impl Parameter {
    /// The declared style, or the default OpenAPI assigns for the parameter location.
    pub fn effective_style(&self) -> Option<ParameterStyle> {
        if self.style.is_some() {
            return self.style;
        }
        match self.location? {
            ParameterLocation::Query | ParameterLocation::Cookie => Some(ParameterStyle::Form),
            ParameterLocation::Path | ParameterLocation::Header => Some(ParameterStyle::Simple),
        }
    }
}

/// Parameter Location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Query,
    Header,
    Path,
    Cookie,
}

impl Display for ParameterLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let str = match self {
            ParameterLocation::Query => "Query",
            ParameterLocation::Header => "Header",
            ParameterLocation::Path => "Path",
            ParameterLocation::Cookie => "Cookie",
        };
        write!(f, "{}", str)
    }
}

/// Serialization style of a parameter or an encoded property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterStyle {
    Matrix,
    Label,
    Form,
    Simple,
    SpaceDelimited,
    PipeDelimited,
    DeepObject,
}

impl Display for ParameterStyle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let str = match self {
            ParameterStyle::Matrix => "Matrix",
            ParameterStyle::Label => "Label",
            ParameterStyle::Form => "Form",
            ParameterStyle::Simple => "Simple",
            ParameterStyle::SpaceDelimited => "SpaceDelimited",
            ParameterStyle::PipeDelimited => "PipeDelimited",
            ParameterStyle::DeepObject => "DeepObject",
        };
        write!(f, "{}", str)
    }
}

/// Request Body Object
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct RequestBody {
    /// A brief description of the request body.
    #[serde(default)]
    pub description: Option<String>,

    /// The content of the request body.
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,

    /// Determines if the request body is required in the request.
    #[serde(default)]
    pub required: bool,

    /// Specification extensions.
    #[serde(flatten, deserialize_with = "crate::openapi_common::extensions::deserialize")]
    pub extensions: IndexMap<String, ExtensionValue>,
}

/// Media Type Object
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct MediaType {
    /// The schema defining the content of the request, response, or parameter.
    #[serde(default)]
    pub schema: Option<Schema>,

    /// A map between a property name and its encoding information.
    #[serde(default)]
    pub encoding: IndexMap<String, Encoding>,

    /// Specification extensions.
    #[serde(flatten, deserialize_with = "crate::openapi_common::extensions::deserialize")]
    pub extensions: IndexMap<String, ExtensionValue>,
}

/// Encoding Object
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Encoding {
    /// The Content-Type for encoding a specific property.
    #[serde(default, rename = "contentType")]
    pub content_type: Option<String>,

    /// Describes how a specific property value will be serialized.
    #[serde(default)]
    pub style: Option<ParameterStyle>,

    /// Specification extensions.
    #[serde(flatten, deserialize_with = "crate::openapi_common::extensions::deserialize")]
    pub extensions: IndexMap<String, ExtensionValue>,
}

/// Response Object
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Response {
    /// A description of the response.
    #[serde(default)]
    pub description: Option<String>,

    /// Maps a header name to its definition.
    #[serde(default)]
    pub headers: IndexMap<String, Header>,

    /// A map containing descriptions of potential response payloads.
    #[serde(default)]
    pub content: IndexMap<String, MediaType>,

    /// Specification extensions.
    #[serde(flatten, deserialize_with = "crate::openapi_common::extensions::deserialize")]
    pub extensions: IndexMap<String, ExtensionValue>,
}

/// Header Object
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Header {
    /// A brief description of the header.
    #[serde(default)]
    pub description: Option<String>,

    /// Specifies that a header is deprecated.
    #[serde(default)]
    pub deprecated: bool,

    /// Specification extensions.
    #[serde(flatten, deserialize_with = "crate::openapi_common::extensions::deserialize")]
    pub extensions: IndexMap<String, ExtensionValue>,
}

/// Schema type that supports both single string (3.0.x) and array of types (3.1.x)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SchemaType {
    /// Single type string (3.0.x style)
    Single(String),
    /// Array of types (3.1.x style)
    Multiple(Vec<String>),
}

impl Display for SchemaType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaType::Single(name) => write!(f, "{}", name),
            SchemaType::Multiple(names) => write!(f, "{}", names.join(", ")),
        }
    }
}

/// A symbolic pointer to a reusable schema. Only its id is ever printed.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub struct Reference {
    pub ref_path: String,
}

impl Reference {
    /// The last segment of the pointer: `#/components/schemas/User` is `User`.
    pub fn id(&self) -> &str {
        self.ref_path
            .rsplit(REF_SEPARATOR)
            .next()
            .unwrap_or(&self.ref_path)
    }
}

impl From<String> for Reference {
    fn from(ref_path: String) -> Self {
        Reference { ref_path }
    }
}

/// Schema Object
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Schema {
    /// Schema reference ($ref). Never followed.
    #[serde(default, rename = "$ref")]
    pub reference: Option<Reference>,

    /// Schema type - can be single string (3.0.x) or array of strings (3.1.x)
    #[serde(default, rename = "type")]
    pub schema_type: Option<SchemaType>,

    /// Enum values
    #[serde(default, rename = "enum")]
    pub enum_values: Vec<ExtensionValue>,

    /// Properties for object schemas
    #[serde(default)]
    pub properties: IndexMap<String, Schema>,

    /// Items for array schemas
    #[serde(default)]
    pub items: Option<Box<Schema>>,

    /// All of schemas
    #[serde(default, rename = "allOf")]
    pub all_of: Vec<Schema>,

    /// Any of schemas
    #[serde(default, rename = "anyOf")]
    pub any_of: Vec<Schema>,

    /// Specification extensions (x- prefixed fields)
    #[serde(flatten, deserialize_with = "crate::openapi_common::extensions::deserialize")]
    pub extensions: IndexMap<String, ExtensionValue>,
}

impl Schema {
    /// The printed type name; empty when the schema declares none.
    pub fn type_name(&self) -> String {
        self.schema_type
            .as_ref()
            .map(|schema_type| schema_type.to_string())
            .unwrap_or_default()
    }

    pub fn reference_id(&self) -> Option<&str> {
        self.reference.as_ref().map(|reference| reference.id())
    }

    pub fn has_extension(&self, key: &str) -> bool {
        self.extensions.contains_key(key)
    }
}
