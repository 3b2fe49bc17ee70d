use crate::EXTENSION_PREFIX;
use crate::types::ExtensionValue;
use http::Method;
use indexmap::IndexMap;
use serde::Deserialize;
use serde::de::Deserializer;

/// Flattened `x-*` fields of a node. Every other unknown key is dropped.
pub(crate) mod extensions {
    use super::*;

    pub fn deserialize<'de, D>(
        deserializer: D,
    ) -> Result<IndexMap<String, ExtensionValue>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut map = IndexMap::<String, ExtensionValue>::deserialize(deserializer)?;

        // Keep only x- fields
        map.retain(|k, _| k.starts_with(EXTENSION_PREFIX));

        Ok(map)
    }
}

/// Maps a path item key onto the HTTP method it declares, if any.
pub(crate) fn method_from_key(key: &str) -> Option<Method> {
    match key {
        "get" => Some(Method::GET),
        "put" => Some(Method::PUT),
        "post" => Some(Method::POST),
        "delete" => Some(Method::DELETE),
        "options" => Some(Method::OPTIONS),
        "head" => Some(Method::HEAD),
        "patch" => Some(Method::PATCH),
        "trace" => Some(Method::TRACE),
        _ => None,
    }
}

/// Label an operation prints under, e.g. `Get` for `Method::GET`.
pub(crate) fn method_label(method: &Method) -> &str {
    match *method {
        Method::GET => "Get",
        Method::PUT => "Put",
        Method::POST => "Post",
        Method::DELETE => "Delete",
        Method::OPTIONS => "Options",
        Method::HEAD => "Head",
        Method::PATCH => "Patch",
        Method::TRACE => "Trace",
        _ => method.as_str(),
    }
}
