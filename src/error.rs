use std::fmt::{Display, Formatter};

/// The part of the document a lookup or conversion failed in.
#[derive(Debug, Clone, PartialEq)]
pub enum Section {
    Paths,
    Components(ComponentSection),
    Other,
}

impl Display for Section {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Section::Paths => write!(f, "paths"),
            Section::Components(component) => write!(f, "components --> {}", component),
            Section::Other => write!(f, "other"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ComponentSection {
    Schemas,
}

impl Display for ComponentSection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ComponentSection::Schemas => write!(f, "schemas"),
        }
    }
}

#[derive(Debug)]
pub enum RenderError {
    /// The output sink failed. Rendering is aborted.
    Io(std::io::Error),
    /// A path or schema name does not resolve in the document.
    NotFound(String, Section),
    /// A search pattern is not a valid regular expression.
    InvalidPattern(String, String),
    /// A document value could not be converted into the typed model.
    UnableToParse(String, Section),
    /// A batch was cancelled between two items.
    Cancelled,
}

impl RenderError {
    pub(crate) fn not_found<T>(name: &T, section: Section) -> Self
    where
        T: ToString + ?Sized,
    {
        RenderError::NotFound(name.to_string(), section)
    }

    pub(crate) fn invalid_pattern<T>(pattern: &T, regex_error: regex::Error) -> Self
    where
        T: ToString + ?Sized,
    {
        RenderError::InvalidPattern(pattern.to_string(), regex_error.to_string())
    }

    pub(crate) fn unable_to_parse(json_error: serde_json::Error, section: Section) -> Self {
        RenderError::UnableToParse(json_error.to_string(), section)
    }
}

impl Display for RenderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::Io(io_error) => write!(f, "Writing outline failed: {}", io_error),
            RenderError::NotFound(name, section) => {
                write!(f, "'{}' was not found in {}", name, section)
            }
            RenderError::InvalidPattern(pattern, msg) => {
                write!(f, "Invalid pattern '{}': {}", pattern, msg)
            }
            RenderError::UnableToParse(msg, section) => {
                write!(f, "Unable to parse {} in {}", msg, section)
            }
            RenderError::Cancelled => write!(f, "Rendering was cancelled"),
        }
    }
}

impl PartialEq for RenderError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (RenderError::Io(_), RenderError::Io(_)) => true,
            (RenderError::NotFound(a, x), RenderError::NotFound(b, y)) => a == b && x == y,
            (RenderError::InvalidPattern(a, _), RenderError::InvalidPattern(b, _)) => a == b,
            (RenderError::UnableToParse(_, x), RenderError::UnableToParse(_, y)) => x == y,
            (RenderError::Cancelled, RenderError::Cancelled) => true,
            (_, _) => false,
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Io(io_error) => Some(io_error),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RenderError {
    fn from(value: std::io::Error) -> Self {
        RenderError::Io(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = RenderError::not_found(
            "Widget",
            Section::Components(ComponentSection::Schemas),
        );
        assert_eq!(
            err.to_string(),
            "'Widget' was not found in components --> schemas"
        );
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed");
        let err: RenderError = io.into();
        assert!(matches!(err, RenderError::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
