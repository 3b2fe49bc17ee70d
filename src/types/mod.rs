pub mod extension;
pub mod options;

pub use extension::{ExtensionKind, ExtensionValue};
pub use options::{MarkmapOptions, OutlineOptions};
