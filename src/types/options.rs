use serde::{Deserialize, Serialize};

/// Shape of the generated outline.
///
/// Defaults are tuned for endpoints. Use [`OutlineOptions::for_schema`] when a
/// standalone component schema is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OutlineOptions {
    /// How many nested schema levels are rendered before a node is dropped entirely.
    pub max_schema_depth: i32,
    /// Collections (enum literals, properties) larger than this are printed in groups.
    /// `0` always prints one item per line.
    pub max_single_items: i32,
    /// Number of items printed on one line once a collection is grouped.
    pub group_items_size: i32,
    /// Print the endpoint/schema name as the root heading instead of as the first item.
    pub show_name_in_root: bool,
}

impl OutlineOptions {
    pub const DEFAULT_MAX_SCHEMA_DEPTH: i32 = 3;
    pub const DEFAULT_MAX_SCHEMA_DEPTH_FOR_SCHEMA: i32 = 2;
    pub const DEFAULT_MAX_SINGLE_ITEMS: i32 = 10;
    pub const DEFAULT_MAX_SINGLE_ITEMS_FOR_SCHEMA: i32 = 0;
    pub const DEFAULT_GROUP_ITEMS_SIZE: i32 = 6;
    pub const DEFAULT_GROUP_ITEMS_SIZE_FOR_SCHEMA: i32 = 0;
    pub const DEFAULT_SHOW_NAME_IN_ROOT: bool = true;

    pub fn new(
        max_schema_depth: i32,
        max_single_items: i32,
        group_items_size: i32,
        show_name_in_root: bool,
    ) -> Self {
        Self {
            max_schema_depth,
            max_single_items,
            group_items_size,
            show_name_in_root,
        }
    }

    pub fn for_schema() -> Self {
        Self::new(
            Self::DEFAULT_MAX_SCHEMA_DEPTH_FOR_SCHEMA,
            Self::DEFAULT_MAX_SINGLE_ITEMS_FOR_SCHEMA,
            Self::DEFAULT_GROUP_ITEMS_SIZE_FOR_SCHEMA,
            Self::DEFAULT_SHOW_NAME_IN_ROOT,
        )
    }

    /// Whether a collection of `count` items is printed in comma-joined groups.
    pub(crate) fn groups(&self, count: usize) -> bool {
        self.max_single_items > 0 && count > self.max_single_items as usize
    }

    /// Chunk size used once grouping kicks in. Never zero.
    pub(crate) fn chunk_size(&self) -> usize {
        self.group_items_size.max(1) as usize
    }
}

impl Default for OutlineOptions {
    fn default() -> Self {
        Self::new(
            Self::DEFAULT_MAX_SCHEMA_DEPTH,
            Self::DEFAULT_MAX_SINGLE_ITEMS,
            Self::DEFAULT_GROUP_ITEMS_SIZE,
            Self::DEFAULT_SHOW_NAME_IN_ROOT,
        )
    }
}

/// Display hints written into the markmap front-matter block.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarkmapOptions {
    /// Freeze color at the specified level of branches. `0` disables freezing.
    pub color_freeze_level: i32,
    /// Maximum level of nodes expanded on initial render. `-1` expands everything.
    pub initial_expand_level: i32,
    /// Branch and circle colors. Empty means the viewer's own palette.
    #[serde(alias = "color")]
    pub colors: Vec<String>,
    /// Fold/unfold animation duration in milliseconds.
    pub duration: i32,
    /// Max width of each node's content. `0` for no limit.
    pub max_width: i32,
    pub zoom: bool,
    pub pan: bool,
}

impl MarkmapOptions {
    pub const DEFAULT_COLOR_FREEZE_LEVEL: i32 = 6;
    pub const DEFAULT_INITIAL_EXPAND_LEVEL: i32 = 5;
    pub const DEFAULT_DURATION: i32 = 500;
    pub const DEFAULT_MAX_WIDTH: i32 = 0;
    pub const DEFAULT_ZOOM: bool = true;
    pub const DEFAULT_PAN: bool = true;
}

impl Default for MarkmapOptions {
    fn default() -> Self {
        Self {
            color_freeze_level: Self::DEFAULT_COLOR_FREEZE_LEVEL,
            initial_expand_level: Self::DEFAULT_INITIAL_EXPAND_LEVEL,
            colors: Vec::new(),
            duration: Self::DEFAULT_DURATION,
            max_width: Self::DEFAULT_MAX_WIDTH,
            zoom: Self::DEFAULT_ZOOM,
            pan: Self::DEFAULT_PAN,
        }
    }
}
