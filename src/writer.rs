use crate::types::{MarkmapOptions, OutlineOptions};
use crate::{FRONT_MATTER_DELIMITER, FRONT_MATTER_KEY, LINE_FEED};
use std::io::Write;

/// Line-oriented sink for outline text.
///
/// Every line ends with `\n` regardless of platform: markmap-cli turns the
/// front-matter block into a node of its own when it is `\r\n` terminated.
pub struct OutlineWriter<W: Write> {
    inner: W,
}

impl<W: Write> OutlineWriter<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }

    pub fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }

    /// Writes `text` followed by a line feed.
    pub fn write_line(&mut self, text: &str) -> std::io::Result<()> {
        self.inner.write_all(text.as_bytes())?;
        self.inner.write_all(LINE_FEED.as_bytes())
    }

    /// Writes `- text` prefixed with `indent` spaces.
    pub fn write_list_item(&mut self, text: &str, indent: usize) -> std::io::Result<()> {
        self.write_line(&format!("{:indent$}- {}", "", text, indent = indent))
    }

    /// Writes `- **key**: value` prefixed with `indent` spaces.
    pub fn write_key_value(&mut self, key: &str, value: &str, indent: usize) -> std::io::Result<()> {
        self.write_list_item(&format!("**{}**: {}", key, value), indent)
    }

    /// Writes the markmap front-matter block followed by a blank line.
    ///
    /// Settings that would have no effect on the viewer are left out. `duration`
    /// is always written. Colors are written as a YAML sequence under `color:`
    /// (`    - "<color>"`), unlike the bare quoted lines of the older generator,
    /// which are not valid front-matter YAML.
    pub fn write_header(&mut self, options: &MarkmapOptions) -> std::io::Result<()> {
        self.write_line(FRONT_MATTER_DELIMITER)?;
        self.write_line(FRONT_MATTER_KEY)?;
        if options.color_freeze_level > 0 {
            self.write_line(&format!("  colorFreezeLevel: {}", options.color_freeze_level))?;
        }
        if options.initial_expand_level >= 0 {
            self.write_line(&format!(
                "  initialExpandLevel: {}",
                options.initial_expand_level
            ))?;
        }
        if !options.colors.is_empty() {
            self.write_line("  color:")?;
            for color in &options.colors {
                self.write_line(&format!("    - \"{}\"", color))?;
            }
        }
        self.write_line(&format!("  duration: {}", options.duration))?;
        if options.max_width > 0 {
            self.write_line(&format!("  maxWidth: {}", options.max_width))?;
        }
        if !options.zoom {
            self.write_line("  zoom: false")?;
        }
        if !options.pan {
            self.write_line("  pan: false")?;
        }
        self.write_line(FRONT_MATTER_DELIMITER)?;
        self.write_line("")
    }

    pub fn write_title(&mut self, title: &str, options: &OutlineOptions) -> std::io::Result<()> {
        if options.show_name_in_root {
            self.write_line(&format!("# {}", title))
        } else {
            self.write_line("#")?;
            self.write_list_item(&format!("**{}**", title), 0)
        }
    }
}
