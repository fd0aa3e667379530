//! Options for writing manifests.

/// Default indentation width in spaces.
pub const DEFAULT_INDENT: usize = 4;

/// Controls the layout of written manifests.
///
/// # Example
///
/// ```rust
/// use qrcedit::EncodeOptions;
///
/// let compact = EncodeOptions::new().indent(0).xml_declaration(false);
/// assert_eq!(compact.indent, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Spaces per nesting level; 0 writes everything on one line.
    pub indent: usize,
    /// Whether to start with `<?xml version="1.0" encoding="UTF-8"?>`.
    pub xml_declaration: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT,
            xml_declaration: true,
        }
    }
}

impl EncodeOptions {
    /// Creates options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indentation width.
    pub fn indent(mut self, spaces: usize) -> Self {
        self.indent = spaces;
        self
    }

    /// Enables or disables the XML declaration.
    pub fn xml_declaration(mut self, enabled: bool) -> Self {
        self.xml_declaration = enabled;
        self
    }
}
