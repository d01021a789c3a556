/// Which JSONH grammar revision to parse against.
///
/// The only behavioral difference is verbatim-string handling: under `V1`,
/// a leading `@` before a quoteless string is treated as an ordinary
/// quoteless character (so `@c\` reads as the key `@c\`); under `Current`,
/// `@` is always consumed separately as the verbatim-string sigil.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonhVersion {
    V1,
    #[default]
    Current,
}

/// Options controlling how a [`crate::Value`] is read from a JSONH string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsonhReaderOptions {
    /// Which grammar revision to parse against.
    pub version: JsonhVersion,
    /// If true, reject any non-whitespace, non-comment content remaining
    /// after the root element.
    pub parse_single_element: bool,
}

impl Default for JsonhReaderOptions {
    fn default() -> Self {
        Self { version: JsonhVersion::default(), parse_single_element: false }
    }
}
