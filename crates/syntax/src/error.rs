use std::fmt;

/// An error raised while reading JSONH, tagged with the character offset
/// (from the start of input) at which it was detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonhError {
    pub message: String,
    pub position: usize,
}

impl JsonhError {
    pub fn new(message: impl Into<String>, position: usize) -> Self {
        Self { message: message.into(), position }
    }
}

impl fmt::Display for JsonhError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at character {})", self.message, self.position)
    }
}

impl std::error::Error for JsonhError {}

pub type JsonhResult<T> = Result<T, JsonhError>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_includes_message_and_position() {
        let err = JsonhError::new("unterminated string", 12);
        assert_eq!(err.to_string(), "unterminated string (at character 12)");
    }
}
