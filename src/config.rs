//! Pipeline settings.

/// Settings for [`crate::parse_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    /// Reject concrete syntax trees nested deeper than this before any AST
    /// node is built. `None` disables the check.
    pub max_depth: Option<usize>,
    /// Name shown for the source in diagnostics.
    pub source_name: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: None,
            source_name: "input.sol".to_string(),
        }
    }
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn with_source_name(mut self, name: impl Into<String>) -> Self {
        self.source_name = name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_no_limit() {
        let config = ParserConfig::default();
        assert_eq!(config.max_depth, None);
        assert_eq!(config.source_name, "input.sol");
    }

    #[test]
    fn builder_methods_chain() {
        let config = ParserConfig::new()
            .with_max_depth(32)
            .with_source_name("Token.sol");
        assert_eq!(config.max_depth, Some(32));
        assert_eq!(config.source_name, "Token.sol");
    }
}
