use std::fmt;

/// A rejected [`PanConfig`](super::PanConfig) value.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigError {
    pub field: &'static str,
    pub value: f64,
    pub expected: &'static str,
}

impl ConfigError {
    pub(crate) fn new(field: &'static str, value: f64, expected: &'static str) -> Self {
        Self { field, value, expected }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid pan config: {} = {} (expected {})",
            self.field, self.value, self.expected
        )
    }
}

impl std::error::Error for ConfigError {}
