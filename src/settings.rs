use serde::Deserialize;

/// Resolved analysis settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct Settings {
    /// Number of distinct incoming states a block processes before further
    /// incoming states are widened (literal bindings collapse to unknowns).
    /// Widening loses precision at loop-affected points but bounds the state
    /// space.
    pub widen_after: usize,
    /// Hard cap on distinct incoming states per block. Exceeding it aborts
    /// the analysis of the current function body with an internal error.
    pub max_block_visits: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self { widen_after: 8, max_block_visits: 64 }
    }
}

impl Settings {
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }
}
