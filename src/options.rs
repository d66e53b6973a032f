use serde::{Deserialize, Serialize};

/// Bond length used by depictions unless the caller picks another.
pub const DEFAULT_BOND_LENGTH: f64 = 1.5;

/// Settings shared by the template library and the atom placer.
///
/// # Examples
///
/// ```
/// use sdgcrab::LayoutOptions;
///
/// let options = LayoutOptions::default().with_bond_length(1.0);
/// assert_eq!(options.bond_length, 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// Target length of every placed bond; templates are rescaled to it.
    pub bond_length: f64,
}

impl LayoutOptions {
    pub fn with_bond_length(mut self, bond_length: f64) -> Self {
        self.bond_length = bond_length;
        self
    }
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            bond_length: DEFAULT_BOND_LENGTH,
        }
    }
}
