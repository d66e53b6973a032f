use std::fmt;

/// Errors raised while building or registering templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// A template atom has no 2D coordinates.
    MissingCoordinates { template: Option<String>, atom: usize },
    /// An element symbol in a template record is not recognised.
    UnknownElement { symbol: String },
    /// A bond refers to an atom index past the end of the atom list.
    BondOutOfRange { bond: usize, atom: usize },
    /// A bond order outside 0..=4.
    InvalidBondOrder { bond: usize, order: u8 },
    /// The template resource is not valid JSON, or not a list of records.
    Json(String),
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCoordinates { template, atom } => match template {
                Some(name) => write!(f, "template '{}': atom {} has no 2D coordinates", name, atom),
                None => write!(f, "template atom {} has no 2D coordinates", atom),
            },
            Self::UnknownElement { symbol } => write!(f, "unknown element '{}'", symbol),
            Self::BondOutOfRange { bond, atom } => {
                write!(f, "bond {} refers to missing atom {}", bond, atom)
            }
            Self::InvalidBondOrder { bond, order } => {
                write!(f, "bond {} has invalid order {}", bond, order)
            }
            Self::Json(msg) => write!(f, "invalid template resource: {}", msg),
        }
    }
}

impl std::error::Error for TemplateError {}

impl From<serde_json::Error> for TemplateError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e.to_string())
    }
}
