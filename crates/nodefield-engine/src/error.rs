use std::fmt;

/// Errors reported by the animation engine to its host.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// The host signalled "surface ready" without a drawable surface.
    MissingSurface,
    /// A `FieldConfig` value is out of its usable range.
    InvalidConfig {
        field: &'static str,
        reason: &'static str,
    },
}

impl EngineError {
    pub(crate) fn invalid_config(field: &'static str, reason: &'static str) -> Self {
        Self::InvalidConfig { field, reason }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::MissingSurface => {
                write!(f, "no drawing surface available; animation loop not started")
            }
            EngineError::InvalidConfig { field, reason } => {
                write!(f, "invalid field config `{field}`: {reason}")
            }
        }
    }
}

impl std::error::Error for EngineError {}
