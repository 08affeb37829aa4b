//! Construction-time validation shared by items and groups.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation failures for record construction and updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Unique identifier is empty after trim.
    BlankId,
    /// Display spans must be at least one cell.
    ZeroSpan { col_span: u32, row_span: u32 },
    /// Top-items window must hold at least one element.
    InvalidCapacity(usize),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankId => write!(f, "unique id must not be blank"),
            Self::ZeroSpan { col_span, row_span } => write!(
                f,
                "display span must be positive, got {col_span}x{row_span}"
            ),
            Self::InvalidCapacity(value) => {
                write!(f, "top items capacity must be >= 1, got {value}")
            }
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn normalize_id(value: String) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::BlankId);
    }
    if trimmed.len() == value.len() {
        Ok(value)
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{normalize_id, ValidationError};

    #[test]
    fn normalize_id_trims_and_rejects_blank() {
        assert_eq!(normalize_id(" Group-1 ".to_string()), Ok("Group-1".to_string()));
        assert_eq!(normalize_id("   ".to_string()), Err(ValidationError::BlankId));
    }
}
