use thiserror::Error;

pub type Result<T> = std::result::Result<T, VkbError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VkbError {
    /// An edit was dispatched while the selection addressed a slot that
    /// carries no character (Cancel, OK, or past the grid).
    #[error("selection {index} does not address a key")]
    InvalidSelection { index: usize },

    #[error("invalid key layout: {reason}")]
    InvalidLayout { reason: String },

    #[error("unknown action: {name}")]
    UnknownAction { name: String },
}

impl VkbError {
    #[must_use]
    pub fn layout(reason: impl Into<String>) -> Self {
        Self::InvalidLayout {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::VkbError;

    #[test]
    fn layout_constructor_preserves_reason() {
        let error = VkbError::layout("rows must be non-zero");
        assert_eq!(
            error.to_string(),
            "invalid key layout: rows must be non-zero"
        );
    }

    #[test]
    fn invalid_selection_names_the_index() {
        let error = VkbError::InvalidSelection { index: 53 };
        assert_eq!(error.to_string(), "selection 53 does not address a key");
    }
}
