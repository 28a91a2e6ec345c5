//! Form-specific error types.

/// Errors that can occur while building a form from its definition.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// Definition contains no items at all
    #[error("Form definition has no fields")]
    EmptyDefinition,

    /// Two fields share the same key
    #[error("Duplicate field key: {key}")]
    DuplicateField { key: String },

    /// A validation pattern failed to compile
    #[error("Invalid pattern for field {key}: {source}")]
    InvalidPattern {
        key: String,
        #[source]
        source: regex::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_error_display() {
        let error = FormError::EmptyDefinition;
        assert!(error.to_string().contains("no fields"));

        let error = FormError::DuplicateField {
            key: "email".to_string(),
        };
        assert!(error.to_string().contains("email"));
    }

    #[test]
    fn test_invalid_pattern_keeps_source() {
        let source = regex::Regex::new("(").unwrap_err();
        let error = FormError::InvalidPattern {
            key: "first_name".to_string(),
            source,
        };
        assert!(error.to_string().contains("first_name"));
        assert!(std::error::Error::source(&error).is_some());
    }
}
