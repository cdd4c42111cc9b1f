//! Error types for templatify.
//!
//! Uses thiserror for derive macros. Definition-time failures
//! (`Configuration`, `TemplateSyntax`, `TemplateValidation`) are only ever
//! produced while decorating; call-time failures are `Argument` and `Render`.

use crate::exit_codes;
use thiserror::Error;

/// Main error type for templatify operations.
#[derive(Error, Debug)]
pub enum TemplatifyError {
    /// The definition cannot be turned into a template function
    /// (missing docstring, malformed signature, bad definitions file).
    #[error("{0}")]
    Configuration(String),

    /// The normalized docstring is not valid template syntax.
    #[error("template for '{function}' has invalid syntax: {source}")]
    TemplateSyntax {
        function: String,
        #[source]
        source: minijinja::Error,
    },

    /// The template references names that are not parameters of the function.
    #[error(
        "template depends on {}, but '{function}' does not have a parameter with that name",
        describe_variables(.variables)
    )]
    TemplateValidation {
        function: String,
        variables: Vec<String>,
    },

    /// A call did not match the preserved signature.
    #[error("{0}")]
    Argument(String),

    /// The engine failed while rendering.
    #[error("failed to render '{function}': {source}")]
    Render {
        function: String,
        #[source]
        source: minijinja::Error,
    },

    /// A file could not be read.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

fn describe_variables(variables: &[String]) -> String {
    let quoted: Vec<String> = variables.iter().map(|v| format!("'{}'", v)).collect();
    match quoted.len() {
        1 => format!("variable {}", quoted[0]),
        _ => format!("variables {}", quoted.join(", ")),
    }
}

impl TemplatifyError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            TemplatifyError::Configuration(_)
            | TemplatifyError::TemplateSyntax { .. }
            | TemplatifyError::TemplateValidation { .. } => exit_codes::DEFINITION_ERROR,
            TemplatifyError::Argument(_) | TemplatifyError::Io { .. } => exit_codes::USER_ERROR,
            TemplatifyError::Render { .. } => exit_codes::RENDER_FAILURE,
        }
    }

    /// Whether this error can only be produced at decoration time.
    pub fn is_definition_error(&self) -> bool {
        self.exit_code() == exit_codes::DEFINITION_ERROR
    }
}

/// Result type alias for templatify operations.
pub type Result<T> = std::result::Result<T, TemplatifyError>;

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::ErrorKind;

    #[test]
    fn configuration_error_has_definition_exit_code() {
        let err = TemplatifyError::Configuration("no docstring".to_string());
        assert_eq!(err.exit_code(), exit_codes::DEFINITION_ERROR);
        assert!(err.is_definition_error());
    }

    #[test]
    fn argument_error_has_user_exit_code() {
        let err = TemplatifyError::Argument("missing argument".to_string());
        assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
        assert!(!err.is_definition_error());
    }

    #[test]
    fn render_error_has_render_exit_code() {
        let err = TemplatifyError::Render {
            function: "greet".to_string(),
            source: minijinja::Error::new(ErrorKind::UndefinedError, "boom"),
        };
        assert_eq!(err.exit_code(), exit_codes::RENDER_FAILURE);
    }

    #[test]
    fn validation_error_names_single_variable() {
        let err = TemplatifyError::TemplateValidation {
            function: "greet_user".to_string(),
            variables: vec!["ageeee".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "template depends on variable 'ageeee', but 'greet_user' does not have a parameter with that name"
        );
    }

    #[test]
    fn validation_error_names_all_variables() {
        let err = TemplatifyError::TemplateValidation {
            function: "f".to_string(),
            variables: vec!["a".to_string(), "b".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "template depends on variables 'a', 'b', but 'f' does not have a parameter with that name"
        );
    }
}
