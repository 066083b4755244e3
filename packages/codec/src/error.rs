//! Error types for codec operations.

use crate::field::FieldKind;

/// Error raised by a codec's encode or decode hook.
pub type HookError = Box<dyn std::error::Error + Send + Sync>;

/// What went wrong with a single field.
#[derive(thiserror::Error, Debug)]
pub enum FieldFailure {
    #[error("couldn't find a suitable transformer for this field type")]
    MissingTransformer,

    #[error("missing codec key in data")]
    MissingKey,

    /// Nested codec fields are decoded through their default instance's
    /// adapter, so they need one.
    #[error("specify a default value (the nested codec's adapter cannot be deduced without one)")]
    MissingDefault,

    #[error(transparent)]
    Tree(#[from] pathtree_core::Error),

    #[error("{0}")]
    Transform(String),

    #[error(transparent)]
    Nested(#[from] Box<CodecError>),
}

/// A field failed to encode or decode.
#[derive(thiserror::Error, Debug)]
#[error("codec failed on field {field} with key '{key}' of type '{kind}': {cause}")]
pub struct FieldError {
    pub field: &'static str,
    pub key: &'static str,
    pub kind: FieldKind,
    #[source]
    pub cause: FieldFailure,
}

/// Why a codec-bearing object failed to encode or decode.
#[derive(thiserror::Error, Debug)]
pub enum CodecFailure {
    #[error(transparent)]
    Field(#[from] FieldError),

    #[error("{0}")]
    Hook(#[source] HookError),
}

/// An object failed to encode or decode.
///
/// The destination keeps whatever the fields processed before the failure
/// wrote to it.
#[derive(thiserror::Error, Debug)]
#[error("failed to perform codec operation on '{type_name}': {cause}")]
pub struct CodecError {
    pub type_name: &'static str,
    #[source]
    pub cause: CodecFailure,
}

impl CodecError {
    /// The failing field, if a field (rather than a hook) failed.
    pub fn field_error(&self) -> Option<&FieldError> {
        match &self.cause {
            CodecFailure::Field(error) => Some(error),
            CodecFailure::Hook(_) => None,
        }
    }

    /// The innermost field failure, following nested codec errors down.
    pub fn root_failure(&self) -> Option<&FieldFailure> {
        let mut failure = &self.field_error()?.cause;
        while let FieldFailure::Nested(inner) = failure {
            failure = &inner.field_error()?.cause;
        }
        Some(failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_error_names_field_key_and_type() {
        let error = FieldError {
            field: "health_points",
            key: "health-points",
            kind: FieldKind::Int,
            cause: FieldFailure::MissingKey,
        };
        assert_eq!(
            error.to_string(),
            "codec failed on field health_points with key 'health-points' of type 'int': \
             missing codec key in data"
        );
    }

    #[test]
    fn root_failure_follows_nested_errors() {
        let inner = CodecError {
            type_name: "Sound",
            cause: CodecFailure::Field(FieldError {
                field: "pitch",
                key: "pitch",
                kind: FieldKind::Float,
                cause: FieldFailure::MissingKey,
            }),
        };
        let outer = CodecError {
            type_name: "Block",
            cause: CodecFailure::Field(FieldError {
                field: "sound",
                key: "sound",
                kind: FieldKind::Nested,
                cause: FieldFailure::Nested(Box::new(inner)),
            }),
        };
        assert!(matches!(outer.root_failure(), Some(FieldFailure::MissingKey)));
        assert!(outer.to_string().contains("'Block'"));
    }

    #[test]
    fn hook_errors_have_no_field() {
        let error = CodecError {
            type_name: "Sound",
            cause: CodecFailure::Hook("invalid sound name: boom".into()),
        };
        assert!(error.field_error().is_none());
        assert!(error.to_string().ends_with("invalid sound name: boom"));
    }
}
