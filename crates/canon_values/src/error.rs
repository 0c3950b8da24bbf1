//! Error types for value construction, enumeration lookup, and configuration.

/// Error produced while constructing or reconstructing a value object.
///
/// Construction errors are never cached: a failed construction leaves the
/// owning repository untouched, so a later call with valid arguments
/// succeeds normally.
#[derive(Debug, thiserror::Error)]
pub enum ValueError {
    /// The type's constructor rejected the arguments.
    #[error("unable to instantiate value object of type {type_name}: {reason}")]
    Construction {
        type_name: &'static str,
        reason: String,
    },

    /// Wrong number of construction arguments.
    #[error(
        "unable to instantiate value object of type {type_name}; \
         {expected} parameters expected, {given} given"
    )]
    Arity {
        type_name: &'static str,
        expected: usize,
        given: usize,
    },

    /// A positional argument had the wrong runtime type.
    #[error("argument {index} of {type_name} must be {expected}, found {found}")]
    Argument {
        type_name: &'static str,
        index: usize,
        expected: &'static str,
        found: &'static str,
    },

    /// Object and resource references only have process-local identity.
    #[error("{type_name} holds an object or resource reference and cannot be serialized")]
    Opaque { type_name: &'static str },

    /// The serialized string names a different type.
    #[error(
        "invalid serialized value type (serialized type is {found}, expected type is {expected})"
    )]
    SerializedType {
        expected: &'static str,
        found: String,
    },

    /// The serialized payload is not a list of plain values.
    #[error("malformed serialized value: {reason}")]
    Malformed { reason: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ValueError {
    /// Shorthand for a [`ValueError::Construction`] failure.
    pub fn construction(type_name: &'static str, reason: impl Into<String>) -> Self {
        ValueError::Construction {
            type_name,
            reason: reason.into(),
        }
    }
}

/// Error produced by enumeration lookups and discovery.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnumError {
    /// Strict lookup of an id with no registered member.
    #[error("enum {enum_name} has no instance \"{id}\"")]
    NotFound { enum_name: &'static str, id: String },

    /// The enumeration's member set could not be populated.
    ///
    /// This indicates a structurally malformed enumeration. The registry is
    /// left uninitialized, so the next access runs discovery again.
    #[error("unable to initialize instances of enum {enum_name}: {reason}")]
    Discovery {
        enum_name: &'static str,
        reason: String,
    },
}

/// Error when parsing a retention policy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown retention policy `{0}` (expected `weak` or `strong`)")]
pub struct ParseRetentionError(pub String);
