/// Error produced when resolving a type descriptor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    /// The catalog has no type of that name, or it has another kind.
    #[error("Type \"{name}\" does not exist or is not {kind}")]
    Unknown { kind: &'static str, name: String },
}
