#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ResolverError {
    #[error("parameter {name:?} not found; known parameters: {hint:?}")]
    ParameterNotFound { name: String, hint: Vec<String> },
    #[error("parameter name is ambiguous among: {0:?}")]
    Ambiguous(Vec<String>),
    #[error("discovery failed: {0}")]
    Discovery(String),
}
