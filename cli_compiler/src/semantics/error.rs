//! Errors raised while building the semantic graph

use super::ids::{ClassId, Nameable};
use crate::logging::{codes, Code};
use thiserror::Error;

pub type SemanticResult<T> = Result<T, SemanticError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticError {
    /// A nameable node can be the target of exactly one naming edge
    #[error("{target} already has a naming edge")]
    NameAlreadyAssigned { target: Nameable },

    #[error("abstract specifier of {class} already set")]
    AbstractAlreadySet { class: ClassId },

    #[error("unable to resolve base class '{name}'")]
    UnresolvedBase { name: String },
}

impl SemanticError {
    pub fn unresolved_base(name: &str) -> Self {
        Self::UnresolvedBase {
            name: name.to_string(),
        }
    }

    pub fn error_code(&self) -> Code {
        match self {
            SemanticError::NameAlreadyAssigned { .. } => codes::semantic::NAME_ALREADY_ASSIGNED,
            SemanticError::AbstractAlreadySet { .. } => codes::semantic::ABSTRACT_ALREADY_SET,
            SemanticError::UnresolvedBase { .. } => codes::semantic::UNRESOLVED_BASE,
        }
    }

    /// Graph-consistency violations indicate a compiler bug, not bad input
    pub fn is_internal(&self) -> bool {
        !matches!(self, SemanticError::UnresolvedBase { .. })
    }
}
