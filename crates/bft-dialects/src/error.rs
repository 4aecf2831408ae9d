//! Error types for bft-dialects

use thiserror::Error;

/// The result type for catalog and resolution operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the catalog model and the resolver.
///
/// None of these describe a dialect that merely lacks support for a case.
/// That outcome is an ordinary [`SqlMapping`](crate::SqlMapping) with
/// `should_pass == false`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// No dialect registered under this name
    #[error("Unknown dialect: {0}")]
    UnknownDialect(String),

    /// Type name missing from the shorthand registry
    #[error("Unknown type name: {0}")]
    UnknownType(String),

    /// The catalog declares no kernel whose arity could ever match the case.
    ///
    /// The case definitions and the dialect catalog disagree about how many
    /// arguments the function takes.
    #[error("Catalog integrity violation: {dialect} has no {function} kernel of arity {arity}")]
    KernelArity {
        dialect: String,
        function: String,
        arity: usize,
    },

    /// A catalog entry failed construction-time validation
    #[error("Invalid catalog entry {function}: {message}")]
    InvalidCatalog { function: String, message: String },
}

impl Error {
    /// Create an unknown dialect error
    pub fn unknown_dialect(name: impl Into<String>) -> Self {
        Error::UnknownDialect(name.into())
    }

    /// Create an unknown type error
    pub fn unknown_type(name: impl Into<String>) -> Self {
        Error::UnknownType(name.into())
    }

    /// Create a kernel arity integrity error
    pub fn kernel_arity(
        dialect: impl Into<String>,
        function: impl Into<String>,
        arity: usize,
    ) -> Self {
        Error::KernelArity {
            dialect: dialect.into(),
            function: function.into(),
            arity,
        }
    }

    /// Create an invalid catalog entry error
    pub fn invalid_catalog(function: impl Into<String>, message: impl Into<String>) -> Self {
        Error::InvalidCatalog {
            function: function.into(),
            message: message.into(),
        }
    }

    /// Whether this error signals contradictory case/catalog definitions
    /// rather than a lookup miss.
    pub fn is_integrity_violation(&self) -> bool {
        matches!(self, Error::KernelArity { .. } | Error::InvalidCatalog { .. })
    }
}
