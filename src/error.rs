use thiserror::Error;

/// The result type returned by the operations of the library.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The errors raised while building a framework or solving it.
///
/// All of them are raised synchronously by the operation that detects them.
/// They indicate a misuse of the API (wrong call order, wrong identifiers) or a failure of the SAT engine;
/// none of them is retried internally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An argument with this label is already defined.
    #[error("argument {0} is already defined")]
    DuplicateArgument(String),

    /// The attack is already defined.
    #[error("attack from {0} to {1} is already defined")]
    DuplicateAttack(String, String),

    /// An attack refers to an argument that is not defined.
    #[error("no such argument: {0}")]
    UnknownArgument(String),

    /// A flag or batch operation refers to an element the solver session has never seen.
    #[error("unknown element: {0}")]
    UnknownElement(String),

    /// A batch was applied twice for the same element, with different contents.
    #[error("conflicting batch for {0}")]
    BatchConflict(String),

    /// An attack was activated while one of its endpoints is not active.
    #[error("argument {0} is not active")]
    InactiveArgument(String),

    /// A label cannot be used to name an argument.
    #[error(r#"invalid argument label "{0}""#)]
    InvalidLabel(String),

    /// A batch contains a rule the session cannot ground.
    #[error("malformed batch for {element}: {reason}")]
    MalformedBatch {
        /// the element the batch describes
        element: String,
        /// what is wrong with the batch
        reason: String,
    },

    /// The deadline given to the enumeration of extensions has been reached.
    #[error("solving timed out after {0} extension(s)")]
    SolveTimeout(usize),

    /// The SAT engine gave no answer.
    #[error("the SAT solver returned an unknown status")]
    EngineFailure,
}
