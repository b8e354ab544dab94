use std::backtrace::Backtrace;

use crate::solver::csp::VariableId;

pub type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    /// A variable was declared without a corresponding domain entry.
    #[error("variable ?{0} has no domain")]
    MissingDomain(VariableId),
    /// A constraint referenced a variable outside the instance.
    #[error("constraint `{name}` references unknown variable ?{variable}")]
    UnknownVariable { name: String, variable: VariableId },
    /// The search used up its decision budget before reaching an answer.
    #[error("search budget of {0} decisions exhausted")]
    BudgetExhausted(u64),
    /// The cancellation token was tripped while the search was running.
    #[error("search cancelled")]
    Cancelled,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Inner: {inner}\n{backtrace}")]
    Inner {
        inner: Box<SolverError>,
        backtrace: Box<Backtrace>,
    },
}

impl From<SolverError> for Error {
    fn from(inner: SolverError) -> Self {
        Error::Inner {
            inner: Box::new(inner),
            backtrace: Box::new(std::backtrace::Backtrace::capture()),
        }
    }
}
