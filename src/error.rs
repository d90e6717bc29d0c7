use thiserror::Error;

/// Fatal conditions that abort a preprocessing run.
///
/// There is no recovery mode: the filter stops at the first error it hits,
/// and anything already written to the output stays written.
#[derive(Debug, Error)]
pub enum Error {
    /// An `@else` or `@endif` appeared with no `@ifdef` still open.
    #[error("line {line}: {directive} without matching @ifdef")]
    UnbalancedDirective { line: usize, directive: &'static str },

    /// A `@name@` reference named an identifier with no `-D` binding.
    #[error("line {line}: undefined variable {name}")]
    UndefinedVariable { line: usize, name: String },

    /// Input ended while one or more `@ifdef` regions were still open.
    /// Reports the innermost open region.
    #[error("unterminated @ifdef {name} opened at line {line}")]
    UnterminatedConditional { line: usize, name: String },

    /// Reading the input or writing the output failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
