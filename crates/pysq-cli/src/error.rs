use miette::{Diagnostic, NamedSource, SourceSpan};
use pysq_compiler::CompileError;
use thiserror::Error;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the `pysq` subcommands
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    #[error("failed to read {path}: {message}")]
    #[diagnostic(code(pysq::read))]
    Read { path: String, message: String },

    #[error("failed to write {path}: {message}")]
    #[diagnostic(code(pysq::write))]
    Write { path: String, message: String },

    #[error("{message}")]
    #[diagnostic(code(pysq::compile))]
    Compile {
        message: String,
        #[label("here")]
        span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("invalid table configuration: {message}")]
    #[diagnostic(code(pysq::config))]
    Config { message: String },
}

impl Error {
    /// Attach the source text to a front-end error so the report can label it
    pub fn compile(path: &str, source: &str, err: &CompileError) -> Self {
        let span = err.span();
        Error::Compile {
            message: format!("{}: {}", span, err.message()),
            span: (span.offset, span.len).into(),
            src: NamedSource::new(path, source.to_string()),
        }
    }
}
