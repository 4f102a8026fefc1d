use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: String },

    #[error("Invalid answer for {question}: {answer}")]
    InvalidAnswer { question: String, answer: String },

    #[error("Input closed before answering: {question}")]
    EndOfInput { question: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Bmpro(#[from] bmpro::Error),
}
