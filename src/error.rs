use thiserror::Error;

/// Errors raised by the question-answering core.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChatbotError {
    #[error("cannot train on an empty knowledge base")]
    EmptyCorpus,

    #[error("no stored vectors to rank against")]
    EmptyCandidates,

    #[error("malformed entry in category '{category}' at position {index}: {reason}")]
    MalformedEntry {
        category: String,
        index: usize,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, ChatbotError>;
