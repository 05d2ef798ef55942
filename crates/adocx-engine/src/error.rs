#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum TranscodeError {
    #[error("Failed to read markdown: {0}")]
    Read(#[source] std::io::Error),
    #[error("Failed to write asciidoc: {0}")]
    Write(#[source] std::io::Error),
}
