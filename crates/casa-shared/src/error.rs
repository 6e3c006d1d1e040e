use thiserror::Error;

#[derive(Error, Debug)]
pub enum SharedError {
    #[error("Sender id is reserved or empty: {0:?}")]
    ReservedSender(String),

    #[error("Invalid message id: {0}")]
    InvalidMessageId(#[from] uuid::Error),

    #[error("Scrambled payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Scrambled payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

#[derive(Error, Debug)]
pub enum SafetyError {
    #[error("Invalid rule pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Risk keyword must not be blank")]
    BlankKeyword,
}
