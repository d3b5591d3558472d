use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum StorageError {
    #[error("local storage unavailable")]
    Unavailable,
    #[error("storage rejected write for key {key}")]
    WriteRejected { key: String },
}

#[derive(Debug, Error, PartialEq)]
pub enum DomError {
    #[error("window unavailable")]
    NoWindow,
    #[error("document unavailable")]
    NoDocument,
    #[error("document body missing")]
    NoBody,
    #[error("selector {selector} rejected")]
    Selector { selector: String },
    #[error("failed to attach {event} listener")]
    Listener { event: &'static str },
    #[error("intersection observer unavailable")]
    Observer,
}
