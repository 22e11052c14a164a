use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Request to the catalog failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unable to decode catalog response: {0}")]
    Decode(#[from] DecodeError),
}

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Response body is not valid UTF-8")]
    Utf8(#[from] std::str::Utf8Error),

    #[error("Malformed XML: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("Expected root element 'searchResponse', found '{0}'")]
    UnexpectedRoot(String),

    #[error("Invalid number in '{element}': {value:?}")]
    InvalidNumber { element: &'static str, value: String },
}
