use thiserror::Error;

#[derive(Error, Debug)]
pub enum LandingError {
    #[error("Local storage is not available")]
    StorageUnavailable,

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Missing element: {0}")]
    MissingElement(String),

    #[error("JavaScript error: {0}")]
    Js(String),

    #[error("Config parsing error: {0}")]
    Config(#[from] serde_json::Error),
}

impl From<wasm_bindgen::JsValue> for LandingError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        LandingError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

pub type LandingResult<T> = Result<T, LandingError>;
