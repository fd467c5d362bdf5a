use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShowcaseError {
    #[error("wav encoding failed: {0}")]
    Wav(#[from] hound::Error),
    #[error("filter design failed: {0}")]
    Filter(String),
    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ShowcaseError>;

impl From<ShowcaseError> for wasm_bindgen::JsValue {
    fn from(err: ShowcaseError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
