use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("request failed: {0}")]
    Network(#[from] gloo_net::Error),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("could not decode response: {0}")]
    Decode(String),

    #[error("browser API error: {0}")]
    Dom(String),
}

impl From<JsValue> for SiteError {
    fn from(value: JsValue) -> Self {
        SiteError::Dom(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}
