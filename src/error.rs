//! Error types for the rain initializer.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RainError {
    #[error("no global window")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("rain container '#{id}' not found")]
    MissingContainer { id: String },

    #[error("rain container '#{id}' is not an HTML element")]
    NotHtmlElement { id: String },

    #[error("invalid rain config: {0}")]
    InvalidConfig(String),

    #[error("could not parse rain config: {0}")]
    ConfigParse(String),

    #[error("dom error: {0}")]
    Dom(String),
}

impl From<JsValue> for RainError {
    fn from(value: JsValue) -> Self {
        RainError::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<RainError> for JsValue {
    fn from(err: RainError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
