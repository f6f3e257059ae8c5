//! Errors raised while wiring the field into a page
//!
//! The simulation itself is total; only DOM setup and settings parsing fail.

use std::fmt::{self, Display};

#[derive(Debug, Clone, PartialEq)]
pub enum FieldError {
    /// No global `window` (not running in a browser main thread)
    NoWindow,
    /// `window.document` is missing
    NoDocument,
    /// The container element could not be found
    ContainerMissing(String),
    /// The canvas refused to hand out a 2D context
    ContextUnavailable,
    /// Any other DOM call that threw
    Dom(String),
    /// Settings failed to parse or validate
    InvalidSettings(String),
}

impl Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::NoWindow => write!(f, "no global window"),
            FieldError::NoDocument => write!(f, "window has no document"),
            FieldError::ContainerMissing(id) => write!(f, "container #{id} not found"),
            FieldError::ContextUnavailable => write!(f, "2d canvas context unavailable"),
            FieldError::Dom(s) => write!(f, "DOM error: {s}"),
            FieldError::InvalidSettings(s) => write!(f, "invalid settings: {s}"),
        }
    }
}

impl std::error::Error for FieldError {}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for FieldError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        FieldError::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<FieldError> for wasm_bindgen::JsValue {
    fn from(err: FieldError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}
