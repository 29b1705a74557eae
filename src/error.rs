//! Error type for the mount / configure paths. Gameplay and drawing never fail
//! observably; only wiring a widget into the page can.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("no window")]
    NoWindow,
    #[error("no document")]
    NoDocument,
    #[error("no element with id '{0}'")]
    MissingElement(String),
    #[error("element '{0}' is not a canvas")]
    NotACanvas(String),
    #[error("canvas '{0}' has no 2d context")]
    NoContext(String),
    #[error("{0} is not mounted")]
    NotMounted(&'static str),
    #[error("skill '{name}' has level {level}, expected 0..=100")]
    InvalidSkill { name: String, level: u8 },
    #[error("invalid game rules: {0}")]
    InvalidRules(&'static str),
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for WidgetError {
    fn from(value: JsValue) -> Self {
        WidgetError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<WidgetError> for JsValue {
    fn from(err: WidgetError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

pub type Result<T, E = WidgetError> = std::result::Result<T, E>;
