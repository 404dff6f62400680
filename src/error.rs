use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

/// Errors raised while wiring behaviors to the page or mutating the DOM.
#[derive(Error, Debug)]
pub enum PageError {
    #[error("no global window")]
    NoWindow,

    #[error("window has no document")]
    NoDocument,

    #[error("element matched by `{0}` is not an HTML element")]
    NotHtml(&'static str),

    #[error("JavaScript error: {0}")]
    JavaScript(String),

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("invalid config value for `{field}`: {reason}")]
    ConfigValue {
        field: &'static str,
        reason: &'static str,
    },
}

impl From<JsValue> for PageError {
    fn from(js_val: JsValue) -> Self {
        let message = js_val
            .as_string()
            .or_else(|| {
                js_val
                    .dyn_ref::<js_sys::Error>()
                    .map(|err| String::from(err.message()))
            })
            .unwrap_or_else(|| format!("{:?}", js_val));
        PageError::JavaScript(message)
    }
}

/// Why an email address was refused; `Display` is the text shown under the field.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter your email address")]
    Empty,

    #[error("Please enter a valid email address")]
    Malformed,
}

/// Failure reported by a [`Submitter`](crate::behaviors::submission::Submitter).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("submission rejected: {0}")]
    Rejected(String),

    #[error("submission was dropped before completing")]
    Dropped,
}
