//! Text downloads via the browser Fetch API.
//!
//! Both chart documents are requested at once and awaited together, so
//! the caller sees either both bodies or the first failure. All functions
//! require a browser environment (`wasm32-unknown-unknown` target).

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

/// Errors that can occur while fetching a document.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// A browser API call returned an error or a required object was missing.
    #[error("fetch API error: {0}")]
    JsError(String),

    /// The server answered with a non-success status.
    #[error("HTTP {status} while fetching {url}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The response body could not be read as text.
    #[error("response from {0} was not text")]
    NotText(String),
}

impl From<JsValue> for FetchError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// Fetch two documents concurrently and return both bodies as text.
///
/// Wraps `Promise.all` over two [`fetch()`][mdn] calls, then again over
/// the two body reads.
///
/// # Errors
///
/// Returns [`FetchError::JsError`] if the window is unavailable or a
/// request fails at the network level, [`FetchError::Status`] if either
/// response is not `ok`, and [`FetchError::NotText`] if a body is not a
/// string.
///
/// [mdn]: https://developer.mozilla.org/en-US/docs/Web/API/Window/fetch
#[allow(clippy::future_not_send)] // WASM is single-threaded; JsFuture is !Send
pub async fn fetch_pair(first: &str, second: &str) -> Result<(String, String), FetchError> {
    let window = web_sys::window().ok_or_else(|| FetchError::JsError("no global window".into()))?;

    let requests = js_sys::Array::of2(&window.fetch_with_str(first), &window.fetch_with_str(second));
    let responses = await_all(&requests).await?;

    let urls = [first, second];
    let bodies = js_sys::Array::new();
    for (i, url) in (0u32..).zip(urls) {
        let response = ok_response(responses.get(i), url)?;
        let text: JsValue = response.text()?.into();
        bodies.push(&text);
    }
    let texts = await_all(&bodies).await?;

    let [a, b] = [(0u32, first), (1, second)].map(|(i, url)| {
        texts
            .get(i)
            .as_string()
            .ok_or_else(|| FetchError::NotText(url.to_owned()))
    });
    Ok((a?, b?))
}

#[allow(clippy::future_not_send)]
async fn await_all(promises: &js_sys::Array) -> Result<js_sys::Array, FetchError> {
    JsFuture::from(js_sys::Promise::all(promises))
        .await?
        .dyn_into::<js_sys::Array>()
        .map_err(|_| FetchError::JsError("Promise.all did not resolve to an array".into()))
}

fn ok_response(value: JsValue, url: &str) -> Result<web_sys::Response, FetchError> {
    let response: web_sys::Response = value
        .dyn_into()
        .map_err(|_| FetchError::JsError(format!("fetch of {url} did not return a Response")))?;
    if !response.ok() {
        return Err(FetchError::Status {
            url: url.to_owned(),
            status: response.status(),
        });
    }
    Ok(response)
}
