use std::sync::atomic::{AtomicBool, Ordering};

use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder};
use serde_json::{Value, json};

use crate::config::BrowserSettings;
use crate::error::InspectError;
use crate::inspector::Rect;

/// Key under which W3C drivers return element references.
pub const ELEMENT_KEY: &str = "element-6066-11e4-a52a-4f8d5a8d5e2b";

/// A live WebDriver session. Dropping it ends the session if `quit` was
/// never called.
#[derive(Debug)]
pub struct WebDriver {
    http: Client,
    base: String,
    session_id: String,
    closed: AtomicBool,
}

impl WebDriver {
    /// Open a new Firefox session on the driver at `settings.webdriver_url`.
    pub fn connect(settings: &BrowserSettings) -> Result<Self, InspectError> {
        let http = Client::builder()
            .timeout(settings.request_timeout())
            .build()?;
        let base = settings.webdriver_url.trim_end_matches('/').to_string();

        let body = new_session_body(settings.headless);
        let value = send(http.post(format!("{base}/session")).json(&body))?;
        let session_id = value
            .get("sessionId")
            .and_then(Value::as_str)
            .ok_or_else(|| InspectError::Protocol(format!("no sessionId in {value}")))?
            .to_string();

        tracing::info!(session = %session_id, driver = %base, "webdriver session opened");
        Ok(Self {
            http,
            base,
            session_id,
            closed: AtomicBool::new(false),
        })
    }

    /// A handle on an existing session id, without contacting the driver.
    #[cfg(test)]
    pub(crate) fn attach(base: &str, session_id: &str) -> Self {
        Self {
            http: Client::new(),
            base: base.trim_end_matches('/').to_string(),
            session_id: session_id.to_string(),
            closed: AtomicBool::new(false),
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/session/{}/{}", self.base, self.session_id, path)
    }

    pub fn navigate(&self, url: &str) -> Result<(), InspectError> {
        send(self.http.post(self.url("url")).json(&json!({ "url": url })))?;
        Ok(())
    }

    /// First element matching `css`.
    pub fn find(&self, css: &str) -> Result<String, InspectError> {
        let body = json!({ "using": "css selector", "value": css });
        match send(self.http.post(self.url("element")).json(&body)) {
            Ok(value) => element_id(&value),
            Err(InspectError::Driver { error, .. }) if error == "no such element" => {
                Err(InspectError::NoSuchElement(css.to_string()))
            }
            Err(e) => Err(e),
        }
    }

    /// Every element matching `css`, in document order.
    pub fn find_all(&self, css: &str) -> Result<Vec<String>, InspectError> {
        let body = json!({ "using": "css selector", "value": css });
        let value = send(self.http.post(self.url("elements")).json(&body))?;
        value
            .as_array()
            .ok_or_else(|| InspectError::Protocol(format!("expected element list, got {value}")))?
            .iter()
            .map(element_id)
            .collect()
    }

    pub fn text(&self, element: &str) -> Result<String, InspectError> {
        let value = send(self.http.get(self.url(&format!("element/{element}/text"))))?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    pub fn attribute(&self, element: &str, name: &str) -> Result<Option<String>, InspectError> {
        let value = send(
            self.http
                .get(self.url(&format!("element/{element}/attribute/{name}"))),
        )?;
        Ok(value.as_str().map(str::to_string))
    }

    pub fn rect(&self, element: &str) -> Result<Rect, InspectError> {
        let value = send(self.http.get(self.url(&format!("element/{element}/rect"))))?;
        parse_rect(&value)
    }

    pub fn click(&self, element: &str) -> Result<(), InspectError> {
        send(
            self.http
                .post(self.url(&format!("element/{element}/click")))
                .json(&json!({})),
        )?;
        Ok(())
    }

    /// End the session; the driver closes the browser. Only the first call
    /// reaches the driver, whether or not it succeeds.
    pub fn quit(&self) -> Result<(), InspectError> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        send(
            self.http
                .delete(format!("{}/session/{}", self.base, self.session_id)),
        )?;
        tracing::info!(session = %self.session_id, "webdriver session closed");
        Ok(())
    }
}

impl Drop for WebDriver {
    fn drop(&mut self) {
        if self.is_closed() {
            return;
        }
        if let Err(e) = self.quit() {
            tracing::warn!(error = %e, session = %self.session_id, "could not end webdriver session");
        }
    }
}

/// Capabilities for a (possibly headless) Firefox session.
pub fn new_session_body(headless: bool) -> Value {
    let args: Vec<&str> = if headless { vec!["-headless"] } else { Vec::new() };
    json!({
        "capabilities": {
            "alwaysMatch": {
                "browserName": "firefox",
                "moz:firefoxOptions": { "args": args }
            }
        }
    })
}

fn send(request: RequestBuilder) -> Result<Value, InspectError> {
    let response = request.send()?;
    let status = response.status();
    let body: Value = response.json()?;
    unwrap_value(status, body)
}

/// Extract the `value` member of a driver response, turning W3C error
/// objects into `InspectError::Driver`.
pub fn unwrap_value(status: StatusCode, body: Value) -> Result<Value, InspectError> {
    let Value::Object(mut map) = body else {
        return Err(InspectError::Protocol(format!("non-object response ({status})")));
    };
    let value = map.remove("value").unwrap_or(Value::Null);

    if let Some(error) = value.get("error").and_then(Value::as_str) {
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        return Err(InspectError::Driver {
            error: error.to_string(),
            message,
        });
    }

    if !status.is_success() {
        return Err(InspectError::Protocol(format!("HTTP {status} without error body")));
    }
    Ok(value)
}

/// Element reference from a `{ "<ELEMENT_KEY>": "<id>" }` object.
pub fn element_id(value: &Value) -> Result<String, InspectError> {
    value
        .get(ELEMENT_KEY)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| InspectError::Protocol(format!("not an element reference: {value}")))
}

pub fn parse_rect(value: &Value) -> Result<Rect, InspectError> {
    let num = |key: &str| {
        value
            .get(key)
            .and_then(Value::as_f64)
            .ok_or_else(|| InspectError::Protocol(format!("rect without `{key}`: {value}")))
    };
    Ok(Rect {
        x: num("x")?,
        y: num("y")?,
        width: num("width")?,
        height: num("height")?,
    })
}
