use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::app::{Result, TributaryError};

/// Placeholder in a route template that receives the encoded feed URL.
pub const URL_PLACEHOLDER: &str = "{url}";

/// How the feed text is carried in a route's response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Envelope {
    /// A JSON object holding the feed text in a string field.
    Json { field: String },
    /// The body is the feed text.
    Raw,
}

/// One alternate transport path to a feed, usually a CORS-style proxy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub name: String,
    pub template: String,
    pub envelope: Envelope,
}

impl Route {
    pub fn new(name: impl Into<String>, template: impl Into<String>, envelope: Envelope) -> Self {
        Self {
            name: name.into(),
            template: template.into(),
            envelope,
        }
    }

    /// The routes used when the configuration does not name any.
    pub fn defaults() -> Vec<Route> {
        vec![
            Route::new(
                "allorigins",
                "https://api.allorigins.win/get?url={url}",
                Envelope::Json {
                    field: "contents".to_string(),
                },
            ),
            Route::new(
                "codetabs",
                "https://api.codetabs.com/v1/proxy?quest={url}",
                Envelope::Raw,
            ),
        ]
    }

    /// Substitute the query-encoded `target` into the template.
    pub fn request_url(&self, target: &str) -> String {
        let encoded: String = form_urlencoded::byte_serialize(target.as_bytes()).collect();
        self.template.replace(URL_PLACEHOLDER, &encoded)
    }

    /// Pull the feed text out of a response body.
    pub fn extract(&self, body: &[u8]) -> Result<String> {
        match &self.envelope {
            Envelope::Json { field } => {
                let value: serde_json::Value = serde_json::from_slice(body)?;
                value
                    .get(field)
                    .and_then(serde_json::Value::as_str)
                    .map(String::from)
                    .ok_or_else(|| {
                        TributaryError::Envelope(format!("missing string field `{}`", field))
                    })
            }
            Envelope::Raw => Ok(String::from_utf8_lossy(body).into_owned()),
        }
    }
}
