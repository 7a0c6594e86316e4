use reqwest::{Method, StatusCode};

/// Upper bound on the response body echoed into error messages.
pub(super) const MAX_BODY_PREVIEW: usize = 512;

#[derive(Debug, thiserror::Error)]
pub enum RestError {
    #[error("Invalid backend URL '{path}': {source}")]
    Url {
        path: String,
        #[source]
        source: url::ParseError,
    },

    #[error("{method} {path} failed: {source}")]
    Transport {
        method: Method,
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{method} {path} returned {status}: {detail}")]
    Status {
        method: Method,
        path: String,
        status: StatusCode,
        detail: String,
    },

    #[error("{method} {path} returned an unexpected body: {source}")]
    Decode {
        method: Method,
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl RestError {
    /// Builds a status error, preferring the backend's own `message` field.
    pub(super) fn status(method: Method, path: &str, status: StatusCode, body: &str) -> Self {
        let detail = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|json| json.get("message")?.as_str().map(str::to_owned))
            .unwrap_or_else(|| preview(body));
        Self::Status {
            method,
            path: path.to_owned(),
            status,
            detail,
        }
    }

    #[must_use]
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn preview(body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return "<empty body>".to_owned();
    }
    match body.char_indices().nth(MAX_BODY_PREVIEW) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_owned(),
    }
}
