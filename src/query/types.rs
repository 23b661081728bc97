use crate::error::RequestError;
use std::collections::HashMap;

/// Query string of a search request. Every parameter is optional and kept as
/// raw text so that malformed values are handled by the resolver instead of
/// being rejected at extraction.
#[derive(Debug, Clone, Default)]
pub struct SearchParams {
    pub q: Option<String>,
    pub format: Option<String>,
    pub limit: Option<String>,
}

impl From<HashMap<String, String>> for SearchParams {
    fn from(mut pairs: HashMap<String, String>) -> Self {
        Self {
            q: pairs.remove("q"),
            format: pairs.remove("format"),
            limit: pairs.remove("limit"),
        }
    }
}

impl SearchParams {
    /// The result cap, if one was given as a non-negative integer.
    pub fn limit(&self) -> Option<usize> {
        let raw = self.limit.as_deref()?.trim();
        match raw.parse() {
            Ok(limit) => Some(limit),
            Err(_) => {
                tracing::debug!("Ignoring unparsable limit '{}'", raw);
                None
            }
        }
    }

    pub fn query(&self) -> &str {
        self.q.as_deref().unwrap_or_default()
    }
}

/// Accepted values of the `format` parameter. Both produce the same document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Json,
    JsonV2,
}

impl ResponseFormat {
    pub fn parse(format: Option<&str>) -> Result<Self, RequestError> {
        match format {
            Some("json") => Ok(ResponseFormat::Json),
            Some("jsonv2") => Ok(ResponseFormat::JsonV2),
            _ => Err(RequestError::UnsupportedFormat),
        }
    }
}
