//! Request descriptors handed to a [`Transport`](crate::rest::Transport).

use reqwest::Method;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::KucoinError;

/// Everything needed to issue one REST call.
///
/// Parameters are kept as a flat JSON object. For `GET` they are encoded into
/// the query string, for `POST` they form the JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct RestRequest {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the API host, with path parameters already filled in.
    pub path: String,
    /// Query or body parameters. Absent optional parameters are not present.
    pub params: Map<String, Value>,
    /// Whether the request must be signed.
    pub authenticated: bool,
}

impl RestRequest {
    /// Create an authenticated request without parameters.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: Map::new(),
            authenticated: true,
        }
    }

    /// Create an authenticated `GET` request.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Create an authenticated `POST` request.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Mark the request as not requiring a signature.
    pub fn public(mut self) -> Self {
        self.authenticated = false;
        self
    }

    /// Merge the fields of a serializable parameter struct.
    ///
    /// `null` fields are dropped so that `None` options never reach the wire.
    pub fn with_params<P>(mut self, params: &P) -> Result<Self, KucoinError>
    where
        P: Serialize + ?Sized,
    {
        match serde_json::to_value(params)? {
            Value::Object(map) => {
                self.params
                    .extend(map.into_iter().filter(|(_, value)| !value.is_null()));
                Ok(self)
            }
            Value::Null => Ok(self),
            other => Err(KucoinError::invalid_parameter(
                "params",
                format!("must serialize to an object, got {other}"),
            )),
        }
    }

    /// Look up a parameter by its wire name.
    pub fn param(&self, name: &str) -> Option<&Value> {
        self.params.get(name)
    }

    /// Wire names of all parameters carried by this request.
    pub fn param_names(&self) -> Vec<&str> {
        self.params.keys().map(String::as_str).collect()
    }

    /// Encode the parameters as a URL query string (without the leading `?`).
    pub fn query_string(&self) -> Result<String, KucoinError> {
        let pairs: Vec<(&str, String)> = self
            .params
            .iter()
            .map(|(name, value)| (name.as_str(), query_value(value)))
            .collect();
        serde_urlencoded::to_string(pairs)
            .map_err(|e| KucoinError::invalid_parameter("params", e.to_string()))
    }

    /// Encode the parameters as a JSON body.
    pub fn json_body(&self) -> Result<String, KucoinError> {
        Ok(serde_json::to_string(&self.params)?)
    }

    /// The endpoint as signed by KuCoin: path plus query string for `GET`.
    pub fn endpoint(&self) -> Result<String, KucoinError> {
        if self.method != Method::GET || self.params.is_empty() {
            return Ok(self.path.clone());
        }
        Ok(format!("{}?{}", self.path, self.query_string()?))
    }

    /// The body to send: JSON for non-`GET` requests, empty otherwise.
    pub fn body(&self) -> Result<String, KucoinError> {
        if self.method == Method::GET {
            Ok(String::new())
        } else {
            self.json_body()
        }
    }
}

fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
