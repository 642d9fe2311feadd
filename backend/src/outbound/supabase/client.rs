//! Reqwest-backed Supabase client.
//!
//! Covers the three Supabase services the repositories need: PostgREST for
//! tables and RPC, GoTrue for authentication and Storage for objects. The
//! client owns transport details only. Failed responses are returned as the
//! backend's own JSON body with `status` added so the error classifier sees
//! exactly what Supabase sent.

use std::time::Duration;

use data_errors::{DataError, ErrorCode, Failure};
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde_json::{Map, Value, json};

use crate::domain::ports::{Filter, Record};

use super::settings::{SupabaseSettings, SupabaseSetupError};

const REST_PATH: &str = "rest/v1/";
const RPC_PATH: &str = "rest/v1/rpc/";
const AUTH_PATH: &str = "auth/v1/";
const STORAGE_PATH: &str = "storage/v1/object/";

/// HTTP client for one Supabase project.
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    http: Client,
    base: Url,
    anon_key: String,
}

impl SupabaseClient {
    /// Build a client for the project at `base`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base: Url,
        anon_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base: with_trailing_slash(base),
            anon_key: anon_key.into(),
        })
    }

    /// Build a client from loaded settings.
    ///
    /// # Errors
    ///
    /// Returns [`SupabaseSetupError`] when a setting is missing or invalid, or
    /// the HTTP client cannot be built.
    pub fn from_settings(settings: &SupabaseSettings) -> Result<Self, SupabaseSetupError> {
        let base = settings.project_url()?;
        let anon_key = settings.anon_key()?;
        Self::new(base, anon_key, settings.timeout()).map_err(|err| SupabaseSetupError::Client {
            message: err.to_string(),
        })
    }

    /// Project base URL, always ending in `/`.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Rows of `table` matching every filter.
    pub async fn select(
        &self,
        table: &str,
        filters: &[Filter],
        order: Option<&str>,
    ) -> Result<Vec<Record>, Failure> {
        let mut request = self
            .request(Method::GET, &format!("{REST_PATH}{table}"), None)?
            .query(&[("select", "*")])
            .query(&filter_params(filters));
        if let Some(order) = order {
            request = request.query(&[("order", order)]);
        }
        rows(self.send(request).await?)
    }

    /// First row of `table` matching every filter.
    pub async fn select_one(
        &self,
        table: &str,
        filters: &[Filter],
    ) -> Result<Option<Record>, Failure> {
        let request = self
            .request(Method::GET, &format!("{REST_PATH}{table}"), None)?
            .query(&[("select", "*"), ("limit", "1")])
            .query(&filter_params(filters));
        Ok(rows(self.send(request).await?)?.into_iter().next())
    }

    /// Insert `record` and return the stored row.
    pub async fn insert(&self, table: &str, record: &Record) -> Result<Record, Failure> {
        let request = self
            .request(Method::POST, &format!("{REST_PATH}{table}"), None)?
            .header("Prefer", "return=representation")
            .json(record);
        rows(self.send(request).await?)?
            .into_iter()
            .next()
            .ok_or_else(|| unexpected_shape("insert returned no rows"))
    }

    /// Apply `changes` to the rows matching `filters`, returning the first
    /// updated row. No match reports `resource` as not found.
    pub async fn update(
        &self,
        table: &str,
        filters: &[Filter],
        changes: &Record,
        resource: &str,
    ) -> Result<Record, Failure> {
        let request = self
            .request(Method::PATCH, &format!("{REST_PATH}{table}"), None)?
            .header("Prefer", "return=representation")
            .query(&filter_params(filters))
            .json(changes);
        rows(self.send(request).await?)?
            .into_iter()
            .next()
            .ok_or_else(|| {
                let id = filters.first().map(Filter::value);
                Failure::Domain(DataError::not_found(resource, id))
            })
    }

    /// Delete the rows matching `filters`.
    pub async fn delete(&self, table: &str, filters: &[Filter]) -> Result<(), Failure> {
        let request = self
            .request(Method::DELETE, &format!("{REST_PATH}{table}"), None)?
            .query(&filter_params(filters));
        self.send(request).await.map(drop)
    }

    /// Call the database function `function` with named `args`.
    pub async fn rpc(&self, function: &str, args: &Value) -> Result<Value, Failure> {
        let request = self
            .request(Method::POST, &format!("{RPC_PATH}{function}"), None)?
            .json(args);
        self.send(request).await
    }

    /// Password grant. Returns the session (tokens and user).
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Record, Failure> {
        let request = self
            .request(Method::POST, &format!("{AUTH_PATH}token"), None)?
            .query(&[("grant_type", "password")])
            .json(&json!({ "email": email, "password": password }));
        object(self.send(request).await?)
    }

    /// User owning `access_token`.
    pub async fn user(&self, access_token: &str) -> Result<Record, Failure> {
        let request = self.request(Method::GET, &format!("{AUTH_PATH}user"), Some(access_token))?;
        object(self.send(request).await?)
    }

    /// Revoke the session behind `access_token`.
    pub async fn sign_out(&self, access_token: &str) -> Result<(), Failure> {
        let request =
            self.request(Method::POST, &format!("{AUTH_PATH}logout"), Some(access_token))?;
        self.send(request).await.map(drop)
    }

    /// Upload `bytes` to `bucket/path`, returning the stored key.
    pub async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, Failure> {
        let request = self
            .request(Method::POST, &format!("{STORAGE_PATH}{bucket}/{path}"), None)?
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(bytes);
        let body = self.send(request).await?;
        Ok(body
            .get("Key")
            .and_then(Value::as_str)
            .map_or_else(|| format!("{bucket}/{path}"), str::to_owned))
    }

    /// Delete `paths` from `bucket`.
    pub async fn remove(&self, bucket: &str, paths: &[String]) -> Result<(), Failure> {
        let request = self
            .request(Method::DELETE, &format!("{STORAGE_PATH}{bucket}"), None)?
            .json(&json!({ "prefixes": paths }));
        self.send(request).await.map(drop)
    }

    /// Public URL of `bucket/path`.
    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}{STORAGE_PATH}public/{bucket}/{path}", self.base)
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        access_token: Option<&str>,
    ) -> Result<RequestBuilder, Failure> {
        let url = self.base.join(path).map_err(|err| {
            Failure::Domain(DataError::new(
                format!("invalid Supabase endpoint '{path}': {err}"),
                ErrorCode::ProviderError,
            ))
        })?;
        Ok(self
            .http
            .request(method, url)
            .header("apikey", self.anon_key.as_str())
            .bearer_auth(access_token.unwrap_or(self.anon_key.as_str()))
            .header(reqwest::header::ACCEPT, "application/json"))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value, Failure> {
        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_body(body.as_ref())
    }
}

fn with_trailing_slash(mut base: Url) -> Url {
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}

fn filter_params(filters: &[Filter]) -> Vec<(String, String)> {
    filters
        .iter()
        .map(|filter| (filter.column().to_owned(), format!("eq.{}", filter.value())))
        .collect()
}

fn parse_body(body: &[u8]) -> Result<Value, Failure> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(body)
        .map_err(|err| unexpected_shape(&format!("invalid Supabase JSON payload: {err}")))
}

fn rows(body: Value) -> Result<Vec<Record>, Failure> {
    serde_json::from_value(body)
        .map_err(|err| unexpected_shape(&format!("expected an array of rows: {err}")))
}

fn object(body: Value) -> Result<Record, Failure> {
    match body {
        Value::Object(record) => Ok(record),
        _ => Err(unexpected_shape("expected a JSON object")),
    }
}

fn unexpected_shape(message: &str) -> Failure {
    Failure::Domain(DataError::new(message, ErrorCode::ProviderError))
}

fn map_transport_error(error: reqwest::Error) -> Failure {
    let code = if error.is_timeout() {
        ErrorCode::Timeout
    } else {
        ErrorCode::ConnectionFailed
    };
    Failure::Domain(DataError::new(error.to_string(), code))
}

fn map_status_error(status: StatusCode, body: &[u8]) -> Failure {
    let mut payload = match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => map,
        _ => {
            let mut map = Map::new();
            map.insert("message".to_owned(), Value::String(body_preview(body)));
            map
        }
    };
    payload.insert("status".to_owned(), Value::from(status.as_u16()));
    Failure::Backend(Value::Object(payload))
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
