//! Request builder shared by every endpoint.
//!
//! # Design
//! A `RequestDescriptor` collects the target URL, scalar parameters,
//! list-valued parameters and local files for one call. It is turned into a
//! plain-data `HttpRequest` either as a GET (everything in the query string)
//! or as a multipart POST. Parameters are kept in insertion order so the
//! encoded request is deterministic.

use std::path::PathBuf;

use url::Url;

use crate::error::{CrowdinError, Result};
use crate::http::{HttpMethod, HttpRequest, RequestBody};
use crate::multipart::MultipartForm;

#[derive(Debug, Clone, Default)]
pub struct RequestDescriptor {
    url: String,
    params: Vec<(String, String)>,
    list_params: Vec<(String, Vec<String>)>,
    files: Vec<(String, PathBuf)>,
}

impl RequestDescriptor {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Add `key` only when `value` is non-empty.
    pub fn param_if_set(self, key: &str, value: &str) -> Self {
        if value.is_empty() {
            self
        } else {
            self.param(key, value)
        }
    }

    pub fn list_param<I, S>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.list_params
            .push((key.into(), values.into_iter().map(Into::into).collect()));
        self
    }

    pub fn file(mut self, key: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.files.push((key.into(), path.into()));
        self
    }

    /// Build a GET request with every parameter appended to the query.
    pub fn build_get(&self) -> Result<HttpRequest> {
        let mut url = Url::parse(&self.url)?;
        if !self.params.is_empty() || !self.list_params.is_empty() {
            let mut query = url.query_pairs_mut();
            for (key, value) in &self.params {
                query.append_pair(key, value);
            }
            for (key, values) in &self.list_params {
                for value in values {
                    query.append_pair(key, value);
                }
            }
        }
        Ok(HttpRequest {
            method: HttpMethod::Get,
            url: url.into(),
            headers: Vec::new(),
            body: RequestBody::Empty,
            timeout: None,
        })
    }

    /// Build a multipart POST request. Attached files are checked here and
    /// streamed from disk when the request is sent.
    ///
    /// Fails with `CrowdinError::Io` on the first unreadable file; no request
    /// is produced in that case.
    pub fn build_post(&self) -> Result<HttpRequest> {
        let url = Url::parse(&self.url)?;
        let mut form = MultipartForm::new();
        for (key, value) in &self.params {
            form.text(key.as_str(), value.as_str());
        }
        for (key, values) in &self.list_params {
            for value in values {
                form.text(key.as_str(), value.as_str());
            }
        }
        for (key, path) in &self.files {
            form.file(key.as_str(), path)
                .map_err(|e| CrowdinError::io("read upload", path, e))?;
        }
        let content_type = form.content_type();
        let body = form.into_body();
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: url.into(),
            headers: vec![
                ("content-type".to_string(), content_type),
                ("content-length".to_string(), body.len().to_string()),
            ],
            body: RequestBody::Multipart(body),
            timeout: None,
        })
    }
}
