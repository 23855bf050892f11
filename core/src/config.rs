//! Client configuration.
//!
//! `CrowdinConfig` is an immutable value. Every `with_*` method consumes the
//! config and returns a modified copy, so a config shared between threads can
//! never change underneath an in-flight call.

use std::env;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::error::{CrowdinError, Result};

pub const DEFAULT_PROJECT_BASE_URL: &str = "https://api.crowdin.com/api/project/";
pub const DEFAULT_ACCOUNT_BASE_URL: &str = "https://api.crowdin.com/api/account/";

const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 5;
const DEFAULT_TIMEOUT_SECS: u64 = 40;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CrowdinConfig {
    #[serde(default = "default_project_base_url", deserialize_with = "base_url")]
    project_base_url: String,
    #[serde(default = "default_account_base_url", deserialize_with = "base_url")]
    account_base_url: String,
    token: String,
    project: String,
    #[serde(default = "default_connect_timeout", rename = "connect_timeout_secs", deserialize_with = "secs::deserialize")]
    connect_timeout: Duration,
    #[serde(default = "default_timeout", rename = "timeout_secs", deserialize_with = "secs::deserialize")]
    timeout: Duration,
    #[serde(default)]
    debug: bool,
}

impl CrowdinConfig {
    pub fn new(token: impl Into<String>, project: impl Into<String>) -> Self {
        Self {
            project_base_url: DEFAULT_PROJECT_BASE_URL.to_string(),
            account_base_url: DEFAULT_ACCOUNT_BASE_URL.to_string(),
            token: token.into(),
            project: project.into(),
            connect_timeout: default_connect_timeout(),
            timeout: default_timeout(),
            debug: false,
        }
    }

    /// Load from `CROWDIN_API_KEY` and `CROWDIN_PROJECT`, with optional
    /// `CROWDIN_PROJECT_BASE_URL`, `CROWDIN_ACCOUNT_BASE_URL` and
    /// `CROWDIN_DEBUG` overrides.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |name: &str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or_else(|| CrowdinError::Config(format!("{name} environment variable not set")))
        };
        let mut config = Self::new(required("CROWDIN_API_KEY")?, required("CROWDIN_PROJECT")?);
        if let Some(url) = lookup("CROWDIN_PROJECT_BASE_URL") {
            config.project_base_url = normalize_base_url(&url);
        }
        if let Some(url) = lookup("CROWDIN_ACCOUNT_BASE_URL") {
            config.account_base_url = normalize_base_url(&url);
        }
        if let Some(debug) = lookup("CROWDIN_DEBUG") {
            config.debug = matches!(debug.as_str(), "1" | "true" | "yes");
        }
        Ok(config)
    }

    pub fn with_project(mut self, token: impl Into<String>, project: impl Into<String>) -> Self {
        self.token = token.into();
        self.project = project.into();
        self
    }

    pub fn with_base_urls(mut self, project_base_url: &str, account_base_url: &str) -> Self {
        self.project_base_url = normalize_base_url(project_base_url);
        self.account_base_url = normalize_base_url(account_base_url);
        self
    }

    pub fn with_timeouts(mut self, connect: Duration, total: Duration) -> Self {
        self.connect_timeout = connect;
        self.timeout = total;
        self
    }

    /// Log raw response bodies at `debug` level.
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn project_base_url(&self) -> &str {
        &self.project_base_url
    }

    pub fn account_base_url(&self) -> &str {
        &self.account_base_url
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    /// `{project_base_url}{project}/{segments..}`, without the key. The
    /// project and every segment are percent-encoded as single path segments.
    pub(crate) fn project_url(&self, segments: &[&str]) -> Result<Url> {
        if matches!(self.project.as_str(), "" | "." | "..") {
            return Err(CrowdinError::Config(format!(
                "invalid project identifier {:?}",
                self.project
            )));
        }
        let mut url = Url::parse(&self.project_base_url)?;
        push_segments(&mut url, std::iter::once(self.project.as_str()).chain(segments.iter().copied()))?;
        Ok(url)
    }

    pub(crate) fn account_url(&self, action: &str) -> Result<Url> {
        let mut url = Url::parse(&self.account_base_url)?;
        push_segments(&mut url, [action])?;
        Ok(url)
    }
}

fn push_segments<'a>(url: &mut Url, segments: impl IntoIterator<Item = &'a str>) -> Result<()> {
    let base = url.to_string();
    url.path_segments_mut()
        .map_err(|()| CrowdinError::Config(format!("base URL {base} cannot carry a path")))?
        .pop_if_empty()
        .extend(segments);
    Ok(())
}

fn normalize_base_url(url: &str) -> String {
    format!("{}/", url.trim_end_matches('/'))
}

fn base_url<'de, D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    String::deserialize(deserializer).map(|url| normalize_base_url(&url))
}

fn default_project_base_url() -> String {
    DEFAULT_PROJECT_BASE_URL.to_string()
}

fn default_account_base_url() -> String {
    DEFAULT_ACCOUNT_BASE_URL.to_string()
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS)
}

fn default_timeout() -> Duration {
    Duration::from_secs(DEFAULT_TIMEOUT_SECS)
}

mod secs {
    use serde::{Deserialize, Deserializer};
    use std::time::Duration;

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn new_uses_public_endpoints_and_default_timeouts() {
        let config = CrowdinConfig::new("token", "project-name");
        assert_eq!(config.token(), "token");
        assert_eq!(config.project(), "project-name");
        assert_eq!(config.project_base_url(), DEFAULT_PROJECT_BASE_URL);
        assert_eq!(config.account_base_url(), DEFAULT_ACCOUNT_BASE_URL);
        assert_eq!(config.connect_timeout(), Duration::from_secs(5));
        assert_eq!(config.timeout(), Duration::from_secs(40));
        assert!(!config.debug());
    }

    #[test]
    fn with_project_returns_modified_copy() {
        let original = CrowdinConfig::new("a", "one");
        let changed = original.clone().with_project("b", "two");
        assert_eq!(original.token(), "a");
        assert_eq!(changed.token(), "b");
        assert_eq!(changed.project(), "two");
    }

    #[test]
    fn base_urls_gain_single_trailing_slash() {
        let config = CrowdinConfig::new("t", "p")
            .with_base_urls("http://127.0.0.1:9000/project", "http://127.0.0.1:9000/account//");
        assert_eq!(config.project_base_url(), "http://127.0.0.1:9000/project/");
        assert_eq!(config.account_base_url(), "http://127.0.0.1:9000/account/");
        assert_eq!(config.project_url(&["info"]).unwrap().as_str(), "http://127.0.0.1:9000/project/p/info");
        assert_eq!(
            config.account_url("get-projects").unwrap().as_str(),
            "http://127.0.0.1:9000/account/get-projects"
        );
    }

    #[test]
    fn project_is_encoded_as_one_segment() {
        let config = CrowdinConfig::new("t", "other/delete-project?x#y");
        assert_eq!(
            config.project_url(&["info"]).unwrap().as_str(),
            "https://api.crowdin.com/api/project/other%2Fdelete-project%3Fx%23y/info"
        );
    }

    #[test]
    fn dot_segment_projects_are_rejected() {
        for project in ["", ".", ".."] {
            let err = CrowdinConfig::new("t", project).project_url(&["info"]).unwrap_err();
            assert!(matches!(err, CrowdinError::Config(_)), "project {project:?}");
        }
    }

    #[test]
    fn from_lookup_requires_key_and_project() {
        let vars: HashMap<&str, &str> = HashMap::from([("CROWDIN_API_KEY", "k")]);
        let err = CrowdinConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string())).unwrap_err();
        assert!(matches!(err, CrowdinError::Config(msg) if msg.contains("CROWDIN_PROJECT")));
    }

    #[test]
    fn from_lookup_applies_overrides() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("CROWDIN_API_KEY", "k"),
            ("CROWDIN_PROJECT", "docs"),
            ("CROWDIN_PROJECT_BASE_URL", "http://localhost:1/project"),
            ("CROWDIN_DEBUG", "true"),
        ]);
        let config = CrowdinConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string())).unwrap();
        assert_eq!(
            config.project_url(&["status"]).unwrap().as_str(),
            "http://localhost:1/project/docs/status"
        );
        assert_eq!(config.account_base_url(), DEFAULT_ACCOUNT_BASE_URL);
        assert!(config.debug());
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: CrowdinConfig =
            serde_json::from_str(r#"{"token":"t","project":"p","timeout_secs":90}"#).unwrap();
        assert_eq!(config.project_base_url(), DEFAULT_PROJECT_BASE_URL);
        let custom: CrowdinConfig = serde_json::from_str(
            r#"{"token":"t","project":"p","account_base_url":"http://localhost:8080/account"}"#,
        )
        .unwrap();
        assert_eq!(custom.account_base_url(), "http://localhost:8080/account/");
        assert_eq!(config.timeout(), Duration::from_secs(90));
        assert_eq!(config.connect_timeout(), Duration::from_secs(5));
    }
}
