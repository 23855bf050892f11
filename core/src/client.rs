//! Endpoint methods for the Crowdin v1 API.
//!
//! # Design
//! Each method maps a typed options value to a `RequestDescriptor`, builds
//! the `HttpRequest`, hands it to the `Transport` and decodes the response.
//! No method retries, caches or keeps state between calls. The client holds
//! an immutable `CrowdinConfig` behind an `Arc`; the `with_*` methods return
//! a new handle instead of mutating the shared one.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::config::CrowdinConfig;
use crate::download::write_atomically;
use crate::error::{CrowdinError, Result};
use crate::http::{HttpRequest, HttpResponse, ResponseStream};
use crate::request::RequestDescriptor;
use crate::response::{accept_stream, decode_json};
use crate::transport::{Transport, UreqTransport};
use crate::types::*;

/// Blocking client for one Crowdin project (and the account endpoints).
#[derive(Clone)]
pub struct CrowdinClient {
    config: Arc<CrowdinConfig>,
    transport: Arc<dyn Transport>,
    timeout: Option<Duration>,
}

impl fmt::Debug for CrowdinClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CrowdinClient")
            .field("project", &self.config.project())
            .field("project_base_url", &self.config.project_base_url())
            .field("account_base_url", &self.config.account_base_url())
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl CrowdinClient {
    /// Client using the default ureq transport with the config's timeouts.
    pub fn new(config: CrowdinConfig) -> Self {
        let transport = UreqTransport::new(config.connect_timeout(), config.timeout());
        Self::with_transport(config, Arc::new(transport))
    }

    pub fn with_transport(config: CrowdinConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: Arc::new(config),
            transport,
            timeout: None,
        }
    }

    pub fn config(&self) -> &CrowdinConfig {
        &self.config
    }

    /// A handle for another project sharing this client's transport.
    pub fn with_project(&self, token: &str, project: &str) -> Self {
        self.with_config((*self.config).clone().with_project(token, project))
    }

    pub fn with_config(&self, config: CrowdinConfig) -> Self {
        Self {
            config: Arc::new(config),
            transport: Arc::clone(&self.transport),
            timeout: self.timeout,
        }
    }

    /// A handle whose calls use `timeout` instead of the transport default.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Self {
            timeout: Some(timeout),
            ..self.clone()
        }
    }

    // -----------------------------------------------------------------------
    // Files
    // -----------------------------------------------------------------------

    /// Add new files to the project.
    pub fn add_file(&self, options: &AddFileOptions) -> Result<AddFileResponse> {
        let mut request = self.project_request("add-file")?.param("json", "");
        if let Some(file_type) = &options.file_type {
            request = request.param("type", file_type.as_str());
        }
        request = request
            .param_if_set("scheme", &options.scheme)
            .param(
                "first_line_contains_header",
                bool_flag(options.first_line_contains_header),
            );
        self.post("add-file", attach_files(request, &options.files))
    }

    /// Upload the latest version of existing source files.
    pub fn update_file(&self, options: &UpdateFileOptions) -> Result<GeneralResponse> {
        let request = self
            .project_request("update-file")?
            .param("json", "")
            .param_if_set("scheme", &options.scheme)
            .param(
                "first_line_contains_header",
                bool_flag(options.first_line_contains_header),
            );
        self.post("update-file", attach_files(request, &options.files))
    }

    /// Delete a file. Its translations are lost for good.
    pub fn delete_file(&self, file_name: &str) -> Result<GeneralResponse> {
        let request = self
            .project_request("delete-file")?
            .param("json", "")
            .param("file", file_name);
        self.post("delete-file", request)
    }

    /// Upload translated files into one target language.
    pub fn upload_translations(
        &self,
        options: &UploadTranslationsOptions,
    ) -> Result<UploadTranslationResponse> {
        let request = self
            .project_request("upload-translation")?
            .param("json", "")
            .param_if_set("language", &options.language)
            .param(
                "import_duplicates",
                if options.import_duplicates { "1" } else { "0" },
            );
        self.post("upload-translation", attach_files(request, &options.files))
    }

    // -----------------------------------------------------------------------
    // Status
    // -----------------------------------------------------------------------

    /// Overall translation and proofreading progress per target language.
    pub fn translations_status(&self) -> Result<Vec<TranslationStatus>> {
        let request = self.project_request("status")?.param("json", "");
        self.post("status", request)
    }

    pub fn export_status(&self) -> Result<ExportStatus> {
        let request = self.project_request("export-status")?.param("json", "");
        self.post("export-status", request)
    }

    /// Detailed per-file progress for `language_code`.
    pub fn language_status(&self, language_code: &str) -> Result<LanguageStatus> {
        let request = self
            .project_request("language-status")?
            .param("language", language_code)
            .param("json", "");
        self.post("language-status", request)
    }

    pub fn project_details(&self) -> Result<ProjectInfo> {
        let request = self.project_request("info")?.param("json", "");
        self.post("info", request)
    }

    // -----------------------------------------------------------------------
    // Export and download
    // -----------------------------------------------------------------------

    /// Download the ZIP archive for one language, or for every language
    /// when `package` is `"all"`, into `local_path`.
    pub fn download_translations(&self, options: &DownloadOptions) -> Result<()> {
        if options.package.is_empty() {
            return Err(CrowdinError::MissingOption("package"));
        }
        if options.local_path.as_os_str().is_empty() {
            return Err(CrowdinError::MissingOption("local_path"));
        }
        let archive = format!("{}.zip", options.package);
        let request = self.project_request_at(&["download", archive.as_str()])?;
        self.download("download", request, &options.local_path)
    }

    /// Export a single translated file into `local_path`.
    pub fn export_file(&self, options: &ExportFileOptions) -> Result<()> {
        if options.local_path.as_os_str().is_empty() {
            return Err(CrowdinError::MissingOption("local_path"));
        }
        let request = self
            .project_request("export-file")?
            .param_if_set("language", &options.language)
            .param_if_set("file", &options.crowdin_file);
        self.download("export-file", request, &options.local_path)
    }

    /// Build the translations archive. Crowdin answers `skipped` when nothing
    /// changed since the previous build.
    pub fn export_translations(&self) -> Result<ExportTranslationsResponse> {
        let request = self.project_request("export")?.param("json", "");
        self.get("export", request)
    }

    // -----------------------------------------------------------------------
    // Projects
    // -----------------------------------------------------------------------

    pub fn account_projects(&self, account_key: &str, login: &str) -> Result<AccountDetails> {
        let request = self
            .account_request("get-projects", account_key)?
            .param("login", login)
            .param("json", "");
        self.post("get-projects", request)
    }

    pub fn create_project(
        &self,
        account_key: &str,
        login: &str,
        options: &CreateProjectOptions,
    ) -> Result<ManageProjectResponse> {
        let mut request = self
            .account_request("create-project", account_key)?
            .param("json", "")
            .param("login", login)
            .param_if_set("name", &options.name)
            .param_if_set("identifier", &options.identifier)
            .param_if_set("source_language", &options.source_language);
        if let Some(policy) = options.join_policy {
            request = request.param("join_policy", policy.as_str());
        }
        if !options.languages.is_empty() {
            request = request.list_param("languages[]", options.languages.iter().cloned());
        }
        self.post("create-project", request)
    }

    pub fn edit_project(&self, options: &EditProjectOptions) -> Result<ManageProjectResponse> {
        let mut request = self
            .project_request("edit-project")?
            .param("json", "")
            .param_if_set("name", &options.name);
        if let Some(policy) = options.join_policy {
            request = request.param("join_policy", policy.as_str());
        }
        if !options.languages.is_empty() {
            request = request.list_param("languages[]", options.languages.iter().cloned());
        }
        self.post("edit-project", request)
    }

    /// Delete the project with all its translations.
    pub fn delete_project(&self) -> Result<DeleteProjectResponse> {
        let request = self.project_request("delete-project")?.param("json", "");
        self.post("delete-project", request)
    }

    // -----------------------------------------------------------------------
    // Directories
    // -----------------------------------------------------------------------

    /// Create a directory; nested paths such as `docs/guides` are allowed.
    pub fn add_directory(&self, name: &str) -> Result<GeneralResponse> {
        let request = self
            .project_request("add-directory")?
            .param("name", name)
            .param("json", "");
        self.post("add-directory", request)
    }

    /// Rename a directory or change its title. The new name cannot contain
    /// a path.
    pub fn change_directory(&self, options: &ChangeDirectoryOptions) -> Result<GeneralResponse> {
        let request = self
            .project_request("change-directory")?
            .param("json", "")
            .param_if_set("name", &options.name)
            .param_if_set("new_name", &options.new_name)
            .param_if_set("title", &options.title);
        self.post("change-directory", request)
    }

    /// Delete a directory with everything nested in it.
    pub fn delete_directory(&self, name: &str) -> Result<GeneralResponse> {
        let request = self
            .project_request("delete-directory")?
            .param("name", name)
            .param("json", "");
        self.post("delete-directory", request)
    }

    // -----------------------------------------------------------------------
    // Plumbing
    // -----------------------------------------------------------------------

    fn project_request(&self, action: &str) -> Result<RequestDescriptor> {
        self.project_request_at(&[action])
    }

    fn project_request_at(&self, segments: &[&str]) -> Result<RequestDescriptor> {
        let mut url = self.config.project_url(segments)?;
        url.query_pairs_mut().append_pair("key", self.config.token());
        Ok(RequestDescriptor::new(url))
    }

    fn account_request(&self, action: &str, account_key: &str) -> Result<RequestDescriptor> {
        let mut url = self.config.account_url(action)?;
        url.query_pairs_mut().append_pair("account-key", account_key);
        Ok(RequestDescriptor::new(url))
    }

    fn post<T: DeserializeOwned>(&self, endpoint: &'static str, request: RequestDescriptor) -> Result<T> {
        let result = request
            .build_post()
            .and_then(|request| self.execute(endpoint, request))
            .and_then(|response| decode_json(&response));
        log_failure(endpoint, result)
    }

    fn get<T: DeserializeOwned>(&self, endpoint: &'static str, request: RequestDescriptor) -> Result<T> {
        let result = request
            .build_get()
            .and_then(|request| self.execute(endpoint, request))
            .and_then(|response| decode_json(&response));
        log_failure(endpoint, result)
    }

    /// Stream a 200 body straight into `local_path`.
    fn download(&self, endpoint: &'static str, request: RequestDescriptor, local_path: &Path) -> Result<()> {
        let result = request
            .build_get()
            .and_then(|request| self.send(endpoint, request))
            .and_then(accept_stream)
            .and_then(|mut stream| {
                let bytes = write_atomically(local_path, &mut stream.body)?;
                debug!(endpoint, path = %local_path.display(), bytes, "download saved");
                Ok(())
            });
        log_failure(endpoint, result)
    }

    fn execute(&self, endpoint: &'static str, request: HttpRequest) -> Result<HttpResponse> {
        let response = self.send(endpoint, request)?.into_response()?;
        debug!(endpoint, status = response.status, bytes = response.body.len(), "response received");
        if self.config.debug() {
            debug!(endpoint, body = %response.body_text(), "response body");
        }
        Ok(response)
    }

    fn send(&self, endpoint: &'static str, mut request: HttpRequest) -> Result<ResponseStream> {
        request.timeout = self.timeout;
        debug!(
            endpoint,
            method = request.method.as_str(),
            url = %redact_url(&request.url),
            body_bytes = request.body.len(),
            "sending request"
        );
        let stream = self.transport.execute(&request)?;
        debug!(endpoint, status = stream.status, "response headers received");
        Ok(stream)
    }
}

fn attach_files(mut request: RequestDescriptor, files: &[(String, PathBuf)]) -> RequestDescriptor {
    for (name, path) in files {
        request = request.file(format!("files[{name}]"), path);
    }
    request
}

fn bool_flag(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

fn log_failure<T>(endpoint: &'static str, result: Result<T>) -> Result<T> {
    if let Err(err) = &result {
        warn!(endpoint, error = %err, status = ?err.status(), "crowdin request failed");
    }
    result
}

/// Replace API key values in `url` so it can be logged.
fn redact_url(url: &str) -> String {
    let Ok(mut parsed) = Url::parse(url) else {
        return url.to_string();
    };
    let pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(key, value)| {
            let value = if key == "key" || key == "account-key" {
                "***".to_string()
            } else {
                value.into_owned()
            };
            (key.into_owned(), value)
        })
        .collect();
    if pairs.is_empty() {
        return parsed.into();
    }
    parsed.query_pairs_mut().clear().extend_pairs(pairs);
    parsed.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::http::HttpMethod;
    use std::collections::VecDeque;
    use std::fs;
    use std::sync::Mutex;

    /// Records every request and replays canned responses in order.
    #[derive(Default)]
    struct RecordingTransport {
        requests: Mutex<Vec<HttpRequest>>,
        responses: Mutex<VecDeque<(u16, Vec<u8>)>>,
    }

    impl RecordingTransport {
        fn replying(status: u16, body: &[u8]) -> Arc<Self> {
            let transport = Self::default();
            transport
                .responses
                .lock()
                .unwrap()
                .push_back((status, body.to_vec()));
            Arc::new(transport)
        }

        fn requests(&self) -> Vec<HttpRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl Transport for RecordingTransport {
        fn execute(&self, request: &HttpRequest) -> std::result::Result<ResponseStream, TransportError> {
            self.requests.lock().unwrap().push(request.clone());
            let (status, body) = self
                .responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| TransportError::Connection("no canned response".into()))?;
            Ok(ResponseStream::from_bytes(status, Vec::new(), body))
        }
    }

    const BASE: &str = "http://crowdin.test/api/project/";
    const ACCOUNT: &str = "http://crowdin.test/api/account/";

    fn client(transport: Arc<RecordingTransport>) -> CrowdinClient {
        let config = CrowdinConfig::new("token", "project-name").with_base_urls(BASE, ACCOUNT);
        CrowdinClient::with_transport(config, transport)
    }

    fn body_text(request: &HttpRequest) -> String {
        String::from_utf8(request.body.to_bytes().unwrap()).unwrap()
    }

    fn has_field(request: &HttpRequest, name: &str, value: &str) -> bool {
        body_text(request).contains(&format!("name=\"{name}\"\r\n\r\n{value}\r\n"))
    }

    #[test]
    fn project_calls_carry_token_and_project() {
        let transport = RecordingTransport::replying(200, br#"{"success":true}"#);
        client(transport.clone()).add_directory("docs").unwrap();

        let request = &transport.requests()[0];
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, format!("{BASE}project-name/add-directory?key=token"));
        assert!(has_field(request, "name", "docs"));
        assert!(has_field(request, "json", ""));
    }

    #[test]
    fn with_project_switches_credentials_without_touching_original() {
        let transport = RecordingTransport::replying(200, br#"{"success":true}"#);
        let original = client(transport.clone());
        let other = original.with_project("other-token", "other-project");
        other.delete_file("a.po").unwrap();

        assert_eq!(original.config().token(), "token");
        assert_eq!(
            transport.requests()[0].url,
            format!("{BASE}other-project/delete-file?key=other-token")
        );
        assert!(has_field(&transport.requests()[0], "file", "a.po"));
    }

    #[test]
    fn add_file_sends_options_and_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("messages.csv");
        fs::write(&path, "id,source\n1,Hello\n").unwrap();

        let transport = RecordingTransport::replying(
            200,
            br#"{"success":true,"stats":{"files":[{"file_id":"7","name":"ui/messages.csv","strings":1,"words":1}]}}"#,
        );
        let response = client(transport.clone())
            .add_file(&AddFileOptions {
                file_type: Some(FileType::Csv),
                scheme: "identifier,source_phrase".to_string(),
                first_line_contains_header: true,
                files: vec![("ui/messages.csv".to_string(), path)],
            })
            .unwrap();
        assert!(response.success);
        assert_eq!(response.stats.files[0].file_id, 7);

        let request = &transport.requests()[0];
        assert!(has_field(request, "type", "csv"));
        assert!(has_field(request, "scheme", "identifier,source_phrase"));
        assert!(has_field(request, "first_line_contains_header", "true"));
        assert!(body_text(request).contains(
            "name=\"files[ui/messages.csv]\"; filename=\"messages.csv\"\r\n\
             Content-Type: application/octet-stream\r\n\r\nid,source\n1,Hello\n\r\n"
        ));
    }

    #[test]
    fn missing_upload_file_never_reaches_the_network() {
        let transport = Arc::new(RecordingTransport::default());
        let err = client(transport.clone())
            .upload_translations(&UploadTranslationsOptions {
                language: "de".to_string(),
                files: vec![("app.po".to_string(), "/definitely/not/here.po".into())],
                import_duplicates: false,
            })
            .unwrap_err();
        assert!(matches!(err, CrowdinError::Io { .. }));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn upload_translations_renders_duplicate_flag() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("de.po");
        fs::write(&path, "msgid \"a\"\nmsgstr \"b\"\n").unwrap();
        let transport = RecordingTransport::replying(
            200,
            br#"{"success":true,"stats":{"files":[{"name":"app.po","status":"uploaded"}]}}"#,
        );
        let response = client(transport.clone())
            .upload_translations(&UploadTranslationsOptions {
                language: "de".to_string(),
                files: vec![("app.po".to_string(), path)],
                import_duplicates: true,
            })
            .unwrap();
        assert_eq!(response.stats.files[0].status, "uploaded");
        let request = &transport.requests()[0];
        assert!(has_field(request, "language", "de"));
        assert!(has_field(request, "import_duplicates", "1"));
    }

    #[test]
    fn create_project_repeats_languages_in_order() {
        let transport = RecordingTransport::replying(
            200,
            br#"{"project":{"success":true,"key":"new-key","url":"https://crowdin.com/project/docs"}}"#,
        );
        let response = client(transport.clone())
            .create_project(
                "acct",
                "jane",
                &CreateProjectOptions {
                    name: "Docs".to_string(),
                    identifier: "docs".to_string(),
                    source_language: "en".to_string(),
                    languages: vec!["uk".to_string(), "de".to_string(), "fr".to_string()],
                    join_policy: Some(JoinPolicy::Open),
                },
            )
            .unwrap();
        assert_eq!(response.project.key, "new-key");

        let request = &transport.requests()[0];
        assert_eq!(request.url, format!("{ACCOUNT}create-project?account-key=acct"));
        assert!(has_field(request, "login", "jane"));
        assert!(has_field(request, "join_policy", "open"));
        let body = body_text(request);
        let uk = body.find("\r\n\r\nuk\r\n").unwrap();
        let de = body.find("\r\n\r\nde\r\n").unwrap();
        let fr = body.find("\r\n\r\nfr\r\n").unwrap();
        assert!(uk < de && de < fr);
        assert_eq!(body.matches("name=\"languages[]\"").count(), 3);
    }

    #[test]
    fn export_status_decodes_envelope() {
        let transport = RecordingTransport::replying(200, br#"{"status":"finished","progress":100}"#);
        let status = client(transport).export_status().unwrap();
        assert_eq!(status.status, "finished");
        assert_eq!(status.progress, 100);
    }

    #[test]
    fn export_translations_is_a_get_with_json_flag() {
        let transport = RecordingTransport::replying(200, br#"{"success":{"status":"built"}}"#);
        let response = client(transport.clone()).export_translations().unwrap();
        assert_eq!(response.success.status, "built");
        let request = &transport.requests()[0];
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.url, format!("{BASE}project-name/export?key=token&json="));
    }

    #[test]
    fn not_found_is_reported_with_status() {
        let transport = RecordingTransport::replying(404, b"<html>missing</html>");
        let err = client(transport).project_details().unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn truncated_success_body_is_a_decode_error() {
        let transport = RecordingTransport::replying(200, br#"[{"name":"German","co"#);
        let err = client(transport).translations_status().unwrap_err();
        assert!(matches!(err, CrowdinError::Decode { .. }));
    }

    #[test]
    fn transport_failure_is_surfaced() {
        let transport = Arc::new(RecordingTransport::default());
        let err = client(transport).export_status().unwrap_err();
        assert!(matches!(err, CrowdinError::Transport(TransportError::Connection(_))));
        assert_eq!(std::error::Error::source(&err).unwrap().to_string(), "no canned response");
    }

    #[test]
    fn download_writes_body_byte_for_byte() {
        let archive: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
        let transport = RecordingTransport::replying(200, &archive);
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("all.zip");

        client(transport.clone())
            .download_translations(&DownloadOptions {
                package: "all".to_string(),
                local_path: target.clone(),
            })
            .unwrap();

        assert_eq!(fs::read(&target).unwrap(), archive);
        let request = &transport.requests()[0];
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.url, format!("{BASE}project-name/download/all.zip?key=token"));
    }

    #[test]
    fn rejected_download_leaves_destination_untouched() {
        let transport = RecordingTransport::replying(401, br#"{"success":false}"#);
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("de.zip");
        fs::write(&target, b"previous").unwrap();

        let err = client(transport)
            .download_translations(&DownloadOptions {
                package: "de".to_string(),
                local_path: target.clone(),
            })
            .unwrap_err();
        assert_eq!(err.status(), Some(401));
        assert_eq!(fs::read(&target).unwrap(), b"previous");
    }

    #[test]
    fn package_cannot_escape_the_download_path() {
        let cases = [
            ("../../other/delete-project?", "..%2F..%2Fother%2Fdelete-project%3F.zip"),
            ("de#frag", "de%23frag.zip"),
            ("de?x=1", "de%3Fx=1.zip"),
            ("a/b", "a%2Fb.zip"),
            ("..", "...zip"),
        ];
        for (package, segment) in cases {
            let transport = RecordingTransport::replying(200, b"PK");
            let dir = tempfile::tempdir().unwrap();
            client(transport.clone())
                .download_translations(&DownloadOptions {
                    package: package.to_string(),
                    local_path: dir.path().join("out.zip"),
                })
                .unwrap();
            assert_eq!(
                transport.requests()[0].url,
                format!("{BASE}project-name/download/{segment}?key=token"),
                "package {package:?}"
            );
        }
    }

    #[test]
    fn project_cannot_redirect_to_another_endpoint() {
        let transport = RecordingTransport::replying(200, br#"{"success":true}"#);
        client(transport.clone())
            .with_project("token", "other/delete-project?")
            .add_directory("docs")
            .unwrap();
        assert_eq!(
            transport.requests()[0].url,
            format!("{BASE}other%2Fdelete-project%3F/add-directory?key=token")
        );
    }

    #[test]
    fn download_requires_package() {
        let transport = Arc::new(RecordingTransport::default());
        let err = client(transport.clone())
            .download_translations(&DownloadOptions {
                package: String::new(),
                local_path: "out.zip".into(),
            })
            .unwrap_err();
        assert!(matches!(err, CrowdinError::MissingOption("package")));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn export_file_sends_file_and_language_in_query() {
        let transport = RecordingTransport::replying(200, b"msgid \"x\"\nmsgstr \"y\"\n");
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("app.de.po");
        client(transport.clone())
            .export_file(&ExportFileOptions {
                crowdin_file: "/app.po".to_string(),
                language: "de".to_string(),
                local_path: target.clone(),
            })
            .unwrap();
        assert_eq!(
            transport.requests()[0].url,
            format!("{BASE}project-name/export-file?key=token&language=de&file=%2Fapp.po")
        );
        assert_eq!(fs::read(&target).unwrap(), b"msgid \"x\"\nmsgstr \"y\"\n");
    }

    #[test]
    fn with_timeout_applies_to_every_request() {
        let transport = RecordingTransport::replying(200, br#"{"success":true}"#);
        let client = client(transport.clone()).with_timeout(Duration::from_secs(3));
        client.delete_directory("old").unwrap();
        assert_eq!(transport.requests()[0].timeout, Some(Duration::from_secs(3)));
    }

    #[test]
    fn redact_url_hides_keys() {
        assert_eq!(
            redact_url("https://api.crowdin.com/api/project/p/info?key=secret&json="),
            "https://api.crowdin.com/api/project/p/info?key=***&json="
        );
        assert_eq!(
            redact_url("https://api.crowdin.com/api/account/get-projects?account-key=secret"),
            "https://api.crowdin.com/api/account/get-projects?account-key=***"
        );
    }

    #[test]
    fn client_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CrowdinClient>();
    }
}
