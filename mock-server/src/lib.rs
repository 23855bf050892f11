//! In-memory fake of the Crowdin v1 API.
//!
//! Serves the project endpoints under `/project/{project}/...` and the
//! account endpoints under `/account/...`, answering in Crowdin's JSON
//! shapes. State lives in a shared `Db` so tests can seed it and inspect it
//! after driving the client.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;

/// A project as listed by the account endpoints.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountProject {
    pub role: String,
    pub name: String,
    pub identifier: String,
    pub downloadable: u8,
    pub key: String,
}

#[derive(Clone, Debug)]
pub struct SourceFile {
    pub id: u64,
    pub contents: Vec<u8>,
}

impl SourceFile {
    pub fn strings(&self) -> u64 {
        String::from_utf8_lossy(&self.contents)
            .lines()
            .filter(|line| !line.trim().is_empty())
            .count() as u64
    }

    pub fn words(&self) -> u64 {
        String::from_utf8_lossy(&self.contents).split_whitespace().count() as u64
    }
}

#[derive(Clone, Debug)]
pub struct ProjectState {
    pub token: String,
    pub project: String,
    pub account_key: String,
    pub login: String,
    pub name: String,
    pub join_policy: String,
    pub source_language: String,
    pub languages: Vec<String>,
    /// Crowdin path to source file.
    pub files: BTreeMap<String, SourceFile>,
    /// (language, Crowdin path) to translated contents.
    pub translations: BTreeMap<(String, String), Vec<u8>>,
    /// Directory path to title.
    pub directories: BTreeMap<String, String>,
    pub projects: Vec<AccountProject>,
    pub deleted: bool,
    pub builds: u32,
    /// Text fields of the most recent multipart request, in wire order.
    pub last_fields: Vec<(String, String)>,
    next_file_id: u64,
    changed_since_export: bool,
}

impl Default for ProjectState {
    fn default() -> Self {
        Self::new("token", "project-name")
    }
}

impl ProjectState {
    pub fn new(token: &str, project: &str) -> Self {
        Self {
            token: token.to_string(),
            project: project.to_string(),
            account_key: "account-key".to_string(),
            login: "login".to_string(),
            name: "Project Name".to_string(),
            join_policy: "private".to_string(),
            source_language: "en".to_string(),
            languages: vec!["de".to_string(), "fr".to_string()],
            files: BTreeMap::new(),
            translations: BTreeMap::new(),
            directories: BTreeMap::new(),
            projects: vec![AccountProject {
                role: "owner".to_string(),
                name: "Project Name".to_string(),
                identifier: project.to_string(),
                downloadable: 1,
                key: token.to_string(),
            }],
            deleted: false,
            builds: 0,
            last_fields: Vec::new(),
            next_file_id: 1,
            changed_since_export: true,
        }
    }

    /// Bytes served for `download/{package}.zip`. Each entry is a header
    /// line `{language}/{path}` followed by the translated contents.
    pub fn archive_bytes(&self, package: &str) -> Option<Vec<u8>> {
        if package != "all" && !self.languages.iter().any(|l| l == package) {
            return None;
        }
        let mut archive = b"CROWDIN-ARCHIVE\n".to_vec();
        for ((language, path), contents) in &self.translations {
            if package == "all" || package == language {
                archive.extend_from_slice(format!("{language}/{path}\n").as_bytes());
                archive.extend_from_slice(contents);
                archive.push(b'\n');
            }
        }
        Some(archive)
    }

    fn touch(&mut self) {
        self.changed_since_export = true;
    }
}

pub type Db = Arc<RwLock<ProjectState>>;

pub fn app(db: Db) -> Router {
    Router::new()
        .route(
            "/project/{project}/{action}",
            post(project_post).get(project_get),
        )
        .route("/project/{project}/download/{archive}", get(download))
        .route("/account/{action}", post(account_post))
        .with_state(db)
}

pub async fn serve(listener: TcpListener, db: Db) -> Result<(), std::io::Error> {
    axum::serve(listener, app(db)).await
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, Db::default()).await
}

/// Crowdin-style error envelope with an HTTP status.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: u32,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, code: u32, message: impl Into<String>) -> Self {
        Self {
            status,
            code,
            message: message.into(),
        }
    }

    fn bad_key() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, 3, "API key is not valid")
    }

    fn no_project() -> Self {
        Self::new(StatusCode::NOT_FOUND, 1, "Project was not found")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "success": false,
            "error": {"code": self.code, "message": self.message},
        });
        (self.status, Json(body)).into_response()
    }
}

type ApiResult = Result<Json<Value>, ApiError>;

#[derive(Debug, Default)]
struct Form {
    fields: Vec<(String, String)>,
    files: Vec<(String, Vec<u8>)>,
}

impl Form {
    fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn all(&self, name: &str) -> Vec<String> {
        self.fields
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
            .collect()
    }

    /// Uploaded files keyed `files[<crowdin path>]`.
    fn uploads(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.files.iter().filter_map(|(key, data)| {
            key.strip_prefix("files[")
                .and_then(|rest| rest.strip_suffix(']'))
                .map(|path| (path, data.as_slice()))
        })
    }
}

async fn read_form(mut multipart: Multipart) -> Result<Form, ApiError> {
    let mut form = Form::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, 0, e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let is_file = field.file_name().is_some();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::new(StatusCode::BAD_REQUEST, 0, e.to_string()))?;
        if is_file {
            form.files.push((name, data.to_vec()));
        } else {
            form.fields
                .push((name, String::from_utf8_lossy(&data).into_owned()));
        }
    }
    Ok(form)
}

fn authorize(
    state: &ProjectState,
    project: &str,
    query: &HashMap<String, String>,
) -> Result<(), ApiError> {
    if state.deleted || project != state.project {
        return Err(ApiError::no_project());
    }
    if query.get("key").map(String::as_str) != Some(state.token.as_str()) {
        return Err(ApiError::bad_key());
    }
    Ok(())
}

async fn project_post(
    State(db): State<Db>,
    Path((project, action)): Path<(String, String)>,
    Query(query): Query<HashMap<String, String>>,
    multipart: Multipart,
) -> ApiResult {
    let form = read_form(multipart).await?;
    let mut state = db.write().await;
    authorize(&state, &project, &query)?;
    state.last_fields = form.fields.clone();
    debug!(%action, fields = form.fields.len(), files = form.files.len(), "project call");

    match action.as_str() {
        "add-file" => add_file(&mut state, &form),
        "update-file" => update_file(&mut state, &form),
        "delete-file" => delete_file(&mut state, &form),
        "upload-translation" => upload_translation(&mut state, &form),
        "status" => Ok(Json(translations_status(&state))),
        "export-status" => Ok(Json(export_status(&state))),
        "language-status" => language_status(&state, &form),
        "info" => Ok(Json(project_info(&state))),
        "edit-project" => edit_project(&mut state, &form),
        "delete-project" => {
            state.deleted = true;
            Ok(Json(json!({"project": {"success": true}})))
        }
        "add-directory" => add_directory(&mut state, &form),
        "change-directory" => change_directory(&mut state, &form),
        "delete-directory" => delete_directory(&mut state, &form),
        _ => Err(ApiError::new(StatusCode::NOT_FOUND, 0, "Unknown method")),
    }
}

async fn project_get(
    State(db): State<Db>,
    Path((project, action)): Path<(String, String)>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let mut state = db.write().await;
    if let Err(err) = authorize(&state, &project, &query) {
        return err.into_response();
    }
    match action.as_str() {
        "export" => {
            let status = if state.changed_since_export {
                state.builds += 1;
                state.changed_since_export = false;
                "built"
            } else {
                "skipped"
            };
            Json(json!({"success": {"status": status}})).into_response()
        }
        "export-file" => {
            let language = query.get("language").cloned().unwrap_or_default();
            let file = query.get("file").cloned().unwrap_or_default();
            let file = file.trim_start_matches('/').to_string();
            match state.translations.get(&(language, file)) {
                Some(contents) => contents.clone().into_response(),
                None => ApiError::new(StatusCode::NOT_FOUND, 8, "File was not found").into_response(),
            }
        }
        _ => ApiError::new(StatusCode::NOT_FOUND, 0, "Unknown method").into_response(),
    }
}

async fn download(
    State(db): State<Db>,
    Path((project, archive)): Path<(String, String)>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    let state = db.read().await;
    if let Err(err) = authorize(&state, &project, &query) {
        return err.into_response();
    }
    let package = archive.strip_suffix(".zip").unwrap_or(&archive);
    match state.archive_bytes(package) {
        Some(bytes) => bytes.into_response(),
        None => ApiError::new(StatusCode::NOT_FOUND, 10, "Language was not found").into_response(),
    }
}

async fn account_post(
    State(db): State<Db>,
    Path(action): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    multipart: Multipart,
) -> ApiResult {
    let form = read_form(multipart).await?;
    let mut state = db.write().await;
    if query.get("account-key").map(String::as_str) != Some(state.account_key.as_str())
        || form.field("login") != Some(state.login.as_str())
    {
        return Err(ApiError::new(StatusCode::UNAUTHORIZED, 3, "Account key is not valid"));
    }
    state.last_fields = form.fields.clone();

    match action.as_str() {
        "get-projects" => Ok(Json(json!({"success": true, "projects": state.projects}))),
        "create-project" => {
            let identifier = form.field("identifier").unwrap_or_default().to_string();
            if identifier.is_empty() || state.projects.iter().any(|p| p.identifier == identifier) {
                return Err(ApiError::new(
                    StatusCode::BAD_REQUEST,
                    4,
                    "Project identifier is empty or already taken",
                ));
            }
            let key = format!("{identifier}-key");
            state.projects.push(AccountProject {
                role: "owner".to_string(),
                name: form.field("name").unwrap_or_default().to_string(),
                identifier: identifier.clone(),
                downloadable: 1,
                key: key.clone(),
            });
            Ok(Json(json!({"project": {
                "success": true,
                "invitation": format!("https://crowdin.com/project/{identifier}/invite"),
                "url": format!("https://crowdin.com/project/{identifier}"),
                "key": key,
            }})))
        }
        _ => Err(ApiError::new(StatusCode::NOT_FOUND, 0, "Unknown method")),
    }
}

fn add_file(state: &mut ProjectState, form: &Form) -> ApiResult {
    let mut added = Vec::new();
    for (path, data) in form.uploads() {
        if state.files.contains_key(path) {
            return Err(ApiError::new(
                StatusCode::BAD_REQUEST,
                5,
                format!("File {path} is already uploaded"),
            ));
        }
        let file = SourceFile {
            id: state.next_file_id,
            contents: data.to_vec(),
        };
        state.next_file_id += 1;
        added.push(json!({
            "file_id": file.id,
            "name": path,
            "strings": file.strings(),
            "words": file.words(),
        }));
        state.files.insert(path.to_string(), file);
    }
    if added.is_empty() {
        return Err(ApiError::new(StatusCode::BAD_REQUEST, 6, "No files specified"));
    }
    state.touch();
    Ok(Json(json!({"success": true, "stats": {"files": added}})))
}

fn update_file(state: &mut ProjectState, form: &Form) -> ApiResult {
    for (path, data) in form.uploads() {
        let file = state.files.get_mut(path).ok_or_else(|| {
            ApiError::new(StatusCode::NOT_FOUND, 8, format!("File {path} was not found"))
        })?;
        file.contents = data.to_vec();
    }
    state.touch();
    Ok(Json(json!({"success": true})))
}

fn delete_file(state: &mut ProjectState, form: &Form) -> ApiResult {
    let path = form.field("file").unwrap_or_default();
    if state.files.remove(path).is_none() {
        return Err(ApiError::new(StatusCode::NOT_FOUND, 8, "File was not found"));
    }
    state.translations.retain(|(_, file), _| file != path);
    state.touch();
    Ok(Json(json!({"success": true})))
}

fn upload_translation(state: &mut ProjectState, form: &Form) -> ApiResult {
    let language = form.field("language").unwrap_or_default().to_string();
    if !state.languages.contains(&language) {
        return Err(ApiError::new(
            StatusCode::BAD_REQUEST,
            11,
            "Language is not a target language of the project",
        ));
    }
    let import_duplicates = form.field("import_duplicates") == Some("1");
    let mut stats = Vec::new();
    for (path, data) in form.uploads() {
        let status = if !state.files.contains_key(path) {
            "not_allowed"
        } else {
            let key = (language.clone(), path.to_string());
            if !import_duplicates && state.translations.get(&key).map(Vec::as_slice) == Some(data) {
                "skipped"
            } else {
                state.translations.insert(key, data.to_vec());
                "uploaded"
            }
        };
        stats.push(json!({"name": path, "status": status}));
    }
    state.touch();
    Ok(Json(json!({"success": true, "stats": {"files": stats}})))
}

fn translated_strings(state: &ProjectState, language: &str) -> (u64, u64) {
    let mut phrases = 0;
    let mut translated = 0;
    for (path, file) in &state.files {
        phrases += file.strings();
        if state
            .translations
            .contains_key(&(language.to_string(), path.clone()))
        {
            translated += file.strings();
        }
    }
    (phrases, translated)
}

/// Counters are strings on the wire, as Crowdin sends them.
fn translations_status(state: &ProjectState) -> Value {
    let entries: Vec<Value> = state
        .languages
        .iter()
        .map(|language| {
            let (phrases, translated) = translated_strings(state, language);
            let progress = if phrases == 0 { 0 } else { translated * 100 / phrases };
            json!({
                "name": language_name(language),
                "code": language,
                "phrases": phrases.to_string(),
                "translated": translated.to_string(),
                "approved": "0",
                "words": phrases.to_string(),
                "words_translated": translated.to_string(),
                "words_approved": "0",
                "translated_progress": progress,
                "approved_progress": 0,
            })
        })
        .collect();
    Value::Array(entries)
}

fn export_status(state: &ProjectState) -> Value {
    if state.builds == 0 {
        json!({"status": "finished", "progress": 0, "last_build": ""})
    } else {
        json!({
            "status": "finished",
            "progress": 100,
            "last_build": format!("build-{}", state.builds),
        })
    }
}

fn language_status(state: &ProjectState, form: &Form) -> ApiResult {
    let language = form.field("language").unwrap_or_default();
    if !state.languages.iter().any(|l| l == language) {
        return Err(ApiError::new(StatusCode::NOT_FOUND, 10, "Language was not found"));
    }
    let files: Vec<Value> = state
        .files
        .iter()
        .map(|(path, file)| {
            let done = state
                .translations
                .contains_key(&(language.to_string(), path.clone()));
            let translated = if done { file.strings() } else { 0 };
            let words_translated = if done { file.words() } else { 0 };
            json!({
                "id": file.id.to_string(),
                "name": path,
                "node_type": "file",
                "phrases": file.strings().to_string(),
                "translated": translated.to_string(),
                "approved": "0",
                "words": file.words().to_string(),
                "words_translated": words_translated.to_string(),
                "words_approved": "0",
            })
        })
        .collect();
    Ok(Json(json!({"files": files})))
}

fn project_info(state: &ProjectState) -> Value {
    let languages: Vec<Value> = state
        .languages
        .iter()
        .map(|code| {
            json!({"name": language_name(code), "code": code, "can_translate": 1, "can_approve": 1})
        })
        .collect();
    let (total_strings, _) = translated_strings(state, "");
    let last_build = if state.builds == 0 {
        String::new()
    } else {
        format!("build-{}", state.builds)
    };
    json!({
        "languages": languages,
        "files": file_tree(state, ""),
        "details": {
            "source_language": {"name": language_name(&state.source_language), "code": state.source_language},
            "name": state.name,
            "identifier": state.project,
            "created": "2024-01-01T00:00:00+0000",
            "description": "",
            "join_policy": state.join_policy,
            "last_build": last_build,
            "last_activity": "2024-01-01T00:00:00+0000",
            "participants_count": "1",
            "total_strings_count": total_strings.to_string(),
            "total_words_count": state.files.values().map(SourceFile::words).sum::<u64>().to_string(),
            "duplicate_strings_count": 0,
            "duplicate_words_count": 0,
            "invite_url": {
                "translator": format!("https://crowdin.com/project/{}/invite", state.project),
                "proofreader": format!("https://crowdin.com/project/{}/invite?d=ft", state.project),
            },
        },
    })
}

/// Directories and files directly below `prefix`, directories first.
fn file_tree(state: &ProjectState, prefix: &str) -> Vec<Value> {
    let mut children: BTreeSet<String> = BTreeSet::new();
    for dir in state.directories.keys() {
        if let Some(child) = direct_child(prefix, dir) {
            children.insert(child);
        }
    }
    let mut nodes: Vec<Value> = children
        .into_iter()
        .map(|dir| {
            json!({
                "name": dir.rsplit('/').next().unwrap_or(&dir),
                "node_type": "directory",
                "files": file_tree(state, &dir),
            })
        })
        .collect();
    for (path, file) in &state.files {
        if parent_of(path) == prefix {
            nodes.push(json!({
                "name": path.rsplit('/').next().unwrap_or(path),
                "node_type": "file",
                "created": "2024-01-01T00:00:00+0000",
                "last_updated": "2024-01-01T00:00:00+0000",
                "last_accessed": "",
                "last_revision": file.id.to_string(),
            }));
        }
    }
    nodes
}

fn parent_of(path: &str) -> &str {
    path.rsplit_once('/').map(|(parent, _)| parent).unwrap_or("")
}

fn direct_child(prefix: &str, dir: &str) -> Option<String> {
    let rest = if prefix.is_empty() {
        dir
    } else {
        dir.strip_prefix(prefix)?.strip_prefix('/')?
    };
    let head = rest.split('/').next().filter(|head| !head.is_empty())?;
    Some(if prefix.is_empty() {
        head.to_string()
    } else {
        format!("{prefix}/{head}")
    })
}

fn edit_project(state: &mut ProjectState, form: &Form) -> ApiResult {
    if let Some(name) = form.field("name") {
        state.name = name.to_string();
    }
    if let Some(policy) = form.field("join_policy") {
        if policy != "open" && policy != "private" {
            return Err(ApiError::new(StatusCode::BAD_REQUEST, 12, "Invalid join policy"));
        }
        state.join_policy = policy.to_string();
    }
    let languages = form.all("languages[]");
    if !languages.is_empty() {
        state.languages = languages;
    }
    state.touch();
    Ok(Json(json!({"project": {
        "success": true,
        "invitation": format!("https://crowdin.com/project/{}/invite", state.project),
        "url": format!("https://crowdin.com/project/{}", state.project),
        "key": "",
    }})))
}

fn normalize_dir(name: &str) -> String {
    name.trim_matches('/').to_string()
}

fn add_directory(state: &mut ProjectState, form: &Form) -> ApiResult {
    let name = normalize_dir(form.field("name").unwrap_or_default());
    if name.is_empty() {
        return Err(ApiError::new(StatusCode::BAD_REQUEST, 13, "Directory name is empty"));
    }
    if state.directories.contains_key(&name) {
        return Err(ApiError::new(StatusCode::BAD_REQUEST, 13, "Directory already exists"));
    }
    let mut path = String::new();
    for segment in name.split('/') {
        if !path.is_empty() {
            path.push('/');
        }
        path.push_str(segment);
        state.directories.entry(path.clone()).or_default();
    }
    state.touch();
    Ok(Json(json!({"success": true})))
}

fn change_directory(state: &mut ProjectState, form: &Form) -> ApiResult {
    let name = normalize_dir(form.field("name").unwrap_or_default());
    if !state.directories.contains_key(&name) {
        return Err(ApiError::new(StatusCode::NOT_FOUND, 17, "Directory was not found"));
    }
    if let Some(title) = form.field("title") {
        state.directories.insert(name.clone(), title.to_string());
    }
    if let Some(new_name) = form.field("new_name") {
        if new_name.contains('/') {
            return Err(ApiError::new(
                StatusCode::BAD_REQUEST,
                14,
                "New name can not contain a path",
            ));
        }
        let parent = parent_of(&name);
        let renamed = if parent.is_empty() {
            new_name.to_string()
        } else {
            format!("{parent}/{new_name}")
        };
        state.directories = std::mem::take(&mut state.directories)
            .into_iter()
            .map(|(dir, title)| (rebase(&dir, &name, &renamed), title))
            .collect();
        state.files = std::mem::take(&mut state.files)
            .into_iter()
            .map(|(path, file)| (rebase(&path, &name, &renamed), file))
            .collect();
        state.translations = std::mem::take(&mut state.translations)
            .into_iter()
            .map(|((language, path), contents)| ((language, rebase(&path, &name, &renamed)), contents))
            .collect();
    }
    state.touch();
    Ok(Json(json!({"success": true})))
}

fn rebase(path: &str, from: &str, to: &str) -> String {
    if path == from {
        return to.to_string();
    }
    match path.strip_prefix(from).and_then(|rest| rest.strip_prefix('/')) {
        Some(rest) => format!("{to}/{rest}"),
        None => path.to_string(),
    }
}

fn delete_directory(state: &mut ProjectState, form: &Form) -> ApiResult {
    let name = normalize_dir(form.field("name").unwrap_or_default());
    if !state.directories.contains_key(&name) {
        return Err(ApiError::new(StatusCode::NOT_FOUND, 17, "Directory was not found"));
    }
    let nested = |path: &str| path == name || path.starts_with(&format!("{name}/"));
    state.directories.retain(|dir, _| !nested(dir.as_str()));
    state.files.retain(|path, _| !nested(path.as_str()));
    state.translations.retain(|(_, path), _| !nested(path.as_str()));
    state.touch();
    Ok(Json(json!({"success": true})))
}

fn language_name(code: &str) -> &'static str {
    match code {
        "en" => "English",
        "de" => "German",
        "fr" => "French",
        "uk" => "Ukrainian",
        "es-ES" => "Spanish",
        "pt-BR" => "Portuguese, Brazilian",
        _ => "Unknown",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_files() -> ProjectState {
        let mut state = ProjectState::default();
        state.directories.insert("docs".to_string(), String::new());
        state.directories.insert("docs/guides".to_string(), String::new());
        state.files.insert(
            "docs/guides/intro.md".to_string(),
            SourceFile {
                id: 1,
                contents: b"Hello world\nSecond line\n".to_vec(),
            },
        );
        state.files.insert(
            "app.po".to_string(),
            SourceFile {
                id: 2,
                contents: b"one\n".to_vec(),
            },
        );
        state
    }

    #[test]
    fn source_file_counts_strings_and_words() {
        let file = SourceFile {
            id: 1,
            contents: b"Hello world\n\nSecond line here\n".to_vec(),
        };
        assert_eq!(file.strings(), 2);
        assert_eq!(file.words(), 5);
    }

    #[test]
    fn archive_contains_only_requested_language() {
        let mut state = ProjectState::default();
        state
            .translations
            .insert(("de".to_string(), "a.po".to_string()), b"DE".to_vec());
        state
            .translations
            .insert(("fr".to_string(), "a.po".to_string()), b"FR".to_vec());

        let de = String::from_utf8(state.archive_bytes("de").unwrap()).unwrap();
        assert!(de.contains("de/a.po\nDE\n"));
        assert!(!de.contains("FR"));
        let all = String::from_utf8(state.archive_bytes("all").unwrap()).unwrap();
        assert!(all.contains("DE") && all.contains("FR"));
        assert!(state.archive_bytes("ja").is_none());
    }

    #[test]
    fn file_tree_nests_directories() {
        let tree = file_tree(&state_with_files(), "");
        assert_eq!(tree[0]["name"], "docs");
        assert_eq!(tree[0]["node_type"], "directory");
        assert_eq!(tree[0]["files"][0]["name"], "guides");
        assert_eq!(tree[0]["files"][0]["files"][0]["name"], "intro.md");
        assert_eq!(tree[1]["name"], "app.po");
    }

    #[test]
    fn renaming_a_directory_moves_its_translations() {
        let mut state = state_with_files();
        state
            .translations
            .insert(("de".to_string(), "docs/guides/intro.md".to_string()), b"Hallo".to_vec());
        state
            .translations
            .insert(("de".to_string(), "app.po".to_string()), b"eins".to_vec());
        let form = Form {
            fields: vec![
                ("name".to_string(), "docs".to_string()),
                ("new_name".to_string(), "manual".to_string()),
            ],
            files: Vec::new(),
        };

        change_directory(&mut state, &form).unwrap();

        let keys: Vec<(&str, &str)> = state
            .translations
            .keys()
            .map(|(language, path)| (language.as_str(), path.as_str()))
            .collect();
        assert_eq!(keys, vec![("de", "app.po"), ("de", "manual/guides/intro.md")]);
    }

    #[test]
    fn rebase_only_touches_nested_paths() {
        assert_eq!(rebase("docs/a.md", "docs", "manual"), "manual/a.md");
        assert_eq!(rebase("docs", "docs", "manual"), "manual");
        assert_eq!(rebase("docs2/a.md", "docs", "manual"), "docs2/a.md");
    }

    #[test]
    fn translations_status_reports_progress_per_language() {
        let mut state = state_with_files();
        state
            .translations
            .insert(("de".to_string(), "docs/guides/intro.md".to_string()), b"x".to_vec());
        let status = translations_status(&state);
        assert_eq!(status[0]["code"], "de");
        assert_eq!(status[0]["phrases"], "3");
        assert_eq!(status[0]["translated"], "2");
        assert_eq!(status[0]["translated_progress"], 66);
        assert_eq!(status[1]["translated_progress"], 0);
    }
}
