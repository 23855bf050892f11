//! Options structures and response envelopes for the Crowdin v1 API.
//!
//! # Design
//! Options describe one call each and are translated to form fields by the
//! client. Envelopes mirror the JSON the remote API returns; they are
//! `#[serde(default)]` throughout because the remote schema is not under our
//! control and fields come and go between endpoints.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::lenient;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Source file format. `Auto` lets Crowdin detect it from the extension.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FileType {
    #[default]
    Auto,
    Gettext,
    Android,
    Resx,
    Properties,
    MacOsX,
    Xliff,
    Html,
    Chrome,
    Yaml,
    Csv,
    Json,
    Markdown,
    Arb,
    /// Any other format code accepted by the API.
    Other(String),
}

impl FileType {
    pub fn as_str(&self) -> &str {
        match self {
            FileType::Auto => "auto",
            FileType::Gettext => "gettext",
            FileType::Android => "android",
            FileType::Resx => "resx",
            FileType::Properties => "properties",
            FileType::MacOsX => "macosx",
            FileType::Xliff => "xliff",
            FileType::Html => "html",
            FileType::Chrome => "chrome",
            FileType::Yaml => "yaml",
            FileType::Csv => "csv",
            FileType::Json => "json",
            FileType::Markdown => "md",
            FileType::Arb => "arb",
            FileType::Other(code) => code,
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Who may join a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinPolicy {
    Open,
    Private,
}

impl JoinPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            JoinPolicy::Open => "open",
            JoinPolicy::Private => "private",
        }
    }
}

/// Options for `CrowdinClient::add_file`.
#[derive(Debug, Clone, Default)]
pub struct AddFileOptions {
    /// `None` sends no `type` field, leaving detection to Crowdin.
    pub file_type: Option<FileType>,
    /// CSV column mapping, e.g. `"identifier,source_phrase,translation"`.
    pub scheme: String,
    pub first_line_contains_header: bool,
    /// Crowdin path (with directories) to local file path.
    pub files: Vec<(String, PathBuf)>,
}

/// Options for `CrowdinClient::update_file`.
#[derive(Debug, Clone, Default)]
pub struct UpdateFileOptions {
    pub scheme: String,
    pub first_line_contains_header: bool,
    pub files: Vec<(String, PathBuf)>,
}

/// Options for `CrowdinClient::upload_translations`.
///
/// One call uploads translations for several files into a single language.
#[derive(Debug, Clone, Default)]
pub struct UploadTranslationsOptions {
    pub language: String,
    /// Crowdin file name to local translated file.
    pub files: Vec<(String, PathBuf)>,
    /// Add a translation even when an identical one already exists.
    pub import_duplicates: bool,
}

/// Options for `CrowdinClient::change_directory`.
#[derive(Debug, Clone, Default)]
pub struct ChangeDirectoryOptions {
    /// Full path of the directory to modify, e.g. `/MainPage/AboutUs`.
    pub name: String,
    /// New name only; the directory cannot be moved.
    pub new_name: String,
    pub title: String,
}

/// Options for `CrowdinClient::create_project`.
#[derive(Debug, Clone, Default)]
pub struct CreateProjectOptions {
    pub name: String,
    /// Unique among all Crowdin projects.
    pub identifier: String,
    pub source_language: String,
    pub languages: Vec<String>,
    pub join_policy: Option<JoinPolicy>,
}

/// Options for `CrowdinClient::edit_project`.
#[derive(Debug, Clone, Default)]
pub struct EditProjectOptions {
    pub name: String,
    pub languages: Vec<String>,
    pub join_policy: Option<JoinPolicy>,
}

/// Options for `CrowdinClient::export_file`.
#[derive(Debug, Clone, Default)]
pub struct ExportFileOptions {
    /// Path of the file inside the project.
    pub crowdin_file: String,
    pub language: String,
    /// Where the exported file is written.
    pub local_path: PathBuf,
}

/// Options for `CrowdinClient::download_translations`.
#[derive(Debug, Clone, Default)]
pub struct DownloadOptions {
    /// Language code, or `"all"` for every language in one archive.
    pub package: String,
    pub local_path: PathBuf,
}

// ---------------------------------------------------------------------------
// Envelopes
// ---------------------------------------------------------------------------

/// `{"success": true}`, returned by most mutating calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralResponse {
    pub success: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddFileResponse {
    pub success: bool,
    pub stats: AddFileStats,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddFileStats {
    pub files: Vec<AddedFile>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddedFile {
    #[serde(deserialize_with = "lenient::u64_value")]
    pub file_id: u64,
    pub name: String,
    #[serde(deserialize_with = "lenient::u64_value")]
    pub strings: u64,
    #[serde(deserialize_with = "lenient::u64_value")]
    pub words: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadTranslationResponse {
    pub success: bool,
    pub stats: UploadTranslationStats,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadTranslationStats {
    pub files: Vec<UploadedTranslation>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadedTranslation {
    pub name: String,
    /// `uploaded`, `skipped` or `not_allowed`.
    pub status: String,
}

/// Per-language progress, one entry per target language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationStatus {
    pub name: String,
    pub code: String,
    #[serde(deserialize_with = "lenient::u64_value")]
    pub phrases: u64,
    #[serde(deserialize_with = "lenient::u64_value")]
    pub translated: u64,
    #[serde(deserialize_with = "lenient::u64_value")]
    pub approved: u64,
    #[serde(deserialize_with = "lenient::u64_value")]
    pub words: u64,
    #[serde(deserialize_with = "lenient::u64_value")]
    pub words_translated: u64,
    #[serde(deserialize_with = "lenient::u64_value")]
    pub words_approved: u64,
    #[serde(deserialize_with = "lenient::u64_value")]
    pub translated_progress: u64,
    #[serde(deserialize_with = "lenient::u64_value")]
    pub approved_progress: u64,
}

/// Detailed progress of one language, per file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageStatus {
    pub files: Vec<LanguageFileStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LanguageFileStatus {
    #[serde(deserialize_with = "lenient::string_value")]
    pub id: String,
    pub name: String,
    pub node_type: String,
    #[serde(deserialize_with = "lenient::u64_value")]
    pub phrases: u64,
    #[serde(deserialize_with = "lenient::u64_value")]
    pub translated: u64,
    #[serde(deserialize_with = "lenient::u64_value")]
    pub approved: u64,
    #[serde(deserialize_with = "lenient::u64_value")]
    pub words: u64,
    #[serde(deserialize_with = "lenient::u64_value")]
    pub words_translated: u64,
    #[serde(deserialize_with = "lenient::u64_value")]
    pub words_approved: u64,
    /// Nested entries when `node_type` is `directory`.
    pub files: Vec<LanguageFileStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportStatus {
    /// `in-progress`, `finished` or `failed`.
    pub status: String,
    #[serde(deserialize_with = "lenient::u64_value")]
    pub progress: u64,
    pub last_build: String,
    pub code: String,
    pub message: String,
    pub current_file: String,
    pub current_language: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportTranslationsResponse {
    pub success: ExportResult,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportResult {
    /// `built` or `skipped` (nothing changed since the previous export).
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectInfo {
    pub languages: Vec<ProjectLanguage>,
    pub files: Vec<ProjectFile>,
    pub details: ProjectDetails,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectLanguage {
    pub name: String,
    pub code: String,
    #[serde(deserialize_with = "lenient::u64_value")]
    pub can_translate: u64,
    #[serde(deserialize_with = "lenient::u64_value")]
    pub can_approve: u64,
}

/// A file or directory in the project tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectFile {
    pub name: String,
    pub node_type: String,
    pub created: String,
    pub last_updated: String,
    pub last_accessed: String,
    #[serde(deserialize_with = "lenient::string_value")]
    pub last_revision: String,
    pub files: Vec<ProjectFile>,
}

impl ProjectFile {
    pub fn is_directory(&self) -> bool {
        self.node_type == "directory"
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectDetails {
    pub source_language: SourceLanguage,
    pub name: String,
    pub identifier: String,
    pub created: String,
    pub description: String,
    pub join_policy: String,
    pub last_build: String,
    pub last_activity: String,
    #[serde(deserialize_with = "lenient::u64_value")]
    pub participants_count: u64,
    #[serde(deserialize_with = "lenient::u64_value")]
    pub total_strings_count: u64,
    #[serde(deserialize_with = "lenient::u64_value")]
    pub total_words_count: u64,
    #[serde(deserialize_with = "lenient::u64_value")]
    pub duplicate_strings_count: u64,
    #[serde(deserialize_with = "lenient::u64_value")]
    pub duplicate_words_count: u64,
    pub invite_url: InviteUrl,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceLanguage {
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InviteUrl {
    pub translator: String,
    pub proofreader: String,
}

/// Projects visible to an account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountDetails {
    pub success: bool,
    pub projects: Vec<AccountProject>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountProject {
    pub role: String,
    pub name: String,
    pub identifier: String,
    #[serde(deserialize_with = "lenient::u64_value")]
    pub downloadable: u64,
    pub key: String,
}

/// Returned by `create_project` and `edit_project`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManageProjectResponse {
    pub project: ManagedProject,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagedProject {
    pub success: bool,
    pub invitation: String,
    pub url: String,
    /// API key of a newly created project.
    pub key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeleteProjectResponse {
    pub project: GeneralResponse,
}
