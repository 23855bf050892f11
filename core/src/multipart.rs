//! `multipart/form-data` encoder for POST requests.
//!
//! Parts are written in insertion order. The boundary is a random UUID, which
//! cannot collide with form values in practice. File parts only record the
//! path and size; their contents are read from disk while the body is sent.

use std::fs::File;
use std::io::{self, Cursor, Read};
use std::path::{Path, PathBuf};

use uuid::Uuid;

#[derive(Debug, Clone)]
enum Part {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        filename: String,
        path: PathBuf,
    },
}

/// A form being assembled for a POST body.
#[derive(Debug, Clone)]
pub struct MultipartForm {
    boundary: String,
    parts: Vec<Part>,
    file_bytes: u64,
}

impl Default for MultipartForm {
    fn default() -> Self {
        Self::new()
    }
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::with_boundary(Uuid::new_v4().simple().to_string())
    }

    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            parts: Vec::new(),
            file_bytes: 0,
        }
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    pub fn text(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.parts.push(Part::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Attach the regular file at `path` under the form field `name`.
    ///
    /// The file is opened once here so that missing or unreadable files fail
    /// before anything is sent. The part's filename is the path's base name.
    pub fn file(&mut self, name: impl Into<String>, path: &Path) -> io::Result<&mut Self> {
        let metadata = File::open(path)?.metadata()?;
        if !metadata.is_file() {
            return Err(io::Error::new(io::ErrorKind::InvalidInput, "not a regular file"));
        }
        self.file_bytes += metadata.len();
        self.parts.push(Part::File {
            name: name.into(),
            filename: upload_file_name(path),
            path: path.to_path_buf(),
        });
        Ok(self)
    }

    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    pub fn into_body(self) -> MultipartBody {
        let mut segments = Vec::new();
        let mut pending = Vec::new();
        for part in self.parts {
            pending.extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
            match part {
                Part::Text { name, value } => {
                    pending.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                            escape_quotes(&name)
                        )
                        .as_bytes(),
                    );
                    pending.extend_from_slice(value.as_bytes());
                }
                Part::File {
                    name,
                    filename,
                    path,
                } => {
                    pending.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                             Content-Type: application/octet-stream\r\n\r\n",
                            escape_quotes(&name),
                            escape_quotes(&filename)
                        )
                        .as_bytes(),
                    );
                    segments.push(Segment::Bytes(std::mem::take(&mut pending)));
                    segments.push(Segment::File(path));
                }
            }
            pending.extend_from_slice(b"\r\n");
        }
        pending.extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        segments.push(Segment::Bytes(pending));

        let framing: u64 = segments
            .iter()
            .map(|segment| match segment {
                Segment::Bytes(bytes) => bytes.len() as u64,
                Segment::File(_) => 0,
            })
            .sum();
        MultipartBody {
            segments,
            len: framing + self.file_bytes,
        }
    }
}

#[derive(Debug, Clone)]
enum Segment {
    Bytes(Vec<u8>),
    File(PathBuf),
}

/// An encoded form: framing held in memory, file contents left on disk.
#[derive(Debug, Clone)]
pub struct MultipartBody {
    segments: Vec<Segment>,
    len: u64,
}

impl MultipartBody {
    /// Encoded size in bytes, as measured when the files were attached.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Stream the encoded body. Each file is opened when the reader
    /// reaches it.
    pub fn reader(&self) -> MultipartReader {
        MultipartReader {
            segments: self.segments.clone().into_iter(),
            current: None,
        }
    }
}

/// Reader over a `MultipartBody` that keeps at most one file open.
pub struct MultipartReader {
    segments: std::vec::IntoIter<Segment>,
    current: Option<Box<dyn Read + Send>>,
}

impl Read for MultipartReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        loop {
            if let Some(current) = self.current.as_mut() {
                let n = current.read(buf)?;
                if n > 0 || buf.is_empty() {
                    return Ok(n);
                }
                self.current = None;
            }
            self.current = match self.segments.next() {
                Some(Segment::Bytes(bytes)) => Some(Box::new(Cursor::new(bytes))),
                Some(Segment::File(path)) => Some(Box::new(File::open(path)?)),
                None => return Ok(0),
            };
        }
    }
}

fn upload_file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

fn escape_quotes(value: &str) -> String {
    value
        .replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
