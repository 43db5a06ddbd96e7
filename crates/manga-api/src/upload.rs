//! Multipart payload for manga create/edit.

use std::path::Path;

use reqwest::multipart::{Form, Part};
use serde::Serialize;

use crate::error::ApiError;

/// A file picked for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    /// Read a file from disk, guessing its type from the extension.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Upload`] when the file cannot be read.
    pub fn from_path(path: &Path) -> Result<Self, ApiError> {
        let bytes = std::fs::read(path).map_err(|e| ApiError::Upload {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let file_name = path
            .file_name()
            .map_or_else(|| "upload".to_string(), |name| name.to_string_lossy().into_owned());
        let mime = mime_for(&file_name);
        Ok(Self::new(file_name, mime, bytes))
    }

    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }

    fn into_part(self) -> Result<Part, ApiError> {
        Ok(Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.mime)?)
    }
}

/// Content type for a file name, by extension.
pub fn mime_for(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        _ => "application/octet-stream",
    }
}

/// Page files for one chapter of a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterUpload {
    pub number: u32,
    pub files: Vec<UploadFile>,
}

/// Entry of the `chaptersData` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterManifest {
    pub number: u32,
    pub files_count: usize,
}

/// Everything sent to `POST`/`PUT /mangas`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MangaSubmission {
    /// Set when editing; the request becomes a `PUT`.
    pub id: Option<i64>,
    pub title: String,
    pub description: String,
    pub status: String,
    pub is_latest: bool,
    pub cover: Option<UploadFile>,
    pub chapters: Vec<ChapterUpload>,
}

impl MangaSubmission {
    pub const fn is_edit(&self) -> bool {
        self.id.is_some()
    }

    pub fn chapters_data(&self) -> Vec<ChapterManifest> {
        self.chapters
            .iter()
            .map(|chapter| ChapterManifest {
                number: chapter.number,
                files_count: chapter.files.len(),
            })
            .collect()
    }

    /// Build the multipart body.
    ///
    /// Page parts are named `chapter_{number}_page_{index}`, in draft order.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] when a file carries an unusable mime type.
    pub fn into_form(self) -> Result<Form, ApiError> {
        let chapters_data = serde_json::to_string(&self.chapters_data())
            .map_err(|e| ApiError::Parse(e.to_string()))?;

        let mut form = Form::new()
            .text("title", self.title)
            .text("description", self.description)
            .text("status", self.status)
            .text("is_latest", self.is_latest.to_string());
        if let Some(id) = self.id {
            form = form.text("id", id.to_string());
        }
        if let Some(cover) = self.cover {
            form = form.part("cover", cover.into_part()?);
        }
        form = form.text("chaptersData", chapters_data);
        for chapter in self.chapters {
            for (index, file) in chapter.files.into_iter().enumerate() {
                let name = format!("chapter_{}_page_{index}", chapter.number);
                form = form.part(name, file.into_part()?);
            }
        }
        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn png(name: &str) -> UploadFile {
        UploadFile::new(name, "image/png", vec![0x89, b'P', b'N', b'G'])
    }

    #[test]
    fn mime_is_guessed_from_extension() {
        assert_eq!(mime_for("capa.JPG"), "image/jpeg");
        assert_eq!(mime_for("p1.webp"), "image/webp");
        assert_eq!(mime_for("notas.txt"), "application/octet-stream");
        assert_eq!(mime_for("sem-extensao"), "application/octet-stream");
    }

    #[test]
    fn from_path_reads_bytes_and_type() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("page.png");
        std::fs::write(&path, b"img").unwrap();

        let file = UploadFile::from_path(&path).unwrap();
        assert_eq!(file.file_name, "page.png");
        assert!(file.is_image());
        assert_eq!(file.bytes, b"img");
    }

    #[test]
    fn missing_file_is_an_upload_error() {
        let err = UploadFile::from_path(Path::new("/definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, ApiError::Upload { .. }));
    }

    #[test]
    fn chapters_data_counts_files_per_chapter() {
        let submission = MangaSubmission {
            id: None,
            title: "Berserk".into(),
            description: "Guts".into(),
            status: "Em andamento".into(),
            is_latest: false,
            cover: Some(png("c.png")),
            chapters: vec![
                ChapterUpload {
                    number: 1,
                    files: vec![png("a.png"), png("b.png")],
                },
                ChapterUpload {
                    number: 3,
                    files: vec![png("c.png")],
                },
            ],
        };
        let json = serde_json::to_string(&submission.chapters_data()).unwrap();
        assert_eq!(json, r#"[{"number":1,"filesCount":2},{"number":3,"filesCount":1}]"#);
        assert!(!submission.is_edit());
        assert!(submission.into_form().is_ok());
    }
}
