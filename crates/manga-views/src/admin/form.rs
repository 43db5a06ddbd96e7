use manga_api::{MangaSubmission, UploadFile};
use manga_core::{Manga, StatusKind};

use super::draft::UploadDraft;
use crate::error::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(i64),
}

/// The manga create/edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MangaForm {
    pub mode: FormMode,
    pub title: String,
    pub description: String,
    pub status: String,
    pub is_latest: bool,
    cover: Option<UploadFile>,
    pub draft: UploadDraft,
}

impl MangaForm {
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            title: String::new(),
            description: String::new(),
            status: StatusKind::Ongoing.display().to_string(),
            is_latest: false,
            cover: None,
            draft: UploadDraft::new(),
        }
    }

    /// Prefilled from an existing manga. Uploads start empty.
    pub fn for_edit(manga: &Manga) -> Self {
        let status = if manga.status.is_empty() {
            StatusKind::Ongoing.display().to_string()
        } else {
            manga.status.clone()
        };
        Self {
            mode: FormMode::Edit(manga.id),
            title: manga.title.clone(),
            description: manga.description.clone(),
            status,
            is_latest: manga.is_latest,
            cover: None,
            draft: UploadDraft::new(),
        }
    }

    pub const fn is_edit(&self) -> bool {
        matches!(self.mode, FormMode::Edit(_))
    }

    /// Modal heading.
    pub const fn heading(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "Adicionar Mangá",
            FormMode::Edit(_) => "Editar Mangá",
        }
    }

    /// # Errors
    ///
    /// [`ValidationError::NotAnImage`]; the previous cover is kept.
    pub fn select_cover(&mut self, file: UploadFile) -> Result<(), ValidationError> {
        if !file.is_image() {
            return Err(ValidationError::NotAnImage);
        }
        self.cover = Some(file);
        Ok(())
    }

    pub fn clear_cover(&mut self) {
        self.cover = None;
    }

    pub const fn cover(&self) -> Option<&UploadFile> {
        self.cover.as_ref()
    }

    /// First failing rule. Cover and chapters are required on create only;
    /// any drafted chapter needs pages in both modes.
    ///
    /// # Errors
    ///
    /// The [`ValidationError`] to show.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.title.trim().is_empty() {
            return Err(ValidationError::TitleRequired);
        }
        if self.description.trim().is_empty() {
            return Err(ValidationError::DescriptionRequired);
        }
        if !self.is_edit() {
            if self.cover.is_none() {
                return Err(ValidationError::CoverRequired);
            }
            if self.draft.is_empty() {
                return Err(ValidationError::ChapterRequired);
            }
        }
        if let Some(empty) = self.draft.chapters().iter().find(|c| c.files.is_empty()) {
            return Err(ValidationError::ChapterWithoutPages(empty.number));
        }
        Ok(())
    }

    pub fn into_submission(self) -> MangaSubmission {
        MangaSubmission {
            id: match self.mode {
                FormMode::Create => None,
                FormMode::Edit(id) => Some(id),
            },
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            status: self.status,
            is_latest: self.is_latest,
            cover: self.cover,
            chapters: self.draft.into_uploads(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn png(name: &str) -> UploadFile {
        UploadFile::new(name, "image/png", vec![0])
    }

    fn ready() -> MangaForm {
        let mut form = MangaForm::create();
        form.title = " Akira ".into();
        form.description = "Neo-Tóquio".into();
        form.select_cover(png("cover.png")).unwrap();
        let number = form.draft.add_chapter();
        form.draft.set_chapter_files(number, vec![png("0.png")]);
        form
    }

    #[test]
    fn create_rules_in_order() {
        assert_eq!(ready().validate(), Ok(()));

        let mut form = ready();
        form.title = "  ".into();
        form.description.clear();
        assert_eq!(form.validate(), Err(ValidationError::TitleRequired));

        let mut form = ready();
        form.description = "\n".into();
        assert_eq!(form.validate(), Err(ValidationError::DescriptionRequired));

        let mut form = ready();
        form.clear_cover();
        assert_eq!(form.validate(), Err(ValidationError::CoverRequired));

        let mut form = ready();
        form.draft = UploadDraft::new();
        assert_eq!(form.validate(), Err(ValidationError::ChapterRequired));

        let mut form = ready();
        let empty = form.draft.add_chapter();
        assert_eq!(form.validate(), Err(ValidationError::ChapterWithoutPages(empty)));
        assert_eq!(
            form.validate().unwrap_err().to_string(),
            "Capítulo 2 precisa ter pelo menos uma página"
        );
    }

    #[test]
    fn edit_needs_no_cover_or_chapters() {
        let manga: Manga = serde_json::from_value(serde_json::json!({
            "id": 8, "title": "Monster", "description": "Tenma", "status": null, "isLatest": true
        }))
        .unwrap();
        let mut form = MangaForm::for_edit(&manga);
        assert_eq!(form.status, "Em andamento");
        assert!(form.is_latest);
        assert_eq!(form.validate(), Ok(()));

        form.draft.add_chapter();
        assert_eq!(form.validate(), Err(ValidationError::ChapterWithoutPages(1)));
    }

    #[test]
    fn cover_must_be_an_image() {
        let mut form = MangaForm::create();
        form.select_cover(png("a.png")).unwrap();
        let result = form.select_cover(UploadFile::new("a.pdf", "application/pdf", vec![]));
        assert_eq!(result, Err(ValidationError::NotAnImage));
        assert_eq!(form.cover().map(|c| c.file_name.as_str()), Some("a.png"));
    }

    #[test]
    fn submission_is_trimmed_and_carries_id_on_edit() {
        let submission = ready().into_submission();
        assert_eq!(submission.title, "Akira");
        assert_eq!(submission.id, None);
        assert_eq!(submission.chapters_data().len(), 1);

        let mut form = ready();
        form.mode = FormMode::Edit(3);
        assert_eq!(form.into_submission().id, Some(3));
    }
}
