use manga_api::{ChapterUpload, UploadFile};

/// A chapter being assembled in the upload form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftChapter {
    pub number: u32,
    pub files: Vec<UploadFile>,
}

/// Chapters drafted in the manga modal, in the order they were added.
///
/// Numbers come from a counter that starts at 1 for every new draft and
/// never reuses a number, even after a removal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadDraft {
    chapters: Vec<DraftChapter>,
    last_number: u32,
}

impl UploadDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an empty chapter and return its number.
    pub fn add_chapter(&mut self) -> u32 {
        self.last_number += 1;
        self.chapters.push(DraftChapter {
            number: self.last_number,
            files: Vec::new(),
        });
        self.last_number
    }

    pub fn remove_chapter(&mut self, number: u32) -> bool {
        let before = self.chapters.len();
        self.chapters.retain(|chapter| chapter.number != number);
        self.chapters.len() != before
    }

    /// Replace the chapter's pages with the image files among `files`.
    ///
    /// Returns how many were kept, or `None` for an unknown chapter.
    pub fn set_chapter_files(&mut self, number: u32, files: Vec<UploadFile>) -> Option<usize> {
        let chapter = self.chapter_mut(number)?;
        chapter.files = files.into_iter().filter(UploadFile::is_image).collect();
        Some(chapter.files.len())
    }

    /// Drop one page by position.
    pub fn remove_chapter_file(&mut self, number: u32, index: usize) -> bool {
        match self.chapter_mut(number) {
            Some(chapter) if index < chapter.files.len() => {
                chapter.files.remove(index);
                true
            }
            _ => false,
        }
    }

    pub fn chapters(&self) -> &[DraftChapter] {
        &self.chapters
    }

    pub fn is_empty(&self) -> bool {
        self.chapters.is_empty()
    }

    fn chapter_mut(&mut self, number: u32) -> Option<&mut DraftChapter> {
        self.chapters.iter_mut().find(|chapter| chapter.number == number)
    }

    pub(crate) fn into_uploads(self) -> Vec<ChapterUpload> {
        self.chapters
            .into_iter()
            .map(|chapter| ChapterUpload {
                number: chapter.number,
                files: chapter.files,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn png(name: &str) -> UploadFile {
        UploadFile::new(name, "image/png", vec![1, 2, 3])
    }

    #[test]
    fn numbers_are_never_reused() {
        let mut draft = UploadDraft::new();
        assert_eq!(draft.add_chapter(), 1);
        assert_eq!(draft.add_chapter(), 2);
        assert!(draft.remove_chapter(2));
        assert!(!draft.remove_chapter(2));
        assert_eq!(draft.add_chapter(), 3);
        let numbers: Vec<u32> = draft.chapters().iter().map(|c| c.number).collect();
        assert_eq!(numbers, vec![1, 3]);
    }

    #[test]
    fn chapter_files_keep_images_only() {
        let mut draft = UploadDraft::new();
        let number = draft.add_chapter();
        let kept = draft.set_chapter_files(
            number,
            vec![
                png("0.png"),
                UploadFile::new("notes.txt", "text/plain", Vec::new()),
                png("1.png"),
            ],
        );
        assert_eq!(kept, Some(2));
        assert_eq!(draft.set_chapter_files(99, vec![png("x.png")]), None);

        assert!(draft.remove_chapter_file(number, 0));
        assert!(!draft.remove_chapter_file(number, 5));
        let names: Vec<&str> = draft.chapters()[0]
            .files
            .iter()
            .map(|f| f.file_name.as_str())
            .collect();
        assert_eq!(names, vec!["1.png"]);
    }

    #[test]
    fn new_selection_replaces_pages() {
        let mut draft = UploadDraft::new();
        let number = draft.add_chapter();
        draft.set_chapter_files(number, vec![png("a.png"), png("b.png")]);
        draft.set_chapter_files(number, vec![png("c.png")]);
        assert_eq!(draft.chapters()[0].files, vec![png("c.png")]);
    }
}
