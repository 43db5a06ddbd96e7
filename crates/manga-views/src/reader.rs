//! The chapter reader.
//!
//! Opening a chapter resolves the manga, its chapter list, and the page
//! images. Switching chapters always refetches pages.

use serde::Serialize;
use thiserror::Error;

use manga_api::{ApiError, MangaApi};
use manga_auth::KeyValueStore;
use manga_config::MangaConfig;
use manga_core::entities::sort_chapters;
use manga_core::messages::{CHAPTER_NOT_FOUND, MANGA_LOAD_FAILED};
use manga_core::{Chapter, Manga, Page, PageRef, assets};

use crate::detail::chapter_label;

#[derive(Debug, Error)]
pub enum ReaderError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("{}", CHAPTER_NOT_FOUND)]
    ChapterNotFound,
}

impl ReaderError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(error) => error.user_message(MANGA_LOAD_FAILED),
            Self::ChapterNotFound => self.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Pages
// ---------------------------------------------------------------------------

/// What the reader shows for a chapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "pages", rename_all = "lowercase")]
pub enum ReaderPages {
    /// Resolved image URLs.
    Real(Vec<String>),
    /// Numbered placeholder frames.
    Placeholder(usize),
}

impl ReaderPages {
    pub fn len(&self) -> usize {
        match self {
            Self::Real(urls) => urls.len(),
            Self::Placeholder(count) => *count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub const fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder(_))
    }
}

/// Pick the pages to show.
///
/// `fetched` is the pages endpoint result, `None` when it failed. An empty
/// successful fetch shows a single placeholder; a failed fetch falls back to
/// the pages embedded in the chapter, then to `placeholder_count` frames.
pub fn resolve_pages(
    fetched: Option<Vec<PageRef>>,
    embedded: &[PageRef],
    server_url: &str,
    placeholder_count: usize,
) -> ReaderPages {
    let urls = |pages: &[PageRef]| {
        pages
            .iter()
            .map(|page| assets::page_src(server_url, page.path()))
            .collect()
    };
    match fetched {
        Some(pages) if pages.is_empty() => ReaderPages::Placeholder(1),
        Some(pages) => ReaderPages::Real(urls(&pages)),
        None if embedded.is_empty() => ReaderPages::Placeholder(placeholder_count),
        None => ReaderPages::Real(urls(embedded)),
    }
}

// ---------------------------------------------------------------------------
// Chapter navigation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

impl Direction {
    /// `ArrowLeft` and `ArrowRight`; any other key is ignored.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Self::Prev),
            "ArrowRight" => Some(Self::Next),
            _ => None,
        }
    }
}

/// Position in an ascending chapter list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterNav {
    numbers: Vec<u32>,
    index: usize,
}

impl ChapterNav {
    /// `None` when there are no chapters or `start` is not among them.
    /// Without `start` the first chapter is active.
    pub fn new(numbers: Vec<u32>, start: Option<u32>) -> Option<Self> {
        let index = match start {
            Some(number) => numbers.iter().position(|&n| n == number)?,
            None if numbers.is_empty() => return None,
            None => 0,
        };
        Some(Self { numbers, index })
    }

    pub fn current(&self) -> u32 {
        self.numbers[self.index]
    }

    pub const fn has_prev(&self) -> bool {
        self.index > 0
    }

    pub fn has_next(&self) -> bool {
        self.index + 1 < self.numbers.len()
    }

    /// Move one chapter. Returns the new chapter, or `None` at an end.
    pub fn step(&mut self, direction: Direction) -> Option<u32> {
        match direction {
            Direction::Prev if self.has_prev() => self.index -= 1,
            Direction::Next if self.has_next() => self.index += 1,
            _ => return None,
        }
        Some(self.current())
    }

    pub fn jump(&mut self, number: u32) -> bool {
        match self.numbers.iter().position(|&n| n == number) {
            Some(index) => {
                self.index = index;
                true
            }
            None => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Scroll
// ---------------------------------------------------------------------------

const MILESTONES: [u8; 3] = [50, 70, 90];
const INDICATOR_FROM: f64 = 5.0;
const BACK_TO_TOP_FROM: f64 = 70.0;
const MILESTONE_RESET_BELOW: f64 = 10.0;

/// Result of one scroll event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScrollUpdate {
    pub percent: f64,
    pub show_indicator: bool,
    pub show_back_to_top: bool,
    /// Milestones crossed by this event, each reported once until reset.
    pub reached: Vec<u8>,
}

/// Reading progress through the page strip.
#[derive(Debug, Clone, Default)]
pub struct ScrollProgress {
    fired: [bool; MILESTONES.len()],
}

impl ScrollProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// A document no taller than the viewport reads as 0%.
    pub fn update(&mut self, top: f64, height: f64, viewport: f64) -> ScrollUpdate {
        let scrollable = height - viewport;
        let percent = if scrollable > 0.0 {
            (top / scrollable * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };

        if percent < MILESTONE_RESET_BELOW {
            self.fired = [false; MILESTONES.len()];
        }
        let mut reached = Vec::new();
        for (fired, milestone) in self.fired.iter_mut().zip(MILESTONES) {
            if !*fired && percent >= f64::from(milestone) {
                *fired = true;
                reached.push(milestone);
            }
        }

        ScrollUpdate {
            percent,
            show_indicator: percent > INDICATOR_FROM,
            show_back_to_top: percent > BACK_TO_TOP_FROM,
            reached,
        }
    }

    pub fn reset(&mut self) {
        self.fired = [false; MILESTONES.len()];
    }
}

// ---------------------------------------------------------------------------
// Reader
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Reader {
    manga: Manga,
    chapters: Vec<Chapter>,
    nav: ChapterNav,
    pages: ReaderPages,
    cursor: usize,
    scroll: ScrollProgress,
    server_url: String,
    placeholder_pages: usize,
}

impl Reader {
    /// Open `manga_id` at `chapter`, or at its first chapter.
    ///
    /// # Errors
    ///
    /// [`ReaderError::Api`] when the manga or its chapter list cannot be
    /// loaded, [`ReaderError::ChapterNotFound`] when the requested chapter
    /// does not exist or the manga has none.
    pub async fn open<S: KeyValueStore>(
        api: &MangaApi<S>,
        config: &MangaConfig,
        manga_id: i64,
        chapter: Option<u32>,
    ) -> Result<Self, ReaderError> {
        let manga = api.get_manga(manga_id).await?;
        let mut chapters = api.list_chapters(manga_id).await?;
        sort_chapters(&mut chapters);

        let numbers = chapters.iter().map(|c| c.number).collect();
        let nav = ChapterNav::new(numbers, chapter).ok_or(ReaderError::ChapterNotFound)?;

        let mut reader = Self {
            manga,
            chapters,
            nav,
            pages: ReaderPages::Placeholder(0),
            cursor: 0,
            scroll: ScrollProgress::new(),
            server_url: config.api.server_url.clone(),
            placeholder_pages: config.reader.placeholder_pages,
        };
        reader.load_pages(api).await;
        Ok(reader)
    }

    async fn load_pages<S: KeyValueStore>(&mut self, api: &MangaApi<S>) {
        let number = self.nav.current();
        let fetched = match api.chapter_pages(self.manga.id, number).await {
            Ok(pages) => Some(pages),
            Err(error) => {
                tracing::warn!(
                    %error,
                    manga = self.manga.id,
                    chapter = number,
                    "pages endpoint failed, using embedded pages"
                );
                None
            }
        };
        let embedded = self
            .chapters
            .iter()
            .find(|c| c.number == number)
            .map_or(&[][..], |c| c.pages.as_slice());
        self.pages = resolve_pages(fetched, embedded, &self.server_url, self.placeholder_pages);
        self.cursor = 0;
        self.scroll.reset();
    }

    /// Step one chapter. Returns false at an end, without a request.
    pub async fn go<S: KeyValueStore>(&mut self, api: &MangaApi<S>, direction: Direction) -> bool {
        if self.nav.step(direction).is_none() {
            return false;
        }
        self.load_pages(api).await;
        true
    }

    pub async fn prev<S: KeyValueStore>(&mut self, api: &MangaApi<S>) -> bool {
        self.go(api, Direction::Prev).await
    }

    pub async fn next<S: KeyValueStore>(&mut self, api: &MangaApi<S>) -> bool {
        self.go(api, Direction::Next).await
    }

    /// Switch to chapter `number`. Unknown numbers are ignored.
    pub async fn go_to_chapter<S: KeyValueStore>(&mut self, api: &MangaApi<S>, number: u32) -> bool {
        if !self.nav.jump(number) {
            return false;
        }
        self.load_pages(api).await;
        true
    }

    /// Keyboard navigation between chapters.
    pub async fn handle_key<S: KeyValueStore>(&mut self, api: &MangaApi<S>, key: &str) -> bool {
        match Direction::from_key(key) {
            Some(direction) => self.go(api, direction).await,
            None => false,
        }
    }

    /// Move the page cursor, clamped to the loaded pages.
    pub fn set_cursor(&mut self, index: usize) {
        self.cursor = index.min(self.pages.len().saturating_sub(1));
    }

    pub fn on_scroll(&mut self, top: f64, height: f64, viewport: f64) -> ScrollUpdate {
        self.scroll.update(top, height, viewport)
    }

    pub const fn manga(&self) -> &Manga {
        &self.manga
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn current_chapter(&self) -> u32 {
        self.nav.current()
    }

    pub const fn pages(&self) -> &ReaderPages {
        &self.pages
    }

    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    pub const fn prev_enabled(&self) -> bool {
        self.nav.has_prev()
    }

    pub fn next_enabled(&self) -> bool {
        self.nav.has_next()
    }

    /// `{cursor + 1} de {total}`
    pub fn page_indicator(&self) -> String {
        format!("{} de {}", self.cursor + 1, self.pages.len())
    }

    pub fn chapter_title(&self) -> String {
        chapter_label(self.current_chapter())
    }

    pub fn document_title(&self) -> String {
        format!("{} - {} - SiteManga", self.manga.title, self.chapter_title())
    }

    pub const fn back_link(&self) -> Page {
        Page::MangaDetail { id: self.manga.id }
    }

    /// Address of the current chapter, for sharing or reload.
    pub fn location(&self) -> Page {
        Page::Reader {
            manga_id: self.manga.id,
            chapter: Some(self.current_chapter()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BASE: &str = "http://localhost:4000";

    fn paths(raw: &[&str]) -> Vec<PageRef> {
        raw.iter().map(|p| PageRef::Path((*p).to_string())).collect()
    }

    #[test]
    fn fetched_pages_are_resolved() {
        let pages = resolve_pages(
            Some(paths(&["/uploads/1/1/0.png", "https://cdn.example/1.png"])),
            &[],
            BASE,
            5,
        );
        assert_eq!(
            pages,
            ReaderPages::Real(vec![
                "http://localhost:4000/uploads/1/1/0.png".into(),
                "https://cdn.example/1.png".into(),
            ])
        );
    }

    #[test]
    fn empty_fetch_shows_one_placeholder() {
        let embedded = paths(&["a.png"]);
        assert_eq!(
            resolve_pages(Some(Vec::new()), &embedded, BASE, 5),
            ReaderPages::Placeholder(1)
        );
    }

    #[test]
    fn failed_fetch_falls_back_to_embedded_then_placeholders() {
        assert_eq!(
            resolve_pages(None, &paths(&["1/2/0.jpg"]), BASE, 5),
            ReaderPages::Real(vec!["http://localhost:4000/uploads/1/2/0.jpg".into()])
        );
        assert_eq!(resolve_pages(None, &[], BASE, 5), ReaderPages::Placeholder(5));
    }

    #[test]
    fn nav_stops_at_the_ends() {
        let mut nav = ChapterNav::new(vec![1, 2, 3], None).unwrap();
        assert!(!nav.has_prev());
        assert_eq!(nav.step(Direction::Prev), None);
        assert_eq!(nav.step(Direction::Next), Some(2));
        assert_eq!(nav.step(Direction::Next), Some(3));
        assert!(!nav.has_next());
        assert_eq!(nav.step(Direction::Next), None);
        assert_eq!(nav.current(), 3);
    }

    #[test]
    fn nav_requires_a_known_chapter() {
        assert!(ChapterNav::new(vec![1, 2], Some(7)).is_none());
        assert!(ChapterNav::new(Vec::new(), None).is_none());
        assert_eq!(ChapterNav::new(vec![1, 4], Some(4)).unwrap().current(), 4);
    }

    #[test]
    fn arrow_keys_map_to_directions() {
        assert_eq!(Direction::from_key("ArrowLeft"), Some(Direction::Prev));
        assert_eq!(Direction::from_key("ArrowRight"), Some(Direction::Next));
        assert_eq!(Direction::from_key("Enter"), None);
    }

    #[test]
    fn scroll_percent_is_clamped() {
        let mut scroll = ScrollProgress::new();
        assert!((scroll.update(-50.0, 2000.0, 1000.0).percent).abs() < f64::EPSILON);
        assert!((scroll.update(5000.0, 2000.0, 1000.0).percent - 100.0).abs() < f64::EPSILON);
        assert!((scroll.update(0.0, 800.0, 1000.0).percent).abs() < f64::EPSILON);
    }

    #[test]
    fn milestones_fire_once_until_reset() {
        let mut scroll = ScrollProgress::new();
        let update = scroll.update(3.0, 1100.0, 1000.0);
        assert!(!update.show_indicator);
        assert!(update.reached.is_empty());

        let update = scroll.update(75.0, 1100.0, 1000.0);
        assert_eq!(update.reached, vec![50, 70]);
        assert!(update.show_back_to_top);

        assert_eq!(scroll.update(95.0, 1100.0, 1000.0).reached, vec![90]);
        assert!(scroll.update(60.0, 1100.0, 1000.0).reached.is_empty());

        scroll.update(5.0, 1100.0, 1000.0);
        assert_eq!(scroll.update(55.0, 1100.0, 1000.0).reached, vec![50]);
    }
}
