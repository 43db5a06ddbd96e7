//! The catalog screen: one fetch, then search, filter, sort, and paging in
//! memory.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use manga_api::MangaApi;
use manga_auth::KeyValueStore;
use manga_core::messages::{LATEST_ONLY, MANGAS_LOAD_FAILED};
use manga_core::{CoreError, Manga};

use crate::notify::Notifications;

/// Sort options of the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Highest id first.
    #[default]
    Newest,
    Oldest,
    Title,
    /// Most chapters first.
    Chapters,
    Status,
}

impl SortOrder {
    pub const ALL: [Self; 5] = [
        Self::Newest,
        Self::Oldest,
        Self::Title,
        Self::Chapters,
        Self::Status,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::Title => "title",
            Self::Chapters => "chapters",
            Self::Status => "status",
        }
    }

    fn compare(self, a: &Manga, b: &Manga) -> Ordering {
        match self {
            Self::Newest => b.id.cmp(&a.id),
            Self::Oldest => a.id.cmp(&b.id),
            Self::Title => text_order(&a.title, &b.title),
            Self::Chapters => b.chapter_count().cmp(&a.chapter_count()),
            Self::Status => text_order(&a.status, &b.status),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOrder {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|order| order.as_str() == wanted)
            .ok_or_else(|| CoreError::InvalidValue {
                field: "sort".into(),
                value: s.to_string(),
            })
    }
}

/// Case-insensitive first, then exact, so the order is total.
fn text_order(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

/// Filter state of the catalog form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    pub search: String,
    /// Exact status string, as stored. `None` means all.
    pub status: Option<String>,
    pub sort: SortOrder,
}

/// One control in the page strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PageItem {
    Page { number: usize, active: bool },
    Ellipsis,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub current: usize,
    pub total_pages: usize,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    pub items: Vec<PageItem>,
    /// `Mostrando {start}-{end} de {total} mangás`
    pub summary: String,
}

/// Pages shown on each side of the current one.
const WINDOW: usize = 2;

impl Pagination {
    /// `None` when everything fits on one page.
    pub fn build(current: usize, total_items: usize, page_size: usize) -> Option<Self> {
        let total_pages = total_items.div_ceil(page_size.max(1));
        if total_pages <= 1 {
            return None;
        }
        let current = current.clamp(1, total_pages);
        let start = current.saturating_sub(WINDOW).max(1);
        let end = (current + WINDOW).min(total_pages);

        let mut items = Vec::new();
        if start > 1 {
            items.push(PageItem::Page {
                number: 1,
                active: false,
            });
            if start > 2 {
                items.push(PageItem::Ellipsis);
            }
        }
        items.extend((start..=end).map(|number| PageItem::Page {
            number,
            active: number == current,
        }));
        if end < total_pages {
            if end + 1 < total_pages {
                items.push(PageItem::Ellipsis);
            }
            items.push(PageItem::Page {
                number: total_pages,
                active: false,
            });
        }

        let first = (current - 1) * page_size + 1;
        let last = (current * page_size).min(total_items);
        Some(Self {
            current,
            total_pages,
            prev_enabled: current > 1,
            next_enabled: current < total_pages,
            items,
            summary: format!("Mostrando {first}-{last} de {total_items} mangás"),
        })
    }
}

/// Catalog screen state.
#[derive(Debug, Clone)]
pub struct Catalog {
    all: Vec<Manga>,
    filtered: Vec<Manga>,
    query: CatalogQuery,
    latest_only: bool,
    page: usize,
    page_size: usize,
}

impl Catalog {
    pub fn new(mangas: Vec<Manga>, page_size: usize) -> Self {
        let mut catalog = Self {
            filtered: Vec::new(),
            all: mangas,
            query: CatalogQuery::default(),
            latest_only: false,
            page: 1,
            page_size: page_size.max(1),
        };
        catalog.apply(CatalogQuery::default());
        catalog
    }

    /// Fetch the catalog once. On failure the catalog is empty and an error
    /// toast is raised.
    pub async fn load<S: KeyValueStore>(
        api: &MangaApi<S>,
        page_size: usize,
        notes: &mut Notifications,
    ) -> Self {
        let mangas = match api.list_mangas().await {
            Ok(mangas) => mangas,
            Err(error) => {
                tracing::warn!(%error, "catalog load failed");
                notes.error(error.user_message(MANGAS_LOAD_FAILED));
                Vec::new()
            }
        };
        Self::new(mangas, page_size)
    }

    /// Filter and sort. Always returns to page 1.
    pub fn apply(&mut self, query: CatalogQuery) {
        let needle = query.search.trim().to_lowercase();
        let mut filtered: Vec<Manga> = self
            .all
            .iter()
            .filter(|manga| manga.matches_search(&needle))
            .filter(|manga| query.status.as_ref().is_none_or(|status| &manga.status == status))
            .cloned()
            .collect();
        filtered.sort_by(|a, b| query.sort.compare(a, b));

        self.filtered = filtered;
        self.query = query;
        self.latest_only = false;
        self.page = 1;
    }

    /// Show only entries flagged as latest, clearing search and status.
    pub fn show_latest_only(&mut self, notes: &mut Notifications) {
        self.query.search.clear();
        self.query.status = None;
        self.filtered = self.all.iter().filter(|m| m.is_latest).cloned().collect();
        self.latest_only = true;
        self.page = 1;
        notes.info(LATEST_ONLY);
    }

    /// Jump to a page. Out-of-range pages are ignored.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page < 1 || page > self.total_pages() {
            return false;
        }
        self.page = page;
        true
    }

    pub const fn page(&self) -> usize {
        self.page
    }

    pub fn total_pages(&self) -> usize {
        self.filtered.len().div_ceil(self.page_size)
    }

    pub const fn query(&self) -> &CatalogQuery {
        &self.query
    }

    pub const fn is_latest_only(&self) -> bool {
        self.latest_only
    }

    /// Everything matching the current filters, in sort order.
    pub fn filtered(&self) -> &[Manga] {
        &self.filtered
    }

    /// The slice of [`Self::filtered`] on the current page.
    pub fn current_items(&self) -> &[Manga] {
        let start = ((self.page - 1) * self.page_size).min(self.filtered.len());
        let end = (start + self.page_size).min(self.filtered.len());
        &self.filtered[start..end]
    }

    pub fn pagination(&self) -> Option<Pagination> {
        Pagination::build(self.page, self.filtered.len(), self.page_size)
    }

    /// `{n} mangás encontrados`, or `{filtered} de {total} mangás`.
    pub fn results_label(&self) -> String {
        let total = self.all.len();
        let shown = self.filtered.len();
        if shown == total {
            format!("{total} mangás encontrados")
        } else {
            format!("{shown} de {total} mangás")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn manga(id: i64, title: &str, status: &str, chapters: usize) -> Manga {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "title": title,
            "description": format!("descrição de {title}"),
            "status": status,
            "isLatest": id % 2 == 0,
            "chapters": (1..=chapters).map(|n| serde_json::json!({"number": n})).collect::<Vec<_>>(),
        }))
        .unwrap()
    }

    fn sample() -> Vec<Manga> {
        vec![
            manga(1, "Berserk", "Finalizado", 3),
            manga(2, "akira", "Finalizado", 1),
            manga(3, "Chainsaw Man", "Em andamento", 5),
            manga(4, "Dorohedoro", "finalizado", 0),
        ]
    }

    fn ids(mangas: &[Manga]) -> Vec<i64> {
        mangas.iter().map(|m| m.id).collect()
    }

    #[test]
    fn status_filter_is_exact_and_order_independent() {
        let mut forward = Catalog::new(sample(), 16);
        let mut reversed_input = sample();
        reversed_input.reverse();
        let mut backward = Catalog::new(reversed_input, 16);

        for catalog in [&mut forward, &mut backward] {
            catalog.apply(CatalogQuery {
                status: Some("Finalizado".into()),
                sort: SortOrder::Oldest,
                ..CatalogQuery::default()
            });
        }

        assert_eq!(ids(forward.filtered()), vec![1, 2]);
        assert_eq!(ids(backward.filtered()), vec![1, 2]);
        assert_eq!(forward.results_label(), "2 de 4 mangás");
    }

    #[rstest]
    #[case(SortOrder::Newest, vec![4, 3, 2, 1])]
    #[case(SortOrder::Oldest, vec![1, 2, 3, 4])]
    #[case(SortOrder::Title, vec![2, 1, 3, 4])]
    #[case(SortOrder::Chapters, vec![3, 1, 2, 4])]
    #[case(SortOrder::Status, vec![3, 1, 2, 4])]
    fn sorts(#[case] sort: SortOrder, #[case] expected: Vec<i64>) {
        let mut catalog = Catalog::new(sample(), 16);
        catalog.apply(CatalogQuery {
            sort,
            ..CatalogQuery::default()
        });
        assert_eq!(ids(catalog.filtered()), expected);
    }

    #[test]
    fn search_is_trimmed_and_case_insensitive() {
        let mut catalog = Catalog::new(sample(), 16);
        catalog.apply(CatalogQuery {
            search: "  CHAINSAW ".into(),
            ..CatalogQuery::default()
        });
        assert_eq!(ids(catalog.filtered()), vec![3]);

        catalog.apply(CatalogQuery {
            search: "descrição de a".into(),
            ..CatalogQuery::default()
        });
        assert_eq!(ids(catalog.filtered()), vec![2]);
    }

    #[test]
    fn applying_filters_resets_page() {
        let mangas: Vec<Manga> = (1..=40).map(|id| manga(id, "x", "Finalizado", 0)).collect();
        let mut catalog = Catalog::new(mangas, 16);
        assert!(catalog.go_to_page(3));
        assert_eq!(catalog.current_items().len(), 8);
        catalog.apply(CatalogQuery::default());
        assert_eq!(catalog.page(), 1);
        assert!(!catalog.go_to_page(4));
        assert!(!catalog.go_to_page(0));
    }

    #[test]
    fn latest_only_clears_query_and_notifies() {
        let mut catalog = Catalog::new(sample(), 16);
        catalog.apply(CatalogQuery {
            search: "berserk".into(),
            ..CatalogQuery::default()
        });
        let mut notes = Notifications::new();
        catalog.show_latest_only(&mut notes);
        assert_eq!(ids(catalog.filtered()), vec![2, 4]);
        assert!(catalog.query().search.is_empty());
        assert_eq!(notes.current().unwrap().message, LATEST_ONLY);
    }

    #[test]
    fn single_page_has_no_pagination() {
        assert!(Pagination::build(1, 16, 16).is_none());
        assert!(Pagination::build(1, 0, 16).is_none());
    }

    #[test]
    fn pagination_window_with_ellipses() {
        let strip = Pagination::build(6, 200, 16).unwrap();
        assert_eq!(strip.total_pages, 13);
        let numbers: Vec<String> = strip
            .items
            .iter()
            .map(|item| match item {
                PageItem::Page { number, active: true } => format!("[{number}]"),
                PageItem::Page { number, .. } => number.to_string(),
                PageItem::Ellipsis => "...".into(),
            })
            .collect();
        assert_eq!(numbers, vec!["1", "...", "4", "5", "[6]", "7", "8", "...", "13"]);
        assert_eq!(strip.summary, "Mostrando 81-96 de 200 mangás");
        assert!(strip.prev_enabled && strip.next_enabled);
    }

    #[test]
    fn pagination_edges() {
        let first = Pagination::build(1, 40, 16).unwrap();
        assert!(!first.prev_enabled);
        assert_eq!(first.items.len(), 3);
        assert_eq!(first.summary, "Mostrando 1-16 de 40 mangás");

        let last = Pagination::build(3, 40, 16).unwrap();
        assert!(!last.next_enabled);
        assert_eq!(last.summary, "Mostrando 33-40 de 40 mangás");

        // last page right after the window: no ellipsis
        let strip = Pagination::build(3, 16 * 6, 16).unwrap();
        assert!(!strip.items.contains(&PageItem::Ellipsis));
    }
}
