//! Image URL resolution.
//!
//! Uploaded assets live under `/uploads/` on the API server, which is a
//! different origin from the pages, so relative paths get the server base.

/// Image shown when a manga has no usable cover.
pub const PLACEHOLDER_COVER: &str = "asset/logo.png";

const UPLOADS_PREFIX: &str = "/uploads/";

/// Resolve a cover path to a displayable URL.
///
/// Empty covers, and the literal strings `undefined`/`null` that older
/// records carry, resolve to [`PLACEHOLDER_COVER`].
#[must_use]
pub fn cover_src(server_base: &str, cover: Option<&str>) -> String {
    let Some(cover) = cover.map(str::trim) else {
        return PLACEHOLDER_COVER.to_string();
    };
    if cover.is_empty() || cover == "undefined" || cover == "null" {
        return PLACEHOLDER_COVER.to_string();
    }
    if cover.starts_with(UPLOADS_PREFIX) {
        return format!("{}{cover}", server_base.trim_end_matches('/'));
    }
    cover.to_string()
}

/// Resolve a chapter page path to a displayable URL.
///
/// Absolute URLs pass through, `/uploads/...` gets the server base, and any
/// other relative path is taken to be relative to `/uploads/`.
#[must_use]
pub fn page_src(server_base: &str, path: &str) -> String {
    if path.is_empty() || path.starts_with("http") {
        return path.to_string();
    }
    let base = server_base.trim_end_matches('/');
    if path.starts_with(UPLOADS_PREFIX) {
        format!("{base}{path}")
    } else {
        format!("{base}{UPLOADS_PREFIX}{}", path.trim_start_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const BASE: &str = "http://localhost:4000";

    #[rstest]
    #[case(None, PLACEHOLDER_COVER)]
    #[case(Some(""), PLACEHOLDER_COVER)]
    #[case(Some("undefined"), PLACEHOLDER_COVER)]
    #[case(Some("null"), PLACEHOLDER_COVER)]
    #[case(Some("/uploads/covers/a.png"), "http://localhost:4000/uploads/covers/a.png")]
    #[case(Some("https://cdn.example/a.png"), "https://cdn.example/a.png")]
    fn resolves_covers(#[case] cover: Option<&str>, #[case] expected: &str) {
        assert_eq!(cover_src(BASE, cover), expected);
    }

    #[rstest]
    #[case("https://cdn.example/p1.png", "https://cdn.example/p1.png")]
    #[case("/uploads/ch1/p1.png", "http://localhost:4000/uploads/ch1/p1.png")]
    #[case("ch1/p1.png", "http://localhost:4000/uploads/ch1/p1.png")]
    #[case("", "")]
    fn resolves_pages(#[case] path: &str, #[case] expected: &str) {
        assert_eq!(page_src(BASE, path), expected);
    }

    #[test]
    fn trailing_slash_on_base_is_ignored() {
        assert_eq!(
            page_src("http://localhost:4000/", "/uploads/x.png"),
            "http://localhost:4000/uploads/x.png"
        );
    }
}
