//! Route parsing and resolution.
//!
//! A route is the `(section id, page id)` pair addressed as
//! `/{sectionId}/{pageId}`. Resolution never fails: an absent or unknown
//! section falls back to the first section, and an absent or unknown page
//! falls back to the first page of the resolved section.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

use docnav_shared::{Page, Section};

use crate::corpus::Corpus;

// ---------------------------------------------------------------------------
// Route
// ---------------------------------------------------------------------------

/// A navigation address. Both segments are optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Route {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_id: Option<String>,
}

impl Route {
    pub fn new(section_id: impl Into<String>, page_id: impl Into<String>) -> Self {
        Self {
            section_id: Some(section_id.into()),
            page_id: Some(page_id.into()),
        }
    }

    /// The empty route, which resolves to the default page.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a navigation address.
    ///
    /// Accepts `/{s}/{p}`, `{s}/{p}`, hash-router addresses (`#/{s}/{p}`) and
    /// absolute URLs whose fragment or path carries the route. Every segment
    /// is percent-decoded, whichever form it came in; a segment that does not
    /// decode to UTF-8 is kept as written. Empty segments are skipped and
    /// anything past the second segment is ignored.
    pub fn parse(address: &str) -> Self {
        let address = address.trim();

        let path = match Url::parse(address) {
            Ok(url) => match url.fragment() {
                Some(fragment) if fragment.starts_with('/') => fragment.to_string(),
                _ => url.path().to_string(),
            },
            Err(_) => address.trim_start_matches('#').to_string(),
        };

        // Drop any query string left on a fragment route.
        let path = path.split('?').next().unwrap_or_default();

        let mut segments = path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(decode_segment);

        Self {
            section_id: segments.next(),
            page_id: segments.next(),
        }
    }
}

fn decode_segment(segment: &str) -> String {
    match urlencoding::decode(segment) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => segment.to_string(),
    }
}

impl FromStr for Route {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.section_id, &self.page_id) {
            (Some(section), Some(page)) => write!(f, "/{section}/{page}"),
            (Some(section), None) => write!(f, "/{section}"),
            // A page without a section has no address of its own.
            (None, _) => f.write_str("/"),
        }
    }
}

/// Route path for a section/page pair.
pub fn page_path(section_id: &str, page_id: &str) -> String {
    format!("/{section_id}/{page_id}")
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// The concrete page a route resolved to.
#[derive(Debug, Clone, Copy)]
pub struct Resolution<'a> {
    pub section: &'a Section,
    pub page: &'a Page,
    /// A section id was given but did not match any section.
    pub section_fallback: bool,
    /// A page id was given but did not match any page of the resolved section.
    pub page_fallback: bool,
}

impl Resolution<'_> {
    /// Whether every given segment matched.
    pub fn is_exact(&self) -> bool {
        !self.section_fallback && !self.page_fallback
    }

    /// The canonical route of the resolved page.
    pub fn route(&self) -> Route {
        Route::new(&self.section.id, &self.page.id)
    }

    /// `"<section title> / <page title>"`.
    pub fn breadcrumb(&self) -> String {
        format!("{} / {}", self.section.title, self.page.title)
    }
}

/// Resolve optional ids to a concrete section and page.
///
/// Blank ids count as absent. Unknown ids are corrected silently.
pub fn resolve<'a>(
    corpus: &'a Corpus,
    section_id: Option<&str>,
    page_id: Option<&str>,
) -> Resolution<'a> {
    let section_id = section_id.filter(|id| !id.is_empty());
    let page_id = page_id.filter(|id| !id.is_empty());

    let found_section = section_id.and_then(|id| corpus.section_position(id));
    let section_pos = found_section.unwrap_or(0);
    let section = &corpus.sections()[section_pos];

    let found_page = page_id.and_then(|id| corpus.page_position(section_pos, id));
    // Sections are non-empty by construction.
    let page = &section.pages[found_page.unwrap_or(0)];

    let resolution = Resolution {
        section,
        page,
        section_fallback: section_id.is_some() && found_section.is_none(),
        page_fallback: page_id.is_some() && found_page.is_none(),
    };

    if !resolution.is_exact() {
        debug!(
            requested_section = section_id,
            requested_page = page_id,
            section = %section.id,
            page = %page.id,
            "route fell back"
        );
    }

    resolution
}

/// Resolve a parsed [`Route`].
pub fn resolve_route<'a>(corpus: &'a Corpus, route: &Route) -> Resolution<'a> {
    resolve(corpus, route.section_id.as_deref(), route.page_id.as_deref())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::bundled;
    use crate::test_support::{page, section};

    fn two_section_corpus() -> Corpus {
        Corpus::new(vec![
            section(
                "guide",
                "Guide",
                vec![page("intro", "Intro", vec![]), page("setup", "Setup", vec![])],
            ),
            section(
                "api",
                "API",
                vec![page("overview", "Overview", vec![]), page("auth", "Auth", vec![])],
            ),
        ])
        .expect("corpus")
    }

    fn ids(r: &Resolution<'_>) -> (String, String) {
        (r.section.id.clone(), r.page.id.clone())
    }

    #[test]
    fn default_route_is_first_page_of_first_section() {
        let corpus = two_section_corpus();
        let r = resolve(&corpus, None, None);
        assert_eq!(ids(&r), ("guide".into(), "intro".into()));
        assert!(r.is_exact());
    }

    #[test]
    fn exact_route() {
        let corpus = two_section_corpus();
        let r = resolve(&corpus, Some("api"), Some("auth"));
        assert_eq!(ids(&r), ("api".into(), "auth".into()));
        assert!(r.is_exact());
        assert_eq!(r.route().to_string(), "/api/auth");
    }

    #[test]
    fn unknown_page_falls_back_within_section() {
        let corpus = two_section_corpus();
        let r = resolve(&corpus, Some("api"), Some("missing"));
        assert_eq!(ids(&r), ("api".into(), "overview".into()));
        assert!(!r.section_fallback);
        assert!(r.page_fallback);

        let r = resolve(&corpus, Some("api"), None);
        assert_eq!(ids(&r), ("api".into(), "overview".into()));
        assert!(r.is_exact());
    }

    #[test]
    fn unknown_section_behaves_like_absent_section() {
        let corpus = two_section_corpus();
        for page_id in [None, Some("setup"), Some("auth"), Some("missing")] {
            let unknown = resolve(&corpus, Some("nonexistent"), page_id);
            let absent = resolve(&corpus, None, page_id);
            assert_eq!(ids(&unknown), ids(&absent), "page_id = {page_id:?}");
            assert!(unknown.section_fallback);
        }
    }

    #[test]
    fn page_of_other_section_is_not_borrowed() {
        let corpus = two_section_corpus();
        // "auth" lives in "api", so the default section falls back to its first page.
        let r = resolve(&corpus, None, Some("auth"));
        assert_eq!(ids(&r), ("guide".into(), "intro".into()));
        assert!(r.page_fallback);
    }

    #[test]
    fn blank_segments_count_as_absent() {
        let corpus = two_section_corpus();
        let r = resolve(&corpus, Some(""), Some(""));
        assert_eq!(ids(&r), ("guide".into(), "intro".into()));
        assert!(r.is_exact());
    }

    #[test]
    fn bundled_default_load() {
        let corpus = bundled().expect("bundled corpus");
        let r = resolve(&corpus, None, None);
        assert_eq!(r.section.id, "architecture");
        assert_eq!(r.section.title, "1. Architecture Overview");
        assert_eq!(r.page.id, "system-architecture");
        assert_eq!(
            r.breadcrumb(),
            "1. Architecture Overview / 1.1 System Architecture"
        );
    }

    #[test]
    fn bundled_unknown_section_and_page() {
        let corpus = bundled().expect("bundled corpus");
        let default = resolve(&corpus, None, None);
        let unknown = resolve(&corpus, Some("nonexistent"), Some("nonexistent"));
        assert_eq!(ids(&unknown), ids(&default));
    }

    #[test]
    fn parse_plain_paths() {
        assert_eq!(
            Route::parse("/architecture/core-patterns"),
            Route::new("architecture", "core-patterns")
        );
        assert_eq!(
            Route::parse("modules/css-engine/"),
            Route::new("modules", "css-engine")
        );
        assert_eq!(
            Route::parse("//modules///css-engine/extra"),
            Route::new("modules", "css-engine")
        );
        assert_eq!(
            Route::parse("/modules"),
            Route {
                section_id: Some("modules".into()),
                page_id: None,
            }
        );
        assert_eq!(Route::parse(""), Route::root());
        assert_eq!(Route::parse("/"), Route::root());
    }

    #[test]
    fn parse_hash_and_url_addresses() {
        assert_eq!(
            Route::parse("#/development/local-dev"),
            Route::new("development", "local-dev")
        );
        assert_eq!(
            Route::parse("https://docs.example.com/#/modules/react-sdk"),
            Route::new("modules", "react-sdk")
        );
        assert_eq!(
            Route::parse("https://docs.example.com/modules/react-sdk?tab=1"),
            Route::new("modules", "react-sdk")
        );
        assert_eq!(
            Route::parse("#/modules/react-sdk?from=search"),
            Route::new("modules", "react-sdk")
        );
    }

    #[test]
    fn parse_decodes_segments_in_every_form() {
        let expected = Route::new("a b", "c");
        for address in [
            "https://h/#/a%20b/c",
            "https://h/a%20b/c",
            "#/a%20b/c",
            "/a%20b/c",
            "/a b/c",
        ] {
            assert_eq!(Route::parse(address), expected, "address {address:?}");
        }

        // Not valid UTF-8 once decoded, so kept verbatim.
        assert_eq!(Route::parse("/%FF/c").section_id.as_deref(), Some("%FF"));
    }

    #[test]
    fn route_display() {
        assert_eq!(Route::new("a", "b").to_string(), "/a/b");
        assert_eq!(Route::parse("/a").to_string(), "/a");
        assert_eq!(Route::root().to_string(), "/");
        assert_eq!(page_path("a", "b"), "/a/b");
    }

    #[test]
    fn resolve_parsed_route() {
        let corpus = two_section_corpus();
        let route: Route = "/api/auth".parse().expect("infallible");
        let r = resolve_route(&corpus, &route);
        assert_eq!(r.route(), route);
    }
}
