//! Classification of links found inside documentation pages.

use regex::Regex;
use std::sync::LazyLock;

/// URI scheme prefix (`https:`, `mailto:`, `file:`)
static SCHEME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.-]*:").unwrap());

/// A link target as written in a documentation page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExternalLink {
    /// In-page anchor: `#Remarks`
    Anchor(String),
    /// Fully qualified reference: `https://...`
    Absolute(String),
    /// Page of the same documentation tree: `WinTitle`, `../misc/WinTitle.htm#ahk_id`
    Page {
        path: String,
        anchor: Option<String>,
    },
}

impl ExternalLink {
    /// Classify an href by its leading characters.
    pub fn parse(href: &str) -> Self {
        let href = href.trim();

        if let Some(anchor) = href.strip_prefix('#') {
            return ExternalLink::Anchor(anchor.to_string());
        }
        if has_scheme(href) {
            return ExternalLink::Absolute(href.to_string());
        }

        match href.split_once('#') {
            Some((path, anchor)) => ExternalLink::Page {
                path: path.to_string(),
                anchor: (!anchor.is_empty()).then(|| anchor.to_string()),
            },
            None => ExternalLink::Page {
                path: href.to_string(),
                anchor: None,
            },
        }
    }

    /// Whether this link must be loaded from a page other than the current one.
    pub fn is_fetchable(&self) -> bool {
        matches!(self, ExternalLink::Page { path, .. } if !path.is_empty())
    }
}

fn has_scheme(href: &str) -> bool {
    href.get(..4)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("http"))
        || SCHEME_PATTERN.is_match(href)
}

/// Whether a link is handled without navigating away from the documentation.
///
/// No link, in-page anchors and references to sibling pages are internal;
/// scheme-qualified links are not.
pub fn is_internal_link(href: Option<&str>) -> bool {
    match href {
        None => true,
        Some(href) => !matches!(ExternalLink::parse(href), ExternalLink::Absolute(_)),
    }
}

/// Whether a link names a sibling documentation page that can be fetched.
pub fn can_fetch(href: Option<&str>) -> bool {
    href.is_some_and(|href| ExternalLink::parse(href).is_fetchable())
}
