//! HTML fragment extraction from documentation pages.

use crate::{DocError, Result};
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use std::sync::LazyLock;

static TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());
static HEADING: LazyLock<Selector> = LazyLock::new(|| Selector::parse("body h1").unwrap());
static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| Selector::parse("body p").unwrap());
static ANCHORED: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("[id], a[name]").unwrap());
static CELL: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());

/// Documentation extracted from one page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocFragment {
    /// Title text (e.g., "WinSet - Syntax & Usage | AutoHotkey")
    pub title: String,
    /// The `<title>` element as found in the page, entities escaped
    pub title_html: String,
    /// First `<h1>` of the page
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading_html: Option<String>,
    /// First paragraph, or the definition under the requested anchor
    pub description_html: String,
    /// Where the page was loaded from
    pub source: String,
}

impl DocFragment {
    /// HTML for a documentation popup.
    pub fn render(&self) -> String {
        let mut html = String::new();
        html.push_str(&self.title_html);
        html.push('\n');
        if let Some(ref heading) = self.heading_html {
            html.push_str(heading);
            html.push('\n');
        }
        html.push_str(&self.description_html);
        html
    }
}

/// Extract the title and description block from a documentation page.
///
/// Without an anchor the description is the first non-blank paragraph of the
/// body. With an anchor it is the element carrying that `id` (or `<a name>`):
/// a table row yields its last cell, a heading or `<dt>` yields itself and
/// the element after it.
pub fn extract_fragment(html: &str, anchor: Option<&str>, source: &str) -> Result<DocFragment> {
    let document = Html::parse_document(html);

    let title = document
        .select(&TITLE)
        .next()
        .ok_or_else(|| DocError::Extraction(format!("{} (no <title>)", source)))?;

    let description_html = match anchor {
        Some(anchor) => {
            let target = document
                .select(&ANCHORED)
                .find(|el| {
                    let value = el.value();
                    value.id() == Some(anchor) || value.attr("name") == Some(anchor)
                })
                .ok_or_else(|| {
                    DocError::Extraction(format!("{} (no element for #{})", source, anchor))
                })?;
            describe_anchored(target)
        }
        None => document
            .select(&PARAGRAPH)
            .find(|p| !text_of(*p).is_empty())
            .map(|p| p.html())
            .ok_or_else(|| DocError::Extraction(format!("{} (no paragraph)", source)))?,
    };

    // The anchored definition already says which symbol it is about
    let heading_html = match anchor {
        Some(_) => None,
        None => document.select(&HEADING).next().map(|h| h.html()),
    };

    Ok(DocFragment {
        title: text_of(title),
        title_html: title.html(),
        heading_html,
        description_html,
        source: source.to_string(),
    })
}

fn describe_anchored(target: ElementRef<'_>) -> String {
    match target.value().name() {
        "tr" => match target.select(&CELL).last() {
            Some(cell) => format!("<p>{}</p>", cell.inner_html().trim()),
            None => target.html(),
        },
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "dt" => {
            let mut html = target.html();
            if let Some(next) = target.next_siblings().find_map(ElementRef::wrap) {
                html.push('\n');
                html.push_str(&next.html());
            }
            html
        }
        // <a name="..."> markers sit inside the block they label
        "a" => target
            .parent()
            .and_then(ElementRef::wrap)
            .map(|parent| parent.html())
            .unwrap_or_else(|| target.html()),
        _ => target.html(),
    }
}

/// Whitespace-normalized text content of an element.
fn text_of(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMMAND_PAGE: &str = r#"<!DOCTYPE HTML>
<html lang="en">
<head>
<title>WinSet - Syntax &amp; Usage | AutoHotkey</title>
</head>
<body>
<h1>WinSet</h1>
<p>   </p>
<p>Makes a variety of changes to the specified window, such as "always on top" &amp; transparency.</p>
<p>Second paragraph.</p>
</body>
</html>"#;

    const VARIABLES_PAGE: &str = r#"<html>
<head><title>Variables and Expressions | AutoHotkey</title></head>
<body>
<h1>Variables</h1>
<p>Intro.</p>
<table>
<tr id="LineNumber"><td>A_LineNumber</td><td>The number of the currently executing line within the script.</td></tr>
</table>
<h2 id="BuiltIn">Built-in Variables</h2>
<p>The following variables are built into the program.</p>
<p><a name="Legacy"></a>Legacy anchor paragraph.</p>
</body>
</html>"#;

    #[test]
    fn test_title_keeps_entities() {
        let fragment = extract_fragment(COMMAND_PAGE, None, "WinSet.htm").unwrap();
        assert_eq!(
            fragment.title_html,
            "<title>WinSet - Syntax &amp; Usage | AutoHotkey</title>"
        );
        assert_eq!(fragment.title, "WinSet - Syntax & Usage | AutoHotkey");
    }

    #[test]
    fn test_first_nonblank_paragraph() {
        let fragment = extract_fragment(COMMAND_PAGE, None, "WinSet.htm").unwrap();
        assert!(fragment.description_html.starts_with("<p>Makes a variety"));
        assert!(fragment.description_html.contains("&amp; transparency"));
        assert_eq!(fragment.heading_html.as_deref(), Some("<h1>WinSet</h1>"));
    }

    #[test]
    fn test_render() {
        let fragment = extract_fragment(COMMAND_PAGE, None, "WinSet.htm").unwrap();
        let html = fragment.render();
        assert!(html.starts_with("<title>"));
        assert!(html.contains("<h1>WinSet</h1>\n<p>Makes"));
        assert!(!html.contains("Second paragraph"));
    }

    #[test]
    fn test_anchor_table_row() {
        let fragment =
            extract_fragment(VARIABLES_PAGE, Some("LineNumber"), "Variables.htm").unwrap();
        assert_eq!(
            fragment.description_html,
            "<p>The number of the currently executing line within the script.</p>"
        );
        assert!(fragment.heading_html.is_none());
    }

    #[test]
    fn test_anchor_heading() {
        let fragment = extract_fragment(VARIABLES_PAGE, Some("BuiltIn"), "Variables.htm").unwrap();
        assert!(fragment.description_html.starts_with("<h2 id=\"BuiltIn\">"));
        assert!(fragment
            .description_html
            .contains("<p>The following variables are built into the program.</p>"));
    }

    #[test]
    fn test_anchor_by_name() {
        let fragment = extract_fragment(VARIABLES_PAGE, Some("Legacy"), "Variables.htm").unwrap();
        assert!(fragment.description_html.contains("Legacy anchor paragraph."));
    }

    #[test]
    fn test_missing_anchor() {
        let result = extract_fragment(VARIABLES_PAGE, Some("Nope"), "Variables.htm");
        assert!(matches!(result, Err(DocError::Extraction(_))));
    }

    #[test]
    fn test_missing_title() {
        let result = extract_fragment("<html><body><p>Text</p></body></html>", None, "x.htm");
        assert!(matches!(result, Err(DocError::Extraction(_))));
    }

    #[test]
    fn test_missing_paragraph() {
        let html = "<html><head><title>Empty</title></head><body><h1>Empty</h1></body></html>";
        let result = extract_fragment(html, None, "x.htm");
        assert!(matches!(result, Err(DocError::Extraction(_))));
    }
}
