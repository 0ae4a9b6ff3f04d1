//! Core documentation lookup

use crate::config::DocsConfig;
use crate::extract::{extract_fragment, DocFragment};
use crate::links::{self, ExternalLink};
use crate::loader::{CachedLoader, DocumentLoader, RootLoader};
use crate::location::{DocPage, DocsRoot};
use crate::symbol::{symbol_at, DocumentationTarget};
use crate::types::SymbolAtCaret;
use crate::{DocError, Result};

/// Directories searched for a page referenced by bare name, after the
/// directory of the page containing the link
const PAGE_DIRS: [&str; 3] = ["commands", "misc", ""];

/// Documentation provider for AutoHotkey symbols
pub struct DocumentationProvider {
    docs_root: DocsRoot,
    browse_root: DocsRoot,
    loader: Box<dyn DocumentLoader>,
}

impl DocumentationProvider {
    /// Create a provider loading pages from `docs_root` through `loader`.
    pub fn new(docs_root: DocsRoot, loader: impl DocumentLoader + 'static) -> Self {
        Self {
            browse_root: docs_root.clone(),
            docs_root,
            loader: Box::new(loader),
        }
    }

    /// Create a provider with a cached file/HTTP loader as configured.
    pub fn from_config(config: &DocsConfig) -> Result<Self> {
        let mut loader = CachedLoader::new(
            RootLoader::new(&config.fetch)?,
            config.fetch.cache_capacity,
        );
        if let Some(ref dir) = config.fetch.cache_dir {
            loader = loader.with_disk_cache(dir);
        }

        Ok(Self::new(config.docs_root()?, loader).with_browse_root(config.browse_root()?))
    }

    /// Use a different root for user-facing URLs than for loading.
    pub fn with_browse_root(mut self, root: DocsRoot) -> Self {
        self.browse_root = root;
        self
    }

    pub fn docs_root(&self) -> &DocsRoot {
        &self.docs_root
    }

    /// The symbol documentation should be shown for at a caret position.
    pub fn custom_documentation_element(
        &self,
        source: &str,
        line: u32,
        column: u32,
    ) -> Option<SymbolAtCaret> {
        symbol_at(source, line, column)
            .filter(|symbol| symbol.target() != DocumentationTarget::Unknown)
    }

    /// Documentation URLs for a symbol; empty when it cannot be documented.
    pub fn url_for(&self, symbol: &str) -> Vec<String> {
        DocumentationTarget::classify(symbol)
            .page()
            .map(|page| vec![self.browse_root.url(&page)])
            .unwrap_or_default()
    }

    /// Whether a link is resolved inside the documentation.
    pub fn is_internal_link(&self, href: Option<&str>) -> bool {
        links::is_internal_link(href)
    }

    /// Whether a link names a page that can be fetched for display.
    pub fn can_fetch(&self, href: Option<&str>) -> bool {
        links::can_fetch(href)
    }

    /// Load and extract documentation for a symbol.
    pub fn load_documentation(&self, symbol: &str) -> Result<DocFragment> {
        let page = DocumentationTarget::classify(symbol)
            .page()
            .ok_or_else(|| DocError::UnresolvedSymbol(symbol.to_string()))?;
        self.load_page(&page)
    }

    /// Rendered documentation for a symbol, or `None` when there is none.
    pub fn generate_doc(&self, symbol: &str) -> Option<String> {
        log_absent(self.load_documentation(symbol)).map(|fragment| fragment.render())
    }

    /// Load and extract the page an in-documentation link points to.
    ///
    /// `context` is the symbol whose page contains the link.
    pub fn load_external(&self, href: &str, context: &str) -> Result<DocFragment> {
        let (path, anchor) = match ExternalLink::parse(href) {
            ExternalLink::Page { path, anchor } if !path.is_empty() => (path, anchor),
            _ => return Err(DocError::UnresolvedSymbol(href.to_string())),
        };

        let context_page = DocumentationTarget::classify(context)
            .page()
            .unwrap_or_else(|| DocPage::new(""));

        let mut last_err = DocError::UnresolvedSymbol(href.to_string());
        for candidate in candidate_pages(&context_page, &path) {
            let page = match &anchor {
                Some(anchor) => candidate.with_anchor(anchor.clone()),
                None => candidate,
            };
            match self.load_page(&page) {
                Err(e @ DocError::NotFound(_)) => {
                    tracing::debug!("{}", e);
                    last_err = e;
                }
                result => return result,
            }
        }

        Err(last_err)
    }

    /// Rendered documentation for a link target, or `None` when there is none.
    pub fn fetch_external_documentation(&self, href: &str, context: &str) -> Option<String> {
        log_absent(self.load_external(href, context)).map(|fragment| fragment.render())
    }

    fn load_page(&self, page: &DocPage) -> Result<DocFragment> {
        let location = self.docs_root.locate(page);
        let html = self.loader.load(&location)?;
        extract_fragment(&html, page.anchor.as_deref(), &location.to_string())
    }
}

/// Pages a link may refer to, most specific first.
fn candidate_pages(context: &DocPage, path: &str) -> Vec<DocPage> {
    let is_file_reference = path.contains('/') || path.ends_with(".htm") || path.ends_with(".html");
    if is_file_reference {
        return context.join(path).into_iter().collect();
    }

    let file = format!("{}.htm", path);
    let mut candidates: Vec<DocPage> = Vec::new();
    for dir in std::iter::once(context.dir()).chain(PAGE_DIRS) {
        let page = if dir.is_empty() {
            DocPage::new(file.clone())
        } else {
            DocPage::new(format!("{}/{}", dir, file))
        };
        if !candidates.contains(&page) {
            candidates.push(page);
        }
    }
    candidates
}

/// Turn a lookup failure into absent documentation.
fn log_absent(result: Result<DocFragment>) -> Option<DocFragment> {
    match result {
        Ok(fragment) => Some(fragment),
        Err(e @ DocError::UnresolvedSymbol(_)) => {
            tracing::debug!("{}", e);
            None
        }
        Err(e) => {
            tracing::warn!("No documentation: {}", e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::DocLocation;
    use std::collections::HashMap;

    struct MapLoader(HashMap<DocLocation, String>);

    impl DocumentLoader for MapLoader {
        fn load(&self, location: &DocLocation) -> Result<String> {
            self.0
                .get(location)
                .cloned()
                .ok_or_else(|| DocError::NotFound(location.to_string()))
        }
    }

    const ROOT: &str = "https://docs.test/ahk";

    fn provider(pages: &[(&str, &str)]) -> DocumentationProvider {
        let pages = pages
            .iter()
            .map(|(path, html)| (DocLocation::Url(format!("{}/{}", ROOT, path)), html.to_string()))
            .collect();
        DocumentationProvider::new(DocsRoot::parse(ROOT), MapLoader(pages))
    }

    fn page(title: &str, body: &str) -> String {
        format!(
            "<html><head><title>{}</title></head><body>{}</body></html>",
            title, body
        )
    }

    #[test]
    fn test_url_for_command() {
        let provider = provider(&[]);
        assert_eq!(
            provider.url_for("WinSet"),
            vec!["https://docs.test/ahk/commands/WinSet.htm".to_string()]
        );
    }

    #[test]
    fn test_url_for_variable() {
        let provider = provider(&[]);
        assert_eq!(
            provider.url_for("A_LineNumber"),
            vec!["https://docs.test/ahk/Variables.htm#LineNumber".to_string()]
        );
    }

    #[test]
    fn test_url_for_unknown() {
        let provider = provider(&[]);
        assert!(provider.url_for("1 + 2").is_empty());
    }

    #[test]
    fn test_url_for_uses_browse_root() {
        let provider = provider(&[])
            .with_browse_root(DocsRoot::parse("https://www.autohotkey.com/docs"));
        assert_eq!(
            provider.url_for("WinSet"),
            vec!["https://www.autohotkey.com/docs/commands/WinSet.htm".to_string()]
        );
    }

    #[test]
    fn test_generate_doc() {
        let html = page("MsgBox | AutoHotkey", "<h1>MsgBox</h1><p>Displays a message.</p>");
        let provider = provider(&[("commands/MsgBox.htm", &html)]);

        let doc = provider.generate_doc("MsgBox").unwrap();
        assert!(doc.contains("<title>MsgBox | AutoHotkey</title>"));
        assert!(doc.contains("<p>Displays a message.</p>"));
    }

    #[test]
    fn test_generate_doc_missing_page() {
        let provider = provider(&[]);
        assert!(provider.generate_doc("MsgBox").is_none());
        assert!(matches!(
            provider.load_documentation("MsgBox"),
            Err(DocError::NotFound(_))
        ));
    }

    #[test]
    fn test_generate_doc_unknown_symbol() {
        let provider = provider(&[]);
        assert!(provider.generate_doc("%%").is_none());
        assert!(matches!(
            provider.load_documentation("%%"),
            Err(DocError::UnresolvedSymbol(_))
        ));
    }

    #[test]
    fn test_external_sibling_first() {
        let sibling = page("WinGet | AutoHotkey", "<p>Sibling.</p>");
        let misc = page("WinGet (misc) | AutoHotkey", "<p>Misc.</p>");
        let provider = provider(&[("commands/WinGet.htm", &sibling), ("misc/WinGet.htm", &misc)]);

        let doc = provider.fetch_external_documentation("WinGet", "WinSet").unwrap();
        assert!(doc.contains("Sibling."));
    }

    #[test]
    fn test_external_falls_back_to_misc() {
        let html = page("WinTitle | AutoHotkey", "<p>Window titles.</p>");
        let provider = provider(&[("misc/WinTitle.htm", &html)]);

        let fragment = provider.load_external("WinTitle", "WinSet").unwrap();
        assert_eq!(fragment.source, "https://docs.test/ahk/misc/WinTitle.htm");
    }

    #[test]
    fn test_external_with_anchor() {
        let html = page(
            "WinTitle | AutoHotkey",
            "<p>Intro.</p><h2 id=\"ahk_id\">ahk_id</h2><p>Unique ID.</p>",
        );
        let provider = provider(&[("misc/WinTitle.htm", &html)]);

        let doc = provider
            .fetch_external_documentation("../misc/WinTitle.htm#ahk_id", "WinSet")
            .unwrap();
        assert!(doc.contains("Unique ID."));
        assert!(!doc.contains("Intro."));
    }

    #[test]
    fn test_external_not_fetchable() {
        let provider = provider(&[]);
        assert!(provider.fetch_external_documentation("#Remarks", "WinSet").is_none());
        assert!(provider
            .fetch_external_documentation("https://example.com", "WinSet")
            .is_none());
    }

    #[test]
    fn test_external_missing_everywhere() {
        let provider = provider(&[]);
        assert!(matches!(
            provider.load_external("Nowhere", "WinSet"),
            Err(DocError::NotFound(_))
        ));
    }

    #[test]
    fn test_candidate_pages_order() {
        let context = DocPage::new("commands/WinSet.htm");
        let paths: Vec<String> = candidate_pages(&context, "WinTitle")
            .into_iter()
            .map(|p| p.path)
            .collect();
        assert_eq!(
            paths,
            vec!["commands/WinTitle.htm", "misc/WinTitle.htm", "WinTitle.htm"]
        );
    }

    #[test]
    fn test_candidate_pages_from_root_page() {
        let context = DocPage::new("Variables.htm");
        let paths: Vec<String> = candidate_pages(&context, "Scripts")
            .into_iter()
            .map(|p| p.path)
            .collect();
        assert_eq!(paths, vec!["Scripts.htm", "commands/Scripts.htm", "misc/Scripts.htm"]);
    }

    #[test]
    fn test_custom_documentation_element() {
        let provider = provider(&[]);
        let symbol = provider
            .custom_documentation_element("WinSet, Top", 1, 2)
            .unwrap();
        assert_eq!(symbol.name, "WinSet");
        assert!(provider.custom_documentation_element("x := 42", 1, 6).is_none());
    }

    #[test]
    fn test_link_checks() {
        let provider = provider(&[]);
        assert!(provider.is_internal_link(Some("test")));
        assert!(!provider.can_fetch(Some("#test")));
    }
}
