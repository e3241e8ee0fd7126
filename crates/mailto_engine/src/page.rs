use std::collections::BTreeSet;

use ego_tree::NodeRef;
use email_extract::EmailExtractor;
use scraper::node::Node;
use scraper::{ElementRef, Html};

/// Text and `mailto:` targets collected from one HTML document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContent {
    pub visible_text: String,
    pub mailto_hrefs: Vec<String>,
}

/// Walks the document in order, concatenating every text node.
///
/// Script and style contents are kept: storefronts often embed contact
/// details in inline JSON. Block-level elements start on a new line so that
/// text from neighbouring blocks is not glued together; inline text is
/// concatenated as-is.
pub fn parse_page(html: &str) -> PageContent {
    let document = Html::parse_document(html);
    let mut ctx = PageContext::default();

    for child in document.root_element().children() {
        visit_node(child, &mut ctx);
    }

    PageContent {
        visible_text: ctx.text.trim().to_string(),
        mailto_hrefs: ctx.mailto_hrefs,
    }
}

/// Parses `html` and runs the page-level extraction over it.
pub fn scrape_html(html: &str, extractor: &EmailExtractor) -> BTreeSet<String> {
    let page = parse_page(html);
    extractor.extract_all(&page.visible_text, &page.mailto_hrefs)
}

fn visit_node(node: NodeRef<'_, Node>, ctx: &mut PageContext) {
    match node.value() {
        Node::Text(text) => ctx.text.push_str(text),
        Node::Element(_) => {
            if let Some(element) = ElementRef::wrap(node) {
                visit_element(element, ctx);
            }
        }
        _ => {
            for child in node.children() {
                visit_node(child, ctx);
            }
        }
    }
}

fn visit_element(element: ElementRef, ctx: &mut PageContext) {
    let tag = element.value().name().to_ascii_lowercase();
    if tag == "a" {
        if let Some(href) = element.value().attr("href").map(str::trim) {
            if is_mailto(href) {
                ctx.mailto_hrefs.push(href.to_string());
            }
        }
    }

    let block = is_block(&tag);
    if block {
        ctx.ensure_newline();
    }
    for child in element.children() {
        visit_node(child, ctx);
    }
    if block {
        ctx.ensure_newline();
    }
}

fn is_mailto(href: &str) -> bool {
    href.get(..7)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("mailto:"))
}

fn is_block(tag: &str) -> bool {
    matches!(
        tag,
        "p" | "div" | "section" | "article" | "header" | "footer" | "nav" | "main" | "aside"
            | "figure" | "figcaption" | "table" | "tr" | "td" | "th" | "blockquote"
            | "address" | "ul" | "ol" | "li" | "dl" | "dt" | "dd" | "h1" | "h2" | "h3" | "h4"
            | "h5" | "h6" | "br" | "hr" | "form" | "title" | "script" | "style" | "noscript"
    )
}

#[derive(Default)]
struct PageContext {
    text: String,
    mailto_hrefs: Vec<String>,
}

impl PageContext {
    fn ensure_newline(&mut self) {
        if self.text.is_empty() || self.text.ends_with('\n') {
            return;
        }
        self.text.push('\n');
    }
}
