use ego_tree::NodeId;
use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};
use scrape_logging::scrape_warn;

/// Rendering target for a single extraction call. The parse/strip/locate-body
/// prefix is shared by the text-bearing modes; `ImageList` deliberately scans
/// the whole document instead (see [`ContentExtractor`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMode {
    PlainText,
    Markdown,
    ImageList,
}

impl Default for ExtractionMode {
    fn default() -> Self {
        ExtractionMode::Markdown
    }
}

/// Output of one extraction. `value = None` means the page had no usable
/// content for the requested mode; it is an expected outcome, not an error.
///
/// Invariant: `Some` never wraps an empty or whitespace-only string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedContent {
    pub mode: ExtractionMode,
    pub value: Option<String>,
}

impl ExtractedContent {
    pub fn is_present(&self) -> bool {
        self.value.is_some()
    }

    fn absent(mode: ExtractionMode) -> Self {
        Self { mode, value: None }
    }

    fn trimmed(mode: ExtractionMode, value: String) -> Self {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            Self::absent(mode)
        } else {
            Self {
                mode,
                value: Some(trimmed.to_string()),
            }
        }
    }
}

pub trait Extractor: Send + Sync {
    fn extract(&self, html: &str, mode: ExtractionMode) -> ExtractedContent;
}

/// Body-centric extractor over a lenient HTML5 parse:
/// - drops `script`, `style`, `template` and `svg` subtrees before rendering
/// - renders the `<body>` subtree as plain text or markdown
/// - in `ImageList` mode, lists every `img[src]` of the whole document.
///
/// A pure function of (html, mode); no state survives a call.
#[derive(Debug, Default, Clone, Copy)]
pub struct ContentExtractor;

impl Extractor for ContentExtractor {
    fn extract(&self, html: &str, mode: ExtractionMode) -> ExtractedContent {
        let mut doc = Html::parse_document(html);

        if mode == ExtractionMode::ImageList {
            // Structural listing over the unfiltered document: the strip
            // pass applies only to the text-bearing modes, and an image-less
            // page is still a valid, present result (an empty list).
            return ExtractedContent {
                mode,
                value: Some(render_image_list(&doc)),
            };
        }

        strip_non_content(&mut doc);

        let Some(body) = locate_body(html, &doc) else {
            scrape_warn!("no <body> element found in the document");
            return ExtractedContent::absent(mode);
        };

        let rendered = match mode {
            ExtractionMode::PlainText => normalize_whitespace(&body_plain_text(body)),
            ExtractionMode::Markdown => html2md::parse_html(&body.inner_html()),
            ExtractionMode::ImageList => unreachable!("handled above"),
        };

        let content = ExtractedContent::trimmed(mode, rendered);
        if !content.is_present() {
            scrape_warn!("extraction produced no usable content");
        }
        content
    }
}

/// Detach every element that carries no renderable textual semantics, so
/// script and style text can never leak into the rendered output.
fn strip_non_content(doc: &mut Html) {
    let Ok(selector) = Selector::parse("script, style, template, svg") else {
        return;
    };
    let ids: Vec<NodeId> = doc.select(&selector).map(|el| el.id()).collect();
    for id in ids {
        if let Some(mut node) = doc.tree.get_mut(id) {
            node.detach();
        }
    }
}

/// The HTML5 tree builder synthesizes a `<body>` for any input, so its mere
/// presence in the parsed tree says nothing. A document counts as having a
/// body only when the source markup actually opens one.
fn locate_body<'a>(source: &str, doc: &'a Html) -> Option<ElementRef<'a>> {
    if !source_opens_body(source) {
        return None;
    }
    let selector = Selector::parse("body").ok()?;
    doc.select(&selector).next()
}

/// Scans for a `<body` tag open, skipping comment spans so commented-out
/// markup does not count. A `<body` inside raw text content (say, a script
/// string literal) is still a known false positive.
fn source_opens_body(source: &str) -> bool {
    let lowered = source.to_ascii_lowercase();
    let mut rest = lowered.as_str();
    loop {
        let Some(idx) = rest.find('<') else {
            return false;
        };
        let tail = &rest[idx..];
        if let Some(comment) = tail.strip_prefix("<!--") {
            let Some(end) = comment.find("-->") else {
                return false;
            };
            rest = &comment[end + "-->".len()..];
            continue;
        }
        if let Some(after) = tail.strip_prefix("<body") {
            match after.chars().next() {
                None | Some('>') | Some('/') => return true,
                Some(c) if c.is_ascii_whitespace() => return true,
                _ => {}
            }
        }
        rest = &tail[1..];
    }
}

/// Concatenate the body's text, separating each child element's text with a
/// newline so block structure does not collapse into one run-on string.
fn body_plain_text(body: ElementRef<'_>) -> String {
    let mut out = String::new();
    for child in body.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                if let Some(element) = ElementRef::wrap(child) {
                    for piece in element.text() {
                        out.push_str(piece);
                    }
                    out.push('\n');
                }
            }
            _ => {}
        }
    }
    out
}

/// Collapse every run of two or more newline/tab characters to exactly one
/// blank line, then trim the ends.
fn normalize_whitespace(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\n' || ch == '\t' {
            let mut run = 1usize;
            while matches!(chars.peek(), Some('\n') | Some('\t')) {
                chars.next();
                run += 1;
            }
            if run >= 2 {
                out.push_str("\n\n");
            } else {
                out.push(ch);
            }
        } else {
            out.push(ch);
        }
    }
    out.trim().to_string()
}

/// List every `img` of the whole document that carries a `src`. Images
/// without one are skipped; they hold no retrievable reference.
fn render_image_list(doc: &Html) -> String {
    let mut items = String::new();
    if let Ok(selector) = Selector::parse("img") {
        for img in doc.select(&selector) {
            let Some(src) = img.value().attr("src") else {
                continue;
            };
            let alt = img.value().attr("alt").unwrap_or("");
            items.push_str(&format!("<li><img src='{src}' alt='{alt}'></li>"));
        }
    }
    format!("<ul>{items}</ul>")
}
