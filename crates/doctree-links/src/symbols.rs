//! Inline symbol autolinking.
//!
//! API references are written as bare words (`vkCreateInstance`) or inline
//! code. Bare words matching the configured pattern at the start of a word
//! become inline code, and inline code consisting of exactly one symbol
//! becomes a link to the symbol's reference page.

use doctree_config::{SYMBOL_PLACEHOLDER, SymbolsConfig};
use pulldown_cmark::{CowStr, Event, Tag, TagEnd, TextMergeStream};
use regex::Regex;

use crate::escape::escape_html;

/// Characters after which a symbol counts as starting a word.
const WORD_BOUNDARY: [char; 3] = ['\n', ' ', '('];

/// Links symbol names to their reference pages.
#[derive(Debug, Clone)]
pub struct SymbolLinker {
    /// Unanchored pattern, used to find symbols in text.
    find_re: Regex,
    /// Anchored pattern, used to check whole inline code spans.
    exact_re: Regex,
    url_template: String,
    exclude: Vec<String>,
}

impl SymbolLinker {
    /// Create a linker.
    ///
    /// `url_template` has `{symbol}` replaced by the symbol name. Symbols
    /// containing any `exclude` substring are never linked.
    ///
    /// # Errors
    ///
    /// Returns an error if `pattern` is not a valid regex.
    pub fn new(
        pattern: &str,
        url_template: &str,
        exclude: Vec<String>,
    ) -> Result<Self, regex::Error> {
        Ok(Self {
            find_re: Regex::new(pattern)?,
            exact_re: Regex::new(&format!("^(?:{pattern})$"))?,
            url_template: url_template.to_owned(),
            exclude,
        })
    }

    /// Create a linker from the `[symbols]` configuration section.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured pattern is not a valid regex.
    pub fn from_config(config: &SymbolsConfig) -> Result<Self, regex::Error> {
        Self::new(&config.pattern, &config.url, config.exclude.clone())
    }

    /// Reference page for an inline code span, if it names a linkable symbol.
    #[must_use]
    pub fn link_for(&self, code: &str) -> Option<String> {
        let excluded = self.exclude.iter().any(|ex| code.contains(ex.as_str()));
        if excluded || !self.exact_re.is_match(code) {
            return None;
        }
        Some(self.url_template.replace(SYMBOL_PLACEHOLDER, code))
    }

    /// Apply autolinking to an event stream.
    ///
    /// Code blocks, link texts and image descriptions are left alone.
    pub fn process<'e>(&self, events: impl IntoIterator<Item = Event<'e>>) -> Vec<Event<'e>> {
        let mut out = Vec::new();
        let mut at_boundary = true;
        let mut in_code_block = false;
        let mut link_depth = 0usize;

        for event in TextMergeStream::new(events.into_iter()) {
            let plain = !in_code_block && link_depth == 0;
            match event {
                Event::Text(text) if plain => {
                    let ends_at_boundary = text.ends_with(WORD_BOUNDARY);
                    self.split_text(text, at_boundary, &mut out);
                    at_boundary = ends_at_boundary;
                    continue;
                }
                Event::Code(code) if plain => {
                    out.push(self.code_event(code));
                    at_boundary = false;
                    continue;
                }
                Event::Start(Tag::CodeBlock(_)) => in_code_block = true,
                Event::End(TagEnd::CodeBlock) => in_code_block = false,
                Event::Start(Tag::Link { .. } | Tag::Image { .. }) => link_depth += 1,
                Event::End(TagEnd::Link | TagEnd::Image) => {
                    link_depth = link_depth.saturating_sub(1);
                }
                _ => {}
            }

            at_boundary = match &event {
                Event::Start(
                    Tag::Emphasis
                    | Tag::Strong
                    | Tag::Strikethrough
                    | Tag::Superscript
                    | Tag::Subscript,
                )
                | Event::End(
                    TagEnd::Emphasis
                    | TagEnd::Strong
                    | TagEnd::Strikethrough
                    | TagEnd::Superscript
                    | TagEnd::Subscript,
                )
                | Event::Text(_)
                | Event::Code(_)
                | Event::InlineHtml(_) => false,
                _ => true,
            };
            out.push(event);
        }
        out
    }

    /// Split plain text around symbols that start a word, emitting them as code.
    fn split_text<'e>(&self, text: CowStr<'e>, at_boundary: bool, out: &mut Vec<Event<'e>>) {
        let mut last = 0;
        let mut pieces = Vec::new();

        for m in self.find_re.find_iter(&text) {
            let starts_word = match text[..m.start()].chars().next_back() {
                Some(prev) => WORD_BOUNDARY.contains(&prev),
                None => at_boundary,
            };
            if !starts_word || m.as_str().is_empty() {
                continue;
            }
            if m.start() > last {
                pieces.push(Event::Text(CowStr::from(text[last..m.start()].to_owned())));
            }
            pieces.push(self.code_event(CowStr::from(m.as_str().to_owned())));
            last = m.end();
        }

        if pieces.is_empty() {
            out.push(Event::Text(text));
            return;
        }
        if last < text.len() {
            pieces.push(Event::Text(CowStr::from(text[last..].to_owned())));
        }
        out.extend(pieces);
    }

    fn code_event<'e>(&self, code: CowStr<'e>) -> Event<'e> {
        match self.link_for(&code) {
            Some(url) => Event::InlineHtml(CowStr::from(format!(
                r#"<a href="{}"><code>{}</code></a>"#,
                escape_html(&url),
                escape_html(&code)
            ))),
            None => Event::Code(code),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use pulldown_cmark::{Parser, html};

    use super::*;

    const PATTERN: &str = "[vV]k[A-Z][A-Za-z0-9_]+";
    const URL: &str = "https://registry.example.com/man/{symbol}.html";

    fn linker() -> SymbolLinker {
        SymbolLinker::new(PATTERN, URL, vec!["KHR".to_owned(), "EXT".to_owned()]).unwrap()
    }

    fn render(markdown: &str) -> String {
        let mut out = String::new();
        html::push_html(&mut out, linker().process(Parser::new(markdown)).into_iter());
        out
    }

    #[test]
    fn test_link_for() {
        let linker = linker();
        assert_eq!(
            linker.link_for("vkCreateInstance"),
            Some("https://registry.example.com/man/vkCreateInstance.html".to_owned())
        );
        assert_eq!(linker.link_for("vkCreateSwapchainKHR"), None);
        assert_eq!(linker.link_for("VkDebugEXT"), None);
        assert_eq!(linker.link_for("vkCreateInstance()"), None);
        assert_eq!(linker.link_for("create"), None);
    }

    #[test]
    fn test_bare_symbol_is_linked() {
        assert_eq!(
            render("Call vkCreateInstance first."),
            "<p>Call <a href=\"https://registry.example.com/man/vkCreateInstance.html\"><code>vkCreateInstance</code></a> first.</p>\n"
        );
    }

    #[test]
    fn test_symbol_at_start_and_after_paren() {
        let out = render("VkInstance is created by (vkCreateInstance).");
        assert!(out.starts_with("<p><a href=\"https://registry.example.com/man/VkInstance.html\">"));
        assert!(out.contains("(<a href=\"https://registry.example.com/man/vkCreateInstance.html\">"));
    }

    #[test]
    fn test_symbol_inside_word_not_linked() {
        assert_eq!(render("xvkCreateInstance"), "<p>xvkCreateInstance</p>\n");
    }

    #[test]
    fn test_excluded_symbol_becomes_code() {
        assert_eq!(
            render("Use vkCreateSwapchainKHR here."),
            "<p>Use <code>vkCreateSwapchainKHR</code> here.</p>\n"
        );
    }

    #[test]
    fn test_inline_code_symbol_is_linked() {
        assert_eq!(
            render("`vkDestroyDevice`"),
            "<p><a href=\"https://registry.example.com/man/vkDestroyDevice.html\"><code>vkDestroyDevice</code></a></p>\n"
        );
        assert_eq!(render("`a < b`"), "<p><code>a &lt; b</code></p>\n");
    }

    #[test]
    fn test_code_blocks_and_links_untouched() {
        let out = render("```\nvkCreateInstance\n```\n\n[vkCreateInstance](x.md)");
        assert!(out.contains("<pre><code>vkCreateInstance\n</code></pre>"));
        assert!(out.contains("<a href=\"x.md\">vkCreateInstance</a>"));
    }

    #[test]
    fn test_symbol_after_line_break() {
        let out = render("First line\nvkCmdDraw");
        assert!(out.contains("<a href=\"https://registry.example.com/man/vkCmdDraw.html\">"));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(SymbolLinker::new("(", URL, Vec::new()).is_err());
    }
}
