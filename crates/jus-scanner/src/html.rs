//! Gazette page text extraction.

use scraper::node::Node;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;

const SKIPPED_TAGS: [&str; 4] = ["script", "style", "noscript", "template"];

const BLOCK_TAGS: [&str; 19] = [
    "p", "div", "br", "li", "tr", "td", "th", "table", "section", "article", "header", "footer",
    "h1", "h2", "h3", "h4", "h5", "h6", "pre",
];

// Rendered challenge widgets. Script tags alone do not count.
const CHALLENGE_WIDGETS: &str = "div.g-recaptcha, div.h-captcha, #challenge-form, \
    #cf-challenge-running, iframe[src*=\"recaptcha\"], iframe[src*=\"hcaptcha\"]";

const CHALLENGE_PHRASES: [&str; 4] = [
    "não é um robô",
    "nao e um robo",
    "verificação de segurança",
    "digite o captcha",
];

/// Visible text of a gazette page, whitespace-collapsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    text: String,
    from_selector: bool,
    challenge: bool,
}

impl PageText {
    /// Extract the text of every element matching `selector`.
    ///
    /// Falls back to the document body when the selector is invalid or
    /// matches nothing with visible text. Elements nested inside another
    /// matched element are only read once.
    #[must_use]
    pub fn extract(html: &str, selector: &str) -> Self {
        let document = Html::parse_document(html);

        if let Some(text) = Self::selected_text(&document, selector) {
            return Self {
                text,
                from_selector: true,
                challenge: false,
            };
        }

        tracing::debug!(selector, "selector matched nothing, reading whole body");

        let body = Selector::parse("body")
            .ok()
            .and_then(|sel| document.select(&sel).next())
            .unwrap_or_else(|| document.root_element());

        let mut raw = String::new();
        push_text(body, &mut raw);
        let text = collapse_whitespace(&raw);
        let challenge = has_challenge_widget(&document) || has_challenge_phrase(&text);

        Self {
            text,
            from_selector: false,
            challenge,
        }
    }

    fn selected_text(document: &Html, selector: &str) -> Option<String> {
        let selector = Selector::parse(selector).ok()?;
        let matched: Vec<ElementRef<'_>> = document.select(&selector).collect();
        let matched_ids: HashSet<_> = matched.iter().map(|element| element.id()).collect();

        let mut raw = String::new();
        for element in &matched {
            let nested = element
                .ancestors()
                .any(|ancestor| matched_ids.contains(&ancestor.id()));
            if nested {
                continue;
            }
            push_text(*element, &mut raw);
            raw.push(' ');
        }

        let text = collapse_whitespace(&raw);
        (!text.is_empty()).then_some(text)
    }

    /// The extracted text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Whether the text came from the site selector rather than the body fallback.
    #[must_use]
    pub fn from_selector(&self) -> bool {
        self.from_selector
    }

    /// Whether the page had no visible text at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Whether the page is a bot challenge instead of gazette content.
    ///
    /// Only set when the site selector found nothing and the page renders a
    /// CAPTCHA widget or asks the visitor to prove they are human.
    #[must_use]
    pub fn is_challenge(&self) -> bool {
        self.challenge
    }
}

fn push_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) if SKIPPED_TAGS.contains(&el.name()) => {}
            Node::Element(el) => {
                let is_block = BLOCK_TAGS.contains(&el.name());
                if is_block {
                    out.push(' ');
                }
                if let Some(child_element) = ElementRef::wrap(child) {
                    push_text(child_element, out);
                }
                if is_block {
                    out.push(' ');
                }
            }
            _ => {}
        }
    }
}

/// Collapse every whitespace run into a single space and trim the ends.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn has_challenge_widget(document: &Html) -> bool {
    Selector::parse(CHALLENGE_WIDGETS)
        .map(|sel| document.select(&sel).next().is_some())
        .unwrap_or(false)
}

fn has_challenge_phrase(text: &str) -> bool {
    let lower = text.to_lowercase();
    CHALLENGE_PHRASES.iter().any(|phrase| lower.contains(phrase))
}
