//! Grammar registry and HTML rendering.

use std::collections::HashMap;
use std::sync::Arc;

use regex::{Captures, Regex};

use crate::grammar::Grammar;
use crate::tokenizer::{tokenize, Token};

/// Registry of grammars keyed by canonical name and aliases.
#[derive(Default)]
pub struct Highlighter {
    grammars: HashMap<String, Arc<Grammar>>,
}

impl Highlighter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a grammar under its name and every alias. A later
    /// registration under the same name replaces the earlier one.
    pub fn register(&mut self, grammar: Grammar) {
        let grammar = Arc::new(grammar);
        for name in std::iter::once(&grammar.name).chain(grammar.aliases.iter()) {
            self.grammars.insert(name.clone(), grammar.clone());
        }
    }

    /// Register a standard language by name only; its code blocks render
    /// escaped but unclassified.
    pub fn register_passthrough(&mut self, name: &str) {
        self.register(Grammar::passthrough(name));
    }

    pub fn grammar(&self, name: &str) -> Option<&Grammar> {
        self.grammars.get(name).map(Arc::as_ref)
    }

    /// Tokenize code in the named language. `None` when the language is not
    /// registered.
    pub fn tokenize(&self, language: &str, code: &str) -> Option<Vec<Token>> {
        self.grammar(language)
            .map(|grammar| tokenize(grammar, code))
    }

    /// Render code as HTML with per-class `<span>` styling. Unregistered
    /// languages come back escaped and otherwise untouched.
    pub fn highlight(&self, language: &str, code: &str) -> String {
        match self.tokenize(language, code) {
            Some(tokens) => render_tokens(&tokens),
            None => {
                tracing::debug!(language, "no grammar registered");
                escape_html(code)
            }
        }
    }
}

/// Render classified tokens as escaped HTML.
pub fn render_tokens(tokens: &[Token]) -> String {
    let mut html = String::new();
    for token in tokens {
        match token.class {
            Some(class) => {
                html.push_str("<span class=\"");
                html.push_str(class.css_class());
                html.push_str("\">");
                html.push_str(&escape_html(&token.text));
                html.push_str("</span>");
            }
            None => html.push_str(&escape_html(&token.text)),
        }
    }
    html
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn unescape_html(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// One-shot highlighting pass over rendered HTML.
///
/// Every `<pre class="highlight"><code class="language-X">` block is
/// tokenized and rewritten with per-class styling; blocks in unregistered
/// languages are left as they are. This runs once per page at build time,
/// not incrementally.
pub fn highlight_blocks(html: &str, highlighter: &Highlighter) -> String {
    // Compiled-in pattern, known good.
    let block = Regex::new(
        r#"(?s)<pre class="highlight"><code class="language-([A-Za-z0-9_+-]+)">(.*?)</code></pre>"#,
    )
    .expect("code block pattern");

    block
        .replace_all(html, |caps: &Captures<'_>| {
            let language = &caps[1];
            let code = unescape_html(&caps[2]);
            match highlighter.tokenize(language, &code) {
                Some(tokens) => format!(
                    "<pre class=\"highlight\"><code class=\"language-{} hljs\">{}</code></pre>",
                    language,
                    render_tokens(&tokens)
                ),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}
