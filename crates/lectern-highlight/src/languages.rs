//! Bundled language registrations.

use crate::grammar::{Grammar, KeywordTable, TokenRule};
use crate::registry::Highlighter;

/// Standard languages registered by name as pass-throughs.
pub const STANDARD_LANGUAGES: &[&str] = &[
    "asciidoc",
    "bash",
    "diff",
    "dockerfile",
    "java",
    "javascript",
    "json",
    "markdown",
    "properties",
    "puppet",
    "python",
    "shell",
    "sql",
    "xml",
    "yaml",
];

/// Grammar for JSL, a small domain modeling language.
///
/// Candidate keyword tokens are maximal runs of ASCII letters and hyphens,
/// which is what lets hyphenated built-ins like `read-only` match as single
/// words.
pub fn jsl() -> Grammar {
    Grammar::new("jsl")
        .alias("JSL")
        .keywords(
            KeywordTable::new()
                .keywords(
                    "constraint field identifier derived relation static new \
                     self abstract extends model entity query type error enum",
                )
                .types("binary string numeric timestamp date time boolean")
                .literals("true false implies or xor and div mod not")
                .built_ins(
                    "opposite opposite-add read-only max-length mime-types max-file-size \
                     regex precision required scale min-size max-size",
                ),
        )
        .rule(TokenRule::QuoteString)
        .rule(TokenRule::Number)
        .rule(TokenRule::BackslashEscape)
        .rule(TokenRule::LineComment)
        .rule(TokenRule::BlockComment)
        .rule(TokenRule::Annotation)
        .rule(TokenRule::Semicolon)
        .word_pattern("[A-Za-z-]+")
        .expect("jsl word pattern")
}

/// A registry preloaded with the standard pass-through languages and JSL.
pub fn default_highlighter() -> Highlighter {
    let mut highlighter = Highlighter::new();
    for name in STANDARD_LANGUAGES {
        highlighter.register_passthrough(name);
    }
    highlighter.register(jsl());
    highlighter
}
