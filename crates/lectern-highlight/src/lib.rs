//! Data-driven syntax highlighting for documentation code blocks.
//!
//! A [`Grammar`] is a static description: keyword-class word lists, an
//! ordered rule list, and a word-boundary pattern. The [`Highlighter`]
//! registry maps language names and aliases to grammars, and
//! [`highlight_blocks`] applies them in one pass over rendered HTML.

pub mod grammar;
pub mod languages;
pub mod registry;
pub mod tokenizer;

pub use grammar::{Grammar, KeywordClass, KeywordTable, TokenClass, TokenRule};
pub use languages::{default_highlighter, jsl, STANDARD_LANGUAGES};
pub use registry::{escape_html, highlight_blocks, render_tokens, Highlighter};
pub use tokenizer::{tokenize, Token};
