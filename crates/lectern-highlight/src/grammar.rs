//! Lexical grammar descriptions.
//!
//! A grammar is data: four keyword-class word lists, an ordered list of token
//! rules, and the word-boundary pattern governing which substrings are even
//! candidate keyword tokens. The tokenizer interprets this data; the grammar
//! itself contains no matching logic beyond its configuration.

use regex::Regex;

/// Keyword classes a word list can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordClass {
    Keyword,
    Type,
    Literal,
    BuiltIn,
}

/// The four keyword-class word lists of a grammar.
///
/// Word order is preserved for documentation purposes only; lookup is an
/// exact, case-sensitive membership test.
#[derive(Debug, Clone, Default)]
pub struct KeywordTable {
    keywords: Vec<String>,
    types: Vec<String>,
    literals: Vec<String>,
    built_ins: Vec<String>,
}

impl KeywordTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add keywords from a whitespace-separated word list.
    pub fn keywords(mut self, words: &str) -> Self {
        self.keywords.extend(split_words(words));
        self
    }

    pub fn types(mut self, words: &str) -> Self {
        self.types.extend(split_words(words));
        self
    }

    pub fn literals(mut self, words: &str) -> Self {
        self.literals.extend(split_words(words));
        self
    }

    pub fn built_ins(mut self, words: &str) -> Self {
        self.built_ins.extend(split_words(words));
        self
    }

    /// Look a word up across all four classes. Case-sensitive and exact.
    pub fn classify(&self, word: &str) -> Option<KeywordClass> {
        let hit = |list: &[String]| list.iter().any(|w| w == word);
        if hit(&self.keywords) {
            Some(KeywordClass::Keyword)
        } else if hit(&self.types) {
            Some(KeywordClass::Type)
        } else if hit(&self.literals) {
            Some(KeywordClass::Literal)
        } else if hit(&self.built_ins) {
            Some(KeywordClass::BuiltIn)
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
            && self.types.is_empty()
            && self.literals.is_empty()
            && self.built_ins.is_empty()
    }
}

fn split_words(words: &str) -> impl Iterator<Item = String> + '_ {
    words.split_whitespace().map(str::to_string)
}

/// Token rules a grammar can include, matched in listed order with the first
/// match winning per position, ahead of keyword lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRule {
    /// A double-quoted string with backslash escapes.
    QuoteString,
    /// A decimal numeric literal.
    Number,
    /// A backslash followed by any single character.
    BackslashEscape,
    /// `//` through end of line.
    LineComment,
    /// `/* ... */`.
    BlockComment,
    /// `@name`, optionally swallowing a parenthesized argument group.
    Annotation,
    /// A bare `;`, always its own token.
    Semicolon,
}

/// The class assigned to a matched token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    String,
    Number,
    Escape,
    Comment,
    Annotation,
    Punctuation,
    Keyword,
    Type,
    Literal,
    BuiltIn,
}

impl TokenClass {
    /// CSS class emitted for this token class.
    pub fn css_class(self) -> &'static str {
        match self {
            TokenClass::String => "hljs-string",
            TokenClass::Number => "hljs-number",
            TokenClass::Escape => "hljs-escape",
            TokenClass::Comment => "hljs-comment",
            TokenClass::Annotation => "hljs-meta",
            TokenClass::Punctuation => "hljs-punctuation",
            TokenClass::Keyword => "hljs-keyword",
            TokenClass::Type => "hljs-type",
            TokenClass::Literal => "hljs-literal",
            TokenClass::BuiltIn => "hljs-built_in",
        }
    }
}

impl From<KeywordClass> for TokenClass {
    fn from(class: KeywordClass) -> Self {
        match class {
            KeywordClass::Keyword => TokenClass::Keyword,
            KeywordClass::Type => TokenClass::Type,
            KeywordClass::Literal => TokenClass::Literal,
            KeywordClass::BuiltIn => TokenClass::BuiltIn,
        }
    }
}

const DEFAULT_WORD_PATTERN: &str = r"[A-Za-z][A-Za-z0-9_]*";

/// A named lexical grammar.
#[derive(Debug, Clone)]
pub struct Grammar {
    pub name: String,
    pub aliases: Vec<String>,
    pub keywords: KeywordTable,
    pub rules: Vec<TokenRule>,
    pub word_pattern: Regex,
}

impl Grammar {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            aliases: Vec::new(),
            keywords: KeywordTable::new(),
            rules: Vec::new(),
            // Compiled-in pattern, known good.
            word_pattern: Regex::new(DEFAULT_WORD_PATTERN).expect("default word pattern"),
        }
    }

    /// A grammar with no rules and no keywords: registered by name so the
    /// language is known, but every token passes through unclassified.
    pub fn passthrough(name: &str) -> Self {
        Self::new(name)
    }

    pub fn alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_string());
        self
    }

    pub fn keywords(mut self, table: KeywordTable) -> Self {
        self.keywords = table;
        self
    }

    pub fn rule(mut self, rule: TokenRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Override the word-boundary pattern. The pattern decides which
    /// substrings are candidate keyword tokens.
    pub fn word_pattern(mut self, pattern: &str) -> Result<Self, regex::Error> {
        self.word_pattern = Regex::new(pattern)?;
        Ok(self)
    }
}
