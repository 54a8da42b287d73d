//! Grammar-driven tokenization.

use crate::grammar::{Grammar, TokenClass, TokenRule};

/// A classified span of source text. `class` is `None` for text no rule or
/// keyword list claimed.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub class: Option<TokenClass>,
    pub text: String,
}

/// Tokenize `code` against a grammar.
///
/// At every position the grammar's rules are tried in listed order; the first
/// match wins. When no rule matches, a word-pattern run is looked up against
/// the keyword table, case-sensitively. Everything else passes through
/// unclassified. Malformed input never fails; it just yields whatever partial
/// classification falls out.
pub fn tokenize(grammar: &Grammar, code: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut plain = String::new();
    let mut i = 0;

    while i < code.len() {
        let rest = &code[i..];

        if let Some((class, len)) = match_rule(grammar, rest) {
            flush_plain(&mut tokens, &mut plain);
            tokens.push(Token {
                class: Some(class),
                text: rest[..len].to_string(),
            });
            i += len;
            continue;
        }

        if let Some(found) = grammar.word_pattern.find(rest) {
            if found.start() == 0 && !found.as_str().is_empty() {
                let word = found.as_str();
                match grammar.keywords.classify(word) {
                    Some(class) => {
                        flush_plain(&mut tokens, &mut plain);
                        tokens.push(Token {
                            class: Some(class.into()),
                            text: word.to_string(),
                        });
                    }
                    None => plain.push_str(word),
                }
                i += word.len();
                continue;
            }
        }

        match rest.chars().next() {
            Some(ch) => {
                plain.push(ch);
                i += ch.len_utf8();
            }
            None => break,
        }
    }

    flush_plain(&mut tokens, &mut plain);
    tokens
}

fn flush_plain(tokens: &mut Vec<Token>, plain: &mut String) {
    if !plain.is_empty() {
        tokens.push(Token {
            class: None,
            text: std::mem::take(plain),
        });
    }
}

fn match_rule(grammar: &Grammar, rest: &str) -> Option<(TokenClass, usize)> {
    for rule in &grammar.rules {
        if let Some(len) = match_single(*rule, rest) {
            return Some((rule_class(*rule), len));
        }
    }
    None
}

fn rule_class(rule: TokenRule) -> TokenClass {
    match rule {
        TokenRule::QuoteString => TokenClass::String,
        TokenRule::Number => TokenClass::Number,
        TokenRule::BackslashEscape => TokenClass::Escape,
        TokenRule::LineComment | TokenRule::BlockComment => TokenClass::Comment,
        TokenRule::Annotation => TokenClass::Annotation,
        TokenRule::Semicolon => TokenClass::Punctuation,
    }
}

fn match_single(rule: TokenRule, rest: &str) -> Option<usize> {
    match rule {
        TokenRule::QuoteString => match_quote_string(rest),
        TokenRule::Number => match_number(rest),
        TokenRule::BackslashEscape => match_backslash_escape(rest),
        TokenRule::LineComment => match_line_comment(rest),
        TokenRule::BlockComment => match_block_comment(rest),
        TokenRule::Annotation => match_annotation(rest),
        TokenRule::Semicolon => rest.starts_with(';').then_some(1),
    }
}

fn match_quote_string(rest: &str) -> Option<usize> {
    if !rest.starts_with('"') {
        return None;
    }
    let bytes = rest.as_bytes();
    let mut i = 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return Some(i + 1),
            _ => i += 1,
        }
    }
    // Unterminated: the rest of the input is the string.
    Some(bytes.len())
}

fn match_number(rest: &str) -> Option<usize> {
    let bytes = rest.as_bytes();
    let mut i = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i == 0 {
        return None;
    }
    if i < bytes.len()
        && bytes[i] == b'.'
        && bytes.get(i + 1).is_some_and(|b| b.is_ascii_digit())
    {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
    }
    Some(i)
}

fn match_backslash_escape(rest: &str) -> Option<usize> {
    if !rest.starts_with('\\') {
        return None;
    }
    let mut chars = rest.chars();
    chars.next();
    chars.next().map(|escaped| 1 + escaped.len_utf8())
}

fn match_line_comment(rest: &str) -> Option<usize> {
    if !rest.starts_with("//") {
        return None;
    }
    Some(rest.find('\n').unwrap_or(rest.len()))
}

fn match_block_comment(rest: &str) -> Option<usize> {
    if !rest.starts_with("/*") {
        return None;
    }
    match rest[2..].find("*/") {
        Some(at) => Some(2 + at + 2),
        None => Some(rest.len()),
    }
}

/// `@` + one letter + letters/digits; a directly following `(` pulls the
/// whole argument group, through the matching `)`, into the token.
fn match_annotation(rest: &str) -> Option<usize> {
    let bytes = rest.as_bytes();
    if bytes.first() != Some(&b'@') {
        return None;
    }
    if !bytes.get(1).is_some_and(|b| b.is_ascii_alphabetic()) {
        return None;
    }

    let mut i = 2;
    while i < bytes.len() && bytes[i].is_ascii_alphanumeric() {
        i += 1;
    }
    let name_end = i;

    if bytes.get(i) == Some(&b'(') {
        let mut depth = 0usize;
        let mut j = i;
        while j < bytes.len() {
            match bytes[j] {
                b'(' => depth += 1,
                b')' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(j + 1);
                    }
                }
                _ => {}
            }
            j += 1;
        }
        // No matching ')': fall back to the bare name.
    }

    Some(name_end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammar::{KeywordTable, TokenRule};
    use pretty_assertions::assert_eq;

    fn test_grammar() -> Grammar {
        Grammar::new("test")
            .keywords(
                KeywordTable::new()
                    .keywords("entity model")
                    .types("string")
                    .literals("true")
                    .built_ins("read-only"),
            )
            .rule(TokenRule::QuoteString)
            .rule(TokenRule::Number)
            .rule(TokenRule::BackslashEscape)
            .rule(TokenRule::LineComment)
            .rule(TokenRule::BlockComment)
            .rule(TokenRule::Annotation)
            .rule(TokenRule::Semicolon)
            .word_pattern("[A-Za-z-]+")
            .unwrap()
    }

    fn classified(tokens: &[Token]) -> Vec<(Option<TokenClass>, &str)> {
        tokens
            .iter()
            .map(|t| (t.class, t.text.as_str()))
            .collect()
    }

    #[test]
    fn keyword_lookup_is_case_sensitive_and_exact() {
        let grammar = test_grammar();

        let lower = tokenize(&grammar, "entity");
        assert_eq!(
            classified(&lower),
            vec![(Some(TokenClass::Keyword), "entity")]
        );

        let upper = tokenize(&grammar, "Entity");
        assert_eq!(classified(&upper), vec![(None, "Entity")]);
    }

    #[test]
    fn annotation_with_argument_group_is_one_token() {
        let grammar = test_grammar();
        let tokens = tokenize(&grammar, "@Required(3)");
        assert_eq!(
            classified(&tokens),
            vec![(Some(TokenClass::Annotation), "@Required(3)")]
        );
    }

    #[test]
    fn bare_annotation_spans_just_the_name() {
        let grammar = test_grammar();
        let tokens = tokenize(&grammar, "@Required");
        assert_eq!(
            classified(&tokens),
            vec![(Some(TokenClass::Annotation), "@Required")]
        );
    }

    #[test]
    fn detached_parentheses_stay_out_of_the_annotation() {
        let grammar = test_grammar();
        let tokens = tokenize(&grammar, "@Required (3)");
        assert_eq!(tokens[0].text, "@Required");
        assert_eq!(tokens[0].class, Some(TokenClass::Annotation));
    }

    #[test]
    fn nested_argument_groups_close_on_the_matching_paren() {
        let grammar = test_grammar();
        let tokens = tokenize(&grammar, "@Check(min(1)) rest");
        assert_eq!(tokens[0].text, "@Check(min(1))");
        assert_eq!(tokens[1].text, " rest");
    }

    #[test]
    fn semicolon_is_always_its_own_token() {
        let grammar = test_grammar();
        let tokens = tokenize(&grammar, "entity;true;");
        assert_eq!(
            classified(&tokens),
            vec![
                (Some(TokenClass::Keyword), "entity"),
                (Some(TokenClass::Punctuation), ";"),
                (Some(TokenClass::Literal), "true"),
                (Some(TokenClass::Punctuation), ";"),
            ]
        );
    }

    #[test]
    fn strings_shadow_keywords() {
        let grammar = test_grammar();
        let tokens = tokenize(&grammar, r#""entity inside""#);
        assert_eq!(
            classified(&tokens),
            vec![(Some(TokenClass::String), "\"entity inside\"")]
        );
    }

    #[test]
    fn string_escapes_do_not_close_the_string() {
        let grammar = test_grammar();
        let tokens = tokenize(&grammar, r#""a\"b" x"#);
        assert_eq!(tokens[0].text, r#""a\"b""#);
    }

    #[test]
    fn comments_swallow_their_contents() {
        let grammar = test_grammar();

        let line = tokenize(&grammar, "// entity here\nmodel");
        assert_eq!(line[0].class, Some(TokenClass::Comment));
        assert_eq!(line[0].text, "// entity here");
        assert_eq!(line.last().unwrap().text, "model");

        let block = tokenize(&grammar, "/* true */ true");
        assert_eq!(block[0].text, "/* true */");
        assert_eq!(block.last().unwrap().class, Some(TokenClass::Literal));
    }

    #[test]
    fn unterminated_block_comment_runs_to_the_end() {
        let grammar = test_grammar();
        let tokens = tokenize(&grammar, "/* open entity");
        assert_eq!(
            classified(&tokens),
            vec![(Some(TokenClass::Comment), "/* open entity")]
        );
    }

    #[test]
    fn numbers_and_fractions() {
        let grammar = test_grammar();
        let tokens = tokenize(&grammar, "42 3.14");
        assert_eq!(
            classified(&tokens),
            vec![
                (Some(TokenClass::Number), "42"),
                (None, " "),
                (Some(TokenClass::Number), "3.14"),
            ]
        );
    }

    #[test]
    fn hyphenated_built_in_matches_as_one_word() {
        let grammar = test_grammar();
        let tokens = tokenize(&grammar, "read-only");
        assert_eq!(
            classified(&tokens),
            vec![(Some(TokenClass::BuiltIn), "read-only")]
        );
    }

    #[test]
    fn passthrough_grammar_leaves_everything_unclassified() {
        let grammar = Grammar::passthrough("yaml");
        let tokens = tokenize(&grammar, "entity: true");
        assert_eq!(classified(&tokens), vec![(None, "entity: true")]);
    }
}
