use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{
    utility::CharType,
    verse_content::{needs_implicit_space, ContentPart},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub text: String,
    pub words_of_jesus: bool,
    pub is_line_break: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Word,
    Punctuation,
    Whitespace,
    LineBreak,
    Other,
}

impl TokenKind {
    pub fn of(text: &str, is_line_break: bool) -> Self {
        if is_line_break {
            return Self::LineBreak;
        }
        match text.chars().next().map(CharType::from) {
            Some(CharType::Word) => Self::Word,
            Some(CharType::Punctuation) => Self::Punctuation,
            Some(CharType::Whitespace) => Self::Whitespace,
            Some(CharType::Other) | None => Self::Other,
        }
    }
}

impl Token {
    fn new(text: &str, words_of_jesus: bool) -> Self {
        Self {
            text: text.to_owned(),
            words_of_jesus,
            is_line_break: false,
        }
    }

    fn space() -> Self {
        Self::new(" ", false)
    }

    fn line_break() -> Self {
        Self {
            text: "\n".to_owned(),
            words_of_jesus: false,
            is_line_break: true,
        }
    }

    pub fn kind(&self) -> TokenKind {
        TokenKind::of(&self.text, self.is_line_break)
    }
}

// 語 (文字・数字・アポストロフィの連続)、句読点 1 文字、空白の連続、その他の 1 文字
static REGEX_SEGMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"[\p{L}\p{N}\p{M}']+|[.,;?!:"()\-]|\s+|\S"#).unwrap()
});

// 字句解析
pub fn tokenize_verse_content(parts: &[ContentPart]) -> Vec<Token> {
    let mut tokens: Vec<Token> = Vec::new();

    for (i, part) in parts.iter().enumerate() {
        let text = match part {
            ContentPart::LineBreak => {
                tokens.push(Token::line_break());
                continue;
            }

            // 注そのものは出力しないが、注を挟んで語が連結しないよう空白を補う
            ContentPart::FootnoteMarker { .. } => {
                let next_starts_word = parts
                    .get(i + 1)
                    .and_then(ContentPart::text)
                    .and_then(|text| text.chars().next())
                    .is_some_and(char::is_alphanumeric);
                if next_starts_word {
                    tokens.push(Token::space());
                }
                continue;
            }

            ContentPart::PlainText(text) | ContentPart::AnnotatedText { text, .. } => text,
        };

        if text.is_empty() {
            continue;
        }

        let needs_space = tokens
            .last()
            .is_some_and(|last| needs_implicit_space(&last.text, text));
        if needs_space {
            tokens.push(Token::space());
        }

        let words_of_jesus = part.words_of_jesus();
        let normalized = normalize_punctuation(text);
        tokens.extend(
            REGEX_SEGMENT
                .find_iter(&normalized)
                .map(|m| Token::new(m.as_str(), words_of_jesus)),
        );
    }

    tokens
}

// 訳によって引用符や疑問符の字形が異なるのを揃える
fn normalize_punctuation(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '“' | '”' => '"',
            '‘' | '’' => '\'',
            '\u{037E}' | '\u{FF1F}' => '?', // ギリシャ語の疑問符、全角疑問符
            c => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_punctuation_replaces_smart_quotes() {
        assert_eq!(normalize_punctuation("“Don’t”"), "\"Don't\"");
        assert_eq!(normalize_punctuation("why\u{FF1F}"), "why?");
        assert_eq!(normalize_punctuation("τί\u{037E}"), "τί?");
    }

    #[test]
    fn token_kind_classifies_by_first_char() {
        assert_eq!(TokenKind::of("Lord", false), TokenKind::Word);
        assert_eq!(TokenKind::of("'tis", false), TokenKind::Word);
        assert_eq!(TokenKind::of(";", false), TokenKind::Punctuation);
        assert_eq!(TokenKind::of("  ", false), TokenKind::Whitespace);
        assert_eq!(TokenKind::of("\n", true), TokenKind::LineBreak);
        assert_eq!(TokenKind::of("—", false), TokenKind::Other);
    }
}
