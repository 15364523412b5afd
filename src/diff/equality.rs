use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};

use crate::utility::{is_invisible, CharType};

use super::tokenizer::Token;

// トークンの一致判定
//
// - 空白どうしは内容によらず一致
// - それ以外は、不可視文字を除いて前後の空白を落とし、引用符・疑問符の字形を揃えたうえで
//   大文字小文字とアクセントを無視して比較する
pub fn tokens_equal(a: &Token, b: &Token) -> bool {
    comparison_key(a) == comparison_key(b)
}

// 一致判定に用いる値
// 空白だけのトークンは空文字列になる (正規化すれば空白はすべて落ちるので上の規則と一致する)
pub fn comparison_key(token: &Token) -> String {
    if is_whitespace_run(&token.text) {
        return String::new();
    }

    // 小文字化してから分解し、結合文字 (アクセント、気息記号、ニクド等) を落とす
    normalize(&token.text)
        .to_lowercase()
        .nfd()
        .filter(|&c| !is_combining_mark(c))
        .map(strip_stroke)
        .collect()
}

// 正準分解を持たない字形
fn strip_stroke(c: char) -> char {
    match c {
        'ł' => 'l',
        'ø' => 'o',
        'đ' => 'd',
        'ħ' => 'h',
        'ɨ' => 'i',
        c => c,
    }
}

fn is_whitespace_run(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| CharType::from(c) == CharType::Whitespace)
}

fn normalize(text: &str) -> String {
    let visible: String = text.chars().filter(|&c| !is_invisible(c)).collect();

    visible
        .trim()
        .chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{201B}' | '\u{2032}' | '\u{2035}' => '\'',
            '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{201F}' | '\u{2033}' | '\u{2036}' => '"',
            '\u{037E}' | '\u{055E}' | '\u{061F}' | '\u{1367}' | '\u{203D}' | '\u{2047}'
            | '\u{2048}' | '\u{2049}' | '\u{2CFA}' | '\u{2CFB}' | '\u{2E2E}' | '\u{A60F}'
            | '\u{A6F7}' | '\u{FE56}' | '\u{FF1F}' => '?',
            c => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(text: &str) -> Token {
        Token {
            text: text.to_owned(),
            words_of_jesus: false,
            is_line_break: false,
        }
    }

    #[test]
    fn whitespace_runs_are_equal() {
        assert!(tokens_equal(&token(" "), &token("   ")));
        assert!(tokens_equal(&token(" "), &token("\t")));
    }

    #[test]
    fn ignores_case_and_accents() {
        assert!(tokens_equal(&token("And"), &token("and")));
        assert!(tokens_equal(&token("Élie"), &token("elie")));
        assert!(tokens_equal(&token("e\u{0301}"), &token("e")));
    }

    #[test]
    fn ignores_diacritics_beyond_latin_1() {
        assert!(tokens_equal(&token("Šalom"), &token("Salom")));
        assert!(tokens_equal(&token("Ježíš"), &token("Jezis")));
        assert!(tokens_equal(&token("ő"), &token("o")));
        assert!(tokens_equal(&token("Zażółć"), &token("Zazolc")));
        assert!(tokens_equal(&token("İsa"), &token("isa")));
    }

    #[test]
    fn ignores_greek_and_hebrew_marks() {
        assert!(tokens_equal(&token("ά"), &token("α")));
        assert!(tokens_equal(&token("Ἰησοῦς"), &token("Ιησους")));
        assert!(tokens_equal(&token("שָׁלוֹם"), &token("שלום")));
    }

    #[test]
    fn normalizes_quotes_and_question_marks() {
        assert!(tokens_equal(&token("don\u{2019}t"), &token("don't")));
        assert!(tokens_equal(&token("\u{201C}"), &token("\"")));
        assert!(tokens_equal(&token("\u{FF1F}"), &token("?")));
        assert!(tokens_equal(&token("\u{2049}"), &token("?")));
    }

    #[test]
    fn ignores_invisible_characters() {
        assert!(tokens_equal(&token("\u{200B}God"), &token("God")));
        assert!(tokens_equal(&token("God\u{FEFF}"), &token("god")));
    }

    #[test]
    fn different_words_are_not_equal() {
        assert!(!tokens_equal(&token("hello"), &token("goodbye")));
        assert!(!tokens_equal(&token("LORD"), &token("Lord,")));
        assert!(!tokens_equal(&token("word"), &token(" ")));
    }
}
