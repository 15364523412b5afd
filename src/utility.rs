// 訳文の比較に向けた文字種別
#[derive(Debug, PartialEq, Eq)]
pub enum CharType {
    Word,        // 文字・数字・アポストロフィ
    Punctuation, // . , ; ? ! : " ( ) -
    Whitespace,
    Other,
}

impl CharType {
    pub fn from(c: char) -> Self {
        if c.is_alphanumeric() || c == '\'' {
            Self::Word
        } else if matches!(c, '.' | ',' | ';' | '?' | '!' | ':' | '"' | '(' | ')' | '-') {
            Self::Punctuation
        } else if c.is_whitespace() {
            Self::Whitespace
        } else {
            Self::Other
        }
    }
}

// 直前の断片がこの文字で終わっていれば、次の断片とは別の語とみなせる
pub fn is_closing_boundary(c: char) -> bool {
    c.is_alphanumeric()
        || matches!(
            c,
            ';' | ',' | '.' | '"' | '?' | '!' | ':' | '’' | '\'' | ')' | ']' | '—' | '–'
        )
}

// 次の断片がこの文字で始まっていれば、新しい語の始まりとみなせる
pub fn is_opening_boundary(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '“' | '"' | '‘' | '(')
}

// 幅ゼロの書式文字
pub fn is_invisible(c: char) -> bool {
    matches!(c, '\u{200B}'..='\u{200D}' | '\u{FEFF}')
}
