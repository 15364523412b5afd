use serde::{Deserialize, Serialize};

use super::{
    equality::comparison_key,
    tokenizer::{Token, TokenKind},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiffStatus {
    Common,
    Added,   // 比較側にのみある
    Removed, // 基準側にのみある
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffToken {
    pub text: String,
    pub words_of_jesus: bool,
    pub is_line_break: bool,
    pub status: DiffStatus,
}

impl DiffToken {
    fn new(token: &Token, status: DiffStatus) -> Self {
        Self {
            text: token.text.clone(),
            words_of_jesus: token.words_of_jesus,
            is_line_break: token.is_line_break,
            status,
        }
    }

    pub fn kind(&self) -> TokenKind {
        TokenKind::of(&self.text, self.is_line_break)
    }
}

// 最長共通部分列による整列
//
// 返り値の基準側は common / removed、比較側は common / added のみからなり、
// どちらも入力のトークンを順序どおりにすべて含む
//
// 同じ長さの共通部分列が複数あるときは、末尾から辿る際に比較側のトークンを
// added として先に消費する
pub fn align_tokens(base: &[Token], comparison: &[Token]) -> (Vec<DiffToken>, Vec<DiffToken>) {
    let base_keys: Vec<_> = base.iter().map(comparison_key).collect();
    let comparison_keys: Vec<_> = comparison.iter().map(comparison_key).collect();

    let n = base.len();
    let m = comparison.len();

    // table[i][j] = base[..i] と comparison[..j] の最長共通部分列の長さ
    let mut table = vec![vec![0usize; m + 1]; n + 1];
    for i in 1..=n {
        for j in 1..=m {
            table[i][j] = if base_keys[i - 1] == comparison_keys[j - 1] {
                table[i - 1][j - 1] + 1
            } else {
                table[i - 1][j].max(table[i][j - 1])
            };
        }
    }

    let mut base_diff = Vec::with_capacity(n);
    let mut comparison_diff = Vec::with_capacity(m);

    let mut i = n;
    let mut j = m;
    while i > 0 || j > 0 {
        if i > 0 && j > 0 && base_keys[i - 1] == comparison_keys[j - 1] {
            base_diff.push(DiffToken::new(&base[i - 1], DiffStatus::Common));
            comparison_diff.push(DiffToken::new(&comparison[j - 1], DiffStatus::Common));
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || table[i][j - 1] >= table[i - 1][j]) {
            comparison_diff.push(DiffToken::new(&comparison[j - 1], DiffStatus::Added));
            j -= 1;
        } else {
            base_diff.push(DiffToken::new(&base[i - 1], DiffStatus::Removed));
            i -= 1;
        }
    }

    base_diff.reverse();
    comparison_diff.reverse();

    (base_diff, comparison_diff)
}
