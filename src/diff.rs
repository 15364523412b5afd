// 訳の異なる同一節どうしの差分
//
// 1. tokenizer: 節の本文 (ContentPart の列) を語・句読点・空白・改行のトークンに分ける
// 2. aligner: 2 つのトークン列の最長共通部分列をとり、各トークンを common / added / removed に分類する
//
// トークンの一致判定 (equality) は見た目だけの違い (引用符の種類、大文字小文字、アクセント) を無視する

pub mod aligner;
pub mod equality;
pub mod tokenizer;

use serde::{Deserialize, Serialize};

use crate::verse_content::ContentPart;

use self::{
    aligner::{align_tokens, DiffStatus, DiffToken},
    tokenizer::{tokenize_verse_content, TokenKind},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerseDiff {
    pub base: Vec<DiffToken>,       // common か removed のみ
    pub comparison: Vec<DiffToken>, // common か added のみ
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffCounts {
    pub common: usize,
    pub added: usize,
    pub removed: usize,
}

impl VerseDiff {
    pub fn is_identical(&self) -> bool {
        self.base
            .iter()
            .chain(self.comparison.iter())
            .all(|t| t.status == DiffStatus::Common)
    }

    // 語のみ数える (句読点・記号・空白・改行は除く)
    pub fn counts(&self) -> DiffCounts {
        let mut counts = DiffCounts::default();

        for token in self.base.iter().filter(|t| is_counted(t)) {
            match token.status {
                DiffStatus::Common => counts.common += 1,
                DiffStatus::Removed => counts.removed += 1,
                DiffStatus::Added => {}
            }
        }
        for token in self.comparison.iter().filter(|t| is_counted(t)) {
            if token.status == DiffStatus::Added {
                counts.added += 1;
            }
        }

        counts
    }
}

fn is_counted(token: &DiffToken) -> bool {
    token.kind() == TokenKind::Word
}

pub fn diff_verses(base: &[ContentPart], comparison: &[ContentPart]) -> VerseDiff {
    let base = tokenize_verse_content(base);
    let comparison = tokenize_verse_content(comparison);

    let (base, comparison) = align_tokens(&base, &comparison);

    VerseDiff { base, comparison }
}
