use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    diff::{diff_verses, VerseDiff},
    verse_content::ContentPart,
};

// 配信元の章 JSON のうち差分に必要な部分
// (translation, book, 前後の章へのリンク等は読み飛ばす)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BibleChapter {
    pub chapter: Chapter,
}

impl BibleChapter {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse chapter")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub number: u32,
    pub content: Vec<ChapterContent>,
    #[serde(default)]
    pub footnotes: Vec<ChapterFootnote>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum ChapterContent {
    Heading {
        content: Vec<String>,
    },
    LineBreak,
    Verse {
        number: u32,
        content: Vec<ContentPart>,
    },
    HebrewSubtitle {
        content: Vec<Value>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterFootnote {
    pub note_id: u64,
    pub text: String,
    pub reference: Option<FootnoteReference>,
    pub caller: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FootnoteReference {
    pub chapter: u32,
    pub verse: u32,
}

impl Chapter {
    // 本文中の順序で (節番号, 本文)
    pub fn verses(&self) -> impl Iterator<Item = (u32, &[ContentPart])> + '_ {
        self.content.iter().filter_map(|item| match item {
            ChapterContent::Verse { number, content } => Some((*number, content.as_slice())),
            _ => None,
        })
    }

    pub fn verse(&self, number: u32) -> Option<&[ContentPart]> {
        self.verses().find(|&(n, _)| n == number).map(|(_, content)| content)
    }

    // filter が与えられればその節のみ
    pub fn selected_verses<'a>(
        &'a self,
        filter: Option<&'a [u32]>,
    ) -> impl Iterator<Item = (u32, &'a [ContentPart])> + 'a {
        self.verses()
            .filter(move |(number, _)| filter.map_or(true, |filter| filter.contains(number)))
    }

    pub fn footnote(&self, note_id: u64) -> Option<&ChapterFootnote> {
        self.footnotes.iter().find(|f| f.note_id == note_id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerseComparison {
    pub number: u32,
    pub diff: Option<VerseDiff>, // 比較側にその節がなければ None
}

impl VerseComparison {
    pub fn is_identical(&self) -> bool {
        self.diff.as_ref().is_some_and(VerseDiff::is_identical)
    }
}

pub fn compare_verse(number: u32, content: &[ContentPart], comparison: &Chapter) -> VerseComparison {
    let diff = comparison
        .verse(number)
        .map(|other| diff_verses(content, other));

    VerseComparison { number, diff }
}

pub fn compare_chapters(
    base: &Chapter,
    comparison: &Chapter,
    filter: Option<&[u32]>,
) -> Vec<VerseComparison> {
    base.selected_verses(filter)
        .map(|(number, content)| compare_verse(number, content, comparison))
        .collect()
}
