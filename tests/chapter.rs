use std::fs;

use anyhow::{Context, Result};

use verse_diff::{
    chapter::{compare_chapters, BibleChapter, ChapterContent},
    diff::{aligner::DiffStatus, DiffCounts},
    verse_content::verse_text,
};

fn load(name: &str) -> Result<BibleChapter> {
    let json = fs::read_to_string(format!("./tests/chapters/{}", name))
        .with_context(|| format!("Failed to read fixture {}", name))?;
    BibleChapter::from_json(&json)
}

#[test]
fn test_parse_chapter() -> Result<()> {
    let bsb = load("BSB_GEN_1.json")?.chapter;

    assert_eq!(bsb.number, 1);
    assert!(matches!(&bsb.content[0], ChapterContent::Heading { content } if content == &["The Creation"]));
    assert!(matches!(bsb.content[1], ChapterContent::LineBreak));

    let numbers: Vec<_> = bsb.verses().map(|(number, _)| number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4]);

    let verse = bsb.verse(1).context("verse 1")?;
    assert_eq!(
        verse_text(verse),
        "In the beginning God created the heavens and the earth."
    );
    assert!(bsb.verse(5).is_none());

    let footnote = bsb.footnote(0).context("footnote 0")?;
    assert_eq!(footnote.text, "Or empty");
    assert_eq!(footnote.reference.as_ref().map(|r| r.verse), Some(2));

    Ok(())
}

#[test]
fn test_compare_chapters() -> Result<()> {
    let bsb = load("BSB_GEN_1.json")?.chapter;
    let msb = load("MSB_GEN_1.json")?.chapter;

    let comparisons = compare_chapters(&bsb, &msb, None);
    let numbers: Vec<_> = comparisons.iter().map(|c| c.number).collect();
    assert_eq!(numbers, vec![1, 2, 3, 4]);

    assert!(comparisons[0].is_identical());

    // surface → face
    let verse2 = comparisons[1].diff.as_ref().context("verse 2")?;
    assert!(!comparisons[1].is_identical());
    assert_eq!(
        verse2.counts(),
        DiffCounts {
            common: 28,
            added: 1,
            removed: 1
        }
    );
    let removed: Vec<_> = verse2
        .base
        .iter()
        .filter(|t| t.status == DiffStatus::Removed)
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(removed, vec!["surface"]);
    let added: Vec<_> = verse2
        .comparison
        .iter()
        .filter(|t| t.status == DiffStatus::Added)
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(added, vec!["face"]);
    assert!(verse2
        .base
        .iter()
        .any(|t| t.is_line_break && t.status == DiffStatus::Common));

    // 引用符の字形のみ異なる
    assert!(comparisons[2].is_identical());

    // MSB に 4 節はない
    assert!(comparisons[3].diff.is_none());
    assert!(!comparisons[3].is_identical());

    Ok(())
}

#[test]
fn test_selected_verses() -> Result<()> {
    let bsb = load("BSB_GEN_1.json")?.chapter;

    let all: Vec<_> = bsb.selected_verses(None).map(|(number, _)| number).collect();
    assert_eq!(all, vec![1, 2, 3, 4]);

    let filter = vec![4, 2, 9];
    let selected: Vec<_> = bsb
        .selected_verses(Some(filter.as_slice()))
        .map(|(number, _)| number)
        .collect();
    assert_eq!(selected, vec![2, 4]);

    Ok(())
}

#[test]
fn test_compare_chapters_with_filter() -> Result<()> {
    let bsb = load("BSB_GEN_1.json")?.chapter;
    let msb = load("MSB_GEN_1.json")?.chapter;

    let comparisons = compare_chapters(&bsb, &msb, Some(&[2, 4][..]));
    let numbers: Vec<_> = comparisons.iter().map(|c| c.number).collect();
    assert_eq!(numbers, vec![2, 4]);

    let json = serde_json::to_value(&comparisons)?;
    assert_eq!(json[0]["number"], 2);
    assert_eq!(json[0]["diff"]["base"][0]["status"], "common");
    assert!(json[1]["diff"].is_null());

    Ok(())
}
