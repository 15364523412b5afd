use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::utility::{is_closing_boundary, is_opening_boundary};

// 節の本文を構成する要素
//
// 配信元の JSON では以下のいずれか：
// - "text"
// - { "text": "...", "wordsOfJesus": true, "poem": 1 }
// - { "noteId": 3, "caller": "+" }
// - { "lineBreak": true }
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub enum ContentPart {
    PlainText(String),
    AnnotatedText {
        text: String,
        words_of_jesus: bool, // 赤字 (イエスの言葉)
        poem: Option<u64>,    // 詩文の字下げ
    },
    FootnoteMarker {
        id: u64,
        caller: Option<String>,
    },
    LineBreak,
}

impl ContentPart {
    pub fn text(&self) -> Option<&str> {
        match self {
            ContentPart::PlainText(text) | ContentPart::AnnotatedText { text, .. } => {
                Some(text.as_str())
            }
            ContentPart::FootnoteMarker { .. } | ContentPart::LineBreak => None,
        }
    }

    pub fn words_of_jesus(&self) -> bool {
        matches!(
            self,
            ContentPart::AnnotatedText {
                words_of_jesus: true,
                ..
            }
        )
    }
}

impl TryFrom<Value> for ContentPart {
    type Error = anyhow::Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::String(text) => Ok(ContentPart::PlainText(text)),
            Value::Object(object) => parse_object(&object)
                .with_context(|| format!("Malformed content part: {:?}", object)),
            value => bail!("Malformed content part: {:?}", value),
        }
    }
}

fn parse_object(object: &Map<String, Value>) -> Result<ContentPart> {
    // 値は見ない (配信元も lineBreak の有無のみで判定している)
    if object.contains_key("lineBreak") {
        return Ok(ContentPart::LineBreak);
    }

    if let Some(id) = object.get("noteId") {
        let id = id.as_u64().context("noteId is not a non-negative integer")?;
        let caller = match object.get("caller") {
            None | Some(Value::Null) => None,
            Some(Value::String(caller)) => Some(caller.clone()),
            Some(caller) => bail!("caller is not a string: {:?}", caller),
        };
        return Ok(ContentPart::FootnoteMarker { id, caller });
    }

    let text = match object.get("text") {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(text) => bail!("text is not a string: {:?}", text),
    };
    let words_of_jesus = match object.get("wordsOfJesus") {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(v) => bail!("wordsOfJesus is not a boolean: {:?}", v),
    };
    let poem = object.get("poem").and_then(Value::as_u64);

    Ok(ContentPart::AnnotatedText {
        text,
        words_of_jesus,
        poem,
    })
}

impl From<ContentPart> for Value {
    fn from(part: ContentPart) -> Self {
        let mut object = Map::new();
        match part {
            ContentPart::PlainText(text) => return Value::String(text),
            ContentPart::AnnotatedText {
                text,
                words_of_jesus,
                poem,
            } => {
                object.insert("text".to_owned(), Value::String(text));
                if words_of_jesus {
                    object.insert("wordsOfJesus".to_owned(), Value::Bool(true));
                }
                if let Some(poem) = poem {
                    object.insert("poem".to_owned(), Value::from(poem));
                }
            }
            ContentPart::FootnoteMarker { id, caller } => {
                object.insert("noteId".to_owned(), Value::from(id));
                if let Some(caller) = caller {
                    object.insert("caller".to_owned(), Value::String(caller));
                }
            }
            ContentPart::LineBreak => {
                object.insert("lineBreak".to_owned(), Value::Bool(true));
            }
        }
        Value::Object(object)
    }
}

pub fn parse_verse_content(json: &str) -> Result<Vec<ContentPart>> {
    serde_json::from_str(json).context("Failed to parse verse content")
}

// 注や改行を除いた本文
pub fn verse_text(parts: &[ContentPart]) -> String {
    parts
        .iter()
        .filter_map(ContentPart::text)
        .collect::<String>()
        .trim()
        .to_owned()
}

// 表示用の本文
// 断片間に抜けている空白を補い、改行は "\n" にする (注は読み飛ばす)
pub fn format_passage_text(parts: &[ContentPart]) -> String {
    let mut text = String::new();
    let mut prev_text: Option<&str> = None;

    for part in parts {
        match part {
            ContentPart::FootnoteMarker { .. } => continue,
            ContentPart::LineBreak => {
                text.push('\n');
                prev_text = None;
            }
            ContentPart::PlainText(current) | ContentPart::AnnotatedText { text: current, .. } => {
                if prev_text.is_some_and(|prev| needs_implicit_space(prev, current)) {
                    text.push(' ');
                }
                text.push_str(current);
                prev_text = Some(current.as_str());
            }
        }
    }

    text.trim().to_owned()
}

// 隣り合う断片の間に空白が抜けているか
// (配信元が ["word;", "word"] のように空白なしで区切ってくることがある)
pub fn needs_implicit_space(prev_text: &str, current_text: &str) -> bool {
    match (prev_text.chars().last(), current_text.chars().next()) {
        (Some(last), Some(first)) => is_closing_boundary(last) && is_opening_boundary(first),
        _ => false,
    }
}
