//! Word pool loading.
//!
//! The pool is a JSON array of entries with `day`, `en`, `zh`, and an
//! optional `kind`. When no file is supplied a small built-in pool keeps
//! the simulation runnable out of the box.

use std::path::Path;

use thiserror::Error;
use word_siege_core::{normalize_word, WordItem};

/// Failures while loading an external word pool.
#[derive(Debug, Error)]
pub(crate) enum WordBankError {
    /// The pool file could not be read.
    #[error("failed to read word pool {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// The pool file was not valid JSON of the expected shape.
    #[error("failed to parse word pool {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    /// The pool contained no usable entry.
    #[error("word pool {path} holds no spellable entry")]
    Empty { path: String },
}

/// Loads and sanity-filters a word pool from disk.
pub(crate) fn load(path: &Path) -> Result<Vec<WordItem>, WordBankError> {
    let display = path.display().to_string();
    let raw = std::fs::read_to_string(path).map_err(|source| WordBankError::Io {
        path: display.clone(),
        source,
    })?;
    let items: Vec<WordItem> = serde_json::from_str(&raw).map_err(|source| WordBankError::Parse {
        path: display.clone(),
        source,
    })?;
    let items: Vec<WordItem> = items
        .into_iter()
        .filter(|item| normalize_word(&item.en).len() >= 2)
        .collect();
    if items.is_empty() {
        return Err(WordBankError::Empty { path: display });
    }
    Ok(items)
}

/// Built-in fallback pool covering the first few curriculum days.
pub(crate) fn builtin() -> Vec<WordItem> {
    let entries = [
        (1, "cat", "猫"),
        (1, "dog", "狗"),
        (1, "fish", "鱼"),
        (1, "bird", "鸟"),
        (2, "apple", "苹果"),
        (2, "pear", "梨"),
        (2, "banana", "香蕉"),
        (2, "grape", "葡萄"),
        (3, "school", "学校"),
        (3, "homework", "作业"),
        (3, "teacher", "老师"),
        (3, "pencil", "铅笔"),
        (4, "ice-cream", "冰淇淋"),
        (4, "go shopping", "去购物"),
        (4, "play football", "踢足球"),
        (5, "beautiful", "美丽的"),
        (5, "vegetable", "蔬菜"),
        (5, "breakfast", "早餐"),
    ];
    entries
        .into_iter()
        .map(|(day, en, zh)| WordItem {
            day,
            en: en.to_owned(),
            zh: zh.to_owned(),
            kind: None,
        })
        .collect()
}
