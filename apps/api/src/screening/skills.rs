//! Skill vocabulary and skill extraction.
//!
//! Extraction is a plain substring test against the lowercased raw text. It is
//! not word-bounded, so `"api"` also fires inside `"rapid"` and `"rest"` inside
//! `"interest"`. Multi-word entries such as `"machine learning"` match as
//! literal phrases.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{bail, Context, Result};

/// Built-in vocabulary: ML / data, MLOps / cloud and web development.
pub const DEFAULT_SKILLS: &[&str] = &[
    // ML / data
    "python",
    "pandas",
    "numpy",
    "sql",
    "scikit-learn",
    "sklearn",
    "tensorflow",
    "pytorch",
    "machine learning",
    "deep learning",
    "supervised learning",
    "unsupervised learning",
    // MLOps / cloud
    "git",
    "docker",
    "kubernetes",
    "aws",
    "gcp",
    "azure",
    // Web
    "javascript",
    "typescript",
    "react",
    "reactjs",
    "node",
    "node.js",
    "nodejs",
    "express",
    "express.js",
    "expressjs",
    "html",
    "css",
    "mongodb",
    "mongo",
    "rest",
    "rest api",
    "api",
    "websockets",
];

/// A set of lowercase skill keywords. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillVocabulary {
    entries: BTreeSet<String>,
}

impl Default for SkillVocabulary {
    fn default() -> Self {
        Self::new(DEFAULT_SKILLS.iter().copied())
    }
}

impl SkillVocabulary {
    /// Builds a vocabulary from arbitrary entries. Entries are trimmed and
    /// lowercased; blank entries are skipped.
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let entries = entries
            .into_iter()
            .map(|e| e.as_ref().trim().to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        Self { entries }
    }

    /// Parses a newline-delimited skill list. `#` starts a comment line.
    pub fn parse(contents: &str) -> Result<Self> {
        let vocabulary = Self::new(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.starts_with('#')),
        );
        if vocabulary.is_empty() {
            bail!("skill list contains no entries");
        }
        Ok(vocabulary)
    }

    /// Loads a skill list from disk. See [`SkillVocabulary::parse`].
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read skills file '{}'", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("Invalid skills file '{}'", path.display()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }
}

/// Returns every vocabulary entry that occurs as a substring of the
/// lowercased `text`.
pub fn extract_skills(text: &str, vocabulary: &SkillVocabulary) -> BTreeSet<String> {
    if text.is_empty() {
        return BTreeSet::new();
    }
    let text_lower = text.to_lowercase();
    vocabulary
        .iter()
        .filter(|skill| text_lower.contains(skill))
        .map(str::to_string)
        .collect()
}
