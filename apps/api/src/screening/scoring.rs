//! Scoring aggregator: blends lexical similarity with skill coverage and ranks
//! every candidate against the job description.
//!
//! `match_score = 0.8 * similarity + 0.2 * skill_coverage`, all on a 0–100
//! scale. Values are kept at full precision and rounded to 2 decimals only
//! when rendered into a [`ScoreRow`].

use std::cmp::Ordering;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::screening::similarity::similarity;
use crate::screening::skills::{extract_skills, SkillVocabulary};

/// Rendered in place of an empty skill list.
pub const EMPTY_SKILLS_PLACEHOLDER: &str = "-";

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// One candidate document. Names must be unique within a scoring run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub name: String,
    pub text: String,
}

impl Document {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ScoringWeights {
    pub similarity: f64,
    pub skill_coverage: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            similarity: 0.8,
            skill_coverage: 0.2,
        }
    }
}

/// Full-precision score for one candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRecord {
    pub name: String,
    pub similarity: f64,
    pub skill_coverage: f64,
    pub match_score: f64,
    /// Reference skills the candidate also has.
    pub matched_skills: BTreeSet<String>,
    /// Reference skills the candidate lacks.
    pub missing_skills: BTreeSet<String>,
}

/// A rendered row of the ranking table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRow {
    pub rank: usize,
    pub name: String,
    pub match_score: f64,
    pub similarity: f64,
    pub skill_coverage: f64,
    pub matched_skills: String,
    pub missing_skills: String,
}

/// Score records sorted best first. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedResults {
    reference_skills: BTreeSet<String>,
    records: Vec<ScoreRecord>,
}

impl RankedResults {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn reference_skills(&self) -> &BTreeSet<String> {
        &self.reference_skills
    }

    pub fn top(&self) -> Option<&ScoreRecord> {
        self.records.first()
    }

    /// Renders the table with 1-based ranks and 2-decimal values.
    pub fn to_rows(&self) -> Vec<ScoreRow> {
        self.records
            .iter()
            .enumerate()
            .map(|(i, record)| ScoreRow {
                rank: i + 1,
                name: record.name.clone(),
                match_score: round2(record.match_score),
                similarity: round2(record.similarity),
                skill_coverage: round2(record.skill_coverage),
                matched_skills: join_skills(&record.matched_skills),
                missing_skills: join_skills(&record.missing_skills),
            })
            .collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Aggregation
// ────────────────────────────────────────────────────────────────────────────

/// Ranks `candidates` against `reference_text`.
///
/// Returns an empty result when the reference is blank or there are no
/// candidates. A candidate sharing no terms with the corpus is still ranked,
/// with similarity 0.
///
/// Records with equal rendered `match_score` keep their input order.
pub fn score(
    reference_text: &str,
    candidates: &[Document],
    vocabulary: &SkillVocabulary,
) -> RankedResults {
    if reference_text.trim().is_empty() || candidates.is_empty() {
        return RankedResults::default();
    }

    let weights = ScoringWeights::default();
    let reference_skills = extract_skills(reference_text, vocabulary);

    let candidate_texts: Vec<&str> = candidates.iter().map(|c| c.text.as_str()).collect();
    let similarities = similarity(reference_text, &candidate_texts);

    let mut indexed: Vec<(usize, ScoreRecord)> = candidates
        .iter()
        .zip(similarities)
        .map(|(candidate, similarity)| {
            let candidate_skills = extract_skills(&candidate.text, vocabulary);
            let matched_skills: BTreeSet<String> = reference_skills
                .intersection(&candidate_skills)
                .cloned()
                .collect();
            let missing_skills: BTreeSet<String> = reference_skills
                .difference(&candidate_skills)
                .cloned()
                .collect();

            let skill_coverage =
                compute_skill_coverage(matched_skills.len(), reference_skills.len());
            let match_score = compute_match_score(similarity, skill_coverage, &weights);

            ScoreRecord {
                name: candidate.name.clone(),
                similarity,
                skill_coverage,
                match_score,
                matched_skills,
                missing_skills,
            }
        })
        .enumerate()
        .collect();

    indexed.sort_by(|(ia, a), (ib, b)| {
        round2(b.match_score)
            .partial_cmp(&round2(a.match_score))
            .unwrap_or(Ordering::Equal)
            .then(ia.cmp(ib))
    });

    tracing::debug!(
        candidates = indexed.len(),
        vocabulary = vocabulary.len(),
        reference_skills = reference_skills.len(),
        "scored candidates"
    );

    RankedResults {
        reference_skills,
        records: indexed.into_iter().map(|(_, record)| record).collect(),
    }
}

/// Percentage of reference skills matched. 0 when the reference has none.
pub fn compute_skill_coverage(matched: usize, reference: usize) -> f64 {
    if reference == 0 {
        return 0.0;
    }
    (matched as f64 / reference as f64 * 100.0).clamp(0.0, 100.0)
}

pub fn compute_match_score(similarity: f64, skill_coverage: f64, weights: &ScoringWeights) -> f64 {
    weights.similarity * similarity + weights.skill_coverage * skill_coverage
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn join_skills(skills: &BTreeSet<String>) -> String {
    if skills.is_empty() {
        return EMPTY_SKILLS_PLACEHOLDER.to_string();
    }
    skills.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
