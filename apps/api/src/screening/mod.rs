// Resume screening: text normalization, TF-IDF similarity and skill coverage,
// blended into one ranked table per job description.
// The scoring modules are pure and synchronous; handlers wrap them for HTTP.

pub mod handlers;
pub mod normalizer;
pub mod report;
pub mod scoring;
pub mod similarity;
pub mod skills;
