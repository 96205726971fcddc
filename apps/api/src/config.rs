use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::screening::skills::SkillVocabulary;

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Every variable is optional; unset ones fall back to defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Newline-delimited skill list replacing the built-in vocabulary.
    pub skills_file: Option<PathBuf>,
    /// Job description used when a request does not carry one.
    pub sample_jd_file: Option<PathBuf>,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            port: non_blank("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: non_blank("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            skills_file: non_blank("SKILLS_FILE").map(PathBuf::from),
            sample_jd_file: non_blank("SAMPLE_JD_FILE").map(PathBuf::from),
            max_upload_bytes: match non_blank("MAX_UPLOAD_BYTES") {
                Some(v) => v
                    .parse::<usize>()
                    .context("MAX_UPLOAD_BYTES must be a byte count")?,
                None => DEFAULT_MAX_UPLOAD_BYTES,
            },
        })
    }

    /// The configured skill list, or the built-in one.
    pub fn load_vocabulary(&self) -> Result<SkillVocabulary> {
        match &self.skills_file {
            Some(path) => SkillVocabulary::from_file(path),
            None => Ok(SkillVocabulary::default()),
        }
    }

    pub fn load_sample_jd(&self) -> Result<Option<String>> {
        let Some(path) = &self.sample_jd_file else {
            return Ok(None);
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read sample JD '{}'", path.display()))?;
        Ok(Some(text))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert!(config.skills_file.is_none());
        assert!(config.sample_jd_file.is_none());
        assert_eq!(config.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PORT", "9000"),
            ("RUST_LOG", "debug"),
            ("SKILLS_FILE", "/etc/screener/skills.txt"),
            ("MAX_UPLOAD_BYTES", "2048"),
        ])
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.rust_log, "debug");
        assert_eq!(
            config.skills_file,
            Some(PathBuf::from("/etc/screener/skills.txt"))
        );
        assert_eq!(config.max_upload_bytes, 2048);
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = config_from(&[("PORT", "  "), ("SKILLS_FILE", "")]).unwrap();
        assert_eq!(config.port, 8080);
        assert!(config.skills_file.is_none());
    }

    #[test]
    fn test_invalid_port_errors() {
        let err = config_from(&[("PORT", "not-a-port")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_invalid_upload_limit_errors() {
        assert!(config_from(&[("MAX_UPLOAD_BYTES", "-1")]).is_err());
    }

    #[test]
    fn test_load_vocabulary_default_and_file() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.load_vocabulary().unwrap(), SkillVocabulary::default());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "rust\n# comment\nAxum").unwrap();
        let path = file.path().to_string_lossy().into_owned();
        let config = config_from(&[("SKILLS_FILE", path.as_str())]).unwrap();
        let vocabulary = config.load_vocabulary().unwrap();
        assert_eq!(vocabulary.iter().collect::<Vec<_>>(), vec!["axum", "rust"]);
    }

    #[test]
    fn test_load_sample_jd() {
        assert!(config_from(&[]).unwrap().load_sample_jd().unwrap().is_none());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "ML engineer with Python").unwrap();
        let path = file.path().to_string_lossy().into_owned();
        let config = config_from(&[("SAMPLE_JD_FILE", path.as_str())]).unwrap();
        assert_eq!(
            config.load_sample_jd().unwrap().as_deref(),
            Some("ML engineer with Python")
        );
    }

    #[test]
    fn test_missing_sample_jd_errors() {
        let config = config_from(&[("SAMPLE_JD_FILE", "/nonexistent/jd.txt")]).unwrap();
        assert!(config.load_sample_jd().is_err());
    }
}
