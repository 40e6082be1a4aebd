//! Skill vocabulary: the fixed universe of recognized skill terms.
//!
//! Loaded once at startup from a JSON array of strings and shared read-only
//! behind an `Arc`. Each term carries a pre-compiled boundary-anchored pattern
//! so extraction never rebuilds regexes per request.

use std::path::{Path, PathBuf};

use regex::Regex;
use thiserror::Error;

use crate::matching::skill_set::{normalize, SkillSet};

#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("cannot read skill vocabulary {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("skill vocabulary is not a JSON array of strings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("skill vocabulary is empty")]
    Empty,

    #[error("skill vocabulary entry #{index} is blank")]
    Blank { index: usize },

    #[error("cannot build matcher for skill '{term}': {source}")]
    Pattern {
        term: String,
        #[source]
        source: regex::Error,
    },
}

/// A single vocabulary term and its boundary-anchored matcher.
#[derive(Debug, Clone)]
pub struct VocabularyTerm {
    skill: String,
    pattern: Regex,
}

impl VocabularyTerm {
    fn new(skill: String) -> Result<Self, VocabularyError> {
        let pattern = Regex::new(&boundary_pattern(&skill)).map_err(|source| {
            VocabularyError::Pattern {
                term: skill.clone(),
                source,
            }
        })?;
        Ok(Self { skill, pattern })
    }

    pub fn skill(&self) -> &str {
        &self.skill
    }

    /// Case-insensitive whole-term match. `java` does not hit `javascript`,
    /// `c` does not hit `c++`.
    pub fn is_found_in(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

/// Builds `(?i)(?:^|[^\w+#])<term>(?:$|[^\w+#])`. `+` and `#` count as word
/// characters so that `c`, `c++` and `c#` stay distinct; the words of a
/// multi-word term may be separated by any run of whitespace or hyphens.
fn boundary_pattern(skill: &str) -> String {
    let body = skill
        .split_whitespace()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(r"[\s-]+");
    format!(r"(?i)(?:^|[^\w+#]){body}(?:$|[^\w+#])")
}

#[derive(Debug, Clone)]
pub struct SkillVocabulary {
    terms: Vec<VocabularyTerm>,
}

impl SkillVocabulary {
    /// Builds a vocabulary from raw terms. Terms are normalized; duplicates
    /// after normalization collapse; blank terms and an empty list are errors.
    pub fn new<I, S>(terms: I) -> Result<Self, VocabularyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = SkillSet::new();
        let mut compiled = Vec::new();
        for (index, term) in terms.into_iter().enumerate() {
            let skill = normalize(term.as_ref());
            if skill.is_empty() {
                return Err(VocabularyError::Blank { index });
            }
            if seen.insert(&skill) {
                compiled.push(VocabularyTerm::new(skill)?);
            }
        }
        if compiled.is_empty() {
            return Err(VocabularyError::Empty);
        }
        Ok(Self { terms: compiled })
    }

    pub fn from_json(json: &str) -> Result<Self, VocabularyError> {
        let terms: Vec<String> = serde_json::from_str(json)?;
        Self::new(terms)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, VocabularyError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| VocabularyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn terms(&self) -> impl Iterator<Item = &VocabularyTerm> {
        self.terms.iter()
    }

    pub fn skills(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(VocabularyTerm::skill)
    }

    pub fn contains(&self, skill: &str) -> bool {
        let skill = normalize(skill);
        self.skills().any(|s| s == skill)
    }

    /// Skills of `set` that are not part of the vocabulary, in set order.
    pub fn unknown_skills(&self, set: &SkillSet) -> Vec<String> {
        set.iter()
            .filter(|skill| !self.contains(skill))
            .map(String::from)
            .collect()
    }

    /// The whole vocabulary as a skill set, in vocabulary order.
    pub fn as_skill_set(&self) -> SkillSet {
        self.skills().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_terms_are_normalized_and_deduplicated() {
        let vocab = SkillVocabulary::new(["Python", "python", " Machine  Learning "]).unwrap();
        assert_eq!(
            vocab.skills().collect::<Vec<_>>(),
            vec!["python", "machine learning"]
        );
    }

    #[test]
    fn test_empty_vocabulary_is_rejected() {
        let err = SkillVocabulary::new(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, VocabularyError::Empty));
    }

    #[test]
    fn test_blank_term_is_rejected() {
        let err = SkillVocabulary::new(["python", "  "]).unwrap_err();
        assert!(matches!(err, VocabularyError::Blank { index: 1 }));
    }

    #[test]
    fn test_from_json_rejects_non_string_array() {
        let err = SkillVocabulary::from_json(r#"{"skills": ["python"]}"#).unwrap_err();
        assert!(matches!(err, VocabularyError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"["python", "c++", "sql"]"#).unwrap();
        let vocab = SkillVocabulary::load(file.path()).unwrap();
        assert_eq!(vocab.len(), 3);
        assert!(vocab.contains("C++"));
    }

    #[test]
    fn test_load_missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.json");
        let err = SkillVocabulary::load(&path).unwrap_err();
        assert!(matches!(err, VocabularyError::Io { .. }));
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_bundled_vocabulary_loads() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/skills.json");
        let vocab = SkillVocabulary::load(path).unwrap();
        assert!(vocab.contains("python"));
        assert!(vocab.contains("machine learning"));
    }

    #[test]
    fn test_term_boundaries() {
        let vocab = SkillVocabulary::new(["java", "c", "c++", "c#"]).unwrap();
        let found = |text: &str| {
            vocab
                .terms()
                .filter(|t| t.is_found_in(text))
                .map(|t| t.skill().to_string())
                .collect::<Vec<_>>()
        };
        assert!(found("JavaScript and TypeScript").is_empty());
        assert_eq!(found("Java, C++ and C#"), vec!["java", "c++", "c#"]);
        assert_eq!(found("plain C."), vec!["c"]);
    }

    #[test]
    fn test_unknown_skills() {
        let vocab = SkillVocabulary::new(["python", "sql"]).unwrap();
        let set = SkillSet::parse_list("python, cobol, sql, fortran");
        assert_eq!(vocab.unknown_skills(&set), vec!["cobol", "fortran"]);
    }
}
