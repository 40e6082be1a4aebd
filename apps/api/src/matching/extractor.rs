use crate::matching::skill_set::SkillSet;
use crate::matching::vocabulary::SkillVocabulary;

/// Returns the vocabulary terms present in `text`, in vocabulary order.
/// Matching is case-insensitive and anchored on word/phrase boundaries.
pub fn extract(text: &str, vocabulary: &SkillVocabulary) -> SkillSet {
    if text.trim().is_empty() {
        return SkillSet::new();
    }
    vocabulary
        .terms()
        .filter(|term| term.is_found_in(text))
        .map(|term| term.skill())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab(terms: &[&str]) -> SkillVocabulary {
        SkillVocabulary::new(terms).unwrap()
    }

    #[test]
    fn test_python_and_cpp_but_not_java() {
        let vocab = vocab(&["python", "java", "c++"]);
        let skills = extract("Experienced in Python and C++ development", &vocab);
        assert_eq!(skills.into_vec(), vec!["python", "c++"]);
    }

    #[test]
    fn test_empty_text_yields_empty_set() {
        let vocab = vocab(&["python"]);
        assert!(extract("", &vocab).is_empty());
        assert!(extract("   \n\t", &vocab).is_empty());
    }

    #[test]
    fn test_no_partial_word_matches() {
        let vocab = vocab(&["java", "react", "sql"]);
        let skills = extract("JavaScript, reactive streams, PostgreSQL", &vocab);
        assert!(skills.is_empty(), "got {:?}", skills);
    }

    #[test]
    fn test_repeated_mentions_collapse() {
        let vocab = vocab(&["python", "sql"]);
        let skills = extract("python python PYTHON, SQL and more sql", &vocab);
        assert_eq!(skills.into_vec(), vec!["python", "sql"]);
    }

    #[test]
    fn test_results_follow_vocabulary_order() {
        let vocab = vocab(&["sql", "python", "docker"]);
        let skills = extract("Docker, then Python, then SQL", &vocab);
        assert_eq!(skills.into_vec(), vec!["sql", "python", "docker"]);
    }

    #[test]
    fn test_multi_word_terms_span_line_breaks() {
        let vocab = vocab(&["machine learning", "signal processing"]);
        let skills = extract("Projects in Machine\nLearning and\tsignal   processing.", &vocab);
        assert_eq!(
            skills.into_vec(),
            vec!["machine learning", "signal processing"]
        );
    }

    #[test]
    fn test_multi_word_terms_accept_hyphens() {
        let vocab = vocab(&["machine learning", "signal processing", "python"]);
        let skills = extract("Machine-learning engineer, signal - processing, python-based tooling", &vocab);
        assert_eq!(
            skills.into_vec(),
            vec!["machine learning", "signal processing", "python"]
        );
    }

    #[test]
    fn test_punctuated_terms() {
        let vocab = vocab(&["node.js", "c#", "c"]);
        let skills = extract("Built APIs with Node.js; tooling in C#.", &vocab);
        assert_eq!(skills.into_vec(), vec!["node.js", "c#"]);
    }

    #[test]
    fn test_result_is_always_subset_of_vocabulary() {
        let vocab = vocab(&["python", "java", "c++", "sql", "machine learning", "rust"]);
        let texts = [
            "",
            "rust rust rust",
            "Java/C++/Python/SQL",
            "trust in javascript and rusty sqlite",
            "MACHINE LEARNING with python",
        ];
        for text in texts {
            let skills = extract(text, &vocab);
            assert!(
                skills.iter().all(|skill| vocab.contains(skill)),
                "{text:?} -> {skills:?}"
            );
        }
    }
}
