use serde::Serialize;

use crate::matching::skill_set::SkillSet;

/// Coverage score of one skill set against another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Score {
    /// 0 – 100
    pub value: u32,
    /// `a ∩ b`, in the order of `a`.
    pub matched: SkillSet,
}

impl Score {
    /// Raw number of shared skills.
    pub fn overlap(&self) -> usize {
        self.matched.len()
    }

    pub fn explanation(&self) -> String {
        if self.matched.is_empty() {
            "No matching skills found.".to_string()
        } else {
            format!(
                "Matched skills: {}",
                self.matched.iter().collect::<Vec<_>>().join(", ")
            )
        }
    }
}

/// `round(100 * |a ∩ b| / |b|)`: how much of `b` is covered by `a`.
///
/// The second argument is always the denominator. An empty `b` scores 0.
pub fn score(a: &SkillSet, b: &SkillSet) -> Score {
    let matched: SkillSet = a.iter().filter(|skill| b.contains(skill)).collect();

    let value = if b.is_empty() {
        0
    } else {
        ((matched.len() as f64 / b.len() as f64) * 100.0).round() as u32
    };

    Score { value, matched }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(skills: &str) -> SkillSet {
        SkillSet::parse_list(skills)
    }

    #[test]
    fn test_set_matches_itself_fully() {
        for skills in ["python", "python, sql", "rust, c++, machine learning, git"] {
            let a = set(skills);
            assert_eq!(score(&a, &a).value, 100);
        }
    }

    #[test]
    fn test_empty_denominator_scores_zero() {
        let empty = SkillSet::new();
        assert_eq!(score(&set("python, sql"), &empty).value, 0);
        assert_eq!(score(&empty, &empty).value, 0);
        assert!(score(&set("python"), &empty).matched.is_empty());
    }

    #[test]
    fn test_empty_numerator_scores_zero() {
        assert_eq!(score(&SkillSet::new(), &set("python")).value, 0);
    }

    #[test]
    fn test_intern_mentor_scenario() {
        let intern = set("python, sql");
        let mentor = set("python, react, sql, java");

        // mentor covers every intern skill
        let covered = score(&mentor, &intern);
        assert_eq!(covered.value, 100);
        assert_eq!(covered.overlap(), 2);

        // intern covers half the mentor's skills
        let reverse = score(&intern, &mentor);
        assert_eq!(reverse.value, 50);
        assert_eq!(reverse.matched.into_vec(), vec!["python", "sql"]);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let a: SkillSet = ["Python", "SQL"].into_iter().collect();
        let b: SkillSet = ["python", "sql", "react"].into_iter().collect();
        assert_eq!(score(&a, &b).value, 67);
    }

    #[test]
    fn test_rounding() {
        // 1/3 -> 33, 2/3 -> 67
        let b = set("a, b, c");
        assert_eq!(score(&set("a"), &b).value, 33);
        assert_eq!(score(&set("a, b"), &b).value, 67);
    }

    #[test]
    fn test_score_is_bounded() {
        let a = set("a, b, c, d, e");
        let b = set("a, b");
        assert_eq!(score(&a, &b).value, 100);
    }

    #[test]
    fn test_explanation() {
        let s = score(&set("python, sql"), &set("sql, python, java"));
        assert_eq!(s.explanation(), "Matched skills: python, sql");
        let none = score(&set("rust"), &set("java"));
        assert_eq!(none.explanation(), "No matching skills found.");
    }
}
