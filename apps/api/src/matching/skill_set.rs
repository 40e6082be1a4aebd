use serde::{Deserialize, Serialize};

/// Case-normalized set of skill strings. Keeps first-seen order so results
/// are deterministic; duplicates collapse on insert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct SkillSet(Vec<String>);

/// Trims, lowercases and collapses inner whitespace: `"  Machine  Learning "`
/// becomes `"machine learning"`.
pub fn normalize(skill: &str) -> String {
    skill
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Splits free-typed text such as `"Machine Learning, Python; SQL"` into a set.
    pub fn parse_list(text: &str) -> Self {
        text.split([',', ';', '\n', '|']).collect()
    }

    /// Inserts the normalized skill. Returns `false` for blanks and duplicates.
    pub fn insert(&mut self, skill: &str) -> bool {
        let skill = normalize(skill);
        if skill.is_empty() || self.0.contains(&skill) {
            return false;
        }
        self.0.push(skill);
        true
    }

    pub fn contains(&self, skill: &str) -> bool {
        let skill = normalize(skill);
        self.0.contains(&skill)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl<S: AsRef<str>> FromIterator<S> for SkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = SkillSet::new();
        for skill in iter {
            set.insert(skill.as_ref());
        }
        set
    }
}

impl From<Vec<String>> for SkillSet {
    fn from(skills: Vec<String>) -> Self {
        skills.into_iter().collect()
    }
}

impl From<SkillSet> for Vec<String> {
    fn from(set: SkillSet) -> Self {
        set.0
    }
}
