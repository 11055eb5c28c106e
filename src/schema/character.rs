use serde::{Deserialize, Serialize};
use std::fmt;

/// A line of script text that looks like a character cue: the trimmed
/// line holds only uppercase ASCII letters, digits, spaces, underscores
/// and hyphens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterNameCandidate(String);

impl CharacterNameCandidate {
    /// Returns a candidate if the trimmed line qualifies as a character cue.
    pub fn from_line(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        if Self::is_cue(trimmed) {
            Some(Self(trimmed.to_string()))
        } else {
            None
        }
    }

    /// Returns true if `s` is a non-empty run of cue characters.
    pub fn is_cue(s: &str) -> bool {
        !s.is_empty()
            && s.bytes().all(|b| {
                b.is_ascii_uppercase() || b.is_ascii_digit() || matches!(b, b' ' | b'_' | b'-')
            })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CharacterNameCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for CharacterNameCandidate {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for CharacterNameCandidate {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cue_lines_qualify() {
        assert!(CharacterNameCandidate::is_cue("JOHN"));
        assert!(CharacterNameCandidate::is_cue("OLD MAN"));
        assert!(CharacterNameCandidate::is_cue("GUARD_2"));
        assert!(CharacterNameCandidate::is_cue("MARY-ANN"));
        assert!(CharacterNameCandidate::is_cue("R2D2"));
    }

    #[test]
    fn non_cue_lines_rejected() {
        assert!(!CharacterNameCandidate::is_cue(""));
        assert!(!CharacterNameCandidate::is_cue("John"));
        assert!(!CharacterNameCandidate::is_cue("INT. HOUSE - DAY"));
        assert!(!CharacterNameCandidate::is_cue("JOHN (V.O.)"));
        assert!(!CharacterNameCandidate::is_cue("ÉMILE"));
    }

    #[test]
    fn from_line_trims() {
        let c = CharacterNameCandidate::from_line("             CHARACTER NAME  ").unwrap();
        assert_eq!(c, "CHARACTER NAME");
        assert!(CharacterNameCandidate::from_line("   \t ").is_none());
    }
}
