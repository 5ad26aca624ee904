//! Session token generation

use std::time::{SystemTime, UNIX_EPOCH};

/// Produces `ATTEND_<millis>_<Subject>` tokens.
///
/// The millisecond stamp never repeats for one generator: when the clock
/// has not advanced past the previous stamp the previous stamp plus one
/// is used instead.
#[derive(Debug, Clone)]
pub struct TokenGenerator {
    label: String,
    last_stamp: u128,
}

impl TokenGenerator {
    pub fn new(subject: &str) -> Self {
        Self {
            label: subject.split_whitespace().collect(),
            last_stamp: 0,
        }
    }

    /// The subject label with whitespace removed
    #[cfg(test)]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Generate a fresh token
    pub fn next_token(&mut self) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis();
        let stamp = now.max(self.last_stamp + 1);
        self.last_stamp = stamp;
        format!("ATTEND_{}_{}", stamp, self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_label_strips_whitespace() {
        let generator = TokenGenerator::new("Database  Systems\tLab");
        assert_eq!(generator.label(), "DatabaseSystemsLab");
    }

    #[test]
    fn test_token_format() {
        let mut generator = TokenGenerator::new("Database Systems");
        let token = generator.next_token();
        assert!(token.starts_with("ATTEND_"));
        assert!(token.ends_with("_DatabaseSystems"));

        let stamp = token
            .trim_start_matches("ATTEND_")
            .trim_end_matches("_DatabaseSystems");
        assert!(stamp.parse::<u128>().is_ok());
    }

    #[test]
    fn test_tokens_unique_in_tight_loop() {
        let mut generator = TokenGenerator::new("Data Structures");
        let tokens: HashSet<String> = (0..1000).map(|_| generator.next_token()).collect();
        assert_eq!(tokens.len(), 1000);
    }
}
