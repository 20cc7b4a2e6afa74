//! Console mode: the behavioral profile of the assistant.
//!
//! [`ConsoleMode`] selects which system directive is attached to an
//! outbound request and whether an assistant reply is scanned for an
//! insights block.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operating mode of the console.
///
/// - **Study** (default): mentor profile, plain prose replies.
/// - **Interview**: staff-engineer review profile; replies may carry an
///   insights block after [`INSIGHTS_MARKER`](crate::response::INSIGHTS_MARKER).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleMode {
    #[default]
    Study,
    Interview,
}

impl ConsoleMode {
    /// Label appended to the shared directive preamble
    pub fn directive_label(&self) -> &'static str {
        match self {
            ConsoleMode::Study => "STUDY",
            ConsoleMode::Interview => "INTERVIEW",
        }
    }

    /// Get a short description for display
    pub fn short_description(&self) -> &'static str {
        match self {
            ConsoleMode::Study => "Study core: first-principles mentoring",
            ConsoleMode::Interview => "Staff review: critical interview feedback",
        }
    }

    /// Whether replies in this mode are scanned for an insights block
    pub fn expects_insights(&self) -> bool {
        matches!(self, ConsoleMode::Interview)
    }

    /// The other mode
    pub fn toggled(&self) -> Self {
        match self {
            ConsoleMode::Study => ConsoleMode::Interview,
            ConsoleMode::Interview => ConsoleMode::Study,
        }
    }
}

impl fmt::Display for ConsoleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsoleMode::Study => write!(f, "study"),
            ConsoleMode::Interview => write!(f, "interview"),
        }
    }
}

impl std::str::FromStr for ConsoleMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "study" | "s" => Ok(ConsoleMode::Study),
            "interview" | "i" | "review" => Ok(ConsoleMode::Interview),
            _ => Err(DomainError::InvalidMode(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ConsoleMode::Study), "study");
        assert_eq!(format!("{}", ConsoleMode::Interview), "interview");
    }

    #[test]
    fn test_default() {
        assert_eq!(ConsoleMode::default(), ConsoleMode::Study);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("study".parse::<ConsoleMode>().ok(), Some(ConsoleMode::Study));
        assert_eq!("S".parse::<ConsoleMode>().ok(), Some(ConsoleMode::Study));
        assert_eq!(
            "Interview".parse::<ConsoleMode>().ok(),
            Some(ConsoleMode::Interview)
        );
        assert_eq!("i".parse::<ConsoleMode>().ok(), Some(ConsoleMode::Interview));
        assert_eq!(
            "chat".parse::<ConsoleMode>(),
            Err(DomainError::InvalidMode("chat".to_string()))
        );
    }

    #[test]
    fn test_expects_insights() {
        assert!(!ConsoleMode::Study.expects_insights());
        assert!(ConsoleMode::Interview.expects_insights());
    }

    #[test]
    fn test_toggled() {
        assert_eq!(ConsoleMode::Study.toggled(), ConsoleMode::Interview);
        assert_eq!(ConsoleMode::Interview.toggled(), ConsoleMode::Study);
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&ConsoleMode::Interview).unwrap();
        assert_eq!(json, "\"interview\"");
    }
}
