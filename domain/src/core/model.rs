//! Model value object representing a hosted generative model

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Hosted models the console can talk to (Value Object)
///
/// The console targets a single model for the whole session. Unknown
/// identifiers are carried verbatim as [`Model::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Model {
    #[default]
    Gemini3Pro,
    Gemini25Pro,
    Gemini25Flash,
    Custom(String),
}

impl Model {
    /// Get the string identifier sent to the provider
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gemini3Pro => "gemini-3-pro-preview",
            Model::Gemini25Pro => "gemini-2.5-pro",
            Model::Gemini25Flash => "gemini-2.5-flash",
            Model::Custom(s) => s,
        }
    }

    /// Largest thinking budget the provider accepts for this model.
    ///
    /// `None` for custom identifiers, whose limits are unknown; the
    /// requested budget is then sent unchanged.
    pub fn max_thinking_budget(&self) -> Option<u32> {
        match self {
            Model::Gemini3Pro | Model::Gemini25Pro => Some(32_768),
            Model::Gemini25Flash => Some(24_576),
            Model::Custom(_) => None,
        }
    }

    /// Clamp a requested thinking budget to this model's ceiling
    pub fn thinking_budget(&self, requested: u32) -> u32 {
        self.max_thinking_budget()
            .map_or(requested, |max| requested.min(max))
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "gemini-3-pro-preview" => Model::Gemini3Pro,
            "gemini-2.5-pro" => Model::Gemini25Pro,
            "gemini-2.5-flash" => Model::Gemini25Flash,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let Ok(model) = s.parse::<Model>();
        Ok(model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_model_parses() {
        let model: Model = "gemini-2.5-flash".parse().unwrap();
        assert_eq!(model, Model::Gemini25Flash);
        assert_eq!(model.to_string(), "gemini-2.5-flash");
    }

    #[test]
    fn test_custom_model() {
        let model: Model = "gemini-exp-1206".parse().unwrap();
        assert_eq!(model, Model::Custom("gemini-exp-1206".to_string()));
        assert_eq!(model.to_string(), "gemini-exp-1206");
        assert_eq!(model.max_thinking_budget(), None);
        assert_eq!(model.thinking_budget(32_768), 32_768);
    }

    #[test]
    fn test_thinking_budget_clamped_per_model() {
        assert_eq!(Model::Gemini3Pro.thinking_budget(32_768), 32_768);
        assert_eq!(Model::Gemini25Pro.thinking_budget(32_768), 32_768);
        assert_eq!(Model::Gemini25Flash.thinking_budget(32_768), 24_576);
        assert_eq!(Model::Gemini25Flash.thinking_budget(1_024), 1_024);
    }

    #[test]
    fn test_model_default() {
        assert_eq!(Model::default(), Model::Gemini3Pro);
        assert_eq!(Model::default().as_str(), "gemini-3-pro-preview");
    }

    #[test]
    fn test_serde_as_plain_string() {
        let json = serde_json::to_string(&Model::Gemini25Pro).unwrap();
        assert_eq!(json, "\"gemini-2.5-pro\"");
        let back: Model = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Model::Gemini25Pro);
    }
}
