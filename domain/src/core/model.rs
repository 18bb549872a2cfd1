//! Model value object representing the text-generation model behind the Reasoning Service

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Known text-generation models (Value Object)
///
/// The identifier is passed through to the Reasoning Service unchanged;
/// anything not listed here becomes [`Model::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    Gpt35Turbo,
    Gpt4,
    Gpt4Turbo,
    Gpt4o,
    Gpt4oMini,
    Gpt41,
    Gpt41Mini,
    O3Mini,
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gpt35Turbo => "gpt-3.5-turbo",
            Model::Gpt4 => "gpt-4",
            Model::Gpt4Turbo => "gpt-4-turbo",
            Model::Gpt4o => "gpt-4o",
            Model::Gpt4oMini => "gpt-4o-mini",
            Model::Gpt41 => "gpt-4.1",
            Model::Gpt41Mini => "gpt-4.1-mini",
            Model::O3Mini => "o3-mini",
            Model::Custom(s) => s,
        }
    }

    /// Reasoning models reject a sampling temperature.
    pub fn accepts_temperature(&self) -> bool {
        !matches!(self, Model::O3Mini)
    }
}

impl Default for Model {
    /// Returns the default model (gpt-3.5-turbo)
    fn default() -> Self {
        Model::Gpt35Turbo
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
            "gpt-3.5-turbo" => Model::Gpt35Turbo,
            "gpt-4" => Model::Gpt4,
            "gpt-4-turbo" => Model::Gpt4Turbo,
            "gpt-4o" => Model::Gpt4o,
            "gpt-4o-mini" => Model::Gpt4oMini,
            "gpt-4.1" => Model::Gpt41,
            "gpt-4.1-mini" => Model::Gpt41Mini,
            "o3-mini" => Model::O3Mini,
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
        Ok(s.parse().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_model_parses() {
        let model: Model = "gpt-4o-mini".parse().unwrap();
        assert_eq!(model, Model::Gpt4oMini);
        assert_eq!(model.to_string(), "gpt-4o-mini");
    }

    #[test]
    fn test_custom_model() {
        let model: Model = "llama-3.1-70b-instruct".parse().unwrap();
        assert_eq!(model, Model::Custom("llama-3.1-70b-instruct".to_string()));
        assert_eq!(model.to_string(), "llama-3.1-70b-instruct");
    }

    #[test]
    fn test_model_default() {
        assert_eq!(Model::default(), Model::Gpt35Turbo);
    }

    #[test]
    fn test_serde_as_plain_string() {
        let json = serde_json::to_string(&Model::Gpt41).unwrap();
        assert_eq!(json, "\"gpt-4.1\"");
        let back: Model = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Model::Gpt41);
    }

    #[test]
    fn test_temperature_support() {
        assert!(Model::Gpt4o.accepts_temperature());
        assert!(!Model::O3Mini.accepts_temperature());
    }
}
