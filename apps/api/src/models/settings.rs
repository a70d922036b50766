use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL_ID: &str = "gpt-4";
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are an expert resume writer and career advisor. \
Help users optimize their resumes for ATS systems and specific job descriptions. \
Provide actionable feedback and suggestions.";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 2000;

pub const TEMPERATURE_RANGE: std::ops::RangeInclusive<f32> = 0.0..=2.0;
pub const MAX_TOKENS_RANGE: std::ops::RangeInclusive<u32> = 100..=4000;

/// User-editable AI configuration. Persisted as one namespaced JSON record and
/// read at the start of every gateway-driven operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    #[serde(alias = "apiKey")]
    pub credential: String,
    #[serde(alias = "aiModel")]
    pub model_id: String,
    pub system_prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// Stored and editable but not consumed by any save/load trigger.
    pub auto_save: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            credential: String::new(),
            model_id: DEFAULT_MODEL_ID.to_string(),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            auto_save: true,
        }
    }
}

impl Settings {
    pub fn has_credential(&self) -> bool {
        !self.credential.trim().is_empty()
    }

    /// Returns the first problem found, if any.
    pub fn validate(&self) -> Result<(), String> {
        if self.model_id.trim().is_empty() {
            return Err("modelId cannot be empty".to_string());
        }
        if !TEMPERATURE_RANGE.contains(&self.temperature) {
            return Err(format!(
                "temperature must be between {} and {}",
                TEMPERATURE_RANGE.start(),
                TEMPERATURE_RANGE.end()
            ));
        }
        if !MAX_TOKENS_RANGE.contains(&self.max_tokens) {
            return Err(format!(
                "maxTokens must be between {} and {}",
                MAX_TOKENS_RANGE.start(),
                MAX_TOKENS_RANGE.end()
            ));
        }
        Ok(())
    }

    /// Copy safe to return to clients: the credential keeps only its last four characters.
    pub fn masked(&self) -> Self {
        let chars: Vec<char> = self.credential.chars().collect();
        let credential = if chars.is_empty() {
            String::new()
        } else if chars.len() <= 4 {
            "*".repeat(chars.len())
        } else {
            let tail: String = chars[chars.len() - 4..].iter().collect();
            format!("{}{}", "*".repeat(chars.len() - 4), tail)
        };
        Self {
            credential,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_settings_page() {
        let s = Settings::default();
        assert_eq!(s.model_id, "gpt-4");
        assert!((s.temperature - 0.7).abs() < f32::EPSILON);
        assert_eq!(s.max_tokens, 2000);
        assert!(s.auto_save);
        assert!(!s.has_credential());
    }

    #[test]
    fn test_legacy_field_names_are_accepted() {
        let json = r#"{
            "apiKey": "sk-test",
            "aiModel": "claude-3-haiku",
            "systemPrompt": "Be brief.",
            "temperature": 0.2,
            "maxTokens": 1000,
            "autoSave": false
        }"#;
        let s: Settings = serde_json::from_str(json).unwrap();
        assert_eq!(s.credential, "sk-test");
        assert_eq!(s.model_id, "claude-3-haiku");
        assert_eq!(s.max_tokens, 1000);
        assert!(!s.auto_save);
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let s: Settings = serde_json::from_str(r#"{"credential":"k"}"#).unwrap();
        assert_eq!(s.credential, "k");
        assert_eq!(s.model_id, DEFAULT_MODEL_ID);
        assert_eq!(s.system_prompt, DEFAULT_SYSTEM_PROMPT);
    }

    #[test]
    fn test_serializes_camel_case() {
        let value = serde_json::to_value(Settings::default()).unwrap();
        assert!(value.get("modelId").is_some());
        assert!(value.get("maxTokens").is_some());
        assert!(value.get("autoSave").is_some());
    }

    #[test]
    fn test_validate_rejects_out_of_range_values() {
        let hot = Settings {
            temperature: 2.5,
            ..Settings::default()
        };
        assert!(hot.validate().is_err());

        let short = Settings {
            max_tokens: 50,
            ..Settings::default()
        };
        assert!(short.validate().is_err());

        let unnamed = Settings {
            model_id: "  ".to_string(),
            ..Settings::default()
        };
        assert!(unnamed.validate().is_err());

        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_masked_keeps_last_four_characters() {
        let s = Settings {
            credential: "sk-abcdef1234".to_string(),
            ..Settings::default()
        };
        assert_eq!(s.masked().credential, "*********1234");
        assert_eq!(Settings::default().masked().credential, "");
    }
}
