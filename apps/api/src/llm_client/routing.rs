//! Model-id resolution: decides once which backend family a configured model id
//! belongs to and which concrete model id is sent upstream.

use serde::Serialize;

/// Prefix that reserves a model id for the message-style (Anthropic) backend.
const MESSAGE_FAMILY_PREFIX: &str = "claude";

/// Concrete id used for any `claude*` alias not present in [`MODEL_ALIASES`].
pub const DEFAULT_MESSAGE_MODEL: &str = "claude-3-5-sonnet-20241022";

/// Alias → concrete model id for the message-style backend.
const MODEL_ALIASES: &[(&str, &str)] = &[
    ("claude-3-sonnet", "claude-3-5-sonnet-20241022"),
    ("claude-3-haiku", "claude-3-5-haiku-20241022"),
];

/// The two request/response shapes a model id can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderFamily {
    /// `{choices: [{message: {content}}]}` replies (OpenAI chat completions).
    CompletionCompatible,
    /// `{content: [{text}]}` replies (Anthropic messages).
    MessageCompatible,
}

impl ProviderFamily {
    /// Human-facing vendor name.
    pub fn provider_name(&self) -> &'static str {
        match self {
            ProviderFamily::CompletionCompatible => "OpenAI",
            ProviderFamily::MessageCompatible => "Anthropic",
        }
    }

    /// Prefix used in user-facing upstream error messages.
    pub fn error_label(&self) -> &'static str {
        match self {
            ProviderFamily::CompletionCompatible => "OpenAI API error",
            ProviderFamily::MessageCompatible => "Claude API error",
        }
    }
}

/// Outcome of resolving a configured model id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModel {
    pub family: ProviderFamily,
    pub model: String,
}

/// Resolves a configured model id. Total and deterministic.
pub fn resolve_model(model_id: &str) -> ResolvedModel {
    if !model_id.starts_with(MESSAGE_FAMILY_PREFIX) {
        return ResolvedModel {
            family: ProviderFamily::CompletionCompatible,
            model: model_id.to_string(),
        };
    }

    let model = MODEL_ALIASES
        .iter()
        .find(|(alias, _)| *alias == model_id)
        .map(|(_, concrete)| *concrete)
        .unwrap_or(DEFAULT_MESSAGE_MODEL);

    ResolvedModel {
        family: ProviderFamily::MessageCompatible,
        model: model.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sonnet_alias() {
        let r = resolve_model("claude-3-sonnet");
        assert_eq!(r.family, ProviderFamily::MessageCompatible);
        assert_eq!(r.model, "claude-3-5-sonnet-20241022");
    }

    #[test]
    fn test_haiku_alias() {
        let r = resolve_model("claude-3-haiku");
        assert_eq!(r.family, ProviderFamily::MessageCompatible);
        assert_eq!(r.model, "claude-3-5-haiku-20241022");
    }

    #[test]
    fn test_unknown_claude_alias_falls_back_to_sonnet() {
        let r = resolve_model("claude-xyz");
        assert_eq!(r.family, ProviderFamily::MessageCompatible);
        assert_eq!(r.model, DEFAULT_MESSAGE_MODEL);
    }

    #[test]
    fn test_concrete_claude_id_is_not_passed_through() {
        // Only the alias table is consulted; anything else under the prefix uses the default.
        let r = resolve_model("claude-3-5-haiku-20241022");
        assert_eq!(r.model, DEFAULT_MESSAGE_MODEL);
    }

    #[test]
    fn test_non_claude_ids_pass_through_to_completion_family() {
        for id in ["gpt-4", "gpt-4-turbo", "gpt-3.5-turbo", "my-claude"] {
            let r = resolve_model(id);
            assert_eq!(r.family, ProviderFamily::CompletionCompatible, "{id}");
            assert_eq!(r.model, id);
        }
    }

    #[test]
    fn test_prefix_match_is_case_sensitive() {
        let r = resolve_model("Claude-3-sonnet");
        assert_eq!(r.family, ProviderFamily::CompletionCompatible);
        assert_eq!(r.model, "Claude-3-sonnet");
    }

    #[test]
    fn test_resolution_is_deterministic() {
        assert_eq!(resolve_model("claude-3-haiku"), resolve_model("claude-3-haiku"));
    }
}
