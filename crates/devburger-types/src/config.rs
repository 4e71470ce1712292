//! Runtime configuration for the DevBurger agent.
//!
//! Loaded from `config.toml` in the data directory; every field has a
//! default so a missing or partial file still yields a working setup. The
//! API key is deliberately NOT part of this struct -- it comes from the
//! environment and is wrapped in a secret type at the infra layer.

use serde::{Deserialize, Serialize};

/// The fixed attendant instructions seeded as each session's System turn.
pub const DEFAULT_SYSTEM_PROMPT: &str = "\
Você é o atendente virtual da 'DevBurger'.
Seu tom é prestativo, eficiente e descolado.
REGRAS:
1. Use 'listMenu' se o cliente perguntar preços. Não invente produtos.
2. Para 'finalizeOrder', colete: Nome, Telefone, Endereço e Itens.
3. Confirme o valor total antes de fechar o pedido.
4. Se o usuário pedir algo fora do cardápio, diga gentilmente que não temos.";

/// Agent configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Model identifier sent to the chat-completions endpoint.
    pub model: String,
    /// Base URL of the OpenAI-compatible API.
    pub api_base_url: String,
    pub temperature: f64,
    pub max_tokens: u32,
    /// Attendant instructions seeded as each session's System turn.
    pub system_prompt: String,
    /// Maximum turns kept per transcript; `None` keeps everything for the
    /// life of the process.
    pub max_session_turns: Option<usize>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            api_base_url: "https://api.openai.com/v1".to_string(),
            temperature: 0.7,
            max_tokens: 1024,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            max_session_turns: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.max_tokens, 1024);
        assert!(config.max_session_turns.is_none());
        assert!(config.system_prompt.contains("DevBurger"));
        assert!(config.system_prompt.contains("listMenu"));
    }

    #[test]
    fn test_partial_deserialize_fills_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"model": "gpt-4o"}"#).unwrap();
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.api_base_url, "https://api.openai.com/v1");
        assert!((config.temperature - 0.7).abs() < f64::EPSILON);
    }
}
