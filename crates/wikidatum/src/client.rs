//! Caller-side client configuration.
//!
//! The crate performs no I/O. A host that fetches entities keeps its request
//! settings here and can load them from its own config files through serde.

use serde::{Deserialize, Serialize};

/// Settings for a Wikidata API consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Client {
    /// Whether requests are registered as bot (automated) requests.
    pub bot: bool,
    /// User-Agent sent with requests; hosts should identify themselves.
    pub user_agent: Option<String>,
}

impl Default for Client {
    fn default() -> Self {
        Client {
            bot: true,
            user_agent: None,
        }
    }
}

impl Client {
    /// Creates a client marked as a bot, with no User-Agent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether requests are registered as bot requests.
    pub fn with_bot(mut self, bot: bool) -> Self {
        self.bot = bot;
        self
    }

    /// Sets the User-Agent.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_bot() {
        let client = Client::new();
        assert!(client.bot);
        assert!(client.user_agent.is_none());
    }

    #[test]
    fn test_setters() {
        let client = Client::new()
            .with_bot(false)
            .with_user_agent("my-tool/1.0 (someone@example.org)");
        assert!(!client.bot);
        assert_eq!(
            client.user_agent.as_deref(),
            Some("my-tool/1.0 (someone@example.org)")
        );
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let client: Client = serde_json::from_str("{}").unwrap();
        assert_eq!(client, Client::default());

        let client: Client = serde_json::from_str(r#"{ "bot": false }"#).unwrap();
        assert!(!client.bot);

        let json = serde_json::to_value(Client::new().with_user_agent("ua")).unwrap();
        assert_eq!(json["bot"], serde_json::json!(true));
        assert_eq!(json["user_agent"], serde_json::json!("ua"));
    }
}
