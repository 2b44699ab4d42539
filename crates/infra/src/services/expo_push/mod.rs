use nudge_domain::PushMessage;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const PUSH_SEND_PATH: &str = "/--/api/v2/push/send";

/// Per-message receipt handed back by the Expo push service. A ticket
/// with status "error" means the message was rejected, anything else
/// means it was accepted for delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushTicket {
    pub status: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct PushSendResponse {
    data: Vec<PushTicket>,
}

/// Transport to the external push notification provider. One call
/// submits at most the provider's documented chunk limit of messages
/// and yields a ticket per message or a request level error.
#[async_trait::async_trait]
pub trait IPushGateway: Send + Sync {
    async fn send_chunk(&self, messages: &[PushMessage]) -> anyhow::Result<Vec<PushTicket>>;
}

pub struct ExpoPushRestApi {
    client: Client,
    base_url: String,
    access_token: Option<String>,
}

impl ExpoPushRestApi {
    pub fn new(base_url: String, access_token: Option<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("To create reqwest client");

        Self {
            client,
            base_url,
            access_token,
        }
    }
}

#[async_trait::async_trait]
impl IPushGateway for ExpoPushRestApi {
    async fn send_chunk(&self, messages: &[PushMessage]) -> anyhow::Result<Vec<PushTicket>> {
        let mut req = self
            .client
            .post(format!("{}{}", self.base_url, PUSH_SEND_PATH))
            .json(messages);
        if let Some(access_token) = &self.access_token {
            req = req.bearer_auth(access_token);
        }

        let res = req.send().await?;
        let status = res.status();
        if !status.is_success() {
            anyhow::bail!("Expo push api responded with status code: {}", status);
        }

        let res: PushSendResponse = res.json().await?;
        if res.data.len() != messages.len() {
            tracing::warn!(
                "Expo push api returned {} tickets for {} messages",
                res.data.len(),
                messages.len()
            );
        }

        Ok(res.data)
    }
}
