use nudge_domain::PushMessage;
use nudge_infra::{IPushGateway, NudgeContext, PushTicket};
use std::sync::{Arc, Mutex};

/// Push gateway double that records every submitted chunk instead of
/// calling out to the Expo push service
pub struct RecordingGateway {
    pub chunks: Mutex<Vec<Vec<PushMessage>>>,
}

impl RecordingGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            chunks: Mutex::new(vec![]),
        })
    }
}

#[async_trait::async_trait]
impl IPushGateway for RecordingGateway {
    async fn send_chunk(&self, messages: &[PushMessage]) -> anyhow::Result<Vec<PushTicket>> {
        self.chunks.lock().unwrap().push(messages.to_vec());
        Ok(messages
            .iter()
            .map(|_| PushTicket {
                status: "ok".into(),
                id: Some("ticket-id".into()),
                message: None,
                details: None,
            })
            .collect())
    }
}

/// Application context backed by inmemory repositories and the
/// recording gateway
pub fn test_context(gateway: Arc<RecordingGateway>) -> NudgeContext {
    let mut ctx = NudgeContext::create_inmemory();
    ctx.push_gateway = gateway;
    ctx
}
