use reqwest::Method;

use super::{ApiClient, ClientResult};
use crate::models::{ChatReply, ChatRequest};

/// Facade for `/api/chat/`
pub struct ChatApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ChatApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Forward one user turn to the assistant and return its reply
    pub async fn send_message(&self, text: &str) -> ClientResult<ChatReply> {
        let request = self
            .client
            .request(Method::POST, "/api/chat/")
            .json(&ChatRequest {
                message: text.to_string(),
            });

        self.client.send_json(request).await
    }
}
