// HTTP client for the coach-reply service

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use clarity_stream::{decode_ndjson_stream, drive_into_sink, EventSink, EventStream, StreamDecoder};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Response, Url};
use serde::de::DeserializeOwned;

use crate::error::{ClientError, Result};
use crate::traits::ReplyApi;
use crate::types::{
    CreatePromptRequest, PromptMutationResponse, PromptOption, ReplyRequest, ReplyResponse,
    UpdatePromptRequest,
};

const NDJSON: &str = "application/x-ndjson";
const API_KEY_HEADER: &str = "x-api-key";
const NAMESPACE_HEADER: &str = "x-namespace";

/// Client for the coach-reply and prompt routes (HTTP direct)
#[derive(Debug, Clone)]
pub struct CoachClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl CoachClient {
    pub fn builder() -> CoachClientBuilder {
        CoachClientBuilder::default()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `/prompts/{key}` with the key percent-encoded as one path segment
    fn prompt_url(&self, key: &str) -> Result<Url> {
        let mut url = Url::parse(&self.url("/prompts"))
            .map_err(|e| ClientError::Config(format!("Invalid base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| ClientError::Config("Base URL cannot hold a path".to_string()))?
            .push(key);
        Ok(url)
    }

    /// POST a reply request, mirroring its namespace into the `X-Namespace` header
    fn reply_post(&self, path: &str, request: &ReplyRequest) -> reqwest::RequestBuilder {
        let builder = self.http_client.post(self.url(path)).json(request);

        match request.namespace.as_deref() {
            Some(namespace) => builder.header(NAMESPACE_HEADER, namespace),
            None => builder,
        }
    }

    /// Stream a reply into a sink
    ///
    /// Never fails: a request that cannot be sent or is rejected becomes a
    /// single failure on the sink, as does a transport error mid-body.
    /// Returns the number of events dispatched.
    pub async fn coach_reply_text_stream<K>(&self, request: &ReplyRequest, sink: &mut K) -> usize
    where
        K: EventSink + ?Sized,
    {
        match ReplyApi::coach_reply_stream(self, request).await {
            Ok(events) => drive_into_sink(events, sink).await,
            Err(e) => {
                tracing::error!("Stream request failed: {}", e);
                let mut decoder = StreamDecoder::new();
                sink.dispatch(decoder.on_transport_failure(&e));
                1
            }
        }
    }

    /// Prompt keys as selectable options
    pub async fn fetch_prompt_options(&self) -> Result<Vec<PromptOption>> {
        let response = self
            .http_client
            .get(self.url("/prompt/keys"))
            .send()
            .await?;

        let keys: Vec<String> = read_json(response).await?;
        Ok(keys.into_iter().map(PromptOption::from).collect())
    }

    pub async fn list_prompts(&self) -> Result<BTreeMap<String, String>> {
        let response = self.http_client.get(self.url("/prompts")).send().await?;
        read_json(response).await
    }

    pub async fn get_prompt(&self, key: &str) -> Result<String> {
        let response = self.http_client.get(self.prompt_url(key)?).send().await?;
        read_json(response).await
    }

    /// Create a prompt; the service rejects existing keys
    pub async fn create_prompt(&self, key: &str, value: &str) -> Result<String> {
        let body = CreatePromptRequest {
            prompt_key: key,
            prompt_value: value,
        };

        let response = self
            .http_client
            .post(self.url("/prompts"))
            .json(&body)
            .send()
            .await?;

        let result: PromptMutationResponse = read_json(response).await?;
        tracing::info!("Created prompt {}", key);
        Ok(result.message)
    }

    pub async fn update_prompt(&self, key: &str, value: &str) -> Result<String> {
        let body = UpdatePromptRequest {
            prompt_value: value,
        };

        let response = self
            .http_client
            .put(self.prompt_url(key)?)
            .json(&body)
            .send()
            .await?;

        let result: PromptMutationResponse = read_json(response).await?;
        tracing::info!("Updated prompt {}", key);
        Ok(result.message)
    }

    pub async fn delete_prompt(&self, key: &str) -> Result<String> {
        let response = self
            .http_client
            .delete(self.prompt_url(key)?)
            .send()
            .await?;

        let result: PromptMutationResponse = read_json(response).await?;
        tracing::info!("Deleted prompt {}", key);
        Ok(result.message)
    }
}

#[async_trait]
impl ReplyApi for CoachClient {
    async fn coach_reply(&self, request: &ReplyRequest) -> Result<ReplyResponse> {
        let response = self.reply_post("/coach_reply", request).send().await?;

        read_json(response).await
    }

    async fn coach_reply_stream(&self, request: &ReplyRequest) -> Result<EventStream> {
        tracing::debug!(prompt = %request.prompt, mode = ?request.mode, "Starting reply stream");

        let response = self
            .reply_post("/coach_reply/stream", request)
            .header(ACCEPT, NDJSON)
            .send()
            .await?;

        let response = check_status(response).await?;
        Ok(decode_ndjson_stream(response.bytes_stream()))
    }
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Failed to read response body".to_string());

    tracing::error!("Coach API request failed: status={}, body={}", status, body);
    Err(ClientError::status(status, &body))
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let response = check_status(response).await?;
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

/// Builder for CoachClient
#[derive(Default)]
pub struct CoachClientBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl CoachClientBuilder {
    /// Service base URL, e.g. "http://localhost:9621"
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<CoachClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Config("Base URL is required".to_string()))?;

        let base_url = base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|e| ClientError::Config(format!("Invalid base URL {}: {}", base_url, e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(api_key) = self.api_key {
            headers.insert(
                API_KEY_HEADER,
                HeaderValue::from_str(&api_key)
                    .map_err(|_| ClientError::Config("Invalid API key format".to_string()))?,
            );
        }

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = self.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }

        let http_client = builder.build()?;

        Ok(CoachClient {
            http_client,
            base_url,
        })
    }
}
