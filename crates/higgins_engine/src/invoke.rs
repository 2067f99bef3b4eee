use std::time::Duration;

use futures_util::StreamExt;
use higgins_logging::higgins_debug;
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;

use crate::{decode_envelope, FailureKind, InvocationType, InvokeError, InvokeRequest};

/// Invoke API version the path is built with.
pub const API_VERSION: &str = "2015-03-31";

const FUNCTION_ERROR_HEADER: &str = "X-Amz-Function-Error";
/// Execution logs are never requested back.
const LOG_TYPE: &str = "None";

#[derive(Debug, Clone)]
pub struct InvokeSettings {
    /// Base URL of the invoke API. Derived from `region` when absent.
    pub endpoint: Option<String>,
    pub region: String,
    pub api_version: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl Default for InvokeSettings {
    fn default() -> Self {
        Self {
            endpoint: None,
            region: "us-east-1".to_string(),
            api_version: API_VERSION.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            max_bytes: 6 * 1024 * 1024,
        }
    }
}

impl InvokeSettings {
    pub fn base_url(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.clone(),
            None => format!("https://lambda.{}.amazonaws.com", self.region),
        }
    }
}

/// Invokes a named function and returns the `body` of its response.
#[async_trait::async_trait]
pub trait Invoker: Send + Sync {
    async fn invoke(&self, request: &InvokeRequest) -> Result<String, InvokeError>;
}

/// Invoker speaking the function invoke HTTP API.
#[derive(Debug, Clone)]
pub struct HttpInvoker {
    settings: InvokeSettings,
    base_url: Url,
    client: reqwest::Client,
}

impl HttpInvoker {
    pub fn new(settings: InvokeSettings) -> Result<Self, InvokeError> {
        let base_url = Url::parse(&settings.base_url())
            .map_err(|err| InvokeError::new(FailureKind::InvalidEndpoint, err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(InvokeError::new(
                FailureKind::InvalidEndpoint,
                format!("{base_url} cannot be a base url"),
            ));
        }
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| InvokeError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self {
            settings,
            base_url,
            client,
        })
    }

    /// `{base}/{api_version}/functions/{name}/invocations`
    pub fn invocation_url(&self, function_name: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend([
                self.settings.api_version.as_str(),
                "functions",
                function_name,
                "invocations",
            ]);
        }
        url
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, InvokeError> {
        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(InvokeError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(InvokeError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl Invoker for HttpInvoker {
    async fn invoke(&self, request: &InvokeRequest) -> Result<String, InvokeError> {
        let url = self.invocation_url(&request.function_name);
        higgins_debug!(
            "POST {} type={} payload_len={}",
            url,
            request.invocation_type.header_value(),
            request.payload.len()
        );

        let response = self
            .client
            .post(url)
            .header("X-Amz-Invocation-Type", request.invocation_type.header_value())
            .header("X-Amz-Log-Type", LOG_TYPE)
            .header(CONTENT_TYPE, "application/json")
            .body(request.payload.clone())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(InvokeError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let function_error = response
            .headers()
            .get(FUNCTION_ERROR_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let bytes = self.read_body(response).await?;

        if let Some(error_type) = function_error {
            let detail = String::from_utf8_lossy(&bytes);
            return Err(InvokeError::new(
                FailureKind::FunctionError,
                format!("{error_type}: {detail}"),
            ));
        }

        match request.invocation_type {
            InvocationType::RequestResponse => decode_envelope(&bytes),
            // Nothing comes back for asynchronous or dry-run calls.
            InvocationType::Event | InvocationType::DryRun => Ok(String::new()),
        }
    }
}

fn map_reqwest_error(err: reqwest::Error) -> InvokeError {
    if err.is_timeout() {
        return InvokeError::new(FailureKind::Timeout, err.to_string());
    }
    InvokeError::new(FailureKind::Network, err.to_string())
}
