//! HTTP delivery gateway for Resend-style provider APIs.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{
    error::GatewayError,
    gateway::DeliveryGateway,
    types::{DeliveryReceipt, OutboundEmail},
};

const DEFAULT_API_BASE: &str = "https://api.resend.com";

/// Timeout applied to every provider request.
///
/// The dispatcher imposes no timeout of its own, so a hung provider call
/// is bounded only here.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Gateway speaking the Resend JSON send API.
///
/// Bearer-authenticated `POST {base}/emails` with a JSON payload; success
/// responses carry the provider message id, error responses a JSON
/// `message` body.
pub struct HttpGateway {
    client: reqwest::Client,
    api_base: String,
    api_key: String,
    from: String,
}

impl HttpGateway {
    /// Create a gateway sending as `from` with the given API key.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be
    /// constructed (TLS backend initialization).
    pub fn new(api_key: impl Into<String>, from: impl Into<String>) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: api_key.into(),
            from: from.into(),
        })
    }

    /// Override the API base URL (primarily for tests and proxies).
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }
}

#[derive(Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    html: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
    tags: Vec<TagPayload<'a>>,
}

#[derive(Serialize)]
struct TagPayload<'a> {
    name: &'a str,
    value: &'a str,
}

#[derive(Deserialize)]
struct SendResponse {
    id: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    message: String,
}

#[async_trait]
impl DeliveryGateway for HttpGateway {
    async fn send(&self, email: &OutboundEmail) -> Result<DeliveryReceipt, GatewayError> {
        // The template category always travels with the message, alongside
        // any caller-supplied tags.
        let mut tags: Vec<TagPayload<'_>> = email
            .tags
            .iter()
            .map(|tag| TagPayload {
                name: &tag.name,
                value: &tag.value,
            })
            .collect();
        tags.push(TagPayload {
            name: "category",
            value: &email.category,
        });

        let request = SendRequest {
            from: &self.from,
            to: &email.to,
            subject: &email.subject,
            html: &email.html_body,
            reply_to: email.reply_to.as_deref(),
            tags,
        };

        let response = self
            .client
            .post(format!("{}/emails", self.api_base))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let body: SendResponse = response
                .json()
                .await
                .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;

            return Ok(DeliveryReceipt {
                message_id: body.id,
                provider: self.provider_name(),
            });
        }

        let message = response
            .json::<ErrorResponse>()
            .await
            .map_or_else(|_| format!("HTTP {status}"), |body| body.message);

        // 429 is throttling and 5xx a provider outage, both worth another
        // attempt later; any other 4xx means the provider refused this
        // payload and will keep refusing it.
        Err(match status.as_u16() {
            429 => GatewayError::RateLimited(message),
            400..=499 => GatewayError::Rejected(message),
            _ => GatewayError::Unavailable(message),
        })
    }

    fn provider_name(&self) -> &'static str {
        "resend"
    }
}
