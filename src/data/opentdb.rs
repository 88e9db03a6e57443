//! Open Trivia DB client.

use std::future::Future;
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use super::provider::ProviderError;

pub const DEFAULT_API_URL: &str = "https://opentdb.com/api.php";

/// Largest `amount` the API accepts in a single request.
pub const MAX_AMOUNT: usize = 50;

/// One item as delivered by the trivia API, still percent-encoded.
#[derive(Debug, Clone, Deserialize)]
pub struct RawQuestion {
    pub question: String,
    pub correct_answer: String,
    pub incorrect_answers: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    response_code: u8,
    results: Vec<RawQuestion>,
}

/// Something that can hand out raw multiple-choice items.
pub trait TriviaSource: Send + Sync + 'static {
    fn fetch(
        &self,
        count: usize,
    ) -> impl Future<Output = Result<Vec<RawQuestion>, ProviderError>> + Send;
}

/// HTTP source backed by the Open Trivia DB.
pub struct OpenTdb {
    http: reqwest::Client,
    api_url: String,
}

impl OpenTdb {
    pub fn new(api_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            api_url: api_url.into(),
        })
    }

    fn request(&self, count: usize) -> reqwest::RequestBuilder {
        let amount = count.clamp(1, MAX_AMOUNT);
        self.http.get(&self.api_url).query(&[
            ("amount", amount.to_string()),
            ("type", "multiple".to_string()),
            ("encode", "url3986".to_string()),
        ])
    }
}

impl TriviaSource for OpenTdb {
    fn fetch(
        &self,
        count: usize,
    ) -> impl Future<Output = Result<Vec<RawQuestion>, ProviderError>> + Send {
        let request = self.request(count);
        async move {
            let response = request.send().await?.error_for_status()?;
            debug!(status = %response.status(), "trivia api responded");
            let body = response.text().await?;
            parse_response(&body)
        }
    }
}

/// Decode an API response body into its items.
///
/// A non-zero `response_code` or an empty result list is an error.
pub fn parse_response(body: &str) -> Result<Vec<RawQuestion>, ProviderError> {
    let envelope: Envelope = serde_json::from_str(body)?;

    if envelope.response_code != 0 {
        return Err(ProviderError::Api {
            code: envelope.response_code,
        });
    }

    if envelope.results.is_empty() {
        return Err(ProviderError::Empty);
    }

    Ok(envelope.results)
}
