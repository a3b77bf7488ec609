use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::interface::{RecognitionOutcome, SpeechRecognizer};

pub const DEFAULT_ENDPOINT: &str = "http://www.google.com/speech-api/v2/recognize";

const SAMPLE_RATE_HZ: u32 = 44_100;

/// Client for the Google Web Speech API. Uploaded bytes are forwarded as-is
/// with the assumed PCM parameters; the service does no transcoding.
#[derive(Debug, Clone)]
pub struct GoogleSpeechClient {
    client: Client,
    endpoint: String,
    api_key: String,
    language: String,
}

#[derive(Debug, Deserialize)]
struct RecognizeLine {
    #[serde(default)]
    result: Vec<RecognizeResult>,
}

#[derive(Debug, Deserialize)]
struct RecognizeResult {
    #[serde(default)]
    alternative: Vec<Alternative>,
}

#[derive(Debug, Deserialize)]
struct Alternative {
    transcript: Option<String>,
}

impl GoogleSpeechClient {
    pub fn new(endpoint: String, api_key: String, language: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            api_key,
            language,
        }
    }

    /// The API answers one JSON object per line; leading lines carry an empty
    /// result set while the service is still deciding. The transcript is the
    /// first alternative of the first non-empty result.
    fn parse_response(body: &str) -> RecognitionOutcome {
        for line in body.lines().filter(|l| !l.trim().is_empty()) {
            let Ok(parsed) = serde_json::from_str::<RecognizeLine>(line) else {
                continue;
            };
            if let Some(transcript) = parsed
                .result
                .iter()
                .flat_map(|r| r.alternative.iter())
                .find_map(|a| a.transcript.as_deref())
            {
                return RecognitionOutcome::Success(transcript.to_string());
            }
        }
        RecognitionOutcome::Unrecognized
    }
}

#[async_trait]
impl SpeechRecognizer for GoogleSpeechClient {
    async fn recognize(&self, audio: Vec<u8>) -> RecognitionOutcome {
        let url = format!(
            "{}?client=chromium&lang={}&key={}",
            self.endpoint, self.language, self.api_key
        );

        debug!(bytes = audio.len(), "posting clip to recognition provider");

        let response = match self
            .client
            .post(&url)
            .header(
                reqwest::header::CONTENT_TYPE,
                format!("audio/l16; rate={}", SAMPLE_RATE_HZ),
            )
            .body(audio)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return RecognitionOutcome::Failed(e.to_string()),
        };

        if !response.status().is_success() {
            return RecognitionOutcome::Failed(format!("provider returned {}", response.status()));
        }

        match response.text().await {
            Ok(body) => Self::parse_response(&body),
            Err(e) => RecognitionOutcome::Failed(e.to_string()),
        }
    }
}
