use async_trait::async_trait;

/// Outcome of one recognition attempt. An unclear clip and a failed provider
/// call are data, not errors: the endpoint folds both into the 200 payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionOutcome {
    /// The provider produced a transcript.
    Success(String),
    /// The provider answered but could not make out any speech.
    Unrecognized,
    /// The call itself went wrong (transport, quota, non-2xx status).
    Failed(String),
}

/// Speech-recognition seam between the HTTP layer and the external provider.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Submit one clip, assumed to be interleaved 16-bit PCM at 44.1kHz,
    /// 2 channels. One outbound call per invocation, no retries.
    async fn recognize(&self, audio: Vec<u8>) -> RecognitionOutcome;
}
