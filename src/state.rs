use std::sync::Arc;

use crate::asr::google::GoogleSpeechClient;
use crate::asr::interface::SpeechRecognizer;
use crate::config::Config;
use crate::keywords::KeywordTable;

/// Per-process state shared by the handlers. Everything here is immutable
/// once built, so requests never observe each other.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub keywords: Arc<KeywordTable>,
    pub recognizer: Arc<dyn SpeechRecognizer>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let recognizer = Arc::new(GoogleSpeechClient::new(
            config.provider.endpoint.clone(),
            config.provider.api_key.clone(),
            config.provider.language.clone(),
        ));

        Ok(Self {
            config,
            keywords: Arc::new(KeywordTable::builtin()?),
            recognizer,
        })
    }

    /// Swap the recognizer, used by tests to keep requests off the network.
    pub fn with_recognizer(mut self, recognizer: Arc<dyn SpeechRecognizer>) -> Self {
        self.recognizer = recognizer;
        self
    }
}
