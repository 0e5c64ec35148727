use std::env;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub locale: String,
    pub tts_voice: String,
    pub asr_no_input_timeout_ms: u64,
    pub asr_complete_timeout_ms: u64,
    /// Opaque pass-through for the external speech actor.
    pub azure_region: String,
    pub azure_endpoint: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3000),
            locale: env::var("LOCALE").unwrap_or_else(|_| "en-US".to_string()),
            tts_voice: env::var("TTS_VOICE").unwrap_or_else(|_| "en-US-DavisNeural".to_string()),
            asr_no_input_timeout_ms: env::var("ASR_NO_INPUT_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
            asr_complete_timeout_ms: env::var("ASR_COMPLETE_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
            azure_region: env::var("AZURE_REGION").unwrap_or_default(),
            azure_endpoint: env::var("AZURE_ENDPOINT").unwrap_or_default(),
        }
    }
}
