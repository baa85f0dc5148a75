//! Text-to-speech for listening passages.
//!
//! The quiz only needs raw audio bytes for a script; [`SpeechProvider`] is the
//! seam, [`GeminiSpeech`] the implementation backed by the Gemini TTS model.

mod gemini;
mod pcm;

use std::fmt;

pub use gemini::{GeminiSpeech, DEFAULT_BASE_URL, TTS_MODEL};
pub use pcm::{decode_base64, pcm_to_samples, write_wav, SAMPLE_RATE};

use crate::models::{ListeningSession, SpeakerConfig};

/// Voice used when a passage has no speaker configuration.
pub const DEFAULT_VOICE: &str = "Kore";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Voice {
    Single(String),
    Multi(Vec<SpeakerConfig>),
}

/// A script to synthesize and how to voice it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechRequest {
    pub text: String,
    pub voice: Voice,
}

impl SpeechRequest {
    pub fn single(text: impl Into<String>, voice: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice: Voice::Single(voice.into()),
        }
    }

    /// Request for a passage script, or `None` if the passage has none.
    ///
    /// Multi-speaker passages use their speaker voices; everything else is
    /// read by `voice`.
    pub fn for_passage(passage: &ListeningSession, voice: &str) -> Option<Self> {
        let text = passage.listening_script.clone()?;
        let voice = if passage.is_multi_speaker && !passage.speaker_configs.is_empty() {
            Voice::Multi(passage.speaker_configs.clone())
        } else {
            Voice::Single(voice.to_string())
        };
        Some(Self { text, voice })
    }
}

/// Anything that turns a script into 16-bit little-endian mono PCM.
pub trait SpeechProvider {
    fn synthesize(&self, request: &SpeechRequest) -> Result<Vec<u8>, SpeechError>;
}

#[derive(Debug)]
pub enum SpeechError {
    /// No API key was configured.
    MissingApiKey,
    /// The request could not be sent or the body could not be read.
    Http(reqwest::Error),
    /// The service answered with a non-success status.
    Status { status: u16, body: String },
    /// The response carried no inline audio.
    NoAudio,
    /// The inline audio was not valid base64.
    Base64(base64::DecodeError),
}

impl fmt::Display for SpeechError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpeechError::MissingApiKey => {
                write!(f, "no API key; pass --api-key or set GEMINI_API_KEY")
            }
            SpeechError::Http(e) => write!(f, "speech request failed: {}", e),
            SpeechError::Status { status, body } if body.is_empty() => {
                write!(f, "speech service returned HTTP {}", status)
            }
            SpeechError::Status { status, body } => {
                write!(f, "speech service returned HTTP {}: {}", status, body)
            }
            SpeechError::NoAudio => write!(f, "speech service returned no audio"),
            SpeechError::Base64(e) => write!(f, "audio payload is not valid base64: {}", e),
        }
    }
}

impl std::error::Error for SpeechError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SpeechError::Http(e) => Some(e),
            SpeechError::Base64(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SpeechError {
    fn from(err: reqwest::Error) -> Self {
        SpeechError::Http(err)
    }
}

impl From<base64::DecodeError> for SpeechError {
    fn from(err: base64::DecodeError) -> Self {
        SpeechError::Base64(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passage(script: Option<&str>, multi: bool) -> ListeningSession {
        ListeningSession {
            title: "Sticky rice".to_string(),
            description: String::new(),
            listening_script: script.map(str::to_string),
            is_multi_speaker: multi,
            speaker_configs: vec![
                SpeakerConfig {
                    speaker: "Mai".to_string(),
                    voice: "Kore".to_string(),
                },
                SpeakerConfig {
                    speaker: "Tom".to_string(),
                    voice: "Puck".to_string(),
                },
            ],
            questions: Vec::new(),
        }
    }

    #[test]
    fn test_request_for_single_speaker_passage() {
        let request = SpeechRequest::for_passage(&passage(Some("Hello."), false), "Zephyr").unwrap();
        assert_eq!(request, SpeechRequest::single("Hello.", "Zephyr"));
    }

    #[test]
    fn test_request_for_multi_speaker_passage() {
        let request = SpeechRequest::for_passage(&passage(Some("Mai: Hi!"), true), DEFAULT_VOICE).unwrap();
        match request.voice {
            Voice::Multi(speakers) => assert_eq!(speakers.len(), 2),
            Voice::Single(_) => panic!("expected multi-speaker voice"),
        }
    }

    #[test]
    fn test_passage_without_script_has_no_request() {
        assert!(SpeechRequest::for_passage(&passage(None, false), DEFAULT_VOICE).is_none());
    }
}
