use log::{debug, info};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use super::pcm::decode_base64;
use super::{SpeechError, SpeechProvider, SpeechRequest, Voice};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const TTS_MODEL: &str = "gemini-2.5-flash-preview-tts";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<TextPart>,
}

#[derive(Debug, Serialize)]
struct TextPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<&'static str>,
    speech_config: SpeechConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeechConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    voice_config: Option<VoiceConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    multi_speaker_voice_config: Option<MultiSpeakerVoiceConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceConfig {
    prebuilt_voice_config: PrebuiltVoiceConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PrebuiltVoiceConfig {
    voice_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MultiSpeakerVoiceConfig {
    speaker_voice_configs: Vec<SpeakerVoiceConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeakerVoiceConfig {
    speaker: String,
    voice_config: VoiceConfig,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
struct InlineData {
    data: String,
}

fn voice_config(name: &str) -> VoiceConfig {
    VoiceConfig {
        prebuilt_voice_config: PrebuiltVoiceConfig {
            voice_name: name.to_string(),
        },
    }
}

impl From<&SpeechRequest> for GenerateRequest {
    fn from(request: &SpeechRequest) -> Self {
        let speech_config = match &request.voice {
            Voice::Single(name) => SpeechConfig {
                voice_config: Some(voice_config(name)),
                multi_speaker_voice_config: None,
            },
            Voice::Multi(speakers) => SpeechConfig {
                voice_config: None,
                multi_speaker_voice_config: Some(MultiSpeakerVoiceConfig {
                    speaker_voice_configs: speakers
                        .iter()
                        .map(|s| SpeakerVoiceConfig {
                            speaker: s.speaker.clone(),
                            voice_config: voice_config(&s.voice),
                        })
                        .collect(),
                }),
            },
        };

        GenerateRequest {
            contents: vec![Content {
                parts: vec![TextPart {
                    text: request.text.clone(),
                }],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["AUDIO"],
                speech_config,
            },
        }
    }
}

/// Pull the first inline audio payload out of a response and decode it.
fn extract_audio(response: GenerateResponse) -> Result<Vec<u8>, SpeechError> {
    let data = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.inline_data)
        .map(|inline| inline.data)
        .ok_or(SpeechError::NoAudio)?;

    Ok(decode_base64(&data)?)
}

/// Gemini TTS over the generative language REST API.
pub struct GeminiSpeech {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiSpeech {
    pub fn new(api_key: Option<String>, base_url: Option<String>) -> Result<Self, SpeechError> {
        let api_key = api_key
            .filter(|key| !key.trim().is_empty())
            .ok_or(SpeechError::MissingApiKey)?;

        Ok(Self {
            client: Client::new(),
            api_key,
            base_url: base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, TTS_MODEL)
    }
}

impl SpeechProvider for GeminiSpeech {
    fn synthesize(&self, request: &SpeechRequest) -> Result<Vec<u8>, SpeechError> {
        let endpoint = self.endpoint();
        info!(
            "requesting speech for {} characters from {}",
            request.text.len(),
            endpoint
        );

        let response = self
            .client
            .post(&endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&GenerateRequest::from(request))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(SpeechError::Status {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        let audio = extract_audio(response.json::<GenerateResponse>()?)?;
        debug!("received {} bytes of PCM audio", audio.len());
        Ok(audio)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::models::SpeakerConfig;

    #[test]
    fn test_single_voice_request_body() {
        let request = SpeechRequest::single("Good morning.", "Kore");
        let body = serde_json::to_value(GenerateRequest::from(&request)).unwrap();

        assert_eq!(
            body,
            json!({
                "contents": [{ "parts": [{ "text": "Good morning." }] }],
                "generationConfig": {
                    "responseModalities": ["AUDIO"],
                    "speechConfig": {
                        "voiceConfig": { "prebuiltVoiceConfig": { "voiceName": "Kore" } }
                    }
                }
            })
        );
    }

    #[test]
    fn test_multi_speaker_request_body() {
        let request = SpeechRequest {
            text: "Mai: Hi. Tom: Hello.".to_string(),
            voice: Voice::Multi(vec![
                SpeakerConfig {
                    speaker: "Mai".to_string(),
                    voice: "Kore".to_string(),
                },
                SpeakerConfig {
                    speaker: "Tom".to_string(),
                    voice: "Puck".to_string(),
                },
            ]),
        };
        let body = serde_json::to_value(GenerateRequest::from(&request)).unwrap();
        let speech = &body["generationConfig"]["speechConfig"];

        assert!(speech.get("voiceConfig").is_none());
        let speakers = &speech["multiSpeakerVoiceConfig"]["speakerVoiceConfigs"];
        assert_eq!(speakers[0]["speaker"], "Mai");
        assert_eq!(
            speakers[1]["voiceConfig"]["prebuiltVoiceConfig"]["voiceName"],
            "Puck"
        );
    }

    #[test]
    fn test_extract_audio() {
        let response: GenerateResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": { "parts": [{ "inlineData": { "mimeType": "audio/L16", "data": "AQACAA==" } }] }
            }]
        }))
        .unwrap();

        assert_eq!(extract_audio(response).unwrap(), vec![1, 0, 2, 0]);
    }

    #[test]
    fn test_response_without_audio() {
        let response: GenerateResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "parts": [{ "text": "sorry" }] } }]
        }))
        .unwrap();
        assert!(matches!(extract_audio(response), Err(SpeechError::NoAudio)));

        assert!(matches!(
            extract_audio(GenerateResponse::default()),
            Err(SpeechError::NoAudio)
        ));
    }

    #[test]
    fn test_missing_api_key() {
        assert!(matches!(
            GeminiSpeech::new(None, None),
            Err(SpeechError::MissingApiKey)
        ));
        assert!(matches!(
            GeminiSpeech::new(Some("  ".to_string()), None),
            Err(SpeechError::MissingApiKey)
        ));
    }

    #[test]
    fn test_endpoint_uses_base_url() {
        let speech =
            GeminiSpeech::new(Some("key".to_string()), Some("http://localhost:9000/".to_string()))
                .unwrap();
        assert_eq!(
            speech.endpoint(),
            "http://localhost:9000/models/gemini-2.5-flash-preview-tts:generateContent"
        );
    }
}
