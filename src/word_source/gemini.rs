use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::config::WordSourceSettings;
use crate::word_source::{WordSource, WordSourceError};

/// Asks a generative-language model for words that children know in a category.
pub struct GeminiWordSource {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    request_timeout: Duration,
}

impl GeminiWordSource {
    pub fn new(settings: &WordSourceSettings) -> Self {
        GeminiWordSource {
            client: reqwest::Client::new(),
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            api_key: settings
                .api_key
                .clone()
                .filter(|api_key| !api_key.trim().is_empty()),
            request_timeout: settings.request_timeout(),
        }
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    fn request_body(category_name: &str) -> serde_json::Value {
        json!({
            "contents": [{
                "parts": [{
                    "text": format!("초등학생들이 알만한 '{category_name}' 카테고리의 단어들을 20개 정도 추천해줘.")
                }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "words": {
                            "type": "ARRAY",
                            "items": { "type": "STRING" },
                            "description": "초등학생 수준의 단어 리스트"
                        }
                    },
                    "required": ["words"]
                }
            }
        })
    }

    fn parse_words(body: &str) -> Result<Vec<String>, WordSourceError> {
        let response: GenerateContentResponse = serde_json::from_str(body)
            .map_err(|error| WordSourceError::MalformedResponse(error.to_string()))?;
        let text = response
            .candidates
            .into_iter()
            .filter_map(|candidate| candidate.content)
            .flat_map(|content| content.parts)
            .find_map(|part| part.text)
            .ok_or_else(|| {
                WordSourceError::MalformedResponse("The response has no text part.".to_string())
            })?;

        let word_list: WordList = serde_json::from_str(&text)
            .map_err(|error| WordSourceError::MalformedResponse(error.to_string()))?;
        word_list.words.ok_or(WordSourceError::MissingWords)
    }
}

#[async_trait]
impl WordSource for GeminiWordSource {
    async fn fetch_words(&self, category_name: &str) -> Result<Vec<String>, WordSourceError> {
        let api_key = self.api_key.as_ref().ok_or(WordSourceError::MissingApiKey)?;

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", api_key)
            .timeout(self.request_timeout)
            .json(&GeminiWordSource::request_body(category_name))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WordSourceError::UnexpectedStatus(status.as_u16()));
        }

        let body = response.text().await?;
        GeminiWordSource::parse_words(&body)
    }
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Deserialize)]
struct WordList {
    words: Option<Vec<String>>,
}
