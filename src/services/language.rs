use futures_util::FutureExt;
use futures_util::future::BoxFuture;
use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, warn};

use super::{LanguageService, TargetLanguage};
use crate::config::{Credentials, ResolvedConfig};
use crate::request::{RequestError, ServiceError, TimedExecutor};

#[derive(Debug, Deserialize)]
struct DetectResponse {
    data: DetectData,
}

#[derive(Debug, Deserialize)]
struct DetectData {
    // One inner list of candidates per query string.
    detections: Vec<Vec<DetectionCandidate>>,
}

#[derive(Debug, Deserialize)]
struct DetectionCandidate {
    language: String,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    translations: Vec<TranslationItem>,
}

#[derive(Debug, Deserialize)]
struct TranslationItem {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

/// Extracts the first candidate's language tag from a detection response body.
pub fn parse_detection(body: &[u8]) -> Result<String, RequestError> {
    let response: DetectResponse = serde_json::from_slice(body)
        .map_err(|e| RequestError::MalformedResponse(format!("detection: {e}")))?;

    response
        .data
        .detections
        .into_iter()
        .next()
        .and_then(|candidates| candidates.into_iter().next())
        .map(|c| c.language)
        .filter(|tag| !tag.is_empty())
        .ok_or_else(|| RequestError::MalformedResponse("detection: no candidates".to_string()))
}

/// Extracts the first translated text from a translation response body.
pub fn parse_translation(body: &[u8]) -> Result<String, RequestError> {
    let response: TranslateResponse = serde_json::from_slice(body)
        .map_err(|e| RequestError::MalformedResponse(format!("translation: {e}")))?;

    response
        .data
        .translations
        .into_iter()
        .next()
        .map(|t| t.translated_text)
        .ok_or_else(|| RequestError::MalformedResponse("translation: empty list".to_string()))
}

/// Google Cloud Translation (v2) client for detection and translation.
pub struct GoogleLanguageService {
    executor: TimedExecutor,
    credentials: Credentials,
    detect_endpoint: String,
    translate_endpoint: String,
}

impl GoogleLanguageService {
    pub const fn new(
        executor: TimedExecutor,
        credentials: Credentials,
        detect_endpoint: String,
        translate_endpoint: String,
    ) -> Self {
        Self {
            executor,
            credentials,
            detect_endpoint,
            translate_endpoint,
        }
    }

    pub fn from_config(config: &ResolvedConfig, executor: TimedExecutor) -> Self {
        Self::new(
            executor,
            config.credentials.clone(),
            config.detect_endpoint.clone(),
            config.translate_endpoint.clone(),
        )
    }

    async fn get(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Vec<u8>, ServiceError> {
        self.credentials.validate()?;

        let key = self.credentials.language.value();
        let url = Url::parse_with_params(endpoint, params.iter().copied().chain([("key", key)]))
            .map_err(|e| RequestError::Unknown(format!("invalid endpoint '{endpoint}': {e}")))?;

        let response = self.executor.execute(self.executor.client().get(url)).await?;
        Ok(response.body.to_vec())
    }

    async fn detect_inner(&self, text: &str) -> Result<String, ServiceError> {
        let body = self.get(&self.detect_endpoint, &[("q", text)]).await?;
        let tag = parse_detection(&body).inspect_err(|e| warn!(error = %e, "bad detection response"))?;
        debug!(language = %tag, "language detected");
        Ok(tag)
    }

    async fn translate_inner(
        &self,
        text: &str,
        target: TargetLanguage,
    ) -> Result<String, ServiceError> {
        let body = self
            .get(
                &self.translate_endpoint,
                &[("q", text), ("target", target.code())],
            )
            .await?;
        let translated =
            parse_translation(&body).inspect_err(|e| warn!(error = %e, "bad translation response"))?;
        Ok(translated)
    }
}

impl LanguageService for GoogleLanguageService {
    fn detect<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<String, ServiceError>> {
        self.detect_inner(text).boxed()
    }

    fn translate<'a>(
        &'a self,
        text: &'a str,
        target: TargetLanguage,
    ) -> BoxFuture<'a, Result<String, ServiceError>> {
        self.translate_inner(text, target).boxed()
    }
}
