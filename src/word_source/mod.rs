pub mod fallback;
pub mod gemini;

use async_trait::async_trait;
use thiserror::Error;

use crate::metrics::{FALLBACK_WORD_LISTS, REMOTE_WORD_LISTS};

#[derive(Debug, Error)]
pub enum WordSourceError {
    #[error("No api key is configured for the word source.")]
    MissingApiKey,
    #[error("The word list request failed. Error: '{0}'.")]
    Request(#[from] reqwest::Error),
    #[error("The word source answered with an unexpected status. Status: '{0}'.")]
    UnexpectedStatus(u16),
    #[error("The word source answered with a malformed body. Error: '{0}'.")]
    MalformedResponse(String),
    #[error("The word source answered without words.")]
    MissingWords,
}

/// Supplies candidate secret words for a category.
#[async_trait]
pub trait WordSource: Send + Sync {
    async fn fetch_words(&self, category_name: &str) -> Result<Vec<String>, WordSourceError>;
}

/// Asks the word source once and falls back to the built-in table on any failure.
/// The returned list is never empty.
pub async fn words_for_category(source: &dyn WordSource, category_name: &str) -> Vec<String> {
    let result = source
        .fetch_words(category_name)
        .await
        .and_then(|words| {
            let words: Vec<String> = words
                .into_iter()
                .map(|word| word.trim().to_string())
                .filter(|word| !word.is_empty())
                .collect();
            if words.is_empty() {
                Err(WordSourceError::MissingWords)
            } else {
                Ok(words)
            }
        });

    match result {
        Ok(words) => {
            REMOTE_WORD_LISTS.inc();
            log::info!(
                "Word list fetched. Category: '{category_name}', Words: '{}'.",
                words.len()
            );
            words
        }
        Err(error) => {
            FALLBACK_WORD_LISTS.inc();
            log::warn!(
                "Could not fetch the word list, using the built-in list. Category: '{category_name}', Error: '{error}'."
            );
            fallback::fallback_words(category_name)
        }
    }
}
