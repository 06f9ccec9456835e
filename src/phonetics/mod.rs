/*!
 * Word to phoneme sequence producers.
 *
 * Language modules turn a keyword into phoneme symbols through a
 * `PhonemeProducer`. The crate ships a pronouncing-dictionary producer and
 * a caching wrapper; a statistical predictor can be plugged in as the
 * dictionary's fallback.
 */

pub use self::cache::CachedProducer;
pub use self::dictionary::PhoneticDictionary;

pub mod cache;
pub mod dictionary;

use crate::errors::PhoneticsError;

/// Produces the phoneme sequence of a word
pub trait PhonemeProducer: Send + Sync {
    fn phonemes(&self, word: &str) -> Result<Vec<String>, PhoneticsError>;
}

impl<F> PhonemeProducer for F
where
    F: Fn(&str) -> Result<Vec<String>, PhoneticsError> + Send + Sync,
{
    fn phonemes(&self, word: &str) -> Result<Vec<String>, PhoneticsError> {
        self(word)
    }
}
