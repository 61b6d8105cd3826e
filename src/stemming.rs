//! Tag stemming

use rust_stemmers::{Algorithm, Stemmer as SnowballStemmer};

/// Normalizes a single, already lower-cased tag token.
pub trait Stemmer {
    /// Stem of `token`; tokens without a known suffix come back unchanged.
    fn stem(&self, token: &str) -> String;
}

/// Snowball stemmer for English.
pub struct EnglishStemmer {
    inner: SnowballStemmer,
}

impl EnglishStemmer {
    pub fn new() -> Self {
        Self { inner: SnowballStemmer::create(Algorithm::English) }
    }
}

impl Default for EnglishStemmer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EnglishStemmer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("EnglishStemmer")
    }
}

impl Stemmer for EnglishStemmer {
    fn stem(&self, token: &str) -> String {
        self.inner.stem(token).into_owned()
    }
}

impl<F> Stemmer for F
where
    F: Fn(&str) -> String,
{
    fn stem(&self, token: &str) -> String {
        self(token)
    }
}
