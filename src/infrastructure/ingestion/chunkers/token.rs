//! Token-window chunking

use std::sync::Arc;

use unicode_segmentation::UnicodeSegmentation;

use crate::domain::ingestion::{ChunkingConfig, TextSplitter, Tokenizer};
use crate::domain::DomainError;

/// Tokenizes at Unicode word boundaries. Whitespace runs and punctuation
/// are tokens too, so the tokens always concatenate back to the input.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeWordTokenizer;

impl Tokenizer for UnicodeWordTokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Result<Vec<&'a str>, DomainError> {
        Ok(text.split_word_bounds().collect())
    }

    fn name(&self) -> &'static str {
        "unicode_word"
    }
}

/// Cuts text into windows of `chunk_size` tokens, each starting
/// `chunk_size - chunk_overlap` tokens after the previous one
#[derive(Debug, Clone)]
pub struct TokenSplitter {
    config: ChunkingConfig,
    tokenizer: Arc<dyn Tokenizer>,
}

impl TokenSplitter {
    pub fn new(config: ChunkingConfig, tokenizer: Arc<dyn Tokenizer>) -> Result<Self, DomainError> {
        config.validate()?;
        Ok(Self { config, tokenizer })
    }

    /// Splitter using the Unicode word tokenizer
    pub fn with_word_tokens(config: ChunkingConfig) -> Result<Self, DomainError> {
        Self::new(config, Arc::new(UnicodeWordTokenizer))
    }

    pub fn config(&self) -> &ChunkingConfig {
        &self.config
    }
}

impl TextSplitter for TokenSplitter {
    fn split(&self, text: &str) -> Result<Vec<String>, DomainError> {
        if text.trim().is_empty() {
            return Ok(vec![]);
        }

        let tokens = self.tokenizer.tokenize(text).map_err(|e| match e {
            DomainError::Chunking { .. } => e,
            other => DomainError::chunking(format!(
                "{} tokenizer failed: {}",
                self.tokenizer.name(),
                other
            )),
        })?;

        let size = self.config.chunk_size;
        let stride = self.config.stride();
        let mut chunks = Vec::new();
        let mut start = 0;

        loop {
            let end = (start + size).min(tokens.len());
            chunks.push(tokens[start..end].concat());

            if end == tokens.len() {
                break;
            }

            start += stride;
        }

        Ok(chunks)
    }

    fn name(&self) -> &'static str {
        "token"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn splitter(size: usize, overlap: usize) -> TokenSplitter {
        TokenSplitter::with_word_tokens(ChunkingConfig::new(size, overlap)).unwrap()
    }

    /// Drop each later chunk's leading overlap and join
    fn reassemble(chunks: &[String], overlap: usize) -> String {
        let tokenizer = UnicodeWordTokenizer;
        let mut text = String::new();

        for (i, chunk) in chunks.iter().enumerate() {
            let tokens = tokenizer.tokenize(chunk).unwrap();
            let skip = if i == 0 { 0 } else { overlap };
            text.push_str(&tokens[skip..].concat());
        }

        text
    }

    #[test]
    fn test_tokenizer_is_lossless() {
        let text = "Hello, wörld!  It's 3.14\n\tok";
        let tokens = UnicodeWordTokenizer.tokenize(text).unwrap();

        assert_eq!(tokens.concat(), text);
        assert!(tokens.contains(&"wörld"));
    }

    #[test]
    fn test_empty_and_whitespace_yield_nothing() {
        let splitter = splitter(8, 2);

        assert!(splitter.split("").unwrap().is_empty());
        assert!(splitter.split(" \n\t ").unwrap().is_empty());
    }

    #[test]
    fn test_short_text_is_one_chunk() {
        let chunks = splitter(512, 100).split("A short passage.").unwrap();
        assert_eq!(chunks, vec!["A short passage.".to_string()]);
    }

    #[test]
    fn test_windows_respect_token_budget() {
        let text = "one two three four five six seven eight nine ten";
        let chunks = splitter(5, 1).split(text).unwrap();

        // 19 tokens: 10 words and 9 spaces
        for chunk in &chunks {
            assert!(UnicodeWordTokenizer.tokenize(chunk).unwrap().len() <= 5);
        }
        assert_eq!(chunks[0], "one two three");
        assert_eq!(chunks[1], "three four five");
    }

    #[test]
    fn test_chunks_reassemble_to_input() {
        let text = "Rust is a multi-paradigm, general-purpose programming language. \
                    It emphasizes performance, type safety, and concurrency.\n\n\
                    It enforces memory safety without a garbage collector.";

        for (size, overlap) in [(4, 0), (7, 3), (16, 5), (512, 100)] {
            let chunks = splitter(size, overlap).split(text).unwrap();
            assert_eq!(reassemble(&chunks, overlap), text, "size {} overlap {}", size, overlap);
        }
    }

    #[test]
    fn test_invalid_overlap_is_chunking_error() {
        let err = TokenSplitter::with_word_tokens(ChunkingConfig::new(10, 10)).unwrap_err();
        assert!(matches!(err, DomainError::Chunking { .. }));
    }

    #[derive(Debug)]
    struct BrokenTokenizer;

    impl Tokenizer for BrokenTokenizer {
        fn tokenize<'a>(&self, _text: &'a str) -> Result<Vec<&'a str>, DomainError> {
            Err(DomainError::internal("vocabulary missing"))
        }

        fn name(&self) -> &'static str {
            "broken"
        }
    }

    #[test]
    fn test_tokenizer_failure_is_chunking_error() {
        let splitter =
            TokenSplitter::new(ChunkingConfig::default(), Arc::new(BrokenTokenizer)).unwrap();

        let err = splitter.split("some text").unwrap_err();

        assert!(matches!(err, DomainError::Chunking { .. }));
        assert!(err.to_string().contains("broken"));
    }
}
