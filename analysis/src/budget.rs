use anyhow::Result;
use std::borrow::Cow;
use tiktoken_rs::{cl100k_base, CoreBPE};

/// Caps how much report text is sent to the model.
///
/// Token counts use the `cl100k_base` vocabulary, which tracks Gemini's own
/// tokenizer closely enough for a guard rail.
pub struct ReportBudget {
    max_tokens: usize,
    bpe: CoreBPE,
}

impl ReportBudget {
    pub fn new(max_tokens: usize) -> Result<Self> {
        if max_tokens == 0 {
            anyhow::bail!("report token budget must be at least 1");
        }

        Ok(Self {
            max_tokens,
            bpe: cl100k_base()?,
        })
    }

    pub fn max_tokens(&self) -> usize {
        self.max_tokens
    }

    pub fn count_tokens(&self, text: &str) -> usize {
        self.bpe.encode_with_special_tokens(text).len()
    }

    /// Returns the text unchanged when it fits, otherwise its longest prefix
    /// of at most `max_tokens` tokens that decodes to valid UTF-8.
    pub fn fit<'a>(&self, text: &'a str) -> Cow<'a, str> {
        let mut tokens = self.bpe.encode_with_special_tokens(text);
        if tokens.len() <= self.max_tokens {
            return Cow::Borrowed(text);
        }

        let total = tokens.len();
        tokens.truncate(self.max_tokens);
        // A cut can land inside a multi-byte character; back off until it decodes.
        while !tokens.is_empty() {
            if let Ok(prefix) = self.bpe.decode(tokens.clone()) {
                log::warn!(
                    "Report text truncated from {} to {} tokens",
                    total,
                    tokens.len()
                );
                return Cow::Owned(prefix);
            }
            tokens.pop();
        }

        Cow::Owned(String::new())
    }
}

impl std::fmt::Debug for ReportBudget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportBudget")
            .field("max_tokens", &self.max_tokens)
            .finish_non_exhaustive()
    }
}
