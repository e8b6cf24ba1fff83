//! Summary prompt value object

/// Output language used when none is configured
pub const DEFAULT_SUMMARY_LANGUAGE: &str = "日本語";

/// Value object holding the instruction sent alongside the call audio.
/// Asks for the caller, the purpose of the call and the next action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryPrompt {
    content: String,
}

impl SummaryPrompt {
    /// Build the prompt for the given output language
    pub fn build(language: &str) -> Self {
        let language = match language.trim() {
            "" => DEFAULT_SUMMARY_LANGUAGE,
            other => other,
        };
        let content = format!(
            "この通話音声を分析し、『発信者』『用件』『ネクストアクション』を{}で要約してください。",
            language
        );
        Self { content }
    }

    /// Get the prompt content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl Default for SummaryPrompt {
    fn default() -> Self {
        Self::build(DEFAULT_SUMMARY_LANGUAGE)
    }
}
