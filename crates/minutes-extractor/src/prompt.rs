//! Prompt construction for action item extraction

/// Builds the single instruction string sent to the model
pub struct PromptBuilder<'a> {
    transcript: &'a str,
}

impl<'a> PromptBuilder<'a> {
    /// Create a builder for one transcript
    pub fn new(transcript: &'a str) -> Self {
        Self { transcript }
    }

    /// Build the complete prompt
    ///
    /// The transcript is appended verbatim; it is not escaped or trimmed.
    pub fn build(&self) -> String {
        let mut prompt = String::with_capacity(self.transcript.len() + 400);

        prompt.push_str("Extract action items from this meeting transcript. ");
        prompt.push_str(
            "Return ONLY a valid JSON array, no markdown, no explanation, no other text.\n\n",
        );

        prompt.push_str("Format: ");
        prompt.push_str(
            r#"[{"task": "description", "owner": "person name or null", "due_date": "date or null"}]"#,
        );
        prompt.push_str("\n\n");

        prompt.push_str("If no action items exist, return: []\n\n");

        prompt.push_str("Meeting transcript:\n");
        prompt.push_str(self.transcript);

        prompt
    }
}
