/// Embeds extracted document text into the flashcard-generation instructions.
#[derive(Debug, Clone, Copy)]
pub struct PromptBuilder {
    max_input_chars: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub text: String,
    /// Set when the input exceeded the character budget and was cut.
    pub truncated: bool,
    pub input_chars: usize,
}

impl PromptBuilder {
    pub const DEFAULT_MAX_INPUT_CHARS: usize = 4000;

    pub fn new(max_input_chars: usize) -> Self {
        Self { max_input_chars }
    }

    pub fn max_input_chars(&self) -> usize {
        self.max_input_chars
    }

    pub fn build(&self, content: &str) -> Prompt {
        let (excerpt, truncated) = truncate_chars(content, self.max_input_chars);
        let input_chars = if truncated {
            self.max_input_chars
        } else {
            content.chars().count()
        };

        Prompt {
            text: render_template(excerpt),
            truncated,
            input_chars,
        }
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_INPUT_CHARS)
    }
}

/// Hard cut at `max_chars` Unicode scalar values; not word-boundary aware.
fn truncate_chars(text: &str, max_chars: usize) -> (&str, bool) {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => (&text[..byte_index], true),
        None => (text, false),
    }
}

// The triple quotes are visual delimiters only. Document text containing them is passed through as-is.
fn render_template(excerpt: &str) -> String {
    format!(
        r#"
You are an expert tutor who writes flashcards for efficient studying.

From the content below, produce a **complete set of high-quality question-answer flashcards**. Rules:

1. Break every **topic, subtopic and key point** down into separate flashcards.
2. Each flashcard covers **exactly one concept** or fact.
3. Ask **clear, specific questions** that check understanding, not just recall.
4. Give **complete, concise answers**; never vague ones.
5. Cover **definitions, examples, steps and reasoning** wherever the content has them.
6. Do not repeat questions and skip filler content.
7. Do **not stop at a fixed number of flashcards**; write as many as the material needs.
8. **CRITICAL: Output ONLY the JSON array. No conversational text, no explanations and no markdown code fences (like ```json or ```) before or after the array.**

### Input Content:
"""
{excerpt}
"""

### Output Format (strict JSON array, nothing else):
[
    {{
    "question": "What is ...?",
    "answer": "..."
    }},
    ...
]
"#
    )
}
