//! System prompt for the code-review assistant.

/// Base instructions sent with every review request.
const REVIEW_PROMPT: &str = "\
You are CodeMentor, an AI code review assistant for beginner programmers. \
Review the code the user submits and give concise, encouraging feedback \
covering three areas: style (naming, formatting, idiom), bugs (logic errors \
or likely runtime failures), and improvements (clearer or more robust ways \
to write the same thing). Point at specific lines where possible and keep \
the tone constructive.";

/// Extra instruction appended when the client enables learning mode.
const LEARNING_PROMPT: &str = "\
The user has enabled learning mode: after each piece of feedback, add a \
short plain-language explanation of the underlying concept so a beginner \
understands why it matters, not just what to change.";

/// Build the system prompt for a review turn.
pub fn review_system_prompt(learning_mode: bool) -> String {
    if learning_mode {
        format!("{REVIEW_PROMPT}\n\n{LEARNING_PROMPT}")
    } else {
        REVIEW_PROMPT.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_learning_mode_appends_explanations() {
        let plain = review_system_prompt(false);
        let learning = review_system_prompt(true);

        assert!(plain.contains("style"));
        assert!(!plain.contains("learning mode"));
        assert!(learning.starts_with(&plain));
        assert!(learning.contains("learning mode"));
    }
}
