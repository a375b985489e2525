//! Prompt construction for page summarisation.
//!
//! The template lives here as the single source of truth so tests can assert
//! the exact request text without going anywhere near a live endpoint, and so
//! changing the wording touches exactly one place.

/// Instruction prefixed to the extracted page text
/// ("Summarise the following text").
pub const SUMMARY_PROMPT_PREFIX: &str = "다음 텍스트를 요약해줘:\n\n";

/// Build the summarisation prompt for one page's extracted text.
///
/// The output is exactly `SUMMARY_PROMPT_PREFIX` followed by `text`,
/// with no trimming or normalisation — the model sees the page text as
/// extracted, empty pages included.
pub fn summary_prompt(text: &str) -> String {
    format!("{SUMMARY_PROMPT_PREFIX}{text}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_is_prefix_plus_text_verbatim() {
        let text = "첫 페이지 내용\nwith a second line";
        assert_eq!(
            summary_prompt(text),
            format!("다음 텍스트를 요약해줘:\n\n{text}")
        );
    }

    #[test]
    fn prompt_keeps_empty_text() {
        assert_eq!(summary_prompt(""), SUMMARY_PROMPT_PREFIX);
    }
}
