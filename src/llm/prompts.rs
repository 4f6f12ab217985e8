//! Instruction templates for the summarization completion calls.
//!
//! Both templates demand the same output contract: the four fixed sections,
//! semantic HTML only, no Markdown, no code-fence wrapper. The merge template
//! additionally requires a single chronological narrative that honors the
//! chunk order it is given.

/// Shared output rules appended to both prompts.
const OUTPUT_RULES: &str = "\
RULES:
1. Output ONLY the summary. No preamble, no commentary, no hidden reasoning.
2. Always include these sections, in this order, each as an <h2> heading \
followed by an <ul> list (write <li>None</li> when a section is empty): \
Timeline, Participants, Decisions & Outcomes, Outstanding Action Items.
3. Use semantic HTML only: <h2>, <ul>, <li>, <strong>, <em>. \
Never use Markdown syntax such as **, #, or - bullets.
4. Do NOT wrap the output in a code fence.";

/// Prompt for summarizing a single chunk of the thread.
pub fn chunk_prompt(chunk_text: &str) -> String {
    format!(
        "You summarize email threads. Summarize the following segment of an \
email thread.\n{OUTPUT_RULES}\n\nEMAIL THREAD SEGMENT:\n{chunk_text}"
    )
}

/// Prompt for fusing multiple partial summaries into one narrative.
///
/// `combined` is the concatenation of all partial summaries, each tagged
/// with its 1-based chunk index, in increasing order.
pub fn merge_prompt(combined: &str) -> String {
    format!(
        "You summarize email threads. The partial summaries below each cover \
one consecutive segment of the same thread, tagged by segment number in \
original order. Fuse them into ONE chronological summary of the whole \
thread. Keep events in segment order.\n{OUTPUT_RULES}\n\nPARTIAL \
SUMMARIES:\n{combined}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_prompt_embeds_segment_and_schema() {
        let prompt = chunk_prompt("the thread text");
        assert!(prompt.contains("the thread text"));
        assert!(prompt.contains("Timeline"));
        assert!(prompt.contains("Outstanding Action Items"));
        assert!(prompt.contains("code fence"));
    }

    #[test]
    fn merge_prompt_embeds_partials() {
        let prompt = merge_prompt("[Chunk 1]\n<p>a</p>");
        assert!(prompt.contains("[Chunk 1]"));
        assert!(prompt.contains("chronological"));
    }
}
