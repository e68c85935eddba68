//! Context block and prompt construction.

use crate::types::RetrievedPassage;

/// Literal substituted for the context block when retrieval comes back
/// empty. An empty result set is valid input to generation, not an error.
pub const EMPTY_CONTEXT_FALLBACK: &str = "No relevant context found.";

/// Join passage contents in ranking order, blank-line separated.
pub fn build_context(passages: &[RetrievedPassage]) -> String {
    if passages.is_empty() {
        return EMPTY_CONTEXT_FALLBACK.to_string();
    }

    passages
        .iter()
        .map(|passage| passage.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Build the full generation prompt around a context block and question.
///
/// The template is fixed: the SCOS-expert persona, six formatting rules, the
/// retrieved context verbatim, and the question verbatim.
pub fn build_prompt(context: &str, question: &str) -> String {
    format!(
        r#"You are an expert on the North Carolina (NC) 3rd Grade Standard Course of Study (SCOS).
When answering, follow these strict rules:

1. **Direct Answer First**: Start with a clear, concise 1-2 sentence direct answer to the user's question.
2. **Strict Relevance**: Only list the specific Standards that directly support your answer. Do NOT list the entire curriculum or unrelated categories. If a standard is mentioned but is irrelevant to the question, omit it.
3. **Minimalist Formatting**:
   - Use a simple **Bold Title** for the answer.
   - NO H1 headers or generic intros like "NC 3rd Grade Guide".
   - Use a horizontal rule (---) after the direct answer, followed by a small header: ### Supporting Standards.
4. **Clean Standards**: For the standards you include, use the format: **[Code]** followed by the description.
5. **No Gaps**: If a standard description is missing or incomplete in the source text, do NOT list it at all. Omit it entirely.
6. **Cleaning**: Strip all HTML tags like <br> or <div>.

Context:
{context}

Question: {question}

Answer (in minimalist professional Markdown):"#
    )
}
