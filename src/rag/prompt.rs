pub const CONTEXT_OPEN_MARKER: &str = "CONTEXT:\n---";
pub const CONTEXT_CLOSE_MARKER: &str = "---";

/// Builds the grounded support prompt.
///
/// Parts, in order: persona and grounding rules, the delimited context, the
/// customer query verbatim, and the closing answer instruction.
pub fn build(context: &str, query: &str) -> String {
    format!(
        "You are a helpful customer support chatbot. Your answers MUST be based ONLY on the provided context. \
If the context does not contain the answer, politely state that you cannot find the relevant information and suggest contacting support directly.\n\
\n\
{open}\n\
{context}\n\
{close}\n\
\n\
CUSTOMER QUERY: {query}\n\
\n\
Please provide a helpful, friendly, and accurate response based on the context above. \
If the context does not answer the query, say so and suggest contacting customer support.",
        open = CONTEXT_OPEN_MARKER,
        close = CONTEXT_CLOSE_MARKER,
    )
}
