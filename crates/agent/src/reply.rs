use advisor_core::domain::recommendation::AdvisorResponse;
use tracing::error;

pub const UNPARSEABLE_REPLY: &str = "Unable to parse AI response. Please try again.";

/// Turns raw model text into a response. Markdown code fences around the
/// JSON are tolerated; anything that still fails to parse becomes an error
/// response rather than a hard failure.
pub fn parse_reply(raw: &str) -> AdvisorResponse {
    let cleaned = strip_code_fence(raw.trim());

    match serde_json::from_str::<AdvisorResponse>(cleaned) {
        Ok(response) => response,
        Err(parse_error) => {
            error!(
                event_name = "advisor.llm.unparseable_reply",
                error = %parse_error,
                raw_reply = %raw,
                "ranker reply was not valid JSON"
            );
            AdvisorResponse::failure(UNPARSEABLE_REPLY)
        }
    }
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```json").or_else(|| text.strip_prefix("```")) else {
        return text;
    };
    let rest = rest.strip_prefix('\n').unwrap_or(rest);
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    rest.strip_suffix('\n').unwrap_or(rest)
}
