//! Instruction template for the calendar assistant

/// Role statement that opens every prompt
const ROLE_PROMPT: &str =
    "You are a calendar assistant. Help manage calendar events and scheduling.";

/// Reply format the model is asked to follow
const FORMAT_PROMPT: &str = r#"Respond in JSON format with:
{
  "message": "your response message",
  "suggestedEvents": [
    { "title": "event title", "date": "YYYY-MM-DD", "time": "HH:MM", "description": "optional details" }
  ]
}
Use an empty "suggestedEvents" array when no calendar events apply."#;

/// Embed the user's text in the fixed instruction template
pub fn build_prompt(user_text: &str) -> String {
    format!("{ROLE_PROMPT}\nUser message: {user_text}\n\n{FORMAT_PROMPT}")
}
