// SPDX-FileCopyrightText: 2026 Dialcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! TwiML rendering for the voice instruction endpoint.

/// Renders the spoken-message TwiML document for an outbound call.
///
/// The message is XML-escaped, spoken once via `<Say>`, and the call hangs
/// up afterwards.
pub fn voice_response(message: &str) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Response><Say voice=\"alice\">{}</Say><Hangup/></Response>",
        escape_xml(message)
    )
}

/// Escapes the five XML special characters in text content.
fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_say_and_hangup() {
        let twiml = voice_response("Hello from Dialcast.");
        assert!(twiml.starts_with("<?xml version=\"1.0\""));
        assert!(twiml.contains("<Say voice=\"alice\">Hello from Dialcast.</Say>"));
        assert!(twiml.contains("<Hangup/>"));
        assert!(twiml.ends_with("</Response>"));
    }

    #[test]
    fn escapes_xml_special_characters() {
        let twiml = voice_response("Tom & Jerry <3 \"quotes\" 'n stuff");
        assert!(twiml.contains("Tom &amp; Jerry &lt;3 &quot;quotes&quot; &apos;n stuff"));
        assert!(!twiml.contains("Tom & Jerry"));
    }

    #[test]
    fn ampersand_is_not_double_escaped() {
        assert_eq!(escape_xml("a&b"), "a&amp;b");
        assert_eq!(escape_xml("a&amp;b"), "a&amp;amp;b");
    }
}
