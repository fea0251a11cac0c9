// Fixed prompt text

/// System prompt for the title request. The reply becomes the output
/// filename, so it asks for a bare, very short title.
pub const TITLE_SYSTEM_PROMPT: &str = "You name podcast episodes. Given a description of a podcast, reply with a title of three words or fewer. Reply with only the title itself, no quotes and no punctuation.";

/// Build the key-points block appended to the user prompt: a fixed
/// instruction line followed by a numbered list of the points.
pub fn key_points_block(points: &[String]) -> String {
    if points.is_empty() {
        return String::new();
    }

    let mut block = String::from("\nMake sure to cover all these key points in the podcast:");
    for (i, point) in points.iter().enumerate() {
        block.push_str(&format!("\n{}. {}", i + 1, point));
    }
    block
}
