//! Token-count estimates for conversation history and pixel content.

/// Reference calibration: a 512x512 image costs about 255 tokens.
pub const REFERENCE_IMAGE_TOKENS: f64 = 255.0;
pub const REFERENCE_IMAGE_PIXELS: f64 = 512.0 * 512.0;

/// Tokens carried by a history window of `max_pairs` user+assistant exchanges.
pub fn history_tokens(max_pairs: u32, avg_tokens_per_message: f64) -> f64 {
    2.0 * f64::from(max_pairs) * avg_tokens_per_message
}

/// Equivalent input tokens for an image or video frame of the given size.
///
/// Linear in the pixel count; no tiling or clamping is applied.
pub fn tokens_for_resolution(width: u32, height: u32) -> f64 {
    let pixels = f64::from(width) * f64::from(height);
    pixels * (REFERENCE_IMAGE_TOKENS / REFERENCE_IMAGE_PIXELS)
}

/// Build a placeholder transcript shaped like the history window.
///
/// Each past message is rendered as one placeholder word per token, followed
/// by the current user input.
pub fn simulated_history(max_pairs: u32, avg_tokens_per_message: usize, user_input: &str) -> String {
    let mut lines = Vec::with_capacity(max_pairs as usize * 2 + 1);
    for i in 1..=max_pairs {
        lines.push(format!("[USER_{i}] {}", "x ".repeat(avg_tokens_per_message)));
        lines.push(format!("[BOT_{i}] {}", "y ".repeat(avg_tokens_per_message)));
    }
    lines.push(format!("[USER_INPUT] {user_input}"));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_tokens() {
        assert_eq!(history_tokens(25, 100.0), 5000.0);
        assert_eq!(history_tokens(0, 100.0), 0.0);
    }

    #[test]
    fn test_reference_resolution() {
        assert_eq!(tokens_for_resolution(512, 512), 255.0);
        assert_eq!(tokens_for_resolution(1024, 1024), 1020.0);
        assert_eq!(tokens_for_resolution(0, 512), 0.0);
    }

    #[test]
    fn test_simulated_history_shape() {
        let text = simulated_history(2, 3, "hello");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "[USER_1] x x x ");
        assert_eq!(lines[1], "[BOT_1] y y y ");
        assert_eq!(lines[3], "[BOT_2] y y y ");
        assert_eq!(lines[4], "[USER_INPUT] hello");
    }

    #[test]
    fn test_simulated_history_without_pairs() {
        assert_eq!(simulated_history(0, 100, "only"), "[USER_INPUT] only");
    }
}
