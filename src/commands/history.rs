use colored::Colorize;

use assistant_cost::pricing::tokens::{history_tokens, simulated_history};

/// Execute the history command
///
/// Prints the start of a placeholder transcript and the tokens it accounts for
pub fn execute(pairs: u32, tokens: usize, input: &str, preview: usize) {
    let transcript = simulated_history(pairs, tokens, input);
    let shown: String = transcript.chars().take(preview).collect();

    println!("{}", "Simulated history:".bold());
    println!("{shown}...\n");
    println!(
        "  {}: {} pairs x 2 messages x {} tokens = {:.0} tokens",
        "History window".cyan(),
        pairs,
        tokens,
        history_tokens(pairs, tokens as f64)
    );
}
