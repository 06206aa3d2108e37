use anyhow::Context;
use glob::{MatchOptions, Pattern};

// Patterns are matched against bare file names, so separators never occur and
// a leading dot is an ordinary character.
const NAME_MATCH: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: false,
    require_literal_leading_dot: false,
};

/// Compiles shell-style name patterns (`*`, `?`, `[seq]`, `[!seq]`).
pub fn compile_patterns(patterns: &[String]) -> anyhow::Result<Vec<Pattern>> {
    patterns
        .iter()
        .map(|p| Pattern::new(p).with_context(|| format!("Invalid file pattern {}", p)))
        .collect()
}

/// Case-sensitive match of a single file name.
pub fn matches_pattern(name: &str, pattern: &Pattern) -> bool {
    pattern.matches_with(name, NAME_MATCH)
}
