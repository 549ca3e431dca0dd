//! Deterministic text cleanup applied before classification.
//!
//! The model was trained on social-media text, so user mentions and URLs are
//! collapsed to the placeholders it expects.

/// Punctuation kept by the character filter, alongside word chars and
/// whitespace.
const KEPT_PUNCT: &[char] = &['@', '#', '$', '%', '.', ',', '!', '?', '-'];

/// Normalize a text for the classifier.
///
/// Trims, replaces `@mention` tokens with `@user` and `http...` tokens with
/// `http`, collapses whitespace runs, then strips every character outside
/// word chars, whitespace and `@#$%.,!?-`. The collapse runs BEFORE the strip,
/// so a stripped character can leave a double space behind. Never fails;
/// empty input yields empty output.
pub fn normalize(text: &str) -> String {
    let trimmed = text.trim();

    let tokens: Vec<&str> = trimmed
        .split(' ')
        .map(|token| {
            if token.starts_with('@') && token.chars().count() > 1 {
                "@user"
            } else if token.starts_with("http") {
                "http"
            } else {
                token
            }
        })
        .collect();

    let collapsed = collapse_whitespace(&tokens.join(" "));

    collapsed
        .chars()
        .filter(|&c| {
            c.is_alphanumeric() || c == '_' || c.is_whitespace() || KEPT_PUNCT.contains(&c)
        })
        .collect()
}

/// Replace every run of whitespace with a single space.
fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_run {
                out.push(' ');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}
