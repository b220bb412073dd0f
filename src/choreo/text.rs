/// Split into words, keeping each whitespace run as its own segment so the
/// pieces join back into the original text.
pub fn split_words(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut in_space = None;
    for (i, c) in text.char_indices() {
        let space = c.is_whitespace();
        if in_space.is_some_and(|prev| prev != space) {
            out.push(&text[start..i]);
            start = i;
        }
        in_space = Some(space);
    }
    if start < text.len() {
        out.push(&text[start..]);
    }
    out
}

/// Split into characters; spaces become non-breaking so an inline-block
/// span doesn't collapse them.
pub fn split_chars(text: &str) -> Vec<char> {
    text.chars()
        .map(|c| if c == ' ' { '\u{00A0}' } else { c })
        .collect()
}

pub fn is_space(segment: &str) -> bool {
    segment.chars().all(char::is_whitespace)
}
