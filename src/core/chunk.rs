//! Line-aligned chunking of protected text

/// Split text into chunks of at most `max_len` characters, breaking only on
/// line boundaries.
///
/// Placeholder tokens never contain newlines, so a chunk boundary can never
/// fall inside one. A single line longer than `max_len` becomes its own
/// oversized chunk rather than being split mid-line; never breaking a
/// placeholder takes priority over strict length compliance.
pub fn chunk(text: &str, max_len: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;

    for line in text.split('\n') {
        let line_chars = line.chars().count();
        if current_chars + line_chars + 1 > max_len && !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
            current_chars = 0;
        }
        current.push_str(line);
        current.push('\n');
        current_chars += line_chars + 1;
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_single_chunk() {
        let chunks = chunk("hello\nworld", 100);
        assert_eq!(chunks, vec!["hello\nworld\n"]);
    }

    #[test]
    fn test_splits_on_line_boundaries() {
        let chunks = chunk("aaaa\nbbbb\ncccc", 10);
        assert_eq!(chunks, vec!["aaaa\nbbbb\n", "cccc\n"]);
    }

    #[test]
    fn test_oversized_line_kept_whole() {
        let long_line = "x".repeat(50);
        let text = format!("short\n{}\ntail", long_line);
        let chunks = chunk(&text, 10);

        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[1], format!("{}\n", long_line));
    }

    #[test]
    fn test_concatenation_reconstructs_text() {
        let text = "one\ntwo\nthree\nfour";
        let chunks = chunk(text, 9);

        // the chunker adds exactly one trailing newline beyond the source
        assert_eq!(chunks.concat(), format!("{}\n", text));
    }

    #[test]
    fn test_placeholder_token_never_split() {
        let text = "intro line\n__CODE_BLOCK_0__ with trailing words\nanother line";
        for max_len in [5, 12, 20, 40] {
            let chunks = chunk(text, max_len);
            let containing: Vec<&String> = chunks
                .iter()
                .filter(|c| c.contains("__CODE_BLOCK_0__"))
                .collect();
            assert_eq!(containing.len(), 1, "max_len={}", max_len);
        }
    }
}
