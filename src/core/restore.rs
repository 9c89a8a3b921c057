//! Placeholder restoration and glossary application

use regex::Regex;

use crate::core::glossary::Glossary;
use crate::core::models::Placeholder;

/// Digits of a `__G<n>__`-shaped token, if the token has that shape
fn glossary_token_digits(token: &str) -> Option<&str> {
    let digits = token.strip_prefix("__G")?.strip_suffix("__")?;
    (!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())).then_some(digits)
}

/// Re-insert the original content for every placeholder in `translated`.
///
/// Tokens are processed longest-first so a shorter token never matches
/// inside a longer one; ties break toward later placeholders, whose
/// originals can embed tokens allocated by earlier passes.
///
/// A recovery pass handles glossary tokens the provider partially
/// translated: the readable prefix may change, but translators tend to keep
/// the digits and surrounding underscores intact, so any `__<word>_<n>__`
/// with the right digits is treated as the corrupted token. A corrupted
/// digit suffix is not recoverable; `find_residual_tokens` surfaces it.
pub fn restore(translated: &str, placeholders: &[Placeholder]) -> String {
    let mut text = translated.to_string();

    let mut ordered: Vec<(usize, &Placeholder)> = placeholders.iter().enumerate().collect();
    ordered.sort_by(|(ia, a), (ib, b)| {
        b.token
            .len()
            .cmp(&a.token.len())
            .then_with(|| ib.cmp(ia))
    });

    for (_, ph) in ordered {
        if let Some(pos) = text.find(&ph.token) {
            text.replace_range(pos..pos + ph.token.len(), &ph.original);
        } else if let Some(digits) = glossary_token_digits(&ph.token) {
            let mangled =
                Regex::new(&format!(r"__\p{{L}}+_{}__", digits)).expect("mangled token pattern");
            if let Some(m) = mangled.find(&text) {
                let range = m.range();
                text.replace_range(range, &ph.original);
            }
        }
    }

    text
}

/// Scan for placeholder-shaped tokens left in final output.
///
/// A non-empty result after restore and glossary application means a
/// placeholder survived translation in a form the recovery pass could not
/// identify: silent data corruption, reported rather than repaired.
pub fn find_residual_tokens(text: &str) -> Vec<String> {
    let shape = Regex::new(r"__[\p{L}_]*\d+__").expect("residual token pattern");
    shape
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Substitute substitutable glossary entries, whole-word and
/// case-insensitive, longest term first.
///
/// Protected-only entries were already restored verbatim and are never
/// touched here.
pub fn apply_glossary(text: &str, glossary: &Glossary) -> String {
    let mut result = text.to_string();

    for entry in glossary.substitutable() {
        let pattern = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(&entry.term)))
            .expect("escaped term pattern");
        result = pattern
            .replace_all(&result, regex::NoExpand(&entry.rendering))
            .into_owned();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::glossary::Glossary;
    use crate::core::protect::Protector;

    fn glossary() -> Glossary {
        Glossary::new([
            ("React".to_string(), "React".to_string()),
            ("API".to_string(), "接口".to_string()),
        ])
    }

    #[test]
    fn test_identity_round_trip() {
        let input = "Visit https://example.com for the React docs.";
        let protector = Protector::new();
        let doc = protector.protect(input, &glossary());

        let restored = restore(&doc.text, &doc.placeholders);
        assert_eq!(restored, input);
    }

    #[test]
    fn test_round_trip_with_nested_placeholders() {
        // markup tags inside a fenced block are protected before the block
        // claims them, so the block's original embeds earlier tokens
        let input = "Use <b>bold</b>.\n```html\n<div class=\"x\">hi</div>\n```\nDone.";
        let protector = Protector::new();
        let doc = protector.protect(input, &glossary());

        let restored = restore(&doc.text, &doc.placeholders);
        assert_eq!(restored, input);
        assert!(find_residual_tokens(&restored).is_empty());
    }

    #[test]
    fn test_recovery_of_mangled_glossary_token() {
        let placeholders = vec![Placeholder::new("__G0__", "React")];
        let restored = restore("Use __Glosario_0__ today.", &placeholders);
        assert_eq!(restored, "Use React today.");
    }

    #[test]
    fn test_recovery_preserves_digit_matching() {
        let placeholders = vec![
            Placeholder::new("__G0__", "React"),
            Placeholder::new("__G1__", "Vue"),
        ];
        let restored = restore("__Glosario_1__ then __Glosario_0__.", &placeholders);
        assert_eq!(restored, "Vue then React.");
    }

    #[test]
    fn test_corrupted_digits_are_detected_not_repaired() {
        let placeholders = vec![Placeholder::new("__G7__", "React")];
        // provider corrupted the digit suffix; recovery cannot identify it
        let restored = restore("Use __Glosario_9__ today.", &placeholders);

        assert_eq!(restored, "Use __Glosario_9__ today.");
        assert_eq!(find_residual_tokens(&restored), vec!["__Glosario_9__"]);
    }

    #[test]
    fn test_residual_scan_finds_all_shapes() {
        let text = "a __G3__ b __XML_TAG_0__ c __CODE_BLOCK_12__ d";
        let found = find_residual_tokens(text);
        assert_eq!(found, vec!["__G3__", "__XML_TAG_0__", "__CODE_BLOCK_12__"]);
    }

    #[test]
    fn test_clean_text_has_no_residual_tokens() {
        assert!(find_residual_tokens("plain text, no tokens at all").is_empty());
    }

    #[test]
    fn test_apply_glossary_substitution() {
        let result = apply_glossary("Use the API.", &glossary());
        assert_eq!(result, "Use the 接口.");
    }

    #[test]
    fn test_apply_glossary_is_case_insensitive_whole_word() {
        let result = apply_glossary("api versus apis", &glossary());
        assert_eq!(result, "接口 versus apis");
    }

    #[test]
    fn test_apply_glossary_skips_protected_only_entries() {
        let result = apply_glossary("React stays React.", &glossary());
        assert_eq!(result, "React stays React.");
    }

    #[test]
    fn test_apply_glossary_idempotent() {
        let once = apply_glossary("The API and the api.", &glossary());
        let twice = apply_glossary(&once, &glossary());
        assert_eq!(once, twice);
    }
}
