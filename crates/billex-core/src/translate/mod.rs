//! Translation collaborators.

mod google;

pub use google::GoogleTranslator;

use async_trait::async_trait;

use crate::error::TranslateError;
use crate::models::language::Language;

/// Translates text into a target language. Source language is auto-detected.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, target: Language) -> Result<String, TranslateError>;
}

/// Split `text` into pieces of at most `max_chars` characters, preferring
/// line boundaries. Concatenating the pieces gives back `text`.
pub fn split_chunks(text: &str, max_chars: usize) -> Vec<&str> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut len = 0;
    let mut end = 0;

    for line in text.split_inclusive('\n') {
        let line_len = line.chars().count();

        if len + line_len > max_chars && len > 0 {
            chunks.push(&text[start..end]);
            start = end;
            len = 0;
        }

        if line_len > max_chars {
            // A single overlong line: cut it on char boundaries.
            let mut piece_start = end;
            let mut piece_len = 0;
            for (offset, _) in line.char_indices() {
                if piece_len == max_chars {
                    chunks.push(&text[piece_start..end + offset]);
                    piece_start = end + offset;
                    piece_len = 0;
                }
                piece_len += 1;
            }
            start = piece_start;
            len = piece_len;
        } else {
            len += line_len;
        }
        end += line.len();
    }

    if start < end {
        chunks.push(&text[start..end]);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_one_chunk() {
        assert_eq!(split_chunks("Total Due: Rs.450.00", 5000), vec!["Total Due: Rs.450.00"]);
    }

    #[test]
    fn test_splits_on_lines() {
        let text = "aaaa\nbbbb\ncccc\n";
        let chunks = split_chunks(text, 10);
        assert_eq!(chunks, vec!["aaaa\nbbbb\n", "cccc\n"]);
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_overlong_line_cut_on_char_boundary() {
        let text = "చెల్లించవలసిన";
        let chunks = split_chunks(text, 4);
        assert!(chunks.iter().all(|c| c.chars().count() <= 4));
        assert_eq!(chunks.concat(), text);
    }

    #[test]
    fn test_empty() {
        assert!(split_chunks("", 10).is_empty());
    }
}
