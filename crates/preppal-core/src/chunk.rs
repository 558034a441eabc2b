use preppal_model::artifact::ArtifactKind;
use regex::Regex;
use std::sync::LazyLock;

/// Chunks are kept under this many bytes so each one fits a single
/// chat-completion call with room for the prompt.
pub const MAX_CHUNK_LEN: usize = 3000;

const SUMMARY_TOKENS_PER_CHUNK: i64 = 1800;
// One chunk yields five flashcards, same budget as a summary.
const FLASHCARDS_TOKENS_PER_CHUNK: i64 = 1800;
const QUIZ_TOKENS_PER_CHUNK: i64 = 2200;

static SENTENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^.!?]+[.!?]+").expect("invalid sentence regex"));

/// Splits text into sentence-boundary chunks of at most [`MAX_CHUNK_LEN`]
/// bytes. Text without any sentence punctuation becomes a single chunk.
#[must_use]
pub fn split_chunks(text: &str) -> Vec<String> {
    split_chunks_with_limit(text, MAX_CHUNK_LEN)
}

fn split_chunks_with_limit(text: &str, max_len: usize) -> Vec<String> {
    let sentences: Vec<&str> = SENTENCE.find_iter(text).map(|m| m.as_str()).collect();
    let sentences = if sentences.is_empty() { vec![text] } else { sentences };

    let mut chunks = Vec::new();
    let mut current = String::new();

    for sentence in sentences {
        if !current.is_empty() && current.len() + sentence.len() > max_len {
            chunks.push(std::mem::take(&mut current));
        }
        current.push_str(sentence);
    }
    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Token cost of generating one artifact from the given number of chunks.
/// Quizzes run on a larger model and are priced higher.
#[must_use]
pub fn estimate_cost(kind: ArtifactKind, chunk_count: usize) -> i64 {
    let per_chunk = match kind {
        ArtifactKind::Summary => SUMMARY_TOKENS_PER_CHUNK,
        ArtifactKind::Flashcards => FLASHCARDS_TOKENS_PER_CHUNK,
        ArtifactKind::Quiz => QUIZ_TOKENS_PER_CHUNK,
    };
    per_chunk * chunk_count as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_one_chunk() {
        let chunks = split_chunks("One sentence. Another one!");
        assert_eq!(chunks, vec!["One sentence. Another one!"]);
    }

    #[test]
    fn test_splits_on_sentence_boundaries() {
        let chunks = split_chunks_with_limit("Aaaa. Bbbb. Cccc.", 12);
        assert_eq!(chunks, vec!["Aaaa. Bbbb.", " Cccc."]);
    }

    #[test]
    fn test_text_without_punctuation_is_kept_whole() {
        let text = "just words with no sentence ending";
        assert_eq!(split_chunks(text), vec![text]);
    }

    #[test]
    fn test_no_empty_chunks_for_oversized_sentence() {
        let long = format!("{}.", "a".repeat(40));
        let chunks = split_chunks_with_limit(&long, 10);
        assert_eq!(chunks.len(), 1);
        assert!(chunks.iter().all(|c| !c.is_empty()));
    }

    #[test]
    fn test_cost_scales_with_chunks() {
        assert_eq!(estimate_cost(ArtifactKind::Summary, 3), 5400);
        assert_eq!(estimate_cost(ArtifactKind::Flashcards, 3), 5400);
        assert_eq!(estimate_cost(ArtifactKind::Quiz, 3), 6600);
    }
}
