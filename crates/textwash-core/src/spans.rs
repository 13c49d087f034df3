//! Whole-word span reconstruction from classifier sub-tokens
//!
//! Token classifiers label sub-word fragments. This module glues the
//! fragments of one word back together so the rest of the pipeline only
//! sees whole words. Which fragments continue the previous word depends on
//! the tokenizer family:
//! - WordPiece (BERT-style): continuation fragments start with `##`
//! - Byte-level BPE (RoBERTa-style): word-initial fragments start with `Ġ`,
//!   everything else is a continuation

use crate::classify::Prediction;
use serde::{Deserialize, Serialize};

/// Marker WordPiece puts in front of word-internal fragments
const WORDPIECE_CONTINUATION: &str = "##";

/// Marker byte-level BPE puts in front of fragments preceded by a space
const BPE_WORD_START: char = 'Ġ';

/// Tokenizer family of the classifier that produced the predictions
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ModelFamily {
    /// BERT-style WordPiece
    WordPiece,
    /// RoBERTa-style byte-level BPE
    #[default]
    ByteLevelBpe,
}

impl ModelFamily {
    /// Whether `fragment` continues the word started by the previous fragment
    fn is_continuation(&self, fragment: &str) -> bool {
        match self {
            Self::WordPiece => fragment.starts_with(WORDPIECE_CONTINUATION),
            Self::ByteLevelBpe => !fragment.starts_with(BPE_WORD_START),
        }
    }

    /// Fragment text to append to the previous word
    fn continuation_text<'a>(&self, fragment: &'a str) -> &'a str {
        match self {
            Self::WordPiece => fragment
                .strip_prefix(WORDPIECE_CONTINUATION)
                .unwrap_or(fragment),
            Self::ByteLevelBpe => fragment,
        }
    }

    /// Final cleanup of a merged word
    fn finish<'a>(&self, word: &'a str) -> &'a str {
        match self {
            Self::WordPiece => word,
            Self::ByteLevelBpe => word.strip_prefix(BPE_WORD_START).unwrap_or(word),
        }
    }
}

/// A whole word (or merged fragment run) with the label of its first fragment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub label: String,
}

/// Merge sub-token predictions into whole-word spans, in input order.
///
/// A continuation fragment extends the previous span's text and end offset
/// and keeps that span's label; labels are never re-voted. A continuation
/// with nothing before it starts a new span.
pub fn reconstruct_spans(predictions: &[Prediction], family: ModelFamily) -> Vec<Span> {
    let mut spans: Vec<Span> = Vec::new();

    for prediction in predictions {
        if family.is_continuation(&prediction.word) {
            if let Some(last) = spans.last_mut() {
                last.text.push_str(family.continuation_text(&prediction.word));
                last.end = prediction.end;
                continue;
            }
        }

        spans.push(Span {
            text: prediction.word.clone(),
            start: prediction.start,
            end: prediction.end,
            label: prediction.entity.clone(),
        });
    }

    for span in &mut spans {
        let finished = family.finish(&span.text);
        if finished.len() != span.text.len() {
            span.text = finished.to_string();
        }
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pred(word: &str, start: usize, end: usize, entity: &str) -> Prediction {
        Prediction {
            word: word.to_string(),
            start,
            end,
            entity: entity.to_string(),
        }
    }

    #[test]
    fn test_wordpiece_merges_hash_fragments() {
        let preds = vec![
            pred("Jan", 0, 3, "PERSON_FIRSTNAME"),
            pred("##sen", 3, 6, "NONE"),
            pred("woont", 7, 12, "NONE"),
            pred("in", 13, 15, "NONE"),
            pred("Ut", 16, 18, "LOCATION"),
            pred("##re", 18, 20, "LOCATION"),
            pred("##cht", 20, 23, "LOCATION"),
        ];

        let spans = reconstruct_spans(&preds, ModelFamily::WordPiece);
        assert_eq!(spans.len(), 4);
        assert_eq!(spans[0].text, "Jansen");
        assert_eq!(spans[0].end, 6);
        // Label comes from the first fragment only
        assert_eq!(spans[0].label, "PERSON_FIRSTNAME");
        assert_eq!(spans[3].text, "Utrecht");
        assert_eq!((spans[3].start, spans[3].end), (16, 23));
    }

    #[test]
    fn test_bpe_merges_fragments_without_space_marker() {
        let preds = vec![
            pred("Ġmet", 4, 7, "NONE"),
            pred("ĠJohn", 8, 12, "PERSON_FIRSTNAME"),
            pred("son", 12, 15, "NONE"),
            pred("Ġtoday", 16, 21, "NONE"),
        ];

        let spans = reconstruct_spans(&preds, ModelFamily::ByteLevelBpe);
        let texts: Vec<&str> = spans.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(texts, vec!["met", "Johnson", "today"]);
        assert_eq!(spans[1].label, "PERSON_FIRSTNAME");
        assert_eq!(spans[1].end, 15);
    }

    #[test]
    fn test_bpe_first_word_has_no_marker() {
        // The first word of a document is not preceded by a space
        let preds = vec![
            pred("Alice", 0, 5, "PERSON_FIRSTNAME"),
            pred("Ġcalled", 6, 12, "NONE"),
        ];

        let spans = reconstruct_spans(&preds, ModelFamily::ByteLevelBpe);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].text, "Alice");
        assert_eq!(spans[1].text, "called");
    }

    #[test]
    fn test_wordpiece_leading_continuation_starts_span() {
        let preds = vec![pred("##ing", 0, 3, "NONE"), pred("today", 4, 9, "NONE")];
        let spans = reconstruct_spans(&preds, ModelFamily::WordPiece);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].text, "##ing");
    }

    #[test]
    fn test_empty_input() {
        assert!(reconstruct_spans(&[], ModelFamily::WordPiece).is_empty());
    }
}
