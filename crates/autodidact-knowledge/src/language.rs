// SPDX-FileCopyrightText: 2026 Autodidact Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Marker-word language detection (English vs Tagalog).

use autodidact_core::Language;

/// Standard English stop words.
const ENGLISH_MARKERS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't",
    "wouldn", "wouldn't",
];

const TAGALOG_MARKERS: &[&str] = &[
    "ako", "ikaw", "siya", "kami", "kayo", "sila", "ang", "ng", "sa", "ay", "mga", "na", "at",
    "para", "kung", "pero", "kasi", "oo", "hindi", "salamat", "kamusta", "kumusta", "magandang",
    "araw", "gabi", "umaga", "tanghali",
];

/// Split on whitespace, lower-case, and strip surrounding punctuation.
fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace()
        .map(|w| {
            w.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
                .to_lowercase()
        })
        .filter(|w| !w.is_empty())
}

/// Count marker words per language; the higher count wins, English on a tie.
pub fn detect_language(text: &str) -> Language {
    let (mut english, mut tagalog) = (0usize, 0usize);
    for word in words(text) {
        if TAGALOG_MARKERS.contains(&word.as_str()) {
            tagalog += 1;
        }
        if ENGLISH_MARKERS.contains(&word.as_str()) {
            english += 1;
        }
    }
    if tagalog > english {
        Language::Tl
    } else {
        Language::En
    }
}
