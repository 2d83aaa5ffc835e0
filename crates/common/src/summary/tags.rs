// Tag-delimited bucket extraction from generated summary text.
//
// The generator is asked to wrap each bucket in `<completed>`,
// `<inprogress>`, and `<new>` tag pairs. Matching is case-sensitive
// and non-greedy; only the first occurrence of a pair counts, so
// repeated runs over the same blob stay reproducible.

use std::sync::OnceLock;

use regex::Regex;

use crate::types::TaggedSummary;

const BUCKET_TAGS: [&str; 3] = ["completed", "inprogress", "new"];

fn bucket_patterns() -> &'static [Regex; 3] {
    static PATTERNS: OnceLock<[Regex; 3]> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        BUCKET_TAGS.map(|tag| {
            Regex::new(&format!(r"(?s)<{tag}>(.*?)</{tag}>"))
                .expect("bucket tag pattern should compile")
        })
    })
}

/// Extract the three bucket slots from a summary blob.
///
/// An absent tag yields an empty slot; extracted text is trimmed of
/// surrounding whitespace. Nesting and duplicates are not validated.
pub fn parse_summary(text: &str) -> TaggedSummary {
    let patterns = bucket_patterns();
    TaggedSummary {
        completed: extract_first(&patterns[0], text),
        in_progress: extract_first(&patterns[1], text),
        new: extract_first(&patterns[2], text),
    }
}

fn extract_first(pattern: &Regex, text: &str) -> String {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|found| found.as_str().trim().to_string())
        .unwrap_or_default()
}
