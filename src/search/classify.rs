//! Cheap keyword heuristics deciding how a query is handled before any retrieval.

/// Phrases that mark small talk about the assistant itself.
const GENERIC_PHRASES: &[&str] = &[
    "kas tu esi",
    "ko tu zini",
    "ko tu dari",
    "kā tu vari palīdzēt",
    "kam tu esi",
    "ko tu",
    "kas tu",
    "ko vari",
    "kā vari",
    "palīdzi man",
    "kāda tev",
    "kādas ir",
    "ko māki",
    "ko maki",
];

/// Word stems asking for a comparison with the international standard.
const BROAD_SCOPE_KEYWORDS: &[&str] = &[
    "cofog",
    "salīdzin",
    "salīdzināj",
    "salīdzināt",
    "starptautisk",
    "klasifik",
    "standart",
    "funkciju",
    "kods",
];

/// Queries shorter than this with no digits and no mention of a code are small talk.
const SHORT_QUERY_CHARS: usize = 30;

/// True when the query should get the canned introduction instead of retrieval.
pub fn is_generic(text: &str) -> bool {
    let lower = text.to_lowercase();

    let short_without_specifics = text.chars().count() < SHORT_QUERY_CHARS
        && !text.chars().any(char::is_numeric)
        && !lower.contains("kods")
        && !lower.contains("kodu");

    short_without_specifics || contains_any(&lower, GENERIC_PHRASES)
}

/// True when the search should also cover the secondary (international) folders.
pub fn is_broad_scope(text: &str) -> bool {
    contains_any(&text.to_lowercase(), BROAD_SCOPE_KEYWORDS)
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}
