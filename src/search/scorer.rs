use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("valid punctuation pattern"));
static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("valid word pattern"));
/// Classification code format, e.g. "09.620".
static CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{2}\.\d{3}").expect("valid code pattern"));

const EXACT_WEIGHT: f64 = 2.0;
const PARTIAL_WEIGHT: f64 = 0.5;
const PHRASE_WEIGHT: f64 = 3.0;
const CODE_WEIGHT: f64 = 5.0;
const COVERAGE_WEIGHT: f64 = 2.0;

/// Lower-case, replace punctuation with spaces and split on whitespace.
/// Token order and duplicates are preserved.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    NON_WORD
        .replace_all(&lower, " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// A query prepared once and scored against many documents.
#[derive(Debug, Clone)]
pub struct QueryTerms {
    /// Tokens in the order the user typed them
    ordered: Vec<String>,
    /// Unique tokens, first-seen order
    distinct: Vec<String>,
    /// Code literals found in the raw query (duplicates kept)
    codes: Vec<String>,
}

impl QueryTerms {
    pub fn new(query: &str) -> Self {
        let ordered = tokenize(query);

        let mut distinct: Vec<String> = Vec::with_capacity(ordered.len());
        for token in &ordered {
            if !distinct.contains(token) {
                distinct.push(token.clone());
            }
        }

        let lower = query.to_lowercase();
        let codes = CODE
            .find_iter(&lower)
            .map(|m| m.as_str().to_string())
            .collect();

        Self {
            ordered,
            distinct,
            codes,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.distinct.is_empty()
    }

    pub fn distinct(&self) -> &[String] {
        &self.distinct
    }

    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    /// Relevance of an already lower-cased document.
    ///
    /// Sum of whole-word hits (2 each, or a flat 0.5 for a substring-only hit),
    /// adjacent query-pair phrase hits (3 each), code literal hits (5 each) and
    /// twice the fraction of distinct tokens present as words, divided by the
    /// number of distinct tokens. Zero means "not relevant".
    pub fn score(&self, content: &str) -> f64 {
        if self.distinct.is_empty() {
            return 0.0;
        }

        let mut word_counts: HashMap<&str, usize> = HashMap::new();
        for m in WORD.find_iter(content) {
            *word_counts.entry(m.as_str()).or_insert(0) += 1;
        }

        let mut total = 0.0;
        let mut covered = 0usize;

        for token in &self.distinct {
            let exact = word_counts.get(token.as_str()).copied().unwrap_or(0);
            if exact > 0 {
                total += EXACT_WEIGHT * exact as f64;
                covered += 1;
            } else if content.contains(token.as_str()) {
                total += PARTIAL_WEIGHT;
            }
        }

        for pair in self.ordered.windows(2) {
            let phrase = format!("{} {}", pair[0], pair[1]);
            let count = content.matches(phrase.as_str()).count();
            total += PHRASE_WEIGHT * count as f64;
        }

        for code in &self.codes {
            let count = content.matches(code.as_str()).count();
            total += CODE_WEIGHT * count as f64;
        }

        let n = self.distinct.len() as f64;
        total += COVERAGE_WEIGHT * covered as f64 / n;

        total / n
    }
}

/// Score a single document for a raw query.
pub fn relevance(query: &str, content: &str) -> f64 {
    QueryTerms::new(query).score(content)
}
