use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::CorpusConfig;
use crate::models::Fragment;
use crate::search::classify::is_broad_scope;
use crate::search::scorer::QueryTerms;

/// The two folder sets a query can be searched in.
#[derive(Debug, Clone)]
pub struct SearchScope {
    pub primary: Vec<PathBuf>,
    pub secondary_wide: Vec<PathBuf>,
}

impl SearchScope {
    pub fn from_config(corpus: &CorpusConfig) -> Self {
        Self {
            primary: corpus.primary.iter().map(|f| corpus.root.join(f)).collect(),
            secondary_wide: corpus
                .secondary_wide
                .iter()
                .map(|f| corpus.root.join(f))
                .collect(),
        }
    }
}

/// Keyword search over folders of `.txt` chunks, re-read on every query.
pub struct SearchEngine {
    scope: SearchScope,
    top_k: usize,
}

impl SearchEngine {
    pub fn new(scope: SearchScope, top_k: usize) -> Self {
        Self { scope, top_k }
    }

    pub fn from_config(corpus: &CorpusConfig) -> Self {
        Self::new(SearchScope::from_config(corpus), corpus.top_k)
    }

    pub fn scope(&self) -> &SearchScope {
        &self.scope
    }

    /// Return up to `top_k` fragments with a positive score, best first.
    /// Blocking: reads every file in the selected folders.
    pub fn search(&self, query: &str) -> Vec<Fragment> {
        tracing::info!("Searching corpus for: {query}");

        let terms = QueryTerms::new(query);
        let broad = is_broad_scope(query);
        tracing::info!("Broad-scope query: {broad}");

        let mut results = Vec::new();

        for folder in &self.scope.primary {
            scan_folder(folder, &terms, &mut results);
        }

        if broad || results.is_empty() {
            for folder in &self.scope.secondary_wide {
                scan_folder(folder, &terms, &mut results);
            }
        }

        // sort_by is stable: equal scores keep scan order
        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        tracing::info!("Found {} relevant fragments", results.len());
        results.truncate(self.top_k);
        results
    }
}

/// Score every `.txt` file directly inside `folder`, in file-name order.
fn scan_folder(folder: &Path, terms: &QueryTerms, results: &mut Vec<Fragment>) {
    if !folder.is_dir() {
        tracing::warn!("Folder {} not found, skipping", folder.display());
        return;
    }

    tracing::debug!("Scanning folder {}", folder.display());

    for entry in WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::error!("Failed to list {}: {e}", folder.display());
                continue;
            }
        };

        let path = entry.path();
        if !entry.file_type().is_file() || !is_chunk_file(path) {
            continue;
        }

        score_file(path, terms, results);
    }
}

fn score_file(path: &Path, terms: &QueryTerms, results: &mut Vec<Fragment>) {
    let content = match std::fs::read_to_string(path) {
        Ok(text) => text.to_lowercase(),
        Err(e) => {
            tracing::error!("Failed to read {}: {e}", path.display());
            return;
        }
    };

    let score = terms.score(&content);
    if score > 0.0 {
        tracing::debug!("Relevant fragment {} (score: {score:.3})", path.display());
        results.push(Fragment {
            source_id: path.to_string_lossy().to_string(),
            content,
            score,
        });
    }
}

fn is_chunk_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "txt")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(dir: &Path, name: &str, text: &str) {
        fs::create_dir_all(dir).unwrap();
        fs::write(dir.join(name), text).unwrap();
    }

    fn engine(root: &Path) -> SearchEngine {
        SearchEngine::new(
            SearchScope {
                primary: vec![root.join("primary")],
                secondary_wide: vec![root.join("wide")],
            },
            3,
        )
    }

    #[test]
    fn test_returns_at_most_three_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let primary = dir.path().join("primary");
        for i in 0..6 {
            let text = "ēdināšanas pakalpojumi ".repeat(i + 1);
            write(&primary, &format!("chunk_{i}.txt"), &text);
        }

        let results = engine(dir.path()).search("ēdināšanas pakalpojumi");
        assert_eq!(results.len(), 3);
        assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
        assert!(results[0].source_id.ends_with("chunk_5.txt"));
    }

    #[test]
    fn test_zero_score_files_excluded() {
        let dir = tempfile::tempdir().unwrap();
        let primary = dir.path().join("primary");
        write(&primary, "a.txt", "policijas darbība");
        write(&primary, "b.txt", "muzeji un izstādes");

        let results = engine(dir.path()).search("muzeji izstādes");
        assert_eq!(results.len(), 1);
        assert!(results[0].source_id.ends_with("b.txt"));
        assert!(results.iter().all(|r| r.score > 0.0));
    }

    #[test]
    fn test_content_is_case_folded() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("primary"), "a.txt", "IELU APGAISMOŠANA");

        let results = engine(dir.path()).search("ielu apgaismošana");
        assert_eq!(results[0].content, "ielu apgaismošana");
    }

    #[test]
    fn test_secondary_only_scanned_when_needed() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("primary"), "p.txt", "ielu apgaismošana");
        write(&dir.path().join("wide"), "w.txt", "ielu apgaismošana");

        // Narrow query with a primary hit: secondary untouched
        let results = engine(dir.path()).search("ielu apgaismošana");
        assert_eq!(results.len(), 1);
        assert!(results[0].source_id.ends_with("p.txt"));

        // Broad-scope keyword pulls in the secondary set; ties keep primary first
        let results = engine(dir.path()).search("ielu apgaismošana cofog");
        assert_eq!(results.len(), 2);
        assert!(results[0].source_id.ends_with("p.txt"));
        assert!(results[1].source_id.ends_with("w.txt"));
    }

    #[test]
    fn test_secondary_fallback_when_primary_empty() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("primary"), "p.txt", "slimnīcu pakalpojumi");
        write(&dir.path().join("wide"), "w.txt", "ūdensapgāde");

        let results = engine(dir.path()).search("ūdensapgāde");
        assert_eq!(results.len(), 1);
        assert!(results[0].source_id.ends_with("w.txt"));
    }

    #[test]
    fn test_missing_folders_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let results = engine(dir.path()).search("jebkas");
        assert!(results.is_empty());
    }

    #[test]
    fn test_non_txt_and_unreadable_files_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let primary = dir.path().join("primary");
        write(&primary, "notes.md", "ūdensapgāde");
        fs::write(primary.join("broken.txt"), [0xff, 0xfe, 0x00, 0xc3]).unwrap();
        write(&primary, "ok.txt", "ūdensapgāde");

        let results = engine(dir.path()).search("ūdensapgāde");
        assert_eq!(results.len(), 1);
        assert!(results[0].source_id.ends_with("ok.txt"));
    }

    #[test]
    fn test_query_without_words_finds_nothing() {
        let dir = tempfile::tempdir().unwrap();
        write(&dir.path().join("primary"), "p.txt", "teksts");
        assert!(engine(dir.path()).search("?!").is_empty());
    }
}
