//! Sustainability report comparison
//!
//! Scores how similar two reports are using TF-IDF vectors and cosine
//! similarity. A high score against a known report suggests recycled or
//! boilerplate claims.

use anyhow::{Context, Result};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Reference report used when no other report is given
pub const KNOWN_REPORT: &str = "Company X is committed to sustainability by using eco-friendly \
     packaging and reducing carbon emissions.";

/// Score above which a report is flagged
pub const DEFAULT_THRESHOLD: f64 = 0.8;

/// English stopwords (NLTK corpus)
const STOPWORDS: &[&str] = &[
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

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("report {0:?} contains no text")]
    Empty(String),

    #[error("cannot extract text from PDF {path:?}: {message}")]
    Pdf { path: String, message: String },
}

/// Outcome of scoring a report
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison {
    pub score: f64,
    pub flagged: bool,
}

/// A score strictly above the threshold is flagged
pub fn is_flagged(score: f64, threshold: f64) -> bool {
    score > threshold
}

/// Lowercase, strip punctuation and drop stopwords
pub fn clean_text(text: &str) -> String {
    let stopwords: HashSet<&str> = STOPWORDS.iter().copied().collect();
    let stripped: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect();

    stripped
        .split_whitespace()
        .filter(|w| !stopwords.contains(w))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split into tokens of two or more word characters
pub fn tokenize(text: &str) -> Vec<&str> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
        .filter(|t| t.chars().count() >= 2)
        .collect()
}

/// L2-normalized TF-IDF vectors over a shared vocabulary
pub fn tfidf(documents: &[&str]) -> Vec<BTreeMap<String, f64>> {
    let counts: Vec<BTreeMap<String, f64>> = documents
        .iter()
        .map(|doc| {
            let mut tf = BTreeMap::new();
            for token in tokenize(doc) {
                *tf.entry(token.to_string()).or_insert(0.0) += 1.0;
            }
            tf
        })
        .collect();

    let n = documents.len() as f64;
    let mut df: BTreeMap<&str, f64> = BTreeMap::new();
    for tf in &counts {
        for term in tf.keys() {
            *df.entry(term.as_str()).or_insert(0.0) += 1.0;
        }
    }

    counts
        .iter()
        .map(|tf| {
            let mut row: BTreeMap<String, f64> = tf
                .iter()
                .map(|(term, count)| {
                    let idf = ((1.0 + n) / (1.0 + df[term.as_str()])).ln() + 1.0;
                    (term.clone(), count * idf)
                })
                .collect();

            let norm = row.values().map(|v| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                for v in row.values_mut() {
                    *v /= norm;
                }
            }
            row
        })
        .collect()
}

/// Cosine similarity of two normalized sparse vectors
fn cosine(a: &BTreeMap<String, f64>, b: &BTreeMap<String, f64>) -> f64 {
    a.iter()
        .filter_map(|(term, x)| b.get(term).map(|y| x * y))
        .sum()
}

/// Similarity score in [0, 1] between two reports
pub fn compare_reports(report_a: &str, report_b: &str) -> f64 {
    let a = clean_text(report_a);
    let b = clean_text(report_b);
    let rows = tfidf(&[a.as_str(), b.as_str()]);
    cosine(&rows[0], &rows[1]).clamp(0.0, 1.0)
}

fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

/// Read a report from disk; `.pdf` files go through text extraction
pub fn read_report(path: &Path) -> Result<String> {
    let text = if is_pdf(path) {
        debug!(path = %path.display(), "extracting PDF text");
        pdf_extract::extract_text(path).map_err(|e| ReportError::Pdf {
            path: path.display().to_string(),
            message: e.to_string(),
        })?
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read report from {:?}", path))?
    };
    let text = text.trim().to_string();
    if text.is_empty() {
        return Err(ReportError::Empty(path.display().to_string()).into());
    }
    Ok(text)
}

/// Score `report` against `against`, or the built-in known report
pub fn compare_files(report: &Path, against: Option<&Path>, threshold: f64) -> Result<Comparison> {
    let report_text = read_report(report)?;
    let known_text = match against {
        Some(path) => read_report(path)?,
        None => KNOWN_REPORT.to_string(),
    };

    let score = compare_reports(&report_text, &known_text);
    let flagged = is_flagged(score, threshold);
    info!(report = %report.display(), score, flagged, "compared reports");
    Ok(Comparison { score, flagged })
}

/// Run the `compare` command and print its verdict
pub fn run_compare(report: &Path, against: Option<&Path>, threshold: f64) -> Result<()> {
    eprintln!("Reading report {}...", report.display());
    let comparison = compare_files(report, against, threshold)?;

    let label = match against {
        Some(path) => path.display().to_string(),
        None => "known report".to_string(),
    };
    println!("Report Similarity Score (vs. {}): {:.2}", label, comparison.score);
    if comparison.flagged {
        println!("⚠️ High similarity detected! The report may be misleading or copied.");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_text() {
        assert_eq!(
            clean_text("We are REDUCING our carbon-emissions, by 40%!"),
            "reducing carbonemissions 40"
        );
        assert_eq!(clean_text("the and of"), "");
    }

    #[test]
    fn test_tokenize_drops_single_chars() {
        assert_eq!(tokenize("a bb ccc 1 22"), ["bb", "ccc", "22"]);
    }

    #[test]
    fn test_identical_reports() {
        let score = compare_reports(KNOWN_REPORT, KNOWN_REPORT);
        assert!((score - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_disjoint_reports() {
        let score = compare_reports("solar panels installed", "recycled denim jeans");
        assert_eq!(score, 0.0);
    }

    #[test]
    fn test_stopwords_and_punctuation_ignored() {
        let a = "Eco-friendly packaging reduces emissions.";
        let b = "The ecofriendly packaging, it reduces the emissions!";
        assert!((compare_reports(a, b) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_partial_overlap() {
        let score = compare_reports(
            "Company X uses eco-friendly packaging.",
            "Company Y uses plastic packaging.",
        );
        assert!(score > 0.0 && score < 1.0);
    }

    #[test]
    fn test_empty_side_scores_zero() {
        assert_eq!(compare_reports("", KNOWN_REPORT), 0.0);
    }

    #[test]
    fn test_tfidf_rows_are_normalized() {
        let rows = tfidf(&["green green energy", "green water"]);
        for row in rows {
            let norm: f64 = row.values().map(|v| v * v).sum();
            assert!((norm - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_read_empty_report_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        fs::write(&path, "  \n").unwrap();
        let err = read_report(&path).unwrap_err();
        assert!(err.downcast_ref::<ReportError>().is_some());
    }

    #[test]
    fn test_threshold_is_exclusive() {
        assert!(!is_flagged(0.8, 0.8));
        assert!(is_flagged(0.81, 0.8));
        assert!(!is_flagged(0.0, DEFAULT_THRESHOLD));
    }

    #[test]
    fn test_identical_files_are_flagged() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b.txt");
        fs::write(&a, "we plant trees").unwrap();
        fs::write(&b, "we plant trees").unwrap();

        let result = compare_files(&a, Some(&b), DEFAULT_THRESHOLD).unwrap();
        assert!((result.score - 1.0).abs() < 1e-9);
        assert!(result.flagged);

        // Nothing is strictly above a threshold of 1
        assert!(!compare_files(&a, Some(&b), 1.0).unwrap().flagged);
        run_compare(&a, Some(&b), DEFAULT_THRESHOLD).unwrap();
    }

    #[test]
    fn test_unrelated_file_is_not_flagged() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.txt");
        fs::write(&a, "recycled denim jeans").unwrap();

        let result = compare_files(&a, None, DEFAULT_THRESHOLD).unwrap();
        assert_eq!(result.score, 0.0);
        assert!(!result.flagged);
    }

    /// Single-page PDF showing `text` in Helvetica
    fn minimal_pdf(text: &str) -> Vec<u8> {
        let content = format!("BT /F1 12 Tf 72 712 Td ({}) Tj ET", text);
        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents 4 0 R \
             /Resources << /Font << /F1 5 0 R >> >> >>"
                .to_string(),
            format!("<< /Length {} >>\nstream\n{}\nendstream", content.len(), content),
            "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
        ];

        let mut pdf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::new();
        for (i, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n{}\nendobj\n", i + 1, body).as_bytes());
        }

        let xref = pdf.len();
        let mut tail = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
        for offset in offsets {
            tail.push_str(&format!("{:010} 00000 n \n", offset));
        }
        tail.push_str(&format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF\n",
            objects.len() + 1,
            xref
        ));
        pdf.extend_from_slice(tail.as_bytes());
        pdf
    }

    #[test]
    fn test_read_pdf_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.PDF");
        fs::write(&path, minimal_pdf("We plant trees")).unwrap();

        let text = read_report(&path).unwrap();
        assert!(text.contains("trees"), "extracted {:?}", text);
    }

    #[test]
    fn test_blank_pdf_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blank.pdf");
        fs::write(&path, minimal_pdf("")).unwrap();

        let err = read_report(&path).unwrap_err();
        assert!(matches!(err.downcast_ref::<ReportError>(), Some(ReportError::Empty(_))));
    }

    #[test]
    fn test_corrupt_pdf_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        fs::write(&path, "not a pdf at all").unwrap();

        let err = read_report(&path).unwrap_err();
        assert!(matches!(err.downcast_ref::<ReportError>(), Some(ReportError::Pdf { .. })));
    }
}
