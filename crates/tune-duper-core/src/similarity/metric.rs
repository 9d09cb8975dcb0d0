use serde::{Deserialize, Serialize};

/// String similarity used to compare basenames, scaled to 0..=100.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityMetric {
    /// Jaro-Winkler: favours shared prefixes, so copy suffixes such as
    /// `" (1)"` still score high.
    #[default]
    JaroWinkler,
    /// 1 - levenshtein / max(len).
    NormalizedLevenshtein,
    /// Indel ratio, 2 * lcs / (len(a) + len(b)): only insertions and
    /// deletions count, so an inserted `" (1)"` costs its length once.
    IndelRatio,
}

impl SimilarityMetric {
    /// Symmetric score in 0..=100.
    pub fn score(self, a: &str, b: &str) -> u8 {
        let similarity = match self {
            SimilarityMetric::JaroWinkler => strsim::jaro_winkler(a, b),
            SimilarityMetric::NormalizedLevenshtein => strsim::normalized_levenshtein(a, b),
            SimilarityMetric::IndelRatio => indel_ratio(a, b),
        };
        (similarity * 100.0).round().clamp(0.0, 100.0) as u8
    }
}

fn indel_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    (2 * longest_common_subsequence(&a, &b)) as f64 / total as f64
}

/// Length of the longest common subsequence, one DP row at a time.
fn longest_common_subsequence(a: &[char], b: &[char]) -> usize {
    let mut row = vec![0usize; b.len() + 1];
    for &ca in a {
        let mut diagonal = 0;
        for (j, &cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb {
                diagonal + 1
            } else {
                above.max(row[j])
            };
            diagonal = above;
        }
    }
    row[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_names_score_100() {
        for metric in [
            SimilarityMetric::JaroWinkler,
            SimilarityMetric::NormalizedLevenshtein,
            SimilarityMetric::IndelRatio,
        ] {
            assert_eq!(metric.score("Song.mp3", "Song.mp3"), 100);
            assert_eq!(metric.score("", ""), 100);
        }
    }

    #[test]
    fn test_score_is_symmetric() {
        let pairs = [
            ("Song.mp3", "Song (1).mp3"),
            ("Track 01.mp3", "Track 02.mp3"),
            ("Intro.mp3", "Outro.mp3"),
        ];
        for metric in [
            SimilarityMetric::JaroWinkler,
            SimilarityMetric::NormalizedLevenshtein,
            SimilarityMetric::IndelRatio,
        ] {
            for (a, b) in pairs {
                assert_eq!(metric.score(a, b), metric.score(b, a), "{} / {}", a, b);
            }
        }
    }

    #[test]
    fn test_copy_suffix_scores_above_default_threshold() {
        let metric = SimilarityMetric::JaroWinkler;
        assert!(metric.score("Song.mp3", "Song (1).mp3") >= 90);
        assert!(metric.score("Song.mp3", "Other.flac") < 90);
    }

    #[test]
    fn test_normalized_levenshtein_is_stricter_on_suffixes() {
        let metric = SimilarityMetric::NormalizedLevenshtein;
        assert_eq!(metric.score("Song.mp3", "Song (1).mp3"), 67);
        assert_eq!(metric.score("Track 01.mp3", "Track 02.mp3"), 92);
    }

    #[test]
    fn test_indel_ratio_scores() {
        let metric = SimilarityMetric::IndelRatio;
        assert_eq!(metric.score("Song.mp3", "Song (1).mp3"), 80);
        assert_eq!(metric.score("Track 01.mp3", "Track 02.mp3"), 92);
        assert_eq!(metric.score("abc", ""), 0);
        assert_eq!(metric.score("Intro.mp3", "Outro.mp3"), 78);
    }

    #[test]
    fn test_metric_names_in_config() {
        let metric: SimilarityMetric = serde_json::from_str("\"indel_ratio\"").unwrap();
        assert_eq!(metric, SimilarityMetric::IndelRatio);
    }
}
