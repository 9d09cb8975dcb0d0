mod metric;

pub use metric::SimilarityMetric;

use crate::model::SimilarityGroup;
use ahash::AHashSet;
use std::path::Path;
use tracing::info;

/// Group paths whose basenames score at or above `threshold`.
pub fn group_similar<P: AsRef<Path>>(
    paths: &[P],
    threshold: u8,
    metric: SimilarityMetric,
) -> Vec<SimilarityGroup> {
    group_similar_by(paths, threshold, |a, b| metric.score(a, b))
}

/// [`group_similar`] with a caller-supplied basename score.
pub fn group_similar_by<P, F>(paths: &[P], threshold: u8, score: F) -> Vec<SimilarityGroup>
where
    P: AsRef<Path>,
    F: Fn(&str, &str) -> u8,
{
    let names: Vec<String> = paths.iter().map(|p| basename(p.as_ref())).collect();
    let groups = group_by_score(&names, threshold, score);
    info!("Found {} groups of similar files", groups.len());
    groups
}

/// Greedy single-pass clustering.
///
/// Each unassigned index in turn seeds a candidate group and pulls in every
/// later unassigned index that scores at or above `threshold` *against the
/// seed*. Members are never compared with each other, so the clustering is
/// not transitive and depends on input order. Candidates with a single
/// member are dropped and their seed stays unassigned.
///
/// Group ids are sequential in seed order; members are listed seed first,
/// then in ascending index order.
pub fn group_by_score<S, F>(names: &[S], threshold: u8, score: F) -> Vec<SimilarityGroup>
where
    S: AsRef<str>,
    F: Fn(&str, &str) -> u8,
{
    let mut assigned: AHashSet<usize> = AHashSet::new();
    let mut groups: Vec<SimilarityGroup> = Vec::new();

    for (i, seed) in names.iter().enumerate() {
        if assigned.contains(&i) {
            continue;
        }

        let mut members = vec![i];
        for (j, candidate) in names.iter().enumerate().skip(i + 1) {
            if assigned.contains(&j) {
                continue;
            }
            if score(seed.as_ref(), candidate.as_ref()) >= threshold {
                members.push(j);
            }
        }

        if members.len() > 1 {
            assigned.extend(members.iter().copied());
            groups.push(SimilarityGroup {
                group_id: groups.len(),
                members,
            });
        }
    }

    groups
}

fn basename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
