use tune_duper_core::similarity::{group_by_score, group_similar};
use tune_duper_core::{SimilarityGroup, SimilarityMetric};

const METRIC: SimilarityMetric = SimilarityMetric::JaroWinkler;

fn members(groups: &[SimilarityGroup]) -> Vec<Vec<usize>> {
    groups.iter().map(|g| g.members.clone()).collect()
}

fn assert_disjoint_and_singleton_free(groups: &[SimilarityGroup]) {
    let mut seen = std::collections::HashSet::new();
    for (expected_id, group) in groups.iter().enumerate() {
        assert_eq!(group.group_id, expected_id, "ids must be sequential");
        assert!(group.members.len() >= 2, "singleton group {:?}", group);
        for &index in &group.members {
            assert!(seen.insert(index), "index {} in more than one group", index);
        }
    }
}

#[test]
fn test_song_copy_scenario() {
    let paths = ["a/Song.mp3", "a/Song (1).mp3", "a/Other.flac"];
    let groups = group_similar(&paths, 90, METRIC);
    assert_eq!(members(&groups), vec![vec![0, 1]]);
    assert_eq!(groups[0].group_id, 0);
}

#[test]
fn test_no_similar_names_gives_empty_result() {
    let paths = [
        "/m/Alpha.flac",
        "/m/Zulu.ogg",
        "/m/Intro.mp3",
        "/m/Symphony No 5.m4a",
    ];
    assert!(group_similar(&paths, 90, METRIC).is_empty());
}

#[test]
fn test_order_changes_clusters() {
    // Song~(1) = 93, Song~Sung = 93, (1)~Sung = 84 at threshold 90.
    let seeded_by_song = ["x/Song.mp3", "x/Song (1).mp3", "x/Sung.mp3"];
    let groups = group_similar(&seeded_by_song, 90, METRIC);
    assert_eq!(members(&groups), vec![vec![0, 1, 2]]);

    // Same files, different order: "Song (1)" seeds first, takes Song.mp3,
    // and Sung.mp3 is left alone because it is never compared with Song.mp3
    // as a seed. Transitive clustering would still produce one group of 3.
    let seeded_by_copy = ["x/Song (1).mp3", "x/Sung.mp3", "x/Song.mp3"];
    let groups = group_similar(&seeded_by_copy, 90, METRIC);
    assert_eq!(members(&groups), vec![vec![0, 2]]);
}

#[test]
fn test_grouping_is_deterministic() {
    let paths: Vec<String> = (0..40)
        .map(|i| format!("/lib/Artist {}/Track {:02}.mp3", i % 4, i % 13))
        .collect();

    let first = group_similar(&paths, 90, METRIC);
    for _ in 0..5 {
        assert_eq!(group_similar(&paths, 90, METRIC), first);
    }
    assert_disjoint_and_singleton_free(&first);
}

#[test]
fn test_assigned_index_not_reused_by_later_seed() {
    // 0 takes 1; 2 would also match 1 but 1 is already assigned.
    let names = ["a", "b", "c", "d"];
    let score = |x: &str, y: &str| match (x.min(y), x.max(y)) {
        ("a", "b") | ("b", "c") | ("c", "d") => 100,
        _ => 0,
    };
    let groups = group_by_score(&names, 90, score);
    assert_eq!(members(&groups), vec![vec![0, 1], vec![2, 3]]);
    assert_disjoint_and_singleton_free(&groups);
}

#[test]
fn test_many_duplicates_stay_disjoint() {
    let paths: Vec<String> = ["Intro", "Ballad", "Finale", "Interlude"]
        .iter()
        .flat_map(|stem| {
            vec![
                format!("/a/{}.mp3", stem),
                format!("/b/{} (1).mp3", stem),
                format!("/c/{} (2).mp3", stem),
            ]
        })
        .collect();

    let groups = group_similar(&paths, 90, METRIC);
    assert!(!groups.is_empty());
    assert_disjoint_and_singleton_free(&groups);
    for group in &groups {
        assert!(group.members.windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn test_threshold_100_requires_identical_names() {
    let paths = ["/a/Same.mp3", "/b/Same.mp3", "/c/Same (1).mp3"];
    let groups = group_similar(&paths, 100, METRIC);
    assert_eq!(members(&groups), vec![vec![0, 1]]);
}
