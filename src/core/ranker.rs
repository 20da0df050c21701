//! Pure ranking of leaderboard entries against per-category benchmarks.

use crate::domain::model::{BenchmarkSet, LeaderboardEntry, ProblemType, Ranking, SortOrder};
use crate::utils::error::{PortalError, Result};
use std::collections::BTreeMap;

/// Ranks the entries of one category and finds the insertion position for
/// the synthetic benchmark row.
///
/// Entries are filtered to `problem_type` and stable-sorted by metric value
/// in the category's configured direction, so equal scores keep their
/// submission order. The benchmark row goes before the first entry that is
/// strictly worse than the benchmark value; when every entry beats it, the
/// index equals the number of entries.
pub fn rank(
    entries: &[LeaderboardEntry],
    problem_type: ProblemType,
    benchmarks: &BenchmarkSet,
) -> Result<Ranking> {
    let benchmark = benchmarks
        .get(problem_type)
        .ok_or_else(|| PortalError::ConfigError {
            message: format!("no benchmark configured for {}", problem_type),
        })?;

    let mut ordered: Vec<LeaderboardEntry> = entries
        .iter()
        .filter(|entry| entry.problem_type == problem_type)
        .cloned()
        .collect();

    match benchmark.sort_order {
        SortOrder::Asc => ordered.sort_by(|a, b| a.metric_value.total_cmp(&b.metric_value)),
        SortOrder::Desc => ordered.sort_by(|a, b| b.metric_value.total_cmp(&a.metric_value)),
    }

    let benchmark_index = ordered
        .iter()
        .position(|entry| match benchmark.sort_order {
            SortOrder::Asc => entry.metric_value > benchmark.value,
            SortOrder::Desc => entry.metric_value < benchmark.value,
        })
        .unwrap_or(ordered.len());

    Ok(Ranking {
        ordered,
        benchmark_index,
    })
}

/// Ranks every category the benchmark set configures.
pub fn rank_all(
    entries: &[LeaderboardEntry],
    benchmarks: &BenchmarkSet,
) -> Result<BTreeMap<ProblemType, Ranking>> {
    let mut rankings = BTreeMap::new();
    for problem_type in benchmarks.categories() {
        rankings.insert(problem_type, rank(entries, problem_type, benchmarks)?);
    }
    Ok(rankings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Benchmark;

    fn entry(team: &str, problem_type: ProblemType, metric_value: f64) -> LeaderboardEntry {
        LeaderboardEntry {
            team_name: team.to_string(),
            problem_type,
            commit: format!("{}-commit", team),
            metric_value,
        }
    }

    #[test]
    fn test_ascending_lower_is_better() {
        let entries = vec![
            entry("t1", ProblemType::BAP, 0.6),
            entry("t2", ProblemType::BAP, 0.4),
            entry("t3", ProblemType::BAP, 0.7),
        ];
        let ranking = rank(&entries, ProblemType::BAP, &BenchmarkSet::default()).unwrap();

        let values: Vec<f64> = ranking.ordered.iter().map(|e| e.metric_value).collect();
        assert_eq!(values, vec![0.4, 0.6, 0.7]);
        // Benchmark 0.5833... slots between 0.4 and 0.6.
        assert_eq!(ranking.benchmark_index, 1);
    }

    #[test]
    fn test_descending_higher_is_better() {
        let entries = vec![
            entry("t1", ProblemType::DR, 0.80),
            entry("t2", ProblemType::DR, 0.95),
            entry("t3", ProblemType::DR, 0.70),
        ];
        let ranking = rank(&entries, ProblemType::DR, &BenchmarkSet::default()).unwrap();

        let values: Vec<f64> = ranking.ordered.iter().map(|e| e.metric_value).collect();
        assert_eq!(values, vec![0.95, 0.80, 0.70]);
        assert_eq!(ranking.benchmark_index, 1);
    }

    #[test]
    fn test_all_entries_beat_benchmark() {
        let entries = vec![
            entry("t1", ProblemType::DR, 0.90),
            entry("t2", ProblemType::DR, 0.95),
        ];
        let ranking = rank(&entries, ProblemType::DR, &BenchmarkSet::default()).unwrap();
        assert_eq!(ranking.benchmark_index, ranking.ordered.len());
    }

    #[test]
    fn test_empty_category() {
        let entries = vec![entry("t1", ProblemType::DR, 0.9)];
        let ranking = rank(&entries, ProblemType::CD, &BenchmarkSet::default()).unwrap();
        assert!(ranking.ordered.is_empty());
        assert_eq!(ranking.benchmark_index, 0);
    }

    #[test]
    fn test_entry_equal_to_benchmark_ranks_before_it() {
        // 0.88 is not strictly worse than the DR benchmark, so the
        // benchmark row lands after it.
        let entries = vec![entry("t1", ProblemType::DR, 0.88)];
        let ranking = rank(&entries, ProblemType::DR, &BenchmarkSet::default()).unwrap();
        assert_eq!(ranking.benchmark_index, 1);
    }

    #[test]
    fn test_equal_scores_keep_submission_order() {
        let entries = vec![
            entry("first", ProblemType::DR, 0.9),
            entry("second", ProblemType::DR, 0.9),
            entry("third", ProblemType::DR, 0.9),
        ];
        let ranking = rank(&entries, ProblemType::DR, &BenchmarkSet::default()).unwrap();
        let teams: Vec<&str> = ranking.ordered.iter().map(|e| e.team_name.as_str()).collect();
        assert_eq!(teams, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let entries = vec![
            entry("t1", ProblemType::DR, 0.7),
            entry("t2", ProblemType::DR, 0.9),
        ];
        let before = entries.clone();
        let _ = rank(&entries, ProblemType::DR, &BenchmarkSet::default()).unwrap();
        assert_eq!(entries, before);
    }

    #[test]
    fn test_unconfigured_category_is_a_config_error() {
        let mut only_dr = BTreeMap::new();
        only_dr.insert(
            ProblemType::DR,
            Benchmark {
                metric: "F1 Score".to_string(),
                value: 0.88,
                sort_order: SortOrder::Desc,
            },
        );
        let benchmarks = BenchmarkSet::from(only_dr);

        let err = rank(&[], ProblemType::BAP, &benchmarks).unwrap_err();
        assert!(matches!(err, PortalError::ConfigError { .. }));
    }

    #[test]
    fn test_rank_all_covers_every_category() {
        let entries = vec![
            entry("t1", ProblemType::DR, 0.9),
            entry("t2", ProblemType::BAP, 0.5),
        ];
        let rankings = rank_all(&entries, &BenchmarkSet::default()).unwrap();
        assert_eq!(rankings.len(), 3);
        assert_eq!(rankings[&ProblemType::DR].ordered.len(), 1);
        assert_eq!(rankings[&ProblemType::CD].ordered.len(), 0);
    }
}
