//! Property tests that hold for every dataset.

use eda_engine::{
    DataProfiler, DataQualityAnalyzer, Dataset, DatasetOverview, FrequencyAnalyzer,
    MissingReport, QualityReport, ReportGenerator, ReportParams, StatisticsEngine,
    parse_statistics_table,
};
use polars::prelude::*;
use proptest::prelude::*;

const LABELS: [&str; 4] = ["red", "green", "blue", "grey"];

fn rows_strategy() -> impl Strategy<Value = Vec<(Option<f64>, Option<&'static str>)>> {
    prop::collection::vec(
        (
            prop::option::of(prop_oneof![
                8 => -1.0e6f64..1.0e6,
                1 => Just(f64::INFINITY),
                1 => Just(f64::NEG_INFINITY),
            ]),
            prop::option::of(prop::sample::select(LABELS.to_vec())),
        ),
        1..60,
    )
}

fn dataset(rows: &[(Option<f64>, Option<&'static str>)]) -> Dataset {
    let numbers: Vec<Option<f64>> = rows.iter().map(|(n, _)| *n).collect();
    let labels: Vec<Option<&str>> = rows.iter().map(|(_, l)| *l).collect();
    df!["number" => numbers, "label" => labels].unwrap().into()
}

proptest! {
    #[test]
    fn missing_counts_match_null_cells(rows in rows_strategy()) {
        let ds = dataset(&rows);
        let profiles = DataProfiler::profile_dataset(&ds).unwrap();

        let expected = rows.iter().filter(|(n, _)| n.is_none()).count()
            + rows.iter().filter(|(_, l)| l.is_none()).count();
        let profiled: usize = profiles.iter().map(|p| p.missing_count).sum();
        prop_assert_eq!(profiled, expected);
    }

    #[test]
    fn quantiles_are_ordered(rows in rows_strategy()) {
        let ds = dataset(&rows);
        let stats = StatisticsEngine::describe_column(&ds, "number").unwrap();

        match stats.summary {
            Some(s) => {
                prop_assert!(stats.count > 0);
                prop_assert!(s.min <= s.p25);
                prop_assert!(s.p25 <= s.median);
                prop_assert!(s.median <= s.p75);
                prop_assert!(s.p75 <= s.max);
            }
            None => prop_assert_eq!(stats.count, 0),
        }
    }

    #[test]
    fn frequency_table_is_sorted(rows in rows_strategy(), top_n in 1usize..6) {
        let ds = dataset(&rows);
        let table = FrequencyAnalyzer::frequency_table(&ds, "label", top_n).unwrap();

        prop_assert!(table.entries.len() <= top_n);
        let total: usize = table.entries.iter().map(|e| e.count).sum();
        prop_assert!(total <= rows.len());

        let first_seen = |value: &str| rows.iter().position(|(_, l)| *l == Some(value));
        for pair in table.entries.windows(2) {
            prop_assert!(pair[0].count >= pair[1].count);
            if pair[0].count == pair[1].count {
                prop_assert!(first_seen(&pair[0].value) < first_seen(&pair[1].value));
            }
        }
    }

    #[test]
    fn quality_rules_are_idempotent(rows in rows_strategy()) {
        let ds = dataset(&rows);
        let first = DataQualityAnalyzer::assess(&ds).unwrap();
        let second = DataQualityAnalyzer::assess(&ds).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn statistics_table_round_trips(rows in rows_strategy()) {
        let ds = dataset(&rows);
        let statistics = StatisticsEngine::describe(&ds, None).unwrap();
        let overview = DatasetOverview {
            rows: ds.height(),
            columns: ds.width(),
            numeric_columns: 1,
            categorical_columns: 1,
            other_columns: 0,
        };

        let report = ReportGenerator::compose_at(
            &ReportParams {
                overview: &overview,
                profiles: &[],
                statistics: &statistics,
                missing: &MissingReport::NoMissingValues,
                quality: &QualityReport::Clean,
                duplicate_rows: 0,
                outliers: &[],
            },
            "fixed",
        );
        let parsed = parse_statistics_table(&report).unwrap();
        prop_assert_eq!(parsed.len(), statistics.len());

        let close = |a: f64, b: f64| {
            a == b || (a.is_nan() && b.is_nan()) || (a - b).abs() <= 0.005 + 1e-6
        };
        for (p, o) in parsed.iter().zip(&statistics) {
            prop_assert_eq!(&p.column, &o.column);
            prop_assert_eq!(p.count, o.count);
            match (&p.summary, &o.summary) {
                (Some(p), Some(o)) => {
                    prop_assert!(close(p.mean, o.mean));
                    prop_assert!(close(p.min, o.min));
                    prop_assert!(close(p.p25, o.p25));
                    prop_assert!(close(p.median, o.median));
                    prop_assert!(close(p.p75, o.p75));
                    prop_assert!(close(p.max, o.max));
                    prop_assert_eq!(p.std.is_some(), o.std.is_some());
                    prop_assert_eq!(p.skewness.is_some(), o.skewness.is_some());
                }
                (None, None) => {}
                _ => prop_assert!(false, "summary presence changed"),
            }
        }
    }
}
