//! Timeline merge and report tests

use lisanalyze_engine::{AnalyzeConfig, Analyzer};
use lisanalyze_model::{Measurement, MeasurementStore, RunReport};
use pretty_assertions::assert_eq;

fn cfg() -> AnalyzeConfig {
    AnalyzeConfig::default()
}

#[test]
fn merged_buckets_follow_registry_order() {
    let mut analyzer = Analyzer::standard();
    let mut store = MeasurementStore::new();
    // Registry order is AFP .. K .. Na .. - both fire at the same time.
    store.insert("2024-03-01T08:00", "Na", Measurement::numeric(150.0, "mmol/l"));
    store.insert("2024-03-01T08:00", "K", Measurement::numeric(5.5, "mmol/l"));
    let report = analyzer.analyze_file("f.json", &mut store, &cfg()).unwrap();

    let slice = report.timeline.get("2024-03-01T08:00").unwrap();
    let analytes: Vec<_> = slice.keys().map(String::as_str).collect();
    assert_eq!(analytes, vec!["K", "Na"]);
    assert_eq!(
        slice.get("K").unwrap(),
        &vec!["Hyperkalemia (current value 5.5; reference value 5 (mmol/l))".to_string()]
    );
}

#[test]
fn merged_timestamps_are_chronological_across_evaluators() {
    let mut analyzer = Analyzer::standard();
    let mut store = MeasurementStore::new();
    // Na only fires at the later time, K only at the earlier one; the
    // merged timeline must still come out in time order.
    store.insert("2024-03-02T08:00", "Na", Measurement::numeric(150.0, "mmol/l"));
    store.insert("2024-03-01T08:00", "K", Measurement::numeric(5.5, "mmol/l"));
    let report = analyzer.analyze_file("f.json", &mut store, &cfg()).unwrap();

    let times: Vec<_> = report.timeline.keys().map(String::as_str).collect();
    assert_eq!(times, vec!["2024-03-01T08:00", "2024-03-02T08:00"]);
}

#[test]
fn per_file_reports_never_duplicate_earlier_files() {
    let mut analyzer = Analyzer::standard();

    let mut first = MeasurementStore::new();
    first.insert("2024-03-01T08:00", "K", Measurement::numeric(5.5, "mmol/l"));
    let report_one = analyzer.analyze_file("one.json", &mut first, &cfg()).unwrap();
    assert_eq!(report_one.event_count(), 1);

    let mut second = MeasurementStore::new();
    second.insert("2024-04-01T08:00", "K", Measurement::numeric(5.6, "mmol/l"));
    let report_two = analyzer.analyze_file("two.json", &mut second, &cfg()).unwrap();

    // The evaluators' dictionaries are cumulative, but each report holds
    // only its own file's bucket.
    assert_eq!(report_two.event_count(), 1);
    assert!(report_two.timeline.contains_key("2024-04-01T08:00"));
    assert!(!report_two.timeline.contains_key("2024-03-01T08:00"));

    let merged = analyzer.merged();
    assert_eq!(merged.len(), 2);
    assert!(merged.contains_key("one.json"));
    assert!(merged.contains_key("two.json"));
}

#[test]
fn report_round_trips_through_json() {
    let mut analyzer = Analyzer::standard();
    let mut store = MeasurementStore::new();
    store.insert("2024-03-01T08:00", "Na", Measurement::numeric(160.0, "mmol/l"));
    store.insert("2024-03-02T08:00", "K", Measurement::numeric(2.5, "mmol/l"));
    let report = analyzer.analyze_file("f.json", &mut store, &cfg()).unwrap();
    assert!(report.event_count() >= 3);

    let json = serde_json::to_string_pretty(&report).unwrap();
    let back: RunReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back, report);
    assert_eq!(back.file_name, "f.json");
    assert_eq!(back.analysis_time, report.analysis_time);
}

#[test]
fn clean_file_produces_an_empty_timeline() {
    let mut analyzer = Analyzer::standard();
    let mut store = MeasurementStore::new();
    store.insert("2024-03-01T08:00", "Na", Measurement::numeric(140.0, "mmol/l"));
    let report = analyzer.analyze_file("f.json", &mut store, &cfg()).unwrap();
    assert_eq!(report.event_count(), 0);
    assert!(report.timeline.is_empty());
    assert_eq!(report.file_name, "f.json");
}
