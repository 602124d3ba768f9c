//! Evaluator pipeline tests: presence, ranges, panic values, qualifiers,
//! unit conversion

use lisanalyze_engine::{AnalyzeConfig, Analyzer, EvalError};
use lisanalyze_model::{LabValue, Measurement, MeasurementStore};
use pretty_assertions::assert_eq;

fn cfg() -> AnalyzeConfig {
    AnalyzeConfig::default()
}

fn events_for<'a>(analyzer: &'a Analyzer, analyte: &str, file: &str, time: &str) -> Vec<&'a str> {
    analyzer
        .evaluators()
        .iter()
        .find(|e| e.profile().canonical == analyte)
        .expect("analyte registered")
        .events()
        .get(file)
        .and_then(|by_time| by_time.get(time))
        .map(|events| events.iter().map(String::as_str).collect())
        .unwrap_or_default()
}

#[test]
fn absent_analyte_produces_no_events_and_no_state() {
    let mut analyzer = Analyzer::standard();
    let mut store = MeasurementStore::new();
    store.insert("2024-03-01T08:00", "K", Measurement::numeric(4.0, "mmol/l"));

    let report = analyzer
        .analyze_file("f.json", &mut store, &cfg())
        .unwrap();

    assert_eq!(report.event_count(), 0);
    let psa = analyzer
        .evaluators()
        .iter()
        .find(|e| e.profile().canonical == "PSA")
        .unwrap();
    assert!(psa.events().is_empty());
    assert_eq!(psa.trend_state().nadir, f64::INFINITY);
    assert_eq!(psa.trend_state().last, None);
}

#[test]
fn built_in_range_fires_in_both_directions() {
    let mut analyzer = Analyzer::standard();
    let mut store = MeasurementStore::new();
    store.insert("2024-03-01T08:00", "Na", Measurement::numeric(150.0, "mmol/l"));
    store.insert("2024-03-02T08:00", "Na", Measurement::numeric(131.0, "mmol/l"));
    analyzer.analyze_file("f.json", &mut store, &cfg()).unwrap();

    assert_eq!(
        events_for(&analyzer, "Na", "f.json", "2024-03-01T08:00"),
        vec!["Hypernatremia (current value 150; reference value 145 (mmol/l))"]
    );
    assert_eq!(
        events_for(&analyzer, "Na", "f.json", "2024-03-02T08:00"),
        vec!["Hyponatremia (current value 131; reference value 135 (mmol/l))"]
    );
}

#[test]
fn caller_supplied_range_takes_precedence() {
    let mut analyzer = Analyzer::standard();
    let mut store = MeasurementStore::new();
    // 150 breaches the built-in 145 but sits inside the lab's own range.
    store.insert(
        "2024-03-01T08:00",
        "Na",
        Measurement {
            lab_value: LabValue::Number(150.0),
            unit: "mmol/l".into(),
            ref_high: Some(200.0),
            ref_low: None,
        },
    );
    analyzer.analyze_file("f.json", &mut store, &cfg()).unwrap();

    assert_eq!(
        events_for(&analyzer, "Na", "f.json", "2024-03-01T08:00"),
        Vec::<&str>::new()
    );
}

#[test]
fn panic_checks_run_even_inside_caller_supplied_range() {
    let mut analyzer = Analyzer::standard();
    let mut store = MeasurementStore::new();
    store.insert(
        "2024-03-01T08:00",
        "Na",
        Measurement {
            lab_value: LabValue::Number(160.0),
            unit: "mmol/l".into(),
            ref_high: Some(200.0),
            ref_low: None,
        },
    );
    analyzer.analyze_file("f.json", &mut store, &cfg()).unwrap();

    assert_eq!(
        events_for(&analyzer, "Na", "f.json", "2024-03-01T08:00"),
        vec!["Severe hypernatremia (160 (mmol/l))"]
    );
}

#[test]
fn alias_entries_evaluate_under_the_canonical_name() {
    let mut analyzer = Analyzer::standard();
    let mut store = MeasurementStore::new();
    store.insert(
        "2024-03-01T08:00",
        "Sodium",
        Measurement::numeric(150.0, "mmol/l"),
    );
    analyzer.analyze_file("f.json", &mut store, &cfg()).unwrap();

    assert_eq!(
        events_for(&analyzer, "Na", "f.json", "2024-03-01T08:00"),
        vec!["Hypernatremia (current value 150; reference value 145 (mmol/l))"]
    );
    // The alias entry is still there; the canonical copy sits beside it.
    let slice = store.slice("2024-03-01T08:00").unwrap();
    assert!(slice.contains_key("Sodium"));
    assert!(slice.contains_key("Na"));
}

#[test]
fn exclusive_panic_bands_do_not_overlap() {
    let mut analyzer = Analyzer::standard();
    let mut store = MeasurementStore::new();
    store.insert("2024-03-01T08:00", "PRL", Measurement::numeric(200.0, "ng/ml"));
    store.insert("2024-03-02T08:00", "PRL", Measurement::numeric(600.0, "ng/ml"));
    analyzer.analyze_file("f.json", &mut store, &cfg()).unwrap();

    let t1 = events_for(&analyzer, "PRL", "f.json", "2024-03-01T08:00");
    assert!(t1.iter().any(|e| e.contains("microadenoma")), "{t1:?}");
    assert!(!t1.iter().any(|e| e.contains("macroadenomaa")));

    let t2 = events_for(&analyzer, "PRL", "f.json", "2024-03-02T08:00");
    assert!(t2.iter().any(|e| e.contains("macroadenoma")), "{t2:?}");
    assert!(!t2.iter().any(|e| e.contains("microadenoma")), "{t2:?}");
}

#[test]
fn independent_panic_bands_can_both_fire() {
    let mut analyzer = Analyzer::standard();
    let mut store = MeasurementStore::new();
    store.insert("2024-03-01T08:00", "CEA", Measurement::numeric(25.0, "ng/ml"));
    analyzer.analyze_file("f.json", &mut store, &cfg()).unwrap();

    let events = events_for(&analyzer, "CEA", "f.json", "2024-03-01T08:00");
    assert!(events.iter().any(|e| e.starts_with("High CEA")));
    assert!(events.iter().any(|e| e.starts_with("Possible cancer")));
    assert!(events.iter().any(|e| e.starts_with("Possible breast cancer recurrence")));
}

#[test]
fn qualified_above_limit_reads_as_infinite() {
    let mut analyzer = Analyzer::standard();
    let mut store = MeasurementStore::new();
    store.insert(
        "2024-03-01T08:00",
        "glucose",
        Measurement {
            lab_value: LabValue::Text("> 600".into()),
            unit: "mg/dl".into(),
            ref_high: None,
            ref_low: None,
        },
    );
    analyzer.analyze_file("f.json", &mut store, &cfg()).unwrap();

    let events = events_for(&analyzer, "glucose", "f.json", "2024-03-01T08:00");
    assert!(events.iter().any(|e| e.starts_with("Hyperglycemia")), "{events:?}");
    assert!(events.iter().any(|e| e.starts_with("Severe hyperglycemia")), "{events:?}");
}

#[test]
fn converted_value_drives_the_range_and_panic_checks() {
    let cfg = AnalyzeConfig {
        convert: true,
        ..AnalyzeConfig::default()
    };
    let mut analyzer = Analyzer::standard();
    let mut store = MeasurementStore::new();
    // 30 mmol/l glucose is 540.5 mg/dl; the raw 30 would read as
    // hypoglycemic if conversion were skipped.
    store.insert(
        "2024-03-01T08:00",
        "glucose",
        Measurement::numeric(30.0, "mmol/l"),
    );
    analyzer.analyze_file("f.json", &mut store, &cfg).unwrap();

    let events = events_for(&analyzer, "glucose", "f.json", "2024-03-01T08:00");
    assert!(events.iter().any(|e| e.starts_with("Hyperglycemia")), "{events:?}");
    assert!(
        events.iter().any(|e| e.starts_with("Severe hyperglycemia")),
        "{events:?}"
    );
    assert!(!events.iter().any(|e| e.contains("Hypoglycemia")), "{events:?}");
}

#[test]
fn equivalents_convert_as_moles_for_monovalent_electrolytes() {
    let cfg = AnalyzeConfig {
        convert: true,
        ..AnalyzeConfig::default()
    };
    let mut analyzer = Analyzer::standard();
    let mut store = MeasurementStore::new();
    store.insert("2024-03-01T08:00", "K", Measurement::numeric(6.5, "meq/l"));
    analyzer.analyze_file("f.json", &mut store, &cfg).unwrap();

    assert_eq!(
        events_for(&analyzer, "K", "f.json", "2024-03-01T08:00"),
        vec![
            "Hyperkalemia (current value 6.5; reference value 5 (mmol/l))",
            "Severe hyperkalemia (6.5 (mmol/l))",
        ]
    );
}

#[test]
fn bun_molar_conversion_carries_the_urea_nitrogen_mass_ratio() {
    let cfg = AnalyzeConfig {
        convert: true,
        ..AnalyzeConfig::default()
    };
    let mut analyzer = Analyzer::standard();
    let mut store = MeasurementStore::new();
    // 1.6 mmol/l of urea is 9.6 mg/dl; only the urea to urea-nitrogen
    // ratio lifts it to 20.6 mg/dl, past the upper bound of 20.
    store.insert("2024-03-01T08:00", "BUN", Measurement::numeric(1.6, "mmol/l"));
    analyzer.analyze_file("f.json", &mut store, &cfg).unwrap();

    let events = events_for(&analyzer, "BUN", "f.json", "2024-03-01T08:00");
    assert!(events.iter().any(|e| e.starts_with("High BUN")), "{events:?}");
}

#[test]
fn incompatible_unit_aborts_the_file_with_a_conversion_error() {
    let cfg = AnalyzeConfig {
        convert: true,
        ..AnalyzeConfig::default()
    };
    let mut analyzer = Analyzer::standard();
    let mut store = MeasurementStore::new();
    // Potassium has no molar basis, so a mass-per-volume reading cannot
    // be bridged to mmol/l.
    store.insert("2024-03-01T08:00", "K", Measurement::numeric(4.0, "mg/dl"));

    let err = analyzer
        .analyze_file("f.json", &mut store, &cfg)
        .unwrap_err();
    match err {
        EvalError::Conversion { analyte, .. } => assert_eq!(analyte, "K"),
        other => panic!("expected a conversion error, got {other:?}"),
    }
}

#[test]
fn unparseable_value_is_a_hard_error() {
    let mut analyzer = Analyzer::standard();
    let mut store = MeasurementStore::new();
    store.insert(
        "2024-03-01T08:00",
        "K",
        Measurement {
            lab_value: LabValue::Text("pending".into()),
            unit: "mmol/l".into(),
            ref_high: None,
            ref_low: None,
        },
    );
    let err = analyzer.analyze_file("f.json", &mut store, &cfg());
    assert!(err.is_err());
}
