//! Cross-analyte ratio rule tests

use lisanalyze_engine::{AnalyzeConfig, Analyzer};
use lisanalyze_model::{Measurement, MeasurementStore};

const TIME: &str = "2024-03-01T08:00";

fn events_for<'a>(analyzer: &'a Analyzer, analyte: &str) -> Vec<&'a str> {
    analyzer
        .evaluators()
        .iter()
        .find(|e| e.profile().canonical == analyte)
        .unwrap()
        .events()
        .get("f.json")
        .and_then(|by_time| by_time.get(TIME))
        .map(|events| events.iter().map(String::as_str).collect())
        .unwrap_or_default()
}

fn run(entries: &[(&str, f64, &str)]) -> Analyzer {
    let mut analyzer = Analyzer::standard();
    let mut store = MeasurementStore::new();
    for (analyte, value, unit) in entries {
        store.insert(TIME, *analyte, Measurement::numeric(*value, *unit));
    }
    analyzer
        .analyze_file("f.json", &mut store, &AnalyzeConfig::default())
        .unwrap();
    analyzer
}

#[test]
fn elevated_bun_cr_ratio_fires_with_embedded_ratio() {
    let analyzer = run(&[("BUN", 30.0, "mg/dl"), ("Cr", 1.0, "mg/dl")]);
    let events = events_for(&analyzer, "BUN");
    assert!(
        events
            .iter()
            .any(|e| e.contains("BUN/Cr > 20") && e.contains("BUN/Cr: 30.0")),
        "{events:?}"
    );
}

#[test]
fn low_bun_cr_ratio_fires() {
    let analyzer = run(&[("BUN", 8.0, "mg/dl"), ("Cr", 1.0, "mg/dl")]);
    let events = events_for(&analyzer, "BUN");
    assert!(events.iter().any(|e| e.contains("BUN/Cr < 10")), "{events:?}");
}

#[test]
fn normal_ratio_stays_silent() {
    let analyzer = run(&[("BUN", 15.0, "mg/dl"), ("Cr", 1.0, "mg/dl")]);
    let events = events_for(&analyzer, "BUN");
    assert!(!events.iter().any(|e| e.contains("BUN/Cr")), "{events:?}");
}

#[test]
fn ratio_rules_fire_from_both_partners() {
    let analyzer = run(&[("BUN", 30.0, "mg/dl"), ("Cr", 1.0, "mg/dl")]);
    let from_bun = events_for(&analyzer, "BUN");
    let from_cr = events_for(&analyzer, "Cr");
    let text = "BUN/Cr > 20 (BUN: 30, Cr: 1, BUN/Cr: 30.0); consider dehydration, bleeding, increased catabolism";
    assert!(from_bun.contains(&text), "{from_bun:?}");
    assert!(from_cr.contains(&text), "{from_cr:?}");
}

#[test]
fn absent_partner_skips_the_rule() {
    let analyzer = run(&[("BUN", 30.0, "mg/dl")]);
    let events = events_for(&analyzer, "BUN");
    assert!(events.iter().any(|e| e.starts_with("High BUN")), "{events:?}");
    assert!(!events.iter().any(|e| e.contains("BUN/Cr")), "{events:?}");
}

#[test]
fn ast_alt_ratio_suggests_alcoholic_hepatitis() {
    let analyzer = run(&[("AST", 90.0, "U/l"), ("ALT", 30.0, "U/l")]);
    let events = events_for(&analyzer, "AST");
    assert!(
        events
            .iter()
            .any(|e| e.contains("AST/ALT > 2") && e.contains("alcoholic hepatitis")),
        "{events:?}"
    );
    // The unity rule fires alongside, and ALT mirrors both.
    assert!(events.iter().any(|e| e.contains("AST/ALT > 1")), "{events:?}");
    let alt_events = events_for(&analyzer, "ALT");
    assert!(alt_events.iter().any(|e| e.contains("AST/ALT > 2")), "{alt_events:?}");
}

#[test]
fn aliased_partner_resolves_through_cross_reference() {
    // The partner is stored under an alias; normalize resolves it.
    let analyzer = run(&[("BUN", 30.0, "mg/dl"), ("Creatinine", 1.0, "mg/dl")]);
    let events = events_for(&analyzer, "BUN");
    assert!(events.iter().any(|e| e.contains("BUN/Cr > 20")), "{events:?}");
}
