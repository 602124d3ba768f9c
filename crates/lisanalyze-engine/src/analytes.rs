//! The built-in analyte catalog
//!
//! Reference ranges and critical values follow the Lange Pocket Guide to
//! Diagnostic Tests, 6e. Canonical units are the conventional (US)
//! reporting units for each analyte.

use crate::convert::MolarBasis;
use crate::profile::{
    AnalyteProfile, Bound, Correction, PanicKind, PanicRule, RatioRule, TrendRule,
};

const BASE: AnalyteProfile = AnalyteProfile {
    canonical: "",
    aliases: &[],
    unit: "",
    high: None,
    low: None,
    panic_rules: &[],
    ratio_rules: &[],
    correction: None,
    trend: None,
    molar: None,
};

const fn severe(kind: PanicKind, lead: &'static str) -> PanicRule {
    PanicRule {
        kind,
        ceiling: None,
        lead,
        trail: "",
    }
}

// Cross-analyte rule math. Each fn receives (own, partner) normalized
// values and returns the event text when the rule fires.

fn ast_alt_alcoholic(ast: f64, alt: f64) -> Option<String> {
    let ratio = ast / alt;
    (ratio > 2.0).then(|| {
        format!("AST/ALT > 2 (AST: {ast}, ALT: {alt}, AST/ALT: {ratio:.1}); consider alcoholic hepatitis")
    })
}

fn ast_alt_cirrhosis(ast: f64, alt: f64) -> Option<String> {
    (ast > alt).then(|| {
        let ratio = ast / alt;
        format!("AST/ALT > 1 (AST: {ast}, ALT: {alt}, AST/ALT: {ratio:.1}); possible cirrhosis if patient has hepatitis C")
    })
}

fn alt_side_alcoholic(alt: f64, ast: f64) -> Option<String> {
    ast_alt_alcoholic(ast, alt)
}

fn alt_side_cirrhosis(alt: f64, ast: f64) -> Option<String> {
    ast_alt_cirrhosis(ast, alt)
}

fn bun_cr_high(bun: f64, cr: f64) -> Option<String> {
    let ratio = bun / cr;
    (ratio > 20.0).then(|| {
        format!("BUN/Cr > 20 (BUN: {bun}, Cr: {cr}, BUN/Cr: {ratio:.1}); consider dehydration, bleeding, increased catabolism")
    })
}

fn bun_cr_low(bun: f64, cr: f64) -> Option<String> {
    let ratio = bun / cr;
    (ratio < 10.0).then(|| {
        format!("BUN/Cr < 10 (BUN: {bun}, Cr: {cr}, BUN/Cr: {ratio:.1}); possible acute tubular necrosis, advanced liver disease, low protein intake, hemodialysis")
    })
}

fn cr_side_high(cr: f64, bun: f64) -> Option<String> {
    bun_cr_high(bun, cr)
}

fn cr_side_low(cr: f64, bun: f64) -> Option<String> {
    bun_cr_low(bun, cr)
}

// Physiologic corrections.

fn sodium_glucose_correction(na: f64, glucose: f64) -> f64 {
    if glucose > 110.0 {
        na + (glucose - 110.0) * 1.6 / 100.0
    } else {
        na
    }
}

fn calcium_albumin_correction(ca: f64, albumin: f64) -> f64 {
    if albumin < 3.4 {
        ca + (3.4 - albumin) * 0.8
    } else {
        ca
    }
}

pub static AFP: AnalyteProfile = AnalyteProfile {
    canonical: "AFP",
    aliases: &["aFP"],
    unit: "ng/ml",
    high: Some(Bound { limit: 15.0, label: "High AFP" }),
    low: Some(Bound { limit: 0.0, label: "Low AFP" }),
    ..BASE
};

pub static ALBUMIN: AnalyteProfile = AnalyteProfile {
    canonical: "Albumin",
    aliases: &["ALB", "albumin"],
    unit: "g/dl",
    high: Some(Bound { limit: 5.7, label: "Hyperalbuminemia" }),
    low: Some(Bound { limit: 3.4, label: "Hypoalbuminemia" }),
    ..BASE
};

pub static ALT: AnalyteProfile = AnalyteProfile {
    canonical: "ALT",
    aliases: &["SGPT", "GPT"],
    unit: "U/l",
    high: Some(Bound { limit: 35.0, label: "ALT too high" }),
    low: Some(Bound { limit: 0.0, label: "ALT too low" }),
    panic_rules: &[PanicRule {
        kind: PanicKind::Above(1000.0),
        ceiling: None,
        lead: "ALT markedly elevated",
        trail: "; consider ischemia, infection, toxicity",
    }],
    ratio_rules: &[
        RatioRule { partner: "AST", check: alt_side_alcoholic },
        RatioRule { partner: "AST", check: alt_side_cirrhosis },
    ],
    ..BASE
};

pub static AST: AnalyteProfile = AnalyteProfile {
    canonical: "AST",
    aliases: &["SGOT", "GOT"],
    unit: "U/l",
    high: Some(Bound { limit: 35.0, label: "AST too high" }),
    low: Some(Bound { limit: 0.0, label: "AST too low" }),
    panic_rules: &[PanicRule {
        kind: PanicKind::Above(1000.0),
        ceiling: None,
        lead: "AST markedly elevated",
        trail: "; consider ischemia, infection, toxicity",
    }],
    ratio_rules: &[
        RatioRule { partner: "ALT", check: ast_alt_alcoholic },
        RatioRule { partner: "ALT", check: ast_alt_cirrhosis },
    ],
    ..BASE
};

pub static BUN: AnalyteProfile = AnalyteProfile {
    canonical: "BUN",
    aliases: &[],
    unit: "mg/dl",
    high: Some(Bound { limit: 20.0, label: "High BUN" }),
    low: Some(Bound { limit: 8.0, label: "Low BUN" }),
    ratio_rules: &[
        RatioRule { partner: "Cr", check: bun_cr_high },
        RatioRule { partner: "Cr", check: bun_cr_low },
    ],
    // Urea nitrogen: molar conversions go via urea (60.06 g/mol), then
    // the urea to urea-nitrogen mass ratio.
    molar: Some(MolarBasis { molar_mass: 60.06, mass_scale: 60.062 / 28.02 }),
    ..BASE
};

pub static C_PEPTIDE: AnalyteProfile = AnalyteProfile {
    canonical: "C-peptide",
    aliases: &["C peptide"],
    unit: "ng/ml",
    high: Some(Bound { limit: 4.0, label: "High C-peptide" }),
    low: Some(Bound { limit: 0.8, label: "Low C-peptide" }),
    panic_rules: &[severe(
        PanicKind::Above(6.04058),
        "Very high C-peptide; suggestive of insulinoma",
    )],
    molar: Some(MolarBasis::simple(3020.29)),
    ..BASE
};

pub static CA: AnalyteProfile = AnalyteProfile {
    canonical: "Ca",
    aliases: &["Calcium", "CA"],
    unit: "mg/dl",
    high: Some(Bound { limit: 10.5, label: "Hypercalcemia" }),
    low: Some(Bound { limit: 8.5, label: "Hypocalcemia" }),
    panic_rules: &[
        severe(PanicKind::Above(13.5), "Severe hypercalcemia"),
        severe(PanicKind::Below(6.5), "Severe hypocalcemia"),
    ],
    correction: Some(Correction {
        partner: "Albumin",
        apply: calcium_albumin_correction,
    }),
    molar: Some(MolarBasis::simple(40.08)),
    ..BASE
};

pub static CEA: AnalyteProfile = AnalyteProfile {
    canonical: "CEA",
    aliases: &[],
    unit: "ng/ml",
    high: Some(Bound { limit: 2.5, label: "High CEA" }),
    low: Some(Bound { limit: 0.0, label: "Low CEA" }),
    panic_rules: &[
        severe(PanicKind::Above(20.0), "Possible cancer"),
        severe(PanicKind::Above(5.0), "Possible breast cancer recurrence"),
    ],
    ..BASE
};

pub static CR: AnalyteProfile = AnalyteProfile {
    canonical: "Cr",
    aliases: &["Creatinine"],
    unit: "mg/dl",
    high: Some(Bound { limit: 1.2, label: "High creatinine" }),
    low: Some(Bound { limit: 0.6, label: "Low creatinine" }),
    ratio_rules: &[
        RatioRule { partner: "BUN", check: cr_side_high },
        RatioRule { partner: "BUN", check: cr_side_low },
    ],
    molar: Some(MolarBasis::simple(113.12)),
    ..BASE
};

pub static GLUCOSE: AnalyteProfile = AnalyteProfile {
    canonical: "glucose",
    aliases: &["GLU", "GLU-AC"],
    unit: "mg/dl",
    high: Some(Bound { limit: 110.0, label: "Hyperglycemia" }),
    low: Some(Bound { limit: 60.0, label: "Hypoglycemia" }),
    panic_rules: &[
        severe(PanicKind::Above(500.0), "Severe hyperglycemia"),
        severe(PanicKind::Below(40.0), "Severe hypoglycemia"),
    ],
    molar: Some(MolarBasis::simple(180.16)),
    ..BASE
};

pub static K: AnalyteProfile = AnalyteProfile {
    canonical: "K",
    aliases: &["Potassium"],
    unit: "mmol/l",
    high: Some(Bound { limit: 5.0, label: "Hyperkalemia" }),
    low: Some(Bound { limit: 3.5, label: "Hypokalemia" }),
    panic_rules: &[
        severe(PanicKind::Above(6.0), "Severe hyperkalemia"),
        severe(PanicKind::Below(3.0), "Severe hypokalemia"),
    ],
    ..BASE
};

pub static MG: AnalyteProfile = AnalyteProfile {
    canonical: "Mg",
    aliases: &["Magnesium", "MG"],
    unit: "mg/dl",
    high: Some(Bound { limit: 3.0, label: "Hypermagnesemia" }),
    low: Some(Bound { limit: 1.8, label: "Hypomagnesemia" }),
    panic_rules: &[
        severe(PanicKind::Above(4.5), "Severe hypermagnesemia"),
        severe(PanicKind::Below(0.5), "Severe hypomagnesemia"),
    ],
    molar: Some(MolarBasis::simple(24.31)),
    ..BASE
};

pub static NA: AnalyteProfile = AnalyteProfile {
    canonical: "Na",
    aliases: &["Sodium", "NA"],
    unit: "mmol/l",
    high: Some(Bound { limit: 145.0, label: "Hypernatremia" }),
    low: Some(Bound { limit: 135.0, label: "Hyponatremia" }),
    panic_rules: &[
        severe(PanicKind::Above(155.0), "Severe hypernatremia"),
        severe(PanicKind::Below(125.0), "Severe hyponatremia"),
    ],
    correction: Some(Correction {
        partner: "glucose",
        apply: sodium_glucose_correction,
    }),
    ..BASE
};

pub static P: AnalyteProfile = AnalyteProfile {
    canonical: "P",
    aliases: &["Phosphorus"],
    unit: "mg/dl",
    high: Some(Bound { limit: 4.5, label: "Hyperphosphatemia" }),
    low: Some(Bound { limit: 2.5, label: "Hypophosphatemia" }),
    panic_rules: &[severe(PanicKind::Below(1.0), "Severe hypophosphatemia")],
    molar: Some(MolarBasis::simple(30.97)),
    ..BASE
};

pub static PRL: AnalyteProfile = AnalyteProfile {
    canonical: "PRL",
    aliases: &["Prolactin"],
    unit: "ng/ml",
    high: Some(Bound { limit: 25.0, label: "PRL too high" }),
    // Prolactin has no meaningful lower bound; low-side checks are skipped.
    low: None,
    panic_rules: &[
        severe(
            PanicKind::Above(500.0),
            "PRL > 500 ng/ml; suspect macroadenoma of pituitary",
        ),
        PanicRule {
            kind: PanicKind::Above(150.0),
            ceiling: Some(500.0),
            lead: "PRL > 150 ng/ml; suspect microadenoma of pituitary",
            trail: "",
        },
    ],
    ..BASE
};

pub static PSA: AnalyteProfile = AnalyteProfile {
    canonical: "PSA",
    aliases: &[],
    unit: "ng/dl",
    high: Some(Bound { limit: 400.0, label: "PSA too high" }),
    low: Some(Bound { limit: 0.0, label: "PSA too low" }),
    trend: Some(TrendRule {
        nadir_delta: 2.0,
        consecutive: 3,
        delta_event: "PSA biochemical failure (PSA increase by 2.0 ng/dl)",
        consecutive_event: "PSA biochemical failure (3 consecutive increases)",
    }),
    ..BASE
};

/// Every built-in profile, in registry order. Order is significant: it
/// fixes the order evaluators run and therefore the order events appear
/// within a timestamp bucket.
pub static STANDARD: &[&AnalyteProfile] = &[
    &AFP, &ALBUMIN, &ALT, &AST, &BUN, &C_PEPTIDE, &CA, &CEA, &CR, &GLUCOSE, &K, &MG, &NA, &P,
    &PRL, &PSA,
];
