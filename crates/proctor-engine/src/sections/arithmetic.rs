//! Section B — arithmetic reliability.
//!
//! Eight exact-arithmetic items per plan: decimal mixes, borrow chains,
//! order-of-operations expressions, fraction expansions, chained
//! percentages, compound rationals, powers with cube roots, and
//! significant-figure rounding. Expected answers are stored as strings so
//! the displayed precision is exactly what grading compares against.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::rng::{id_fragment, pick, range_float, range_int, SeededRng};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArithmeticItem {
    pub id: String,
    pub prompt: String,
    pub expression: String,
    pub expected: String,
    pub tolerance: f64,
    pub rationale: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArithmeticSection {
    pub label: String,
    pub duration_seconds: u32,
    pub description: String,
    pub items: Vec<ArithmeticItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArithmeticResponse {
    pub item_id: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArithmeticItemResult {
    pub item_id: String,
    pub expected: String,
    pub correctness: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArithmeticSectionScore {
    pub overall: f64,
    pub items: Vec<ArithmeticItemResult>,
}

pub fn generate_arithmetic_section(seed: &str) -> ArithmeticSection {
    let mut rng = SeededRng::new(&format!("arith-{seed}"));
    let items = vec![
        build_decimal_mix(&mut rng),
        build_carry_trap(&mut rng),
        build_order_expression(&mut rng),
        build_fraction_to_decimal(&mut rng),
        build_percentage(&mut rng),
        build_mixed_operation(&mut rng),
        build_power_root(&mut rng),
        build_rounding(&mut rng),
    ];

    tracing::debug!(item_count = items.len(), "generated arithmetic section");

    ArithmeticSection {
        label: "Arithmetic Reliability".to_string(),
        duration_seconds: 150,
        description:
            "Exact arithmetic under time pressure. Focus on carries, multi-step order, and precise rounding."
                .to_string(),
        items,
    }
}

pub fn grade_arithmetic_section(
    section: &ArithmeticSection,
    responses: &[ArithmeticResponse],
) -> ArithmeticSectionScore {
    let response_map: HashMap<&str, &ArithmeticResponse> = responses
        .iter()
        .map(|r| (r.item_id.as_str(), r))
        .collect();

    let items: Vec<ArithmeticItemResult> = section
        .items
        .iter()
        .map(|item| score_arithmetic_item(item, response_map.get(item.id.as_str()).copied()))
        .collect();

    let overall = if items.is_empty() {
        0.0
    } else {
        items.iter().map(|r| r.correctness).sum::<f64>() / items.len() as f64
    };

    ArithmeticSectionScore { overall, items }
}

pub fn score_arithmetic_item(
    item: &ArithmeticItem,
    response: Option<&ArithmeticResponse>,
) -> ArithmeticItemResult {
    let Some(response) = response else {
        return missing_answer(item);
    };
    if response.answer.trim().is_empty() {
        return missing_answer(item);
    }

    let parsed_answer = sanitise_number(&response.answer);
    let parsed_expected = sanitise_number(&item.expected);

    let difference = (parsed_answer - parsed_expected).abs();
    let correctness = if difference <= item.tolerance {
        1.0
    } else {
        (1.0 - difference / parsed_expected.max(1.0)).max(0.0)
    };
    // NaN differences (inf - inf) never pass the tolerance branch.
    let correctness = if correctness.is_nan() { 0.0 } else { correctness };

    let feedback = if difference <= item.tolerance {
        "Exact match achieved.".to_string()
    } else {
        format!(
            "Expected {}; difference of {} exceeds tolerance {}.",
            item.expected,
            exponential(difference, 2),
            item.tolerance
        )
    };

    ArithmeticItemResult {
        item_id: item.id.clone(),
        expected: item.expected.clone(),
        correctness: if correctness >= 0.999 {
            1.0
        } else {
            correctness.clamp(0.0, 1.0)
        },
        delta: Some(difference),
        feedback: Some(feedback),
    }
}

fn missing_answer(item: &ArithmeticItem) -> ArithmeticItemResult {
    ArithmeticItemResult {
        item_id: item.id.clone(),
        expected: item.expected.clone(),
        correctness: 0.0,
        delta: None,
        feedback: Some("No answer submitted.".to_string()),
    }
}

/// Strip units, stray words, and a trailing percent sign before parsing.
/// Anything that still fails to parse maps to +INFINITY so the grader can
/// proceed without a special error path.
fn sanitise_number(input: &str) -> f64 {
    let trimmed = input.trim();
    let trimmed = trimmed.strip_suffix('%').unwrap_or(trimmed);
    let cleaned: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-'))
        .collect();
    cleaned.parse::<f64>().unwrap_or(f64::INFINITY)
}

/// Mirrors JavaScript's `Number.prototype.toExponential(digits)` so feedback
/// text stays stable across graders.
fn exponential(value: f64, digits: usize) -> String {
    let formatted = format!("{value:.digits$e}");
    // Rust writes `1.23e-4`; normalise to the `1.23e-4` / `1.23e+4` shape.
    if let Some(pos) = formatted.find('e') {
        let (mantissa, exp) = formatted.split_at(pos);
        let exp = &exp[1..];
        if exp.starts_with('-') {
            format!("{mantissa}e{exp}")
        } else {
            format!("{mantissa}e+{exp}")
        }
    } else {
        formatted
    }
}

// -- generators ------------------------------------------------------------

fn build_decimal_mix(rng: &mut SeededRng) -> ArithmeticItem {
    let a = range_float(rng, 120.0, 480.0, 3);
    let b = range_float(rng, 12.0, 98.0, 4);
    let c = range_float(rng, 6.0, 54.0, 4);
    let expression = format!("{a:.3} + {b:.4} - {c:.4}");
    let expected = format!("{:.4}", a + b - c);
    make_item(
        rng,
        expression,
        expected,
        "Balance millesimal additions and subtractions without losing precision.",
        0.0001,
    )
}

fn build_carry_trap(rng: &mut SeededRng) -> ArithmeticItem {
    let a = range_int(rng, 200_000, 799_999);
    let b = range_int(rng, 400_000, 899_999);
    let c = range_int(rng, 20_000, 95_000);
    let expression = format!("{a} - {b} - {c}");
    let expected = (a - b - c).to_string();
    make_item(
        rng,
        expression,
        expected,
        "Multi-stage borrowing across six digits including a negative outcome.",
        0.0,
    )
}

fn build_order_expression(rng: &mut SeededRng) -> ArithmeticItem {
    let a = range_int(rng, 3, 7);
    let b = range_int(rng, 4, 9);
    let c = range_int(rng, 2, 6);
    let d = range_int(rng, 3, 7);
    let e = range_int(rng, 5, 12);
    let radicand = e * e * 3;
    let expression = format!("(({a}^3 - {b} * {c}) / {d}) + sqrt({radicand})");
    let value = ((a.pow(3) - b * c) as f64) / d as f64 + (radicand as f64).sqrt();
    make_item(
        rng,
        expression,
        format!("{value:.3}"),
        "Nested exponents, division, and radicals demand strict order tracking.",
        0.0005,
    )
}

fn build_fraction_to_decimal(rng: &mut SeededRng) -> ArithmeticItem {
    let denominator = *pick(&[7_i64, 11, 13, 17, 19, 23], rng);
    let numerator = range_int(rng, 1, denominator - 1);
    let expression = format!("{numerator}/{denominator}");
    let expected = format!("{:.7}", numerator as f64 / denominator as f64);
    make_item(
        rng,
        expression,
        expected,
        "Convert awkward proper fractions to a seven-decimal expansion.",
        0.000_000_5,
    )
}

fn build_percentage(rng: &mut SeededRng) -> ArithmeticItem {
    let base = range_int(rng, 240, 960);
    let increase = *pick(&[18.75, 22.4, 27.5], rng);
    let decrease = *pick(&[9.5, 12.5, 16.75], rng);
    let expression = format!("Apply +{increase}% then -{decrease}% to {base}");
    let expected = format!(
        "{:.3}",
        base as f64 * (1.0 + increase / 100.0) * (1.0 - decrease / 100.0)
    );
    make_item(
        rng,
        expression,
        expected,
        "Sequential percentage adjustments; cubic-mill precision enforced.",
        0.001,
    )
}

fn build_mixed_operation(rng: &mut SeededRng) -> ArithmeticItem {
    let a = range_int(rng, 18, 54);
    let b = range_int(rng, 6, 12);
    let c = range_int(rng, 5, 11);
    let d = range_int(rng, 3, 9);
    let expression = format!("((({a} / {b})^2) + {c}/{d}) * {}", b - 1);
    let value = ((a as f64 / b as f64).powi(2) + c as f64 / d as f64) * (b - 1) as f64;
    make_item(
        rng,
        expression,
        format!("{value:.4}"),
        "Compound rational terms with a squared quotient amplified by scaling.",
        0.0005,
    )
}

fn build_power_root(rng: &mut SeededRng) -> ArithmeticItem {
    let base = *pick(&[3_i64, 5, 7, 11], rng);
    let power = range_int(rng, 3, 5);
    let multiplier = range_int(rng, 2, 6);
    let radical = base.pow(3) * multiplier;
    let expression = format!("{base}^{power} + cbrt({radical})");
    let value = (base as f64).powi(power as i32) + (radical as f64).cbrt();
    make_item(
        rng,
        expression,
        format!("{value:.5}"),
        "High powers combined with an exact cube-root evaluation.",
        0.00001,
    )
}

fn build_rounding(rng: &mut SeededRng) -> ArithmeticItem {
    let value = range_float(rng, 100.0, 999.0, 3);
    let expression = format!("Round {value} to three significant figures");
    let expected = round_to_sig_figs(value, 3);
    make_item(
        rng,
        expression,
        expected.to_string(),
        "Significant-figure rounding with potential carry propagation.",
        0.0001,
    )
}

fn round_to_sig_figs(value: f64, figures: i32) -> f64 {
    if value == 0.0 {
        return 0.0;
    }
    let magnitude = value.abs().log10().floor() as i32;
    let factor = 10f64.powi(figures - 1 - magnitude);
    (value * factor).round() / factor
}

fn make_item(
    rng: &mut SeededRng,
    expression: String,
    expected: String,
    rationale: &str,
    tolerance: f64,
) -> ArithmeticItem {
    ArithmeticItem {
        id: format!("B-{}", id_fragment(rng)),
        prompt: format!("Evaluate {expression}"),
        expression,
        expected,
        tolerance,
        rationale: rationale.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_item(expected: &str, tolerance: f64) -> ArithmeticItem {
        ArithmeticItem {
            id: "B-0001".into(),
            prompt: format!("Evaluate {expected}"),
            expression: expected.into(),
            expected: expected.into(),
            tolerance,
            rationale: "x".into(),
        }
    }

    fn answer(text: &str) -> ArithmeticResponse {
        ArithmeticResponse {
            item_id: "B-0001".into(),
            answer: text.into(),
        }
    }

    #[test]
    fn generation_is_deterministic() {
        let a = generate_arithmetic_section("carry-seed");
        let b = generate_arithmetic_section("carry-seed");
        assert_eq!(a, b);
    }

    #[test]
    fn section_has_eight_items_with_unique_ids() {
        let section = generate_arithmetic_section("composition");
        assert_eq!(section.items.len(), 8);
        let mut ids: Vec<&str> = section.items.iter().map(|i| i.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 8);
        assert!(ids.iter().all(|id| id.starts_with("B-")));
    }

    #[test]
    fn expected_answers_are_self_consistent() {
        // Every expected string must survive its own sanitiser.
        let section = generate_arithmetic_section("self-check");
        for item in &section.items {
            assert!(sanitise_number(&item.expected).is_finite(), "{}", item.expected);
        }
    }

    #[test]
    fn exact_answer_scores_one() {
        let item = sample_item("42.5000", 0.0001);
        let result = score_arithmetic_item(&item, Some(&answer("42.5")));
        assert_eq!(result.correctness, 1.0);
        assert_eq!(result.feedback.as_deref(), Some("Exact match achieved."));
    }

    #[test]
    fn tolerance_window_applies() {
        let item = sample_item("10.000", 0.01);
        assert_eq!(
            score_arithmetic_item(&item, Some(&answer("10.009"))).correctness,
            1.0
        );
        let outside = score_arithmetic_item(&item, Some(&answer("10.5")));
        assert!(outside.correctness < 1.0);
        assert!(outside.feedback.unwrap().contains("exceeds tolerance"));
    }

    #[test]
    fn near_miss_gets_partial_credit() {
        let item = sample_item("100", 0.0);
        let result = score_arithmetic_item(&item, Some(&answer("90")));
        assert!((result.correctness - 0.9).abs() < 1e-9);
        assert_eq!(result.delta, Some(10.0));
    }

    #[test]
    fn snap_threshold_rounds_up_to_one() {
        let item = sample_item("10000", 0.0);
        // difference of 1 over 10000 leaves correctness 0.9999 >= 0.999.
        let result = score_arithmetic_item(&item, Some(&answer("10001")));
        assert_eq!(result.correctness, 1.0);
    }

    #[test]
    fn unparseable_answer_scores_zero() {
        let item = sample_item("5", 0.0);
        let result = score_arithmetic_item(&item, Some(&answer("about five-ish")));
        assert_eq!(result.correctness, 0.0);
    }

    #[test]
    fn blank_and_missing_answers_score_zero() {
        let item = sample_item("5", 0.0);
        let blank = score_arithmetic_item(&item, Some(&answer("   ")));
        assert_eq!(blank.correctness, 0.0);
        assert_eq!(blank.feedback.as_deref(), Some("No answer submitted."));
        let missing = score_arithmetic_item(&item, None);
        assert_eq!(missing.correctness, 0.0);
        assert!(missing.delta.is_none());
    }

    #[test]
    fn percent_suffix_and_units_are_stripped()  {
        assert_eq!(sanitise_number(" 42% "), 42.0);
        assert_eq!(sanitise_number("-17.5 kg"), -17.5);
        assert_eq!(sanitise_number("roughly 3.14"), 3.14);
        assert!(sanitise_number("n/a").is_infinite());
    }

    #[test]
    fn sig_fig_rounding() {
        assert_eq!(round_to_sig_figs(123.456, 3), 123.0);
        assert_eq!(round_to_sig_figs(999.6, 3), 1000.0);
        assert_eq!(round_to_sig_figs(105.5, 3), 106.0);
        assert_eq!(round_to_sig_figs(0.0, 3), 0.0);
    }

    #[test]
    fn grading_averages_item_correctness() {
        let section = generate_arithmetic_section("grading");
        let responses: Vec<ArithmeticResponse> = section
            .items
            .iter()
            .map(|item| ArithmeticResponse {
                item_id: item.id.clone(),
                answer: item.expected.clone(),
            })
            .collect();
        let score = grade_arithmetic_section(&section, &responses);
        assert_eq!(score.overall, 1.0);

        let empty = grade_arithmetic_section(&section, &[]);
        assert_eq!(empty.overall, 0.0);
        assert_eq!(empty.items.len(), 8);
    }
}
