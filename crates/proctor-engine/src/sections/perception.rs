//! Section D — perception and memory.
//!
//! Five scenarios are drawn from six narrative builders. Each builder writes
//! a dense scene description and a single recall question whose answer is
//! stated somewhere in the scene.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::rng::{id_fragment, shuffle, SeededRng};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerceptionItem {
    pub id: String,
    pub scenario: String,
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub rationale: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerceptionSection {
    pub label: String,
    pub duration_seconds: u32,
    pub description: String,
    pub items: Vec<PerceptionItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerceptionResponse {
    pub item_id: String,
    pub selected_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerceptionItemResult {
    pub item_id: String,
    pub correctness: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerceptionSectionScore {
    pub overall: f64,
    pub items: Vec<PerceptionItemResult>,
}

pub fn generate_perception_section(seed: &str) -> PerceptionSection {
    let mut rng = SeededRng::new(&format!("perception-{seed}"));
    let builders = shuffle(&SCENARIO_BUILDERS, &mut rng);
    let items: Vec<PerceptionItem> = builders
        .iter()
        .take(5)
        .map(|builder| {
            let scenario = builder(&mut rng);
            PerceptionItem {
                id: format!("D-{}", id_fragment(&mut rng)),
                scenario: scenario.scene,
                question: scenario.question,
                options: scenario.options,
                correct_index: scenario.correct_index,
                rationale: scenario.rationale,
            }
        })
        .collect();

    tracing::debug!(item_count = items.len(), "generated perception section");

    PerceptionSection {
        label: "Perception & Memory".to_string(),
        duration_seconds: 150,
        description: "Recall high-entropy visual details from compressed descriptions.".to_string(),
        items,
    }
}

pub fn grade_perception_section(
    section: &PerceptionSection,
    responses: &[PerceptionResponse],
) -> PerceptionSectionScore {
    let response_map: HashMap<&str, &PerceptionResponse> = responses
        .iter()
        .map(|r| (r.item_id.as_str(), r))
        .collect();

    let items: Vec<PerceptionItemResult> = section
        .items
        .iter()
        .map(|item| match response_map.get(item.id.as_str()) {
            None => PerceptionItemResult {
                item_id: item.id.clone(),
                correctness: 0.0,
                feedback: Some("No answer provided.".to_string()),
            },
            Some(response) => {
                let correct = response.selected_index == item.correct_index;
                PerceptionItemResult {
                    item_id: item.id.clone(),
                    correctness: if correct { 1.0 } else { 0.0 },
                    feedback: Some(if correct {
                        "Detail recalled precisely.".to_string()
                    } else {
                        item.rationale.clone()
                    }),
                }
            }
        })
        .collect();

    let overall = if items.is_empty() {
        0.0
    } else {
        items.iter().map(|r| r.correctness).sum::<f64>() / items.len() as f64
    };

    PerceptionSectionScore { overall, items }
}

// -- scenario builders -------------------------------------------------------

struct Scenario {
    scene: String,
    question: String,
    options: Vec<String>,
    correct_index: usize,
    rationale: String,
}

type ScenarioBuilder = fn(&mut SeededRng) -> Scenario;

static SCENARIO_BUILDERS: [ScenarioBuilder; 6] = [
    build_pulse_scenario,
    build_drone_scenario,
    build_glyph_scenario,
    build_thermal_scenario,
    build_matrix_glitch_scenario,
    build_channel_scenario,
];

fn ordinal_word(index: usize) -> String {
    const WORDS: [&str; 7] = [
        "first", "second", "third", "fourth", "fifth", "sixth", "seventh",
    ];
    WORDS
        .get(index)
        .map_or_else(|| format!("{}th", index + 1), |w| (*w).to_string())
}

fn format_coordinate(row: usize, col: usize) -> String {
    format!("({},{})", row + 1, col + 1)
}

fn build_options(
    rng: &mut SeededRng,
    correct: String,
    distractors: Vec<String>,
) -> (Vec<String>, usize) {
    let mut pool = vec![correct.clone()];
    pool.extend(distractors);
    let options = shuffle(&pool, rng);
    let correct_index = options.iter().position(|o| *o == correct).unwrap_or(0);
    (options, correct_index)
}

fn build_pulse_scenario(rng: &mut SeededRng) -> Scenario {
    let colors = shuffle(
        &[
            "amber",
            "cobalt",
            "cerise",
            "chartreuse",
            "ultramarine",
            "vermillion",
            "saffron",
        ],
        rng,
    );
    let amplitudes = shuffle(
        &["0.6 kPa", "0.8 kPa", "1.1 kPa", "1.4 kPa", "1.7 kPa", "2.1 kPa"],
        rng,
    );
    let count = 5 + rng.int(2);
    let pulses: Vec<(String, &str, &str)> = (0..count)
        .map(|index| {
            (
                format!("τ{}", index + 1),
                colors[index % colors.len()],
                amplitudes[index % amplitudes.len()],
            )
        })
        .collect();
    let tone_index = rng.int(pulses.len());
    let tone_pulse = &pulses[tone_index];
    let sequence = pulses
        .iter()
        .map(|(label, color, magnitude)| format!("{label} {color} ({magnitude})"))
        .collect::<Vec<_>>()
        .join(", ");

    let other_labels: Vec<String> = pulses
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != tone_index)
        .map(|(_, (label, color, _))| format!("{label} • {color}"))
        .collect();
    let distractors: Vec<String> = shuffle(&other_labels, rng).into_iter().take(3).collect();
    let correct_label = format!("{} • {}", tone_pulse.0, tone_pulse.1);
    let rationale = format!(
        "{} ({}) alone exceeded the sync threshold, as narrated in the sequence description.",
        tone_pulse.0, tone_pulse.1
    );
    let scene = format!(
        "A telemetry ribbon streams {} pulses labelled τ1–τ{}: {}. Only one pulse crosses the Authority sync threshold, emitting the distinctive chime at {}.",
        pulses.len(),
        pulses.len(),
        sequence,
        tone_pulse.2
    );
    let (options, correct_index) = build_options(rng, correct_label, distractors);

    Scenario {
        scene,
        question: "Which pulse triggered the sync tone?".to_string(),
        options,
        correct_index,
        rationale,
    }
}

fn build_drone_scenario(rng: &mut SeededRng) -> Scenario {
    let directions = shuffle(&["north", "east", "south", "west"], rng);
    let beacons = shuffle(
        &["amber beacon", "violet strobe", "infrared wash", "cobalt bar"],
        rng,
    );
    let behaviours = shuffle(
        &[
            "holds altitude",
            "yaws 12° left",
            "drops 3 m then recovers",
            "runs a diagnostic spin",
        ],
        rng,
    );
    let anomaly_index = rng.int(directions.len());
    let anomaly_direction = directions[anomaly_index];

    let scene_lines: Vec<String> = directions
        .iter()
        .enumerate()
        .map(|(idx, direction)| {
            let mut chars = direction.chars();
            let capitalised = match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            };
            format!(
                "{capitalised} drone flashes the {} and {}.",
                beacons[idx], behaviours[idx]
            )
        })
        .collect();

    let correct_label = format!(
        "{} • {}",
        anomaly_direction.to_uppercase(),
        beacons[anomaly_index]
    );
    let distractors: Vec<String> = directions
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != anomaly_index)
        .take(3)
        .map(|(idx, direction)| format!("{} • {}", direction.to_uppercase(), beacons[idx]))
        .collect();
    let rationale = format!(
        "The {anomaly_direction} drone alone performed the emergency yaw, described alongside its {}.",
        beacons[anomaly_index]
    );
    let scene = format!(
        "Four drones hold a square surveillance stack. {} The Authority operator flags the drone that initiated the emergency yaw routine.",
        scene_lines.join(" ")
    );
    let (options, correct_index) = build_options(rng, correct_label, distractors);

    Scenario {
        scene,
        question: "Which drone executed the emergency yaw?".to_string(),
        options,
        correct_index,
        rationale,
    }
}

fn build_glyph_scenario(rng: &mut SeededRng) -> Scenario {
    let glyphs = shuffle(
        &["triangle", "rhombus", "pentagon", "spiral", "hexagon", "hourglass"],
        rng,
    );
    let accents = shuffle(
        &["glowing", "outlined", "shadowed", "striped", "blinking", "translucent"],
        rng,
    );
    let sequence: Vec<(&str, &str)> = (0..6)
        .map(|idx| (glyphs[idx % glyphs.len()], accents[idx % accents.len()]))
        .collect();
    let removed_index = rng.int(sequence.len());
    let (removed_glyph, removed_accent) = sequence[removed_index];
    let stream = sequence
        .iter()
        .enumerate()
        .map(|(idx, (glyph, accent))| format!("{} glyph {accent} {glyph}", ordinal_word(idx)))
        .collect::<Vec<_>>()
        .join("; ");

    let correct_label = format!(
        "{} • {removed_accent} {removed_glyph}",
        ordinal_word(removed_index)
    );
    let other_labels: Vec<String> = sequence
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != removed_index)
        .map(|(idx, (glyph, accent))| format!("{} • {accent} {glyph}", ordinal_word(idx)))
        .collect();
    let distractors: Vec<String> = shuffle(&other_labels, rng).into_iter().take(3).collect();
    let rationale = format!(
        "The narrative explicitly states the removed glyph as the {removed_accent} {removed_glyph} appearing in the {} slot.",
        ordinal_word(removed_index)
    );
    let scene = format!(
        "A glyph carousel flashes six symbols in 400 ms sweeps: {stream}. The third sweep removes one glyph altogether before the loop restarts."
    );
    let (options, correct_index) = build_options(rng, correct_label, distractors);

    Scenario {
        scene,
        question: "Which glyph vanished during the sweep?".to_string(),
        options,
        correct_index,
        rationale,
    }
}

fn build_thermal_scenario(rng: &mut SeededRng) -> Scenario {
    let path_length = 5 + rng.int(2);
    let mut row = rng.int(2);
    let mut col = rng.int(2);
    let mut path = Vec::with_capacity(path_length);
    for step in 0..path_length {
        if step > 0 {
            if rng.int(2) == 0 {
                row += 1;
            } else {
                col += 1;
            }
        }
        path.push((row, col));
    }
    let trigger_index = path.len() - 1;
    let path_narrative = path
        .iter()
        .enumerate()
        .map(|(idx, (r, c))| {
            let prefix = if idx == trigger_index {
                "cooling fan engage at "
            } else {
                ""
            };
            format!("{prefix}{}", format_coordinate(*r, *c))
        })
        .collect::<Vec<_>>()
        .join(" → ");

    let coordinate_labels: Vec<String> = path
        .iter()
        .enumerate()
        .map(|(idx, (r, c))| {
            let kind = if idx == trigger_index { "Vent" } else { "Footstep" };
            format!("{kind} • {}", format_coordinate(*r, *c))
        })
        .collect();
    let other_labels: Vec<String> = coordinate_labels
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != trigger_index)
        .map(|(_, label)| label.clone())
        .collect();
    let distractors: Vec<String> = shuffle(&other_labels, rng).into_iter().take(3).collect();
    let correct_label = coordinate_labels[trigger_index].clone();
    let rationale = format!(
        "The cooling event is tied to the last logged coordinate {correct_label}."
    );
    let scene = format!(
        "Thermal residue footprints are logged as the specimen crosses the deck: {path_narrative}. Authority ventilation activates precisely when the final hot print lands."
    );
    let (options, correct_index) = build_options(rng, correct_label, distractors);

    Scenario {
        scene,
        question: "At which coordinate did the fan activate?".to_string(),
        options,
        correct_index,
        rationale,
    }
}

fn build_matrix_glitch_scenario(rng: &mut SeededRng) -> Scenario {
    let dimension = 4;
    let malfunction_row = rng.int(dimension);
    let malfunction_col = rng.int(dimension);
    let cycles = shuffle(
        &["all-on", "alternating", "checkerboard", "columnar pulse"],
        rng,
    );
    let malfunction_coordinate = format_coordinate(malfunction_row, malfunction_col);
    let scene = format!(
        "A {dimension}×{dimension} light matrix cycles {} before one diode hard-fails. During cycle five the diode at {malfunction_coordinate} drops to zero while the rest continue their programmed states.",
        cycles.join(" → ")
    );

    let correct_label = format!("Diode • {malfunction_coordinate}");
    let mut coordinates: Vec<String> = Vec::new();
    while coordinates.len() < 3 {
        let candidate_row = rng.int(dimension);
        let candidate_col = rng.int(dimension);
        let label = format!("Diode • {}", format_coordinate(candidate_row, candidate_col));
        if label != correct_label && !coordinates.contains(&label) {
            coordinates.push(label);
        }
    }

    let rationale = format!("Cycle narration names {correct_label} as the diode that collapsed to zero.");
    let (options, correct_index) = build_options(rng, correct_label, coordinates);

    Scenario {
        scene,
        question: "Which diode failed during the glitch cycle?".to_string(),
        options,
        correct_index,
        rationale,
    }
}

fn build_channel_scenario(rng: &mut SeededRng) -> Scenario {
    let channels = shuffle(&["Alpha", "Beta", "Gamma", "Delta"], rng);
    let deviations = shuffle(&["+4.2σ", "+1.3σ", "-0.9σ", "+2.1σ"], rng);
    let noise_floors = shuffle(&["-64 dB", "-68 dB", "-59 dB", "-71 dB"], rng);
    let spike_index = rng.int(channels.len());
    let spike_channel = channels[spike_index];
    let log = channels
        .iter()
        .enumerate()
        .map(|(idx, channel)| {
            format!(
                "{channel} channel idled at {} then drifted {}.",
                noise_floors[idx], deviations[idx]
            )
        })
        .collect::<Vec<_>>()
        .join(" ");

    let correct_label = format!("{spike_channel} • {}", deviations[spike_index]);
    let other_labels: Vec<String> = channels
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != spike_index)
        .map(|(idx, channel)| format!("{channel} • {}", deviations[idx]))
        .collect();
    let distractors: Vec<String> = shuffle(&other_labels, rng).into_iter().take(3).collect();
    let rationale = format!(
        "{spike_channel} reported the standout deviation {}, triggering the overlay.",
        deviations[spike_index]
    );
    let scene = format!(
        "Console log: {log} Authority overlay arrows the channel breaching the escalation threshold."
    );
    let (options, correct_index) = build_options(rng, correct_label, distractors);

    Scenario {
        scene,
        question: "Which channel breached the escalation threshold?".to_string(),
        options,
        correct_index,
        rationale,
    }
}
