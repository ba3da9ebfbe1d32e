//! Section A — language: spelling, cloze, analogies, micro-writing.
//!
//! Items are drawn from four static sub-banks. Every multiple-choice option
//! list is shuffled at generation time and the correct index is recorded
//! after the shuffle, so generation and grading can never disagree.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::rng::{id_fragment, pick, shuffle, to_base36, SeededRng};
use crate::text::{normalize_words, split_sentences, CoherenceModel, LexicalCoherence};

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellingItem {
    pub id: String,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub rationale: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClozeItem {
    pub id: String,
    pub prompt: String,
    pub text_with_blanks: String,
    pub options_per_blank: Vec<Vec<String>>,
    pub correct_indices: Vec<usize>,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalogyItem {
    pub id: String,
    pub prompt: String,
    pub stem: (String, String),
    pub choices: Vec<(String, String)>,
    pub correct_index: usize,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MicroWriteItem {
    pub id: String,
    pub prompt: String,
    pub constraints: MicroWriteConstraints,
    pub rubric: WritingRubric,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MicroWriteConstraints {
    pub max_words: usize,
    pub must_include: Vec<String>,
    pub style_hint: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WritingRubric {
    pub min_coherence_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LanguageItem {
    Spelling(SpellingItem),
    Cloze(ClozeItem),
    Analogy(AnalogyItem),
    Microwrite(MicroWriteItem),
}

impl LanguageItem {
    pub fn id(&self) -> &str {
        match self {
            LanguageItem::Spelling(item) => &item.id,
            LanguageItem::Cloze(item) => &item.id,
            LanguageItem::Analogy(item) => &item.id,
            LanguageItem::Microwrite(item) => &item.id,
        }
    }

    pub fn kind(&self) -> LanguageKind {
        match self {
            LanguageItem::Spelling(_) => LanguageKind::Spelling,
            LanguageItem::Cloze(_) => LanguageKind::Cloze,
            LanguageItem::Analogy(_) => LanguageKind::Analogy,
            LanguageItem::Microwrite(_) => LanguageKind::Microwrite,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageKind {
    Spelling,
    Cloze,
    Analogy,
    Microwrite,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageSection {
    pub label: String,
    pub duration_seconds: u32,
    pub description: String,
    pub items: Vec<LanguageItem>,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellingResponse {
    pub item_id: String,
    pub selected_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClozeResponse {
    pub item_id: String,
    pub selected_indices: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalogyResponse {
    pub item_id: String,
    pub selected_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MicroWriteResponse {
    pub item_id: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum LanguageResponse {
    Spelling(SpellingResponse),
    Cloze(ClozeResponse),
    Analogy(AnalogyResponse),
    Microwrite(MicroWriteResponse),
}

impl LanguageResponse {
    pub fn item_id(&self) -> &str {
        match self {
            LanguageResponse::Spelling(r) => &r.item_id,
            LanguageResponse::Cloze(r) => &r.item_id,
            LanguageResponse::Analogy(r) => &r.item_id,
            LanguageResponse::Microwrite(r) => &r.item_id,
        }
    }
}

// ---------------------------------------------------------------------------
// Scores
// ---------------------------------------------------------------------------

/// Item-level scoring output, exposed standalone for re-scoring and tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageScore {
    pub correctness: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<WritingDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WritingDetails {
    pub word_count: usize,
    pub missing_tokens: Vec<String>,
    pub coherence_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageItemResult {
    pub item_id: String,
    #[serde(rename = "type")]
    pub kind: LanguageKind,
    pub correctness: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<WritingDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LanguageSectionScore {
    pub overall: f64,
    pub items: Vec<LanguageItemResult>,
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

pub fn generate_language_section(seed: &str) -> LanguageSection {
    let mut rng = SeededRng::new(&format!("lang-{seed}"));
    let mut items = Vec::new();
    let mut counter: u64 = 0;

    let spelling = shuffle(&SPELLING_BANK, &mut rng);
    let cloze = shuffle(&CLOZE_BANK, &mut rng);
    let analogies = shuffle(&ANALOGY_BANK, &mut rng);
    let micro = *pick(&MICRO_WRITING_BANK, &mut rng);

    for entry in spelling.iter().take(3) {
        let mut pool = vec![entry.correct];
        pool.extend_from_slice(&entry.distractors);
        let options = shuffle(&pool, &mut rng);
        let correct_index = options
            .iter()
            .position(|o| *o == entry.correct)
            .unwrap_or(0);
        items.push(LanguageItem::Spelling(SpellingItem {
            id: language_item_id(&mut counter, &mut rng),
            prompt: entry.prompt.to_string(),
            options: options.iter().map(|o| o.to_string()).collect(),
            correct_index,
            rationale: entry.rationale.to_string(),
        }));
    }

    for entry in cloze.iter().take(3) {
        let mut options_per_blank = Vec::with_capacity(entry.options_per_blank.len());
        let mut correct_indices = Vec::with_capacity(entry.options_per_blank.len());
        for (blank, options) in entry.options_per_blank.iter().enumerate() {
            let correct_option = options[entry.correct_indices[blank]];
            let shuffled = shuffle(options, &mut rng);
            let tracked = shuffled
                .iter()
                .position(|o| *o == correct_option)
                .unwrap_or(0);
            options_per_blank.push(shuffled.iter().map(|o| o.to_string()).collect());
            correct_indices.push(tracked);
        }
        items.push(LanguageItem::Cloze(ClozeItem {
            id: language_item_id(&mut counter, &mut rng),
            prompt: entry.prompt.to_string(),
            text_with_blanks: entry.text.to_string(),
            options_per_blank,
            correct_indices,
            explanation: entry.explanation.to_string(),
        }));
    }

    for entry in analogies.iter().take(2) {
        let mut pool = vec![entry.correct];
        pool.extend_from_slice(&entry.distractors);
        let choices = shuffle(&pool, &mut rng);
        let correct_index = choices
            .iter()
            .position(|c| *c == entry.correct)
            .unwrap_or(0);
        items.push(LanguageItem::Analogy(AnalogyItem {
            id: language_item_id(&mut counter, &mut rng),
            prompt: entry.prompt.to_string(),
            stem: (entry.stem.0.to_string(), entry.stem.1.to_string()),
            choices: choices
                .iter()
                .map(|(a, b)| (a.to_string(), b.to_string()))
                .collect(),
            correct_index,
            explanation: entry.explanation.to_string(),
        }));
    }

    items.push(LanguageItem::Microwrite(MicroWriteItem {
        id: language_item_id(&mut counter, &mut rng),
        prompt: micro.prompt.to_string(),
        constraints: MicroWriteConstraints {
            max_words: micro.max_words,
            must_include: micro.must_include.iter().map(|t| t.to_string()).collect(),
            style_hint: micro.style_hint.to_string(),
        },
        rubric: WritingRubric {
            min_coherence_score: micro.min_coherence,
        },
    }));

    tracing::debug!(item_count = items.len(), "generated language section");

    LanguageSection {
        label: "Language as Statistical Mastery".to_string(),
        duration_seconds: 150,
        description:
            "Assesses spelling robustness, grammatical reasoning, analogies, and concise constrained writing."
                .to_string(),
        items,
    }
}

fn language_item_id(counter: &mut u64, rng: &mut SeededRng) -> String {
    let index = *counter;
    *counter += 1;
    format!("A-{}-{}", to_base36(index), id_fragment(rng))
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Score one language item against an optional response. Missing, miskeyed,
/// or type-mismatched responses score 0 and never fail.
pub fn score_language_item(
    item: &LanguageItem,
    response: Option<&LanguageResponse>,
) -> LanguageScore {
    let Some(response) = response else {
        return no_valid_response();
    };
    if response.item_id() != item.id() {
        return no_valid_response();
    }

    match (item, response) {
        (LanguageItem::Spelling(item), LanguageResponse::Spelling(response)) => {
            score_spelling(item, response)
        }
        (LanguageItem::Cloze(item), LanguageResponse::Cloze(response)) => {
            score_cloze(item, response)
        }
        (LanguageItem::Analogy(item), LanguageResponse::Analogy(response)) => {
            score_analogy(item, response)
        }
        (LanguageItem::Microwrite(item), LanguageResponse::Microwrite(response)) => {
            score_microwrite(item, response, &LexicalCoherence)
        }
        _ => no_valid_response(),
    }
}

pub fn grade_language_section(
    section: &LanguageSection,
    responses: &[LanguageResponse],
) -> LanguageSectionScore {
    let response_map: HashMap<&str, &LanguageResponse> =
        responses.iter().map(|r| (r.item_id(), r)).collect();

    let items: Vec<LanguageItemResult> = section
        .items
        .iter()
        .map(|item| {
            let score = score_language_item(item, response_map.get(item.id()).copied());
            LanguageItemResult {
                item_id: item.id().to_string(),
                kind: item.kind(),
                correctness: score.correctness,
                feedback: score.feedback,
                details: score.details,
            }
        })
        .collect();

    let overall = if items.is_empty() {
        0.0
    } else {
        items.iter().map(|r| r.correctness).sum::<f64>() / items.len() as f64
    };

    LanguageSectionScore { overall, items }
}

fn no_valid_response() -> LanguageScore {
    LanguageScore {
        correctness: 0.0,
        feedback: Some("No valid response submitted.".to_string()),
        details: None,
    }
}

fn score_spelling(item: &SpellingItem, response: &SpellingResponse) -> LanguageScore {
    let correct = response.selected_index == item.correct_index;
    LanguageScore {
        correctness: if correct { 1.0 } else { 0.0 },
        feedback: Some(
            if correct {
                "Accurate spelling recognised."
            } else {
                "Incorrect spelling selected."
            }
            .to_string(),
        ),
        details: None,
    }
}

fn score_cloze(item: &ClozeItem, response: &ClozeResponse) -> LanguageScore {
    let selections = &response.selected_indices;
    if selections.len() != item.correct_indices.len() {
        return LanguageScore {
            correctness: 0.0,
            feedback: Some("Incomplete response submitted.".to_string()),
            details: None,
        };
    }

    let matched = selections
        .iter()
        .zip(&item.correct_indices)
        .filter(|(choice, expected)| choice == expected)
        .count();
    let all_correct = matched == item.correct_indices.len();
    let correctness = if all_correct {
        1.0
    } else {
        matched as f64 / item.correct_indices.len() as f64
    };

    LanguageScore {
        correctness,
        feedback: Some(
            if all_correct {
                "Sentence restored perfectly."
            } else {
                "Partial grammatical accuracy achieved."
            }
            .to_string(),
        ),
        details: None,
    }
}

fn score_analogy(item: &AnalogyItem, response: &AnalogyResponse) -> LanguageScore {
    let correct = response.selected_index == item.correct_index;
    LanguageScore {
        correctness: if correct { 1.0 } else { 0.0 },
        feedback: Some(
            if correct {
                "Analogical mapping preserved."
            } else {
                "Relationship misidentified."
            }
            .to_string(),
        ),
        details: None,
    }
}

fn score_microwrite(
    item: &MicroWriteItem,
    response: &MicroWriteResponse,
    model: &dyn CoherenceModel,
) -> LanguageScore {
    let cleaned = response.text.trim();
    if cleaned.is_empty() {
        return LanguageScore {
            correctness: 0.0,
            feedback: Some("No writing provided.".to_string()),
            details: None,
        };
    }

    let words = normalize_words(cleaned);
    let word_count = words.len();
    let within_limit = word_count > 0 && word_count <= item.constraints.max_words;

    let lowered = cleaned.to_lowercase();
    let missing_tokens: Vec<String> = item
        .constraints
        .must_include
        .iter()
        .filter(|token| !lowered.contains(&token.to_lowercase()))
        .cloned()
        .collect();

    let sentence_count = split_sentences(cleaned).len().max(1);
    let coherence_score = model.coherence(&words, sentence_count);

    let (correctness, feedback) = if !within_limit {
        (
            0.0,
            format!(
                "Exceeded word limit ({word_count}/{}).",
                item.constraints.max_words
            ),
        )
    } else {
        let tokens_met = missing_tokens.is_empty();
        let meets_coherence = coherence_score >= item.rubric.min_coherence_score;
        match (tokens_met, meets_coherence) {
            (true, true) => (1.0, "Constraints satisfied with coherent phrasing.".to_string()),
            (false, true) => (
                if missing_tokens.len() == 1 { 0.5 } else { 0.25 },
                format!("Missing required tokens: {}.", missing_tokens.join(", ")),
            ),
            (true, false) => (
                0.5,
                "Required terms present, but coherence threshold not met.".to_string(),
            ),
            (false, false) => (
                0.2,
                format!(
                    "Missing required tokens ({}) and coherence below threshold.",
                    missing_tokens.join(", ")
                ),
            ),
        }
    };

    LanguageScore {
        correctness,
        feedback: Some(feedback),
        details: Some(WritingDetails {
            word_count,
            missing_tokens,
            coherence_score,
        }),
    }
}

// ---------------------------------------------------------------------------
// Banks
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct SpellingEntry {
    prompt: &'static str,
    correct: &'static str,
    distractors: [&'static str; 3],
    rationale: &'static str,
}

#[derive(Debug, Clone, Copy)]
struct ClozeEntry {
    prompt: &'static str,
    text: &'static str,
    options_per_blank: [[&'static str; 4]; 3],
    correct_indices: [usize; 3],
    explanation: &'static str,
}

#[derive(Debug, Clone, Copy)]
struct AnalogyEntry {
    prompt: &'static str,
    stem: (&'static str, &'static str),
    correct: (&'static str, &'static str),
    distractors: [(&'static str, &'static str); 3],
    explanation: &'static str,
}

#[derive(Debug, Clone, Copy)]
struct MicroWriteTemplate {
    prompt: &'static str,
    max_words: usize,
    must_include: [&'static str; 3],
    style_hint: &'static str,
    min_coherence: f64,
}

static SPELLING_BANK: [SpellingEntry; 6] = [
    SpellingEntry {
        prompt: "Select the correctly spelled term for commentary issued far beyond one’s remit.",
        correct: "ultracrepidarian",
        distractors: ["ultracrepedarian", "ultracrepidarium", "ultracreppidarian"],
        rationale: "The Latin root “crepida” keeps the “i”; only “-arian” closes the construction.",
    },
    SpellingEntry {
        prompt: "Choose the spelling the Authority assigns to an ornamental leaning note.",
        correct: "appoggiatura",
        distractors: ["apoggiatura", "appogiatura", "appoggiatoura"],
        rationale: "Italian orthography doubles the “pp” and “g”; the ending is the bare “-tura”.",
    },
    SpellingEntry {
        prompt: "Identify the precise spelling for rote, parroted language flagged in reports.",
        correct: "psittacism",
        distractors: ["psittacysm", "psitacism", "psitticism"],
        rationale: "Borrowed from Latin “psittacus”, the central cluster is “-tac-” followed by “-ism”.",
    },
    SpellingEntry {
        prompt: "Pick the exact term used for dismissing data as worthless.",
        correct: "floccinaucinihilipilification",
        distractors: [
            "floccinaucinihilipilofication",
            "floccinaucinilihilipilification",
            "floccinaucinihilipilifcation",
        ],
        rationale: "The classical compound retains each mini-root once; no extra vowels or missing syllables appear.",
    },
    SpellingEntry {
        prompt: "Select the accurate spelling for intense, rule-bound desire patterns.",
        correct: "concupiscence",
        distractors: ["concupesence", "concupisciense", "concupiscance"],
        rationale: "The Latin “-scere” yields “-scence”; only one “s” divides the final syllables.",
    },
    SpellingEntry {
        prompt: "Choose the correct label the Authority applies to sleight-of-hand briefings.",
        correct: "legerdemain",
        distractors: ["legardemain", "legerdemein", "legerdemane"],
        rationale: "French “léger de main” contracts to “legerdemain”; the “de” syllable stays intact.",
    },
];

static CLOZE_BANK: [ClozeEntry; 5] = [
    ClozeEntry {
        prompt: "Resolve the conditional phrasing in the escalation protocol.",
        text: "If the adjudication panel [1] lexical drift, it would [2] deployment unless linguists [3] the corpus.",
        options_per_blank: [
            ["detects", "detected", "detect", "was detecting"],
            ["suspend", "suspends", "suspending", "suspended"],
            ["certify", "certified", "will certify", "certifying"],
        ],
        correct_indices: [1, 0, 0],
        explanation: "Past-tense “detected” aligns with the conditional “would suspend”; the subordinate clause keeps the bare infinitive “certify”.",
    },
    ClozeEntry {
        prompt: "Complete the directive issued after the rhetoric audit.",
        text: "The calibration memo [1] that reviewers [2] hedging unless evidence [3] it outright.",
        options_per_blank: [
            ["insists", "insisted", "insist", "insisting"],
            ["avoid", "avoids", "avoided", "avoiding"],
            ["contradicts", "contradicted", "would contradict", "contradicting"],
        ],
        correct_indices: [1, 0, 1],
        explanation: "Past-tense reporting verb “insisted” triggers the subjunctive “avoid”, while the final clause requires simple past “contradicted”.",
    },
    ClozeEntry {
        prompt: "Restore the clause describing archival chain of custody.",
        text: "Although the summary [1] contested, the panel required it [2] accessible until archivists [3] replacements.",
        options_per_blank: [
            ["was", "were", "being", "been"],
            ["remain", "remains", "remaining", "remained"],
            ["delivered", "deliver", "had delivered", "delivering"],
        ],
        correct_indices: [0, 0, 0],
        explanation: "Singular “summary” governs “was”; the mandate uses base-form “remain”; a simple past “delivered” closes the timeline.",
    },
    ClozeEntry {
        prompt: "Fill in the live-transcription guidance for human monitors.",
        text: "While the intake bot [1] candidate phrases, supervisors [2] the outputs so any drift [3] annotated.",
        options_per_blank: [
            ["suggested", "suggests", "suggesting", "suggest"],
            ["sanitize", "sanitise", "sanitised", "sanitising"],
            ["was", "were", "is", "be"],
        ],
        correct_indices: [1, 0, 2],
        explanation: "Present-progressive scene keeps “suggests”; supervisors act with imperative “sanitize”; present “is” matches the clause “drift is annotated”.",
    },
    ClozeEntry {
        prompt: "Finish the instruction for testimony summarisation.",
        text: "The tribunal expects witnesses [1] succinctly and [2] qualifiers when testimony [3] certainty.",
        options_per_blank: [
            ["to speak", "speaking", "speak", "spoken"],
            ["discard", "discards", "discarded", "discarding"],
            ["signals", "signalled", "signal", "signalling"],
        ],
        correct_indices: [0, 0, 0],
        explanation: "Infinitive “to speak” pairs with verb “discard”; present “signals” matches singular “testimony”.",
    },
];

static ANALOGY_BANK: [AnalogyEntry; 4] = [
    AnalogyEntry {
        prompt: "Choose the pair that preserves the linguistic hierarchy.",
        stem: ("orthography", "spelling"),
        correct: ("phonology", "pronunciation"),
        distractors: [
            ("syntax", "sentence"),
            ("semantics", "meaning"),
            ("morphology", "affix"),
        ],
        explanation: "Orthography governs visible spelling in the same way phonology governs audible pronunciation.",
    },
    AnalogyEntry {
        prompt: "Select the pair that mirrors unit-to-structure assembly.",
        stem: ("morpheme", "word"),
        correct: ("nucleotide", "gene"),
        distractors: [
            ("vector", "matrix"),
            ("pixel", "display"),
            ("dataset", "query"),
        ],
        explanation: "Morphemes combine to form words just as nucleotides combine to form genes.",
    },
    AnalogyEntry {
        prompt: "Complete the rhetorical balance analogy.",
        stem: ("litotes", "understatement"),
        correct: ("hyperbole", "exaggeration"),
        distractors: [
            ("metaphor", "comparison"),
            ("allusion", "reference"),
            ("ellipsis", "omission"),
        ],
        explanation: "Litotes is a deliberate understatement just as hyperbole is a deliberate exaggeration.",
    },
    AnalogyEntry {
        prompt: "Link the governance relationship noted in policy briefs.",
        stem: ("grammar", "syntax"),
        correct: ("law", "statute"),
        distractors: [
            ("theory", "experiment"),
            ("algorithm", "runtime"),
            ("archive", "record"),
        ],
        explanation: "Syntax is a subsystem within grammar just as a statute is a specific instrument within law.",
    },
];

static MICRO_WRITING_BANK: [MicroWriteTemplate; 3] = [
    MicroWriteTemplate {
        prompt: "Deliver a 32-word briefing to the Authority summarising language reliability metrics. Include each required term and heed the style guidance.",
        max_words: 32,
        must_include: ["polysemy", "entropy", "orthography"],
        style_hint: "Maintain a clipped intelligence-register that references analytic dashboards.",
        min_coherence: 0.65,
    },
    MicroWriteTemplate {
        prompt: "In no more than 28 words, report how the discourse review surfaced problematic turns. Use the mandated lexicon.",
        max_words: 28,
        must_include: ["pragmatics", "anomaly", "telemetry"],
        style_hint: "Adopt a formal research voice and outline the next diagnostic step.",
        min_coherence: 0.6,
    },
    MicroWriteTemplate {
        prompt: "Summarise, in 30 words or fewer, why the Authority is elevating its verbal difficulty profile. Respect every inclusion requirement.",
        max_words: 30,
        must_include: ["analogy", "benchmark", "stringency"],
        style_hint: "Write as if briefing a standards council contemplating tougher evaluations.",
        min_coherence: 0.68,
    },
];
