//! Section C — grid reasoning.
//!
//! Each item shows three input/output grid pairs produced by one of six
//! composed transformations; the taker picks the rule description that
//! explains all three. Option lists are shuffled per item and the correct
//! index recorded after the shuffle.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::rng::{id_fragment, range_int, shuffle, SeededRng};

pub type Grid = Vec<Vec<u8>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridExample {
    pub input: Grid,
    pub output: Grid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridReasoningItem {
    pub id: String,
    pub prompt: String,
    pub train: Vec<GridExample>,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridReasoningSection {
    pub label: String,
    pub duration_seconds: u32,
    pub description: String,
    pub items: Vec<GridReasoningItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridReasoningResponse {
    pub item_id: String,
    pub selected_index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridItemResult {
    pub item_id: String,
    pub correctness: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridReasoningScore {
    pub overall: f64,
    pub items: Vec<GridItemResult>,
}

pub fn generate_grid_section(seed: &str) -> GridReasoningSection {
    let mut rng = SeededRng::new(&format!("grid-{seed}"));
    let rules = shuffle(&RULES, &mut rng);
    let items: Vec<GridReasoningItem> = rules
        .iter()
        .take(6)
        .map(|rule| build_item(rule, &mut rng))
        .collect();

    tracing::debug!(item_count = items.len(), "generated grid section");

    GridReasoningSection {
        label: "Abstraction & Reasoning".to_string(),
        duration_seconds: 150,
        description: "Infer transformation rules from sparse grid examples.".to_string(),
        items,
    }
}

pub fn grade_grid_section(
    section: &GridReasoningSection,
    responses: &[GridReasoningResponse],
) -> GridReasoningScore {
    let response_map: HashMap<&str, &GridReasoningResponse> = responses
        .iter()
        .map(|r| (r.item_id.as_str(), r))
        .collect();

    let items: Vec<GridItemResult> = section
        .items
        .iter()
        .map(|item| match response_map.get(item.id.as_str()) {
            None => GridItemResult {
                item_id: item.id.clone(),
                correctness: 0.0,
                feedback: Some("No rule selected.".to_string()),
            },
            Some(response) => {
                let correct = response.selected_index == item.correct_index;
                GridItemResult {
                    item_id: item.id.clone(),
                    correctness: if correct { 1.0 } else { 0.0 },
                    feedback: Some(
                        if correct {
                            "Transformation identified."
                        } else {
                            "Rule mismatch."
                        }
                        .to_string(),
                    ),
                }
            }
        })
        .collect();

    let overall = if items.is_empty() {
        0.0
    } else {
        items.iter().map(|r| r.correctness).sum::<f64>() / items.len() as f64
    };

    GridReasoningScore { overall, items }
}

// -- rule catalogue ----------------------------------------------------------

#[derive(Clone, Copy)]
struct RuleDefinition {
    prompt: &'static str,
    options: [&'static str; 4],
    explanation: &'static str,
    transform: fn(&Grid) -> Grid,
}

static RULES: [RuleDefinition; 6] = [
    RuleDefinition {
        prompt: "Deduce the precise multi-step mapping between each input grid and its output.",
        options: [
            "Rotate 180° → invert binary values → force the central cross to 1s",
            "Transpose → zero the border → invert binary values",
            "Flip horizontally → rotate 90° → mirror across the diagonal",
            "Rotate 90° clockwise → write a checkerboard overlay → keep the cross off",
        ],
        explanation:
            "Each output rotates the grid 180°, inverts 0/1, then activates the middle row and column.",
        transform: rotate_invert_cross,
    },
    RuleDefinition {
        prompt: "Identify the composed transformation applied to the training grids.",
        options: [
            "Transpose the matrix → overlay 1s on even-parity (r+c) cells",
            "Rotate 270° → overlay a central cross of 1s",
            "Flip vertically → zero every odd column",
            "Transpose → replace the densest quadrant with zeros",
        ],
        explanation:
            "Outputs are transposes of the inputs with a parity mask forcing even (r+c) cells to 1.",
        transform: transpose_checker_overlay,
    },
    RuleDefinition {
        prompt: "Resolve how the transformation emphasises only one quadrant.",
        options: [
            "Mirror across the main diagonal → promote the quadrant with the most 1s to solid 1s, others to 0s",
            "Transpose → delete the sparsest quadrant",
            "Rotate 90° → invert rows with more 1s than 0s",
            "Mirror across the anti-diagonal → copy top-right into all quadrants",
        ],
        explanation:
            "The grid becomes diagonal-symmetric, then the quadrant containing the most 1s is saturated while others clear.",
        transform: mirror_and_highlight_dominant_quadrant,
    },
    RuleDefinition {
        prompt: "Infer the chained operations that leave only interior structure.",
        options: [
            "Flip horizontally → mirror across diagonal → set every border cell to 0",
            "Rotate 180° → invert binary → erase the centre cross",
            "Flip vertically → rotate 90° → set border cells to 1",
            "Transpose → duplicate the top row to every row",
        ],
        explanation:
            "Outputs result from a horizontal flip, diagonal mirroring, then zeroing the perimeter.",
        transform: flip_mirror_zero_border,
    },
    RuleDefinition {
        prompt: "Work out how entire rows become uniform in the outputs.",
        options: [
            "Measure row parity → write full 1s for odd rows → full 0s for even rows",
            "Rows with majority zeros copy the row above",
            "Every second row mirrors the main diagonal",
            "Rotate 90° → erase rows with even indices",
        ],
        explanation:
            "Row parity is measured and collapsed: odd-parity rows become all 1s, even-parity rows become all 0s.",
        transform: row_parity_collapse,
    },
    RuleDefinition {
        prompt: "Disentangle the rotation and shifting operations visible in the examples.",
        options: [
            "Rotate 90° clockwise → shift rows downward cyclically by one → zero the new top row",
            "Rotate 270° → shift columns right by two → fill voids with 1s",
            "Flip vertically → shift rows upward by index count",
            "Transpose → append a zero row at the bottom",
        ],
        explanation:
            "Each output is a clockwise rotation, followed by a single-step downward cyclic shift with the promoted top row cleared.",
        transform: rotate_shift_zero_top,
    },
];

fn build_item(rule: &RuleDefinition, rng: &mut SeededRng) -> GridReasoningItem {
    let id = format!("C-{}", id_fragment(rng));
    let train = (0..3)
        .map(|_| {
            let input = random_grid(rng, 4, 6);
            let output = (rule.transform)(&input);
            GridExample { input, output }
        })
        .collect();
    // The rule description is always authored first in the catalogue; shuffle
    // the options shown to the taker and track where it lands.
    let correct_option = rule.options[0];
    let options = shuffle(&rule.options, rng);
    let correct_index = options
        .iter()
        .position(|o| *o == correct_option)
        .unwrap_or(0);

    GridReasoningItem {
        id,
        prompt: rule.prompt.to_string(),
        train,
        options: options.iter().map(|o| o.to_string()).collect(),
        correct_index,
        explanation: rule.explanation.to_string(),
    }
}

fn random_grid(rng: &mut SeededRng, min_size: i64, max_size: i64) -> Grid {
    let rows = range_int(rng, min_size, max_size) as usize;
    let cols = range_int(rng, min_size, max_size) as usize;
    (0..rows)
        .map(|_| {
            (0..cols)
                .map(|_| if rng.float() > 0.5 { 1 } else { 0 })
                .collect()
        })
        .collect()
}

// -- transforms --------------------------------------------------------------

fn dims(grid: &Grid) -> (usize, usize) {
    (grid.len(), grid.first().map_or(0, Vec::len))
}

fn rotate_clockwise(grid: &Grid) -> Grid {
    let (rows, cols) = dims(grid);
    let mut rotated = vec![vec![0; rows]; cols];
    for r in 0..rows {
        for c in 0..cols {
            rotated[c][rows - 1 - r] = grid[r][c];
        }
    }
    rotated
}

fn transpose_matrix(grid: &Grid) -> Grid {
    let (rows, cols) = dims(grid);
    let mut output = vec![vec![0; rows]; cols];
    for r in 0..rows {
        for c in 0..cols {
            output[c][r] = grid[r][c];
        }
    }
    output
}

fn flip_horizontal(grid: &Grid) -> Grid {
    grid.iter()
        .map(|row| row.iter().rev().copied().collect())
        .collect()
}

fn invert_binary(grid: &Grid) -> Grid {
    grid.iter()
        .map(|row| row.iter().map(|cell| if *cell == 0 { 1 } else { 0 }).collect())
        .collect()
}

fn rotate_180(grid: &Grid) -> Grid {
    let (rows, cols) = dims(grid);
    let mut output = vec![vec![0; cols]; rows];
    for r in 0..rows {
        for c in 0..cols {
            output[rows - 1 - r][cols - 1 - c] = grid[r][c];
        }
    }
    output
}

fn activate_central_cross(grid: &Grid) -> Grid {
    let (rows, cols) = dims(grid);
    let mut output = grid.clone();
    let mid_row = rows / 2;
    let mid_col = cols / 2;
    for c in 0..cols {
        output[mid_row][c] = 1;
    }
    for row in output.iter_mut() {
        row[mid_col] = 1;
    }
    output
}

fn rotate_invert_cross(grid: &Grid) -> Grid {
    activate_central_cross(&invert_binary(&rotate_180(grid)))
}

fn transpose_checker_overlay(grid: &Grid) -> Grid {
    let transposed = transpose_matrix(grid);
    transposed
        .iter()
        .enumerate()
        .map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(|(c, cell)| {
                    if *cell == 1 {
                        1
                    } else if (r + c) % 2 == 0 {
                        1
                    } else {
                        0
                    }
                })
                .collect()
        })
        .collect()
}

fn mirror_diagonal(grid: &Grid) -> Grid {
    let (rows, cols) = dims(grid);
    let mut output = grid.clone();
    let limit = rows.min(cols);
    for r in 0..limit {
        for c in (r + 1)..limit {
            output[c][r] = grid[r][c];
        }
    }
    output
}

fn mirror_and_highlight_dominant_quadrant(grid: &Grid) -> Grid {
    let mirrored = mirror_diagonal(grid);
    let (rows, cols) = dims(&mirrored);
    let mid_row = rows / 2;
    let mid_col = cols / 2;
    let quadrant_of = |r: usize, c: usize| -> usize {
        (if r < mid_row { 0 } else { 2 }) + (if c < mid_col { 0 } else { 1 })
    };
    let mut sums = [0u32; 4];
    for (r, row) in mirrored.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            sums[quadrant_of(r, c)] += u32::from(*cell);
        }
    }
    // Ties resolve to the first quadrant with the maximum count.
    let dominant = sums
        .iter()
        .enumerate()
        .max_by(|(ia, a), (ib, b)| a.cmp(b).then(ib.cmp(ia)))
        .map(|(i, _)| i)
        .unwrap_or(0);

    (0..rows)
        .map(|r| {
            (0..cols)
                .map(|c| if quadrant_of(r, c) == dominant { 1 } else { 0 })
                .collect()
        })
        .collect()
}

fn zero_border(grid: &Grid) -> Grid {
    let (rows, cols) = dims(grid);
    let mut output = grid.clone();
    for (r, row) in output.iter_mut().enumerate() {
        for (c, cell) in row.iter_mut().enumerate() {
            if r == 0 || c == 0 || r == rows - 1 || c == cols - 1 {
                *cell = 0;
            }
        }
    }
    output
}

fn flip_mirror_zero_border(grid: &Grid) -> Grid {
    zero_border(&mirror_diagonal(&flip_horizontal(grid)))
}

fn row_parity_collapse(grid: &Grid) -> Grid {
    grid.iter()
        .map(|row| {
            let ones: u32 = row.iter().map(|cell| u32::from(*cell)).sum();
            let value = if ones % 2 == 1 { 1 } else { 0 };
            vec![value; row.len()]
        })
        .collect()
}

fn rotate_shift_zero_top(grid: &Grid) -> Grid {
    let rotated = rotate_clockwise(grid);
    let rows = rotated.len();
    if rows == 0 {
        return rotated;
    }
    let mut shifted: Grid = (0..rows)
        .map(|index| rotated[(index + rows - 1) % rows].clone())
        .collect();
    for cell in shifted[0].iter_mut() {
        *cell = 0;
    }
    shifted
}
