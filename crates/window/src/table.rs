//! The short-range forecast verification rule.
//!
//! An operational convention fixes, for each hour at which a forecaster
//! publishes guidance, which model cycle and which of its lead windows
//! are the admissible comparison evidence. The rule is hand-curated per
//! (maximum forecast hour, threshold hour) and has no generating
//! formula; it is reproduced here verbatim and pinned by tests.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::WindowError;

/// Admissible lead-window indices for one forecaster announcement.
#[derive(Debug, Clone, Copy)]
pub struct PublishRow {
    /// Hour of day at which the guidance is published.
    pub publish_hour: i64,
    /// Zero-based lead-window indices admissible as evidence.
    pub windows: &'static [i64],
}

/// The announcements served by one model cycle.
#[derive(Debug, Clone, Copy)]
pub struct CycleBlock {
    /// Cycle issue time in hours relative to the reference day's start.
    pub base_offset: i64,
    /// Publish rows drawing on this cycle.
    pub rows: &'static [PublishRow],
}

/// Maximum forecast hours the rule is defined for.
pub const MAX_FCST_HOURS: [i64; 2] = [72, 120];

/// Threshold hours the rule is defined for.
pub const TABLE_THRESHOLD_HOURS: [i64; 3] = [3, 6, 12];

static H72_T3: [CycleBlock; 3] = [
    CycleBlock {
        base_offset: -24,
        rows: &[PublishRow {
            publish_hour: 2,
            windows: &[6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20],
        }],
    },
    CycleBlock {
        base_offset: -12,
        rows: &[
            PublishRow {
                publish_hour: 5,
                windows: &[
                    7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26,
                    27, 28,
                ],
            },
            PublishRow {
                publish_hour: 8,
                windows: &[
                    8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27,
                    28,
                ],
            },
            PublishRow {
                publish_hour: 11,
                windows: &[
                    9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28,
                ],
            },
            PublishRow {
                publish_hour: 14,
                windows: &[
                    10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28,
                ],
            },
        ],
    },
    CycleBlock {
        base_offset: 0,
        rows: &[
            PublishRow {
                publish_hour: 17,
                windows: &[
                    11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28,
                ],
            },
            PublishRow {
                publish_hour: 20,
                windows: &[
                    12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28,
                ],
            },
            PublishRow {
                publish_hour: 23,
                windows: &[13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28],
            },
        ],
    },
];

static H72_T6: [CycleBlock; 3] = [
    CycleBlock {
        base_offset: -24,
        rows: &[PublishRow {
            publish_hour: 2,
            windows: &[3, 4, 5, 6, 7, 8, 9],
        }],
    },
    CycleBlock {
        base_offset: -12,
        rows: &[
            PublishRow {
                publish_hour: 5,
                windows: &[3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13],
            },
            PublishRow {
                publish_hour: 8,
                windows: &[4, 5, 6, 7, 8, 9, 10, 11, 12, 13],
            },
            PublishRow {
                publish_hour: 11,
                windows: &[5, 6, 7, 8, 9, 10, 11, 12, 13],
            },
            PublishRow {
                publish_hour: 14,
                windows: &[6, 7, 8, 9, 10, 11, 12, 13],
            },
        ],
    },
    CycleBlock {
        base_offset: 0,
        rows: &[
            PublishRow {
                publish_hour: 17,
                windows: &[5, 6, 7, 8, 9, 10, 11, 12, 13],
            },
            PublishRow {
                publish_hour: 20,
                windows: &[6, 7, 8, 9, 10, 11, 12, 13],
            },
            PublishRow {
                publish_hour: 23,
                windows: &[7, 8, 9, 10, 11, 12, 13],
            },
        ],
    },
];

static H72_T12: [CycleBlock; 3] = [
    CycleBlock {
        base_offset: -24,
        rows: &[PublishRow {
            publish_hour: 2,
            windows: &[1, 2, 3, 4],
        }],
    },
    CycleBlock {
        base_offset: -12,
        rows: &[
            PublishRow {
                publish_hour: 5,
                windows: &[1, 2, 3, 4, 5, 6],
            },
            PublishRow {
                publish_hour: 8,
                windows: &[2, 3, 4, 5, 6],
            },
            PublishRow {
                publish_hour: 11,
                windows: &[2, 3, 4, 5, 6],
            },
            PublishRow {
                publish_hour: 14,
                windows: &[2, 3, 4, 5, 6],
            },
        ],
    },
    CycleBlock {
        base_offset: 0,
        rows: &[
            PublishRow {
                publish_hour: 17,
                windows: &[2, 3, 4, 5, 6],
            },
            PublishRow {
                publish_hour: 20,
                windows: &[3, 4, 5, 6],
            },
            PublishRow {
                publish_hour: 23,
                windows: &[3, 4, 5, 6],
            },
        ],
    },
];

static H120_T3: [CycleBlock; 3] = [
    CycleBlock {
        base_offset: -24,
        rows: &[PublishRow {
            publish_hour: 2,
            windows: &[
                6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26,
                27, 28, 29, 30, 31, 32, 33, 34, 35, 36,
            ],
        }],
    },
    CycleBlock {
        base_offset: -12,
        rows: &[
            PublishRow {
                publish_hour: 5,
                windows: &[
                    7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26,
                    27, 28, 29, 30, 31, 32, 33, 34, 35, 36, 37, 38, 39, 40, 41, 42, 43, 44,
                ],
            },
            PublishRow {
                publish_hour: 8,
                windows: &[
                    8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27,
                    28, 29, 30, 31, 32, 33, 34, 35, 36, 37, 38, 39, 40, 41, 42, 43, 44,
                ],
            },
            PublishRow {
                publish_hour: 11,
                windows: &[
                    9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28,
                    29, 30, 31, 32, 33, 34, 35, 36, 37, 38, 39, 40, 41, 42, 43, 44,
                ],
            },
            PublishRow {
                publish_hour: 14,
                windows: &[
                    10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28,
                    29, 30, 31, 32, 33, 34, 35, 36, 37, 38, 39, 40, 41, 42, 43, 44,
                ],
            },
        ],
    },
    CycleBlock {
        base_offset: 0,
        rows: &[
            PublishRow {
                publish_hour: 17,
                windows: &[
                    11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29,
                    30, 31, 32, 33, 34, 35, 36, 37, 38, 39, 40, 41, 42, 43, 44,
                ],
            },
            PublishRow {
                publish_hour: 20,
                windows: &[
                    12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30,
                    31, 32, 33, 34, 35, 36, 37, 38, 39, 40, 41, 42, 43, 44,
                ],
            },
            PublishRow {
                publish_hour: 23,
                windows: &[
                    13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30, 31,
                    32, 33, 34, 35, 36, 37, 38, 39, 40, 41, 42, 43, 44,
                ],
            },
        ],
    },
];

static H120_T6: [CycleBlock; 3] = [
    CycleBlock {
        base_offset: -24,
        rows: &[PublishRow {
            publish_hour: 2,
            windows: &[3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17],
        }],
    },
    CycleBlock {
        base_offset: -12,
        rows: &[
            PublishRow {
                publish_hour: 5,
                windows: &[
                    3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21,
                ],
            },
            PublishRow {
                publish_hour: 8,
                windows: &[4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21],
            },
            PublishRow {
                publish_hour: 11,
                windows: &[5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21],
            },
            PublishRow {
                publish_hour: 14,
                windows: &[6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21],
            },
        ],
    },
    CycleBlock {
        base_offset: 0,
        rows: &[
            PublishRow {
                publish_hour: 17,
                windows: &[5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21],
            },
            PublishRow {
                publish_hour: 20,
                windows: &[6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21],
            },
            PublishRow {
                publish_hour: 23,
                windows: &[7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19, 20, 21],
            },
        ],
    },
];

static H120_T12: [CycleBlock; 3] = [
    CycleBlock {
        base_offset: -24,
        rows: &[PublishRow {
            publish_hour: 2,
            windows: &[1, 2, 3, 4, 5, 6, 7, 8],
        }],
    },
    CycleBlock {
        base_offset: -12,
        rows: &[
            PublishRow {
                publish_hour: 5,
                windows: &[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
            },
            PublishRow {
                publish_hour: 8,
                windows: &[2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
            },
            PublishRow {
                publish_hour: 11,
                windows: &[2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
            },
            PublishRow {
                publish_hour: 14,
                windows: &[2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
            },
        ],
    },
    CycleBlock {
        base_offset: 0,
        rows: &[
            PublishRow {
                publish_hour: 17,
                windows: &[2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
            },
            PublishRow {
                publish_hour: 20,
                windows: &[3, 4, 5, 6, 7, 8, 9, 10, 11],
            },
            PublishRow {
                publish_hour: 23,
                windows: &[3, 4, 5, 6, 7, 8, 9, 10, 11],
            },
        ],
    },
];

/// Looks up the cycle blocks for one (max forecast hour, threshold
/// hour) combination.
///
/// # Errors
///
/// Returns [`WindowError::TableEntryMissing`] when the rule is not
/// defined for the combination.
pub fn cycle_blocks(
    max_fcst_hour: i64,
    threshold_hour: i64,
) -> Result<&'static [CycleBlock], WindowError> {
    let blocks: &'static [CycleBlock] = match (max_fcst_hour, threshold_hour) {
        (72, 3) => &H72_T3,
        (72, 6) => &H72_T6,
        (72, 12) => &H72_T12,
        (120, 3) => &H120_T3,
        (120, 6) => &H120_T6,
        (120, 12) => &H120_T12,
        _ => {
            return Err(WindowError::TableEntryMissing {
                max_fcst_hour,
                threshold_hour,
            });
        }
    };
    Ok(blocks)
}

/// Union of all lead-window indices any announcement requires: the
/// windows the observation side must accumulate.
pub fn frame_obs_windows(blocks: &[CycleBlock]) -> BTreeSet<i64> {
    blocks
        .iter()
        .flat_map(|b| b.rows.iter())
        .flat_map(|r| r.windows.iter().copied())
        .collect()
}

/// Per-cycle union of lead-window indices: the windows each model
/// cycle must accumulate, keyed by base offset.
pub fn frame_model_windows(blocks: &[CycleBlock]) -> BTreeMap<i64, BTreeSet<i64>> {
    blocks
        .iter()
        .map(|b| {
            let set = b
                .rows
                .iter()
                .flat_map(|r| r.windows.iter().copied())
                .collect();
            (b.base_offset, set)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Expected cell counts per publish hour, in table order, for every
    /// defined combination. Guards against transcription slips.
    #[test]
    fn cell_counts_match_rule() {
        let expected: &[(i64, i64, &[(i64, usize)])] = &[
            (
                72,
                3,
                &[
                    (2, 15),
                    (5, 22),
                    (8, 21),
                    (11, 20),
                    (14, 19),
                    (17, 18),
                    (20, 17),
                    (23, 16),
                ],
            ),
            (
                72,
                6,
                &[
                    (2, 7),
                    (5, 11),
                    (8, 10),
                    (11, 9),
                    (14, 8),
                    (17, 9),
                    (20, 8),
                    (23, 7),
                ],
            ),
            (
                72,
                12,
                &[
                    (2, 4),
                    (5, 6),
                    (8, 5),
                    (11, 5),
                    (14, 5),
                    (17, 5),
                    (20, 4),
                    (23, 4),
                ],
            ),
            (
                120,
                3,
                &[
                    (2, 31),
                    (5, 38),
                    (8, 37),
                    (11, 36),
                    (14, 35),
                    (17, 34),
                    (20, 33),
                    (23, 32),
                ],
            ),
            (
                120,
                6,
                &[
                    (2, 15),
                    (5, 19),
                    (8, 18),
                    (11, 17),
                    (14, 16),
                    (17, 17),
                    (20, 16),
                    (23, 15),
                ],
            ),
            (
                120,
                12,
                &[
                    (2, 8),
                    (5, 11),
                    (8, 10),
                    (11, 10),
                    (14, 10),
                    (17, 10),
                    (20, 9),
                    (23, 9),
                ],
            ),
        ];

        for &(max_hour, th, counts) in expected {
            let blocks = cycle_blocks(max_hour, th).unwrap();
            let rows: Vec<&PublishRow> = blocks.iter().flat_map(|b| b.rows.iter()).collect();
            assert_eq!(rows.len(), counts.len(), "{max_hour}/{th}: row count");
            for (row, &(publish, n)) in rows.iter().zip(counts) {
                assert_eq!(
                    row.publish_hour, publish,
                    "{max_hour}/{th}: publish hour order"
                );
                assert_eq!(
                    row.windows.len(),
                    n,
                    "{max_hour}/{th} publish {publish}: cell count"
                );
            }
        }
    }

    #[test]
    fn windows_are_strictly_increasing_runs() {
        for &max_hour in &MAX_FCST_HOURS {
            for &th in &TABLE_THRESHOLD_HOURS {
                let blocks = cycle_blocks(max_hour, th).unwrap();
                for block in blocks {
                    for row in block.rows {
                        for pair in row.windows.windows(2) {
                            assert_eq!(
                                pair[1],
                                pair[0] + 1,
                                "{max_hour}/{th}/{}/{}: indices must be a contiguous run",
                                block.base_offset,
                                row.publish_hour
                            );
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn early_cycle_publish_5_draws_on_windows_7_through_28() {
        let blocks = cycle_blocks(72, 3).unwrap();
        let block = blocks.iter().find(|b| b.base_offset == -12).unwrap();
        let row = block.rows.iter().find(|r| r.publish_hour == 5).unwrap();
        let expected: Vec<i64> = (7..=28).collect();
        assert_eq!(row.windows, expected.as_slice());
    }

    #[test]
    fn base_offsets_are_daily_cycles() {
        for &max_hour in &MAX_FCST_HOURS {
            for &th in &TABLE_THRESHOLD_HOURS {
                let blocks = cycle_blocks(max_hour, th).unwrap();
                let offsets: Vec<i64> = blocks.iter().map(|b| b.base_offset).collect();
                assert_eq!(offsets, vec![-24, -12, 0]);
            }
        }
    }

    #[test]
    fn frame_obs_windows_unions_all_rows() {
        let blocks = cycle_blocks(72, 3).unwrap();
        let frame = frame_obs_windows(blocks);
        let expected: BTreeSet<i64> = (6..=28).collect();
        assert_eq!(frame, expected);
    }

    #[test]
    fn frame_model_windows_is_per_cycle() {
        let blocks = cycle_blocks(72, 3).unwrap();
        let frames = frame_model_windows(blocks);
        assert_eq!(frames[&-24], (6..=20).collect());
        assert_eq!(frames[&-12], (7..=28).collect());
        assert_eq!(frames[&0], (11..=28).collect());
    }

    #[test]
    fn undefined_combinations_are_rejected() {
        assert!(cycle_blocks(48, 3).is_err());
        assert!(cycle_blocks(72, 1).is_err());
        assert!(cycle_blocks(120, 24).is_err());
    }
}
