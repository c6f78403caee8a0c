use crate::consts::{LEVEL_THRESHOLDS, LEVEL_TITLES};
use crate::types::Level;
use serde::Serialize;

/// One bucket of the contribution legend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub title: &'static str,
    pub min:   u32,
}

/// Count buckets for levels 0 through 4, in level order.
pub const CONTRIBUTION_LEGEND: [LegendEntry; 5] = [
    LegendEntry {
        title: LEVEL_TITLES[0],
        min:   LEVEL_THRESHOLDS[0],
    },
    LegendEntry {
        title: LEVEL_TITLES[1],
        min:   LEVEL_THRESHOLDS[1],
    },
    LegendEntry {
        title: LEVEL_TITLES[2],
        min:   LEVEL_THRESHOLDS[2],
    },
    LegendEntry {
        title: LEVEL_TITLES[3],
        min:   LEVEL_THRESHOLDS[3],
    },
    LegendEntry {
        title: LEVEL_TITLES[4],
        min:   LEVEL_THRESHOLDS[4],
    },
];

/// Maps a raw contribution count to its level.
///
/// Zero is level 0. Otherwise the level sits just below the first legend
/// entry whose minimum exceeds `count`, or is the top level when none does.
pub fn level_of(count: u32) -> Level {
    if count == 0 {
        return Level::NONE;
    }

    match CONTRIBUTION_LEGEND.iter().position(|entry| count < entry.min) {
        Some(next) => Level::from_legend_index(next - 1),
        None => Level::MAX,
    }
}
