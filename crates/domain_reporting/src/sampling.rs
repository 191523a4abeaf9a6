//! Top/bottom sampling of ranked results
//!
//! Sampling only selects which already-computed rows to show; it never
//! changes a sum.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sampling {
    #[default]
    All,
    /// The first `n` of a descending ranking
    Top(usize),
    /// The last `n` of a descending ranking, order preserved
    Bottom(usize),
}

impl Sampling {
    pub fn apply<T>(&self, mut ranked: Vec<T>) -> Vec<T> {
        match *self {
            Sampling::All => ranked,
            Sampling::Top(n) => {
                ranked.truncate(n);
                ranked
            }
            Sampling::Bottom(n) => {
                let skip = ranked.len().saturating_sub(n);
                ranked.split_off(skip)
            }
        }
    }
}
