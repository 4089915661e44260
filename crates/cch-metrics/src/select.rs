//! Per-client row selection by timestamp.

use std::collections::HashMap;

use chrono::NaiveDateTime;

use cch_model::ClientId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Pick {
    Earliest,
    Latest,
    /// The row ordered last when timestamps ascend with nulls placed after
    /// every value. A null-stamped row therefore wins over any dated row.
    Final,
}

impl Pick {
    /// True when `candidate`, seen after `current`, should replace it.
    ///
    /// For `Earliest` and `Latest` null timestamps rank after every value and
    /// equal timestamps keep the row seen first. `Final` keeps the row seen
    /// last among equals, nulls included.
    fn prefers(self, candidate: Option<NaiveDateTime>, current: Option<NaiveDateTime>) -> bool {
        match self {
            Self::Earliest | Self::Latest => match (candidate, current) {
                (Some(candidate), Some(current)) => {
                    if self == Self::Earliest {
                        candidate < current
                    } else {
                        candidate > current
                    }
                }
                (Some(_), None) => true,
                (None, _) => false,
            },
            Self::Final => match (candidate, current) {
                (Some(candidate), Some(current)) => candidate >= current,
                (Some(_), None) => false,
                (None, _) => true,
            },
        }
    }
}

/// Selects one row per client among `rows`.
///
/// Returns `(client, row index)` pairs in first-seen client order. Rows
/// without a client id are skipped.
pub(crate) fn pick_per_client(
    ids: &[Option<ClientId>],
    stamps: &[Option<NaiveDateTime>],
    rows: impl IntoIterator<Item = usize>,
    pick: Pick,
) -> Vec<(ClientId, usize)> {
    let mut chosen: Vec<(ClientId, usize)> = Vec::new();
    let mut slot: HashMap<ClientId, usize> = HashMap::new();

    for row in rows {
        let Some(id) = &ids[row] else {
            continue;
        };
        match slot.get(id) {
            Some(&at) => {
                let current = chosen[at].1;
                if pick.prefers(stamps[row], stamps[current]) {
                    chosen[at].1 = row;
                }
            }
            None => {
                slot.insert(id.clone(), chosen.len());
                chosen.push((id.clone(), row));
            }
        }
    }

    chosen
}
