//! Candidate list for top-N queries.

use crate::cost_model::{approx_eq, Cost};

/// Entries grouped by score, cheapest first, at most `cap` groups. Equal
/// scores share a group, so the list may hold more than `cap` entries;
/// the driver stops printing once `cap` entries are out, letting ties in
/// the final group extend past it.
pub struct TopList {
    cap: usize,
    groups: Vec<Group>,
}

struct Group {
    score: Cost,
    entries: Vec<String>,
}

impl TopList {
    pub fn new(cap: usize) -> Self {
        TopList {
            cap,
            groups: Vec::new(),
        }
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    /// Offers a scored entry. A score tying an existing group always joins
    /// it; a new score makes a new group, evicting the worst group when
    /// the list is over capacity. Entries worse than every kept group are
    /// dropped once the list is full.
    pub fn push(&mut self, score: Cost, entry: String) {
        let slot = self
            .groups
            .iter()
            .position(|g| score < g.score || approx_eq(score, g.score));
        match slot {
            Some(k) if approx_eq(self.groups[k].score, score) => {
                self.groups[k].entries.push(entry);
            }
            Some(k) => {
                self.groups.insert(
                    k,
                    Group {
                        score,
                        entries: vec![entry],
                    },
                );
                if self.groups.len() > self.cap {
                    self.groups.pop();
                }
            }
            None => {
                if self.groups.len() < self.cap {
                    self.groups.push(Group {
                        score,
                        entries: vec![entry],
                    });
                }
            }
        }
    }

    /// Groups in ascending score order.
    pub fn groups(&self) -> impl Iterator<Item = (Cost, &[String])> {
        self.groups.iter().map(|g| (g.score, g.entries.as_slice()))
    }
}
