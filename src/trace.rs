//! Backtracing the filled cost table into the tree of co-optimal
//! alignments.
//!
//! Transformations live in an arena; `next` links point towards the table
//! origin, `right` links chain alternative explanations of the same cell.
//! The tree is rooted at the corner cell and every root-to-leaf path is
//! one complete alignment. Trie lookups run against the mirrored tries,
//! whose strings are reversed so a walk proceeds backwards from an
//! accepting cell along the consumed characters.

use itertools::Itertools;

use crate::cost_model::{approx_eq, Cost};
use crate::engine::{Engine, Table};

type TfId = u32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpKind {
    /// Plain single-character edit, or an identity step.
    Primitive,
    /// Application of a catalogue rewrite rule.
    Rewrite,
}

/// One edit step between two table cells. `start` is the cell nearer the
/// corner, `end` the cell nearer the origin; `left` and `right` are the
/// consumed and produced characters (either may be empty).
#[derive(Clone, Debug)]
pub struct Transformation {
    pub start: (usize, usize),
    pub end: (usize, usize),
    pub left: Vec<char>,
    pub right: Vec<char>,
    pub weight: Cost,
    pub kind: OpKind,
    next: Option<TfId>,
    right_alt: Option<TfId>,
}

/// All co-optimal alignments for one query.
pub struct Trace {
    nodes: Vec<Transformation>,
    /// First explanation of the corner cell; alternatives hang off its
    /// `right_alt` chain.
    root: Option<TfId>,
}

impl Trace {
    /// Expands the tree of minimum-cost paths from the corner of `table`
    /// back to the origin.
    pub(crate) fn backtrace(engine: &Engine, table: &Table, a: &[char], b: &[char]) -> Trace {
        let mut trace = Trace {
            nodes: Vec::new(),
            root: None,
        };
        for step in steps_into(engine, table, a, b, (a.len(), b.len())) {
            let id = trace.attach_root(step);
            trace.expand(engine, table, a, b, id);
        }
        trace
    }

    fn expand(&mut self, engine: &Engine, table: &Table, a: &[char], b: &[char], node: TfId) {
        let cell = self.nodes[node as usize].end;
        if cell == (0, 0) {
            return;
        }
        for step in steps_into(engine, table, a, b, cell) {
            let id = self.attach_child(node, step);
            self.expand(engine, table, a, b, id);
        }
    }

    fn push(&mut self, tf: Transformation) -> TfId {
        self.nodes.push(tf);
        (self.nodes.len() - 1) as TfId
    }

    fn attach_root(&mut self, tf: Transformation) -> TfId {
        let id = self.push(tf);
        match self.root {
            None => self.root = Some(id),
            Some(first) => self.append_alt(first, id),
        }
        id
    }

    fn attach_child(&mut self, parent: TfId, tf: Transformation) -> TfId {
        let id = self.push(tf);
        match self.nodes[parent as usize].next {
            None => self.nodes[parent as usize].next = Some(id),
            Some(first) => self.append_alt(first, id),
        }
        id
    }

    fn append_alt(&mut self, first: TfId, id: TfId) {
        let mut cur = first;
        while let Some(r) = self.nodes[cur as usize].right_alt {
            cur = r;
        }
        self.nodes[cur as usize].right_alt = Some(id);
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Every root-to-leaf path, reversed into reading order: the returned
    /// chains run from the beginnings of the strings to their ends.
    pub fn alignments(&self) -> Vec<Vec<&Transformation>> {
        let mut all = Vec::new();
        let mut path = Vec::new();
        let mut cur = self.root;
        while let Some(id) = cur {
            self.collect(id, &mut path, &mut all);
            cur = self.nodes[id as usize].right_alt;
        }
        all
    }

    fn collect<'s>(
        &'s self,
        id: TfId,
        path: &mut Vec<TfId>,
        all: &mut Vec<Vec<&'s Transformation>>,
    ) {
        path.push(id);
        match self.nodes[id as usize].next {
            None => all.push(
                path.iter()
                    .rev()
                    .map(|&t| &self.nodes[t as usize])
                    .collect(),
            ),
            Some(first) => {
                let mut cur = Some(first);
                while let Some(child) = cur {
                    self.collect(child, path, all);
                    cur = self.nodes[child as usize].right_alt;
                }
            }
        }
        path.pop();
    }

    /// Renders each alignment as colon-separated rows closed with `;`:
    /// left sides, step weights when `weights` is set, right sides. With
    /// `pretty`, fields are right-padded per column so the rows line up.
    pub fn render(&self, weights: bool, pretty: bool) -> Vec<String> {
        self.alignments()
            .iter()
            .map(|path| {
                let lefts: Vec<String> = path.iter().map(|t| t.left.iter().collect()).collect();
                let rights: Vec<String> = path.iter().map(|t| t.right.iter().collect()).collect();
                let ws: Vec<String> = path.iter().map(|t| t.weight.to_string()).collect();
                let row = |fields: &[String]| -> String {
                    let mut line = if pretty {
                        fields
                            .iter()
                            .enumerate()
                            .map(|(k, f)| {
                                let mut w = lefts[k].chars().count().max(rights[k].chars().count());
                                if weights {
                                    w = w.max(ws[k].chars().count());
                                }
                                format!("{f:>w$}")
                            })
                            .join(":")
                    } else {
                        fields.iter().join(":")
                    };
                    line.push(';');
                    line
                };
                let mut lines = vec![row(&lefts)];
                if weights {
                    lines.push(row(&ws));
                }
                lines.push(row(&rights));
                lines.join("\n")
            })
            .collect()
    }
}

/// All operations whose source cell plus own cost explains `table[(i, j)]`
/// within tolerance, in a fixed order: rewrite deletions, insertions and
/// replacements first, then the primitive operations.
fn steps_into(
    engine: &Engine,
    t: &Table,
    a: &[char],
    b: &[char],
    (i, j): (usize, usize),
) -> Vec<Transformation> {
    let value = t[(i, j)];
    let cm = &engine.costs;
    let mut steps = Vec::new();
    let step = |end: (usize, usize), left: &[char], right: &[char], weight, kind| Transformation {
        start: (i, j),
        end,
        left: left.to_vec(),
        right: right.to_vec(),
        weight,
        kind,
        next: None,
        right_alt: None,
    };

    // Rewrite deletions ending here: walk a[..i] backwards through the
    // mirrored trie.
    if i > 0 {
        engine.trace_del.walk(a[..i].iter().rev().copied(), |r, &cost| {
            if approx_eq(t[(i - r, j)] + cost, value) {
                steps.push(step((i - r, j), &a[i - r..i], &[], cost, OpKind::Rewrite));
            }
        });
    }
    // Rewrite insertions, walking b[..j] backwards.
    if j > 0 {
        engine.trace_ins.walk(b[..j].iter().rev().copied(), |c, &cost| {
            if approx_eq(t[(i, j - c)] + cost, value) {
                steps.push(step((i, j - c), &[], &b[j - c..j], cost, OpKind::Rewrite));
            }
        });
    }
    // Rewrite replacements: a reversed left side, combined with every
    // ending that lines up with the text before `j`.
    if i > 0 && j > 0 {
        engine
            .trace_rep
            .walk(a[..i].iter().rev().copied(), |r, endings| {
                for e in endings {
                    let c = e.to.len();
                    if c <= j && b[..j].ends_with(&e.to) && approx_eq(t[(i - r, j - c)] + e.cost, value)
                    {
                        steps.push(step(
                            (i - r, j - c),
                            &a[i - r..i],
                            &e.to,
                            e.cost,
                            OpKind::Rewrite,
                        ));
                    }
                }
            });
    }
    // Primitive deletion.
    if i > 0 && approx_eq(t[(i - 1, j)] + cm.rem, value) {
        steps.push(step((i - 1, j), &a[i - 1..i], &[], cm.rem, OpKind::Primitive));
    }
    // Primitive insertion.
    if j > 0 && approx_eq(t[(i, j - 1)] + cm.add, value) {
        steps.push(step((i, j - 1), &[], &b[j - 1..j], cm.add, OpKind::Primitive));
    }
    // Primitive replacement, or an identity step on equal characters.
    if i > 0 && j > 0 {
        let diag = t[(i - 1, j - 1)];
        let same = a[i - 1] == b[j - 1];
        let identity = same && approx_eq(diag, value);
        if identity || approx_eq(diag + cm.rep, value) {
            let weight = if identity { 0.0 } else { cm.rep };
            steps.push(step(
                (i - 1, j - 1),
                &a[i - 1..i],
                &b[j - 1..j],
                weight,
                OpKind::Primitive,
            ));
        }
    }
    steps
}
