//! Character-level Levenshtein distance and edit scripts.
//!
//! The automaton answers *whether* a word is close to a root; the edit
//! script here answers *where* the difference lies, which partial
//! masking needs to place the censor characters.

use std::ops::Range;

/// Kind of a single edit operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    Equal,
    Replace,
    Delete,
    Insert,
}

/// A grouped edit operation over character ranges of the source and
/// target strings. `Delete` has an empty target range, `Insert` an
/// empty source range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opcode {
    pub kind: OpKind,
    pub source: Range<usize>,
    pub target: Range<usize>,
}

/// Levenshtein distance over characters, two-row dynamic program.
/// Serves as the cost oracle for the edit script tests; lookups go
/// through the automaton instead.
#[cfg(test)]
fn standard_distance(source: &str, target: &str) -> usize {
    let source: Vec<char> = source.chars().collect();
    let target: Vec<char> = target.chars().collect();

    let mut previous: Vec<usize> = (0..=target.len()).collect();
    let mut current = vec![0; target.len() + 1];

    for (i, &source_char) in source.iter().enumerate() {
        current[0] = i + 1;
        for (j, &target_char) in target.iter().enumerate() {
            let substitution = previous[j] + usize::from(source_char != target_char);
            current[j + 1] = substitution
                .min(previous[j + 1] + 1)
                .min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[target.len()]
}

/// A minimal edit script from `source` to `target` as grouped opcodes,
/// covering both strings end to end.
///
/// Among cost-equal paths the traceback prefers diagonal moves, then
/// deletions, so runs of equal characters stay grouped and surplus
/// source characters surface as `Delete` blocks.
pub fn opcodes(source: &str, target: &str) -> Vec<Opcode> {
    let source: Vec<char> = source.chars().collect();
    let target: Vec<char> = target.chars().collect();
    let n = source.len();
    let m = target.len();

    // Full matrix; the traceback needs every cell
    let mut d = vec![vec![0usize; m + 1]; n + 1];
    for (i, row) in d.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=m {
        d[0][j] = j;
    }
    for i in 1..=n {
        for j in 1..=m {
            let substitution = d[i - 1][j - 1] + usize::from(source[i - 1] != target[j - 1]);
            d[i][j] = substitution.min(d[i - 1][j] + 1).min(d[i][j - 1] + 1);
        }
    }

    let mut ops: Vec<OpKind> = Vec::with_capacity(n.max(m));
    let (mut i, mut j) = (n, m);
    while i > 0 || j > 0 {
        if i > 0 && j > 0 {
            let cost = usize::from(source[i - 1] != target[j - 1]);
            if d[i - 1][j - 1] + cost == d[i][j] {
                ops.push(if cost == 0 { OpKind::Equal } else { OpKind::Replace });
                i -= 1;
                j -= 1;
                continue;
            }
        }
        if i > 0 && d[i - 1][j] + 1 == d[i][j] {
            ops.push(OpKind::Delete);
            i -= 1;
        } else {
            ops.push(OpKind::Insert);
            j -= 1;
        }
    }
    ops.reverse();

    // Group runs of the same kind into ranged opcodes
    let mut grouped: Vec<Opcode> = Vec::new();
    let (mut si, mut ti) = (0usize, 0usize);
    for kind in ops {
        let (source_step, target_step) = match kind {
            OpKind::Equal | OpKind::Replace => (1, 1),
            OpKind::Delete => (1, 0),
            OpKind::Insert => (0, 1),
        };
        match grouped.last_mut() {
            Some(last) if last.kind == kind => {
                last.source.end += source_step;
                last.target.end += target_step;
            }
            _ => grouped.push(Opcode {
                kind,
                source: si..si + source_step,
                target: ti..ti + target_step,
            }),
        }
        si += source_step;
        ti += target_step;
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_basics() {
        assert_eq!(standard_distance("shit", "shit"), 0);
        assert_eq!(standard_distance("sh1t", "shit"), 1);
        assert_eq!(standard_distance("shiiit", "shit"), 2);
        assert_eq!(standard_distance("", "fuck"), 4);
        assert_eq!(standard_distance("бляя", "бля"), 1);
    }

    #[test]
    fn test_opcodes_insert_in_middle() {
        let ops = opcodes("fuk", "fuck");
        assert_eq!(
            ops,
            vec![
                Opcode { kind: OpKind::Equal, source: 0..2, target: 0..2 },
                Opcode { kind: OpKind::Insert, source: 2..2, target: 2..3 },
                Opcode { kind: OpKind::Equal, source: 2..3, target: 3..4 },
            ]
        );
    }

    #[test]
    fn test_opcodes_leading_deletes_grouped() {
        let ops = opcodes("oofuk", "fuck");
        assert_eq!(ops[0], Opcode { kind: OpKind::Delete, source: 0..2, target: 0..0 });
        assert_eq!(ops.last().unwrap().kind, OpKind::Equal);
        assert_eq!(ops.last().unwrap().source.end, 5);
    }

    #[test]
    fn test_opcodes_replace() {
        let ops = opcodes("sh1t", "shit");
        assert_eq!(
            ops,
            vec![
                Opcode { kind: OpKind::Equal, source: 0..2, target: 0..2 },
                Opcode { kind: OpKind::Replace, source: 2..3, target: 2..3 },
                Opcode { kind: OpKind::Equal, source: 3..4, target: 3..4 },
            ]
        );
    }

    #[test]
    fn test_opcodes_cover_both_strings() {
        let ops = opcodes("h0r1h0r1", "hore");
        assert_eq!(ops.first().unwrap().source.start, 0);
        assert_eq!(ops.last().unwrap().source.end, 8);
        assert_eq!(ops.last().unwrap().target.end, 4);
    }

    #[test]
    fn test_script_cost_equals_distance() {
        for (source, target) in [("oofuk", "fuck"), ("shiiit", "shit"), ("abc", "xyz")] {
            let cost: usize = opcodes(source, target)
                .iter()
                .filter(|op| op.kind != OpKind::Equal)
                .map(|op| op.source.len().max(op.target.len()))
                .sum();
            assert_eq!(cost, standard_distance(source, target), "{source} -> {target}");
        }
    }
}
