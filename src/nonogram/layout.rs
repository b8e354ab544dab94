//! Enumeration of every line layout compatible with a block clue.

use super::{Cell, Line};

/// Enumerates every placement of `clue`'s blocks in a line of `cells`
/// cells, in left-to-right placement order.
///
/// Zero-length blocks are ignored, so `[0]` (the textual form of a blank
/// line) and an empty clue both yield the single all-empty layout. A clue
/// whose blocks cannot fit yields no layouts at all; the resulting empty
/// domain makes the instance unsatisfiable, which is the right answer.
pub fn enumerate_layouts(clue: &[usize], cells: usize) -> Vec<Line> {
    let blocks: Vec<usize> = clue.iter().copied().filter(|&block| block > 0).collect();
    let mut layouts = Vec::new();
    let mut prefix = Vec::with_capacity(cells);
    place_blocks(&blocks, cells, &mut prefix, &mut layouts);
    layouts
}

fn place_blocks(blocks: &[usize], cells: usize, prefix: &mut Vec<Cell>, out: &mut Vec<Line>) {
    let Some((&block, rest)) = blocks.split_first() else {
        let mut line = prefix.clone();
        line.resize(cells, Cell::Empty);
        out.push(Line(line));
        return;
    };

    // Cells the remaining blocks still need: one separator before each,
    // plus their lengths.
    let tail: usize = rest.iter().sum::<usize>() + rest.len();
    let Some(max_offset) = cells.checked_sub(prefix.len() + block + tail) else {
        return;
    };

    for offset in 0..=max_offset {
        let mark = prefix.len();
        prefix.extend(std::iter::repeat(Cell::Empty).take(offset));
        prefix.extend(std::iter::repeat(Cell::Filled).take(block));
        if !rest.is_empty() {
            prefix.push(Cell::Empty);
        }
        place_blocks(rest, cells, prefix, out);
        prefix.truncate(mark);
    }
}

/// Reads the block clue a finished line satisfies: the lengths of its
/// maximal filled runs, left to right. A blank line reads as an empty clue.
pub fn derive_clue(line: &[Cell]) -> Vec<usize> {
    let mut clue = Vec::new();
    let mut run = 0usize;
    for &cell in line {
        match cell {
            Cell::Filled => run += 1,
            Cell::Empty => {
                if run > 0 {
                    clue.push(run);
                    run = 0;
                }
            }
        }
    }
    if run > 0 {
        clue.push(run);
    }
    clue
}
