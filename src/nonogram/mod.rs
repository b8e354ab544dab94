//! Nonogram puzzles expressed as constraint satisfaction.
//!
//! Each row and each column is one variable whose domain is every layout
//! compatible with its clue; one binary constraint per row–column pair pins
//! their shared cell. The solver core stays puzzle-agnostic; this module
//! is the problem builder and result formatter around it.

pub mod layout;
pub mod parse;

pub use parse::{parse_puzzle, ParseError};

use std::{collections::HashMap, fmt};

use crate::{
    error::Result,
    solver::{
        constraint::{Constraint, ConstraintDescriptor},
        csp::{Assignment, Csp, VariableId},
        engine::{SearchLimits, SolverEngine},
        stats::SearchStats,
    },
};

/// One cell of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Filled,
    Empty,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Cell::Filled => "#",
            Cell::Empty => ".",
        })
    }
}

/// A complete layout of one row or column.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Line(pub Vec<Cell>);

impl Line {
    pub fn cell(&self, index: usize) -> Cell {
        self.0[index]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cell in &self.0 {
            write!(f, "{cell}")?;
        }
        Ok(())
    }
}

/// Pins the shared cell of a row and a column to agree.
///
/// The row variable is declared first. Until both lines are chosen the cell
/// cannot conflict, so the predicate holds.
#[derive(Debug, Clone)]
pub struct CellAgreementConstraint {
    vars: [VariableId; 2],
    row: usize,
    col: usize,
}

impl CellAgreementConstraint {
    pub fn new(row_var: VariableId, col_var: VariableId, row: usize, col: usize) -> Self {
        Self {
            vars: [row_var, col_var],
            row,
            col,
        }
    }
}

impl Constraint<Line> for CellAgreementConstraint {
    fn variables(&self) -> &[VariableId] {
        &self.vars
    }

    fn descriptor(&self) -> ConstraintDescriptor {
        ConstraintDescriptor {
            name: "CellAgreementConstraint".to_string(),
            description: format!("row {} and column {} agree at their shared cell", self.row, self.col),
        }
    }

    fn satisfied(&self, assignment: &Assignment<Line>) -> bool {
        let (Some(row_line), Some(col_line)) =
            (assignment.get(self.vars[0]), assignment.get(self.vars[1]))
        else {
            return true;
        };
        row_line.cell(self.col) == col_line.cell(self.row)
    }
}

/// A puzzle: block clues for every row and every column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    pub row_clues: Vec<Vec<usize>>,
    pub col_clues: Vec<Vec<usize>>,
}

impl Puzzle {
    pub fn height(&self) -> usize {
        self.row_clues.len()
    }

    pub fn width(&self) -> usize {
        self.col_clues.len()
    }

    /// Variable id of row `index`. Rows are declared before columns.
    pub fn row_var(&self, index: usize) -> VariableId {
        index as VariableId
    }

    /// Variable id of column `index`.
    pub fn col_var(&self, index: usize) -> VariableId {
        (self.height() + index) as VariableId
    }

    /// Builds the CSP instance: one variable per row and per column, the
    /// clue-compatible layouts as domains, and one shared-cell constraint
    /// per row–column pair.
    pub fn to_csp(&self) -> Result<Csp<Line>> {
        let mut variables = Vec::with_capacity(self.height() + self.width());
        let mut domains = HashMap::new();

        for (r, clue) in self.row_clues.iter().enumerate() {
            let variable = self.row_var(r);
            variables.push(variable);
            domains.insert(variable, layout::enumerate_layouts(clue, self.width()));
        }
        for (c, clue) in self.col_clues.iter().enumerate() {
            let variable = self.col_var(c);
            variables.push(variable);
            domains.insert(variable, layout::enumerate_layouts(clue, self.height()));
        }

        let mut csp = Csp::new(variables, domains)?;
        for r in 0..self.height() {
            for c in 0..self.width() {
                csp.add_constraint(Box::new(CellAgreementConstraint::new(
                    self.row_var(r),
                    self.col_var(c),
                    r,
                    c,
                )))?;
            }
        }
        Ok(csp)
    }

    /// Solves the puzzle with the default engine.
    pub fn solve(&self) -> Result<(Option<Vec<Vec<Cell>>>, SearchStats)> {
        self.solve_with_limits(SearchLimits::default())
    }

    /// Solves the puzzle under a decision budget or cancellation token.
    pub fn solve_with_limits(
        &self,
        limits: SearchLimits,
    ) -> Result<(Option<Vec<Vec<Cell>>>, SearchStats)> {
        let mut csp = self.to_csp()?;
        let engine = SolverEngine::default().with_limits(limits);
        let (solution, stats) = engine.solve(&mut csp)?;
        let grid = solution.map(|assignment| self.grid_from(&assignment));
        Ok((grid, stats))
    }

    /// Reads the row lines out of a full assignment, top to bottom.
    fn grid_from(&self, assignment: &Assignment<Line>) -> Vec<Vec<Cell>> {
        (0..self.height())
            .map(|r| assignment.get(self.row_var(r)).unwrap().0.clone())
            .collect()
    }
}

/// Renders a solved grid as `#`/`.` text lines.
pub fn render_grid(grid: &[Vec<Cell>]) -> String {
    let mut out = String::new();
    for row in grid {
        for cell in row {
            out.push(match cell {
                Cell::Filled => '#',
                Cell::Empty => '.',
            });
        }
        out.push('\n');
    }
    out
}
