use prettytable::{Cell, Row, Table};
use serde::Serialize;

/// Counters accumulated across one `solve` call.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchStats {
    /// Arc revisions performed by AC-3.
    pub ac3_revisions: u64,
    /// Values permanently removed by AC-3.
    pub ac3_prunings: u64,
    /// Values temporarily purged by forward checking.
    pub fc_prunings: u64,
    /// Forward-checking runs that emptied a neighbour's domain.
    pub fc_contradictions: u64,
    /// Value trials made by the backtracking search.
    pub nodes_visited: u64,
    /// Purge logs replayed on failed branches.
    pub backtracks: u64,
}

/// Renders the counters as a table for terminal output.
pub fn render_stats_table(stats: &SearchStats) -> String {
    let mut table = Table::new();
    table.add_row(Row::new(vec![Cell::new("Counter"), Cell::new("Value")]));

    let rows = [
        ("AC-3 revisions", stats.ac3_revisions),
        ("AC-3 prunings", stats.ac3_prunings),
        ("Forward-check prunings", stats.fc_prunings),
        ("Forward-check contradictions", stats.fc_contradictions),
        ("Nodes visited", stats.nodes_visited),
        ("Backtracks", stats.backtracks),
    ];
    for (name, value) in rows {
        table.add_row(Row::new(vec![
            Cell::new(name),
            Cell::new(&value.to_string()),
        ]));
    }

    table.to_string()
}
