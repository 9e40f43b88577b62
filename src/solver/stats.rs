use std::fmt::{self, Debug, Display, Formatter};

use prettytable::format::consts::FORMAT_CLEAN;
use prettytable::{Cell, Row, Table};
use separator::Separatable;

/// Search counters, split by depth (number of pushes from the initial state).
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Stats {
    created_states: Vec<u64>,
    visited_states: Vec<u64>,
    duplicate_states: Vec<u64>,
}

impl Stats {
    pub(crate) fn new() -> Self {
        Stats::default()
    }

    pub fn total_created(&self) -> u64 {
        self.created_states.iter().sum::<u64>()
    }

    pub fn total_unique_visited(&self) -> u64 {
        self.visited_states.iter().sum::<u64>()
    }

    pub fn total_reached_duplicates(&self) -> u64 {
        self.duplicate_states.iter().sum::<u64>()
    }

    /// How deep the search got.
    pub fn max_depth(&self) -> usize {
        self.visited_states.len().saturating_sub(1)
    }

    pub(crate) fn add_created(&mut self, depth: usize) -> bool {
        Self::add(&mut self.created_states, depth)
    }

    pub(crate) fn add_unique_visited(&mut self, depth: usize) -> bool {
        Self::add(&mut self.visited_states, depth)
    }

    pub(crate) fn add_reached_duplicate(&mut self, depth: usize) -> bool {
        Self::add(&mut self.duplicate_states, depth)
    }

    /// Returns true when `depth` is seen for the first time.
    fn add(counts: &mut Vec<u64>, depth: usize) -> bool {
        let mut ret = false;

        // while because some depths might be skipped - e.g. when everything there is a duplicate
        while depth >= counts.len() {
            counts.push(0);
            ret = true;
        }
        counts[depth] += 1;
        ret
    }

    fn at(counts: &[u64], depth: usize) -> u64 {
        counts.get(depth).cloned().unwrap_or(0)
    }
}

impl Debug for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "total created / unique visited / reached duplicates:")?;
        writeln!(
            f,
            "{:<16}{:<17}{}",
            self.total_created().separated_string(),
            self.total_unique_visited().separated_string(),
            self.total_reached_duplicates().separated_string()
        )
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let created = self.total_created();
        let visited = self.total_unique_visited();
        let duplicates = self.total_reached_duplicates();
        writeln!(f, "States created total: {}", created.separated_string())?;
        writeln!(f, "Unique visited total: {}", visited.separated_string())?;
        writeln!(f, "Reached duplicates total: {}", duplicates.separated_string())?;
        writeln!(f)?;

        let mut table = Table::new();
        table.set_format(*FORMAT_CLEAN);
        table.set_titles(Row::new(vec![
            Cell::new("Depth"),
            Cell::new("Created"),
            Cell::new("Unique"),
            Cell::new("Duplicates"),
        ]));
        // created is always the longest - nothing is visited or duplicate without being created first
        for depth in 0..self.created_states.len() {
            table.add_row(Row::new(vec![
                Cell::new(&format!("{}:", depth)),
                Cell::new(&Self::at(&self.created_states, depth).separated_string()),
                Cell::new(&Self::at(&self.visited_states, depth).separated_string()),
                Cell::new(&Self::at(&self.duplicate_states, depth).separated_string()),
            ]));
        }
        write!(f, "{}", table)
    }
}
