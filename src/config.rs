/// What the binary does with a solution once the solver finds one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Remove pushes that don't change anything before printing.
    pub optimize: bool,
    /// Print the level after every move, not just after pushes.
    pub include_steps: bool,
    /// Print search progress and statistics.
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            optimize: true,
            include_steps: false,
            verbose: false,
        }
    }
}
