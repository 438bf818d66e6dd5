//! Controller configuration.

use crate::columns::Column;
use crate::theme::Theme;

/// Behavior knobs for [`EpochBar`](crate::EpochBar).
///
/// A refresh rate of zero disables the bar outright; negative rates are
/// unrepresentable by construction.
#[derive(Debug, Clone)]
pub struct BarConfig {
    /// Units between renders; 0 disables rendering entirely.
    pub refresh_rate: u32,
    /// Keep finished rows on screen across epochs instead of resetting
    /// them in place.
    pub leave: bool,
    /// Unit budget for the sanity-check phase.
    pub sanity_steps: u64,
    /// Style set read at composition time.
    pub theme: Theme,
    /// Replaces the default column layout wholesale when set.
    pub columns: Option<Vec<Column>>,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            refresh_rate: 1,
            leave: false,
            sanity_steps: 2,
            theme: Theme::default(),
            columns: None,
        }
    }
}

impl BarConfig {
    /// Starts from the defaults: rate 1, reuse rows, two sanity steps.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the units-between-renders rate.
    pub fn refresh_rate(mut self, rate: u32) -> Self {
        self.refresh_rate = rate;
        self
    }

    /// Keeps finished rows on screen across epochs.
    pub fn leave(mut self, leave: bool) -> Self {
        self.leave = leave;
        self
    }

    /// Sets the sanity-check unit budget.
    pub fn sanity_steps(mut self, steps: u64) -> Self {
        self.sanity_steps = steps;
        self
    }

    /// Sets the style set.
    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Replaces the default column layout.
    pub fn columns(mut self, columns: Vec<Column>) -> Self {
        self.columns = Some(columns);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_render_every_unit() {
        let config = BarConfig::new();
        assert_eq!(config.refresh_rate, 1);
        assert!(!config.leave);
        assert_eq!(config.sanity_steps, 2);
        assert!(config.columns.is_none());
    }

    #[test]
    fn builder_chains() {
        let config = BarConfig::new()
            .refresh_rate(3)
            .leave(true)
            .sanity_steps(5)
            .columns(vec![Column::Bar]);
        assert_eq!(config.refresh_rate, 3);
        assert!(config.leave);
        assert_eq!(config.sanity_steps, 5);
        assert_eq!(config.columns, Some(vec![Column::Bar]));
    }
}
