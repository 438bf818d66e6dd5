//! Row layout elements and their composition.

use std::time::Duration;

use crossterm::style::Stylize;

use crate::task::ProgressTask;
use crate::theme::Theme;

/// Glyph bar width in cells.
const BAR_WIDTH: usize = 30;
/// Minimum width of the description column, so rows line up.
const DESC_WIDTH: usize = 15;
/// Bar cell glyph.
const GLYPH: &str = "━";

/// One renderable element of a progress row.
///
/// The default layout is [`default_columns`]; hosts replace it
/// wholesale through [`BarConfig::columns`](crate::BarConfig::columns).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Column {
    /// Phase label ("Epoch 3", "Validation", ...).
    Description,
    /// Fixed-width glyph bar.
    Bar,
    /// `completed/total` readout.
    Counts,
    /// Elapsed and estimated remaining time.
    Time,
    /// Throughput in units per second.
    Speed,
    /// Host-supplied static text.
    Text(String),
}

/// The canonical layout: description, bar, counts, time, throughput.
pub fn default_columns() -> Vec<Column> {
    vec![
        Column::Description,
        Column::Bar,
        Column::Counts,
        Column::Time,
        Column::Speed,
    ]
}

impl Column {
    /// Composes this element for one task, styled from `theme`.
    pub fn compose(&self, task: &ProgressTask, theme: &Theme) -> String {
        match self {
            Column::Description => {
                let label = format!("{:<DESC_WIDTH$}", task.description());
                format!("{}", label.with(theme.description))
            }
            Column::Bar => compose_bar(task, theme),
            Column::Counts => {
                let readout = match task.total() {
                    Some(total) => format!("{}/{total}", task.completed()),
                    None => format!("{}/?", task.completed()),
                };
                format!("{}", readout.with(theme.counts))
            }
            Column::Time => {
                let elapsed = format_clock(task.elapsed());
                let remaining = task
                    .remaining()
                    .map_or_else(|| "-:--:--".to_string(), format_clock);
                format!("{}", format!("{elapsed} • {remaining}").with(theme.time))
            }
            Column::Speed => {
                let readout = format!("{:.2}it/s", task.speed());
                format!("{}", readout.with(theme.speed))
            }
            Column::Text(text) => text.clone(),
        }
    }
}

/// Joins every column fragment of `columns` for one task.
pub fn compose_row(task: &ProgressTask, columns: &[Column], theme: &Theme) -> String {
    let fragments: Vec<String> = columns.iter().map(|c| c.compose(task, theme)).collect();
    fragments.join(" ")
}

fn compose_bar(task: &ProgressTask, theme: &Theme) -> String {
    if let Some(fraction) = task.fraction() {
        let filled = ((fraction * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
        let color = if task.is_finished() {
            theme.bar_finished
        } else {
            theme.bar
        };
        format!(
            "{}{}",
            GLYPH.repeat(filled).with(color),
            GLYPH.repeat(BAR_WIDTH - filled).with(theme.bar_back),
        )
    } else {
        // Unknown total: sweep a single pulse cell across the track.
        let pos = usize::try_from(task.completed()).unwrap_or(0) % BAR_WIDTH;
        format!(
            "{}{}{}",
            GLYPH.repeat(pos).with(theme.bar_back),
            GLYPH.with(theme.bar_pulse),
            GLYPH.repeat(BAR_WIDTH - pos - 1).with(theme.bar_back),
        )
    }
}

fn format_clock(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}
