//! The progress bar controller.

use std::error::Error as StdError;

use tracing::{debug, trace};

use crate::columns::{Column, default_columns};
use crate::config::BarConfig;
use crate::error::{Error, Result};
use crate::observer::PipelineObserver;
use crate::phase::Phase;
use crate::registry::{SlotOutcome, TaskRegistry};
use crate::render::renderer::Renderer;
use crate::render::{RenderSurface, TerminalSurface};
use crate::task::ProgressTask;
use crate::theme::Theme;
use crate::throttle::RenderThrottle;

/// Live progress bars for a phase-structured pipeline run.
///
/// One row anchors the training loop; secondary phases come and go
/// around it. Hosts drive the four [`PipelineObserver`] hooks inline
/// from their loop; every render happens on the calling thread.
///
/// A render paints every visible row, gated by the refresh rate. Phase
/// ends flush whatever the throttle still holds, and the training row
/// is repainted at its phase end unconditionally so the final state is
/// never lost mid-window.
#[derive(Debug)]
pub struct EpochBar {
    config: BarConfig,
    columns: Vec<Column>,
    registry: TaskRegistry,
    throttle: RenderThrottle,
    pending_surface: Option<Box<dyn RenderSurface>>,
    renderer: Option<Renderer>,
    train_started: bool,
}

impl EpochBar {
    /// Probes the terminal and builds a controller over it.
    ///
    /// The probe runs even for a disabled bar so capability problems
    /// surface at construction, not first use.
    ///
    /// # Errors
    ///
    /// [`Error::SurfaceUnavailable`] when stdout is not an interactive
    /// terminal.
    pub fn new(config: BarConfig) -> Result<Self> {
        let surface = TerminalSurface::detect()?;
        Ok(Self::with_surface(config, Box::new(surface)))
    }

    /// Builds a controller over a caller-supplied surface.
    pub fn with_surface(config: BarConfig, surface: Box<dyn RenderSurface>) -> Self {
        let columns = config.columns.clone().unwrap_or_else(default_columns);
        let throttle = RenderThrottle::new(config.refresh_rate);
        Self {
            config,
            columns,
            registry: TaskRegistry::default(),
            throttle,
            pending_surface: Some(surface),
            renderer: None,
            train_started: false,
        }
    }

    /// Whether the bar renders at all.
    pub fn is_enabled(&self) -> bool {
        self.throttle.rate() > 0
    }

    /// True when the refresh rate is zero and every hook is a no-op.
    pub fn is_disabled(&self) -> bool {
        !self.is_enabled()
    }

    /// Units between renders.
    pub fn refresh_rate(&self) -> u32 {
        self.throttle.rate()
    }

    /// Whether finished rows stay on screen across epochs.
    pub fn leave(&self) -> bool {
        self.config.leave
    }

    /// The active column layout: the host override or the default set.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The style set read at composition time.
    pub fn theme(&self) -> &Theme {
        &self.config.theme
    }

    /// Swaps the style set; takes effect on the next render.
    pub fn set_theme(&mut self, theme: Theme) {
        self.config.theme = theme;
    }

    /// Current task for `phase`, if one exists.
    pub fn task(&self, phase: Phase) -> Option<&ProgressTask> {
        self.registry.current(phase)
    }

    /// Builds the renderer on first use and opens the surface.
    fn ensure_started(&mut self) -> Result<()> {
        if self.renderer.is_none()
            && let Some(surface) = self.pending_surface.take()
        {
            self.renderer = Some(Renderer::new(surface));
        }
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.start()?;
        }
        Ok(())
    }

    /// Paints all visible rows. Render failures stop the renderer and
    /// propagate.
    fn render(&mut self) -> Result<()> {
        let Some(renderer) = self.renderer.as_mut() else {
            return Ok(());
        };
        let visible = self.registry.visible();
        if let Err(err) = renderer.update(&visible, &self.columns, &self.config.theme) {
            if renderer.stop().is_err() {
                debug!("render surface close failed after paint error");
            }
            return Err(Error::Render(err));
        }
        Ok(())
    }

    fn stop_renderer(&mut self) {
        if let Some(renderer) = self.renderer.as_mut()
            && renderer.stop().is_err()
        {
            debug!("render surface close failed during teardown");
        }
    }
}

impl PipelineObserver for EpochBar {
    fn on_phase_start(&mut self, phase: Phase, total: Option<u64>, epoch: u64) -> Result<()> {
        if self.is_disabled() {
            return Ok(());
        }
        debug!(phase = %phase, epoch, ?total, "phase start");
        self.ensure_started()?;

        if phase == Phase::Train && !self.train_started {
            self.train_started = true;
            self.registry.discard_sanity();
        }

        // The sanity pass walks at most its configured budget.
        let total = if phase == Phase::SanityCheck {
            Some(total.map_or(self.config.sanity_steps, |t| t.min(self.config.sanity_steps)))
        } else {
            total
        };

        let outcome = self
            .registry
            .begin_phase(phase, total, epoch, self.config.leave);
        if let SlotOutcome::Reused(id) = outcome
            && let Some(renderer) = self.renderer.as_mut()
            && let Err(err) = renderer.reset(id)
        {
            if renderer.stop().is_err() {
                debug!("render surface close failed after reset error");
            }
            return Err(Error::Render(err));
        }
        Ok(())
    }

    fn on_unit_processed(&mut self, phase: Phase) -> Result<()> {
        if self.is_disabled() {
            return Ok(());
        }
        self.registry.advance(phase, 1);
        if self.throttle.record(phase, 1) {
            trace!(phase = %phase, "throttle fired");
            self.render()?;
        }
        Ok(())
    }

    fn on_phase_end(&mut self, phase: Phase) -> Result<()> {
        if self.is_disabled() {
            return Ok(());
        }
        debug!(phase = %phase, "phase end");
        // Flush whatever the throttle still holds; the primary row also
        // repaints on an empty window so the run's last state is shown.
        let pending = self.throttle.flush(phase);
        if pending > 0 || phase.is_primary() {
            self.render()?;
        }
        self.registry.finish_phase(phase, self.config.leave);
        Ok(())
    }

    fn on_interrupt(&mut self, error: &(dyn StdError + 'static)) {
        if self.is_disabled() {
            return;
        }
        debug!(error = %error, "pipeline interrupted, releasing the terminal");
        self.stop_renderer();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::NullSurface;

    fn bar(config: BarConfig) -> EpochBar {
        EpochBar::with_surface(config, Box::new(NullSurface))
    }

    #[test]
    fn disabled_hooks_touch_nothing() {
        let mut b = bar(BarConfig::new().refresh_rate(0));
        assert!(b.is_disabled());
        assert_eq!(b.refresh_rate(), 0);
        b.on_phase_start(Phase::Train, Some(4), 0).unwrap();
        b.on_unit_processed(Phase::Train).unwrap();
        b.on_phase_end(Phase::Train).unwrap();
        assert!(b.task(Phase::Train).is_none());
    }

    #[test]
    fn first_train_start_discards_sanity_rows() {
        let mut b = bar(BarConfig::new());
        b.on_phase_start(Phase::SanityCheck, Some(5), 0).unwrap();
        assert!(b.task(Phase::SanityCheck).is_some());

        b.on_phase_start(Phase::Train, Some(4), 0).unwrap();
        assert!(b.task(Phase::SanityCheck).is_none());
        assert!(b.task(Phase::Train).is_some());
    }

    #[test]
    fn sanity_total_clamps_to_the_budget() {
        let mut b = bar(BarConfig::new().sanity_steps(3));
        b.on_phase_start(Phase::SanityCheck, Some(5), 0).unwrap();
        assert_eq!(b.task(Phase::SanityCheck).unwrap().total(), Some(3));
    }

    #[test]
    fn sanity_total_uses_availability_when_smaller() {
        let mut b = bar(BarConfig::new().sanity_steps(3));
        b.on_phase_start(Phase::SanityCheck, Some(1), 0).unwrap();
        assert_eq!(b.task(Phase::SanityCheck).unwrap().total(), Some(1));
    }

    #[test]
    fn sanity_total_falls_back_to_budget_for_unbounded_sources() {
        let mut b = bar(BarConfig::new().sanity_steps(4));
        b.on_phase_start(Phase::SanityCheck, None, 0).unwrap();
        assert_eq!(b.task(Phase::SanityCheck).unwrap().total(), Some(4));
    }

    #[test]
    fn column_override_replaces_the_layout() {
        let custom = vec![Column::Text("fine-tune".to_string()), Column::Bar];
        let b = bar(BarConfig::new().columns(custom.clone()));
        assert_eq!(b.columns(), custom.as_slice());
    }

    #[test]
    fn theme_swap_is_visible_through_the_accessor() {
        let mut b = bar(BarConfig::new());
        let custom = Theme {
            counts: crossterm::style::Color::Red,
            ..Theme::default()
        };
        b.set_theme(custom.clone());
        assert_eq!(b.theme(), &custom);
    }
}
