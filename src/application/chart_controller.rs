// Chart set controller - owns one live chart per quantity
//
// Policy: full invalidation on view-state change. Every change releases all
// live handles and recreates the set from scratch; there are no incremental
// chart updates.
use crate::application::view_state::ViewStateSubscriber;
use crate::domain::chart::ChartSpec;
use crate::domain::quantity::Quantity;
use crate::domain::reading::ReadingSeries;
use crate::domain::theme::DisplayTheme;
use chrono_tz::Tz;
use std::collections::BTreeMap;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("no render target for the {0} chart")]
    TargetMissing(Quantity),

    #[error("rendering engine error: {0}")]
    Engine(String),
}

/// A live chart bound to one quantity and one render target.
pub trait ChartHandle: Send {
    /// Free the chart's rendering resources. The handle is consumed.
    fn release(self: Box<Self>);
}

/// The rendering engine: turns a declarative chart description into a live,
/// disposable chart.
pub trait ChartRenderer: Send {
    fn render(&mut self, spec: ChartSpec) -> Result<Box<dyn ChartHandle>, RenderError>;
}

pub struct ChartSetController {
    renderer: Box<dyn ChartRenderer>,
    timezone: Tz,
    handles: BTreeMap<Quantity, Box<dyn ChartHandle>>,
}

impl ChartSetController {
    pub fn new(renderer: Box<dyn ChartRenderer>, timezone: Tz) -> Self {
        Self {
            renderer,
            timezone,
            handles: BTreeMap::new(),
        }
    }

    /// Quantities that currently have a live chart
    pub fn live_quantities(&self) -> Vec<Quantity> {
        self.handles.keys().copied().collect()
    }

    pub fn chart_count(&self) -> usize {
        self.handles.len()
    }

    /// Release every live chart, then build one chart per quantity.
    ///
    /// An empty series leaves no chart rendered. A quantity whose target is
    /// unavailable is skipped; the others are still built.
    pub fn rebuild(&mut self, series: &ReadingSeries, theme: DisplayTheme) {
        let released = self.release_all();

        if series.is_empty() {
            tracing::debug!(released, "Empty series, no charts rendered");
            return;
        }

        let specs: Vec<ChartSpec> = Quantity::ALL
            .iter()
            .map(|&quantity| ChartSpec::build(quantity, series, theme, self.timezone))
            .collect();

        for spec in specs {
            let quantity = spec.quantity;
            match self.renderer.render(spec) {
                Ok(handle) => {
                    self.handles.insert(quantity, handle);
                }
                Err(e) => {
                    tracing::warn!(%quantity, error = %e, "Skipping chart");
                }
            }
        }

        tracing::debug!(
            released,
            built = self.handles.len(),
            points = series.len(),
            ?theme,
            "Charts rebuilt"
        );
    }

    fn release_all(&mut self) -> usize {
        let handles = std::mem::take(&mut self.handles);
        let count = handles.len();
        for handle in handles.into_values() {
            handle.release();
        }
        count
    }
}

impl ViewStateSubscriber for ChartSetController {
    fn on_view_state_changed(&mut self, series: &ReadingSeries, theme: DisplayTheme) {
        self.rebuild(series, theme);
    }
}

impl Drop for ChartSetController {
    fn drop(&mut self) {
        self.release_all();
    }
}
