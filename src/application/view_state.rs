// View state - the single snapshot every chart is rendered from
use crate::domain::reading::ReadingSeries;
use crate::domain::theme::DisplayTheme;

/// Receives every view-state change. A view state has exactly one subscriber.
pub trait ViewStateSubscriber: Send {
    fn on_view_state_changed(&mut self, series: &ReadingSeries, theme: DisplayTheme);
}

/// Current reading series plus display theme.
///
/// Both setters overwrite in full and notify the subscriber; there is no
/// partial or merge update.
pub struct ViewState<S: ViewStateSubscriber> {
    series: ReadingSeries,
    theme: DisplayTheme,
    subscriber: S,
}

impl<S: ViewStateSubscriber> ViewState<S> {
    pub fn new(theme: DisplayTheme, subscriber: S) -> Self {
        Self {
            series: ReadingSeries::default(),
            theme,
            subscriber,
        }
    }

    pub fn series(&self) -> &ReadingSeries {
        &self.series
    }

    pub fn theme(&self) -> DisplayTheme {
        self.theme
    }

    pub fn subscriber(&self) -> &S {
        &self.subscriber
    }

    pub fn replace_series(&mut self, series: ReadingSeries) {
        self.series = series;
        self.notify();
    }

    pub fn set_theme(&mut self, theme: DisplayTheme) {
        self.theme = theme;
        self.notify();
    }

    fn notify(&mut self) {
        self.subscriber.on_view_state_changed(&self.series, self.theme);
    }
}
