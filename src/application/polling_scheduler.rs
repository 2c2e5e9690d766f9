// Polling scheduler - The fetch and send timers
use crate::application::dashboard_service::DashboardService;
use std::future::Future;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FirstTick {
    Immediate,
    AfterPeriod,
}

/// One periodic action backed by a tokio task.
///
/// Arming an armed timer and disarming a disarmed one are no-ops. The action
/// is awaited before the next tick, so firings never overlap.
struct Timer {
    name: &'static str,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl Timer {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            task: Mutex::new(None),
        }
    }

    async fn arm<F, Fut>(&self, period: Duration, first: FirstTick, action: F) -> bool
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let mut task = self.task.lock().await;
        if task.as_ref().is_some_and(|handle| !handle.is_finished()) {
            tracing::debug!(timer = self.name, "Timer already armed");
            return false;
        }

        // Two periods ahead must stay representable for the ticker's own arithmetic
        let now = Instant::now();
        let Some(next) = now
            .checked_add(period)
            .filter(|next| next.checked_add(period).is_some())
        else {
            tracing::error!(timer = self.name, ?period, "Timer period out of range, not armed");
            return false;
        };
        let start = match first {
            FirstTick::Immediate => now,
            FirstTick::AfterPeriod => next,
        };
        let name = self.name;

        *task = Some(tokio::spawn(async move {
            let mut ticker = interval_at(start, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                tracing::debug!(timer = name, "Timer fired");
                // Disarming aborts this loop only; a firing already in flight runs to completion
                if let Err(e) = tokio::spawn(action()).await {
                    tracing::error!(timer = name, error = %e, "Timer action panicked");
                }
            }
        }));

        tracing::info!(timer = self.name, period_secs = period.as_secs(), "Timer armed");
        true
    }

    async fn disarm(&self) -> bool {
        match self.task.lock().await.take() {
            Some(handle) => {
                handle.abort();
                tracing::info!(timer = self.name, "Timer disarmed");
                true
            }
            None => false,
        }
    }

    async fn is_armed(&self) -> bool {
        self.task
            .lock()
            .await
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

/// Owns the fetch timer (always on while the view is active) and the
/// user-controlled send timer.
pub struct PollingScheduler {
    service: DashboardService,
    fetch_interval: Duration,
    send_interval: Duration,
    fetch_timer: Timer,
    send_timer: Timer,
}

impl PollingScheduler {
    pub fn new(
        service: DashboardService,
        fetch_interval: Duration,
        send_interval: Duration,
    ) -> Self {
        Self {
            service,
            fetch_interval,
            send_interval,
            fetch_timer: Timer::new("fetch"),
            send_timer: Timer::new("send"),
        }
    }

    /// Start the fetch timer; the first fetch runs immediately.
    pub async fn activate(&self) -> bool {
        let service = self.service.clone();
        self.fetch_timer
            .arm(self.fetch_interval, FirstTick::Immediate, move || {
                let service = service.clone();
                async move {
                    if let Err(e) = service.refresh().await {
                        tracing::warn!(error = %e, "Scheduled fetch failed");
                    }
                }
            })
            .await
    }

    /// Stop both timers. Safe to call in any state.
    pub async fn deactivate(&self) {
        self.fetch_timer.disarm().await;
        self.send_timer.disarm().await;
    }

    /// Arm the periodic send; the first send happens one period from now.
    /// Returns false if it was already armed.
    pub async fn start(&self) -> bool {
        let service = self.service.clone();
        self.send_timer
            .arm(self.send_interval, FirstTick::AfterPeriod, move || {
                let service = service.clone();
                async move {
                    if let Err(e) = service.send_now().await {
                        tracing::warn!(error = %e, "Scheduled send failed");
                    }
                }
            })
            .await
    }

    /// Disarm the periodic send. Returns false if it was not armed.
    pub async fn stop(&self) -> bool {
        self.send_timer.disarm().await
    }

    pub async fn is_active(&self) -> bool {
        self.fetch_timer.is_armed().await
    }

    pub async fn is_sending(&self) -> bool {
        self.send_timer.is_armed().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::chart_controller::ChartSetController;
    use crate::application::testing::{MockSensorClient, RecordingRenderer, reading};
    use crate::application::view_state::ViewState;
    use crate::domain::theme::DisplayTheme;
    use std::sync::Arc;

    const PERIOD: Duration = Duration::from_secs(300);

    fn scheduler(client: &Arc<MockSensorClient>) -> PollingScheduler {
        scheduler_with(client, PERIOD, PERIOD)
    }

    fn scheduler_with(
        client: &Arc<MockSensorClient>,
        fetch_interval: Duration,
        send_interval: Duration,
    ) -> PollingScheduler {
        let charts = ChartSetController::new(
            Box::new(RecordingRenderer::default()),
            chrono_tz::America::Sao_Paulo,
        );
        let service =
            DashboardService::new(client.clone(), 1, ViewState::new(DisplayTheme::Light, charts));
        PollingScheduler::new(service, fetch_interval, send_interval)
    }

    async fn wait(duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_fires_immediately_then_every_period() {
        let client = Arc::new(MockSensorClient::with_readings(vec![reading(20.0, 12)]));
        let scheduler = scheduler(&client);

        assert!(scheduler.activate().await);
        wait(Duration::from_secs(1)).await;
        assert_eq!(client.fetch_calls(), 1);

        wait(PERIOD * 2).await;
        assert_eq!(client.fetch_calls(), 3);
        assert!(scheduler.is_active().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_activate_twice_keeps_one_fetch_timer() {
        let client = Arc::new(MockSensorClient::default());
        let scheduler = scheduler(&client);

        assert!(scheduler.activate().await);
        assert!(!scheduler.activate().await);
        wait(PERIOD + Duration::from_secs(1)).await;

        assert_eq!(client.fetch_calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deactivate_stops_all_firings() {
        let client = Arc::new(MockSensorClient::default());
        let scheduler = scheduler(&client);
        scheduler.activate().await;
        scheduler.start().await;
        wait(Duration::from_secs(1)).await;

        scheduler.deactivate().await;
        let fetches = client.fetch_calls();
        wait(PERIOD * 5).await;

        assert_eq!(client.fetch_calls(), fetches);
        assert_eq!(client.append_calls(), 0);
        assert!(!scheduler.is_active().await);
        assert!(!scheduler.is_sending().await);
        // Teardown is safe to repeat
        scheduler.deactivate().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_timer_is_dormant_until_started() {
        let client = Arc::new(MockSensorClient::default());
        let scheduler = scheduler(&client);

        wait(PERIOD * 3).await;

        assert_eq!(client.append_calls(), 0);
        assert!(!scheduler.is_sending().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_twice_arms_a_single_send_timer() {
        let client = Arc::new(MockSensorClient::default());
        let scheduler = scheduler(&client);

        assert!(scheduler.start().await);
        assert!(!scheduler.start().await);

        wait(Duration::from_secs(1)).await;
        assert_eq!(client.append_calls(), 0);

        wait(PERIOD).await;
        assert_eq!(client.append_calls(), 1);
        // Each send is followed by a refresh
        assert_eq!(client.fetch_calls(), 1);

        wait(PERIOD).await;
        assert_eq!(client.append_calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_suppresses_future_sends() {
        let client = Arc::new(MockSensorClient::default());
        let scheduler = scheduler(&client);
        scheduler.start().await;
        wait(PERIOD + Duration::from_secs(1)).await;
        assert_eq!(client.append_calls(), 1);

        assert!(scheduler.stop().await);
        assert!(!scheduler.stop().await);
        wait(PERIOD * 4).await;

        assert_eq!(client.append_calls(), 1);
        assert_eq!(client.stored().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failing_service_keeps_timers_running() {
        let client = Arc::new(MockSensorClient::default());
        client.set_failing(true);
        let scheduler = scheduler(&client);
        scheduler.activate().await;
        scheduler.start().await;

        wait(PERIOD * 2 + Duration::from_secs(1)).await;

        assert_eq!(client.fetch_calls(), 3);
        assert_eq!(client.append_calls(), 2);
        assert!(scheduler.is_active().await);
        assert!(scheduler.is_sending().await);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unrepresentable_period_is_refused() {
        let client = Arc::new(MockSensorClient::default());
        let scheduler = scheduler_with(&client, Duration::MAX, Duration::MAX);

        assert!(!scheduler.start().await);
        assert!(!scheduler.activate().await);
        assert!(!scheduler.is_sending().await);
        assert!(!scheduler.is_active().await);

        wait(PERIOD).await;
        assert_eq!(client.fetch_calls(), 0);
        assert_eq!(client.append_calls(), 0);
        // Teardown still works on never-armed timers
        scheduler.deactivate().await;
    }
}
