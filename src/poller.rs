use std::time::Duration;

use chrono::Utc;
use tracing::{debug, error, info, warn};

use crate::error::PollError;
use crate::homework::{check_response, parse_status};
use crate::platform::{send_message, Notifier};
use crate::practicum::HomeworkApi;

const ERROR_PREFIX: &str = "Сбой в работе программы";

/// Whether the last cycle completed or failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollerState {
    Polling,
    Degraded,
}

/// What a single cycle ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    Delivered,
    Unchanged,
    DeliveryFailed,
    ErrorReported,
    ErrorSuppressed,
    ErrorDeliveryFailed,
}

/// Single-slot caches of the last delivered status message and the last
/// reported error message.
#[derive(Debug, Default)]
pub struct LastMessages {
    success: Option<String>,
    error: Option<String>,
}

impl LastMessages {
    pub fn is_new_success(&self, message: &str) -> bool {
        self.success.as_deref() != Some(message)
    }

    pub fn is_new_error(&self, message: &str) -> bool {
        self.error.as_deref() != Some(message)
    }

    pub fn record_success(&mut self, message: String) {
        self.success = Some(message);
    }

    pub fn record_error(&mut self, message: String) {
        self.error = Some(message);
    }
}

/// Polls the homework API and relays status changes to the notifier.
pub struct Poller<A, N> {
    api: A,
    notifier: N,
    retry_period: Duration,
    cursor: i64,
    last: LastMessages,
    state: PollerState,
}

impl<A, N> Poller<A, N>
where
    A: HomeworkApi,
    N: Notifier,
{
    pub fn new(api: A, notifier: N, retry_period: Duration, cursor: i64) -> Self {
        Self {
            api,
            notifier,
            retry_period,
            cursor,
            last: LastMessages::default(),
            state: PollerState::Polling,
        }
    }

    pub fn cursor(&self) -> i64 {
        self.cursor
    }

    pub fn state(&self) -> PollerState {
        self.state
    }

    /// Poll forever, sleeping `retry_period` after every cycle.
    pub async fn run(&mut self) {
        info!(
            "Poller started (cursor={}, retry period {}s)",
            self.cursor,
            self.retry_period.as_secs()
        );
        loop {
            let outcome = self.run_cycle().await;
            debug!(
                "Cycle finished: {:?} (state={:?}, cursor={})",
                outcome,
                self.state(),
                self.cursor()
            );
            tokio::time::sleep(self.retry_period).await;
        }
    }

    /// Run one fetch-validate-format-notify cycle.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        match self.poll_once().await {
            Ok(message) => {
                self.set_state(PollerState::Polling);
                self.deliver_status(message).await
            }
            Err(e) => {
                self.set_state(PollerState::Degraded);
                self.report_error(&e).await
            }
        }
    }

    async fn poll_once(&self) -> Result<String, PollError> {
        let response = self.api.homework_statuses(self.cursor).await?;
        let homework = check_response(&response)?;
        parse_status(homework)
    }

    async fn deliver_status(&mut self, message: String) -> CycleOutcome {
        if !self.last.is_new_success(&message) {
            debug!("No new homework statuses");
            return CycleOutcome::Unchanged;
        }
        if !send_message(&self.notifier, &message).await {
            return CycleOutcome::DeliveryFailed;
        }
        self.last.record_success(message);
        self.cursor = Utc::now().timestamp();
        CycleOutcome::Delivered
    }

    async fn report_error(&mut self, err: &PollError) -> CycleOutcome {
        let message = format!("{}: {}", ERROR_PREFIX, err);
        error!("{}", message);
        if !self.last.is_new_error(&message) {
            return CycleOutcome::ErrorSuppressed;
        }
        if !send_message(&self.notifier, &message).await {
            return CycleOutcome::ErrorDeliveryFailed;
        }
        self.last.record_error(message);
        CycleOutcome::ErrorReported
    }

    fn set_state(&mut self, next: PollerState) {
        if self.state == next {
            return;
        }
        match next {
            PollerState::Degraded => warn!("Poller degraded: cycle failed"),
            PollerState::Polling => info!("Poller recovered"),
        }
        self.state = next;
    }
}
