use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone};
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::checkin::decision::{evaluate, Rejection, Verdict};
use crate::checkin::submission::{CheckInRecord, Submitter};
use crate::utils::geo::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckInState {
    NotCheckedIn,
    CheckedIn,
}

/// User-facing messages emitted by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    CheckedIn,
    SubmissionFailed,
    NoWorkLocation,
    OutOfRangeOrOutsideWindow,
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Notification::CheckedIn => "Check-in successful.",
            Notification::SubmissionFailed => "Failed to send check-in data to the server.",
            Notification::NoWorkLocation => "No work location set.",
            Notification::OutOfRangeOrOutsideWindow => {
                "You are outside the allowed radius or outside the check-in time window."
            }
        };
        f.write_str(message)
    }
}

impl From<Rejection> for Notification {
    fn from(rejection: Rejection) -> Self {
        match rejection {
            Rejection::NoWorkLocationSet => Notification::NoWorkLocation,
            Rejection::OutOfRangeOrOutsideWindow => Notification::OutOfRangeOrOutsideWindow,
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Writes every notification to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification {
            Notification::CheckedIn => tracing::info!(%notification, "Notify"),
            _ => tracing::warn!(%notification, "Notify"),
        }
    }
}

impl Notifier for UnboundedSender<Notification> {
    fn notify(&self, notification: Notification) {
        // Nobody listening any more is not the controller's problem
        let _ = self.send(notification);
    }
}

#[derive(Debug)]
pub enum AttemptOutcome {
    /// Already checked in; the attempt was not evaluated
    Suppressed,
    Rejected(Rejection),
    /// Carries the detached submission task, or `None` when there was no
    /// runtime to run it on (already reported as `SubmissionFailed`)
    Accepted(Option<JoinHandle<()>>),
}

/// Drives check-in attempts for one session.
///
/// Owns the work location and the check-in state; nothing else mutates them.
/// At most one attempt is ever accepted, after which every further attempt
/// is suppressed.
pub struct CheckInController<S: Submitter> {
    submitter: Arc<S>,
    notifier: Arc<dyn Notifier>,
    work_location: Option<Coordinate>,
    state: CheckInState,
}

impl<S: Submitter> CheckInController<S> {
    pub fn new(submitter: S, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            submitter: Arc::new(submitter),
            notifier,
            work_location: None,
            state: CheckInState::NotCheckedIn,
        }
    }

    pub fn state(&self) -> CheckInState {
        self.state
    }

    pub fn work_location(&self) -> Option<Coordinate> {
        self.work_location
    }

    /// Replace the work location. Still allowed after check-in, where it has no effect.
    pub fn set_work_location(&mut self, location: Coordinate) {
        tracing::debug!(location = %location, state = ?self.state, "Work location set");
        self.work_location = Some(location);
    }

    pub fn attempt_check_in_now(
        &mut self,
        current: Coordinate,
        user_email: &str,
        manager_email: &str,
    ) -> AttemptOutcome {
        self.attempt_check_in(current, &Local::now(), user_email, manager_email)
    }

    /// Run one attempt up to its verdict.
    ///
    /// On acceptance the submission is spawned onto the current Tokio runtime
    /// and only ever reports back through the notifier. Outside a runtime the
    /// check-in still stands and the submission is reported as failed.
    pub fn attempt_check_in<Tz>(
        &mut self,
        current: Coordinate,
        now: &DateTime<Tz>,
        user_email: &str,
        manager_email: &str,
    ) -> AttemptOutcome
    where
        Tz: TimeZone,
    {
        if self.state == CheckInState::CheckedIn {
            tracing::debug!("Already checked in, ignoring attempt");
            return AttemptOutcome::Suppressed;
        }

        match evaluate(current, self.work_location, &now.naive_local().time()) {
            Verdict::Accepted => {
                self.state = CheckInState::CheckedIn;
                tracing::info!(user_email, manager_email, "Check-in accepted");
                self.notifier.notify(Notification::CheckedIn);

                let record = CheckInRecord::new(user_email, manager_email, now);
                AttemptOutcome::Accepted(self.spawn_submission(record))
            }
            Verdict::Rejected(rejection) => {
                tracing::info!(user_email, reason = %rejection, "Check-in rejected");
                self.notifier.notify(rejection.into());
                AttemptOutcome::Rejected(rejection)
            }
        }
    }

    fn spawn_submission(&self, record: CheckInRecord) -> Option<JoinHandle<()>> {
        let runtime = match Handle::try_current() {
            Ok(runtime) => runtime,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    user_email = %record.user_email,
                    "No runtime available to submit check-in"
                );
                self.notifier.notify(Notification::SubmissionFailed);
                return None;
            }
        };

        let submitter = Arc::clone(&self.submitter);
        let notifier = Arc::clone(&self.notifier);

        let task = runtime.spawn(async move {
            if let Err(e) = submitter.submit(&record).await {
                tracing::error!(
                    error = %e,
                    user_email = %record.user_email,
                    "Failed to submit check-in"
                );
                notifier.notify(Notification::SubmissionFailed);
            }
        });
        Some(task)
    }
}
