//! Geofenced, time-windowed attendance check-in.

pub mod controller;
pub mod decision;
pub mod submission;

pub use controller::{AttemptOutcome, CheckInController, CheckInState, Notification, Notifier, TracingNotifier};
pub use decision::{evaluate, Rejection, Verdict, MAX_DISTANCE_KM};
pub use submission::{CheckInRecord, SubmissionClient, SubmitError, Submitter};
