use std::process::ExitCode;
use std::sync::Arc;

use chrono::{DateTime, Local, NaiveTime};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use geo_checkin::checkin::{AttemptOutcome, CheckInController, Notification, SubmissionClient};
use geo_checkin::{AppError, AppResult, Config, Coordinate};

/// Record attendance at a work location during the morning window
#[derive(Parser, Debug)]
#[command(name = "checkin", version)]
struct Cli {
    /// Your email, sent with the check-in
    #[arg(long)]
    user_email: String,
    /// Your manager's email, sent with the check-in
    #[arg(long)]
    manager_email: String,
    /// Work location as "lat,lng"
    #[arg(long)]
    work: Option<Coordinate>,
    /// Current position as "lat,lng"
    #[arg(long)]
    current: Coordinate,
    /// Local time of the attempt as HH:MM (defaults to now)
    #[arg(long, value_parser = parse_time)]
    at: Option<NaiveTime>,
    /// Override CHECKIN_ENDPOINT
    #[arg(long)]
    endpoint: Option<String>,
}

fn parse_time(value: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|e| format!("expected HH:MM: {}", e))
}

fn attempt_time(at: Option<NaiveTime>) -> AppResult<DateTime<Local>> {
    let Some(time) = at else {
        return Ok(Local::now());
    };

    Local::now()
        .date_naive()
        .and_time(time)
        .and_local_timezone(Local)
        .earliest()
        .ok_or_else(|| AppError::BadRequest(format!("{} does not exist in the local timezone today", time)))
}

/// What one run of the tool produced
#[derive(Debug)]
struct Report {
    accepted: bool,
    notifications: Vec<Notification>,
}

async fn run(cli: Cli) -> AppResult<Report> {
    let config = Config::from_env()?;
    let client = match cli.endpoint {
        Some(endpoint) => SubmissionClient::new(endpoint),
        None => SubmissionClient::from_config(&config),
    };
    tracing::debug!(endpoint = client.endpoint(), "Using check-in endpoint");

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel::<Notification>();
    let mut controller = CheckInController::new(client, Arc::new(tx));

    if let Some(work) = cli.work {
        controller.set_work_location(work);
    }

    let now = attempt_time(cli.at)?;
    let outcome = controller.attempt_check_in(cli.current, &now, &cli.user_email, &cli.manager_email);

    let accepted = match outcome {
        AttemptOutcome::Accepted(submission) => {
            if let Some(submission) = submission {
                submission
                    .await
                    .map_err(|e| AppError::Internal(format!("Submission task failed: {}", e)))?;
            }
            true
        }
        AttemptOutcome::Rejected(_) | AttemptOutcome::Suppressed => false,
    };

    // Dropping the controller closes the channel once the submission is done
    drop(controller);
    let mut notifications = Vec::new();
    while let Some(notification) = rx.recv().await {
        notifications.push(notification);
    }

    Ok(Report {
        accepted,
        notifications,
    })
}

fn exit_status(result: &AppResult<Report>) -> u8 {
    match result {
        Ok(report) if report.accepted => 0,
        _ => 1,
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "geo_checkin=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = run(Cli::parse()).await;
    match &result {
        Ok(report) => {
            for notification in &report.notifications {
                println!("{}", notification);
            }
        }
        Err(e) => tracing::error!(error = %e, "Check-in failed"),
    }

    ExitCode::from(exit_status(&result))
}
