use crate::client::ClientError;
use crate::config::PollSettings;
use crate::errors::LocationError;
use std::future::Future;
use tokio::time::Instant;
use tracing::{debug, warn};

/// A read-only check against live cluster state, paired with a description
/// of what is currently observed. The description is only computed when a
/// wait gives up, so it reflects the latest state.
pub struct ExitCondition<C, M> {
    resource: String,
    check: C,
    failure_message: M,
}

impl<C, CF, M, MF> ExitCondition<C, M>
where
    C: Fn() -> CF,
    CF: Future<Output = Result<bool, ClientError>>,
    M: Fn() -> MF,
    MF: Future<Output = String>,
{
    pub fn new(resource: impl Into<String>, check: C, failure_message: M) -> Self {
        Self {
            resource: resource.into(),
            check,
            failure_message,
        }
    }
}

/// Evaluates `condition` now and then every `poll.interval` until it holds
/// or `poll.timeout` has elapsed.
///
/// Transient client errors count as "not yet" and are retried until the
/// deadline; any other client error ends the wait immediately.
pub async fn wait_for_exit_condition<C, CF, M, MF>(
    condition: ExitCondition<C, M>,
    poll: &PollSettings,
) -> Result<(), LocationError>
where
    C: Fn() -> CF,
    CF: Future<Output = Result<bool, ClientError>>,
    M: Fn() -> MF,
    MF: Future<Output = String>,
{
    poll.validate()?;

    let started = Instant::now();
    let mut attempts: u32 = 0;
    loop {
        attempts += 1;
        match (condition.check)().await {
            Ok(true) => {
                debug!(
                    "[Poll] {} converged after {} attempt(s) in {:?}",
                    condition.resource,
                    attempts,
                    started.elapsed()
                );
                return Ok(());
            }
            Ok(false) => {
                debug!(
                    "[Poll] {} not converged yet (attempt {})",
                    condition.resource, attempts
                );
            }
            Err(e) if e.is_transient() => {
                warn!(
                    "[Poll] Transient error checking {} (attempt {}): {}",
                    condition.resource, attempts, e
                );
            }
            Err(e) => return Err(LocationError::Client(e)),
        }

        let elapsed = started.elapsed();
        if elapsed >= poll.timeout {
            let diagnostic = (condition.failure_message)().await;
            return Err(LocationError::ConvergenceTimeout {
                resource: condition.resource,
                diagnostic,
                waited: elapsed,
            });
        }
        tokio::time::sleep(poll.interval.min(poll.timeout - elapsed)).await;
    }
}

/// Runs a single client call, repeating it every `poll.interval` while it
/// fails transiently. Gives up with the last error once `poll.timeout` has
/// elapsed; other errors are returned straight away.
pub async fn retry_transient<T, F, Fut>(
    what: &str,
    poll: &PollSettings,
    call: F,
) -> Result<T, LocationError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, ClientError>>,
{
    poll.validate()?;

    let started = Instant::now();
    let mut attempts: u32 = 0;
    loop {
        attempts += 1;
        match call().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_transient() => {
                let elapsed = started.elapsed();
                if elapsed >= poll.timeout {
                    return Err(e.into());
                }
                warn!(
                    "[Poll] Transient error on {} (attempt {}): {}",
                    what, attempts, e
                );
                tokio::time::sleep(poll.interval.min(poll.timeout - elapsed)).await;
            }
            Err(e) => return Err(e.into()),
        }
    }
}
