//! Stack creation

use super::{CREATE_DEADLINE, STACK_POLL_INTERVAL};
use crate::codes::orchestration;
use crate::convergence::{PollBudget, WaitError, wait_until};
use crate::error::{Abort, Result};
use skyfleet_cloud::{CloudSession, Created, Observation, StackSpec};

/// Create a new stack from a template and wait for "create_complete".
pub async fn create_stack(session: &CloudSession, spec: &StackSpec) -> Result<Created> {
    spec.validate()
        .map_err(|e| Abort::from_cloud(orchestration::MISSING_PARAMS, e))?;

    let created = session
        .stacks
        .create_stack(spec)
        .await
        .map_err(|e| Abort::from_cloud(orchestration::FAILED_CREATE_STACK, e))?;

    tracing::info!("created new stack {} id: {}", spec.name, created.id);

    let converged = wait_until(
        || session.stacks.list_stacks(),
        |stacks: &Vec<Observation>| {
            stacks
                .iter()
                .any(|s| s.name == spec.name && s.status_is("create_complete"))
        },
        STACK_POLL_INTERVAL,
        PollBudget::Deadline(CREATE_DEADLINE),
    )
    .await;

    match converged {
        Ok(_) => {
            tracing::info!("new stack {} is ready", spec.name);
            Ok(created)
        }
        Err(WaitError::Timeout(t)) => Err(Abort::new(
            orchestration::FAILED_STACK_CONVERGENCE,
            format!("stack {} did not reach create_complete: {t}", spec.name),
        )),
        Err(WaitError::Fetch(e)) => {
            Err(Abort::from_cloud(orchestration::FAILED_VERIFY_NEW_STACK, e))
        }
    }
}
