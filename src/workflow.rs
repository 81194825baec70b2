//! Combined order lifecycle state machine.
//!
//! An order carries two coupled dimensions: the customer-facing
//! [`OrderStatus`] and the internal production [`WorkflowStage`]. Both are
//! owned by this module: services build an [`OrderState`] from the stored
//! row, apply exactly one [`WorkflowEvent`], and persist the returned state
//! in a single transaction. No call site updates one dimension without the
//! other.

use serde::{Deserialize, Serialize};

use crate::models::{OrderStatus, WorkflowStage};

/// Snapshot of both lifecycle dimensions of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderState {
    pub status: OrderStatus,
    pub stage: Option<WorkflowStage>,
}

impl OrderState {
    pub fn new() -> Self {
        Self {
            status: OrderStatus::Pending,
            stage: None,
        }
    }

    pub fn of(status: OrderStatus, stage: Option<WorkflowStage>) -> Self {
        Self { status, stage }
    }
}

impl Default for OrderState {
    fn default() -> Self {
        Self::new()
    }
}

/// Inputs that drive the order lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowEvent {
    /// Caller-requested customer-facing status change, validated against
    /// the forward chain. The stage is left untouched.
    SetStatus(OrderStatus),
    /// Assignment created: stage becomes `assigned`, status forced to
    /// `confirmed`. Also legal on a rework loop after a failed check.
    Assign,
    /// Assignment moved to in-progress: stage becomes `in_progress`.
    StartStitching,
    /// Assignment completed: stage `stitching_complete`, status `ready`.
    CompleteStitching,
    /// Quality check recorded. Pass: stage `approved`, status `ready`.
    /// Fail: stage `quality_check` (rework), status `in_progress`.
    QualityCheck { passed: bool },
    /// Explicit completion: stage `completed`, status `delivered`.
    Complete,
    /// Cancellation, legal from any non-terminal status.
    Cancel,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot apply {event} to order in status {status}{}", stage_suffix(.stage))]
pub struct TransitionError {
    pub status: OrderStatus,
    pub stage: Option<WorkflowStage>,
    pub event: String,
}

fn stage_suffix(stage: &Option<WorkflowStage>) -> String {
    match stage {
        Some(s) => format!(" (stage {s})"),
        None => String::new(),
    }
}

/// Legal caller-requested status moves. Forward along the chain only;
/// `fitting_scheduled` may be skipped since fittings are optional for
/// alteration work. Cancellation is handled by [`WorkflowEvent::Cancel`].
pub fn status_transition_allowed(from: OrderStatus, to: OrderStatus) -> bool {
    use OrderStatus::*;
    match (from, to) {
        (Pending, Confirmed) => true,
        (Confirmed, InProgress) => true,
        (InProgress, FittingScheduled) | (InProgress, Ready) => true,
        (FittingScheduled, Ready) => true,
        (Ready, Delivered) => true,
        (_, Cancelled) => !from.is_terminal(),
        _ => false,
    }
}

impl OrderState {
    /// Applies one lifecycle event, returning the successor state or a
    /// [`TransitionError`] when the event is illegal in the current state.
    pub fn apply(self, event: WorkflowEvent) -> Result<OrderState, TransitionError> {
        let reject = |label: &str| {
            Err(TransitionError {
                status: self.status,
                stage: self.stage,
                event: label.to_string(),
            })
        };

        match event {
            WorkflowEvent::SetStatus(to) => {
                if status_transition_allowed(self.status, to) {
                    Ok(OrderState::of(to, self.stage))
                } else {
                    reject(&format!("set_status({to})"))
                }
            }
            WorkflowEvent::Assign => {
                if self.status.is_terminal() {
                    return reject("assign");
                }
                match self.stage {
                    // Fresh order, re-assignment, or rework after a failed
                    // quality check.
                    None | Some(WorkflowStage::Assigned) | Some(WorkflowStage::QualityCheck) => Ok(
                        OrderState::of(OrderStatus::Confirmed, Some(WorkflowStage::Assigned)),
                    ),
                    _ => reject("assign"),
                }
            }
            WorkflowEvent::StartStitching => match self.stage {
                Some(WorkflowStage::Assigned) => {
                    Ok(OrderState::of(self.status, Some(WorkflowStage::InProgress)))
                }
                _ => reject("start_stitching"),
            },
            WorkflowEvent::CompleteStitching => match self.stage {
                // Stitching may be completed straight from `assigned`; the
                // explicit start step is optional.
                Some(WorkflowStage::Assigned) | Some(WorkflowStage::InProgress) => Ok(
                    OrderState::of(OrderStatus::Ready, Some(WorkflowStage::StitchingComplete)),
                ),
                _ => reject("complete_stitching"),
            },
            WorkflowEvent::QualityCheck { passed } => match self.stage {
                Some(WorkflowStage::StitchingComplete) | Some(WorkflowStage::QualityCheck) => {
                    if passed {
                        Ok(OrderState::of(
                            OrderStatus::Ready,
                            Some(WorkflowStage::Approved),
                        ))
                    } else {
                        Ok(OrderState::of(
                            OrderStatus::InProgress,
                            Some(WorkflowStage::QualityCheck),
                        ))
                    }
                }
                _ => reject("quality_check"),
            },
            WorkflowEvent::Complete => match self.stage {
                Some(WorkflowStage::Approved) => Ok(OrderState::of(
                    OrderStatus::Delivered,
                    Some(WorkflowStage::Completed),
                )),
                _ => reject("complete"),
            },
            WorkflowEvent::Cancel => {
                if self.status.is_terminal() {
                    reject("cancel")
                } else {
                    Ok(OrderState::of(OrderStatus::Cancelled, self.stage))
                }
            }
        }
    }
}
