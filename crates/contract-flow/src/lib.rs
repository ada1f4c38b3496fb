//! Contract lifecycle presentation
//!
//! The backend drives every contract transition. This crate only maps the
//! status it reports onto the milestone list shown to landlord and tenant:
//! - `steps`: which milestones apply and which are completed, current or pending
//! - `details`: headline and next actor for each status

pub mod details;
pub mod steps;

pub use details::{flow_details, FlowDetails, NextActor};
pub use steps::{
    steps_for, Highlight, Position, StepDefinition, StepProgress, StepState, StepView,
    ALTERNATE_STEP, ANCHOR_STEP_ID, CONTRACT_STEPS,
};
