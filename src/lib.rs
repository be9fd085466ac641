//! A lattice-based Frenet-frame motion planner core.
//!
//! Given the vehicle's current state, a reference line and a set of predicted
//! obstacles, this crate generates a bundle of candidate longitudinal and lateral
//! motion primitives, evaluates them against cost and feasibility checks, and selects
//! the cheapest collision-free trajectory. Behavioural decision-making, perception and
//! control are out of scope; see the [`frame`] and [`target`] modules for the trait
//! seams those subsystems plug into.

pub mod bundle;
pub mod collision;
pub mod combine;
pub mod config;
pub mod constraints;
pub mod curve1d;
pub mod error;
pub mod evaluator;
pub mod frame;
pub mod frenet;
pub mod instrumentation;
pub mod obstacle;
pub mod orchestrator;
pub mod path_time_neighborhood;
pub mod reference_line;
pub mod target;
pub mod trajectory;
pub mod tuning;

pub use config::PlannerConfig;
pub use error::{PlanningError, PlanningResult};
pub use orchestrator::PlannerOrchestrator;
