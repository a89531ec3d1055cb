//! Core library for the cloud carbon footprint engine
//!
//! This crate provides:
//! - Billing file parsing (JSON/CSV) into normalized cloud resources
//! - Terraform resource extraction with static energy estimates
//! - Footprint aggregation by service, region, and date
//! - Green score computation
//! - What-if simulation over region and efficiency changes
//!
//! All computation is synchronous and pure: every function takes its
//! inputs explicitly and the same arguments always produce the same
//! report.

pub mod advisor;
pub mod carbon;
pub mod models;
pub mod parsers;
pub mod region_meta;
pub mod score;
pub mod simulator;
pub mod terraform;

pub use carbon::{calculate_footprint, carbon_grams, region_intensity};
pub use models::*;
pub use parsers::{parse_file, ParseError};
pub use score::{compute_green_score, GreenScoreResult};
pub use simulator::{simulate, SimulationSettings};
pub use terraform::parse_terraform;
