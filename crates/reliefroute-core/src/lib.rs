//! ReliefRoute Core - Core types and formulas for food-distribution planning
//!
//! This crate provides the fundamental building blocks shared by the engine:
//! - Domain types for areas, distribution centers and inventory snapshots
//! - The error type used across every component
//! - The formula library (demand, allocation, distance, priority, ...)

pub mod domain;
pub mod error;
pub mod formula;

pub use domain::{Area, AreaId, CenterId, DistributionCenter, InventorySnapshot, Point};
pub use error::{ErrorKind, ReliefError, Result};
