//! ReliefRoute Engine
//!
//! This crate provides the planning components:
//! - `DemandPredictor`: trainable linear demand model
//! - `ResourceAllocator`: priority-weighted proportional stock split
//! - `RouteOptimizer`: nearest-neighbor delivery sequencing
//! - `DistributionNetwork`, `InventoryLedger`, `AlertMonitor`: in-memory
//!   bookkeeping around those components
//!
//! The three planning components never call each other; callers compose them.

pub mod alerts;
pub mod allocator;
pub mod inventory;
pub mod network;
pub mod predictor;
pub mod route;

pub use alerts::{Alert, AlertKind, AlertMonitor, AlertStatus};
pub use allocator::{AllocationResult, AreaProfile, ResourceAllocator};
pub use inventory::{InventoryLedger, LowStockItem, StockOperation, StockSummary, Transaction};
pub use network::{AreaStatus, CenterStatus, DeliveryRecord, DistributionNetwork, LoadOperation};
pub use predictor::{DemandPredictor, LinearModel, TrainingReport, TrainingSet};
pub use route::{optimize_route, DistanceMeter, EuclideanMeter, Route, RouteOptimizer};
