//! Infrastructure layer: record-store access, config, trajectory refresh.

pub mod config;
pub mod read_model;
pub mod trajectory_service;


pub use config::TrajectoryConfig;
pub use read_model::{InMemoryItemSource, ItemSource, SourceError};
pub use trajectory_service::{ItemLevel, RefreshError, TrajectoryReport, TrajectoryService};
