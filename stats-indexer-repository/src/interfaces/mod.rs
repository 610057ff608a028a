//! This module defines and re-exports the interfaces for the stats indexer
//! repositories. It serves as a central point for accessing traits related to
//! data interaction.
mod checkpoint_repository;
mod series;

pub use checkpoint_repository::CheckpointRepository;
pub use series::SeriesRepository;
