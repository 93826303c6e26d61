//! Person records: model, keyed repository, service and on-disk state.
//! The repository is in-memory; the file store snapshots it as JSON.

pub mod model;
pub mod repository;
pub mod service;
pub mod state;
pub mod storage;
