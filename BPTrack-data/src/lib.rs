// BPTrack Data
// This crate holds the storage models and the caller-owned reading collection

// Repository implementations for data access
pub mod repository;

// Data storage models
pub mod models;
