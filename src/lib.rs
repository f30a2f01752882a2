// src/lib.rs

//! jvnlist: incremental JVN advisory harvester library

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
