//! geocode-batch - Turn a file of free-text addresses into `"address",lat,lng` lines

pub mod api;
pub mod batch;
pub mod config;
pub mod domain;
