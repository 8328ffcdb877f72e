mod async_tail;
mod config;
mod controls;
mod persistence;
mod quorum;
mod scatter_gather;
mod scenarios;
mod skipping;
mod sweep;
mod topology;
