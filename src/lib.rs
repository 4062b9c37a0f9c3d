//! Client for the case-management backend: the ticket store behind the
//! Kanban dashboard, the public case-submission path, and the REST client
//! both run on.

pub mod board;
pub mod cache;
pub mod cmd;
pub mod config;
pub mod context;
pub mod display;
pub mod domain;
pub mod error;
pub mod form;
pub mod infra;
pub mod reports;
pub mod services;
pub mod store;
pub mod workflow;
