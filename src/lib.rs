//! Scheduling and payroll domain model for multi-store shift rosters
//!
//! This crate turns a snapshot of people, stores, shifts, driver tips and
//! payroll entries into the figures a scheduling application displays:
//! week grids with hours and earnings, weekly payroll tables, tip totals,
//! store legends and dashboard counts. It also derives default shift times
//! from store opening hours and produces the shifts a host persists when a
//! week is filled in, copied forward or cleared.
//!
//! The crate is storage-agnostic. The host loads raw records into a
//! [`roster::RosterStore`], asks [`calendar`] for the active week and
//! [`aggregation`] for derived numbers, then persists whatever values it
//! chooses to keep. Data quality problems never abort a computation; they
//! are reported as [`models::DataIssue`] values.

#![warn(missing_docs)]

pub mod aggregation;
pub mod calendar;
pub mod config;
pub mod error;
pub mod models;
pub mod roster;
pub mod scheduling;
