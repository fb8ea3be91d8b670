//! Client for the Sankhya gateway data services.
//!
//! The gateway speaks two dataset services over JSON:
//! `CRUDServiceProvider.loadRecords` for criteria-based queries and
//! `DatasetSP.save` for inserts and primary-key updates. Both require a
//! bearer token obtained from the login endpoint with service-account
//! credentials; [`Client`] owns that token and refreshes it lazily.

pub mod client;
pub mod criteria;
pub mod dataset;
pub mod error;

pub use client::{Client, Config, Credentials};
pub use error::Error;
