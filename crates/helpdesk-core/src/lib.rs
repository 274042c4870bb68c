//! Domain types for the helpdesk: users, tickets, audit logs, the knowledge
//! base, analytics, and the [`store::HelpdeskStore`] persistence trait.
//!
//! No HTTP or database code lives here.

#![allow(async_fn_in_trait)]

pub mod audit;
pub mod error;
pub mod knowledge;
pub mod metrics;
pub mod store;
pub mod ticket;
pub mod user;

pub use error::{Error, Result};
