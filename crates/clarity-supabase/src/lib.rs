#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Client for the hosted identity service and results table
//!
//! Sign-up, sign-in and sign-out go to GoTrue under `/auth/v1`; result rows
//! are inserted through PostgREST under `/rest/v1`. The provider session is
//! persisted through a caller-supplied [`SessionStorage`].

mod auth;
mod client;
mod error;
mod rest;
mod storage;

pub use auth::{Credentials, Session};
pub use client::SupabaseClient;
pub use error::{Result, SupabaseError};
pub use rest::{Identifier, ResultRecord};
pub use storage::{MemoryStorage, SessionStorage};
