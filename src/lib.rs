//! Letter of credit lifecycle engine.
//!
//! A letter moves from application through a four-party approval quorum and
//! then down the shipping pipeline (shipped, received, ready for payment,
//! closed). Every step is gated by the caller's role on the letter and
//! persisted through a [`store::RecordStore`].

pub mod auth;
pub mod config;
pub mod error;
pub mod letter;
pub mod participants;
pub mod service;
pub mod store;
pub mod utils;

pub use error::{ErrorKind, LocError, LocResult};
pub use service::{LetterService, ParticipantService};
