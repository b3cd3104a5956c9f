//! Shared model and dialog logic for the story admin.
//!
//! Nothing in this crate touches the browser: the create dialog's state machine,
//! the Word importer and the create-contract payloads all live here so they can be
//! exercised on the host. The `frontend` crate wires them to Yew and the DOM.

pub mod config;
pub mod error;
pub mod form;
pub mod import;
pub mod model;
