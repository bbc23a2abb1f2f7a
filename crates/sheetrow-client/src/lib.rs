//! sheetrow-client: client for spreadsheet-backed row stores.
//!
//! The store is a hosted spreadsheet behind a REST facade: `GET /` lists
//! every row as a JSON array, `POST /` appends one row, and
//! `PUT|DELETE /{column}/{value}` address rows by a column's value. There
//! is no schema, no auth header, no pagination, and no transactions; the
//! client is correspondingly tolerant about what comes back.

pub mod client;
pub mod error;

pub use client::*;
pub use error::*;
