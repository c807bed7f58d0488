// src/specs/mod.rs
//! # Page specs
//!
//! Page-specific readers for the two scoring sites. Each spec knows where the
//! ground truth lives in one page's HTML and how to pull it out tolerantly.
//!
//! ## What lives here
//! - Pure parsing of page text already fetched (network or saved file).
//! - Selector choice and precedence: headed tables before positional rows,
//!   `data-gymnastid` rows before bare rows.
//! - Light shaping into small structs ([`mso_results::MeetResult`],
//!   [`session::SessionEntry`]); scores stay as printed tokens.
//!
//! ## What does not live here
//! - Fetching, pacing and failure bookkeeping (`harvest`).
//! - Token parsing and schema mapping (`score`, `schema`).
//!
//! ## Typical call chain
//! ```text
//! runner → harvest::collect_* → Fetch::get / file::read_page
//!                             ↘ specs::<page>::parse_*
//!                               → raw DataSet rows → csv::write_table
//! ```
//!
//! ## Testing notes
//! Every spec is tested offline against small captured fragments.
pub mod mms_session;
pub mod mso_profile;
pub mod mso_results;
pub mod session;
