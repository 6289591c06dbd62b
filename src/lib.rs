//! Analytics over the historical space-launch record.
//!
//! [`data`] holds the whole programmatic surface: the loader, the eight
//! mission queries, and the filter/derivation pipeline the dashboard binary
//! renders.

pub mod data;
