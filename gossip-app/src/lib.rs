//! Workflows shared by the `gossip` and `gossip-fetch` binaries.
//!
//! - [`fetch`]: the fetch collaborator seam and the scheduled fetch-and-save run
//! - [`digest`]: choosing which stored (or live) page to show and rendering it

pub mod digest;
pub mod fetch;

pub use digest::{PageOrigin, ResolvedPage, render_digest, requested_date, resolve_page};
pub use fetch::{PageFetcher, RemoteGossipPage, fetch_and_save, fetch_ok_page};
