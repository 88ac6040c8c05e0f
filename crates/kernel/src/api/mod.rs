//! Request-parameter-to-query translation and JSON:API response shaping.
//!
//! The pipeline: the transport layer parses the raw query string into
//! [`params::TrackListParams`]; [`filter`] and [`sort`] compile the raw
//! tokens; [`query`] assembles the [`query::QueryDescriptor`] the
//! persistence layer executes; [`pagination`] turns the total count and the
//! original parameters back into metadata and navigational links; and
//! [`document`] shapes the final JSON:API payload.

pub mod document;
pub mod filter;
pub mod pagination;
pub mod params;
pub mod query;
pub mod sort;
