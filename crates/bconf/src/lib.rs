//! # bconf
//!
//! Hierarchical configuration trees keyed by dotted paths.
//!
//! A [`Bconf`] is a tree whose inner entries are nodes and whose leaves are
//! strings. Trees are filled from the bconf text format, from JSON, or from
//! an HTTP endpoint serving JSON, then read by path, walked, merged, or
//! decoded into typed records.
//!
//! ## Quick start
//!
//! ```rust
//! use bconf::Bconf;
//!
//! let mut bc = Bconf::new();
//! bc.load_conf_str("# defaults\nsome.node.1.a=a\nsome.node.2.a=b\n").unwrap();
//!
//! assert_eq!(bc.get_string(&["some", "node", "1", "a"]), "a");
//!
//! let mut seen = Vec::new();
//! bc.get_node(&["some", "node"])
//!     .unwrap()
//!     .foreach_sorted_node(|name, _| seen.push(name.to_string()));
//! assert_eq!(seen, ["1", "2"]);
//!
//! let json = serde_json::to_string(&bc).unwrap();
//! assert_eq!(json, r#"{"some":{"node":{"1":{"a":"a"},"2":{"a":"b"}}}}"#);
//! ```
//!
//! ## Modules
//!
//! - [`tree`] — `Bconf`, `Value`, and path lookups (`get`, `add_value`, ...)
//! - [`iter`] — unsorted and key-sorted walks over direct children
//! - [`merge`] — deep merge with source-wins conflict resolution
//! - [`text`] — the line-oriented text format, with `include`
//! - [`json`] — JSON loading and serialization
//! - [`http`] — fetching JSON over HTTP (feature `http`)
//! - [`decode`] — filling typed records from leaves (`#[derive(Decode)]`)
//! - [`error`] — error types

extern crate self as bconf;

pub mod decode;
pub mod error;
#[cfg(feature = "http")]
pub mod http;
pub mod iter;
pub mod json;
pub mod merge;
pub mod text;
pub mod tree;

pub use decode::{Decode, FromLeaf};
pub use error::{BconfError, Result};
#[cfg(feature = "http")]
pub use http::HttpSource;
pub use text::LoadOptions;
pub use tree::{Bconf, Value, ValueRef};

#[cfg(feature = "derive")]
pub use bconf_derive::Decode;
