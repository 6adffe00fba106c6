//! Pin - a tiny chainable DOM manipulation library.
//!
//! Pin wraps an in-memory DOM behind a jQuery-like `Collection`: an ordered
//! list of element handles where every traversal or mutation returns a new
//! collection, so calls chain. A `Page` owns the document and hands out
//! collections.
//!
//! # Example
//! ```
//! use pin::Page;
//!
//! let page = Page::from_html("<ul><li class='a'>x</li><li>y</li></ul>");
//! let items = page.query("ul li");
//! assert_eq!(items.len(), 2);
//! ```
//!
//! The `extended` feature (on by default) adds the tagged `set`/`get`
//! accessor, namespaced events, insertion, sizing, and `extend`; without it
//! only selection and core iteration remain (the lite build).

mod collection;
mod page;

#[cfg(feature = "extended")]
mod accessor;
#[cfg(feature = "extended")]
mod events;
#[cfg(feature = "extended")]
mod extend;
#[cfg(feature = "extended")]
mod insert;
#[cfg(feature = "extended")]
mod sizing;
#[cfg(feature = "extended")]
mod traverse;

pub use collection::Collection;
pub use page::Page;
pub use pin_dom::{uniq, NodeId};

#[cfg(feature = "extended")]
pub use accessor::Key;
#[cfg(feature = "extended")]
pub use events::{Event, EventName};
#[cfg(feature = "extended")]
pub use extend::extend;
#[cfg(feature = "extended")]
pub use insert::Content;
#[cfg(feature = "extended")]
pub use serde_json::Value;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
