//! Core business logic
//!
//! - `selection`: page events in, read/hide decisions out
//! - `tooltip`: the floating element and its lifecycle
//! - `translator`: DeepSeek chat-completion client
//! - `session`: wires the three together for one page

pub mod selection;
pub mod session;
pub mod tooltip;
pub mod translator;
