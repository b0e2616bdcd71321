//! `newsdesk-core` — news post records and the pagination contract.
//!
//! This crate is pure data + arithmetic (no storage or HTTP concerns).

pub mod id;
pub mod pagination;
pub mod post;

pub use id::PostId;
pub use pagination::{NewsPage, PageRequest, total_pages};
pub use post::{NewPost, Post};
