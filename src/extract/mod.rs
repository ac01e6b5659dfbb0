// src/extract/mod.rs
//
// Page-specific extractors. Each one is a pure function of the parsed
// document and only leans on the dom module; none of them depend on each
// other.

pub mod activity;
pub mod details;
pub mod paging;
pub mod search;
