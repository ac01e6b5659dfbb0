// src/lib.rs
//
// Extraction engine for nCore tracker pages. The caller owns fetching and
// parsing (see dom::parse); everything here is a pure function of the
// parsed tree. Extractors never fail: missing elements degrade to empty
// fields, never to errors.

#[macro_use]
pub mod macros;

pub mod dom;
pub mod extract;
