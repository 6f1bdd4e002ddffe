//! Conversion between internal canonical types and wire formats

pub mod openai;
