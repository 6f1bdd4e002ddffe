//! Wire format types for the chat completion API
//!
//! Pure serde structs matching the JSON that clients send and expect. They
//! are only used at the HTTP boundary and are not used internally.

pub mod openai;
