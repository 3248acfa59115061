//! iCalendar serialization (RFC 5545 subset).
//!
//! - Escape: line breaks inside text values
//! - Serializer: document serialization with canonical property ordering
//!
//! Lines are joined with a bare `\n` and are never folded at 75 octets.

mod escape;
mod serializer;

pub use escape::escape_line_breaks;
pub use serializer::{serialize, serialize_property};
