//! rootwalk Infrastructure Layer
pub mod dns;
