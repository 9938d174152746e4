//! Open Sound Control 1.0 messages and bundles: build, encode, decode, send, and receive.

/// Argument model, wire codec, UDP sender, and background receiver.
pub mod osc;
