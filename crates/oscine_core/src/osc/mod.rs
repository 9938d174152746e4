mod arg;
mod bundle;
mod decode;
mod encode;
mod error;
mod message;
mod packet;
mod receiver;
mod sender;

/// Bounded big-endian cursor and writer used by the codec.
pub mod bytes;
/// NTP time tag conversions.
pub mod time_tag;
/// Datagram transport traits with UDP and in-process implementations.
pub mod transport;

/// Argument values and their type tags.
pub use arg::{Arg, ArgType};
/// Bundle tree types.
pub use bundle::{Bundle, BundleItem};
/// Packet decoding entry points and options.
pub use decode::{DecodeOptions, decode_bundle, decode_message, decode_messages, decode_packet};
/// Packet encoding entry points and size helpers.
pub use encode::{
	BUNDLE_TAG, arg_len, bundle_len, encode_bundle, encode_bundle_into, encode_message, encode_message_into, encode_packet, encode_wrapped_message_into, message_len,
	packet_len,
};
/// Error and result aliases.
pub use error::{Component, OscError, Result};
/// Addressed message type.
pub use message::Message;
/// Top-level packet sum type.
pub use packet::Packet;
/// Background listener, queue, and options.
pub use receiver::{Receiver, ReceiverOptions, ReceiverState, ReceiverStats};
/// Datagram sender and its fixed buffer sizes.
pub use sender::{BUNDLE_BUFFER_SIZE, MESSAGE_BUFFER_SIZE, Sender};
