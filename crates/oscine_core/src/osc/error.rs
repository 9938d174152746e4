use std::fmt;

use thiserror::Error;

use crate::osc::ArgType;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, OscError>;

/// Endpoint that owns a transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
	/// [`crate::osc::Sender`].
	Sender,
	/// [`crate::osc::Receiver`].
	Receiver,
}

impl Component {
	/// Lowercase label used in diagnostics.
	pub fn label(self) -> &'static str {
		match self {
			Self::Sender => "sender",
			Self::Receiver => "receiver",
		}
	}
}

impl fmt::Display for Component {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.label())
	}
}

/// Errors produced while building, encoding, decoding, sending, and receiving OSC data.
#[derive(Debug, Error)]
pub enum OscError {
	/// Argument, message, or bundle index beyond bounds.
	#[error("{kind} index {index} out of range (len={len})")]
	IndexOutOfRange {
		/// Which collection was indexed.
		kind: &'static str,
		/// Offending index.
		index: usize,
		/// Collection length at the time of the call.
		len: usize,
	},
	/// Accessor used on an argument kind it cannot coerce.
	#[error("cannot read {actual} argument at index {index} as {expected}")]
	TypeMismatch {
		/// Argument position.
		index: usize,
		/// Requested logical type.
		expected: &'static str,
		/// Stored argument kind.
		actual: ArgType,
	},
	/// Not enough bytes remained for a requested read.
	#[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEof {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// Packet is empty or starts with neither `/` nor `#bundle`.
	#[error("packet does not start with an address or bundle tag (first byte={first:?})")]
	BadPacketStart {
		/// First byte of the packet, if any.
		first: Option<u8>,
	},
	/// Well-formed packet of the other kind than the caller asked for.
	#[error("expected a {expected} packet, found a {found}")]
	UnexpectedPacketKind {
		/// `"message"` or `"bundle"`.
		expected: &'static str,
		/// Kind actually decoded.
		found: &'static str,
	},
	/// Type tag string is absent or does not start with `,`.
	#[error("missing type tag string at offset {at}")]
	MissingTypeTags {
		/// Offset of the expected type tag string.
		at: usize,
	},
	/// Type tag character with no known argument kind.
	#[error("unknown type tag {tag:?} at offset {at}")]
	UnknownTypeTag {
		/// Offending tag byte.
		tag: char,
		/// Offset of the tag byte in the packet.
		at: usize,
	},
	/// OSC string ran past the end of the buffer without a NUL terminator.
	#[error("unterminated string at offset {at}")]
	MissingNul {
		/// Start offset of the string.
		at: usize,
	},
	/// OSC string bytes were not valid UTF-8.
	#[error("invalid utf-8 string at offset {at}")]
	InvalidUtf8 {
		/// Start offset of the string.
		at: usize,
	},
	/// Packet or bundle element size is not a multiple of four.
	#[error("size {len} is not a multiple of 4")]
	Misaligned {
		/// Offending size.
		len: usize,
	},
	/// Bundle element length prefix is invalid or exceeds the remaining bytes.
	#[error("bundle element length {len} at offset {at} exceeds remaining {rem}")]
	BadElementLength {
		/// Offset of the length prefix.
		at: usize,
		/// Declared element length.
		len: u32,
		/// Bytes remaining after the prefix.
		rem: usize,
	},
	/// Bytes left over after the last declared argument.
	#[error("{count} trailing bytes after message arguments")]
	TrailingBytes {
		/// Unconsumed byte count.
		count: usize,
	},
	/// Bundle nesting exceeded the configured limit.
	#[error("bundle nesting depth exceeded (max={max_depth})")]
	DepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// Address or string argument contains an interior NUL and cannot be encoded.
	#[error("string contains interior NUL byte: {value:?}")]
	EncodeInteriorNul {
		/// Offending string.
		value: String,
	},
	/// Blob or bundle element larger than a 32-bit length prefix can describe.
	#[error("payload of {len} bytes exceeds 32-bit length prefix")]
	EncodeTooLarge {
		/// Payload size.
		len: usize,
	},
	/// Encoded packet does not fit the send buffer.
	#[error("encoded packet needs {need} bytes, buffer holds {capacity}")]
	BufferOverflow {
		/// Bytes required by the encoding.
		need: usize,
		/// Fixed buffer capacity.
		capacity: usize,
	},
	/// Sender or receiver used before `setup`.
	#[error("{component} is not set up")]
	NotSetup {
		/// Which endpoint was used.
		component: Component,
	},
	/// Socket bind, resolve, or connect failure.
	#[error("setup failed for {target}: {source}")]
	Setup {
		/// Host/port description.
		target: String,
		/// Underlying IO error.
		#[source]
		source: std::io::Error,
	},
	/// Destination hostname resolved to no addresses.
	#[error("no address found for {target}")]
	Unresolved {
		/// Host/port description.
		target: String,
	},
	/// Transport write failure.
	#[error("transport send failed: {0}")]
	Transport(#[source] std::io::Error),
	/// Listener thread could not be spawned.
	#[error("failed to spawn listener thread: {0}")]
	Spawn(#[source] std::io::Error),
	/// Receiver operation not valid in its current state.
	#[error("receiver cannot {op} while {state}")]
	ReceiverState {
		/// Attempted operation.
		op: &'static str,
		/// Current state label.
		state: &'static str,
	},
}

impl OscError {
	/// Whether this error describes malformed inbound wire data.
	pub fn is_parse_error(&self) -> bool {
		matches!(
			self,
			Self::UnexpectedEof { .. }
				| Self::BadPacketStart { .. }
				| Self::UnexpectedPacketKind { .. }
				| Self::MissingTypeTags { .. }
				| Self::UnknownTypeTag { .. }
				| Self::MissingNul { .. }
				| Self::InvalidUtf8 { .. }
				| Self::Misaligned { .. }
				| Self::BadElementLength { .. }
				| Self::TrailingBytes { .. }
				| Self::DepthExceeded { .. }
		)
	}

	/// Whether this error came from the send path (buffer or transport).
	pub fn is_send_error(&self) -> bool {
		matches!(
			self,
			Self::BufferOverflow { .. } | Self::Transport(_) | Self::NotSetup { component: Component::Sender }
		)
	}
}
