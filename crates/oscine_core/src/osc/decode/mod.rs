use crate::osc::bytes::Cursor;
use crate::osc::encode::BUNDLE_TAG;
use crate::osc::{Arg, ArgType, Bundle, Message, OscError, Packet, Result};

/// Runtime limits and behavior switches for packet decoding.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Maximum bundle nesting depth.
	pub max_depth: u32,
	/// Reject packets and bundle elements whose size is not a multiple of 4.
	pub require_alignment: bool,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self {
			max_depth: 32,
			require_alignment: true,
		}
	}
}

impl DecodeOptions {
	/// Preset that tolerates senders which skip trailing packet padding.
	pub fn lenient() -> Self {
		Self {
			require_alignment: false,
			..Self::default()
		}
	}
}

/// Decode one datagram into a message or bundle tree.
///
/// Any malformed element anywhere in the packet fails the whole packet.
pub fn decode_packet(bytes: &[u8], opt: &DecodeOptions) -> Result<Packet> {
	decode_impl(bytes, 0, opt, 0)
}

/// Decode one datagram and flatten it into messages in wire order.
pub fn decode_messages(bytes: &[u8], opt: &DecodeOptions) -> Result<Vec<Message>> {
	Ok(decode_packet(bytes, opt)?.into_messages())
}

/// Decode a datagram that must hold a bare message.
pub fn decode_message(bytes: &[u8], opt: &DecodeOptions) -> Result<Message> {
	match decode_packet(bytes, opt)? {
		Packet::Message(message) => Ok(message),
		Packet::Bundle(_) => Err(OscError::UnexpectedPacketKind {
			expected: "message",
			found: "bundle",
		}),
	}
}

/// Decode a datagram that must hold a bundle.
pub fn decode_bundle(bytes: &[u8], opt: &DecodeOptions) -> Result<Bundle> {
	match decode_packet(bytes, opt)? {
		Packet::Bundle(bundle) => Ok(bundle),
		Packet::Message(_) => Err(OscError::UnexpectedPacketKind {
			expected: "bundle",
			found: "message",
		}),
	}
}

fn check_start(bytes: &[u8]) -> Result<()> {
	match bytes.first() {
		Some(b'/') => Ok(()),
		Some(b'#') if bytes.starts_with(BUNDLE_TAG) => Ok(()),
		first => Err(OscError::BadPacketStart { first: first.copied() }),
	}
}

fn decode_impl(bytes: &[u8], base: usize, opt: &DecodeOptions, depth: u32) -> Result<Packet> {
	check_start(bytes)?;
	if opt.require_alignment && bytes.len() % 4 != 0 {
		return Err(OscError::Misaligned { len: bytes.len() });
	}

	if bytes.starts_with(BUNDLE_TAG) {
		return Ok(Packet::Bundle(decode_bundle_impl(bytes, base, opt, depth)?));
	}
	Ok(Packet::Message(decode_message_impl(bytes, base)?))
}

fn decode_message_impl(bytes: &[u8], base: usize) -> Result<Message> {
	let mut cursor = Cursor::with_base(bytes, base);
	let address = cursor.read_osc_str()?;

	let tags_at = cursor.pos();
	if cursor.rest().first() != Some(&b',') {
		return Err(OscError::MissingTypeTags { at: tags_at });
	}
	let tags = cursor.read_cstring_bytes()?;
	cursor.align4();

	let mut args = Vec::with_capacity(tags.len() - 1);
	for (offset, &tag) in tags.iter().enumerate().skip(1) {
		let kind = ArgType::from_tag(tag).ok_or(OscError::UnknownTypeTag {
			tag: char::from(tag),
			at: tags_at + offset,
		})?;
		args.push(read_arg(&mut cursor, kind)?);
	}

	if !cursor.is_empty() {
		return Err(OscError::TrailingBytes { count: cursor.remaining() });
	}

	Ok(Message::with_args(address, args))
}

fn read_arg(cursor: &mut Cursor<'_>, kind: ArgType) -> Result<Arg> {
	Ok(match kind {
		ArgType::Int32 => Arg::Int32(cursor.read_i32()?),
		ArgType::Int64 => Arg::Int64(cursor.read_i64()?),
		ArgType::Float => Arg::Float(cursor.read_f32()?),
		ArgType::Double => Arg::Double(cursor.read_f64()?),
		ArgType::String => Arg::String(cursor.read_osc_str()?.to_owned()),
		ArgType::Blob => Arg::Blob(cursor.read_blob()?.to_vec()),
		ArgType::True => Arg::True,
		ArgType::False => Arg::False,
		ArgType::Nil => Arg::Nil,
		ArgType::Trigger => Arg::Trigger,
		ArgType::TimeTag => Arg::TimeTag(cursor.read_u64()?),
		// Only the low byte of the 32-bit slot carries the character.
		ArgType::Char => Arg::Char(cursor.read_u32()? as u8),
		ArgType::RgbaColor => Arg::RgbaColor(cursor.read_u32()?),
		ArgType::MidiMessage => Arg::MidiMessage(cursor.read_u32()?),
	})
}

fn decode_bundle_impl(bytes: &[u8], base: usize, opt: &DecodeOptions, depth: u32) -> Result<Bundle> {
	if depth >= opt.max_depth {
		return Err(OscError::DepthExceeded { max_depth: opt.max_depth });
	}

	let mut cursor = Cursor::with_base(bytes, base);
	let _ = cursor.read_exact(BUNDLE_TAG.len())?;
	let mut bundle = Bundle::new(cursor.read_u64()?);

	while !cursor.is_empty() {
		let at = cursor.pos();
		let len = cursor.read_u32()?;
		if len as usize > cursor.remaining() {
			return Err(OscError::BadElementLength {
				at,
				len,
				rem: cursor.remaining(),
			});
		}
		if opt.require_alignment && len % 4 != 0 {
			return Err(OscError::Misaligned { len: len as usize });
		}

		let element_base = cursor.pos();
		let element = cursor.read_exact(len as usize)?;
		match decode_impl(element, element_base, opt, depth + 1)? {
			Packet::Message(message) => bundle.add_message(message),
			Packet::Bundle(child) => bundle.add_bundle(child),
		};
	}

	Ok(bundle)
}
