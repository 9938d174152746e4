//! OSC 1.0 encoder.
//!
//! Every `*_into` entry point checks the exact encoded size against the buffer first and
//! reports [`OscError::BufferOverflow`] instead of writing a truncated packet.

use crate::osc::bytes::{SliceWriter, pad4};
use crate::osc::{Arg, Bundle, BundleItem, Message, OscError, Packet, Result};

/// Eight-byte literal that opens every bundle.
pub const BUNDLE_TAG: &[u8; 8] = b"#bundle\0";

/// Exact encoded size of one argument payload.
pub fn arg_len(arg: &Arg) -> usize {
	match arg {
		Arg::String(value) => pad4(value.len() + 1),
		Arg::Blob(bytes) => 4 + pad4(bytes.len()),
		other => other.arg_type().fixed_size().unwrap_or(0),
	}
}

/// Exact encoded size of a message.
pub fn message_len(message: &Message) -> usize {
	let address = pad4(message.address().len() + 1);
	let tags = pad4(message.num_args() + 2);
	let payload: usize = message.args().iter().map(arg_len).sum();
	address + tags + payload
}

/// Exact encoded size of a bundle, including every nested element.
pub fn bundle_len(bundle: &Bundle) -> usize {
	let items: usize = bundle.items().iter().map(|item| 4 + item_len(item)).sum();
	BUNDLE_TAG.len() + 8 + items
}

/// Exact encoded size of a packet.
pub fn packet_len(packet: &Packet) -> usize {
	match packet {
		Packet::Message(message) => message_len(message),
		Packet::Bundle(bundle) => bundle_len(bundle),
	}
}

fn item_len(item: &BundleItem) -> usize {
	match item {
		BundleItem::Message(message) => message_len(message),
		BundleItem::Bundle(bundle) => bundle_len(bundle),
	}
}

/// Encode a message into a fresh buffer.
pub fn encode_message(message: &Message) -> Result<Vec<u8>> {
	let mut buf = vec![0_u8; message_len(message)];
	let len = encode_message_into(message, &mut buf)?;
	buf.truncate(len);
	Ok(buf)
}

/// Encode a bundle into a fresh buffer.
pub fn encode_bundle(bundle: &Bundle) -> Result<Vec<u8>> {
	let mut buf = vec![0_u8; bundle_len(bundle)];
	let len = encode_bundle_into(bundle, &mut buf)?;
	buf.truncate(len);
	Ok(buf)
}

/// Encode a packet into a fresh buffer.
pub fn encode_packet(packet: &Packet) -> Result<Vec<u8>> {
	match packet {
		Packet::Message(message) => encode_message(message),
		Packet::Bundle(bundle) => encode_bundle(bundle),
	}
}

/// Encode a message into `buf`, returning the number of bytes written.
pub fn encode_message_into(message: &Message, buf: &mut [u8]) -> Result<usize> {
	check_capacity(message_len(message), buf.len())?;
	let mut writer = SliceWriter::new(buf);
	write_message(&mut writer, message)?;
	Ok(writer.len())
}

/// Encode a bundle into `buf`, returning the number of bytes written.
pub fn encode_bundle_into(bundle: &Bundle, buf: &mut [u8]) -> Result<usize> {
	check_capacity(bundle_len(bundle), buf.len())?;
	let mut writer = SliceWriter::new(buf);
	write_bundle(&mut writer, bundle)?;
	Ok(writer.len())
}

/// Encode `message` as the only element of an immediate bundle.
pub fn encode_wrapped_message_into(message: &Message, buf: &mut [u8]) -> Result<usize> {
	check_capacity(BUNDLE_TAG.len() + 8 + 4 + message_len(message), buf.len())?;
	let mut writer = SliceWriter::new(buf);
	writer.put(BUNDLE_TAG)?;
	writer.put_u64(crate::osc::time_tag::IMMEDIATE)?;
	write_element(&mut writer, |writer| write_message(writer, message))?;
	Ok(writer.len())
}

fn check_capacity(need: usize, capacity: usize) -> Result<()> {
	if need > capacity {
		return Err(OscError::BufferOverflow { need, capacity });
	}
	Ok(())
}

fn write_message(writer: &mut SliceWriter<'_>, message: &Message) -> Result<()> {
	writer.put_osc_str(message.address())?;

	writer.put(b",")?;
	for arg in message.args() {
		writer.put(&[arg.arg_type().tag()])?;
	}
	writer.put(&[0])?;
	writer.pad4()?;

	for arg in message.args() {
		write_arg(writer, arg)?;
	}
	Ok(())
}

fn write_arg(writer: &mut SliceWriter<'_>, arg: &Arg) -> Result<()> {
	match arg {
		Arg::Int32(value) => writer.put(&value.to_be_bytes()),
		Arg::Int64(value) => writer.put(&value.to_be_bytes()),
		Arg::Float(value) => writer.put_u32(value.to_bits()),
		Arg::Double(value) => writer.put_u64(value.to_bits()),
		Arg::String(value) => writer.put_osc_str(value),
		Arg::Blob(bytes) => writer.put_blob(bytes),
		Arg::True | Arg::False | Arg::Nil | Arg::Trigger => Ok(()),
		Arg::TimeTag(value) => writer.put_u64(*value),
		Arg::Char(value) => writer.put_u32(u32::from(*value)),
		Arg::RgbaColor(value) | Arg::MidiMessage(value) => writer.put_u32(*value),
	}
}

fn write_bundle(writer: &mut SliceWriter<'_>, bundle: &Bundle) -> Result<()> {
	writer.put(BUNDLE_TAG)?;
	writer.put_u64(bundle.time_tag())?;
	for item in bundle.items() {
		match item {
			BundleItem::Message(message) => write_element(writer, |writer| write_message(writer, message))?,
			BundleItem::Bundle(child) => write_element(writer, |writer| write_bundle(writer, child))?,
		}
	}
	Ok(())
}

fn write_element(writer: &mut SliceWriter<'_>, body: impl FnOnce(&mut SliceWriter<'_>) -> Result<()>) -> Result<()> {
	let slot = writer.reserve_u32()?;
	let start = writer.len();
	body(&mut *writer)?;
	let len = writer.len() - start;
	let len = u32::try_from(len).map_err(|_| OscError::EncodeTooLarge { len })?;
	writer.patch_u32(slot, len);
	Ok(())
}

#[cfg(test)]
mod tests;
