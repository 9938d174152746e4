use crate::osc::{OscError, Result};

/// Round `len` up to the next multiple of four.
pub fn pad4(len: usize) -> usize {
	(len + 3) & !3
}

/// Simple bounded big-endian cursor over an immutable byte slice.
pub struct Cursor<'a> {
	bytes: &'a [u8],
	pos: usize,
	base: usize,
}

impl<'a> Cursor<'a> {
	/// Create a cursor at position 0.
	pub fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, pos: 0, base: 0 }
	}

	/// Create a cursor over a sub-slice whose first byte sits at `base` in the packet,
	/// so error offsets stay packet-relative.
	pub fn with_base(bytes: &'a [u8], base: usize) -> Self {
		Self { bytes, pos: 0, base }
	}

	/// Return current packet-relative byte offset.
	pub fn pos(&self) -> usize {
		self.base + self.pos
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Whether every byte has been consumed.
	pub fn is_empty(&self) -> bool {
		self.remaining() == 0
	}

	/// Peek at the unread bytes without advancing.
	pub fn rest(&self) -> &'a [u8] {
		&self.bytes[self.pos.min(self.bytes.len())..]
	}

	/// Read exactly `n` bytes and advance cursor.
	pub fn read_exact(&mut self, n: usize) -> Result<&'a [u8]> {
		if n > self.remaining() {
			return Err(OscError::UnexpectedEof {
				at: self.pos(),
				need: n,
				rem: self.remaining(),
			});
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
		let raw = self.read_exact(N)?;
		let mut buf = [0_u8; N];
		buf.copy_from_slice(raw);
		Ok(buf)
	}

	/// Read a big-endian `u32`.
	pub fn read_u32(&mut self) -> Result<u32> {
		Ok(u32::from_be_bytes(self.read_array()?))
	}

	/// Read a big-endian `i32`.
	pub fn read_i32(&mut self) -> Result<i32> {
		Ok(i32::from_be_bytes(self.read_array()?))
	}

	/// Read a big-endian `u64`.
	pub fn read_u64(&mut self) -> Result<u64> {
		Ok(u64::from_be_bytes(self.read_array()?))
	}

	/// Read a big-endian `i64`.
	pub fn read_i64(&mut self) -> Result<i64> {
		Ok(i64::from_be_bytes(self.read_array()?))
	}

	/// Read a big-endian IEEE `f32`.
	pub fn read_f32(&mut self) -> Result<f32> {
		Ok(f32::from_bits(self.read_u32()?))
	}

	/// Read a big-endian IEEE `f64`.
	pub fn read_f64(&mut self) -> Result<f64> {
		Ok(f64::from_bits(self.read_u64()?))
	}

	/// Advance to the next 4-byte aligned position, or to the end if the input stops short.
	///
	/// Callers that require whole packets check total alignment up front.
	pub fn align4(&mut self) {
		let skip = (pad4(self.pos) - self.pos).min(self.remaining());
		self.pos += skip;
	}

	/// Read a zero-terminated byte string without the terminator.
	pub fn read_cstring_bytes(&mut self) -> Result<&'a [u8]> {
		let start = self.pos;
		let Some(rel_end) = self.rest().iter().position(|byte| *byte == 0) else {
			return Err(OscError::MissingNul { at: self.pos() });
		};

		let end = start + rel_end;
		self.pos = end + 1;
		Ok(&self.bytes[start..end])
	}

	/// Read an OSC string: UTF-8 bytes, NUL terminator, NUL padding to a 4-byte boundary.
	pub fn read_osc_str(&mut self) -> Result<&'a str> {
		let at = self.pos();
		let raw = self.read_cstring_bytes()?;
		self.align4();
		std::str::from_utf8(raw).map_err(|_| OscError::InvalidUtf8 { at })
	}

	/// Read an OSC blob: `u32` length, bytes, padding to a 4-byte boundary.
	pub fn read_blob(&mut self) -> Result<&'a [u8]> {
		let len = self.read_u32()? as usize;
		let raw = self.read_exact(len)?;
		self.align4();
		Ok(raw)
	}
}

/// Bounded big-endian writer over a caller-provided buffer.
pub struct SliceWriter<'a> {
	buf: &'a mut [u8],
	pos: usize,
}

impl<'a> SliceWriter<'a> {
	/// Create a writer at position 0.
	pub fn new(buf: &'a mut [u8]) -> Self {
		Self { buf, pos: 0 }
	}

	/// Bytes written so far.
	pub fn len(&self) -> usize {
		self.pos
	}

	/// Whether nothing has been written.
	pub fn is_empty(&self) -> bool {
		self.pos == 0
	}

	/// Append raw bytes.
	pub fn put(&mut self, bytes: &[u8]) -> Result<()> {
		let end = self.pos + bytes.len();
		let capacity = self.buf.len();
		let dst = self.buf.get_mut(self.pos..end).ok_or(OscError::BufferOverflow { need: end, capacity })?;
		dst.copy_from_slice(bytes);
		self.pos = end;
		Ok(())
	}

	/// Append a big-endian `u32`.
	pub fn put_u32(&mut self, value: u32) -> Result<()> {
		self.put(&value.to_be_bytes())
	}

	/// Append a big-endian `u64`.
	pub fn put_u64(&mut self, value: u64) -> Result<()> {
		self.put(&value.to_be_bytes())
	}

	/// Append NUL bytes up to the next 4-byte boundary.
	pub fn pad4(&mut self) -> Result<()> {
		const ZEROS: [u8; 3] = [0; 3];
		let fill = pad4(self.pos) - self.pos;
		self.put(&ZEROS[..fill])
	}

	/// Append an OSC string (terminator plus padding).
	pub fn put_osc_str(&mut self, value: &str) -> Result<()> {
		if value.as_bytes().contains(&0) {
			return Err(OscError::EncodeInteriorNul { value: value.to_owned() });
		}
		self.put(value.as_bytes())?;
		self.put(&[0])?;
		self.pad4()
	}

	/// Append an OSC blob (length prefix plus padding).
	pub fn put_blob(&mut self, bytes: &[u8]) -> Result<()> {
		let len = u32::try_from(bytes.len()).map_err(|_| OscError::EncodeTooLarge { len: bytes.len() })?;
		self.put_u32(len)?;
		self.put(bytes)?;
		self.pad4()
	}

	/// Reserve a `u32` slot to be filled later with [`Self::patch_u32`].
	pub fn reserve_u32(&mut self) -> Result<usize> {
		let at = self.pos;
		self.put_u32(0)?;
		Ok(at)
	}

	/// Overwrite a previously reserved `u32` slot.
	pub fn patch_u32(&mut self, at: usize, value: u32) {
		self.buf[at..at + 4].copy_from_slice(&value.to_be_bytes());
	}
}

#[cfg(test)]
mod tests {
	use super::{Cursor, SliceWriter, pad4};
	use crate::osc::OscError;

	#[test]
	fn pad4_rounds_up() {
		assert_eq!(pad4(0), 0);
		assert_eq!(pad4(1), 4);
		assert_eq!(pad4(4), 4);
		assert_eq!(pad4(5), 8);
	}

	#[test]
	fn reads_padded_string_and_realigns() {
		let bytes = b"/ab\0\0\0\0\0\0\0\0\x07";
		let mut cursor = Cursor::new(bytes);
		assert_eq!(cursor.read_osc_str().expect("string reads"), "/ab");
		assert_eq!(cursor.pos(), 4);
		assert_eq!(cursor.read_u32().expect("u32 reads"), 0);
		assert_eq!(cursor.read_u32().expect("u32 reads"), 7);
		assert!(cursor.is_empty());
	}

	#[test]
	fn unterminated_string_is_rejected() {
		let mut cursor = Cursor::new(b"/abc");
		assert!(matches!(cursor.read_osc_str(), Err(OscError::MissingNul { at: 0 })));
	}

	#[test]
	fn truncated_read_reports_offsets() {
		let mut cursor = Cursor::with_base(&[0, 0], 16);
		let err = cursor.read_u32().expect_err("only two bytes");
		assert!(matches!(err, OscError::UnexpectedEof { at: 16, need: 4, rem: 2 }));
	}

	#[test]
	fn writer_refuses_to_overflow() {
		let mut buf = [0_u8; 6];
		let mut writer = SliceWriter::new(&mut buf);
		writer.put_u32(1).expect("fits");
		let err = writer.put_u32(2).expect_err("does not fit");
		assert!(matches!(err, OscError::BufferOverflow { need: 8, capacity: 6 }));
		assert_eq!(writer.len(), 4);
	}

	#[test]
	fn writer_rejects_interior_nul() {
		let mut buf = [0_u8; 16];
		let mut writer = SliceWriter::new(&mut buf);
		assert!(matches!(writer.put_osc_str("a\0b"), Err(OscError::EncodeInteriorNul { .. })));
	}

	#[test]
	fn blob_is_length_prefixed_and_padded() {
		let mut buf = [0xAA_u8; 12];
		let mut writer = SliceWriter::new(&mut buf);
		writer.put_blob(&[1, 2, 3, 4, 5]).expect("fits");
		assert_eq!(writer.len(), 12);
		assert_eq!(buf, [0, 0, 0, 5, 1, 2, 3, 4, 5, 0, 0, 0]);
	}
}
