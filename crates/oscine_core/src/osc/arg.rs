use std::fmt;

/// Argument kind, one per OSC type tag this engine understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgType {
	/// `i`: 32-bit signed integer.
	Int32,
	/// `h`: 64-bit signed integer.
	Int64,
	/// `f`: 32-bit IEEE float.
	Float,
	/// `d`: 64-bit IEEE float.
	Double,
	/// `s`: NUL-terminated string.
	String,
	/// `b`: length-prefixed byte blob.
	Blob,
	/// `T`: boolean true, no payload.
	True,
	/// `F`: boolean false, no payload.
	False,
	/// `N`: nil, no payload.
	Nil,
	/// `I`: infinitum / trigger / bang, no payload.
	Trigger,
	/// `t`: 64-bit NTP time tag.
	TimeTag,
	/// `c`: single character sent as 32 bits.
	Char,
	/// `r`: 32-bit RGBA color.
	RgbaColor,
	/// `m`: 4-byte MIDI message.
	MidiMessage,
}

impl ArgType {
	/// Every kind in type-tag order.
	pub const ALL: [ArgType; 14] = [
		Self::Int32,
		Self::Int64,
		Self::Float,
		Self::Double,
		Self::String,
		Self::Blob,
		Self::True,
		Self::False,
		Self::Nil,
		Self::Trigger,
		Self::TimeTag,
		Self::Char,
		Self::RgbaColor,
		Self::MidiMessage,
	];

	/// OSC type tag character.
	pub fn tag(self) -> u8 {
		match self {
			Self::Int32 => b'i',
			Self::Int64 => b'h',
			Self::Float => b'f',
			Self::Double => b'd',
			Self::String => b's',
			Self::Blob => b'b',
			Self::True => b'T',
			Self::False => b'F',
			Self::Nil => b'N',
			Self::Trigger => b'I',
			Self::TimeTag => b't',
			Self::Char => b'c',
			Self::RgbaColor => b'r',
			Self::MidiMessage => b'm',
		}
	}

	/// Kind for a type tag character, if known.
	pub fn from_tag(tag: u8) -> Option<Self> {
		Self::ALL.into_iter().find(|kind| kind.tag() == tag)
	}

	/// Stable lowercase label used in diagnostics.
	pub fn name(self) -> &'static str {
		match self {
			Self::Int32 => "int32",
			Self::Int64 => "int64",
			Self::Float => "float",
			Self::Double => "double",
			Self::String => "string",
			Self::Blob => "blob",
			Self::True => "true",
			Self::False => "false",
			Self::Nil => "none",
			Self::Trigger => "trigger",
			Self::TimeTag => "timetag",
			Self::Char => "char",
			Self::RgbaColor => "rgba",
			Self::MidiMessage => "midi",
		}
	}

	/// Number of fixed payload bytes, or `None` for strings and blobs.
	pub fn fixed_size(self) -> Option<usize> {
		match self {
			Self::Int32 | Self::Float | Self::Char | Self::RgbaColor | Self::MidiMessage => Some(4),
			Self::Int64 | Self::Double | Self::TimeTag => Some(8),
			Self::True | Self::False | Self::Nil | Self::Trigger => Some(0),
			Self::String | Self::Blob => None,
		}
	}
}

impl fmt::Display for ArgType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// One typed OSC argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
	/// 32-bit signed integer.
	Int32(i32),
	/// 64-bit signed integer.
	Int64(i64),
	/// 32-bit float.
	Float(f32),
	/// 64-bit float.
	Double(f64),
	/// UTF-8 text without interior NULs.
	String(String),
	/// Arbitrary bytes.
	Blob(Vec<u8>),
	/// Boolean true.
	True,
	/// Boolean false.
	False,
	/// Nil / none.
	Nil,
	/// Infinitum, used as a trigger or bang.
	Trigger,
	/// NTP 32.32 fixed-point time tag.
	TimeTag(u64),
	/// Single byte character.
	Char(u8),
	/// Packed `0xRRGGBBAA` color.
	RgbaColor(u32),
	/// Packed `port<<24 | status<<16 | data1<<8 | data2`.
	MidiMessage(u32),
}

impl Arg {
	/// Build a packed MIDI message argument.
	pub fn midi(port: u8, status: u8, data1: u8, data2: u8) -> Self {
		Self::MidiMessage(u32::from_be_bytes([port, status, data1, data2]))
	}

	/// Argument kind.
	pub fn arg_type(&self) -> ArgType {
		match self {
			Self::Int32(_) => ArgType::Int32,
			Self::Int64(_) => ArgType::Int64,
			Self::Float(_) => ArgType::Float,
			Self::Double(_) => ArgType::Double,
			Self::String(_) => ArgType::String,
			Self::Blob(_) => ArgType::Blob,
			Self::True => ArgType::True,
			Self::False => ArgType::False,
			Self::Nil => ArgType::Nil,
			Self::Trigger => ArgType::Trigger,
			Self::TimeTag(_) => ArgType::TimeTag,
			Self::Char(_) => ArgType::Char,
			Self::RgbaColor(_) => ArgType::RgbaColor,
			Self::MidiMessage(_) => ArgType::MidiMessage,
		}
	}

	/// Whether this is one of the four numeric kinds.
	pub fn is_numeric(&self) -> bool {
		matches!(self, Self::Int32(_) | Self::Int64(_) | Self::Float(_) | Self::Double(_))
	}

	/// Numeric coercion to `i32`; floats truncate toward zero.
	pub fn to_int32(&self) -> Option<i32> {
		match *self {
			Self::Int32(v) => Some(v),
			Self::Int64(v) => Some(v as i32),
			Self::Float(v) => Some(v as i32),
			Self::Double(v) => Some(v as i32),
			_ => None,
		}
	}

	/// Numeric coercion to `i64`; floats truncate toward zero.
	pub fn to_int64(&self) -> Option<i64> {
		match *self {
			Self::Int32(v) => Some(i64::from(v)),
			Self::Int64(v) => Some(v),
			Self::Float(v) => Some(v as i64),
			Self::Double(v) => Some(v as i64),
			_ => None,
		}
	}

	/// Numeric coercion to `f32`.
	pub fn to_float(&self) -> Option<f32> {
		match *self {
			Self::Int32(v) => Some(v as f32),
			Self::Int64(v) => Some(v as f32),
			Self::Float(v) => Some(v),
			Self::Double(v) => Some(v as f32),
			_ => None,
		}
	}

	/// Numeric coercion to `f64`.
	pub fn to_double(&self) -> Option<f64> {
		match *self {
			Self::Int32(v) => Some(f64::from(v)),
			Self::Int64(v) => Some(v as f64),
			Self::Float(v) => Some(f64::from(v)),
			Self::Double(v) => Some(v),
			_ => None,
		}
	}

	/// Text rendering for string-convertible kinds. Blobs, time tags, colors, and MIDI are not.
	pub fn to_text(&self) -> Option<String> {
		match self {
			Self::String(v) => Some(v.clone()),
			Self::Int32(v) => Some(v.to_string()),
			Self::Int64(v) => Some(v.to_string()),
			Self::Float(v) => Some(v.to_string()),
			Self::Double(v) => Some(v.to_string()),
			Self::Char(v) => Some(char::from(*v).to_string()),
			Self::True => Some("true".to_owned()),
			Self::False => Some("false".to_owned()),
			Self::Nil => Some("nil".to_owned()),
			Self::Trigger => Some("trigger".to_owned()),
			Self::Blob(_) | Self::TimeTag(_) | Self::RgbaColor(_) | Self::MidiMessage(_) => None,
		}
	}

	/// Truthiness of booleans and numerics (`!= 0`).
	pub fn to_bool(&self) -> Option<bool> {
		match *self {
			Self::True => Some(true),
			Self::False => Some(false),
			Self::Int32(v) => Some(v != 0),
			Self::Int64(v) => Some(v != 0),
			Self::Float(v) => Some(v != 0.0),
			Self::Double(v) => Some(v != 0.0),
			_ => None,
		}
	}
}

impl From<i32> for Arg {
	fn from(value: i32) -> Self {
		Self::Int32(value)
	}
}

impl From<i64> for Arg {
	fn from(value: i64) -> Self {
		Self::Int64(value)
	}
}

impl From<f32> for Arg {
	fn from(value: f32) -> Self {
		Self::Float(value)
	}
}

impl From<f64> for Arg {
	fn from(value: f64) -> Self {
		Self::Double(value)
	}
}

impl From<bool> for Arg {
	fn from(value: bool) -> Self {
		if value { Self::True } else { Self::False }
	}
}

impl From<&str> for Arg {
	fn from(value: &str) -> Self {
		Self::String(value.to_owned())
	}
}

impl From<String> for Arg {
	fn from(value: String) -> Self {
		Self::String(value)
	}
}

impl From<Vec<u8>> for Arg {
	fn from(value: Vec<u8>) -> Self {
		Self::Blob(value)
	}
}

#[cfg(test)]
mod tests;
