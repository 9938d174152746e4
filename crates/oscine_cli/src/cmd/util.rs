use oscine::osc::{Arg, Message, OscError};
use serde::Serialize;
use thiserror::Error;

/// CLI result alias.
pub type Result<T> = std::result::Result<T, CliError>;

/// Failures surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
	/// Engine error.
	#[error(transparent)]
	Osc(#[from] OscError),
	/// Argument literal could not be parsed.
	#[error("invalid argument literal {literal:?}: {reason}")]
	InvalidArg {
		/// Offending literal.
		literal: String,
		/// What was wrong with it.
		reason: &'static str,
	},
	/// Hex input had an odd length or a non-hex digit.
	#[error("invalid hex input {input:?}")]
	InvalidHex {
		/// Offending input.
		input: String,
	},
	/// JSON rendering failed.
	#[error("json output failed: {0}")]
	Json(#[from] serde_json::Error),
}

/// Build a message from an address and `TAG:VALUE` literals.
pub(crate) fn build_message(address: &str, literals: &[String]) -> Result<Message> {
	let args = literals.iter().map(|literal| parse_arg(literal)).collect::<Result<Vec<_>>>()?;
	Ok(Message::with_args(address, args))
}

/// Parse one argument literal such as `i:60`, `s:piano`, or `T`.
pub(crate) fn parse_arg(literal: &str) -> Result<Arg> {
	let invalid = |reason| CliError::InvalidArg {
		literal: literal.to_owned(),
		reason,
	};

	match literal {
		"T" => return Ok(Arg::True),
		"F" => return Ok(Arg::False),
		"N" => return Ok(Arg::Nil),
		"I" => return Ok(Arg::Trigger),
		_ => {}
	}

	let (tag, value) = literal.split_once(':').ok_or_else(|| invalid("expected TAG:VALUE"))?;
	let arg = match tag {
		"i" => Arg::Int32(value.parse().map_err(|_| invalid("not an int32"))?),
		"h" => Arg::Int64(value.parse().map_err(|_| invalid("not an int64"))?),
		"f" => Arg::Float(value.parse().map_err(|_| invalid("not a float"))?),
		"d" => Arg::Double(value.parse().map_err(|_| invalid("not a double"))?),
		"s" => Arg::String(value.to_owned()),
		"b" => Arg::Blob(parse_hex(value).map_err(|_| invalid("blob is not hex"))?),
		"t" => Arg::TimeTag(parse_u64(value).ok_or_else(|| invalid("not a time tag"))?),
		"c" => match value.as_bytes() {
			[byte] if byte.is_ascii() => Arg::Char(*byte),
			_ => return Err(invalid("char must be one ascii character")),
		},
		"r" => Arg::RgbaColor(parse_u32(value).ok_or_else(|| invalid("not a 32-bit color"))?),
		"m" => Arg::MidiMessage(parse_u32(value).ok_or_else(|| invalid("not a 32-bit midi message"))?),
		_ => return Err(invalid("unknown type tag")),
	};
	Ok(arg)
}

/// Render an argument in the same literal syntax [`parse_arg`] accepts.
pub(crate) fn render_arg(arg: &Arg) -> String {
	match arg {
		Arg::Int32(v) => format!("i:{v}"),
		Arg::Int64(v) => format!("h:{v}"),
		Arg::Float(v) => format!("f:{v}"),
		Arg::Double(v) => format!("d:{v}"),
		Arg::String(v) => format!("s:{v}"),
		Arg::Blob(v) => format!("b:{}", to_hex(v)),
		Arg::True => "T".to_owned(),
		Arg::False => "F".to_owned(),
		Arg::Nil => "N".to_owned(),
		Arg::Trigger => "I".to_owned(),
		Arg::TimeTag(v) => format!("t:{v}"),
		Arg::Char(v) => format!("c:{}", char::from(*v)),
		Arg::RgbaColor(v) => format!("r:0x{v:08x}"),
		Arg::MidiMessage(v) => format!("m:0x{v:08x}"),
	}
}

/// Parse decimal or `0x`-prefixed hex `u32`.
fn parse_u32(value: &str) -> Option<u32> {
	match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
		Some(hex) => u32::from_str_radix(hex, 16).ok(),
		None => value.parse().ok(),
	}
}

/// Parse decimal or `0x`-prefixed hex `u64`.
pub(crate) fn parse_u64(value: &str) -> Option<u64> {
	match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
		Some(hex) => u64::from_str_radix(hex, 16).ok(),
		None => value.parse().ok(),
	}
}

/// Parse hex bytes, ignoring whitespace.
pub(crate) fn parse_hex(input: &str) -> Result<Vec<u8>> {
	let invalid = || CliError::InvalidHex { input: input.to_owned() };
	let digits: Vec<u8> = input.bytes().filter(|byte| !byte.is_ascii_whitespace()).collect();
	if digits.len() % 2 != 0 {
		return Err(invalid());
	}
	digits
		.chunks(2)
		.map(|pair| {
			let text = std::str::from_utf8(pair).map_err(|_| invalid())?;
			u8::from_str_radix(text, 16).map_err(|_| invalid())
		})
		.collect()
}

/// Lowercase hex without separators.
pub(crate) fn to_hex(bytes: &[u8]) -> String {
	bytes.iter().map(|byte| format!("{byte:02x}")).collect()
}

/// Print one pretty JSON document to stdout.
pub(crate) fn emit_json<T: Serialize>(payload: &T) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(payload)?);
	Ok(())
}

/// Print one compact JSON document per line to stdout.
pub(crate) fn emit_json_line<T: Serialize>(payload: &T) -> Result<()> {
	println!("{}", serde_json::to_string(payload)?);
	Ok(())
}

#[cfg(test)]
mod tests {
	use oscine::osc::Arg;

	use super::{CliError, parse_arg, parse_hex, render_arg};

	#[test]
	fn literals_cover_every_kind() {
		let cases = [
			("i:60", Arg::Int32(60)),
			("h:-5", Arg::Int64(-5)),
			("f:0.5", Arg::Float(0.5)),
			("d:1.5", Arg::Double(1.5)),
			("s:a:b", Arg::String("a:b".to_owned())),
			("b:deadbeef", Arg::Blob(vec![0xde, 0xad, 0xbe, 0xef])),
			("T", Arg::True),
			("F", Arg::False),
			("N", Arg::Nil),
			("I", Arg::Trigger),
			("t:1", Arg::TimeTag(1)),
			("c:x", Arg::Char(b'x')),
			("r:0xff0000ff", Arg::RgbaColor(0xff00_00ff)),
			("m:0x00904064", Arg::midi(0, 0x90, 0x40, 0x64)),
		];
		for (literal, expected) in cases {
			let parsed = parse_arg(literal).expect("literal parses");
			assert_eq!(parsed, expected, "{literal}");
			assert_eq!(parse_arg(&render_arg(&parsed)).expect("rendered literal parses"), expected);
		}
	}

	#[test]
	fn bad_literals_are_rejected() {
		for literal in ["60", "i:abc", "q:1", "c:xy", "b:abc"] {
			assert!(matches!(parse_arg(literal), Err(CliError::InvalidArg { .. })), "{literal}");
		}
	}

	#[test]
	fn hex_ignores_whitespace() {
		assert_eq!(parse_hex("2f 61 00 00").expect("hex parses"), b"/a\0\0");
		assert!(parse_hex("2f6").is_err());
	}
}
