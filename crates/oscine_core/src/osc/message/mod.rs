use crate::osc::{Arg, ArgType, OscError, Result};

/// OSC message: an address plus ordered arguments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Message {
	address: String,
	args: Vec<Arg>,
}

impl Message {
	/// Create an argument-less message for `address`.
	pub fn new(address: impl Into<String>) -> Self {
		Self {
			address: address.into(),
			args: Vec::new(),
		}
	}

	/// Create a message from an address and prebuilt arguments.
	pub fn with_args(address: impl Into<String>, args: Vec<Arg>) -> Self {
		Self {
			address: address.into(),
			args,
		}
	}

	/// Address pattern as given by the caller or decoded from the wire.
	pub fn address(&self) -> &str {
		&self.address
	}

	/// Replace the address pattern.
	pub fn set_address(&mut self, address: impl Into<String>) {
		self.address = address.into();
	}

	/// Borrow all arguments in order.
	pub fn args(&self) -> &[Arg] {
		&self.args
	}

	/// Consume into address and arguments.
	pub fn into_parts(self) -> (String, Vec<Arg>) {
		(self.address, self.args)
	}

	/// Append one argument.
	pub fn push(&mut self, arg: impl Into<Arg>) -> &mut Self {
		self.args.push(arg.into());
		self
	}

	/// Builder-style append.
	pub fn with_arg(mut self, arg: impl Into<Arg>) -> Self {
		self.args.push(arg.into());
		self
	}

	/// Append an `i` argument.
	pub fn add_int32(&mut self, value: i32) -> &mut Self {
		self.push(Arg::Int32(value))
	}

	/// Append an `h` argument.
	pub fn add_int64(&mut self, value: i64) -> &mut Self {
		self.push(Arg::Int64(value))
	}

	/// Append an `f` argument.
	pub fn add_float(&mut self, value: f32) -> &mut Self {
		self.push(Arg::Float(value))
	}

	/// Append a `d` argument.
	pub fn add_double(&mut self, value: f64) -> &mut Self {
		self.push(Arg::Double(value))
	}

	/// Append an `s` argument.
	pub fn add_string(&mut self, value: impl Into<String>) -> &mut Self {
		self.push(Arg::String(value.into()))
	}

	/// Append a `b` argument.
	pub fn add_blob(&mut self, bytes: impl Into<Vec<u8>>) -> &mut Self {
		self.push(Arg::Blob(bytes.into()))
	}

	/// Append `T` or `F`.
	pub fn add_bool(&mut self, value: bool) -> &mut Self {
		self.push(Arg::from(value))
	}

	/// Append a `c` argument.
	pub fn add_char(&mut self, value: u8) -> &mut Self {
		self.push(Arg::Char(value))
	}

	/// Append an `N` argument.
	pub fn add_nil(&mut self) -> &mut Self {
		self.push(Arg::Nil)
	}

	/// Append an `I` argument.
	pub fn add_trigger(&mut self) -> &mut Self {
		self.push(Arg::Trigger)
	}

	/// Append an `r` argument.
	pub fn add_rgba_color(&mut self, rgba: u32) -> &mut Self {
		self.push(Arg::RgbaColor(rgba))
	}

	/// Append an `m` argument from its packed form.
	pub fn add_midi_message(&mut self, packed: u32) -> &mut Self {
		self.push(Arg::MidiMessage(packed))
	}

	/// Append an `m` argument from its four bytes.
	pub fn add_midi_parts(&mut self, port: u8, status: u8, data1: u8, data2: u8) -> &mut Self {
		self.push(Arg::midi(port, status, data1, data2))
	}

	/// Append a `t` argument.
	pub fn add_time_tag(&mut self, time_tag: u64) -> &mut Self {
		self.push(Arg::TimeTag(time_tag))
	}

	/// Number of arguments.
	pub fn num_args(&self) -> usize {
		self.args.len()
	}

	/// Bounds-checked argument access.
	pub fn arg(&self, index: usize) -> Result<&Arg> {
		self.args.get(index).ok_or(OscError::IndexOutOfRange {
			kind: "argument",
			index,
			len: self.args.len(),
		})
	}

	/// Kind of the argument at `index`.
	pub fn arg_type(&self, index: usize) -> Result<ArgType> {
		Ok(self.arg(index)?.arg_type())
	}

	/// Diagnostic label of the argument kind at `index`.
	pub fn arg_type_name(&self, index: usize) -> Result<&'static str> {
		Ok(self.arg_type(index)?.name())
	}

	/// Type tag string without the leading comma, e.g. `"ifs"`.
	pub fn type_tags(&self) -> String {
		self.args.iter().map(|arg| char::from(arg.arg_type().tag())).collect()
	}

	/// Read any numeric argument as `i32`.
	pub fn arg_as_int32(&self, index: usize) -> Result<i32> {
		self.coerce(index, "int32", Arg::to_int32)
	}

	/// Read any numeric argument as `i64`.
	pub fn arg_as_int64(&self, index: usize) -> Result<i64> {
		self.coerce(index, "int64", Arg::to_int64)
	}

	/// Read any numeric argument as `f32`.
	pub fn arg_as_float(&self, index: usize) -> Result<f32> {
		self.coerce(index, "float", Arg::to_float)
	}

	/// Read any numeric argument as `f64`.
	pub fn arg_as_double(&self, index: usize) -> Result<f64> {
		self.coerce(index, "double", Arg::to_double)
	}

	/// Read a string, or render a numeric/char/bool/nil/trigger argument as text.
	pub fn arg_as_string(&self, index: usize) -> Result<String> {
		self.coerce(index, "string", Arg::to_text)
	}

	/// Borrow string argument text without coercion.
	pub fn arg_as_str(&self, index: usize) -> Result<&str> {
		match self.arg(index)? {
			Arg::String(value) => Ok(value),
			other => Err(mismatch(index, "string", other)),
		}
	}

	/// Borrow blob bytes.
	pub fn arg_as_blob(&self, index: usize) -> Result<&[u8]> {
		match self.arg(index)? {
			Arg::Blob(bytes) => Ok(bytes),
			other => Err(mismatch(index, "blob", other)),
		}
	}

	/// Read `T`/`F` or the truthiness of a numeric argument.
	pub fn arg_as_bool(&self, index: usize) -> Result<bool> {
		self.coerce(index, "bool", Arg::to_bool)
	}

	/// Read a `c` argument.
	pub fn arg_as_char(&self, index: usize) -> Result<u8> {
		match self.arg(index)? {
			Arg::Char(value) => Ok(*value),
			other => Err(mismatch(index, "char", other)),
		}
	}

	/// Read an `r` argument.
	pub fn arg_as_rgba_color(&self, index: usize) -> Result<u32> {
		match self.arg(index)? {
			Arg::RgbaColor(value) => Ok(*value),
			other => Err(mismatch(index, "rgba", other)),
		}
	}

	/// Read an `m` argument in packed form.
	pub fn arg_as_midi_message(&self, index: usize) -> Result<u32> {
		match self.arg(index)? {
			Arg::MidiMessage(value) => Ok(*value),
			other => Err(mismatch(index, "midi", other)),
		}
	}

	/// Read a `t` argument.
	pub fn arg_as_time_tag(&self, index: usize) -> Result<u64> {
		match self.arg(index)? {
			Arg::TimeTag(value) => Ok(*value),
			other => Err(mismatch(index, "timetag", other)),
		}
	}

	/// Reset the address to empty and drop every argument.
	pub fn clear(&mut self) {
		self.address.clear();
		self.args.clear();
	}

	fn coerce<T>(&self, index: usize, expected: &'static str, convert: impl FnOnce(&Arg) -> Option<T>) -> Result<T> {
		let arg = self.arg(index)?;
		convert(arg).ok_or_else(|| mismatch(index, expected, arg))
	}
}

fn mismatch(index: usize, expected: &'static str, arg: &Arg) -> OscError {
	OscError::TypeMismatch {
		index,
		expected,
		actual: arg.arg_type(),
	}
}

#[cfg(test)]
mod tests;
