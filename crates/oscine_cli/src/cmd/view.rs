use oscine::osc::{Arg, Bundle, BundleItem, Message, Packet};
use serde::Serialize;
use serde_json::{Value, json};

use crate::cmd::util::{render_arg, to_hex};

/// JSON shape of one argument.
#[derive(Serialize)]
pub(crate) struct ArgJson {
	#[serde(rename = "type")]
	kind: &'static str,
	value: Value,
}

/// JSON shape of a message.
#[derive(Serialize)]
pub(crate) struct MessageJson {
	address: String,
	type_tags: String,
	args: Vec<ArgJson>,
}

/// JSON shape of a packet tree.
#[derive(Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub(crate) enum PacketJson {
	Message(MessageJson),
	Bundle { time_tag: u64, items: Vec<PacketJson> },
}

impl ArgJson {
	fn new(arg: &Arg) -> Self {
		let value = match arg {
			Arg::Int32(v) => json!(v),
			Arg::Int64(v) => json!(v),
			Arg::Float(v) => json!(v),
			Arg::Double(v) => json!(v),
			Arg::String(v) => json!(v),
			Arg::Blob(v) => json!(to_hex(v)),
			Arg::True => json!(true),
			Arg::False => json!(false),
			Arg::Nil | Arg::Trigger => Value::Null,
			Arg::TimeTag(v) => json!(v),
			Arg::Char(v) => json!(char::from(*v).to_string()),
			Arg::RgbaColor(v) | Arg::MidiMessage(v) => json!(format!("0x{v:08x}")),
		};
		Self {
			kind: arg.arg_type().name(),
			value,
		}
	}
}

impl MessageJson {
	pub(crate) fn new(message: &Message) -> Self {
		Self {
			address: message.address().to_owned(),
			type_tags: message.type_tags(),
			args: message.args().iter().map(ArgJson::new).collect(),
		}
	}
}

impl PacketJson {
	pub(crate) fn new(packet: &Packet) -> Self {
		match packet {
			Packet::Message(message) => Self::Message(MessageJson::new(message)),
			Packet::Bundle(bundle) => Self::bundle(bundle),
		}
	}

	fn bundle(bundle: &Bundle) -> Self {
		Self::Bundle {
			time_tag: bundle.time_tag(),
			items: bundle
				.items()
				.iter()
				.map(|item| match item {
					BundleItem::Message(message) => Self::Message(MessageJson::new(message)),
					BundleItem::Bundle(child) => Self::bundle(child),
				})
				.collect(),
		}
	}
}

/// One-line text rendering: address followed by argument literals.
pub(crate) fn message_line(message: &Message) -> String {
	let mut out = message.address().to_owned();
	for arg in message.args() {
		out.push(' ');
		out.push_str(&render_arg(arg));
	}
	out
}

/// Print a packet tree with two-space indentation per bundle level.
pub(crate) fn print_packet(packet: &Packet) {
	match packet {
		Packet::Message(message) => println!("{}", message_line(message)),
		Packet::Bundle(bundle) => print_bundle(bundle, 0),
	}
}

fn print_bundle(bundle: &Bundle, depth: usize) {
	let pad = "  ".repeat(depth);
	println!("{pad}#bundle time_tag={}", bundle.time_tag());
	for item in bundle.items() {
		match item {
			BundleItem::Message(message) => println!("{pad}  {}", message_line(message)),
			BundleItem::Bundle(child) => print_bundle(child, depth + 1),
		}
	}
}
