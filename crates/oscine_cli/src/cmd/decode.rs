use oscine::osc::{DecodeOptions, decode_packet};

use crate::cmd::util::{Result, emit_json, parse_hex};
use crate::cmd::view::{PacketJson, print_packet};

#[derive(clap::Args)]
pub struct Args {
	/// Packet bytes as hex; whitespace is ignored.
	pub hex: String,
	/// Accept packets whose size is not a multiple of 4.
	#[arg(long)]
	pub lenient: bool,
	#[arg(long = "max-depth")]
	pub max_depth: Option<u32>,
	#[arg(long)]
	pub json: bool,
}

/// Decode a hex packet and print the message or bundle tree.
pub fn run(args: Args) -> Result<()> {
	let bytes = parse_hex(&args.hex)?;
	let mut options = if args.lenient { DecodeOptions::lenient() } else { DecodeOptions::default() };
	if let Some(max_depth) = args.max_depth {
		options.max_depth = max_depth;
	}

	let packet = decode_packet(&bytes, &options)?;
	if args.json {
		return emit_json(&PacketJson::new(&packet));
	}

	println!("bytes: {}", bytes.len());
	println!("messages: {}", packet.message_total());
	print_packet(&packet);
	Ok(())
}
