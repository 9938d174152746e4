use oscine::osc::{Bundle, encode_bundle, encode_message, time_tag};

use crate::cmd::util::{Result, build_message, to_hex};

#[derive(clap::Args)]
pub struct Args {
	/// OSC address pattern, e.g. `/synth/note`.
	pub address: String,
	/// Argument literal (`i:60`, `f:0.8`, `s:piano`, `T`, ...); repeatable.
	#[arg(long = "arg", allow_hyphen_values = true)]
	pub args: Vec<String>,
	/// Wrap the message in a bundle.
	#[arg(long)]
	pub bundle: bool,
	/// Bundle time tag; implies `--bundle`.
	#[arg(long = "time-tag")]
	pub time_tag: Option<u64>,
}

/// Encode one message, optionally bundled, and print it as hex.
pub fn run(args: Args) -> Result<()> {
	let message = build_message(&args.address, &args.args)?;
	let bytes = if args.bundle || args.time_tag.is_some() {
		let bundle = Bundle::new(args.time_tag.unwrap_or(time_tag::IMMEDIATE)).with_message(message);
		encode_bundle(&bundle)?
	} else {
		encode_message(&message)?
	};

	println!("{}", to_hex(&bytes));
	Ok(())
}
