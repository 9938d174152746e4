use oscine::osc::Sender;

use crate::cmd::util::{Result, build_message};

#[derive(clap::Args)]
pub struct Args {
	#[arg(long, default_value = "127.0.0.1")]
	pub host: String,
	#[arg(long)]
	pub port: u16,
	/// OSC address pattern.
	pub address: String,
	/// Argument literal; repeatable.
	#[arg(long = "arg", allow_hyphen_values = true)]
	pub args: Vec<String>,
	/// Send a bare message instead of an immediate one-item bundle.
	#[arg(long = "no-bundle")]
	pub no_bundle: bool,
}

/// Send one message to `host:port`.
pub fn run(args: Args) -> Result<()> {
	let message = build_message(&args.address, &args.args)?;
	let mut sender = Sender::new();
	sender.setup(&args.host, args.port)?;
	let len = sender.send_message(&message, !args.no_bundle)?;
	sender.shutdown();

	println!("sent {len} bytes to {}:{}", args.host, args.port);
	Ok(())
}
