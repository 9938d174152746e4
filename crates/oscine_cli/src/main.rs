#![allow(missing_docs)]

use clap::{Parser, Subcommand};

mod cmd;

#[derive(Parser)]
#[command(name = "oscine", about = "Open Sound Control packet tools")]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Encode a message or bundle and print it as hex.
	Encode(cmd::encode::Args),
	/// Decode a hex packet and print its tree.
	Decode(cmd::decode::Args),
	/// Send one message over UDP.
	Send(cmd::send::Args),
	/// Listen on a UDP port and print received messages.
	Listen(cmd::listen::Args),
}

fn main() {
	env_logger::init();
	if let Err(err) = run() {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn run() -> cmd::util::Result<()> {
	let cli = Cli::parse();

	match cli.command {
		Commands::Encode(args) => cmd::encode::run(args),
		Commands::Decode(args) => cmd::decode::run(args),
		Commands::Send(args) => cmd::send::run(args),
		Commands::Listen(args) => cmd::listen::run(args),
	}
}
