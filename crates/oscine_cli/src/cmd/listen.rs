use std::thread;
use std::time::{Duration, Instant};

use log::info;
use oscine::osc::{Message, Receiver, ReceiverOptions};

use crate::cmd::util::{Result, emit_json_line};
use crate::cmd::view::{MessageJson, message_line};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

#[derive(clap::Args)]
pub struct Args {
	#[arg(long)]
	pub port: u16,
	/// Exit after printing this many messages.
	#[arg(long)]
	pub count: Option<usize>,
	/// Exit after this many milliseconds.
	#[arg(long = "timeout-ms")]
	pub timeout_ms: Option<u64>,
	/// Drop the oldest queued message beyond this many.
	#[arg(long = "max-queued")]
	pub max_queued: Option<usize>,
	/// Print one JSON object per message.
	#[arg(long)]
	pub json: bool,
}

/// Listen on a UDP port and print every received message.
pub fn run(args: Args) -> Result<()> {
	let options = ReceiverOptions {
		max_queued: args.max_queued,
		..ReceiverOptions::default()
	};
	let mut receiver = Receiver::with_options(options);
	receiver.setup(args.port)?;
	receiver.start()?;
	info!("listening on port {}", receiver.port().unwrap_or(args.port));

	let deadline = args.timeout_ms.map(|ms| Instant::now() + Duration::from_millis(ms));
	let mut printed = 0_usize;
	'poll: loop {
		while let Some(message) = receiver.next_message() {
			print_message(&message, args.json)?;
			printed += 1;
			if args.count.is_some_and(|count| printed >= count) {
				break 'poll;
			}
		}
		if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
			break;
		}
		thread::sleep(POLL_INTERVAL);
	}

	let stats = receiver.stats();
	receiver.shutdown();
	info!("received {} message(s), rejected {} datagram(s), dropped {}", stats.received, stats.rejected, stats.dropped);
	Ok(())
}

fn print_message(message: &Message, json: bool) -> Result<()> {
	if json {
		return emit_json_line(&MessageJson::new(message));
	}
	println!("{}", message_line(message));
	Ok(())
}
