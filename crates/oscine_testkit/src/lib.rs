//! Shared test helpers for workspace crates.

use std::net::{Ipv4Addr, UdpSocket};
use std::thread;
use std::time::{Duration, Instant};

/// Render bytes as lowercase hex without separators.
pub fn to_hex(bytes: &[u8]) -> String {
	bytes.iter().map(|byte| format!("{byte:02x}")).collect()
}

/// Parse a hex fixture. Whitespace and `_` separators are ignored; panics on bad input.
pub fn from_hex(text: &str) -> Vec<u8> {
	let digits: Vec<u8> = text.bytes().filter(|byte| !byte.is_ascii_whitespace() && *byte != b'_').collect();
	assert!(digits.len() % 2 == 0, "odd hex digit count in fixture {text:?}");
	digits
		.chunks(2)
		.map(|pair| {
			let pair = std::str::from_utf8(pair).expect("ascii hex");
			u8::from_str_radix(pair, 16).unwrap_or_else(|_| panic!("bad hex pair {pair:?}"))
		})
		.collect()
}

/// Poll `cond` every few milliseconds until it holds or `timeout` elapses.
pub fn wait_until(timeout: Duration, mut cond: impl FnMut() -> bool) -> bool {
	let deadline = Instant::now() + timeout;
	loop {
		if cond() {
			return true;
		}
		if Instant::now() >= deadline {
			return false;
		}
		thread::sleep(Duration::from_millis(5));
	}
}

/// Ask the OS for a currently unused loopback UDP port.
pub fn free_udp_port() -> u16 {
	UdpSocket::bind((Ipv4Addr::LOCALHOST, 0))
		.and_then(|socket| socket.local_addr())
		.map(|addr| addr.port())
		.expect("ephemeral udp bind")
}

