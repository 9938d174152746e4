//! Transport seam between the engine and the network.
//!
//! The engine needs three primitives: write one datagram, block until one datagram arrives,
//! and wake a blocked receive from another thread. [`udp`] implements them over std sockets;
//! [`memory`] implements them over an in-process channel.

use std::io;
use std::sync::Arc;

/// In-process channel transport.
pub mod memory;
/// UDP socket transport.
pub mod udp;

pub use memory::{MemoryListen, MemoryTransmit, memory_link};
pub use udp::{UdpListen, UdpTransmit};

/// Outcome of one blocking receive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recv {
	/// A datagram of this many bytes was written to the buffer.
	Datagram(usize),
	/// The read timed out with nothing to report.
	Idle,
	/// The receive was woken through [`Interrupt::interrupt`].
	Interrupted,
}

/// Outbound datagram writer. Shared by reference across threads.
pub trait Transmit: Send + Sync {
	/// Write one datagram.
	fn send(&self, bytes: &[u8]) -> io::Result<()>;
}

/// Wakes a receive blocked inside [`Listen::recv`].
pub trait Interrupt: Send + Sync {
	/// Cause the current or next blocking receive to return [`Recv::Interrupted`] promptly.
	fn interrupt(&self);
}

/// Inbound datagram reader owned by one listener thread at a time.
pub trait Listen: Send {
	/// Block until a datagram arrives, the read times out, or an interrupt fires.
	fn recv(&mut self, buf: &mut [u8]) -> io::Result<Recv>;

	/// Handle that can wake this listener from another thread.
	fn interrupter(&self) -> Arc<dyn Interrupt>;

	/// Local port, when the transport has one.
	fn local_port(&self) -> Option<u16> {
		None
	}
}

#[cfg(test)]
mod tests;
