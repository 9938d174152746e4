use std::io;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};

use crate::osc::transport::{Interrupt, Listen, Recv, Transmit};

enum Frame {
	Data(Vec<u8>),
	Wake,
}

/// Sending half of an in-process link.
#[derive(Clone)]
pub struct MemoryTransmit {
	tx: Sender<Frame>,
}

/// Receiving half of an in-process link.
pub struct MemoryListen {
	rx: Receiver<Frame>,
	tx: Sender<Frame>,
}

struct MemoryWaker {
	tx: Sender<Frame>,
}

/// Create a connected in-process datagram link.
///
/// Datagrams larger than the receive buffer are truncated, as with UDP.
pub fn memory_link() -> (MemoryTransmit, MemoryListen) {
	let (tx, rx) = mpsc::channel();
	(MemoryTransmit { tx: tx.clone() }, MemoryListen { rx, tx })
}

impl Transmit for MemoryTransmit {
	fn send(&self, bytes: &[u8]) -> io::Result<()> {
		self.tx
			.send(Frame::Data(bytes.to_vec()))
			.map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "memory link closed"))
	}
}

impl Listen for MemoryListen {
	fn recv(&mut self, buf: &mut [u8]) -> io::Result<Recv> {
		match self.rx.recv() {
			Ok(Frame::Data(bytes)) => {
				let len = bytes.len().min(buf.len());
				buf[..len].copy_from_slice(&bytes[..len]);
				Ok(Recv::Datagram(len))
			}
			Ok(Frame::Wake) => Ok(Recv::Interrupted),
			// Unreachable while `self.tx` lives, kept total for the type.
			Err(_) => Ok(Recv::Interrupted),
		}
	}

	fn interrupter(&self) -> Arc<dyn Interrupt> {
		Arc::new(MemoryWaker { tx: self.tx.clone() })
	}
}

impl Interrupt for MemoryWaker {
	fn interrupt(&self) {
		let _ = self.tx.send(Frame::Wake);
	}
}
