//! Background UDP listener feeding a polled message queue.
//!
//! One listener thread decodes datagrams and appends every flattened [`Message`] to a shared
//! FIFO; any thread may poll the FIFO without blocking. Malformed datagrams are logged and
//! dropped, so a bad sender can never stop the listener.

use std::collections::VecDeque;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use log::{debug, info, trace, warn};

use crate::osc::transport::{Interrupt, Listen, Recv, UdpListen};
use crate::osc::{Component, DecodeOptions, Message, OscError, Result, decode_messages};

/// Pause after a transport error so a persistently failing socket does not spin.
const ERROR_BACKOFF: Duration = Duration::from_millis(10);

/// Lifecycle of a [`Receiver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiverState {
	/// No transport attached.
	Unconfigured,
	/// Transport attached, listener not running.
	Ready,
	/// Listener thread running.
	Listening,
	/// Listener stopped; transport kept for a later `start`.
	Stopped,
	/// Transport released and queue cleared.
	ShutDown,
}

impl ReceiverState {
	/// Lowercase label used in diagnostics.
	pub fn label(self) -> &'static str {
		match self {
			Self::Unconfigured => "unconfigured",
			Self::Ready => "ready",
			Self::Listening => "listening",
			Self::Stopped => "stopped",
			Self::ShutDown => "shut down",
		}
	}
}

/// Receiver tuning knobs.
#[derive(Debug, Clone)]
pub struct ReceiverOptions {
	/// Limits applied to every inbound datagram.
	pub decode: DecodeOptions,
	/// Queue capacity; when full the oldest message is dropped. `None` is unbounded.
	pub max_queued: Option<usize>,
	/// Largest accepted datagram; longer ones are counted as rejected and dropped whole.
	pub recv_buffer_size: usize,
	/// Socket read timeout for transports created by [`Receiver::setup`].
	pub read_timeout: Duration,
	/// Name of the listener thread.
	pub thread_name: String,
}

impl Default for ReceiverOptions {
	fn default() -> Self {
		Self {
			decode: DecodeOptions::default(),
			max_queued: None,
			recv_buffer_size: 65_536,
			read_timeout: UdpListen::DEFAULT_READ_TIMEOUT,
			thread_name: "oscine-listener".to_owned(),
		}
	}
}

/// Running counters since the receiver was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReceiverStats {
	/// Messages decoded and queued.
	pub received: u64,
	/// Datagrams rejected as malformed.
	pub rejected: u64,
	/// Messages evicted from a full queue.
	pub dropped: u64,
}

struct Shared {
	queue: Mutex<VecDeque<Message>>,
	stop: AtomicBool,
	max_queued: Option<usize>,
	received: AtomicU64,
	rejected: AtomicU64,
	dropped: AtomicU64,
}

impl Shared {
	fn queue(&self) -> MutexGuard<'_, VecDeque<Message>> {
		// A panicking holder cannot leave the deque half-updated.
		self.queue.lock().unwrap_or_else(PoisonError::into_inner)
	}

	fn accept(&self, datagram: &[u8], opt: &DecodeOptions) {
		let messages = match decode_messages(datagram, opt) {
			Ok(messages) => messages,
			Err(err) => {
				self.rejected.fetch_add(1, Ordering::Relaxed);
				debug!("dropping malformed datagram ({} bytes): {err}", datagram.len());
				return;
			}
		};

		let count = messages.len() as u64;
		let mut dropped = 0_u64;
		let mut queue = self.queue();
		for message in messages {
			match self.max_queued {
				Some(0) => {
					dropped += 1;
					continue;
				}
				Some(max) => {
					while queue.len() >= max {
						queue.pop_front();
						dropped += 1;
					}
				}
				None => {}
			}
			queue.push_back(message);
		}
		drop(queue);

		self.received.fetch_add(count, Ordering::Relaxed);
		if dropped > 0 {
			self.dropped.fetch_add(dropped, Ordering::Relaxed);
			debug!("queue full, dropped {dropped} message(s)");
		}
		trace!("queued {count} message(s) from {} byte datagram", datagram.len());
	}

	fn reject_oversize(&self, limit: usize) {
		self.rejected.fetch_add(1, Ordering::Relaxed);
		debug!("dropping datagram longer than the {limit} byte receive buffer");
	}
}

struct Worker {
	handle: JoinHandle<Box<dyn Listen>>,
	interrupt: Arc<dyn Interrupt>,
}

/// Listens for OSC packets on a background thread and queues decoded messages.
pub struct Receiver {
	options: ReceiverOptions,
	shared: Arc<Shared>,
	source: Option<Box<dyn Listen>>,
	worker: Option<Worker>,
	state: ReceiverState,
	port: Option<u16>,
}

impl Default for Receiver {
	fn default() -> Self {
		Self::new()
	}
}

impl Receiver {
	/// Create an unconfigured receiver with default options.
	pub fn new() -> Self {
		Self::with_options(ReceiverOptions::default())
	}

	/// Create an unconfigured receiver.
	pub fn with_options(options: ReceiverOptions) -> Self {
		let shared = Arc::new(Shared {
			queue: Mutex::new(VecDeque::new()),
			stop: AtomicBool::new(false),
			max_queued: options.max_queued,
			received: AtomicU64::new(0),
			rejected: AtomicU64::new(0),
			dropped: AtomicU64::new(0),
		});
		Self {
			options,
			shared,
			source: None,
			worker: None,
			state: ReceiverState::Unconfigured,
			port: None,
		}
	}

	/// Create a ready receiver over an injected transport.
	pub fn with_transport(source: Box<dyn Listen>) -> Self {
		let mut receiver = Self::new();
		receiver.attach(source);
		receiver
	}

	/// Bind UDP `0.0.0.0:port`; port `0` picks an ephemeral port, see [`Self::port`].
	pub fn setup(&mut self, port: u16) -> Result<()> {
		self.setup_addr(SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)))
	}

	/// Bind UDP on an explicit local address, replacing any previous transport.
	pub fn setup_addr(&mut self, addr: SocketAddr) -> Result<()> {
		self.shutdown();
		let source = UdpListen::bind(addr, self.options.read_timeout)?;
		self.attach(Box::new(source));
		info!("osc receiver bound on port {}", self.port.unwrap_or(addr.port()));
		Ok(())
	}

	/// Replace the transport with `source`, stopping any running listener first.
	/// The queue is kept.
	pub fn attach(&mut self, source: Box<dyn Listen>) {
		self.stop();
		self.port = source.local_port();
		self.source = Some(source);
		self.state = ReceiverState::Ready;
	}

	/// Spawn the listener thread. Calling while already listening does nothing.
	pub fn start(&mut self) -> Result<()> {
		match self.state {
			ReceiverState::Listening => return Ok(()),
			ReceiverState::Ready | ReceiverState::Stopped => {}
			ReceiverState::Unconfigured => return Err(OscError::NotSetup { component: Component::Receiver }),
			ReceiverState::ShutDown => {
				return Err(OscError::ReceiverState {
					op: "start",
					state: self.state.label(),
				});
			}
		}
		let Some(source) = self.source.take() else {
			self.state = ReceiverState::Unconfigured;
			return Err(OscError::NotSetup { component: Component::Receiver });
		};

		let interrupt = source.interrupter();
		let shared = Arc::clone(&self.shared);
		let decode = self.options.decode.clone();
		let buffer_size = self.options.recv_buffer_size.max(1);
		shared.stop.store(false, Ordering::SeqCst);

		let spawned = thread::Builder::new()
			.name(self.options.thread_name.clone())
			.spawn(move || listen_loop(source, &shared, &decode, buffer_size));
		match spawned {
			Ok(handle) => {
				self.worker = Some(Worker { handle, interrupt });
				self.state = ReceiverState::Listening;
				info!("osc receiver listening (port={:?})", self.port);
				Ok(())
			}
			Err(err) => {
				// The closure owning the transport is gone with the failed spawn.
				self.state = ReceiverState::Unconfigured;
				self.port = None;
				Err(OscError::Spawn(err))
			}
		}
	}

	/// Signal the listener, wake it, and join it. Queued messages are kept.
	pub fn stop(&mut self) {
		let Some(worker) = self.worker.take() else {
			return;
		};
		self.shared.stop.store(true, Ordering::SeqCst);
		worker.interrupt.interrupt();
		match worker.handle.join() {
			Ok(source) => {
				self.source = Some(source);
				self.state = ReceiverState::Stopped;
				info!("osc receiver stopped");
			}
			Err(_) => {
				warn!("osc listener thread panicked, transport lost");
				self.state = ReceiverState::Unconfigured;
				self.port = None;
			}
		}
	}

	/// Stop listening, release the transport, and clear the queue. Safe to call repeatedly.
	pub fn shutdown(&mut self) {
		self.stop();
		let released = self.source.take().is_some();
		self.shared.queue().clear();
		self.port = None;
		if self.state != ReceiverState::Unconfigured || released {
			self.state = ReceiverState::ShutDown;
		}
		if released {
			info!("osc receiver shut down");
		}
	}

	/// Current lifecycle state.
	pub fn state(&self) -> ReceiverState {
		self.state
	}

	/// Whether a transport is attached.
	pub fn is_setup(&self) -> bool {
		matches!(self.state, ReceiverState::Ready | ReceiverState::Listening | ReceiverState::Stopped)
	}

	/// Whether the listener thread is running.
	pub fn is_listening(&self) -> bool {
		self.state == ReceiverState::Listening
	}

	/// Bound local port, when the transport has one.
	pub fn port(&self) -> Option<u16> {
		self.port
	}

	/// Whether at least one message is queued.
	pub fn has_waiting_messages(&self) -> bool {
		!self.shared.queue().is_empty()
	}

	/// Number of queued messages.
	pub fn num_waiting_messages(&self) -> usize {
		self.shared.queue().len()
	}

	/// Pop the oldest queued message.
	pub fn next_message(&self) -> Option<Message> {
		self.shared.queue().pop_front()
	}

	/// Pop every queued message in arrival order.
	pub fn drain(&self) -> Vec<Message> {
		self.shared.queue().drain(..).collect()
	}

	/// Messages evicted because the queue was full.
	pub fn dropped_messages(&self) -> u64 {
		self.shared.dropped.load(Ordering::Relaxed)
	}

	/// Snapshot of the receive counters.
	pub fn stats(&self) -> ReceiverStats {
		ReceiverStats {
			received: self.shared.received.load(Ordering::Relaxed),
			rejected: self.shared.rejected.load(Ordering::Relaxed),
			dropped: self.shared.dropped.load(Ordering::Relaxed),
		}
	}

	/// Options this receiver was created with.
	pub fn options(&self) -> &ReceiverOptions {
		&self.options
	}
}

impl Drop for Receiver {
	fn drop(&mut self) {
		self.stop();
	}
}

fn listen_loop(mut source: Box<dyn Listen>, shared: &Shared, decode: &DecodeOptions, buffer_size: usize) -> Box<dyn Listen> {
	// One spare byte tells a datagram that exactly fits from one the transport cut short.
	let mut buf = vec![0_u8; buffer_size + 1];
	while !shared.stop.load(Ordering::SeqCst) {
		match source.recv(&mut buf) {
			Ok(Recv::Datagram(0) | Recv::Idle | Recv::Interrupted) => {}
			Ok(Recv::Datagram(len)) if len > buffer_size => shared.reject_oversize(buffer_size),
			Ok(Recv::Datagram(len)) => shared.accept(&buf[..len], decode),
			Err(err) => {
				warn!("osc receive failed: {err}");
				thread::sleep(ERROR_BACKOFF);
			}
		}
	}
	source
}
