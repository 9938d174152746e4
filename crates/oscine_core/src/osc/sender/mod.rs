use log::{info, trace};

use crate::osc::encode::{encode_bundle_into, encode_message_into, encode_wrapped_message_into};
use crate::osc::transport::{Transmit, UdpTransmit};
use crate::osc::{Bundle, Component, Message, OscError, Packet, Result};

/// Stack buffer size for single messages, wrapped or not.
pub const MESSAGE_BUFFER_SIZE: usize = 4096;
/// Stack buffer size for bundles.
pub const BUNDLE_BUFFER_SIZE: usize = 16384;

/// Encodes messages and bundles and writes them to one destination.
///
/// Send methods take `&self` and add no locking of their own; serialization of concurrent
/// sends is up to the transport.
#[derive(Default)]
pub struct Sender {
	transport: Option<Box<dyn Transmit>>,
	hostname: String,
	port: u16,
}

impl Sender {
	/// Create an unconfigured sender.
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a sender over an injected transport.
	pub fn with_transport(transport: Box<dyn Transmit>) -> Self {
		Self {
			transport: Some(transport),
			hostname: String::new(),
			port: 0,
		}
	}

	/// Resolve `hostname:port` and open a UDP socket to it, replacing any previous transport.
	pub fn setup(&mut self, hostname: &str, port: u16) -> Result<()> {
		self.shutdown();
		let transport = UdpTransmit::connect(hostname, port)?;
		info!("osc sender ready for {hostname}:{port} ({})", transport.peer());
		self.transport = Some(Box::new(transport));
		self.hostname = hostname.to_owned();
		self.port = port;
		Ok(())
	}

	/// Whether a transport is attached.
	pub fn is_setup(&self) -> bool {
		self.transport.is_some()
	}

	/// Destination host given to [`Self::setup`], empty for injected transports.
	pub fn hostname(&self) -> &str {
		&self.hostname
	}

	/// Destination port given to [`Self::setup`], `0` for injected transports.
	pub fn port(&self) -> u16 {
		self.port
	}

	/// Send a message, optionally wrapped in an immediate one-item bundle.
	/// Returns the datagram size.
	pub fn send_message(&self, message: &Message, wrap_in_bundle: bool) -> Result<usize> {
		let transport = self.transport()?;
		let mut buf = [0_u8; MESSAGE_BUFFER_SIZE];
		let len = if wrap_in_bundle {
			encode_wrapped_message_into(message, &mut buf)?
		} else {
			encode_message_into(message, &mut buf)?
		};
		transmit(transport, &buf[..len])?;
		trace!("sent {} ({len} bytes, wrapped={wrap_in_bundle})", message.address());
		Ok(len)
	}

	/// Send a bundle tree. Returns the datagram size.
	pub fn send_bundle(&self, bundle: &Bundle) -> Result<usize> {
		let transport = self.transport()?;
		let mut buf = [0_u8; BUNDLE_BUFFER_SIZE];
		let len = encode_bundle_into(bundle, &mut buf)?;
		transmit(transport, &buf[..len])?;
		trace!("sent bundle of {} item(s) ({len} bytes)", bundle.total_item_count());
		Ok(len)
	}

	/// Send either packet kind; bare messages are not wrapped.
	pub fn send_packet(&self, packet: &Packet) -> Result<usize> {
		match packet {
			Packet::Message(message) => self.send_message(message, false),
			Packet::Bundle(bundle) => self.send_bundle(bundle),
		}
	}

	/// Release the transport. Safe to call repeatedly.
	pub fn shutdown(&mut self) {
		if self.transport.take().is_some() {
			info!("osc sender shut down");
		}
		self.hostname.clear();
		self.port = 0;
	}

	fn transport(&self) -> Result<&dyn Transmit> {
		self.transport.as_deref().ok_or(OscError::NotSetup { component: Component::Sender })
	}
}

fn transmit(transport: &dyn Transmit, bytes: &[u8]) -> Result<()> {
	transport.send(bytes).map_err(OscError::Transport)
}
