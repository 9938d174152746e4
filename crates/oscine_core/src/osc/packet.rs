use crate::osc::{Bundle, Message};

/// One top-level OSC datagram payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Packet {
	/// Single message.
	Message(Message),
	/// Bundle tree.
	Bundle(Bundle),
}

impl Packet {
	/// Flatten into messages, expanding bundles depth-first in item order.
	pub fn into_messages(self) -> Vec<Message> {
		match self {
			Self::Message(message) => vec![message],
			Self::Bundle(bundle) => bundle.into_messages(),
		}
	}

	/// Number of messages the packet flattens to.
	pub fn message_total(&self) -> usize {
		match self {
			Self::Message(_) => 1,
			Self::Bundle(bundle) => bundle.message_total(),
		}
	}
}

impl From<Message> for Packet {
	fn from(message: Message) -> Self {
		Self::Message(message)
	}
}

impl From<Bundle> for Packet {
	fn from(bundle: Bundle) -> Self {
		Self::Bundle(bundle)
	}
}
