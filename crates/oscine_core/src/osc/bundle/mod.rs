use crate::osc::{Message, OscError, Result, time_tag};

/// One child of a bundle.
#[derive(Debug, Clone, PartialEq)]
pub enum BundleItem {
	/// Plain message.
	Message(Message),
	/// Nested bundle.
	Bundle(Bundle),
}

/// Time-tagged, ordered tree of messages and nested bundles.
///
/// Children are owned by value, so a bundle can never contain itself.
#[derive(Debug, Clone, PartialEq)]
pub struct Bundle {
	time_tag: u64,
	items: Vec<BundleItem>,
}

impl Default for Bundle {
	fn default() -> Self {
		Self::new(time_tag::IMMEDIATE)
	}
}

impl Bundle {
	/// Create an empty bundle with `time_tag`.
	pub fn new(time_tag: u64) -> Self {
		Self { time_tag, items: Vec::new() }
	}

	/// Create an empty bundle tagged for immediate execution.
	pub fn immediate() -> Self {
		Self::default()
	}

	/// NTP time tag.
	pub fn time_tag(&self) -> u64 {
		self.time_tag
	}

	/// Replace the time tag.
	pub fn set_time_tag(&mut self, time_tag: u64) {
		self.time_tag = time_tag;
	}

	/// Append a message.
	pub fn add_message(&mut self, message: Message) -> &mut Self {
		self.items.push(BundleItem::Message(message));
		self
	}

	/// Append a nested bundle.
	pub fn add_bundle(&mut self, bundle: Bundle) -> &mut Self {
		self.items.push(BundleItem::Bundle(bundle));
		self
	}

	/// Builder-style message append.
	pub fn with_message(mut self, message: Message) -> Self {
		self.add_message(message);
		self
	}

	/// Builder-style bundle append.
	pub fn with_bundle(mut self, bundle: Bundle) -> Self {
		self.add_bundle(bundle);
		self
	}

	/// All children in insertion order.
	pub fn items(&self) -> &[BundleItem] {
		&self.items
	}

	/// Consume into children.
	pub fn into_items(self) -> Vec<BundleItem> {
		self.items
	}

	/// Direct child messages in insertion order.
	pub fn messages(&self) -> impl Iterator<Item = &Message> {
		self.items.iter().filter_map(|item| match item {
			BundleItem::Message(message) => Some(message),
			BundleItem::Bundle(_) => None,
		})
	}

	/// Direct child bundles in insertion order.
	pub fn bundles(&self) -> impl Iterator<Item = &Bundle> {
		self.items.iter().filter_map(|item| match item {
			BundleItem::Bundle(bundle) => Some(bundle),
			BundleItem::Message(_) => None,
		})
	}

	/// Number of direct child messages.
	pub fn message_count(&self) -> usize {
		self.messages().count()
	}

	/// Number of direct child bundles.
	pub fn bundle_count(&self) -> usize {
		self.bundles().count()
	}

	/// The `index`-th direct child message.
	pub fn message_at(&self, index: usize) -> Result<&Message> {
		self.messages().nth(index).ok_or_else(|| OscError::IndexOutOfRange {
			kind: "message",
			index,
			len: self.message_count(),
		})
	}

	/// The `index`-th direct child bundle.
	pub fn bundle_at(&self, index: usize) -> Result<&Bundle> {
		self.bundles().nth(index).ok_or_else(|| OscError::IndexOutOfRange {
			kind: "bundle",
			index,
			len: self.bundle_count(),
		})
	}

	/// True when the bundle has no children.
	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Messages plus nested bundles at this level.
	pub fn total_item_count(&self) -> usize {
		self.items.len()
	}

	/// Drop all children and reset the time tag to immediate.
	pub fn clear(&mut self) {
		self.items.clear();
		self.time_tag = time_tag::IMMEDIATE;
	}

	/// Depth-first copy of every message in the tree, in item order.
	pub fn flatten(&self) -> Vec<Message> {
		let mut out = Vec::new();
		collect_messages(self, &mut out);
		out
	}

	/// Depth-first move of every message in the tree, in item order.
	pub fn into_messages(self) -> Vec<Message> {
		let mut out = Vec::new();
		drain_messages(self, &mut out);
		out
	}

	/// Number of messages anywhere in the tree.
	pub fn message_total(&self) -> usize {
		self.items
			.iter()
			.map(|item| match item {
				BundleItem::Message(_) => 1,
				BundleItem::Bundle(child) => child.message_total(),
			})
			.sum()
	}

	/// Deepest bundle nesting level, counting this bundle as 1.
	pub fn depth(&self) -> u32 {
		1 + self.bundles().map(Bundle::depth).max().unwrap_or(0)
	}
}

fn collect_messages(bundle: &Bundle, out: &mut Vec<Message>) {
	for item in &bundle.items {
		match item {
			BundleItem::Message(message) => out.push(message.clone()),
			BundleItem::Bundle(child) => collect_messages(child, out),
		}
	}
}

fn drain_messages(bundle: Bundle, out: &mut Vec<Message>) {
	for item in bundle.items {
		match item {
			BundleItem::Message(message) => out.push(message),
			BundleItem::Bundle(child) => drain_messages(child, out),
		}
	}
}

impl From<Message> for BundleItem {
	fn from(message: Message) -> Self {
		Self::Message(message)
	}
}

impl From<Bundle> for BundleItem {
	fn from(bundle: Bundle) -> Self {
		Self::Bundle(bundle)
	}
}
