use crate::osc::{Arg, Bundle, Message, OscError, encode_bundle, encode_message, encode_message_into, encode_wrapped_message_into, message_len};

#[test]
fn encodes_note_message_byte_exact() {
	let mut msg = Message::new("/synth/note");
	msg.add_int32(60).add_float(0.8).add_string("piano");
	let bytes = encode_message(&msg).expect("message encodes");

	let mut expected = Vec::new();
	expected.extend_from_slice(b"/synth/note\0");
	expected.extend_from_slice(b",ifs\0\0\0\0");
	expected.extend_from_slice(&60_i32.to_be_bytes());
	expected.extend_from_slice(&0.8_f32.to_bits().to_be_bytes());
	expected.extend_from_slice(b"piano\0\0\0");
	assert_eq!(bytes, expected);
	assert_eq!(bytes.len(), message_len(&msg));
}

#[test]
fn empty_message_still_has_type_tag_string() {
	let bytes = encode_message(&Message::new("/a")).expect("message encodes");
	assert_eq!(bytes, b"/a\0\0,\0\0\0");
}

#[test]
fn strings_are_nul_terminated_and_aligned() {
	for len in 0..9 {
		let text = "x".repeat(len);
		let msg = Message::new("/s").with_arg(text.as_str());
		let bytes = encode_message(&msg).expect("message encodes");
		assert_eq!(bytes.len() % 4, 0);
		let payload = &bytes[8..];
		assert_eq!(&payload[..len], text.as_bytes());
		assert_eq!(payload[len], 0, "terminator precedes padding");
		assert!(payload[len..].iter().all(|byte| *byte == 0));
	}
}

#[test]
fn no_payload_kinds_only_add_tags() {
	let msg = Message::with_args("/flags", vec![Arg::True, Arg::False, Arg::Nil, Arg::Trigger]);
	let bytes = encode_message(&msg).expect("message encodes");
	assert_eq!(bytes, b"/flags\0\0,TFNI\0\0\0");
}

#[test]
fn fixed_width_kinds_are_big_endian() {
	let msg = Message::with_args(
		"/w",
		vec![
			Arg::Int64(-2),
			Arg::Double(1.5),
			Arg::TimeTag(0x0102_0304_0506_0708),
			Arg::Char(b'A'),
			Arg::RgbaColor(0xFF00_80FF),
			Arg::MidiMessage(0x0090_3C7F),
		],
	);
	let bytes = encode_message(&msg).expect("message encodes");
	assert_eq!(&bytes[..4], b"/w\0\0");
	assert_eq!(&bytes[4..12], b",hdtcrm\0");
	let payload = &bytes[12..];
	assert_eq!(&payload[0..8], &(-2_i64).to_be_bytes());
	assert_eq!(&payload[8..16], &1.5_f64.to_bits().to_be_bytes());
	assert_eq!(&payload[16..24], &[1, 2, 3, 4, 5, 6, 7, 8]);
	assert_eq!(&payload[24..28], &[0, 0, 0, b'A']);
	assert_eq!(&payload[28..32], &[0xFF, 0x00, 0x80, 0xFF]);
	assert_eq!(&payload[32..36], &[0x00, 0x90, 0x3C, 0x7F]);
	assert_eq!(payload.len(), 36);
}

#[test]
fn bundle_prefixes_each_element_with_its_length() {
	let bundle = Bundle::new(1)
		.with_message(Message::new("/a"))
		.with_bundle(Bundle::new(2).with_message(Message::new("/b")));
	let bytes = encode_bundle(&bundle).expect("bundle encodes");

	let mut expected = Vec::new();
	expected.extend_from_slice(b"#bundle\0");
	expected.extend_from_slice(&1_u64.to_be_bytes());
	expected.extend_from_slice(&8_u32.to_be_bytes());
	expected.extend_from_slice(b"/a\0\0,\0\0\0");
	expected.extend_from_slice(&28_u32.to_be_bytes());
	expected.extend_from_slice(b"#bundle\0");
	expected.extend_from_slice(&2_u64.to_be_bytes());
	expected.extend_from_slice(&8_u32.to_be_bytes());
	expected.extend_from_slice(b"/b\0\0,\0\0\0");
	assert_eq!(bytes, expected);
}

#[test]
fn wrapped_message_is_a_one_item_immediate_bundle() {
	let msg = Message::new("/x").with_arg(5_i32);
	let mut buf = [0_u8; 64];
	let len = encode_wrapped_message_into(&msg, &mut buf).expect("wrapped message fits");
	let direct = encode_bundle(&Bundle::immediate().with_message(msg)).expect("bundle encodes");
	assert_eq!(&buf[..len], direct.as_slice());
}

#[test]
fn small_buffer_reports_overflow_without_writing_partially() {
	let msg = Message::new("/synth/note").with_arg("piano");
	let mut buf = [0xEE_u8; 8];
	let err = encode_message_into(&msg, &mut buf).expect_err("buffer is too small");
	assert!(matches!(err, OscError::BufferOverflow { need: 24, capacity: 8 }));
	assert_eq!(buf, [0xEE; 8]);
}

#[test]
fn interior_nul_in_address_is_rejected() {
	let err = encode_message(&Message::new("/a\0b")).expect_err("nul cannot be encoded");
	assert!(matches!(err, OscError::EncodeInteriorNul { .. }));
}
