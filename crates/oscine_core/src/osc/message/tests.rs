use crate::osc::{Arg, ArgType, Message, OscError};

fn note() -> Message {
	let mut msg = Message::new("/synth/note");
	msg.add_int32(60).add_float(0.8).add_string("piano");
	msg
}

#[test]
fn builders_append_in_order() {
	let msg = note();
	assert_eq!(msg.address(), "/synth/note");
	assert_eq!(msg.num_args(), 3);
	assert_eq!(msg.type_tags(), "ifs");
	assert_eq!(msg.arg_type(1).expect("index valid"), ArgType::Float);
	assert_eq!(msg.arg_type_name(2).expect("index valid"), "string");
}

#[test]
fn every_builder_maps_to_its_kind() {
	let mut msg = Message::new("/all");
	msg.add_int32(1)
		.add_int64(2)
		.add_float(3.0)
		.add_double(4.0)
		.add_string("five")
		.add_blob(vec![6])
		.add_bool(true)
		.add_bool(false)
		.add_nil()
		.add_trigger()
		.add_time_tag(7)
		.add_char(b'8')
		.add_rgba_color(9)
		.add_midi_message(10);
	let kinds: Vec<ArgType> = msg.args().iter().map(Arg::arg_type).collect();
	assert_eq!(kinds, ArgType::ALL.to_vec());
	assert_eq!(msg.type_tags(), "ihfdsbTFNItcrm");
}

#[test]
fn numeric_getters_coerce_across_kinds() {
	let msg = Message::new("/n").with_arg(3.9_f32).with_arg(-3.9_f32).with_arg(42_i64).with_arg(7_i32);
	assert_eq!(msg.arg_as_int32(0).expect("float coerces"), 3);
	assert_eq!(msg.arg_as_int32(1).expect("float coerces"), -3);
	assert_eq!(msg.arg_as_float(2).expect("int64 coerces"), 42.0);
	assert_eq!(msg.arg_as_double(3).expect("int32 coerces"), 7.0);
	assert_eq!(msg.arg_as_int64(0).expect("float coerces"), 3);
}

#[test]
fn getters_reject_out_of_range_indexes() {
	let msg = note();
	let err = msg.arg_as_int32(3).expect_err("index 3 is past the end");
	assert!(matches!(err, OscError::IndexOutOfRange { index: 3, len: 3, .. }));
	assert!(matches!(msg.arg_as_blob(99), Err(OscError::IndexOutOfRange { .. })));
	assert!(matches!(msg.arg_type(3), Err(OscError::IndexOutOfRange { .. })));
	assert!(matches!(Message::new("/empty").arg_as_string(0), Err(OscError::IndexOutOfRange { len: 0, .. })));
}

#[test]
fn exact_getters_reject_other_kinds() {
	let msg = note();
	let err = msg.arg_as_blob(0).expect_err("int32 is not a blob");
	assert!(matches!(
		err,
		OscError::TypeMismatch {
			index: 0,
			expected: "blob",
			actual: ArgType::Int32
		}
	));
	assert!(matches!(msg.arg_as_char(2), Err(OscError::TypeMismatch { .. })));
	assert!(matches!(msg.arg_as_rgba_color(1), Err(OscError::TypeMismatch { .. })));
	assert!(matches!(msg.arg_as_midi_message(1), Err(OscError::TypeMismatch { .. })));
	assert!(matches!(msg.arg_as_time_tag(0), Err(OscError::TypeMismatch { .. })));
	assert!(matches!(msg.arg_as_int32(2), Err(OscError::TypeMismatch { .. })));
}

#[test]
fn string_getter_renders_scalars() {
	let mut msg = Message::new("/s");
	msg.add_int32(60).add_char(b'q').add_bool(true).add_nil().add_trigger().add_blob(vec![0]);
	assert_eq!(msg.arg_as_string(0).expect("int renders"), "60");
	assert_eq!(msg.arg_as_string(1).expect("char renders"), "q");
	assert_eq!(msg.arg_as_string(2).expect("bool renders"), "true");
	assert_eq!(msg.arg_as_string(3).expect("nil renders"), "nil");
	assert_eq!(msg.arg_as_string(4).expect("trigger renders"), "trigger");
	assert!(matches!(msg.arg_as_string(5), Err(OscError::TypeMismatch { .. })));
	assert!(matches!(msg.arg_as_str(0), Err(OscError::TypeMismatch { .. })));
}

#[test]
fn bool_getter_accepts_numeric_truthiness() {
	let mut msg = Message::new("/b");
	msg.add_bool(false).add_int32(2).add_float(0.0).add_string("true");
	assert!(!msg.arg_as_bool(0).expect("F reads"));
	assert!(msg.arg_as_bool(1).expect("int reads"));
	assert!(!msg.arg_as_bool(2).expect("float reads"));
	assert!(matches!(msg.arg_as_bool(3), Err(OscError::TypeMismatch { .. })));
}

#[test]
fn midi_parts_pack_into_one_word() {
	let mut msg = Message::new("/midi");
	msg.add_midi_parts(0, 0x90, 64, 127);
	assert_eq!(msg.arg_as_midi_message(0).expect("midi reads"), 0x0090_407F);
}

#[test]
fn clear_resets_address_and_args() {
	let mut msg = note();
	msg.clear();
	assert_eq!(msg.address(), "");
	assert_eq!(msg.num_args(), 0);
	assert_eq!(msg, Message::default());
}
