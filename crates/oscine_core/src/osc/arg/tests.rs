use crate::osc::{Arg, ArgType};

#[test]
fn tags_map_back_to_kinds() {
	for kind in ArgType::ALL {
		assert_eq!(ArgType::from_tag(kind.tag()), Some(kind));
	}
	assert_eq!(ArgType::from_tag(b'x'), None);
	assert_eq!(ArgType::from_tag(b','), None);
}

#[test]
fn float_to_int_truncates_toward_zero() {
	assert_eq!(Arg::Float(3.9).to_int32(), Some(3));
	assert_eq!(Arg::Float(-3.9).to_int32(), Some(-3));
	assert_eq!(Arg::Double(-7.99).to_int64(), Some(-7));
	assert_eq!(Arg::Double(f64::NAN).to_int32(), Some(0));
}

#[test]
fn int64_narrowing_wraps_like_a_cast() {
	assert_eq!(Arg::Int64(0x1_0000_0005).to_int32(), Some(5));
	assert_eq!(Arg::Int32(-2).to_int64(), Some(-2));
}

#[test]
fn non_numeric_kinds_refuse_numeric_coercion() {
	assert_eq!(Arg::String("12".into()).to_int32(), None);
	assert_eq!(Arg::True.to_float(), None);
	assert_eq!(Arg::TimeTag(1).to_double(), None);
}

#[test]
fn text_rendering_covers_scalars_but_not_blobs() {
	assert_eq!(Arg::Int32(60).to_text().as_deref(), Some("60"));
	assert_eq!(Arg::Float(0.5).to_text().as_deref(), Some("0.5"));
	assert_eq!(Arg::Char(b'x').to_text().as_deref(), Some("x"));
	assert_eq!(Arg::True.to_text().as_deref(), Some("true"));
	assert_eq!(Arg::False.to_text().as_deref(), Some("false"));
	assert_eq!(Arg::Nil.to_text().as_deref(), Some("nil"));
	assert_eq!(Arg::Trigger.to_text().as_deref(), Some("trigger"));
	assert_eq!(Arg::Blob(vec![1, 2]).to_text(), None);
	assert_eq!(Arg::RgbaColor(0).to_text(), None);
}

#[test]
fn bool_accepts_numerics() {
	assert_eq!(Arg::Int32(0).to_bool(), Some(false));
	assert_eq!(Arg::Double(0.1).to_bool(), Some(true));
	assert_eq!(Arg::False.to_bool(), Some(false));
	assert_eq!(Arg::Nil.to_bool(), None);
}

#[test]
fn midi_packs_big_endian() {
	assert_eq!(Arg::midi(1, 0x90, 60, 100), Arg::MidiMessage(0x0190_3C64));
}
