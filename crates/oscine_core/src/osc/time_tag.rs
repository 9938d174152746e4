//! NTP 32.32 fixed-point time tag helpers.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Reserved time tag meaning "execute immediately".
pub const IMMEDIATE: u64 = 1;

/// Seconds between the NTP epoch (1900-01-01) and the Unix epoch.
pub const NTP_UNIX_OFFSET_SECS: u64 = 2_208_988_800;

/// Convert a wall-clock instant to an NTP time tag. Instants before 1970 clamp to the Unix epoch.
pub fn from_system_time(time: SystemTime) -> u64 {
	let since_unix = time.duration_since(UNIX_EPOCH).unwrap_or(Duration::ZERO);
	let secs = since_unix.as_secs().wrapping_add(NTP_UNIX_OFFSET_SECS) & 0xFFFF_FFFF;
	let frac = (u64::from(since_unix.subsec_nanos()) << 32) / 1_000_000_000;
	(secs << 32) | frac
}

/// Convert an NTP time tag to wall-clock time, or `None` for tags before the Unix epoch.
pub fn to_system_time(time_tag: u64) -> Option<SystemTime> {
	let secs = (time_tag >> 32).checked_sub(NTP_UNIX_OFFSET_SECS)?;
	let nanos = ((time_tag & 0xFFFF_FFFF) * 1_000_000_000) >> 32;
	UNIX_EPOCH.checked_add(Duration::new(secs, nanos as u32))
}

/// Time tag for the current wall-clock instant.
pub fn now() -> u64 {
	from_system_time(SystemTime::now())
}

#[cfg(test)]
mod tests {
	use std::time::{Duration, UNIX_EPOCH};

	use super::{NTP_UNIX_OFFSET_SECS, from_system_time, to_system_time};

	#[test]
	fn unix_epoch_maps_to_ntp_offset() {
		assert_eq!(from_system_time(UNIX_EPOCH), NTP_UNIX_OFFSET_SECS << 32);
	}

	#[test]
	fn half_second_is_half_the_fraction() {
		let tag = from_system_time(UNIX_EPOCH + Duration::from_millis(1_500));
		assert_eq!(tag >> 32, NTP_UNIX_OFFSET_SECS + 1);
		assert_eq!(tag & 0xFFFF_FFFF, 0x8000_0000);
	}

	#[test]
	fn conversion_survives_within_a_nanosecond() {
		let time = UNIX_EPOCH + Duration::new(1_700_000_000, 123_456_789);
		let back = to_system_time(from_system_time(time)).expect("post-1970 tag converts");
		let drift = time.duration_since(back).unwrap_or_else(|err| err.duration());
		assert!(drift <= Duration::from_nanos(1), "drift {drift:?}");
	}

	#[test]
	fn immediate_is_before_unix_epoch() {
		assert_eq!(to_system_time(super::IMMEDIATE), None);
	}
}
