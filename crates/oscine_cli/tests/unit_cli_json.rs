#![allow(missing_docs)]

use std::process::{Command, Output, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use oscine_testkit::free_udp_port;
use serde_json::Value;

fn run(args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_oscine")).args(args).output().expect("command executes")
}

fn run_stdout(args: &[&str]) -> String {
	let output = run(args);
	assert!(
		output.status.success(),
		"oscine failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	String::from_utf8(output.stdout).expect("stdout is utf-8")
}

fn run_json(args: &[&str]) -> Value {
	serde_json::from_str(&run_stdout(args)).expect("stdout should be valid json")
}

#[test]
fn encode_prints_wire_hex() {
	let hex = run_stdout(&["encode", "/a", "--arg", "i:1"]);
	assert_eq!(hex.trim(), "2f6100002c69000000000001");
}

#[test]
fn encoded_note_decodes_as_json() {
	let hex = run_stdout(&["encode", "/synth/note", "--arg", "i:60", "--arg", "f:0.8", "--arg", "s:piano"]);
	let json = run_json(&["decode", hex.trim(), "--json"]);

	assert_eq!(json["kind"], "message");
	assert_eq!(json["address"], "/synth/note");
	assert_eq!(json["type_tags"], "ifs");
	assert_eq!(json["args"][0]["type"], "int32");
	assert_eq!(json["args"][0]["value"], 60);
	assert_eq!(json["args"][2]["value"], "piano");
}

#[test]
fn bundle_flag_wraps_with_time_tag() {
	let hex = run_stdout(&["encode", "/go", "--time-tag", "42", "--arg", "T"]);
	let json = run_json(&["decode", hex.trim(), "--json"]);

	assert_eq!(json["kind"], "bundle");
	assert_eq!(json["time_tag"], 42);
	let items = json["items"].as_array().expect("items array");
	assert_eq!(items.len(), 1);
	assert_eq!(items[0]["address"], "/go");
	assert_eq!(items[0]["args"][0]["value"], true);
}

#[test]
fn malformed_input_exits_with_error() {
	let output = run(&["decode", "2f61"]);
	assert!(!output.status.success());
	assert!(String::from_utf8_lossy(&output.stderr).starts_with("error:"));

	let output = run(&["encode", "/a", "--arg", "q:1"]);
	assert!(!output.status.success());
}

#[test]
fn send_reaches_listen() {
	let port = free_udp_port().to_string();
	let mut listener = Command::new(env!("CARGO_BIN_EXE_oscine"))
		.args(["listen", "--port", &port, "--count", "1", "--timeout-ms", "10000", "--json"])
		.stdout(Stdio::piped())
		.stderr(Stdio::null())
		.spawn()
		.expect("listener spawns");

	// The listener may not be bound yet, so resend until it exits.
	let deadline = Instant::now() + Duration::from_secs(10);
	while listener.try_wait().expect("poll listener").is_none() && Instant::now() < deadline {
		run_stdout(&["send", "--port", &port, "/ping", "--arg", "s:hello"]);
		thread::sleep(Duration::from_millis(100));
	}

	let output = listener.wait_with_output().expect("listener exits");
	assert!(output.status.success());
	let line = String::from_utf8(output.stdout).expect("stdout is utf-8");
	let json: Value = serde_json::from_str(line.lines().next().expect("one message line")).expect("json line");
	assert_eq!(json["address"], "/ping");
	assert_eq!(json["args"][0]["value"], "hello");
}
