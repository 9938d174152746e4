use std::net::{Ipv4Addr, SocketAddr};
use std::thread;
use std::time::{Duration, Instant};

use crate::osc::transport::{Listen, Recv, Transmit, UdpListen, UdpTransmit, memory_link};

fn loopback_listener(timeout: Duration) -> UdpListen {
	UdpListen::bind(SocketAddr::from((Ipv4Addr::LOCALHOST, 0)), timeout).expect("loopback bind succeeds")
}

#[test]
fn udp_round_trip_on_loopback() {
	let mut listen = loopback_listener(Duration::from_secs(2));
	let port = listen.local_port().expect("udp has a port");
	let transmit = UdpTransmit::connect("127.0.0.1", port).expect("connect succeeds");
	transmit.send(b"/ping\0\0\0,\0\0\0").expect("send succeeds");

	let mut buf = [0_u8; 64];
	assert_eq!(listen.recv(&mut buf).expect("recv succeeds"), Recv::Datagram(12));
	assert_eq!(&buf[..12], b"/ping\0\0\0,\0\0\0");
}

#[test]
fn udp_interrupt_wakes_blocked_recv() {
	let mut listen = loopback_listener(Duration::from_secs(30));
	let waker = listen.interrupter();
	let started = Instant::now();
	let handle = thread::spawn(move || {
		let mut buf = [0_u8; 16];
		listen.recv(&mut buf).expect("recv returns")
	});
	thread::sleep(Duration::from_millis(50));
	waker.interrupt();
	assert_eq!(handle.join().expect("thread joins"), Recv::Interrupted);
	assert!(started.elapsed() < Duration::from_secs(5));
}

#[test]
fn udp_timeout_reports_idle() {
	let mut listen = loopback_listener(Duration::from_millis(20));
	let mut buf = [0_u8; 16];
	assert_eq!(listen.recv(&mut buf).expect("recv returns"), Recv::Idle);
}

#[test]
fn memory_link_delivers_and_truncates() {
	let (tx, mut rx) = memory_link();
	tx.send(&[1, 2, 3, 4, 5, 6]).expect("send succeeds");
	let mut buf = [0_u8; 4];
	assert_eq!(rx.recv(&mut buf).expect("recv succeeds"), Recv::Datagram(4));
	assert_eq!(buf, [1, 2, 3, 4]);
}

#[test]
fn memory_interrupt_is_delivered_in_order() {
	let (tx, mut rx) = memory_link();
	tx.send(&[9]).expect("send succeeds");
	rx.interrupter().interrupt();
	let mut buf = [0_u8; 4];
	assert_eq!(rx.recv(&mut buf).expect("recv succeeds"), Recv::Datagram(1));
	assert_eq!(rx.recv(&mut buf).expect("recv succeeds"), Recv::Interrupted);
}
