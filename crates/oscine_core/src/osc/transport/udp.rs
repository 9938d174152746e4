use std::io;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, ToSocketAddrs, UdpSocket};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use log::debug;

use crate::osc::transport::{Interrupt, Listen, Recv, Transmit};
use crate::osc::{OscError, Result};

/// Connected UDP socket writing to one destination.
#[derive(Debug)]
pub struct UdpTransmit {
	socket: UdpSocket,
	peer: SocketAddr,
}

impl UdpTransmit {
	/// Resolve `host:port`, bind an ephemeral local port of the same family, and connect.
	pub fn connect(host: &str, port: u16) -> Result<Self> {
		let target = format!("{host}:{port}");
		let peer = (host, port)
			.to_socket_addrs()
			.map_err(|source| OscError::Setup { target: target.clone(), source })?
			.next()
			.ok_or_else(|| OscError::Unresolved { target: target.clone() })?;

		let local: SocketAddr = match peer {
			SocketAddr::V4(_) => (Ipv4Addr::UNSPECIFIED, 0).into(),
			SocketAddr::V6(_) => (Ipv6Addr::UNSPECIFIED, 0).into(),
		};
		let socket = UdpSocket::bind(local)
			.and_then(|socket| socket.connect(peer).map(|()| socket))
			.map_err(|source| OscError::Setup { target, source })?;

		Ok(Self { socket, peer })
	}

	/// Resolved destination.
	pub fn peer(&self) -> SocketAddr {
		self.peer
	}
}

impl Transmit for UdpTransmit {
	fn send(&self, bytes: &[u8]) -> io::Result<()> {
		let sent = self.socket.send(bytes)?;
		if sent != bytes.len() {
			return Err(io::Error::new(io::ErrorKind::WriteZero, format!("sent {sent} of {} bytes", bytes.len())));
		}
		Ok(())
	}
}

/// Bound UDP socket with a loopback wake-up path.
///
/// [`Interrupt::interrupt`] sets a flag and sends a zero-length datagram to the socket's own
/// port; the read timeout bounds latency if that datagram is lost.
#[derive(Debug)]
pub struct UdpListen {
	socket: UdpSocket,
	waker: Arc<UdpWaker>,
}

#[derive(Debug)]
struct UdpWaker {
	target: SocketAddr,
	woken: AtomicBool,
}

impl UdpListen {
	/// Default read timeout used as the interrupt backstop.
	pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(250);

	/// Bind `addr` with `read_timeout` as the receive timeout.
	pub fn bind(addr: SocketAddr, read_timeout: Duration) -> Result<Self> {
		let socket = UdpSocket::bind(addr).map_err(|source| OscError::Setup {
			target: addr.to_string(),
			source,
		})?;
		Self::from_socket(socket, read_timeout).map_err(|source| OscError::Setup {
			target: addr.to_string(),
			source,
		})
	}

	/// Wrap an already bound socket.
	pub fn from_socket(socket: UdpSocket, read_timeout: Duration) -> io::Result<Self> {
		socket.set_read_timeout(Some(read_timeout.max(Duration::from_millis(1))))?;
		let local = socket.local_addr()?;
		let wake_ip = match local.ip() {
			IpAddr::V4(ip) if ip.is_unspecified() => IpAddr::V4(Ipv4Addr::LOCALHOST),
			IpAddr::V6(ip) if ip.is_unspecified() => IpAddr::V6(Ipv6Addr::LOCALHOST),
			ip => ip,
		};
		let waker = Arc::new(UdpWaker {
			target: SocketAddr::new(wake_ip, local.port()),
			woken: AtomicBool::new(false),
		});
		Ok(Self { socket, waker })
	}

	/// Bound local address.
	pub fn local_addr(&self) -> io::Result<SocketAddr> {
		self.socket.local_addr()
	}
}

impl Listen for UdpListen {
	fn recv(&mut self, buf: &mut [u8]) -> io::Result<Recv> {
		match self.socket.recv_from(buf) {
			Ok((0, _)) if self.waker.woken.swap(false, Ordering::SeqCst) => Ok(Recv::Interrupted),
			Ok((len, _)) => Ok(Recv::Datagram(len)),
			Err(err) if matches!(err.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => {
				if self.waker.woken.swap(false, Ordering::SeqCst) {
					Ok(Recv::Interrupted)
				} else {
					Ok(Recv::Idle)
				}
			}
			Err(err) => Err(err),
		}
	}

	fn interrupter(&self) -> Arc<dyn Interrupt> {
		self.waker.clone()
	}

	fn local_port(&self) -> Option<u16> {
		Some(self.waker.target.port())
	}
}

impl Interrupt for UdpWaker {
	fn interrupt(&self) {
		self.woken.store(true, Ordering::SeqCst);
		let local: SocketAddr = match self.target {
			SocketAddr::V4(_) => (Ipv4Addr::LOCALHOST, 0).into(),
			SocketAddr::V6(_) => (Ipv6Addr::LOCALHOST, 0).into(),
		};
		let sent = UdpSocket::bind(local).and_then(|socket| socket.send_to(&[], self.target));
		if let Err(err) = sent {
			debug!("wake datagram to {} failed, relying on read timeout: {err}", self.target);
		}
	}
}
