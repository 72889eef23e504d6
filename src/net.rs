use std::net::{SocketAddr, UdpSocket};
use std::time::Duration;

use log::debug;

use crate::dns_consts::MAX_UDP_PAYLOAD;
use crate::error::{DnsError, Result};

/// A UDP socket connected to a single resolver.
pub struct UdpTransport {
    socket: UdpSocket,
}

impl UdpTransport {
    /// Binds an ephemeral port of the resolver's address family and connects
    /// it. With no timeout, `recv` blocks until a datagram arrives.
    pub fn connect(resolver: SocketAddr, timeout: Option<Duration>) -> Result<Self> {
        let bind_addr = if resolver.is_ipv4() { "0.0.0.0:0" } else { "[::]:0" };

        let socket = UdpSocket::bind(bind_addr)?;
        socket.connect(resolver)?;
        socket.set_read_timeout(timeout)?;

        debug!("udp socket {} connected to {}", socket.local_addr()?, resolver);

        Ok(UdpTransport { socket })
    }

    pub fn send(&self, packet: &[u8]) -> Result<()> {
        let sent = self.socket.send(packet)?;
        if sent != packet.len() {
            return Err(DnsError::ShortWrite {
                sent,
                len: packet.len(),
            });
        }

        Ok(())
    }

    /// Reads one datagram. Anything past 512 bytes is discarded.
    pub fn recv(&self) -> Result<Vec<u8>> {
        let mut recv_buf = [0u8; MAX_UDP_PAYLOAD];
        let num_of_bytes = self.socket.recv(&mut recv_buf)?;

        Ok(recv_buf[..num_of_bytes].to_vec())
    }

    pub fn exchange(&self, packet: &[u8]) -> Result<Vec<u8>> {
        self.send(packet)?;
        self.recv()
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    pub fn peer_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.peer_addr()?)
    }
}
