use rootwalk_application::use_cases::HandleDnsQueryUseCase;
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tracing::{debug, error, info};

/// Inbound read size; clients are not expected to send EDNS(0).
const MAX_QUERY_SIZE: usize = 512;

/// Runs the UDP listener until Ctrl-C.
pub async fn start_dns_server(
    socket_addr: SocketAddr,
    handler: Arc<HandleDnsQueryUseCase>,
) -> anyhow::Result<()> {
    let socket = Arc::new(create_udp_socket(socket_addr)?);

    info!(
        bind_address = %socket_addr,
        root_servers = handler.root_hints().len(),
        "DNS server ready"
    );

    tokio::select! {
        _ = run_udp_listener(socket, handler) => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    Ok(())
}

async fn run_udp_listener(socket: Arc<UdpSocket>, handler: Arc<HandleDnsQueryUseCase>) {
    let mut recv_buf = [0u8; MAX_QUERY_SIZE];

    loop {
        let (n, from) = match socket.recv_from(&mut recv_buf).await {
            Ok(received) => received,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) if e.kind() == io::ErrorKind::ConnectionReset => {
                // ICMP port unreachable from an earlier reply, Windows only
                debug!(error = %e, "Ignoring reset on listening socket");
                continue;
            }
            Err(e) => {
                error!(error = %e, "UDP recv error");
                continue;
            }
        };

        let packet: Arc<[u8]> = Arc::from(&recv_buf[..n]);
        let handler = Arc::clone(&handler);
        let socket = Arc::clone(&socket);

        tokio::spawn(async move {
            match handler.execute(&packet, from).await {
                Ok(response) => {
                    if let Err(e) = socket.send_to(&response, from).await {
                        error!(client = %from, error = %e, "Failed to send DNS response");
                    }
                }
                Err(e) => {
                    debug!(client = %from, error = %e, "Query dropped without reply");
                }
            }
        });
    }
}

fn create_udp_socket(socket_addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.set_recv_buffer_size(512 * 1024)?;
    socket.set_send_buffer_size(512 * 1024)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;
    let std_socket: std::net::UdpSocket = socket.into();
    Ok(UdpSocket::from_std(std_socket)?)
}
