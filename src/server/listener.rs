// Listener construction module
// Builds the bound TCP socket the accept loop owns for its lifetime.

use socket2::{Domain, Protocol, Socket, Type};
use tokio::net::TcpListener;

/// Create the bound, listening socket for the server.
///
/// `SO_REUSEADDR` is enabled so a fresh instance can rebind right after a
/// previous one shut down, while its socket still sits in TIME_WAIT.
/// `SO_REUSEPORT` stays off: a second live instance on the same port must
/// fail to bind instead of silently sharing it.
///
/// # Arguments
///
/// * `addr` - The socket address to bind to
///
/// # Returns
///
/// * `Ok(TcpListener)` - Successfully created and bound listener
/// * `Err(std::io::Error)` - Port in use, permission denied, or socket setup failed
pub fn bind_listener(addr: std::net::SocketAddr) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;

    socket.set_reuse_address(true)?;

    // Non-blocking mode for async compatibility
    socket.set_nonblocking(true)?;

    socket.bind(&addr.into())?;
    socket.listen(128)?;

    // Convert socket2::Socket to std::net::TcpListener, then to tokio::net::TcpListener
    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}
