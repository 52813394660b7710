use super::builders::with_id;
use hickory_proto::op::Message;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

type Handler = dyn Fn(usize, &[u8]) -> Option<Vec<u8>> + Send + Sync;

/// Loopback UDP server answering with a caller-supplied handler.
///
/// The handler gets the zero-based index of the datagram and its raw bytes;
/// returning `None` drops the query without a reply.
pub struct MockDnsServer {
    addr: SocketAddr,
    received: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start<F>(handler: F) -> Result<Self, std::io::Error>
    where
        F: Fn(usize, &[u8]) -> Option<Vec<u8>> + Send + Sync + 'static,
    {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = socket.local_addr()?;
        let received = Arc::new(AtomicUsize::new(0));
        let handler: Arc<Handler> = Arc::new(handler);

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
        let counter = Arc::clone(&received);

        tokio::spawn(async move {
            let mut buf = vec![0u8; 4096];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            let index = counter.fetch_add(1, Ordering::SeqCst);
                            if let Some(response) = handler(index, &buf[..len]) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            received,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    /// Answers every query with `reply(index, query)`, copying the query's ID
    /// and question into the reply.
    pub async fn replying<F>(reply: F) -> Result<Self, std::io::Error>
    where
        F: Fn(usize, &Message) -> Option<Message> + Send + Sync + 'static,
    {
        Self::start(move |index, bytes| {
            let query = Message::from_vec(bytes).ok()?;
            let mut response = with_id(reply(index, &query)?, query.id());
            if response.queries().is_empty() {
                response.add_queries(query.queries().iter().cloned());
            }
            response.to_vec().ok()
        })
        .await
    }

    /// Never replies.
    pub async fn silent() -> Result<Self, std::io::Error> {
        Self::start(|_, _| None).await
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    pub fn received(&self) -> usize {
        self.received.load(Ordering::SeqCst)
    }

    /// Polls until at least `count` datagrams arrived or `timeout` elapses.
    pub async fn wait_for(&self, count: usize, timeout: Duration) -> bool {
        let deadline = tokio::time::Instant::now() + timeout;
        while tokio::time::Instant::now() < deadline {
            if self.received() >= count {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.received() >= count
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
