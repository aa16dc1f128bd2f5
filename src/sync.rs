//! Subscription to the proxy's sync notifications (`/ws/n8n`).
//!
//! A background thread owns the WebSocket, turns frames into [`SyncEvent`]s
//! and forwards them over an mpsc channel. It reconnects with [`Backoff`]
//! until the subscription is dropped.

use std::net::{Shutdown, TcpStream};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use anyhow::{Context, Result, anyhow};
use tungstenite::client::IntoClientRequest;
use tungstenite::http::HeaderValue;
use tungstenite::{Message, WebSocket};
use url::Url;

mod backoff;
pub use self::backoff::*;

const SYNC_MESSAGE_TYPE: &str = "n8n_sync";
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Socket read timeout; bounds how long a stop request waits.
const POLL_INTERVAL: Duration = Duration::from_millis(200);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyncEvent {
    Connected,
    /// The proxy saw upstream changes; views should re-fetch.
    Sync,
    Disconnected { reason: String },
}

/// `Some(Sync)` for `{"type":"n8n_sync"}`; any other or malformed frame is ignored.
pub fn parse_message(text: &str) -> Option<SyncEvent> {
    let value: serde_json::Value = serde_json::from_str(text).ok()?;
    match value.get("type").and_then(|t| t.as_str()) {
        Some(SYNC_MESSAGE_TYPE) => Some(SyncEvent::Sync),
        _ => None,
    }
}

#[derive(Debug)]
pub struct SyncSubscription {
    events: Receiver<SyncEvent>,
    stop: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl SyncSubscription {
    pub fn subscribe(url: &str, session: Option<&str>) -> Result<Self> {
        Self::with_backoff(url, session, Backoff::default())
    }

    pub fn with_backoff(url: &str, session: Option<&str>, backoff: Backoff) -> Result<Self> {
        let target = Url::parse(url).with_context(|| format!("parse sync url {}", url))?;
        if !matches!(target.scheme(), "ws" | "wss") {
            return Err(anyhow!("sync url must be ws:// or wss:// (got {})", url));
        }
        let (tx, events) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(false));
        let worker = Worker {
            url: target,
            cookie: session.map(|s| format!("token={}", s)),
            stop: Arc::clone(&stop),
            tx,
            backoff,
        };
        let handle = thread::Builder::new()
            .name("flowgate-sync".to_string())
            .spawn(move || worker.run())
            .context("spawn sync thread")?;
        Ok(Self {
            events,
            stop,
            worker: Some(handle),
        })
    }

    pub fn try_next(&self) -> Option<SyncEvent> {
        match self.events.try_recv() {
            Ok(ev) => Some(ev),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    pub fn next_timeout(&self, timeout: Duration) -> Option<SyncEvent> {
        match self.events.recv_timeout(timeout) {
            Ok(ev) => Some(ev),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Drains pending events; true if any of them asked for a refresh.
    pub fn drain_sync(&self) -> (bool, Vec<SyncEvent>) {
        let events: Vec<SyncEvent> = self.events.try_iter().collect();
        (events.contains(&SyncEvent::Sync), events)
    }
}

impl Drop for SyncSubscription {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(handle) = self.worker.take() {
            let _ = handle.join();
        }
    }
}

struct Worker {
    url: Url,
    cookie: Option<String>,
    stop: Arc<AtomicBool>,
    tx: Sender<SyncEvent>,
    backoff: Backoff,
}

impl Worker {
    fn stopped(&self) -> bool {
        self.stop.load(Ordering::Acquire)
    }

    fn emit(&self, ev: SyncEvent) -> bool {
        self.tx.send(ev).is_ok()
    }

    fn run(mut self) {
        while !self.stopped() {
            let reason = match self.connect() {
                Ok((mut socket, ctl)) => {
                    self.backoff.reset();
                    tracing::info!(url = %self.url, "sync connected");
                    if !self.emit(SyncEvent::Connected) {
                        return;
                    }
                    let reason = self.pump(&mut socket);
                    let _ = socket.close(None);
                    let _ = ctl.shutdown(Shutdown::Both);
                    match reason {
                        Some(r) => r,
                        None => return,
                    }
                }
                Err(err) => format!("{:#}", err),
            };
            if self.stopped() {
                return;
            }
            tracing::warn!(url = %self.url, reason = %reason, "sync disconnected");
            if !self.emit(SyncEvent::Disconnected { reason }) {
                return;
            }
            let delay = self.backoff.next_delay();
            tracing::debug!(?delay, "sync reconnect scheduled");
            if !self.sleep(delay) {
                return;
            }
        }
    }

    /// Sleeps in poll-sized slices; false if stopped meanwhile.
    fn sleep(&self, total: Duration) -> bool {
        let deadline = Instant::now() + total;
        while !self.stopped() {
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            thread::sleep((deadline - now).min(POLL_INTERVAL));
        }
        false
    }

    fn connect(&self) -> Result<(WebSocket<tungstenite::stream::MaybeTlsStream<TcpStream>>, TcpStream)> {
        let host = self
            .url
            .host_str()
            .ok_or_else(|| anyhow!("sync url has no host"))?;
        let port = self
            .url
            .port_or_known_default()
            .ok_or_else(|| anyhow!("sync url has no port"))?;
        let addr = std::net::ToSocketAddrs::to_socket_addrs(&(host, port))
            .with_context(|| format!("resolve {}:{}", host, port))?
            .next()
            .ok_or_else(|| anyhow!("no address for {}:{}", host, port))?;
        let stream = TcpStream::connect_timeout(&addr, CONNECT_TIMEOUT)
            .with_context(|| format!("connect {}", addr))?;
        // Shares the socket so the read timeout can change after the handshake.
        let ctl = stream.try_clone().context("clone sync socket")?;
        stream.set_read_timeout(Some(CONNECT_TIMEOUT))?;

        let mut request = self
            .url
            .as_str()
            .into_client_request()
            .context("build sync request")?;
        if let Some(cookie) = &self.cookie {
            let value = HeaderValue::from_str(cookie).context("session cookie header")?;
            request.headers_mut().insert("Cookie", value);
        }
        let (socket, _resp) = tungstenite::client_tls(request, stream)
            .map_err(|e| anyhow!("sync handshake: {}", e))?;
        ctl.set_read_timeout(Some(POLL_INTERVAL))?;
        Ok((socket, ctl))
    }

    /// Reads until the connection drops (`Some(reason)`) or the consumer goes away (`None`).
    fn pump(&self, socket: &mut WebSocket<tungstenite::stream::MaybeTlsStream<TcpStream>>) -> Option<String> {
        loop {
            if self.stopped() {
                return None;
            }
            match socket.read() {
                Ok(Message::Text(text)) => {
                    if let Some(ev) = parse_message(&text) {
                        tracing::debug!("sync notification");
                        if !self.emit(ev) {
                            return None;
                        }
                    }
                }
                Ok(Message::Close(frame)) => {
                    return Some(match frame {
                        Some(f) if !f.reason.is_empty() => format!("closed by server: {}", f.reason),
                        _ => "closed by server".to_string(),
                    });
                }
                Ok(_) => {}
                Err(tungstenite::Error::Io(e))
                    if matches!(
                        e.kind(),
                        std::io::ErrorKind::WouldBlock | std::io::ErrorKind::TimedOut
                    ) => {}
                Err(tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed) => {
                    return Some("connection closed".to_string());
                }
                Err(e) => return Some(e.to_string()),
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/sync_tests.rs"]
mod tests;
