use std::{convert::Infallible, future::Future, time::Duration};

use futures::{StreamExt, future, stream::BoxStream};
use tokio_tungstenite::{connect_async, tungstenite::Message};
use tracing::{debug, info, warn};

use crate::{
    coordinator::Coordinator,
    envelope::StreamEvent,
    error::{FeedError, FeedResult},
    route_table::RouteTable,
    sink::NotificationSink,
};

pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// Opens connections to the upstream event source.
pub trait Connector {
    type Frames: futures::Stream<Item = FeedResult<String>> + Unpin + Send;

    fn connect(&mut self) -> impl Future<Output = FeedResult<Self::Frames>> + Send;
}

/// Timed suspension between connection attempts.
pub trait Delay {
    fn wait(&mut self, duration: Duration) -> impl Future<Output = ()> + Send;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelay;

impl Delay for TokioDelay {
    async fn wait(&mut self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[derive(Debug, Clone)]
pub struct WebSocketConnector {
    url: String,
}

impl WebSocketConnector {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl Connector for WebSocketConnector {
    type Frames = BoxStream<'static, FeedResult<String>>;

    async fn connect(&mut self) -> FeedResult<Self::Frames> {
        let (socket, _response) = connect_async(self.url.as_str()).await?;
        let frames = socket.filter_map(|message| {
            future::ready(match message {
                Ok(Message::Text(text)) => Some(Ok(text.as_str().to_owned())),
                Ok(Message::Close(frame)) => {
                    debug!(?frame, "Server closed the connection");
                    None
                }
                Ok(_) => None,
                Err(e) => Some(Err(FeedError::from(e))),
            })
        });
        Ok(frames.boxed())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

/// Keeps a connection to the event stream alive forever.
///
/// Any transport fault or closure drops back to `Disconnected`, waits the
/// reconnect delay and tries again, without a retry limit. Messages are
/// handled one at a time in arrival order; a message that fails to decode
/// is logged and skipped without touching the connection.
#[derive(Debug)]
pub struct StreamClient<C, D = TokioDelay> {
    connector: C,
    delay: D,
    reconnect_delay: Duration,
    state: ConnectionState,
}

impl<C: Connector> StreamClient<C> {
    pub fn new(connector: C) -> Self {
        Self::with_delay(connector, TokioDelay, DEFAULT_RECONNECT_DELAY)
    }
}

impl<C: Connector, D: Delay> StreamClient<C, D> {
    pub fn with_delay(connector: C, delay: D, reconnect_delay: Duration) -> Self {
        Self {
            connector,
            delay,
            reconnect_delay,
            state: ConnectionState::Disconnected,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    fn transition(&mut self, state: ConnectionState) {
        debug!(from = ?self.state, to = ?state, "Stream connection state");
        self.state = state;
    }

    /// Runs until `shutdown` completes.
    pub async fn run_until<T, S, F>(
        &mut self,
        coordinator: &mut Coordinator<T>,
        sink: &mut S,
        shutdown: F,
    ) where
        T: RouteTable,
        S: NotificationSink,
        F: Future<Output = ()>,
    {
        let run = std::pin::pin!(self.run(coordinator, sink));
        let shutdown = std::pin::pin!(shutdown);
        // `run` never returns, so only the shutdown side can finish the race.
        let _ = future::select(run, shutdown).await;
        info!("Stream client shut down");
    }

    pub async fn run<T, S>(&mut self, coordinator: &mut Coordinator<T>, sink: &mut S) -> Infallible
    where
        T: RouteTable,
        S: NotificationSink,
    {
        loop {
            self.transition(ConnectionState::Connecting);
            match self.connector.connect().await {
                Ok(frames) => {
                    info!("Connected to event stream");
                    self.transition(ConnectionState::Connected);
                    match Self::stream_messages(frames, coordinator, sink).await {
                        Ok(()) => warn!("Event stream closed"),
                        Err(e) => warn!("Event stream error: {e}"),
                    }
                }
                Err(e) => warn!("Failed to connect to event stream: {e}"),
            }
            self.transition(ConnectionState::Disconnected);
            info!(delay = ?self.reconnect_delay, "Reconnecting to event stream");
            self.delay.wait(self.reconnect_delay).await;
        }
    }

    async fn stream_messages<T, S>(
        mut frames: C::Frames,
        coordinator: &mut Coordinator<T>,
        sink: &mut S,
    ) -> FeedResult<()>
    where
        T: RouteTable,
        S: NotificationSink,
    {
        while let Some(frame) = frames.next().await {
            let text = frame?;
            let event = match StreamEvent::decode(&text) {
                Ok(event) => event,
                Err(e) => {
                    warn!(length = text.len(), "Dropping malformed stream message: {e}");
                    continue;
                }
            };
            for notification in coordinator.handle_event(event) {
                sink.deliver(notification).await;
            }
        }
        Ok(())
    }
}
