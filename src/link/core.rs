use anyhow::Context;
use tokio::{
    io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt},
    net::TcpStream,
    sync::mpsc::{self, Sender},
    task::JoinHandle,
};

use crate::{
    config::{Config, StrOpt, USizeOpt},
    log::Log,
};

use super::{
    Link,
    data::{Command, Frame, FrameError, LinkEvent},
    message::Message,
};

const SCOPE: &str = "link";

/// Bytes of length prefix preceding each frame body on the wire.
pub(super) const FRAME_HEADER_LEN: usize = 2;

/// The core of the link actor, owning the connection to the phone's
/// companion bridge.
///
/// Outbound commands are drained from the bounded mailbox and written as
/// length-prefixed frames; each write is reported as [`LinkEvent::Sent`] or
/// [`LinkEvent::SendFailed`] on the event channel. A failed write is never
/// retried. A separate reader task decodes inbound frames and reports them
/// as [`LinkEvent::Received`].
#[derive(Debug)]
pub struct Core {
    /// Logging interface
    log: Log,
    /// Connection to the companion bridge
    stream: TcpStream,
    /// Dictionary key outbound command values are written under
    key: u32,
    /// Outbox depth, in whole command frames
    outbox_slots: usize,
    /// Largest inbound frame body accepted, in bytes
    inbox_bytes: usize,
    /// Where outcomes and inbound messages are reported
    events: Sender<LinkEvent>,
}

impl Core {
    /// Connects to the companion bridge and prepares the actor.
    ///
    /// # Errors
    /// Returns an error if the bridge address cannot be reached.
    pub async fn build(
        config: &Config,
        log: Log,
        events: Sender<LinkEvent>,
    ) -> anyhow::Result<Self> {
        let addr = config.str_opt(StrOpt::BridgeAddr).await;
        let stream = TcpStream::connect(addr.as_ref())
            .await
            .with_context(|| format!("Connecting to companion bridge at {addr}"))?;

        let key = config.usize(USizeOpt::CommandKey).await as u32;
        let outbox_bytes = config.usize(USizeOpt::OutboxBytes).await;
        let inbox_bytes = config.usize(USizeOpt::InboxBytes).await;
        let frame_len = FRAME_HEADER_LEN + Frame::command(key, Command::Start).encoded_len();
        let outbox_slots = outbox_slots(outbox_bytes, frame_len);

        log.info(
            SCOPE,
            format!("connected to {addr}, outbox holds {outbox_slots} commands"),
        );

        Ok(Self {
            log,
            stream,
            key,
            outbox_slots,
            inbox_bytes,
            events,
        })
    }

    /// Transforms the core into an actor ready to receive messages.
    ///
    /// # Returns
    /// A tuple containing:
    /// - A [`Link`] instance that can be used to queue commands
    /// - A join handle for the writer task
    pub fn spawn(self) -> (Link, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::channel(self.outbox_slots);
        let Self {
            log,
            stream,
            key,
            inbox_bytes,
            events,
            ..
        } = self;
        let (read_half, mut write_half) = stream.into_split();

        let reader = tokio::spawn(read_loop(
            read_half,
            inbox_bytes,
            events.clone(),
            log.clone(),
        ));

        let handle = tokio::spawn(async move {
            while let Some(Message::Send { cmd }) = rx.recv().await {
                let frame = Frame::command(key, cmd);
                match write_frame(&mut write_half, &frame).await {
                    Ok(()) => {
                        log.info(SCOPE, format!("{cmd} command submitted"));
                        let _ = events.send(LinkEvent::Sent { cmd }).await;
                    }
                    Err(err) => {
                        log.error(SCOPE, format!("failed to submit {cmd} command: {err}"));
                        let _ = events.send(LinkEvent::SendFailed { cmd }).await;
                    }
                }
            }
            reader.abort();
        });

        (Link::Actual(tx), handle)
    }
}

/// Outbox depth for a byte budget: how many command frames fit, never less
/// than one.
pub(super) fn outbox_slots(outbox_bytes: usize, frame_len: usize) -> usize {
    (outbox_bytes / frame_len).max(1)
}

/// Writes one length-prefixed frame.
pub(super) async fn write_frame<W: AsyncWrite + Unpin>(
    writer: &mut W,
    frame: &Frame,
) -> std::io::Result<()> {
    let body = frame.encode();
    writer.write_all(&(body.len() as u16).to_le_bytes()).await?;
    writer.write_all(&body).await?;
    writer.flush().await
}

/// Reads length-prefixed frames until the connection closes, reporting each
/// well-formed one as [`LinkEvent::Received`]. Oversized frames are drained
/// and dropped; malformed ones are dropped. The payload is never
/// interpreted here.
pub(super) async fn read_loop<R: AsyncRead + Unpin>(
    mut reader: R,
    inbox_bytes: usize,
    events: Sender<LinkEvent>,
    log: Log,
) {
    loop {
        let mut prefix = [0u8; FRAME_HEADER_LEN];
        if reader.read_exact(&mut prefix).await.is_err() {
            log.warn(SCOPE, "bridge connection closed");
            break;
        }
        let len = u16::from_le_bytes(prefix) as usize;

        if len > inbox_bytes {
            let err = FrameError::Oversize {
                len,
                max: inbox_bytes,
            };
            log.warn(SCOPE, format!("dropping inbound frame: {err}"));
            let mut remaining = (&mut reader).take(len as u64);
            if tokio::io::copy(&mut remaining, &mut tokio::io::sink())
                .await
                .is_err()
            {
                break;
            }
            continue;
        }

        let mut body = vec![0u8; len];
        if reader.read_exact(&mut body).await.is_err() {
            log.warn(SCOPE, "bridge connection closed mid-frame");
            break;
        }
        match Frame::decode(&body) {
            Ok(frame) => {
                if events.send(LinkEvent::Received(frame)).await.is_err() {
                    break;
                }
            }
            Err(err) => log.warn(SCOPE, format!("dropping malformed inbound frame: {err}")),
        }
    }
}
