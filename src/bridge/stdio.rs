//! JSON-line transport between the host and the tracker.
//!
//! Inbound host messages arrive one JSON object per line; outbound tracker
//! messages and render events leave the same way. Lines that don't parse
//! are dropped, matching the best-effort contract of the channel.

use anyhow::Result;
use chrono::Utc;
use log::{debug, info};
use serde::Serialize;
use tokio::{
    io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader},
    sync::mpsc,
};
use tokio_util::sync::CancellationToken;

use crate::{
    bridge::messages::{HostMessage, TrackerMessage},
    tracker::controller::{TrackerController, TrackerEvent},
};

/// Run the bridge over stdin/stdout until the host closes the stream or the
/// token is cancelled.
pub async fn run_stdio(
    controller: TrackerController,
    outbound: mpsc::UnboundedReceiver<TrackerMessage>,
    events: mpsc::UnboundedReceiver<TrackerEvent>,
    cancel_token: CancellationToken,
) -> Result<()> {
    run_bridge(tokio::io::stdin(), tokio::io::stdout(), controller, outbound, events, cancel_token)
        .await
}

pub async fn run_bridge<R, W>(
    reader: R,
    mut writer: W,
    controller: TrackerController,
    mut outbound: mpsc::UnboundedReceiver<TrackerMessage>,
    mut events: mpsc::UnboundedReceiver<TrackerEvent>,
    cancel_token: CancellationToken,
) -> Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = BufReader::new(reader).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line? {
                    Some(line) => {
                        let line = line.trim();
                        if line.is_empty() {
                            continue;
                        }
                        match serde_json::from_str::<HostMessage>(line) {
                            Ok(message) => controller.handle_message(message, Utc::now()).await,
                            Err(err) => debug!("dropping unparseable host line: {err}"),
                        }
                    }
                    None => {
                        info!("host closed the stream, shutting down");
                        break;
                    }
                }
            }
            Some(message) = outbound.recv() => {
                write_json_line(&mut writer, &message).await?;
            }
            Some(event) = events.recv() => {
                write_json_line(&mut writer, &event).await?;
            }
            _ = cancel_token.cancelled() => {
                info!("bridge loop shutting down");
                break;
            }
        }
    }

    Ok(())
}

async fn write_json_line<W, T>(writer: &mut W, value: &T) -> Result<()>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let mut line = serde_json::to_vec(value)?;
    line.push(b'\n');
    writer.write_all(&line).await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SettingsStore;
    use serde_json::json;
    use std::sync::Arc;
    use tokio::io::AsyncReadExt;

    fn controller_with_channels() -> (
        TrackerController,
        mpsc::UnboundedReceiver<TrackerMessage>,
        mpsc::UnboundedReceiver<TrackerEvent>,
    ) {
        let dir = std::env::temp_dir().join(format!("xptrack-bridge-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let settings = Arc::new(SettingsStore::new(dir.join("settings.json")).unwrap());
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        (
            TrackerController::new(outbound_tx, events_tx, settings),
            outbound_rx,
            events_rx,
        )
    }

    #[tokio::test]
    async fn write_json_line_appends_newline() {
        let mut sink: Vec<u8> = Vec::new();
        write_json_line(&mut sink, &TrackerMessage::Pin).await.unwrap();
        assert_eq!(String::from_utf8(sink).unwrap(), "{\"type\":\"pin\"}\n");
    }

    #[tokio::test]
    async fn bridge_round_trips_a_snapshot_into_events() {
        let (controller, outbound_rx, events_rx) = controller_with_channels();
        let (host_side, tracker_in) = tokio::io::duplex(4096);
        let (tracker_out, mut host_read) = tokio::io::duplex(16384);
        let cancel_token = CancellationToken::new();

        let bridge = tokio::spawn(run_bridge(
            tracker_in,
            tracker_out,
            controller,
            outbound_rx,
            events_rx,
            cancel_token.clone(),
        ));

        let mut host_write = host_side;
        let snapshot = json!({
            "type": "data",
            "data": { "job_name": "Trucker", "exp_trucking_trucking": 500.0 }
        });
        host_write
            .write_all(format!("{snapshot}\nnot json\n").as_bytes())
            .await
            .unwrap();

        // The switch-triggered request and the state event both come back
        // as JSON lines; collect until the state event shows up.
        let mut received = String::new();
        let mut buf = [0u8; 1024];
        while !received.contains("stateUpdated") {
            let n = host_read.read(&mut buf).await.unwrap();
            assert!(n > 0, "bridge closed before emitting state");
            received.push_str(std::str::from_utf8(&buf[..n]).unwrap());
        }
        assert!(received.contains("getNamedData"));

        cancel_token.cancel();
        bridge.await.unwrap().unwrap();
    }
}
