use tokio::io::{AsyncReadExt, AsyncWriteExt, duplex};
use tokio::sync::mpsc;

use crate::log::Log;

use super::core::{FRAME_HEADER_LEN, outbox_slots, read_loop, write_frame};
use super::data::{Command, Frame, LinkError, LinkEvent, TUPLE_UINT};
use super::Link;

#[tokio::test]
async fn test_write_frame_wire_layout() {
    let (mut a, mut b) = duplex(64);
    let frame = Frame::command(0x0, Command::Start);
    write_frame(&mut a, &frame).await.unwrap();
    drop(a);

    let mut wire = Vec::new();
    b.read_to_end(&mut wire).await.unwrap();
    assert_eq!(
        wire,
        vec![
            0x09, 0x00, // length prefix
            0x01, // tuple count
            0x00, 0x00, 0x00, 0x00, // key
            TUPLE_UINT, 0x01, 0x00, // type, value length
            0x01, // start-ringing code
        ]
    );
}

#[tokio::test]
async fn test_read_loop_reports_inbound_frames() {
    let (mut a, b) = duplex(256);
    let (events_tx, mut events_rx) = mpsc::channel(8);
    let reader = tokio::spawn(read_loop(b, 256, events_tx, Log::mock()));

    let frame = Frame::command(0x0, Command::Stop);
    write_frame(&mut a, &frame).await.unwrap();
    assert_eq!(events_rx.recv().await, Some(LinkEvent::Received(frame)));

    drop(a);
    reader.await.unwrap();
    assert_eq!(events_rx.recv().await, None);
}

#[tokio::test]
async fn test_read_loop_skips_oversized_frames() {
    let (mut a, b) = duplex(1024);
    let (events_tx, mut events_rx) = mpsc::channel(8);
    tokio::spawn(read_loop(b, 16, events_tx, Log::mock()));

    // A 100-byte frame against a 16-byte inbox, then a valid frame.
    a.write_all(&100u16.to_le_bytes()).await.unwrap();
    a.write_all(&[0u8; 100]).await.unwrap();
    let frame = Frame::command(0x1, Command::Start);
    write_frame(&mut a, &frame).await.unwrap();

    assert_eq!(events_rx.recv().await, Some(LinkEvent::Received(frame)));
}

#[tokio::test]
async fn test_read_loop_drops_malformed_frames() {
    let (mut a, b) = duplex(256);
    let (events_tx, mut events_rx) = mpsc::channel(8);
    tokio::spawn(read_loop(b, 256, events_tx, Log::mock()));

    // Declares one tuple but carries no tuple bytes.
    a.write_all(&1u16.to_le_bytes()).await.unwrap();
    a.write_all(&[0x01]).await.unwrap();
    let frame = Frame::command(0x0, Command::Start);
    write_frame(&mut a, &frame).await.unwrap();

    // Only the well-formed frame comes through.
    assert_eq!(events_rx.recv().await, Some(LinkEvent::Received(frame)));
}

#[test]
fn test_outbox_slots_from_byte_budget() {
    let frame_len = FRAME_HEADER_LEN + Frame::command(0x0, Command::Start).encoded_len();
    assert_eq!(frame_len, 11);
    assert_eq!(outbox_slots(256, frame_len), 23);
    assert_eq!(outbox_slots(128, frame_len), 11);
    // A budget smaller than one frame still leaves room for one command.
    assert_eq!(outbox_slots(4, frame_len), 1);
}

#[tokio::test]
async fn test_mock_records_commands() {
    let link = Link::mock();
    link.send(Command::Start).await.unwrap();
    link.send(Command::Stop).await.unwrap();

    let Link::Mock(mock) = &link else {
        panic!("expected mock");
    };
    assert_eq!(mock.sent().await, vec![Command::Start, Command::Stop]);
}

#[tokio::test]
async fn test_mock_rejects_when_full() {
    let link = Link::mock();
    let Link::Mock(mock) = &link else {
        panic!("expected mock");
    };
    mock.set_reject(true).await;
    assert_eq!(link.send(Command::Start).await, Err(LinkError::OutboxFull));
    assert!(mock.sent().await.is_empty());
}
