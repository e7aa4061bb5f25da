use comms::{Deserialize, Serialize};
use tokio::io::{self, AsyncWriteExt};

struct Tagged<'a> {
    tag: u8,
    text: &'a str,
}

impl<'a> Serialize<'a> for Tagged<'_> {
    fn serialize(&'a self, buf: &mut Vec<u8>) -> std::io::Result<Option<&'a [u8]>> {
        buf.push(self.tag);
        Ok(Some(self.text.as_bytes()))
    }
}

impl<'a> Deserialize<'a> for Tagged<'a> {
    fn deserialize(buf: &'a [u8]) -> std::io::Result<Self> {
        let (&tag, rest) = buf
            .split_first()
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::InvalidData, "empty"))?;
        let text = std::str::from_utf8(rest)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        Ok(Self { tag, text })
    }
}

#[tokio::test]
async fn send_recv_with_zero_copy_tail() {
    const SIZE: usize = 128;

    let msg = Tagged {
        tag: 7,
        text: "Hello, world!",
    };

    let (one, two) = io::duplex(SIZE);
    let (rx, tx) = io::split(one);
    let (_, mut tx) = comms::channel(rx, tx);

    tx.send(&msg).await.unwrap();

    let (rx, tx) = io::split(two);
    let (mut rx, _) = comms::channel(rx, tx);

    let mut buf = Vec::new();
    let got: Tagged = rx.recv_into(&mut buf).await.unwrap();

    assert_eq!(got.tag, msg.tag);
    assert_eq!(got.text, msg.text);
}

#[tokio::test]
async fn frames_are_read_one_at_a_time() {
    let (one, two) = io::duplex(1024);
    let (rx, tx) = io::split(one);
    let (_, mut tx) = comms::channel(rx, tx);

    for (tag, text) in [(1, "first"), (2, ""), (3, "third")] {
        tx.send(&Tagged { tag, text }).await.unwrap();
    }

    let (rx, tx) = io::split(two);
    let (mut rx, _) = comms::channel(rx, tx);

    let mut buf = Vec::new();
    for (tag, text) in [(1, "first"), (2, ""), (3, "third")] {
        let got: Tagged = rx.recv_into(&mut buf).await.unwrap();
        assert_eq!((got.tag, got.text), (tag, text));
    }
}

#[tokio::test]
async fn closed_stream_is_unexpected_eof() {
    let (one, two) = io::duplex(128);
    let (rx, tx) = io::split(one);
    let (_, mut tx) = comms::channel(rx, tx);

    tx.send(&Tagged { tag: 1, text: "last" }).await.unwrap();
    tx.shutdown().await.unwrap();

    let (rx, tx) = io::split(two);
    let (mut rx, _) = comms::channel(rx, tx);

    let mut buf = Vec::new();
    let got: Tagged = rx.recv_into(&mut buf).await.unwrap();
    assert_eq!(got.text, "last");

    let err = rx.recv_into::<Tagged>(&mut buf).await.err().unwrap();
    assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
}

#[tokio::test]
async fn truncated_frame_is_connection_aborted() {
    let (mut one, two) = io::duplex(128);

    // Announces 16 bytes but only delivers 3.
    one.write_all(&16u64.to_be_bytes()).await.unwrap();
    one.write_all(b"abc").await.unwrap();
    drop(one);

    let (rx, tx) = io::split(two);
    let (mut rx, _) = comms::channel(rx, tx);

    let mut buf = Vec::new();
    let err = rx.recv_into::<Tagged>(&mut buf).await.err().unwrap();
    assert_eq!(err.kind(), io::ErrorKind::ConnectionAborted);
}

#[tokio::test]
async fn truncated_length_header_is_connection_aborted() {
    let (mut one, two) = io::duplex(128);

    one.write_all(&[0, 0, 0]).await.unwrap();
    drop(one);

    let (rx, tx) = io::split(two);
    let (mut rx, _) = comms::channel(rx, tx);

    let mut buf = Vec::new();
    let err = rx.recv_into::<Tagged>(&mut buf).await.err().unwrap();
    assert_eq!(err.kind(), io::ErrorKind::ConnectionAborted);
}
