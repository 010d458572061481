//! In-proc byte channel for replication messages.
//!
//! Backs the local server/client loop used by tests and the loopback session;
//! a real transport replaces this pair without touching the codecs. Built on
//! `std::sync::mpsc` with non-blocking drain helpers only — the tick loop
//! must never block on the network side.

use std::sync::mpsc::{self, Receiver, Sender};

#[derive(Clone)]
pub struct MsgTx(Sender<Vec<u8>>);
pub struct MsgRx(Receiver<Vec<u8>>);

/// Create a sender/receiver pair. The underlying channel is unbounded.
#[must_use]
pub fn pair() -> (MsgTx, MsgRx) {
    let (s, r) = mpsc::channel::<Vec<u8>>();
    (MsgTx(s), MsgRx(r))
}

impl MsgTx {
    /// Try to send; returns false if the receiver is dropped.
    #[must_use]
    pub fn try_send(&self, bytes: Vec<u8>) -> bool {
        self.0.send(bytes).is_ok()
    }

    /// Frame a payload and send it.
    #[must_use]
    pub fn send_framed(&self, payload: &[u8]) -> bool {
        let mut buf = Vec::with_capacity(payload.len() + 5);
        crate::frame::write_msg(&mut buf, payload);
        self.try_send(buf)
    }
}

impl MsgRx {
    /// Non-blocking receive of a single message.
    #[must_use]
    pub fn try_recv(&self) -> Option<Vec<u8>> {
        self.0.try_recv().ok()
    }

    /// Drain all currently queued messages.
    #[must_use]
    pub fn drain(&self) -> Vec<Vec<u8>> {
        let mut out = Vec::new();
        while let Some(b) = self.try_recv() {
            out.push(b);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framed_send_and_drain() {
        let (tx, rx) = pair();
        assert!(tx.send_framed(b"one"));
        assert!(tx.send_framed(b"two"));
        let msgs = rx.drain();
        assert_eq!(msgs.len(), 2);
        let got = crate::frame::read_all(&msgs[0]).expect("frames");
        assert_eq!(got, vec![b"one" as &[u8]]);
    }
}
