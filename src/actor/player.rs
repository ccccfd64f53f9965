//! Player Actor: runs an animation on a dedicated thread.
//!
//! The sequencer sleeps for real between steps, so it gets a thread of its
//! own and publishes snapshots over a channel. A consumer that draws slower
//! than the animation plays can use [`Player::latest`] to skip stale frames.

use super::messages::PlaybackEvent;
use crate::highlight::Tokenizer;
use crate::segment::Segment;
use crate::sequencer::{CancelToken, RenderSnapshot, Sequencer, SequencerConfig, ThreadScheduler};
use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

/// Handle to an animation playing on its own thread.
pub struct Player {
    /// Handle to the playback thread.
    handle: Option<JoinHandle<()>>,
    /// Cancels the run at its next suspension point.
    cancel: CancelToken,
    /// Receiver for playback events.
    event_rx: Receiver<PlaybackEvent>,
    /// A terminal event was handed out by [`Player::latest`].
    ended: AtomicBool,
}

impl Player {
    /// Spawn a player replaying `segments` with `tokenizer`.
    ///
    /// # Panics
    ///
    /// Panics if the OS fails to spawn the playback thread.
    #[allow(clippy::missing_panics_doc)]
    pub fn spawn<T>(segments: Vec<Segment>, config: SequencerConfig, tokenizer: T) -> Self
    where
        T: Tokenizer + Send + 'static,
    {
        let cancel = CancelToken::new();
        let cancel_clone = cancel.clone();

        // Unbounded: the sequencer must never block on a slow consumer.
        let (event_tx, event_rx) = unbounded();

        let handle = thread::Builder::new()
            .name("muses-player".to_string())
            .spawn(move || {
                Self::run(&segments, config, tokenizer, cancel_clone, event_tx);
            })
            .expect("Failed to spawn player thread");

        Self {
            handle: Some(handle),
            cancel,
            event_rx,
            ended: AtomicBool::new(false),
        }
    }

    /// Get a reference to the event receiver.
    #[inline]
    pub const fn receiver(&self) -> &Receiver<PlaybackEvent> {
        &self.event_rx
    }

    /// Drain pending events, returning the newest snapshot and, if playback
    /// has ended, the terminal event.
    ///
    /// A thread that exits without a terminal event (it aborted) is reported
    /// once as [`PlaybackEvent::Panicked`].
    pub fn latest(&self) -> (Option<RenderSnapshot>, Option<PlaybackEvent>) {
        let mut snapshot = None;
        loop {
            match self.event_rx.try_recv() {
                Ok(PlaybackEvent::Snapshot(next)) => snapshot = Some(*next),
                Ok(terminal) => {
                    self.ended.store(true, Ordering::Relaxed);
                    return (snapshot, Some(terminal));
                }
                Err(TryRecvError::Empty) => return (snapshot, None),
                Err(TryRecvError::Disconnected) => {
                    if self.ended.swap(true, Ordering::Relaxed) {
                        return (snapshot, None);
                    }
                    tracing::warn!("player thread exited without a terminal event");
                    let lost = PlaybackEvent::Panicked(String::from("player thread exited unexpectedly"));
                    return (snapshot, Some(lost));
                }
            }
        }
    }

    /// Token that cancels this playback.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Ask the playback to stop.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Check if the playback thread has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Wait for the playback to end on its own.
    pub fn join(mut self) {
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }

    /// Playback thread body.
    fn run<T: Tokenizer>(
        segments: &[Segment],
        config: SequencerConfig,
        tokenizer: T,
        cancel: CancelToken,
        mut event_tx: Sender<PlaybackEvent>,
    ) {
        let sequencer = Sequencer::with_config(tokenizer, ThreadScheduler::default(), config)
            .with_cancel_token(cancel);

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| sequencer.run(segments, &mut event_tx)));
        let terminal = match outcome {
            Ok(Ok(report)) => PlaybackEvent::Finished(Box::new(report)),
            Ok(Err(err)) => PlaybackEvent::Stopped(err),
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                tracing::warn!(%message, "playback panicked");
                PlaybackEvent::Panicked(message)
            }
        };
        let _ = event_tx.send(terminal);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| String::from("unknown panic"))
}

impl Drop for Player {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl std::fmt::Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("cancelled", &self.cancel.is_cancelled())
            .field("finished", &self.is_finished())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::highlight::{HighlightError, PlainTokenizer, TokenNode};
    use crate::sequencer::{Delays, RunError};
    use std::time::Duration;

    fn instant() -> SequencerConfig {
        SequencerConfig::default().with_delays(Delays::instant())
    }

    #[test]
    fn test_player_plays_to_end() {
        let segments = vec![Segment::TypeText { text: "hey".into() }];
        let player = Player::spawn(segments, instant(), PlainTokenizer);

        let events: Vec<_> = player.receiver().iter().take(4).collect();
        assert_eq!(events.len(), 4);
        assert!(events[..3].iter().all(|e| !e.is_terminal()));
        match &events[3] {
            PlaybackEvent::Finished(report) => {
                assert_eq!(report.state.buffer.text(), "hey");
                assert_eq!(report.snapshots_emitted, 3);
            }
            other => panic!("unexpected event: {other:?}"),
        }
        player.join();
    }

    #[test]
    fn test_player_cancel() {
        let segments = vec![Segment::TypeText {
            text: "a long line that takes a while".into(),
        }];
        let config = SequencerConfig::default().with_delays(Delays {
            type_text: Duration::from_secs(1),
            ..Delays::default()
        });
        let player = Player::spawn(segments, config, PlainTokenizer);

        let first = player
            .receiver()
            .recv_timeout(Duration::from_secs(5))
            .unwrap();
        assert!(matches!(first, PlaybackEvent::Snapshot(_)));
        player.cancel();

        let last = player
            .receiver()
            .recv_timeout(Duration::from_secs(5))
            .unwrap();
        assert_eq!(
            last,
            PlaybackEvent::Stopped(RunError::Cancelled {
                snapshots_emitted: 1
            })
        );
        player.join();
    }

    struct Exploding;

    impl Tokenizer for Exploding {
        fn tokenize(&mut self, text: &str, _: &str) -> Result<Vec<TokenNode>, HighlightError> {
            assert!(text.len() < 2, "tokenizer blew up");
            Ok(vec![TokenNode::leaf(text)])
        }
    }

    #[test]
    fn test_panicking_tokenizer_reports_panicked() {
        let segments = vec![Segment::TypeText { text: "abc".into() }];
        let player = Player::spawn(segments, instant(), Exploding);

        let events: Vec<_> = player.receiver().iter().collect();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], PlaybackEvent::Snapshot(_)));
        match &events[1] {
            PlaybackEvent::Panicked(message) => assert!(message.contains("tokenizer blew up")),
            other => panic!("unexpected event: {other:?}"),
        }
        player.join();
    }

    #[test]
    fn test_latest_reports_lost_thread_once() {
        let (event_tx, event_rx) = unbounded();
        event_tx
            .send(PlaybackEvent::Snapshot(Box::default()))
            .unwrap();
        drop(event_tx);
        let player = Player {
            handle: None,
            cancel: CancelToken::new(),
            event_rx,
            ended: AtomicBool::new(false),
        };

        let (snapshot, terminal) = player.latest();
        assert!(snapshot.is_some());
        assert!(matches!(terminal, Some(PlaybackEvent::Panicked(_))));
        assert_eq!(player.latest(), (None, None));
    }

    #[test]
    fn test_latest_skips_stale_snapshots() {
        let segments = vec![Segment::TypeText { text: "abc".into() }];
        let player = Player::spawn(segments, instant(), PlainTokenizer);
        while !player.is_finished() {
            thread::sleep(Duration::from_millis(1));
        }

        let (snapshot, terminal) = player.latest();
        assert_eq!(snapshot.unwrap().text, "abc");
        assert!(matches!(terminal, Some(PlaybackEvent::Finished(_))));
        player.join();
    }
}
