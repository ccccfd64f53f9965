//! Actor Model: playback on its own thread.
//!
//! ```text
//! ┌──────────────┐   PlaybackEvent    ┌──────────────┐
//! │ Player Thread│ ─────────────────▶ │  Main Loop   │ ──▶ presenter
//! └──────────────┘                    └──────────────┘
//!        ▲            CancelToken            │
//!        └───────────────────────────────────┘
//! ```

mod messages;
mod player;

pub use messages::PlaybackEvent;
pub use player::Player;
