//! Pull-based decoding of a chunked byte stream into protocol messages.
//!
//! Chunk boundaries are arbitrary: a frame, or a multi-byte character, may
//! be split across any number of reads. [`LineBuffer`] carries the incomplete
//! tail between reads, [`Frame`] picks out `data: ` lines, and [`Streamer`]
//! drives an [`Upstream`] request through both, yielding messages lazily.
mod activity;
mod error;
mod frame;
mod lines;
mod streamer;
mod upstream;

pub use activity::*;
pub use error::*;
pub use frame::*;
pub use lines::*;
pub use streamer::*;
pub use upstream::*;
