//! Wire protocol for the decision stream.
//!
//! A closed set of six message variants, discriminated by a `type` tag.
//! Decoding is explicit: the tag is read first, then the payload for that tag
//! is parsed and validated, so a known tag with the wrong shape is rejected
//! instead of passed through.
//!
//! ## Payloads
//!
//! - [`PlayerThinking`]: A model has started deliberating
//! - [`ReasoningToken`]: Incremental fragment of a model's reasoning
//! - [`IllegalAttempt`]: A model proposed a move the rules forbid
//! - [`DecisionMade`]: A model committed to a bid or a card
//! - [`RoundComplete`]: Terminal summary of the round
//! - [`Failure`]: Producer-side error report
mod decision;
mod error;
mod failure;
mod illegal;
mod message;
mod round;
mod thinking;
mod token;

pub use decision::*;
pub use error::*;
pub use failure::*;
pub use illegal::*;
pub use message::*;
pub use round::*;
pub use thinking::*;
pub use token::*;
