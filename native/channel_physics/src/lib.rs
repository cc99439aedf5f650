//! Channel Physics for RadioML-style dataset synthesis
//!
//! Implements a dynamic complex-baseband channel: random-walk sample
//! rate and carrier frequency offsets, frequency-selective Rician fading
//! with Doppler over fractionally delayed paths, and AWGN at a given
//! amplitude. Every random process derives from one seed, so a channel
//! built from the same profile always produces the same output.

pub mod channel;
pub mod drift;
pub mod fading;
pub mod multipath;
pub mod noise;

pub use channel::{ChannelError, ChannelProfile, ChannelState, DynamicChannel};
