//! Channel layout negotiation.
//!
//! This is the only validation boundary in the crate. A host asks whether a
//! bus layout is acceptable before any audio is processed; once accepted,
//! processing never fails.

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelLayout {
    Mono,
    Stereo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("unsupported channel count {0} (only mono or stereo)")]
    UnsupportedChannelCount(usize),
    #[error("input layout {input:?} does not match output layout {output:?}")]
    Mismatch {
        input: ChannelLayout,
        output: ChannelLayout,
    },
}

impl ChannelLayout {
    pub fn from_channels(channels: usize) -> Result<Self, LayoutError> {
        match channels {
            1 => Ok(Self::Mono),
            2 => Ok(Self::Stereo),
            n => Err(LayoutError::UnsupportedChannelCount(n)),
        }
    }

    pub fn channels(self) -> usize {
        match self {
            Self::Mono => 1,
            Self::Stereo => 2,
        }
    }
}

/// Check an input/output channel pair, naming the reason on rejection.
pub fn negotiate(input_channels: usize, output_channels: usize) -> Result<ChannelLayout, LayoutError> {
    let output = ChannelLayout::from_channels(output_channels)?;
    let input = ChannelLayout::from_channels(input_channels)?;
    if input != output {
        return Err(LayoutError::Mismatch { input, output });
    }
    Ok(output)
}

/// Every effect accepts mono→mono and stereo→stereo, nothing else.
pub fn is_layout_supported(input_channels: usize, output_channels: usize) -> bool {
    negotiate(input_channels, output_channels).is_ok()
}
