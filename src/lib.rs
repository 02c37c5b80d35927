pub mod buffer;
pub mod dsp;
pub mod effects; // Complete processors built from the dsp primitives
pub mod layout;
pub mod params; // Host-facing parameter tables and polling

pub use buffer::AudioBuffer;
pub use effects::{Effect, EffectKind, ProcessSpec};
pub use layout::{is_layout_supported, ChannelLayout, LayoutError};
pub use params::{AtomicParams, ParamSpec, ParameterSource};

pub const MAX_BLOCK_SIZE: usize = 2048;
pub const MAX_CHANNELS: usize = 2;
