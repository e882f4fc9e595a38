mod bit;
pub use bit::*;

pub mod input;
pub mod restart;

mod ribbit_communication;
pub use ribbit_communication::*;

#[cfg(target_arch = "wasm32")]
mod window_resizing;
