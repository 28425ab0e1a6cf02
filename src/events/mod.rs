pub mod keyboard;
pub mod pointer;

pub use keyboard::{wire_effect_swap, EffectKind, SwapWiring};
pub use pointer::{wire_pointer_handlers, PointerWiring};
