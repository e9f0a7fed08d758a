//! Off-thread asset decoding.

mod texture_loader;

pub use texture_loader::{decode_texture, spawn_texture_load};
