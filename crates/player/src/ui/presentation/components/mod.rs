//! Reusable UI components

pub mod social;
pub mod video_modal;
pub mod video_player;

pub use social::{CreatorBar, LikeButton, ViewCount};
pub use video_modal::VideoModal;
pub use video_player::VideoPlayer;
