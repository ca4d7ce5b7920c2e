pub mod particles;
pub mod win_screen;

pub use win_screen::WinScreen;
