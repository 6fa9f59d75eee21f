mod board;
mod pins;
#[cfg(feature = "rpi")]
mod rppal_backend;

pub use self::board::Board;
pub use self::pins::PinNumbering;
#[cfg(feature = "rpi")]
pub use self::rppal_backend::RppalBackend;
