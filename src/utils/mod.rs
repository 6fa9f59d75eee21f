pub mod clock;
pub mod distance_publisher_error;
pub mod shutdown;
