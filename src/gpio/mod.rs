mod digital_in;
mod digital_out;
mod line;

pub use {
    digital_in::*,
    digital_out::*,
    line::*,
};
