mod clear;
mod delay_offset;
mod info;
mod modulation;
mod normal;
mod seq;
mod sync;

pub use seq::focus::FocusPoint;
