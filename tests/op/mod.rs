mod modulation;
mod seq_gain;
mod sync;
