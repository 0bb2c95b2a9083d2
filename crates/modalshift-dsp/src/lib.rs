//! RT-safe DSP building blocks: Hilbert analytic signal, single-sideband
//! frequency shifting, and the harmonic bandpass bank. Shift frequencies are
//! read from lock-free atomics; nothing here allocates after `prepare`.

mod biquad;
pub use biquad::{Biquad, BiquadCoefs, MAX_CENTER_RATIO};

mod hilbert;
pub use hilbert::{freq_factor, AnalyticSignalGenerator, HilbertCoeffs, HILBERT_ORDER};

mod frequency_shifter;
pub use frequency_shifter::{FrequencyShifter, HILBERT_PASSBAND_GAIN};

mod harmonic_bank;
pub use harmonic_bank::HarmonicBandpassBank;

mod mixer;
pub use mixer::mix_into;
