//! Summing of shifted harmonic bands.

use modalshift_core::ChannelBuffer;

/// Overwrite `dest` with `gain · Σ bands[h].channel(channel)` for every band.
///
/// Bands are summed without normalization. Samples past the shortest band
/// are left at zero.
pub fn mix_into(dest: &mut [f32], bands: &[ChannelBuffer], channel: usize, gain: f32) {
    dest.fill(0.0);

    for band in bands {
        for (out, &sample) in dest.iter_mut().zip(band.channel(channel)) {
            *out += sample;
        }
    }

    if gain != 1.0 {
        for out in dest.iter_mut() {
            *out *= gain;
        }
    }
}
