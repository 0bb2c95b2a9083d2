//! Owned multi-channel scratch buffer.

/// Planar `channels × capacity` buffer with a movable frame count.
///
/// Storage is allocated only by [`ChannelBuffer::resize`]; everything else is
/// allocation-free and safe to call from the audio thread.
#[derive(Debug, Clone, Default)]
pub struct ChannelBuffer {
    data: Vec<f32>,
    channels: usize,
    capacity: usize,
    frames: usize,
}

impl ChannelBuffer {
    pub fn new(channels: usize, capacity: usize) -> Self {
        let mut buffer = Self::default();
        buffer.resize(channels, capacity);
        buffer
    }

    /// Reallocate and zero. Not real-time safe.
    pub fn resize(&mut self, channels: usize, capacity: usize) {
        self.data.clear();
        self.data.resize(channels * capacity, 0.0);
        self.channels = channels;
        self.capacity = capacity;
        self.frames = capacity;
    }

    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Copy `frames` samples starting at `offset` from each source channel.
    ///
    /// Source channels beyond this buffer's channel count are ignored; missing
    /// source channels leave the destination channel silent. Samples past the
    /// end of a short source channel are zero.
    pub fn copy_from<S: AsRef<[f32]>>(&mut self, source: &[S], offset: usize, frames: usize) {
        debug_assert!(frames <= self.capacity, "copy exceeds buffer capacity");
        let frames = frames.min(self.capacity);
        self.frames = frames;

        for channel in 0..self.channels {
            let capacity = self.capacity;
            let dest = &mut self.data[channel * capacity..channel * capacity + frames];
            match source.get(channel) {
                Some(src) => {
                    let src = src.as_ref();
                    let start = offset.min(src.len());
                    let available = (src.len() - start).min(frames);
                    dest[..available].copy_from_slice(&src[start..start + available]);
                    dest[available..].fill(0.0);
                }
                None => dest.fill(0.0),
            }
        }
    }

    #[inline]
    pub fn channel(&self, channel: usize) -> &[f32] {
        let start = channel * self.capacity;
        &self.data[start..start + self.frames]
    }

    #[inline]
    pub fn channel_mut(&mut self, channel: usize) -> &mut [f32] {
        let start = channel * self.capacity;
        &mut self.data[start..start + self.frames]
    }

    pub fn clear(&mut self) {
        self.data.fill(0.0);
    }
}
