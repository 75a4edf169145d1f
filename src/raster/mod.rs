use num_traits::ToPrimitive;

use crate::error::CodecError;
use crate::ImmutableImage;

/// A decoded image held as one flat buffer of byte samples in row-major,
/// channel-minor order: the sample for `(row, col, channel)` lives at
/// `(row * width + col) * channels + channel`.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Raster {
    width: usize,
    height: usize,
    channels: usize,
    samples: Vec<u8>,
}

impl Raster {
    pub fn new(
        width: usize,
        height: usize,
        channels: usize,
        samples: Vec<u8>,
    ) -> Result<Self, CodecError> {
        let expected = width * height * channels;
        if samples.len() != expected {
            return Err(CodecError::ShapeMismatch { expected, actual: samples.len() });
        }

        Ok(Raster { width, height, channels, samples })
    }

    /// Builds a raster from any integer sample type, converting each value
    /// into one byte. Values outside [0, 255] are rejected.
    pub fn from_samples<T: ToPrimitive>(
        samples: &[T],
        width: usize,
        height: usize,
        channels: usize,
    ) -> Result<Self, CodecError> {
        let mut converted = Vec::with_capacity(samples.len());
        for (index, sample) in samples.iter().enumerate() {
            match sample.to_u8() {
                Some(byte) => converted.push(byte),
                None => return Err(CodecError::SampleRange { index }),
            }
        }

        Raster::new(width, height, channels, converted)
    }

    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<u8> {
        self.samples
    }
}

impl ImmutableImage for Raster {
    type SampleT = u8;

    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn channels(&self) -> usize {
        self.channels
    }

    fn num_samples(&self) -> usize {
        self.samples.len()
    }

    fn sample(&self, row: usize, col: usize, channel: usize) -> Option<u8> {
        if row >= self.height || col >= self.width || channel >= self.channels {
            return None;
        }

        Some(self.samples[(row * self.width + col) * self.channels + channel])
    }
}

#[cfg(test)]
mod tests;
