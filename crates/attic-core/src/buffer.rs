//! Audio block abstraction for plugin processing.
//!
//! [`Buffer`] pairs the host's input channel slices with its output channel
//! slices for one processing block. DSP runs in place on the outputs after
//! the inputs have been copied across.
//!
//! # Real-Time Safety
//!
//! All storage is fixed-size and lives on the stack. No heap allocations
//! occur during construction or use.
//!
//! # Example
//!
//! ```
//! use attic_core::Buffer;
//!
//! let input = [0.5f32; 4];
//! let mut left = [9.0f32; 4];
//! let mut right = [9.0f32; 4];
//!
//! let mut buffer = Buffer::new([&input[..]], [&mut left[..], &mut right[..]], 4);
//! buffer.clear_unused_outputs();
//! buffer.copy_to_output();
//! drop(buffer);
//!
//! assert_eq!(left, [0.5; 4]);
//! assert_eq!(right, [0.0; 4]);
//! ```

use crate::sample::Sample;
use crate::types::MAX_CHANNELS;

/// Main audio buffer for one processing block.
///
/// `S` is the sample type, defaulting to `f32`.
///
/// The `'a` lifetime ties the buffer to the host's audio data. Buffers are
/// only valid within a single block call.
pub struct Buffer<'a, S: Sample = f32> {
    /// Input channel slices (immutable audio from host)
    inputs: [Option<&'a [S]>; MAX_CHANNELS],
    /// Output channel slices (mutable audio to host)
    outputs: [Option<&'a mut [S]>; MAX_CHANNELS],
    num_input_channels: usize,
    num_output_channels: usize,
    num_samples: usize,
}

impl<'a, S: Sample> Buffer<'a, S> {
    /// Create a new buffer from channel slices.
    ///
    /// Channels beyond [`MAX_CHANNELS`] are silently ignored. `num_samples`
    /// is clamped to the shortest slice so channel access never goes out of
    /// bounds.
    #[inline]
    pub fn new(
        inputs: impl IntoIterator<Item = &'a [S]>,
        outputs: impl IntoIterator<Item = &'a mut [S]>,
        num_samples: usize,
    ) -> Self {
        let mut num_samples = num_samples;

        let mut input_arr: [Option<&'a [S]>; MAX_CHANNELS] = [None; MAX_CHANNELS];
        let mut num_input_channels = 0;
        for (i, slice) in inputs.into_iter().take(MAX_CHANNELS).enumerate() {
            num_samples = num_samples.min(slice.len());
            input_arr[i] = Some(slice);
            num_input_channels = i + 1;
        }

        // Can't use [None; N] for &mut because it's not Copy
        let mut output_arr: [Option<&'a mut [S]>; MAX_CHANNELS] = std::array::from_fn(|_| None);
        let mut num_output_channels = 0;
        for (i, slice) in outputs.into_iter().take(MAX_CHANNELS).enumerate() {
            num_samples = num_samples.min(slice.len());
            output_arr[i] = Some(slice);
            num_output_channels = i + 1;
        }

        Self {
            inputs: input_arr,
            outputs: output_arr,
            num_input_channels,
            num_output_channels,
            num_samples,
        }
    }

    /// Number of samples in this processing block.
    #[inline]
    pub fn num_samples(&self) -> usize {
        self.num_samples
    }

    /// Number of output channels.
    #[inline]
    pub fn num_output_channels(&self) -> usize {
        self.num_output_channels
    }

    /// Get a mutable output channel by index.
    ///
    /// Returns `None` if the channel doesn't exist.
    #[inline]
    pub fn output(&mut self, channel: usize) -> Option<&mut [S]> {
        let n = self.num_samples;
        self.outputs
            .get_mut(channel)
            .and_then(|opt| opt.as_mut())
            .map(|ch| &mut ch[..n])
    }

    /// Copy all input channels to output channels.
    ///
    /// Only copies channels that exist in both input and output.
    pub fn copy_to_output(&mut self) {
        let num_channels = self.num_input_channels.min(self.num_output_channels);
        let n = self.num_samples;
        for ch in 0..num_channels {
            if let (Some(input), Some(output)) = (self.inputs[ch].as_ref(), self.outputs[ch].as_mut()) {
                output[..n].copy_from_slice(&input[..n]);
            }
        }
    }

    /// Zero every output channel that has no matching input channel.
    ///
    /// Hosts may hand over more output than input channels, and the extra
    /// outputs hold whatever was left in memory.
    pub fn clear_unused_outputs(&mut self) {
        let n = self.num_samples;
        let first_unused = self.num_input_channels.min(self.num_output_channels);
        for opt in self.outputs[first_unused..self.num_output_channels].iter_mut() {
            if let Some(output) = opt.as_mut() {
                output[..n].fill(S::ZERO);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_num_samples_clamped_to_shortest_slice() {
        let input = [1.0f32; 8];
        let mut output = [0.0f32; 4];
        let buffer = Buffer::new([&input[..]], [&mut output[..]], 16);
        assert_eq!(buffer.num_samples(), 4);
    }

    #[test]
    fn test_clear_unused_outputs_leaves_paired_channels() {
        let input = [0.25f64; 3];
        let mut out0 = [7.0f64; 3];
        let mut out1 = [7.0f64; 3];
        let mut out2 = [7.0f64; 3];

        let mut buffer = Buffer::new(
            [&input[..]],
            [&mut out0[..], &mut out1[..], &mut out2[..]],
            3,
        );
        buffer.clear_unused_outputs();
        drop(buffer);

        assert_eq!(out0, [7.0; 3]);
        assert_eq!(out1, [0.0; 3]);
        assert_eq!(out2, [0.0; 3]);
    }

    #[test]
    fn test_outputs_without_inputs_are_cleared_not_copied() {
        let mut out = [5.0f32; 2];
        let mut buffer: Buffer<f32> = Buffer::new(std::iter::empty(), [&mut out[..]], 2);
        assert_eq!(buffer.num_output_channels(), 1);
        assert!(buffer.output(1).is_none());
        buffer.copy_to_output();
        assert_eq!(buffer.output(0).unwrap(), &[5.0, 5.0][..]);
        buffer.clear_unused_outputs();
        drop(buffer);
        assert_eq!(out, [0.0; 2]);
    }
}
