//! Block decimation of gridded radar data.
//!
//! Frames are loaded at a fixed reduction factor before rendering; the
//! block reduction method should match the data. Reflectivity uses Max so
//! storm cores survive decimation.

use serde::{Deserialize, Serialize};

/// Method used to reduce each N x N block to one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DownsampleMethod {
    /// Average of the block - continuous fields (temperature, humidity).
    Mean,
    /// Maximum of the block - preserves peaks (reflectivity, precipitation).
    #[default]
    Max,
    /// Top-left value of the block - fast, preserves exact values.
    Nearest,
}

/// Downsample a 2-D grid by an integer factor.
///
/// Output dimensions are the input dimensions divided by `factor`, rounded
/// down. A factor of 1 copies the input. NaN cells are ignored by Mean and
/// Max; a block of all NaN stays NaN.
pub fn downsample(
    data: &[f32],
    width: usize,
    height: usize,
    factor: usize,
    method: DownsampleMethod,
) -> (Vec<f32>, usize, usize) {
    let factor = factor.max(1);
    if factor == 1 {
        return (data.to_vec(), width, height);
    }

    let new_width = width / factor;
    let new_height = height / factor;
    if new_width == 0 || new_height == 0 {
        return (vec![], 0, 0);
    }

    let mut output = vec![f32::NAN; new_width * new_height];

    for out_y in 0..new_height {
        for out_x in 0..new_width {
            let y0 = out_y * factor;
            let x0 = out_x * factor;

            let mut acc = 0.0f32;
            let mut max = f32::NEG_INFINITY;
            let mut count = 0usize;

            for y in y0..y0 + factor {
                for x in x0..x0 + factor {
                    let v = data.get(y * width + x).copied().unwrap_or(f32::NAN);
                    if v.is_nan() {
                        continue;
                    }
                    acc += v;
                    if v > max {
                        max = v;
                    }
                    count += 1;
                }
            }

            output[out_y * new_width + out_x] = match method {
                DownsampleMethod::Nearest => data
                    .get(y0 * width + x0)
                    .copied()
                    .unwrap_or(f32::NAN),
                _ if count == 0 => f32::NAN,
                DownsampleMethod::Mean => acc / count as f32,
                DownsampleMethod::Max => max,
            };
        }
    }

    (output, new_width, new_height)
}

/// Decimate a coordinate axis to match [`downsample`]: keep the first
/// coordinate of each block, truncated to the reduced length.
pub fn downsample_axis(axis: &[f64], factor: usize) -> Vec<f64> {
    let factor = factor.max(1);
    let new_len = axis.len() / factor;
    axis.iter()
        .step_by(factor)
        .take(new_len)
        .copied()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_downsample_mean() {
        // 4x4 grid with values 1-16
        let data: Vec<f32> = (1..=16).map(|x| x as f32).collect();
        let (result, w, h) = downsample(&data, 4, 4, 2, DownsampleMethod::Mean);

        assert_eq!((w, h), (2, 2));
        // top-left 2x2 block: 1,2,5,6 -> mean 3.5
        assert!((result[0] - 3.5).abs() < 0.001);
        // top-right 2x2 block: 3,4,7,8 -> mean 5.5
        assert!((result[1] - 5.5).abs() < 0.001);
    }

    #[test]
    fn test_downsample_max() {
        let data: Vec<f32> = (1..=16).map(|x| x as f32).collect();
        let (result, _, _) = downsample(&data, 4, 4, 2, DownsampleMethod::Max);

        assert!((result[0] - 6.0).abs() < 0.001);
        assert!((result[3] - 16.0).abs() < 0.001);
    }

    #[test]
    fn test_downsample_factor_four() {
        let data: Vec<f32> = (0..64).map(|x| x as f32).collect();
        let (result, w, h) = downsample(&data, 8, 8, 4, DownsampleMethod::Nearest);

        assert_eq!((w, h), (2, 2));
        assert_eq!(result, vec![0.0, 4.0, 32.0, 36.0]);
    }

    #[test]
    fn test_downsample_factor_one_is_copy() {
        let data = vec![1.0, 2.0, 3.0, 4.0];
        let (result, w, h) = downsample(&data, 2, 2, 1, DownsampleMethod::Max);
        assert_eq!((w, h), (2, 2));
        assert_eq!(result, data);
    }

    #[test]
    fn test_downsample_handles_nan() {
        let data = vec![1.0, f32::NAN, 3.0, 4.0];
        let (result, _, _) = downsample(&data, 2, 2, 2, DownsampleMethod::Mean);
        // mean of 1, 3, 4 ignoring the NaN
        assert!((result[0] - 8.0 / 3.0).abs() < 0.01);

        let all_nan = vec![f32::NAN; 4];
        let (result, _, _) = downsample(&all_nan, 2, 2, 2, DownsampleMethod::Max);
        assert!(result[0].is_nan());
    }

    #[test]
    fn test_downsample_too_small() {
        let data = vec![1.0, 2.0];
        let (result, w, h) = downsample(&data, 2, 1, 4, DownsampleMethod::Max);
        assert!(result.is_empty());
        assert_eq!((w, h), (0, 0));
    }

    #[test]
    fn test_downsample_axis() {
        let axis: Vec<f64> = (0..8).map(|i| -125.0 + i as f64).collect();
        let reduced = downsample_axis(&axis, 4);
        assert_eq!(reduced, vec![-125.0, -121.0]);
        assert_eq!(downsample_axis(&axis, 1), axis);
    }
}
