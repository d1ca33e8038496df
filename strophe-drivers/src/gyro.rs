//! Gyro frame decoding
//!
//! Pure conversion from the raw angular-rate register block of an
//! LSM6DS3-class IMU to a [`RotationSample`] in deg/s. The I2C transfer
//! itself lives in the firmware task; this module only interprets bytes,
//! which keeps the scaling testable on the host.

use strophe_core::motion::RotationSample;

/// Gyro full-scale range selection
///
/// Determines the per-LSB sensitivity applied when decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GyroScale {
    /// ±245 deg/s
    Dps245,
    /// ±500 deg/s
    Dps500,
    /// ±1000 deg/s
    Dps1000,
    /// ±2000 deg/s
    Dps2000,
}

impl GyroScale {
    /// Sensitivity in millidegrees per second per LSB
    pub fn sensitivity_mdps(self) -> f32 {
        match self {
            GyroScale::Dps245 => 8.75,
            GyroScale::Dps500 => 17.5,
            GyroScale::Dps1000 => 35.0,
            GyroScale::Dps2000 => 70.0,
        }
    }
}

/// Decode a 6-byte OUTX_L..OUTZ_H angular-rate block
///
/// Axes are little-endian i16 in x, y, z order.
pub fn decode_frame(raw: &[u8; 6], scale: GyroScale) -> RotationSample {
    let lsb_to_dps = scale.sensitivity_mdps() / 1000.0;
    let axis = |lo: u8, hi: u8| i16::from_le_bytes([lo, hi]) as f32 * lsb_to_dps;
    RotationSample {
        x: axis(raw[0], raw[1]),
        y: axis(raw[2], raw[3]),
        z: axis(raw[4], raw[5]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_frame_is_at_rest() {
        let sample = decode_frame(&[0; 6], GyroScale::Dps2000);
        assert_eq!(sample.x, 0.0);
        assert_eq!(sample.y, 0.0);
        assert_eq!(sample.z, 0.0);
        assert_eq!(sample.magnitude(), 0.0);
    }

    #[test]
    fn test_axis_order_and_endianness() {
        // x = 1 LSB, y = 256 LSB, z = -1 LSB
        let raw = [0x01, 0x00, 0x00, 0x01, 0xFF, 0xFF];
        let sample = decode_frame(&raw, GyroScale::Dps2000);
        assert!((sample.x - 0.07).abs() < 1e-4);
        assert!((sample.y - 17.92).abs() < 1e-3);
        assert!((sample.z + 0.07).abs() < 1e-4);
    }

    #[test]
    fn test_full_scale_reading() {
        let raw_max = i16::MAX.to_le_bytes();
        let raw = [raw_max[0], raw_max[1], 0, 0, 0, 0];
        let sample = decode_frame(&raw, GyroScale::Dps2000);
        // 32767 * 70 mdps ~ 2293.7 dps, slightly over nominal full scale
        assert!((sample.x - 2293.69).abs() < 0.1);
    }

    #[test]
    fn test_sensitivity_tracks_scale() {
        let raw = [0xE8, 0x03, 0, 0, 0, 0]; // 1000 LSB on x
        let narrow = decode_frame(&raw, GyroScale::Dps245);
        let wide = decode_frame(&raw, GyroScale::Dps2000);
        assert!((narrow.x - 8.75).abs() < 1e-3);
        assert!((wide.x - 70.0).abs() < 1e-3);
    }

    #[test]
    fn test_spin_above_activation_threshold_decodes_fast() {
        // ~600 dps on one axis at 2000 dps scale: 600 / 0.070 ~ 8571 LSB
        let raw_x = 8571i16.to_le_bytes();
        let raw = [raw_x[0], raw_x[1], 0, 0, 0, 0];
        let sample = decode_frame(&raw, GyroScale::Dps2000);
        assert!(sample.magnitude() > 520.0);
    }
}
