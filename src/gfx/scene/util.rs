use cgmath::Vector4;

/// Unpacks a `0x00BBGGRR` colour into normalised RGBA with full alpha.
pub fn colour_from_rgb(clr: u32) -> Vector4<f32> {
    Vector4::new(
        (clr & 0xFF) as f32 / 255.0,
        ((clr >> 8) & 0xFF) as f32 / 255.0,
        ((clr >> 16) & 0xFF) as f32 / 255.0,
        1.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_red_is_low_byte() {
        assert_eq!(colour_from_rgb(0x0000_00FF), Vector4::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(colour_from_rgb(0x00FF_0000), Vector4::new(0.0, 0.0, 1.0, 1.0));
    }

    #[test]
    fn test_high_byte_ignored() {
        assert_eq!(colour_from_rgb(0xFF00_FF00), Vector4::new(0.0, 1.0, 0.0, 1.0));
    }
}
