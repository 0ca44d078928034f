//! Tests for pixel block payloads

#[cfg(test)]
mod tests {
    use wavetile::spatial::tiles::{Rgba, TileBlock};

    const RED: Rgba = [255, 0, 0, 255];
    const BLUE: Rgba = [0, 0, 255, 255];

    fn checker() -> TileBlock {
        TileBlock::new(2, vec![RED, BLUE, BLUE, RED]).expect("2x2 block")
    }

    // Construction requires exactly size * size pixels
    #[test]
    fn test_new_validates_length() {
        assert!(TileBlock::new(2, vec![RED; 3]).is_none());
        assert!(TileBlock::new(0, Vec::new()).is_none());
        let block = checker();
        assert_eq!(block.size(), 2);
        assert_eq!(block.pixels().len(), 4);
    }

    // Pixels are addressed row-major
    #[test]
    fn test_pixel_lookup() {
        let block = checker();
        assert_eq!(block.pixel(1, 0), Some(BLUE));
        assert_eq!(block.pixel(1, 1), Some(RED));
        assert_eq!(block.pixel(2, 0), None);
        assert_eq!(TileBlock::single(BLUE).pixel(0, 0), Some(BLUE));
    }

    // Writing places the block at its origin and leaves the rest untouched
    #[test]
    fn test_write_into_buffer() {
        let mut buffer = vec![0u8; 4 * 4 * 4];
        checker().write_into(&mut buffer, 4, (2, 1));

        let at = |x: usize, y: usize| {
            let start = 4 * (y * 4 + x);
            buffer.get(start..start + 4).map(<[u8]>::to_vec)
        };
        assert_eq!(at(2, 1), Some(RED.to_vec()));
        assert_eq!(at(3, 1), Some(BLUE.to_vec()));
        assert_eq!(at(2, 2), Some(BLUE.to_vec()));
        assert_eq!(at(3, 2), Some(RED.to_vec()));
        assert_eq!(at(0, 0), Some(vec![0, 0, 0, 0]));
    }

    // Pixels outside the buffer are clipped instead of wrapping into the next row
    #[test]
    fn test_write_into_clips() {
        let mut buffer = vec![0u8; 3 * 3 * 4];
        checker().write_into(&mut buffer, 3, (2, 2));
        assert_eq!(buffer.get(32..36), Some(&RED[..]));
        assert_eq!(buffer.iter().filter(|&&byte| byte != 0).count(), 2);
    }
}
