//! Tests for the generation driver and output expansion

#[cfg(test)]
mod tests {
    use ndarray::Array2;
    use wavetile::AlgorithmError;
    use wavetile::algorithm::executor::{Model, OutputConfig, RandomSelector};
    use wavetile::algorithm::wave::IterationResult;
    use wavetile::analysis::alphabet::ExtractionMode;
    use wavetile::analysis::patterns::SourceImage;
    use wavetile::io::configuration::MAX_GRID_DIMENSION;
    use wavetile::spatial::basis::Basis;
    use wavetile::spatial::tiles::Rgba;

    const RED: Rgba = [255, 0, 0, 255];
    const GREEN: Rgba = [0, 255, 0, 255];
    const BLUE: Rgba = [0, 0, 255, 255];

    fn source(rows: &[&[Rgba]]) -> SourceImage {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.len());
        let pixels: Vec<Rgba> = rows.iter().flat_map(|row| row.iter().copied()).collect();
        let array = Array2::from_shape_vec((height, width), pixels).expect("rectangular rows");
        SourceImage::from_array(array).expect("non-empty source")
    }

    fn output(width: usize, height: usize, periodic: bool) -> OutputConfig {
        OutputConfig {
            width,
            height,
            periodic,
        }
    }

    fn pixel_model(image: &SourceImage, source_periodic: bool, out: OutputConfig) -> Model {
        Model::from_source(
            image,
            ExtractionMode::Pixel,
            Basis::CARDINAL,
            source_periodic,
            out,
        )
        .expect("valid model")
    }

    // A one-color source always succeeds and paints every pixel
    #[test]
    fn test_single_symbol_generation() {
        let image = source(&[&[RED, RED], &[RED, RED]]);
        let mut model = pixel_model(&image, true, output(4, 4, true));
        let mut selector = RandomSelector::new(1);
        let mut rng = || selector.uniform();

        assert!(model.generate(&mut rng).expect("generation runs"));
        assert!(model.is_generation_complete());
        assert_eq!(model.observed(), Some(&[0; 16][..]));

        let mut buffer = vec![0u8; 4 * 4 * 4];
        model
            .put_generated_data(&mut buffer)
            .expect("buffer is large enough");
        assert!(buffer.chunks_exact(4).all(|pixel| pixel == RED));
    }

    // Output is unavailable until an attempt succeeds
    #[test]
    fn test_put_generated_data_requires_success() {
        let image = source(&[&[RED, GREEN]]);
        let mut model = pixel_model(&image, true, output(4, 2, true));
        let mut buffer = vec![0u8; 4 * 2 * 4];

        assert!(matches!(
            model.put_generated_data(&mut buffer),
            Err(AlgorithmError::GenerationIncomplete)
        ));

        let mut rng = || 0.3;
        assert!(model.generate(&mut rng).expect("generation runs"));
        model.clear().expect("clear succeeds");
        assert!(!model.is_generation_complete());
        assert!(model.observed().is_none());
        assert!(matches!(
            model.put_generated_data(&mut buffer),
            Err(AlgorithmError::GenerationIncomplete)
        ));
    }

    // Short buffers are rejected without writing
    #[test]
    fn test_put_generated_data_checks_buffer() {
        let image = source(&[&[RED]]);
        let mut model = pixel_model(&image, true, output(3, 3, false));
        let mut rng = || 0.5;
        assert!(model.generate(&mut rng).expect("generation runs"));

        let mut buffer = vec![0u8; 3 * 3 * 4 - 1];
        assert!(matches!(
            model.put_generated_data(&mut buffer),
            Err(AlgorithmError::InvalidParameter { .. })
        ));
        assert!(buffer.iter().all(|&byte| byte == 0));
    }

    // Output sizes outside 1..=MAX_GRID_DIMENSION are rejected
    #[test]
    fn test_output_validation() {
        let image = source(&[&[RED]]);
        for out in [
            output(0, 4, true),
            output(4, 0, false),
            output(MAX_GRID_DIMENSION + 1, 1, true),
        ] {
            let result =
                Model::from_source(&image, ExtractionMode::Pixel, Basis::CARDINAL, true, out);
            assert!(result.is_err());
        }
    }

    // Tile payloads scale the output in pixels
    #[test]
    fn test_tile_output_dimensions() {
        let image = source(&[&[RED, RED, BLUE, BLUE], &[RED, RED, BLUE, BLUE]]);
        let mut model = Model::from_source(
            &image,
            ExtractionMode::NonOverlapping { tile_size: 2 },
            Basis::CARDINAL,
            true,
            output(4, 2, true),
        )
        .expect("valid model");
        assert_eq!(model.output_dimensions(), (8, 4));

        let mut rng = || 0.1;
        assert!(model.generate(&mut rng).expect("generation runs"));
        let mut buffer = vec![0u8; 8 * 4 * 4];
        model
            .put_generated_data(&mut buffer)
            .expect("buffer is large enough");

        let pixel = |x: usize, y: usize| {
            let start = 4 * (y * 8 + x);
            buffer.get(start..start + 4)
        };
        // Every 2x2 cell is uniform and horizontally adjacent cells differ
        for cy in 0..2 {
            for cx in 0..4 {
                let corner = pixel(2 * cx, 2 * cy);
                assert_eq!(pixel(2 * cx + 1, 2 * cy), corner);
                assert_eq!(pixel(2 * cx, 2 * cy + 1), corner);
                assert_eq!(pixel(2 * cx + 1, 2 * cy + 1), corner);
                assert_ne!(pixel((2 * cx + 2) % 8, 2 * cy), corner);
            }
        }
    }

    // The wave is allocated on first use and iteration drives it to completion
    #[test]
    fn test_iterate_initializes_lazily() {
        let image = source(&[&[RED, RED, GREEN]]);
        let mut model = pixel_model(&image, true, output(6, 2, true));
        assert!(model.wave().is_none());

        let mut selector = RandomSelector::new(3);
        let mut rng = || selector.uniform();
        let mut steps = 0;
        let result = loop {
            let result = model.iterate(&mut rng).expect("iteration runs");
            if result != IterationResult::Ongoing {
                break result;
            }
            steps += 1;
        };

        assert!(model.wave().is_some());
        assert_eq!(result, IterationResult::Success);
        assert!(steps <= 12 * model.alphabet().num_symbols());
        assert!(model.is_generation_complete());
    }

    // A source whose rows can only stack in one order fails on a periodic output
    #[test]
    fn test_unsatisfiable_output_fails() {
        let image = source(&[&[RED, RED], &[BLUE, BLUE]]);
        let mut model = pixel_model(&image, false, output(4, 2, true));
        let mut rng = || 0.5;

        assert!(!model.generate(&mut rng).expect("generation runs"));
        assert!(!model.is_generation_complete());
        assert_eq!(
            model
                .generate_with_retries(&mut rng, 3)
                .expect("generation runs"),
            None
        );
    }

    // The same source is forced into one layout on a bounded output
    #[test]
    fn test_bounded_output_respects_edges() {
        let image = source(&[&[RED, RED], &[BLUE, BLUE]]);
        let mut model = pixel_model(&image, false, output(4, 2, false));
        let mut rng = || 0.5;

        assert_eq!(
            model
                .generate_with_retries(&mut rng, 3)
                .expect("generation runs"),
            Some(1)
        );
        assert_eq!(model.observed(), Some(&[0, 0, 0, 0, 1, 1, 1, 1][..]));
    }
}
