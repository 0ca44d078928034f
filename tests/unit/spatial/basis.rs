//! Tests for direction tables and opposite lookup

#[cfg(test)]
mod tests {
    use wavetile::spatial::basis::Basis;

    // Every opposite must point back along the negated vector
    #[test]
    fn test_opposites_negate_vectors() {
        for basis in [Basis::CARDINAL, Basis::CARDINAL_WITH_DIAGONALS] {
            for (direction, vector, opposite) in basis.iter() {
                let back = basis.vector(opposite).expect("opposite in range");
                assert_eq!(back, [-vector[0], -vector[1]], "direction {direction}");
                assert_eq!(basis.opposite(opposite), Some(direction));
            }
        }
    }

    // Cardinal order is right, down, left, up
    #[test]
    fn test_cardinal_order() {
        let basis = Basis::CARDINAL;
        assert_eq!(basis.num_directions(), 4);
        assert_eq!(basis.vector(0), Some([1, 0]));
        assert_eq!(basis.vector(1), Some([0, 1]));
        assert_eq!(basis.vector(2), Some([-1, 0]));
        assert_eq!(basis.vector(3), Some([0, -1]));
    }

    // The diagonal basis extends the cardinal one without reordering it
    #[test]
    fn test_diagonal_prefix_matches_cardinal() {
        let diagonal = Basis::CARDINAL_WITH_DIAGONALS;
        assert_eq!(diagonal.num_directions(), 8);
        for (direction, vector, opposite) in Basis::CARDINAL.iter() {
            assert_eq!(diagonal.vector(direction), Some(vector));
            assert_eq!(diagonal.opposite(direction), Some(opposite));
        }
        assert_eq!(diagonal.vector(4), Some([1, 1]));
    }

    // Out-of-range directions yield nothing
    #[test]
    fn test_out_of_range_direction() {
        let basis = Basis::default();
        assert_eq!(basis, Basis::CARDINAL);
        assert_eq!(basis.vector(4), None);
        assert_eq!(basis.opposite(4), None);
        assert_eq!(basis.iter().count(), 4);
    }
}
