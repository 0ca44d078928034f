//! Tests for packed per-cell domains

#[cfg(test)]
mod tests {
    use wavetile::algorithm::bitset::DomainBitset;

    // New domains are empty until filled
    #[test]
    fn test_new_and_fill() {
        let mut domains = DomainBitset::new(3, 4);
        assert_eq!(domains.num_cells(), 3);
        assert_eq!(domains.num_symbols(), 4);
        assert_eq!(domains.count(1), 0);
        assert_eq!(domains.first(1), None);

        domains.fill();
        assert_eq!(domains.count(1), 4);
        assert_eq!(domains.iter(2).collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    }

    // Removal reports whether the symbol was present
    #[test]
    fn test_remove_once() {
        let mut domains = DomainBitset::new(2, 3);
        domains.fill();

        assert!(domains.remove(1, 0));
        assert!(!domains.remove(1, 0));
        assert!(!domains.contains(1, 0));
        assert!(domains.contains(0, 0));
        assert_eq!(domains.first(1), Some(1));
        assert_eq!(domains.count(1), 2);
    }

    // Rows are independent and out-of-range symbols never leak into neighbors
    #[test]
    fn test_rows_are_isolated() {
        let mut domains = DomainBitset::new(2, 3);
        domains.fill();

        assert!(!domains.remove(0, 3));
        assert!(!domains.contains(0, 3));
        assert_eq!(domains.count(1), 3);
        assert_eq!(domains.count(5), 0);
        assert!(!domains.remove(5, 0));
    }

    // Display summarizes the shape and admissible total
    #[test]
    fn test_display() {
        let mut domains = DomainBitset::new(2, 2);
        domains.fill();
        domains.remove(0, 1);
        assert_eq!(
            domains.to_string(),
            "DomainBitset(2 cells x 2 symbols, 3 admissible)"
        );
    }
}
