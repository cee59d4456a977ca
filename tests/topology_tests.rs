use rps3_ai::topology::{
    adjacent, is_adjacent, is_valid, locate, Ring, CELL_COUNT, CENTER, INNER_START,
};

#[test]
fn test_outer_cell_neighbours() {
    assert_eq!(adjacent(0), vec![1, 17, 18]);
    assert_eq!(adjacent(5), vec![6, 4, 20]);
    assert_eq!(adjacent(8), vec![9, 7, 22]);
    // the outer ring wraps around
    assert_eq!(adjacent(17), vec![0, 16, 26]);
}

#[test]
fn test_inner_cell_neighbours() {
    assert_eq!(adjacent(18), vec![19, 26, 0, 1, CENTER]);
    assert_eq!(adjacent(22), vec![23, 21, 8, 9, CENTER]);
    assert_eq!(adjacent(26), vec![18, 25, 16, 17, CENTER]);
}

#[test]
fn test_center_neighbours() {
    let expected: Vec<usize> = (INNER_START..CENTER).collect();
    assert_eq!(adjacent(CENTER), expected);
    assert_eq!(adjacent(CENTER).len(), 9);
}

#[test]
fn test_off_board_cell_has_no_neighbours() {
    assert!(adjacent(CELL_COUNT).is_empty());
    assert!(adjacent(100).is_empty());
    assert!(!is_valid(CELL_COUNT));
    assert!(is_valid(CENTER));
}

#[test]
fn test_adjacency_is_symmetric() {
    for cell in 0..CELL_COUNT {
        for neighbour in adjacent(cell) {
            assert!(
                is_adjacent(neighbour, cell),
                "{neighbour} lists no edge back to {cell}"
            );
        }
    }
}

#[test]
fn test_no_cell_is_its_own_neighbour() {
    for cell in 0..CELL_COUNT {
        assert!(!adjacent(cell).contains(&cell));
    }
}

#[test]
fn test_locate_classifies_rings() {
    assert_eq!(locate(0), Some((Ring::Outer, 0)));
    assert_eq!(locate(17), Some((Ring::Outer, 17)));
    assert_eq!(locate(18), Some((Ring::Inner, 0)));
    assert_eq!(locate(26), Some((Ring::Inner, 8)));
    assert_eq!(locate(CENTER), Some((Ring::Center, 0)));
    assert_eq!(locate(CELL_COUNT), None);
    assert_eq!(Ring::Inner.label(), 'I');
}
