use datastore_sqlite::{Discard, Extraction, FirstOrNone, RowSequence, Whole};

fn rows(values: &[i64]) -> RowSequence<i64> {
    values.iter().copied().collect()
}

#[test]
fn whole_returns_sequence_unchanged() {
    assert_eq!(Whole.extract(rows(&[1, 2, 3, 4])), rows(&[1, 2, 3, 4]));
    assert!(Whole.extract(rows(&[])).is_empty());
}

#[test]
fn first_or_none_takes_row_zero() {
    assert_eq!(FirstOrNone.extract(rows(&[1, 2, 3, 4])), Some(1));
    assert_eq!(FirstOrNone.extract(rows(&[])), None);
}

#[test]
fn discard_ignores_rows() {
    let () = Discard.extract(rows(&[1, 2]));
    let () = Discard.extract(rows(&[]));
}

#[test]
fn row_sequence_indexed_access() {
    let seq = rows(&[7, 8, 9]);
    assert_eq!(seq.len(), 3);
    assert_eq!(seq.get(1), Some(&8));
    assert_eq!(seq.get(3), None);
    assert_eq!(seq.first(), Some(&7));
    assert_eq!(seq.into_vec(), vec![7, 8, 9]);
}
