use treevec::VectorError;
use treevec::vector::{format_vector, num_leaves, parse_vector, validate};

#[test]
fn test_num_leaves_from_length() {
    assert_eq!(num_leaves(&[]), 1);
    assert_eq!(num_leaves(&[0]), 2);
    assert_eq!(num_leaves(&[0, 1, -2]), 4);
}

#[test]
fn test_validate_accepts_boundary_values() {
    validate(&[]).unwrap();
    validate(&[0, -1, 2, -3, 4]).unwrap();
    validate(&[0, 1, 2, 3, 4]).unwrap();
    validate(&[0, -1, -2, -3, -4]).unwrap();
}

#[test]
fn test_validate_reports_first_violation() {
    assert_eq!(
        validate(&[0, 2, 9]),
        Err(VectorError::OutOfRange {
            index: 1,
            bound: 1,
            value: 2,
        })
    );
}

#[test]
fn test_format_round_trips_through_parse() {
    for vector in [vec![], vec![0], vec![0, 1, -2, 3]] {
        assert_eq!(parse_vector(&format_vector(&vector)).unwrap(), vector);
    }
}

#[test]
fn test_parse_tolerates_whitespace() {
    assert_eq!(parse_vector(" 0 , 1 , -2 ").unwrap(), vec![0, 1, -2]);
    assert_eq!(parse_vector("  ").unwrap(), Vec::<i32>::new());
}

#[test]
fn test_parse_rejects_malformed_entries() {
    assert_eq!(
        parse_vector("0,x"),
        Err(VectorError::Unparsable("x".to_string()))
    );
    assert!(parse_vector("0,,1").is_err());
    assert!(parse_vector("0 1").is_err());
}

#[test]
fn test_parse_rejects_out_of_range() {
    assert!(matches!(
        parse_vector("0,7"),
        Err(VectorError::OutOfRange { index: 1, .. })
    ));
}
