use ods_records::common::errors::AppError;
use ods_records::ods::cell_address::{
    column_letters_to_number, column_number_to_letters, CellAddress, Column,
};
use serde_json::json;

#[test]
fn letters_convert_as_base_26_without_zero() {
    assert_eq!(column_letters_to_number("A").expect("A"), 1);
    assert_eq!(column_letters_to_number("Z").expect("Z"), 26);
    assert_eq!(column_letters_to_number("AA").expect("AA"), 27);
    assert_eq!(column_letters_to_number("AZ").expect("AZ"), 52);
    assert_eq!(column_letters_to_number("BA").expect("BA"), 53);
    assert_eq!(column_letters_to_number("ZZ").expect("ZZ"), 702);
    assert_eq!(column_letters_to_number("AAA").expect("AAA"), 703);
}

#[test]
fn letters_are_case_insensitive() {
    assert_eq!(column_letters_to_number("ab").expect("ab"), 28);
}

#[test]
fn every_code_up_to_zz_round_trips() {
    for number in 1..=702 {
        let letters = column_number_to_letters(number);
        assert!(letters.len() <= 2, "{number} -> {letters}");
        assert_eq!(column_letters_to_number(&letters).expect("letters"), number);
    }
}

#[test]
fn bad_letter_codes_are_rejected() {
    for input in ["", "A1", "-", "É"] {
        let err = column_letters_to_number(input).expect_err("invalid");
        assert!(matches!(err, AppError::InvalidColumn(_)), "{input:?}");
    }
}

#[test]
fn column_parses_letters_or_index() {
    assert_eq!(Column::parse("C").expect("letters").number(), 3);
    assert_eq!(Column::parse("3").expect("index").letters(), "C");
    assert_eq!(Column::parse(" aa ").expect("padded").number(), 27);
    assert!(Column::parse("0").is_err());
    assert!(Column::from_number(0).is_err());
}

#[test]
fn column_offset_is_zero_based() {
    let column = Column::from_letters("B").expect("B");
    assert_eq!(column.offset(), 1);
    assert_eq!(column.to_string(), "B");
}

#[test]
fn column_deserializes_from_string_or_number() {
    let letters: Column = serde_json::from_value(json!("AB")).expect("letters");
    assert_eq!(letters.number(), 28);
    let index: Column = serde_json::from_value(json!(2)).expect("index");
    assert_eq!(index.letters(), "B");
    assert!(serde_json::from_value::<Column>(json!(0)).is_err());
    assert!(serde_json::from_value::<Column>(json!(-1)).is_err());
    assert!(serde_json::from_value::<Column>(json!(true)).is_err());
}

#[test]
fn column_serializes_as_letters() {
    let column = Column::from_number(28).expect("28");
    assert_eq!(serde_json::to_value(column).expect("json"), json!("AB"));
}

#[test]
fn parse_and_format_cell_address() {
    let a1 = CellAddress::parse("C12").expect("valid address");
    assert_eq!(a1.row, 11);
    assert_eq!(a1.col, 2);
    assert_eq!(a1.to_a1(), "C12");

    let wide = CellAddress::parse("AA10").expect("wide");
    assert_eq!(wide.col, 26);
}

#[test]
fn invalid_cell_addresses_are_rejected() {
    for input in ["12A", "A0", "A", "", "A1B"] {
        let err = CellAddress::parse(input).expect_err("invalid");
        assert!(matches!(err, AppError::InvalidCellAddress(_)), "{input:?}");
    }
}
