//! Tests for the validation layer
//!
//! These tests verify:
//! - Rule tables per operation
//! - Rule messages
//! - Failed validation leaves the buffer untouched

use hotrod_codec::validation::{check, MAX_VINT, MAX_VLONG, NOT_NULL, NUMBER};
use hotrod_codec::{
    encode_bytes, encode_object, encode_string, encode_ubyte, encode_vint, encode_vlong, ByteBuf,
    ClientOptions, CodecError, EncodeOp, ValidationError, Value,
};

// =============================================================================
// Helper Functions
// =============================================================================

fn validation_kind(result: hotrod_codec::Result<usize>) -> ValidationError {
    match result {
        Err(CodecError::Validation(kind)) => kind,
        other => panic!("Expected validation error, got {:?}", other),
    }
}

fn assert_untouched(buf: &ByteBuf) {
    assert_eq!(buf.position(), 0);
    assert!(buf.as_slice().iter().all(|b| *b == 0));
}

// =============================================================================
// Rule Message Tests
// =============================================================================

#[test]
fn test_rule_messages() {
    assert_eq!(ValidationError::Null.to_string(), "must not be null");
    assert_eq!(ValidationError::NotNumber.to_string(), "must be a number");
    assert_eq!(ValidationError::Negative.to_string(), "must be >= 0");
    assert_eq!(ValidationError::ByteTooBig.to_string(), "must be less than 2^8");
    assert_eq!(ValidationError::IntTooBig.to_string(), "must be less than 2^31");
    assert_eq!(ValidationError::LongTooBig.to_string(), "must be less than 2^53");
    assert_eq!(
        ValidationError::NotStringOrNull.to_string(),
        "must be a String or null"
    );
}

#[test]
fn test_codec_error_wraps_rule() {
    let err = CodecError::from(ValidationError::Negative);
    assert_eq!(err.to_string(), "Validation error: must be >= 0");
}

#[test]
fn test_check_runs_in_order() {
    let rules = [NOT_NULL, NUMBER];
    assert_eq!(check(&rules, &Value::Null), Err(ValidationError::Null));
    assert_eq!(check(&rules, &Value::from("x")), Err(ValidationError::NotNumber));
    assert_eq!(check(&rules, &Value::Int(1)), Ok(()));
}

#[test]
fn test_rule_table_sizes() {
    assert_eq!(EncodeOp::UByte.validators().len(), 3);
    assert_eq!(EncodeOp::VInt.validators().len(), 3);
    assert_eq!(EncodeOp::VLong.validators().len(), 3);
    assert_eq!(EncodeOp::String.validators().len(), 1);
    assert_eq!(EncodeOp::Bytes.validators().len(), 1);
    assert_eq!(EncodeOp::Object.validators().len(), 1);
}

// =============================================================================
// Numeric Rule Tests
// =============================================================================

#[test]
fn test_negative_rejected_everywhere() {
    let mut buf = ByteBuf::with_capacity(8);
    assert_eq!(validation_kind(encode_ubyte(&mut buf, -1)), ValidationError::Negative);
    assert_eq!(validation_kind(encode_vint(&mut buf, -1)), ValidationError::Negative);
    assert_eq!(validation_kind(encode_vlong(&mut buf, -1)), ValidationError::Negative);
    assert_untouched(&buf);
}

#[test]
fn test_non_numeric_rejected_everywhere() {
    let mut buf = ByteBuf::with_capacity(8);
    assert_eq!(validation_kind(encode_ubyte(&mut buf, "5")), ValidationError::NotNumber);
    assert_eq!(validation_kind(encode_vint(&mut buf, Value::Null)), ValidationError::NotNumber);
    assert_eq!(
        validation_kind(encode_vlong(&mut buf, vec![1u8])),
        ValidationError::NotNumber
    );
    assert_untouched(&buf);
}

#[test]
fn test_ubyte_upper_bound() {
    let mut buf = ByteBuf::with_capacity(8);
    assert_eq!(validation_kind(encode_ubyte(&mut buf, 256)), ValidationError::ByteTooBig);
    assert_untouched(&buf);

    assert_eq!(encode_ubyte(&mut buf, 255).unwrap(), 1);
}

#[test]
fn test_vint_upper_bound() {
    let mut buf = ByteBuf::with_capacity(8);
    assert_eq!(
        validation_kind(encode_vint(&mut buf, MAX_VINT)),
        ValidationError::IntTooBig
    );
    assert_untouched(&buf);

    assert_eq!(encode_vint(&mut buf, MAX_VINT - 1).unwrap(), 5);
}

#[test]
fn test_vlong_upper_bound() {
    let mut buf = ByteBuf::with_capacity(8);
    assert_eq!(
        validation_kind(encode_vlong(&mut buf, MAX_VLONG)),
        ValidationError::LongTooBig
    );
    assert_eq!(
        validation_kind(encode_vlong(&mut buf, u64::MAX)),
        ValidationError::LongTooBig
    );
    assert_untouched(&buf);

    assert_eq!(encode_vlong(&mut buf, MAX_VLONG - 1).unwrap(), 8);
}

#[test]
fn test_failed_validation_keeps_earlier_bytes() {
    let mut buf = ByteBuf::with_capacity(8);
    encode_vint(&mut buf, 300).unwrap();

    assert!(encode_vint(&mut buf, -5).is_err());
    assert_eq!(buf.position(), 2);
    assert_eq!(buf.written(), &[0xAC, 0x02]);
}

// =============================================================================
// Presence / Type Rule Tests
// =============================================================================

#[test]
fn test_string_must_be_text_or_null() {
    let mut buf = ByteBuf::with_capacity(8);
    assert_eq!(
        validation_kind(encode_string(&mut buf, 7)),
        ValidationError::NotStringOrNull
    );
    assert_untouched(&buf);

    assert_eq!(encode_string(&mut buf, Value::Null).unwrap(), 1);
}

#[test]
fn test_bytes_must_not_be_null() {
    let mut buf = ByteBuf::with_capacity(8);
    assert_eq!(validation_kind(encode_bytes(&mut buf, Value::Null)), ValidationError::Null);
    assert_untouched(&buf);
}

#[test]
fn test_object_must_not_be_null() {
    let mut buf = ByteBuf::with_capacity(8);
    let options = ClientOptions::default();
    assert_eq!(
        validation_kind(encode_object(&mut buf, Value::Null, &options)),
        ValidationError::Null
    );
    assert_untouched(&buf);
}
