//! Tests for the object codec
//!
//! These tests verify:
//! - Text and serialized variants share one length-prefixed layout
//! - The protobuf option alone selects the variant
//! - Incomplete objects are reported without error and can be retried
//! - The bincode marshaller round trip

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use hotrod_codec::{
    decode_object, encode_object, BincodeMarshaller, ByteBuf, ClientOptions, CodecError,
    Marshaller, Object, Value,
};

// =============================================================================
// Helper Functions
// =============================================================================

fn text_mode() -> ClientOptions {
    ClientOptions::default()
}

fn protobuf_mode() -> ClientOptions {
    ClientOptions::builder().protobuf(true).build()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Person {
    name: String,
    age: u32,
    tags: Vec<String>,
}

// =============================================================================
// Text Mode Tests
// =============================================================================

#[test]
fn test_text_object_ab() {
    let mut buf = ByteBuf::with_capacity(8);
    let end = encode_object(&mut buf, Object::text("ab"), &text_mode()).unwrap();

    assert_eq!(end, 3);
    assert_eq!(buf.written(), &[0x02, 0x61, 0x62]);
}

#[test]
fn test_plain_string_accepted_as_text_object() {
    let mut buf = ByteBuf::with_capacity(8);
    encode_object(&mut buf, "ab", &text_mode()).unwrap();
    assert_eq!(buf.written(), &[0x02, 0x61, 0x62]);
}

#[test]
fn test_text_object_round_trip() {
    let options = text_mode();
    let mut buf = ByteBuf::with_capacity(4);
    encode_object(&mut buf, Object::text("value-ü"), &options).unwrap();

    let mut buf = ByteBuf::from(buf.written().to_vec());
    let decoded = decode_object(&mut buf, &options).unwrap();
    assert_eq!(decoded, Some(Object::text("value-ü")));
    assert_eq!(buf.remaining(), 0);
}

#[test]
fn test_empty_text_object() {
    let options = text_mode();
    let mut buf = ByteBuf::from(vec![0x00]);
    assert_eq!(decode_object(&mut buf, &options).unwrap(), Some(Object::text("")));
    assert_eq!(buf.position(), 1);
}

// =============================================================================
// Protobuf Mode Tests
// =============================================================================

#[test]
fn test_opaque_object_round_trip() {
    let options = protobuf_mode();
    let payload = Bytes::from_static(&[0x0A, 0x03, b'b', b'o', b'b']);

    let mut buf = ByteBuf::with_capacity(2);
    encode_object(&mut buf, Object::Opaque(payload.clone()), &options).unwrap();
    assert_eq!(buf.written()[0], 5);
    assert_eq!(&buf.written()[1..], payload.as_ref());

    let mut buf = ByteBuf::from(buf.written().to_vec());
    assert_eq!(
        decode_object(&mut buf, &options).unwrap(),
        Some(Object::Opaque(payload))
    );
}

#[test]
fn test_same_bytes_decode_per_option() {
    let bytes = vec![0x02, b'h', b'i'];

    let mut buf = ByteBuf::from(bytes.clone());
    assert_eq!(
        decode_object(&mut buf, &text_mode()).unwrap(),
        Some(Object::text("hi"))
    );

    let mut buf = ByteBuf::from(bytes);
    assert_eq!(
        decode_object(&mut buf, &protobuf_mode()).unwrap(),
        Some(Object::Opaque(Bytes::from_static(b"hi")))
    );
}

#[test]
fn test_bincode_message_round_trip() {
    let options = protobuf_mode();
    let marshaller = BincodeMarshaller::<Person>::new();
    let person = Person {
        name: "Ada".to_string(),
        age: 36,
        tags: vec!["math".to_string(), "engines".to_string()],
    };

    let mut buf = options.new_buffer();
    let obj = Object::from_message(&marshaller, &person).unwrap();
    encode_object(&mut buf, obj, &options).unwrap();

    let mut buf = ByteBuf::from(buf.written().to_vec());
    let decoded = decode_object(&mut buf, &options).unwrap().unwrap();
    assert_eq!(decoded.to_message(&marshaller).unwrap(), person);
}

#[test]
fn test_marshaller_rejects_garbage() {
    let marshaller = BincodeMarshaller::<Person>::default();
    assert!(matches!(
        marshaller.unmarshal(&[0xFF]),
        Err(CodecError::Serialization(_))
    ));
}

#[test]
fn test_text_object_has_no_message() {
    let marshaller = BincodeMarshaller::<Person>::new();
    assert!(matches!(
        Object::text("x").to_message(&marshaller),
        Err(CodecError::UnsupportedType(_))
    ));
}

// =============================================================================
// Unsupported Type Tests
// =============================================================================

#[test]
fn test_text_rejected_in_protobuf_mode() {
    let mut buf = ByteBuf::with_capacity(8);
    let options = protobuf_mode();

    assert!(matches!(
        encode_object(&mut buf, Object::text("ab"), &options),
        Err(CodecError::UnsupportedType(_))
    ));
    assert!(matches!(
        encode_object(&mut buf, "ab", &options),
        Err(CodecError::UnsupportedType(_))
    ));
    assert_eq!(buf.position(), 0);
}

#[test]
fn test_opaque_rejected_in_text_mode() {
    let mut buf = ByteBuf::with_capacity(8);
    let obj = Object::Opaque(Bytes::from_static(b"raw"));

    assert!(matches!(
        encode_object(&mut buf, obj, &text_mode()),
        Err(CodecError::UnsupportedType(_))
    ));
    assert_eq!(buf.position(), 0);
}

#[test]
fn test_non_object_values_rejected() {
    let mut buf = ByteBuf::with_capacity(8);
    for value in [Value::Int(1), Value::Bytes(Bytes::from_static(b"x"))] {
        assert!(matches!(
            encode_object(&mut buf, value, &text_mode()),
            Err(CodecError::UnsupportedType(_))
        ));
    }
    assert_eq!(buf.position(), 0);
}

// =============================================================================
// Incomplete Decode Tests
// =============================================================================

#[test]
fn test_incomplete_object_is_not_an_error() {
    let mut buf = ByteBuf::from(vec![0x0A, 1, 2, 3]);
    assert_eq!(decode_object(&mut buf, &protobuf_mode()).unwrap(), None);
}

#[test]
fn test_incomplete_object_restores_cursor() {
    let mut buf = ByteBuf::from(vec![0x0A, b'a', b'b', b'c']);
    assert_eq!(decode_object(&mut buf, &text_mode()).unwrap(), None);
    assert_eq!(buf.position(), 0);
}

#[test]
fn test_incomplete_object_retry_after_more_bytes() {
    let options = text_mode();
    let mut buf = ByteBuf::from(vec![0x0A, b'0', b'1', b'2']);
    assert_eq!(decode_object(&mut buf, &options).unwrap(), None);

    buf.extend_from_slice(b"3456789");
    assert_eq!(
        decode_object(&mut buf, &options).unwrap(),
        Some(Object::text("0123456789"))
    );
    assert_eq!(buf.remaining(), 0);
}

#[test]
fn test_missing_prefix_is_an_error() {
    let mut buf = ByteBuf::from(Vec::new());
    assert!(matches!(
        decode_object(&mut buf, &text_mode()),
        Err(CodecError::Underflow { .. })
    ));
}

#[test]
fn test_invalid_utf8_object() {
    let mut buf = ByteBuf::from(vec![0x01, 0xFF]);
    assert!(matches!(
        decode_object(&mut buf, &text_mode()),
        Err(CodecError::InvalidUtf8(_))
    ));
    assert_eq!(buf.position(), 0);
}
