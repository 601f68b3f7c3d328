//! Value codec round-trips through the reference decoder: every scalar tag
//! and arrays of every non-array element type.

mod common;

use common::decoder::decode_value;
use gguf_forge::codec::put_value;
use gguf_forge::{MetaType, Value};
use proptest::prelude::*;

fn encode(value: &Value) -> Vec<u8> {
    let mut buf = Vec::new();
    put_value(&mut buf, value).unwrap();
    buf
}

fn assert_round_trip(value: Value) {
    let decoded = decode_value(&encode(&value), value.meta_type());
    assert_eq!(decoded, value);
}

/// Finite floats so equality is meaningful after the trip.
fn arb_f32() -> impl Strategy<Value = f32> {
    proptest::num::f32::NORMAL | proptest::num::f32::ZERO | proptest::num::f32::NEGATIVE
}

fn arb_f64() -> impl Strategy<Value = f64> {
    proptest::num::f64::NORMAL | proptest::num::f64::ZERO | proptest::num::f64::NEGATIVE
}

fn arb_scalar(elem_type: MetaType) -> BoxedStrategy<Value> {
    match elem_type {
        MetaType::Uint8 => any::<u8>().prop_map(Value::Uint8).boxed(),
        MetaType::Int8 => any::<i8>().prop_map(Value::Int8).boxed(),
        MetaType::Uint16 => any::<u16>().prop_map(Value::Uint16).boxed(),
        MetaType::Int16 => any::<i16>().prop_map(Value::Int16).boxed(),
        MetaType::Uint32 => any::<u32>().prop_map(Value::Uint32).boxed(),
        MetaType::Int32 => any::<i32>().prop_map(Value::Int32).boxed(),
        MetaType::Float32 => arb_f32().prop_map(Value::Float32).boxed(),
        MetaType::Bool => any::<bool>().prop_map(Value::Bool).boxed(),
        MetaType::String => "[a-zA-Z0-9_.\\- ]{0,24}".prop_map(Value::String).boxed(),
        MetaType::Uint64 => any::<u64>().prop_map(Value::Uint64).boxed(),
        MetaType::Int64 => any::<i64>().prop_map(Value::Int64).boxed(),
        MetaType::Float64 => arb_f64().prop_map(Value::Float64).boxed(),
        MetaType::Array => unreachable!("arrays are built in arb_array"),
    }
}

/// An array of any non-array element type, including empty.
fn arb_array() -> impl Strategy<Value = Value> {
    let elem_types = prop::sample::select(MetaType::SCALARS.to_vec());
    elem_types.prop_flat_map(|elem_type| {
        prop::collection::vec(arb_scalar(elem_type), 0..12)
            .prop_map(move |items| Value::Array(elem_type, items))
    })
}

proptest! {
    #[test]
    fn prop_uint8_round_trip(v in any::<u8>()) {
        assert_round_trip(Value::Uint8(v));
    }

    #[test]
    fn prop_int8_round_trip(v in any::<i8>()) {
        assert_round_trip(Value::Int8(v));
    }

    #[test]
    fn prop_uint16_round_trip(v in any::<u16>()) {
        assert_round_trip(Value::Uint16(v));
    }

    #[test]
    fn prop_int16_round_trip(v in any::<i16>()) {
        assert_round_trip(Value::Int16(v));
    }

    #[test]
    fn prop_uint32_round_trip(v in any::<u32>()) {
        assert_round_trip(Value::Uint32(v));
    }

    #[test]
    fn prop_int32_round_trip(v in any::<i32>()) {
        assert_round_trip(Value::Int32(v));
    }

    #[test]
    fn prop_float32_round_trip(v in arb_f32()) {
        assert_round_trip(Value::Float32(v));
    }

    #[test]
    fn prop_bool_round_trip(v in any::<bool>()) {
        assert_round_trip(Value::Bool(v));
    }

    #[test]
    fn prop_string_round_trip(s in ".*") {
        assert_round_trip(Value::String(s));
    }

    #[test]
    fn prop_uint64_round_trip(v in any::<u64>()) {
        assert_round_trip(Value::Uint64(v));
    }

    #[test]
    fn prop_int64_round_trip(v in any::<i64>()) {
        assert_round_trip(Value::Int64(v));
    }

    #[test]
    fn prop_float64_round_trip(v in arb_f64()) {
        assert_round_trip(Value::Float64(v));
    }

    /// Element order and count survive for arrays of every element type.
    #[test]
    fn prop_array_round_trip(value in arb_array()) {
        assert_round_trip(value);
    }
}
