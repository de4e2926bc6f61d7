//! Canonical on-disk text: object keys in codepoint order, four-space indent.
//!
//! The document is first lifted into a [`serde_json::Value`], whose object map
//! keeps keys sorted, so struct field order and `HashMap` iteration order never
//! leak into the file. Saving the same document twice gives the same bytes.
//!
//! Lifting into a `Value` maps NaN and infinities to `null`, so floats are
//! checked beforehand; a non-finite float has no JSON form and fails the
//! serialization instead.

use crate::error::{Result, StoreError};
use serde::ser::{self, Error as _};
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

const INDENT: &[u8] = b"    ";

pub fn to_canonical_string<T: Serialize + ?Sized>(data: &T) -> Result<String> {
    data.serialize(FiniteCheck)?;
    let value = serde_json::to_value(data)?;

    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut ser)?;

    String::from_utf8(buf)
        .map_err(|e| StoreError::Command(format!("serializer produced invalid UTF-8: {}", e)))
}

type CheckResult = std::result::Result<(), serde_json::Error>;

/// Walks a value without producing output, failing on NaN or infinity.
struct FiniteCheck;

fn finite(is_finite: bool) -> CheckResult {
    if is_finite {
        Ok(())
    } else {
        Err(serde_json::Error::custom(
            "non-finite float has no JSON representation",
        ))
    }
}

impl ser::Serializer for FiniteCheck {
    type Ok = ();
    type Error = serde_json::Error;
    type SerializeSeq = Self;
    type SerializeTuple = Self;
    type SerializeTupleStruct = Self;
    type SerializeTupleVariant = Self;
    type SerializeMap = Self;
    type SerializeStruct = Self;
    type SerializeStructVariant = Self;

    fn serialize_bool(self, _v: bool) -> CheckResult {
        Ok(())
    }
    fn serialize_i8(self, _v: i8) -> CheckResult {
        Ok(())
    }
    fn serialize_i16(self, _v: i16) -> CheckResult {
        Ok(())
    }
    fn serialize_i32(self, _v: i32) -> CheckResult {
        Ok(())
    }
    fn serialize_i64(self, _v: i64) -> CheckResult {
        Ok(())
    }
    fn serialize_i128(self, _v: i128) -> CheckResult {
        Ok(())
    }
    fn serialize_u8(self, _v: u8) -> CheckResult {
        Ok(())
    }
    fn serialize_u16(self, _v: u16) -> CheckResult {
        Ok(())
    }
    fn serialize_u32(self, _v: u32) -> CheckResult {
        Ok(())
    }
    fn serialize_u64(self, _v: u64) -> CheckResult {
        Ok(())
    }
    fn serialize_u128(self, _v: u128) -> CheckResult {
        Ok(())
    }
    fn serialize_f32(self, v: f32) -> CheckResult {
        finite(v.is_finite())
    }
    fn serialize_f64(self, v: f64) -> CheckResult {
        finite(v.is_finite())
    }
    fn serialize_char(self, _v: char) -> CheckResult {
        Ok(())
    }
    fn serialize_str(self, _v: &str) -> CheckResult {
        Ok(())
    }
    fn serialize_bytes(self, _v: &[u8]) -> CheckResult {
        Ok(())
    }
    fn serialize_none(self) -> CheckResult {
        Ok(())
    }
    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> CheckResult {
        value.serialize(self)
    }
    fn serialize_unit(self) -> CheckResult {
        Ok(())
    }
    fn serialize_unit_struct(self, _name: &'static str) -> CheckResult {
        Ok(())
    }
    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
    ) -> CheckResult {
        Ok(())
    }
    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> CheckResult {
        value.serialize(self)
    }
    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        value: &T,
    ) -> CheckResult {
        value.serialize(self)
    }
    fn serialize_seq(self, _len: Option<usize>) -> std::result::Result<Self, serde_json::Error> {
        Ok(self)
    }
    fn serialize_tuple(self, _len: usize) -> std::result::Result<Self, serde_json::Error> {
        Ok(self)
    }
    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> std::result::Result<Self, serde_json::Error> {
        Ok(self)
    }
    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> std::result::Result<Self, serde_json::Error> {
        Ok(self)
    }
    fn serialize_map(self, _len: Option<usize>) -> std::result::Result<Self, serde_json::Error> {
        Ok(self)
    }
    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> std::result::Result<Self, serde_json::Error> {
        Ok(self)
    }
    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> std::result::Result<Self, serde_json::Error> {
        Ok(self)
    }
}

impl ser::SerializeSeq for FiniteCheck {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> CheckResult {
        value.serialize(FiniteCheck)
    }
    fn end(self) -> CheckResult {
        Ok(())
    }
}

impl ser::SerializeTuple for FiniteCheck {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, value: &T) -> CheckResult {
        value.serialize(FiniteCheck)
    }
    fn end(self) -> CheckResult {
        Ok(())
    }
}

impl ser::SerializeTupleStruct for FiniteCheck {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> CheckResult {
        value.serialize(FiniteCheck)
    }
    fn end(self) -> CheckResult {
        Ok(())
    }
}

impl ser::SerializeTupleVariant for FiniteCheck {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, value: &T) -> CheckResult {
        value.serialize(FiniteCheck)
    }
    fn end(self) -> CheckResult {
        Ok(())
    }
}

impl ser::SerializeMap for FiniteCheck {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> CheckResult {
        key.serialize(FiniteCheck)
    }
    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> CheckResult {
        value.serialize(FiniteCheck)
    }
    fn end(self) -> CheckResult {
        Ok(())
    }
}

impl ser::SerializeStruct for FiniteCheck {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        _key: &'static str,
        value: &T,
    ) -> CheckResult {
        value.serialize(FiniteCheck)
    }
    fn end(self) -> CheckResult {
        Ok(())
    }
}

impl ser::SerializeStructVariant for FiniteCheck {
    type Ok = ();
    type Error = serde_json::Error;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        _key: &'static str,
        value: &T,
    ) -> CheckResult {
        value.serialize(FiniteCheck)
    }
    fn end(self) -> CheckResult {
        Ok(())
    }
}
