use super::*;
use crate::error::SerializerError;

#[test]
fn writes_and_reads_primitives() {
  let mut writer = MessagePackWriter::new();
  writer.write_array_header(4).unwrap();
  writer.write_int(-7).unwrap();
  writer.write_string("nexus").unwrap();
  writer.write_bool(true).unwrap();
  writer.write_nil().unwrap();
  let bytes = writer.into_inner();

  let mut reader = MessagePackReader::new(&bytes);
  assert_eq!(reader.read_array_header().unwrap(), 4);
  assert_eq!(reader.read_int64().unwrap(), -7);
  assert_eq!(reader.read_string().unwrap(), "nexus");
  assert!(reader.read_bool().unwrap());
  assert!(reader.peek_is_nil());
  assert!(reader.try_read_nil());
  assert!(reader.is_empty());
}

#[test]
fn small_ints_use_fixint_encoding() {
  let mut writer = MessagePackWriter::new();
  writer.write_int(1).unwrap();
  assert_eq!(writer.as_slice(), &[0x01]);
}

#[test]
fn try_read_nil_leaves_other_values_untouched() {
  let mut writer = MessagePackWriter::new();
  writer.write_int(5).unwrap();
  let bytes = writer.into_inner();

  let mut reader = MessagePackReader::new(&bytes);
  assert!(!reader.try_read_nil());
  assert_eq!(reader.read_int32().unwrap(), 5);
}

#[test]
fn string_bytes_round_trip_without_validation() {
  let mut writer = MessagePackWriter::new();
  writer.write_string_bytes("crate::Type".as_bytes()).unwrap();
  let bytes = writer.into_inner();
  assert_eq!(bytes[0], 0xa0 | 11);

  let mut reader = MessagePackReader::new(&bytes);
  assert_eq!(reader.read_string_bytes().unwrap(), b"crate::Type");
}

#[test]
fn truncated_string_is_a_decode_error() {
  let bytes = [0xa5, b'a', b'b'];
  let mut reader = MessagePackReader::new(&bytes);
  assert!(matches!(reader.read_string_bytes(), Err(SerializerError::Decode(_))));
}

#[test]
fn int32_rejects_out_of_range_values() {
  let mut writer = MessagePackWriter::new();
  writer.write_int(i64::from(i32::MAX) + 1).unwrap();
  let bytes = writer.into_inner();

  let mut reader = MessagePackReader::new(&bytes);
  assert!(matches!(reader.read_int32(), Err(SerializerError::Decode(_))));
}

#[test]
fn depth_step_stops_at_max_depth() {
  let mut reader = MessagePackReader::new(&[]);
  reader.depth_step(2).unwrap();
  reader.depth_step(2).unwrap();
  assert_eq!(
    reader.depth_step(2),
    Err(SerializerError::DepthExceeded { max_depth: 2 })
  );
  assert_eq!(reader.depth(), 2);

  reader.depth_leave();
  reader.depth_leave();
  reader.depth_leave();
  assert_eq!(reader.depth(), 0);
}
