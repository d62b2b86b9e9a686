mod de;
mod keyed;
mod lenient;
mod ser;

pub use crate::de::{
    Leniency, from_object, from_reader, from_slice, from_str, map_from_slice, map_from_str,
    seq_from_slice, seq_from_str,
};
pub use crate::keyed::{CompactKeyedMap, KeyedMap, RawKey, compact_map};
pub use crate::lenient::{CompactSeq, Lenient, compact_seq};
pub use crate::ser::{
    EscapeNonAscii, to_object, to_string, to_string_ascii, to_vec, to_vec_ascii, to_writer,
    to_writer_ascii,
};
