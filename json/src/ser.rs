use std::io::{self, Write};

use serde::{Serialize, ser};
use serde_json::ser::Formatter;
use serde_json::{Error, Map, Serializer, Value};

/// Escapes non-ASCII characters.
///
/// `serde_json` encodes non-ASCII characters as UTF-8 sequences, which is all that [JSON]
/// requires.  Some transports are happier with output that is plain ASCII; this formatter
/// escapes everything outside ASCII as `\uXXXX` (a surrogate pair outside the BMP).  The
/// escaping is lossless: a strict decode of the escaped output reproduces the original string.
///
/// [JSON]: https://datatracker.ietf.org/doc/html/rfc8259#section-8.1
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct EscapeNonAscii;

impl Formatter for EscapeNonAscii {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> Result<(), io::Error>
    where
        W: ?Sized + Write,
    {
        let mut rest = fragment;
        while let Some(i) = rest.find(|ch: char| !ch.is_ascii()) {
            writer.write_all(rest[..i].as_bytes())?;
            let ch = rest[i..].chars().next().expect("non-ascii character");
            for unit in ch.encode_utf16(&mut [0; 2]) {
                std::write!(writer, "\\u{unit:04x}")?;
            }
            rest = &rest[i + ch.len_utf8()..];
        }
        writer.write_all(rest.as_bytes())
    }
}

pub fn to_writer<W, T>(writer: W, value: &T) -> Result<(), Error>
where
    W: Write,
    T: ?Sized + Serialize,
{
    serde_json::to_writer(writer, value)
}

pub fn to_vec<T>(value: &T) -> Result<Vec<u8>, Error>
where
    T: ?Sized + Serialize,
{
    serde_json::to_vec(value)
}

pub fn to_string<T>(value: &T) -> Result<String, Error>
where
    T: ?Sized + Serialize,
{
    serde_json::to_string(value)
}

pub fn to_writer_ascii<W, T>(writer: W, value: &T) -> Result<(), Error>
where
    W: Write,
    T: ?Sized + Serialize,
{
    value.serialize(&mut Serializer::with_formatter(writer, EscapeNonAscii))
}

pub fn to_vec_ascii<T>(value: &T) -> Result<Vec<u8>, Error>
where
    T: ?Sized + Serialize,
{
    let mut writer = Vec::with_capacity(128);
    to_writer_ascii(&mut writer, value)?;
    Ok(writer)
}

pub fn to_string_ascii<T>(value: &T) -> Result<String, Error>
where
    T: ?Sized + Serialize,
{
    let vec = to_vec_ascii(value)?;
    // `EscapeNonAscii` emits ASCII only.
    Ok(unsafe { String::from_utf8_unchecked(vec) })
}

/// Encodes a value into a JSON object.
///
/// A value that encodes into anything other than an object is an error; it is never coerced
/// into an empty object.
pub fn to_object<T>(value: &T) -> Result<Map<String, Value>, Error>
where
    T: ?Sized + Serialize,
{
    match serde_json::to_value(value)? {
        Value::Object(object) => Ok(object),
        value => Err(ser::Error::custom(std::format!(
            "expect a JSON object: {value}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;
    use serde_json::json;

    use super::*;

    #[derive(Clone, Debug, Serialize)]
    struct Greeting {
        to: String,
        body: String,
    }

    #[test]
    fn escape_non_ascii() {
        fn test(testdata: &str, expect: &str) {
            let output = to_string_ascii(testdata).unwrap();
            assert_eq!(output, expect);
            assert_eq!(output.is_ascii(), true);
            assert_eq!(serde_json::from_str::<String>(&output).unwrap(), testdata);
        }

        test("", r#""""#);
        test("Hello, World!", r#""Hello, World!""#);
        test("\t\r\n", r#""\t\r\n""#);
        test("caf\u{e9}", r#""caf\u00e9""#);
        test("x\u{410}y", r#""x\u0410y""#);
        test("\u{2028}\u{2029}", r#""\u2028\u2029""#);
        test("\u{1f600}", r#""\ud83d\ude00""#);
    }

    #[test]
    fn ascii_variants() {
        let greeting = Greeting {
            to: "m\u{fc}nchen".to_string(),
            body: "gr\u{fc}\u{df}e".to_string(),
        };
        let expect = r#"{"to":"m\u00fcnchen","body":"gr\u00fc\u00dfe"}"#;

        assert_eq!(to_string_ascii(&greeting).unwrap(), expect);
        assert_eq!(to_vec_ascii(&greeting).unwrap(), expect.as_bytes());

        let mut buffer = Vec::new();
        to_writer_ascii(&mut buffer, &greeting).unwrap();
        assert_eq!(buffer, expect.as_bytes());

        // Plain variants keep the UTF-8 sequences.
        assert_eq!(
            to_string(&greeting).unwrap(),
            "{\"to\":\"m\u{fc}nchen\",\"body\":\"gr\u{fc}\u{df}e\"}",
        );
    }

    #[test]
    fn passthrough() {
        let value = json!({"x": 1, "y": [true, null]});
        let expect = r#"{"x":1,"y":[true,null]}"#;

        assert_eq!(to_string(&value).unwrap(), expect);
        assert_eq!(to_vec(&value).unwrap(), expect.as_bytes());

        let mut buffer = Vec::new();
        to_writer(&mut buffer, &value).unwrap();
        assert_eq!(buffer, expect.as_bytes());
    }

    #[test]
    fn object() {
        let greeting = Greeting {
            to: "world".to_string(),
            body: "hello".to_string(),
        };
        let object = to_object(&greeting).unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(object.get("to"), Some(&json!("world")));
        assert_eq!(object.get("body"), Some(&json!("hello")));

        assert!(to_object(&42).is_err());
        assert!(to_object("foo").is_err());
        assert!(to_object(&["foo"]).is_err());
        assert!(to_object(&Option::<Greeting>::None).is_err());
    }
}
