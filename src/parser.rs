//! Typed argument parsing.
//!
//! Every argument a command declares has an [`ArgType`]. Parsing an argument
//! consumes one logical value from an [`InputBuffer`] starting at a cursor and
//! moves the cursor past it. A logical value may span several whitespace
//! separated tokens: quoted strings and bracketed vectors do.
//!
//! ```text
//! say "hello world"          -> String
//! set speed 2.5              -> Double
//! set color [255 0 0 255]    -> Vector_Of_Signed_Int
//! set grid [[1 2] [3]]       -> Vector_Of_Vector_Of_Signed_Int
//! ```

use crate::error::ParseError;
use crate::lexer::InputBuffer;
use crate::reserved::{self, RESERVED_MSG};
use std::fmt;
use std::num::{IntErrorKind, ParseIntError};
use std::str::FromStr;

const BOOL_MSG: &str = "Missing or invalid boolean argument";
const MISSING_OPEN: &str = "Invalid vector argument missing opening [";
const MISSING_CLOSE: &str = "Invalid vector argument missing closing ]";

/// The kinds of values a command argument can hold.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArgType {
    String,
    Bool,
    Char,
    UChar,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
    /// A bracketed list, possibly nested: `[1 2 3]`, `[[1] [2 3]]`.
    Vector(Box<ArgType>),
}

impl ArgType {
    /// Shorthand for `ArgType::Vector(Box::new(inner))`.
    pub fn vector(inner: ArgType) -> Self {
        ArgType::Vector(Box::new(inner))
    }

    /// Name shown in help text, e.g. `Signed_Int` or `Vector_Of_Float`.
    pub fn type_name(&self) -> String {
        match self {
            ArgType::String => "String".into(),
            ArgType::Bool => "Boolean".into(),
            ArgType::Char => "Char".into(),
            ArgType::UChar => "Unsigned_Char".into(),
            ArgType::I16 => "Signed_Short".into(),
            ArgType::U16 => "Unsigned_Short".into(),
            ArgType::I32 => "Signed_Int".into(),
            ArgType::U32 => "Unsigned_Int".into(),
            ArgType::I64 => "Signed_Long_Long".into(),
            ArgType::U64 => "Unsigned_Long_Long".into(),
            ArgType::F32 => "Float".into(),
            ArgType::F64 => "Double".into(),
            ArgType::Vector(inner) => format!("Vector_Of_{}", inner.type_name()),
        }
    }

    /// Name used in number conversion errors.
    fn describe(&self) -> &'static str {
        match self {
            ArgType::UChar => "unsigned char",
            ArgType::I16 => "signed short",
            ArgType::U16 => "unsigned short",
            ArgType::I32 => "signed int",
            ArgType::U32 => "unsigned int",
            ArgType::I64 => "long long",
            ArgType::U64 => "unsigned long long",
            ArgType::F32 => "float",
            ArgType::F64 => "double",
            ArgType::String => "string",
            ArgType::Bool => "boolean",
            ArgType::Char => "char",
            ArgType::Vector(_) => "vector",
        }
    }

    /// Parses one value of this type from `input`, starting at `cursor`.
    ///
    /// On success `cursor` points past the consumed text. The buffer may have
    /// been rewritten and should not be parsed again from an earlier position.
    pub fn parse(&self, input: &mut InputBuffer, cursor: &mut usize) -> Result<Value, ParseError> {
        ArgumentParser { input, cursor }.parse(self)
    }
}

impl fmt::Display for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_name())
    }
}

/// A parsed argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Bool(bool),
    Char(char),
    UChar(u8),
    I16(i16),
    U16(u16),
    I32(i32),
    U32(u32),
    I64(i64),
    U64(u64),
    F32(f32),
    F64(f64),
    Vector(Vec<Value>),
}

impl Value {
    /// Text that parses back into an equal value.
    ///
    /// Strings with whitespace are quoted, reserved chars are escaped.
    pub fn to_literal(&self) -> String {
        match self {
            Value::String(s) if s.is_empty() || s.chars().any(char::is_whitespace) => {
                format!("\"{}\"", reserved::escape(s))
            }
            Value::String(s) => reserved::escape(s),
            Value::Char(c) => char_literal(*c),
            Value::UChar(b) => char_literal(char::from(*b)),
            Value::Vector(items) => {
                let inner: Vec<String> = items.iter().map(Value::to_literal).collect();
                format!("[{}]", inner.join(" "))
            }
            other => other.to_string(),
        }
    }
}

fn char_literal(c: char) -> String {
    if reserved::is_reserved_char(c) {
        format!("{}{}", reserved::ESCAPE_CHAR, c)
    } else {
        c.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Char(c) => write!(f, "{}", c),
            Value::UChar(b) => write!(f, "{}", char::from(*b)),
            Value::I16(n) => write!(f, "{}", n),
            Value::U16(n) => write!(f, "{}", n),
            Value::I32(n) => write!(f, "{}", n),
            Value::U32(n) => write!(f, "{}", n),
            Value::I64(n) => write!(f, "{}", n),
            Value::U64(n) => write!(f, "{}", n),
            Value::F32(n) => write!(f, "{}", n),
            Value::F64(n) => write!(f, "{}", n),
            Value::Vector(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}

/// Rust types that map onto an [`ArgType`].
///
/// Lets callers declare arguments and read parsed values with plain Rust
/// types: `Vec<i32>` is `Vector_Of_Signed_Int`.
pub trait ArgValue: Sized {
    fn arg_type() -> ArgType;

    /// Extracts `Self` from a parsed value, `None` on a kind mismatch.
    fn from_value(value: Value) -> Option<Self>;

    fn to_value(&self) -> Value;
}

macro_rules! impl_arg_value {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl ArgValue for $ty {
                fn arg_type() -> ArgType {
                    ArgType::$kind
                }

                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::$kind(v) => Some(v),
                        _ => None,
                    }
                }

                fn to_value(&self) -> Value {
                    Value::$kind(self.clone())
                }
            }
        )*
    };
}

impl_arg_value! {
    String => String,
    bool => Bool,
    char => Char,
    u8 => UChar,
    i16 => I16,
    u16 => U16,
    i32 => I32,
    u32 => U32,
    i64 => I64,
    u64 => U64,
    f32 => F32,
    f64 => F64,
}

impl<T: ArgValue> ArgValue for Vec<T> {
    fn arg_type() -> ArgType {
        ArgType::vector(T::arg_type())
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Vector(items) => items.into_iter().map(T::from_value).collect(),
            _ => None,
        }
    }

    fn to_value(&self) -> Value {
        Value::Vector(self.iter().map(ArgValue::to_value).collect())
    }
}

struct ArgumentParser<'a> {
    input: &'a mut InputBuffer,
    cursor: &'a mut usize,
}

impl ArgumentParser<'_> {
    fn parse(&mut self, ty: &ArgType) -> Result<Value, ParseError> {
        match ty {
            ArgType::String => self.parse_string().map(Value::String),
            ArgType::Bool => self.parse_bool().map(Value::Bool),
            ArgType::Char => self.parse_char().map(Value::Char),
            ArgType::UChar => {
                let c = self.parse_char()?;
                u8::try_from(u32::from(c))
                    .map(Value::UChar)
                    .map_err(|_| ParseError::new(too_large(ty), c.to_string()))
            }
            ArgType::I16 => self.parse_int(ty).map(Value::I16),
            ArgType::U16 => self.parse_int(ty).map(Value::U16),
            ArgType::I32 => self.parse_int(ty).map(Value::I32),
            ArgType::U32 => self.parse_int(ty).map(Value::U32),
            ArgType::I64 => self.parse_int(ty).map(Value::I64),
            ArgType::U64 => self.parse_int(ty).map(Value::U64),
            ArgType::F32 => self.parse_float(ty).map(Value::F32),
            ArgType::F64 => self.parse_float(ty).map(Value::F64),
            ArgType::Vector(inner) => self.parse_vector(inner).map(Value::Vector),
        }
    }

    /// A bare word, or one or more glued quoted segments: `"a b"`, `"a""b"`.
    fn parse_string(&mut self) -> Result<String, ParseError> {
        let mut range = self.input.next_poi(self.cursor);
        if range.is_end(self.input) {
            return Err(ParseError::new("Missing string argument", ""));
        }

        if self.input[range.start] != '"' {
            let word = self.word(range.start, range.end)?;
            *self.cursor = range.end + 1;
            return Ok(word);
        }

        let mut value = String::new();
        range.start += 1;
        loop {
            let Some(close) = self.input.find_unescaped('"', range.start) else {
                return Err(ParseError::new(
                    "Could not find closing '\"'",
                    self.input.substr(range.start, self.input.len()),
                ));
            };
            range.end = close;
            value.push_str(&self.word(range.start, close)?);

            range.start = close + 1;
            match self.input.get(range.start) {
                // Another quote right after the closing one continues the string.
                Some(c) if !c.is_whitespace() => {
                    if c == '"' {
                        range.start += 1;
                    }
                }
                _ => break,
            }
        }

        *self.cursor = range.end + 1;
        Ok(value)
    }

    /// Copies `[start, end)` while dropping escape markers, rejecting unescaped reserved chars.
    fn word(&self, start: usize, end: usize) -> Result<String, ParseError> {
        let chars = self.input.as_chars();
        let mut result = String::with_capacity(end.saturating_sub(start));
        let mut i = start;
        while i < end {
            let c = chars[i];
            if !reserved::is_reserved_char(c) {
                result.push(c);
            } else if reserved::is_escaping(chars, i) && i + 1 < end {
                i += 1;
                result.push(chars[i]);
            } else {
                return Err(ParseError::new(RESERVED_MSG, self.input.substr(start, end)));
            }
            i += 1;
        }
        Ok(result)
    }

    fn parse_bool(&mut self) -> Result<bool, ParseError> {
        let range = self.input.next_poi(self.cursor);
        for pos in range.start..range.end {
            let lower = self.input[pos].to_ascii_lowercase();
            self.input.set(pos, lower);
        }
        let text = self.input.slice(range);

        match (range.len(), text.chars().next()) {
            (4, Some('t')) if text == "true" => Ok(true),
            (4, Some('t')) => Err(ParseError::new(format!("{BOOL_MSG}, expected true"), text)),
            (5, Some('f')) if text == "false" => Ok(false),
            (5, Some('f')) => Err(ParseError::new(format!("{BOOL_MSG}, expected false"), text)),
            _ => Err(ParseError::new(BOOL_MSG, text)),
        }
    }

    /// One char, or an escape marker followed by a reserved char.
    fn parse_char(&mut self) -> Result<char, ParseError> {
        let range = self.input.next_poi(self.cursor);
        let text = self.input.slice(range);

        match range.len() {
            1 => {
                let c = self.input[range.start];
                if reserved::is_reserved_char(c) {
                    Err(ParseError::new(RESERVED_MSG, text))
                } else {
                    Ok(c)
                }
            }
            2 if reserved::is_escaping(self.input.as_chars(), range.start) => {
                Ok(self.input[range.start + 1])
            }
            2 => Err(ParseError::new("Too many chars were given", text)),
            _ => Err(ParseError::new("Too many or no chars were given", text)),
        }
    }

    fn parse_int<T>(&mut self, ty: &ArgType) -> Result<T, ParseError>
    where
        T: FromStr<Err = ParseIntError>,
    {
        let range = self.input.next_poi(self.cursor);
        let text = self.input.slice(range);
        match text.parse::<T>() {
            Ok(value) => Ok(value),
            Err(e) => match e.kind() {
                IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
                    Err(ParseError::new(too_large(ty), text))
                }
                _ => Err(ParseError::new(invalid(ty), text)),
            },
        }
    }

    fn parse_float<T>(&mut self, ty: &ArgType) -> Result<T, ParseError>
    where
        T: FromStr + Into<f64> + Copy,
    {
        let range = self.input.next_poi(self.cursor);
        let text = self.input.slice(range);
        let Ok(value) = text.parse::<T>() else {
            return Err(ParseError::new(invalid(ty), text));
        };

        let wide: f64 = value.into();
        let overflow = wide.is_infinite() && !text.to_ascii_lowercase().contains("inf");
        // A non-zero mantissa that comes out as zero underflowed.
        let mantissa = text.split(['e', 'E']).next().unwrap_or_default();
        let underflow = wide == 0.0 && mantissa.chars().any(|c| ('1'..='9').contains(&c));
        if overflow || underflow {
            return Err(ParseError::new(too_large(ty), text));
        }
        Ok(value)
    }

    /// `[a b c]`, where each element is parsed as `inner`.
    ///
    /// The opening bracket and every matched closing bracket are blanked in
    /// the buffer, so nested vectors only ever see their own brackets.
    fn parse_vector(&mut self, inner: &ArgType) -> Result<Vec<Value>, ParseError> {
        let mut values = Vec::new();

        let mut range = self.input.next_poi(self.cursor);
        // Nothing left: an omitted trailing vector is empty.
        if range.is_end(self.input) {
            return Ok(values);
        }
        if self.input[range.start] != '[' {
            return Err(ParseError::new(MISSING_OPEN, self.input.slice(range)));
        }

        let open = range.start;
        self.input.blank(open);
        loop {
            let mut pos = range.start;
            range = self.input.next_poi(&mut pos);
            if range.is_end(self.input) {
                return Err(ParseError::new(
                    MISSING_CLOSE,
                    self.input.substr(open, self.input.len()),
                ));
            }

            if self.input[range.start] == '[' {
                values.push(inner.parse(self.input, &mut range.start)?);
                continue;
            }

            let Some(close) = self.input.find_unescaped(']', range.start) else {
                return Err(ParseError::new(
                    MISSING_CLOSE,
                    self.input.substr(range.start, self.input.len()),
                ));
            };
            self.input.blank(close);

            *self.cursor = range.start;
            loop {
                let mut peek = *self.cursor;
                let next = self.input.next_poi(&mut peek).start;
                if next >= close {
                    *self.cursor = next;
                    return Ok(values);
                }
                values.push(inner.parse(self.input, self.cursor)?);
            }
        }
    }
}

fn too_large(ty: &ArgType) -> String {
    format!("Argument too large for {}", ty.describe())
}

fn invalid(ty: &ArgType) -> String {
    format!("Missing or invalid {} argument", ty.describe())
}

/// Parses `line` from the start as a single value of type `ty`.
pub fn parse_str(ty: &ArgType, line: &str) -> Result<Value, ParseError> {
    let mut input = InputBuffer::new(line);
    let mut cursor = 0;
    ty.parse(&mut input, &mut cursor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(ty: ArgType, line: &str) -> Result<Value, ParseError> {
        parse_str(&ty, line)
    }

    fn ints(values: &[i32]) -> Value {
        Value::Vector(values.iter().copied().map(Value::I32).collect())
    }

    #[test]
    fn test_scalars_parse() {
        assert_eq!(parse(ArgType::I32, "42").unwrap(), Value::I32(42));
        assert_eq!(parse(ArgType::I16, "-7").unwrap(), Value::I16(-7));
        assert_eq!(parse(ArgType::U64, "18446744073709551615").unwrap(), Value::U64(u64::MAX));
        assert_eq!(parse(ArgType::F64, "3.14").unwrap(), Value::F64(3.14));
        assert_eq!(parse(ArgType::F32, "  0.5  ").unwrap(), Value::F32(0.5));
        assert_eq!(parse(ArgType::Bool, "true").unwrap(), Value::Bool(true));
        assert_eq!(parse(ArgType::String, "hello").unwrap(), Value::String("hello".into()));
    }

    #[test]
    fn test_scalar_round_trip() {
        let cases = [
            (ArgType::I32, Value::I32(-42)),
            (ArgType::U16, Value::U16(65535)),
            (ArgType::F64, Value::F64(3.14)),
            (ArgType::F32, Value::F32(1.25)),
            (ArgType::Bool, Value::Bool(false)),
            (ArgType::Char, Value::Char('"')),
            (ArgType::UChar, Value::UChar(b'x')),
            (ArgType::String, Value::String("a \"quoted\" [thing]".into())),
            (ArgType::String, Value::String(String::new())),
        ];
        for (ty, value) in cases {
            let literal = value.to_literal();
            assert_eq!(parse(ty, &literal).unwrap(), value, "literal {literal}");
        }
    }

    #[test]
    fn test_integer_overflow_and_invalid_are_distinguished() {
        let err = parse(ArgType::I16, "40000").unwrap_err();
        assert_eq!(err.message(), "Argument too large for signed short");
        assert_eq!(err.arg(), "40000");

        let err = parse(ArgType::U32, "-1").unwrap_err();
        assert_eq!(err.message(), "Missing or invalid unsigned int argument");

        let err = parse(ArgType::I32, "12abc").unwrap_err();
        assert_eq!(err.message(), "Missing or invalid signed int argument");

        let err = parse(ArgType::I64, "").unwrap_err();
        assert_eq!(err.message(), "Missing or invalid long long argument");
    }

    #[test]
    fn test_float_errors() {
        let err = parse(ArgType::F32, "1e39").unwrap_err();
        assert_eq!(err.message(), "Argument too large for float");

        let err = parse(ArgType::F64, "pi").unwrap_err();
        assert_eq!(err.message(), "Missing or invalid double argument");

        assert_eq!(parse(ArgType::F64, "inf").unwrap(), Value::F64(f64::INFINITY));
    }

    #[test]
    fn test_float_underflow_is_out_of_range() {
        let err = parse(ArgType::F32, "1e-50").unwrap_err();
        assert_eq!(err.message(), "Argument too large for float");
        assert_eq!(err.arg(), "1e-50");

        let err = parse(ArgType::F64, "-2.5E-400").unwrap_err();
        assert_eq!(err.message(), "Argument too large for double");

        assert_eq!(parse(ArgType::F32, "0.0").unwrap(), Value::F32(0.0));
        assert_eq!(parse(ArgType::F32, "0e5").unwrap(), Value::F32(0.0));
        assert_eq!(parse(ArgType::F64, "1e-50").unwrap(), Value::F64(1e-50));
    }

    #[test]
    fn test_bool_is_case_insensitive() {
        for text in ["TRUE", "True", "true", "tRuE"] {
            assert_eq!(parse(ArgType::Bool, text).unwrap(), Value::Bool(true));
        }
        assert_eq!(parse(ArgType::Bool, "FALSE").unwrap(), Value::Bool(false));

        for text in ["tru", "truee", "yes", "0"] {
            let err = parse(ArgType::Bool, text).unwrap_err();
            assert_eq!(err.message(), BOOL_MSG);
        }

        let err = parse(ArgType::Bool, "trux").unwrap_err();
        assert_eq!(err.message(), "Missing or invalid boolean argument, expected true");
        let err = parse(ArgType::Bool, "fals3").unwrap_err();
        assert_eq!(err.message(), "Missing or invalid boolean argument, expected false");
    }

    #[test]
    fn test_char_rules() {
        assert_eq!(parse(ArgType::Char, "a").unwrap(), Value::Char('a'));
        assert_eq!(parse(ArgType::Char, r"\[").unwrap(), Value::Char('['));
        assert_eq!(parse(ArgType::Char, r"\\").unwrap(), Value::Char('\\'));

        let err = parse(ArgType::Char, "ab").unwrap_err();
        assert_eq!(err.message(), "Too many chars were given");

        let err = parse(ArgType::Char, "abc").unwrap_err();
        assert_eq!(err.message(), "Too many or no chars were given");

        let err = parse(ArgType::Char, "").unwrap_err();
        assert_eq!(err.message(), "Too many or no chars were given");

        let err = parse(ArgType::Char, "]").unwrap_err();
        assert_eq!(err.message(), RESERVED_MSG);
    }

    #[test]
    fn test_unsigned_char_rejects_wide_chars() {
        assert_eq!(parse(ArgType::UChar, "z").unwrap(), Value::UChar(b'z'));
        let err = parse(ArgType::UChar, "ж").unwrap_err();
        assert_eq!(err.message(), "Argument too large for unsigned char");

        assert_eq!(parse(ArgType::UChar, r"\[").unwrap(), Value::UChar(b'['));
    }

    #[test]
    fn test_bare_string_rejects_unescaped_reserved() {
        let err = parse(ArgType::String, "a[b").unwrap_err();
        assert_eq!(err.message(), RESERVED_MSG);
        assert_eq!(err.arg(), "a[b");

        assert_eq!(
            parse(ArgType::String, r"a\[b\]").unwrap(),
            Value::String("a[b]".into())
        );
    }

    #[test]
    fn test_quoted_strings() {
        assert_eq!(
            parse(ArgType::String, r#""hello  world""#).unwrap(),
            Value::String("hello  world".into())
        );
        assert_eq!(
            parse(ArgType::String, r#""a\"b""#).unwrap(),
            Value::String("a\"b".into())
        );
        // Glued segments concatenate.
        assert_eq!(
            parse(ArgType::String, r#""ab""cd""#).unwrap(),
            Value::String("abcd".into())
        );

        let err = parse(ArgType::String, r#""never closed"#).unwrap_err();
        assert_eq!(err.message(), "Could not find closing '\"'");
        assert_eq!(err.arg(), "never closed");
    }

    #[test]
    fn test_quoted_string_stops_at_whitespace_after_quote() {
        let mut input = InputBuffer::new(r#""a" "b""#);
        let mut cursor = 0;
        let first = ArgType::String.parse(&mut input, &mut cursor).unwrap();
        let second = ArgType::String.parse(&mut input, &mut cursor).unwrap();
        assert_eq!(first, Value::String("a".into()));
        assert_eq!(second, Value::String("b".into()));
    }

    #[test]
    fn test_vectors() {
        assert_eq!(parse(ArgType::vector(ArgType::I32), "[1 2 3]").unwrap(), ints(&[1, 2, 3]));
        assert_eq!(parse(ArgType::vector(ArgType::I32), "[ ]").unwrap(), ints(&[]));
        assert_eq!(parse(ArgType::vector(ArgType::I32), "[]").unwrap(), ints(&[]));
        assert_eq!(parse(ArgType::vector(ArgType::I32), "   ").unwrap(), ints(&[]));

        let nested = ArgType::vector(ArgType::vector(ArgType::I32));
        assert_eq!(
            parse(nested.clone(), "[[1 2] [3]]").unwrap(),
            Value::Vector(vec![ints(&[1, 2]), ints(&[3])])
        );
        assert_eq!(
            parse(nested, "[ [ 1 ]  [ ] ]").unwrap(),
            Value::Vector(vec![ints(&[1]), ints(&[])])
        );
    }

    #[test]
    fn test_vector_errors() {
        let err = parse(ArgType::vector(ArgType::I32), "[1 2").unwrap_err();
        assert!(err.message().contains("closing ]"));

        let err = parse(ArgType::vector(ArgType::I32), "[").unwrap_err();
        assert!(err.message().contains("closing ]"));

        let nested = ArgType::vector(ArgType::vector(ArgType::I32));
        let err = parse(nested.clone(), "[[1 2]").unwrap_err();
        assert!(err.message().contains("closing ]"));

        let err = parse(nested, "[[1] 2]").unwrap_err();
        assert_eq!(err.message(), MISSING_OPEN);

        let err = parse(ArgType::vector(ArgType::I32), "1 2 3").unwrap_err();
        assert_eq!(err.message(), MISSING_OPEN);
        assert_eq!(err.arg(), "1");

        let err = parse(ArgType::vector(ArgType::I32), "[1 x 3]").unwrap_err();
        assert_eq!(err.message(), "Missing or invalid signed int argument");
    }

    #[test]
    fn test_vector_of_strings_with_escaped_brackets() {
        let ty = ArgType::vector(ArgType::String);
        assert_eq!(
            parse(ty.clone(), r#"["a\]b" plain "two words"]"#).unwrap(),
            Value::Vector(vec![
                Value::String("a]b".into()),
                Value::String("plain".into()),
                Value::String("two words".into()),
            ])
        );
        assert_eq!(
            parse(ty, r"[x\] y]").unwrap(),
            Value::Vector(vec![Value::String("x]".into()), Value::String("y".into())])
        );

        let nested = ArgType::vector(ArgType::vector(ArgType::String));
        assert_eq!(
            parse(nested, r#"[["a\]" b] [c]]"#).unwrap(),
            Value::Vector(vec![
                Value::Vector(vec![Value::String("a]".into()), Value::String("b".into())]),
                Value::Vector(vec![Value::String("c".into())]),
            ])
        );
    }

    #[test]
    fn test_vector_leaves_cursor_on_following_argument() {
        let mut input = InputBuffer::new("[1 2] 7");
        let mut cursor = 0;
        let list = ArgType::vector(ArgType::I32).parse(&mut input, &mut cursor).unwrap();
        let tail = ArgType::I32.parse(&mut input, &mut cursor).unwrap();
        assert_eq!(list, ints(&[1, 2]));
        assert_eq!(tail, Value::I32(7));
    }

    #[test]
    fn test_vector_literal_round_trip() {
        let value = Value::Vector(vec![ints(&[1, 2]), ints(&[]), ints(&[-3])]);
        let ty = ArgType::vector(ArgType::vector(ArgType::I32));
        assert_eq!(value.to_literal(), "[[1 2] [] [-3]]");
        assert_eq!(parse(ty, &value.to_literal()).unwrap(), value);
    }

    #[test]
    fn test_arg_value_conversions() {
        assert_eq!(<Vec<Vec<f32>>>::arg_type().type_name(), "Vector_Of_Vector_Of_Float");
        assert_eq!(i64::arg_type(), ArgType::I64);

        let value = parse(ArgType::vector(ArgType::I32), "[4 5]").unwrap();
        assert_eq!(Vec::<i32>::from_value(value.clone()), Some(vec![4, 5]));
        assert_eq!(Vec::<u32>::from_value(value), None);
        assert_eq!(vec![1u8, 2].to_value(), Value::Vector(vec![Value::UChar(1), Value::UChar(2)]));
    }

    #[test]
    fn test_value_display() {
        let value = Value::Vector(vec![Value::String("a b".into()), Value::Bool(true)]);
        assert_eq!(value.to_string(), "[a b true]");
        assert_eq!(Value::UChar(b'q').to_string(), "q");
    }
}
