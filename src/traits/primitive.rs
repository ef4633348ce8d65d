use core::fmt;
use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

/// Shape of a wire primitive, used to render format-failure messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    String,
    Boolean,
    Integer,
    Number,
    Guid,
    Date,
    DateTime,
}

impl PrimitiveKind {
    /// Label used in `"... is not a valid <label>."`.
    #[inline]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Guid => "GUID",
            Self::Date => "date",
            Self::DateTime => "date-time",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A wire value as a self-describing format presents it, before coercion.
///
/// Codecs deserialize into `Scalar` first so that a value of the wrong shape
/// (`"abc"` where an integer is expected, an object where a string is expected)
/// becomes a recorded format failure instead of aborting the whole
/// deserialization.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    Float(f64),
    Str(String),
    /// A sequence or map; never coercible into a primitive.
    Composite,
}

impl Scalar {
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl<'de> Deserialize<'de> for Scalar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ScalarVisitor)
    }
}

struct ScalarVisitor;

impl<'de> Visitor<'de> for ScalarVisitor {
    type Value = Scalar;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a primitive wire value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Scalar, E> {
        Ok(Scalar::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Scalar, E> {
        Ok(Scalar::Int(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Scalar, E> {
        Ok(Scalar::UInt(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Scalar, E> {
        Ok(Scalar::Float(v))
    }

    fn visit_char<E: de::Error>(self, v: char) -> Result<Scalar, E> {
        Ok(Scalar::Str(v.to_string()))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Scalar, E> {
        Ok(Scalar::Str(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Scalar, E> {
        Ok(Scalar::Str(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Scalar, E> {
        Ok(Scalar::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Scalar, E> {
        Ok(Scalar::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Scalar, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Scalar, A::Error> {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Scalar::Composite)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Scalar, A::Error> {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(Scalar::Composite)
    }
}

/// A primitive a value object can be backed by.
///
/// `from_scalar` is the strict coercion used for structured wire formats (a JSON
/// string is not an integer); `parse` is the textual coercion used for route,
/// query and header values, where everything arrives as a string.
pub trait Primitive: Sized + Clone + Serialize {
    const KIND: PrimitiveKind;

    /// Parses a raw textual value.
    fn parse(raw: &str) -> Option<Self>;

    /// Coerces a self-describing wire value.
    fn from_scalar(scalar: Scalar) -> Option<Self> {
        match scalar {
            Scalar::Str(raw) => Self::parse(&raw),
            _ => None,
        }
    }
}

impl Primitive for String {
    const KIND: PrimitiveKind = PrimitiveKind::String;

    #[inline]
    fn parse(raw: &str) -> Option<Self> {
        Some(raw.to_owned())
    }
}

impl Primitive for bool {
    const KIND: PrimitiveKind = PrimitiveKind::Boolean;

    fn parse(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("true") {
            Some(true)
        } else if raw.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        }
    }

    fn from_scalar(scalar: Scalar) -> Option<Self> {
        match scalar {
            Scalar::Bool(v) => Some(v),
            _ => None,
        }
    }
}

macro_rules! impl_integer_primitive {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Primitive for $ty {
                const KIND: PrimitiveKind = PrimitiveKind::Integer;

                #[inline]
                fn parse(raw: &str) -> Option<Self> {
                    raw.trim().parse().ok()
                }

                fn from_scalar(scalar: Scalar) -> Option<Self> {
                    match scalar {
                        Scalar::Int(v) => <$ty>::try_from(v).ok(),
                        Scalar::UInt(v) => <$ty>::try_from(v).ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_integer_primitive!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

macro_rules! impl_float_primitive {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Primitive for $ty {
                const KIND: PrimitiveKind = PrimitiveKind::Number;

                fn parse(raw: &str) -> Option<Self> {
                    raw.trim().parse::<$ty>().ok().filter(|v| v.is_finite())
                }

                fn from_scalar(scalar: Scalar) -> Option<Self> {
                    let value = match scalar {
                        Scalar::Int(v) => v as $ty,
                        Scalar::UInt(v) => v as $ty,
                        Scalar::Float(v) => v as $ty,
                        _ => return None,
                    };
                    // Out-of-range wire numbers overflow to infinity on narrowing.
                    Some(value).filter(|v| v.is_finite())
                }
            }
        )*
    };
}

impl_float_primitive!(f32, f64);

#[cfg(feature = "uuid")]
impl Primitive for uuid::Uuid {
    const KIND: PrimitiveKind = PrimitiveKind::Guid;

    #[inline]
    fn parse(raw: &str) -> Option<Self> {
        uuid::Uuid::parse_str(raw.trim()).ok()
    }
}

#[cfg(feature = "chrono")]
impl Primitive for chrono::NaiveDate {
    const KIND: PrimitiveKind = PrimitiveKind::Date;

    #[inline]
    fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse().ok()
    }
}

#[cfg(feature = "chrono")]
impl Primitive for chrono::DateTime<chrono::Utc> {
    const KIND: PrimitiveKind = PrimitiveKind::DateTime;

    fn parse(raw: &str) -> Option<Self> {
        chrono::DateTime::parse_from_rfc3339(raw.trim())
            .ok()
            .map(|parsed| parsed.with_timezone(&chrono::Utc))
    }
}
