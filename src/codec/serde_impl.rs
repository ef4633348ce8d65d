//! `serde` glue for the codecs.
//!
//! The field wrappers ([`Required`], [`Maybe`], [`Named`]) never return a
//! deserialization error for a bad *value*: they read the wire value as an
//! uncoerced [`Scalar`], hand it to their codec and keep whatever the codec
//! produced. Only structural errors from the underlying deserializer (malformed
//! input) propagate.
//!
//! Both wrappers read through `Option<Scalar>`, so a missing key in a derived
//! struct arrives as `None` exactly like an explicit `null`.
//!
//! The codecs themselves implement [`DeserializeSeed`] so a runtime-named codec
//! can drive a deserializer directly.

use crate::codec::{Maybe, Named, OptionalCodec, PropertyBoundCodec, PropertyName, Required, ValidatingCodec};
use crate::scope::with_property;
use crate::traits::{Scalar, ValueObject};
use serde::de::DeserializeSeed;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

fn serialize_wire<S, P>(wire: Option<P>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    P: Serialize,
{
    match wire {
        Some(primitive) => serializer.serialize_some(&primitive),
        None => serializer.serialize_none(),
    }
}

impl<'de, V: ValueObject> Deserialize<'de> for Required<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = Option::<Scalar>::deserialize(deserializer)?;
        Ok(Required::from_option(ValidatingCodec::<V>::new().read_scalar(wire)))
    }
}

impl<V: ValueObject> Serialize for Required<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_wire(ValidatingCodec::<V>::new().write(self.value()), serializer)
    }
}

impl<'de, V: ValueObject> Deserialize<'de> for Maybe<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let wire = Option::<Scalar>::deserialize(deserializer)?;
        Ok(OptionalCodec::<V>::new().read_scalar(wire))
    }
}

impl<V: ValueObject> Serialize for Maybe<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_wire(OptionalCodec::<V>::new().write(self), serializer)
    }
}

impl<'de, N, C> Deserialize<'de> for Named<N, C>
where
    N: PropertyName,
    C: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        with_property(N::NAME, || C::deserialize(deserializer)).map(Named::new)
    }
}

impl<N, C> Serialize for Named<N, C>
where
    N: PropertyName,
    C: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        with_property(N::NAME, || (**self).serialize(serializer))
    }
}

impl<'de, V: ValueObject> DeserializeSeed<'de> for &ValidatingCodec<V> {
    type Value = Option<V>;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        let wire = Option::<Scalar>::deserialize(deserializer)?;
        Ok(self.read_scalar(wire))
    }
}

impl<'de, V: ValueObject> DeserializeSeed<'de> for &OptionalCodec<V> {
    type Value = Maybe<V>;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        let wire = Option::<Scalar>::deserialize(deserializer)?;
        Ok(self.read_scalar(wire))
    }
}

impl<'de, V: ValueObject> DeserializeSeed<'de> for &PropertyBoundCodec<V> {
    type Value = Option<V>;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        let wire = Option::<Scalar>::deserialize(deserializer)?;
        Ok(self.read_scalar(wire))
    }
}
