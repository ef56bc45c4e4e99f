//! Byte encodings shared by the field and curve types.

/// Canonical little-endian byte representation of a prime field element.
///
/// `[u8; N]` only implements `Default` up to 32 bytes, so the `ff::PrimeField`
/// representation of the 48 and 64 byte fields in this crate is wrapped here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Repr<const N: usize>([u8; N]);

impl<const N: usize> Repr<N> {
    pub fn inner(&self) -> &[u8; N] {
        &self.0
    }
}

impl<const N: usize> Default for Repr<N> {
    fn default() -> Self {
        Repr([0u8; N])
    }
}

impl<const N: usize> From<[u8; N]> for Repr<N> {
    fn from(bytes: [u8; N]) -> Self {
        Repr(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8]> for Repr<N> {
    /// Copies at most `N` bytes, zero padding shorter inputs.
    fn from(bytes: &'a [u8]) -> Self {
        let mut repr = [0u8; N];
        let len = bytes.len().min(N);
        repr[..len].copy_from_slice(&bytes[..len]);
        Repr(repr)
    }
}

impl<const N: usize> AsRef<[u8]> for Repr<N> {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> AsMut<[u8]> for Repr<N> {
    fn as_mut(&mut self) -> &mut [u8] {
        &mut self.0
    }
}

impl<const N: usize> core::ops::Deref for Repr<N> {
    type Target = [u8; N];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<const N: usize> core::ops::DerefMut for Repr<N> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

pub mod endian {
    /// Byte order used when a limb array is written out.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub enum Endian {
        LE,
        BE,
    }

    impl Endian {
        /// Writes `el` into `res`, which must hold `8 * el.len()` bytes.
        pub fn to_bytes(&self, res: &mut [u8], el: &[u64]) {
            debug_assert_eq!(res.len(), el.len() * 8);
            match self {
                Endian::LE => {
                    el.iter()
                        .zip(res.chunks_exact_mut(8))
                        .for_each(|(limb, chunk)| chunk.copy_from_slice(&limb.to_le_bytes()));
                }
                Endian::BE => {
                    el.iter()
                        .rev()
                        .zip(res.chunks_exact_mut(8))
                        .for_each(|(limb, chunk)| chunk.copy_from_slice(&limb.to_be_bytes()));
                }
            }
        }

        /// Reads `el.len()` limbs from `res`.
        pub fn from_bytes(&self, res: &[u8], el: &mut [u64]) {
            debug_assert_eq!(res.len(), el.len() * 8);
            let read = |chunk: &[u8]| {
                let mut buf = [0u8; 8];
                buf.copy_from_slice(chunk);
                buf
            };
            match self {
                Endian::LE => {
                    el.iter_mut()
                        .zip(res.chunks_exact(8))
                        .for_each(|(limb, chunk)| *limb = u64::from_le_bytes(read(chunk)));
                }
                Endian::BE => {
                    el.iter_mut()
                        .rev()
                        .zip(res.chunks_exact(8))
                        .for_each(|(limb, chunk)| *limb = u64::from_be_bytes(read(chunk)));
                }
            }
        }
    }

    /// Byte encoding with a fixed endianness, used by the curve point
    /// encodings to serialize coordinates.
    pub trait EndianRepr: Sized {
        const ENDIAN: Endian;

        fn to_bytes(&self) -> Vec<u8>;

        /// Fails unless `bytes` has exactly the encoded length of `Self` and
        /// holds a canonical value.
        fn from_bytes(bytes: &[u8]) -> subtle::CtOption<Self>;
    }
}

#[cfg(feature = "derive_serde")]
mod serde_impls {
    use super::Repr;

    impl<const N: usize> serde::Serialize for Repr<N> {
        fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            if serializer.is_human_readable() {
                serializer.serialize_str(&hex::encode(self.0))
            } else {
                serializer.serialize_bytes(&self.0)
            }
        }
    }

    impl<'de, const N: usize> serde::Deserialize<'de> for Repr<N> {
        fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            use serde::de::Error;
            let bytes: Vec<u8> = if deserializer.is_human_readable() {
                let s = <String as serde::Deserialize>::deserialize(deserializer)?;
                hex::decode(s).map_err(D::Error::custom)?
            } else {
                <Vec<u8> as serde::Deserialize>::deserialize(deserializer)?
            };
            if bytes.len() != N {
                return Err(D::Error::invalid_length(bytes.len(), &"a field encoding"));
            }
            Ok(Repr::from(bytes.as_slice()))
        }
    }
}

#[cfg(test)]
mod test {
    use super::endian::Endian;

    #[test]
    fn test_endian_round_trip() {
        let limbs = [0x0102030405060708u64, 0x1112131415161718];
        for endian in [Endian::LE, Endian::BE] {
            let mut bytes = [0u8; 16];
            endian.to_bytes(&mut bytes, &limbs);
            let mut back = [0u64; 2];
            endian.from_bytes(&bytes, &mut back);
            assert_eq!(back, limbs);
        }

        let mut le = [0u8; 16];
        Endian::LE.to_bytes(&mut le, &limbs);
        assert_eq!(le[0], 0x08);
        let mut be = [0u8; 16];
        Endian::BE.to_bytes(&mut be, &limbs);
        assert_eq!(be[0], 0x11);
        assert_eq!(be[15], 0x08);
    }
}
