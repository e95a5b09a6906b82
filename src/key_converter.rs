//! Converts trie keys into the byte sequences the trie branches on.
//!
//! A trie orders its entries by the bytes of their keys, so a converter must
//! be order-preserving: for any two keys `a < b`, `convert(a) < convert(b)`
//! under lexicographic byte comparison. UTF-8 byte order matches the code
//! point order of `str`, and big-endian integers with a flipped sign bit
//! compare like the integers themselves.
use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

/// Maps a key of type `K` onto the symbols a [`Trie`](crate::Trie) stores.
pub trait KeyToBytes<K: Ord>: Clone {
    /// Returns the symbols of `key`, borrowed from it when possible.
    fn convert(key: &K) -> Cow<'_, [u8]>;
}

macro_rules! converter {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        pub struct $name<K>(PhantomData<fn() -> K>);

        impl<K> $name<K> {
            pub fn new() -> Self {
                $name(PhantomData)
            }
        }

        impl<K> Default for $name<K> {
            fn default() -> Self {
                Self::new()
            }
        }

        // Manual impls: a converter holds no `K`, so no bounds on it are needed.
        impl<K> Clone for $name<K> {
            fn clone(&self) -> Self {
                Self::new()
            }
        }

        impl<K> fmt::Debug for $name<K> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(stringify!($name))
            }
        }
    };
}

converter! {
    /// Uses the UTF-8 bytes of keys that implement `AsRef<str>`, such as
    /// `String`, `&str` or `url::Url`.
    StrKeyConverter
}

converter! {
    /// Uses the bytes of keys that implement `AsRef<[u8]>`, such as
    /// `Vec<u8>` or `&[u8]`.
    BytesKeyConverter
}

converter! {
    /// Encodes primitive integers big-endian. Signed integers get their sign
    /// bit flipped so that negative keys sort before positive ones.
    IntKeyConverter
}

impl<K: Ord + AsRef<str>> KeyToBytes<K> for StrKeyConverter<K> {
    fn convert(key: &K) -> Cow<'_, [u8]> {
        Cow::Borrowed(key.as_ref().as_bytes())
    }
}

impl<K: Ord + AsRef<[u8]>> KeyToBytes<K> for BytesKeyConverter<K> {
    fn convert(key: &K) -> Cow<'_, [u8]> {
        Cow::Borrowed(key.as_ref())
    }
}

macro_rules! unsigned_keys {
    ($($int:ty),*) => {$(
        impl KeyToBytes<$int> for IntKeyConverter<$int> {
            fn convert(key: &$int) -> Cow<'_, [u8]> {
                Cow::Owned(key.to_be_bytes().to_vec())
            }
        }
    )*};
}

macro_rules! signed_keys {
    ($($int:ty => $unsigned:ty),*) => {$(
        impl KeyToBytes<$int> for IntKeyConverter<$int> {
            fn convert(key: &$int) -> Cow<'_, [u8]> {
                let flipped = (*key as $unsigned) ^ (1 << (<$unsigned>::BITS - 1));
                Cow::Owned(flipped.to_be_bytes().to_vec())
            }
        }
    )*};
}

unsigned_keys!(u8, u16, u32, u64, u128, usize);
signed_keys!(i8 => u8, i16 => u16, i32 => u32, i64 => u64, i128 => u128, isize => usize);

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted_by_symbols<K, C>(keys: &[K]) -> bool
    where
        K: Ord,
        C: KeyToBytes<K>,
    {
        keys.windows(2).all(|pair| C::convert(&pair[0]) < C::convert(&pair[1]))
    }

    #[test]
    fn test_str_keys_are_borrowed() {
        let owned = "Miljenko".to_string();
        let symbols = StrKeyConverter::<String>::convert(&owned);
        assert_eq!(symbols.as_ref(), b"Miljenko");
        assert!(matches!(symbols, Cow::Borrowed(_)));

        let raw = vec![0u8, 7, 255];
        let symbols = BytesKeyConverter::<Vec<u8>>::convert(&raw);
        assert_eq!(symbols.as_ref(), &[0, 7, 255]);
        assert!(matches!(symbols, Cow::Borrowed(_)));
    }

    #[test]
    fn test_str_order_is_kept() {
        let mut keys = vec!["Ž", "Mate", "a", "", "Mat", "Z", "ć", "Matea"];
        keys.sort();
        assert!(sorted_by_symbols::<&str, StrKeyConverter<&str>>(&keys));
    }

    #[test]
    fn test_int_order_is_kept() {
        let signed = [i32::MIN, -70_000, -1, 0, 1, 255, 256, i32::MAX];
        assert!(sorted_by_symbols::<i32, IntKeyConverter<i32>>(&signed));

        let unsigned = [0u64, 1, 255, 256, 1 << 40, u64::MAX];
        assert!(sorted_by_symbols::<u64, IntKeyConverter<u64>>(&unsigned));

        assert_eq!(IntKeyConverter::<u16>::convert(&0x0102).as_ref(), &[1, 2]);
        assert_eq!(IntKeyConverter::<i8>::convert(&-1).as_ref(), &[0x7f]);
    }

    #[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
    struct Surname(String);

    impl AsRef<str> for Surname {
        fn as_ref(&self) -> &str {
            &self.0
        }
    }

    #[test]
    fn test_custom_str_key() {
        let key = Surname("Horvat".to_string());
        assert_eq!(StrKeyConverter::<Surname>::convert(&key).as_ref(), b"Horvat");
        assert_eq!(format!("{:?}", StrKeyConverter::<Surname>::new()), "StrKeyConverter");
    }
}
