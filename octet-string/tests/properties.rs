//! Property-based tests for `OctetString`

use octet_string::{xor_bytes, OctetString};
use proptest::prelude::*;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

fn hash_of(s: &OctetString) -> u64 {
    let mut h = DefaultHasher::new();
    s.hash(&mut h);
    h.finish()
}

proptest! {
    #[test]
    fn hex_round_trip(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let s = OctetString::new(bytes);
        prop_assert_eq!(OctetString::from_hex(&s.to_hex()).unwrap(), s);
    }

    #[test]
    fn xor_length_and_alignment(
        a in prop::collection::vec(any::<u8>(), 0..48),
        b in prop::collection::vec(any::<u8>(), 0..48),
    ) {
        let out = xor_bytes(&a, &b);
        prop_assert_eq!(out.len(), a.len().max(b.len()));
        prop_assert_eq!(&out, &xor_bytes(&b, &a));

        // XORing the shorter input back in restores the longer one
        let (long, short) = if a.len() >= b.len() { (&a, &b) } else { (&b, &a) };
        prop_assert_eq!(&xor_bytes(&out, short), long);
    }

    #[test]
    fn equality_matches_hash(
        a in prop::collection::vec(any::<u8>(), 0..16),
        b in prop::collection::vec(any::<u8>(), 0..16),
    ) {
        let (sa, sb) = (OctetString::new(a.clone()), OctetString::new(b.clone()));
        prop_assert_eq!(sa == sb, a == b);
        if sa == sb {
            prop_assert_eq!(hash_of(&sa), hash_of(&sb));
        }
    }

    #[test]
    fn slice_then_concat(bytes in prop::collection::vec(any::<u8>(), 0..64), cut in 0usize..64) {
        let s = OctetString::new(bytes);
        let cut = cut.min(s.len());
        let head = s.slice(0, cut).unwrap();
        let tail = s.slice_from(cut).unwrap();
        prop_assert_eq!(head.concat(&tail), s);
    }
}
