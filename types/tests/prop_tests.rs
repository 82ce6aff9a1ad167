use proptest::prelude::*;

use tessera_types::{ChainId, CorrelationId, Signature, Timestamp, TokenId};

proptest! {
    /// Timestamp ordering mirrors the underlying seconds.
    #[test]
    fn timestamp_ordering(a in 0u64..u64::MAX, b in 0u64..u64::MAX) {
        let ta = Timestamp::new(a);
        let tb = Timestamp::new(b);
        prop_assert_eq!(ta <= tb, a <= b);
        prop_assert_eq!(ta == tb, a == b);
    }

    /// A deadline is past iff strictly exceeded — never at its own second.
    #[test]
    fn deadline_is_past_strictly(deadline in 0u64..u64::MAX / 2, offset in 0u64..1000) {
        let d = Timestamp::new(deadline);
        let now = Timestamp::new(deadline + offset);
        prop_assert_eq!(d.is_past(now), offset > 0);
    }

    /// plus_secs never wraps.
    #[test]
    fn plus_secs_never_wraps(base in 0u64.., add in 0u64..) {
        let t = Timestamp::new(base).plus_secs(add);
        prop_assert!(t.as_secs() >= base || t.as_secs() == u64::MAX);
    }

    /// Correlation ids are injective over (chain, token, nonce).
    #[test]
    fn correlation_id_injective(
        c1 in 0u64..100, t1 in 0u64..100, n1 in 0u64..100,
        c2 in 0u64..100, t2 in 0u64..100, n2 in 0u64..100,
    ) {
        let a = CorrelationId::new(ChainId::new(c1), TokenId::new(t1), n1);
        let b = CorrelationId::new(ChainId::new(c2), TokenId::new(t2), n2);
        prop_assert_eq!(a == b, (c1, t1, n1) == (c2, t2, n2));
    }

    /// Signature serde roundtrip through its hex form.
    #[test]
    fn signature_serde_roundtrip(bytes in prop::collection::vec(0u8.., 64)) {
        let mut arr = [0u8; 64];
        arr.copy_from_slice(&bytes);
        let sig = Signature(arr);
        let json = serde_json::to_string(&sig).unwrap();
        let back: Signature = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(sig, back);
    }
}
