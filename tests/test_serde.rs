use serde_test::{assert_de_tokens, assert_de_tokens_error, assert_tokens, Token};
use treap_rotations::TreapSet;

#[test]
fn test_tokens() {
    let mut set = TreapSet::new();
    set.insert_with_priority(2u32, 10);
    set.insert_with_priority(1u32, 5);

    assert_tokens(
        &set,
        &[
            Token::Seq { len: Some(2) },
            Token::Struct { name: "Entry", len: 2 },
            Token::Str("key"),
            Token::U32(2),
            Token::Str("priority"),
            Token::U32(10),
            Token::StructEnd,
            Token::Struct { name: "Entry", len: 2 },
            Token::Str("key"),
            Token::U32(1),
            Token::Str("priority"),
            Token::U32(5),
            Token::StructEnd,
            Token::SeqEnd,
        ],
    );
}

#[test]
fn test_de_restores_heap_order() {
    let mut expected = TreapSet::new();
    expected.insert_with_priority(2u32, 50);
    expected.insert_with_priority(1u32, 1);

    assert_de_tokens(
        &expected,
        &[
            Token::Seq { len: Some(2) },
            Token::Struct { name: "Entry", len: 2 },
            Token::Str("key"),
            Token::U32(1),
            Token::Str("priority"),
            Token::U32(1),
            Token::StructEnd,
            Token::Struct { name: "Entry", len: 2 },
            Token::Str("key"),
            Token::U32(2),
            Token::Str("priority"),
            Token::U32(50),
            Token::StructEnd,
            Token::SeqEnd,
        ],
    );
}

#[test]
fn test_de_duplicate_key() {
    assert_de_tokens_error::<TreapSet<u32>>(
        &[
            Token::Seq { len: Some(2) },
            Token::Struct { name: "Entry", len: 2 },
            Token::Str("key"),
            Token::U32(1),
            Token::Str("priority"),
            Token::U32(1),
            Token::StructEnd,
            Token::Struct { name: "Entry", len: 2 },
            Token::Str("key"),
            Token::U32(1),
            Token::Str("priority"),
            Token::U32(7),
            Token::StructEnd,
            Token::SeqEnd,
        ],
        "duplicate key in treap",
    );
}

#[test]
fn test_bincode_round_trip() {
    let mut set = TreapSet::with_seed(11);
    for key in 0..1000u64 {
        set.insert(key * 7 % 1000);
    }

    let bytes = bincode::serialize(&set).unwrap();
    let decoded: TreapSet<u64> = bincode::deserialize(&bytes).unwrap();

    assert_eq!(decoded, set);
    assert_eq!(decoded.check_invariants(), Ok(()));
}

#[test]
fn test_bincode_round_trip_skewed() {
    let n = 2000u32;
    let mut set = TreapSet::new();
    for key in 0..n {
        set.insert_with_priority(key, key);
    }

    let bytes = bincode::serialize(&set).unwrap();
    let decoded: TreapSet<u32> = bincode::deserialize(&bytes).unwrap();

    assert_eq!(decoded.height(), n as usize);
    assert_eq!(decoded.root(), Some((&(n - 1), n - 1)));
    assert_eq!(decoded, set);
}
