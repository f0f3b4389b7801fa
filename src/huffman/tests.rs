use proptest::prelude::*;
use rand::seq::SliceRandom;

use crate::{bitstreams::BitSequence, error::HuffError};

use super::{
    FrequencyTable, HuffmanNode, EncodingMap,
    tree, huffman_encoder::encode, huffman_decoder::decode,
};

fn bits(s: &str) -> BitSequence {
    s.chars().map(|c| c == '1').collect()
}

fn codes(map: &EncodingMap) -> Vec<(u8, String)> {
    map.iter().map(|(byte, code)| (byte, code.to_string())).collect()
}

#[test]
fn test_analyze_counts() {
    let table = FrequencyTable::analyze(b"abracadabra");

    assert_eq!(table.len(), 5);
    assert_eq!(table.get(b'a'), Some(5));
    assert_eq!(table.get(b'b'), Some(2));
    assert_eq!(table.get(b'r'), Some(2));
    assert_eq!(table.get(b'c'), Some(1));
    assert_eq!(table.get(b'd'), Some(1));
    assert_eq!(table.get(b'z'), None);
    assert_eq!(table.total(), 11);

    let order: Vec<u8> = table.iter().map(|(b, _)| b).collect();
    assert_eq!(order, b"abcdr".to_vec());
}

#[test]
fn test_analyze_empty() {
    let table = FrequencyTable::analyze(&[]);

    assert!(table.is_empty());
    assert_eq!(table.total(), 0);
    assert!(tree::build(&table).is_none());
    assert!(EncodingMap::build(None).is_empty());
}

#[test]
fn test_zero_counts_are_dropped() {
    let table: FrequencyTable = vec![(1, 0), (2, 3), (2, 1)].into_iter().collect();

    assert_eq!(table.len(), 1);
    assert_eq!(table.get(2), Some(4));
}

#[test]
fn test_aaab_scenario() {
    let input = b"AAAB";
    let table = FrequencyTable::analyze(input);
    let root = tree::build(&table).unwrap();

    match &root {
        HuffmanNode::Internal { weight, left, right } => {
            assert_eq!(*weight, 4);
            assert_eq!(**left, HuffmanNode::new(b'B', 1));
            assert_eq!(**right, HuffmanNode::new(b'A', 3));
        },
        leaf => panic!("expected an internal root, got {:?}", leaf),
    }

    let map = EncodingMap::build(Some(&root));
    assert_eq!(map.get(b'B').unwrap().to_string(), "0");
    assert_eq!(map.get(b'A').unwrap().to_string(), "1");

    let encoded = encode(input, &map).unwrap();
    assert_eq!(encoded.to_string(), "1110");

    let decoded = decode(&bits("1110"), Some(&root), 4).unwrap();
    assert_eq!(decoded, input.to_vec());
}

#[test]
fn test_single_symbol_scenario() {
    let input = [0x42u8; 5];
    let table = FrequencyTable::analyze(&input);
    let root = tree::build(&table).unwrap();

    assert_eq!(root, HuffmanNode::new(0x42, 5));

    let map = EncodingMap::build(Some(&root));
    assert_eq!(codes(&map), vec![(0x42, "0".to_string())]);

    let encoded = encode(&input, &map).unwrap();
    assert_eq!(encoded.to_string(), "00000");

    let decoded = decode(&encoded, Some(&root), table.total()).unwrap();
    assert_eq!(decoded, input.to_vec());
}

#[test]
fn test_single_symbol_decode_errors() {
    let root = HuffmanNode::new(7, 3);

    assert!(matches!(decode(&bits("00"), Some(&root), 3), Err(HuffError::Decoding(_))));
    assert!(matches!(decode(&bits("0000"), Some(&root), 3), Err(HuffError::Decoding(_))));
    assert!(matches!(decode(&bits("010"), Some(&root), 3), Err(HuffError::Decoding(_))));
    assert_eq!(decode(&bits("000"), Some(&root), 3).unwrap(), vec![7, 7, 7]);
}

#[test]
fn test_decode_without_root() {
    assert!(decode(&BitSequence::new(), None, 0).unwrap().is_empty());
    assert!(matches!(decode(&bits("0"), None, 0), Err(HuffError::Decoding(_))));
    assert!(matches!(decode(&BitSequence::new(), None, 1), Err(HuffError::Decoding(_))));
}

#[test]
fn test_decode_exhausted_mid_code() {
    let table = FrequencyTable::analyze(b"aabbbcddddd");
    let root = tree::build(&table).unwrap();
    let map = EncodingMap::build(Some(&root));

    let mut encoded = encode(b"cab", &map).unwrap();
    let longest = map.iter().map(|(_, c)| c.len()).max().unwrap();
    assert!(longest > 1);

    // a dangling prefix of the longest code can never complete
    let (_, long_code) = map.iter().find(|(_, c)| c.len() == longest).unwrap();
    encoded.append_bits(&long_code.bits()[..longest - 1]);

    assert!(matches!(decode(&encoded, Some(&root), 4), Err(HuffError::Decoding(_))));
}

#[test]
fn test_decode_count_mismatch() {
    let table = FrequencyTable::analyze(b"AAAB");
    let root = tree::build(&table).unwrap();

    assert!(matches!(decode(&bits("1110"), Some(&root), 5), Err(HuffError::Decoding(_))));
}

#[test]
fn test_encode_missing_byte() {
    let table = FrequencyTable::analyze(b"abc");
    let map = EncodingMap::build(tree::build(&table).as_ref());

    match encode(b"abcd", &map) {
        Err(HuffError::Encoding(byte)) => assert_eq!(byte, b'd'),
        other => panic!("expected an encoding error, got {:?}", other),
    }
}

#[test]
fn test_all_equal_weights_give_balanced_codes() {
    let input: Vec<u8> = (0..=255).collect();
    let table = FrequencyTable::analyze(&input);
    let root = tree::build(&table).unwrap();
    let map = EncodingMap::build(Some(&root));

    assert_eq!(root.leaf_count(), 256);
    assert_eq!(map.len(), 256);
    assert!(map.iter().all(|(_, code)| code.len() == 8));
    assert_eq!(map.encoded_len(&table), Some(256 * 8));
}

#[test]
fn test_skewed_tree_is_deep() {
    // Fibonacci weights produce a maximally unbalanced tree
    let mut fib = vec![1u64, 1];
    while fib.len() < 60 {
        let next = fib[fib.len() - 1] + fib[fib.len() - 2];
        fib.push(next);
    }
    let table: FrequencyTable = fib.iter().enumerate().map(|(i, &w)| (i as u8, w)).collect();

    let root = tree::build(&table).unwrap();
    let map = EncodingMap::build(Some(&root));

    let longest = map.iter().map(|(_, c)| c.len()).max().unwrap();
    assert_eq!(longest, 59);
    assert_eq!(map.len(), 60);
}

#[test]
fn test_determinism_across_insertion_orders() {
    let mut rng = rand::thread_rng();
    let mut entries: Vec<(u8, u64)> = (0..=255u8).map(|b| (b, (b as u64 % 7) + 1)).collect();

    let reference = EncodingMap::build(tree::build(&entries.iter().copied().collect()).as_ref());

    for _ in 0..20 {
        entries.shuffle(&mut rng);
        let table: FrequencyTable = entries.iter().copied().collect();
        let map = EncodingMap::build(tree::build(&table).as_ref());

        assert_eq!(map, reference);
    }
}

#[test]
fn test_average_code_len() {
    let table = FrequencyTable::analyze(b"AAAB");
    let map = EncodingMap::build(tree::build(&table).as_ref());

    assert_eq!(map.average_code_len(&table), 1.0);
    assert_eq!(EncodingMap::default().average_code_len(&FrequencyTable::new()), 0.0);
}

proptest! {
    #[test]
    fn prop_codes_are_prefix_free(data in proptest::collection::vec(any::<u8>(), 2..2048)) {
        let table = FrequencyTable::analyze(&data);
        let map = EncodingMap::build(tree::build(&table).as_ref());

        prop_assert_eq!(map.len(), table.len());

        let all: Vec<_> = map.iter().collect();
        for (i, (_, a)) in all.iter().enumerate() {
            prop_assert!(!a.is_empty());
            for (j, (_, b)) in all.iter().enumerate() {
                if i != j {
                    prop_assert!(!a.is_prefix_of(b), "{} is a prefix of {}", a, b);
                }
            }
        }
    }

    #[test]
    fn prop_encode_then_decode(data in proptest::collection::vec(any::<u8>(), 0..4096)) {
        let table = FrequencyTable::analyze(&data);
        let root = tree::build(&table);
        let map = EncodingMap::build(root.as_ref());

        let encoded = encode(&data, &map).unwrap();
        prop_assert_eq!(Some(encoded.len() as u64), map.encoded_len(&table));

        let decoded = decode(&encoded, root.as_ref(), table.total()).unwrap();
        prop_assert_eq!(decoded, data);
    }

    #[test]
    fn prop_single_symbol(byte in any::<u8>(), n in 1usize..5000) {
        let data = vec![byte; n];
        let table = FrequencyTable::analyze(&data);
        let root = tree::build(&table);
        let map = EncodingMap::build(root.as_ref());

        let encoded = encode(&data, &map).unwrap();
        prop_assert_eq!(encoded.len(), n);

        let decoded = decode(&encoded, root.as_ref(), table.total()).unwrap();
        prop_assert_eq!(decoded, data);
    }
}
