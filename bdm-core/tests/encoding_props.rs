use bdm_core::{
    array_to_string, decode, decode_array, encode, encode_array, string_to_array,
    string_to_array_with_ndim, Array, DEFAULT_SEPARATOR,
};
use proptest::prelude::*;

/// Base together with a digit sequence valid in that base
fn based_digits(max_base: u32, max_len: usize) -> impl Strategy<Value = (u32, Vec<u32>)> {
    (2..=max_base).prop_flat_map(move |base| {
        (Just(base), prop::collection::vec(0..base, 0..=max_len))
    })
}

/// Two-dimensional array of binary digits with at least two rows
fn grid(max_rows: usize, max_cols: usize) -> impl Strategy<Value = Array> {
    (2..=max_rows, 1..=max_cols).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(0..2u32, rows * cols)
            .prop_map(move |data| Array::new(vec![rows, cols], data).unwrap())
    })
}

proptest! {
    #[test]
    fn decode_inverts_encode((base, seq) in based_digits(10, 24)) {
        let code = encode(&seq, base).unwrap();
        prop_assert_eq!(decode(code, base, Some(seq.len())).unwrap(), seq);
    }

    #[test]
    fn encode_inverts_decode(code in any::<u64>(), base in 2u32..=16) {
        let code = u128::from(code);
        let seq = decode(code, base, None).unwrap();
        prop_assert_eq!(encode(&seq, base).unwrap(), code);
    }

    #[test]
    fn array_code_roundtrip(arr in grid(4, 4)) {
        let code = encode_array(&arr.view(), 2).unwrap();
        prop_assert_eq!(decode_array(code, arr.shape(), 2).unwrap(), arr);
    }

    #[test]
    fn string_roundtrip_2d(arr in grid(5, 5)) {
        let s = array_to_string(&arr.view(), DEFAULT_SEPARATOR).unwrap();
        prop_assert_eq!(string_to_array(&s, DEFAULT_SEPARATOR).unwrap(), arr);
    }

    #[test]
    fn string_roundtrip_with_ndim((_, data) in based_digits(4, 12)) {
        let arr = Array::from_vec(data);
        let s = array_to_string(&arr.view(), DEFAULT_SEPARATOR).unwrap();
        prop_assert_eq!(string_to_array_with_ndim(&s, DEFAULT_SEPARATOR, 1).unwrap(), arr);
    }
}

#[test]
fn codes_are_distinct_for_fixed_length() {
    let mut seen = std::collections::HashSet::new();
    for code in 0..81u128 {
        let seq = decode(code, 3, Some(4)).unwrap();
        assert_eq!(seq.len(), 4);
        assert!(seen.insert(seq));
    }
}
