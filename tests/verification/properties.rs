//! Property tests for the address codec and amount converter.

use proptest::prelude::*;
use tronpay::address::{AddressFormat, BINARY_ADDRESS_LEN, MAINNET_VERSION_BYTE};
use tronpay::{
    decode_address, encode_address, is_text_address, to_decimal, to_smallest_unit,
    AddressCodec, Error,
};

/// Arbitrary mainnet binary address.
fn arb_address() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), BINARY_ADDRESS_LEN - 1..=BINARY_ADDRESS_LEN - 1).prop_map(
        |identity| {
            let mut binary = vec![MAINNET_VERSION_BYTE];
            binary.extend(identity);
            binary
        },
    )
}

proptest! {
    #[test]
    fn prop_address_round_trip(binary in arb_address()) {
        let text = encode_address(&binary).unwrap();
        prop_assert!(is_text_address(&text));
        prop_assert_eq!(decode_address(&text).unwrap().to_vec(), binary);
    }

    #[test]
    fn prop_single_byte_corruption_is_caught(
        binary in arb_address(),
        index in 0usize..BINARY_ADDRESS_LEN + 4,
        flip in 1u8..=255,
    ) {
        let text = encode_address(&binary).unwrap();
        let mut raw = bs58::decode(&text).into_vec().unwrap();
        raw[index] ^= flip;
        let tampered = bs58::encode(raw).into_string();

        prop_assert!(matches!(decode_address(&tampered), Err(Error::ChecksumMismatch)));
    }

    #[test]
    fn prop_leading_zero_bytes_survive(zeros in 1usize..=BINARY_ADDRESS_LEN, tail in any::<u8>()) {
        // Zero version byte so leading zero bytes reach the Base58 layer.
        let codec = AddressCodec::new(AddressFormat {
            version_byte: 0x00,
            text_prefix: '1',
            text_len: 0,
        });
        let mut binary = [0u8; BINARY_ADDRESS_LEN];
        if zeros < BINARY_ADDRESS_LEN {
            binary[zeros] = tail.max(1);
        }

        let text = codec.encode(&binary).unwrap();
        prop_assert!(text.starts_with(&"1".repeat(zeros)));
        prop_assert_eq!(codec.decode(&text).unwrap(), binary);
    }

    #[test]
    fn prop_smallest_unit_round_trip(value in any::<u128>(), decimals in 0u32..=24) {
        let integer = value.to_string();
        let decimal = to_decimal(&integer, decimals).unwrap();
        prop_assert_eq!(to_smallest_unit(&decimal, decimals).unwrap(), integer);
    }

    #[test]
    fn prop_decimal_round_trip(whole in 0u64..1_000_000_000, fraction in "[0-9]{0,6}") {
        let canonical_fraction = fraction.trim_end_matches('0');
        let decimal = if canonical_fraction.is_empty() {
            whole.to_string()
        } else {
            format!("{whole}.{canonical_fraction}")
        };

        let smallest = to_smallest_unit(&decimal, 6).unwrap();
        prop_assert_eq!(to_decimal(&smallest, 6).unwrap(), decimal);
    }

    #[test]
    fn prop_excess_digits_truncate(whole in 0u32..1000, kept in "[0-9]{6}", extra in "[0-9]{1,4}") {
        let truncated = to_smallest_unit(&format!("{whole}.{kept}{extra}"), 6).unwrap();
        let exact = to_smallest_unit(&format!("{whole}.{kept}"), 6).unwrap();
        prop_assert_eq!(truncated, exact);
    }
}

#[test]
fn test_documented_amount_cases() {
    assert_eq!(to_decimal(&to_smallest_unit("12.5", 6).unwrap(), 6).unwrap(), "12.5");
    assert_eq!(to_smallest_unit("0.000001", 6).unwrap(), "1");
    assert_eq!(to_smallest_unit("3", 6).unwrap(), "3000000");
    assert_eq!(to_smallest_unit("1.1234567", 6).unwrap(), "1123456");
}
