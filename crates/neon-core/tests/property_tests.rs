//! Property-based tests for neon-core
//!
//! Uses proptest to verify invariants across randomized inputs

use neon_core::{
    is_valid_address, is_valid_nep2, is_valid_wif_or_private_key, nep2, Account, Address,
    PrivateKey,
};
use neon_params::{Network, ScryptParams};
use proptest::prelude::*;

const FAST: ScryptParams = ScryptParams {
    log_n: 6,
    r: 8,
    p: 1,
};

// ============================================================================
// Property Test Strategies
// ============================================================================

/// Generate valid private keys from random scalars
fn private_key_strategy() -> impl Strategy<Value = PrivateKey> {
    prop::array::uniform32(any::<u8>())
        .prop_filter_map("scalar must be in range", |bytes| {
            PrivateKey::from_bytes(&bytes).ok()
        })
}

/// Generate arbitrary text outside the hex alphabet
fn garbage_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[g-zG-Z ]{0,80}").unwrap()
}

/// Generate passphrases long enough for login (4-40 chars)
fn passphrase_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9 ]{4,40}").unwrap()
}

// ============================================================================
// Key Derivation Properties
// ============================================================================

proptest! {
    /// Property: Same key = same address, every time
    #[test]
    fn prop_deterministic_account_derivation(key in private_key_strategy()) {
        let network = Network::mainnet();

        let first = Account::from_private_key(key.clone(), &network);
        let second = Account::from_private_key(key, &network);

        prop_assert_eq!(first.address(), second.address());
    }

    /// Property: Hex and WIF forms of a key derive the same account
    #[test]
    fn prop_hex_and_wif_agree(key in private_key_strategy()) {
        let network = Network::mainnet();

        let from_hex = PrivateKey::parse(&key.to_hex(), &network).unwrap();
        let from_wif = PrivateKey::parse(&key.to_wif(&network), &network).unwrap();

        let a = Account::from_private_key(from_hex, &network);
        let b = Account::from_private_key(from_wif, &network);
        prop_assert_eq!(a.address(), b.address());
    }

    /// Property: Every derived address validates
    #[test]
    fn prop_derived_addresses_validate(key in private_key_strategy()) {
        let network = Network::mainnet();
        let account = Account::from_private_key(key, &network);
        prop_assert!(is_valid_address(account.address().as_str(), &network));
    }

    /// Property: A public-key-only account has the same address as the full one
    #[test]
    fn prop_public_key_account_matches(key in private_key_strategy()) {
        let network = Network::mainnet();
        let public = Account::from_public_key(key.public_key(), &network);
        let full = Account::from_private_key(key, &network);
        prop_assert_eq!(public.address(), full.address());
    }
}

// ============================================================================
// Validation Properties
// ============================================================================

proptest! {
    /// Property: Random text is never accepted as key, address or NEP-2
    #[test]
    fn prop_garbage_rejected(input in garbage_strategy()) {
        let network = Network::mainnet();
        prop_assert!(!is_valid_wif_or_private_key(&input, &network));
        prop_assert!(!is_valid_address(&input, &network));
        prop_assert!(!is_valid_nep2(&input));
    }

    /// Property: Changing one character of an address invalidates it
    #[test]
    fn prop_address_tamper_detected(key in private_key_strategy(), position in 0usize..34) {
        let network = Network::mainnet();
        let address = Address::from_public_key(&key.public_key(), &network);

        let mut chars: Vec<char> = address.as_str().chars().collect();
        chars[position] = if chars[position] == 'z' { 'y' } else { 'z' };
        let tampered: String = chars.into_iter().collect();

        prop_assert!(!is_valid_address(&tampered, &network));
    }
}

// ============================================================================
// NEP-2 Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Property: The right passphrase always opens the envelope
    #[test]
    fn prop_nep2_opens_with_passphrase(
        key in private_key_strategy(),
        passphrase in passphrase_strategy()
    ) {
        let network = Network::mainnet();
        let encrypted = nep2::encrypt(&key, &passphrase, &FAST, &network).unwrap();
        prop_assert!(is_valid_nep2(&encrypted));

        let decrypted = nep2::decrypt(&encrypted, &passphrase, &FAST, &network).unwrap();
        prop_assert_eq!(decrypted, key);
    }

    /// Property: A different passphrase never opens the envelope
    #[test]
    fn prop_nep2_rejects_other_passphrase(
        key in private_key_strategy(),
        pass1 in passphrase_strategy(),
        pass2 in passphrase_strategy()
    ) {
        prop_assume!(pass1 != pass2);
        let network = Network::mainnet();
        let encrypted = nep2::encrypt(&key, &pass1, &FAST, &network).unwrap();

        let result = nep2::decrypt(&encrypted, &pass2, &FAST, &network);
        prop_assert!(matches!(result, Err(neon_core::Error::Decryption(_))));
    }
}
