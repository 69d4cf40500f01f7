//! End-to-end properties of the Thorp-shuffle Feistel cipher

use fpe_crypto::{BlockCipherKind, FeistelCipher, FpeConfig, FpeError, FpeKey, MAX_DOMAIN_SIZE};
use proptest::prelude::*;
use std::collections::HashSet;

/// Reference driver scenario: 17 values under "secret key"
mod reference_scenario {
    use super::*;

    const DOMAIN: u64 = 17;

    #[test_log::test]
    fn test_encrypts_to_permutation_and_back() {
        let cipher = FeistelCipher::new(DOMAIN, "secret key").unwrap();

        let encrypted: Vec<u64> = (0..DOMAIN).map(|i| cipher.encrypt(i).unwrap()).collect();
        let mut sorted = encrypted.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..DOMAIN).collect::<Vec<_>>());

        for (i, &e) in encrypted.iter().enumerate() {
            assert_eq!(cipher.decrypt(e).unwrap(), i as u64, "{i} -enc-> {e}");
        }
    }

    #[test]
    fn test_known_answer_tables() {
        // Computed independently from HMAC-SHA-256 + AES-ECB
        let cases: [(BlockCipherKind, [u64; 17], [u64; 17]); 3] = [
            (
                BlockCipherKind::Aes128,
                [13, 4, 1, 7, 6, 14, 0, 8, 12, 9, 15, 11, 2, 3, 5, 16, 10],
                [6, 2, 12, 13, 1, 14, 4, 3, 7, 9, 16, 11, 8, 0, 5, 10, 15],
            ),
            (
                BlockCipherKind::Aes192,
                [14, 1, 4, 12, 13, 2, 9, 11, 8, 3, 15, 6, 10, 0, 16, 5, 7],
                [13, 1, 5, 9, 2, 15, 11, 16, 8, 6, 12, 7, 3, 4, 0, 10, 14],
            ),
            (
                BlockCipherKind::Aes256,
                [1, 14, 10, 5, 9, 11, 3, 12, 13, 6, 15, 16, 7, 4, 0, 2, 8],
                [14, 0, 15, 6, 13, 3, 9, 12, 16, 4, 2, 5, 7, 8, 1, 10, 11],
            ),
        ];

        for (kind, encryption, decryption) in cases {
            let cipher = FeistelCipher::with_config(DOMAIN, "secret key", &FpeConfig::new(kind)).unwrap();
            assert_eq!(cipher.permutation().unwrap(), encryption, "{kind}");
            let inputs: Vec<u64> = (0..DOMAIN).collect();
            assert_eq!(cipher.decrypt_all(&inputs).unwrap(), decryption, "{kind}");
        }
    }

    #[test]
    fn test_larger_domain_known_answer() {
        let cipher = FeistelCipher::new(1000, "secret key").unwrap();
        let inputs: Vec<u64> = (0..10).collect();
        assert_eq!(
            cipher.encrypt_all(&inputs).unwrap(),
            vec![732, 769, 639, 424, 987, 656, 92, 3, 79, 881]
        );
    }
}

mod determinism {
    use super::*;

    #[test]
    fn test_same_key_same_permutation() {
        let a = FeistelCipher::new(500, "secret key").unwrap();
        let b = FeistelCipher::new(500, FpeKey::from_bytes(b"secret key").unwrap()).unwrap();
        assert_eq!(a.permutation().unwrap(), b.permutation().unwrap());
    }

    #[test]
    fn test_distinct_keys_distinct_permutations() {
        let a = FeistelCipher::new(500, "secret key").unwrap();
        let b = FeistelCipher::new(500, "secret kez").unwrap();
        assert_ne!(a.permutation().unwrap(), b.permutation().unwrap());

        let generated = FeistelCipher::new(500, FpeKey::generate()).unwrap();
        assert_ne!(a.permutation().unwrap(), generated.permutation().unwrap());
    }

    #[test]
    fn test_cipher_kind_changes_permutation() {
        let aes128 = FeistelCipher::new(500, "secret key").unwrap();
        let aes256 =
            FeistelCipher::with_config(500, "secret key", &FpeConfig::new(BlockCipherKind::Aes256)).unwrap();
        assert_ne!(aes128.permutation().unwrap(), aes256.permutation().unwrap());
    }

    #[test]
    fn test_empty_master_key_is_usable() {
        let cipher = FeistelCipher::new(33, "").unwrap();
        let table: HashSet<u64> = cipher.permutation().unwrap().into_iter().collect();
        assert_eq!(table.len(), 33);
    }
}

mod domain_limits {
    use super::*;

    #[test]
    fn test_construction_rejects_invalid_domains() {
        for domain_size in [0, MAX_DOMAIN_SIZE + 1, u64::MAX] {
            let err = FeistelCipher::new(domain_size, "secret key").unwrap_err();
            assert!(
                matches!(err, FpeError::InvalidDomain { .. }),
                "{domain_size}: {err}"
            );
        }
    }

    #[test]
    fn test_largest_domain_roundtrip() {
        let cipher = FeistelCipher::new(MAX_DOMAIN_SIZE, "secret key").unwrap();
        assert_eq!(cipher.domain_bits(), 63);
        for value in [0, 1, MAX_DOMAIN_SIZE / 2, MAX_DOMAIN_SIZE - 1] {
            let encrypted = cipher.encrypt(value).unwrap();
            assert!(encrypted < MAX_DOMAIN_SIZE);
            assert_eq!(cipher.decrypt(encrypted).unwrap(), value);
        }
        assert!(cipher.encrypt(MAX_DOMAIN_SIZE).unwrap_err().is_domain_error());
    }

    #[test]
    fn test_power_of_two_boundaries() {
        for domain_size in [2, 4, 8, 9, 15, 16, 255, 256] {
            let cipher = FeistelCipher::new(domain_size, "secret key").unwrap();
            let table: HashSet<u64> = cipher.permutation().unwrap().into_iter().collect();
            assert_eq!(table, (0..domain_size).collect::<HashSet<_>>());
            assert!(matches!(
                cipher.decrypt(domain_size),
                Err(FpeError::OutOfDomain { .. })
            ));
        }
    }
}

mod concurrency {
    use super::*;

    #[test]
    fn test_shared_cipher_across_threads() {
        let cipher = FeistelCipher::new(10_000, "secret key").unwrap();
        let expected: Vec<u64> = (0..400).map(|v| cipher.encrypt(v).unwrap()).collect();

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    scope.spawn(|| {
                        (0..400)
                            .map(|v| {
                                let e = cipher.encrypt(v).unwrap();
                                assert_eq!(cipher.decrypt(e).unwrap(), v);
                                e
                            })
                            .collect::<Vec<u64>>()
                    })
                })
                .collect();

            for handle in handles {
                assert_eq!(handle.join().unwrap(), expected);
            }
        });
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    #[test]
    fn prop_roundtrip_any_domain(
        (domain_size, value) in (1u64..=MAX_DOMAIN_SIZE).prop_flat_map(|n| (Just(n), 0..n)),
        key in proptest::collection::vec(any::<u8>(), 0..48),
    ) {
        let cipher = FeistelCipher::new(domain_size, &key).unwrap();

        let encrypted = cipher.encrypt(value).unwrap();
        prop_assert!(encrypted < domain_size);
        prop_assert_eq!(cipher.decrypt(encrypted).unwrap(), value);

        let decrypted = cipher.decrypt(value).unwrap();
        prop_assert!(decrypted < domain_size);
        prop_assert_eq!(cipher.encrypt(decrypted).unwrap(), value);
    }
}
