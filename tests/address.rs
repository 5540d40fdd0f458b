// SPDX short identifier: Unlicense

use std::collections::HashSet;

use sip_core::{
    common::*,
    address::{
        MetaAddress,
        StealthAddress,
        generate_meta_address,
        generate_stealth_address,
        derive_stealth_private_key,
        check_stealth_address,
        encode_meta_address,
        decode_meta_address,
        scan_stealth_addresses,
        ethereum::public_key_to_eth_address
    }
};

fn roundtrip(chain: Chain) {
    let keys = generate_meta_address(chain).unwrap();
    assert!(keys.meta_address.chain() == chain);
    assert!(keys.meta_address.spending_key().as_bytes().len() == chain.curve().public_key_length());

    let (stealth, _) = generate_stealth_address(&keys.meta_address).unwrap();
    assert!(stealth.curve() == chain.curve());

    //Recipient owns it
    assert!(check_stealth_address(&stealth, &keys.spending_private_key, &keys.viewing_private_key).unwrap());

    //Recovered key spends it
    let recovery = derive_stealth_private_key(&stealth, &keys.spending_private_key, &keys.viewing_private_key).unwrap();
    assert!(recovery.stealth_address == *stealth.address());
    assert!(recovery.ephemeral_public_key == *stealth.ephemeral_public_key());
    assert!(recovery.private_key.public_key(chain.curve()).unwrap() == *stealth.address());
}

#[test]
fn secp256k1_roundtrip_test() {
    for chain in [Chain::Ethereum, Chain::Polygon, Chain::Arbitrum, Chain::Optimism, Chain::Base, Chain::Bitcoin, Chain::Zcash] {
        roundtrip(chain);
    }
}

#[test]
fn ed25519_roundtrip_test() {
    for chain in [Chain::Solana, Chain::Near] {
        roundtrip(chain);
    }
}

#[test]
fn unlinkability_test() {
    for chain in [Chain::Ethereum, Chain::Solana] {
        let keys = generate_meta_address(chain).unwrap();

        let mut addresses = HashSet::new();
        let mut ephemeral_keys = HashSet::new();
        for _ in 0..100 {
            let (stealth, _) = generate_stealth_address(&keys.meta_address).unwrap();
            addresses.insert(*stealth.address());
            ephemeral_keys.insert(*stealth.ephemeral_public_key());
        }

        assert!(addresses.len() == 100);
        assert!(ephemeral_keys.len() == 100);
    }
}

#[test]
fn non_ownership_test() {
    for chain in [Chain::Ethereum, Chain::Near] {
        let alice = generate_meta_address(chain).unwrap();
        let bob = generate_meta_address(chain).unwrap();

        let (stealth, _) = generate_stealth_address(&alice.meta_address).unwrap();

        //Someone else's keys
        assert!(!check_stealth_address(&stealth, &bob.spending_private_key, &bob.viewing_private_key).unwrap());
        assert!(matches!(
            derive_stealth_private_key(&stealth, &bob.spending_private_key, &bob.viewing_private_key),
            Err(Error::Validation(_))
        ));

        //Corrupted view tag
        let corrupted = StealthAddress::new(
            *stealth.address(),
            *stealth.ephemeral_public_key(),
            stealth.view_tag().wrapping_add(1)
        ).unwrap();
        assert!(!check_stealth_address(&corrupted, &alice.spending_private_key, &alice.viewing_private_key).unwrap());

        //Swapped spending and viewing keys
        assert!(!check_stealth_address(&stealth, &alice.viewing_private_key, &alice.spending_private_key).unwrap_or(false));
    }
}

#[test]
fn meta_address_encoding_test() {
    for chain in Chain::ALL {
        let keys = generate_meta_address(chain).unwrap();
        let encoded = encode_meta_address(&keys.meta_address);

        assert!(encoded.starts_with(&format!("sip:{}:0x", chain)));
        assert!(encoded == encoded.to_lowercase());

        let decoded = decode_meta_address(&encoded).unwrap();
        assert!(decoded == keys.meta_address);
        assert!(decoded.to_string() == encoded);
        assert!(encoded.parse::<MetaAddress>().unwrap() == decoded);
    }
}

#[test]
fn canonical_encoding_only_test() {
    let keys = generate_meta_address(Chain::Ethereum).unwrap();
    let encoded = encode_meta_address(&keys.meta_address);
    let spending = keys.meta_address.spending_key().to_hex();
    let viewing = keys.meta_address.viewing_key().to_hex();

    //upper-case chain
    assert!(matches!(decode_meta_address(&encoded.replacen("ethereum", "ETHEREUM", 1)), Err(Error::Validation(_))));
    assert!(matches!(decode_meta_address(&encoded.replacen("ethereum", "Ethereum", 1)), Err(Error::Validation(_))));

    //upper-case hex
    let upper = format!("sip:ethereum:0x{}:{}", spending[2..].to_uppercase(), viewing);
    assert!(matches!(decode_meta_address(&upper), Err(Error::Validation(_))));
    let upper = format!("sip:ethereum:{}:0X{}", spending, &viewing[2..]);
    assert!(matches!(decode_meta_address(&upper), Err(Error::Validation(_))));

    //chain names alone still parse in any case
    assert!("ETHEREUM".parse::<Chain>().unwrap() == Chain::Ethereum);
}

#[test]
fn ed25519_zero_vector_test() {
    let zero = format!("0x{}", "00".repeat(32));
    let encoded = format!("sip:solana:{}:{}", zero, zero);

    let decoded = decode_meta_address(&encoded).unwrap();
    assert!(decoded.spending_key().as_bytes() == [0u8; 32]);
    assert!(decoded.viewing_key().as_bytes() == [0u8; 32]);
    assert!(encode_meta_address(&decoded) == encoded);

    //...but it is a small-order point, so nothing can be paid to it
    assert!(matches!(generate_stealth_address(&decoded), Err(Error::Validation(_))));
}

#[test]
fn cross_chain_isolation_test() {
    let secp = generate_meta_address(Chain::Ethereum).unwrap();
    let ed = generate_meta_address(Chain::Solana).unwrap();

    //ed25519 keys under a secp256k1 chain
    let encoded = format!("sip:ethereum:{}:{}",
        ed.meta_address.spending_key().to_hex(), ed.meta_address.viewing_key().to_hex());
    assert!(matches!(decode_meta_address(&encoded), Err(Error::Validation(_))));

    //secp256k1 keys under an ed25519 chain
    let encoded = format!("sip:near:{}:{}",
        secp.meta_address.spending_key().to_hex(), secp.meta_address.viewing_key().to_hex());
    assert!(matches!(decode_meta_address(&encoded), Err(Error::Validation(_))));

    //one of each
    let encoded = format!("sip:ethereum:{}:{}",
        secp.meta_address.spending_key().to_hex(), ed.meta_address.viewing_key().to_hex());
    assert!(matches!(decode_meta_address(&encoded), Err(Error::Validation(_))));

    assert!(matches!(
        MetaAddress::new(Chain::Ethereum, *ed.meta_address.spending_key(), *ed.meta_address.viewing_key()),
        Err(Error::Validation(_))
    ));
}

#[test]
fn invalid_input_test() {
    assert!(matches!("not-a-chain".parse::<Chain>(), Err(Error::Validation(_))));

    //x >= p is not a field element
    let off_curve = format!("0x02{}", "ff".repeat(32));
    let keys = generate_meta_address(Chain::Ethereum).unwrap();
    let encoded = format!("sip:ethereum:{}:{}", off_curve, keys.meta_address.viewing_key().to_hex());
    let meta = decode_meta_address(&encoded).unwrap();
    assert!(matches!(generate_stealth_address(&meta), Err(Error::Validation(_))));

    //non-canonical private key
    let (stealth, _) = generate_stealth_address(&keys.meta_address).unwrap();
    let bad = PrivateKey::from_bytes([0xff; 32]);
    assert!(matches!(check_stealth_address(&stealth, &bad, &keys.viewing_private_key), Err(Error::Validation(_))));
    assert!(matches!(derive_stealth_private_key(&stealth, &keys.spending_private_key, &bad), Err(Error::Validation(_))));
}

#[test]
fn invalid_viewing_key_test() {
    for chain in [Chain::Ethereum, Chain::Solana] {
        let keys = generate_meta_address(chain).unwrap();
        let (stealth, _) = generate_stealth_address(&keys.meta_address).unwrap();
        let mismatched = StealthAddress::new(
            *stealth.address(),
            *stealth.ephemeral_public_key(),
            stealth.view_tag().wrapping_add(1)
        ).unwrap();

        //rejected whether or not the view tag matches
        for candidate in [&stealth, &mismatched] {
            for bad in [PrivateKey::from_bytes([0u8; 32]), PrivateKey::from_bytes([0xff; 32])] {
                assert!(matches!(
                    check_stealth_address(candidate, &keys.spending_private_key, &bad),
                    Err(Error::Validation(_))
                ));
            }
        }
    }
}

#[test]
fn scan_test() {
    for chain in [Chain::Base, Chain::Solana] {
        let mine = generate_meta_address(chain).unwrap();
        let theirs = generate_meta_address(chain).unwrap();

        let mut candidates = Vec::new();
        let mut expected = Vec::new();
        for i in 0..40 {
            let meta = if i % 5 == 0 { &mine.meta_address } else { &theirs.meta_address };
            let (stealth, _) = generate_stealth_address(meta).unwrap();
            if i % 5 == 0 {
                expected.push(i);
            }
            candidates.push(stealth);
        }

        let found = scan_stealth_addresses(&candidates, &mine.spending_private_key, &mine.viewing_private_key).unwrap();
        assert!(found == expected);
    }
}

#[test]
fn scan_skips_malformed_test() {
    let keys = generate_meta_address(Chain::Solana).unwrap();
    let (good, _) = generate_stealth_address(&keys.meta_address).unwrap();

    //ephemeral key is a small-order point
    let garbage = StealthAddress::new(
        *good.address(),
        PublicKey::from_slice(Curve::Ed25519, &[0u8; 32]).unwrap(),
        good.view_tag()
    ).unwrap();

    let found = scan_stealth_addresses(&[garbage, good], &keys.spending_private_key, &keys.viewing_private_key).unwrap();
    assert!(found == vec![1]);

    //an unusable private key is an error, not an empty result
    assert!(scan_stealth_addresses(&[good], &PrivateKey::from_bytes([0u8; 32]), &keys.viewing_private_key).is_err());
}

#[test]
fn serialization_test() {
    let keys = generate_meta_address(Chain::Ethereum).unwrap();
    let (stealth, _) = generate_stealth_address(&keys.meta_address).unwrap();

    //JSON
    let json = serde_json::to_string(&stealth).unwrap();
    assert!(json.contains("\"ephemeralPublicKey\":\"0x"));
    assert!(serde_json::from_str::<StealthAddress>(&json).unwrap() == stealth);

    let json = serde_json::to_string(&keys.meta_address.clone().with_label("savings")).unwrap();
    let meta: MetaAddress = serde_json::from_str(&json).unwrap();
    assert!(meta.label() == Some("savings"));
    assert!(meta.spending_key() == keys.meta_address.spending_key());

    //Binary
    let bytes = stealth.to_bytes().unwrap();
    assert!(StealthAddress::from_bytes(&bytes).unwrap() == stealth);

    //mismatched curves are rejected on the way in
    let ed = generate_meta_address(Chain::Near).unwrap();
    let json = format!("{{\"address\":\"{}\",\"ephemeralPublicKey\":\"{}\",\"viewTag\":1}}",
        stealth.address().to_hex(), ed.meta_address.spending_key().to_hex());
    assert!(serde_json::from_str::<StealthAddress>(&json).is_err());
}

#[test]
fn eth_address_test() {
    let keys = generate_meta_address(Chain::Ethereum).unwrap();
    let (stealth, _) = generate_stealth_address(&keys.meta_address).unwrap();

    let address = public_key_to_eth_address(stealth.address()).unwrap();
    assert!(address.len() == 42);
    assert!(address.starts_with("0x"));

    let solana = generate_meta_address(Chain::Solana).unwrap();
    assert!(public_key_to_eth_address(solana.meta_address.spending_key()).is_err());
}
