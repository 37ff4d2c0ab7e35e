use credgate_backend_lib::auth::{
    generate_salt, hash_password, verify_password, HASH_HEX_LEN, SALT_HEX_LEN,
};

const PASSWORDS: &[&str] = &["Passw0rd", "Test123", "", "ñandú-Ünïcode-9A", "😀Ab1"];

fn is_lower_hex(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b))
}

/// Replace the character at `index` with a different one
fn mutate(s: &str, index: usize) -> String {
    s.chars()
        .enumerate()
        .map(|(i, c)| if i == index { if c == 'x' { 'y' } else { 'x' } } else { c })
        .collect()
}

#[test]
fn test_hashes_are_lowercase_hex_of_fixed_length() {
    for password in PASSWORDS {
        let salt = generate_salt();
        let hash = hash_password(password, &salt);
        assert_eq!(hash.len(), HASH_HEX_LEN, "{password}");
        assert!(is_lower_hex(&hash), "{password}");
    }
}

#[test]
fn test_salts_are_fresh_lowercase_hex() {
    let salts: Vec<String> = (0..64).map(|_| generate_salt()).collect();
    for salt in &salts {
        assert_eq!(salt.len(), SALT_HEX_LEN);
        assert!(is_lower_hex(salt));
    }
    for pair in salts.windows(2) {
        assert_ne!(pair[0], pair[1]);
    }
}

#[test]
fn test_hash_is_deterministic() {
    let salt = generate_salt();
    for password in PASSWORDS {
        assert_eq!(hash_password(password, &salt), hash_password(password, &salt));
    }
}

#[test]
fn test_every_single_character_change_alters_hash() {
    let password = "Passw0rd";
    let salt = generate_salt();
    let hash = hash_password(password, &salt);

    for i in 0..password.chars().count() {
        assert_ne!(hash, hash_password(&mutate(password, i), &salt), "password index {i}");
    }
    for i in 0..salt.chars().count() {
        assert_ne!(hash, hash_password(password, &mutate(&salt, i)), "salt index {i}");
    }
}

#[test]
fn test_verify_matches_only_original_inputs() {
    for password in PASSWORDS {
        let salt = generate_salt();
        let hash = hash_password(password, &salt);

        assert!(verify_password(password, &salt, &hash));
        assert!(!verify_password(&format!("{password}x"), &salt, &hash));
        assert!(!verify_password(password, &generate_salt(), &hash));
    }
}

#[test]
fn test_same_password_different_salts_differ() {
    let a = hash_password("Passw0rd", &generate_salt());
    let b = hash_password("Passw0rd", &generate_salt());
    assert_ne!(a, b);
}
