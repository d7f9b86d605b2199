use album_kernel::{SAFE_ALPHABET, is_safe_id, safe_nanoid};

#[test]
fn generates_expected_length_and_charset() {
    let id = safe_nanoid!();
    assert_eq!(id.len(), 12);

    for ch in id.chars() {
        assert!(SAFE_ALPHABET.contains(&ch), "unexpected character in nanoid: {ch}");
    }
    assert!(is_safe_id(&id));
}

#[test]
fn custom_length() {
    let id = safe_nanoid!(20);
    assert_eq!(id.len(), 20);
}

#[test]
fn ambiguous_characters_are_rejected() {
    assert!(!is_safe_id(""));
    assert!(!is_safe_id("abc0"));
    assert!(!is_safe_id("Il1O"));
    assert!(is_safe_id("abc2XYZ"));
}
