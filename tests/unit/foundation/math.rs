use super::*;

#[test]
fn fnv_hash_is_stable_per_coordinate() {
    assert_eq!(hash_u32(7, 3, 4), hash_u32(7, 3, 4));
    assert_ne!(hash_u32(7, 3, 4), hash_u32(7, 4, 3));
    assert_ne!(hash_u32(7, 3, 4), hash_u32(8, 3, 4));
}

#[test]
fn mul_div255_variants_align() {
    for x in [0u16, 1, 127, 255] {
        for y in [0u16, 1, 127, 255] {
            assert_eq!(u16::from(mul_div255_u8(x, y)), mul_div255_u16(x, y));
        }
    }
}

#[test]
fn lerp_u8_is_monotonic() {
    let mut prev = 0u8;
    for t in 0..=255u8 {
        let v = lerp_u8(0, 255, t);
        assert!(v >= prev);
        prev = v;
    }
    assert_eq!(lerp_u8(0, 255, 255), 255);
    assert_eq!(lerp_u8(255, 0, 255), 0);
}

#[test]
fn unit_conversions_roundtrip() {
    for v in [0u8, 1, 128, 254, 255] {
        assert_eq!(from_unit(to_unit(v)), v);
    }
}
