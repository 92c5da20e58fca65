use super::*;

#[test]
fn rng_is_seed_deterministic() {
    let mut a = Rng64::new(42);
    let mut b = Rng64::new(42);
    for _ in 0..8 {
        assert_eq!(a.next_u64(), b.next_u64());
    }
}

#[test]
fn hash01_stays_in_unit_range() {
    for seed in [0u32, 1, 7, u32::MAX] {
        for index in [-1000i64, -1, 0, 1, 999, i64::MAX] {
            let v = hash01(seed, index);
            assert!((0.0..1.0).contains(&v), "{v} out of range");
        }
    }
}

#[test]
fn hash01_depends_on_seed_and_index() {
    assert_ne!(hash01(1, 0), hash01(2, 0));
    assert_ne!(hash01(1, 0), hash01(1, 1));
    assert_eq!(hash01(9, 5).to_bits(), hash01(9, 5).to_bits());
}

#[test]
fn smoothstep_endpoints_and_midpoint() {
    assert_eq!(smoothstep(0.0), 0.0);
    assert_eq!(smoothstep(1.0), 1.0);
    assert_eq!(smoothstep(0.5), 0.5);
    assert_eq!(smoothstep(-3.0), 0.0);
}

#[test]
fn lattice_index_floors_negative_values() {
    assert_eq!(lattice_index(1.5), 1);
    assert_eq!(lattice_index(-0.25), -1);
}
