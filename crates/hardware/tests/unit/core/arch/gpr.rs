//! General-Purpose Register File Tests.

use rv32sim_core::core::arch::gpr::Gpr;

#[test]
fn registers_start_at_zero() {
    let gpr = Gpr::new();
    for i in 0..32 {
        assert_eq!(gpr.read(i), 0);
    }
}

#[test]
fn write_then_read() {
    let mut gpr = Gpr::new();
    for i in 1..32 {
        gpr.write(i, 0x1000 + i as u32);
    }
    for i in 1..32 {
        assert_eq!(gpr.read(i), 0x1000 + i as u32);
    }
}

#[test]
fn x0_ignores_writes() {
    let mut gpr = Gpr::new();
    gpr.write(0, 0xDEAD_BEEF);
    assert_eq!(gpr.read(0), 0);
    gpr.clear_zero();
    assert_eq!(gpr.read(0), 0);
}

#[test]
fn display_lists_abi_names() {
    let mut gpr = Gpr::new();
    gpr.write(10, 0x2A);
    let text = gpr.to_string();
    assert_eq!(text.lines().count(), 8);
    assert!(text.contains("a0=0x0000002a"), "{text}");
    assert!(text.contains("zero=0x00000000"), "{text}");
}
