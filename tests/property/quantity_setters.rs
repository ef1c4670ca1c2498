// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Quantity Setters

use proptest::prelude::*;
use servconf::{Quantity, ServerConfiguration};

use crate::fixtures::{test_cluster, RUNTIME};

const GIB: i128 = 1024 * 1024 * 1024;

fn configured() -> ServerConfiguration {
    let _guard = RUNTIME.enter();
    ServerConfiguration::new(test_cluster(), "alice", "web-01")
}

proptest! {
    /// Property: RAM magnitudes are read as whole gibibytes
    #[test]
    fn prop_ram_in_gibibytes(gib in 0i64..100_000) {
        let mut config = configured();

        config.set_ram(gib.to_string()).unwrap();
        prop_assert_eq!(config.ram().value(), i128::from(gib) * GIB);
    }

    /// Property: Disk and RAM are independent fields
    #[test]
    fn prop_disk_independent_of_ram(ram in 1i64..1024, disk in 1i64..1024) {
        let mut config = configured();

        config.set_ram(ram.to_string()).unwrap();
        config.set_disk(disk.to_string()).unwrap();

        prop_assert_eq!(config.ram().value(), i128::from(ram) * GIB);
        prop_assert_eq!(config.disk().value(), i128::from(disk) * GIB);
        prop_assert_eq!(config.to_public_view().disk, config.disk().to_string());
    }

    /// Property: Input without digits is rejected and changes nothing
    #[test]
    fn prop_non_numeric_ram_rejected(value in "[a-zA-Z]{1,10}") {
        let mut config = configured();
        config.set_ram("8").unwrap();

        prop_assert!(config.set_ram(&value).is_err());
        prop_assert_eq!(config.ram().to_string(), "8Gi");
    }

    /// Property: Fractional CPU values keep milli precision
    #[test]
    fn prop_cpu_millis_exact(whole in 0u32..1000, milli in 0u32..1000) {
        let mut config = configured();

        config.set_cpu(format!("{whole}.{milli:03}")).unwrap();
        let expected = i128::from(whole) * 1_000_000_000 + i128::from(milli) * 1_000_000;
        prop_assert_eq!(config.cpu().as_nanos(), expected);
    }

    /// Property: The canonical form parses back to the same magnitude
    #[test]
    fn prop_canonical_form_reparses(mantissa in -1_000_000i64..1_000_000, suffix in prop::sample::select(
        vec!["", "m", "k", "M", "Ki", "Mi", "Gi", "e3", "e-3"]
    )) {
        let quantity = Quantity::parse(&format!("{mantissa}{suffix}")).unwrap();
        let reparsed = Quantity::parse(&quantity.to_string()).unwrap();

        prop_assert_eq!(reparsed, quantity);
    }
}
