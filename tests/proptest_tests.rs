//! Property-based tests for parsing, geometry and pricing invariants.

use nalgebra::Vector3;
use proptest::prelude::*;
use stl_quote::{
    analyze_stl, cost, parse_stl, weight, Facet, Material, Mesh, ParseError, ParseOptions,
};

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

fn arb_vec3() -> impl Strategy<Value = Vector3<f32>> {
    (-500.0f32..500.0, -500.0f32..500.0, -500.0f32..500.0)
        .prop_map(|(x, y, z)| Vector3::new(x, y, z))
}

fn arb_facet() -> impl Strategy<Value = Facet> {
    (arb_vec3(), arb_vec3(), arb_vec3(), arb_vec3())
        .prop_map(|(n, a, b, c)| Facet::new(n, a, b, c))
}

fn arb_mesh() -> impl Strategy<Value = Mesh> {
    prop::collection::vec(arb_facet(), 1..64).prop_map(Mesh::from_facets)
}

fn arb_material() -> impl Strategy<Value = Material> {
    prop::sample::select(Material::ALL.to_vec())
}

// ---------------------------------------------------------------------------
// 1. Parsed facet count equals the declared count
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn parsed_count_matches_declared(mesh in arb_mesh(), trailing in 0usize..100) {
        let mut bytes = mesh.to_stl_bytes();
        prop_assert_eq!(bytes.len(), 84 + 50 * mesh.facet_count());
        bytes.extend(std::iter::repeat(0xAB).take(trailing));

        let parsed = parse_stl(&bytes, &ParseOptions::default()).unwrap();
        prop_assert_eq!(parsed.facet_count(), mesh.facet_count());
        prop_assert_eq!(parsed, mesh);
    }
}

// ---------------------------------------------------------------------------
// 2. Any cut inside the facet data is reported as truncation
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn short_buffer_is_truncated(mesh in arb_mesh(), cut in 1usize..50) {
        let mut bytes = mesh.to_stl_bytes();
        let full = bytes.len();
        bytes.truncate(full - cut);

        let result = parse_stl(&bytes, &ParseOptions::default());
        prop_assert_eq!(
            result,
            Err(ParseError::TruncatedFile { expected: full, actual: full - cut })
        );
    }
}

// ---------------------------------------------------------------------------
// 3. Weight always lands in [2, 200] g
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn weight_within_bounds(volume in -1.0e12f64..1.0e12, material in arb_material()) {
        let grams = weight(volume, material.as_str()).unwrap();
        prop_assert!((2.0..=200.0).contains(&grams), "weight {} out of bounds", grams);
    }

    #[test]
    fn analyzed_weight_within_bounds(mesh in arb_mesh(), material in arb_material()) {
        let result = analyze_stl(&mesh.to_stl_bytes(), material.as_str(), &ParseOptions::default())
            .unwrap();
        prop_assert!(result.weight >= 2.0 && result.weight <= 200.0);
        prop_assert!(result.mesh_volume >= 0.0);
        prop_assert!(!result.surface_area.is_nan());
    }
}

// ---------------------------------------------------------------------------
// 4. Cost is linear in quantity
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn cost_linear_in_quantity(
        grams in 2.0f64..200.0,
        material in arb_material(),
        quantity in 1u32..1000,
    ) {
        let one = cost(grams, material.as_str(), 1).unwrap();
        let two = cost(grams, material.as_str(), 2).unwrap();
        let many = cost(grams, material.as_str(), quantity).unwrap();

        prop_assert_eq!(two, 2.0 * one);
        prop_assert!((many - one * f64::from(quantity)).abs() <= 1e-9 * many.abs().max(1.0));
    }
}

// ---------------------------------------------------------------------------
// 5. Identical bytes give bit-identical results
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn analysis_is_deterministic(mesh in arb_mesh(), material in arb_material()) {
        let bytes = mesh.to_stl_bytes();
        let a = analyze_stl(&bytes, material.as_str(), &ParseOptions::default()).unwrap();
        let b = analyze_stl(&bytes, material.as_str(), &ParseOptions::default()).unwrap();

        prop_assert_eq!(a.volume.to_bits(), b.volume.to_bits());
        prop_assert_eq!(a.weight.to_bits(), b.weight.to_bits());
        prop_assert_eq!(a.surface_area.to_bits(), b.surface_area.to_bits());
        prop_assert_eq!(a.bounding_box, b.bounding_box);
    }
}

// ---------------------------------------------------------------------------
// 6. Flipping every stored normal flips the sign, never the weight
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn normal_orientation_never_leaks(mesh in arb_mesh(), material in arb_material()) {
        let flipped: Mesh = mesh.iter().map(Facet::flipped_normal).collect();

        let report = mesh.analyze();
        let report_flipped = flipped.analyze();
        prop_assert_eq!(report.signed_volume, -report_flipped.signed_volume);

        let a = analyze_stl(&mesh.to_stl_bytes(), material.as_str(), &ParseOptions::default()).unwrap();
        let b = analyze_stl(&flipped.to_stl_bytes(), material.as_str(), &ParseOptions::default()).unwrap();
        prop_assert_eq!(a.weight, b.weight);
    }
}
