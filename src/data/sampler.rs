use std::ops::RangeInclusive;

use rand::Rng;
use time::OffsetDateTime;

use super::model::SampleReading;

// ---------------------------------------------------------------------------
// Simulation bounds
// ---------------------------------------------------------------------------

pub const ID_RANGE: RangeInclusive<i64> = 1..=100;
pub const INITIAL_HUMIDITY_PCT: RangeInclusive<f64> = 20.0..=80.0;
pub const INITIAL_TEMPERATURE_C: RangeInclusive<f64> = 30.0..=80.0;
pub const MATERIAL_DENSITY_G_CM3: RangeInclusive<f64> = 0.5..=1.5;
pub const FILTER_POROSITY_UM: RangeInclusive<f64> = 5.0..=50.0;
pub const ORGANIC_CONTENT_PCT: RangeInclusive<f64> = 1.0..=10.0;
pub const CYCLE_DURATION_MIN: RangeInclusive<f64> = 10.0..=60.0;
pub const DRYING_EFFICIENCY_PCT: RangeInclusive<f64> = 50.0..=95.0;

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Simulate one drying cycle using the thread RNG and the wall clock.
pub fn generate() -> SampleReading {
    let now = OffsetDateTime::now_utc().unix_timestamp();
    generate_with(&mut rand::rng(), now)
}

/// Simulate one drying cycle from an explicit RNG and start timestamp.
///
/// Every field is drawn independently and uniformly from its bounds.
pub fn generate_with<R: Rng>(rng: &mut R, started_at: i64) -> SampleReading {
    SampleReading {
        id: rng.random_range(ID_RANGE),
        initial_humidity_pct: rng.random_range(INITIAL_HUMIDITY_PCT),
        initial_temperature_c: rng.random_range(INITIAL_TEMPERATURE_C),
        material_density_g_cm3: rng.random_range(MATERIAL_DENSITY_G_CM3),
        filter_porosity_um: rng.random_range(FILTER_POROSITY_UM),
        organic_content_pct: rng.random_range(ORGANIC_CONTENT_PCT),
        cycle_start_ts: started_at,
        cycle_duration_min: rng.random_range(CYCLE_DURATION_MIN),
        drying_efficiency_pct: rng.random_range(DRYING_EFFICIENCY_PCT),
        final_humidity_class: rng.random_range(0..=1u8),
        needs_another_cycle: rng.random_bool(0.5),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn generated_fields_stay_within_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..2_000 {
            let r = generate_with(&mut rng, 1_700_000_000);
            assert!(ID_RANGE.contains(&r.id));
            assert!(INITIAL_HUMIDITY_PCT.contains(&r.initial_humidity_pct));
            assert!(INITIAL_TEMPERATURE_C.contains(&r.initial_temperature_c));
            assert!(MATERIAL_DENSITY_G_CM3.contains(&r.material_density_g_cm3));
            assert!(FILTER_POROSITY_UM.contains(&r.filter_porosity_um));
            assert!(ORGANIC_CONTENT_PCT.contains(&r.organic_content_pct));
            assert!(CYCLE_DURATION_MIN.contains(&r.cycle_duration_min));
            assert!(DRYING_EFFICIENCY_PCT.contains(&r.drying_efficiency_pct));
            assert!(r.final_humidity_class <= 1);
            assert_eq!(r.cycle_start_ts, 1_700_000_000);
        }
    }

    #[test]
    fn both_hints_take_both_values() {
        let mut rng = StdRng::seed_from_u64(11);
        let samples: Vec<SampleReading> = (0..200).map(|_| generate_with(&mut rng, 0)).collect();
        assert!(samples.iter().any(|r| r.final_humidity_class == 0));
        assert!(samples.iter().any(|r| r.final_humidity_class == 1));
        assert!(samples.iter().any(|r| r.needs_another_cycle));
        assert!(samples.iter().any(|r| !r.needs_another_cycle));
    }

    #[test]
    fn generate_stamps_current_time() {
        let before = OffsetDateTime::now_utc().unix_timestamp();
        let reading = generate();
        let after = OffsetDateTime::now_utc().unix_timestamp();
        assert!(reading.cycle_start_ts >= before - 1);
        assert!(reading.cycle_start_ts <= after + 1);
    }

    #[test]
    fn same_seed_same_reading() {
        let a = generate_with(&mut StdRng::seed_from_u64(3), 10);
        let b = generate_with(&mut StdRng::seed_from_u64(3), 10);
        assert_eq!(a, b);
    }
}
