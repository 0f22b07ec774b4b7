use factory_kpi::domain::{LineFilter, MeasurementRecord};

use super::RenderRequest;

fn hash_str(hasher: &mut blake3::Hasher, s: &str) {
    let len = s.len() as u32;
    hasher.update(&len.to_le_bytes());
    hasher.update(s.as_bytes());
}

fn hash_i64(hasher: &mut blake3::Hasher, v: i64) {
    hasher.update(&v.to_le_bytes());
}

fn hash_f64(hasher: &mut blake3::Hasher, v: f64) {
    hasher.update(&v.to_bits().to_le_bytes());
}

fn hash_record(hasher: &mut blake3::Hasher, m: &MeasurementRecord) {
    hasher.update(&m.date.to_julian_day().to_le_bytes());
    hash_str(hasher, &m.line);
    hash_i64(hasher, m.total_production);
    hash_i64(hasher, m.defects);
    hash_i64(hasher, m.energy_kwh);
    hash_f64(hasher, m.downtime_hours);
    hash_f64(hasher, m.performance_pct);
}

/// Content hash of a generated table and the selection rendered from it.
///
/// Identical configs produce identical tables, so the hash doubles as an
/// HTTP entity tag.
pub fn fingerprint(records: &[MeasurementRecord], request: &RenderRequest) -> String {
    let mut h = blake3::Hasher::new();
    h.update(&(records.len() as u64).to_le_bytes());
    for m in records {
        hash_record(&mut h, m);
    }

    hash_str(&mut h, request.period.as_str());
    match &request.line {
        LineFilter::All => {
            h.update(&[0]);
        }
        LineFilter::Line(id) => {
            h.update(&[1]);
            hash_str(&mut h, id);
        }
    }

    h.finalize().to_hex().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use factory_kpi::{domain::Period, generate, GeneratorConfig};

    fn request(period: Period, line: LineFilter) -> RenderRequest {
        RenderRequest { period, line }
    }

    #[test]
    fn stable_for_identical_tables() {
        let cfg = GeneratorConfig::default();
        let req = request(Period::Monthly, LineFilter::All);
        let a = fingerprint(&generate(&cfg), &req);
        let b = fingerprint(&generate(&cfg), &req);
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn changes_with_seed_and_selection() {
        let cfg = GeneratorConfig::default();
        let records = generate(&cfg);
        let base = fingerprint(&records, &request(Period::Monthly, LineFilter::All));

        let reseeded = generate(&GeneratorConfig {
            seed: 99,
            ..GeneratorConfig::default()
        });
        assert_ne!(base, fingerprint(&reseeded, &request(Period::Monthly, LineFilter::All)));
        assert_ne!(base, fingerprint(&records, &request(Period::Yearly, LineFilter::All)));
        assert_ne!(
            base,
            fingerprint(&records, &request(Period::Monthly, LineFilter::Line("Line A".to_string())))
        );
    }
}
