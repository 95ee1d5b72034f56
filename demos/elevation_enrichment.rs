//! Filling in missing elevations through a lookup service.
//!
//! The service here is a stand-in that derives a height from the latitude;
//! a real one would call a remote API in batches.
//!
//! Run with: RUST_LOG=info cargo run --example elevation_enrichment

use poimerge::{
    DeviceProfile, ElevationLookup, ElevationProvider, ElevationRequest, PoiCollection, PoiId,
    PoiRecord, Result, suggest_symbol,
};

/// Answers at most `batch_size` requests per call, like a rate-limited API.
struct FakeElevationService {
    batch_size: usize,
    calls: usize,
}

impl ElevationProvider for FakeElevationService {
    fn lookup(&mut self, requests: &[ElevationRequest]) -> Result<Vec<(PoiId, ElevationLookup)>> {
        let mut answers = Vec::with_capacity(requests.len());
        for chunk in requests.chunks(self.batch_size) {
            self.calls += 1;
            for request in chunk {
                let lookup = if request.latitude > 70.0 {
                    ElevationLookup::Unavailable
                } else {
                    ElevationLookup::Found(((request.latitude - 60.0) * 900.0).max(1.0).round())
                };
                answers.push((request.id, lookup));
            }
        }
        Ok(answers)
    }
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("=== Elevation enrichment ===\n");

    let mut pois = PoiCollection::new();
    pois.add(vec![
        PoiRecord::new("Fannaråkhytta", 61.5153, 7.9061).with_elevation(0.0),
        PoiRecord::new("Store Skagastølstind", 61.4606, 7.8703),
        PoiRecord::new("Sjoa fiskeplass", 61.6800, 9.5500).with_description("Good fishing"),
        PoiRecord::new("Svalbard cabin", 78.2000, 15.6000),
        PoiRecord::new("Juvasshytta", 61.6772, 8.3697).with_elevation(1841.0),
    ]);

    let cleared = pois.clear_zero_elevations();
    println!("1. Cleared {} zero elevations", cleared);
    println!("2. {} entries need elevation", pois.pending_elevations().len());

    let mut service = FakeElevationService {
        batch_size: 2,
        calls: 0,
    };
    let updated = pois.enrich_elevations(&mut service)?;
    println!(
        "3. Service updated {} entries in {} calls",
        updated, service.calls
    );

    let device = DeviceProfile {
        max_name_chars: 14,
        max_description_chars: 20,
    };
    println!("\n4. Prepared for a GPS unit:");
    for poi in device.prepare_all(pois.as_slice()) {
        println!(
            "   {:<14} {:<26} {}",
            poi.name(),
            poi.symbol().unwrap_or(suggest_symbol(&poi)),
            poi.elevation()
                .map(|e| format!("{:.0} m", e))
                .unwrap_or_else(|| "unknown".to_string())
        );
    }

    Ok(())
}
