//! Merging waypoints from two overlapping sources.
//!
//! Run with: RUST_LOG=debug cargo run --example merge_sources

use poimerge::{DedupConfig, PoiCollection, PoiRecord};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("=== Merging two waypoint sources ===\n");

    let hiking_club = vec![
        PoiRecord::new("Gjendebu", 61.4822, 8.6286).with_symbol("Lodge"),
        PoiRecord::new("Memurubu", 61.5514, 8.5669),
        PoiRecord::new("Gjendesheim", 61.4942, 8.8133),
        PoiRecord::new("Besseggen", 61.5067, 8.7317).with_elevation(1743.0),
    ];

    let survey = vec![
        // Same hut, different capitalisation and a better description.
        PoiRecord::new("GJENDEBU", 61.4823, 8.6287)
            .with_description("Self-service lodge at the west end of Gjende")
            .with_elevation(995.0),
        // Same place, different name, 20 m away.
        PoiRecord::new("Memurubu turisthytte", 61.5515, 8.5671),
        PoiRecord::new("Glitterheim", 61.6603, 8.5647),
        // Broken record from the source; skipped.
        PoiRecord::new("Unknown", 95.0, 8.0),
    ];

    let mut pois = PoiCollection::with_config(DedupConfig::default())?;

    let first = pois.add(hiking_club);
    println!("1. First source: {} added", first.added);

    let second = pois.add(survey);
    println!(
        "2. Second source: {} added, {} merged, {} skipped\n",
        second.added, second.merged, second.skipped
    );

    println!("3. Merged collection ({} entries):", pois.len());
    for poi in &pois {
        println!(
            "   {:<22} {:>9.4} {:>8.4}  ele {:<8} {}",
            poi.name(),
            poi.latitude(),
            poi.longitude(),
            poi.elevation()
                .map(|e| format!("{:.0} m", e))
                .unwrap_or_else(|| "-".to_string()),
            poi.description()
        );
    }

    // A stricter threshold keeps separate huts that stand close together.
    pois.reconfigure(DedupConfig::default().with_threshold(10.0))?;
    println!("\n4. Reconfigured to 10 m; dedupe removed {}", pois.dedupe());

    #[cfg(feature = "geojson")]
    {
        let json = poimerge::export::to_geojson_string(pois.as_slice())?;
        println!("\n5. GeoJSON export: {} bytes", json.len());
    }

    Ok(())
}
