//! Profile, year range, brand table and persisted-record tests.

use bikewatch::config::brand_aliases;
use bikewatch::models::ProfileRecord;
use bikewatch::{BrandTable, Profile, ProfileSummary, YearRange};

// ---------------------------------------------------------------------------
// YearRange
// ---------------------------------------------------------------------------

#[test]
fn year_range_rejects_reversed_bounds() {
    assert!(YearRange::new(2024, 2021).is_err());
    let r = YearRange::new(2021, 2024).unwrap();
    assert_eq!((r.min(), r.max()), (2021, 2024));
}

#[test]
fn year_range_parses_command_argument() {
    assert_eq!(YearRange::parse("2021-2024").unwrap(), YearRange::new(2021, 2024).unwrap());
    assert_eq!(YearRange::parse(" 2019 - 2020 ").unwrap(), YearRange::new(2019, 2020).unwrap());
    assert_eq!(YearRange::parse("2023").unwrap(), YearRange::new(2023, 2023).unwrap());
    assert!(YearRange::parse("2024-2021").is_err());
    assert!(YearRange::parse("twenty").is_err());
    assert!(YearRange::parse("2021-").is_err());
}

#[test]
fn year_range_displays_with_tilde() {
    assert_eq!(YearRange::new(2021, 2024).unwrap().to_string(), "2021~2024");
}

#[test]
fn year_range_from_years_uses_extremes() {
    assert_eq!(
        YearRange::from_years(&[2022, 2020, 2021]),
        Some(YearRange::new(2020, 2022).unwrap())
    );
    assert_eq!(YearRange::from_years(&[]), None);
}

// ---------------------------------------------------------------------------
// BrandTable
// ---------------------------------------------------------------------------

#[test]
fn brand_table_resolves_case_insensitively() {
    let brands = BrandTable::new(brand_aliases());
    assert_eq!(brands.resolve("혼다"), "Honda");
    assert_eq!(brands.resolve("BMW"), "BMW");
    assert_eq!(brands.resolve("Bmw"), "BMW");
    assert_eq!(brands.resolve("HARLEY"), "Harley-Davidson");
}

#[test]
fn brand_table_passes_unknown_brands_through() {
    let brands = BrandTable::new(brand_aliases());
    assert_eq!(brands.resolve("Benelli"), "Benelli");
    assert_eq!(brands.resolve("  Benelli "), "Benelli");
}

#[test]
fn brand_table_last_writer_wins() {
    let brands = BrandTable::new([("Honda", "Honda"), ("honda", "HONDA MOTOR"), ("야마하", "Yamaha")]);
    assert_eq!(brands.len(), 2);
    assert_eq!(brands.resolve("HONDA"), "HONDA MOTOR");
}

// ---------------------------------------------------------------------------
// Profile
// ---------------------------------------------------------------------------

#[test]
fn profile_key_is_lowercase_with_underscores() {
    assert_eq!(Profile::key_for("Honda", "PCX125"), "honda_pcx125");
    assert_eq!(Profile::key_for("Harley-Davidson", "Street  Glide"), "harley-davidson_street_glide");
}

#[test]
fn profile_key_is_stable_across_brand_spellings() {
    let brands = BrandTable::new(brand_aliases());
    let years = YearRange::new(2021, 2024).unwrap();
    let korean = Profile::resolve(&brands, "혼다", "PCX125", years);
    let english = Profile::resolve(&brands, "Honda", "PCX125", years);
    assert_eq!(korean.key, english.key);
    assert_eq!(korean.display_brand, "혼다");
    assert_eq!(korean.canonical_brand, "Honda");
    assert_eq!(korean.display_name(), "혼다 PCX125");
}

// ---------------------------------------------------------------------------
// ProfileRecord
// ---------------------------------------------------------------------------

#[test]
fn record_defaults_display_brand_from_canonical() {
    let brands = BrandTable::default();
    let record: ProfileRecord = serde_json::from_value(serde_json::json!({
        "canonical_brand": "Yamaha",
        "model": "NMAX",
        "year_range": [2020, 2022]
    }))
    .unwrap();
    let p = record.into_profile("yamaha_nmax", &brands).unwrap();
    assert_eq!(p.display_brand, "Yamaha");
    assert_eq!(p.canonical_brand, "Yamaha");
    assert_eq!(p.year_range, Some(YearRange::new(2020, 2022).unwrap()));
}

#[test]
fn record_reads_legacy_brand_and_years() {
    let brands = BrandTable::new(brand_aliases());
    let record: ProfileRecord = serde_json::from_value(serde_json::json!({
        "brand": "혼다",
        "model": "PCX125",
        "years": [2021, 2022, 2023, 2024]
    }))
    .unwrap();
    let p = record.into_profile("혼다_pcx125", &brands).unwrap();
    assert_eq!(p.key, "혼다_pcx125");
    assert_eq!(p.display_brand, "혼다");
    assert_eq!(p.canonical_brand, "Honda");
    assert_eq!(p.year_range, Some(YearRange::new(2021, 2024).unwrap()));
}

#[test]
fn record_without_years_has_no_range() {
    let brands = BrandTable::default();
    let record: ProfileRecord = serde_json::from_value(serde_json::json!({
        "brand": "Honda",
        "model": "CB650R",
        "years": []
    }))
    .unwrap();
    assert_eq!(record.into_profile("honda_cb650r", &brands).unwrap().year_range, None);
}

#[test]
fn record_without_brand_is_dropped() {
    let record: ProfileRecord =
        serde_json::from_value(serde_json::json!({ "model": "PCX125" })).unwrap();
    assert!(record.into_profile("x", &BrandTable::default()).is_none());
}

#[test]
fn record_serializes_current_fields_only() {
    let p = Profile::new("혼다", "Honda", "PCX125", YearRange::new(2021, 2024).unwrap());
    let value = serde_json::to_value(ProfileRecord::from_profile(&p)).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "display_brand": "혼다",
            "canonical_brand": "Honda",
            "model": "PCX125",
            "year_range": [2021, 2024]
        })
    );
}

#[test]
fn summary_serializes_with_status_tag() {
    let value = serde_json::to_value(ProfileSummary::NoData).unwrap();
    assert_eq!(value, serde_json::json!({ "status": "no_data" }));
}
