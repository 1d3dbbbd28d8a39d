// File: crates/star-core/tests/types.rs
// Purpose: Records and repository metadata read from and written to TOML with ISO dates.

use chrono::NaiveDate;
use star_core::{RepoMeta, StarRecord};

#[test]
fn record_dates_use_iso_form() {
    let rec = StarRecord::new(NaiveDate::from_ymd_opt(2023, 7, 14).unwrap(), 912);
    let text = toml::to_string(&rec).unwrap();
    assert!(text.contains("date = \"2023-07-14\""), "{text}");

    let back: StarRecord = toml::from_str(&text).unwrap();
    assert_eq!(back, rec);
}

#[test]
fn repo_meta_reads_an_optional_creation_date() {
    let meta: RepoMeta = toml::from_str(
        r#"
        repo = "octo/cat"
        description = "cats"
        language = "Rust"
        created_at = "2019-02-28"
        "#,
    )
    .unwrap();
    assert_eq!(meta.created_at, NaiveDate::from_ymd_opt(2019, 2, 28));

    let bad = toml::from_str::<RepoMeta>("repo = \"x\"\ndescription = \"\"\nlanguage = \"\"\ncreated_at = \"28/02/2019\"");
    assert!(bad.is_err());
}
