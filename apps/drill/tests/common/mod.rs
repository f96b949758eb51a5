//! Shared fixtures for the front-end integration tests.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use vocab_core::{Catalog, EngineSettings, FixedClock, Session};
use vocab_drill::db::SqliteStore;

pub const CATALOG: &str = "\
# Basics
ID: yes-1
LV: jā
NL: ja
EN: yes
Category: Basics

ID: yes-2
LV: jā gan
NL: ja
Category: Basics

ID: yes-3
LV: nu jā
NL: ja
Category: Phrases
Sentence: yes
";

pub fn catalog() -> Catalog {
    Catalog::parse(CATALOG).expect("fixture catalog parses")
}

pub fn single_item_catalog() -> Catalog {
    Catalog::parse("ID: dog\nLV: suns\nNL: hond\nEN: dog\n").expect("fixture catalog parses")
}

pub fn store() -> SqliteStore {
    SqliteStore::open_in_memory().expect("in-memory database opens")
}

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 10, 19, 0, 0).unwrap()
}

pub fn session(catalog: Catalog, store: &SqliteStore) -> Session<&SqliteStore> {
    session_with(catalog, store, EngineSettings::default())
}

pub fn session_with(catalog: Catalog, store: &SqliteStore, settings: EngineSettings) -> Session<&SqliteStore> {
    Session::new(catalog, store, settings)
        .with_clock(FixedClock::new(start_time()))
        .with_rng(StdRng::seed_from_u64(7))
}

/// Scripted stdin: one answer per line.
pub fn input(lines: &[&str]) -> std::io::Cursor<Vec<u8>> {
    let mut text = lines.join("\n");
    text.push('\n');
    std::io::Cursor::new(text.into_bytes())
}

pub fn output(buf: Vec<u8>) -> String {
    String::from_utf8(buf).expect("output is utf-8")
}
