//! Store a struct into a configuration file and read it back.
//!
//! Run with: cargo run --example store

use datascript::Configuration;
use serde::Serialize;
use std::error::Error;

#[derive(Serialize)]
struct Window {
    title: String,
    width: i32,
    height: i32,
    #[serde(rename = "fullScreen")]
    full_screen: bool,
    position: Option<Position>,
    #[serde(skip)]
    #[allow(dead_code)]
    handle: u64,
}

#[derive(Serialize)]
struct Position {
    x: i32,
    y: i32,
}

fn main() -> Result<(), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("window.ds");

    let window = Window {
        title: "Editor".to_string(),
        width: 1280,
        height: 720,
        full_screen: false,
        position: Some(Position { x: 40, y: 60 }),
        handle: 0xdead,
    };

    let mut config = Configuration::builder().file(&path).build()?;
    config.load()?;
    config.root_mut().store("window", &window)?;
    config.save()?;

    println!("Saved {}:\n{}", path.display(), std::fs::read_to_string(&path)?);

    let mut reloaded = Configuration::new(&path);
    reloaded.load()?;
    let section = reloaded
        .root()
        .section("window")
        .ok_or("window section missing")?;
    assert_eq!(section.value_as::<bool>("full screen"), Some(false));
    assert_eq!(
        section.section("position").and_then(|p| p.value_as::<i32>("x")),
        Some(40)
    );
    println!("✓ Reloaded {} keys", section.len());

    Ok(())
}
