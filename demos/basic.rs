//! Parse a document, edit the tree, write it back.
//!
//! Run with: cargo run --example basic

use datascript::{from_str, to_string, Value};
use std::error::Error;
use uuid::Uuid;

const DOCUMENT: &str = "name = 'demo'
port = 8080
ratio = 0.75D
server {
  motd = 'Hello'
  tags = [
    'fast',
    'eu'
  ]
  limits {}
}
";

fn main() -> Result<(), Box<dyn Error>> {
    let mut root = from_str(DOCUMENT);

    println!("port  = {:?}", root.value_as::<i32>("port"));
    println!("ratio = {:?}", root.value_as::<f64>("ratio"));

    let server = root
        .section_mut("server")
        .ok_or("document has no server section")?;
    server.set("motd", "Welcome back");
    server.set("tags", vec![Value::from("fast"), Value::from("eu"), Value::Long(3)]);
    server.create_section("limits")?.set("max players", 20i16);

    root.set("instance", Uuid::new_v4());
    root.rename("port", "listen port")?;
    root.unset("ratio");

    let text = to_string(&root)?;
    println!("\nEdited document:\n{}", text);

    assert_eq!(from_str(&text), root);
    println!("✓ Round-trip successful");

    Ok(())
}
