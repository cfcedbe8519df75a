use std::sync::Arc;
use std::thread;

use rulegrid::{any, is, DefinitionsBuilder};

fn main() {
    let defs = Arc::new(
        DefinitionsBuilder::new()
            .dimension("size", ["XS", "S", "M", "L"])
            .dimension("color", ["Black", "White"])
            .deny([is("XS"), is("Black")])
            .allow([any(), any()])
            .build()
            .expect("failed to build definitions"),
    );

    let handles: Vec<_> = ["XS", "S", "M", "L"]
        .into_iter()
        .enumerate()
        .map(|(i, size)| {
            let defs = Arc::clone(&defs);
            thread::spawn(move || {
                let query = [size, "Black"];
                let allowed = defs.check(&query);
                let closest = defs.closest_value_in(&query, Some(1));
                println!("Thread {i}: {query:?} -> {allowed:?}, closest color {closest:?}");
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }
}
