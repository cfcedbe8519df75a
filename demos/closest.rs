use rulegrid::Definitions;
use tracing_subscriber::EnvFilter;

fn main() {
    // RUST_LOG=rulegrid=debug shows each dimension the search visits.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let defs = Definitions::from_file("demos/garments.rules").expect("failed to load rules");

    let query = ["Men", "Shirts", "S", "Black"];
    println!("{query:?} allowed: {:?}", defs.check(&query));

    for name in ["size", "color", "garment", "category"] {
        let target = defs.dimension_index(name);
        match defs.closest_verbose_in(&query, target) {
            Ok(Some(alt)) => println!("closest by {name}: {alt}"),
            Ok(None) => println!("closest by {name}: none"),
            Err(e) => println!("closest by {name}: {e}"),
        }
    }
}
