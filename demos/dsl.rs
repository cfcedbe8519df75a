use rulegrid::Definitions;

fn main() {
    let defs = Definitions::from_file("demos/garments.rules").expect("failed to load rules");

    println!("{defs}");

    let query = ["Women", "Jackets", "XL", "Green"];
    match defs.check_detailed(&query) {
        Ok(verdict) => println!("{query:?}: {verdict}"),
        Err(e) => println!("{query:?}: {e}"),
    }

    match defs.closest(&query) {
        Ok(Some(alternative)) => println!("Try instead: {alternative:?}"),
        Ok(None) => println!("No alternative found."),
        Err(e) => println!("Search failed: {e}"),
    }
}
