use rulegrid::{any, is, one_of, Definitions};

fn main() {
    // Define dimensions and rules
    let defs = Definitions::builder()
        .dimension("category", ["Men", "Women", "Kids"])
        .dimension("size", ["XS", "S", "M", "L", "XL"])
        .deny([is("Men"), is("XS")])
        .deny([one_of(["Women", "Kids"]), is("XL")])
        .allow([any(), any()])
        .build()
        .expect("failed to build definitions");

    println!("{defs}");

    // Check a few queries
    for query in [["Men", "M"], ["Men", "XS"], ["Kids", "XL"]] {
        match defs.check_detailed(&query) {
            Ok(verdict) => println!("{query:?}: {verdict}"),
            Err(e) => println!("{query:?}: {e}"),
        }
    }
}
