use avlmap::{AvlTreeMap, MapError};
use tracing_subscriber::EnvFilter;

// RUST_LOG=avlmap=trace shows every rotation while the tree is built.
fn main() -> Result<(), MapError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut map = AvlTreeMap::new();
    map.insert(1, "1")?;
    map.insert(2, "2")?;
    map.insert(3, "3")?;
    map.insert(4, "4")?;
    map.insert(5, "5")?;
    map.insert(6, "6")?;

    println!("Level-order traversal:");
    map.traverse_level_order(|k, v| {
        println!("Key: {}, Value: {}", k, v);
    });

    println!("Tree:");
    print!("{}", map.display_tree());
    Ok(())
}
