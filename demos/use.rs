use avlmap::{AvlTreeMap, MapError};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), MapError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut map = AvlTreeMap::new();
    map.insert(0, "zero")?;
    map.insert(1, "one")?;
    map.insert(2, "two")?;
    map.insert(3, "three")?;
    map.insert(4, "four")?;
    map.insert(5, "five")?;
    assert_eq!(map.insert(2, "two"), Err(MapError::DuplicateKey));
    assert_eq!(map.get(&1), Ok(&"one"));
    map.put(&1, "uno")?;
    assert_eq!(map.remove(&1), Ok("uno"));
    assert!(!map.has(&1));
    assert_eq!(map.remove(&1), Err(MapError::KeyNotFound));

    for (k, v) in &map {
        println!("{k} => {v}");
    }

    print!("{{ ");
    for k in map.keys() {
        print!("{k}, ");
    }
    println!("}}");
    Ok(())
}
