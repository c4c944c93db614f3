//! Page-hit counters with a bounded memory footprint.
//!
//! Replays a synthetic request log through an `LruCache<String, Value>`,
//! using the same five operations a cache service would expose:
//! get, set, forget, add and length.
//!
//! ```sh
//! cargo run --example counters
//! ```

use forgetful::{CacheError, CacheMetrics, LruCache, Value};

const CAPACITY: usize = 4;

fn main() -> Result<(), CacheError> {
    let mut cache: LruCache<String, Value> = LruCache::try_new(CAPACITY)?;

    let requests = [
        "/", "/about", "/", "/blog", "/", "/blog", "/contact", "/pricing", "/", "/jobs",
    ];
    for path in requests {
        let hits = cache.add(path.to_string(), Value::Int(1))?;
        println!("{path:<10} hits={:?} len={}", hits, cache.len());
    }

    // Entries can hold other kinds of values as well.
    cache.set("motd".to_string(), Value::from("hello"));
    cache.add("motd".to_string(), Value::from(", world"))?;
    println!("motd = {:?}", cache.get("motd"));

    // Mixing kinds is rejected and leaves the stored value untouched.
    match cache.add("motd".to_string(), Value::Int(1)) {
        Err(err) => println!("rejected: {err}"),
        Ok(v) => println!("unexpected: {v:?}"),
    }

    cache.forget("motd");
    println!("after forget: {:?}", cache.get("motd"));

    println!("least recently used: {:?}", cache.peek_lru());
    println!("remaining entries (oldest first):");
    for (path, hits) in &cache {
        println!("  {path:<10} {hits:?}");
    }

    for (name, value) in cache.metrics() {
        println!("{name:>14}: {value}");
    }

    Ok(())
}
