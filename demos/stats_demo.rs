use std::collections::hash_map::DefaultHasher;
use std::hash::Hash;
use std::hash::Hasher;

use clap::Parser;
use entity_slots::HashTable;
use entity_slots::hash_table::Entry;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'c', long = "target_capacity", default_value_t = 1000)]
    target_capacity: usize,

    /// Remove every n-th value after filling, leaving holes on the free-list.
    #[arg(short = 'r', long = "remove_every", default_value_t = 0)]
    remove_every: usize,
}

fn hash_u64(value: u64) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

fn main() {
    let args = Args::parse();

    println!(
        "Creating HashTable with target capacity: {}",
        args.target_capacity
    );

    let mut table: HashTable<u64> = match HashTable::try_with_capacity(args.target_capacity) {
        Ok(table) => table,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    println!("Actual capacity: {}", table.capacity());
    println!("Filling table with u64 values...");

    let num_values = table.capacity();
    for i in 0..num_values {
        let value = i as u64;
        match table.entry(hash_u64(value), |&v| v == value) {
            Entry::Vacant(entry) => {
                entry.insert(value);
            }
            Entry::Occupied(_) => {
                panic!("Value already exists in table: {}", value);
            }
        }
    }

    if args.remove_every > 0 {
        let mut removed = 0;
        for i in (0..num_values).step_by(args.remove_every) {
            let value = i as u64;
            if table.remove(hash_u64(value), |&v| v == value).is_some() {
                removed += 1;
            }
        }
        println!("Removed {} values", removed);
    }

    println!("Table holds {} values", table.len());
    println!(
        "Final load factor: {:.2}%",
        (table.len() as f64 / table.capacity() as f64) * 100.0
    );

    let histogram = table.chain_histogram();
    println!("Chain length histogram:");
    for (len, count) in histogram.iter().enumerate().filter(|(_, count)| **count > 0) {
        println!("  {len:>3}: {count}");
    }
    table.debug_stats().print();
}
