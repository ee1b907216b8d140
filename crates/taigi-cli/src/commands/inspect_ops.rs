use std::path::Path;
use std::process;

use taigi_core::poj::roc_to_poj;
use taigi_core::qstring::get_qstrings;
use taigi_core::reconcile::reconcile;
use taigi_core::store::WordStore;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn translit(syllables: &[String]) {
    let mut failed = false;
    for syl in syllables {
        match roc_to_poj(syl) {
            Ok(poj) => println!("{syl}\t{poj}"),
            Err(e) => {
                eprintln!("{syl}\tError: {e}");
                failed = true;
            }
        }
    }
    if failed {
        process::exit(1);
    }
}

pub fn qstrings(reading: &str) {
    for key in get_qstrings(reading) {
        println!("{key}");
    }
}

pub fn reconcile_cmd(original: &str, corrected: &str) {
    let r = die!(reconcile(original, corrected), "Error: {}");
    println!("{}", r.poj);
    if !r.edited.is_empty() {
        eprintln!("  edited segments: {:?}", r.edited);
    }
    if !r.empty.is_empty() {
        eprintln!("  empty segments:  {:?}", r.empty);
    }
}

pub fn info(db_file: &str) {
    let store = die!(WordStore::open(Path::new(db_file)), "Error opening store: {}");
    let stats = die!(store.stats(), "Error reading store: {}");

    let file_size = std::fs::metadata(db_file).map(|m| m.len()).unwrap_or(0);
    println!("Store:      {db_file}");
    println!("File size:  {:.1} MB", file_size as f64 / 1_048_576.0);
    println!("Words:      {}", stats.words);
    println!("Mappings:   {}", stats.mappings);
    println!("Qstrings:   {}", stats.distinct_qstrings);

    let cooked = die!(store.cooked_information(), "Error reading store: {}");
    println!();
    for (key, value) in cooked {
        println!("  {key} = {value}");
    }
}

pub fn lookup(db_file: &str, qstring: &str, prefix: bool, limit: usize) {
    let store = die!(WordStore::open(Path::new(db_file)), "Error opening store: {}");
    let query = qstring.to_lowercase();

    if prefix {
        let hits = die!(store.predict(&query, limit), "Error querying store: {}");
        if hits.is_empty() {
            println!("{query} → (not found)");
        }
        for (key, e) in hits {
            println!("{key}\t{}\t{}\t{}", e.id, e.reading, e.value);
        }
    } else {
        let entries = die!(store.lookup(&query), "Error querying store: {}");
        if entries.is_empty() {
            println!("{query} → (not found)");
        }
        for e in entries.iter().take(limit) {
            println!("{}\t{}\t{}", e.id, e.reading, e.value);
        }
    }
}
