use std::fs;
use std::process;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn settings_export() {
    print!("{}", taigi_core::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        taigi_core::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    println!(
        "OK: source.input={}, store.output={}, build.reading={:?}",
        s.source.input.display(),
        s.store.output.display(),
        s.build.reading
    );
}
