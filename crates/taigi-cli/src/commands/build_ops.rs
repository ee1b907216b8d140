use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use taigi_core::build::{build_entries, BuildOutput};
use taigi_core::settings::{self, Settings};
use taigi_core::store::{self, CookedInfo};
use tracing::info;

use crate::dict_source;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

/// Command-line overrides for a build.
#[derive(Debug, Default)]
pub struct BuildOptions {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

/// Load `--config` into the settings singleton, or fall back to defaults.
fn load_settings(config: Option<&Path>) -> &'static Settings {
    if let Some(path) = config {
        let content = die!(
            fs::read_to_string(path),
            "Error reading {}: {}",
            path.display()
        );
        die!(settings::init_custom(content), "Error in settings: {}");
    }
    settings::settings()
}

pub fn build(opts: &BuildOptions) {
    let s = load_settings(opts.config.as_deref());
    let input = opts.input.as_deref().unwrap_or(&s.source.input);
    let output = opts.output.as_deref().unwrap_or(&s.store.output);

    if input == output || input == store::temp_path(output) {
        eprintln!("Error: output {} would overwrite the input", output.display());
        process::exit(1);
    }

    let rows = die!(
        dict_source::read_rows(input, s.source.delimiter()),
        "Error reading source: {}"
    );
    eprintln!("Building entries from {} rows...", rows.len());

    let out = die!(build_entries(&rows, &s.build), "Error: {}");
    report(&out);

    die!(
        store::save(output, &out.words, &out.mappings, &CookedInfo::now()),
        "Error writing store: {}"
    );

    let file_size = fs::metadata(output).map(|m| m.len()).unwrap_or(0);
    info!(output = %output.display(), bytes = file_size, "store written");
    eprintln!(
        "Wrote {} ({:.1} MB)",
        output.display(),
        file_size as f64 / 1_048_576.0
    );
}

fn report(out: &BuildOutput) {
    eprintln!(
        "  {} rows accepted, {} rejected",
        out.rows_read - out.rows_rejected,
        out.rows_rejected
    );
    eprintln!(
        "  {} words, {} qstring mappings",
        out.words.len(),
        out.mappings.len()
    );

    let mut by_kind: BTreeMap<&str, usize> = BTreeMap::new();
    for d in &out.diagnostics {
        *by_kind.entry(d.kind.label()).or_default() += 1;
    }
    for (label, count) in by_kind {
        eprintln!("  {label}: {count}");
    }
}
