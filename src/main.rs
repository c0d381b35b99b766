use anyhow::{bail, ensure, Context, Result};
use indicatif::{ProgressBar, ProgressIterator, ProgressStyle};
use std::{env, fs, path::PathBuf};

use atf_json::atf::{document::ParsedAtf, line_classifier::classify_atf, parser::parse_atf};

struct Args {
    input_path: String,
    output_path: Option<String>,
}

fn get_args() -> Result<Args> {
    let args: Vec<String> = env::args().skip(1).collect();

    let opts = getopts::Options::new();

    let matches = match opts.parse(&args) {
        Ok(m) => m,
        Err(f) => bail!(f),
    };

    let input_path = matches
        .free
        .get(0)
        .context("path to an .atf file or a directory of .atf files is required")?
        .clone();
    let output_path = matches.free.get(1).map(|s| s.clone());

    Ok(Args {
        input_path,
        output_path,
    })
}

enum BuildOut {
    Null,
    File { root: PathBuf },
}

impl BuildOut {
    fn init_file(root: &str) -> Result<Self> {
        let root = PathBuf::from(&root);
        fs::create_dir(&root).context("Failed to create output directory")?;

        Ok(Self::File { root })
    }

    fn save_document(&self, stem: &str, parsed: &ParsedAtf) -> Result<()> {
        if let BuildOut::File { root } = &self {
            fs::write(
                &root.join(format!("{}_parsed.json", stem)),
                serde_json::to_string(&parsed)?,
            )?;
        }

        Ok(())
    }
}

fn main() -> Result<()> {
    let args = get_args()?;

    let input_path = PathBuf::from(&args.input_path);
    ensure!(
        input_path.exists(),
        "File not found: {}",
        input_path.display()
    );

    let out = if let Some(output_path) = &args.output_path {
        BuildOut::init_file(&output_path)
            .with_context(|| format!("Failed to output directory: {}", &output_path))?
    } else {
        BuildOut::Null
    };

    println!("Collecting transliterations...");

    let atf_paths = collect_atf_paths(&input_path)?;
    ensure!(!atf_paths.is_empty(), "No .atf file found");

    println!("Processing {} transliterations...", atf_paths.len());

    let mut failed = 0;

    let pb = create_progress_bar(atf_paths.len() as u64);
    for path in atf_paths.iter().progress_with(pb) {
        let result = (|| -> Result<()> {
            let bytes = fs::read(&path)?;
            let txt = decode_atf_bytes(&bytes);

            let lines = classify_atf(&txt).context("Failed to classify")?;
            let parsed = parse_atf(&lines).context("Failed to parse")?;

            let stem = path
                .file_stem()
                .context("No file stem")?
                .to_string_lossy()
                .into_owned();
            out.save_document(&stem, &parsed)?;

            Ok(())
        })()
        .with_context(|| format!("Failed to process: {}", path.display()));

        // a single irregular tablet does not abort the batch
        if let Err(err) = result {
            eprintln!("{:#}", err);
            failed += 1;
        }
    }

    if 0 < failed {
        println!("Finished. ({} failed)", failed);
    } else {
        println!("Finished.");
    }

    Ok(())
}

fn collect_atf_paths(input_path: &PathBuf) -> Result<Vec<PathBuf>> {
    if input_path.is_file() {
        return Ok(vec![input_path.clone()]);
    }

    let mut paths = Vec::new();
    for entry in fs::read_dir(input_path)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        match path.extension() {
            Some(ext) if ext.to_string_lossy().to_lowercase() == "atf" => paths.push(path),
            _ => continue,
        }
    }
    paths.sort();

    Ok(paths)
}

// corpus files are UTF-8 today, but older exports are Latin-1
fn decode_atf_bytes(bytes: &[u8]) -> String {
    let (txt, _, had_errors) = encoding_rs::UTF_8.decode(bytes);
    if !had_errors {
        return txt.into_owned();
    }

    encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned()
}

fn create_progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template(
            "{percent:>3}% [{wide_bar:.cyan/blue}] {pos}/{len} [{elapsed_precise} < {eta_precise}]",
        )
        .unwrap()
        .progress_chars("#-"),
    );
    pb
}
