use anyhow::{bail, ensure, Context, Result};
use indicatif::{ProgressBar, ProgressIterator, ProgressStyle};
use std::{env, fs, path::PathBuf};

use verse_diff::chapter::{compare_verse, BibleChapter, VerseComparison};

struct Args {
    base_path: String,
    comparison_path: String,
    output_path: Option<String>,
    verses: Option<Vec<u32>>,
}

fn get_args() -> Result<Args> {
    let args: Vec<String> = env::args().skip(1).collect();

    let mut opts = getopts::Options::new();
    opts.optmulti("v", "verse", "compare only the given verse", "NUMBER");

    let matches = match opts.parse(&args) {
        Ok(m) => m,
        Err(f) => bail!(f),
    };

    let base_path = matches
        .free
        .get(0)
        .context("path to base chapter JSON is required")?
        .clone();
    let comparison_path = matches
        .free
        .get(1)
        .context("path to comparison chapter JSON is required")?
        .clone();
    let output_path = matches.free.get(2).cloned();

    let verses = matches
        .opt_strs("v")
        .iter()
        .map(|v| {
            v.parse()
                .with_context(|| format!("Invalid verse number: {:?}", v))
        })
        .collect::<Result<Vec<u32>>>()?;
    let verses = if verses.is_empty() {
        None
    } else {
        Some(verses)
    };

    Ok(Args {
        base_path,
        comparison_path,
        output_path,
        verses,
    })
}

fn read_chapter(path: &str) -> Result<BibleChapter> {
    let path = PathBuf::from(path);
    ensure!(path.exists(), "File not found: {}", path.display());

    let json =
        fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    BibleChapter::from_json(&json).with_context(|| format!("Invalid chapter: {}", path.display()))
}

fn main() -> Result<()> {
    let args = get_args()?;

    let base = read_chapter(&args.base_path)?.chapter;
    let comparison = read_chapter(&args.comparison_path)?.chapter;

    if base.number != comparison.number {
        println!(
            "Warning: comparing chapter {} with chapter {}",
            base.number, comparison.number
        );
    }

    println!("Comparing chapter {}...", base.number);

    let verses: Vec<_> = base.selected_verses(args.verses.as_deref()).collect();

    let pb = create_progress_bar(verses.len() as u64);
    let comparisons: Vec<VerseComparison> = verses
        .into_iter()
        .progress_with(pb)
        .map(|(number, content)| compare_verse(number, content, &comparison))
        .collect();

    println!("Finished.");

    print_summary(&comparisons);

    if let Some(output_path) = &args.output_path {
        fs::write(output_path, serde_json::to_string_pretty(&comparisons)?)
            .with_context(|| format!("Failed to write output: {}", output_path))?;
    }

    Ok(())
}

fn print_summary(comparisons: &[VerseComparison]) {
    let mut identical = 0;
    let mut missing = Vec::new();
    let mut differing = Vec::new();

    for comparison in comparisons {
        match &comparison.diff {
            None => missing.push(comparison.number),
            Some(diff) if diff.is_identical() => identical += 1,
            Some(diff) => differing.push((comparison.number, diff.counts())),
        }
    }

    println!(
        "{} verses: {} identical, {} differing, {} missing in comparison",
        comparisons.len(),
        identical,
        differing.len(),
        missing.len()
    );

    for (number, counts) in differing {
        println!(
            "  v{}: {} common, +{} added, -{} removed",
            number, counts.common, counts.added, counts.removed
        );
    }

    if !missing.is_empty() {
        println!("  missing: {:?}", missing);
    }
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
