use clap::{Arg, ArgAction, Command};
use std::error::Error;
use std::{env, fs, path};

use ebookr::config;
use ebookr::dedup::{self, DedupOptions};
use ebookr::logging;
use ebookr::report;
use ebookr::store::IndexStore;
use ebookr::sync::{self, SyncOptions};

///////////////////////
// Utility functions //
///////////////////////

fn default_index_path() -> Result<path::PathBuf, Box<dyn Error>> {
	match env::var("HOME") {
		Ok(home) => {
			let ebookr_dir = path::PathBuf::from(home).join(".ebookr");

			match fs::metadata(&ebookr_dir) {
				Ok(meta) => {
					if meta.is_dir() {
						Ok(ebookr_dir.join(config::INDEX_FILE_NAME))
					} else {
						Err(format!(
							"{} exists, but it is not a directory!",
							ebookr_dir.display()
						)
						.into())
					}
				}
				Err(_err) => {
					// Not exists
					fs::create_dir(&ebookr_dir)
						.map_err(|err| format!("Cannot create directory: {}", err))?;
					Ok(ebookr_dir.join(config::INDEX_FILE_NAME))
				}
			}
		}
		Err(_e) => Err("Could not determine HOME directory!".into()),
	}
}

fn main() -> Result<(), Box<dyn Error>> {
	logging::init_tracing();

	let matches = Command::new("ebookr")
		.version("0.1.0")
		.about("Content-hash index, move tracker and deduplicator for an ebook library")
		.subcommand_required(true)
		.arg(
			Arg::new("db")
				.long("db")
				.value_name("PATH")
				.global(true)
				.help("Index database path"),
		)
		.arg(
			Arg::new("verbose")
				.short('v')
				.long("verbose")
				.action(ArgAction::SetTrue)
				.global(true)
				.help("Print per-file actions"),
		)
		.subcommand(
			Command::new("sync")
				.about("Scan a directory tree and refresh cached fingerprints")
				.arg(Arg::new("root").required(true).help("Root directory to scan"))
				.arg(
					Arg::new("clean")
						.long("clean")
						.action(ArgAction::SetTrue)
						.help("Remove missing entries from the index (that aren't moved)"),
				)
				.arg(
					Arg::new("exts")
						.long("exts")
						.value_name("CSV")
						.default_value(config::DEFAULT_EXTENSIONS)
						.help("Comma-separated extensions to index"),
				),
		)
		.subcommand(
			Command::new("dedup")
				.about("Delete duplicate files from the unorganized subtree")
				.arg(
					Arg::new("unorganized")
						.long("unorganized")
						.value_name("TOKEN")
						.default_value(config::DEFAULT_UNORGANIZED_TOKEN)
						.help("Path substring to treat as unorganized"),
				)
				.arg(
					Arg::new("dry-run")
						.long("dry-run")
						.action(ArgAction::SetTrue)
						.help("Only show what would be deleted"),
				),
		)
		.subcommand(Command::new("summary").about("Files per immediate subfolder, from the index"))
		.get_matches();

	let verbose = matches.get_flag("verbose");
	let db_path = match matches.get_one::<String>("db") {
		Some(p) => path::PathBuf::from(p),
		None => default_index_path()?,
	};

	if let Some(sub) = matches.subcommand_matches("sync") {
		let store = IndexStore::open(&db_path)?;
		let opts = SyncOptions {
			root: path::PathBuf::from(
				sub.get_one::<String>("root").ok_or("sync: root directory argument required")?,
			),
			extensions: config::parse_extensions(
				sub.get_one::<String>("exts")
					.map(|s| s.as_str())
					.unwrap_or(config::DEFAULT_EXTENSIONS),
			),
			prune_missing: sub.get_flag("clean"),
			verbose,
		};
		let outcome = sync::sync(&store, &opts)?;

		if !outcome.missing.is_empty() {
			println!("WARN: Missing files not found elsewhere:");
			for p in &outcome.missing {
				println!("  {}", p);
			}
		}
		println!(
			"Summary: hashed={} cached={} moved={} missing_removed={} missing_warned={}",
			outcome.hashed,
			outcome.cached,
			outcome.moved_removed,
			outcome.missing_removed,
			outcome.missing.len()
		);
	} else if let Some(sub) = matches.subcommand_matches("dedup") {
		let store = IndexStore::open(&db_path)?;
		let opts = DedupOptions {
			token: sub
				.get_one::<String>("unorganized")
				.map(|s| s.as_str())
				.unwrap_or(config::DEFAULT_UNORGANIZED_TOKEN)
				.to_string(),
			dry_run: sub.get_flag("dry-run"),
			verbose,
		};
		let outcome = dedup::dedup(&store, &opts)?;

		let total = outcome.candidates.len();
		if total == 0 {
			println!("Nothing to delete.");
		} else if opts.dry_run {
			println!("Would delete {} file(s):", total);
			for p in &outcome.candidates {
				println!("  {}", p);
			}
		} else {
			println!("Deleted {} of {} file(s).", outcome.deleted, total);
		}
	} else if matches.subcommand_matches("summary").is_some() {
		let store = IndexStore::open(&db_path)?;
		match report::summary(&store)? {
			None => println!("Index empty. Run `sync` first."),
			Some(s) => {
				let width = s.groups.iter().map(|(k, _)| k.len()).max().unwrap_or(4);
				println!("{:<w$}  {:>7}", "Subfolder", "Files", w = width);
				println!("{}", "-".repeat(width + 10));
				for (k, c) in &s.groups {
					println!("{:<w$}  {:>7}", k, c, w = width);
				}
				println!("{}", "-".repeat(width + 10));
				println!("{:<w$}  {:>7}", "TOTAL", s.total, w = width);
			}
		}
	}

	Ok(())
}

// vim: ts=4
