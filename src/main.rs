/* Copyright © 2024-2025 Adam Train <adam@trainrelay.net>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */
use crate::hierarchy::check;
use crate::hierarchy::forest::Forest;
use crate::hierarchy::record::AccountRecord;
use crate::import::source::{AccountSource, FileSource, RemoteSource};
use crate::parsing::filesystem::Filesystem;
use crate::reports::flat_reporter::FlatReporter;
use crate::reports::search_reporter::SearchReporter;
use crate::reports::tree_reporter::TreeReporter;
use anyhow::{anyhow, bail, Error};
use clap::{ArgAction, Parser, ValueEnum};
use tracing::info;

mod config;
mod hierarchy;
mod import;
mod parsing;
mod reports;
mod util;

#[derive(Parser)]
#[command(
	name = "coa",
	version = "0.1",
	about = "Chart of accounts hierarchy tool"
)]
struct Cli {
	// ----------------
	// -- POSITIONAL --
	// ----------------
	/// The command to execute
	command: Directive,

	/// The search pattern for the Find command
	#[arg(required = false)]
	term: Option<String>,

	// -----------
	// -- FLAGS --
	// -----------
	/// Read accounts from this JSON file instead of the configured service
	#[arg(short)]
	file: Option<String>,

	/// Custom config file location (default: ~/.config/coa/config.toml)
	#[arg(long)]
	config: Option<String>,

	/// Only fetch accounts belonging to this company
	#[arg(long)]
	company: Option<i64>,

	/// Do not list accounts nested below this depth
	#[arg(short, long)]
	depth: Option<usize>,

	/// Hide inactive accounts and everything below them
	#[arg(short, long)]
	active_only: bool,

	/// Accept duplicate account ids; the last one listed wins
	#[arg(long)]
	lenient: bool,

	/// Log more detail to stderr (repeat for more)
	#[arg(short, long, action = ArgAction::Count)]
	verbose: u8,
}

impl Cli {
	/// Extra validations on top of what clap does
	fn validate(&self) -> Result<(), Error> {
		if self.command == Directive::Find && self.term.is_none() {
			bail!("No search pattern specified");
		}

		if self.file.is_some() && self.company.is_some() {
			bail!("--company cannot be combined with -f");
		}

		Ok(())
	}
}

#[derive(ValueEnum, Clone, PartialEq)]
enum Directive {
	Tree,   // indented hierarchy
	Flat,   // one table row per account
	Json,   // nested export
	Export, // flat records in tree order, re-readable with -f

	Find, // search by code or name

	Check, // find possible data integrity concerns
}

fn main() -> Result<(), Error> {
	let args = Cli::parse();
	args.validate()?;
	util::logging::init(args.verbose);

	let records = fetch_records(&args)?;
	info!(count = records.len(), "accounts loaded");

	// check reports duplicates instead of refusing them
	let forest = if args.lenient || args.command == Directive::Check {
		Forest::build(records)
	} else {
		Forest::build_strict(records)?
	};
	info!(
		accounts = forest.len(),
		roots = forest.roots().count(),
		"hierarchy built"
	);

	match args.command {
		Directive::Tree => TreeReporter::new(&forest)
			.max_depth(args.depth)
			.active_only(args.active_only)
			.print()?,
		Directive::Flat => FlatReporter::new(&forest, args.active_only).print()?,
		Directive::Json => {
			println!("{}", serde_json::to_string_pretty(&forest.nested()?)?)
		},
		Directive::Export => {
			println!("{}", serde_json::to_string_pretty(&forest.flatten()?)?)
		},
		Directive::Find => {
			let term = args
				.term
				.as_deref()
				.ok_or_else(|| anyhow!("No search pattern specified"))?;
			SearchReporter::new(&forest, term)?.print()?;
		},
		Directive::Check => {
			for finding in check::inspect(&forest)? {
				println!("{}", finding);
			}
			println!("Done");
		},
	}

	Ok(())
}

/// Loads one snapshot of the chart of accounts, from the input file if one
/// was given and from the configured accounts service otherwise.
fn fetch_records(args: &Cli) -> Result<Vec<AccountRecord>, Error> {
	let source: Box<dyn AccountSource> = match &args.file {
		Some(file) => Box::new(FileSource::new(file)),
		None => {
			let config =
				Filesystem::new().get_config(args.config.as_ref(), true)?;
			let remote = config.source.ok_or_else(|| {
				anyhow!("No input file given and no [source] in config")
			})?;
			Box::new(RemoteSource::new(remote)?)
		},
	};

	source.fetch(args.company)
}
