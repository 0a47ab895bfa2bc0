#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the command-line front end for the `hashx4` binary. It
//! hashes files (or standard input) with any primitive of the [`hashes`]
//! crate, lists the primitives the running CPU can execute, and can
//! cross-check every available engine against the reference engine.
//!
//! # Design
//!
//! [`run`] accepts an iterator of arguments together with handles for
//! standard output and error and returns the process exit status. A
//! [`clap`](https://docs.rs/clap/) builder command performs the parse; help
//! and version output are rendered from static text so they stay
//! byte-stable. [`run_with_input`] additionally takes the reader used for
//! `-`, which keeps the whole front end testable without a process.
//!
//! # Errors
//!
//! Argument errors, unreadable files, unknown or unsupported algorithms and
//! malformed cookies are reported on standard error with exit status `1`.
//! An engine disagreement under `--verify` exits with status `2`.
//!
//! # Examples
//!
//! ```
//! use cli::run;
//!
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let exit_code = run(["hashx4", "--version"], &mut stdout, &mut stderr);
//!
//! assert_eq!(exit_code, 0);
//! assert!(!stdout.is_empty());
//! assert!(stderr.is_empty());
//! ```

use std::ffi::OsString;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use clap::{Arg, ArgAction, Command, builder::OsStringValueParser};
use hashes::{Digest, Family, Hasher, Primitive, available_primitives, fastest};
use tracing::debug;

mod cookie;
mod error;
mod logging;

pub use error::CliError;

use cookie::parse_cookie_hex;

/// Maximum exit code representable by a Unix process.
const MAX_EXIT_CODE: i32 = u8::MAX as i32;

/// Exit status for argument, input and hashing failures.
const EXIT_FAILURE: i32 = 1;

/// Exit status when `--verify` finds two engines that disagree.
const EXIT_MISMATCH: i32 = 2;

/// Display name for standard input.
const STDIN_NAME: &str = "-";

/// Deterministic help text describing the CLI surface.
const HELP_TEXT: &str = concat!(
    "hashx4 - four-lane djbx33a hashing\n",
    "\n",
    "Usage: hashx4 [-h] [-V] [-v] [--list] [-a NAME] [--cookie HEX] [--verify] [FILE...]\n",
    "\n",
    "Prints one line per FILE: the lowercase hex digest, two spaces, the name.\n",
    "With no FILE, or when FILE is -, standard input is hashed.\n",
    "\n",
    "  -h, --help             Show this help message and exit.\n",
    "  -V, --version          Output version information and exit.\n",
    "  -v, --verbose          Log engine selection to stderr (repeat for more).\n",
    "      --list             List every primitive and whether this CPU runs it.\n",
    "  -a, --algorithm NAME   Primitive to use, e.g. x4djbx33a-128-shuffle or\n",
    "                         djbx33a-32-ref. Defaults to the fastest four-lane\n",
    "                         engine available.\n",
    "      --cookie HEX       Salt XORed into the digest. Must cover the digest\n",
    "                         width (32 hex digits four-lane, 8 single-lane).\n",
    "                         Defaults to all zero bytes.\n",
    "      --verify           Hash with every available engine of the family and\n",
    "                         fail with status 2 if any disagrees with the\n",
    "                         reference engine.\n",
);

/// Parsed command produced by [`parse_args`].
#[derive(Debug, Default)]
struct ParsedArgs {
    show_help: bool,
    show_version: bool,
    list: bool,
    verify: bool,
    verbosity: u8,
    algorithm: Option<String>,
    cookie: Option<String>,
    files: Vec<OsString>,
}

/// Builds the `clap` command used for parsing.
fn clap_command() -> Command {
    Command::new("hashx4")
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg_required_else_help(false)
        .arg(
            Arg::new("help")
                .long("help")
                .short('h')
                .help("Show this help message and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .short('V')
                .help("Output version information and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log engine selection to stderr.")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("list")
                .long("list")
                .help("List every primitive and whether this CPU runs it.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("algorithm")
                .long("algorithm")
                .short('a')
                .value_name("NAME")
                .help("Primitive to hash with.")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("cookie")
                .long("cookie")
                .value_name("HEX")
                .help("Salt XORed into the digest.")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("verify")
                .long("verify")
                .help("Cross-check every available engine against the reference.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("files")
                .value_name("FILE")
                .action(ArgAction::Append)
                .value_parser(OsStringValueParser::new()),
        )
}

/// Parses command-line arguments into a [`ParsedArgs`] structure.
fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();

    if args.is_empty() {
        args.push(OsString::from("hashx4"));
    }

    let mut matches = clap_command().try_get_matches_from(args)?;

    let files = matches
        .remove_many::<OsString>("files")
        .map(|values| values.collect())
        .unwrap_or_default();

    Ok(ParsedArgs {
        show_help: matches.get_flag("help"),
        show_version: matches.get_flag("version"),
        list: matches.get_flag("list"),
        verify: matches.get_flag("verify"),
        verbosity: matches.get_count("verbose"),
        algorithm: matches.remove_one::<String>("algorithm"),
        cookie: matches.remove_one::<String>("cookie"),
        files,
    })
}

/// Renders the help text.
fn render_help() -> String {
    HELP_TEXT.to_string()
}

/// Renders the version banner.
fn render_version() -> String {
    format!("hashx4 {}\n", env!("CARGO_PKG_VERSION"))
}

/// Runs the CLI, reading `-` from the process's standard input.
///
/// Returns the process exit code the caller should use.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    let stdin = io::stdin();
    let mut stdin = stdin.lock();
    run_with_input(arguments, &mut stdin, stdout, stderr)
}

/// Runs the CLI with an explicit reader standing in for standard input.
pub fn run_with_input<I, S, In, Out, Err>(
    arguments: I,
    stdin: &mut In,
    stdout: &mut Out,
    stderr: &mut Err,
) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    In: Read,
    Out: Write,
    Err: Write,
{
    match parse_args(arguments) {
        Ok(parsed) => execute(parsed, stdin, stdout, stderr),
        Err(error) => {
            let _ = write!(stderr, "{error}");
            EXIT_FAILURE
        }
    }
}

fn execute<In, Out, Err>(
    parsed: ParsedArgs,
    stdin: &mut In,
    stdout: &mut Out,
    stderr: &mut Err,
) -> i32
where
    In: Read,
    Out: Write,
    Err: Write,
{
    if parsed.show_help {
        return write_or_fail(stdout, stderr, &render_help());
    }
    if parsed.show_version {
        return write_or_fail(stdout, stderr, &render_version());
    }

    logging::init(parsed.verbosity);

    if parsed.list {
        return write_or_fail(stdout, stderr, &render_list());
    }

    match hash_inputs(&parsed, stdin, stdout, stderr) {
        Ok(status) => status,
        Err(error) => {
            let _ = writeln!(stderr, "hashx4: {error}");
            EXIT_FAILURE
        }
    }
}

fn write_or_fail<Out: Write, Err: Write>(stdout: &mut Out, stderr: &mut Err, text: &str) -> i32 {
    match stdout.write_all(text.as_bytes()) {
        Ok(()) => 0,
        Err(error) => {
            let _ = writeln!(stderr, "hashx4: {error}");
            EXIT_FAILURE
        }
    }
}

/// One line per primitive: name, availability, and a marker on the engine
/// picked by default for its family.
fn render_list() -> String {
    let available = available_primitives();
    let defaults = [
        fastest(Family::Djbx33a32).primitive(),
        fastest(Family::X4Djbx33a128).primitive(),
    ];

    use std::fmt::Write as _;

    let mut out = String::new();
    for primitive in Primitive::ALL {
        let status = if available.contains(&primitive) {
            "available"
        } else {
            "unavailable"
        };
        let marker = if defaults.contains(&primitive) {
            " (default)"
        } else {
            ""
        };
        let _ = writeln!(out, "{:<24}{status}{marker}", primitive.name());
    }
    out
}

/// Resolves the primitive named on the command line, or the fastest
/// four-lane engine when none was named.
fn resolve_hasher(algorithm: Option<&str>) -> Result<Hasher, CliError> {
    let Some(name) = algorithm else {
        return Ok(fastest(Family::X4Djbx33a128));
    };
    let primitive: Primitive = name.parse()?;
    primitive
        .hasher()
        .ok_or(CliError::Unsupported { primitive })
}

fn hash_inputs<In, Out, Err>(
    parsed: &ParsedArgs,
    stdin: &mut In,
    stdout: &mut Out,
    stderr: &mut Err,
) -> Result<i32, CliError>
where
    In: Read,
    Out: Write,
    Err: Write,
{
    let hasher = resolve_hasher(parsed.algorithm.as_deref())?;
    let primitive = hasher.primitive();
    let cookie = match parsed.cookie.as_deref() {
        Some(hex) => parse_cookie_hex(hex)?,
        None => vec![0u8; primitive.digest_len()],
    };

    let verifiers = if parsed.verify {
        verification_set(primitive.family())
    } else {
        Vec::new()
    };

    let stdin_only = [OsString::from(STDIN_NAME)];
    let files: &[OsString] = if parsed.files.is_empty() {
        &stdin_only
    } else {
        &parsed.files
    };

    let mut status = 0;
    for file in files {
        let name = file.to_string_lossy();
        let data = read_input(file, stdin)?;
        debug!(
            target: "hashx4::cli",
            input = %name,
            len = data.len(),
            primitive = primitive.name(),
            "hashing input"
        );

        let digest = hasher.digest(&data, &cookie)?;
        if !verifiers.is_empty() && !verify_input(&verifiers, &data, &cookie, &name, stderr)? {
            status = EXIT_MISMATCH;
        }
        writeln!(stdout, "{digest}  {name}").map_err(CliError::Output)?;
    }
    Ok(status)
}

/// Reference hasher first, then every other available engine of `family`.
fn verification_set(family: Family) -> Vec<Hasher> {
    available_primitives()
        .into_iter()
        .filter(|primitive| primitive.family() == family)
        .filter_map(Primitive::hasher)
        .collect()
}

/// Returns `false` and reports on `stderr` when any engine disagrees with
/// the first (reference) hasher.
fn verify_input<Err: Write>(
    hashers: &[Hasher],
    data: &[u8],
    cookie: &[u8],
    name: &str,
    stderr: &mut Err,
) -> Result<bool, CliError> {
    let Some((reference, rest)) = hashers.split_first() else {
        return Ok(true);
    };
    let expected: Digest = reference.digest(data, cookie)?;

    let mut agreed = true;
    for hasher in rest {
        let got = hasher.digest(data, cookie)?;
        if got != expected {
            agreed = false;
            let _ = writeln!(
                stderr,
                "hashx4: {} disagrees with {} on {name}: {got} != {expected}",
                hasher.primitive(),
                reference.primitive(),
            );
        }
    }
    Ok(agreed)
}

fn read_input<In: Read>(file: &OsString, stdin: &mut In) -> Result<Vec<u8>, CliError> {
    let mut data = Vec::new();
    if file == STDIN_NAME {
        stdin
            .read_to_end(&mut data)
            .map_err(|source| CliError::Read {
                path: STDIN_NAME.into(),
                source,
            })?;
        return Ok(data);
    }
    let path = Path::new(file);
    fs::read(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Converts a numeric exit code into an [`std::process::ExitCode`].
#[must_use]
pub fn exit_code_from(status: i32) -> std::process::ExitCode {
    let clamped = status.clamp(0, MAX_EXIT_CODE);
    std::process::ExitCode::from(clamped as u8)
}

#[cfg(test)]
mod tests;
