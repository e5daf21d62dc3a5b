mod args;

use std::{
	env,
	process::exit,
	time::Duration,
};

use log::{
	debug,
	LevelFilter,
};
use srprobe::{
	detector_with,
	Options,
	Platform,
	ScreenReaderDetector,
	WindowsStrategy,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn help_and_exit() -> ! {
	println!(
		r#"srprobe {VERSION}
Detect whether a screen reader is currently running

USAGE: srprobe [OPTIONS]

OPTIONS:
  -q, --quiet: Do not print anything; only set the exit status
  -v, --verbose: Log detection steps to stderr
  -s, --system-parameter: On Windows, only consult SPI_GETSCREENREADER (does not detect Narrator)
  -t, --timeout <MS>: How long to wait for the VoiceOver preference on macOS (default 250)
  -h, --help: Show help
  -V, --version: Show version information

EXIT STATUS:
  0 if a screen reader is active, 1 if not, 2 on usage errors"#
	);

	exit(0)
}

fn usage_error(msg: &str) -> ! {
	eprintln!("error: {msg}");
	exit(2)
}

struct Opts {
	quiet: bool,
	verbose: bool,
	strategy: WindowsStrategy,
	timeout: Option<Duration>,
}

fn parse_args() -> Opts {
	let argv = env::args().skip(1).collect::<Vec<_>>();
	let mut args = args::Args::new(&argv, "t");

	let mut x = Opts {
		quiet: false,
		verbose: false,
		strategy: WindowsStrategy::HookScan,
		timeout: None,
	};

	while let Some(s) = args.next() {
		match &*s {
			"-h" | "--help" => help_and_exit(),
			"-V" | "--version" => {
				println!("srprobe {VERSION}");
				exit(0);
			}
			"-q" | "--quiet" => x.quiet = true,
			"-v" | "--verbose" => x.verbose = true,
			"-s" | "--system-parameter" => x.strategy = WindowsStrategy::SystemParameter,
			"-t" | "--timeout" => {
				let Some(val) = args.next() else {
					usage_error("missing a value for --timeout");
				};
				match val.parse::<u64>() {
					Ok(ms) => x.timeout = Some(Duration::from_millis(ms)),
					Err(_) => usage_error("the timeout must be a whole number of milliseconds"),
				}
			}
			"--" => {
				if let Some(s) = args.next() {
					usage_error(&format!("unexpected argument {s}"));
				}
			}
			_ if s.starts_with('-') => usage_error(&format!("unknown option {s}")),
			_ => usage_error(&format!("unexpected argument {s}")),
		}
	}

	x
}

fn main() {
	let opts = parse_args();

	let default_level = if opts.verbose {
		LevelFilter::Debug
	} else {
		LevelFilter::Warn
	};
	env_logger::Builder::new()
		.filter_level(default_level)
		.parse_default_env()
		.init();

	let platform = Platform::current();
	debug!("probing for a screen reader on {platform}");

	let mut detector_opts = Options {
		windows_strategy: opts.strategy,
		..Options::default()
	};
	if let Some(t) = opts.timeout {
		detector_opts.voiceover_timeout = t;
	}

	let active = detector_with(platform, detector_opts).is_active();
	if !opts.quiet {
		println!("{}", if active { "active" } else { "inactive" });
	}

	exit(if active { 0 } else { 1 })
}
