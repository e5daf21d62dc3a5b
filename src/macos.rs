//! VoiceOver detection through the user's accessibility preferences.

use std::time::Duration;

use crate::{
	command::{
		CommandRunner,
		SystemCommand,
	},
	detector::{
		ScreenReaderDetector,
		Signal,
	},
	error::{
		Error,
		Result,
	},
};

/// How long `defaults` gets before it is killed.
pub const VOICEOVER_TIMEOUT: Duration = Duration::from_millis(250);

const DEFAULTS: &str = "defaults";
const DEFAULTS_ARGS: &[&str] = &["read", "com.apple.universalaccess", "voiceOverOnOffKey"];

#[derive(Clone, Debug)]
pub struct MacDetector<R = SystemCommand> {
	runner: R,
	timeout: Duration,
}

impl MacDetector {
	pub fn new() -> Self {
		Self::with_runner(SystemCommand)
	}
}

impl Default for MacDetector {
	fn default() -> Self {
		Self::new()
	}
}

impl<R: CommandRunner> MacDetector<R> {
	pub fn with_runner(runner: R) -> Self {
		Self {
			runner,
			timeout: VOICEOVER_TIMEOUT,
		}
	}

	pub fn with_timeout(mut self, timeout: Duration) -> Self {
		self.timeout = timeout;
		self
	}

	pub fn timeout(&self) -> Duration {
		self.timeout
	}
}

impl<R: CommandRunner> ScreenReaderDetector for MacDetector<R> {
	fn probe(&self) -> Result<Option<Signal>> {
		let out = self.runner.run(DEFAULTS, DEFAULTS_ARGS, self.timeout)?;
		if !out.success {
			return Err(Error::Exit(out.code));
		}

		Ok((out.stdout.trim() == "1").then_some(Signal::VoiceOver))
	}
}
