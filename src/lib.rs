//! Point-in-time detection of a running screen reader.
//!
//! ```no_run
//! if srprobe::is_screen_reader_active() {
//! 	// prefer verbose textual feedback over visual hints
//! }
//! ```

mod command;
mod detector;
mod error;
mod macos;
mod platform;
mod win;

pub use self::{
	command::{
		Captured,
		CommandRunner,
		SystemCommand,
	},
	detector::{
		detector_for,
		detector_with,
		NullDetector,
		Options,
		ScreenReaderDetector,
		Signal,
	},
	error::{
		Error,
		Result,
	},
	macos::{
		MacDetector,
		VOICEOVER_TIMEOUT,
	},
	platform::Platform,
	win::{
		SystemWindowsApi,
		WindowsApi,
		WindowsDetector,
		WindowsStrategy,
		KNOWN_HOOK_LIBRARIES,
		NARRATOR_MUTEX,
	},
};

/// Whether a screen reader is running right now.
///
/// Anything that prevents a definite answer yields `false`. Only Windows and
/// macOS are probed; every other platform reports `false`.
pub fn is_screen_reader_active() -> bool {
	detector_for(Platform::current()).is_active()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[cfg(not(any(windows, target_os = "macos")))]
	#[test]
	fn inactive_on_unprobed_platforms() {
		assert!(!is_screen_reader_active());
	}

	// Each real detector hits a missing OS surface here, and the error has to
	// come back out of the dispatcher as `false`.
	#[cfg(not(any(windows, target_os = "macos")))]
	#[test]
	fn dispatched_failures_are_inactive() {
		use std::time::Duration;

		for strategy in [WindowsStrategy::HookScan, WindowsStrategy::SystemParameter] {
			let d = detector_with(Platform::Windows, Options {
				windows_strategy: strategy,
				..Options::default()
			});
			assert!(matches!(d.probe(), Err(Error::Unsupported(Platform::Other))));
			assert!(!d.is_active());
		}

		// There is no `defaults` binary to launch.
		let d = detector_with(Platform::MacOs, Options {
			voiceover_timeout: Duration::from_millis(100),
			..Options::default()
		});
		assert!(d.probe().is_err());
		assert!(!d.is_active());
	}
}
