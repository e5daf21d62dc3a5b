use std::time::Duration;

use derive_more::Display;
use log::debug;

use crate::{
	error::Result,
	macos::{
		MacDetector,
		VOICEOVER_TIMEOUT,
	},
	platform::Platform,
	win::{
		WindowsDetector,
		WindowsStrategy,
	},
};

/// What gave a running screen reader away.
#[derive(Clone, Debug, Eq, PartialEq, Display)]
pub enum Signal {
	#[display("the Narrator mutex is present")]
	NarratorMutex,
	#[display("the hook library {_0} is loaded")]
	HookLibrary(String),
	#[display("the system screen reader flag is set")]
	SystemFlag,
	#[display("VoiceOver is enabled")]
	VoiceOver,
}

pub trait ScreenReaderDetector {
	/// Runs a single detection attempt.
	///
	/// `Ok(None)` means no screen reader was found. An `Err` means the answer is
	/// indeterminate.
	fn probe(&self) -> Result<Option<Signal>>;

	/// Collapses [`probe`](Self::probe) to a boolean; indeterminate is `false`.
	fn is_active(&self) -> bool {
		match self.probe() {
			Ok(Some(signal)) => {
				debug!("screen reader detected: {signal}");
				true
			}
			Ok(None) => false,
			Err(e) => {
				debug!("screen reader detection was inconclusive: {e}");
				false
			}
		}
	}
}

impl<D: ScreenReaderDetector + ?Sized> ScreenReaderDetector for Box<D> {
	fn probe(&self) -> Result<Option<Signal>> {
		(**self).probe()
	}
}

/// Never detects anything.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullDetector;

impl ScreenReaderDetector for NullDetector {
	fn probe(&self) -> Result<Option<Signal>> {
		Ok(None)
	}
}

/// Tunables for the detectors [`detector_with`] builds.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Options {
	pub windows_strategy: WindowsStrategy,
	pub voiceover_timeout: Duration,
}

impl Default for Options {
	fn default() -> Self {
		Self {
			windows_strategy: WindowsStrategy::default(),
			voiceover_timeout: VOICEOVER_TIMEOUT,
		}
	}
}

/// Selects the detector for `platform`, using the real OS surface.
pub fn detector_for(platform: Platform) -> Box<dyn ScreenReaderDetector + Send + Sync> {
	detector_with(platform, Options::default())
}

pub fn detector_with(
	platform: Platform,
	opts: Options,
) -> Box<dyn ScreenReaderDetector + Send + Sync> {
	match platform {
		Platform::Windows => Box::new(WindowsDetector::new().with_strategy(opts.windows_strategy)),
		Platform::MacOs => Box::new(MacDetector::new().with_timeout(opts.voiceover_timeout)),
		Platform::Other => Box::new(NullDetector),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::Error;

	struct Fixed(fn() -> Result<Option<Signal>>);

	impl ScreenReaderDetector for Fixed {
		fn probe(&self) -> Result<Option<Signal>> {
			(self.0)()
		}
	}

	#[test]
	fn other_platform_is_never_active() {
		let d = detector_for(Platform::Other);
		assert_eq!(d.probe().ok(), Some(None));
		assert!(!d.is_active());
	}

	#[test]
	fn default_options() {
		let opts = Options::default();
		assert_eq!(opts.windows_strategy, WindowsStrategy::HookScan);
		assert_eq!(opts.voiceover_timeout, Duration::from_millis(250));
	}

	#[test]
	fn options_ignored_where_nothing_is_probed() {
		let opts = Options {
			windows_strategy: WindowsStrategy::SystemParameter,
			voiceover_timeout: Duration::ZERO,
		};
		assert_eq!(detector_with(Platform::Other, opts).probe().ok(), Some(None));
	}

	#[test]
	fn collapses_to_bool() {
		assert!(Fixed(|| Ok(Some(Signal::VoiceOver))).is_active());
		assert!(!Fixed(|| Ok(None)).is_active());
		assert!(!Fixed(|| Err(Error::Static("nope"))).is_active());
		assert!(!Fixed(|| Err(Error::Exit(Some(1)))).is_active());
	}

	#[test]
	fn boxed_detectors_delegate() {
		let d: Box<dyn ScreenReaderDetector> = Box::new(Fixed(|| Ok(Some(Signal::SystemFlag))));
		assert_eq!(d.probe().ok(), Some(Some(Signal::SystemFlag)));
		assert!(d.is_active());
	}
}
