//! Screen reader detection on Windows.
//!
//! `SPI_GETSCREENREADER` is the documented way to ask, but Narrator never sets
//! it and third party readers set it inconsistently. The default strategy
//! instead looks for the mutex Narrator holds while it runs and for the hook
//! libraries other readers inject into every process.

use std::borrow::Cow;

use log::debug;
#[cfg(windows)]
use windows::{
	core::HSTRING,
	Win32::{
		Foundation::{
			CloseHandle,
			BOOL,
			ERROR_FILE_NOT_FOUND,
			ERROR_MOD_NOT_FOUND,
		},
		System::{
			LibraryLoader::GetModuleHandleW,
			Threading::{
				OpenMutexW,
				SYNCHRONIZATION_SYNCHRONIZE,
			},
		},
		UI::WindowsAndMessaging::{
			SystemParametersInfoW,
			SPI_GETSCREENREADER,
			SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS,
		},
	},
};

use crate::{
	detector::{
		ScreenReaderDetector,
		Signal,
	},
	error::Result,
};

pub const NARRATOR_MUTEX: &str = "NarratorRunning";

pub const KNOWN_HOOK_LIBRARIES: &[&str] = &[
	// NVDA
	"nvdaHelperRemote.dll",
	// JAWS
	"jhook.dll",
	// Window-Eyes
	"gwhk64.dll",
	"gwmhook.dll",
	// ZoomText
	"AiSquared.Infuser.HookLib.dll",
];

/// The OS queries the Windows detector relies on.
pub trait WindowsApi {
	/// Whether a named mutex exists, without creating it.
	fn mutex_exists(&self, name: &str) -> Result<bool>;
	/// Whether a module with this name is loaded into the current process.
	fn module_loaded(&self, name: &str) -> Result<bool>;
	/// The `SPI_GETSCREENREADER` system parameter.
	fn screen_reader_flag(&self) -> Result<bool>;
}

#[derive(Copy, Clone, Debug, Default)]
pub struct SystemWindowsApi;

#[cfg(windows)]
impl WindowsApi for SystemWindowsApi {
	fn mutex_exists(&self, name: &str) -> Result<bool> {
		let name = HSTRING::from(name);
		unsafe {
			match OpenMutexW(SYNCHRONIZATION_SYNCHRONIZE, false, &name) {
				Ok(handle) => {
					let _ = CloseHandle(handle);
					Ok(true)
				}
				Err(e) if e.code() == ERROR_FILE_NOT_FOUND.to_hresult() => Ok(false),
				Err(e) => Err(e.into()),
			}
		}
	}

	fn module_loaded(&self, name: &str) -> Result<bool> {
		let name = HSTRING::from(name);
		// The handle is not reference counted, nothing to release.
		match unsafe { GetModuleHandleW(&name) } {
			Ok(_) => Ok(true),
			Err(e) if e.code() == ERROR_MOD_NOT_FOUND.to_hresult() => Ok(false),
			Err(e) => Err(e.into()),
		}
	}

	fn screen_reader_flag(&self) -> Result<bool> {
		let mut yes = BOOL(0);
		unsafe {
			SystemParametersInfoW(
				SPI_GETSCREENREADER,
				0,
				Some(&mut yes as *mut _ as *mut _),
				SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS(0),
			)?;
		}

		Ok(yes.as_bool())
	}
}

#[cfg(not(windows))]
impl WindowsApi for SystemWindowsApi {
	fn mutex_exists(&self, _: &str) -> Result<bool> {
		Err(unsupported())
	}

	fn module_loaded(&self, _: &str) -> Result<bool> {
		Err(unsupported())
	}

	fn screen_reader_flag(&self) -> Result<bool> {
		Err(unsupported())
	}
}

#[cfg(not(windows))]
fn unsupported() -> crate::error::Error {
	crate::error::Error::Unsupported(crate::platform::Platform::current())
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum WindowsStrategy {
	/// The Narrator mutex, then the known hook libraries.
	#[default]
	HookScan,
	/// Only `SPI_GETSCREENREADER`. Does not detect Narrator.
	SystemParameter,
}

#[derive(Clone, Debug)]
pub struct WindowsDetector<A = SystemWindowsApi> {
	api: A,
	strategy: WindowsStrategy,
	libraries: Vec<Cow<'static, str>>,
}

impl WindowsDetector {
	pub fn new() -> Self {
		Self::with_api(SystemWindowsApi)
	}
}

impl Default for WindowsDetector {
	fn default() -> Self {
		Self::new()
	}
}

impl<A: WindowsApi> WindowsDetector<A> {
	pub fn with_api(api: A) -> Self {
		Self {
			api,
			strategy: WindowsStrategy::default(),
			libraries: KNOWN_HOOK_LIBRARIES
				.iter()
				.map(|&s| Cow::Borrowed(s))
				.collect(),
		}
	}

	pub fn with_strategy(mut self, strategy: WindowsStrategy) -> Self {
		self.strategy = strategy;
		self
	}

	/// Appends module names to the hook library scan.
	pub fn with_libraries<I, S>(mut self, names: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<Cow<'static, str>>,
	{
		self.libraries.extend(names.into_iter().map(Into::into));
		self
	}

	pub fn strategy(&self) -> WindowsStrategy {
		self.strategy
	}

	pub fn libraries(&self) -> impl Iterator<Item = &str> {
		self.libraries.iter().map(|s| &**s)
	}

	fn hook_scan(&self) -> Result<Option<Signal>> {
		// Remember the first failure; it only matters if nothing else is found.
		let mut failure = None;

		match self.api.mutex_exists(NARRATOR_MUTEX) {
			Ok(true) => return Ok(Some(Signal::NarratorMutex)),
			Ok(false) => (),
			Err(e) => {
				debug!("could not query the {NARRATOR_MUTEX} mutex: {e}");
				failure = Some(e);
			}
		}

		for lib in self.libraries() {
			match self.api.module_loaded(lib) {
				Ok(true) => return Ok(Some(Signal::HookLibrary(lib.to_owned()))),
				Ok(false) => (),
				Err(e) => {
					debug!("could not look up module {lib}: {e}");
					failure.get_or_insert(e);
				}
			}
		}

		match failure {
			Some(e) => Err(e),
			None => Ok(None),
		}
	}
}

impl<A: WindowsApi> ScreenReaderDetector for WindowsDetector<A> {
	fn probe(&self) -> Result<Option<Signal>> {
		match self.strategy {
			WindowsStrategy::HookScan => self.hook_scan(),
			WindowsStrategy::SystemParameter => Ok(self
				.api
				.screen_reader_flag()?
				.then_some(Signal::SystemFlag)),
		}
	}
}
