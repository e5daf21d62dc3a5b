use derive_more::Display;

/// The operating system family a detector is chosen for.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Display)]
pub enum Platform {
	#[display("windows")]
	Windows,
	#[display("macos")]
	MacOs,
	#[display("other")]
	Other,
}

impl Platform {
	pub const fn current() -> Self {
		if cfg!(windows) {
			Self::Windows
		} else if cfg!(target_os = "macos") {
			Self::MacOs
		} else {
			Self::Other
		}
	}
}
