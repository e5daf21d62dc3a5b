use std::{
	io,
	time::Duration,
};

use derive_more::{
	Display,
	From,
};
#[cfg(windows)]
use windows::core::Error as WinError;

use crate::platform::Platform;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Display, From)]
pub enum Error {
	Static(&'static str),
	Io(io::Error),
	#[display("the command did not exit within {_0:?}")]
	Timeout(Duration),
	#[display("the command exited with {}", match _0 {
		Some(code) => format!("status {code}"),
		None => "no status code".to_owned(),
	})]
	Exit(Option<i32>),
	#[display("the probe is not available on {_0}")]
	Unsupported(Platform),
	#[cfg(windows)]
	Win(WinError),
}

impl std::error::Error for Error {}
