use std::{
	io::Read,
	process::{
		Child,
		Command,
		Stdio,
	},
	sync::mpsc::{
		self,
		RecvTimeoutError,
	},
	thread,
	time::{
		Duration,
		Instant,
	},
};

use log::debug;

use crate::error::{
	Error,
	Result,
};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// What a finished command left behind.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Captured {
	pub code: Option<i32>,
	pub success: bool,
	pub stdout: String,
}

/// Runs an external program to completion or until a deadline.
pub trait CommandRunner {
	fn run(&self, program: &str, args: &[&str], timeout: Duration) -> Result<Captured>;
}

/// Spawns real child processes.
#[derive(Copy, Clone, Debug, Default)]
pub struct SystemCommand;

/// Owns a child for the duration of a call. Dropping it kills the child and
/// waits on it so no process handle is leaked.
struct Reaper(Child);

impl Drop for Reaper {
	fn drop(&mut self) {
		// Killing a child that already exited is a no-op.
		let _ = self.0.kill();
		let _ = self.0.wait();
	}
}

impl CommandRunner for SystemCommand {
	fn run(&self, program: &str, args: &[&str], timeout: Duration) -> Result<Captured> {
		let child = Command::new(program)
			.args(args)
			.stdin(Stdio::null())
			.stdout(Stdio::piped())
			.stderr(Stdio::null())
			.spawn()?;
		let mut child = Reaper(child);

		// A descendant can keep the pipe open after the child exits, so the read
		// happens off this thread and is held to the same deadline.
		let (tx, rx) = mpsc::channel();
		if let Some(mut out) = child.0.stdout.take() {
			thread::spawn(move || {
				let mut buf = String::new();
				let _ = tx.send(out.read_to_string(&mut buf).map(|_| buf));
			});
		} else {
			let _ = tx.send(Ok(String::new()));
		}

		let deadline = Instant::now() + timeout;
		let status = loop {
			if let Some(status) = child.0.try_wait()? {
				break status;
			}
			let now = Instant::now();
			if now >= deadline {
				debug!("{program} is still running after {timeout:?}; killing it");
				return Err(Error::Timeout(timeout));
			}
			thread::sleep(POLL_INTERVAL.min(deadline - now));
		};

		let stdout = match rx.recv_timeout(deadline.saturating_duration_since(Instant::now())) {
			Ok(res) => res?,
			Err(RecvTimeoutError::Timeout) => {
				debug!("{program} exited but its output is still open after {timeout:?}");
				return Err(Error::Timeout(timeout));
			}
			Err(RecvTimeoutError::Disconnected) => return Err("the output reader stopped".into()),
		};

		Ok(Captured {
			code: status.code(),
			success: status.success(),
			stdout,
		})
	}
}
