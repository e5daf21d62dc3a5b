use std::process::{
	Command,
	Output,
};

fn srprobe(args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_srprobe"))
		.args(args)
		.env_remove("RUST_LOG")
		.output()
		.expect("failed to run srprobe")
}

#[test]
fn version() {
	let out = srprobe(&["-V"]);
	assert!(out.status.success());
	assert_eq!(
		String::from_utf8_lossy(&out.stdout).trim(),
		format!("srprobe {}", env!("CARGO_PKG_VERSION"))
	);
}

#[test]
fn usage_errors_exit_2() {
	for args in [&["--bogus"][..], &["-t"][..], &["--timeout=soon"][..], &["extra"][..]] {
		let out = srprobe(args);
		assert_eq!(out.status.code(), Some(2), "args: {args:?}");
		assert!(String::from_utf8_lossy(&out.stderr).starts_with("error: "));
	}
}

#[test]
fn status_matches_output() {
	let out = srprobe(&["-t", "250"]);
	let stdout = String::from_utf8_lossy(&out.stdout);
	match out.status.code() {
		Some(0) => assert_eq!(stdout.trim(), "active"),
		Some(1) => assert_eq!(stdout.trim(), "inactive"),
		code => panic!("unexpected exit status {code:?}"),
	}
}

#[cfg(not(any(windows, target_os = "macos")))]
#[test]
fn inactive_elsewhere() {
	let out = srprobe(&["-qv"]);
	assert_eq!(out.status.code(), Some(1));
	assert!(out.stdout.is_empty());
	assert!(String::from_utf8_lossy(&out.stderr).contains("probing for a screen reader on other"));
}
