use std::{
	borrow::Cow,
	collections::VecDeque,
};

/// Splits `--flag=value` and bundled short flags (`-qv`, `-t500`) into
/// separate arguments. Everything after `--` passes through untouched.
pub struct Args<'a> {
	pending: VecDeque<Cow<'a, str>>,
	rest: std::slice::Iter<'a, String>,
	verbatim: bool,
	takes_value: &'static str,
}

impl<'a> Args<'a> {
	pub fn new(argv: &'a [String], takes_value: &'static str) -> Self {
		Self {
			pending: VecDeque::new(),
			rest: argv.iter(),
			verbatim: false,
			takes_value,
		}
	}

	fn split_shorts(&mut self, flags: &'a str) {
		for (i, c) in flags.char_indices() {
			self.pending.push_back(Cow::Owned(format!("-{c}")));
			if self.takes_value.contains(c) {
				let val = &flags[i + c.len_utf8()..];
				if !val.is_empty() {
					self.pending.push_back(Cow::Borrowed(val));
				}
				return;
			}
		}
	}
}

impl<'a> Iterator for Args<'a> {
	type Item = Cow<'a, str>;

	fn next(&mut self) -> Option<Self::Item> {
		if let Some(a) = self.pending.pop_front() {
			return Some(a);
		}

		let s = self.rest.next()?.as_str();
		if self.verbatim {
			return Some(Cow::Borrowed(s));
		}
		if s == "--" {
			self.verbatim = true;
			return Some(Cow::Borrowed(s));
		}

		if let Some(long) = s.strip_prefix("--") {
			if let Some((flag, val)) = long.split_once('=') {
				self.pending.push_back(Cow::Borrowed(val));
				return Some(Cow::Borrowed(&s[..flag.len() + 2]));
			}
			return Some(Cow::Borrowed(s));
		}

		match s.strip_prefix('-') {
			Some(flags) if flags.chars().nth(1).is_some() => {
				self.split_shorts(flags);
				self.pending.pop_front()
			}
			_ => Some(Cow::Borrowed(s)),
		}
	}
}
