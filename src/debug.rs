use std::sync::atomic::{AtomicBool, Ordering};

static DEBUG: AtomicBool = AtomicBool::new(false);

/// Turns the diagnostic trace on or off for the whole process.
pub fn set_debug(val: bool) {
	DEBUG.store(val, Ordering::Relaxed);
}

pub fn get_debug() -> bool {
	DEBUG.load(Ordering::Relaxed)
}

/// Writes a trace line to stderr, tagged with the calling module, when the
/// trace is enabled.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {{
        if $crate::debug::get_debug() {
            use $crate::colorize::Colorize as _;

            eprintln!("{} {}", module_path!().namespace(), format_args!($($arg)*));
        }
    }};
}

#[cfg(test)]
mod tests {
	use super::{get_debug, set_debug};

	#[test]
	fn test_debug_switch() {
		set_debug(true);
		assert!(get_debug());
		crate::debug!("trace {}", 1);

		set_debug(false);
		assert!(!get_debug());
	}
}
