//! Conversion warnings with colored terminal output.
//!
//! Provides deduplication to avoid spamming the same warning multiple times.
//! Used by the HTML serializer and the out-of-band pass to report output
//! that had to be dropped or moved.
//!
//! Warnings are recorded per thread: a render never crosses threads, so
//! each thread sees exactly the warnings its own renders produced.

use std::cell::RefCell;
use std::collections::HashSet;

use owo_colors::OwoColorize;

#[derive(Default)]
struct WarningLog {
    /// Keys already printed (to deduplicate).
    seen: HashSet<String>,
    /// Messages printed since the last [`take_warnings`] or [`clear_warnings`].
    recorded: Vec<String>,
}

thread_local! {
    static WARNED: RefCell<WarningLog> = RefCell::new(WarningLog::default());
}

/// Warn about lossy output (prints once per unique message).
///
/// # Example
/// ```ignore
/// warn_once("HTML", "void element <br> cannot have children");
/// ```
pub fn warn_once(component: &str, message: &str) {
    let key = format!("[{component}] {message}");
    let should_print = WARNED.with(|log| {
        let mut log = log.borrow_mut();
        let fresh = log.seen.insert(key.clone());
        if fresh {
            log.recorded.push(key);
        }
        fresh
    });

    if should_print {
        let line = format!("[Trellis {component}] ⚠ {message}");
        eprintln!("{}", line.yellow());
    }
}

/// Return the warnings printed on this thread since the last call, oldest first.
///
/// Deduplication state is kept, so a repeated warning is not reported again.
#[must_use]
pub fn take_warnings() -> Vec<String> {
    WARNED.with(|log| std::mem::take(&mut log.borrow_mut().recorded))
}

/// Clear all recorded warnings (call before converting a new document)
pub fn clear_warnings() {
    WARNED.with(|log| {
        let mut log = log.borrow_mut();
        log.seen.clear();
        log.recorded.clear();
    });
}
