// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Miscellaneous things.

use std::{
    thread,
    time::{Duration, Instant},
};

use console::Term;
use crossbeam_channel::{bounded, RecvTimeoutError};
use is_terminal::IsTerminal;

/// Nothing is printed for operations quicker than this.
const QUIET_PERIOD: Duration = Duration::from_secs(2);
const UPDATE_PERIOD: Duration = Duration::from_millis(250);

fn is_a_tty() -> bool {
    std::io::stdout().is_terminal() || std::io::stderr().is_terminal()
}

/// A single line on stderr that is rewritten in place.
struct WaitLine {
    term: Term,
    printed: bool,
}

impl WaitLine {
    fn update(&mut self, message: &str, waited: Duration) {
        // Terminal errors only cost us the message.
        self.clear();
        self.printed = self
            .term
            .write_line(&format!("{message}: {:.2}s", waited.as_secs_f64()))
            .is_ok();
    }

    fn clear(&mut self) {
        if self.printed {
            let _ = self.term.move_cursor_up(1);
            let _ = self.term.clear_line();
            self.printed = false;
        }
    }
}

/// Run `func` on another thread. If it takes longer than a couple of seconds
/// and we're attached to a terminal, keep the user informed with
/// `wait_message` and the time spent waiting until `func` returns.
pub(crate) fn expensive_op<F, R>(func: F, wait_message: &str) -> R
where
    F: FnOnce() -> R + Send,
    R: Send,
{
    let (tx, rx) = bounded(1);

    thread::scope(|s| {
        let worker = s.spawn(move || {
            // The receiver outlives this thread.
            let _ = tx.send(func());
        });

        let mut line = is_a_tty().then(|| WaitLine {
            term: Term::stderr(),
            printed: false,
        });
        let start = Instant::now();
        loop {
            match rx.recv_timeout(UPDATE_PERIOD) {
                Ok(r) => {
                    if let Some(line) = line.as_mut() {
                        line.clear();
                    }
                    return r;
                }

                Err(RecvTimeoutError::Timeout) => {
                    let waited = start.elapsed();
                    if waited >= QUIET_PERIOD {
                        if let Some(line) = line.as_mut() {
                            line.update(wait_message, waited);
                        }
                    }
                }

                // The worker panicked before sending anything; pass the panic
                // on.
                Err(RecvTimeoutError::Disconnected) => match worker.join() {
                    Err(panic) => std::panic::resume_unwind(panic),
                    Ok(()) => unreachable!("the worker always sends before finishing"),
                },
            }
        }
    })
}
