//! HTP response framing
//!
//! GTP-style: `= result` on success, `? message` on failure, each
//! terminated by a blank line. A numeric command id, when present, is
//! echoed back directly after the status character.

use std::io::Write;

pub fn htp_success(id: Option<&str>, result: &str) {
    let mut out = std::io::stdout().lock();
    match id {
        Some(id) => {
            let _ = write!(out, "={id} {result}\n\n");
        }
        None => {
            let _ = write!(out, "= {result}\n\n");
        }
    }
    let _ = out.flush();
}

pub fn htp_failure(id: Option<&str>, message: &str) {
    let mut out = std::io::stdout().lock();
    match id {
        Some(id) => {
            let _ = write!(out, "?{id} {message}\n\n");
        }
        None => {
            let _ = write!(out, "? {message}\n\n");
        }
    }
    let _ = out.flush();
}
