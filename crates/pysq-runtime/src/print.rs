//! Integer output for generated programs.

use std::io::{self, Write};

use log::warn;

/// Write `value` in decimal followed by a newline.
///
/// The line reaches `out` in a single `write_all`.
pub fn print_to<W: Write + ?Sized>(out: &mut W, value: i32) -> io::Result<()> {
    out.write_all(format!("{value}\n").as_bytes())
}

/// Write `value` in decimal followed by a newline to standard output.
///
/// Never fails from the caller's point of view; a broken stdout is logged.
pub fn print(value: i32) {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    if let Err(e) = print_to(&mut lock, value).and_then(|()| lock.flush()) {
        warn!("print: failed to write {value} to stdout: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn printed(value: i32) -> String {
        let mut buf = Vec::new();
        print_to(&mut buf, value).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn zero() {
        assert_eq!(printed(0), "0\n");
    }

    #[test]
    fn negative() {
        assert_eq!(printed(-5), "-5\n");
    }

    #[test]
    fn extremes() {
        assert_eq!(printed(i32::MAX), "2147483647\n");
        assert_eq!(printed(i32::MIN), "-2147483648\n");
    }

    #[test]
    fn consecutive_values_one_per_line() {
        let mut buf = Vec::new();
        for v in [1, 22, 333] {
            print_to(&mut buf, v).unwrap();
        }
        assert_eq!(buf, b"1\n22\n333\n");
    }

    #[test]
    fn works_through_dyn_writer() {
        let mut buf = Vec::new();
        let out: &mut dyn Write = &mut buf;
        print_to(out, 12).unwrap();
        assert_eq!(buf, b"12\n");
    }
}
