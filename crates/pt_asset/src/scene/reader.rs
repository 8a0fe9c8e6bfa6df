use std::{
    fs,
    io::{self, BufRead},
    path::Path,
    str,
};

use log::{debug, trace};

use super::error::{FormatError, ParseError};

/// Longest line accepted in geometry and material files, in bytes.
pub const MAX_LINE_LENGTH: usize = 255;

// Feeds every directive of a line-oriented file to `handle` as
// (1-based line number, keyword, operands). Blank lines and comments are skipped.
pub(super) fn read_directives<F>(path: &Path, mut handle: F) -> Result<(), ParseError>
where
    F: FnMut(usize, &str, &[&str]) -> Result<(), ParseError>,
{
    let file = fs::File::open(path).map_err(|err| ParseError::io(path, err))?;
    let total = file
        .metadata()
        .map_err(|err| ParseError::io(path, err))?
        .len();
    let mut reader = io::BufReader::new(file);

    let mut buffer = Vec::new();
    let mut consumed = 0;
    let mut reported = 0;
    let mut number = 0;
    loop {
        buffer.clear();
        let read = reader
            .read_until(b'\n', &mut buffer)
            .map_err(|err| ParseError::io(path, err))?;
        if read == 0 {
            break;
        }
        number += 1;
        consumed += read as u64;

        let step = progress_step(consumed, total);
        if step > reported {
            reported = step;
            debug!("Loading {}: {}%", path.display(), step);
        }

        let line = trim_line_ending(&buffer);
        if line.len() > MAX_LINE_LENGTH {
            return Err(ParseError::format(
                path,
                number,
                FormatError::LineTooLong {
                    length: line.len(),
                    limit: MAX_LINE_LENGTH,
                },
            ));
        }
        let line = str::from_utf8(line)
            .map_err(|err| ParseError::format(path, number, FormatError::InvalidEncoding(err)))?;

        let mut tokens = line.split_whitespace();
        let keyword = match tokens.next() {
            Some(keyword) if !keyword.starts_with('#') => keyword,
            _ => continue,
        };
        let operands: Vec<&str> = tokens.collect();

        trace!("{}:{}: {} {:?}", path.display(), number, keyword, operands);
        handle(number, keyword, &operands)?;
    }

    Ok(())
}

// strips `\n` or `\r\n`, like `BufRead::lines`
fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

// load progress in steps of 10 percent
fn progress_step(consumed: u64, total: u64) -> u64 {
    if total == 0 {
        return 100;
    }
    consumed.min(total) * 10 / total * 10
}

pub(super) fn parse_float(token: &str) -> Result<f32, FormatError> {
    token.parse().map_err(|source| FormatError::InvalidFloat {
        token: token.into(),
        source,
    })
}

// parses the first `N` operands as floats, ignoring any extra ones
pub(super) fn parse_floats<const N: usize>(
    directive: &str,
    operands: &[&str],
) -> Result<[f32; N], FormatError> {
    if operands.len() < N {
        return Err(FormatError::missing(directive, N, operands.len()));
    }

    let mut values = [0.0; N];
    for (value, token) in values.iter_mut().zip(operands) {
        *value = parse_float(token)?;
    }
    Ok(values)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_floats() -> Result<(), FormatError> {
        assert_eq!(parse_floats::<3>("v", &["1", "-2.5", "3e2"])?, [1.0, -2.5, 300.0]);
        assert_eq!(parse_floats::<3>("v", &["1", "2", "3", "1"])?, [1.0, 2.0, 3.0]);

        assert!(matches!(
            parse_floats::<3>("Kd", &["1", "2"]),
            Err(FormatError::MissingOperand { expected: 3, found: 2, .. })
        ));
        assert!(matches!(
            parse_floats::<3>("vn", &["1", "y", "3"]),
            Err(FormatError::InvalidFloat { token, .. }) if token == "y"
        ));

        Ok(())
    }

    #[test]
    fn test_trim_line_ending() {
        assert_eq!(trim_line_ending(b"v 1 2 3\n"), b"v 1 2 3");
        assert_eq!(trim_line_ending(b"v 1 2 3\r\n"), b"v 1 2 3");
        assert_eq!(trim_line_ending(b"v 1 2 3"), b"v 1 2 3");
        assert_eq!(trim_line_ending(b"\n"), b"");
    }

    #[test]
    fn test_progress_step() {
        assert_eq!(progress_step(0, 200), 0);
        assert_eq!(progress_step(19, 200), 0);
        assert_eq!(progress_step(20, 200), 10);
        assert_eq!(progress_step(199, 200), 90);
        assert_eq!(progress_step(200, 200), 100);
        assert_eq!(progress_step(10, 0), 100);
    }
}
