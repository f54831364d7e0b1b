use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufRead, BufReader};

use camino::Utf8Path;

use crate::error::{Error, Result};

/// Return the last `limit` lines of the file at `path`, oldest of the
/// selected window first.
///
/// A file shorter than `limit` yields all of its lines. Line terminators are
/// stripped and log bytes are decoded lossily; web server logs are not
/// trusted to be valid UTF-8.
pub fn tail_lines(path: &Utf8Path, limit: usize) -> Result<Vec<String>> {
    if limit == 0 {
        return Ok(Vec::new());
    }

    let file = File::open(path).map_err(|source| Error::LogRead {
        path: path.to_owned(),
        source,
    })?;
    let mut rdr = BufReader::new(file);

    let mut window: VecDeque<String> = VecDeque::with_capacity(limit.min(4096));
    let mut buf = Vec::with_capacity(1024);
    loop {
        buf.clear();
        let n = rdr
            .read_until(b'\n', &mut buf)
            .map_err(|source| Error::LogRead {
                path: path.to_owned(),
                source,
            })?;
        if n == 0 {
            break;
        }

        let mut content: &[u8] = &buf;
        if content.last() == Some(&b'\n') {
            content = &content[..content.len() - 1];
        }
        if content.last() == Some(&b'\r') {
            content = &content[..content.len() - 1];
        }

        if window.len() == limit {
            window.pop_front();
        }
        window.push_back(String::from_utf8_lossy(content).into_owned());
    }

    Ok(window.into())
}
