use std::io::{self, BufRead};

use tracing::{info, warn};

/// One parsed `module@version dependency@version` line, versions dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEdge {
    pub module: String,
    pub dependency: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    Blank,
    Edge(RawEdge),
    Invalid { spaces: usize },
}

/// Parses a single line of dependency graph output, e.g.
/// `github.com/acme/api@v1.2.0 github.com/acme/core@v0.4.1`.
pub fn parse_line(line: &str) -> ParsedLine {
    let line = line.trim();
    if line.is_empty() {
        return ParsedLine::Blank;
    }

    let parts: Vec<&str> = line.split(' ').collect();
    let [module, dependency] = parts.as_slice() else {
        return ParsedLine::Invalid {
            spaces: parts.len() - 1,
        };
    };

    ParsedLine::Edge(RawEdge {
        module: strip_version(module).to_string(),
        dependency: strip_version(dependency).to_string(),
    })
}

fn strip_version(spec: &str) -> &str {
    spec.split_once('@').map_or(spec, |(path, _)| path)
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub total: usize,
    pub blank: usize,
    pub invalid: usize,
}

/// Iterator over the edges of a line-oriented input. Malformed lines are
/// logged and skipped; a read error is yielded once and ends the scan.
/// Bytes that are not valid UTF-8 are replaced rather than rejected, so such
/// a line is handled like any other line.
pub struct EdgeScanner<R> {
    reader: R,
    buf: Vec<u8>,
    stats: ScanStats,
    done: bool,
}

impl<R: BufRead> EdgeScanner<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            stats: ScanStats::default(),
            done: false,
        }
    }

    pub fn stats(&self) -> ScanStats {
        self.stats
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }

    fn finish(&mut self) {
        self.done = true;
        info!(
            total = self.stats.total,
            invalid = self.stats.invalid,
            "scanned lines"
        );
    }
}

impl<R: BufRead> Iterator for EdgeScanner<R> {
    type Item = io::Result<RawEdge>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            let line = match self.read_line() {
                Ok(Some(line)) => line,
                Ok(None) => {
                    self.finish();
                    return None;
                }
                Err(err) => {
                    self.finish();
                    return Some(Err(err));
                }
            };
            self.stats.total += 1;

            match parse_line(&line) {
                ParsedLine::Edge(edge) => return Some(Ok(edge)),
                ParsedLine::Blank => self.stats.blank += 1,
                ParsedLine::Invalid { spaces } => {
                    self.stats.invalid += 1;
                    warn!(spaces, line = line.trim(), "invalid line: expected one space");
                }
            }
        }
    }
}
