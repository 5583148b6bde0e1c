use crate::error::{Result, SweepError};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Reads candidate codes from a newline-delimited source.
///
/// Lines are trimmed and blank lines skipped; the remaining codes keep their
/// order in the source.
pub struct CouponReader<R: BufRead> {
    source: R,
}

impl<R: BufRead> CouponReader<R> {
    pub fn new(source: R) -> Self {
        Self { source }
    }

    pub fn codes(self) -> impl Iterator<Item = Result<String>> {
        self.source.lines().filter_map(|line| match line {
            Ok(line) => {
                let code = line.trim();
                (!code.is_empty()).then(|| Ok(code.to_string()))
            }
            Err(e) => Some(Err(SweepError::from(e))),
        })
    }
}

/// Loads the current candidate list. Called once per cycle so that edits to
/// the file are picked up on the next pass.
pub fn load_coupons(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| {
        SweepError::Config(format!("cannot read coupon list {}: {e}", path.display()))
    })?;
    CouponReader::new(BufReader::new(file)).codes().collect()
}
