//! Interactive confirmation before anything is deleted

use std::io::{BufRead, Write};

use crate::filter::Cutoff;

/// Ask whether to delete tweets older than `cutoff`
///
/// Only `y` (either case) counts as yes. Anything else, including end of
/// input, is a no.
pub fn confirm_deletion<R, W>(input: &mut R, output: &mut W, cutoff: &Cutoff) -> std::io::Result<bool>
where
    R: BufRead,
    W: Write,
{
    write!(
        output,
        "Delete tweets older than {}? [y/n] ",
        cutoff.long_label()
    )?;
    output.flush()?;

    let mut answer = String::new();
    input.read_line(&mut answer)?;

    Ok(answer.trim().eq_ignore_ascii_case("y"))
}
