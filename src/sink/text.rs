//! Text renderers
//!
//! Fixed-precision sample formatting shared by every text sink.

use std::io::Write;

use crate::source::delimited::DELIMITER;

/// Format one sample with `precision` decimal places
pub fn format_sample(sample: f64, precision: u8) -> String {
    format!("{:.*}", precision as usize, sample)
}

/// Write one sample per line
pub fn write_columns<W: Write + ?Sized>(
    out: &mut W,
    samples: &[f64],
    precision: u8,
) -> std::io::Result<()> {
    for &sample in samples {
        writeln!(out, "{}", format_sample(sample, precision))?;
    }
    Ok(())
}

/// Write samples joined by the delimiter, without a trailing delimiter
pub fn write_delimited<W: Write + ?Sized>(
    out: &mut W,
    samples: &[f64],
    precision: u8,
) -> std::io::Result<()> {
    for (i, &sample) in samples.iter().enumerate() {
        if i > 0 {
            write!(out, "{}", DELIMITER)?;
        }
        write!(out, "{}", format_sample(sample, precision))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> std::io::Result<()>,
    {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_delimited_has_no_trailing_delimiter() {
        let text = render(|out| write_delimited(out, &[1.5, 2.25], 2));
        assert_eq!(text, "1.50,2.25");
    }

    #[test]
    fn test_delimited_renders_every_sample() {
        let text = render(|out| write_delimited(out, &[0.0, 1.0, 2.5, 4.0, 1.5], 1));
        assert_eq!(text, "0.0,1.0,2.5,4.0,1.5");

        let single = render(|out| write_delimited(out, &[7.0], 3));
        assert_eq!(single, "7.000");
    }

    #[test]
    fn test_columns() {
        let text = render(|out| write_columns(out, &[1.0, -0.5], 6));
        assert_eq!(text, "1.000000\n-0.500000\n");
    }

    #[test]
    fn test_zero_precision_rounds() {
        assert_eq!(format_sample(2.6, 0), "3");
        assert_eq!(format_sample(-0.126, 2), "-0.13");
    }
}
